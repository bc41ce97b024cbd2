//! Integration tests for the colab client, views and PDF export

mod config_integration;
mod export_pdf;
pub mod support;
pub mod test_utils;
