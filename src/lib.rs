//! colab: Collaborative Process Administration
//!
//! Client library and CLI for a remote collaborative process service:
//! typed CRUD over processes, rounds, activities and their catalogs, the
//! grouped process view, and paginated PDF export of that view.

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod logging;
pub mod model;
pub mod search;
pub mod state;
pub mod views;
