//! Property-based tests for activity grouping and page slicing

mod grouping;
mod pagination;
