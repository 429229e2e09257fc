//! corrsel: Correlation Feature Selection Library
//!
//! Selects features from a time-indexed dataset by their correlation with a
//! target column, pruning features that are redundant with each other.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;
