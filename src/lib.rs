//! fraud-trainer: Random-forest fraud classifier training
//!
//! A library for loading transaction data, filling missing values,
//! fitting a seeded random forest, and persisting the model.

pub mod cli;
pub mod forest;
pub mod pipeline;
pub mod report;
pub mod utils;
