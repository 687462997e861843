//! Report module - classification metrics and run summaries

pub mod classification;
pub mod export;
pub mod summary;

pub use classification::*;
pub use export::*;
pub use summary::*;
