//! Pipeline module - load, preprocess, train, persist

pub mod config;
pub mod error;
pub mod loader;
pub mod missing;
pub mod model;
pub mod persist;
pub mod preprocess;
pub mod split;
pub mod target;
pub mod train;

pub use config::*;
pub use error::*;
pub use loader::*;
pub use missing::*;
pub use model::*;
pub use persist::*;
pub use preprocess::*;
pub use split::*;
pub use target::*;
pub use train::*;
