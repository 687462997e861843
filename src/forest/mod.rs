//! Random-forest classifier: CART trees with Gini splits, bootstrap
//! resampling and seeded, order-stable parallel training.

mod config;
mod error;
#[allow(clippy::module_inception)]
mod forest;
mod node;
mod predict;
mod split;
mod tree;

pub use config::{ForestConfig, MaxFeatures};
pub use error::ForestError;
pub use forest::RandomForest;
pub use node::Node;
pub use tree::DecisionTree;
