//! Arena node representation for CART trees.

use serde::{Deserialize, Serialize};

/// A node in a tree arena. Children are referenced by arena index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    /// Interior node: samples with `value <= threshold` go left.
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
        n_samples: usize,
        /// Weighted impurity decrease, used for feature importances.
        impurity_decrease: f64,
    },
    /// Terminal node holding the training class distribution.
    Leaf {
        distribution: Vec<f64>,
        n_samples: usize,
    },
}

impl Node {
    pub fn n_samples(&self) -> usize {
        match self {
            Node::Split { n_samples, .. } | Node::Leaf { n_samples, .. } => *n_samples,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }
}
