//! CART decision tree grown over bootstrap sample indices.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::node::Node;
use super::split::best_split;

/// Resolved per-tree growth parameters.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TreeParams {
    pub(crate) max_features: usize,
    pub(crate) max_depth: Option<usize>,
    pub(crate) min_samples_split: usize,
    pub(crate) min_samples_leaf: usize,
}

/// A fitted decision tree stored as a node arena rooted at index 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    nodes: Vec<Node>,
    n_features: usize,
}

struct TreeBuilder<'a> {
    columns: &'a [Vec<f64>],
    labels: &'a [usize],
    n_classes: usize,
    params: TreeParams,
    nodes: Vec<Node>,
}

impl TreeBuilder<'_> {
    fn push_leaf(&mut self, class_counts: &[usize], n_samples: usize) -> usize {
        let total = n_samples as f64;
        let distribution = class_counts.iter().map(|&c| c as f64 / total).collect();
        self.nodes.push(Node::Leaf {
            distribution,
            n_samples,
        });
        self.nodes.len() - 1
    }

    fn build<R: Rng>(&mut self, samples: Vec<usize>, depth: usize, rng: &mut R) -> usize {
        let n_samples = samples.len();
        let mut class_counts = vec![0usize; self.n_classes];
        for &s in &samples {
            class_counts[self.labels[s]] += 1;
        }

        let pure = class_counts.iter().filter(|&&c| c > 0).count() <= 1;
        let depth_reached = self.params.max_depth.is_some_and(|max| depth >= max);
        if pure || depth_reached || n_samples < self.params.min_samples_split {
            return self.push_leaf(&class_counts, n_samples);
        }

        let Some(split) = best_split(
            self.columns,
            self.labels,
            &samples,
            &class_counts,
            &self.params,
            rng,
        ) else {
            return self.push_leaf(&class_counts, n_samples);
        };
        drop(samples);

        // Reserve the slot so the subtree indices follow it in the arena.
        let index = self.nodes.len();
        self.nodes.push(Node::Leaf {
            distribution: Vec::new(),
            n_samples,
        });

        let left = self.build(split.left, depth + 1, rng);
        let right = self.build(split.right, depth + 1, rng);

        self.nodes[index] = Node::Split {
            feature: split.feature,
            threshold: split.threshold,
            left,
            right,
            n_samples,
            impurity_decrease: split.impurity_decrease,
        };
        index
    }
}

impl DecisionTree {
    /// Grow a tree on the rows named by `samples` (repeats allowed).
    pub(crate) fn grow<R: Rng>(
        columns: &[Vec<f64>],
        labels: &[usize],
        samples: Vec<usize>,
        n_classes: usize,
        params: TreeParams,
        rng: &mut R,
    ) -> Self {
        let mut builder = TreeBuilder {
            columns,
            labels,
            n_classes,
            params,
            nodes: Vec::new(),
        };
        builder.build(samples, 0, rng);
        Self {
            nodes: builder.nodes,
            n_features: columns.len(),
        }
    }

    /// Leaf class distribution for `sample`. Width is checked by the forest.
    pub(crate) fn leaf_distribution(&self, sample: &[f64]) -> &[f64] {
        let mut index = 0usize;
        loop {
            match &self.nodes[index] {
                Node::Leaf { distribution, .. } => return distribution,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                    ..
                } => {
                    index = if sample[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }

    /// Mean-decrease-in-impurity importances, normalized to sum to 1
    /// (all zeros for a single-leaf tree).
    pub fn feature_importances(&self) -> Vec<f64> {
        let mut totals = vec![0.0f64; self.n_features];
        for node in &self.nodes {
            if let Node::Split {
                feature,
                impurity_decrease,
                ..
            } = node
            {
                totals[*feature] += impurity_decrease;
            }
        }
        let sum: f64 = totals.iter().sum();
        if sum > 0.0 {
            totals.iter_mut().for_each(|v| *v /= sum);
        }
        totals
    }

    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn n_leaves(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    /// Depth of the deepest leaf; a lone root leaf has depth 0.
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(0usize, 0usize)];
        while let Some((index, depth)) = stack.pop() {
            match &self.nodes[index] {
                Node::Leaf { .. } => max_depth = max_depth.max(depth),
                Node::Split { left, right, .. } => {
                    stack.push((*left, depth + 1));
                    stack.push((*right, depth + 1));
                }
            }
        }
        max_depth
    }
}
