//! Gini impurity and exhaustive threshold search.

use rand::seq::SliceRandom;
use rand::Rng;

use super::tree::TreeParams;

/// Best split found for a node, with the partitioned sample indices.
#[derive(Debug, Clone)]
pub(crate) struct Split {
    pub(crate) feature: usize,
    pub(crate) threshold: f64,
    pub(crate) impurity_decrease: f64,
    pub(crate) left: Vec<usize>,
    pub(crate) right: Vec<usize>,
}

/// Gini impurity `1 - sum(p_i^2)`; zero for an empty node.
pub(crate) fn gini(class_counts: &[usize], n_samples: usize) -> f64 {
    if n_samples == 0 {
        return 0.0;
    }
    let n = n_samples as f64;
    let sum_sq: f64 = class_counts
        .iter()
        .map(|&c| {
            let p = c as f64 / n;
            p * p
        })
        .sum();
    1.0 - sum_sq
}

/// Midpoint between two adjacent distinct values, falling back to `low`
/// when rounding would land on `high`.
fn midpoint(low: f64, high: f64) -> f64 {
    let mid = low / 2.0 + high / 2.0;
    if mid >= high || !mid.is_finite() {
        low
    } else {
        mid
    }
}

/// Search a random order of features for the split with the largest
/// weighted impurity decrease.
///
/// At least `params.max_features` features are examined. When none of them
/// admits a valid partition the search continues through the remaining
/// features until one does. Returns `None` when no feature can be split
/// (all constant, or every boundary violates `min_samples_leaf`).
///
/// `columns` is column-major: `columns[feature][sample]`.
pub(crate) fn best_split<R: Rng>(
    columns: &[Vec<f64>],
    labels: &[usize],
    samples: &[usize],
    parent_counts: &[usize],
    params: &TreeParams,
    rng: &mut R,
) -> Option<Split> {
    let n_samples = samples.len();
    if n_samples < 2 || columns.is_empty() {
        return None;
    }
    let parent_impurity = gini(parent_counts, n_samples);

    let mut order: Vec<usize> = (0..columns.len()).collect();
    order.shuffle(rng);

    let mut best: Option<(usize, f64, f64)> = None;
    let mut sorted: Vec<(f64, usize)> = Vec::with_capacity(n_samples);

    for (visited, &feature) in order.iter().enumerate() {
        if visited >= params.max_features && best.is_some() {
            break;
        }

        let column = &columns[feature];
        sorted.clear();
        sorted.extend(samples.iter().map(|&s| (column[s], labels[s])));
        sorted.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut left_counts = vec![0usize; parent_counts.len()];
        let mut right_counts = parent_counts.to_vec();

        for i in 0..n_samples - 1 {
            let (value, label) = sorted[i];
            left_counts[label] += 1;
            right_counts[label] -= 1;

            let next = sorted[i + 1].0;
            if value == next {
                continue;
            }

            let n_left = i + 1;
            let n_right = n_samples - n_left;
            if n_left < params.min_samples_leaf || n_right < params.min_samples_leaf {
                continue;
            }

            let decrease = n_samples as f64 * parent_impurity
                - n_left as f64 * gini(&left_counts, n_left)
                - n_right as f64 * gini(&right_counts, n_right);

            if best.map_or(true, |(_, _, d)| decrease > d) {
                best = Some((feature, midpoint(value, next), decrease));
            }
        }
    }

    let (feature, threshold, impurity_decrease) = best?;
    let column = &columns[feature];
    let (left, right): (Vec<usize>, Vec<usize>) = samples
        .iter()
        .copied()
        .partition(|&s| column[s] <= threshold);

    Some(Split {
        feature,
        threshold,
        impurity_decrease,
        left,
        right,
    })
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    fn params(max_features: usize) -> TreeParams {
        TreeParams {
            max_features,
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
        }
    }

    #[test]
    fn test_gini_pure_and_balanced() {
        assert!(gini(&[10, 0], 10).abs() < f64::EPSILON);
        assert!((gini(&[5, 5], 10) - 0.5).abs() < 1e-12);
        assert_eq!(gini(&[0, 0], 0), 0.0);
    }

    #[test]
    fn test_separable_feature_found() {
        // feature 0 is noise, feature 1 separates the classes at 5.0
        let columns = vec![
            vec![1.0, 1.0, 1.0, 1.0, 1.0, 1.0],
            vec![1.0, 2.0, 3.0, 7.0, 8.0, 9.0],
        ];
        let labels = vec![0, 0, 0, 1, 1, 1];
        let samples: Vec<usize> = (0..6).collect();
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        let split = best_split(&columns, &labels, &samples, &[3, 3], &params(1), &mut rng)
            .expect("a split exists");

        assert_eq!(split.feature, 1);
        assert!((split.threshold - 5.0).abs() < 1e-12);
        assert_eq!(split.left, vec![0, 1, 2]);
        assert_eq!(split.right, vec![3, 4, 5]);
        // parent weighted impurity 6 * 0.5, children pure
        assert!((split.impurity_decrease - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_constant_columns_have_no_split() {
        let columns = vec![vec![2.0; 4], vec![3.0; 4]];
        let labels = vec![0, 1, 0, 1];
        let samples: Vec<usize> = (0..4).collect();
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        assert!(best_split(&columns, &labels, &samples, &[2, 2], &params(2), &mut rng).is_none());
    }

    #[test]
    fn test_min_samples_leaf_blocks_split() {
        let columns = vec![vec![1.0, 2.0, 3.0]];
        let labels = vec![0, 1, 1];
        let samples: Vec<usize> = (0..3).collect();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let strict = TreeParams {
            min_samples_leaf: 2,
            ..params(1)
        };

        assert!(best_split(&columns, &labels, &samples, &[1, 2], &strict, &mut rng).is_none());
    }

    #[test]
    fn test_midpoint_of_adjacent_floats() {
        let low = 1.0f64;
        let high = f64::from_bits(low.to_bits() + 1);
        assert_eq!(midpoint(low, high), low);
        assert_eq!(midpoint(2.0, 4.0), 3.0);
    }
}
