//! Classification tree (CART, Gini impurity) used as the forest's base learner.
//!
//! Each feature column is sorted once per tree. Nodes are contiguous ranges
//! of those sorted orders and are stable-partitioned on every split, so
//! finding the best threshold is a single linear scan per candidate feature.
//! A fresh random subset of `max_features` columns is drawn at every split.

use ndarray::{Array1, Array2, ArrayView1};
use rand::Rng;
use rand::seq::index;

/// Growth limits for a single tree
#[derive(Debug, Clone, Copy)]
pub struct TreeParams {
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
    /// Candidate features drawn per split
    pub max_features: usize,
}

#[derive(Debug, Clone)]
enum Node {
    Leaf(usize),
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

/// A fitted tree predicting class codes
#[derive(Debug, Clone)]
pub struct DecisionTree {
    nodes: Vec<Node>,
}

impl DecisionTree {
    /// Grow a tree over `rows` (indices into `records`, repeats allowed)
    pub fn fit<R: Rng>(
        records: &Array2<f64>,
        targets: &Array1<usize>,
        rows: Vec<usize>,
        n_classes: usize,
        params: &TreeParams,
        rng: &mut R,
    ) -> Self {
        let mut builder = Builder::new(records, targets, rows, n_classes, params);
        builder.grow(rng);
        Self {
            nodes: builder.nodes,
        }
    }

    /// Class code for one feature row
    pub fn predict_row(&self, row: ArrayView1<f64>) -> usize {
        let mut at = 0;
        loop {
            match &self.nodes[at] {
                Node::Leaf(class) => return *class,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    at = if row[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }

    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges on the longest root-to-leaf path
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(0usize, 0usize)];
        while let Some((at, depth)) = stack.pop() {
            match &self.nodes[at] {
                Node::Leaf(_) => deepest = deepest.max(depth),
                Node::Split { left, right, .. } => {
                    stack.push((*left, depth + 1));
                    stack.push((*right, depth + 1));
                }
            }
        }
        deepest
    }
}

struct Candidate {
    feature: usize,
    /// Last position (inclusive) of the left child in the feature's order
    last_left: usize,
    threshold: f64,
    score: f64,
}

struct Builder<'a> {
    records: &'a Array2<f64>,
    targets: &'a Array1<usize>,
    params: &'a TreeParams,
    n_classes: usize,
    /// Row index of each sample position
    samples: Vec<usize>,
    /// Per feature: sample positions sorted by value
    order: Vec<Vec<usize>>,
    goes_left: Vec<bool>,
    scratch: Vec<usize>,
    nodes: Vec<Node>,
}

impl<'a> Builder<'a> {
    fn new(
        records: &'a Array2<f64>,
        targets: &'a Array1<usize>,
        samples: Vec<usize>,
        n_classes: usize,
        params: &'a TreeParams,
    ) -> Self {
        let n_features = records.ncols();
        let order = (0..n_features)
            .map(|feature| {
                let mut positions: Vec<usize> = (0..samples.len()).collect();
                positions.sort_by(|&a, &b| {
                    records[[samples[a], feature]].total_cmp(&records[[samples[b], feature]])
                });
                positions
            })
            .collect();

        Self {
            records,
            targets,
            params,
            n_classes,
            goes_left: vec![false; samples.len()],
            scratch: Vec::with_capacity(samples.len()),
            samples,
            order,
            nodes: Vec::new(),
        }
    }

    fn value(&self, position: usize, feature: usize) -> f64 {
        self.records[[self.samples[position], feature]]
    }

    fn class(&self, position: usize) -> usize {
        self.targets[self.samples[position]]
    }

    fn grow<R: Rng>(&mut self, rng: &mut R) {
        self.nodes.push(Node::Leaf(0));
        if self.samples.is_empty() {
            return;
        }

        // (node, start, end, depth) over positions start..end of every order
        let mut pending = vec![(0usize, 0usize, self.samples.len(), 0usize)];

        while let Some((node, start, end, depth)) = pending.pop() {
            let counts = self.class_counts(start, end);
            let leaf = majority_class(&counts);

            let pure = counts.iter().filter(|&&c| c > 0).count() <= 1;
            let depth_reached = self.params.max_depth.is_some_and(|max| depth >= max);
            if pure || depth_reached || end - start < self.params.min_samples_split {
                self.nodes[node] = Node::Leaf(leaf);
                continue;
            }

            let Some(best) = self.best_split(start, end, &counts, rng) else {
                self.nodes[node] = Node::Leaf(leaf);
                continue;
            };

            let mid = self.partition(start, end, &best);
            let left = self.nodes.len();
            self.nodes.push(Node::Leaf(leaf));
            let right = self.nodes.len();
            self.nodes.push(Node::Leaf(leaf));
            self.nodes[node] = Node::Split {
                feature: best.feature,
                threshold: best.threshold,
                left,
                right,
            };

            pending.push((right, mid, end, depth + 1));
            pending.push((left, start, mid, depth + 1));
        }
    }

    fn class_counts(&self, start: usize, end: usize) -> Vec<usize> {
        let mut counts = vec![0; self.n_classes];
        for &position in &self.order[0][start..end] {
            counts[self.class(position)] += 1;
        }
        counts
    }

    /// Lowest weighted Gini over a random subset of features.
    ///
    /// Minimising weighted Gini is maximising `sum(l²)/n_l + sum(r²)/n_r`
    /// over the class counts of the two children, which updates in O(1)
    /// per step of the scan.
    fn best_split<R: Rng>(
        &self,
        start: usize,
        end: usize,
        counts: &[usize],
        rng: &mut R,
    ) -> Option<Candidate> {
        let n_features = self.order.len();
        let k = self.params.max_features.clamp(1, n_features);
        let n = (end - start) as f64;
        let parent_sq: f64 = counts.iter().map(|&c| (c * c) as f64).sum();
        let parent_score = parent_sq / n;

        let mut best: Option<Candidate> = None;
        let mut left = vec![0usize; self.n_classes];
        let mut right = vec![0usize; self.n_classes];

        for feature in index::sample(rng, n_features, k).into_iter() {
            let order = &self.order[feature];
            left.iter_mut().for_each(|c| *c = 0);
            right.copy_from_slice(counts);
            let mut sq_left = 0.0;
            let mut sq_right = parent_sq;

            for i in start..end - 1 {
                let position = order[i];
                let class = self.class(position);
                sq_left += (2 * left[class] + 1) as f64;
                left[class] += 1;
                sq_right -= (2 * right[class] - 1) as f64;
                right[class] -= 1;

                let value = self.value(position, feature);
                let next = self.value(order[i + 1], feature);
                if value >= next {
                    continue;
                }

                let n_left = (i + 1 - start) as f64;
                let score = sq_left / n_left + sq_right / (n - n_left);
                if score > parent_score + 1e-12
                    && best.as_ref().is_none_or(|b| score > b.score)
                {
                    let mid = value + (next - value) / 2.0;
                    best = Some(Candidate {
                        feature,
                        last_left: i,
                        threshold: if mid < next { mid } else { value },
                        score,
                    });
                }
            }
        }

        best
    }

    /// Stable-partition every feature order of the node; returns the split point
    fn partition(&mut self, start: usize, end: usize, best: &Candidate) -> usize {
        for (i, &position) in self.order[best.feature][start..end].iter().enumerate() {
            self.goes_left[position] = start + i <= best.last_left;
        }

        for order in &mut self.order {
            self.scratch.clear();
            let mut write = start;
            for i in start..end {
                let position = order[i];
                if self.goes_left[position] {
                    order[write] = position;
                    write += 1;
                } else {
                    self.scratch.push(position);
                }
            }
            order[write..end].copy_from_slice(&self.scratch);
        }

        best.last_left + 1
    }
}

/// Most frequent class; ties go to the lowest code
pub fn majority_class(counts: &[usize]) -> usize {
    let mut best = (0, 0);
    for (class, &count) in counts.iter().enumerate() {
        if count > best.1 {
            best = (class, count);
        }
    }
    best.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn params(max_features: usize) -> TreeParams {
        TreeParams {
            max_depth: None,
            min_samples_split: 2,
            max_features,
        }
    }

    fn fit_all(
        records: &Array2<f64>,
        targets: &Array1<usize>,
        params: &TreeParams,
    ) -> DecisionTree {
        let n_classes = targets.iter().max().map_or(1, |m| m + 1);
        let rows = (0..records.nrows()).collect();
        let mut rng = StdRng::seed_from_u64(7);
        DecisionTree::fit(records, targets, rows, n_classes, params, &mut rng)
    }

    #[test]
    fn test_single_threshold() {
        let records = array![[1.0], [2.0], [3.0], [10.0], [11.0], [12.0]];
        let targets = array![0, 0, 0, 1, 1, 1];
        let tree = fit_all(&records, &targets, &params(1));

        assert_eq!(tree.n_nodes(), 3);
        assert_eq!(tree.depth(), 1);
        assert_eq!(tree.predict_row(array![3.0].view()), 0);
        assert_eq!(tree.predict_row(array![6.4].view()), 0);
        assert_eq!(tree.predict_row(array![6.6].view()), 1);
    }

    #[test]
    fn test_memorises_training_rows() {
        // XOR-like layout: needs splits on both features
        let records = array![
            [0.0, 0.0],
            [0.0, 1.0],
            [1.0, 0.0],
            [1.0, 1.0],
            [0.1, 0.9],
            [0.9, 0.1],
        ];
        let targets = array![0, 1, 1, 0, 1, 1];
        let tree = fit_all(&records, &targets, &params(2));

        for (row, target) in records.rows().into_iter().zip(targets.iter()) {
            assert_eq!(tree.predict_row(row), *target);
        }
    }

    #[test]
    fn test_max_depth_limits_growth() {
        let records = array![[1.0], [2.0], [3.0], [4.0], [5.0], [6.0], [7.0], [8.0]];
        let targets = array![0, 1, 0, 1, 0, 1, 0, 1];
        let limited = TreeParams {
            max_depth: Some(2),
            ..params(1)
        };
        let tree = fit_all(&records, &targets, &limited);
        assert!(tree.depth() <= 2);
    }

    #[test]
    fn test_identical_rows_become_a_leaf() {
        let records = array![[5.0, 5.0], [5.0, 5.0], [5.0, 5.0]];
        let targets = array![2, 1, 1];
        let tree = fit_all(&records, &targets, &params(2));

        assert_eq!(tree.n_nodes(), 1);
        assert_eq!(tree.predict_row(array![0.0, 0.0].view()), 1);
    }

    #[test]
    fn test_repeated_bootstrap_rows() {
        let records = array![[1.0], [9.0]];
        let targets = array![0, 1];
        let rows = vec![0, 0, 0, 1, 1];
        let mut rng = StdRng::seed_from_u64(1);
        let tree = DecisionTree::fit(&records, &targets, rows, 2, &params(1), &mut rng);

        assert_eq!(tree.predict_row(array![1.0].view()), 0);
        assert_eq!(tree.predict_row(array![9.0].view()), 1);
    }

    #[test]
    fn test_majority_prefers_lowest_code_on_tie() {
        assert_eq!(majority_class(&[0, 3, 3, 1]), 1);
        assert_eq!(majority_class(&[0, 0]), 0);
    }
}
