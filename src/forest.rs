//! Random forest classifier.
//!
//! Each tree is grown on a bootstrap resample of the training rows, drawing
//! a fresh subset of `max_features` candidate columns at every split. Tree
//! `i` derives its RNG from the forest seed and `i`, so the fitted forest is
//! the same whatever the number of worker threads. Prediction is a majority
//! vote; ties go to the smallest class code.

use crate::config::ForestConfig;
use crate::error::{PredictorError, Result};
use crate::tree::{DecisionTree, TreeParams, majority_class};
use indicatif::ProgressBar;
use ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::thread;
use tracing::{debug, info};

/// Ensemble of decision trees voting on a class code
#[derive(Debug)]
pub struct RandomForest {
    trees: Vec<DecisionTree>,
    n_features: usize,
    n_classes: usize,
}

impl RandomForest {
    /// Fit the forest on a feature matrix and class codes
    pub fn fit(
        records: &Array2<f64>,
        targets: &Array1<usize>,
        config: &ForestConfig,
        progress: &ProgressBar,
    ) -> Result<Self> {
        config.validate()?;

        let (n_rows, n_features) = records.dim();
        if n_rows == 0 || n_features == 0 {
            return Err(PredictorError::training("no training rows"));
        }
        if n_rows != targets.len() {
            return Err(PredictorError::training(format!(
                "{} rows but {} targets",
                n_rows,
                targets.len()
            )));
        }

        let n_classes = targets.iter().max().map_or(1, |max| max + 1);
        let params = TreeParams {
            max_depth: config.max_depth,
            min_samples_split: config.min_samples_split,
            max_features: config.max_features.unwrap_or(n_features).min(n_features),
        };

        let workers = config.workers.clamp(1, config.n_estimators);
        info!(
            "Fitting random forest: {} trees on {} rows x {} features, {} per split ({} workers)",
            config.n_estimators, n_rows, n_features, params.max_features, workers
        );
        progress.set_length(config.n_estimators as u64);

        let mut fitted: Vec<(usize, DecisionTree)> = thread::scope(|scope| {
            let handles: Vec<_> = (0..workers)
                .map(|worker| {
                    let params = &params;
                    scope.spawn(move || {
                        (worker..config.n_estimators)
                            .step_by(workers)
                            .map(|index| {
                                let tree =
                                    fit_tree(index, records, targets, n_classes, params, config);
                                progress.inc(1);
                                (index, tree)
                            })
                            .collect::<Vec<_>>()
                    })
                })
                .collect();

            let mut trees = Vec::with_capacity(config.n_estimators);
            for handle in handles {
                let batch = handle
                    .join()
                    .map_err(|_| PredictorError::training("tree fitting thread panicked"))?;
                trees.extend(batch);
            }
            Ok::<_, PredictorError>(trees)
        })?;

        fitted.sort_by_key(|(index, _)| *index);
        progress.finish_and_clear();
        debug!(
            "Random forest fitted: {} trees, {} nodes",
            fitted.len(),
            fitted.iter().map(|(_, tree)| tree.n_nodes()).sum::<usize>()
        );

        Ok(Self {
            trees: fitted.into_iter().map(|(_, tree)| tree).collect(),
            n_features,
            n_classes,
        })
    }

    /// Predict the class code of every row
    pub fn predict(&self, records: &Array2<f64>) -> Result<Array1<usize>> {
        if records.ncols() != self.n_features {
            return Err(PredictorError::training(format!(
                "expected {} features, got {}",
                self.n_features,
                records.ncols()
            )));
        }

        let mut votes = vec![0usize; self.n_classes];
        let predicted = records
            .rows()
            .into_iter()
            .map(|row| {
                votes.iter_mut().for_each(|v| *v = 0);
                for tree in &self.trees {
                    votes[tree.predict_row(row)] += 1;
                }
                majority_class(&votes)
            })
            .collect();

        Ok(predicted)
    }

    /// Predict the class code of a single feature vector
    pub fn predict_one(&self, features: &[f64]) -> Result<usize> {
        let row = Array2::from_shape_vec((1, features.len()), features.to_vec())
            .map_err(|e| PredictorError::training(e.to_string()))?;
        Ok(self.predict(&row)?[0])
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }
}

fn fit_tree(
    index: usize,
    records: &Array2<f64>,
    targets: &Array1<usize>,
    n_classes: usize,
    params: &TreeParams,
    config: &ForestConfig,
) -> DecisionTree {
    let mut rng = StdRng::seed_from_u64(config.seed.wrapping_add(index as u64));
    let n_rows = records.nrows();

    let rows: Vec<usize> = if config.bootstrap {
        (0..n_rows).map(|_| rng.gen_range(0..n_rows)).collect()
    } else {
        (0..n_rows).collect()
    };

    DecisionTree::fit(records, targets, rows, n_classes, params, &mut rng)
}
