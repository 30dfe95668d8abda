use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Weight-update rule used by `train_loop`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Solver {
    Adam,
    Sgd,
}

/// Optimization hyperparameters for a `train_loop` run.
///
/// # Fields
/// - `solver`             : `Adam` or momentum `Sgd`
/// - `max_iter`           : maximum number of epochs (full passes over the data)
/// - `batch_size`         : samples per mini-batch; `None` means `min(200, n_samples)`
/// - `learning_rate_init` : step size for both solvers
/// - `alpha`              : L2 penalty strength
/// - `tol`                : minimum loss improvement that resets the patience counter
/// - `n_iter_no_change`   : epochs without `tol` improvement before stopping
/// - `shuffle`            : reshuffle samples every epoch
/// - `beta_1`, `beta_2`, `epsilon` : Adam moment decay rates and denominator guard
/// - `momentum`, `nesterovs_momentum` : SGD momentum settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    pub solver: Solver,
    pub max_iter: usize,
    pub batch_size: Option<usize>,
    pub learning_rate_init: f64,
    pub alpha: f64,
    pub tol: f64,
    pub n_iter_no_change: usize,
    pub shuffle: bool,
    pub beta_1: f64,
    pub beta_2: f64,
    pub epsilon: f64,
    pub momentum: f64,
    pub nesterovs_momentum: bool,
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig {
            solver: Solver::Adam,
            max_iter: 1000,
            batch_size: None,
            learning_rate_init: 0.001,
            alpha: 0.0001,
            tol: 1e-4,
            n_iter_no_change: 10,
            shuffle: true,
            beta_1: 0.9,
            beta_2: 0.999,
            epsilon: 1e-8,
            momentum: 0.9,
            nesterovs_momentum: true,
        }
    }
}

impl TrainConfig {
    /// Mini-batch size actually used for `n_samples` training samples.
    pub fn effective_batch_size(&self, n_samples: usize) -> usize {
        self.batch_size.unwrap_or(200).clamp(1, n_samples.max(1))
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_iter == 0 {
            return Err(Error::InvalidConfig("max_iter must be at least 1".into()));
        }
        if self.batch_size == Some(0) {
            return Err(Error::InvalidConfig("batch_size must be at least 1".into()));
        }
        if !(self.learning_rate_init > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "learning_rate_init must be positive, got {}",
                self.learning_rate_init
            )));
        }
        if !(self.alpha >= 0.0) {
            return Err(Error::InvalidConfig(format!("alpha must be non-negative, got {}", self.alpha)));
        }
        if !(self.tol >= 0.0) {
            return Err(Error::InvalidConfig(format!("tol must be non-negative, got {}", self.tol)));
        }
        for (name, beta) in [("beta_1", self.beta_1), ("beta_2", self.beta_2)] {
            if !(0.0..1.0).contains(&beta) {
                return Err(Error::InvalidConfig(format!("{name} must be in [0, 1), got {beta}")));
            }
        }
        if !(self.epsilon > 0.0) {
            return Err(Error::InvalidConfig(format!("epsilon must be positive, got {}", self.epsilon)));
        }
        if !(0.0..=1.0).contains(&self.momentum) {
            return Err(Error::InvalidConfig(format!(
                "momentum must be in [0, 1], got {}",
                self.momentum
            )));
        }
        Ok(())
    }
}
