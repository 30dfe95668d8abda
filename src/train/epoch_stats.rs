use serde::{Deserialize, Serialize};

/// Per-epoch training statistics recorded by `train_loop`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    /// Mean training loss (including the L2 term) over all samples in this epoch.
    pub train_loss: f64,
    /// Lowest epoch loss seen so far, this epoch included.
    pub best_loss: f64,
    /// Consecutive epochs without an improvement of at least `tol`.
    pub no_improvement_count: usize,
}

/// Outcome of a completed `train_loop` run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitReport {
    /// Epochs actually run.
    pub n_iter: usize,
    /// `true` when training stopped because the loss plateaued, `false` when
    /// it ran out of iterations.
    pub converged: bool,
    pub history: Vec<EpochStats>,
}

impl FitReport {
    pub fn loss_curve(&self) -> Vec<f64> {
        self.history.iter().map(|s| s.train_loss).collect()
    }

    pub fn final_loss(&self) -> Option<f64> {
        self.history.last().map(|s| s.train_loss)
    }

    pub fn best_loss(&self) -> Option<f64> {
        self.history.last().map(|s| s.best_loss)
    }
}
