use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::classifier::config::MlpConfig;
use crate::error::{Error, Result};
use crate::math::matrix::Matrix;
use crate::network::{Network, NetworkSpec};
use crate::train::{build_optimizer, train_loop, FitReport};

/// Multi-layer perceptron classifier trained with cross-entropy loss.
///
/// Unfitted after `new`; `fit` builds and trains a fresh network, after which
/// `predict` and `predict_proba` use it read-only.
#[derive(Debug, Clone)]
pub struct MlpClassifier {
    config: MlpConfig,
    fitted: Option<Fitted>,
}

#[derive(Debug, Clone)]
struct Fitted {
    network: Network,
    /// Sorted distinct training labels; output unit `i` stands for `classes[i]`.
    classes: Vec<usize>,
}

impl MlpClassifier {
    pub fn new(config: MlpConfig) -> Result<MlpClassifier> {
        config.validate()?;
        Ok(MlpClassifier { config, fitted: None })
    }

    pub fn config(&self) -> &MlpConfig {
        &self.config
    }

    pub fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }

    /// Classes seen during `fit`, in output-unit order.
    pub fn classes(&self) -> Option<&[usize]> {
        self.fitted.as_ref().map(|f| f.classes.as_slice())
    }

    pub fn n_features(&self) -> Option<usize> {
        self.fitted.as_ref().map(|f| f.network.input_size())
    }

    pub fn network(&self) -> Option<&Network> {
        self.fitted.as_ref().map(|f| &f.network)
    }

    /// Trains a new network on `x` (one sample per row) and labels `y`.
    ///
    /// Any previous fit is discarded; initialization and shuffling restart
    /// from `random_state`, so refitting on the same data is deterministic.
    /// Stopping at `max_iter` without convergence still returns `Ok`.
    pub fn fit(&mut self, x: &[Vec<f64>], y: &[usize]) -> Result<FitReport> {
        let inputs = to_matrix(x, None)?;
        if y.len() != inputs.rows {
            return Err(Error::ShapeMismatch { expected: inputs.rows, found: y.len() });
        }

        let mut classes = y.to_vec();
        classes.sort_unstable();
        classes.dedup();
        if classes.len() < 2 {
            return Err(Error::InvalidInput(format!(
                "need samples of at least 2 classes to fit, got {}",
                classes.len()
            )));
        }
        let targets = one_hot(y, &classes);

        let spec = NetworkSpec::mlp_classifier(
            inputs.cols,
            &self.config.hidden_layer_sizes,
            self.config.activation,
            classes.len(),
        );
        let mut rng = ChaCha8Rng::seed_from_u64(self.config.random_state);
        let mut network = Network::new(&spec, &mut rng);
        let mut optimizer = build_optimizer(&self.config.train, &network);

        debug!(
            n_samples = inputs.rows,
            n_features = inputs.cols,
            n_classes = classes.len(),
            "fitting MLP classifier"
        );
        self.fitted = None;
        let report = train_loop(
            &mut network,
            &inputs,
            &targets,
            optimizer.as_mut(),
            &self.config.train,
            &mut rng,
        )?;
        info!(
            n_iter = report.n_iter,
            converged = report.converged,
            loss = report.final_loss(),
            "fit finished"
        );

        self.fitted = Some(Fitted { network, classes });
        Ok(report)
    }

    /// Class probabilities, one row per sample, columns ordered as `classes()`.
    pub fn predict_proba(&self, x: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
        let fitted = self.fitted.as_ref().ok_or(Error::NotFitted)?;
        let inputs = to_matrix(x, Some(fitted.network.input_size()))?;
        Ok(fitted.network.forward(&inputs).data)
    }

    /// Most probable class for each sample.
    pub fn predict(&self, x: &[Vec<f64>]) -> Result<Vec<usize>> {
        let fitted = self.fitted.as_ref().ok_or(Error::NotFitted)?;
        let inputs = to_matrix(x, Some(fitted.network.input_size()))?;
        Ok(fitted
            .network
            .forward(&inputs)
            .argmax_rows()
            .into_iter()
            .map(|i| fitted.classes[i])
            .collect())
    }
}

/// Converts rows to a matrix, checking they are non-empty and all `width`
/// wide (the first row's width when `width` is `None`).
fn to_matrix(x: &[Vec<f64>], width: Option<usize>) -> Result<Matrix> {
    let Some(first) = x.first() else {
        return Err(Error::InvalidInput("no samples given".into()));
    };
    let expected = width.unwrap_or(first.len());
    if expected == 0 {
        return Err(Error::InvalidInput("samples have no features".into()));
    }
    if let Some(row) = x.iter().find(|row| row.len() != expected) {
        return Err(Error::ShapeMismatch { expected, found: row.len() });
    }
    Ok(Matrix::from_data(x.to_vec()))
}

/// One-hot rows over `classes` (sorted, deduplicated, containing every label).
fn one_hot(y: &[usize], classes: &[usize]) -> Matrix {
    Matrix::from_data(
        y.iter()
            .map(|label| {
                let mut row = vec![0.0; classes.len()];
                if let Ok(idx) = classes.binary_search(label) {
                    row[idx] = 1.0;
                }
                row
            })
            .collect(),
    )
}
