use serde::{Deserialize, Serialize};

use crate::activation::activation::ActivationFunction;
use crate::error::{Error, Result};
use crate::train::train_config::TrainConfig;

/// Architecture, seed and optimization settings of an `MlpClassifier`.
///
/// `Default` is the fixed configuration used by the Iris pipeline: two
/// hidden ReLU layers of 10 units, Adam, at most 1000 epochs, seed 42.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MlpConfig {
    pub hidden_layer_sizes: Vec<usize>,
    /// Activation of every hidden layer. The output layer is always softmax.
    pub activation: ActivationFunction,
    /// Seeds weight initialization and per-epoch shuffling.
    pub random_state: u64,
    pub train: TrainConfig,
}

impl Default for MlpConfig {
    fn default() -> Self {
        MlpConfig {
            hidden_layer_sizes: vec![10, 10],
            activation: ActivationFunction::ReLU,
            random_state: 42,
            train: TrainConfig::default(),
        }
    }
}

impl MlpConfig {
    pub fn validate(&self) -> Result<()> {
        if self.hidden_layer_sizes.is_empty() {
            return Err(Error::InvalidConfig("hidden_layer_sizes must not be empty".into()));
        }
        if self.hidden_layer_sizes.contains(&0) {
            return Err(Error::InvalidConfig(format!(
                "hidden layer sizes must be positive, got {:?}",
                self.hidden_layer_sizes
            )));
        }
        if self.activation == ActivationFunction::Softmax {
            return Err(Error::InvalidConfig("softmax is not supported as a hidden activation".into()));
        }
        self.train.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::train::train_config::Solver;

    #[test]
    fn default_is_the_pipeline_configuration() {
        let config = MlpConfig::default();
        assert_eq!(config.hidden_layer_sizes, vec![10, 10]);
        assert_eq!(config.activation, ActivationFunction::ReLU);
        assert_eq!(config.train.solver, Solver::Adam);
        assert_eq!(config.train.max_iter, 1000);
        assert_eq!(config.random_state, 42);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_bad_architectures() {
        for config in [
            MlpConfig { hidden_layer_sizes: vec![], ..MlpConfig::default() },
            MlpConfig { hidden_layer_sizes: vec![10, 0], ..MlpConfig::default() },
            MlpConfig { activation: ActivationFunction::Softmax, ..MlpConfig::default() },
        ] {
            assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
        }
    }
}
