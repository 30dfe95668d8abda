pub mod activation;
pub mod classifier;
pub mod config;
pub mod data;
pub mod error;
pub mod layers;
pub mod logging;
pub mod loss;
pub mod math;
pub mod metrics;
pub mod network;
pub mod optim;
pub mod pipeline;
pub mod train;

// Convenience re-exports
pub use activation::activation::ActivationFunction;
pub use classifier::{MlpClassifier, MlpConfig};
pub use config::{LogLevel, PipelineConfig};
pub use data::{load_iris, train_test_split, Dataset, Split};
pub use error::{Error, Result};
pub use layers::dense::Layer;
pub use math::matrix::Matrix;
pub use metrics::{accuracy_score, confusion_matrix, ClassificationReport};
pub use network::network::Network;
pub use optim::{Adam, Optimizer, Sgd};
pub use pipeline::PipelineOutcome;
pub use train::{train_loop, FitReport, Solver, TrainConfig};
