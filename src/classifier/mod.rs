pub mod config;
pub mod mlp;

pub use config::MlpConfig;
pub use mlp::MlpClassifier;
