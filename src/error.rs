use thiserror::Error;

/// Errors produced by the dataset, model and metric layers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("invalid dataset: {0}")]
    InvalidDataset(String),

    #[error("invalid split: {0}")]
    InvalidSplit(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("shape mismatch: expected {expected}, found {found}")]
    ShapeMismatch { expected: usize, found: usize },

    #[error("label {label} out of range for {n_classes} classes")]
    LabelOutOfRange { label: usize, n_classes: usize },

    #[error("model is not fitted yet; call fit() first")]
    NotFitted,

    /// Training produced a non-finite loss.
    #[error("numerical failure: {0}")]
    Numerical(String),
}

pub type Result<T> = std::result::Result<T, Error>;
