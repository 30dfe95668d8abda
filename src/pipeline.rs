use tracing::info;

use crate::classifier::MlpClassifier;
use crate::config::PipelineConfig;
use crate::data::{load_iris, train_test_split};
use crate::error::Result;
use crate::metrics::{accuracy_score, ClassificationReport};
use crate::train::FitReport;

pub const RESULTS_TITLE: &str = "=== ANN Iris Classification Results ===";

/// Everything one pipeline run computes.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutcome {
    /// Rows of the full dataset used for training / testing.
    pub train_indices: Vec<usize>,
    pub test_indices: Vec<usize>,
    pub fit: FitReport,
    pub y_true: Vec<usize>,
    pub y_pred: Vec<usize>,
    pub accuracy: f64,
    pub report: ClassificationReport,
}

/// Load, split, fit, predict and score, once.
pub fn run(config: &PipelineConfig) -> Result<PipelineOutcome> {
    config.validate()?;
    match serde_json::to_string(config) {
        Ok(json) => info!(config = %json, "starting evaluation pipeline"),
        Err(e) => info!(error = %e, "starting evaluation pipeline; configuration not serializable"),
    }

    let dataset = load_iris()?;
    info!(
        n_samples = dataset.n_samples(),
        n_features = dataset.n_features(),
        n_classes = dataset.n_classes(),
        "loaded dataset"
    );

    let split = train_test_split(&dataset, config.test_size, config.random_state)?;
    info!(train = split.train.n_samples(), test = split.test.n_samples(), "split dataset");

    let mut model = MlpClassifier::new(config.model.clone())?;
    let fit = model.fit(split.train.features(), split.train.labels())?;

    let y_pred = model.predict(split.test.features())?;
    let y_true = split.test.labels().to_vec();

    let accuracy = accuracy_score(&y_true, &y_pred)?;
    let report = ClassificationReport::new(&y_true, &y_pred, dataset.class_names())?;
    info!(accuracy, "evaluation finished");

    Ok(PipelineOutcome {
        train_indices: split.train_indices,
        test_indices: split.test_indices,
        fit,
        y_true,
        y_pred,
        accuracy,
        report,
    })
}

/// The text printed to stdout for an outcome.
///
/// Accuracy uses the shortest representation that round-trips (`{:?}`), so
/// a perfect score prints as `1.0`.
pub fn render(outcome: &PipelineOutcome) -> String {
    format!(
        "\n{RESULTS_TITLE}\nAccuracy: {:?}\n\nClassification Report:\n{}\n",
        outcome.accuracy, outcome.report
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn rejects_invalid_config_before_doing_work() {
        let config = PipelineConfig { test_size: 0.0, ..PipelineConfig::default() };
        assert!(matches!(run(&config), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn render_layout() {
        let report = ClassificationReport::new(&[0, 1], &[0, 1], &["a", "b"]).unwrap();
        let outcome = PipelineOutcome {
            train_indices: vec![],
            test_indices: vec![],
            fit: FitReport { n_iter: 0, converged: false, history: vec![] },
            y_true: vec![0, 1],
            y_pred: vec![0, 1],
            accuracy: 1.0,
            report,
        };
        let expected = concat!(
            "\n",
            "=== ANN Iris Classification Results ===\n",
            "Accuracy: 1.0\n",
            "\n",
            "Classification Report:\n",
            "              precision    recall  f1-score   support\n",
            "\n",
            "           a       1.00      1.00      1.00         1\n",
            "           b       1.00      1.00      1.00         1\n",
            "\n",
            "    accuracy                           1.00         2\n",
            "   macro avg       1.00      1.00      1.00         2\n",
            "weighted avg       1.00      1.00      1.00         2\n",
            "\n",
        );
        assert_eq!(render(&outcome), expected);
    }
}
