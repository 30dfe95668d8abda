use iris_ann::pipeline::{self, RESULTS_TITLE};
use iris_ann::{load_iris, train_test_split, MlpClassifier, MlpConfig, PipelineConfig};

#[test]
fn iris_pipeline_is_reproducible() {
    let config = PipelineConfig::default();
    let first = pipeline::run(&config).unwrap();
    let second = pipeline::run(&config).unwrap();

    assert_eq!(first, second);
    assert_eq!(pipeline::render(&first), pipeline::render(&second));
}

#[test]
fn iris_pipeline_scores_thirty_held_out_samples() {
    let outcome = pipeline::run(&PipelineConfig::default()).unwrap();

    assert_eq!(outcome.train_indices.len(), 120);
    assert_eq!(outcome.test_indices.len(), 30);
    assert_eq!(outcome.y_pred.len(), 30);
    assert_eq!(outcome.y_true.len(), 30);
    assert!(outcome.y_pred.iter().all(|&label| label < 3));

    assert!((0.0..=1.0).contains(&outcome.accuracy));
    assert_eq!(outcome.accuracy, outcome.report.accuracy);
    let support: usize = outcome.report.classes.iter().map(|c| c.support).sum();
    assert_eq!(support, 30);

    assert!(outcome.fit.n_iter >= 1 && outcome.fit.n_iter <= 1000);
    assert_eq!(outcome.fit.history.len(), outcome.fit.n_iter);
}

#[test]
fn rendered_output_has_the_expected_sections() {
    let outcome = pipeline::run(&PipelineConfig::default()).unwrap();
    let text = pipeline::render(&outcome);
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], "");
    assert_eq!(lines[1], RESULTS_TITLE);
    assert_eq!(lines[2], format!("Accuracy: {:?}", outcome.accuracy));
    assert_eq!(lines[3], "");
    assert_eq!(lines[4], "Classification Report:");
    assert_eq!(lines[5], "              precision    recall  f1-score   support");

    for name in ["      setosa", "  versicolor", "   virginica", "    accuracy", "   macro avg", "weighted avg"] {
        assert!(lines.iter().any(|l| l.starts_with(name)), "missing row {name:?}");
    }
    assert!(text.ends_with("\n\n"));
}

#[test]
fn frozen_model_predicts_identically_twice() {
    let iris = load_iris().unwrap();
    let split = train_test_split(&iris, 0.2, 42).unwrap();

    let mut model = MlpClassifier::new(MlpConfig::default()).unwrap();
    model.fit(split.train.features(), split.train.labels()).unwrap();

    let first = model.predict(split.test.features()).unwrap();
    let second = model.predict(split.test.features()).unwrap();
    assert_eq!(first.len(), 30);
    assert_eq!(first, second);
}
