use std::fmt;

use serde::Serialize;
use tracing::warn;

use crate::error::{Error, Result};
use crate::metrics::confusion::confusion_matrix;

const HEADERS: [&str; 4] = ["precision", "recall", "f1-score", "support"];
const ACCURACY: &str = "accuracy";
const MACRO_AVG: &str = "macro avg";
const WEIGHTED_AVG: &str = "weighted avg";

/// Precision, recall, F1 and support for one class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassMetrics {
    pub name: String,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    /// Number of samples whose true label is this class.
    pub support: usize,
}

/// An aggregate row of the report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AverageMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    pub support: usize,
}

/// Per-class precision/recall/F1/support plus accuracy, macro and weighted
/// averages. `Display` renders the familiar fixed-width text table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationReport {
    pub classes: Vec<ClassMetrics>,
    pub accuracy: f64,
    pub macro_avg: AverageMetrics,
    pub weighted_avg: AverageMetrics,
    digits: usize,
}

impl ClassificationReport {
    /// Builds the report for classes `0..class_names.len()`.
    ///
    /// Each class is scored one-vs-rest from the confusion matrix. A ratio
    /// whose denominator is zero (e.g. precision for a class that was never
    /// predicted) is reported as 0.0 and logged as a warning.
    pub fn new<S: AsRef<str>>(y_true: &[usize], y_pred: &[usize], class_names: &[S]) -> Result<Self> {
        if class_names.is_empty() {
            return Err(Error::InvalidInput("classification report needs at least one class".into()));
        }
        let n_classes = class_names.len();
        let cm = confusion_matrix(y_true, y_pred, n_classes)?;
        let total = y_true.len();

        let mut ill_defined = Vec::new();
        let classes: Vec<ClassMetrics> = class_names
            .iter()
            .enumerate()
            .map(|(k, name)| {
                let tp = cm[k][k];
                let support: usize = cm[k].iter().sum();
                let predicted: usize = cm.iter().map(|row| row[k]).sum();

                let precision = ratio(tp, predicted);
                let recall = ratio(tp, support);
                let f1_score = ratio(2 * tp, support + predicted);
                if predicted == 0 || support == 0 {
                    ill_defined.push(name.as_ref().to_string());
                }

                ClassMetrics {
                    name: name.as_ref().to_string(),
                    precision,
                    recall,
                    f1_score,
                    support,
                }
            })
            .collect();

        if !ill_defined.is_empty() {
            warn!(
                classes = ?ill_defined,
                "precision, recall or F1 is ill-defined for classes with no predicted or no true samples; set to 0.0"
            );
        }

        let correct: usize = (0..n_classes).map(|k| cm[k][k]).sum();
        let accuracy = correct as f64 / total as f64;

        let mean = |f: fn(&ClassMetrics) -> f64| classes.iter().map(f).sum::<f64>() / n_classes as f64;
        let macro_avg = AverageMetrics {
            precision: mean(|c| c.precision),
            recall: mean(|c| c.recall),
            f1_score: mean(|c| c.f1_score),
            support: total,
        };

        let weighted = |f: fn(&ClassMetrics) -> f64| {
            classes.iter().map(|c| f(c) * c.support as f64).sum::<f64>() / total as f64
        };
        let weighted_avg = AverageMetrics {
            precision: weighted(|c| c.precision),
            recall: weighted(|c| c.recall),
            f1_score: weighted(|c| c.f1_score),
            support: total,
        };

        Ok(ClassificationReport {
            classes,
            accuracy,
            macro_avg,
            weighted_avg,
            digits: 2,
        })
    }

    /// Number of decimal places used when rendering scores.
    pub fn with_digits(mut self, digits: usize) -> Self {
        self.digits = digits;
        self
    }

    /// Total number of scored samples.
    pub fn support(&self) -> usize {
        self.macro_avg.support
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

fn write_row(
    f: &mut fmt::Formatter<'_>,
    width: usize,
    digits: usize,
    label: &str,
    scores: [f64; 3],
    support: usize,
) -> fmt::Result {
    write!(f, "{label:>width$} ")?;
    for score in scores {
        write!(f, " {score:>9.digits$}")?;
    }
    writeln!(f, " {support:>9}")
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.digits;
        let width = self
            .classes
            .iter()
            .map(|c| c.name.chars().count())
            .max()
            .unwrap_or(0)
            .max(WEIGHTED_AVG.len())
            .max(digits);

        write!(f, "{:>width$} ", "")?;
        for header in HEADERS {
            write!(f, " {header:>9}")?;
        }
        writeln!(f)?;
        writeln!(f)?;

        for c in &self.classes {
            write_row(f, width, digits, &c.name, [c.precision, c.recall, c.f1_score], c.support)?;
        }
        writeln!(f)?;

        writeln!(
            f,
            "{ACCURACY:>width$} {:>10}{:>10} {:>9.digits$} {:>9}",
            "",
            "",
            self.accuracy,
            self.support()
        )?;
        for (label, avg) in [(MACRO_AVG, &self.macro_avg), (WEIGHTED_AVG, &self.weighted_avg)] {
            write_row(f, width, digits, label, [avg.precision, avg.recall, avg.f1_score], avg.support)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const NAMES: [&str; 3] = ["setosa", "versicolor", "virginica"];

    fn sample() -> ClassificationReport {
        ClassificationReport::new(&[0, 0, 1, 2, 2], &[0, 1, 1, 2, 0], &NAMES).unwrap()
    }

    #[test]
    fn scores_each_class_one_vs_rest() {
        let report = sample();
        let c = &report.classes;
        assert_eq!((c[0].precision, c[0].recall, c[0].f1_score, c[0].support), (0.5, 0.5, 0.5, 2));
        assert_eq!((c[1].precision, c[1].recall, c[1].support), (0.5, 1.0, 1));
        assert!((c[1].f1_score - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!((c[2].precision, c[2].recall, c[2].support), (1.0, 0.5, 2));
        assert_eq!(report.accuracy, 0.6);
        assert!((report.weighted_avg.precision - 0.7).abs() < 1e-12);
        assert_eq!(report.support(), 5);
    }

    #[test]
    fn renders_fixed_width_table() {
        let expected = concat!(
            "              precision    recall  f1-score   support\n",
            "\n",
            "      setosa       0.50      0.50      0.50         2\n",
            "  versicolor       0.50      1.00      0.67         1\n",
            "   virginica       1.00      0.50      0.67         2\n",
            "\n",
            "    accuracy                           0.60         5\n",
            "   macro avg       0.67      0.67      0.61         5\n",
            "weighted avg       0.70      0.60      0.60         5\n",
        );
        assert_eq!(sample().to_string(), expected);
    }

    #[test]
    fn digits_widen_scores() {
        let text = sample().with_digits(4).to_string();
        assert!(text.contains("    0.6667"));
    }

    #[test]
    fn long_class_names_widen_label_column() {
        let report = ClassificationReport::new(&[0, 1], &[0, 1], &["a-very-long-class-name", "b"]).unwrap();
        let text = report.to_string();
        assert!(text.lines().all(|l| l.is_empty() || l.len() == 23 + 40));
    }

    #[test]
    fn never_predicted_class_scores_zero() {
        let report = ClassificationReport::new(&[0, 1, 2], &[0, 0, 0], &NAMES).unwrap();
        assert_eq!(report.classes[1].precision, 0.0);
        assert_eq!(report.classes[1].f1_score, 0.0);
        assert_eq!(report.classes[2].recall, 0.0);
    }

    #[test]
    fn rejects_labels_outside_class_names() {
        let err = ClassificationReport::new(&[0, 3], &[0, 0], &NAMES).unwrap_err();
        assert_eq!(err, Error::LabelOutOfRange { label: 3, n_classes: 3 });
    }

    proptest! {
        #[test]
        fn scores_stay_in_unit_interval(
            pairs in prop::collection::vec((0usize..3, 0usize..3), 1..100),
        ) {
            let (y_true, y_pred): (Vec<usize>, Vec<usize>) = pairs.into_iter().unzip();
            let report = ClassificationReport::new(&y_true, &y_pred, &NAMES).unwrap();

            prop_assert!((0.0..=1.0).contains(&report.accuracy));
            for c in &report.classes {
                for score in [c.precision, c.recall, c.f1_score] {
                    prop_assert!((0.0..=1.0).contains(&score));
                }
            }
            let support: usize = report.classes.iter().map(|c| c.support).sum();
            prop_assert_eq!(support, y_true.len());
        }
    }
}
