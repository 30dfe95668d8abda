use crate::data::iris::{iris_label, IRIS_CLASS_NAMES, IRIS_FEATURES, IRIS_FEATURE_NAMES};
use crate::error::{Error, Result};

/// A labelled sample set: one feature vector and one class index per sample.
///
/// Invariants (checked by `Dataset::new`):
/// - at least one sample, and `labels.len() == features.len()`
/// - every feature vector has the same, non-zero length
/// - every label is `< class_names.len()`
/// - `feature_names` is either empty or has one name per feature
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    features: Vec<Vec<f64>>,
    labels: Vec<usize>,
    class_names: Vec<String>,
    feature_names: Vec<String>,
}

impl Dataset {
    pub fn new(
        features: Vec<Vec<f64>>,
        labels: Vec<usize>,
        class_names: Vec<String>,
        feature_names: Vec<String>,
    ) -> Result<Dataset> {
        let Some(first) = features.first() else {
            return Err(Error::InvalidDataset("dataset has no samples".into()));
        };
        let n_features = first.len();
        if n_features == 0 {
            return Err(Error::InvalidDataset("samples have no features".into()));
        }
        if labels.len() != features.len() {
            return Err(Error::InvalidDataset(format!(
                "{} feature vectors but {} labels",
                features.len(),
                labels.len()
            )));
        }
        if let Some(row) = features.iter().position(|f| f.len() != n_features) {
            return Err(Error::InvalidDataset(format!(
                "sample {} has {} features, expected {}",
                row,
                features[row].len(),
                n_features
            )));
        }
        if let Some(&label) = labels.iter().find(|&&l| l >= class_names.len()) {
            return Err(Error::InvalidDataset(format!(
                "label {} out of range for {} classes",
                label,
                class_names.len()
            )));
        }
        if !feature_names.is_empty() && feature_names.len() != n_features {
            return Err(Error::InvalidDataset(format!(
                "{} feature names for {} features",
                feature_names.len(),
                n_features
            )));
        }

        Ok(Dataset {
            features,
            labels,
            class_names,
            feature_names,
        })
    }

    pub fn features(&self) -> &[Vec<f64>] {
        &self.features
    }

    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    pub fn class_names(&self) -> &[String] {
        &self.class_names
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn n_samples(&self) -> usize {
        self.features.len()
    }

    pub fn n_features(&self) -> usize {
        self.features[0].len()
    }

    pub fn n_classes(&self) -> usize {
        self.class_names.len()
    }

    /// Rows at `indices`, in that order, keeping class and feature names.
    ///
    /// Every index must be in bounds and `indices` must be non-empty.
    pub(crate) fn subset(&self, indices: &[usize]) -> Dataset {
        Dataset {
            features: indices.iter().map(|&i| self.features[i].clone()).collect(),
            labels: indices.iter().map(|&i| self.labels[i]).collect(),
            class_names: self.class_names.clone(),
            feature_names: self.feature_names.clone(),
        }
    }
}

/// Loads the bundled Iris dataset: 150 samples, 4 features, 3 classes.
pub fn load_iris() -> Result<Dataset> {
    Dataset::new(
        IRIS_FEATURES.iter().map(|row| row.to_vec()).collect(),
        (0..IRIS_FEATURES.len()).map(iris_label).collect(),
        IRIS_CLASS_NAMES.iter().map(|s| s.to_string()).collect(),
        IRIS_FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("c{i}")).collect()
    }

    #[test]
    fn iris_has_canonical_shape() {
        let iris = load_iris().unwrap();
        assert_eq!(iris.n_samples(), 150);
        assert_eq!(iris.n_features(), 4);
        assert_eq!(iris.n_classes(), 3);
        assert_eq!(iris.class_names(), ["setosa", "versicolor", "virginica"]);
        assert_eq!(iris.feature_names()[2], "petal length (cm)");

        for class in 0..3 {
            assert_eq!(iris.labels().iter().filter(|&&l| l == class).count(), 50);
        }
    }

    #[test]
    fn iris_rows_match_reference_values() {
        let iris = load_iris().unwrap();
        assert_eq!(iris.features()[0], vec![5.1, 3.5, 1.4, 0.2]);
        assert_eq!(iris.features()[34], vec![4.9, 3.1, 1.5, 0.2]);
        assert_eq!(iris.features()[37], vec![4.9, 3.6, 1.4, 0.1]);
        assert_eq!(iris.features()[149], vec![5.9, 3.0, 5.1, 1.8]);
        assert_eq!((iris.labels()[49], iris.labels()[50], iris.labels()[100]), (0, 1, 2));
    }

    #[test]
    fn rejects_ragged_features() {
        let err = Dataset::new(vec![vec![1.0, 2.0], vec![3.0]], vec![0, 0], names(1), vec![]).unwrap_err();
        assert!(matches!(err, Error::InvalidDataset(_)));
    }

    #[test]
    fn rejects_label_out_of_range() {
        let err = Dataset::new(vec![vec![1.0], vec![2.0]], vec![0, 2], names(2), vec![]).unwrap_err();
        assert!(matches!(err, Error::InvalidDataset(_)));
    }

    #[test]
    fn rejects_empty_and_mismatched_inputs() {
        assert!(Dataset::new(vec![], vec![], names(1), vec![]).is_err());
        assert!(Dataset::new(vec![vec![]], vec![0], names(1), vec![]).is_err());
        assert!(Dataset::new(vec![vec![1.0]], vec![0, 0], names(1), vec![]).is_err());
        assert!(Dataset::new(vec![vec![1.0]], vec![0], names(1), names(2)).is_err());
    }

    #[test]
    fn subset_keeps_names_and_order() {
        let iris = load_iris().unwrap();
        let sub = iris.subset(&[100, 0]);
        assert_eq!(sub.labels(), [2, 0]);
        assert_eq!(sub.features()[1], iris.features()[0]);
        assert_eq!(sub.class_names(), iris.class_names());
    }
}
