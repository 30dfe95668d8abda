use crate::error::{Error, Result};
use crate::metrics::accuracy::check_lengths;

/// Confusion matrix with `cm[true][predicted]` counts over `n_classes` classes.
pub fn confusion_matrix(y_true: &[usize], y_pred: &[usize], n_classes: usize) -> Result<Vec<Vec<usize>>> {
    check_lengths(y_true, y_pred)?;
    let mut cm = vec![vec![0usize; n_classes]; n_classes];
    for (&t, &p) in y_true.iter().zip(y_pred) {
        for label in [t, p] {
            if label >= n_classes {
                return Err(Error::LabelOutOfRange { label, n_classes });
            }
        }
        cm[t][p] += 1;
    }
    Ok(cm)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_true_columns_are_predicted() {
        let cm = confusion_matrix(&[0, 0, 1, 2, 2], &[0, 1, 1, 2, 0], 3).unwrap();
        assert_eq!(cm, vec![vec![1, 1, 0], vec![0, 1, 0], vec![1, 0, 1]]);
    }

    #[test]
    fn rejects_unknown_labels() {
        assert_eq!(
            confusion_matrix(&[0, 1], &[0, 3], 2).unwrap_err(),
            Error::LabelOutOfRange { label: 3, n_classes: 2 }
        );
    }
}
