use crate::error::{Error, Result};

/// Fraction of predictions equal to the true labels, in [0, 1].
pub fn accuracy_score(y_true: &[usize], y_pred: &[usize]) -> Result<f64> {
    check_lengths(y_true, y_pred)?;
    let correct = y_true.iter().zip(y_pred).filter(|(t, p)| t == p).count();
    Ok(correct as f64 / y_true.len() as f64)
}

/// Both label sequences must be non-empty and of equal length.
pub(crate) fn check_lengths(y_true: &[usize], y_pred: &[usize]) -> Result<()> {
    if y_true.len() != y_pred.len() {
        return Err(Error::ShapeMismatch { expected: y_true.len(), found: y_pred.len() });
    }
    if y_true.is_empty() {
        return Err(Error::InvalidInput("cannot score an empty set of predictions".into()));
    }
    Ok(())
}
