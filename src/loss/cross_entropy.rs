use crate::math::matrix::Matrix;

/// Categorical cross-entropy loss for use with a Softmax output layer.
pub struct CrossEntropyLoss;

/// Probabilities are clipped into [EPS, 1 - EPS] before the log.
const EPS: f64 = 1e-10;

impl CrossEntropyLoss {
    /// Mean cross-entropy over a batch:
    ///   L = -(1/n) · Σ_rows Σ_i expected[i] · log(clip(predicted[i]))
    ///
    /// `predicted` : softmax probabilities, shape [n, n_classes]
    /// `expected`  : one-hot targets, same shape
    pub fn loss(predicted: &Matrix, expected: &Matrix) -> f64 {
        let n = predicted.rows.max(1) as f64;
        let total: f64 = predicted
            .data
            .iter()
            .flatten()
            .zip(expected.data.iter().flatten())
            .map(|(p, e)| -e * p.clamp(EPS, 1.0 - EPS).ln())
            .sum();
        total / n
    }

    /// Gradient of the combined Softmax + cross-entropy w.r.t. the pre-softmax
    /// logits, per sample:
    ///   ∂L/∂z_i = predicted[i] - expected[i]
    ///
    /// Batch averaging happens in `Layer::compute_gradients`.
    pub fn derivative(predicted: &Matrix, expected: &Matrix) -> Matrix {
        predicted - expected
    }

    /// L2 penalty term added to the data loss: `0.5 · alpha · Σ‖W‖² / n`.
    pub fn l2_penalty(weights_sum_of_squares: f64, alpha: f64, n_samples: usize) -> f64 {
        0.5 * alpha * weights_sum_of_squares / n_samples.max(1) as f64
    }
}
