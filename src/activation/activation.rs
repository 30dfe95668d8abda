use serde::{Deserialize, Serialize};

use crate::math::matrix::Matrix;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivationFunction {
    Identity,
    Logistic,
    Tanh,
    ReLU,
    /// Row-wise softmax. Only used on the output layer, where it is paired
    /// with cross-entropy loss.
    Softmax,
}

impl ActivationFunction {
    /// Applies the activation to a batch of pre-activations (one sample per row).
    pub fn activate(&self, z: &Matrix) -> Matrix {
        match self {
            ActivationFunction::Identity => z.clone(),
            ActivationFunction::Logistic => z.map(logistic),
            ActivationFunction::Tanh => z.map(f64::tanh),
            ActivationFunction::ReLU => z.map(|x| if x > 0.0 { x } else { 0.0 }),
            ActivationFunction::Softmax => {
                Matrix::from_data(z.data.iter().map(|row| softmax(row)).collect())
            }
        }
    }

    /// Element-wise derivative with respect to the pre-activation `z`.
    ///
    /// For `Softmax` the trainer starts backprop from the combined
    /// softmax + cross-entropy gradient (`predicted - expected`), so the
    /// derivative here is all ones and passes that delta through unchanged.
    pub fn derivative(&self, z: &Matrix) -> Matrix {
        match self {
            ActivationFunction::Identity | ActivationFunction::Softmax => z.map(|_| 1.0),
            ActivationFunction::Logistic => z.map(|x| {
                let s = logistic(x);
                s * (1.0 - s)
            }),
            ActivationFunction::Tanh => z.map(|x| {
                let t = x.tanh();
                1.0 - t * t
            }),
            ActivationFunction::ReLU => z.map(|x| if x > 0.0 { 1.0 } else { 0.0 }),
        }
    }

    /// Scale factor used by Glorot-uniform initialization for layers using
    /// this activation.
    pub fn init_factor(&self) -> f64 {
        match self {
            ActivationFunction::Logistic => 2.0,
            _ => 6.0,
        }
    }
}

fn logistic(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Numerically stable softmax: the row max is subtracted before exponentiating.
fn softmax(row: &[f64]) -> Vec<f64> {
    let max = row.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = row.iter().map(|x| (x - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relu_and_its_derivative() {
        let z = Matrix::from_data(vec![vec![-1.0, 0.0, 2.5]]);
        assert_eq!(ActivationFunction::ReLU.activate(&z).data, vec![vec![0.0, 0.0, 2.5]]);
        assert_eq!(ActivationFunction::ReLU.derivative(&z).data, vec![vec![0.0, 0.0, 1.0]]);
    }

    #[test]
    fn softmax_rows_sum_to_one() {
        let z = Matrix::from_data(vec![vec![1.0, 2.0, 3.0], vec![1000.0, 1000.0, 1000.0]]);
        let p = ActivationFunction::Softmax.activate(&z);
        for row in &p.data {
            assert!((row.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        }
        assert!(p.data[0][2] > p.data[0][1] && p.data[0][1] > p.data[0][0]);
        assert!((p.data[1][0] - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn logistic_derivative_peaks_at_zero() {
        let z = Matrix::from_data(vec![vec![0.0, 4.0]]);
        let d = ActivationFunction::Logistic.derivative(&z);
        assert!((d.data[0][0] - 0.25).abs() < 1e-12);
        assert!(d.data[0][1] < 0.25);
    }

    #[test]
    fn deserializes_lowercase_names() {
        let act: ActivationFunction = serde_json::from_str("\"relu\"").unwrap();
        assert_eq!(act, ActivationFunction::ReLU);
        let act: ActivationFunction = serde_json::from_str("\"logistic\"").unwrap();
        assert_eq!(act, ActivationFunction::Logistic);
    }
}
