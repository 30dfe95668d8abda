use crate::{
    layers::dense::{Gradients, Layer},
    math::matrix::Matrix,
    optim::optimizer::Optimizer,
};

/// Adam: adaptive moment estimation (Kingma & Ba, 2014).
///
/// Keeps exponentially decaying averages of past gradients (`m`) and squared
/// gradients (`v`) per parameter, with bias correction folded into the
/// effective learning rate:
///   lr_t = lr · sqrt(1 - β2ᵗ) / (1 - β1ᵗ)
///   θ   -= lr_t · m / (sqrt(v) + ε)
pub struct Adam {
    pub learning_rate: f64,
    pub beta_1: f64,
    pub beta_2: f64,
    pub epsilon: f64,
    t: i32,
    moments: Vec<LayerMoments>,
}

struct LayerMoments {
    m_w: Matrix,
    v_w: Matrix,
    m_b: Matrix,
    v_b: Matrix,
}

impl Adam {
    /// `layers` is used only to size the moment buffers.
    pub fn new(learning_rate: f64, beta_1: f64, beta_2: f64, epsilon: f64, layers: &[Layer]) -> Adam {
        let moments = layers
            .iter()
            .map(|l| LayerMoments {
                m_w: Matrix::zeros(l.weights.rows, l.weights.cols),
                v_w: Matrix::zeros(l.weights.rows, l.weights.cols),
                m_b: Matrix::zeros(l.biases.rows, l.biases.cols),
                v_b: Matrix::zeros(l.biases.rows, l.biases.cols),
            })
            .collect();
        Adam {
            learning_rate,
            beta_1,
            beta_2,
            epsilon,
            t: 0,
            moments,
        }
    }

    /// Number of steps taken so far.
    pub fn steps(&self) -> i32 {
        self.t
    }

    fn update(&self, m: &mut Matrix, v: &mut Matrix, grad: &Matrix, lr_t: f64) -> Matrix {
        let (b1, b2, eps) = (self.beta_1, self.beta_2, self.epsilon);
        *m = m.zip_map(grad, |m, g| b1 * m + (1.0 - b1) * g);
        *v = v.zip_map(grad, |v, g| b2 * v + (1.0 - b2) * g * g);
        m.zip_map(v, |m, v| -lr_t * m / (v.sqrt() + eps))
    }
}

impl Optimizer for Adam {
    fn step(&mut self, layers: &mut [Layer], grads: &[Gradients]) {
        self.t += 1;
        let lr_t = self.learning_rate * (1.0 - self.beta_2.powi(self.t)).sqrt()
            / (1.0 - self.beta_1.powi(self.t));

        let mut moments = std::mem::take(&mut self.moments);
        for ((layer, grad), mom) in layers.iter_mut().zip(grads).zip(moments.iter_mut()) {
            let dw = self.update(&mut mom.m_w, &mut mom.v_w, &grad.weights, lr_t);
            let db = self.update(&mut mom.m_b, &mut mom.v_b, &grad.biases, lr_t);
            layer.apply_updates(&dw, &db);
        }
        self.moments = moments;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::activation::ActivationFunction;

    fn layer() -> Layer {
        Layer {
            size: 2,
            weights: Matrix::from_data(vec![vec![1.0, 1.0]]),
            biases: Matrix::from_data(vec![vec![0.0, 0.0]]),
            activator: ActivationFunction::Identity,
        }
    }

    #[test]
    fn first_step_moves_each_parameter_by_about_lr() {
        let mut layers = vec![layer()];
        let mut adam = Adam::new(0.001, 0.9, 0.999, 1e-8, &layers);
        let grads = vec![Gradients {
            weights: Matrix::from_data(vec![vec![5.0, -0.01]]),
            biases: Matrix::from_data(vec![vec![0.0, 3.0]]),
        }];

        adam.step(&mut layers, &grads);

        assert_eq!(adam.steps(), 1);
        let w = &layers[0].weights.data[0];
        assert!((w[0] - 0.999).abs() < 1e-6);
        assert!((w[1] - 1.001).abs() < 1e-6);
        let b = &layers[0].biases.data[0];
        assert_eq!(b[0], 0.0);
        assert!((b[1] + 0.001).abs() < 1e-6);
    }

    #[test]
    fn repeated_steps_keep_descending() {
        let mut layers = vec![layer()];
        let mut adam = Adam::new(0.01, 0.9, 0.999, 1e-8, &layers);
        let grads = vec![Gradients {
            weights: Matrix::from_data(vec![vec![1.0, 1.0]]),
            biases: Matrix::from_data(vec![vec![1.0, 1.0]]),
        }];
        for _ in 0..10 {
            adam.step(&mut layers, &grads);
        }
        assert!(layers[0].weights.data[0][0] < 1.0 - 0.09);
    }
}
