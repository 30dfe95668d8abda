use crate::{
    layers::dense::{Gradients, Layer},
    math::matrix::Matrix,
    optim::optimizer::Optimizer,
};

/// Stochastic gradient descent with a constant learning rate and (optionally
/// Nesterov) momentum.
pub struct Sgd {
    pub learning_rate: f64,
    pub momentum: f64,
    pub nesterov: bool,
    velocities: Vec<(Matrix, Matrix)>,
}

impl Sgd {
    /// `layers` is used only to size the velocity buffers.
    pub fn new(learning_rate: f64, momentum: f64, nesterov: bool, layers: &[Layer]) -> Sgd {
        let velocities = layers
            .iter()
            .map(|l| {
                (
                    Matrix::zeros(l.weights.rows, l.weights.cols),
                    Matrix::zeros(l.biases.rows, l.biases.cols),
                )
            })
            .collect();
        Sgd {
            learning_rate,
            momentum,
            nesterov,
            velocities,
        }
    }

    fn update(&self, velocity: &mut Matrix, grad: &Matrix) -> Matrix {
        let (lr, mu) = (self.learning_rate, self.momentum);
        *velocity = velocity.zip_map(grad, |v, g| mu * v - lr * g);
        if self.nesterov {
            velocity.zip_map(grad, |v, g| mu * v - lr * g)
        } else {
            velocity.clone()
        }
    }
}

impl Optimizer for Sgd {
    fn step(&mut self, layers: &mut [Layer], grads: &[Gradients]) {
        let mut velocities = std::mem::take(&mut self.velocities);
        for ((layer, grad), (v_w, v_b)) in layers.iter_mut().zip(grads).zip(velocities.iter_mut()) {
            let dw = self.update(v_w, &grad.weights);
            let db = self.update(v_b, &grad.biases);
            layer.apply_updates(&dw, &db);
        }
        self.velocities = velocities;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::activation::ActivationFunction;

    fn layer() -> Layer {
        Layer {
            size: 1,
            weights: Matrix::from_data(vec![vec![1.0]]),
            biases: Matrix::from_data(vec![vec![0.0]]),
            activator: ActivationFunction::Identity,
        }
    }

    fn grads() -> Vec<Gradients> {
        vec![Gradients {
            weights: Matrix::from_data(vec![vec![1.0]]),
            biases: Matrix::from_data(vec![vec![-2.0]]),
        }]
    }

    #[test]
    fn plain_step_moves_against_gradient() {
        let mut layers = vec![layer()];
        let mut sgd = Sgd::new(0.1, 0.0, false, &layers);
        sgd.step(&mut layers, &grads());
        assert!((layers[0].weights.data[0][0] - 0.9).abs() < 1e-12);
        assert!((layers[0].biases.data[0][0] - 0.2).abs() < 1e-12);
    }

    #[test]
    fn momentum_accumulates_across_steps() {
        let mut layers = vec![layer()];
        let mut sgd = Sgd::new(0.1, 0.9, false, &layers);
        sgd.step(&mut layers, &grads());
        sgd.step(&mut layers, &grads());
        // v1 = -0.1, v2 = 0.9 * -0.1 - 0.1 = -0.19
        assert!((layers[0].weights.data[0][0] - (1.0 - 0.1 - 0.19)).abs() < 1e-12);
    }

    #[test]
    fn nesterov_looks_ahead() {
        let mut layers = vec![layer()];
        let mut sgd = Sgd::new(0.1, 0.9, true, &layers);
        sgd.step(&mut layers, &grads());
        // v1 = -0.1, update = 0.9 * -0.1 - 0.1 = -0.19
        assert!((layers[0].weights.data[0][0] - 0.81).abs() < 1e-12);
    }
}
