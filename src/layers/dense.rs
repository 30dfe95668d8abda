use rand::Rng;

use crate::{activation::activation::ActivationFunction, math::matrix::Matrix};

/// Fully connected layer: `a = f(x·W + b)`.
///
/// `weights` has shape (input_size, size) and `biases` shape (1, size), so a
/// batch of inputs with one sample per row maps to one output per row.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub size: usize,
    pub weights: Matrix,
    pub biases: Matrix,
    pub activator: ActivationFunction,
}

/// Values cached by the forward pass for backprop.
#[derive(Debug, Clone)]
pub struct LayerOutput {
    /// Pre-activation values `z = x·W + b`.
    pub pre_activation: Matrix,
    /// Post-activation values `a = f(z)`.
    pub activation: Matrix,
}

/// Gradients of the loss with respect to one layer's parameters.
#[derive(Debug, Clone)]
pub struct Gradients {
    pub weights: Matrix,
    pub biases: Matrix,
}

impl Layer {
    /// Creates a layer with Glorot-uniform weights and biases drawn from `rng`.
    pub fn new<R: Rng + ?Sized>(
        size: usize,
        input_size: usize,
        activation: ActivationFunction,
        rng: &mut R,
    ) -> Layer {
        // Fan-in/fan-out of the weight matrix also sets the bias bound.
        let factor = activation.init_factor();
        let weights = Matrix::glorot_uniform(input_size, size, factor, rng);
        let bound = (factor / (input_size + size) as f64).sqrt();
        let biases = Matrix::from_data(vec![(0..size).map(|_| rng.gen_range(-bound..=bound)).collect()]);

        Layer {
            size,
            weights,
            biases,
            activator: activation,
        }
    }

    pub fn input_size(&self) -> usize {
        self.weights.rows
    }

    /// Forward pass over a batch. Does not mutate the layer.
    pub fn feed_from(&self, input: &Matrix) -> LayerOutput {
        let z = (input * &self.weights).add_row(&self.biases);
        let a = self.activator.activate(&z);
        LayerOutput {
            pre_activation: z,
            activation: a,
        }
    }

    /// Computes parameter gradients for a batch.
    ///
    /// `upstream` is ∂L/∂a for this layer (one row per sample), `output` the
    /// cached forward values and `inputs` what was fed into the layer.
    /// Returns the gradients plus the layer delta `δ = upstream ⊙ f'(z)`,
    /// which the caller propagates to the previous layer.
    ///
    /// The weight gradient includes the L2 term `alpha · W`; both gradients
    /// are averaged over the batch.
    pub fn compute_gradients(
        &self,
        upstream: &Matrix,
        output: &LayerOutput,
        inputs: &Matrix,
        alpha: f64,
    ) -> (Gradients, Matrix) {
        let act_derivative = self.activator.derivative(&output.pre_activation);
        let layer_delta = upstream.hadamard(&act_derivative);

        let n = inputs.rows.max(1) as f64;
        let raw = &inputs.transpose() * &layer_delta;
        let weights = raw.zip_map(&self.weights, |g, w| (g + alpha * w) / n);
        let biases = layer_delta.column_means();

        (Gradients { weights, biases }, layer_delta)
    }

    /// Adds pre-computed parameter updates (already scaled and signed).
    pub fn apply_updates(&mut self, weights_update: &Matrix, biases_update: &Matrix) {
        self.weights = &self.weights + weights_update;
        self.biases = &self.biases + biases_update;
    }
}
