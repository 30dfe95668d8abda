use rand::Rng;

use crate::{
    layers::dense::{Layer, LayerOutput},
    math::matrix::Matrix,
    network::spec::NetworkSpec,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Network {
    pub layers: Vec<Layer>,
}

impl Network {
    /// Builds a network from a spec, initializing every layer from `rng` in order.
    pub fn new<R: Rng + ?Sized>(spec: &NetworkSpec, rng: &mut R) -> Network {
        let layers = spec
            .layers
            .iter()
            .map(|l| Layer::new(l.size, l.input_size, l.activation, rng))
            .collect();
        Network { layers }
    }

    pub fn input_size(&self) -> usize {
        self.layers.first().map_or(0, Layer::input_size)
    }

    pub fn output_size(&self) -> usize {
        self.layers.last().map_or(0, |l| l.size)
    }

    /// Forward pass over a batch; returns the output layer's activations.
    pub fn forward(&self, input: &Matrix) -> Matrix {
        let mut current = input.clone();
        for layer in &self.layers {
            current = layer.feed_from(&current).activation;
        }
        current
    }

    /// Forward pass keeping every layer's pre-activations and activations
    /// for backprop. Element `i` belongs to `layers[i]`.
    pub fn forward_cached(&self, input: &Matrix) -> Vec<LayerOutput> {
        let mut outputs: Vec<LayerOutput> = Vec::with_capacity(self.layers.len());
        for layer in &self.layers {
            let out = match outputs.last() {
                Some(prev) => layer.feed_from(&prev.activation),
                None => layer.feed_from(input),
            };
            outputs.push(out);
        }
        outputs
    }

    /// Sum of squared weights over all layers (biases excluded), used for the
    /// L2 penalty.
    pub fn weights_sum_of_squares(&self) -> f64 {
        self.layers.iter().map(|l| l.weights.sum_of_squares()).sum()
    }
}
