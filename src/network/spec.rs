use serde::{Deserialize, Serialize};

use crate::activation::activation::ActivationFunction;

/// Describes one layer in a network specification.
///
/// Fields:
/// - `size`       : number of neurons in this layer
/// - `input_size` : number of neurons feeding into this layer (i.e. the output
///                  size of the previous layer, or the raw input dimension for
///                  the first layer)
/// - `activation` : activation function applied after the linear transform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerSpec {
    pub size: usize,
    pub input_size: usize,
    pub activation: ActivationFunction,
}

/// Ordered list of layer descriptions (input to output).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSpec {
    pub layers: Vec<LayerSpec>,
}

impl NetworkSpec {
    /// Multi-layer perceptron classifier layout: `n_inputs -> hidden... -> n_outputs`,
    /// with `hidden_activation` on every hidden layer and softmax on the output.
    pub fn mlp_classifier(
        n_inputs: usize,
        hidden_layer_sizes: &[usize],
        hidden_activation: ActivationFunction,
        n_outputs: usize,
    ) -> NetworkSpec {
        let mut layers = Vec::with_capacity(hidden_layer_sizes.len() + 1);
        let mut input_size = n_inputs;
        for &size in hidden_layer_sizes {
            layers.push(LayerSpec {
                size,
                input_size,
                activation: hidden_activation,
            });
            input_size = size;
        }
        layers.push(LayerSpec {
            size: n_outputs,
            input_size,
            activation: ActivationFunction::Softmax,
        });
        NetworkSpec { layers }
    }
}
