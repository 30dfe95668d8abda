use crate::layers::dense::{Gradients, Layer};

/// A parameter update rule. Stateful optimizers keep one slot per layer, so an
/// instance is tied to the network it was created for.
pub trait Optimizer {
    /// Applies one update to every layer. `grads[i]` belongs to `layers[i]`.
    fn step(&mut self, layers: &mut [Layer], grads: &[Gradients]);
}
