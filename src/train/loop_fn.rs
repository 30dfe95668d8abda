use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::loss::cross_entropy::CrossEntropyLoss;
use crate::math::matrix::Matrix;
use crate::network::network::Network;
use crate::optim::{Adam, Optimizer, Sgd};
use crate::train::epoch_stats::{EpochStats, FitReport};
use crate::train::train_config::{Solver, TrainConfig};

// ---------------------------------------------------------------------------
// Public entry points
// ---------------------------------------------------------------------------

/// Creates the optimizer selected by `config.solver`, sized for `network`.
pub fn build_optimizer(config: &TrainConfig, network: &Network) -> Box<dyn Optimizer> {
    match config.solver {
        Solver::Adam => Box::new(Adam::new(
            config.learning_rate_init,
            config.beta_1,
            config.beta_2,
            config.epsilon,
            &network.layers,
        )),
        Solver::Sgd => Box::new(Sgd::new(
            config.learning_rate_init,
            config.momentum,
            config.nesterovs_momentum,
            &network.layers,
        )),
    }
}

/// Trains `network` (softmax output, cross-entropy loss) with mini-batches
/// until the loss plateaus or `config.max_iter` epochs have run.
///
/// # Arguments
/// - `network`   : modified in place
/// - `inputs`    : one training sample per row
/// - `targets`   : one-hot targets, one row per sample
/// - `optimizer` : created for this network (see `build_optimizer`)
/// - `config`    : hyperparameters
/// - `rng`       : drives the per-epoch shuffle
///
/// # Stopping
/// An epoch whose loss is not at least `tol` below the best loss so far
/// increments a patience counter; any other epoch resets it. Training stops
/// as converged once the counter exceeds `n_iter_no_change`. Running out of
/// epochs is not an error: a warning is logged and the network is kept as-is.
///
/// # Errors
/// `InvalidInput` for an empty training set, `ShapeMismatch` when the input or
/// target widths disagree with the network, `Numerical` when the loss stops
/// being finite.
pub fn train_loop<R: Rng + ?Sized>(
    network: &mut Network,
    inputs: &Matrix,
    targets: &Matrix,
    optimizer: &mut dyn Optimizer,
    config: &TrainConfig,
    rng: &mut R,
) -> Result<FitReport> {
    if inputs.rows == 0 {
        return Err(Error::InvalidInput("training set is empty".into()));
    }
    if targets.rows != inputs.rows {
        return Err(Error::ShapeMismatch { expected: inputs.rows, found: targets.rows });
    }
    if inputs.cols != network.input_size() {
        return Err(Error::ShapeMismatch { expected: network.input_size(), found: inputs.cols });
    }
    if targets.cols != network.output_size() {
        return Err(Error::ShapeMismatch { expected: network.output_size(), found: targets.cols });
    }

    let n = inputs.rows;
    let batch_size = config.effective_batch_size(n);
    let mut indices: Vec<usize> = (0..n).collect();

    let mut history = Vec::new();
    let mut best_loss = f64::INFINITY;
    let mut no_improvement_count = 0usize;

    for epoch in 1..=config.max_iter {
        if config.shuffle {
            indices.shuffle(rng);
        }

        let mut accumulated = 0.0;
        for batch in indices.chunks(batch_size) {
            let x = inputs.select_rows(batch);
            let y = targets.select_rows(batch);
            accumulated += run_batch(network, &x, &y, optimizer, config.alpha) * batch.len() as f64;
        }
        let train_loss = accumulated / n as f64;

        if !train_loss.is_finite() {
            return Err(Error::Numerical(format!("training loss became {train_loss} at epoch {epoch}")));
        }

        if train_loss > best_loss - config.tol {
            no_improvement_count += 1;
        } else {
            no_improvement_count = 0;
        }
        if train_loss < best_loss {
            best_loss = train_loss;
        }

        debug!(epoch, loss = train_loss, best_loss, "training iteration");
        history.push(EpochStats {
            epoch,
            train_loss,
            best_loss,
            no_improvement_count,
        });

        if no_improvement_count > config.n_iter_no_change {
            info!(
                epoch,
                loss = train_loss,
                "training loss did not improve by more than tol={} for {} consecutive epochs; stopping",
                config.tol,
                config.n_iter_no_change
            );
            return Ok(FitReport { n_iter: epoch, converged: true, history });
        }
    }

    warn!(
        max_iter = config.max_iter,
        loss = best_loss,
        "maximum iterations reached and the optimization hasn't converged yet; using the model as-is"
    );
    Ok(FitReport { n_iter: config.max_iter, converged: false, history })
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

/// Forward pass, backward pass and one optimizer step on a single mini-batch.
/// Returns the batch loss (mean cross-entropy plus L2 penalty).
fn run_batch(
    network: &mut Network,
    x: &Matrix,
    y: &Matrix,
    optimizer: &mut dyn Optimizer,
    alpha: f64,
) -> f64 {
    let outputs = network.forward_cached(x);
    // Every network built from a NetworkSpec has an output layer.
    let last = &outputs[outputs.len() - 1];

    let loss = CrossEntropyLoss::loss(&last.activation, y)
        + CrossEntropyLoss::l2_penalty(network.weights_sum_of_squares(), alpha, x.rows);

    // Initial delta: combined Softmax + CE gradient = predicted - expected.
    let mut upstream = CrossEntropyLoss::derivative(&last.activation, y);
    let mut grads = Vec::with_capacity(network.layers.len());

    // Backward pass, last layer first.
    for i in (0..network.layers.len()).rev() {
        let layer_input = if i == 0 { x } else { &outputs[i - 1].activation };
        let (layer_grads, delta) =
            network.layers[i].compute_gradients(&upstream, &outputs[i], layer_input, alpha);

        if i > 0 {
            // Propagate δ_i through the weights to get ∂L/∂a_{i-1}.
            upstream = &delta * &network.layers[i].weights.transpose();
        }
        grads.push(layer_grads);
    }
    grads.reverse();

    optimizer.step(&mut network.layers, &grads);
    loss
}
