pub mod epoch_stats;
pub mod loop_fn;
pub mod train_config;

pub use epoch_stats::{EpochStats, FitReport};
pub use loop_fn::{build_optimizer, train_loop};
pub use train_config::{Solver, TrainConfig};
