pub mod dataset;
mod iris;
pub mod split;

pub use dataset::{load_iris, Dataset};
pub use split::{train_test_split, Split};
