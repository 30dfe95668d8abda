pub mod accuracy;
pub mod confusion;
pub mod report;

pub use accuracy::accuracy_score;
pub use confusion::confusion_matrix;
pub use report::{AverageMetrics, ClassMetrics, ClassificationReport};
