// Trains the fixed two-hidden-layer MLP on Iris and prints the evaluation.
// Logs go to stderr; stdout carries only the results.
use iris_ann::{logging, pipeline, PipelineConfig};

fn main() -> anyhow::Result<()> {
    let config = PipelineConfig::default();
    logging::init_logging(config.log_level)?;

    let outcome = pipeline::run(&config)?;
    print!("{}", pipeline::render(&outcome));
    Ok(())
}
