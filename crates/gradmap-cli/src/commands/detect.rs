use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use gradmap_core::config::EdgeConfig;
use gradmap_core::execute::{create_executor, DistributedExecutor, EdgeExecutor, ExecutorKind};
use gradmap_core::grid::PixelGrid;
use gradmap_core::io::image_io::{load_image, save_image};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

#[derive(Clone, Copy, ValueEnum)]
pub enum ExecutorArg {
    /// Single thread (reference)
    Sequential,
    /// Thread pool over one shared image
    Shared,
    /// Message-passing ranks with row partitioning
    Distributed,
}

impl From<ExecutorArg> for ExecutorKind {
    fn from(arg: ExecutorArg) -> Self {
        match arg {
            ExecutorArg::Sequential => ExecutorKind::Sequential,
            ExecutorArg::Shared => ExecutorKind::Shared,
            ExecutorArg::Distributed => ExecutorKind::Distributed,
        }
    }
}

#[derive(Args)]
pub struct DetectArgs {
    /// Input image (PGM, PNG or TIFF) [default: input.pgm]
    pub input: Option<PathBuf>,

    /// Output image, format chosen by extension [default: output.pgm]
    pub output: Option<PathBuf>,

    /// Execution strategy
    #[arg(long, value_enum)]
    pub executor: Option<ExecutorArg>,

    /// Worker threads or ranks [default: 16]
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Run config file (TOML); command-line values take precedence
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn resolve_config(args: &DetectArgs) -> Result<EdgeConfig> {
    let mut config = match args.config {
        Some(ref path) => EdgeConfig::from_toml_file(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?,
        None => EdgeConfig::default(),
    };
    if let Some(ref input) = args.input {
        config.input = input.clone();
    }
    if let Some(ref output) = args.output {
        config.output = output.clone();
    }
    if let Some(executor) = args.executor {
        config.executor = executor.into();
    }
    if let Some(workers) = args.workers {
        config.workers = workers;
    }
    Ok(config)
}

fn spinner(message: String) -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner} {msg} [{elapsed}]")?);
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}

/// Load the input and compute its edge map, returning the compute time.
///
/// The distributed executor loads on rank 0 inside the cluster, so a bad input
/// aborts every rank before the broadcast. Its time includes that load.
fn detect_edges(
    config: &EdgeConfig,
    executor: &dyn EdgeExecutor,
) -> Result<(PixelGrid, Duration)> {
    if config.executor == ExecutorKind::Distributed {
        let cluster = DistributedExecutor::new(config.workers)?;
        let pb = spinner(format!("Detecting edges ({})", executor.name()))?;
        let start = Instant::now();
        let edges = cluster.run_with_source(|| load_image(&config.input));
        let elapsed = start.elapsed();
        pb.finish_and_clear();
        let edges =
            edges.with_context(|| format!("Failed to process {}", config.input.display()))?;
        return Ok((edges, elapsed));
    }

    let input = load_image(&config.input)
        .with_context(|| format!("Failed to load {}", config.input.display()))?;
    println!("Loaded {}x{} image", input.width(), input.height());

    let pb = spinner(format!("Detecting edges ({})", executor.name()))?;
    let start = Instant::now();
    let edges = executor.run(&input);
    let elapsed = start.elapsed();
    pb.finish_and_clear();
    Ok((edges?, elapsed))
}

pub fn run(args: &DetectArgs) -> Result<()> {
    let config = resolve_config(args)?;
    let executor = create_executor(config.executor, config.workers)?;

    crate::summary::print_run_summary(&config, executor.name(), executor.workers());

    let (edges, elapsed) = detect_edges(&config, executor.as_ref())?;

    info!(executor = executor.name(), secs = elapsed.as_secs_f64(), "Edge map complete");
    println!("Edge map {}x{}", edges.width(), edges.height());
    println!("Processing time: {:.5} seconds", elapsed.as_secs_f64());

    save_image(&edges, &config.output)
        .with_context(|| format!("Failed to save {}", config.output.display()))?;
    println!("Saved to {}", config.output.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use gradmap_core::error::GradmapError;

    use super::*;

    fn config_for(executor: ExecutorKind) -> EdgeConfig {
        EdgeConfig {
            input: PathBuf::from("/nonexistent/gradmap/input.pgm"),
            executor,
            workers: 4,
            ..EdgeConfig::default()
        }
    }

    #[test]
    fn distributed_missing_input_aborts_cluster() {
        let config = config_for(ExecutorKind::Distributed);
        let executor = create_executor(config.executor, config.workers).unwrap();
        let err = detect_edges(&config, executor.as_ref()).err().unwrap();
        assert!(matches!(
            err.downcast_ref::<GradmapError>(),
            Some(GradmapError::FileOpen { .. })
        ));
    }

    #[test]
    fn shared_missing_input_fails_before_running() {
        let config = config_for(ExecutorKind::Shared);
        let executor = create_executor(config.executor, config.workers).unwrap();
        let err = detect_edges(&config, executor.as_ref()).err().unwrap();
        assert!(matches!(
            err.downcast_ref::<GradmapError>(),
            Some(GradmapError::FileOpen { .. })
        ));
    }

    #[test]
    fn command_line_overrides_defaults() {
        let args = DetectArgs {
            input: Some(PathBuf::from("a.pgm")),
            output: None,
            executor: Some(ExecutorArg::Distributed),
            workers: Some(3),
            config: None,
        };
        let config = resolve_config(&args).unwrap();
        assert_eq!(config.input, PathBuf::from("a.pgm"));
        assert_eq!(config.output, EdgeConfig::default().output);
        assert_eq!(config.executor, ExecutorKind::Distributed);
        assert_eq!(config.workers, 3);
    }
}
