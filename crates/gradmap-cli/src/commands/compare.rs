use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;
use gradmap_core::consts::DEFAULT_WORKER_COUNT;
use gradmap_core::execute::{create_executor, ExecutorKind};
use gradmap_core::io::image_io::load_image;

use crate::summary::{print_compare_table, CompareRow};

#[derive(Args)]
pub struct CompareArgs {
    /// Input image (PGM, PNG or TIFF)
    pub file: PathBuf,

    /// Worker threads or ranks for the parallel executors
    #[arg(short, long, default_value_t = DEFAULT_WORKER_COUNT)]
    pub workers: usize,
}

/// Run every executor on the same image and check them against the reference.
pub fn run(args: &CompareArgs) -> Result<()> {
    let input = load_image(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;
    println!("Loaded {}x{} image", input.width(), input.height());

    let mut reference = None;
    let mut rows = Vec::new();
    for kind in [
        ExecutorKind::Sequential,
        ExecutorKind::Shared,
        ExecutorKind::Distributed,
    ] {
        let executor = create_executor(kind, args.workers)?;
        let start = Instant::now();
        let output = executor.run(&input)?;
        let elapsed = start.elapsed();

        let expected = reference.get_or_insert_with(|| output.clone());
        rows.push(CompareRow {
            name: executor.name().to_string(),
            workers: executor.workers(),
            elapsed,
            matches_reference: output == *expected,
        });
    }

    print_compare_table(&rows);

    if rows.iter().any(|r| !r.matches_reference) {
        anyhow::bail!("Executors disagree with the sequential reference");
    }
    Ok(())
}
