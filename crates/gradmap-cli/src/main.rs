mod commands;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Without a subcommand, `gradmap [INPUT] [OUTPUT]` runs `detect`.
#[derive(Parser)]
#[command(name = "gradmap", about = "Sobel edge maps for grayscale images")]
#[command(version, args_conflicts_with_subcommands = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    detect: commands::detect::DetectArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the Sobel edge map of an image
    Detect(commands::detect::DetectArgs),
    /// Show PGM header information
    Info(commands::info::InfoArgs),
    /// Run every executor on one image and compare results and timings
    Compare(commands::compare::CompareArgs),
    /// Print the default run config as TOML
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::try_parse().unwrap_or_else(|e| {
        let _ = e.print();
        // Usage errors share the failure status of every other error.
        std::process::exit(if e.use_stderr() { 1 } else { 0 });
    });

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.command {
        None => commands::detect::run(&cli.detect),
        Some(Commands::Detect(args)) => commands::detect::run(args),
        Some(Commands::Info(args)) => commands::info::run(args),
        Some(Commands::Compare(args)) => commands::compare::run(args),
        Some(Commands::Config(args)) => commands::config::run(args),
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn bare_paths_run_detect() {
        let cli = Cli::try_parse_from(["gradmap", "in.pgm", "out.pgm"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.detect.input.as_deref(), Some(Path::new("in.pgm")));
        assert_eq!(cli.detect.output.as_deref(), Some(Path::new("out.pgm")));
    }

    #[test]
    fn no_arguments_uses_defaults() {
        let cli = Cli::try_parse_from(["gradmap"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.detect.input.is_none());
        assert!(cli.detect.output.is_none());
    }

    #[test]
    fn subcommands_still_parse() {
        let cli = Cli::try_parse_from(["gradmap", "info", "in.pgm"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Info(_))));

        let cli = Cli::try_parse_from(["gradmap", "detect", "a.pgm", "b.png"]).unwrap();
        match cli.command {
            Some(Commands::Detect(args)) => {
                assert_eq!(args.output.as_deref(), Some(Path::new("b.png")));
            }
            _ => panic!("expected detect"),
        }
    }

    #[test]
    fn usage_errors_are_reported_not_parsed() {
        let err = Cli::try_parse_from(["gradmap", "a.pgm", "b.pgm", "c.pgm"])
            .err()
            .unwrap();
        assert!(err.use_stderr());
    }
}
