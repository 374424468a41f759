use std::path::PathBuf;

use gradmap_core::config::EdgeConfig;
use gradmap_core::error::GradmapError;
use gradmap_core::execute::ExecutorKind;

// ---------------------------------------------------------------------------
// ExecutorKind Display
// ---------------------------------------------------------------------------

#[test]
fn test_executor_kind_display() {
    assert_eq!(format!("{}", ExecutorKind::Sequential), "Sequential");
    assert_eq!(format!("{}", ExecutorKind::Shared), "Shared memory");
    assert_eq!(format!("{}", ExecutorKind::Distributed), "Distributed");
}

#[test]
fn test_executor_kind_default_is_shared() {
    assert_eq!(ExecutorKind::default(), ExecutorKind::Shared);
}

// ---------------------------------------------------------------------------
// EdgeConfig
// ---------------------------------------------------------------------------

#[test]
fn test_default_config() {
    let config = EdgeConfig::default();
    assert_eq!(config.input, PathBuf::from("input.pgm"));
    assert_eq!(config.output, PathBuf::from("output.pgm"));
    assert_eq!(config.executor, ExecutorKind::Shared);
    assert_eq!(config.workers, 16);
}

#[test]
fn test_toml_roundtrip() {
    let config = EdgeConfig {
        input: PathBuf::from("scan.pgm"),
        output: PathBuf::from("edges.png"),
        executor: ExecutorKind::Distributed,
        workers: 4,
    };
    let text = config.to_toml_string().unwrap();
    assert_eq!(EdgeConfig::from_toml_str(&text).unwrap(), config);
}

#[test]
fn test_partial_toml_uses_defaults() {
    let config = EdgeConfig::from_toml_str("executor = \"Distributed\"\n").unwrap();
    assert_eq!(config.executor, ExecutorKind::Distributed);
    assert_eq!(config.workers, 16);
    assert_eq!(config.input, PathBuf::from("input.pgm"));
}

#[test]
fn test_zero_workers_rejected() {
    assert!(matches!(
        EdgeConfig::from_toml_str("workers = 0\n"),
        Err(GradmapError::InvalidWorkerCount(0))
    ));
}

#[test]
fn test_invalid_toml() {
    assert!(matches!(
        EdgeConfig::from_toml_str("executor = \"Quantum\"\n"),
        Err(GradmapError::Config(_))
    ));
}

#[test]
fn test_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gradmap.toml");
    std::fs::write(&path, "workers = 3\noutput = \"e.pgm\"\n").unwrap();

    let config = EdgeConfig::from_toml_file(&path).unwrap();
    assert_eq!(config.workers, 3);
    assert_eq!(config.output, PathBuf::from("e.pgm"));
}
