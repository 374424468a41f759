use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GradmapError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot open {}: {source}", path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid PGM file: {0}")]
    Format(String),

    #[error("Truncated pixel data: expected {expected} bytes, got {actual}")]
    TruncatedData { expected: usize, actual: usize },

    #[error("Allocation of {bytes} bytes failed")]
    Allocation { bytes: usize },

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Buffer of {actual} bytes does not match {width}x{height} image")]
    BufferSizeMismatch {
        width: usize,
        height: usize,
        actual: usize,
    },

    #[error("Worker count must be at least 1, got {0}")]
    InvalidWorkerCount(usize),

    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Communication error: {0}")]
    Communication(String),

    #[error("Cluster aborted: {0}")]
    ClusterAborted(String),

    #[error("Rank {rank} panicked")]
    WorkerPanicked { rank: usize },

    #[error("Config error: {0}")]
    Config(String),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, GradmapError>;
