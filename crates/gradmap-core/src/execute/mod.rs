pub mod distributed;
pub mod sequential;
pub mod shared;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::grid::PixelGrid;

pub use distributed::DistributedExecutor;
pub use sequential::SequentialExecutor;
pub use shared::SharedMemoryExecutor;

/// A strategy for applying the Sobel operator to a whole image.
///
/// Every implementation must produce output byte-identical to
/// [`SequentialExecutor`].
pub trait EdgeExecutor: Send + Sync {
    /// Short human-readable name.
    fn name(&self) -> &str;

    /// Number of parallel workers (threads or ranks).
    fn workers(&self) -> usize;

    /// Compute the gradient-magnitude image of `input`.
    fn run(&self, input: &PixelGrid) -> Result<PixelGrid>;
}

/// Which executor to run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutorKind {
    Sequential,
    #[default]
    Shared,
    Distributed,
}

impl std::fmt::Display for ExecutorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sequential => write!(f, "Sequential"),
            Self::Shared => write!(f, "Shared memory"),
            Self::Distributed => write!(f, "Distributed"),
        }
    }
}

/// Build the executor for `kind` with `workers` threads or ranks.
///
/// `workers` is ignored by the sequential executor.
pub fn create_executor(kind: ExecutorKind, workers: usize) -> Result<Arc<dyn EdgeExecutor>> {
    Ok(match kind {
        ExecutorKind::Sequential => Arc::new(SequentialExecutor),
        ExecutorKind::Shared => Arc::new(SharedMemoryExecutor::new(workers)?),
        ExecutorKind::Distributed => Arc::new(DistributedExecutor::new(workers)?),
    })
}
