use ndarray::Zip;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, info};

use crate::error::{GradmapError, Result};
use crate::grid::PixelGrid;
use crate::sobel::compute_magnitude;

use super::EdgeExecutor;

/// Thread-parallel executor over a single shared input grid.
///
/// The whole `height x width` iteration space is handed to a dedicated Rayon
/// pool; each output cell is written by exactly one task and the input is only
/// read, so no locking is needed.
pub struct SharedMemoryExecutor {
    pool: ThreadPool,
    workers: usize,
}

impl SharedMemoryExecutor {
    pub fn new(workers: usize) -> Result<Self> {
        if workers == 0 {
            return Err(GradmapError::InvalidWorkerCount(workers));
        }
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("sobel-worker-{i}"))
            .build()?;
        Ok(Self { pool, workers })
    }

    fn announce_threads(&self) {
        self.pool.broadcast(|ctx| {
            debug!(
                thread = ctx.index(),
                total = ctx.num_threads(),
                "Thread is working"
            );
        });
    }
}

impl EdgeExecutor for SharedMemoryExecutor {
    fn name(&self) -> &str {
        "Shared memory/Rayon"
    }

    fn workers(&self) -> usize {
        self.workers
    }

    fn run(&self, input: &PixelGrid) -> Result<PixelGrid> {
        info!(
            width = input.width(),
            height = input.height(),
            workers = self.workers,
            "Running shared-memory Sobel"
        );
        self.announce_threads();

        let mut output = PixelGrid::new(input.width(), input.height())?;
        // `install` returns only once every task has finished.
        self.pool.install(|| {
            Zip::indexed(output.as_array_mut()).par_for_each(|(row, col), px| {
                *px = compute_magnitude(input, row, col);
            });
        });

        Ok(output)
    }
}
