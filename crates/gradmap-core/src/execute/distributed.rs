use std::borrow::Cow;

use tracing::{debug, info};

use crate::cluster::{launch, Communicator};
use crate::error::{GradmapError, Result};
use crate::grid::{PixelGrid, WorkerResult};
use crate::partition::partition;
use crate::sobel::sobel_rows;

use super::EdgeExecutor;

/// Message-passing executor over a cluster of isolated ranks.
///
/// Rank 0 broadcasts the full image to every rank, each rank computes the row
/// range assigned by [`partition`] against its own replica, and the row blocks
/// are gathered back at rank 0. Replicating the whole image means ranks never
/// exchange halo rows.
pub struct DistributedExecutor {
    ranks: usize,
}

impl DistributedExecutor {
    pub fn new(ranks: usize) -> Result<Self> {
        if ranks == 0 {
            return Err(GradmapError::InvalidWorkerCount(ranks));
        }
        Ok(Self { ranks })
    }

    /// Run with the input produced on rank 0 by `source`.
    ///
    /// If `source` fails, rank 0 aborts the cluster before the broadcast so no
    /// rank waits for an image that will never arrive, and the error is
    /// returned.
    pub fn run_with_source<S>(&self, source: S) -> Result<PixelGrid>
    where
        S: Fn() -> Result<PixelGrid> + Sync,
    {
        let assembled = launch(self.ranks, |comm| {
            if !comm.is_root() {
                return rank_main(&comm, None);
            }
            match source() {
                Ok(grid) => rank_main(&comm, Some(&grid)),
                Err(e) => {
                    comm.abort(&e.to_string());
                    Err(e)
                }
            }
        })?;
        assembled.ok_or_else(|| GradmapError::Communication("root produced no output".into()))
    }
}

impl EdgeExecutor for DistributedExecutor {
    fn name(&self) -> &str {
        "Distributed/message passing"
    }

    fn workers(&self) -> usize {
        self.ranks
    }

    fn run(&self, input: &PixelGrid) -> Result<PixelGrid> {
        info!(
            width = input.width(),
            height = input.height(),
            ranks = self.ranks,
            "Running distributed Sobel"
        );
        let assembled = launch(self.ranks, |comm| {
            let root_input = comm.is_root().then_some(input);
            rank_main(&comm, root_input)
        })?;
        assembled.ok_or_else(|| GradmapError::Communication("root produced no output".into()))
    }
}

/// The per-rank protocol. Returns the assembled grid on the root, `None`
/// elsewhere.
fn rank_main(comm: &Communicator, root_input: Option<&PixelGrid>) -> Result<Option<PixelGrid>> {
    let replica = match replicate(comm, root_input) {
        Ok(replica) => replica,
        Err(e) => {
            if comm.is_root() {
                comm.abort(&e.to_string());
            }
            return Err(e);
        }
    };
    let (width, height) = (replica.width(), replica.height());

    let ranges = partition(height, comm.size())?;
    let range = ranges[comm.rank()];
    debug!(rank = comm.rank(), of = comm.size(), rows = %range, "Rank is working");

    let local = WorkerResult {
        range,
        data: sobel_rows(&replica, range),
    };

    match comm.gather_rows(local, &ranges, width)? {
        Some(buffer) => PixelGrid::from_raw(width, height, buffer).map(Some),
        None => Ok(None),
    }
}

/// Steps 1 and 2: every rank ends holding an identical read-only image.
fn replicate<'a>(
    comm: &Communicator,
    root_input: Option<&'a PixelGrid>,
) -> Result<Cow<'a, PixelGrid>> {
    if comm.is_root() {
        let grid = root_input.ok_or_else(|| {
            GradmapError::Communication("root rank started without an input image".into())
        })?;
        comm.broadcast_dims(Some((grid.width(), grid.height())))?;
        comm.broadcast_pixels(Some(grid.as_slice()))?;
        return Ok(Cow::Borrowed(grid));
    }

    let (width, height) = comm.broadcast_dims(None)?;
    let pixels = comm.broadcast_pixels(None)?;
    Ok(Cow::Owned(PixelGrid::from_raw(width, height, pixels)?))
}
