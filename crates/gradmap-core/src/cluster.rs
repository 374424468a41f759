//! In-process message-passing runtime for the distributed executor.
//!
//! A cluster is a fixed set of ranks, each running on its own OS thread. Ranks
//! share no mutable state: the only way data moves between them is as owned
//! [`Message`]s over channels. The topology is a star around
//! [`ROOT_RANK`]: the root can send to every rank, every other rank can only
//! send to the root. Because each rank holds only the senders it needs, a rank
//! that exits early disconnects its peers' receivers instead of leaving them
//! blocked forever.

use std::thread;

use crossbeam::channel::{unbounded, Receiver, Sender};
use tracing::debug;

use crate::consts::ROOT_RANK;
use crate::error::{GradmapError, Result};
use crate::grid::{alloc_zeroed, RowRange, WorkerResult};

/// Payloads exchanged between ranks.
#[derive(Debug)]
pub enum Message {
    Dims { width: usize, height: usize },
    Pixels(Vec<u8>),
    Rows { rank: usize, result: WorkerResult },
    Abort(String),
}

/// One rank's endpoint into the cluster.
pub struct Communicator {
    rank: usize,
    size: usize,
    inbox: Receiver<Message>,
    /// Indexed by destination rank; `None` where no link exists.
    outbox: Vec<Option<Sender<Message>>>,
}

impl Communicator {
    pub fn rank(&self) -> usize {
        self.rank
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_root(&self) -> bool {
        self.rank == ROOT_RANK
    }

    fn send(&self, to: usize, msg: Message) -> Result<()> {
        let link = self.outbox.get(to).and_then(Option::as_ref).ok_or_else(|| {
            GradmapError::Communication(format!("rank {} has no link to rank {to}", self.rank))
        })?;
        link.send(msg)
            .map_err(|_| GradmapError::Communication(format!("rank {to} has left the cluster")))
    }

    fn recv(&self) -> Result<Message> {
        match self.inbox.recv() {
            Ok(Message::Abort(reason)) => Err(GradmapError::ClusterAborted(reason)),
            Ok(msg) => Ok(msg),
            Err(_) => Err(GradmapError::Communication(format!(
                "rank {} lost every peer while waiting",
                self.rank
            ))),
        }
    }

    fn non_root_ranks(&self) -> impl Iterator<Item = usize> {
        (0..self.size).filter(|&r| r != ROOT_RANK)
    }

    /// Broadcast image dimensions from the root.
    ///
    /// The root passes `Some((width, height))`; other ranks pass `None` and
    /// receive the root's value.
    pub fn broadcast_dims(&self, dims: Option<(usize, usize)>) -> Result<(usize, usize)> {
        if self.is_root() {
            let (width, height) = dims.ok_or_else(|| {
                GradmapError::Communication("root has no dimensions to broadcast".into())
            })?;
            for r in self.non_root_ranks() {
                self.send(r, Message::Dims { width, height })?;
            }
            return Ok((width, height));
        }

        match self.recv()? {
            Message::Dims { width, height } => Ok((width, height)),
            other => Err(self.unexpected("Dims", &other)),
        }
    }

    /// Broadcast the pixel buffer from the root.
    ///
    /// Every non-root rank receives its own copy. The root's return value is
    /// empty: it already holds the data.
    pub fn broadcast_pixels(&self, pixels: Option<&[u8]>) -> Result<Vec<u8>> {
        if self.is_root() {
            let pixels = pixels.ok_or_else(|| {
                GradmapError::Communication("root has no pixels to broadcast".into())
            })?;
            for r in self.non_root_ranks() {
                self.send(r, Message::Pixels(pixels.to_vec()))?;
            }
            return Ok(Vec::new());
        }

        match self.recv()? {
            Message::Pixels(data) => Ok(data),
            other => Err(self.unexpected("Pixels", &other)),
        }
    }

    /// Variable-size gather of row blocks at the root.
    ///
    /// `ranges[r]` is the block rank `r` must contribute. Non-root ranks send
    /// `local` (possibly empty) and get `None`; the root places every block at
    /// `range.start * width` and returns the assembled buffer.
    pub fn gather_rows(
        &self,
        local: WorkerResult,
        ranges: &[RowRange],
        width: usize,
    ) -> Result<Option<Vec<u8>>> {
        if !self.is_root() {
            self.send(
                ROOT_RANK,
                Message::Rows {
                    rank: self.rank,
                    result: local,
                },
            )?;
            return Ok(None);
        }

        if ranges.len() != self.size {
            return Err(GradmapError::Communication(format!(
                "{} ranges for {} ranks",
                ranges.len(),
                self.size
            )));
        }
        let height = ranges.last().map_or(0, |r| r.end);
        let mut assembled = alloc_zeroed(width * height)?;
        let mut received = vec![false; self.size];

        place_block(&mut assembled, &local, ranges, ROOT_RANK, width)?;
        received[ROOT_RANK] = true;

        for _ in self.non_root_ranks() {
            let (rank, result) = match self.recv()? {
                Message::Rows { rank, result } => (rank, result),
                other => return Err(self.unexpected("Rows", &other)),
            };
            if rank >= self.size || received[rank] {
                return Err(GradmapError::Communication(format!(
                    "unexpected or duplicate rows from rank {rank}"
                )));
            }
            place_block(&mut assembled, &result, ranges, rank, width)?;
            received[rank] = true;
            debug!(rank, rows = %result.range, "Gathered rows");
        }

        Ok(Some(assembled))
    }

    /// Tell every other rank to stop. Only meaningful on the root.
    pub fn abort(&self, reason: &str) {
        for r in self.non_root_ranks() {
            // A rank that already left needs no notice.
            let _ = self.send(r, Message::Abort(reason.to_string()));
        }
    }

    fn unexpected(&self, wanted: &str, got: &Message) -> GradmapError {
        let kind = match got {
            Message::Dims { .. } => "Dims",
            Message::Pixels(_) => "Pixels",
            Message::Rows { .. } => "Rows",
            Message::Abort(_) => "Abort",
        };
        GradmapError::Communication(format!(
            "rank {} expected {wanted}, received {kind}",
            self.rank
        ))
    }
}

fn place_block(
    assembled: &mut [u8],
    block: &WorkerResult,
    ranges: &[RowRange],
    rank: usize,
    width: usize,
) -> Result<()> {
    if block.range != ranges[rank] || !block.matches_width(width) {
        return Err(GradmapError::Communication(format!(
            "rank {rank} sent {} bytes for rows {}, expected rows {}",
            block.data.len(),
            block.range,
            ranges[rank]
        )));
    }
    let offset = block.offset(width);
    assembled[offset..offset + block.data.len()].copy_from_slice(&block.data);
    Ok(())
}

/// Wire up a star of `size` communicators around the root.
pub fn connect(size: usize) -> Vec<Communicator> {
    let (senders, receivers): (Vec<_>, Vec<_>) =
        (0..size).map(|_| unbounded::<Message>()).unzip();

    receivers
        .into_iter()
        .enumerate()
        .map(|(rank, inbox)| {
            let outbox = (0..size)
                .map(|to| {
                    let linked = to != rank && (rank == ROOT_RANK || to == ROOT_RANK);
                    linked.then(|| senders[to].clone())
                })
                .collect();
            Communicator {
                rank,
                size,
                inbox,
                outbox,
            }
        })
        .collect()
}

/// Run `task` once per rank on `size` threads and return the root's value.
///
/// All ranks are joined before returning. A panicking rank is reported as
/// [`GradmapError::WorkerPanicked`] in preference to any other error.
pub fn launch<T, F>(size: usize, task: F) -> Result<T>
where
    T: Send,
    F: Fn(Communicator) -> Result<T> + Sync,
{
    if size == 0 {
        return Err(GradmapError::InvalidWorkerCount(size));
    }
    let comms = connect(size);
    let task = &task;

    let outcomes = thread::scope(|s| -> Result<Vec<(usize, thread::Result<Result<T>>)>> {
        let mut handles = Vec::with_capacity(size);
        for comm in comms {
            let rank = comm.rank();
            let handle = thread::Builder::new()
                .name(format!("rank-{rank}"))
                .spawn_scoped(s, move || task(comm))?;
            handles.push((rank, handle));
        }
        Ok(handles
            .into_iter()
            .map(|(rank, h)| (rank, h.join()))
            .collect())
    })?;

    let mut root = None;
    for (rank, outcome) in outcomes {
        match outcome {
            Err(_) => return Err(GradmapError::WorkerPanicked { rank }),
            Ok(result) if rank == ROOT_RANK => root = Some(result),
            Ok(Err(e)) => debug!(rank, error = %e, "Rank finished with error"),
            Ok(Ok(_)) => {}
        }
    }
    root.unwrap_or_else(|| Err(GradmapError::WorkerPanicked { rank: ROOT_RANK }))
}
