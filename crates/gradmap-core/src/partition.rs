use crate::error::{GradmapError, Result};
use crate::grid::RowRange;

/// Split `[0, height)` into `num_workers` contiguous row ranges.
///
/// Every worker gets `height / num_workers` rows and the first
/// `height % num_workers` workers get one extra. When there are more workers
/// than rows the trailing ranges are empty.
pub fn partition(height: usize, num_workers: usize) -> Result<Vec<RowRange>> {
    if num_workers == 0 {
        return Err(GradmapError::InvalidWorkerCount(num_workers));
    }
    Ok((0..num_workers)
        .map(|k| range_for(height, num_workers, k))
        .collect())
}

/// The range assigned to worker `k`; callers guarantee `num_workers > 0`.
pub fn range_for(height: usize, num_workers: usize, k: usize) -> RowRange {
    let base = height / num_workers;
    let remainder = height % num_workers;
    let start = k * base + k.min(remainder);
    let end = start + base + usize::from(k < remainder);
    RowRange::new(start, end)
}
