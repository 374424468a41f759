use std::ops::Range;

use ndarray::{Array2, ArrayView2};

use crate::error::{GradmapError, Result};

/// A single-channel 8-bit image.
///
/// Pixels are stored row-major: pixel `(row, col)` lives at flat offset
/// `row * width + col`. The buffer length always equals `width * height` and
/// the grid is never resized after construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelGrid {
    data: Array2<u8>,
}

impl PixelGrid {
    /// Allocate a zero-filled grid, reporting allocation failure as an error.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        let len = checked_len(width, height)?;
        let buffer = alloc_zeroed(len)?;
        Self::from_raw(width, height, buffer)
    }

    /// Wrap a flat row-major buffer.
    pub fn from_raw(width: usize, height: usize, buffer: Vec<u8>) -> Result<Self> {
        let len = checked_len(width, height)?;
        if buffer.len() != len {
            return Err(GradmapError::BufferSizeMismatch {
                width,
                height,
                actual: buffer.len(),
            });
        }
        let data = Array2::from_shape_vec((height, width), buffer)
            .map_err(|_| GradmapError::InvalidDimensions { width, height })?;
        Ok(Self { data })
    }

    /// Copy an existing `(height, width)` array into a fresh row-major grid.
    ///
    /// Views and sliced arrays are accepted; only the visible pixels are kept.
    pub fn from_array(data: ArrayView2<'_, u8>) -> Result<Self> {
        let (height, width) = data.dim();
        checked_len(width, height)?;
        Ok(Self {
            data: data.as_standard_layout().into_owned(),
        })
    }

    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }

    /// Number of pixels (`width * height`).
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Pixel at `(row, col)`. Panics when out of bounds.
    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.data[[row, col]]
    }

    /// Mutable pixel access for executors filling a freshly allocated output.
    pub(crate) fn as_array_mut(&mut self) -> &mut Array2<u8> {
        &mut self.data
    }

    /// The flat row-major pixel buffer.
    pub fn as_slice(&self) -> &[u8] {
        self.data
            .as_slice()
            .expect("pixel grid is always in standard layout")
    }

    /// The flat bytes of the rows in `range`.
    pub fn rows(&self, range: RowRange) -> &[u8] {
        let w = self.width();
        &self.as_slice()[range.start * w..range.end * w]
    }
}

fn checked_len(width: usize, height: usize) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(GradmapError::InvalidDimensions { width, height });
    }
    width
        .checked_mul(height)
        .ok_or(GradmapError::InvalidDimensions { width, height })
}

/// Allocate a zeroed byte buffer without aborting on allocation failure.
pub(crate) fn alloc_zeroed(len: usize) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(len)
        .map_err(|_| GradmapError::Allocation { bytes: len })?;
    buffer.resize(len, 0);
    Ok(buffer)
}

/// Half-open range of image rows `[start, end)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RowRange {
    pub start: usize,
    pub end: usize,
}

impl RowRange {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "row range start {start} > end {end}");
        Self { start, end }
    }

    /// Number of rows in the range.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn rows(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl std::fmt::Display for RowRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// Output rows computed by one worker, owned by it until the gather.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkerResult {
    pub range: RowRange,
    /// `width * range.len()` bytes, row-major.
    pub data: Vec<u8>,
}

impl WorkerResult {
    /// Byte offset of this result inside the assembled output.
    pub fn offset(&self, width: usize) -> usize {
        self.range.start * width
    }

    /// Whether the payload holds exactly the rows of `range` at `width`.
    pub fn matches_width(&self, width: usize) -> bool {
        self.data.len() == self.range.len() * width
    }
}
