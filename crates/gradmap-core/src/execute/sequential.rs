use crate::error::Result;
use crate::grid::{PixelGrid, RowRange};
use crate::sobel::sobel_rows;

use super::EdgeExecutor;

/// Single-threaded reference executor.
pub struct SequentialExecutor;

impl EdgeExecutor for SequentialExecutor {
    fn name(&self) -> &str {
        "Sequential"
    }

    fn workers(&self) -> usize {
        1
    }

    fn run(&self, input: &PixelGrid) -> Result<PixelGrid> {
        sobel_reference(input)
    }
}

/// Apply the Sobel operator to every pixel on the calling thread.
pub fn sobel_reference(input: &PixelGrid) -> Result<PixelGrid> {
    let all = RowRange::new(0, input.height());
    let data = sobel_rows(input, all);
    PixelGrid::from_raw(input.width(), input.height(), data)
}
