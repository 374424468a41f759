use crate::consts::{SOBEL_X, SOBEL_Y};
use crate::grid::{PixelGrid, RowRange};

/// Raw Sobel gradient `(gx, gy)` at `(row, col)`.
///
/// Taps that fall outside the image contribute zero (zero padding).
pub fn gradient_at(grid: &PixelGrid, row: usize, col: usize) -> (i32, i32) {
    let (h, w) = (grid.height(), grid.width());
    let mut gx = 0i32;
    let mut gy = 0i32;

    for ki in 0..3 {
        let Some(r) = (row + ki).checked_sub(1).filter(|&r| r < h) else {
            continue;
        };
        for kj in 0..3 {
            let Some(c) = (col + kj).checked_sub(1).filter(|&c| c < w) else {
                continue;
            };
            let pixel = grid.get(r, c) as i32;
            gx += pixel * SOBEL_X[ki][kj];
            gy += pixel * SOBEL_Y[ki][kj];
        }
    }

    (gx, gy)
}

/// Sobel gradient magnitude at `(row, col)`, rounded and clamped to `0..=255`.
///
/// Kernels:
///   Gx = [[-1, 0, 1], [-2, 0, 2], [-1, 0, 1]]
///   Gy = [[-1, -2, -1], [0, 0, 0], [1, 2, 1]]
pub fn compute_magnitude(grid: &PixelGrid, row: usize, col: usize) -> u8 {
    let (gx, gy) = gradient_at(grid, row, col);
    magnitude(gx, gy)
}

/// `clamp(round(sqrt(gx^2 + gy^2)), 0, 255)`.
pub fn magnitude(gx: i32, gy: i32) -> u8 {
    let (gx, gy) = (gx as f64, gy as f64);
    (gx * gx + gy * gy).sqrt().round().clamp(0.0, 255.0) as u8
}

/// Compute the magnitude for every pixel of `range`, row-major.
pub fn sobel_rows(grid: &PixelGrid, range: RowRange) -> Vec<u8> {
    let w = grid.width();
    let mut out = Vec::with_capacity(range.len() * w);
    for row in range.rows() {
        out.extend((0..w).map(|col| compute_magnitude(grid, row, col)));
    }
    out
}
