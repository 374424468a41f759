use std::path::Path;

use image::{GrayImage, ImageFormat};

use crate::error::Result;
use crate::grid::PixelGrid;

use super::pgm::{load_pgm, save_pgm};

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

fn to_gray_image(grid: &PixelGrid) -> GrayImage {
    GrayImage::from_raw(
        grid.width() as u32,
        grid.height() as u32,
        grid.as_slice().to_vec(),
    )
    .expect("buffer size matches dimensions")
}

/// Save a grid as 8-bit grayscale PNG.
pub fn save_png(grid: &PixelGrid, path: &Path) -> Result<()> {
    to_gray_image(grid).save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

/// Save a grid as 8-bit grayscale TIFF.
pub fn save_tiff(grid: &PixelGrid, path: &Path) -> Result<()> {
    to_gray_image(grid).save_with_format(path, ImageFormat::Tiff)?;
    Ok(())
}

/// Save a grid, choosing the format from the file extension (PGM by default).
pub fn save_image(grid: &PixelGrid, path: &Path) -> Result<()> {
    match extension(path).as_deref() {
        Some("png") => save_png(grid, path),
        Some("tiff" | "tif") => save_tiff(grid, path),
        _ => save_pgm(grid, path),
    }
}

/// Load a grayscale image, choosing the decoder from the file extension.
///
/// `.pgm`, `.pnm` and unknown extensions go through the PGM reader; anything
/// else is decoded by `image` and converted to 8-bit luma.
pub fn load_image(path: &Path) -> Result<PixelGrid> {
    match extension(path).as_deref() {
        Some("png" | "tiff" | "tif" | "jpg" | "jpeg" | "bmp") => {
            let gray = image::open(path)?.to_luma8();
            let (w, h) = gray.dimensions();
            PixelGrid::from_raw(w as usize, h as usize, gray.into_raw())
        }
        _ => load_pgm(path),
    }
}
