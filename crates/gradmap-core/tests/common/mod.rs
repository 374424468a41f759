#![allow(dead_code)]

use gradmap_core::grid::PixelGrid;

/// Grid filled with a single value.
pub fn make_grid(w: usize, h: usize, fill: u8) -> PixelGrid {
    PixelGrid::from_raw(w, h, vec![fill; w * h]).expect("valid grid")
}

/// Grid from explicit row-major pixels.
pub fn grid_from(w: usize, h: usize, pixels: &[u8]) -> PixelGrid {
    PixelGrid::from_raw(w, h, pixels.to_vec()).expect("valid grid")
}

/// Deterministic pseudo-random grid (LCG), so failures are reproducible.
pub fn make_noise_grid(w: usize, h: usize, seed: u64) -> PixelGrid {
    let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
    let pixels = (0..w * h)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            (state >> 56) as u8
        })
        .collect();
    PixelGrid::from_raw(w, h, pixels).expect("valid grid")
}

/// Build the bytes of a P5 file with the given header text and payload.
pub fn build_pgm(header: &str, payload: &[u8]) -> Vec<u8> {
    let mut buf = header.as_bytes().to_vec();
    buf.extend_from_slice(payload);
    buf
}

/// Write bytes to a temporary `.pgm` file and return its handle.
///
/// The file stays alive as long as the returned `NamedTempFile` is not dropped.
pub fn write_test_pgm(data: &[u8]) -> tempfile::NamedTempFile {
    use std::io::Write;
    let mut f = tempfile::Builder::new()
        .suffix(".pgm")
        .tempfile()
        .expect("create temp file");
    f.write_all(data).expect("write PGM data");
    f.flush().expect("flush");
    f
}
