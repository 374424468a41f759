mod common;

use gradmap_core::io::image_io::{load_image, save_image, save_png};
use gradmap_core::io::pgm::PgmReader;

use common::make_noise_grid;

#[test]
fn test_png_roundtrip() {
    let grid = make_noise_grid(9, 5, 8);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("edges.png");

    save_png(&grid, &path).unwrap();
    let loaded = load_image(&path).unwrap();
    assert_eq!(loaded, grid);
}

#[test]
fn test_tiff_roundtrip_by_extension() {
    let grid = make_noise_grid(6, 7, 21);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("edges.tif");

    save_image(&grid, &path).unwrap();
    assert_eq!(load_image(&path).unwrap(), grid);
}

#[test]
fn test_unknown_extension_defaults_to_pgm() {
    let grid = make_noise_grid(4, 4, 1);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("edges.out");

    save_image(&grid, &path).unwrap();
    let reader = PgmReader::open(&path).unwrap();
    assert_eq!(reader.pixels(), grid.as_slice());
    assert_eq!(load_image(&path).unwrap(), grid);
}
