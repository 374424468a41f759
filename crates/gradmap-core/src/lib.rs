pub mod cluster;
pub mod config;
pub mod consts;
pub mod error;
pub mod execute;
pub mod grid;
pub mod io;
pub mod partition;
pub mod sobel;
