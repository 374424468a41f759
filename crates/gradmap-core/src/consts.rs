/// Horizontal Sobel kernel, indexed `[row offset + 1][col offset + 1]`.
pub const SOBEL_X: [[i32; 3]; 3] = [[-1, 0, 1], [-2, 0, 2], [-1, 0, 1]];

/// Vertical Sobel kernel, indexed `[row offset + 1][col offset + 1]`.
pub const SOBEL_Y: [[i32; 3]; 3] = [[-1, -2, -1], [0, 0, 0], [1, 2, 1]];

/// Default worker count for both parallel executors.
pub const DEFAULT_WORKER_COUNT: usize = 16;

/// Rank that owns the input and assembles the output in the distributed model.
pub const ROOT_RANK: usize = 0;

/// Magic token at the start of a binary PGM file.
pub const PGM_MAGIC: &[u8; 2] = b"P5";

/// The only PGM max value accepted: samples are direct 8-bit intensities.
pub const PGM_MAX_VALUE: u32 = 255;

/// Default input path when none is given.
pub const DEFAULT_INPUT_PATH: &str = "input.pgm";

/// Default output path when none is given.
pub const DEFAULT_OUTPUT_PATH: &str = "output.pgm";
