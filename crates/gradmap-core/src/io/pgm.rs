use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use memmap2::Mmap;
use tracing::debug;

use crate::consts::{PGM_MAGIC, PGM_MAX_VALUE};
use crate::error::{GradmapError, Result};
use crate::grid::PixelGrid;

/// Parsed binary PGM (P5) header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PgmHeader {
    pub width: usize,
    pub height: usize,
    pub max_value: u32,
    /// Byte offset of the first pixel.
    pub data_offset: usize,
}

impl PgmHeader {
    /// Payload size in bytes (one byte per pixel).
    pub fn payload_size(&self) -> usize {
        self.width * self.height
    }
}

/// Memory-mapped PGM file reader.
pub struct PgmReader {
    mmap: Mmap,
    pub header: PgmHeader,
}

impl PgmReader {
    /// Open a PGM file, parse its header and check the payload length.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| GradmapError::FileOpen {
            path: path.to_path_buf(),
            source,
        })?;
        let mmap = unsafe { Mmap::map(&file)? };

        let header = parse_header(&mmap)?;
        let expected = header.payload_size();
        let actual = mmap.len() - header.data_offset;
        if actual < expected {
            return Err(GradmapError::TruncatedData { expected, actual });
        }

        debug!(
            path = %path.display(),
            width = header.width,
            height = header.height,
            "Opened PGM"
        );
        Ok(Self { mmap, header })
    }

    /// Raw pixel bytes (zero-copy from mmap).
    pub fn pixels(&self) -> &[u8] {
        let start = self.header.data_offset;
        &self.mmap[start..start + self.header.payload_size()]
    }

    /// Copy the payload into an owned grid.
    pub fn read_grid(&self) -> Result<PixelGrid> {
        let pixels = self.pixels();
        let mut buffer = Vec::new();
        buffer
            .try_reserve_exact(pixels.len())
            .map_err(|_| GradmapError::Allocation {
                bytes: pixels.len(),
            })?;
        buffer.extend_from_slice(pixels);
        PixelGrid::from_raw(self.header.width, self.header.height, buffer)
    }
}

/// Parse a P5 header: magic, width, height and max value separated by
/// whitespace or `#` comment lines, then exactly one whitespace byte.
pub fn parse_header(bytes: &[u8]) -> Result<PgmHeader> {
    if !bytes.starts_with(PGM_MAGIC) {
        return Err(GradmapError::Format("not a PGM P5 file".into()));
    }

    let mut cursor = HeaderCursor {
        bytes,
        pos: PGM_MAGIC.len(),
    };
    if !cursor.at_separator() {
        return Err(GradmapError::Format("not a PGM P5 file".into()));
    }

    let width = cursor.next_field("width")?;
    let height = cursor.next_field("height")?;
    let max_value = cursor.next_field("max value")?;

    if max_value != PGM_MAX_VALUE as usize {
        return Err(GradmapError::Format(format!(
            "max value must be {PGM_MAX_VALUE}, got {max_value}"
        )));
    }
    if width == 0 || height == 0 {
        return Err(GradmapError::InvalidDimensions { width, height });
    }
    width
        .checked_mul(height)
        .ok_or(GradmapError::InvalidDimensions { width, height })?;

    // A single whitespace byte separates the header from the raster.
    match bytes.get(cursor.pos) {
        Some(b) if b.is_ascii_whitespace() => Ok(PgmHeader {
            width,
            height,
            max_value: PGM_MAX_VALUE,
            data_offset: cursor.pos + 1,
        }),
        _ => Err(GradmapError::Format(
            "missing whitespace after max value".into(),
        )),
    }
}

struct HeaderCursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl HeaderCursor<'_> {
    fn at_separator(&self) -> bool {
        matches!(self.bytes.get(self.pos), Some(b) if b.is_ascii_whitespace() || *b == b'#')
    }

    fn skip_whitespace_and_comments(&mut self) {
        while let Some(&b) = self.bytes.get(self.pos) {
            if b.is_ascii_whitespace() {
                self.pos += 1;
            } else if b == b'#' {
                while let Some(&c) = self.bytes.get(self.pos) {
                    self.pos += 1;
                    if c == b'\n' {
                        break;
                    }
                }
            } else {
                break;
            }
        }
    }

    fn next_field(&mut self, name: &str) -> Result<usize> {
        self.skip_whitespace_and_comments();
        let start = self.pos;
        let mut value = 0usize;
        while let Some(&b) = self.bytes.get(self.pos) {
            if !b.is_ascii_digit() {
                break;
            }
            value = value
                .checked_mul(10)
                .and_then(|v| v.checked_add((b - b'0') as usize))
                .ok_or_else(|| GradmapError::Format(format!("{name} is too large")))?;
            self.pos += 1;
        }
        if self.pos == start {
            return Err(GradmapError::Format(format!("error reading {name}")));
        }
        Ok(value)
    }
}

/// Load a binary PGM file into a grid.
pub fn load_pgm(path: &Path) -> Result<PixelGrid> {
    PgmReader::open(path)?.read_grid()
}

/// Write `grid` as binary PGM to `writer`.
pub fn write_pgm<W: Write>(grid: &PixelGrid, writer: &mut W) -> Result<()> {
    write!(
        writer,
        "P5\n{} {}\n{}\n",
        grid.width(),
        grid.height(),
        PGM_MAX_VALUE
    )?;
    writer.write_all(grid.as_slice())?;
    Ok(())
}

/// Save `grid` as a binary PGM file.
pub fn save_pgm(grid: &PixelGrid, path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|source| GradmapError::FileOpen {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    write_pgm(grid, &mut writer)?;
    writer.flush()?;
    Ok(())
}
