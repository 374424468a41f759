use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use gradmap_core::io::pgm::PgmReader;

#[derive(Args)]
pub struct InfoArgs {
    /// Input PGM file
    pub file: PathBuf,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let reader = PgmReader::open(&args.file)?;
    let header = &reader.header;

    println!("File:        {}", args.file.display());
    println!("Format:      PGM (P5)");
    println!("Dimensions:  {}x{}", header.width, header.height);
    println!("Max value:   {}", header.max_value);
    println!("Data offset: {} bytes", header.data_offset);

    let total_kb = header.payload_size() as f64 / 1024.0;
    println!("Data size:   {:.1} KB", total_kb);

    Ok(())
}
