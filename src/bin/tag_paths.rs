//! Dump tag path frequencies of an XML document as JSON.
//!
//! Usage:
//!   cargo run --bin tag_paths -- data/activity.tcx > paths.json

use clap::Parser;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use trackpoint_oxide::PathCounter;

#[derive(Parser)]
#[command(name = "tag_paths")]
#[command(about = "Count each tag path and path@attribute in an XML document")]
struct Args {
    /// Path to the XML file
    file: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let file = File::open(&args.file)?;
    let counter = PathCounter::from_reader(BufReader::new(file))?;
    log::debug!("{} distinct paths in {}", counter.len(), args.file.display());
    println!("{}", counter.to_json()?);
    Ok(())
}
