//! Print the trackpoints of a GPX or TCX file.
//!
//! Usage:
//!   cargo run --bin trackpoints -- data/activity.tcx
//!   cargo run --bin trackpoints -- data/ride.xml --dialect gpx --json

use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use trackpoint_oxide::{parse_file, Dialect, ParseOptions};

#[derive(Parser)]
#[command(name = "trackpoints")]
#[command(about = "Parse a GPX or TCX file and print one trackpoint per line")]
struct Args {
    /// Path to the activity file
    file: PathBuf,

    /// Input format (gpx or tcx); inferred from the extension by default
    #[arg(long)]
    dialect: Option<String>,

    /// Skip the seq/elapsed time/unit conversion pass
    #[arg(long)]
    no_augment: bool,

    /// Print each trackpoint as a JSON object
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let mut options = ParseOptions::new().with_augment(!args.no_augment);
    if let Some(name) = &args.dialect {
        options = options.with_dialect(name.parse::<Dialect>()?);
    }

    let ctx = parse_file(&args.file, &options)?;
    eprintln!("{} trackpoints parsed", ctx.trackpoint_count());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for t in ctx.trackpoints() {
        if args.json {
            writeln!(out, "{}", serde_json::to_string(t)?)?;
        } else {
            writeln!(out, "{}", t)?;
        }
    }
    Ok(())
}
