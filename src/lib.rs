//! # Trackpoint Oxide
//!
//! Streaming parser for GPS activity files. Reads GPX (generic track
//! exchange) and TCX (vendor activity log) documents in one forward pass and
//! produces an ordered list of [`Trackpoint`] records, each an ordered map of
//! field names to string values.
//!
//! ## Pipeline
//!
//! 1. quick-xml pull reader emits start, end and text events
//! 2. the dialect's [`TrackHandler`] tracks the open-tag path, opens a
//!    trackpoint when the path equals the dialect's trackpoint path, and
//!    applies its filter/rename table to tags closed inside a trackpoint
//! 3. at the document end, the optional [`augment`] pass adds `seq`,
//!    `elapsedtime` and (TCX only) unit conversions
//!
//! ## Quick Start
//!
//! ```no_run
//! use trackpoint_oxide::{parse_file, ParseOptions};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let options = ParseOptions::new().with_augment(true);
//! let ctx = parse_file("data/activity.tcx", &options)?;
//! println!("{} trackpoints", ctx.trackpoint_count());
//! for t in ctx.trackpoints() {
//!     println!("{}", t);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

// Error handling
pub mod error;

// Configuration
pub mod config;

// Records and per-parse state
pub mod context;
pub mod trackpoint;

// Format dispatch
pub mod dialect;

// Derived fields
pub mod augment;
pub mod units;

// Entry points
pub mod parser;

// Schema discovery
pub mod paths;

// Re-exports
pub use config::ParseOptions;
pub use context::ParseContext;
pub use dialect::{Dialect, FieldRule, TrackHandler};
pub use error::{Error, Result};
pub use parser::{parse_file, parse_reader, parse_str};
pub use paths::PathCounter;
pub use trackpoint::Trackpoint;

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(VERSION.starts_with("0."));
    }

    #[test]
    fn test_name() {
        assert_eq!(NAME, "trackpoint_oxide");
    }
}
