//! Track file dialects.
//!
//! Each dialect is a [`TrackHandler`]: it receives start, end, text and
//! document-end events from the tokenizer and mutates a [`ParseContext`].
//! The dialects differ only in their trackpoint path, their
//! [`FieldRule`] table, how tag names become field names, and whether the
//! augmentation pass runs unit conversions.
//!
//! - [`gpx`]: generic track exchange format, trackpoints at `gpx|trk|trkseg|trkpt`
//! - [`tcx`]: vendor activity log, trackpoints at
//!   `TrainingCenterDatabase|Activities|Activity|Lap|Track|Trackpoint`

pub mod gpx;
pub mod tcx;

pub use gpx::GpxHandler;
pub use tcx::TcxHandler;

use crate::augment;
use crate::context::{ParseContext, PATH_SEPARATOR};
use crate::error::{Error, Result};
use serde::Serialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Decision for a tag closed strictly inside a trackpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    /// Structural wrapper or unwanted leaf; no field is written.
    Drop,
    /// Write the text under this canonical field name.
    RenameTo(&'static str),
    /// Write the text under the tag's own (dialect-normalized) name.
    KeepAsIs,
}

/// Attribute name/value pairs of a start tag, in document order.
pub type Attributes = [(String, String)];

/// Event contract implemented once per dialect.
pub trait TrackHandler {
    /// Pipe-joined tag path of a trackpoint's root element.
    fn trackpoint_path(&self) -> &'static str;

    /// Filter/rename rule for a tag closed inside a trackpoint.
    fn field_rule(&self, tag: &str) -> FieldRule;

    /// Field name used for a [`FieldRule::KeepAsIs`] tag.
    fn field_name(&self, tag: &str) -> String;

    /// Whether augmentation runs the distance, altitude and cadence conversions.
    fn unit_conversions(&self) -> bool {
        false
    }

    /// Called right after a trackpoint has been opened by `tag`'s start event.
    fn on_trackpoint_start(&self, _ctx: &mut ParseContext, _attrs: &Attributes) {}

    /// True if `path` lies strictly inside a trackpoint subtree.
    fn is_inside_trackpoint(&self, path: &str) -> bool {
        let root = self.trackpoint_path();
        path.len() > root.len()
            && path.starts_with(root)
            && path[root.len()..].starts_with(PATH_SEPARATOR)
    }

    /// Start tag.
    fn on_start(&self, ctx: &mut ParseContext, tag: &str, attrs: &Attributes) {
        ctx.hierarchy.push(tag);
        ctx.text.reset();

        if ctx.hierarchy.current_path() == self.trackpoint_path() {
            ctx.open_trackpoint();
            self.on_trackpoint_start(ctx, attrs);
        }
    }

    /// End tag.
    fn on_end(&self, ctx: &mut ParseContext, tag: &str) {
        let path = ctx.hierarchy.current_path();

        if self.is_inside_trackpoint(&path) {
            let key = match self.field_rule(tag) {
                FieldRule::Drop => None,
                FieldRule::RenameTo(name) => Some(name.to_string()),
                FieldRule::KeepAsIs => Some(self.field_name(tag)),
            };
            if let Some(key) = key {
                let value = ctx.text.as_str().to_string();
                if let Some(t) = ctx.current_trackpoint() {
                    t.set(key, value);
                }
            }
        }

        ctx.hierarchy.pop();
        ctx.text.reset();
    }

    /// Character data.
    fn on_text(&self, ctx: &mut ParseContext, text: &str) {
        ctx.text.append(text);
    }

    /// End of document; runs augmentation once when enabled.
    fn on_document_end(&self, ctx: &mut ParseContext) {
        ctx.mark_end_reached();
        if ctx.augment_enabled() {
            augment::augment(ctx, self.unit_conversions());
        }
    }
}

/// Supported input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// Generic track exchange format (`.gpx`)
    Gpx,
    /// Vendor activity log format (`.tcx`)
    Tcx,
}

static GPX_HANDLER: GpxHandler = GpxHandler;
static TCX_HANDLER: TcxHandler = TcxHandler;

impl Dialect {
    /// Event handler for this dialect.
    pub fn handler(self) -> &'static dyn TrackHandler {
        match self {
            Dialect::Gpx => &GPX_HANDLER,
            Dialect::Tcx => &TCX_HANDLER,
        }
    }

    /// Infer the dialect from a file extension.
    pub fn from_extension(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| Error::UnknownDialect(path.display().to_string()))?;
        ext.parse()
    }

    /// Lowercase name of the dialect.
    pub fn as_str(self) -> &'static str {
        match self {
            Dialect::Gpx => "gpx",
            Dialect::Tcx => "tcx",
        }
    }
}

impl FromStr for Dialect {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "gpx" => Ok(Dialect::Gpx),
            "tcx" => Ok(Dialect::Tcx),
            _ => Err(Error::UnknownDialect(s.to_string())),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
