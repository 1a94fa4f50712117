//! Per-parse state.
//!
//! [`ParseContext`] owns the open-tag [`Hierarchy`], the pending
//! [`TextBuffer`] and the trackpoints built so far. A fresh context is made
//! for every parse call and handed back to the caller when parsing ends.

use crate::dialect::Dialect;
use crate::trackpoint::Trackpoint;
use crate::units::ElapsedTime;

/// Separator used when joining open tag names into a path.
pub const PATH_SEPARATOR: &str = "|";

/// Stack of currently open tag names.
#[derive(Debug, Clone, Default)]
pub struct Hierarchy {
    tags: Vec<String>,
}

impl Hierarchy {
    /// Create an empty hierarchy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a tag.
    pub fn push(&mut self, tag: impl Into<String>) {
        self.tags.push(tag.into());
    }

    /// Close the innermost tag.
    pub fn pop(&mut self) -> Option<String> {
        self.tags.pop()
    }

    /// Number of open tags.
    pub fn depth(&self) -> usize {
        self.tags.len()
    }

    /// Open tags joined by [`PATH_SEPARATOR`].
    pub fn current_path(&self) -> String {
        self.tags.join(PATH_SEPARATOR)
    }
}

/// Character data seen since the last start or end tag.
#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    text: String,
}

impl TextBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear the buffer.
    pub fn reset(&mut self) {
        self.text.clear();
    }

    /// Append character data.
    pub fn append(&mut self, text: &str) {
        self.text.push_str(text);
    }

    /// Accumulated text.
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

/// State of one parse invocation.
#[derive(Debug)]
pub struct ParseContext {
    dialect: Dialect,
    pub(crate) hierarchy: Hierarchy,
    pub(crate) text: TextBuffer,
    pub(crate) trackpoints: Vec<Trackpoint>,
    augment: bool,
    augmented: bool,
    end_reached: bool,
    pub(crate) first_time: Option<String>,
    pub(crate) first_elapsed: Option<ElapsedTime>,
}

impl ParseContext {
    /// Create a context for one parse of `dialect`.
    pub fn new(dialect: Dialect, augment: bool) -> Self {
        Self {
            dialect,
            hierarchy: Hierarchy::new(),
            text: TextBuffer::new(),
            trackpoints: Vec::new(),
            augment,
            augmented: false,
            end_reached: false,
            first_time: None,
            first_elapsed: None,
        }
    }

    /// Dialect this context was created for.
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Trackpoints in document order.
    pub fn trackpoints(&self) -> &[Trackpoint] {
        &self.trackpoints
    }

    /// Consume the context, keeping only the trackpoints.
    pub fn into_trackpoints(self) -> Vec<Trackpoint> {
        self.trackpoints
    }

    /// Number of trackpoints parsed.
    pub fn trackpoint_count(&self) -> usize {
        self.trackpoints.len()
    }

    /// Number of currently open tags.
    pub fn current_depth(&self) -> usize {
        self.hierarchy.depth()
    }

    /// Pipe-joined path of the currently open tags.
    pub fn current_path(&self) -> String {
        self.hierarchy.current_path()
    }

    /// True once the document end has been handled.
    pub fn is_end_reached(&self) -> bool {
        self.end_reached
    }

    /// True if augmentation was requested for this parse.
    pub fn augment_enabled(&self) -> bool {
        self.augment
    }

    /// True once the augmentation pass has run.
    pub fn is_augmented(&self) -> bool {
        self.augmented
    }

    /// Time-of-day of the first trackpoint, captured by augmentation.
    pub fn first_time(&self) -> Option<&str> {
        self.first_time.as_deref()
    }

    /// Elapsed-time anchor built from [`first_time`](Self::first_time).
    pub fn first_elapsed(&self) -> Option<&ElapsedTime> {
        self.first_elapsed.as_ref()
    }

    /// Trackpoint currently being filled, if any has been opened.
    pub(crate) fn current_trackpoint(&mut self) -> Option<&mut Trackpoint> {
        self.trackpoints.last_mut()
    }

    pub(crate) fn open_trackpoint(&mut self) -> &mut Trackpoint {
        self.trackpoints.push(Trackpoint::new());
        log::trace!("opened trackpoint {}", self.trackpoints.len());
        let idx = self.trackpoints.len() - 1;
        &mut self.trackpoints[idx]
    }

    pub(crate) fn mark_end_reached(&mut self) {
        self.end_reached = true;
    }

    pub(crate) fn mark_augmented(&mut self) {
        self.augmented = true;
    }
}
