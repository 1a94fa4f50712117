//! Configuration for parsing track files.

use crate::dialect::Dialect;
use crate::error::Result;
use std::path::Path;

/// Parse configuration.
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// Run the augmentation pass after the document end.
    pub augment: bool,

    /// Input dialect. `None` infers it from the file extension.
    pub dialect: Option<Dialect>,
}

impl ParseOptions {
    /// Create new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable augmentation.
    pub fn with_augment(mut self, enable: bool) -> Self {
        self.augment = enable;
        self
    }

    /// Force a dialect instead of inferring it.
    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = Some(dialect);
        self
    }

    /// Dialect to use for `path`.
    pub fn resolve_dialect(&self, path: impl AsRef<Path>) -> Result<Dialect> {
        match self.dialect {
            Some(d) => Ok(d),
            None => Dialect::from_extension(path),
        }
    }
}
