//! Tag path statistics for schema discovery.
//!
//! Counts every distinct tag path, and every `path@attribute` pair, in a
//! document. Useful for finding the trackpoint path and leaf names of a new
//! export. The trackpoint parser does not use this module.

use crate::context::Hierarchy;
use crate::error::{Error, Result};
use crate::parser::decode;
use quick_xml::encoding::Decoder;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::BTreeMap;
use std::io::BufRead;

/// Occurrence counts keyed by tag path, sorted by key.
#[derive(Debug, Clone, Default)]
pub struct PathCounter {
    counts: BTreeMap<String, u64>,
}

impl PathCounter {
    /// Create an empty counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stream `reader` once and count its paths.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut counter = Self::new();
        let mut hierarchy = Hierarchy::new();
        let mut xml = Reader::from_reader(reader);
        let mut buf = Vec::new();

        loop {
            match xml
                .read_event_into(&mut buf)
                .map_err(|e| Error::xml(xml.buffer_position(), e))?
            {
                Event::Start(e) => {
                    counter.open(&mut hierarchy, &e, xml.decoder(), xml.buffer_position())?
                },
                Event::Empty(e) => {
                    counter.open(&mut hierarchy, &e, xml.decoder(), xml.buffer_position())?;
                    hierarchy.pop();
                },
                Event::End(_) => {
                    hierarchy.pop();
                },
                Event::Eof => break,
                _ => {},
            }
            buf.clear();
        }

        if hierarchy.depth() > 0 {
            return Err(Error::UnexpectedEof {
                depth: hierarchy.depth(),
                open: hierarchy.current_path(),
            });
        }
        Ok(counter)
    }

    fn open(
        &mut self,
        hierarchy: &mut Hierarchy,
        e: &BytesStart<'_>,
        decoder: Decoder,
        position: usize,
    ) -> Result<()> {
        hierarchy.push(decode(decoder, e.name().as_ref(), position)?);
        let path = hierarchy.current_path();
        for attr in e.attributes() {
            let attr = attr?;
            let key = format!("{}@{}", path, decode(decoder, attr.key.as_ref(), position)?);
            *self.counts.entry(key).or_insert(0) += 1;
        }
        *self.counts.entry(path).or_insert(0) += 1;
        Ok(())
    }

    /// Count for a path or `path@attribute` key.
    pub fn get(&self, key: &str) -> u64 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// True if nothing was counted.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Counts in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Pretty JSON object with sorted keys.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.counts)?)
    }
}
