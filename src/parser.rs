//! Single-pass streaming parser.
//!
//! The quick-xml pull reader drives the dialect's [`TrackHandler`] one event
//! at a time. Memory grows with the trackpoints produced, not with the size
//! of the document.

use crate::config::ParseOptions;
use crate::context::ParseContext;
use crate::dialect::{Dialect, TrackHandler};
use crate::error::{Error, Result};
use quick_xml::encoding::Decoder;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Parse a track document from a buffered reader.
///
/// Returns the completed context. Malformed XML, a truncated document or a
/// document with no root element is an error and no trackpoints are returned.
pub fn parse_reader<R: BufRead>(reader: R, dialect: Dialect, augment: bool) -> Result<ParseContext> {
    let handler: &dyn TrackHandler = dialect.handler();
    let mut ctx = ParseContext::new(dialect, augment);
    let mut xml = Reader::from_reader(reader);
    xml.check_end_names(true);

    log::debug!("parsing {} document (augment: {})", dialect, augment);

    let mut buf = Vec::new();
    let mut seen_root = false;

    loop {
        let event = xml
            .read_event_into(&mut buf)
            .map_err(|e| Error::xml(xml.buffer_position(), e))?;

        match event {
            Event::Start(e) => {
                let (tag, attrs) = decode_start(&e, xml.decoder(), xml.buffer_position())?;
                handler.on_start(&mut ctx, &tag, &attrs);
                seen_root = true;
            },
            Event::Empty(e) => {
                let (tag, attrs) = decode_start(&e, xml.decoder(), xml.buffer_position())?;
                handler.on_start(&mut ctx, &tag, &attrs);
                handler.on_end(&mut ctx, &tag);
                seen_root = true;
            },
            Event::End(e) => {
                let tag = decode(xml.decoder(), e.name().as_ref(), xml.buffer_position())?;
                handler.on_end(&mut ctx, &tag);
            },
            Event::Text(e) => {
                let text = e
                    .unescape()
                    .map_err(|err| Error::xml(xml.buffer_position(), err))?;
                handler.on_text(&mut ctx, &text);
            },
            Event::CData(e) => {
                let text = decode(xml.decoder(), &e, xml.buffer_position())?;
                handler.on_text(&mut ctx, &text);
            },
            Event::Eof => break,
            _ => {},
        }
        buf.clear();
    }

    if ctx.current_depth() > 0 {
        return Err(Error::UnexpectedEof {
            depth: ctx.current_depth(),
            open: ctx.current_path(),
        });
    }
    if !seen_root {
        return Err(Error::EmptyDocument);
    }

    handler.on_document_end(&mut ctx);
    log::debug!("parsed {} trackpoints", ctx.trackpoint_count());
    Ok(ctx)
}

/// Strictly decode raw name or CDATA bytes; invalid input fails the parse.
pub(crate) fn decode(decoder: Decoder, bytes: &[u8], position: usize) -> Result<String> {
    decoder
        .decode(bytes)
        .map(Cow::into_owned)
        .map_err(|err| Error::xml(position, err))
}

/// Tag name and decoded attributes of a start tag.
fn decode_start(
    e: &BytesStart<'_>,
    decoder: Decoder,
    position: usize,
) -> Result<(String, Vec<(String, String)>)> {
    let tag = decode(decoder, e.name().as_ref(), position)?;
    let mut attrs = Vec::new();
    for attr in e.attributes() {
        let attr = attr?;
        let key = decode(decoder, attr.key.as_ref(), position)?;
        let value: Cow<'_, str> = attr
            .unescape_value()
            .map_err(|err| Error::xml(position, err))?;
        attrs.push((key, value.into_owned()));
    }
    Ok((tag, attrs))
}

/// Parse an in-memory document.
pub fn parse_str(xml: &str, dialect: Dialect, augment: bool) -> Result<ParseContext> {
    parse_reader(xml.as_bytes(), dialect, augment)
}

/// Open and parse a track file.
///
/// The dialect comes from `options` or, failing that, the file extension.
pub fn parse_file(path: impl AsRef<Path>, options: &ParseOptions) -> Result<ParseContext> {
    let path = path.as_ref();
    let dialect = options.resolve_dialect(path)?;
    log::debug!("opening {}", path.display());
    let file = File::open(path)?;
    parse_reader(BufReader::new(file), dialect, options.augment)
}

#[cfg(test)]
mod tests {
    use super::*;

    const GPX: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx creator="test" version="1.1">
  <trk>
    <name>Morning Run</name>
    <trkseg>
      <trkpt lat="44.97" lon="-93.26"><time>2014-10-05T13:07:53.000Z</time></trkpt>
      <trkpt lat="44.98" lon="-93.27"/>
    </trkseg>
  </trk>
</gpx>"#;

    #[test]
    fn test_parse_str_counts_trackpoints() {
        let ctx = parse_str(GPX, Dialect::Gpx, false).unwrap();
        assert_eq!(ctx.trackpoint_count(), 2);
        assert!(ctx.is_end_reached());
        assert!(!ctx.is_augmented());
        assert_eq!(ctx.current_depth(), 0);
    }

    #[test]
    fn test_self_closing_trackpoint() {
        let ctx = parse_str(GPX, Dialect::Gpx, false).unwrap();
        let t = &ctx.trackpoints()[1];
        assert_eq!(t.get("latitudedegrees"), Some("44.98"));
        assert_eq!(t.len(), 2);
    }

    #[test]
    fn test_name_outside_trackpoint_ignored() {
        let ctx = parse_str(GPX, Dialect::Gpx, false).unwrap();
        assert!(ctx.trackpoints().iter().all(|t| !t.contains("name")));
    }

    #[test]
    fn test_escaped_text_and_cdata() {
        let xml = "<gpx><trk><trkseg><trkpt><desc>a &amp; b</desc><cmt><![CDATA[<x>]]></cmt></trkpt></trkseg></trk></gpx>";
        let ctx = parse_str(xml, Dialect::Gpx, false).unwrap();
        let t = &ctx.trackpoints()[0];
        assert_eq!(t.get("desc"), Some("a & b"));
        assert_eq!(t.get("cmt"), Some("<x>"));
    }

    #[test]
    fn test_truncated_document() {
        let xml = "<gpx><trk><trkseg><trkpt lat=\"1\" lon=\"2\"><time>2014";
        let err = parse_str(xml, Dialect::Gpx, true).unwrap_err();
        assert!(
            matches!(err, Error::UnexpectedEof { .. } | Error::Xml { .. }),
            "{err}"
        );
    }

    #[test]
    fn test_mismatched_end_tag() {
        let xml = "<gpx><trk></trkseg></gpx>";
        let err = parse_str(xml, Dialect::Gpx, false).unwrap_err();
        assert!(matches!(err, Error::Xml { .. }), "{err}");
    }

    #[test]
    fn test_invalid_utf8_tag_name() {
        let xml: &[u8] = b"<gpx><trk><trkseg><trkpt><ti\xFFme>x</ti\xFFme></trkpt></trkseg></trk></gpx>";
        let err = parse_reader(xml, Dialect::Gpx, false).unwrap_err();
        assert!(matches!(err, Error::Xml { .. }), "{err}");
    }

    #[test]
    fn test_invalid_utf8_attribute_name() {
        let xml: &[u8] = b"<gpx><trk><trkseg><trkpt l\xFFt=\"1\"/></trkseg></trk></gpx>";
        let err = parse_reader(xml, Dialect::Gpx, false).unwrap_err();
        assert!(matches!(err, Error::Xml { .. }), "{err}");
    }

    #[test]
    fn test_empty_document() {
        let err = parse_str("<?xml version=\"1.0\"?>\n", Dialect::Tcx, false).unwrap_err();
        assert!(matches!(err, Error::EmptyDocument));
    }

    #[test]
    fn test_wrong_dialect_yields_no_trackpoints() {
        let ctx = parse_str(GPX, Dialect::Tcx, true).unwrap();
        assert_eq!(ctx.trackpoint_count(), 0);
        assert!(ctx.is_augmented());
    }
}
