//! Generic track exchange format (GPX).
//!
//! Latitude and longitude arrive as attributes on `trkpt`; everything else is
//! a nested leaf. Field names are lower-cased.

use super::{Attributes, FieldRule, TrackHandler};
use crate::context::ParseContext;

/// Tag path of a GPX trackpoint.
pub const TRACKPOINT_PATH: &str = "gpx|trk|trkseg|trkpt";

/// Garmin track point extension wrapper.
pub const TRACKPOINT_EXTENSION_TAG: &str = "gpxtpx:TrackPointExtension";

/// Garmin heart rate leaf.
pub const HEART_RATE_TAG: &str = "gpxtpx:hr";

/// GPX event handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct GpxHandler;

impl TrackHandler for GpxHandler {
    fn trackpoint_path(&self) -> &'static str {
        TRACKPOINT_PATH
    }

    fn field_rule(&self, tag: &str) -> FieldRule {
        match tag {
            "ele" | "extensions" | TRACKPOINT_EXTENSION_TAG => FieldRule::Drop,
            HEART_RATE_TAG => FieldRule::RenameTo("heartratebpm"),
            _ => FieldRule::KeepAsIs,
        }
    }

    fn field_name(&self, tag: &str) -> String {
        tag.to_lowercase()
    }

    fn on_trackpoint_start(&self, ctx: &mut ParseContext, attrs: &Attributes) {
        let Some(t) = ctx.current_trackpoint() else {
            return;
        };
        for (attr, field) in [("lat", "latitudedegrees"), ("lon", "longitudedegrees")] {
            if let Some((_, value)) = attrs.iter().find(|(name, v)| name == attr && !v.is_empty()) {
                t.set(field, value.as_str());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::Dialect;

    fn attrs(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn open_trackpoint(ctx: &mut ParseContext, a: &Attributes) {
        let h = GpxHandler;
        for tag in ["gpx", "trk", "trkseg"] {
            h.on_start(ctx, tag, &[]);
        }
        h.on_start(ctx, "trkpt", a);
    }

    #[test]
    fn test_field_rules() {
        let h = GpxHandler;
        assert_eq!(h.field_rule("ele"), FieldRule::Drop);
        assert_eq!(h.field_rule("extensions"), FieldRule::Drop);
        assert_eq!(h.field_rule("gpxtpx:TrackPointExtension"), FieldRule::Drop);
        assert_eq!(h.field_rule("gpxtpx:hr"), FieldRule::RenameTo("heartratebpm"));
        assert_eq!(h.field_rule("time"), FieldRule::KeepAsIs);
        assert_eq!(h.field_rule("gpxtpx:cad"), FieldRule::KeepAsIs);
    }

    #[test]
    fn test_field_name_lowercased() {
        assert_eq!(GpxHandler.field_name("Time"), "time");
        assert_eq!(GpxHandler.field_name("gpxtpx:atemp"), "gpxtpx:atemp");
    }

    #[test]
    fn test_lat_lon_attributes() {
        let mut ctx = ParseContext::new(Dialect::Gpx, false);
        open_trackpoint(&mut ctx, &attrs(&[("lat", "44.9759"), ("lon", "-93.2654")]));

        let t = &ctx.trackpoints()[0];
        assert_eq!(t.get("latitudedegrees"), Some("44.9759"));
        assert_eq!(t.get("longitudedegrees"), Some("-93.2654"));
    }

    #[test]
    fn test_missing_attributes_not_set() {
        let mut ctx = ParseContext::new(Dialect::Gpx, false);
        open_trackpoint(&mut ctx, &attrs(&[("lat", "44.9759")]));

        let t = &ctx.trackpoints()[0];
        assert_eq!(t.get("latitudedegrees"), Some("44.9759"));
        assert!(!t.contains("longitudedegrees"));
    }

    #[test]
    fn test_nested_fields() {
        let h = GpxHandler;
        let mut ctx = ParseContext::new(Dialect::Gpx, false);
        open_trackpoint(&mut ctx, &[]);

        h.on_start(&mut ctx, "ele", &[]);
        h.on_text(&mut ctx, "253.0");
        h.on_end(&mut ctx, "ele");

        h.on_start(&mut ctx, "time", &[]);
        h.on_text(&mut ctx, "2014-10-05T13:07:53.000Z");
        h.on_end(&mut ctx, "time");

        h.on_start(&mut ctx, "extensions", &[]);
        h.on_start(&mut ctx, "gpxtpx:TrackPointExtension", &[]);
        h.on_start(&mut ctx, "gpxtpx:hr", &[]);
        h.on_text(&mut ctx, "85");
        h.on_end(&mut ctx, "gpxtpx:hr");
        h.on_end(&mut ctx, "gpxtpx:TrackPointExtension");
        h.on_end(&mut ctx, "extensions");
        h.on_end(&mut ctx, "trkpt");

        let t = &ctx.trackpoints()[0];
        assert!(!t.contains("ele"));
        assert!(!t.contains("extensions"));
        assert_eq!(t.get("time"), Some("2014-10-05T13:07:53.000Z"));
        assert_eq!(t.get("heartratebpm"), Some("85"));
        assert_eq!(t.len(), 2);
        assert_eq!(ctx.current_path(), "gpx|trk|trkseg");
    }
}
