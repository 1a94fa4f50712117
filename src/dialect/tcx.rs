//! Vendor activity log format (TCX).
//!
//! Field names keep the case the source emits (`Time`, `AltitudeMeters`).
//! Heart rate is nested as `HeartRateBpm/Value`; the wrapper is dropped and
//! the `Value` leaf takes its name.

use super::{FieldRule, TrackHandler};

/// Tag path of a TCX trackpoint.
pub const TRACKPOINT_PATH: &str = "TrainingCenterDatabase|Activities|Activity|Lap|Track|Trackpoint";

/// TCX event handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct TcxHandler;

impl TrackHandler for TcxHandler {
    fn trackpoint_path(&self) -> &'static str {
        TRACKPOINT_PATH
    }

    fn field_rule(&self, tag: &str) -> FieldRule {
        match tag {
            "Extensions" | "Position" | "TPX" | "HeartRateBpm" => FieldRule::Drop,
            "Value" => FieldRule::RenameTo("HeartRateBpm"),
            _ => FieldRule::KeepAsIs,
        }
    }

    fn field_name(&self, tag: &str) -> String {
        tag.to_string()
    }

    fn unit_conversions(&self) -> bool {
        true
    }
}
