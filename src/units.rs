//! Distance units and elapsed time values used by the augmentation pass.

use chrono::{NaiveTime, Timelike};
use std::fmt;

/// Kilometers in one mile.
pub const KILOMETERS_PER_MILE: f64 = 1.609344;

/// Yards in one mile.
pub const YARDS_PER_MILE: f64 = 1760.0;

/// Unit of measure for a [`Distance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistanceUnit {
    /// Statute miles
    Miles,
    /// Kilometers
    Kilometers,
    /// Yards
    Yards,
}

/// A distance in a given unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Distance {
    value: f64,
    unit: DistanceUnit,
}

impl Distance {
    /// Create a distance.
    pub fn new(value: f64, unit: DistanceUnit) -> Self {
        Self { value, unit }
    }

    /// Distance of `km` kilometers.
    pub fn kilometers(km: f64) -> Self {
        Self::new(km, DistanceUnit::Kilometers)
    }

    /// Value in miles.
    pub fn as_miles(&self) -> f64 {
        match self.unit {
            DistanceUnit::Miles => self.value,
            DistanceUnit::Kilometers => self.value / KILOMETERS_PER_MILE,
            DistanceUnit::Yards => self.value / YARDS_PER_MILE,
        }
    }

    /// Value in yards.
    pub fn as_yards(&self) -> f64 {
        match self.unit {
            DistanceUnit::Yards => self.value,
            _ => self.as_miles() * YARDS_PER_MILE,
        }
    }
}

/// A clock-style duration parsed from an `HH:MM:SS` string.
///
/// Unparseable input, including the empty string, yields a zero duration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct ElapsedTime {
    secs: u32,
}

impl ElapsedTime {
    /// Build from `HH:MM:SS`.
    pub fn from_hhmmss(s: &str) -> Self {
        let secs = NaiveTime::parse_from_str(s.trim(), "%H:%M:%S")
            .map(|t| t.num_seconds_from_midnight())
            .unwrap_or(0);
        Self { secs }
    }

    /// Total seconds.
    pub fn secs(&self) -> u32 {
        self.secs
    }

    /// Hours component.
    pub fn hours(&self) -> u32 {
        self.secs / 3600
    }

    /// Minutes component.
    pub fn minutes(&self) -> u32 {
        (self.secs % 3600) / 60
    }

    /// Seconds component.
    pub fn seconds(&self) -> u32 {
        self.secs % 60
    }
}

impl fmt::Display for ElapsedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hours(), self.minutes(), self.seconds())
    }
}

/// Format a float the way activity exports expect: shortest round-trip
/// digits, a trailing `.0` on integral values, and scientific notation with
/// a signed, two-digit exponent below `1e-4` or from `1e16` up
/// (`1e+16`, `1e-05`).
pub fn format_float(value: f64) -> String {
    if !value.is_finite() {
        return format!("{}", value);
    }
    let magnitude = value.abs();
    if value != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        let sci = format!("{:e}", value);
        return match sci.split_once('e') {
            Some((mantissa, exp)) => {
                let (sign, digits) = match exp.strip_prefix('-') {
                    Some(d) => ('-', d),
                    None => ('+', exp),
                };
                format!("{}e{}{:0>2}", mantissa, sign, digits)
            },
            None => sci,
        };
    }
    if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_kilometers_to_miles() {
        let d = Distance::kilometers(KILOMETERS_PER_MILE);
        assert!(approx(d.as_miles(), 1.0));
        assert!(approx(Distance::kilometers(42.195).as_miles(), 26.218757456454306));
    }

    #[test]
    fn test_kilometers_to_yards() {
        let d = Distance::kilometers(KILOMETERS_PER_MILE);
        assert!(approx(d.as_yards(), 1760.0));
    }

    #[test]
    fn test_other_units() {
        assert!(approx(Distance::new(1760.0, DistanceUnit::Yards).as_miles(), 1.0));
        assert!(approx(Distance::new(2.0, DistanceUnit::Miles).as_yards(), 3520.0));
    }

    #[test]
    fn test_elapsed_time_parse() {
        let e = ElapsedTime::from_hhmmss("17:22:17");
        assert_eq!(e.secs(), 17 * 3600 + 22 * 60 + 17);
        assert_eq!(e.to_string(), "17:22:17");
    }

    #[test]
    fn test_elapsed_time_empty_is_zero() {
        assert_eq!(ElapsedTime::from_hhmmss(""), ElapsedTime::default());
        assert_eq!(ElapsedTime::from_hhmmss("garbage").to_string(), "00:00:00");
    }

    #[test]
    fn test_format_float() {
        assert_eq!(format_float(1.5), "1.5");
        assert_eq!(format_float(2.0), "2.0");
        assert_eq!(format_float(0.0), "0.0");
        assert_eq!(format_float(0.0625), "0.0625");
        assert_eq!(format_float(-3.0), "-3.0");
    }

    #[test]
    fn test_format_float_exponent() {
        assert_eq!(format_float(1e16), "1e+16");
        assert_eq!(format_float(1.5e16), "1.5e+16");
        assert_eq!(format_float(0.00001), "1e-05");
        assert_eq!(format_float(-2.5e-7), "-2.5e-07");
        assert_eq!(format_float(1.25e-123), "1.25e-123");
        assert_eq!(format_float(0.0001), "0.0001");
        assert_eq!(format_float(9999999999999998.0), "9999999999999998.0");
    }
}
