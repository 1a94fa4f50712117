//! Post-parse augmentation.
//!
//! After the document end, every trackpoint gets a 1-based `seq` and an
//! `elapsedtime`. Activity-log trackpoints also get `altitudefeet`,
//! `distancemiles`, `distancekilometers` and `runcadencex2` when their
//! source fields are present and numeric.
//!
//! `elapsedtime` is `00:00:00` for every trackpoint whose time-of-day equals
//! the first trackpoint's, and the trackpoint's own time-of-day otherwise.
//! It is not a difference between the two times.
//!
//! The pass is meant to run once per parse. Running it again rewrites `seq`
//! with the same values; derived fields are only as stable as their sources.

use crate::context::ParseContext;
use crate::trackpoint::Trackpoint;
use crate::units::{format_float, Distance, ElapsedTime};

/// Value written to `elapsedtime` for trackpoints at the baseline time.
pub const ELAPSED_ZERO: &str = "00:00:00";

/// Length of a timestamp shaped `YYYY-MM-DDTHH:MM:SS.mmmZ`.
const TIMESTAMP_LEN: usize = 24;

/// Extract the time-of-day from a `YYYY-MM-DDTHH:MM:SS.mmmZ` timestamp.
///
/// Any other length, or a missing `T`, yields an empty string.
///
/// ```
/// use trackpoint_oxide::augment::time_of_day;
///
/// assert_eq!(time_of_day("2014-10-05T17:22:17.000Z"), "17:22:17");
/// assert_eq!(time_of_day("2014-10-05T17:22:17Z"), "");
/// ```
pub fn time_of_day(time: &str) -> String {
    if time.chars().count() != TIMESTAMP_LEN {
        return String::new();
    }
    match time.split('T').nth(1) {
        Some(clock) => {
            let head: String = clock.chars().take(9).collect();
            head.strip_suffix('.').unwrap_or(&head).to_string()
        },
        None => String::new(),
    }
}

/// Run the augmentation pass over every trackpoint in document order.
pub fn augment(ctx: &mut ParseContext, unit_conversions: bool) {
    if let Some(first) = ctx.trackpoints.first() {
        let baseline = time_of_day(first.get("time").unwrap_or_default());
        ctx.first_elapsed = Some(ElapsedTime::from_hhmmss(&baseline));
        ctx.first_time = Some(baseline);
    }
    let baseline = ctx.first_time.clone().unwrap_or_default();

    for (idx, t) in ctx.trackpoints.iter_mut().enumerate() {
        t.set("seq", (idx + 1).to_string());
        if unit_conversions {
            meters_to_feet(t, "altitudemeters", "altitudefeet");
            meters_to_miles(t, "distancemeters", "distancemiles");
            meters_to_km(t, "distancemeters", "distancekilometers");
            cadence_x2(t);
        }
        calculate_elapsed_time(t, &baseline);
    }

    log::debug!("augmented {} trackpoints", ctx.trackpoints.len());
    ctx.mark_augmented();
}

fn numeric_field(t: &Trackpoint, key: &str) -> Option<f64> {
    let raw = t.get(key)?;
    match raw.trim().parse::<f64>() {
        Ok(v) => Some(v),
        Err(_) => {
            log::trace!("skipping non-numeric {}: {:?}", key, raw);
            None
        },
    }
}

/// Altitude in feet via yards: meters -> km -> yards, times 3.
pub fn meters_to_feet(t: &mut Trackpoint, meters_key: &str, new_key: &str) {
    if let Some(m) = numeric_field(t, meters_key) {
        let yards = Distance::kilometers(m / 1000.0).as_yards();
        t.set(new_key, format_float(yards * 3.0));
    }
}

/// Meters as kilometers.
pub fn meters_to_km(t: &mut Trackpoint, meters_key: &str, new_key: &str) {
    if let Some(m) = numeric_field(t, meters_key) {
        t.set(new_key, format_float(m / 1000.0));
    }
}

/// Meters as statute miles.
pub fn meters_to_miles(t: &mut Trackpoint, meters_key: &str, new_key: &str) {
    if let Some(m) = numeric_field(t, meters_key) {
        let miles = Distance::kilometers(m / 1000.0).as_miles();
        t.set(new_key, format_float(miles));
    }
}

/// Double the single-leg `runcadence` into `runcadencex2`.
pub fn cadence_x2(t: &mut Trackpoint) {
    let cadence = match t.get("runcadence").map(|raw| raw.trim().parse::<i128>()) {
        Some(Ok(c)) => c,
        Some(Err(_)) => {
            log::trace!("skipping non-integer runcadence");
            return;
        },
        None => return,
    };
    match cadence.checked_mul(2) {
        Some(doubled) => t.set("runcadencex2", doubled.to_string()),
        None => log::trace!("skipping out-of-range runcadence {}", cadence),
    }
}

/// Set `elapsedtime` relative to the baseline time-of-day.
pub fn calculate_elapsed_time(t: &mut Trackpoint, baseline: &str) {
    let tod = time_of_day(t.get("time").unwrap_or_default());
    if tod == baseline {
        t.set("elapsedtime", ELAPSED_ZERO);
    } else {
        t.set("elapsedtime", tod);
    }
}
