//! Pure conversion from canonical imperial values to display strings.
//!
//! Values are rounded to the nearest whole number (half away from zero)
//! before formatting; no fractional degrees or speeds are ever shown.

use crate::model::DisplayUnit;

const MPH_PER_KMH: f64 = 1.60934;

/// Formats a canonical Fahrenheit temperature for the given unit.
pub fn display_temperature(value_f: f64, unit: DisplayUnit) -> String {
    match unit {
        DisplayUnit::Imperial => format!("{}\u{b0}F", round_whole(value_f)),
        DisplayUnit::Metric => format!("{}\u{b0}C", round_whole(fahrenheit_to_celsius(value_f))),
    }
}

/// Formats a canonical mph wind speed for the given unit.
pub fn display_wind_speed(value_mph: f64, unit: DisplayUnit) -> String {
    match unit {
        DisplayUnit::Imperial => format!("{} mph", round_whole(value_mph)),
        DisplayUnit::Metric => format!("{} km/h", round_whole(value_mph * MPH_PER_KMH)),
    }
}

fn fahrenheit_to_celsius(value_f: f64) -> f64 {
    (value_f - 32.0) * 5.0 / 9.0
}

// Going through i64 also normalizes -0.0, which would otherwise print as "-0".
fn round_whole(value: f64) -> i64 {
    value.round() as i64
}
