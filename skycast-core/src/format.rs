//! Assembly of view-ready strings from the canonical value objects.
//!
//! Conversion happens here and only here; the stored data stays imperial.

use chrono::NaiveDate;

use crate::icons;
use crate::model::{CurrentConditions, DisplayUnit, ForecastDay, ForecastSet};
use crate::units;

/// Display strings for the current-conditions panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedCurrent {
    pub location: String,
    pub temperature: String,
    pub feels_like: String,
    /// Glyph plus conditions text, e.g. `"☀️ Clear"`.
    pub conditions: String,
    pub humidity: String,
    pub uv_index: String,
    pub wind_speed: String,
}

/// Display strings for one forecast card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedDay {
    pub date: String,
    pub temp_max: String,
    pub temp_min: String,
    pub conditions: String,
    pub sunrise: String,
    pub sunset: String,
}

pub fn format_current(current: &CurrentConditions, unit: DisplayUnit) -> FormattedCurrent {
    let glyph = icons::glyph_for(current.icon_code.as_deref());

    FormattedCurrent {
        location: current.location.clone(),
        temperature: units::display_temperature(current.temperature_f, unit),
        feels_like: units::display_temperature(current.feels_like_f, unit),
        conditions: format!("{glyph} {}", current.conditions_text),
        humidity: format!("{}%", current.humidity_pct.round() as i64),
        uv_index: format!("{}", current.uv_index.round() as i64),
        wind_speed: units::display_wind_speed(current.wind_speed_mph, unit),
    }
}

pub fn format_forecast(forecast: &ForecastSet, unit: DisplayUnit) -> Vec<FormattedDay> {
    forecast.iter().map(|day| format_day(day, unit)).collect()
}

fn format_day(day: &ForecastDay, unit: DisplayUnit) -> FormattedDay {
    let glyph = icons::glyph_for(day.icon_code.as_deref());

    FormattedDay {
        date: display_date(&day.date_iso),
        temp_max: units::display_temperature(day.temp_max_f, unit),
        temp_min: units::display_temperature(day.temp_min_f, unit),
        conditions: format!("{glyph} {}", day.conditions_text),
        sunrise: day.sunrise_local.clone(),
        sunset: day.sunset_local.clone(),
    }
}

// Falls back to the raw provider string when it is not a plain date.
fn display_date(date_iso: &str) -> String {
    match NaiveDate::parse_from_str(date_iso, "%Y-%m-%d") {
        Ok(date) => date.format("%a, %b %-d").to_string(),
        Err(_) => date_iso.to_string(),
    }
}
