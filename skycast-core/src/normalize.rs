//! Extraction of the stable internal shape from the raw provider payload.
//!
//! This module is the only place that knows what the Visual Crossing
//! timeline response looks like. Every field is projected explicitly with a
//! per-field fallback, so upstream schema drift is absorbed here alone.

use serde::Deserialize;

use crate::error::WeatherError;
use crate::model::{CurrentConditions, ForecastDay, ForecastSet};

/// The subset of the timeline response the app reads.
///
/// Every field is optional: absent optional fields degrade gracefully at
/// projection time rather than failing deserialization. Unknown upstream
/// fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPayload {
    #[serde(rename = "resolvedAddress")]
    pub resolved_address: Option<String>,
    #[serde(rename = "currentConditions")]
    pub current_conditions: Option<RawCurrentConditions>,
    #[serde(default)]
    pub days: Vec<RawDay>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCurrentConditions {
    pub temp: Option<f64>,
    pub feelslike: Option<f64>,
    pub conditions: Option<String>,
    pub humidity: Option<f64>,
    pub uvindex: Option<f64>,
    pub windspeed: Option<f64>,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDay {
    pub datetime: Option<String>,
    pub tempmax: Option<f64>,
    pub tempmin: Option<f64>,
    pub sunrise: Option<String>,
    pub sunset: Option<String>,
    pub conditions: Option<String>,
    pub icon: Option<String>,
}

/// Projects the current-conditions object into the canonical shape.
///
/// The one structural requirement is that the nested current-conditions
/// object exists; every individual field inside it is read permissively,
/// with `0` / empty / `None` fallbacks.
pub fn extract_current(raw: &RawPayload) -> Result<CurrentConditions, WeatherError> {
    let current = raw.current_conditions.as_ref().ok_or_else(|| {
        WeatherError::MalformedPayload("response has no current conditions".to_string())
    })?;

    Ok(CurrentConditions {
        location: raw.resolved_address.clone().unwrap_or_default(),
        temperature_f: current.temp.unwrap_or_default(),
        feels_like_f: current.feelslike.unwrap_or_default(),
        conditions_text: current.conditions.clone().unwrap_or_default(),
        humidity_pct: current.humidity.unwrap_or_default(),
        uv_index: current.uvindex.unwrap_or_default(),
        wind_speed_mph: current.windspeed.unwrap_or_default(),
        icon_code: current.icon.clone(),
    })
}

/// Projects day entries 1..=3 into the forecast set.
///
/// Index 0 is the request day and is skipped; the returned order matches the
/// provider's chronological order, nearest day first.
pub fn extract_forecast(raw: &RawPayload) -> Result<ForecastSet, WeatherError> {
    if raw.days.len() < ForecastSet::LEN + 1 {
        return Err(WeatherError::MalformedPayload(format!(
            "expected at least {} day entries, got {}",
            ForecastSet::LEN + 1,
            raw.days.len()
        )));
    }

    let days = [
        project_day(&raw.days[1]),
        project_day(&raw.days[2]),
        project_day(&raw.days[3]),
    ];
    Ok(ForecastSet::new(days))
}

fn project_day(day: &RawDay) -> ForecastDay {
    ForecastDay {
        date_iso: day.datetime.clone().unwrap_or_default(),
        temp_max_f: day.tempmax.unwrap_or_default(),
        temp_min_f: day.tempmin.unwrap_or_default(),
        sunrise_local: day.sunrise.clone().unwrap_or_default(),
        sunset_local: day.sunset.clone().unwrap_or_default(),
        conditions_text: day.conditions.clone().unwrap_or_default(),
        icon_code: day.icon.clone(),
    }
}
