use serde::{Deserialize, Serialize};

/// Unit system used for display only.
///
/// All stored numeric weather data is canonical imperial; the unit is applied
/// at format time and never baked into the value objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayUnit {
    #[default]
    Imperial,
    Metric,
}

impl DisplayUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayUnit::Imperial => "imperial",
            DisplayUnit::Metric => "metric",
        }
    }

    /// The opposite unit, for the toggle control.
    pub fn toggled(&self) -> Self {
        match self {
            DisplayUnit::Imperial => DisplayUnit::Metric,
            DisplayUnit::Metric => DisplayUnit::Imperial,
        }
    }
}

impl std::fmt::Display for DisplayUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for DisplayUnit {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "imperial" => Ok(DisplayUnit::Imperial),
            "metric" => Ok(DisplayUnit::Metric),
            _ => Err(anyhow::anyhow!(
                "Unknown unit '{value}'. Supported units: imperial, metric."
            )),
        }
    }
}

/// Current conditions at the resolved location, canonical imperial units.
///
/// Created by the normalizer per successful fetch and superseded, never
/// mutated, by the next one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub location: String,
    pub temperature_f: f64,
    pub feels_like_f: f64,
    pub conditions_text: String,
    pub humidity_pct: f64,
    pub uv_index: f64,
    pub wind_speed_mph: f64,
    pub icon_code: Option<String>,
}

/// One forecast day, canonical imperial units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    /// Provider-local calendar date, `YYYY-MM-DD`.
    pub date_iso: String,
    pub temp_max_f: f64,
    pub temp_min_f: f64,
    /// Provider-local wall-clock time, `HH:MM:SS`.
    pub sunrise_local: String,
    pub sunset_local: String,
    pub conditions_text: String,
    pub icon_code: Option<String>,
}

/// The three days following the request day, nearest first.
///
/// The request day itself (index 0 of the provider's day list) is excluded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSet {
    days: [ForecastDay; 3],
}

impl ForecastSet {
    pub const LEN: usize = 3;

    pub(crate) fn new(days: [ForecastDay; 3]) -> Self {
        Self { days }
    }

    pub fn days(&self) -> &[ForecastDay] {
        &self.days
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ForecastDay> {
        self.days.iter()
    }
}

impl<'a> IntoIterator for &'a ForecastSet {
    type Item = &'a ForecastDay;
    type IntoIter = std::slice::Iter<'a, ForecastDay>;

    fn into_iter(self) -> Self::IntoIter {
        self.days.iter()
    }
}

/// What the user is looking at. Exactly one state is active at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderState {
    Idle,
    Loading,
    Populated {
        current: CurrentConditions,
        forecast: ForecastSet,
    },
    Failed(String),
}
