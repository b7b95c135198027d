//! Fixed lookup from provider icon codes to a display glyph and a visual
//! theme. Both lookups are total: unknown or absent codes take the explicit
//! fallback arm instead of erroring.

/// Shown when the provider sends no icon or one we do not recognize.
pub const FALLBACK_GLYPH: &str = "\u{1f321}\u{fe0f}"; // thermometer

/// Glyph for a Visual Crossing icon code.
pub fn glyph_for(icon_code: Option<&str>) -> &'static str {
    match icon_code {
        Some("clear-day") => "\u{2600}\u{fe0f}",
        Some("clear-night") => "\u{1f319}",
        Some("partly-cloudy-day") => "\u{26c5}",
        Some("partly-cloudy-night") => "\u{2601}\u{fe0f}",
        Some("cloudy") => "\u{2601}\u{fe0f}",
        Some("rain") => "\u{1f327}\u{fe0f}",
        Some("showers") => "\u{1f326}\u{fe0f}",
        Some("thunderstorm") => "\u{26c8}\u{fe0f}",
        Some("snow") => "\u{2744}\u{fe0f}",
        Some("wind") => "\u{1f4a8}",
        Some("fog") => "\u{1f32b}\u{fe0f}",
        _ => FALLBACK_GLYPH,
    }
}

/// Closed set of visual themes the view can switch between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemeName {
    Sunny,
    Night,
    Cloudy,
    Rainy,
    Stormy,
    Snowy,
    Foggy,
}

impl ThemeName {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeName::Sunny => "sunny",
            ThemeName::Night => "night",
            ThemeName::Cloudy => "cloudy",
            ThemeName::Rainy => "rainy",
            ThemeName::Stormy => "stormy",
            ThemeName::Snowy => "snowy",
            ThemeName::Foggy => "foggy",
        }
    }
}

impl std::fmt::Display for ThemeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Theme for a Visual Crossing icon code.
///
/// Unknown and absent codes keep the sunny theme.
pub fn theme_for(icon_code: Option<&str>) -> ThemeName {
    match icon_code {
        Some("clear-day") => ThemeName::Sunny,
        Some("clear-night") => ThemeName::Night,
        Some("partly-cloudy-day" | "partly-cloudy-night" | "cloudy" | "wind") => ThemeName::Cloudy,
        Some("rain" | "showers") => ThemeName::Rainy,
        Some("thunderstorm") => ThemeName::Stormy,
        Some("snow") => ThemeName::Snowy,
        Some("fog") => ThemeName::Foggy,
        _ => ThemeName::Sunny,
    }
}
