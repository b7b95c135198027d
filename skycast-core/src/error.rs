use thiserror::Error;

/// Everything that can terminate a submit attempt.
///
/// Each variant's `Display` text is the user-visible message pushed to the
/// view; none of them are retried automatically.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WeatherError {
    #[error("No location provided")]
    EmptyLocation,

    /// The upstream service reported the location query as unresolvable.
    #[error("Location \"{0}\" not found")]
    NotFound(String),

    /// Transport or HTTP-level failure talking to the upstream service.
    #[error("Weather service unavailable: {0}")]
    ProviderUnavailable(String),

    /// The upstream response lacks the structure the app requires.
    #[error("Weather data was malformed: {0}")]
    MalformedPayload(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_quotes_the_location() {
        let err = WeatherError::NotFound("Nowhereville".to_string());
        assert_eq!(err.to_string(), "Location \"Nowhereville\" not found");
    }

    #[test]
    fn empty_location_message() {
        assert_eq!(WeatherError::EmptyLocation.to_string(), "No location provided");
    }
}
