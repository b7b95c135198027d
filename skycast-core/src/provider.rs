use async_trait::async_trait;
use std::fmt::Debug;

use crate::error::WeatherError;
use crate::normalize::RawPayload;

pub mod visualcrossing;

/// One fetch attempt against the upstream weather service.
///
/// Implementations report [`WeatherError::NotFound`] when the upstream says
/// the location is unresolvable, [`WeatherError::ProviderUnavailable`] for
/// transport or HTTP-level failure, and [`WeatherError::MalformedPayload`]
/// when the body does not decode as the timeline shape.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch_raw(&self, location: &str) -> Result<RawPayload, WeatherError>;
}
