use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::debug;

use crate::error::WeatherError;
use crate::normalize::RawPayload;

use super::WeatherProvider;

/// Published by Visual Crossing as a free demo key; a personal key from the
/// preference file takes precedence.
pub const DEFAULT_API_KEY: &str = "F7DAMFZQK663JES2VYHE3SHKU";

const DEFAULT_BASE_URL: &str = "https://weather.visualcrossing.com";
const TIMELINE_PATH: [&str; 4] = ["VisualCrossingWebServices", "rest", "services", "timeline"];

/// Fetches the Visual Crossing timeline endpoint.
///
/// One request delivers both current conditions and the day list, in US
/// units (the canonical storage unit).
#[derive(Debug, Clone)]
pub struct VisualCrossingProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl VisualCrossingProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    /// Points the provider at a different host, used to test against a
    /// local mock server.
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self { api_key, base_url, http: Client::new() }
    }

    fn timeline_url(&self, location: &str) -> Result<Url, WeatherError> {
        let mut url = Url::parse(&self.base_url).map_err(|err| {
            WeatherError::ProviderUnavailable(format!("invalid base url: {err}"))
        })?;
        url.path_segments_mut()
            .map_err(|()| {
                WeatherError::ProviderUnavailable("base url cannot carry a path".to_string())
            })?
            .extend(TIMELINE_PATH.iter().copied().chain([location]));
        Ok(url)
    }
}

#[async_trait]
impl WeatherProvider for VisualCrossingProvider {
    async fn fetch_raw(&self, location: &str) -> Result<RawPayload, WeatherError> {
        if location.is_empty() {
            return Err(WeatherError::EmptyLocation);
        }

        let url = self.timeline_url(location)?;
        debug!(location, "requesting visual crossing timeline");

        let res = self
            .http
            .get(url)
            .query(&[("key", self.api_key.as_str()), ("unitGroup", "us")])
            .send()
            .await
            .map_err(|err| WeatherError::ProviderUnavailable(format!("request failed: {err}")))?;

        let status = res.status();
        let body = res.text().await.map_err(|err| {
            WeatherError::ProviderUnavailable(format!("failed to read response body: {err}"))
        })?;

        if !status.is_success() {
            // The upstream answers client errors ("Invalid location ...")
            // with 400/404 and a plain-text body.
            if status == StatusCode::BAD_REQUEST || status == StatusCode::NOT_FOUND {
                return Err(WeatherError::NotFound(location.to_string()));
            }
            return Err(WeatherError::ProviderUnavailable(format!(
                "status {status}: {}",
                truncate_body(&body)
            )));
        }

        serde_json::from_str(&body).map_err(|err| {
            WeatherError::MalformedPayload(format!("invalid timeline JSON: {err}"))
        })
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX { format!("{}...", &body[..MAX]) } else { body.to_string() }
}
