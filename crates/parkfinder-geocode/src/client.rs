//! HTTP client for postcode lookups.
//!
//! Speaks the `postcodes.io` lookup contract: `GET /postcodes/{postcode}`
//! answering `{ "result": { "latitude": .., "longitude": .. } }`. Any non-2xx
//! status, missing `result`, or unusable body is reported as
//! [`ResolutionError::NotFound`]; only transport failures surface as
//! [`ResolutionError::Http`].

use std::time::Duration;

use parkfinder_core::{AppConfig, Coordinate};
use reqwest::header::ACCEPT;
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::error::ResolutionError;
use crate::normalize::normalize_postcode;

const DEFAULT_BASE_URL: &str = "https://api.postcodes.io/";
const DEFAULT_USER_AGENT: &str = "parkfinder/0.1 (park-discovery)";

#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    result: Option<LookupResult>,
}

#[derive(Debug, Deserialize)]
struct LookupResult {
    latitude: Option<f64>,
    longitude: Option<f64>,
}

/// Client for a `postcodes.io`-compatible lookup service.
///
/// Use [`PostcodeClient::new`] for production or
/// [`PostcodeClient::with_base_url`] to point at a mock server in tests.
#[derive(Debug, Clone)]
pub struct PostcodeClient {
    client: Client,
    base_url: Url,
}

impl PostcodeClient {
    /// Creates a client pointed at the public `postcodes.io` service.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64) -> Result<Self, ResolutionError> {
        Self::with_base_url(DEFAULT_BASE_URL, timeout_secs, DEFAULT_USER_AGENT)
    }

    /// Creates a client from loaded application configuration.
    ///
    /// # Errors
    ///
    /// See [`PostcodeClient::with_base_url`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ResolutionError> {
        Self::with_base_url(
            &config.geocoder_base_url,
            config.geocoder_timeout_secs,
            &config.user_agent,
        )
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ResolutionError::InvalidBaseUrl`] if
    /// `base_url` does not parse or cannot carry path segments.
    pub fn with_base_url(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ResolutionError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.min(5)))
            .user_agent(user_agent)
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| ResolutionError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(ResolutionError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: "URL cannot carry a path".to_string(),
            });
        }

        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    /// Resolves free-text `raw` to a coordinate.
    ///
    /// The text is normalized first (see [`normalize_postcode`]) but never
    /// rejected locally; the service decides whether it exists.
    ///
    /// # Errors
    ///
    /// - [`ResolutionError::NotFound`] for a non-2xx status or a body without
    ///   a usable `result`.
    /// - [`ResolutionError::Http`] on network failure or timeout.
    pub async fn resolve(&self, raw: &str) -> Result<Coordinate, ResolutionError> {
        let postcode = normalize_postcode(raw);
        let url = self.lookup_url(&postcode);
        tracing::debug!(%postcode, %url, "resolving postcode");

        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(%postcode, status = status.as_u16(), "postcode lookup rejected");
            return Err(ResolutionError::NotFound { postcode });
        }

        let body = response.text().await?;
        Self::parse_coordinate(&body).ok_or_else(|| {
            tracing::debug!(%postcode, "postcode lookup returned no usable result");
            ResolutionError::NotFound { postcode }
        })
    }

    /// Builds `{base}/postcodes/{postcode}` with the postcode as one
    /// percent-encoded path segment.
    fn lookup_url(&self, postcode: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("postcodes").push(postcode);
        }
        url
    }

    fn parse_coordinate(body: &str) -> Option<Coordinate> {
        let parsed: LookupResponse = match serde_json::from_str(body) {
            Ok(parsed) => parsed,
            Err(error) => {
                tracing::debug!(%error, "postcode lookup body was not valid JSON");
                return None;
            }
        };
        let result = parsed.result?;
        let coordinate = Coordinate::new(result.latitude?, result.longitude?);
        coordinate.is_valid().then_some(coordinate)
    }
}
