use thiserror::Error;

/// Why a postcode could not be turned into a coordinate.
///
/// The `Display` text is what the user sees.
#[derive(Debug, Error)]
pub enum ResolutionError {
    /// The service answered, but not with a usable location.
    #[error("Postcode not found. Please check and try again.")]
    NotFound { postcode: String },

    /// Network, timeout, or TLS failure from the underlying HTTP client.
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid geocoder base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
