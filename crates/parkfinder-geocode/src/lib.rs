//! UK postcode resolution against a `postcodes.io`-compatible service.
//!
//! [`PostcodeClient`] turns free-text postcodes into coordinates;
//! [`submit_postcode`] drives a resolution against shared
//! [`parkfinder_core::SelectionState`] so only the latest submission lands.

pub mod client;
pub mod error;
pub mod normalize;
pub mod search;

pub use client::PostcodeClient;
pub use error::ResolutionError;
pub use normalize::{is_valid_postcode_format, normalize_postcode};
pub use search::submit_postcode;
