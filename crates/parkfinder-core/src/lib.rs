pub mod app_config;
pub mod carousel;
pub mod catalog;
pub mod config;
pub mod distance;
pub mod pipeline;
pub mod selection;
pub mod stars;
pub mod types;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use carousel::{Carousel, Direction};
pub use catalog::{load_catalog, parse_catalog, Catalog, CatalogEntry, CatalogFile};
pub use config::{load_app_config, load_app_config_from_env};
pub use distance::{distance, ranking_distance};
pub use pipeline::{process, rating_bucket, RankedVenue, RatingGroup};
pub use selection::{SearchTicket, SelectionState};
pub use stars::{format_rating, star_fills, StarFill};
pub use types::{Area, Coordinate, SortKey, Venue, VenueId, ViewMode};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read catalog file {path}: {source}")]
    CatalogFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog file: {0}")]
    CatalogFileParse(#[from] serde_yaml::Error),

    #[error("catalog validation error: {0}")]
    Validation(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("unknown area: {0}")]
    UnknownArea(String),

    #[error("unknown sort key: {0}")]
    UnknownSortKey(String),
}
