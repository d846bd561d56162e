//! Domain types shared by the catalog, pipeline, and selection state.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// A WGS-84 latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// `true` when both components are finite and inside the WGS-84 ranges.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// One of the five fixed regions the catalog is partitioned into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Area {
    Central,
    North,
    South,
    East,
    West,
}

impl Area {
    pub const ALL: [Area; 5] = [
        Area::Central,
        Area::North,
        Area::South,
        Area::East,
        Area::West,
    ];

    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Area::Central => "central",
            Area::North => "north",
            Area::South => "south",
            Area::East => "east",
            Area::West => "west",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Area::Central => "CENTRAL LONDON",
            Area::North => "NORTH LONDON",
            Area::South => "SOUTH LONDON",
            Area::East => "EAST LONDON",
            Area::West => "WEST LONDON",
        }
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Area {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Area::ALL
            .into_iter()
            .find(|area| area.id().eq_ignore_ascii_case(needle))
            .ok_or_else(|| CoreError::UnknownArea(s.to_string()))
    }
}

/// Stable synthetic key for a venue: its position in the flattened catalog.
///
/// Per-venue state (carousel position) is keyed by this rather than by the
/// display name, which the catalog does not guarantee stays unique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct VenueId(pub usize);

impl fmt::Display for VenueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single outdoor fitness location as it appears in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    pub name: String,
    #[serde(default)]
    pub coordinates: Option<Coordinate>,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub equipment: Vec<String>,
    #[serde(default)]
    pub difficulty: String,
    pub rating: f64,
    #[serde(default)]
    pub hours: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub images: Vec<String>,
    pub url: String,
    #[serde(default)]
    pub maps_url: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Rating,
    Name,
    Distance,
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::Rating => write!(f, "rating"),
            SortKey::Name => write!(f, "name"),
            SortKey::Distance => write!(f, "distance"),
        }
    }
}

impl FromStr for SortKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rating" => Ok(SortKey::Rating),
            "name" => Ok(SortKey::Name),
            "distance" => Ok(SortKey::Distance),
            _ => Err(CoreError::UnknownSortKey(s.to_string())),
        }
    }
}

/// How the listing is presented. `Map` has no renderer yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    List,
    Map,
}
