//! The area-partitioned venue catalog.
//!
//! Loaded once from YAML, validated, then flattened into a single vector with
//! a precomputed venue→area index so area lookups never rescan the catalog.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::ops::Range;
use std::path::Path;

use serde::Deserialize;

use crate::types::{Area, Venue, VenueId};
use crate::ConfigError;

/// Label shown when a venue id has no area. Unreachable for ids handed out by
/// the catalog itself.
pub const UNKNOWN_REGION: &str = "UNKNOWN REGION";

/// On-disk shape of the catalog file.
#[derive(Debug, Deserialize)]
pub struct CatalogFile {
    pub areas: BTreeMap<Area, Vec<Venue>>,
}

/// A venue paired with its stable id and owning area.
#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry<'a> {
    pub id: VenueId,
    pub area: Area,
    pub venue: &'a Venue,
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    venues: Vec<Venue>,
    area_index: Vec<Area>,
    partitions: BTreeMap<Area, Range<usize>>,
}

impl Catalog {
    /// Builds a catalog from per-area venue lists without validation.
    ///
    /// Venues are numbered in [`Area::ALL`] order, then catalog order within
    /// each area.
    #[must_use]
    pub fn new(mut areas: BTreeMap<Area, Vec<Venue>>) -> Self {
        let mut venues = Vec::new();
        let mut area_index = Vec::new();
        let mut partitions = BTreeMap::new();

        for area in Area::ALL {
            let start = venues.len();
            if let Some(list) = areas.remove(&area) {
                area_index.extend(std::iter::repeat_n(area, list.len()));
                venues.extend(list);
            }
            partitions.insert(area, start..venues.len());
        }

        Self {
            venues,
            area_index,
            partitions,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.venues.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.venues.is_empty()
    }

    #[must_use]
    pub fn venue(&self, id: VenueId) -> Option<&Venue> {
        self.venues.get(id.0)
    }

    #[must_use]
    pub fn area_of(&self, id: VenueId) -> Option<Area> {
        self.area_index.get(id.0).copied()
    }

    /// Display label of the venue's area, or [`UNKNOWN_REGION`].
    #[must_use]
    pub fn area_label(&self, id: VenueId) -> &'static str {
        self.area_of(id).map_or(UNKNOWN_REGION, Area::label)
    }

    /// Number of venues stored under `area`.
    #[must_use]
    pub fn area_count(&self, area: Area) -> usize {
        self.partitions.get(&area).map_or(0, |range| range.len())
    }

    /// Flattens the catalog, restricted to `selected` when non-empty.
    ///
    /// An empty selection means every area. Output is area order, then catalog
    /// order; callers should not depend on anything beyond that.
    #[must_use]
    pub fn all_venues(&self, selected: &BTreeSet<Area>) -> Vec<CatalogEntry<'_>> {
        let areas: Vec<Area> = if selected.is_empty() {
            Area::ALL.to_vec()
        } else {
            selected.iter().copied().collect()
        };

        areas
            .into_iter()
            .filter_map(|area| self.partitions.get(&area).map(|range| (area, range.clone())))
            .flat_map(|(area, range)| {
                range.map(move |idx| CatalogEntry {
                    id: VenueId(idx),
                    area,
                    venue: &self.venues[idx],
                })
            })
            .collect()
    }

    /// Looks up a venue by exact display name.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<VenueId> {
        self.venues.iter().position(|v| v.name == name).map(VenueId)
    }
}

/// Load and validate the catalog from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_catalog(path: &Path) -> Result<Catalog, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CatalogFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let catalog = parse_catalog(&content)?;
    if catalog.is_empty() {
        tracing::warn!(path = %path.display(), "venue catalog has no venues");
    }
    tracing::debug!(
        path = %path.display(),
        venues = catalog.len(),
        "loaded venue catalog"
    );
    Ok(catalog)
}

/// Parse and validate catalog YAML already held in memory.
///
/// # Errors
///
/// Returns `ConfigError::CatalogFileParse` for malformed YAML or unknown area
/// keys, and `ConfigError::Validation` for invalid venue data.
pub fn parse_catalog(content: &str) -> Result<Catalog, ConfigError> {
    let file: CatalogFile = serde_yaml::from_str(content)?;
    validate_catalog(&file)?;
    Ok(Catalog::new(file.areas))
}

fn validate_catalog(file: &CatalogFile) -> Result<(), ConfigError> {
    let mut seen_names = HashSet::new();

    for (area, venues) in &file.areas {
        for venue in venues {
            if venue.name.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "venue name must be non-empty (area '{area}')"
                )));
            }

            if !venue.rating.is_finite() || !(0.0..=5.0).contains(&venue.rating) {
                return Err(ConfigError::Validation(format!(
                    "venue '{}' has invalid rating {}; must be between 0.0 and 5.0",
                    venue.name, venue.rating
                )));
            }

            if let Some(coords) = venue.coordinates {
                if !coords.is_valid() {
                    return Err(ConfigError::Validation(format!(
                        "venue '{}' has out-of-range coordinates ({}, {})",
                        venue.name, coords.latitude, coords.longitude
                    )));
                }
            }

            if !seen_names.insert(venue.name.to_lowercase()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate venue name: '{}'",
                    venue.name
                )));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
areas:
  north:
    - name: "CLISSOLD PARK"
      rating: 3.0
      url: "https://example.com/clissold"
  central:
    - name: "TGO OUTDOOR GYM"
      coordinates: { latitude: 51.5205215, longitude: -0.1212977 }
      rating: 4.0
      url: "https://example.com/tgo"
      images: ["https://i.example.com/a.jpg", "https://i.example.com/b.jpg"]
    - name: "SPA FIELDS"
      rating: 2.0
      url: "https://example.com/spa"
"#;

    #[test]
    fn catalog_without_venues_loads_empty() {
        let catalog = parse_catalog("areas: {}\n").unwrap();
        assert!(catalog.is_empty());
        assert!(catalog.all_venues(&BTreeSet::new()).is_empty());
        for area in Area::ALL {
            assert_eq!(catalog.area_count(area), 0);
        }
    }

    #[test]
    fn parse_catalog_numbers_venues_in_area_order() {
        let catalog = parse_catalog(SAMPLE).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.venue(VenueId(0)).unwrap().name, "TGO OUTDOOR GYM");
        assert_eq!(catalog.venue(VenueId(1)).unwrap().name, "SPA FIELDS");
        assert_eq!(catalog.venue(VenueId(2)).unwrap().name, "CLISSOLD PARK");
    }

    #[test]
    fn area_index_is_precomputed() {
        let catalog = parse_catalog(SAMPLE).unwrap();
        assert_eq!(catalog.area_of(VenueId(0)), Some(Area::Central));
        assert_eq!(catalog.area_of(VenueId(2)), Some(Area::North));
        assert_eq!(catalog.area_label(VenueId(2)), "NORTH LONDON");
        assert_eq!(catalog.area_count(Area::Central), 2);
        assert_eq!(catalog.area_count(Area::East), 0);
    }

    #[test]
    fn area_label_falls_back_for_foreign_id() {
        let catalog = parse_catalog(SAMPLE).unwrap();
        assert_eq!(catalog.area_of(VenueId(99)), None);
        assert_eq!(catalog.area_label(VenueId(99)), UNKNOWN_REGION);
    }

    #[test]
    fn all_venues_with_empty_selection_returns_everything() {
        let catalog = parse_catalog(SAMPLE).unwrap();
        let all = catalog.all_venues(&BTreeSet::new());
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn all_venues_restricts_to_selected_areas() {
        let catalog = parse_catalog(SAMPLE).unwrap();
        let selected = BTreeSet::from([Area::North]);
        let names: Vec<&str> = catalog
            .all_venues(&selected)
            .iter()
            .map(|e| e.venue.name.as_str())
            .collect();
        assert_eq!(names, vec!["CLISSOLD PARK"]);
    }

    #[test]
    fn all_venues_for_empty_area_is_empty() {
        let catalog = parse_catalog(SAMPLE).unwrap();
        assert!(catalog.all_venues(&BTreeSet::from([Area::East])).is_empty());
    }

    #[test]
    fn find_by_name_returns_stable_id() {
        let catalog = parse_catalog(SAMPLE).unwrap();
        assert_eq!(catalog.find_by_name("SPA FIELDS"), Some(VenueId(1)));
        assert_eq!(catalog.find_by_name("spa fields"), None);
    }

    #[test]
    fn rejects_duplicate_names_case_insensitively() {
        let yaml = r#"
areas:
  central:
    - { name: "Spa Fields", rating: 2.0, url: "u" }
  east:
    - { name: "SPA FIELDS", rating: 3.0, url: "u" }
"#;
        let err = parse_catalog(yaml).unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(ref msg) if msg.contains("duplicate")),
            "expected duplicate validation error, got: {err:?}"
        );
    }

    #[test]
    fn rejects_rating_out_of_range() {
        let yaml = r#"
areas:
  south:
    - { name: "Brockwell", rating: 5.5, url: "u" }
"#;
        let err = parse_catalog(yaml).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)), "got: {err:?}");
    }

    #[test]
    fn rejects_out_of_range_coordinates() {
        let yaml = r#"
areas:
  west:
    - name: "Ravenscourt"
      rating: 3.5
      url: "u"
      coordinates: { latitude: 151.0, longitude: -0.2 }
"#;
        let err = parse_catalog(yaml).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)), "got: {err:?}");
    }

    #[test]
    fn rejects_blank_name() {
        let yaml = r#"
areas:
  west:
    - { name: "  ", rating: 3.0, url: "u" }
"#;
        assert!(matches!(
            parse_catalog(yaml),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn rejects_unknown_area_key() {
        let yaml = r#"
areas:
  midlands:
    - { name: "Somewhere", rating: 3.0, url: "u" }
"#;
        assert!(matches!(
            parse_catalog(yaml),
            Err(ConfigError::CatalogFileParse(_))
        ));
    }

    #[test]
    fn shipped_catalog_loads_and_every_venue_has_an_area() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config/parks.yaml");
        let catalog = load_catalog(&path).unwrap();
        assert_eq!(catalog.len(), 111);
        for idx in 0..catalog.len() {
            assert_ne!(catalog.area_label(VenueId(idx)), UNKNOWN_REGION);
        }
        let total: usize = Area::ALL.into_iter().map(|a| catalog.area_count(a)).sum();
        assert_eq!(total, catalog.len());
    }

    #[test]
    fn load_catalog_reports_missing_file() {
        let err = load_catalog(Path::new("/nonexistent/parks.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::CatalogFileIo { .. }));
    }
}
