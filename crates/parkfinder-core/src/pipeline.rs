//! Filter, sort, and group catalog entries for display.
//!
//! [`process`] is a pure function of its inputs: the same candidates,
//! rating selection, sort key, and user coordinate always yield the same
//! groups in the same order.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use icu_collator::{Collator, CollatorOptions, Strength};
use serde::Serialize;

use crate::catalog::CatalogEntry;
use crate::distance::ranking_distance;
use crate::types::{Area, Coordinate, SortKey, Venue, VenueId};

/// A venue positioned in the output, with its distance from the user when known.
#[derive(Debug, Clone, Serialize)]
pub struct RankedVenue<'a> {
    pub id: VenueId,
    pub area: Area,
    pub venue: &'a Venue,
    /// Meters from the user coordinate; `None` when either side lacks one.
    pub distance_m: Option<f64>,
}

/// One display bucket. `bucket` is `floor(rating)`, or `0` for the single
/// proximity group.
#[derive(Debug, Clone, Serialize)]
pub struct RatingGroup<'a> {
    pub bucket: u8,
    pub venues: Vec<RankedVenue<'a>>,
}

/// Integer rating bucket of a venue: `floor(rating)`, clamped to `0..=5`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn rating_bucket(rating: f64) -> u8 {
    if rating.is_nan() {
        return 0;
    }
    rating.floor().clamp(0.0, 5.0) as u8
}

/// Runs the filter → sort → group pipeline.
///
/// `SortKey::Distance` without a user coordinate is handled as
/// `SortKey::Rating`; the selection state never produces that combination.
pub fn process<'a>(
    candidates: impl IntoIterator<Item = CatalogEntry<'a>>,
    selected_ratings: &BTreeSet<u8>,
    sort_by: SortKey,
    user: Option<Coordinate>,
) -> Vec<RatingGroup<'a>> {
    let mut ranked: Vec<RankedVenue<'a>> = candidates
        .into_iter()
        .filter(|entry| passes_rating_filter(entry.venue, selected_ratings))
        .map(|entry| RankedVenue {
            id: entry.id,
            area: entry.area,
            venue: entry.venue,
            distance_m: user
                .map(|u| ranking_distance(Some(u), entry.venue.coordinates))
                .filter(|d| d.is_finite()),
        })
        .collect();

    let proximity = sort_by == SortKey::Distance && user.is_some();
    let effective = if sort_by == SortKey::Distance && !proximity {
        SortKey::Rating
    } else {
        sort_by
    };
    sort_ranked(&mut ranked, effective);

    if proximity {
        if ranked.is_empty() {
            return Vec::new();
        }
        return vec![RatingGroup {
            bucket: 0,
            venues: ranked,
        }];
    }

    group_by_bucket(ranked)
}

/// `true` if the venue survives the rating filter; an empty selection keeps all.
#[must_use]
pub fn passes_rating_filter(venue: &Venue, selected_ratings: &BTreeSet<u8>) -> bool {
    selected_ratings.is_empty() || selected_ratings.contains(&rating_bucket(venue.rating))
}

fn sort_ranked(ranked: &mut [RankedVenue<'_>], sort_by: SortKey) {
    match sort_by {
        SortKey::Rating => ranked.sort_by(by_rating_desc),
        SortKey::Name => sort_by_name(ranked),
        SortKey::Distance => ranked.sort_by(|a, b| {
            let da = a.distance_m.unwrap_or(f64::INFINITY);
            let db = b.distance_m.unwrap_or(f64::INFINITY);
            da.total_cmp(&db)
        }),
    }
}

/// Root-locale collation at secondary strength: accents count, case does not,
/// and punctuation orders ahead of letters.
fn sort_by_name(ranked: &mut [RankedVenue<'_>]) {
    let mut options = CollatorOptions::new();
    options.strength = Some(Strength::Secondary);
    match Collator::try_new(&Default::default(), options) {
        Ok(collator) => ranked.sort_by(|a, b| collator.compare(&a.venue.name, &b.venue.name)),
        Err(error) => {
            tracing::warn!(%error, "root collator unavailable; sorting names by lowercase text");
            ranked.sort_by_cached_key(|r| r.venue.name.to_lowercase());
        }
    }
}

fn by_rating_desc(a: &RankedVenue<'_>, b: &RankedVenue<'_>) -> Ordering {
    b.venue.rating.total_cmp(&a.venue.rating)
}

fn group_by_bucket(ranked: Vec<RankedVenue<'_>>) -> Vec<RatingGroup<'_>> {
    let mut buckets: BTreeMap<u8, Vec<RankedVenue<'_>>> = BTreeMap::new();
    for r in ranked {
        buckets
            .entry(rating_bucket(r.venue.rating))
            .or_default()
            .push(r);
    }

    buckets
        .into_iter()
        .rev()
        .map(|(bucket, mut venues)| {
            venues.sort_by(by_rating_desc);
            RatingGroup { bucket, venues }
        })
        .collect()
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
