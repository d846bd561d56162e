//! Session-scoped selection state and its transitions.
//!
//! Every user action is a method on [`SelectionState`] that runs to
//! completion. Postcode resolution is split into [`SelectionState::begin_search`]
//! and [`SelectionState::finish_search`] so the network call can happen in
//! between without holding the state; a generation counter makes sure only
//! the most recent search is allowed to land.

use std::collections::BTreeSet;

use crate::carousel::Carousel;
use crate::catalog::Catalog;
use crate::pipeline::{process, RatingGroup};
use crate::types::{Area, Coordinate, SortKey, ViewMode};

/// Handle for one in-flight postcode resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub generation: u64,
    pub postcode: String,
}

#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    areas: BTreeSet<Area>,
    ratings: BTreeSet<u8>,
    sort_by: SortKey,
    user_coordinate: Option<Coordinate>,
    postcode: String,
    collapsed_buckets: BTreeSet<u8>,
    carousel: Carousel,
    searching: bool,
    last_error: Option<String>,
    view_mode: ViewMode,
    generation: u64,
}

impl SelectionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn selected_areas(&self) -> &BTreeSet<Area> {
        &self.areas
    }

    #[must_use]
    pub fn selected_ratings(&self) -> &BTreeSet<u8> {
        &self.ratings
    }

    #[must_use]
    pub fn sort_by(&self) -> SortKey {
        self.sort_by
    }

    #[must_use]
    pub fn user_coordinate(&self) -> Option<Coordinate> {
        self.user_coordinate
    }

    #[must_use]
    pub fn postcode(&self) -> &str {
        &self.postcode
    }

    #[must_use]
    pub fn is_searching(&self) -> bool {
        self.searching
    }

    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    #[must_use]
    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    #[must_use]
    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    pub fn carousel_mut(&mut self) -> &mut Carousel {
        &mut self.carousel
    }

    /// Adds `area` to the selection, or removes it if already selected.
    pub fn toggle_area(&mut self, area: Area) {
        if !self.areas.remove(&area) {
            self.areas.insert(area);
        }
    }

    /// Adds the rating bucket to the filter, or removes it if already present.
    pub fn toggle_rating(&mut self, rating: u8) {
        if !self.ratings.remove(&rating) {
            self.ratings.insert(rating);
        }
    }

    /// Switches the active sort key.
    ///
    /// Returns `false` and leaves the key unchanged when asked for
    /// `SortKey::Distance` without a user coordinate.
    pub fn set_sort(&mut self, sort_by: SortKey) -> bool {
        if sort_by == SortKey::Distance && self.user_coordinate.is_none() {
            return false;
        }
        self.sort_by = sort_by;
        true
    }

    /// Records edits to the postcode box. Typing dismisses any previous error.
    pub fn set_postcode_text(&mut self, text: impl Into<String>) {
        self.postcode = text.into();
        self.last_error = None;
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }

    #[must_use]
    pub fn is_bucket_expanded(&self, bucket: u8) -> bool {
        !self.collapsed_buckets.contains(&bucket)
    }

    /// Flips a rating bucket between expanded and collapsed.
    pub fn toggle_bucket(&mut self, bucket: u8) {
        if !self.collapsed_buckets.remove(&bucket) {
            self.collapsed_buckets.insert(bucket);
        }
    }

    /// Resets ratings, areas, location, postcode, sort key, and error together.
    ///
    /// Carousel positions and bucket expansion are view state and survive.
    /// An in-flight search is invalidated so its result cannot resurrect the
    /// cleared location.
    pub fn clear_filters(&mut self) {
        self.ratings.clear();
        self.areas.clear();
        self.user_coordinate = None;
        self.postcode.clear();
        self.sort_by = SortKey::Rating;
        self.last_error = None;
        if self.searching {
            self.generation += 1;
            self.searching = false;
        }
    }

    /// Marks a resolution of the current postcode text as in flight.
    pub fn begin_search(&mut self) -> SearchTicket {
        self.generation += 1;
        self.searching = true;
        self.last_error = None;
        SearchTicket {
            generation: self.generation,
            postcode: self.postcode.clone(),
        }
    }

    /// Applies the outcome of a search started with [`Self::begin_search`].
    ///
    /// Returns `false` without touching anything if a newer search has begun
    /// since `ticket` was issued.
    pub fn finish_search(
        &mut self,
        ticket: &SearchTicket,
        outcome: Result<Coordinate, String>,
    ) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!(
                stale = ticket.generation,
                latest = self.generation,
                "discarding superseded postcode result"
            );
            return false;
        }

        self.searching = false;
        match outcome {
            Ok(coordinate) => {
                self.user_coordinate = Some(coordinate);
                self.sort_by = SortKey::Distance;
                self.last_error = None;
            }
            Err(message) => {
                self.clear_user_coordinate();
                self.last_error = Some(message);
            }
        }
        true
    }

    /// Gives up on a search whose outcome will never arrive.
    ///
    /// Clears the in-flight flag only if `ticket` is still the latest search;
    /// location, sort key, and error are left as they were.
    pub fn abandon_search(&mut self, ticket: &SearchTicket) -> bool {
        if ticket.generation != self.generation || !self.searching {
            return false;
        }
        self.searching = false;
        true
    }

    /// Runs the catalog through the pipeline with the current selection.
    #[must_use]
    pub fn query<'a>(&self, catalog: &'a Catalog) -> Vec<RatingGroup<'a>> {
        process(
            catalog.all_venues(&self.areas),
            &self.ratings,
            self.sort_by,
            self.user_coordinate,
        )
    }

    fn clear_user_coordinate(&mut self) {
        self.user_coordinate = None;
        if self.sort_by == SortKey::Distance {
            self.sort_by = SortKey::Rating;
        }
    }
}

#[cfg(test)]
#[path = "selection_test.rs"]
mod tests;
