//! Per-venue image carousel positions.

use std::collections::HashMap;

use crate::types::VenueId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Prev,
}

/// Current image index for each venue. Venues never seen are at index 0.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Carousel {
    indexes: HashMap<VenueId, usize>,
}

impl Carousel {
    #[must_use]
    pub fn current(&self, id: VenueId) -> usize {
        self.indexes.get(&id).copied().unwrap_or(0)
    }

    /// Steps one image forward or back, wrapping at either end.
    ///
    /// With zero or one image there is nowhere to go and the index stays 0.
    pub fn advance(&mut self, id: VenueId, direction: Direction, image_count: usize) -> usize {
        if image_count <= 1 {
            self.indexes.remove(&id);
            return 0;
        }

        let current = self.current(id) % image_count;
        let next = match direction {
            Direction::Next => (current + 1) % image_count,
            Direction::Prev => (current + image_count - 1) % image_count,
        };
        self.indexes.insert(id, next);
        next
    }

    /// Jumps straight to `index`, clamped into `0..image_count`.
    pub fn set_explicit(&mut self, id: VenueId, index: usize, image_count: usize) -> usize {
        let clamped = index.min(image_count.saturating_sub(1));
        if clamped == 0 {
            self.indexes.remove(&id);
        } else {
            self.indexes.insert(id, clamped);
        }
        clamped
    }
}
