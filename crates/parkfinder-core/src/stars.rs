//! Five-star rating display helpers for the view layer.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StarFill {
    Full,
    Partial,
    Empty,
}

/// Fill level of each of the five stars for `rating`.
///
/// Star `i` is full below `floor(rating)`, partial while still below the
/// exact rating, and empty after that.
#[must_use]
pub fn star_fills(rating: f64) -> [StarFill; 5] {
    let whole = rating.floor();
    std::array::from_fn(|i| {
        let i = f64::from(u8::try_from(i).unwrap_or(u8::MAX));
        if i < whole {
            StarFill::Full
        } else if i < rating {
            StarFill::Partial
        } else {
            StarFill::Empty
        }
    })
}

/// Rating as shown next to the stars, e.g. `4.0`.
#[must_use]
pub fn format_rating(rating: f64) -> String {
    format!("{rating:.1}")
}
