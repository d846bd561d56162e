//! Plain-text rendering of catalog queries.

use parkfinder_core::{
    format_rating, star_fills, Area, Catalog, RatingGroup, SelectionState, SortKey, StarFill,
    VenueId, ViewMode,
};

pub(crate) fn print_areas(catalog: &Catalog) {
    println!("{:<10}{:<18}PARKS", "ID", "AREA");
    for area in Area::ALL {
        println!("{:<10}{:<18}{}", area.id(), area.label(), catalog.area_count(area));
    }
}

pub(crate) fn print_groups(catalog: &Catalog, state: &SelectionState, groups: &[RatingGroup<'_>]) {
    if state.view_mode() == ViewMode::Map {
        println!("MAP VIEW COMING SOON");
        return;
    }

    if groups.is_empty() {
        println!("no parks match the current filters");
        return;
    }

    if state.sort_by() == SortKey::Distance {
        println!("Showing parks sorted by distance from your location");
    }

    for group in groups {
        let heading = if state.sort_by() == SortKey::Distance {
            "NEAREST FIRST".to_string()
        } else {
            "*".repeat(usize::from(group.bucket))
        };
        let marker = if state.is_bucket_expanded(group.bucket) {
            "-"
        } else {
            "+"
        };
        println!("{marker} {heading} ({} parks)", group.venues.len());

        if !state.is_bucket_expanded(group.bucket) {
            continue;
        }
        for ranked in &group.venues {
            let distance = ranked
                .distance_m
                .map(|m| format!("  {}", fmt_distance(m)))
                .unwrap_or_default();
            println!(
                "    {:<40}{} {}  {}{}",
                ranked.venue.name,
                stars(ranked.venue.rating),
                format_rating(ranked.venue.rating),
                catalog.area_label(ranked.id),
                distance
            );
        }
    }
}

pub(crate) fn print_venue(catalog: &Catalog, state: &mut SelectionState, id: VenueId, image: usize) {
    let Some(venue) = catalog.venue(id) else {
        return;
    };

    println!("{}", venue.name);
    println!("  Area:       {}", catalog.area_label(id));
    println!(
        "  Rating:     {} {}",
        stars(venue.rating),
        format_rating(venue.rating)
    );
    if !venue.address.is_empty() {
        println!("  Address:    {}", venue.address);
    }
    if !venue.difficulty.is_empty() {
        println!("  Difficulty: {}", venue.difficulty);
    }
    if !venue.hours.is_empty() {
        println!("  Hours:      {}", venue.hours);
    }
    if !venue.equipment.is_empty() {
        println!("  Equipment:  {}", venue.equipment.join(", "));
    }
    if !venue.description.is_empty() {
        println!("  {}", venue.description);
    }
    println!("  Info:       {}", venue.url);
    if let Some(maps) = &venue.maps_url {
        println!("  Map:        {maps}");
    }

    let count = venue.images.len();
    if count == 0 {
        println!("  (no images)");
        return;
    }
    let index = state.carousel_mut().set_explicit(id, image, count);
    println!("  Image {}/{}:  {}", index + 1, count, venue.images[index]);
}

fn stars(rating: f64) -> String {
    star_fills(rating)
        .iter()
        .map(|fill| match fill {
            StarFill::Full => '\u{2605}',
            StarFill::Partial => '\u{2bea}',
            StarFill::Empty => '\u{2606}',
        })
        .collect()
}

fn fmt_distance(meters: f64) -> String {
    if meters < 1_000.0 {
        format!("{meters:.0} m")
    } else {
        format!("{:.1} km", meters / 1_000.0)
    }
}
