use super::*;
use crate::catalog::parse_catalog;
use crate::types::VenueId;

const USER: Coordinate = Coordinate::new(51.5074, -0.1278);
const NOT_FOUND: &str = "Postcode not found. Please check and try again.";

const CATALOG: &str = r#"
areas:
  central:
    - name: "TGO OUTDOOR GYM"
      coordinates: { latitude: 51.5205215, longitude: -0.1212977 }
      rating: 4.0
      url: "https://example.com/tgo"
    - name: "SPA FIELDS"
      coordinates: { latitude: 51.525452, longitude: -0.108347 }
      rating: 2.0
      url: "https://example.com/spa"
  north:
    - name: "CLISSOLD PARK"
      coordinates: { latitude: 51.5614, longitude: -0.0865 }
      rating: 3.5
      url: "https://example.com/clissold"
"#;

fn snapshot(state: &SelectionState, catalog: &Catalog) -> Vec<(u8, Vec<VenueId>)> {
    state
        .query(catalog)
        .into_iter()
        .map(|g| (g.bucket, g.venues.iter().map(|r| r.id).collect()))
        .collect()
}

fn located() -> SelectionState {
    let mut state = SelectionState::new();
    state.set_postcode_text("sw1a1aa");
    let ticket = state.begin_search();
    assert!(state.finish_search(&ticket, Ok(USER)));
    state
}

#[test]
fn toggling_area_twice_restores_selection() {
    let mut state = SelectionState::new();
    state.toggle_area(Area::North);
    assert!(state.selected_areas().contains(&Area::North));
    state.toggle_area(Area::North);
    assert!(state.selected_areas().is_empty());
}

#[test]
fn toggling_rating_adds_then_removes() {
    let mut state = SelectionState::new();
    state.toggle_rating(4);
    state.toggle_rating(2);
    assert_eq!(state.selected_ratings().iter().copied().collect::<Vec<_>>(), vec![2, 4]);
    state.toggle_rating(4);
    assert_eq!(state.selected_ratings().iter().copied().collect::<Vec<_>>(), vec![2]);
}

#[test]
fn distance_sort_requires_user_coordinate() {
    let mut state = SelectionState::new();
    assert!(!state.set_sort(SortKey::Distance));
    assert_eq!(state.sort_by(), SortKey::Rating);
    assert!(state.set_sort(SortKey::Name));
    assert_eq!(state.sort_by(), SortKey::Name);
}

#[test]
fn successful_search_switches_to_distance() {
    let mut state = SelectionState::new();
    state.set_postcode_text("sw1a1aa");
    let ticket = state.begin_search();
    assert!(state.is_searching());
    assert_eq!(ticket.postcode, "sw1a1aa");

    assert!(state.finish_search(&ticket, Ok(USER)));
    assert!(!state.is_searching());
    assert_eq!(state.user_coordinate(), Some(USER));
    assert_eq!(state.sort_by(), SortKey::Distance);
    assert!(state.last_error().is_none());
}

#[test]
fn failed_search_clears_location_and_keeps_filters() {
    let mut state = located();
    state.toggle_area(Area::Central);
    state.toggle_rating(4);

    let ticket = state.begin_search();
    assert!(state.finish_search(&ticket, Err(NOT_FOUND.to_string())));

    assert!(!state.is_searching());
    assert!(state.user_coordinate().is_none());
    assert_eq!(state.sort_by(), SortKey::Rating);
    assert_eq!(state.last_error(), Some(NOT_FOUND));
    assert!(state.selected_areas().contains(&Area::Central));
    assert!(state.selected_ratings().contains(&4));
}

#[test]
fn superseded_search_result_is_discarded() {
    let mut state = SelectionState::new();
    let first = state.begin_search();
    let second = state.begin_search();

    assert!(!state.finish_search(&first, Ok(USER)));
    assert!(state.is_searching(), "newer search still outstanding");
    assert!(state.user_coordinate().is_none());

    assert!(state.finish_search(&second, Err(NOT_FOUND.to_string())));
    assert!(!state.is_searching());
    assert_eq!(state.last_error(), Some(NOT_FOUND));
}

#[test]
fn late_completion_of_old_search_does_not_override_newer_result() {
    let mut state = SelectionState::new();
    let first = state.begin_search();
    let second = state.begin_search();

    assert!(state.finish_search(&second, Ok(USER)));
    assert!(!state.finish_search(&first, Err(NOT_FOUND.to_string())));
    assert_eq!(state.user_coordinate(), Some(USER));
    assert!(state.last_error().is_none());
}

#[test]
fn editing_postcode_dismisses_error() {
    let mut state = SelectionState::new();
    let ticket = state.begin_search();
    state.finish_search(&ticket, Err(NOT_FOUND.to_string()));
    assert!(state.last_error().is_some());

    state.set_postcode_text("N16");
    assert!(state.last_error().is_none());
    assert_eq!(state.postcode(), "N16");
}

#[test]
fn clear_filters_resets_everything_at_once() {
    let mut state = located();
    state.toggle_area(Area::North);
    state.toggle_rating(3);

    state.clear_filters();

    assert!(state.selected_areas().is_empty());
    assert!(state.selected_ratings().is_empty());
    assert!(state.user_coordinate().is_none());
    assert_eq!(state.postcode(), "");
    assert_eq!(state.sort_by(), SortKey::Rating);
    assert!(state.last_error().is_none());
}

#[test]
fn clear_filters_matches_pristine_query() {
    let catalog = parse_catalog(CATALOG).unwrap();
    let pristine = snapshot(&SelectionState::new(), &catalog);

    let mut state = located();
    state.toggle_area(Area::Central);
    state.toggle_rating(2);
    state.clear_filters();

    assert_eq!(snapshot(&state, &catalog), pristine);
}

#[test]
fn clear_filters_invalidates_in_flight_search() {
    let mut state = SelectionState::new();
    let ticket = state.begin_search();
    state.clear_filters();

    assert!(!state.is_searching());
    assert!(!state.finish_search(&ticket, Ok(USER)));
    assert!(state.user_coordinate().is_none());
}

#[test]
fn buckets_default_to_expanded() {
    let mut state = SelectionState::new();
    assert!(state.is_bucket_expanded(4));
    state.toggle_bucket(4);
    assert!(!state.is_bucket_expanded(4));
    assert!(state.is_bucket_expanded(3));
    state.toggle_bucket(4);
    assert!(state.is_bucket_expanded(4));
}

#[test]
fn query_restricts_to_selected_areas() {
    let catalog = parse_catalog(CATALOG).unwrap();
    let mut state = SelectionState::new();
    state.toggle_area(Area::North);

    let groups = state.query(&catalog);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].bucket, 3);
    assert_eq!(groups[0].venues[0].venue.name, "CLISSOLD PARK");
}

#[test]
fn query_in_distance_mode_orders_by_proximity() {
    let catalog = parse_catalog(CATALOG).unwrap();
    let state = located();

    let groups = state.query(&catalog);
    assert_eq!(groups.len(), 1);
    let names: Vec<&str> = groups[0].venues.iter().map(|r| r.venue.name.as_str()).collect();
    assert_eq!(names, vec!["TGO OUTDOOR GYM", "SPA FIELDS", "CLISSOLD PARK"]);
}

#[test]
fn view_mode_toggles_between_list_and_map() {
    let mut state = SelectionState::new();
    assert_eq!(state.view_mode(), ViewMode::List);
    state.set_view_mode(ViewMode::Map);
    assert_eq!(state.view_mode(), ViewMode::Map);
}

#[test]
fn abandoning_latest_search_clears_flag_only() {
    let mut state = located();
    let ticket = state.begin_search();
    assert!(state.is_searching());

    assert!(state.abandon_search(&ticket));
    assert!(!state.is_searching());
    assert_eq!(state.user_coordinate(), Some(USER));
    assert_eq!(state.sort_by(), SortKey::Distance);
    assert!(state.last_error().is_none());
    assert!(!state.abandon_search(&ticket), "already settled");
}

#[test]
fn abandoning_superseded_search_leaves_newer_one_in_flight() {
    let mut state = SelectionState::new();
    let first = state.begin_search();
    let _second = state.begin_search();

    assert!(!state.abandon_search(&first));
    assert!(state.is_searching());
}
