//! Pagination Tests
//!
//! Scroll-driven loading through the session: cursor pinning, end of
//! results, stale responses and failures.

use crate::core::collection::FetchMode;
use crate::core::error::SearchError;
use crate::core::history::NavigationHistory;
use crate::core::prefetch::Geometry;
use crate::core::presenter::RecipeSelection;
use crate::tests::common::{cocktail, empty_page, page, query_of, recipe, session_at};

const CARD_ROWS: usize = 6;
const VIEWPORT: usize = 30;

/// Geometry of `count` equal cards scrolled all the way down.
fn scrolled_to_bottom(count: usize) -> Geometry {
    let heights = vec![CARD_ROWS; count];
    let total = count * CARD_ROWS;
    Geometry::stacked(&heights, total.saturating_sub(VIEWPORT), VIEWPORT)
}

fn at_top(count: usize) -> Geometry {
    Geometry::stacked(&vec![CARD_ROWS; count], 0, VIEWPORT)
}

// =============================================================================
// Incremental Loading
// =============================================================================

#[test]
fn test_pages_of_20_20_0() {
    let mut session = session_at("#gin");
    let first = session.start();
    assert!(session.on_fetch_complete(&first, Ok(page(0, 20, Some("42")))));
    assert_eq!(session.collection().len(), 20);

    // Not far enough down yet
    assert!(session.on_scroll(&at_top(20)).is_none());

    let second = session
        .on_scroll(&scrolled_to_bottom(20))
        .expect("second page requested");
    assert_eq!(second.mode(), FetchMode::Append);
    assert_eq!(query_of(&second), "ingredient=gin&index_updated=42&offset=20");

    // One request at a time
    assert!(session.on_scroll(&scrolled_to_bottom(20)).is_none());

    assert!(session.on_fetch_complete(&second, Ok(page(20, 20, Some("43")))));
    assert_eq!(session.collection().len(), 40);
    assert_eq!(session.collection().cursor().unwrap().as_str(), "42");

    let third = session
        .on_scroll(&scrolled_to_bottom(40))
        .expect("third page requested");
    assert_eq!(query_of(&third), "ingredient=gin&index_updated=42&offset=40");

    assert!(session.on_fetch_complete(&third, Ok(empty_page())));
    assert_eq!(session.collection().len(), 40);
    assert!(!session.collection().can_load_more());

    // Exhausted: scrolling issues nothing
    assert!(session.on_scroll(&scrolled_to_bottom(40)).is_none());
}

#[test]
fn test_after_render_can_trigger_prefetch() {
    let mut session = session_at("#gin");
    let first = session.start();
    session.on_fetch_complete(&first, Ok(page(0, 6, None)));

    // Six short cards all fit: the lookback item is already visible.
    let geometry = Geometry::stacked(&[CARD_ROWS; 6], 0, 60);
    let request = session.after_render(&geometry).expect("prefetch");
    assert_eq!(request.offset(), 6);
    assert!(request.cursor().is_none());
}

#[test]
fn test_fewer_items_than_lookback_never_prefetch() {
    let mut session = session_at("#gin");
    let first = session.start();
    session.on_fetch_complete(&first, Ok(page(0, 3, None)));

    assert!(session
        .on_scroll(&Geometry::stacked(&[CARD_ROWS; 3], 0, 100))
        .is_none());
}

// =============================================================================
// Query Changes
// =============================================================================

#[test]
fn test_query_change_discards_in_flight_page() {
    let mut session = session_at("#gin");
    let first = session.start();
    session.on_fetch_complete(&first, Ok(page(0, 20, Some("42"))));
    let second = session.on_scroll(&scrolled_to_bottom(20)).unwrap();

    // The user types while page two is in flight.
    let spare = session.fields().fields().last().unwrap().id();
    let fresh = session
        .on_field_input(spare, "lime")
        .expect("query changed");
    assert!(session.collection().is_empty());
    assert!(fresh.cursor().is_none());
    assert_eq!(query_of(&fresh), "ingredient=gin&ingredient=lime");

    // Page two arrives late and is dropped.
    assert!(!session.on_fetch_complete(&second, Ok(page(20, 20, Some("42")))));
    assert!(session.collection().is_empty());
    assert!(session.collection().is_pending());

    assert!(session.on_fetch_complete(&fresh, Ok(page(0, 5, Some("50")))));
    assert_eq!(session.collection().len(), 5);
    assert_eq!(session.collection().cursor().unwrap().as_str(), "50");
}

#[test]
fn test_navigation_resets_pagination() {
    let mut session = session_at("#gin");
    let first = session.start();
    session.on_fetch_complete(&first, Ok(page(0, 20, Some("42"))));
    let second = session.on_scroll(&scrolled_to_bottom(20)).unwrap();
    session.on_fetch_complete(&second, Ok(empty_page()));
    assert!(!session.collection().can_load_more());

    session
        .history_mut()
        .push(crate::core::ingredients::SearchState::from_address("#vodka"));
    let request = session.on_navigate();
    assert!(session.collection().can_load_more());
    assert_eq!(request.offset(), 0);
    assert_eq!(query_of(&request), "ingredient=vodka");
}

// =============================================================================
// Failures
// =============================================================================

#[test]
fn test_failed_page_can_be_retried_by_scrolling() {
    let mut session = session_at("#gin");
    let first = session.start();
    session.on_fetch_complete(&first, Ok(page(0, 20, Some("42"))));

    let second = session.on_scroll(&scrolled_to_bottom(20)).unwrap();
    assert!(!session.on_fetch_complete(&second, Err(SearchError::api(502, "bad gateway"))));
    assert!(!session.collection().is_pending());
    assert!(session.collection().can_load_more());
    assert_eq!(session.collection().len(), 20);

    let retry = session.on_scroll(&scrolled_to_bottom(20)).expect("retry");
    assert_eq!(retry.offset(), 20);
}

#[test]
fn test_failed_first_page_leaves_empty_collection() {
    let mut session = session_at("#gin");
    let first = session.start();
    session.on_fetch_complete(&first, Err(SearchError::api(500, "boom")));

    assert!(session.collection().is_empty());
    assert!(!session.collection().is_pending());
}

// =============================================================================
// Recipe Switching
// =============================================================================

#[test]
fn test_switching_recipes_never_fetches() {
    let mut session = session_at("#gin");
    let first = session.start();

    let mut negroni = cocktail("Negroni");
    negroni
        .recipes
        .push(recipe("Negroni", "Monkey 47 Blog", &["3 cl gin", "3 cl Campari"]));
    let mut results = page(0, 0, None);
    results.cocktails.push(negroni);
    session.on_fetch_complete(&first, Ok(results));

    let generation = session.collection().generation();
    let selection = RecipeSelection::new("Monkey 47 Blog", 0);
    assert!(session.switch_recipe(0, selection.clone()));
    assert!(!session.switch_recipe(0, selection.clone()));

    assert_eq!(session.collection().generation(), generation);
    assert!(!session.collection().is_pending());
    assert_eq!(session.card(0).unwrap().source, "Monkey 47 Blog");

    // A new query forgets per-result selections.
    let spare = session.fields().fields().last().unwrap().id();
    session.on_field_input(spare, "lime");
    assert_eq!(session.selection(0), RecipeSelection::default());
}
