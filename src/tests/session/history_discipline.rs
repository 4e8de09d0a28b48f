//! History Discipline Tests
//!
//! One burst of typing is one history entry; scrolling or clicking ends the
//! burst; back/forward rebuild the fields and restart the query.

use crate::core::prefetch::Geometry;
use crate::core::session::SearchSession;
use crate::core::history::{MemoryHistory, NavigationHistory, SyncMode};
use crate::core::ingredients::SearchState;
use crate::tests::common::{history_entries, query_of, session_at};

/// Type `text` into the focused field one keystroke at a time.
fn type_into_focused(session: &mut SearchSession<MemoryHistory>, text: &str) {
    let id = session.fields().focused().expect("a field is focused");
    let mut value = session
        .fields()
        .get(id)
        .map(|field| field.value().to_string())
        .unwrap_or_default();
    for c in text.chars() {
        value.push(c);
        session.on_field_input(id, value.clone());
    }
}

/// Move focus to the trailing spare field.
fn focus_spare(session: &mut SearchSession<MemoryHistory>) {
    let spare = session.fields().fields().last().map(|field| field.id());
    session.focus(spare.expect("there is always a spare"));
}

// =============================================================================
// Push vs Replace
// =============================================================================

#[test]
fn test_edit_burst_is_one_entry_and_back_restores() {
    let mut session = session_at("");
    session.start();

    // E1: typing "gin" in the first field
    type_into_focused(&mut session, "gin");
    assert_eq!(history_entries(&session), vec![".", "#gin"]);
    assert_eq!(session.sync_mode(), SyncMode::Volatile);

    // E2: a scroll ends the burst
    session.on_scroll(&Geometry::default());
    assert_eq!(session.sync_mode(), SyncMode::Settled);

    // E3: typing "lime" in the spare pushes a new entry
    focus_spare(&mut session);
    type_into_focused(&mut session, "lime");
    assert_eq!(history_entries(&session), vec![".", "#gin", "#gin;lime"]);

    // Back: one field per ingredient plus a spare, and a fresh query
    assert!(session.history_mut().back());
    let request = session.on_navigate();
    let values: Vec<&str> = session.fields().values().collect();
    assert_eq!(values, vec!["gin", ""]);
    assert_eq!(query_of(&request), "ingredient=gin");
    assert_eq!(session.title(), "Cocktail search: gin");
}

#[test]
fn test_pointer_press_ends_the_burst() {
    let mut session = session_at("");
    session.start();

    type_into_focused(&mut session, "rum");
    session.on_pointer_press();
    type_into_focused(&mut session, "s");

    assert_eq!(history_entries(&session), vec![".", "#rum", "#rums"]);
}

#[test]
fn test_typing_after_navigation_pushes() {
    let mut session = session_at("#gin");
    session.start();

    type_into_focused(&mut session, "lime");
    assert_eq!(history_entries(&session), vec!["#gin", "#gin;lime"]);
}

#[test]
fn test_clearing_the_only_ingredient_returns_to_root() {
    let mut session = session_at("");
    session.start();

    let id = session.fields().focused().unwrap();
    session.on_field_input(id, "g");
    let request = session.on_field_input(id, "").expect("query changed");

    assert!(session.history().current().is_root());
    assert!(request.ingredients().is_empty());
    assert_eq!(session.title(), "Cocktail search");
}

#[test]
fn test_forward_after_back() {
    let mut session = session_at("");
    session.start();
    type_into_focused(&mut session, "gin");

    assert!(session.history_mut().back());
    session.on_navigate();
    assert!(session.ingredients().is_empty());

    assert!(session.history_mut().forward());
    session.on_navigate();
    assert_eq!(session.ingredients().as_slice(), &["gin".to_string()]);
}

#[test]
fn test_new_edit_after_back_drops_forward_entries() {
    let mut session = session_at("");
    session.start();
    type_into_focused(&mut session, "gin");
    session.on_pointer_press();
    focus_spare(&mut session);
    type_into_focused(&mut session, "lime");

    session.history_mut().back();
    session.on_navigate();
    focus_spare(&mut session);
    type_into_focused(&mut session, "mint");

    assert_eq!(history_entries(&session), vec![".", "#gin", "#gin;mint"]);
    assert!(!session.history().can_go_forward());
}

// =============================================================================
// Address Handling
// =============================================================================

#[test]
fn test_switching_address_issues_new_query() {
    let mut session = session_at("#gin;lime");
    let first = session.start();
    assert_eq!(query_of(&first), "ingredient=gin&ingredient=lime");

    session.history_mut().push(SearchState::from_address("#vodka"));
    let request = session.on_navigate();
    assert_eq!(query_of(&request), "ingredient=vodka");
    assert!(request.cursor().is_none());
}

#[test]
fn test_escaped_ingredients_survive_the_address() {
    let mut session = session_at("");
    session.start();
    type_into_focused(&mut session, "rum; dark");

    let current = session.history().current();
    assert_eq!(current.as_str(), "#rum%3B%20dark");
    assert_eq!(current.ingredients().as_slice(), &["rum; dark".to_string()]);
}

#[test]
fn test_malformed_address_degrades() {
    let mut session = session_at("#%FF;;gin");
    let request = session.start();

    assert_eq!(
        request.ingredients().as_slice(),
        &["%FF".to_string(), "gin".to_string()]
    );
}

#[test]
fn test_root_query_fetches_without_parameters() {
    let mut session = session_at(".");
    let request = session.start();
    assert!(request.ingredients().is_empty());
    assert_eq!(query_of(&request), "");
}
