//! Test Fixtures
//!
//! Builders for cocktails, result pages and sessions.

use crate::core::collection::FetchRequest;
use crate::core::history::MemoryHistory;
use crate::core::ingredients::SearchState;
use crate::core::models::{Cocktail, IndexCursor, Recipe, ResultPage};
use crate::core::session::{SearchSession, SessionConfig};

// =============================================================================
// Model Fixtures
// =============================================================================

pub fn recipe(title: &str, source: &str, ingredients: &[&str]) -> Recipe {
    Recipe {
        title: title.to_string(),
        picture: None,
        url: format!("http://example.com/{}", title.to_lowercase().replace(' ', "-")),
        source: source.to_string(),
        ingredients: ingredients.iter().map(|i| i.to_string()).collect(),
    }
}

/// A cocktail with a single recipe from "Drinkboy".
pub fn cocktail(name: &str) -> Cocktail {
    Cocktail {
        id: name.to_lowercase(),
        recipes: vec![recipe(name, "Drinkboy", &["4 cl gin", "2 cl lime juice"])],
    }
}

/// `count` numbered cocktails starting at `start`, with an optional cursor.
pub fn page(start: usize, count: usize, cursor: Option<&str>) -> ResultPage {
    ResultPage {
        cocktails: (start..start + count)
            .map(|n| cocktail(&format!("Cocktail {n}")))
            .collect(),
        index_updated: cursor.map(IndexCursor::new),
    }
}

pub fn empty_page() -> ResultPage {
    ResultPage::default()
}

// =============================================================================
// Session Fixtures
// =============================================================================

/// A session whose history starts at `fragment` (blank for the home page).
pub fn session_at(fragment: &str) -> SearchSession<MemoryHistory> {
    SearchSession::new(
        MemoryHistory::new(SearchState::from_address(fragment)),
        SessionConfig::default(),
    )
}

/// History entries as plain strings, oldest first.
pub fn history_entries(session: &SearchSession<MemoryHistory>) -> Vec<String> {
    session
        .history()
        .entries()
        .iter()
        .map(|state| state.as_str().to_string())
        .collect()
}

/// The query string a request would be sent with.
pub fn query_of(request: &FetchRequest) -> String {
    let endpoint = url::Url::parse("http://localhost:8000/search-results")
        .expect("static endpoint parses");
    request.url(&endpoint).query().unwrap_or_default().to_string()
}
