//! Mock implementations for testing
//!
//! Canned [`ResultSource`](crate::core::client::ResultSource) behaviour built
//! on the mockall automock of that trait.

use std::collections::HashMap;

use crate::core::client::MockResultSource;
use crate::core::error::SearchError;
use crate::core::models::ResultPage;

/// A source serving `pages` back to back: the page starting at offset N
/// answers the request with offset N. Offsets past the end get an empty page.
pub fn paged_source(pages: Vec<ResultPage>) -> MockResultSource {
    let mut by_offset = HashMap::new();
    let mut offset = 0;
    for page in pages {
        let len = page.cocktails.len();
        by_offset.insert(offset, page);
        offset += len;
    }

    let mut source = MockResultSource::new();
    source.expect_fetch_page().returning(move |request| {
        Ok(by_offset
            .get(&request.offset())
            .cloned()
            .unwrap_or_default())
    });
    source
}

/// A source whose every request fails with `status`.
pub fn failing_source(status: u16) -> MockResultSource {
    let mut source = MockResultSource::new();
    source
        .expect_fetch_page()
        .returning(move |_| Err(SearchError::api(status, "unavailable")));
    source
}
