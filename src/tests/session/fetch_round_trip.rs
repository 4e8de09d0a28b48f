//! Fetch Round Trip Tests
//!
//! Requests leave the session, run on spawned tasks against a mocked source
//! and come back as outcomes over a channel, the way the terminal host runs
//! them.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::core::client::{spawn_fetch, FetchOutcome, ResultSource};
use crate::core::collection::{CollectionEvent, FetchRequest};
use crate::core::history::MemoryHistory;
use crate::core::prefetch::Geometry;
use crate::core::session::SearchSession;
use crate::tests::common::{page, session_at};
use crate::tests::mocks::{failing_source, paged_source};

async fn run(
    session: &mut SearchSession<MemoryHistory>,
    source: &Arc<dyn ResultSource>,
    request: FetchRequest,
) -> bool {
    let (tx, mut rx) = mpsc::unbounded_channel::<FetchOutcome>();
    spawn_fetch(Arc::clone(source), request, tx);
    let outcome = rx.recv().await.expect("outcome delivered");
    session.on_fetch_complete(&outcome.request, outcome.result)
}

#[tokio::test]
async fn test_full_listing_through_spawned_fetches() {
    let source: Arc<dyn ResultSource> = Arc::new(paged_source(vec![
        page(0, 20, Some("7")),
        page(20, 20, Some("8")),
    ]));
    let mut session = session_at("#gin");
    let mut events = session.subscribe();

    let first = session.start();
    assert!(run(&mut session, &source, first).await);

    let mut loaded = session.collection().len();
    while let Some(request) =
        session.on_scroll(&Geometry::stacked(&vec![5; loaded], loaded * 5, 20))
    {
        assert!(run(&mut session, &source, request).await);
        loaded = session.collection().len();
    }

    assert_eq!(session.collection().len(), 40);
    assert!(!session.collection().can_load_more());

    let mut appended = 0;
    while let Ok(event) = events.try_recv() {
        if let CollectionEvent::ItemsAppended { start, items, .. } = event {
            assert_eq!(start, 20);
            appended += items.len();
        }
    }
    assert_eq!(appended, 20);
}

#[tokio::test]
async fn test_failing_source_leaves_session_usable() {
    let source: Arc<dyn ResultSource> = Arc::new(failing_source(503));
    let mut session = session_at("#gin");

    let first = session.start();
    assert!(!run(&mut session, &source, first).await);
    assert!(!session.collection().is_pending());
    assert!(session.collection().can_load_more());
}
