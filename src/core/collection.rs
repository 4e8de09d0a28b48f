//! Paginated result collection for the current ingredient list.
//!
//! The collection never talks to the network itself. It hands out
//! [`FetchRequest`]s and is told how they ended. Every new query bumps a
//! generation counter; responses carrying an older generation are stale and
//! dropped on arrival, which is all the cancellation there is.

use tokio::sync::mpsc;
use url::Url;

use super::ingredients::IngredientList;
use super::models::{Cocktail, IndexCursor, ResultPage};

/// Query parameter carrying one ingredient (repeated, in list order).
pub const INGREDIENT_PARAM: &str = "ingredient";
/// Query parameter carrying the freshness cursor.
pub const CURSOR_PARAM: &str = "index_updated";
/// Query parameter carrying the number of items already loaded.
pub const OFFSET_PARAM: &str = "offset";

/// Build the fetch target for a page of results.
///
/// Ingredients come first in list order, then the cursor when known, then the
/// offset for continuation pages.
pub fn query_url(
    endpoint: &Url,
    ingredients: &[String],
    cursor: Option<&IndexCursor>,
    offset: Option<usize>,
) -> Url {
    let mut params: Vec<(&str, String)> = ingredients
        .iter()
        .map(|ingredient| (INGREDIENT_PARAM, ingredient.clone()))
        .collect();

    if let Some(cursor) = cursor {
        params.push((CURSOR_PARAM, cursor.as_str().to_string()));
    }
    if let Some(offset) = offset {
        params.push((OFFSET_PARAM, offset.to_string()));
    }

    let mut url = endpoint.clone();
    url.set_query(None);
    if !params.is_empty() {
        url.query_pairs_mut().extend_pairs(params);
    }
    url
}

// ── Requests ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    /// First page of a new query: replaces the stored items.
    Reset,
    /// Continuation page: appended to the stored items.
    Append,
}

/// A page request handed out by the collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    generation: u64,
    mode: FetchMode,
    ingredients: IngredientList,
    cursor: Option<IndexCursor>,
    offset: usize,
}

impl FetchRequest {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn mode(&self) -> FetchMode {
        self.mode
    }

    pub fn ingredients(&self) -> &IngredientList {
        &self.ingredients
    }

    pub fn cursor(&self) -> Option<&IndexCursor> {
        self.cursor.as_ref()
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The URL this request resolves to against `endpoint`.
    pub fn url(&self, endpoint: &Url) -> Url {
        let offset = match self.mode {
            FetchMode::Reset => None,
            FetchMode::Append => Some(self.offset),
        };
        query_url(endpoint, &self.ingredients, self.cursor.as_ref(), offset)
    }
}

// ── Events ───────────────────────────────────────────────────────────────────

/// Change notifications for whoever draws the collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionEvent {
    /// The whole sequence was replaced (empty when a new query starts).
    ItemsReset { generation: u64, items: Vec<Cocktail> },
    /// Items were added at position `start`.
    ItemsAppended {
        generation: u64,
        start: usize,
        items: Vec<Cocktail>,
    },
}

// ── Collection ───────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct ResultCollection {
    ingredients: IngredientList,
    items: Vec<Cocktail>,
    cursor: Option<IndexCursor>,
    can_load_more: bool,
    pending: bool,
    generation: u64,
    subscribers: Vec<mpsc::UnboundedSender<CollectionEvent>>,
}

impl ResultCollection {
    pub fn new() -> Self {
        Self {
            ingredients: IngredientList::new(),
            items: Vec::new(),
            cursor: None,
            can_load_more: true,
            pending: false,
            generation: 0,
            subscribers: Vec::new(),
        }
    }

    pub fn ingredients(&self) -> &IngredientList {
        &self.ingredients
    }

    pub fn items(&self) -> &[Cocktail] {
        &self.items
    }

    pub fn get(&self, position: usize) -> Option<&Cocktail> {
        self.items.get(position)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn cursor(&self) -> Option<&IndexCursor> {
        self.cursor.as_ref()
    }

    pub fn can_load_more(&self) -> bool {
        self.can_load_more
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Register an observer. Dropped receivers are pruned on the next emit.
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<CollectionEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.push(tx);
        rx
    }

    /// Start a new query. Anything in flight for the previous one becomes stale.
    pub fn reset(&mut self, ingredients: IngredientList) -> FetchRequest {
        self.generation += 1;
        self.ingredients = ingredients;
        self.items.clear();
        self.cursor = None;
        self.can_load_more = true;
        self.pending = true;

        self.emit(CollectionEvent::ItemsReset {
            generation: self.generation,
            items: Vec::new(),
        });

        FetchRequest {
            generation: self.generation,
            mode: FetchMode::Reset,
            ingredients: self.ingredients.clone(),
            cursor: None,
            offset: 0,
        }
    }

    /// Request the next page, unless the end was reached or a request is
    /// already outstanding.
    pub fn load_more(&mut self) -> Option<FetchRequest> {
        if !self.can_load_more || self.pending {
            return None;
        }
        self.pending = true;

        Some(FetchRequest {
            generation: self.generation,
            mode: FetchMode::Append,
            ingredients: self.ingredients.clone(),
            cursor: self.cursor.clone(),
            offset: self.items.len(),
        })
    }

    /// Apply a page. Returns false when the response was stale and dropped.
    pub fn on_fetch_success(&mut self, request: &FetchRequest, page: ResultPage) -> bool {
        if request.generation != self.generation {
            log::debug!(
                "Discarding stale page (generation {} < {})",
                request.generation,
                self.generation
            );
            return false;
        }

        self.pending = false;
        if page.cocktails.is_empty() {
            self.can_load_more = false;
        }

        match request.mode {
            FetchMode::Reset => {
                self.items = page.cocktails;
                self.cursor = page.index_updated;
                log::debug!(
                    "Loaded {} result(s) for {:?}",
                    self.items.len(),
                    self.ingredients.as_slice()
                );
                self.emit(CollectionEvent::ItemsReset {
                    generation: self.generation,
                    items: self.items.clone(),
                });
            }
            FetchMode::Append => {
                let start = self.items.len();
                if self.cursor.is_none() {
                    self.cursor = page.index_updated;
                }
                log::debug!("Appended {} result(s) at offset {start}", page.cocktails.len());
                if !page.cocktails.is_empty() {
                    self.emit(CollectionEvent::ItemsAppended {
                        generation: self.generation,
                        start,
                        items: page.cocktails.clone(),
                    });
                }
                self.items.extend(page.cocktails);
            }
        }

        true
    }

    /// A request failed. Clears the pending flag so a later scroll or edit
    /// can try again; `can_load_more` is left as it was.
    pub fn on_fetch_failure(&mut self, request: &FetchRequest) -> bool {
        if request.generation != self.generation {
            return false;
        }
        self.pending = false;
        true
    }

    fn emit(&mut self, event: CollectionEvent) {
        self.subscribers
            .retain(|subscriber| subscriber.send(event.clone()).is_ok());
    }
}

impl Default for ResultCollection {
    fn default() -> Self {
        Self::new()
    }
}
