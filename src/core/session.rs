//! The search session: one owner for every piece of mutable search state.
//!
//! All host callbacks (field input, blur, scroll, pointer press, back/forward,
//! fetch completion) go through [`SearchSession`]. Calls that may start a
//! network request return the [`FetchRequest`]; running it is the host's job.

use std::collections::HashMap;

use crate::config::AppConfig;

use super::collection::{CollectionEvent, FetchMode, FetchRequest, ResultCollection};
use super::error::Result;
use super::fields::{FieldId, FieldSet};
use super::history::{HistorySync, HistoryTransition, NavigationHistory, SyncMode};
use super::ingredients::{encode, IngredientList};
use super::models::ResultPage;
use super::prefetch::{Geometry, ScrollPrefetcher, DEFAULT_LOOKBACK};
use super::presenter::{present, CocktailCard, RecipeSelection};

/// Knobs for a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Title shown when no ingredient is entered.
    pub title: String,
    /// See [`ScrollPrefetcher`].
    pub prefetch_lookback: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            title: "Cocktail search".to_string(),
            prefetch_lookback: DEFAULT_LOOKBACK,
        }
    }
}

impl From<&AppConfig> for SessionConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            title: config.tui.title.clone(),
            prefetch_lookback: config.search.prefetch_lookback,
        }
    }
}

/// Format the page title for an ingredient list.
pub fn format_title(base: &str, ingredients: &IngredientList) -> String {
    if ingredients.is_empty() {
        base.to_string()
    } else {
        format!("{base}: {}", ingredients.join(", "))
    }
}

pub struct SearchSession<H: NavigationHistory> {
    history: H,
    sync: HistorySync,
    fields: FieldSet,
    ingredients: IngredientList,
    collection: ResultCollection,
    prefetcher: ScrollPrefetcher,
    /// Per-result recipe choice, keyed by position in the collection.
    selections: HashMap<usize, RecipeSelection>,
    base_title: String,
}

impl<H: NavigationHistory> SearchSession<H> {
    pub fn new(history: H, config: SessionConfig) -> Self {
        Self {
            history,
            sync: HistorySync::new(),
            fields: FieldSet::new(),
            ingredients: IngredientList::new(),
            collection: ResultCollection::new(),
            prefetcher: ScrollPrefetcher::new(config.prefetch_lookback),
            selections: HashMap::new(),
            base_title: config.title,
        }
    }

    // ── Accessors ───────────────────────────────────────────────────────

    pub fn history(&self) -> &H {
        &self.history
    }

    /// Mutable access for host navigation. Follow a move with
    /// [`SearchSession::on_navigate`].
    pub fn history_mut(&mut self) -> &mut H {
        &mut self.history
    }

    pub fn fields(&self) -> &FieldSet {
        &self.fields
    }

    pub fn ingredients(&self) -> &IngredientList {
        &self.ingredients
    }

    pub fn collection(&self) -> &ResultCollection {
        &self.collection
    }

    pub fn sync_mode(&self) -> SyncMode {
        self.sync.mode()
    }

    pub fn subscribe(&mut self) -> tokio::sync::mpsc::UnboundedReceiver<CollectionEvent> {
        self.collection.subscribe()
    }

    pub fn title(&self) -> String {
        format_title(&self.base_title, &self.ingredients)
    }

    // ── Lifecycle ───────────────────────────────────────────────────────

    /// Initial load: adopt the history's current entry.
    pub fn start(&mut self) -> FetchRequest {
        self.on_navigate()
    }

    /// Back/forward happened (or the page loaded): rebuild everything from
    /// the history's current entry and start a fresh query.
    pub fn on_navigate(&mut self) -> FetchRequest {
        let ingredients = self.sync.restore(&self.history);
        log::info!(
            "Navigated to {} ({} ingredient(s))",
            self.sync.current(),
            ingredients.len()
        );
        self.fields.populate_from_state(&ingredients);
        self.begin_query(ingredients)
    }

    // ── Field events ────────────────────────────────────────────────────

    /// A field's text changed. Returns a request when the query changed.
    pub fn on_field_input(
        &mut self,
        id: FieldId,
        value: impl Into<String>,
    ) -> Option<FetchRequest> {
        let derived = self.fields.on_field_input(id, value);
        let next = encode(&derived.ingredients);

        match self.sync.record(&mut self.history, next)? {
            HistoryTransition::Pushed => log::debug!("New search step"),
            HistoryTransition::Replaced => log::trace!("Search step updated"),
        }
        Some(self.begin_query(derived.ingredients))
    }

    pub fn on_field_blur(&mut self, id: FieldId) {
        self.fields.on_field_blur(id);
    }

    /// Move field focus (blurring the previous field). Returns the focused id.
    pub fn focus(&mut self, id: FieldId) -> Option<FieldId> {
        self.fields.focus(id)
    }

    pub fn focus_next(&mut self) -> Option<FieldId> {
        self.fields.focus_next()
    }

    pub fn focus_prev(&mut self) -> Option<FieldId> {
        self.fields.focus_prev()
    }

    // ── Viewport events ─────────────────────────────────────────────────

    /// The results were scrolled: ends the current edit and may prefetch.
    pub fn on_scroll(&mut self, geometry: &Geometry) -> Option<FetchRequest> {
        self.sync.settle();
        self.load_more_if_possible(geometry)
    }

    /// A pointer press anywhere on the results ends the current edit.
    pub fn on_pointer_press(&mut self) {
        self.sync.settle();
    }

    /// Layout changed height (items appended, recipe switched): geometry that
    /// did not trigger before may trigger now.
    pub fn after_render(&mut self, geometry: &Geometry) -> Option<FetchRequest> {
        self.load_more_if_possible(geometry)
    }

    fn load_more_if_possible(&mut self, geometry: &Geometry) -> Option<FetchRequest> {
        if !self.collection.can_load_more() || self.collection.is_pending() {
            return None;
        }
        if !self.prefetcher.should_load_more_in(geometry) {
            return None;
        }
        let request = self.collection.load_more()?;
        log::debug!("Prefetching page at offset {}", request.offset());
        Some(request)
    }

    // ── Network events ──────────────────────────────────────────────────

    /// Feed back the outcome of a request. Returns whether it changed the
    /// collection (stale outcomes never do).
    pub fn on_fetch_complete(
        &mut self,
        request: &FetchRequest,
        result: Result<ResultPage>,
    ) -> bool {
        match result {
            Ok(page) => self.collection.on_fetch_success(request, page),
            Err(e) => {
                if self.collection.on_fetch_failure(request) {
                    log::warn!(
                        "{} fetch failed (retriable: {}): {e}",
                        match request.mode() {
                            FetchMode::Reset => "Search",
                            FetchMode::Append => "Next page",
                        },
                        e.is_retriable()
                    );
                }
                false
            }
        }
    }

    // ── Presentation ────────────────────────────────────────────────────

    pub fn selection(&self, position: usize) -> RecipeSelection {
        self.selections.get(&position).cloned().unwrap_or_default()
    }

    pub fn card(&self, position: usize) -> Option<CocktailCard<'_>> {
        let cocktail = self.collection.get(position)?;
        present(cocktail, &self.selection(position))
    }

    /// Record a recipe switch for one result. Returns whether that result
    /// must be redrawn. Never touches the collection or the network.
    pub fn switch_recipe(&mut self, position: usize, selection: RecipeSelection) -> bool {
        if position >= self.collection.len() {
            return false;
        }
        let changed = self.selection(position) != selection;
        if changed {
            self.selections.insert(position, selection);
        }
        changed
    }

    fn begin_query(&mut self, ingredients: IngredientList) -> FetchRequest {
        self.ingredients = ingredients;
        self.selections.clear();
        self.collection.reset(self.ingredients.clone())
    }
}
