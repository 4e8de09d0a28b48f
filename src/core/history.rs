//! Search state ↔ navigation history synchronization.
//!
//! Edits made in one uninterrupted burst collapse into a single history entry:
//! the first change after a boundary (scroll, pointer press, navigation)
//! pushes, every following change replaces. Back/forward restores whatever the
//! history holds.

use super::ingredients::{IngredientList, SearchState};

// ── History seam ─────────────────────────────────────────────────────────────

/// Host navigation history (the browser's session history, or an in-memory
/// stand-in).
pub trait NavigationHistory {
    /// State of the entry the host currently shows.
    fn current(&self) -> SearchState;
    /// Add a new entry after the current one, dropping any forward entries.
    fn push(&mut self, state: SearchState);
    /// Overwrite the current entry.
    fn replace(&mut self, state: SearchState);
}

/// In-process history stack with browser semantics.
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    entries: Vec<SearchState>,
    index: usize,
}

impl MemoryHistory {
    pub fn new(initial: SearchState) -> Self {
        Self {
            entries: vec![initial],
            index: 0,
        }
    }

    /// Step back one entry. Returns false at the oldest entry.
    pub fn back(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        true
    }

    /// Step forward one entry. Returns false at the newest entry.
    pub fn forward(&mut self) -> bool {
        if self.index + 1 >= self.entries.len() {
            return false;
        }
        self.index += 1;
        true
    }

    pub fn can_go_back(&self) -> bool {
        self.index > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[SearchState] {
        &self.entries
    }

    pub fn position(&self) -> usize {
        self.index
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new(SearchState::root())
    }
}

impl NavigationHistory for MemoryHistory {
    fn current(&self) -> SearchState {
        self.entries[self.index].clone()
    }

    fn push(&mut self, state: SearchState) {
        self.entries.truncate(self.index + 1);
        self.entries.push(state);
        self.index = self.entries.len() - 1;
    }

    fn replace(&mut self, state: SearchState) {
        self.entries[self.index] = state;
    }
}

// ── Sync state machine ───────────────────────────────────────────────────────

/// Whether the next state change extends the current entry or starts a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMode {
    /// Mid-edit: the last transition was a replace (or a push that started the edit).
    Volatile,
    /// At a boundary: the next change pushes.
    Settled,
}

/// What [`HistorySync::record`] did to the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryTransition {
    Pushed,
    Replaced,
}

#[derive(Debug, Clone)]
pub struct HistorySync {
    current: SearchState,
    mode: SyncMode,
}

impl HistorySync {
    pub fn new() -> Self {
        Self {
            current: SearchState::root(),
            mode: SyncMode::Settled,
        }
    }

    pub fn current(&self) -> &SearchState {
        &self.current
    }

    pub fn mode(&self) -> SyncMode {
        self.mode
    }

    pub fn is_volatile(&self) -> bool {
        self.mode == SyncMode::Volatile
    }

    /// Record a newly derived state. Returns `None` when it equals the
    /// current one; history is left alone in that case.
    pub fn record<H>(&mut self, history: &mut H, next: SearchState) -> Option<HistoryTransition>
    where
        H: NavigationHistory + ?Sized,
    {
        if next == self.current {
            return None;
        }

        let transition = match self.mode {
            SyncMode::Volatile => {
                history.replace(next.clone());
                HistoryTransition::Replaced
            }
            SyncMode::Settled => {
                history.push(next.clone());
                HistoryTransition::Pushed
            }
        };

        log::debug!("History {transition:?}: {} -> {next}", self.current);

        self.current = next;
        self.mode = SyncMode::Volatile;
        Some(transition)
    }

    /// Mark an edit boundary (scroll, pointer press).
    pub fn settle(&mut self) {
        self.mode = SyncMode::Settled;
    }

    /// Adopt whatever the history now shows (after back/forward or page load).
    pub fn restore<H>(&mut self, history: &H) -> IngredientList
    where
        H: NavigationHistory + ?Sized,
    {
        self.current = history.current();
        self.mode = SyncMode::Settled;
        self.current.ingredients()
    }
}

impl Default for HistorySync {
    fn default() -> Self {
        Self::new()
    }
}
