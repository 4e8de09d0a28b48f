use crate::core::client::FetchOutcome;

/// Events flowing through the Elm-architecture event loop.
#[derive(Debug)]
pub enum AppEvent {
    /// Raw terminal input (keyboard/mouse).
    Input(crossterm::event::Event),
    /// A search request finished (possibly for a query that is no longer current).
    FetchCompleted(FetchOutcome),
}

impl From<FetchOutcome> for AppEvent {
    fn from(outcome: FetchOutcome) -> Self {
        AppEvent::FetchCompleted(outcome)
    }
}

/// High-level actions dispatched by the input mapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Navigation history
    Back,
    Forward,

    // Fields
    FocusNextField,
    FocusPrevField,
    /// Leave the fields and hand the keyboard to the result list.
    BlurField,

    // Results
    /// Scroll the result list by this many rows (negative is up).
    Scroll(i32),
    NextSource,
    NextRecipe,

    // Modals
    ShowHelp,
    CloseHelp,

    // Application
    Quit,
}

/// Notification level for the overlay system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Warning,
    Error,
}

/// A timed notification shown in the overlay.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    /// Ticks remaining before auto-dismiss.
    pub ttl_ticks: u32,
}
