use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{
    Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use futures::StreamExt;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};
use tokio::sync::mpsc;

use super::events::{Action, AppEvent, Notification, NotificationLevel};
use super::theme;
use super::views::fields::{fields_height, FieldsView};
use super::views::results::{card_height, ResultsView};
use super::widgets::input_buffer::InputBuffer;
use crate::core::client::{spawn_fetch, FetchOutcome, ResultSource};
use crate::core::collection::{CollectionEvent, FetchRequest};
use crate::core::history::MemoryHistory;
use crate::core::session::SearchSession;

/// Rows scrolled per mouse wheel notch.
const WHEEL_ROWS: i32 = 3;

/// Central application state (Elm architecture).
pub struct AppState {
    /// Whether the app is still running.
    pub running: bool,
    /// All search state: fields, history sync, results.
    session: SearchSession<MemoryHistory>,
    /// Where fetch requests are sent.
    source: Arc<dyn ResultSource>,
    /// Text of the focused field while it is being edited.
    editor: InputBuffer,
    fields_view: FieldsView,
    results: ResultsView,
    /// Collection change notifications driving the card height cache.
    collection_rx: mpsc::UnboundedReceiver<CollectionEvent>,
    /// Active notifications (max 3 visible).
    pub notifications: Vec<Notification>,
    /// Whether the help modal is open.
    pub show_help: bool,
    /// Receiver for fetch completions.
    event_rx: mpsc::UnboundedReceiver<AppEvent>,
    /// Handed to every spawned fetch.
    event_tx: mpsc::UnboundedSender<AppEvent>,
}

impl AppState {
    pub fn new(
        mut session: SearchSession<MemoryHistory>,
        source: Arc<dyn ResultSource>,
        event_rx: mpsc::UnboundedReceiver<AppEvent>,
        event_tx: mpsc::UnboundedSender<AppEvent>,
    ) -> Self {
        let collection_rx = session.subscribe();
        Self {
            running: true,
            session,
            source,
            editor: InputBuffer::new(),
            fields_view: FieldsView::new(),
            results: ResultsView::new(),
            collection_rx,
            notifications: Vec::new(),
            show_help: false,
            event_rx,
            event_tx,
        }
    }

    pub fn session(&self) -> &SearchSession<MemoryHistory> {
        &self.session
    }

    // ── Elm event loop ──────────────────────────────────────────────────

    /// Main event loop: render → select → update → loop.
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        tick_rate: Duration,
    ) -> io::Result<()> {
        let mut tick_interval = tokio::time::interval(tick_rate);
        let mut event_stream = EventStream::new();

        self.start();

        while self.running {
            // Render
            terminal.draw(|frame| self.render(frame))?;
            self.after_render();

            // Select next event
            tokio::select! {
                _ = tick_interval.tick() => {
                    self.on_tick();
                }
                Some(event) = self.event_rx.recv() => {
                    self.handle_event(event);
                }
                Some(Ok(crossterm_event)) = event_stream.next() => {
                    self.handle_event(AppEvent::Input(crossterm_event));
                }
            }
        }

        Ok(())
    }

    /// Adopt the initial history entry and issue the first query.
    pub fn start(&mut self) {
        let request = self.session.start();
        self.dispatch(request);
        self.sync_editor();
        self.drain_collection_events();
    }

    /// Layout may have changed height; the new geometry can trigger a prefetch.
    fn after_render(&mut self) {
        if let Some(request) = self.session.after_render(&self.results.geometry()) {
            self.dispatch(request);
        }
    }

    fn dispatch(&self, request: FetchRequest) {
        log::debug!(
            "Dispatching {:?} request for {:?} (generation {})",
            request.mode(),
            request.ingredients().as_slice(),
            request.generation()
        );
        spawn_fetch(Arc::clone(&self.source), request, self.event_tx.clone());
    }

    fn drain_collection_events(&mut self) {
        while let Ok(event) = self.collection_rx.try_recv() {
            self.results.apply(&event);
        }
    }

    /// Load the focused field's text into the editor.
    fn sync_editor(&mut self) {
        let text = self
            .session
            .fields()
            .focused_field()
            .map(|field| field.value().to_string())
            .unwrap_or_default();
        self.editor.set_text(&text);
    }

    // ── Event handling ──────────────────────────────────────────────────

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Input(crossterm_event) => {
                // Help modal consumes all input when open
                if self.show_help {
                    if let Some(action) = self.map_help_input(&crossterm_event) {
                        self.handle_action(action);
                    }
                    return;
                }

                match crossterm_event {
                    Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
                    Event::Mouse(mouse) => self.handle_mouse(mouse),
                    _ => {}
                }
            }
            AppEvent::FetchCompleted(outcome) => self.on_fetch_completed(outcome),
        }
        self.drain_collection_events();
    }

    fn on_fetch_completed(&mut self, outcome: FetchOutcome) {
        let FetchOutcome { request, result } = outcome;
        let current = request.generation() == self.session.collection().generation();
        let failure = result.as_ref().err().map(|e| (e.to_string(), e.is_retriable()));

        self.session.on_fetch_complete(&request, result);

        if let (true, Some((message, retriable))) = (current, failure) {
            let level = if retriable {
                NotificationLevel::Warning
            } else {
                NotificationLevel::Error
            };
            self.push_notification(format!("Search failed: {message}"), level);
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if let Some(action) = self.map_input_to_action(key) {
            self.handle_action(action);
            return;
        }

        if self.session.fields().focused().is_some() {
            self.edit_focused_field(key);
        } else if let Some(action) = self.map_browse_input(key) {
            self.handle_action(action);
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollDown => self.handle_action(Action::Scroll(WHEEL_ROWS)),
            MouseEventKind::ScrollUp => self.handle_action(Action::Scroll(-WHEEL_ROWS)),
            MouseEventKind::Down(MouseButton::Left) => {
                self.session.on_pointer_press();
                let target = self
                    .fields_view
                    .field_at(self.session.fields(), mouse.column, mouse.row);
                if let Some(id) = target {
                    self.session.focus(id);
                    self.sync_editor();
                }
            }
            _ => {}
        }
    }

    /// Text editing keys for the focused field. Every change is reported to
    /// the session as field input.
    fn edit_focused_field(&mut self, key: KeyEvent) {
        let Some(id) = self.session.fields().focused() else {
            return;
        };

        let changed = match (key.modifiers, key.code) {
            (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => {
                self.editor.insert_char(c);
                true
            }
            (_, KeyCode::Backspace) => self.editor.backspace(),
            (_, KeyCode::Delete) => self.editor.delete(),
            (_, KeyCode::Left) => {
                self.editor.move_left();
                false
            }
            (_, KeyCode::Right) => {
                self.editor.move_right();
                false
            }
            (_, KeyCode::Home) => {
                self.editor.move_home();
                false
            }
            (_, KeyCode::End) => {
                self.editor.move_end();
                false
            }
            (_, KeyCode::Up) => {
                self.handle_action(Action::FocusPrevField);
                false
            }
            (_, KeyCode::Down | KeyCode::Enter) => {
                self.handle_action(Action::FocusNextField);
                false
            }
            _ => false,
        };

        if changed {
            let value = self.editor.text().to_string();
            if let Some(request) = self.session.on_field_input(id, value) {
                self.dispatch(request);
            }
        }
    }

    // ── Input mapping ───────────────────────────────────────────────────

    /// Map help modal input to action.
    fn map_help_input(&self, event: &Event) -> Option<Action> {
        let Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return None;
        };
        match code {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?') => Some(Action::CloseHelp),
            _ => None,
        }
    }

    /// Keys that mean the same thing whether or not a field is being edited.
    fn map_input_to_action(&self, key: KeyEvent) -> Option<Action> {
        let page = self.results.page_size();
        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(Action::Quit),
            (KeyModifiers::ALT, KeyCode::Left) => Some(Action::Back),
            (KeyModifiers::ALT, KeyCode::Right) => Some(Action::Forward),
            (KeyModifiers::CONTROL, KeyCode::Char('s')) => Some(Action::NextSource),
            (KeyModifiers::CONTROL, KeyCode::Char('r')) => Some(Action::NextRecipe),
            (KeyModifiers::CONTROL, KeyCode::Up) => Some(Action::Scroll(-1)),
            (KeyModifiers::CONTROL, KeyCode::Down) => Some(Action::Scroll(1)),
            (_, KeyCode::PageUp) => Some(Action::Scroll(-page)),
            (_, KeyCode::PageDown) => Some(Action::Scroll(page)),
            (_, KeyCode::F(1)) => Some(Action::ShowHelp),
            (_, KeyCode::Tab) => Some(Action::FocusNextField),
            (_, KeyCode::BackTab) => Some(Action::FocusPrevField),
            (_, KeyCode::Esc) if self.session.fields().focused().is_some() => {
                Some(Action::BlurField)
            }
            _ => None,
        }
    }

    /// Keys while the result list has the keyboard.
    fn map_browse_input(&self, key: KeyEvent) -> Option<Action> {
        match (key.modifiers, key.code) {
            (KeyModifiers::NONE | KeyModifiers::SHIFT, code) => match code {
                KeyCode::Char('q') => Some(Action::Quit),
                KeyCode::Char('?') => Some(Action::ShowHelp),
                KeyCode::Char('j') | KeyCode::Down => Some(Action::Scroll(1)),
                KeyCode::Char('k') | KeyCode::Up => Some(Action::Scroll(-1)),
                KeyCode::Char('s') => Some(Action::NextSource),
                KeyCode::Char('r') => Some(Action::NextRecipe),
                KeyCode::Char('i') | KeyCode::Enter => Some(Action::FocusNextField),
                _ => None,
            },
            _ => None,
        }
    }

    fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::ShowHelp => self.show_help = true,
            Action::CloseHelp => self.show_help = false,
            Action::Back => {
                if self.session.history_mut().back() {
                    self.navigate();
                }
            }
            Action::Forward => {
                if self.session.history_mut().forward() {
                    self.navigate();
                }
            }
            Action::FocusNextField => {
                if self.session.fields().focused().is_none() {
                    self.focus_spare();
                } else {
                    self.session.focus_next();
                }
                self.sync_editor();
            }
            Action::FocusPrevField => {
                if self.session.fields().focused().is_none() {
                    self.focus_spare();
                } else {
                    self.session.focus_prev();
                }
                self.sync_editor();
            }
            Action::BlurField => {
                if let Some(id) = self.session.fields().focused() {
                    self.session.on_field_blur(id);
                }
                self.sync_editor();
            }
            Action::Scroll(delta) => {
                self.results.set_loading(self.session.collection().is_pending());
                self.results.scroll_by(delta);
                if let Some(request) = self.session.on_scroll(&self.results.geometry()) {
                    self.dispatch(request);
                }
            }
            Action::NextSource | Action::NextRecipe => self.cycle_recipe(action),
        }
    }

    fn navigate(&mut self) {
        let request = self.session.on_navigate();
        self.dispatch(request);
        self.sync_editor();
    }

    fn focus_spare(&mut self) {
        let spare = self.session.fields().fields().last().map(|field| field.id());
        if let Some(id) = spare {
            self.session.focus(id);
        }
    }

    /// Switch the recipe shown by the card at the top of the result pane.
    fn cycle_recipe(&mut self, action: Action) {
        let Some(position) = self.results.position_at_top() else {
            return;
        };
        let Some(selection) = self.session.card(position).map(|card| match action {
            Action::NextSource => card.next_source(),
            _ => card.next_recipe(),
        }) else {
            return;
        };

        if self.session.switch_recipe(position, selection) {
            if let Some(height) = self.session.card(position).map(|card| card_height(&card)) {
                self.results.set_height(position, height);
            }
        }
    }

    /// Push a notification (dedup by message, max 3).
    pub fn push_notification(&mut self, message: String, level: NotificationLevel) {
        if self.notifications.iter().any(|n| n.message == message) {
            return;
        }
        self.notifications.push(Notification {
            message,
            level,
            ttl_ticks: 100,
        });
        while self.notifications.len() > 3 {
            self.notifications.remove(0);
        }
    }

    /// Tick: decrement notification TTLs, dismiss expired.
    fn on_tick(&mut self) {
        for n in &mut self.notifications {
            n.ttl_ticks = n.ttl_ticks.saturating_sub(1);
        }
        self.notifications.retain(|n| n.ttl_ticks > 0);
    }

    // ── Rendering ───────────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let fields_rows = fields_height(self.session.fields()).min(area.height / 2);

        let chunks = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(fields_rows),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

        self.render_header(frame, chunks[0]);
        self.fields_view.render(frame, chunks[1], self.session.fields(), &self.editor);
        self.results.render(
            frame,
            chunks[2],
            &self.session,
            self.session.fields().focused().is_none(),
        );
        self.render_status_bar(frame, chunks[3]);

        // Overlays
        self.render_notifications(frame, area);

        if self.show_help {
            self.render_help_modal(frame, area);
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let history = self.session.history();
        let arrow = |enabled: bool, glyph: &'static str| {
            if enabled {
                Span::styled(glyph, theme::highlight())
            } else {
                Span::styled(glyph, theme::key_hint())
            }
        };

        let header = Line::from(vec![
            Span::styled(" COCKTAILS ", theme::brand_badge()),
            Span::raw(" "),
            arrow(history.can_go_back(), "◀"),
            arrow(history.can_go_forward(), "▶"),
            Span::raw(" "),
            Span::styled(self.session.title(), theme::heading()),
        ]);
        frame.render_widget(Paragraph::new(header), area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let collection = self.session.collection();

        let mode_indicator = if self.session.fields().focused().is_some() {
            Span::styled(" EDIT ", theme::brand_badge())
        } else {
            Span::styled(" BROWSE ", theme::highlight())
        };

        let load_state = if collection.is_pending() {
            Span::styled("loading", theme::highlight())
        } else if !collection.can_load_more() {
            Span::styled("all loaded", theme::muted())
        } else {
            Span::styled("ready", theme::muted())
        };

        let status = Line::from(vec![
            mode_indicator,
            Span::raw(" "),
            Span::styled(format!("{} cocktails", collection.len()), theme::highlight()),
            Span::raw(" │ "),
            load_state,
            Span::raw(" │ "),
            Span::styled("Tab", theme::key_hint()),
            Span::raw(":fields "),
            Span::styled("Alt+←/→", theme::key_hint()),
            Span::raw(":history "),
            Span::styled("PgUp/PgDn", theme::key_hint()),
            Span::raw(":scroll "),
            Span::styled("F1", theme::key_hint()),
            Span::raw(":help "),
            Span::styled("Ctrl+C", theme::key_hint()),
            Span::raw(":quit"),
        ]);
        frame.render_widget(Paragraph::new(status), area);
    }

    fn render_notifications(&self, frame: &mut Frame, area: Rect) {
        if self.notifications.is_empty() {
            return;
        }

        let max_width = 50.min(area.width.saturating_sub(2));
        let height = self.notifications.len() as u16;
        let x = area.width.saturating_sub(max_width + 1);
        let y = 1;

        let notification_area = Rect::new(x, y, max_width, height);

        let lines: Vec<Line> = self
            .notifications
            .iter()
            .map(|n| {
                let (prefix, color) = match n.level {
                    NotificationLevel::Warning => ("⚠", theme::WARNING),
                    NotificationLevel::Error => ("✗", theme::ERROR),
                };
                Line::from(vec![
                    Span::styled(format!(" {prefix} "), theme::badge(color)),
                    Span::raw(n.message.as_str()),
                ])
            })
            .collect();

        frame.render_widget(Clear, notification_area);
        frame.render_widget(Paragraph::new(lines), notification_area);
    }

    fn render_help_modal(&self, frame: &mut Frame, area: Rect) {
        let modal = centered_rect(60, 80, area);

        let keybindings = [
            ("Global:", ""),
            ("F1", "Toggle this help"),
            ("Alt+← / Alt+→", "Previous / next search"),
            ("PgUp / PgDn", "Scroll results one page"),
            ("Ctrl+↑ / Ctrl+↓", "Scroll results one row"),
            ("Ctrl+S", "Next recipe source"),
            ("Ctrl+R", "Next recipe from this source"),
            ("Tab / Shift+Tab", "Next / previous field"),
            ("Ctrl+C", "Quit"),
            ("", ""),
            ("Editing a field:", ""),
            ("↑ / ↓ / Enter", "Move between fields"),
            ("Esc", "Leave the fields"),
            ("", ""),
            ("Browsing results:", ""),
            ("j/k", "Scroll"),
            ("s / r", "Next source / recipe"),
            ("i / Enter", "Back to the fields"),
            ("?", "Toggle this help"),
            ("q", "Quit"),
        ];

        let mut lines = vec![
            Line::raw(""),
            Line::from(Span::styled(" Keybindings", theme::section())),
            Line::raw(""),
        ];

        for (key, desc) in &keybindings {
            if key.is_empty() {
                lines.push(Line::raw(""));
            } else if desc.is_empty() {
                lines.push(Line::from(Span::styled(format!("  {key}"), theme::section())));
            } else {
                lines.push(Line::from(vec![
                    Span::raw("  "),
                    Span::styled(format!("{:<22}", key), theme::highlight()),
                    Span::raw(*desc),
                ]));
            }
        }

        lines.push(Line::raw(""));
        lines.push(Line::from(vec![
            Span::raw("  Press "),
            Span::styled("F1", theme::highlight()),
            Span::raw(" or "),
            Span::styled("Esc", theme::highlight()),
            Span::raw(" to close"),
        ]));

        let block = Block::default()
            .title(" Help ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(theme::section());

        frame.render_widget(Clear, modal);
        frame.render_widget(Paragraph::new(lines).block(block), modal);
    }
}

/// Calculate a centered rect using percentage of parent area.
pub(super) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(area);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}
