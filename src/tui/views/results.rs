//! Result list: stacked cocktail cards in a scrollable pane.
//!
//! Card heights are cached from [`CollectionEvent`]s so the prefetch geometry
//! can be computed without re-rendering.

use std::cell::Cell;

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

use super::super::theme;
use crate::core::collection::CollectionEvent;
use crate::core::history::NavigationHistory;
use crate::core::models::Cocktail;
use crate::core::prefetch::Geometry;
use crate::core::presenter::{present, CocktailCard, RecipeSelection};
use crate::core::session::SearchSession;

/// Rows a card uses besides its ingredient lines: title, sources, link and
/// the blank separator.
pub const CARD_CHROME_ROWS: usize = 4;

pub fn card_height(card: &CocktailCard<'_>) -> usize {
    card.recipe.ingredients.len() + CARD_CHROME_ROWS
}

/// Height of a freshly loaded cocktail (default recipe selected). Cocktails
/// without recipes are not drawn.
fn default_height(cocktail: &Cocktail) -> usize {
    present(cocktail, &RecipeSelection::default())
        .map(|card| card_height(&card))
        .unwrap_or(0)
}

pub fn card_lines(card: &CocktailCard<'_>, highlighted: bool) -> Vec<Line<'static>> {
    let title_style = theme::card_title(highlighted);

    let mut lines = Vec::with_capacity(card_height(card));
    lines.push(Line::from(vec![
        Span::styled(if highlighted { "▌ " } else { "  " }, title_style),
        Span::styled(card.recipe.title.clone(), title_style),
    ]));

    let mut sources = vec![Span::raw("  ")];
    for (name, recipes) in &card.sources {
        let label = if *name == card.source && recipes.len() > 1 {
            format!("[{name} {}/{}]", card.index + 1, recipes.len())
        } else if *name == card.source {
            format!("[{name}]")
        } else {
            name.to_string()
        };
        sources.push(Span::styled(label, theme::source_label(*name == card.source)));
        sources.push(Span::raw(" "));
    }
    lines.push(Line::from(sources));

    for ingredient in &card.recipe.ingredients {
        lines.push(Line::from(vec![
            Span::styled("    • ", theme::muted()),
            Span::raw(ingredient.clone()),
        ]));
    }

    lines.push(Line::from(vec![
        Span::raw("    "),
        Span::styled(card.recipe.url.clone(), theme::recipe_link()),
    ]));
    lines.push(Line::raw(""));
    lines
}

#[derive(Debug, Default)]
pub struct ResultsView {
    heights: Vec<usize>,
    scroll_top: usize,
    /// A page request is in flight; the loading row follows the last card.
    loading: bool,
    /// Inner height of the pane, known after the first draw.
    viewport_height: Cell<usize>,
}

impl ResultsView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, event: &CollectionEvent) {
        match event {
            CollectionEvent::ItemsReset { items, .. } => {
                self.heights = items.iter().map(default_height).collect();
                self.scroll_top = 0;
            }
            CollectionEvent::ItemsAppended { start, items, .. } => {
                self.heights.truncate(*start);
                self.heights.extend(items.iter().map(default_height));
            }
        }
    }

    /// A card changed height after a recipe switch.
    pub fn set_height(&mut self, position: usize, height: usize) {
        if let Some(slot) = self.heights.get_mut(position) {
            *slot = height;
        }
    }

    pub fn heights(&self) -> &[usize] {
        &self.heights
    }

    pub fn scroll_top(&self) -> usize {
        self.scroll_top
    }

    pub fn viewport_height(&self) -> usize {
        self.viewport_height.get()
    }

    pub fn set_viewport_height(&self, height: usize) {
        self.viewport_height.set(height);
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// One screenful, for PageUp/PageDown.
    pub fn page_size(&self) -> i32 {
        i32::try_from(self.viewport_height.get().max(1)).unwrap_or(i32::MAX)
    }

    fn total_rows(&self) -> usize {
        self.heights.iter().sum::<usize>() + usize::from(self.loading)
    }

    fn max_scroll(&self) -> usize {
        self.total_rows().saturating_sub(self.viewport_height.get())
    }

    /// Returns whether the position changed.
    pub fn scroll_by(&mut self, delta: i32) -> bool {
        let target = if delta < 0 {
            self.scroll_top.saturating_sub(delta.unsigned_abs() as usize)
        } else {
            self.scroll_top.saturating_add(delta as usize)
        };
        let target = target.min(self.max_scroll());
        let changed = target != self.scroll_top;
        self.scroll_top = target;
        changed
    }

    /// Layout of the cards actually drawn; cocktails without recipes take no
    /// rows and are not items here.
    pub fn geometry(&self) -> Geometry {
        let drawn: Vec<usize> = self.heights.iter().copied().filter(|h| *h > 0).collect();
        Geometry::stacked(&drawn, self.scroll_top, self.viewport_height.get())
    }

    /// The card under the top edge of the pane; recipe switching acts on it.
    pub fn position_at_top(&self) -> Option<usize> {
        let mut top = 0;
        for (position, height) in self.heights.iter().enumerate() {
            if *height > 0 && top + height > self.scroll_top {
                return Some(position);
            }
            top += height;
        }
        None
    }

    pub fn render<H: NavigationHistory>(
        &self,
        frame: &mut Frame,
        area: Rect,
        session: &SearchSession<H>,
        focused: bool,
    ) {
        let block = theme::pane("Cocktails", focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        self.viewport_height.set(inner.height as usize);

        let collection = session.collection();
        if collection.is_empty() {
            let message = if collection.is_pending() {
                "  Searching…"
            } else if session.ingredients().is_empty() {
                "  Type an ingredient to start."
            } else {
                "  No cocktails found."
            };
            frame.render_widget(Paragraph::new(Line::styled(message, theme::muted())), inner);
            return;
        }

        let highlighted = self.position_at_top();
        let mut all_lines: Vec<Line> = (0..collection.len())
            .filter_map(|position| {
                session
                    .card(position)
                    .map(|card| card_lines(&card, highlighted == Some(position)))
            })
            .flatten()
            .collect();

        if collection.is_pending() {
            all_lines.push(Line::styled("  Loading more…", theme::muted()));
        }

        let visible_height = inner.height as usize;
        let total = all_lines.len();
        let scroll = self.scroll_top.min(total.saturating_sub(1));

        let visible: Vec<Line> = all_lines
            .into_iter()
            .skip(scroll)
            .take(visible_height)
            .collect();
        frame.render_widget(Paragraph::new(visible), inner);

        if total > visible_height {
            let mut scrollbar_state = ScrollbarState::new(total)
                .position(scroll)
                .viewport_content_length(visible_height);
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight),
                area,
                &mut scrollbar_state,
            );
        }
    }
}
