use std::cell::Cell;

use ratatui::{
    layout::{Position, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::super::theme;
use super::super::widgets::input_buffer::InputBuffer;
use crate::core::fields::{FieldId, FieldSet};

const PROMPT: &str = " › ";

/// Rows needed to show every field plus the block border.
pub fn fields_height(fields: &FieldSet) -> u16 {
    u16::try_from(fields.len()).unwrap_or(u16::MAX).saturating_add(2)
}

#[derive(Debug, Default)]
pub struct FieldsView {
    /// Where the field rows were drawn last, for mouse hit testing.
    inner: Cell<Rect>,
}

impl FieldsView {
    pub fn new() -> Self {
        Self::default()
    }

    /// The field drawn at terminal cell (`column`, `row`), if any.
    pub fn field_at(&self, fields: &FieldSet, column: u16, row: u16) -> Option<FieldId> {
        let inner = self.inner.get();
        if !inner.contains(Position::new(column, row)) {
            return None;
        }
        fields
            .fields()
            .get(usize::from(row - inner.y))
            .map(|field| field.id())
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, fields: &FieldSet, editor: &InputBuffer) {
        let focused = fields.focused();
        let block = theme::pane("Ingredients", focused.is_some());
        let inner = block.inner(area);
        frame.render_widget(block, area);
        self.inner.set(inner);

        let lines: Vec<Line> = fields
            .fields()
            .iter()
            .map(|field| {
                let is_focused = Some(field.id()) == focused;
                let text = if is_focused { editor.text() } else { field.value() };
                let body = if text.is_empty() && !is_focused {
                    Span::styled("add an ingredient", theme::field_placeholder())
                } else {
                    Span::styled(text.to_string(), theme::field_text(is_focused))
                };
                Line::from(vec![Span::styled(PROMPT, theme::field_prompt(is_focused)), body])
            })
            .collect();

        frame.render_widget(Paragraph::new(lines), inner);

        if let Some(row) = focused.and_then(|id| fields.position(id)) {
            let offset = PROMPT.chars().count() + editor.cursor_column();
            let x = inner
                .x
                .saturating_add(u16::try_from(offset).unwrap_or(u16::MAX))
                .min(inner.right().saturating_sub(1));
            let y = inner.y.saturating_add(u16::try_from(row).unwrap_or(u16::MAX));
            if y < inner.bottom() {
                frame.set_cursor_position(Position::new(x, y));
            }
        }
    }
}
