//! The growing list of ingredient input fields.
//!
//! There is always room to type one more ingredient: whenever no field is
//! empty a spare one is appended, and losing focus sweeps away empty fields
//! the user abandoned, keeping only the trailing spare.

use super::ingredients::{derive_ingredients, Derived, IngredientList};

/// Stable handle to one field. Ids are never reused within a [`FieldSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldId(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    id: FieldId,
    value: String,
}

impl Field {
    pub fn id(&self) -> FieldId {
        self.id
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct FieldSet {
    fields: Vec<Field>,
    focused: Option<FieldId>,
    next_id: u64,
}

impl FieldSet {
    /// A single empty, focused field.
    pub fn new() -> Self {
        let mut set = Self {
            fields: Vec::new(),
            focused: None,
            next_id: 0,
        };
        let id = set.push_empty();
        set.focused = Some(id);
        set
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(Field::value)
    }

    pub fn get(&self, id: FieldId) -> Option<&Field> {
        self.fields.iter().find(|field| field.id == id)
    }

    pub fn position(&self, id: FieldId) -> Option<usize> {
        self.fields.iter().position(|field| field.id == id)
    }

    /// Position of this field's value in the derived ingredient list, or
    /// `None` while the field is empty.
    pub fn ingredient_index(&self, id: FieldId) -> Option<usize> {
        let position = self.position(id)?;
        if self.fields[position].is_empty() {
            return None;
        }
        Some(
            self.fields[..position]
                .iter()
                .filter(|field| !field.is_empty())
                .count(),
        )
    }

    pub fn focused(&self) -> Option<FieldId> {
        self.focused
    }

    pub fn focused_field(&self) -> Option<&Field> {
        self.focused.and_then(|id| self.get(id))
    }

    /// Scan the current values.
    pub fn derive(&self) -> Derived {
        derive_ingredients(self.values())
    }

    // ── Events ──────────────────────────────────────────────────────────

    /// The user changed a field's text.
    ///
    /// Appends a spare field when no field is left empty. Unknown ids only
    /// re-derive.
    pub fn on_field_input(&mut self, id: FieldId, value: impl Into<String>) -> Derived {
        if let Some(field) = self.fields.iter_mut().find(|field| field.id == id) {
            field.value = value.into();
        } else {
            log::warn!("Input for unknown field {id:?} ignored");
        }

        let derived = self.derive();
        if !derived.has_empty {
            self.push_empty();
        }
        derived
    }

    /// A field lost focus: drop every empty field except the trailing spare.
    ///
    /// When the last field is not empty a fresh spare is appended, so after a
    /// blur exactly one empty field exists and it is the last one.
    pub fn on_field_blur(&mut self, id: FieldId) {
        let keep = self
            .fields
            .last()
            .filter(|field| field.is_empty())
            .map(Field::id);

        let before = self.fields.len();
        self.fields
            .retain(|field| !field.is_empty() || Some(field.id) == keep);

        if keep.is_none() {
            self.push_empty();
        }

        if self.focused == Some(id) {
            self.focused = None;
        }
        if let Some(focused) = self.focused {
            if self.get(focused).is_none() {
                self.focused = None;
            }
        }

        let removed = before.saturating_sub(self.fields.len());
        if removed > 0 {
            log::trace!("Blur on {id:?} removed {removed} empty field(s)");
        }
    }

    /// Rebuild from a decoded list: one pre-filled field per ingredient plus
    /// a focused trailing spare.
    pub fn populate_from_state(&mut self, ingredients: &IngredientList) {
        self.fields.clear();
        for ingredient in ingredients.iter() {
            let id = self.next_field_id();
            self.fields.push(Field {
                id,
                value: ingredient.clone(),
            });
        }
        let spare = self.push_empty();
        self.focused = Some(spare);
    }

    // ── Focus ───────────────────────────────────────────────────────────

    /// Move focus to `id`, blurring the previously focused field first.
    ///
    /// If the blur sweeps the target away (it was an abandoned empty field),
    /// focus lands on the trailing spare instead. Returns the field that ends
    /// up focused.
    pub fn focus(&mut self, id: FieldId) -> Option<FieldId> {
        if self.focused == Some(id) {
            return self.focused;
        }

        if let Some(previous) = self.focused {
            self.on_field_blur(previous);
        }

        self.focused = if self.get(id).is_some() {
            Some(id)
        } else {
            self.fields.last().map(Field::id)
        };
        self.focused
    }

    pub fn focus_next(&mut self) -> Option<FieldId> {
        self.focus_relative(1)
    }

    pub fn focus_prev(&mut self) -> Option<FieldId> {
        self.focus_relative(-1)
    }

    fn focus_relative(&mut self, step: isize) -> Option<FieldId> {
        let current = self
            .focused
            .and_then(|id| self.position(id))
            .unwrap_or(self.fields.len().saturating_sub(1));
        let target = current
            .checked_add_signed(step)
            .filter(|&position| position < self.fields.len())
            .map(|position| self.fields[position].id);

        match target {
            Some(id) => self.focus(id),
            None => self.focused,
        }
    }

    fn push_empty(&mut self) -> FieldId {
        let id = self.next_field_id();
        self.fields.push(Field {
            id,
            value: String::new(),
        });
        id
    }

    fn next_field_id(&mut self) -> FieldId {
        let id = FieldId(self.next_id);
        self.next_id += 1;
        id
    }
}

impl Default for FieldSet {
    fn default() -> Self {
        Self::new()
    }
}
