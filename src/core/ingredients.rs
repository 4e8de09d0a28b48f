//! Ingredient list derivation and the address-fragment encoding.
//!
//! The fragment form is `#a;b;c` where every entry is percent-encoded on its
//! own, so the separator never appears literally inside an entry. The empty
//! list has its own token (`.`, the page's own address) so that the home
//! state never looks like a fragment that happens to be empty.

use std::borrow::Cow;
use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Serialize};

/// Joins encoded entries inside a fragment.
pub const SEPARATOR: &str = ";";
/// Leading marker of a non-empty fragment.
pub const FRAGMENT_MARKER: char = '#';
/// Encoding of the empty ingredient list.
pub const ROOT_TOKEN: &str = ".";

// ── IngredientList ───────────────────────────────────────────────────────────

/// Ordered, non-empty search terms. Duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct IngredientList(Vec<String>);

impl IngredientList {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Build a list from raw values, dropping empty strings.
    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(
            values
                .into_iter()
                .map(Into::into)
                .filter(|value| !value.is_empty())
                .collect(),
        )
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl Deref for IngredientList {
    type Target = [String];

    fn deref(&self) -> &[String] {
        &self.0
    }
}

impl From<Vec<String>> for IngredientList {
    fn from(values: Vec<String>) -> Self {
        Self::from_values(values)
    }
}

impl From<IngredientList> for Vec<String> {
    fn from(list: IngredientList) -> Self {
        list.0
    }
}

impl<'a> FromIterator<&'a str> for IngredientList {
    fn from_iter<T: IntoIterator<Item = &'a str>>(iter: T) -> Self {
        Self::from_values(iter)
    }
}

// ── SearchState ──────────────────────────────────────────────────────────────

/// A serialized ingredient list as it is stored in the navigation history.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchState(String);

impl SearchState {
    /// The home state: no ingredients.
    pub fn root() -> Self {
        Self(ROOT_TOKEN.to_string())
    }

    /// Wrap an address fragment exactly as the host reports it.
    ///
    /// A blank address is the home page and maps to [`SearchState::root`];
    /// anything else is kept verbatim so malformed input survives until decode.
    pub fn from_address(address: &str) -> Self {
        if address.is_empty() {
            Self::root()
        } else {
            Self(address.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0 == ROOT_TOKEN
    }

    /// Decode back into an ingredient list. Never fails.
    pub fn ingredients(&self) -> IngredientList {
        decode(&self.0)
    }
}

impl Default for SearchState {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Display for SearchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ── Derivation ───────────────────────────────────────────────────────────────

/// Result of scanning the field contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Derived {
    pub ingredients: IngredientList,
    /// Whether at least one field was empty.
    pub has_empty: bool,
}

/// Collect the non-empty field values in field order.
///
/// Whitespace counts as content; only the empty string is "empty".
pub fn derive_ingredients<'a, I>(values: I) -> Derived
where
    I: IntoIterator<Item = &'a str>,
{
    let mut has_empty = false;
    let mut ingredients = Vec::new();

    for value in values {
        if value.is_empty() {
            has_empty = true;
        } else {
            ingredients.push(value.to_string());
        }
    }

    Derived {
        ingredients: IngredientList(ingredients),
        has_empty,
    }
}

// ── Encoding ─────────────────────────────────────────────────────────────────

/// Encode a list into its fragment form.
pub fn encode(ingredients: &IngredientList) -> SearchState {
    if ingredients.is_empty() {
        return SearchState::root();
    }

    let body = ingredients
        .iter()
        .map(|ingredient| urlencoding::encode(ingredient))
        .collect::<Vec<Cow<'_, str>>>()
        .join(SEPARATOR);

    SearchState(format!("{FRAGMENT_MARKER}{body}"))
}

/// Decode a fragment (with or without the leading `#`) into a list.
///
/// Empty segments are skipped. A segment whose escapes do not form valid
/// UTF-8 is kept literally.
pub fn decode(state: &str) -> IngredientList {
    if state == ROOT_TOKEN {
        return IngredientList::new();
    }

    let body = state.strip_prefix(FRAGMENT_MARKER).unwrap_or(state);

    body.split(SEPARATOR)
        .filter(|segment| !segment.is_empty())
        .map(decode_segment)
        .collect::<Vec<_>>()
        .into()
}

fn decode_segment(segment: &str) -> String {
    match urlencoding::decode(segment) {
        Ok(decoded) => decoded.into_owned(),
        Err(e) => {
            log::debug!("Keeping undecodable fragment segment {segment:?} literally: {e}");
            segment.to_string()
        }
    }
}
