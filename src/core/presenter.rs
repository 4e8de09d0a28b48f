//! Pure mapping from a cocktail plus its selection state to what a card shows.

use indexmap::IndexMap;

use super::models::{Cocktail, Recipe};

/// Which recipe variant a card shows. `None` source means the first one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RecipeSelection {
    pub source: Option<String>,
    pub recipe: usize,
}

impl RecipeSelection {
    pub fn new(source: impl Into<String>, recipe: usize) -> Self {
        Self {
            source: Some(source.into()),
            recipe,
        }
    }
}

/// Group recipes by source name, keeping first-seen source order.
pub fn group_by_source(recipes: &[Recipe]) -> IndexMap<&str, Vec<&Recipe>> {
    let mut sources: IndexMap<&str, Vec<&Recipe>> = IndexMap::new();
    for recipe in recipes {
        sources.entry(recipe.source.as_str()).or_default().push(recipe);
    }
    sources
}

/// Everything needed to draw one result.
#[derive(Debug, Clone, PartialEq)]
pub struct CocktailCard<'a> {
    pub cocktail: &'a Cocktail,
    pub sources: IndexMap<&'a str, Vec<&'a Recipe>>,
    /// Source of the recipe on display.
    pub source: &'a str,
    /// Index of the recipe on display within its source.
    pub index: usize,
    pub recipe: &'a Recipe,
}

impl<'a> CocktailCard<'a> {
    /// Position of the displayed source in `sources`.
    pub fn source_position(&self) -> usize {
        self.sources.get_index_of(self.source).unwrap_or(0)
    }

    /// Selection showing the first recipe of the following source (wrapping).
    pub fn next_source(&self) -> RecipeSelection {
        let next = (self.source_position() + 1) % self.sources.len().max(1);
        let source = self
            .sources
            .get_index(next)
            .map(|(source, _)| *source)
            .unwrap_or(self.source);
        RecipeSelection::new(source, 0)
    }

    /// Selection showing the following recipe of the same source (wrapping).
    pub fn next_recipe(&self) -> RecipeSelection {
        let count = self.sources.get(self.source).map_or(1, Vec::len).max(1);
        RecipeSelection::new(self.source, (self.index + 1) % count)
    }
}

/// Resolve a selection against a cocktail. Unknown sources and out-of-range
/// indices fall back to the first recipe of the first source; a cocktail
/// without recipes has nothing to show.
pub fn present<'a>(
    cocktail: &'a Cocktail,
    selection: &RecipeSelection,
) -> Option<CocktailCard<'a>> {
    let sources = group_by_source(&cocktail.recipes);
    let (first_source, _) = sources.get_index(0)?;
    let first_source = *first_source;

    let (source, index) = match selection.source.as_deref() {
        Some(wanted) => match sources.get_key_value(wanted) {
            Some((source, recipes)) if selection.recipe < recipes.len() => {
                (*source, selection.recipe)
            }
            Some((source, _)) => (*source, 0),
            None => (first_source, 0),
        },
        None => {
            let count = sources[first_source].len();
            (first_source, if selection.recipe < count { selection.recipe } else { 0 })
        }
    };

    let recipe = sources[source][index];
    Some(CocktailCard {
        cocktail,
        sources,
        source,
        index,
        recipe,
    })
}
