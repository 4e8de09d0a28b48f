//! Wire types of the search endpoint.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// One provider-specific variant of a cocktail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub title: String,
    #[serde(default)]
    pub picture: Option<String>,
    pub url: String,
    pub source: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
}

/// A search hit: one drink with all the recipes found for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cocktail {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub recipes: Vec<Recipe>,
}

/// Opaque freshness token identifying the index snapshot a page came from.
///
/// Servers may send it as a string or a number; either way it is passed
/// back verbatim in its textual form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct IndexCursor(String);

impl IndexCursor {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IndexCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for IndexCursor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::String(token) => Ok(Self(token)),
            serde_json::Value::Number(number) => Ok(Self(number.to_string())),
            other => Err(serde::de::Error::custom(format!(
                "index_updated must be a string or number, got {other}"
            ))),
        }
    }
}

/// Body of a `GET /search-results` response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ResultPage {
    #[serde(default)]
    pub cocktails: Vec<Cocktail>,
    #[serde(default)]
    pub index_updated: Option<IndexCursor>,
}
