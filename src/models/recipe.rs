use serde::{Deserialize, Serialize};

use super::Comment;

/// A recipe in the catalog.
///
/// The id is assigned by the repository on create and is immutable after
/// that; request payloads may omit it (or carry a stale one), and the
/// repository overwrites whatever arrived. `comments` defaults to empty so
/// that a full-replace update without the field clears the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    #[serde(default)]
    pub id: u64,
    pub name: String,
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub scheduled_date: Option<String>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

// Builder-style constructors; exercised by the test suites
#[allow(dead_code)]
impl Recipe {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            ingredients: Vec::new(),
            scheduled_date: None,
            comments: Vec::new(),
        }
    }

    pub fn with_ingredients(mut self, ingredients: Vec<String>) -> Self {
        self.ingredients = ingredients;
        self
    }

    pub fn with_scheduled_date(mut self, date: impl Into<String>) -> Self {
        self.scheduled_date = Some(date.into());
        self
    }

    pub fn with_comments(mut self, comments: Vec<Comment>) -> Self {
        self.comments = comments;
        self
    }
}
