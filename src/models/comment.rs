use serde::{Deserialize, Serialize};

/// Prefix used for system-assigned comment identifiers.
pub const COMMENT_ID_PREFIX: &str = "CMT";

/// A comment attached to a recipe.
///
/// Comment ids have the form `CMT<n>` and are unique only within the owning
/// recipe. An id of `None` on input means the repository assigns the next
/// free one when the comment is added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(default)]
    pub id: Option<String>,
    pub comment: String,
    #[serde(default)]
    pub date: Option<String>,
}

// Builder-style constructors; exercised by the test suites
#[allow(dead_code)]
impl Comment {
    pub fn new(comment: impl Into<String>) -> Self {
        Self {
            id: None,
            comment: comment.into(),
            date: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }
}

/// Parses the numeric suffix out of a `CMT<n>`-shaped id.
///
/// Returns `None` for ids that don't match the pattern, including a bare
/// `CMT` and non-numeric tails.
pub fn comment_sequence(id: &str) -> Option<u32> {
    let suffix = id.strip_prefix(COMMENT_ID_PREFIX)?;
    if suffix.is_empty() {
        return None;
    }
    suffix.parse().ok()
}

/// Returns the next system-assigned id for a comment list: one past the
/// highest `CMT<n>` suffix present, starting at `CMT1`.
pub fn next_comment_id(comments: &[Comment]) -> String {
    let max = comments
        .iter()
        .filter_map(|c| c.id.as_deref().and_then(comment_sequence))
        .max()
        .unwrap_or(0);
    format!("{}{}", COMMENT_ID_PREFIX, max + 1)
}
