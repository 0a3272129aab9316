//! Repository over the recipe document.
//!
//! Every operation is self-contained: it loads the full collection from the
//! store, applies at most one in-memory mutation, and (when mutating) saves
//! the full collection back. Nothing is cached between calls, so the
//! document on disk is the only state. With no locking, two concurrent
//! mutators can interleave their load phases and the later save wins; that
//! lost-update hazard is an accepted property of whole-document persistence.

use crate::models::{next_comment_id, Comment, Recipe};
use crate::store::{Store, StoreError};

/// Errors surfaced by repository operations.
#[derive(Debug)]
pub enum RepoError {
    /// No recipe with the given id.
    RecipeNotFound(u64),
    /// The recipe exists but has no comment with the given id.
    CommentNotFound(u64, String),
    /// A caller-supplied comment id collides with one already on the recipe.
    DuplicateCommentId(u64, String),
    /// The underlying document could not be read or written.
    Store(StoreError),
}

impl std::fmt::Display for RepoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RepoError::RecipeNotFound(id) => write!(f, "Recipe {} not found", id),
            RepoError::CommentNotFound(recipe_id, id) => {
                write!(f, "Comment {} not found on recipe {}", id, recipe_id)
            }
            RepoError::DuplicateCommentId(recipe_id, id) => {
                write!(f, "Comment {} already exists on recipe {}", id, recipe_id)
            }
            RepoError::Store(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for RepoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RepoError::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StoreError> for RepoError {
    fn from(e: StoreError) -> Self {
        RepoError::Store(e)
    }
}

/// Sort keys accepted by [`RecipeRepository::list`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortBy {
    /// Lexicographic ascending by name.
    Name,
    /// Ascending by id, which tracks creation order.
    DateAdded,
    /// Ascending by scheduled date; recipes without one sort first.
    ScheduledDate,
}

impl SortBy {
    /// Parse from a query-string value. Unknown keys yield `None`, which
    /// leaves the list order untouched.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "name" => Some(SortBy::Name),
            "date_added" => Some(SortBy::DateAdded),
            "scheduled_date" => Some(SortBy::ScheduledDate),
            _ => None,
        }
    }
}

/// CRUD and query semantics for recipes and their comments.
pub struct RecipeRepository<S: Store> {
    store: S,
}

impl<S: Store> RecipeRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Lists recipes, optionally filtered by a case-insensitive substring
    /// match on the name and sorted by the given key. Never mutates storage.
    pub fn list(
        &self,
        search: Option<&str>,
        sort_by: Option<SortBy>,
    ) -> Result<Vec<Recipe>, RepoError> {
        let mut recipes = self.store.load()?;

        if let Some(search) = search {
            let needle = search.to_lowercase();
            recipes.retain(|r| r.name.to_lowercase().contains(&needle));
        }

        match sort_by {
            Some(SortBy::Name) => recipes.sort_by(|a, b| a.name.cmp(&b.name)),
            Some(SortBy::DateAdded) => recipes.sort_by_key(|r| r.id),
            Some(SortBy::ScheduledDate) => recipes.sort_by(|a, b| {
                let a = a.scheduled_date.as_deref().unwrap_or("");
                let b = b.scheduled_date.as_deref().unwrap_or("");
                a.cmp(b)
            }),
            None => {}
        }

        Ok(recipes)
    }

    /// Stores a new recipe under the next free id and returns it.
    ///
    /// Ids are never reused: the allocation is max existing id + 1, so a
    /// deleted id stays retired. Caller-supplied comments are stored
    /// verbatim; their ids are not validated or reassigned here.
    pub fn create(&self, mut input: Recipe) -> Result<Recipe, RepoError> {
        let mut recipes = self.store.load()?;

        input.id = recipes.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        recipes.push(input.clone());
        self.store.save(&recipes)?;

        tracing::debug!(recipe_id = input.id, "Created recipe");
        Ok(input)
    }

    pub fn get(&self, id: u64) -> Result<Recipe, RepoError> {
        let recipes = self.store.load()?;
        recipes
            .into_iter()
            .find(|r| r.id == id)
            .ok_or(RepoError::RecipeNotFound(id))
    }

    /// Replaces the recipe's full content, forcing the id back to `id`
    /// regardless of what the payload carried. A total replace, not a merge.
    pub fn update(&self, id: u64, mut input: Recipe) -> Result<Recipe, RepoError> {
        let mut recipes = self.store.load()?;

        let index = recipes
            .iter()
            .position(|r| r.id == id)
            .ok_or(RepoError::RecipeNotFound(id))?;

        input.id = id;
        recipes[index] = input.clone();
        self.store.save(&recipes)?;

        Ok(input)
    }

    /// Removes the recipe and all of its comments.
    pub fn delete(&self, id: u64) -> Result<(), RepoError> {
        let mut recipes = self.store.load()?;

        let index = recipes
            .iter()
            .position(|r| r.id == id)
            .ok_or(RepoError::RecipeNotFound(id))?;

        recipes.remove(index);
        self.store.save(&recipes)?;

        tracing::debug!(recipe_id = id, "Deleted recipe");
        Ok(())
    }

    /// Appends a comment to a recipe and returns it as stored.
    ///
    /// Without a caller-supplied id, the next `CMT<n>` id is generated from
    /// the recipe's own comments (suffixes are independent per recipe). A
    /// supplied id is checked for collision before the list is touched, so
    /// a duplicate never leaves a partial append behind.
    pub fn add_comment(&self, recipe_id: u64, mut input: Comment) -> Result<Comment, RepoError> {
        let mut recipes = self.store.load()?;

        let recipe = recipes
            .iter_mut()
            .find(|r| r.id == recipe_id)
            .ok_or(RepoError::RecipeNotFound(recipe_id))?;

        match &input.id {
            None => input.id = Some(next_comment_id(&recipe.comments)),
            Some(id) => {
                if recipe.comments.iter().any(|c| c.id.as_deref() == Some(id)) {
                    return Err(RepoError::DuplicateCommentId(recipe_id, id.clone()));
                }
            }
        }

        recipe.comments.push(input.clone());
        self.store.save(&recipes)?;

        Ok(input)
    }

    /// Returns a recipe's comments in stored (insertion) order.
    pub fn list_comments(&self, recipe_id: u64) -> Result<Vec<Comment>, RepoError> {
        let recipe = self.get(recipe_id)?;
        Ok(recipe.comments)
    }

    /// Replaces a comment's content in place, forcing its id back to
    /// `comment_id` and preserving its position in the list.
    pub fn update_comment(
        &self,
        recipe_id: u64,
        comment_id: &str,
        mut input: Comment,
    ) -> Result<Comment, RepoError> {
        let mut recipes = self.store.load()?;

        let recipe = recipes
            .iter_mut()
            .find(|r| r.id == recipe_id)
            .ok_or(RepoError::RecipeNotFound(recipe_id))?;

        let index = recipe
            .comments
            .iter()
            .position(|c| c.id.as_deref() == Some(comment_id))
            .ok_or_else(|| RepoError::CommentNotFound(recipe_id, comment_id.to_string()))?;

        input.id = Some(comment_id.to_string());
        recipe.comments[index] = input.clone();
        self.store.save(&recipes)?;

        Ok(input)
    }

    /// Removes any comment with the given id from the recipe.
    ///
    /// Only a missing recipe is an error; deleting a comment id that isn't
    /// there succeeds, so the operation is idempotent.
    pub fn delete_comment(&self, recipe_id: u64, comment_id: &str) -> Result<(), RepoError> {
        let mut recipes = self.store.load()?;

        let recipe = recipes
            .iter_mut()
            .find(|r| r.id == recipe_id)
            .ok_or(RepoError::RecipeNotFound(recipe_id))?;

        recipe
            .comments
            .retain(|c| c.id.as_deref() != Some(comment_id));
        self.store.save(&recipes)?;

        Ok(())
    }
}
