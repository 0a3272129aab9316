mod recipe_repo;

pub use recipe_repo::{RecipeRepository, RepoError, SortBy};
