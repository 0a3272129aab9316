mod comment;
mod recipe;

pub use comment::{comment_sequence, next_comment_id, Comment};
pub use recipe::Recipe;
