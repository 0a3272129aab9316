//! HTTP layer for the recipe service.

mod handlers;

pub use handlers::{router, AppState};
