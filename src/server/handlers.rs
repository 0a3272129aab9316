//! HTTP handlers mapping the REST surface onto the repository.
//!
//! All successful responses are 200 with JSON bodies. Failures use the
//! repository's taxonomy: missing recipes or comments are 404, a duplicate
//! caller-supplied comment id is 400, and storage failures are 500.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::db::{RecipeRepository, RepoError, SortBy};
use crate::models::{Comment, Recipe};
use crate::store::JsonFileStore;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    repo: Arc<RecipeRepository<JsonFileStore>>,
}

impl AppState {
    pub fn new(repo: RecipeRepository<JsonFileStore>) -> Self {
        Self {
            repo: Arc::new(repo),
        }
    }
}

/// Error response body
#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

/// Repository error carried out of a handler.
struct ApiError(RepoError);

impl From<RepoError> for ApiError {
    fn from(e: RepoError) -> Self {
        ApiError(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match &self.0 {
            RepoError::RecipeNotFound(_) | RepoError::CommentNotFound(_, _) => {
                (StatusCode::NOT_FOUND, "not_found")
            }
            RepoError::DuplicateCommentId(_, _) => (StatusCode::BAD_REQUEST, "duplicate_id"),
            RepoError::Store(e) => {
                tracing::error!("Storage failure: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "storage")
            }
        };

        (
            status,
            Json(ErrorBody {
                error,
                message: self.0.to_string(),
            }),
        )
            .into_response()
    }
}

/// Acknowledgement body for delete operations
#[derive(Serialize)]
struct StatusResponse {
    status: &'static str,
    message: &'static str,
}

/// Query parameters for the recipe list
#[derive(Deserialize)]
struct ListParams {
    search: Option<String>,
    sort_by: Option<String>,
}

async fn list_recipes(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Recipe>>, ApiError> {
    // Unknown sort keys fall through as None and leave the order alone
    let sort_by = params.sort_by.as_deref().and_then(SortBy::parse);
    let recipes = state.repo.list(params.search.as_deref(), sort_by)?;
    Ok(Json(recipes))
}

async fn create_recipe(
    State(state): State<AppState>,
    Json(input): Json<Recipe>,
) -> Result<Json<Recipe>, ApiError> {
    let recipe = state.repo.create(input)?;
    Ok(Json(recipe))
}

async fn get_recipe(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Recipe>, ApiError> {
    let recipe = state.repo.get(id)?;
    Ok(Json(recipe))
}

async fn update_recipe(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(input): Json<Recipe>,
) -> Result<Json<Recipe>, ApiError> {
    let recipe = state.repo.update(id, input)?;
    Ok(Json(recipe))
}

async fn delete_recipe(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<StatusResponse>, ApiError> {
    state.repo.delete(id)?;
    Ok(Json(StatusResponse {
        status: "success",
        message: "Recipe deleted successfully",
    }))
}

async fn add_comment(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(input): Json<Comment>,
) -> Result<Json<Comment>, ApiError> {
    let comment = state.repo.add_comment(id, input)?;
    Ok(Json(comment))
}

async fn list_comments(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Vec<Comment>>, ApiError> {
    let comments = state.repo.list_comments(id)?;
    Ok(Json(comments))
}

async fn update_comment(
    State(state): State<AppState>,
    Path((id, comment_id)): Path<(u64, String)>,
    Json(input): Json<Comment>,
) -> Result<Json<Comment>, ApiError> {
    let comment = state.repo.update_comment(id, &comment_id, input)?;
    Ok(Json(comment))
}

async fn delete_comment(
    State(state): State<AppState>,
    Path((id, comment_id)): Path<(u64, String)>,
) -> Result<Json<StatusResponse>, ApiError> {
    state.repo.delete_comment(id, &comment_id)?;
    Ok(Json(StatusResponse {
        status: "success",
        message: "Comment deleted successfully",
    }))
}

/// Builds the application router.
///
/// CORS is wide open; the service has no auth surface and is meant to be
/// called from browser clients on other origins.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/recipes", get(list_recipes).post(create_recipe))
        .route(
            "/recipes/{id}",
            get(get_recipe).put(update_recipe).delete(delete_recipe),
        )
        .route(
            "/recipes/{id}/comments",
            get(list_comments).post(add_comment),
        )
        .route(
            "/recipes/{id}/comments/{cid}",
            axum::routing::put(update_comment).delete(delete_comment),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
