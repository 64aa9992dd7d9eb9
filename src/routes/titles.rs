use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::Movie,
    routes::AppState,
};

#[derive(Debug, Deserialize)]
pub struct LookupQuery {
    title: String,
}

/// Handler listing every title, sorted and deduplicated
pub async fn list(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    let index = state.index.current().await;
    Json(index.list_titles())
}

/// Handler resolving a single title case-insensitively
pub async fn lookup(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LookupQuery>,
) -> AppResult<Json<Movie>> {
    let index = state.index.current().await;
    index
        .lookup(&params.title)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("No movie titled '{}'", params.title)))
}
