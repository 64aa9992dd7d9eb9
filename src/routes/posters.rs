use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::Poster,
    routes::AppState,
};

#[derive(Debug, Deserialize)]
pub struct PosterQuery {
    title: String,
}

/// Handler for poster lookup; lookup failures yield the placeholder
pub async fn poster(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PosterQuery>,
) -> AppResult<Json<Poster>> {
    if params.title.trim().is_empty() {
        return Err(AppError::InvalidInput("title cannot be empty".to_string()));
    }

    Ok(Json(state.posters.poster_for(&params.title).await))
}
