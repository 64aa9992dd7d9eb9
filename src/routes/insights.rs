use axum::{extract::State, Json};
use std::sync::Arc;

use crate::{models::YearCount, routes::AppState, services::insights};

/// Handler for movie counts per release year
pub async fn release_years(State(state): State<Arc<AppState>>) -> Json<Vec<YearCount>> {
    let index = state.index.current().await;
    Json(insights::release_year_counts(index.store()))
}
