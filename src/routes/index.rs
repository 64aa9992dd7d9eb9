use axum::{extract::State, Extension, Json};
use std::sync::Arc;

use crate::{error::AppResult, middleware::RequestId, models::IndexStats, routes::AppState};

/// Handler describing the serving index generation
pub async fn stats(State(state): State<Arc<AppState>>) -> Json<IndexStats> {
    Json(state.index.current().await.stats())
}

/// Handler that rebuilds the index from the corpus source
///
/// A failed rebuild returns the error; the previous generation keeps serving.
pub async fn reload(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
) -> AppResult<Json<IndexStats>> {
    tracing::info!(
        request_id = %request_id,
        corpus = %state.loader.corpus_path().display(),
        "Processing index reload request"
    );

    let stats = state.loader.reload().await?;
    Ok(Json(stats))
}
