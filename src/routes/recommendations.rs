use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    middleware::RequestId,
    models::{RecommendationResponse, RecommendedMovie},
    routes::AppState,
};

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    pub title: String,
    pub top_n: Option<usize>,
    /// Attach a poster reference to every recommendation
    #[serde(default)]
    pub posters: bool,
}

/// Handler for the recommendations endpoint
///
/// An unknown title is a normal outcome: `200` with `found: false`.
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<RecommendationQuery>,
) -> AppResult<Json<RecommendationResponse>> {
    if params.title.trim().is_empty() {
        return Err(AppError::InvalidInput("title cannot be empty".to_string()));
    }

    let top_n = match params.top_n {
        Some(0) => {
            return Err(AppError::InvalidInput(
                "top_n must be at least 1".to_string(),
            ))
        }
        Some(n) => n.min(state.max_top_n),
        None => state.default_top_n,
    };

    let index = state.index.current().await;
    let ranked: Option<Vec<RecommendedMovie>> =
        index.recommend_scored(&params.title, top_n).map(|ranked| {
            ranked
                .into_iter()
                .map(|(movie, score)| RecommendedMovie {
                    id: movie.id,
                    title: movie.title.clone(),
                    release_year: movie.release_year,
                    score,
                    poster: None,
                })
                .collect()
        });

    let found = ranked.is_some();
    let mut recommendations = ranked.unwrap_or_default();

    tracing::info!(
        request_id = %request_id,
        query = %params.title,
        found,
        top_n,
        results = recommendations.len(),
        generation = index.generation(),
        "Recommendation served"
    );

    if params.posters && !recommendations.is_empty() {
        let titles = recommendations.iter().map(|r| r.title.clone()).collect();
        let posters = state.posters.posters_for(titles).await;
        for (recommendation, poster) in recommendations.iter_mut().zip(posters) {
            recommendation.poster = Some(poster);
        }
    }

    Ok(Json(RecommendationResponse {
        query: params.title,
        found,
        recommendations,
    }))
}
