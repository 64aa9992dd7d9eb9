use std::sync::Arc;

use axum::{
    http::StatusCode,
    middleware as axum_middleware,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    middleware::{make_span_with_request_id, request_id_middleware},
    services::{
        index::{IndexHandle, IndexLoader},
        posters::PosterService,
    },
};

pub mod index;
pub mod insights;
pub mod posters;
pub mod recommendations;
pub mod titles;

/// Shared application state
pub struct AppState {
    pub loader: IndexLoader,
    pub index: IndexHandle,
    pub posters: PosterService,
    /// Recommendations returned when a request gives no `top_n`
    pub default_top_n: usize,
    /// Upper bound applied to any requested `top_n`
    pub max_top_n: usize,
}

impl AppState {
    pub fn new(loader: IndexLoader, posters: PosterService) -> Self {
        let index = loader.handle();
        Self {
            loader,
            index,
            posters,
            default_top_n: 5,
            max_top_n: 50,
        }
    }

    pub fn with_limits(mut self, default_top_n: usize, max_top_n: usize) -> Self {
        self.default_top_n = default_top_n;
        self.max_top_n = max_top_n;
        self
    }
}

/// Creates the application router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(CorsLayer::permissive())
        .layer(axum_middleware::from_fn(request_id_middleware))
}

/// API routes under /api/v1
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/titles", get(titles::list))
        .route("/titles/lookup", get(titles::lookup))
        .route("/recommendations", get(recommendations::recommend))
        .route("/posters", get(posters::poster))
        .route("/index", get(index::stats))
        .route("/index/reload", post(index::reload))
        .route("/insights/release-years", get(insights::release_years))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
