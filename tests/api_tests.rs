use std::io::Write;
use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::Value;
use tempfile::NamedTempFile;

use reelmatch_api::{
    error::{AppError, AppResult},
    models::{IndexStats, Movie, RecommendationResponse, YearCount},
    routes::{create_router, AppState},
    services::{
        index::IndexLoader,
        posters::{PosterLookup, PosterService},
    },
};

const PLACEHOLDER: &str = "https://img.example/no-image.png";

const CORPUS: &str = "\
title,genre,actors,directors,writers,releaseYear
Sholay,Action|Adventure,Amitabh Bachchan|Dharmendra,Ramesh Sippy,Salim-Javed,1975
Deewaar,Action|Crime,Amitabh Bachchan|Shashi Kapoor,Yash Chopra,Salim-Javed,1975
Dilwale Dulhania Le Jayenge,Romance,Shah Rukh Khan|Kajol,Aditya Chopra,Aditya Chopra,1995
Kuch Kuch Hota Hai,Romance|Comedy,Shah Rukh Khan|Kajol,Karan Johar,Karan Johar,1998
Hera Pheri,Comedy,Akshay Kumar|Suniel Shetty,Priyadarshan,Neeraj Vora,2000
,Drama,Nobody,,,2001
";

/// Serves posters for titles starting with "S" and fails for everything else
struct StubPosters;

#[async_trait::async_trait]
impl PosterLookup for StubPosters {
    async fn fetch_poster(&self, title: &str) -> AppResult<Option<String>> {
        if title.starts_with('S') {
            Ok(Some(format!("https://img.example/{}.jpg", title.to_lowercase())))
        } else {
            Err(AppError::ExternalApi("lookup timed out".to_string()))
        }
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

fn corpus_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    write!(file, "{}", contents).expect("write corpus");
    file
}

async fn create_test_server_with(posters: PosterService) -> (TestServer, NamedTempFile) {
    let file = corpus_file(CORPUS);
    let loader = IndexLoader::load(file.path()).await.expect("load corpus");
    let state = AppState::new(loader, posters);
    let server = TestServer::new(create_router(Arc::new(state))).expect("test server");
    (server, file)
}

async fn create_test_server() -> (TestServer, NamedTempFile) {
    create_test_server_with(PosterService::placeholder_only(PLACEHOLDER.to_string())).await
}

#[tokio::test]
async fn test_health_check() {
    let (server, _corpus) = create_test_server().await;
    let response = server.get("/health").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_list_titles_sorted_without_untitled_rows() {
    let (server, _corpus) = create_test_server().await;

    let response = server.get("/api/v1/titles").await;
    response.assert_status_ok();

    let titles: Vec<String> = response.json();
    assert_eq!(
        titles,
        vec![
            "Deewaar",
            "Dilwale Dulhania Le Jayenge",
            "Hera Pheri",
            "Kuch Kuch Hota Hai",
            "Sholay",
        ]
    );
}

#[tokio::test]
async fn test_recommend_best_match() {
    let (server, _corpus) = create_test_server().await;

    let response = server
        .get("/api/v1/recommendations")
        .add_query_param("title", "Sholay")
        .add_query_param("top_n", 1)
        .await;
    response.assert_status_ok();

    let body: RecommendationResponse = response.json();
    assert!(body.found);
    assert_eq!(body.recommendations.len(), 1);
    assert_eq!(body.recommendations[0].title, "Deewaar");
    assert!(body.recommendations[0].score > 0.0);
    assert!(body.recommendations[0].poster.is_none());
}

#[tokio::test]
async fn test_recommend_is_case_insensitive() {
    let (server, _corpus) = create_test_server().await;

    let lower: RecommendationResponse = server
        .get("/api/v1/recommendations")
        .add_query_param("title", "dilwale dulhania le jayenge")
        .await
        .json();
    let upper: RecommendationResponse = server
        .get("/api/v1/recommendations")
        .add_query_param("title", "DILWALE DULHANIA LE JAYENGE")
        .await
        .json();

    assert_eq!(lower.recommendations, upper.recommendations);
    assert_eq!(lower.recommendations[0].title, "Kuch Kuch Hota Hai");
}

#[tokio::test]
async fn test_recommend_default_top_n_bounded_by_corpus() {
    let (server, _corpus) = create_test_server().await;

    let body: RecommendationResponse = server
        .get("/api/v1/recommendations")
        .add_query_param("title", "Hera Pheri")
        .await
        .json();

    // Five items in the corpus leave four neighbours
    assert_eq!(body.recommendations.len(), 4);
    assert!(body.recommendations.iter().all(|r| r.title != "Hera Pheri"));
}

#[tokio::test]
async fn test_recommend_unknown_title_is_not_an_error() {
    let (server, _corpus) = create_test_server().await;

    let response = server
        .get("/api/v1/recommendations")
        .add_query_param("title", "NoSuchMovie__xyz")
        .await;
    response.assert_status_ok();

    let body: RecommendationResponse = response.json();
    assert!(!body.found);
    assert!(body.recommendations.is_empty());
}

#[tokio::test]
async fn test_recommend_rejects_zero_top_n() {
    let (server, _corpus) = create_test_server().await;

    let response = server
        .get("/api/v1/recommendations")
        .add_query_param("title", "Sholay")
        .add_query_param("top_n", 0)
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_recommend_with_placeholder_posters() {
    let (server, _corpus) = create_test_server().await;

    let body: RecommendationResponse = server
        .get("/api/v1/recommendations")
        .add_query_param("title", "Sholay")
        .add_query_param("top_n", 2)
        .add_query_param("posters", true)
        .await
        .json();

    assert_eq!(body.recommendations.len(), 2);
    for recommendation in &body.recommendations {
        let poster = recommendation.poster.as_ref().expect("poster attached");
        assert!(poster.placeholder);
        assert_eq!(poster.url, PLACEHOLDER);
    }
}

#[tokio::test]
async fn test_poster_failures_degrade_to_placeholder() {
    let posters = PosterService::new(Some(Arc::new(StubPosters)), PLACEHOLDER.to_string());
    let (server, _corpus) = create_test_server_with(posters).await;

    let body: Value = server
        .get("/api/v1/posters")
        .add_query_param("title", "Sholay")
        .await
        .json();
    assert_eq!(body["url"], "https://img.example/sholay.jpg");
    assert_eq!(body["placeholder"], false);

    let response = server
        .get("/api/v1/posters")
        .add_query_param("title", "Deewaar")
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["url"], PLACEHOLDER);
    assert_eq!(body["placeholder"], true);
}

#[tokio::test]
async fn test_lookup_title() {
    let (server, _corpus) = create_test_server().await;

    let movie: Movie = server
        .get("/api/v1/titles/lookup")
        .add_query_param("title", "hera pheri")
        .await
        .json();
    assert_eq!(movie.title, "Hera Pheri");
    assert_eq!(movie.release_year, Some(2000));

    let response = server
        .get("/api/v1/titles/lookup")
        .add_query_param("title", "Nope")
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_index_stats() {
    let (server, _corpus) = create_test_server().await;

    let stats: IndexStats = server.get("/api/v1/index").await.json();
    assert_eq!(stats.generation, 1);
    assert_eq!(stats.items, 5);
    assert!(stats.vocabulary_size > 0);
}

#[tokio::test]
async fn test_reload_publishes_new_generation() {
    let (server, corpus) = create_test_server().await;

    let updated = format!("{}Lagaan,Drama|Sport,Aamir Khan,Ashutosh Gowariker,Ashutosh Gowariker,2001\n", CORPUS);
    std::fs::write(corpus.path(), updated).expect("rewrite corpus");

    let response = server.post("/api/v1/index/reload").await;
    response.assert_status_ok();
    let stats: IndexStats = response.json();
    assert_eq!(stats.generation, 2);
    assert_eq!(stats.items, 6);

    let body: RecommendationResponse = server
        .get("/api/v1/recommendations")
        .add_query_param("title", "Lagaan")
        .await
        .json();
    assert!(body.found);
}

#[tokio::test]
async fn test_failed_reload_keeps_serving_previous_generation() {
    let (server, corpus) = create_test_server().await;

    std::fs::write(corpus.path(), "name,genre\nLagaan,Drama\n").expect("rewrite corpus");

    let response = server.post("/api/v1/index/reload").await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("title column"));

    let stats: IndexStats = server.get("/api/v1/index").await.json();
    assert_eq!(stats.generation, 1);
    assert_eq!(stats.items, 5);
}

#[tokio::test]
async fn test_release_year_insights() {
    let (server, _corpus) = create_test_server().await;

    let years: Vec<YearCount> = server.get("/api/v1/insights/release-years").await.json();
    assert_eq!(
        years,
        vec![
            YearCount { year: 1975, count: 2 },
            YearCount { year: 1995, count: 1 },
            YearCount { year: 1998, count: 1 },
            YearCount { year: 2000, count: 1 },
        ]
    );
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let (server, _corpus) = create_test_server().await;
    let request_id = "6f1c1f7e-5d3b-4a51-9d7e-2f0f0c3b8a11";

    let response = server
        .get("/health")
        .add_header(
            axum::http::HeaderName::from_static("x-request-id"),
            axum::http::HeaderValue::from_static(request_id),
        )
        .await;

    assert_eq!(response.header("x-request-id"), request_id);
}
