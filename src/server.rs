//! Thin HTTP surface over the search pipeline. Handlers validate input,
//! delegate, and map errors; no pipeline logic lives here.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use crate::search::SearchPipeline;
use crate::wiki::ArticleSource;

const INDEX_HTML: &str = include_str!("../assets/index.html");

#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    pub query: String,
}

pub fn router<A>(pipeline: Arc<SearchPipeline<A>>) -> Router
where
    A: ArticleSource + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/search", post(search::<A>))
        .with_state(pipeline)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({"status": "ok"}))
}

async fn search<A>(
    State(pipeline): State<Arc<SearchPipeline<A>>>,
    Json(request): Json<QueryRequest>,
) -> Response
where
    A: ArticleSource + Send + Sync + 'static,
{
    info!(query = %request.query, "http:search");
    match pipeline.rank(&request.query).await {
        Ok(results) => {
            info!(results = results.len(), "search complete");
            Json(results).into_response()
        }
        Err(e) => {
            warn!(error = %e, "search pipeline failed");
            (StatusCode::BAD_GATEWAY, Json(json!({"error": e.to_string()}))).into_response()
        }
    }
}
