use axum::{
    Router,
    extract::{Request, State, rejection::JsonRejection},
    http::{HeaderValue, StatusCode},
    middleware::{Next, from_fn},
    response::{Json, Response},
    routing::{get, post},
};
use reel_search::{GeminiGenerator, MovieFinder, MovieRecord, TmdbClient};
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{Instrument, error, info, warn};
use uuid::Uuid;

use crate::config::ServiceConfig;
use crate::models::{ErrorResponse, SearchRequest};

pub const CORRELATION_ID_HEADER: &str = "x-correlation-id";

type ApiError = (StatusCode, Json<ErrorResponse>);
type ApiResult<T> = Result<Json<T>, ApiError>;

fn bad_request_error(message: &str) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.to_string(),
            details: None,
        }),
    )
}

fn bad_gateway_error(message: &str, details: &str) -> ApiError {
    (
        StatusCode::BAD_GATEWAY,
        Json(ErrorResponse {
            error: message.to_string(),
            details: Some(details.to_string()),
        }),
    )
}

#[derive(Clone)]
pub struct AppState {
    pub finder: Arc<MovieFinder>,
}

impl AppState {
    pub fn new(finder: MovieFinder) -> Self {
        Self {
            finder: Arc::new(finder),
        }
    }

    /// Wires the Gemini generator and the TMDB client from startup config.
    pub fn from_config(config: &ServiceConfig) -> Self {
        let http = reqwest::Client::new();
        let generator = Arc::new(GeminiGenerator::new(
            http.clone(),
            config.genai_api_key.clone(),
            config.gemini_model.clone(),
        ));
        let provider = Arc::new(
            TmdbClient::new(http, config.tmdb_api_key.clone())
                .with_base_url(config.tmdb_base_url.clone()),
        );

        Self::new(MovieFinder::new(generator, provider))
    }
}

pub fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/search", post(search))
        .layer(from_fn(correlation_id_middleware))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

/// Tags the request and its response with a fresh correlation id and runs the
/// handler inside a span carrying it.
async fn correlation_id_middleware(mut request: Request, next: Next) -> Response {
    let correlation_id = Uuid::new_v4().to_string();
    let header_value = HeaderValue::from_str(&correlation_id).ok();

    if let Some(value) = &header_value {
        request
            .headers_mut()
            .insert(CORRELATION_ID_HEADER, value.clone());
    }

    let span = tracing::info_span!("http_request", correlation_id = %correlation_id);
    let mut response = next.run(request).instrument(span).await;

    if let Some(value) = header_value {
        response.headers_mut().insert(CORRELATION_ID_HEADER, value);
    }
    response
}

async fn root() -> Json<Value> {
    Json(json!({
        "service": "Reel Movie Search Service",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Describe a movie in your own words, get matching movies back",
        "endpoints": {
            "POST /search": "Search movies from a free-text description, body: {\"query\": \"...\"}",
            "GET /health": "Health check"
        }
    }))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn search(
    State(state): State<AppState>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> ApiResult<Vec<MovieRecord>> {
    let Json(request) = payload.map_err(|rejection| {
        warn!("Rejected search request: {}", rejection.body_text());
        bad_request_error(&rejection.body_text())
    })?;

    let query = request
        .query
        .ok_or_else(|| bad_request_error("Missing `query` field"))?;

    info!("Received search request: {}", query);

    let movies = state.finder.search(&query).await.map_err(|e| {
        error!("Search failed: {}", e);
        bad_gateway_error("Failed to generate movie suggestions", &e.to_string())
    })?;

    info!("Returning {} movies", movies.len());
    Ok(Json(movies))
}
