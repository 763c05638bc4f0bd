use axum::{
    Router,
    extract::{State, rejection::JsonRejection},
    http::{HeaderValue, Request, StatusCode},
    middleware::{Next, from_fn},
    response::Json,
    routing::{get, post},
};
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{Instrument, error, info, warn};
use uuid::Uuid;

use crate::{
    config::ServiceConfig,
    error::{GenerationError, ValidationError},
    llm::{ChatModel, OpenRouterChat},
    models::{ArticleResult, GenerationRequest},
    workflow::ArticleWorkflow,
};

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<Value>)>;
type ApiError = (StatusCode, Json<Value>);

const STATUS_MESSAGE: &str =
    "Keyword article API: one base keyword -> several quality long-tail keywords, each with related keywords and promotional copy.";

fn bad_request_error(message: &str) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message })))
}

fn internal_error(message: &str) -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": message })),
    )
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServiceConfig>,
    pub workflow: Arc<ArticleWorkflow>,
}

impl AppState {
    pub fn new(config: ServiceConfig, model: Arc<dyn ChatModel>) -> Self {
        let workflow = ArticleWorkflow::new(model, config.pacing);
        Self {
            config: Arc::new(config),
            workflow: Arc::new(workflow),
        }
    }
}

/// Build the application against the real OpenRouter model
pub fn create_app(config: ServiceConfig) -> Router {
    let model: Arc<dyn ChatModel> = Arc::new(OpenRouterChat::new(&config.api_key, &config.model));
    build_router(AppState::new(config, model))
}

pub fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/generate", post(generate))
        .layer(from_fn(correlation_id_middleware))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

/// Tag every request with a correlation ID and run it inside a span carrying it
async fn correlation_id_middleware(
    mut request: Request<axum::body::Body>,
    next: Next,
) -> axum::response::Response {
    let correlation_id = Uuid::new_v4().to_string();

    if let Ok(value) = HeaderValue::from_str(&correlation_id) {
        request.headers_mut().insert("x-correlation-id", value);
    }

    let span = tracing::info_span!("http_request", correlation_id = %correlation_id);
    next.run(request).instrument(span).await
}

async fn root() -> &'static str {
    STATUS_MESSAGE
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn generate(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Vec<ArticleResult>> {
    let Json(body) = body.map_err(|rejection| {
        warn!(error = %rejection.body_text(), "Rejected malformed generate body");
        bad_request_error(&ValidationError::MalformedBody(rejection.body_text()).to_string())
    })?;

    let request = GenerationRequest::from_json(&body, &state.config.default_url).map_err(|e| {
        warn!(error = %e, "Rejected generate request");
        bad_request_error(&e.to_string())
    })?;

    info!(
        base_keyword = %request.base_keyword,
        num_articles = request.num_articles,
        url = %request.url,
        "Processing generate request"
    );

    match state.workflow.run(&request).await {
        Ok(results) => Ok(Json(results)),
        Err(GenerationError::NoKeywords) => {
            error!(base_keyword = %request.base_keyword, "Keyword expansion returned no keywords");
            Err(internal_error(&GenerationError::NoKeywords.to_string()))
        }
        Err(e) => {
            error!(base_keyword = %request.base_keyword, error = %e, "Keyword expansion failed");
            Err(internal_error(&format!("{}: {}", GenerationError::NoKeywords, e)))
        }
    }
}
