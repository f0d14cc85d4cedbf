mod config;
mod page;

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use axum::body::{Body, Bytes};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::http::{header, HeaderValue, Method, Request, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use wander_core::{
    generate_itinerary, render_html, Catalog, Destination, Itinerary, MatchKind, PlanRequest,
};
use wander_observability::{AppMetrics, ItineraryStats, MetricsSnapshot};

pub use config::ApiConfig;
pub use page::{render_page, GenerateForm};

#[derive(Clone)]
pub struct ApiState {
    pub catalog: Arc<Catalog>,
    pub metrics: Arc<AppMetrics>,
}

impl ApiState {
    pub fn new(catalog: Catalog, metrics: Arc<AppMetrics>) -> Self {
        Self {
            catalog: Arc::new(catalog),
            metrics,
        }
    }

    fn plan(&self, request: &PlanRequest) -> Itinerary {
        let started = Instant::now();
        let itinerary = generate_itinerary(request, &self.catalog);

        self.metrics.record_itinerary(ItineraryStats {
            days: itinerary.days.len(),
            free_exploration_days: itinerary.free_exploration_days(),
            destination_fallback: itinerary.matched_by == MatchKind::Fallback,
            over_budget: itinerary.budget.is_some_and(|budget| !budget.within_budget),
            latency: started.elapsed(),
        });

        info!(
            query = %request.destination,
            destination = %itinerary.destination,
            matched_by = ?itinerary.matched_by,
            days = itinerary.days.len(),
            total_cost = itinerary.cost.total,
            "itinerary generated"
        );
        itinerary
    }
}

/// JSON body of `POST /v1/itinerary`. Every field is optional and loosely
/// typed: `days` and `budget` take numbers or strings, `preferences` takes a
/// list (non-string items are skipped) or a single tag.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItineraryInput {
    #[serde(default)]
    pub destination: Option<Value>,
    #[serde(default)]
    pub days: Option<Value>,
    #[serde(default)]
    pub budget: Option<Value>,
    #[serde(default)]
    pub preferences: Option<Value>,
}

impl ItineraryInput {
    pub fn into_request(self) -> PlanRequest {
        let preferences = match self.preferences {
            Some(Value::Array(items)) => items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(tag) => Some(tag),
                    _ => None,
                })
                .collect(),
            Some(Value::String(tag)) => vec![tag],
            _ => Vec::new(),
        };

        PlanRequest::from_form(
            &raw_field(self.destination),
            &raw_field(self.days),
            &raw_field(self.budget),
            preferences,
        )
    }
}

fn raw_field(value: Option<Value>) -> String {
    match value {
        Some(Value::Number(number)) => number.to_string(),
        Some(Value::String(text)) => text,
        _ => String::new(),
    }
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp_utc: String,
    destinations: usize,
    metrics: MetricsSnapshot,
}

pub fn build_app(config: &ApiConfig) -> Result<Router> {
    let catalog = Catalog::load(config.catalog_path.as_deref()).with_context(|| {
        format!(
            "failed to load destination catalog from {}",
            config
                .catalog_path
                .as_ref()
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "<builtin>".to_string())
        )
    })?;
    info!(destinations = catalog.len(), "destination catalog loaded");

    let state = ApiState::new(catalog, AppMetrics::shared());
    Ok(build_router(state, config))
}

pub fn build_router(state: ApiState, config: &ApiConfig) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/generate", post(generate))
        .route("/health", get(health))
        .route("/v1/itinerary", post(itinerary))
        .route("/v1/destinations", get(destinations))
        .fallback(not_found)
        .layer(build_cors_layer(&config.allowed_origins))
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(RequestBodyLimitLayer::new(config.max_body_bytes))
        .with_state(state)
}

async fn index() -> Html<String> {
    Html(render_page(&GenerateForm::default(), None))
}

async fn generate(State(state): State<ApiState>, body: Bytes) -> Html<String> {
    let form = GenerateForm::from_urlencoded(&body);
    let request =
        PlanRequest::from_form(&form.destination, &form.days, &form.budget, &form.preferences);
    let itinerary = state.plan(&request);

    Html(render_page(&form, Some(&render_html(&itinerary))))
}

async fn itinerary(
    State(state): State<ApiState>,
    input: Result<Json<ItineraryInput>, JsonRejection>,
) -> Response {
    let Json(input) = match input {
        Ok(input) => input,
        Err(rejection) => {
            warn!(status = %rejection.status(), "rejected itinerary body");
            return (
                rejection.status(),
                Json(serde_json::json!({
                    "error": "invalid_request",
                    "message": rejection.body_text()
                })),
            )
                .into_response();
        }
    };

    let itinerary = state.plan(&input.into_request());
    (StatusCode::OK, Json(itinerary)).into_response()
}

async fn destinations(State(state): State<ApiState>) -> Json<Vec<Destination>> {
    Json(state.catalog.destinations().to_vec())
}

async fn health(State(state): State<ApiState>) -> impl IntoResponse {
    let payload = HealthResponse {
        status: "ok",
        timestamp_utc: chrono::Utc::now().to_rfc3339(),
        destinations: state.catalog.len(),
        metrics: state.metrics.snapshot(),
    };
    (StatusCode::OK, Json(payload))
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({
            "error": "not_found",
            "message": "no route for this path"
        })),
    )
}

fn build_cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins = allowed_origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect::<Vec<_>>();
    let origins = if origins.is_empty() {
        vec![HeaderValue::from_static("http://localhost:5500")]
    } else {
        origins
    };

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

async fn security_headers_middleware(request: Request<Body>, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(
        header::REFERRER_POLICY,
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );
    // The form page carries its own inline stylesheet.
    headers.insert(
        header::CONTENT_SECURITY_POLICY,
        HeaderValue::from_static(
            "default-src 'none'; style-src 'unsafe-inline'; form-action 'self'; frame-ancestors 'none'; base-uri 'none'",
        ),
    );

    response
}
