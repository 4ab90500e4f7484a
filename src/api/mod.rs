use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use axum::{
    Router,
    extract::{
        Json, Query,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{debug, info};

use crate::core::{
    ChecklistItem, ConcernKind, ConcernResult, Feedback, Projection, Round, Scenario, Snapshot,
    UnknownConcernId,
};

pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind: IpAddr,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    UnknownConcern(#[from] UnknownConcernId),
    #[error("{message}")]
    BadRequest { status: StatusCode, message: String },
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::UnknownConcern(_) => StatusCode::BAD_REQUEST,
            ApiError::BadRequest { status, .. } => *status,
        }
    }
}

// Extractor rejections keep axum's status but leave through `error_response`.
impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error_response(self.status(), &self.to_string())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RoundQuery {
    seed: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DiagnosisPayload {
    seed: u64,
    #[serde(default)]
    selected: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RoundResponse<'a> {
    seed: u64,
    scenario: &'a Scenario,
    projection: &'a Projection,
    snapshot: Snapshot,
    checklist: Vec<ChecklistItem>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DiagnosisResponse<'a> {
    seed: u64,
    feedback: Feedback,
    concerns: &'a [ConcernResult],
}

#[derive(Debug, Serialize)]
struct CatalogueEntry {
    id: ConcernKind,
    title: &'static str,
    description: &'static str,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

pub fn create_router() -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/concerns", get(concerns_handler))
        .route("/api/round", get(round_handler))
        .route("/api/diagnosis", post(diagnosis_handler))
        .fallback(not_found_handler)
}

pub async fn run_http_server(config: ServerConfig) -> std::io::Result<()> {
    let addr = config.socket_addr();
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "reality check API listening");
    info!("local access: http://127.0.0.1:{}/api/round", config.port);

    axum::serve(listener, create_router()).await
}

async fn health_handler() -> Response {
    json_response(StatusCode::OK, serde_json::json!({ "status": "ok" }))
}

async fn concerns_handler() -> Response {
    let catalogue: Vec<CatalogueEntry> = ConcernKind::ALL
        .into_iter()
        .map(|id| CatalogueEntry {
            id,
            title: id.title(),
            description: id.description(),
        })
        .collect();
    json_response(StatusCode::OK, catalogue)
}

async fn round_handler(
    query: Result<Query<RoundQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(query) = query?;
    let seed = query.seed.unwrap_or_else(fresh_seed);
    let round = Round::deal(seed);
    debug!(seed, career = %round.scenario.career, "dealt round");
    Ok(json_response(StatusCode::OK, build_round_response(&round)))
}

async fn diagnosis_handler(
    payload: Result<Json<DiagnosisPayload>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(payload) = payload?;
    let selected = parse_selection(&payload.selected)?;
    let round = Round::deal(payload.seed);
    let response = build_diagnosis_response(&round, &selected);
    info!(
        seed = payload.seed,
        score = response.feedback.score,
        "graded diagnosis"
    );
    Ok(json_response(StatusCode::OK, response))
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

// Seeds stay below 2^53 so a browser can echo them back without rounding.
fn fresh_seed() -> u64 {
    rand::random::<u64>() >> 11
}

fn parse_selection(ids: &[String]) -> Result<Vec<ConcernKind>, ApiError> {
    ids.iter()
        .map(|id| id.parse::<ConcernKind>().map_err(ApiError::from))
        .collect()
}

fn build_round_response(round: &Round) -> RoundResponse<'_> {
    RoundResponse {
        seed: round.seed,
        scenario: &round.scenario,
        projection: &round.projection,
        snapshot: round.snapshot(),
        checklist: round.checklist(),
    }
}

fn build_diagnosis_response<'a>(
    round: &'a Round,
    selected: &[ConcernKind],
) -> DiagnosisResponse<'a> {
    DiagnosisResponse {
        seed: round.seed,
        feedback: round.submit(selected),
        concerns: &round.concerns,
    }
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}
