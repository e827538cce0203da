//! JSON HTTP API for the tool directory.
//!
//! Every handler runs the pure ranking pipeline over the shared, read-only
//! catalog held by a [`Directory`]; vote tallies are merged per request.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/health` | Health check (version, tool count, catalog digest) |
//! | `GET`  | `/tools` | Search, filter, and sort the catalog |
//! | `GET`  | `/tools/featured` | Featured strip |
//! | `GET`  | `/tools/{slug}` | One tool with its current votes |
//! | `GET`  | `/tools/{slug}/related` | Related tools with scores |
//! | `POST` | `/tools/{slug}/vote` | Apply a toggle vote |
//!
//! `GET /tools` accepts `q`, `tags` and `pricing` (comma-separated),
//! `min_score`, `verified`, `curator_picks`, `sort`, `limit`, and `viewer`.
//!
//! # Error Contract
//!
//! ```json
//! { "error": { "code": "not_found", "message": "tool not found: foo" } }
//! ```
//!
//! Error codes: `bad_request` (400), `not_found` (404), `internal` (500).
//!
//! # CORS
//!
//! All origins, methods, and headers are permitted so the directory
//! frontend can be served from a different origin.

use axum::{
    extract::{ConnectInfo, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tooldex_core::featured::FeaturedPolicy;
use tooldex_core::filter::ToolFilter;
use tooldex_core::models::{PricingModel, Tool, VoteDirection, Votes, MAX_SCORE, MIN_SCORE};
use tooldex_core::pipeline::{BrowseRequest, BrowseResult};
use tooldex_core::recommend::Recommendation;
use tooldex_core::sort::SortBy;
use tower_http::cors::{Any, CorsLayer};

use crate::config::Config;
use crate::directory::Directory;

/// Load the catalog and serve it on `[server].bind`.
///
/// Runs until the process is terminated.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let dir = Directory::open(config).await?;
    run_server_with_directory(dir).await
}

/// Serve an already-opened [`Directory`].
pub async fn run_server_with_directory(dir: Directory) -> anyhow::Result<()> {
    let bind_addr = dir.config.server.bind.clone();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(
        addr = %bind_addr,
        tools = dir.catalog.tools.len(),
        "tooldex server listening"
    );
    println!("tooldex server listening on http://{}", bind_addr);

    axum::serve(
        listener,
        router(dir).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;
    Ok(())
}

/// Build the API router over `dir`.
pub fn router(dir: Directory) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handle_health))
        .route("/tools", get(handle_list))
        .route("/tools/featured", get(handle_featured))
        .route("/tools/{slug}", get(handle_tool))
        .route("/tools/{slug}/related", get(handle_related))
        .route("/tools/{slug}/vote", post(handle_vote))
        .layer(cors)
        .with_state(dir)
}

// ============ Error response ============

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

struct AppError {
    status: StatusCode,
    code: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

fn bad_request(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::BAD_REQUEST,
        code: "bad_request".to_string(),
        message: message.into(),
    }
}

fn not_found(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::NOT_FOUND,
        code: "not_found".to_string(),
        message: message.into(),
    }
}

fn internal(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        code: "internal".to_string(),
        message: message.into(),
    }
}

/// Map a directory error onto the HTTP error contract.
fn classify_error(err: anyhow::Error) -> AppError {
    let msg = err.to_string();
    if msg.contains("not found") {
        not_found(msg)
    } else if msg.contains("must not be empty") {
        bad_request(msg)
    } else {
        tracing::error!(error = %msg, "request failed");
        internal(msg)
    }
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
    tools: usize,
    catalog_sha256: String,
}

async fn handle_health(State(dir): State<Directory>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        tools: dir.catalog.tools.len(),
        catalog_sha256: dir.catalog.digest.clone(),
    })
}

// ============ GET /tools ============

#[derive(Debug, Default, Deserialize)]
struct ListQuery {
    q: Option<String>,
    tags: Option<String>,
    pricing: Option<String>,
    min_score: Option<u8>,
    verified: Option<bool>,
    curator_picks: Option<bool>,
    sort: Option<String>,
    limit: Option<usize>,
    viewer: Option<String>,
}

fn split_list(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

impl ListQuery {
    fn to_request(&self) -> Result<BrowseRequest, AppError> {
        let pricing = split_list(self.pricing.as_deref())
            .iter()
            .map(|p| p.parse::<PricingModel>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(bad_request)?;
        let sort = match self.sort.as_deref() {
            Some(s) => s.parse::<SortBy>().map_err(bad_request)?,
            None => SortBy::default(),
        };
        let min_score = self.min_score.unwrap_or(MIN_SCORE);
        if !(MIN_SCORE..=MAX_SCORE).contains(&min_score) {
            return Err(bad_request(format!(
                "min_score must be between {} and {}",
                MIN_SCORE, MAX_SCORE
            )));
        }
        Ok(BrowseRequest {
            query: self.q.clone().unwrap_or_default(),
            filter: ToolFilter {
                tags: split_list(self.tags.as_deref()),
                pricing,
                min_score,
                verified_only: self.verified.unwrap_or(false),
                curator_picks_only: self.curator_picks.unwrap_or(false),
            },
            sort,
            limit: self.limit,
        })
    }
}

async fn handle_list(
    State(dir): State<Directory>,
    Query(params): Query<ListQuery>,
) -> Result<Json<BrowseResult>, AppError> {
    let req = params.to_request()?;
    let result = dir
        .browse(&req, params.viewer.as_deref())
        .await
        .map_err(classify_error)?;
    Ok(Json(result))
}

// ============ GET /tools/featured ============

#[derive(Debug, Deserialize)]
struct FeaturedQuery {
    count: Option<usize>,
    policy: Option<String>,
}

#[derive(Serialize)]
struct ToolsResponse {
    tools: Vec<Tool>,
}

async fn handle_featured(
    State(dir): State<Directory>,
    Query(params): Query<FeaturedQuery>,
) -> Result<Json<ToolsResponse>, AppError> {
    let policy = params
        .policy
        .as_deref()
        .map(str::parse::<FeaturedPolicy>)
        .transpose()
        .map_err(bad_request)?;
    let tools = dir
        .featured(params.count, policy)
        .await
        .map_err(classify_error)?;
    Ok(Json(ToolsResponse { tools }))
}

// ============ GET /tools/{slug} ============

#[derive(Debug, Deserialize)]
struct ViewerQuery {
    viewer: Option<String>,
}

async fn handle_tool(
    State(dir): State<Directory>,
    Path(slug): Path<String>,
    Query(params): Query<ViewerQuery>,
) -> Result<Json<Tool>, AppError> {
    let tool = dir
        .tool(&slug, params.viewer.as_deref())
        .await
        .map_err(classify_error)?;
    Ok(Json(tool))
}

// ============ GET /tools/{slug}/related ============

#[derive(Debug, Deserialize)]
struct RelatedQuery {
    limit: Option<usize>,
}

#[derive(Serialize)]
struct RelatedResponse {
    tools: Vec<Recommendation>,
}

async fn handle_related(
    State(dir): State<Directory>,
    Path(slug): Path<String>,
    Query(params): Query<RelatedQuery>,
) -> Result<Json<RelatedResponse>, AppError> {
    let tools = dir
        .related(&slug, params.limit)
        .await
        .map_err(classify_error)?;
    Ok(Json(RelatedResponse { tools }))
}

// ============ POST /tools/{slug}/vote ============

#[derive(Debug, Deserialize)]
struct VoteBody {
    /// Voter identity; the client address is used when absent.
    viewer: Option<String>,
    direction: VoteDirection,
}

async fn handle_vote(
    State(dir): State<Directory>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Path(slug): Path<String>,
    Json(body): Json<VoteBody>,
) -> Result<Json<Votes>, AppError> {
    let viewer = body.viewer.unwrap_or_else(|| addr.ip().to_string());
    let votes = dir
        .vote(&slug, &viewer, body.direction)
        .await
        .map_err(classify_error)?;
    Ok(Json(votes))
}
