use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::{DefaultBodyLimit, Multipart, Path as AxumPath, Request, State};
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    CACHE_CONTROL,
};
use axum::http::{HeaderValue, Method, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;

mod info_runtime;
mod media_runtime;
mod server_bootstrap;
mod types;

use info_runtime::{InfoDeleteOutcome, InfoStore};
use media_runtime::{delete_media_file, list_media_entries, store_uploaded_media};
use types::{AddInfoRequest, ApiError};

pub use server_bootstrap::{build_site_router, run_site_server};

const MEDIA_LIST_ENDPOINT: &str = "/api/media";
const MEDIA_UPLOAD_ENDPOINT: &str = "/api/media/upload";
const MEDIA_DELETE_ENDPOINT: &str = "/api/media/{filename}";
const INFO_LIST_ENDPOINT: &str = "/api/info";
const INFO_ADD_ENDPOINT: &str = "/api/info/add";
const INFO_DELETE_ENDPOINT: &str = "/api/info/{alert_id}";
const MEDIA_URL_PREFIX: &str = "media";

const ALLOWED_METHODS: &str = "GET, POST, DELETE, OPTIONS";
const ALLOWED_HEADERS: &str = "Content-Type";
const NO_STORE_CACHE_CONTROL: &str = "no-store, no-cache, must-revalidate";

pub const DEFAULT_BIND: &str = "0.0.0.0:8000";
pub const DEFAULT_MEDIA_DIR: &str = "media";
pub const DEFAULT_INFO_FILE: &str = "info.json";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 256 * 1024 * 1024;
pub const MAX_INFO_ALERTS: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Runtime settings for the site server.
pub struct SiteServerConfig {
    pub bind: String,
    pub site_root: PathBuf,
    pub media_dir: PathBuf,
    pub info_file: PathBuf,
    pub max_upload_bytes: usize,
}

impl SiteServerConfig {
    /// Config with media and announcements stored under `site_root`.
    pub fn for_site_root(site_root: impl Into<PathBuf>) -> Self {
        let site_root = site_root.into();
        Self {
            bind: DEFAULT_BIND.to_string(),
            media_dir: site_root.join(DEFAULT_MEDIA_DIR),
            info_file: site_root.join(DEFAULT_INFO_FILE),
            site_root,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

/// Shared state handed to every handler.
pub struct SiteServerState {
    config: SiteServerConfig,
    info: InfoStore,
}

impl SiteServerState {
    pub fn new(config: SiteServerConfig) -> Self {
        let info = InfoStore::new(config.info_file.clone());
        Self { config, info }
    }

    pub fn config(&self) -> &SiteServerConfig {
        &self.config
    }

    fn media_dir(&self) -> &Path {
        self.config.media_dir.as_path()
    }
}

async fn answer_preflight(request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        return StatusCode::OK.into_response();
    }
    next.run(request).await
}

async fn handle_media_list(State(state): State<Arc<SiteServerState>>) -> Response {
    match list_media_entries(state.media_dir()).await {
        Ok(entries) => {
            tracing::debug!(count = entries.len(), "media list served");
            (StatusCode::OK, Json(json!({ "media": entries }))).into_response()
        }
        Err(error) => ApiError::internal(format!("failed to list media: {error:#}")).into_response(),
    }
}

async fn handle_media_upload(
    State(state): State<Arc<SiteServerState>>,
    multipart: Multipart,
) -> Response {
    match store_uploaded_media(state.media_dir(), multipart).await {
        Ok(stored) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "filename": stored.filename,
                "caption": stored.caption,
            })),
        )
            .into_response(),
        Err(error) => error.into_response(),
    }
}

async fn handle_media_delete(
    State(state): State<Arc<SiteServerState>>,
    AxumPath(filename): AxumPath<String>,
) -> Response {
    match delete_media_file(state.media_dir(), filename.as_str()).await {
        Ok(()) => (StatusCode::OK, Json(json!({ "success": true }))).into_response(),
        Err(error) => error.into_response(),
    }
}

async fn handle_info_list(State(state): State<Arc<SiteServerState>>) -> Response {
    match state.info.list().await {
        Ok(alerts) => (StatusCode::OK, Json(json!({ "alerts": alerts }))).into_response(),
        Err(error) => {
            ApiError::internal(format!("failed to read alerts: {error:#}")).into_response()
        }
    }
}

async fn handle_info_add(
    State(state): State<Arc<SiteServerState>>,
    Json(request): Json<AddInfoRequest>,
) -> Response {
    let message = request.message.trim();
    if message.is_empty() {
        return ApiError::bad_request("empty_message", "alert message cannot be empty")
            .into_response();
    }
    match state.info.add(message).await {
        Ok(alert) => (
            StatusCode::OK,
            Json(json!({ "success": true, "alert": alert })),
        )
            .into_response(),
        Err(error) => ApiError::internal(format!("failed to add alert: {error:#}")).into_response(),
    }
}

async fn handle_info_delete(
    State(state): State<Arc<SiteServerState>>,
    AxumPath(alert_id): AxumPath<String>,
) -> Response {
    let Ok(alert_id) = alert_id.trim().parse::<u64>() else {
        return ApiError::bad_request("invalid_alert_id", format!("invalid alert id '{alert_id}'"))
            .into_response();
    };
    match state.info.delete(alert_id).await {
        Ok(InfoDeleteOutcome::Deleted) => {
            (StatusCode::OK, Json(json!({ "success": true }))).into_response()
        }
        Ok(InfoDeleteOutcome::StoreMissing) => {
            ApiError::not_found("info_store_missing", "announcement file not found")
                .into_response()
        }
        Ok(InfoDeleteOutcome::NotFound) => {
            ApiError::not_found("alert_not_found", format!("alert {alert_id} not found"))
                .into_response()
        }
        Err(error) => {
            ApiError::internal(format!("failed to delete alert: {error:#}")).into_response()
        }
    }
}
