//! Read-only HTTP API over the loaded directory.
//!
//! Two handlers: [`lookup_handler`] resolves one extension to its full
//! tenant record (the dialplan-side consumers need the credentials, so
//! nothing is redacted here), and [`list_handler`] produces an
//! administrative summary that deliberately omits secret fields.
//!
//! An unknown extension is a plain 404 with a JSON error body; choosing
//! a fallback (route to an operator, play a generic prompt) is the
//! caller's decision, not this service's.

use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::config::model::{Directory, ExtensionConfig};
use crate::server::AppState;

#[derive(Serialize, Deserialize)]
pub struct ListResponse {
    pub count: usize,
    pub extensions: Vec<ExtensionSummary>,
}

/// Non-secret subset of a tenant record for admin listings.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionSummary {
    pub extension: String,
    pub name: String,
    pub tts_engine: String,
    pub default_language: String,
    pub callback_mode: u8,
    pub days_valid: u32,
}

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub extension: String,
}

impl ExtensionSummary {
    fn new(extension: &str, config: &ExtensionConfig) -> Self {
        Self {
            extension: extension.to_string(),
            name: config.name.clone(),
            tts_engine: config.tts_engine.as_str().to_string(),
            default_language: config.default_language.clone(),
            callback_mode: config.callback_mode.as_u8(),
            days_valid: config.days_valid,
        }
    }
}

async fn snapshot(state: &AppState) -> Arc<Directory> {
    // Clone Arc<Directory> (cheap refcount bump) to release the lock quickly
    let loaded = state.directory.read().await;
    Arc::clone(&loaded.directory)
}

pub async fn lookup_handler(
    State(state): State<Arc<AppState>>,
    Path(extension): Path<String>,
) -> Response {
    let directory = snapshot(&state).await;
    state.stats.lookups.fetch_add(1, Ordering::Relaxed);

    match directory.lookup(&extension) {
        Some(config) => {
            tracing::debug!(extension = %extension, tenant = %config.name, "extension resolved");
            Json(config.clone()).into_response()
        }
        None => {
            state.stats.misses.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(extension = %extension, "extension not found");
            (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: "unknown extension".to_string(),
                    extension,
                }),
            )
                .into_response()
        }
    }
}

pub async fn list_handler(State(state): State<Arc<AppState>>) -> Json<ListResponse> {
    let directory = snapshot(&state).await;

    let extensions: Vec<ExtensionSummary> = directory
        .iter()
        .map(|(extension, config)| ExtensionSummary::new(extension, config))
        .collect();

    Json(ListResponse {
        count: extensions.len(),
        extensions,
    })
}
