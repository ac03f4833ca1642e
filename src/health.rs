//! `GET /health` endpoint handler.
//!
//! Returns a [`HealthResponse`] JSON payload containing the server
//! version, uptime, directory source metadata, loaded extension count,
//! and cumulative lookup statistics.

use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::server::AppState;

#[derive(Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub directory: DirectoryHealth,
    pub stats: StatsResponse,
}

#[derive(Serialize, Deserialize)]
pub struct DirectoryHealth {
    pub source: String,
    pub version: String,
    pub loaded_ago_seconds: u64,
    pub extensions: usize,
}

#[derive(Serialize, Deserialize)]
pub struct StatsResponse {
    pub lookups: u64,
    pub misses: u64,
    pub reloads: u64,
}

pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    // Clone Arc<Directory> (cheap refcount bump) to release the lock quickly
    let (directory, source_name, version_str, loaded_ago) = {
        let loaded = state.directory.read().await;
        let directory = Arc::clone(&loaded.directory);
        let version_str = match &loaded.version {
            crate::config::ConfigVersion::Hash(h) => h.get(..8).unwrap_or(h).to_string(),
        };
        (
            directory,
            loaded.source_name.clone(),
            version_str,
            loaded.loaded_at.elapsed().as_secs(),
        )
    };

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        directory: DirectoryHealth {
            source: source_name,
            version: version_str,
            loaded_ago_seconds: loaded_ago,
            extensions: directory.len(),
        },
        stats: StatsResponse {
            lookups: state.stats.lookups.load(Ordering::Relaxed),
            misses: state.stats.misses.load(Ordering::Relaxed),
            reloads: state.stats.reloads.load(Ordering::Relaxed),
        },
    })
}
