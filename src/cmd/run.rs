//! `extdir run` — serve the tenant directory.
//!
//! Loads the tenants file, starts the Axum HTTP server with graceful
//! shutdown, and spawns a background refresh loop that re-checks the
//! source and atomically swaps in a freshly validated directory on
//! change. A failed reload keeps the current directory serving.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::cli::RunArgs;
use crate::config::{sources, ConfigSource};
use crate::error::ExtdirError;
use crate::logging;
use crate::server::{self, AppState, LoadedDirectory, Stats};

pub async fn execute(args: RunArgs) -> Result<(), ExtdirError> {
    let log_format = logging::resolve_format(args.pretty, args.json);
    logging::init(&args.log_level, log_format);

    let source = resolve_config_source(args.config.as_deref()).await?;
    let (directory, version) = source.load().await?;

    let extension_count = directory.len();

    let loaded_directory = tokio::sync::RwLock::new(LoadedDirectory {
        directory: Arc::new(directory),
        version,
        source_name: source.name().to_string(),
        loaded_at: Instant::now(),
    });

    let state = Arc::new(AppState {
        directory: loaded_directory,
        start_time: Instant::now(),
        stats: Stats::new(),
    });

    // Shutdown signal: dropping shutdown_tx closes the channel and stops the refresh loop
    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);

    // Spawn directory refresh loop with cancellation
    let refresh_state = state.clone();
    let poll_interval = args.poll_interval;
    let refresh_handle = tokio::spawn(async move {
        refresh_loop(refresh_state, source, poll_interval, shutdown_rx).await;
    });

    let router = server::build_router(state);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;

    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(
        addr = %addr,
        extensions = extension_count,
        "extdir started"
    );

    // Wrap the shutdown signal to also stop the refresh loop immediately
    let graceful_shutdown = async move {
        server::shutdown_signal().await;
        let _ = shutdown_tx.send(true);
    };

    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(graceful_shutdown)
    .await?;

    // Wait for the refresh task to finish (catches panics)
    if let Err(e) = refresh_handle.await {
        tracing::error!(error = %e, "directory refresh task failed");
    }

    tracing::info!("extdir stopped");
    Ok(())
}

async fn resolve_config_source(
    explicit: Option<&std::path::Path>,
) -> Result<Box<dyn ConfigSource>, ExtdirError> {
    if let Some(path) = explicit {
        return create_file_source(path);
    }

    // Auto-detect in current directory
    let candidates = ["extdir.yaml", "extdir.yml", "extdir.json", "extdir.toml"];

    for name in &candidates {
        let path = PathBuf::from(name);
        if tokio::fs::try_exists(&path).await.unwrap_or(false) {
            tracing::info!(path = %path.display(), "auto-detected tenants file");
            return create_file_source(&path);
        }
    }

    Err(ExtdirError::NoConfigSource {
        hint: "Provide --config <file> or place an extdir.yaml in the working directory.\n  \
               Run 'extdir init' to create a tenants file."
            .into(),
    })
}

fn create_file_source(path: &std::path::Path) -> Result<Box<dyn ConfigSource>, ExtdirError> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    match ext {
        #[cfg(feature = "yaml")]
        "yaml" | "yml" => Ok(Box::new(sources::yaml::new(path.to_path_buf()))),

        #[cfg(feature = "json")]
        "json" => Ok(Box::new(sources::json::new(path.to_path_buf()))),

        #[cfg(feature = "toml")]
        "toml" => Ok(Box::new(sources::toml_source::new(path.to_path_buf()))),

        other => Err(ExtdirError::UnsupportedFormat(other.to_string())),
    }
}

async fn refresh_loop(
    state: Arc<AppState>,
    source: Box<dyn ConfigSource>,
    interval_secs: u64,
    mut shutdown: tokio::sync::watch::Receiver<bool>,
) {
    let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));
    interval.tick().await; // Skip first immediate tick

    loop {
        tokio::select! {
            _ = interval.tick() => {}
            _ = shutdown.changed() => {
                tracing::debug!("directory refresh loop shutting down");
                return;
            }
        }

        let current_version = {
            let loaded = state.directory.read().await;
            loaded.version.clone()
        };

        match source.has_changed(&current_version).await {
            Ok(true) => {
                tracing::info!("tenants file change detected, reloading");
                match source.load().await {
                    Ok((directory, version)) => {
                        let extension_count = directory.len();
                        let mut loaded = state.directory.write().await;
                        loaded.directory = Arc::new(directory);
                        loaded.version = version;
                        loaded.loaded_at = Instant::now();
                        drop(loaded);
                        state
                            .stats
                            .reloads
                            .fetch_add(1, std::sync::atomic::Ordering::Relaxed);
                        tracing::info!(extensions = extension_count, "directory reloaded");
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "reload failed, keeping current directory");
                    }
                }
            }
            Ok(false) => {}
            Err(e) => {
                tracing::warn!(error = %e, "change check failed");
            }
        }
    }
}
