//! extdir is a PBX extension tenant directory.
//!
//! It loads a per-extension settings table (API credentials, callback
//! policy, TTS engine, geocoding acceptance rules), validates every
//! record exhaustively at load time, and serves exact-match lookups to
//! the IVR call-handling side over a small read-only HTTP API. The
//! directory is immutable once loaded; a background refresh loop swaps
//! in a freshly validated copy when the source file changes.
//!
//! # Architecture
//!
//! - [`cli`] -- Command-line argument parsing with clap derive macros.
//! - [`cmd`] -- Subcommand dispatch and execution (run, init, validate,
//!   lookup, health).
//! - [`config`] -- Directory loading, validation, secret resolution, and
//!   hot-reloading via the [`ConfigSource`](config::ConfigSource) trait.
//! - [`error`] -- Unified error types using `thiserror`.
//! - [`api`] -- `GET /extensions` and `GET /extensions/{exten}` handlers.
//! - [`health`] -- `GET /health` endpoint handler returning runtime
//!   diagnostics.
//! - [`logging`] -- Structured tracing setup with JSON and pretty-print
//!   output.
//! - [`server`] -- Axum server setup, shared application state, and
//!   graceful shutdown.
//!
//! # Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `yaml` | YAML tenants file support _(enabled by default)_ |
//! | `json` | JSON tenants file support |
//! | `toml` | TOML tenants file support |
//! | `file-backends` | All file format backends |
//! | `full` | All features |

// Binary crate — public functions are internal, not consumed by external users.
#![allow(clippy::missing_errors_doc)]

pub mod api;
pub mod cli;
pub mod cmd;
pub mod config;
pub mod error;
pub mod health;
pub mod logging;
pub mod server;
