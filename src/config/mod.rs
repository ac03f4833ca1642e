//! Directory loading, validation, and hot-reloading.
//!
//! Defines the [`ConfigSource`] trait for pluggable directory backends
//! and the [`ConfigVersion`] enum for change detection. Submodules
//! provide the data model, validation logic, `env:` secret resolution,
//! and concrete source implementations.

pub mod model;
pub mod secrets;
pub mod sources;
pub mod validation;

use async_trait::async_trait;

use crate::error::ExtdirError;
use model::Directory;

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigVersion {
    Hash(String),
}

// async_trait is required here because ConfigSource is used as Box<dyn ConfigSource>
// and native async fn in traits (Rust 1.75+) does not support dyn dispatch.
#[async_trait]
pub trait ConfigSource: Send + Sync {
    fn name(&self) -> &'static str;
    async fn load(&self) -> Result<(Directory, ConfigVersion), ExtdirError>;
    async fn has_changed(&self, current: &ConfigVersion) -> Result<bool, ExtdirError>;
}
