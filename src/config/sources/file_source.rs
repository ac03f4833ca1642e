//! Generic async file-based directory source with SHA256 change detection.
//!
//! [`FileSource`] implements [`ConfigSource`]
//! for any file format by accepting a deserialization function at
//! construction time. It reads the file asynchronously via Tokio,
//! resolves secrets, validates the result, and computes a SHA256 hash
//! for version tracking.

use std::path::PathBuf;

use async_trait::async_trait;

use super::{resolve_and_validate, sha256_hex};
use crate::config::model::Directory;
use crate::config::{ConfigSource, ConfigVersion};
use crate::error::ExtdirError;

pub struct FileSource {
    path: PathBuf,
    name: &'static str,
    deserialize: fn(&str) -> Result<Directory, Box<dyn std::error::Error + Send + Sync>>,
}

impl FileSource {
    #[must_use]
    pub fn new(
        path: PathBuf,
        name: &'static str,
        deserialize: fn(&str) -> Result<Directory, Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self {
            path,
            name,
            deserialize,
        }
    }

    async fn read_content(&self) -> Result<String, ExtdirError> {
        tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ExtdirError::ConfigFileNotFound {
                    path: self.path.clone(),
                }
            } else {
                ExtdirError::Io(e)
            }
        })
    }
}

#[async_trait]
impl ConfigSource for FileSource {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn load(&self) -> Result<(Directory, ConfigVersion), ExtdirError> {
        let content = self.read_content().await?;

        let mut directory =
            (self.deserialize)(&content).map_err(|e| ExtdirError::ConfigParse {
                path: self.path.display().to_string(),
                source: e,
            })?;

        resolve_and_validate(&mut directory)?;

        let hash = sha256_hex(content.as_bytes());
        Ok((directory, ConfigVersion::Hash(hash)))
    }

    async fn has_changed(&self, current: &ConfigVersion) -> Result<bool, ExtdirError> {
        let content = self.read_content().await?;
        let hash = sha256_hex(content.as_bytes());
        Ok(*current != ConfigVersion::Hash(hash))
    }
}
