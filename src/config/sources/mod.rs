//! Concrete [`ConfigSource`](super::ConfigSource) implementations.
//!
//! Provides file-based sources (YAML, JSON, TOML) gated by feature
//! flags, the [`parse_directory_str`] helper for format-specific
//! deserialization, and the shared load pipeline
//! ([`resolve_and_validate`]) that every source runs after parsing.

pub mod file_source;

#[cfg(feature = "yaml")]
pub mod yaml;

#[cfg(feature = "json")]
pub mod json;

#[cfg(feature = "toml")]
pub mod toml_source;

use sha2::{Digest, Sha256};

use crate::config::model::Directory;
use crate::config::{secrets, validation};
use crate::error::ExtdirError;

/// Parse a directory string based on file extension.
pub fn parse_directory_str(
    ext: &str,
    content: &str,
    path_display: &str,
) -> Result<Directory, ExtdirError> {
    match ext {
        #[cfg(feature = "yaml")]
        "yaml" | "yml" => serde_yml::from_str(content).map_err(|e| ExtdirError::ConfigParse {
            path: path_display.to_string(),
            source: Box::new(e),
        }),

        #[cfg(feature = "json")]
        "json" => serde_json::from_str(content).map_err(|e| ExtdirError::ConfigParse {
            path: path_display.to_string(),
            source: Box::new(e),
        }),

        #[cfg(feature = "toml")]
        "toml" => toml::from_str(content).map_err(|e| ExtdirError::ConfigParse {
            path: path_display.to_string(),
            source: Box::new(e),
        }),

        other => Err(ExtdirError::UnsupportedFormat(other.to_string())),
    }
}

/// Compute a lowercase hex-encoded SHA-256 digest.
#[must_use]
pub fn sha256_hex(data: &[u8]) -> String {
    format!("{:x}", Sha256::digest(data))
}

/// Resolve `env:` secret references, then validate the whole directory.
///
/// Secret-resolution failures and invariant violations are merged into
/// one exhaustive report so a single load attempt surfaces every
/// problem in the file.
pub fn resolve_and_validate(directory: &mut Directory) -> Result<(), ExtdirError> {
    let mut errors = secrets::resolve(directory);

    if let Err(validation_errors) = validation::validate(directory) {
        errors.extend(validation_errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ExtdirError::ConfigValidation { errors })
    }
}
