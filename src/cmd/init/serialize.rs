//! Serialize a [`Directory`] to the chosen output format.

use crate::cli::ConfigFormat;
use crate::config::model::Directory;
use crate::error::ExtdirError;

/// Serialize a `Directory` to a formatted string in the given format.
pub fn serialize_directory(
    directory: &Directory,
    format: &ConfigFormat,
) -> Result<String, ExtdirError> {
    match format {
        #[cfg(feature = "yaml")]
        ConfigFormat::Yaml => serde_yml::to_string(directory)
            .map_err(|e| ExtdirError::Io(std::io::Error::other(e.to_string()))),

        #[cfg(not(feature = "yaml"))]
        ConfigFormat::Yaml => Err(ExtdirError::UnsupportedFormat("yaml".into())),

        ConfigFormat::Json => serde_json::to_string_pretty(directory)
            .map_err(|e| ExtdirError::Io(std::io::Error::other(e.to_string()))),

        #[cfg(feature = "toml")]
        ConfigFormat::Toml => toml::to_string_pretty(directory)
            .map_err(|e| ExtdirError::Io(std::io::Error::other(e.to_string()))),

        #[cfg(not(feature = "toml"))]
        ConfigFormat::Toml => Err(ExtdirError::UnsupportedFormat("toml".into())),
    }
}
