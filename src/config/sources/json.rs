//! JSON directory source backed by [`FileSource`].
//!
//! JSON is the shape the dialplan-side scripts historically consumed,
//! so it stays the interchange format for admin tooling.

use std::path::PathBuf;

use super::file_source::FileSource;
use crate::config::model::Directory;

#[must_use]
pub fn new(path: PathBuf) -> FileSource {
    FileSource::new(path, "json", |content| {
        serde_json::from_str::<Directory>(content)
            .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)
    })
}
