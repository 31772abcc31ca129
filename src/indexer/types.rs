//! Indexer type definitions.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// A `.ts` file found under the translations directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogueFile {
    pub path: PathBuf,
    /// Language detected from the path, e.g. `it` for `wireshark_it.ts`.
    pub language: Option<String>,
}

#[derive(Error, Debug)]
pub enum IndexerError {
    #[error("Translations directory not found: {}", .0.display())]
    RootNotFound(PathBuf),
    #[error("Translations path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
}
