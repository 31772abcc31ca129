//! Catalogue file discovery.

/// Directory walk and per-language selection
mod discovery;
/// Indexer types
mod types;

pub use discovery::{
    discover,
    select_for_language,
    select_layers,
};
pub use types::{
    CatalogueFile,
    IndexerError,
};
