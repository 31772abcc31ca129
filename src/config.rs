//! Workspace settings (`.ts-catalogue.json`) and catalogue file matching.

/// Config file loader
mod loader;
/// Configuration manager
mod manager;
/// Catalogue file pattern matcher
mod matcher;
/// Configuration types and settings
mod types;

pub use loader::CONFIG_FILE_NAME;
pub use manager::ConfigManager;
pub use matcher::{
    FileMatcher,
    MatcherError,
};
pub use types::{
    CatalogueSettings,
    ConfigError,
    FilePatternsConfig,
    ValidationError,
};
