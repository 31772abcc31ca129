use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::catalogue::LoadOptions;
use crate::language::is_language_tag;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "filePatterns.includePatterns[0]")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Contents of `.ts-catalogue.json`. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CatalogueSettings {
    /// Directory holding the `.ts` files, relative to the workspace root.
    pub translations_dir: String,

    pub file_patterns: FilePatternsConfig,

    /// Language to activate when none is requested explicitly.
    pub language: Option<String>,

    /// Take the plural rule from this language instead of the document's.
    pub plural_rule_override: Option<String>,

    /// Resolve translations still marked `type="unfinished"`.
    pub include_unfinished: bool,

    /// Keep vanished/obsolete messages in memory for re-serialization.
    pub keep_retired: bool,

    /// File name prefixes of the catalogues to stack for one language, in
    /// lookup order, e.g. `["wireshark", "qt"]`. Empty means one catalogue.
    pub layers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilePatternsConfig {
    /// Globs relative to `translationsDir`.
    pub include_patterns: Vec<String>,
    pub exclude_patterns: Vec<String>,
}

impl Default for FilePatternsConfig {
    fn default() -> Self {
        Self { include_patterns: vec!["**/*.ts".to_string()], exclude_patterns: Vec::new() }
    }
}

impl Default for CatalogueSettings {
    fn default() -> Self {
        Self {
            translations_dir: "translations".to_string(),
            file_patterns: FilePatternsConfig::default(),
            language: None,
            plural_rule_override: None,
            include_unfinished: true,
            keep_retired: true,
            layers: Vec::new(),
        }
    }
}

impl CatalogueSettings {
    /// # Errors
    /// - Required field is empty
    /// - Invalid glob pattern
    /// - Unknown language tag
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.translations_dir.trim().is_empty() {
            errors.push(ValidationError::new(
                "translationsDir",
                "The directory cannot be empty. Example: \"ui/qt\"",
            ));
        }

        if self.file_patterns.include_patterns.is_empty() {
            errors.push(ValidationError::new(
                "filePatterns.includePatterns",
                "At least one pattern is required. Example: [\"**/*.ts\"]",
            ));
        }

        for (index, pattern) in self.file_patterns.include_patterns.iter().enumerate() {
            if let Err(e) = globset::Glob::new(pattern) {
                errors.push(ValidationError::new(
                    format!("filePatterns.includePatterns[{index}]"),
                    format!("Invalid glob pattern '{pattern}': {e}"),
                ));
            }
        }

        for (index, pattern) in self.file_patterns.exclude_patterns.iter().enumerate() {
            if let Err(e) = globset::Glob::new(pattern) {
                errors.push(ValidationError::new(
                    format!("filePatterns.excludePatterns[{index}]"),
                    format!("Invalid glob pattern '{pattern}': {e}"),
                ));
            }
        }

        for (field, value) in
            [("language", &self.language), ("pluralRuleOverride", &self.plural_rule_override)]
        {
            if let Some(tag) = value
                && !is_language_tag(tag)
            {
                errors.push(ValidationError::new(
                    field,
                    format!("Unknown language tag '{tag}'. Example: \"it\" or \"pt_BR\""),
                ));
            }
        }

        for (index, layer) in self.layers.iter().enumerate() {
            if layer.trim().is_empty() || layer.contains(['/', '\\', '*', '?']) {
                errors.push(ValidationError::new(
                    format!("layers[{index}]"),
                    format!("Invalid layer '{layer}'. Use a file name prefix such as \"qt\""),
                ));
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Options for loading catalogues under these settings.
    #[must_use]
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            include_unfinished: self.include_unfinished,
            keep_retired: self.keep_retired,
            plural_language: self.plural_rule_override.clone(),
        }
    }
}
