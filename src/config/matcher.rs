//! File pattern matcher for catalogue files.

use std::path::{
    Path,
    PathBuf,
};

use globset::{
    Glob,
    GlobSet,
    GlobSetBuilder,
};

use super::CatalogueSettings;

#[derive(Debug, thiserror::Error)]
pub enum MatcherError {
    #[error("Invalid include pattern '{pattern}': {source}")]
    InvalidIncludePattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Invalid exclude pattern '{pattern}': {source}")]
    InvalidExcludePattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Failed to build glob set: {0}")]
    GlobSetBuild(#[from] globset::Error),
}

/// Matches paths under a translations directory against the configured globs.
#[derive(Debug, Clone)]
pub struct FileMatcher {
    root: PathBuf,
    include_set: GlobSet,
    exclude_set: GlobSet,
}

impl FileMatcher {
    /// Creates a matcher for files under `root`.
    ///
    /// # Errors
    /// Returns error if a pattern is not a valid glob.
    pub fn new(root: PathBuf, settings: &CatalogueSettings) -> Result<Self, MatcherError> {
        let include_set =
            Self::build_glob_set(&settings.file_patterns.include_patterns, |pattern, source| {
                MatcherError::InvalidIncludePattern { pattern, source }
            })?;

        let exclude_set =
            Self::build_glob_set(&settings.file_patterns.exclude_patterns, |pattern, source| {
                MatcherError::InvalidExcludePattern { pattern, source }
            })?;

        Ok(Self { root, include_set, exclude_set })
    }

    fn build_glob_set<F>(patterns: &[String], make_error: F) -> Result<GlobSet, MatcherError>
    where
        F: Fn(String, globset::Error) -> MatcherError,
    {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern).map_err(|e| make_error(pattern.clone(), e))?;
            builder.add(glob);
        }
        Ok(builder.build()?)
    }

    /// The translations directory patterns are relative to.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns true if the path matches `includePatterns` but not `excludePatterns`.
    ///
    /// The path must be under the root.
    #[must_use]
    pub fn is_catalogue_file(&self, path: &Path) -> bool {
        let Ok(relative_path) = path.strip_prefix(&self.root) else {
            return false;
        };

        self.is_catalogue_file_relative(relative_path)
    }

    /// Same as [`is_catalogue_file`](Self::is_catalogue_file) for a path relative to the root.
    #[must_use]
    pub fn is_catalogue_file_relative(&self, relative_path: &Path) -> bool {
        self.include_set.is_match(relative_path) && !self.exclude_set.is_match(relative_path)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::config::FilePatternsConfig;

    fn create_settings(include: &[&str], exclude: &[&str]) -> CatalogueSettings {
        CatalogueSettings {
            file_patterns: FilePatternsConfig {
                include_patterns: include.iter().copied().map(String::from).collect(),
                exclude_patterns: exclude.iter().copied().map(String::from).collect(),
            },
            ..CatalogueSettings::default()
        }
    }

    #[rstest]
    fn is_catalogue_file_with_default_patterns() {
        let matcher = FileMatcher::new(PathBuf::from("/ws/ui/qt"), &CatalogueSettings::default())
            .expect("valid patterns");

        assert!(matcher.is_catalogue_file(Path::new("/ws/ui/qt/wireshark_it.ts")));
        assert!(matcher.is_catalogue_file(Path::new("/ws/ui/qt/it_IT/wireshark.ts")));

        assert!(!matcher.is_catalogue_file(Path::new("/ws/ui/qt/wireshark_it.qm")));
        assert!(!matcher.is_catalogue_file(Path::new("/ws/ui/qt/CMakeLists.txt")));
    }

    #[rstest]
    fn is_catalogue_file_with_exclude_patterns() {
        let settings = create_settings(&["**/*.ts"], &["**/old/**", "*_en.ts"]);
        let matcher =
            FileMatcher::new(PathBuf::from("/ws/ui/qt"), &settings).expect("valid patterns");

        assert!(matcher.is_catalogue_file(Path::new("/ws/ui/qt/wireshark_it.ts")));
        assert!(!matcher.is_catalogue_file(Path::new("/ws/ui/qt/old/wireshark_it.ts")));
        assert!(!matcher.is_catalogue_file(Path::new("/ws/ui/qt/wireshark_en.ts")));
    }

    #[rstest]
    fn is_catalogue_file_outside_root() {
        let matcher = FileMatcher::new(PathBuf::from("/ws/ui/qt"), &CatalogueSettings::default())
            .expect("valid patterns");

        assert!(!matcher.is_catalogue_file(Path::new("/other/wireshark_it.ts")));
        assert!(!matcher.is_catalogue_file(Path::new("/ws/wireshark_it.ts")));
    }

    #[rstest]
    fn is_catalogue_file_relative_works() {
        let settings = create_settings(&["wireshark_*.ts"], &[]);
        let matcher =
            FileMatcher::new(PathBuf::from("/ws/ui/qt"), &settings).expect("valid patterns");

        assert!(matcher.is_catalogue_file_relative(Path::new("wireshark_de.ts")));
        assert!(!matcher.is_catalogue_file_relative(Path::new("stratoshark_de.ts")));
    }

    #[rstest]
    fn new_with_invalid_include_pattern() {
        let settings = create_settings(&["**/*.{ts"], &[]);

        let result = FileMatcher::new(PathBuf::from("/ws"), &settings);

        assert!(matches!(result, Err(MatcherError::InvalidIncludePattern { .. })));
    }

    #[rstest]
    fn new_with_invalid_exclude_pattern() {
        let settings = create_settings(&["**/*.ts"], &["[invalid"]);

        let result = FileMatcher::new(PathBuf::from("/ws"), &settings);

        assert!(matches!(result, Err(MatcherError::InvalidExcludePattern { .. })));
    }

    #[rstest]
    fn root_accessor() {
        let matcher = FileMatcher::new(PathBuf::from("/ws/ui/qt"), &CatalogueSettings::default())
            .expect("valid patterns");

        assert_eq!(matcher.root(), Path::new("/ws/ui/qt"));
    }
}
