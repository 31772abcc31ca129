//! Catalogue assembly and load-time validation.

use std::collections::HashMap;

use super::diagnostic::{
    Diagnostic,
    DiagnosticKind,
    Severity,
};
use super::model::{
    Catalogue,
    ContextGroup,
    DEFAULT_FORMAT_VERSION,
    TranslationUnit,
};
use crate::plural::PluralRule;
use crate::types::UnitStatus;

/// Knobs that change how units are admitted into a catalogue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    /// Resolve units whose translation is still marked unfinished.
    pub include_unfinished: bool,
    /// Keep vanished/obsolete units (out of the lookup index) for tooling.
    pub keep_retired: bool,
    /// Use this language's plural rule instead of the document's.
    pub plural_language: Option<String>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self { include_unfinished: true, keep_retired: true, plural_language: None }
    }
}

/// A built catalogue and everything worth telling the translator about it.
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub catalogue: Catalogue,
    pub diagnostics: Vec<Diagnostic>,
}

impl LoadOutcome {
    /// Returns true if any diagnostic is a warning.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity == Severity::Warning)
    }
}

/// Builds a [`Catalogue`] one unit at a time.
///
/// # Examples
/// ```
/// use ts_catalogue::catalogue::{CatalogueBuilder, LoadOptions, TranslationUnit};
///
/// let mut builder = CatalogueBuilder::new("it", &LoadOptions::default());
/// builder.add(TranslationUnit::new("AboutDialog", "About Wireshark", "Informazioni su Wireshark"));
/// let outcome = builder.finish();
///
/// assert_eq!(outcome.catalogue.tr("AboutDialog", "About Wireshark"), "Informazioni su Wireshark");
/// assert!(outcome.diagnostics.is_empty());
/// ```
#[derive(Debug)]
pub struct CatalogueBuilder {
    options: LoadOptions,
    catalogue: Catalogue,
    diagnostics: Vec<Diagnostic>,
}

impl CatalogueBuilder {
    #[must_use]
    pub fn new(language: impl Into<String>, options: &LoadOptions) -> Self {
        let language = language.into();
        let plural_rule = PluralRule::for_language(
            options.plural_language.as_deref().unwrap_or(language.as_str()),
        );
        let catalogue = Catalogue {
            language,
            source_language: None,
            format_version: DEFAULT_FORMAT_VERSION.to_string(),
            plural_rule,
            groups: Vec::new(),
            group_index: HashMap::new(),
        };
        Self { options: options.clone(), catalogue, diagnostics: Vec::new() }
    }

    #[must_use]
    pub fn source_language(mut self, source_language: Option<String>) -> Self {
        self.catalogue.source_language = source_language.filter(|s| !s.is_empty());
        self
    }

    #[must_use]
    pub fn format_version(mut self, version: impl Into<String>) -> Self {
        self.catalogue.format_version = version.into();
        self
    }

    /// Records a diagnostic found while reading the document.
    pub fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Makes sure a context exists even if it ends up with no units.
    pub fn open_context(&mut self, name: &str) {
        if name.is_empty() || self.catalogue.group_index.contains_key(name) {
            return;
        }
        self.catalogue.group_index.insert(name.to_string(), self.catalogue.groups.len());
        self.catalogue.groups.push(ContextGroup::new(name));
    }

    /// Validates and adds one unit.
    pub fn add(&mut self, unit: TranslationUnit) {
        let location = unit.locations.first().cloned();

        if unit.context.is_empty() {
            tracing::debug!(source = %unit.source_text, "Dropping message without context");
            self.report(Diagnostic::new(
                DiagnosticKind::MissingContext,
                "",
                &unit.source_text,
                location,
            ));
            return;
        }

        if unit.source_text.is_empty() && unit.is_untranslated() {
            tracing::debug!(context = %unit.context, "Dropping message without text");
            self.report(Diagnostic::new(
                DiagnosticKind::MissingText,
                &unit.context,
                "",
                location,
            ));
            return;
        }

        if unit.status.is_retired() && !self.options.keep_retired {
            return;
        }

        let indexed = match unit.status {
            UnitStatus::Current => true,
            UnitStatus::Unfinished => self.options.include_unfinished,
            UnitStatus::Vanished | UnitStatus::Obsolete => false,
        };

        if indexed {
            self.check_translation(&unit);
        }

        self.open_context(&unit.context);
        let Some(group) = self
            .catalogue
            .group_index
            .get(&unit.context)
            .and_then(|&i| self.catalogue.groups.get_mut(i))
        else {
            return;
        };

        let context = unit.context.clone();
        let source_text = unit.source_text.clone();
        if !group.push(unit, indexed) {
            self.report(Diagnostic::new(
                DiagnosticKind::DuplicateMessage,
                context,
                source_text,
                location,
            ));
        }
    }

    /// Plural form count and empty translation checks for resolvable units.
    fn check_translation(&mut self, unit: &TranslationUnit) {
        let location = unit.locations.first().cloned();
        match &unit.plural_forms {
            Some(forms) => {
                let expected = self.catalogue.plural_rule.form_count();
                if forms.len() < expected {
                    self.report(Diagnostic::new(
                        DiagnosticKind::InsufficientPluralForms { expected, found: forms.len() },
                        &unit.context,
                        &unit.source_text,
                        location,
                    ));
                } else if unit.is_untranslated() {
                    self.report(Diagnostic::new(
                        DiagnosticKind::EmptyTranslation,
                        &unit.context,
                        &unit.source_text,
                        location,
                    ));
                }
            }
            None if unit.translation.is_empty() => {
                self.report(Diagnostic::new(
                    DiagnosticKind::EmptyTranslation,
                    &unit.context,
                    &unit.source_text,
                    location,
                ));
            }
            None => {}
        }
    }

    #[must_use]
    pub fn finish(self) -> LoadOutcome {
        tracing::debug!(
            language = %self.catalogue.language,
            contexts = self.catalogue.groups.len(),
            resolvable = self.catalogue.resolvable_len(),
            diagnostics = self.diagnostics.len(),
            "Catalogue built"
        );
        LoadOutcome { catalogue: self.catalogue, diagnostics: self.diagnostics }
    }
}
