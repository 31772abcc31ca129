//! In-memory catalogue: contexts, units and their lookup index.

use std::collections::HashMap;

use crate::plural::PluralRule;
use crate::types::{
    SourceLocation,
    UnitStatus,
};

/// `.ts` format version written when a catalogue does not carry one.
pub const DEFAULT_FORMAT_VERSION: &str = "2.1";

/// One translatable message.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TranslationUnit {
    /// Owning UI component, e.g. `"AboutDialog"`.
    pub context: String,
    pub source_text: String,
    /// Distinguishes identical source texts that translate differently.
    pub disambiguator: Option<String>,
    /// Empty when no translation is available yet. With length variants this
    /// is the first (longest) one.
    pub translation: String,
    /// Shorter `<lengthvariant>`s following `translation`.
    pub length_variants: Vec<String>,
    /// Numerus forms indexed by plural category.
    pub plural_forms: Option<Vec<String>>,
    /// Shorter length variants per numerus form; empty when no form has any.
    pub plural_length_variants: Vec<Vec<String>>,
    pub status: UnitStatus,
    pub locations: Vec<SourceLocation>,
    /// Note from the developer to translators.
    pub extra_comment: Option<String>,
    pub translator_comment: Option<String>,
    /// Source text this unit was translated from before the source changed.
    pub old_source: Option<String>,
}

impl TranslationUnit {
    #[must_use]
    pub fn new(
        context: impl Into<String>,
        source_text: impl Into<String>,
        translation: impl Into<String>,
    ) -> Self {
        Self {
            context: context.into(),
            source_text: source_text.into(),
            translation: translation.into(),
            ..Self::default()
        }
    }

    /// Creates a numerus unit.
    #[must_use]
    pub fn plural(
        context: impl Into<String>,
        source_text: impl Into<String>,
        forms: Vec<String>,
    ) -> Self {
        Self {
            context: context.into(),
            source_text: source_text.into(),
            plural_forms: Some(forms),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_disambiguator(mut self, disambiguator: impl Into<String>) -> Self {
        let disambiguator = disambiguator.into();
        self.disambiguator = (!disambiguator.is_empty()).then_some(disambiguator);
        self
    }

    #[must_use]
    pub const fn with_status(mut self, status: UnitStatus) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub const fn is_plural(&self) -> bool {
        self.plural_forms.is_some()
    }

    /// Returns true if the unit carries no translated text at all.
    #[must_use]
    pub fn is_untranslated(&self) -> bool {
        match &self.plural_forms {
            Some(forms) => forms.iter().all(String::is_empty),
            None => self.translation.is_empty(),
        }
    }
}

/// Units belonging to one context, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextGroup {
    name: String,
    units: Vec<TranslationUnit>,
    /// source text -> disambiguator (`""` for none) -> position in `units`.
    index: HashMap<String, HashMap<String, usize>>,
}

impl ContextGroup {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), units: Vec::new(), index: HashMap::new() }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All units, resolvable and retired, in document order.
    #[must_use]
    pub fn units(&self) -> &[TranslationUnit] {
        &self.units
    }

    /// Units that take part in lookup, in document order.
    pub fn resolvable(&self) -> impl Iterator<Item = &TranslationUnit> {
        self.units
            .iter()
            .enumerate()
            .filter(|&(position, unit)| {
                self.index
                    .get(&unit.source_text)
                    .and_then(|by_disambiguator| {
                        by_disambiguator.get(unit.disambiguator.as_deref().unwrap_or_default())
                    })
                    .is_some_and(|&indexed| indexed == position)
            })
            .map(|(_, unit)| unit)
    }

    /// Vanished and obsolete units kept for translators.
    pub fn retired(&self) -> impl Iterator<Item = &TranslationUnit> {
        self.units.iter().filter(|unit| unit.status.is_retired())
    }

    /// Finds the indexed unit for a source text and optional disambiguator.
    #[must_use]
    pub fn get(&self, source_text: &str, disambiguator: Option<&str>) -> Option<&TranslationUnit> {
        self.index
            .get(source_text)?
            .get(disambiguator.unwrap_or_default())
            .and_then(|&i| self.units.get(i))
    }

    /// Appends a unit, adding it to the lookup index when `indexed` is true.
    ///
    /// Returns `false` if `indexed` was requested but the key is already taken;
    /// the unit is still kept for re-serialization.
    pub(crate) fn push(&mut self, unit: TranslationUnit, indexed: bool) -> bool {
        let position = self.units.len();
        let mut inserted = true;
        if indexed {
            let by_disambiguator = self.index.entry(unit.source_text.clone()).or_default();
            let disambiguator = unit.disambiguator.clone().unwrap_or_default();
            if by_disambiguator.contains_key(&disambiguator) {
                inserted = false;
            } else {
                by_disambiguator.insert(disambiguator, position);
            }
        }
        self.units.push(unit);
        inserted
    }

    /// Number of units that take part in lookup.
    #[must_use]
    pub fn resolvable_len(&self) -> usize {
        self.resolvable().count()
    }
}

/// Every context group for one target language.
///
/// Immutable once built; share it behind an `Arc` for concurrent lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalogue {
    pub(crate) language: String,
    pub(crate) source_language: Option<String>,
    pub(crate) format_version: String,
    pub(crate) plural_rule: PluralRule,
    pub(crate) groups: Vec<ContextGroup>,
    pub(crate) group_index: HashMap<String, usize>,
}

impl Catalogue {
    /// A catalogue with no entries: every lookup returns the source text.
    #[must_use]
    pub fn empty(language: impl Into<String>) -> Self {
        let language = language.into();
        Self {
            plural_rule: PluralRule::for_language(&language),
            language,
            source_language: None,
            format_version: DEFAULT_FORMAT_VERSION.to_string(),
            groups: Vec::new(),
            group_index: HashMap::new(),
        }
    }

    /// Target language tag as written in the document (`it`, `it_IT`).
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    #[must_use]
    pub fn source_language(&self) -> Option<&str> {
        self.source_language.as_deref()
    }

    #[must_use]
    pub fn format_version(&self) -> &str {
        &self.format_version
    }

    #[must_use]
    pub const fn plural_rule(&self) -> PluralRule {
        self.plural_rule
    }

    /// Context groups in document order.
    #[must_use]
    pub fn groups(&self) -> &[ContextGroup] {
        &self.groups
    }

    #[must_use]
    pub fn group(&self, context: &str) -> Option<&ContextGroup> {
        self.group_index.get(context).and_then(|&i| self.groups.get(i))
    }

    /// Finds the unit that would answer a lookup, if any.
    #[must_use]
    pub fn unit(
        &self,
        context: &str,
        source_text: &str,
        disambiguator: Option<&str>,
    ) -> Option<&TranslationUnit> {
        self.group(context)?.get(source_text, disambiguator)
    }

    /// Number of units that take part in lookup.
    #[must_use]
    pub fn resolvable_len(&self) -> usize {
        self.groups.iter().map(ContextGroup::resolvable_len).sum()
    }

    /// Number of retired units kept for tooling.
    #[must_use]
    pub fn retired_len(&self) -> usize {
        self.groups.iter().map(|group| group.retired().count()).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resolvable_len() == 0
    }
}
