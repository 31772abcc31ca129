//! Runtime lookup: `(context, source, disambiguator?, count?, args)` to display text.
//!
//! Lookup never fails. Every miss degrades to the source text, and the
//! [`ResolveOutcome`] on the result says which step produced the text.

mod placeholder;

use std::fmt::{
    self,
    Display,
};

pub use placeholder::{
    Substitution,
    substitute,
};

use crate::catalogue::{
    Catalogue,
    TranslationUnit,
};

/// One lookup request.
///
/// # Examples
/// ```
/// use ts_catalogue::catalogue::{CatalogueBuilder, LoadOptions, TranslationUnit};
/// use ts_catalogue::resolver::{Query, Resolver};
///
/// let mut builder = CatalogueBuilder::new("it", &LoadOptions::default());
/// builder.add(TranslationUnit::new("ByteViewText", "Bytes %1-%2", "Byte %1-%2"));
/// let catalogue = builder.finish().catalogue;
///
/// let resolution = catalogue.resolve(&Query::new("ByteViewText", "Bytes %1-%2").args(&[&10, &20]));
/// assert_eq!(resolution.text, "Byte 10-20");
/// ```
#[derive(Clone, Copy)]
pub struct Query<'a> {
    pub context: &'a str,
    pub source_text: &'a str,
    pub disambiguator: Option<&'a str>,
    /// Selects the plural form and fills `%n`.
    pub count: Option<i64>,
    /// Values for `%1`, `%2`, ...
    pub args: &'a [&'a dyn Display],
}

impl<'a> Query<'a> {
    #[must_use]
    pub const fn new(context: &'a str, source_text: &'a str) -> Self {
        Self { context, source_text, disambiguator: None, count: None, args: &[] }
    }

    /// Sets the disambiguator; an empty string means none.
    #[must_use]
    pub fn disambiguator(mut self, disambiguator: Option<&'a str>) -> Self {
        self.disambiguator = disambiguator.filter(|d| !d.is_empty());
        self
    }

    #[must_use]
    pub const fn count(mut self, count: i64) -> Self {
        self.count = Some(count);
        self
    }

    #[must_use]
    pub const fn args(mut self, args: &'a [&'a dyn Display]) -> Self {
        self.args = args;
        self
    }
}

impl fmt::Debug for Query<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let args: Vec<String> = self.args.iter().map(ToString::to_string).collect();
        f.debug_struct("Query")
            .field("context", &self.context)
            .field("source_text", &self.source_text)
            .field("disambiguator", &self.disambiguator)
            .field("count", &self.count)
            .field("args", &args)
            .finish()
    }
}

/// Which step of the fallback chain produced the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveOutcome {
    Translated,
    /// The plural form for the count's category.
    Plural { category: usize },
    /// The requested category had no text, a neighbouring form was used.
    /// `category` is `None` when no count was given.
    PluralFallback { category: Option<usize>, used: usize },
    /// The unit exists but carries no translation.
    Untranslated,
    MissingKey,
    MissingContext,
}

impl ResolveOutcome {
    /// Returns true if the text came from a translation rather than the source.
    #[must_use]
    pub const fn is_translated(self) -> bool {
        matches!(self, Self::Translated | Self::Plural { .. } | Self::PluralFallback { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub text: String,
    pub outcome: ResolveOutcome,
    /// Placeholder numbers referenced by the text but not supplied.
    pub missing_args: Vec<usize>,
}

/// Anything that can answer lookups.
pub trait Resolver {
    fn resolve(&self, query: &Query<'_>) -> Resolution;
}

impl Resolver for Catalogue {
    fn resolve(&self, query: &Query<'_>) -> Resolution {
        let (template, outcome) = select(self, query);
        let Substitution { text, missing } = substitute(template, query.count, query.args);
        if !missing.is_empty() {
            tracing::debug!(
                context = query.context,
                source = query.source_text,
                missing = ?missing,
                "Placeholders without arguments"
            );
        }
        Resolution { text, outcome, missing_args: missing }
    }
}

impl Catalogue {
    /// Translates a message without count or arguments.
    #[must_use]
    pub fn tr(&self, context: &str, source_text: &str) -> String {
        self.resolve(&Query::new(context, source_text)).text
    }

    /// Translates a numerus message, filling `%n` with `count`.
    #[must_use]
    pub fn tr_n(&self, context: &str, source_text: &str, count: i64) -> String {
        self.resolve(&Query::new(context, source_text).count(count)).text
    }

    /// Full lookup with every query component spelled out.
    #[must_use]
    pub fn translate(
        &self,
        context: &str,
        source_text: &str,
        disambiguator: Option<&str>,
        count: Option<i64>,
        args: &[&dyn Display],
    ) -> String {
        let mut query = Query::new(context, source_text).disambiguator(disambiguator).args(args);
        query.count = count;
        self.resolve(&query).text
    }
}

fn select<'q>(catalogue: &'q Catalogue, query: &Query<'q>) -> (&'q str, ResolveOutcome) {
    let Some(group) = catalogue.group(query.context) else {
        return (query.source_text, ResolveOutcome::MissingContext);
    };
    let Some(unit) = group.get(query.source_text, query.disambiguator) else {
        return (query.source_text, ResolveOutcome::MissingKey);
    };

    match &unit.plural_forms {
        Some(forms) => select_plural(catalogue, unit, forms, query.count),
        None if unit.translation.is_empty() => (query.source_text, ResolveOutcome::Untranslated),
        None => (&unit.translation, ResolveOutcome::Translated),
    }
}

fn select_plural<'q>(
    catalogue: &Catalogue,
    unit: &'q TranslationUnit,
    forms: &'q [String],
    count: Option<i64>,
) -> (&'q str, ResolveOutcome) {
    let Some(count) = count else {
        return match forms.iter().enumerate().rev().find(|(_, form)| !form.is_empty()) {
            Some((used, form)) => (form, ResolveOutcome::PluralFallback { category: None, used }),
            None => (&unit.source_text, ResolveOutcome::Untranslated),
        };
    };

    let category = catalogue.plural_rule().category(count);
    if let Some(form) = forms.get(category)
        && !form.is_empty()
    {
        return (form, ResolveOutcome::Plural { category });
    }

    match nearest_form(forms, category) {
        Some((used, form)) => {
            (form, ResolveOutcome::PluralFallback { category: Some(category), used })
        }
        None => (&unit.source_text, ResolveOutcome::Untranslated),
    }
}

/// Nearest lower non-empty form, else the nearest higher one.
fn nearest_form(forms: &[String], category: usize) -> Option<(usize, &str)> {
    let below = (0..category.min(forms.len())).rev();
    let above = category.saturating_add(1)..forms.len();
    below
        .chain(above)
        .find_map(|i| forms.get(i).filter(|form| !form.is_empty()).map(|form| (i, form.as_str())))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::{
        fixture,
        rstest,
    };

    use super::*;
    use crate::catalogue::{
        CatalogueBuilder,
        LoadOptions,
    };
    use crate::types::UnitStatus;

    fn forms(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[fixture]
    fn italian() -> Catalogue {
        let mut builder = CatalogueBuilder::new("it", &LoadOptions::default());
        builder.add(TranslationUnit::new(
            "AboutDialog",
            "About Wireshark",
            "Informazioni su Wireshark",
        ));
        builder.add(TranslationUnit::new("AboutDialog", "Plugins", ""));
        builder.add(TranslationUnit::new("ByteViewText", "Bytes %1-%2", "Byte %1-%2"));
        builder.add(TranslationUnit::new("ByteViewText", "Hex", "Esadecimale"));
        builder.add(
            TranslationUnit::new("ByteViewText", "Hex", "Esadecimali").with_disambiguator("plural"),
        );
        builder.add(TranslationUnit::plural(
            "PacketList",
            "%n packet(s)",
            forms(&["%n pacchetto", "%n pacchetti"]),
        ));
        builder.add(TranslationUnit::plural(
            "PacketList",
            "%n column(s)",
            forms(&["%n colonna", ""]),
        ));
        builder.add(TranslationUnit::plural("PacketList", "%n file(s)", forms(&["", ""])));
        builder.add(
            TranslationUnit::new("PacketList", "Gone", "Andato").with_status(UnitStatus::Vanished),
        );
        builder.finish().catalogue
    }

    #[rstest]
    #[case::translated("AboutDialog", "About Wireshark", "Informazioni su Wireshark", ResolveOutcome::Translated)]
    #[case::empty_translation("AboutDialog", "Plugins", "Plugins", ResolveOutcome::Untranslated)]
    #[case::missing_key("AboutDialog", "Credits", "Credits", ResolveOutcome::MissingKey)]
    #[case::missing_context("NoSuchDialog", "Hello", "Hello", ResolveOutcome::MissingContext)]
    #[case::retired_is_not_resolvable("PacketList", "Gone", "Gone", ResolveOutcome::MissingKey)]
    fn test_fallback_chain(
        italian: Catalogue,
        #[case] context: &str,
        #[case] source: &str,
        #[case] expected_text: &str,
        #[case] expected_outcome: ResolveOutcome,
    ) {
        let resolution = italian.resolve(&Query::new(context, source));

        assert_that!(
            resolution,
            all![
                field!(Resolution.text, eq(expected_text)),
                field!(Resolution.outcome, eq(&expected_outcome))
            ]
        );
    }

    #[rstest]
    #[googletest::test]
    fn test_positional_args(italian: Catalogue) {
        let resolution = italian.resolve(&Query::new("ByteViewText", "Bytes %1-%2").args(&[&10, &20]));

        expect_that!(resolution.text, eq("Byte 10-20"));
        expect_that!(resolution.missing_args, is_empty());
    }

    #[rstest]
    #[googletest::test]
    fn test_missing_args_are_reported(italian: Catalogue) {
        let resolution = italian.resolve(&Query::new("ByteViewText", "Bytes %1-%2").args(&[&10]));

        expect_that!(resolution.text, eq("Byte 10-%2"));
        expect_that!(resolution.missing_args, elements_are![eq(&2)]);
    }

    #[rstest]
    #[googletest::test]
    fn test_args_apply_to_source_fallback(italian: Catalogue) {
        let resolution = italian.resolve(&Query::new("NoSuchDialog", "%1 of %2").args(&[&"a", &"b"]));

        expect_that!(resolution.text, eq("a of b"));
    }

    #[rstest]
    #[case::no_disambiguator(None, "Esadecimale")]
    #[case::empty_disambiguator(Some(""), "Esadecimale")]
    #[case::disambiguated(Some("plural"), "Esadecimali")]
    #[case::unknown_disambiguator(Some("verb"), "Hex")]
    fn test_disambiguator(
        italian: Catalogue,
        #[case] disambiguator: Option<&str>,
        #[case] expected: &str,
    ) {
        let text = italian.translate("ByteViewText", "Hex", disambiguator, None, &[]);

        assert_that!(text, eq(expected));
    }

    #[rstest]
    #[case::singular(1, "1 pacchetto", ResolveOutcome::Plural { category: 0 })]
    #[case::plural(5, "5 pacchetti", ResolveOutcome::Plural { category: 1 })]
    #[case::zero(0, "0 pacchetti", ResolveOutcome::Plural { category: 1 })]
    #[case::negative(-1, "-1 pacchetto", ResolveOutcome::Plural { category: 0 })]
    fn test_plural_forms(
        italian: Catalogue,
        #[case] count: i64,
        #[case] expected_text: &str,
        #[case] expected_outcome: ResolveOutcome,
    ) {
        let resolution = italian.resolve(&Query::new("PacketList", "%n packet(s)").count(count));

        assert_that!(resolution.text, eq(expected_text));
        assert_that!(resolution.outcome, eq(expected_outcome));
    }

    #[rstest]
    #[googletest::test]
    fn test_empty_plural_form_falls_back_to_lower(italian: Catalogue) {
        let resolution = italian.resolve(&Query::new("PacketList", "%n column(s)").count(4));

        expect_that!(resolution.text, eq("4 colonna"));
        expect_that!(
            resolution.outcome,
            eq(ResolveOutcome::PluralFallback { category: Some(1), used: 0 })
        );
    }

    #[rstest]
    #[googletest::test]
    fn test_untranslated_plural_uses_source_with_count(italian: Catalogue) {
        let resolution = italian.resolve(&Query::new("PacketList", "%n file(s)").count(3));

        expect_that!(resolution.text, eq("3 file(s)"));
        expect_that!(resolution.outcome, eq(ResolveOutcome::Untranslated));
    }

    #[rstest]
    #[googletest::test]
    fn test_plural_without_count_uses_last_form(italian: Catalogue) {
        let resolution = italian.resolve(&Query::new("PacketList", "%n packet(s)"));

        expect_that!(resolution.text, eq("%n pacchetti"));
        expect_that!(
            resolution.outcome,
            eq(ResolveOutcome::PluralFallback { category: None, used: 1 })
        );
    }

    #[googletest::test]
    fn test_short_plural_uses_nearest_lower_form() {
        let mut builder = CatalogueBuilder::new("ru", &LoadOptions::default());
        builder.add(TranslationUnit::plural(
            "PacketList",
            "%n packet(s)",
            forms(&["%n пакет", "%n пакета"]),
        ));
        let catalogue = builder.finish().catalogue;

        expect_that!(catalogue.tr_n("PacketList", "%n packet(s)", 5), eq("5 пакета"));
        expect_that!(catalogue.tr_n("PacketList", "%n packet(s)", 21), eq("21 пакет"));
    }

    #[googletest::test]
    fn test_nearest_form_prefers_higher_when_nothing_below() {
        let forms = forms(&["", "", "%n c"]);

        expect_that!(nearest_form(&forms, 0), some(eq((2, "%n c"))));
        expect_that!(nearest_form(&forms, 1), some(eq((2, "%n c"))));
    }

    #[rstest]
    #[googletest::test]
    fn test_resolution_is_pure(italian: Catalogue) {
        let args: [&dyn Display; 2] = [&1, &2];
        let query = Query::new("ByteViewText", "Bytes %1-%2").args(&args);

        expect_that!(italian.resolve(&query), eq(&italian.resolve(&query)));
    }

    #[googletest::test]
    fn test_query_debug_shows_args() {
        let args: [&dyn Display; 1] = [&"x"];
        let query = Query::new("C", "S").count(2).args(&args);

        expect_that!(format!("{query:?}"), contains_substring(r#"args: ["x"]"#));
    }
}
