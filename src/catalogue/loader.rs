//! Qt Linguist `.ts` document reader.
//!
//! Parses the XML into [`TranslationUnit`]s and hands them to a
//! [`CatalogueBuilder`], which owns validation. Only malformed documents fail;
//! everything else becomes a diagnostic.

use std::borrow::Cow;
use std::collections::HashMap;
use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::{
    BytesStart,
    Event,
};
use thiserror::Error;

use super::builder::{
    CatalogueBuilder,
    LoadOptions,
    LoadOutcome,
};
use super::diagnostic::{
    Diagnostic,
    DiagnosticKind,
};
use super::model::{
    DEFAULT_FORMAT_VERSION,
    TranslationUnit,
};
use crate::types::{
    SourceLocation,
    UnitStatus,
};

/// Fatal load failures. The previous catalogue, if any, stays active.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read catalogue file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed XML at byte {position}: {source}")]
    Xml {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },

    #[error("Document has no <TS> root element")]
    MissingRoot,

    #[error("Unexpected root element <{found}> at byte {position}, expected <TS>")]
    UnexpectedRoot { found: String, position: u64 },

    #[error("Document ended inside <{element}>")]
    UnexpectedEof { element: String },
}

/// Load a catalogue from `.ts` text.
///
/// # Errors
/// Returns error if the text is not well-formed XML or has no `<TS>` root.
pub fn load_str(text: &str, options: &LoadOptions) -> Result<LoadOutcome, LoadError> {
    let mut reader = Reader::from_str(text);

    loop {
        match next_event(&mut reader)? {
            Event::Start(start) if start.name().as_ref() == b"TS" => {
                let mut builder = header(&reader, &start, options)?;
                read_document(&mut reader, &mut builder)?;
                return Ok(builder.finish());
            }
            Event::Empty(start) if start.name().as_ref() == b"TS" => {
                return Ok(header(&reader, &start, options)?.finish());
            }
            Event::Start(start) | Event::Empty(start) => {
                return Err(LoadError::UnexpectedRoot {
                    found: element_name(&start),
                    position: position(&reader),
                });
            }
            Event::Eof => return Err(LoadError::MissingRoot),
            _ => {}
        }
    }
}

/// Load a catalogue from a `.ts` file.
///
/// # Errors
/// Returns error if the file cannot be read or [`load_str`] fails.
pub fn load_file(path: &Path, options: &LoadOptions) -> Result<LoadOutcome, LoadError> {
    tracing::debug!(path = %path.display(), "Loading catalogue");
    let text = std::fs::read_to_string(path)?;
    let outcome = load_str(&text, options)?;
    tracing::debug!(
        path = %path.display(),
        language = %outcome.catalogue.language(),
        diagnostics = outcome.diagnostics.len(),
        "Catalogue loaded"
    );
    Ok(outcome)
}

type XmlReader<'a> = Reader<&'a [u8]>;

fn position(reader: &XmlReader<'_>) -> u64 {
    u64::try_from(reader.buffer_position()).unwrap_or(u64::MAX)
}

fn next_event<'a>(reader: &mut XmlReader<'a>) -> Result<Event<'a>, LoadError> {
    reader.read_event().map_err(|source| LoadError::Xml { position: position(reader), source })
}

fn element_name(start: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(start.name().as_ref()).into_owned()
}

fn attributes(
    reader: &XmlReader<'_>,
    start: &BytesStart<'_>,
) -> Result<HashMap<String, String>, LoadError> {
    let mut result = HashMap::new();
    for attr in start.attributes() {
        let attr = attr
            .map_err(|e| LoadError::Xml { position: position(reader), source: e.into() })?;
        let value = attr
            .unescape_value()
            .map_err(|e| LoadError::Xml { position: position(reader), source: e.into() })?;
        result.insert(String::from_utf8_lossy(attr.key.as_ref()).into_owned(), value.into_owned());
    }
    Ok(result)
}

fn header(
    reader: &XmlReader<'_>,
    start: &BytesStart<'_>,
    options: &LoadOptions,
) -> Result<CatalogueBuilder, LoadError> {
    let mut attrs = attributes(reader, start)?;
    let language = attrs.remove("language").unwrap_or_default();
    let version = attrs.remove("version").unwrap_or_else(|| DEFAULT_FORMAT_VERSION.to_string());
    Ok(CatalogueBuilder::new(language, options)
        .source_language(attrs.remove("sourcelanguage"))
        .format_version(version))
}

/// Reads the children of `<TS>` up to its end tag.
fn read_document(reader: &mut XmlReader<'_>, builder: &mut CatalogueBuilder) -> Result<(), LoadError> {
    let mut locations = LocationTracker::default();
    loop {
        match next_event(reader)? {
            Event::Start(start) if start.name().as_ref() == b"context" => {
                read_context(reader, builder, &mut locations)?;
            }
            Event::Start(_) => skip_element(reader, "TS")?,
            Event::End(_) => return Ok(()),
            Event::Eof => return Err(LoadError::UnexpectedEof { element: "TS".to_string() }),
            _ => {}
        }
    }
}

/// A `<message>` as read, before it is attached to its context.
struct ParsedMessage {
    unit: TranslationUnit,
    /// `type` attribute value the format does not define.
    unknown_status: Option<String>,
}

fn read_context(
    reader: &mut XmlReader<'_>,
    builder: &mut CatalogueBuilder,
    locations: &mut LocationTracker,
) -> Result<(), LoadError> {
    let mut name = String::new();
    let mut messages = Vec::new();

    loop {
        match next_event(reader)? {
            Event::Start(start) => match start.name().as_ref() {
                b"name" => name = read_text(reader, "name")?,
                b"message" => messages.push(read_message(reader, &start, locations)?),
                _ => skip_element(reader, "context")?,
            },
            Event::End(_) => break,
            Event::Eof => {
                return Err(LoadError::UnexpectedEof { element: "context".to_string() });
            }
            _ => {}
        }
    }

    builder.open_context(&name);
    for ParsedMessage { mut unit, unknown_status } in messages {
        unit.context.clone_from(&name);
        if let Some(value) = unknown_status {
            builder.report(Diagnostic::new(
                DiagnosticKind::UnknownStatus { value },
                &name,
                &unit.source_text,
                unit.locations.first().cloned(),
            ));
        }
        builder.add(unit);
    }
    Ok(())
}

fn read_message(
    reader: &mut XmlReader<'_>,
    start: &BytesStart<'_>,
    locations: &mut LocationTracker,
) -> Result<ParsedMessage, LoadError> {
    let numerus = attributes(reader, start)?.get("numerus").is_some_and(|v| v == "yes");
    let mut unit = TranslationUnit::default();
    let mut unknown_status = None;

    loop {
        match next_event(reader)? {
            Event::Empty(element) => match element.name().as_ref() {
                b"location" => {
                    let attrs = attributes(reader, &element)?;
                    unit.locations.extend(locations.resolve(&attrs));
                }
                b"translation" => {
                    let (status, unknown) = status_of(&attributes(reader, &element)?);
                    unit.status = status;
                    unknown_status = unknown;
                    if numerus {
                        unit.plural_forms = Some(Vec::new());
                    }
                }
                _ => {}
            },
            Event::Start(element) => match element.name().as_ref() {
                b"location" => {
                    let attrs = attributes(reader, &element)?;
                    unit.locations.extend(locations.resolve(&attrs));
                    skip_element(reader, "location")?;
                }
                b"source" => unit.source_text = read_text(reader, "source")?,
                b"oldsource" => unit.old_source = Some(read_text(reader, "oldsource")?),
                b"comment" => {
                    let comment = read_text(reader, "comment")?;
                    unit.disambiguator = (!comment.is_empty()).then_some(comment);
                }
                b"extracomment" => {
                    unit.extra_comment = Some(read_text(reader, "extracomment")?);
                }
                b"translatorcomment" => {
                    unit.translator_comment = Some(read_text(reader, "translatorcomment")?);
                }
                b"translation" => {
                    let (status, unknown) = status_of(&attributes(reader, &element)?);
                    unit.status = status;
                    unknown_status = unknown;
                    let (text, forms) = read_translation(reader)?;
                    if numerus {
                        let forms = if forms.is_empty() && !text.text.is_empty() {
                            vec![text]
                        } else {
                            forms
                        };
                        if forms.iter().any(|form| !form.shorter.is_empty()) {
                            unit.plural_length_variants =
                                forms.iter().map(|form| form.shorter.clone()).collect();
                        }
                        unit.plural_forms = Some(forms.into_iter().map(|form| form.text).collect());
                    } else {
                        unit.translation = text.text;
                        unit.length_variants = text.shorter;
                    }
                }
                _ => skip_element(reader, "message")?,
            },
            Event::End(_) => break,
            Event::Eof => {
                return Err(LoadError::UnexpectedEof { element: "message".to_string() });
            }
            _ => {}
        }
    }

    Ok(ParsedMessage { unit, unknown_status })
}

/// Status from the `type` attribute; unknown values count as current.
fn status_of(attrs: &HashMap<String, String>) -> (UnitStatus, Option<String>) {
    let value = attrs.get("type").map(String::as_str);
    UnitStatus::from_type_attr(value).map_or_else(
        || (UnitStatus::Current, value.map(str::to_string)),
        |status| (status, None),
    )
}

/// Text of a `<translation>` or `<numerusform>`, split into length variants.
#[derive(Debug, Default)]
struct VariantText {
    /// The full text, or the first (longest) length variant.
    text: String,
    /// Remaining length variants, shortest last.
    shorter: Vec<String>,
}

impl VariantText {
    /// Plain text unless length variants were read.
    fn from_parts(text: String, variants: Vec<String>) -> Self {
        let mut variants = variants.into_iter();
        match variants.next() {
            Some(first) => Self { text: first, shorter: variants.collect() },
            None => Self { text, shorter: Vec::new() },
        }
    }
}

/// Reads `<translation>` content: plain text, `<numerusform>`s or `<lengthvariant>`s.
fn read_translation(
    reader: &mut XmlReader<'_>,
) -> Result<(VariantText, Vec<VariantText>), LoadError> {
    let mut text = String::new();
    let mut forms = Vec::new();
    let mut variants = Vec::new();

    loop {
        match next_event(reader)? {
            Event::Text(t) => text.push_str(&unescape_text(reader, &t)?),
            Event::CData(c) => text.push_str(&String::from_utf8_lossy(&c)),
            Event::Empty(element) => match element.name().as_ref() {
                b"byte" => text.extend(byte_char(&attributes(reader, &element)?)),
                b"numerusform" => forms.push(VariantText::default()),
                b"lengthvariant" => variants.push(String::new()),
                _ => {}
            },
            Event::Start(element) => match element.name().as_ref() {
                b"numerusform" => forms.push(read_variants(reader, "numerusform")?),
                b"lengthvariant" => variants.push(read_text(reader, "lengthvariant")?),
                _ => skip_element(reader, "translation")?,
            },
            Event::End(_) => break,
            Event::Eof => {
                return Err(LoadError::UnexpectedEof { element: "translation".to_string() });
            }
            _ => {}
        }
    }

    Ok((VariantText::from_parts(text, variants), forms))
}

/// Reads text that may be split into `<lengthvariant>`s.
fn read_variants(reader: &mut XmlReader<'_>, element: &str) -> Result<VariantText, LoadError> {
    let mut text = String::new();
    let mut variants = Vec::new();

    loop {
        match next_event(reader)? {
            Event::Text(t) => text.push_str(&unescape_text(reader, &t)?),
            Event::CData(c) => text.push_str(&String::from_utf8_lossy(&c)),
            Event::Empty(e) => match e.name().as_ref() {
                b"byte" => text.extend(byte_char(&attributes(reader, &e)?)),
                b"lengthvariant" => variants.push(String::new()),
                _ => {}
            },
            Event::Start(e) if e.name().as_ref() == b"lengthvariant" => {
                variants.push(read_text(reader, "lengthvariant")?);
            }
            Event::Start(_) => skip_element(reader, element)?,
            Event::End(_) => break,
            Event::Eof => return Err(LoadError::UnexpectedEof { element: element.to_string() }),
            _ => {}
        }
    }

    Ok(VariantText::from_parts(text, variants))
}

/// Reads character data up to the end tag of the current element.
///
/// Whitespace is kept verbatim; leading and trailing spaces are part of UI strings.
fn read_text(reader: &mut XmlReader<'_>, element: &str) -> Result<String, LoadError> {
    let mut text = String::new();
    loop {
        match next_event(reader)? {
            Event::Text(t) => text.push_str(&unescape_text(reader, &t)?),
            Event::CData(c) => text.push_str(&String::from_utf8_lossy(&c)),
            Event::Empty(e) if e.name().as_ref() == b"byte" => {
                text.extend(byte_char(&attributes(reader, &e)?));
            }
            Event::Start(_) => skip_element(reader, element)?,
            Event::End(_) => return Ok(text),
            Event::Eof => return Err(LoadError::UnexpectedEof { element: element.to_string() }),
            _ => {}
        }
    }
}

fn unescape_text<'a>(
    reader: &XmlReader<'_>,
    text: &'a quick_xml::events::BytesText<'_>,
) -> Result<Cow<'a, str>, LoadError> {
    text.unescape().map_err(|e| LoadError::Xml { position: position(reader), source: e.into() })
}

/// Decodes `<byte value="x9"/>`, which encodes characters XML 1.0 cannot hold.
fn byte_char(attrs: &HashMap<String, String>) -> Option<char> {
    let value = attrs.get("value")?;
    let code = match value.strip_prefix('x').or_else(|| value.strip_prefix('X')) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => value.parse().ok()?,
    };
    char::from_u32(code)
}

/// Skips the rest of an element whose start tag was just read.
fn skip_element(reader: &mut XmlReader<'_>, parent: &str) -> Result<(), LoadError> {
    let mut depth = 0_usize;
    loop {
        match next_event(reader)? {
            Event::Start(_) => depth += 1,
            Event::End(_) => {
                if depth == 0 {
                    return Ok(());
                }
                depth -= 1;
            }
            Event::Eof => return Err(LoadError::UnexpectedEof { element: parent.to_string() }),
            _ => {}
        }
    }
}

/// Resolves `<location>` elements written with `lupdate -locations relative`:
/// a missing `filename` repeats the previous one, and `line="+3"` is relative
/// to the previous line seen for that file. A location without `line` names
/// the file only and leaves the line counter alone.
#[derive(Debug, Default)]
struct LocationTracker {
    current_file: String,
    lines: HashMap<String, i64>,
}

impl LocationTracker {
    fn resolve(&mut self, attrs: &HashMap<String, String>) -> Option<SourceLocation> {
        if let Some(filename) = attrs.get("filename").filter(|f| !f.is_empty()) {
            self.current_file.clone_from(filename);
        }
        let Some(line_attr) = attrs.get("line") else {
            return Some(SourceLocation::file_only(self.current_file.clone()));
        };

        let line = if line_attr.starts_with('+') || line_attr.starts_with('-') {
            let delta: i64 = line_attr.trim_start_matches('+').parse().ok()?;
            self.lines.get(&self.current_file).copied().unwrap_or(0) + delta
        } else {
            line_attr.parse().ok()?
        };
        self.lines.insert(self.current_file.clone(), line);

        Some(SourceLocation::new(self.current_file.clone(), u32::try_from(line).unwrap_or(0)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::panic)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;
    use crate::plural::PluralRule;

    const ITALIAN: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE TS>
<TS version="2.1" language="it_IT" sourcelanguage="en">
<context>
    <name>AboutDialog</name>
    <message>
        <location filename="about_dialog.ui" line="14"/>
        <source>About Wireshark</source>
        <translation>Informazioni su Wireshark</translation>
    </message>
    <message>
        <location line="+12"/>
        <source>Plugins</source>
        <extracomment>Tab title</extracomment>
        <translation type="unfinished"></translation>
    </message>
</context>
<context>
    <name>ByteViewText</name>
    <message>
        <location filename="byte_view_text.cpp" line="+102"/>
        <source>Bytes %1-%2</source>
        <translation>Byte %1-%2</translation>
    </message>
    <message>
        <source>Show bytes as &amp;hexadecimal</source>
        <comment>menu</comment>
        <translatorcomment>Keep the accelerator</translatorcomment>
        <translation>Mostra byte come &amp;esadecimale</translation>
    </message>
</context>
<context>
    <name>PacketList</name>
    <message numerus="yes">
        <source>%n selected packet(s)</source>
        <translation>
            <numerusform>%n pacchetto selezionato</numerusform>
            <numerusform>%n pacchetti selezionati</numerusform>
        </translation>
    </message>
    <message>
        <source>Old entry</source>
        <translation type="vanished">Vecchia voce</translation>
    </message>
</context>
</TS>
"#;

    fn load(text: &str) -> LoadOutcome {
        load_str(text, &LoadOptions::default()).unwrap()
    }

    #[googletest::test]
    fn test_header() {
        let outcome = load(ITALIAN);
        let catalogue = &outcome.catalogue;

        expect_that!(catalogue.language(), eq("it_IT"));
        expect_that!(catalogue.source_language(), some(eq("en")));
        expect_that!(catalogue.format_version(), eq("2.1"));
        expect_that!(catalogue.plural_rule(), eq(PluralRule::OneOther));
        expect_that!(catalogue.groups().len(), eq(3));
    }

    #[googletest::test]
    fn test_simple_message() {
        let outcome = load(ITALIAN);
        let unit = outcome.catalogue.unit("AboutDialog", "About Wireshark", None).unwrap();

        expect_that!(unit.translation, eq("Informazioni su Wireshark"));
        expect_that!(unit.status, eq(UnitStatus::Current));
        expect_that!(unit.locations, elements_are![eq(&SourceLocation::new("about_dialog.ui", 14))]);
    }

    #[googletest::test]
    fn test_relative_locations() {
        let outcome = load(ITALIAN);
        let plugins = outcome.catalogue.unit("AboutDialog", "Plugins", None).unwrap();
        let bytes = outcome.catalogue.unit("ByteViewText", "Bytes %1-%2", None).unwrap();

        expect_that!(plugins.locations, elements_are![eq(&SourceLocation::new("about_dialog.ui", 26))]);
        expect_that!(bytes.locations, elements_are![eq(&SourceLocation::new("byte_view_text.cpp", 102))]);
    }

    #[googletest::test]
    fn test_comments_and_escapes() {
        let outcome = load(ITALIAN);
        let unit = outcome
            .catalogue
            .unit("ByteViewText", "Show bytes as &hexadecimal", Some("menu"))
            .unwrap();

        expect_that!(unit.translation, eq("Mostra byte come &esadecimale"));
        expect_that!(unit.translator_comment, some(eq("Keep the accelerator")));
        expect_that!(
            outcome.catalogue.unit("ByteViewText", "Show bytes as &hexadecimal", None),
            none()
        );
    }

    #[googletest::test]
    fn test_unfinished_with_empty_translation() {
        let outcome = load(ITALIAN);
        let unit = outcome.catalogue.unit("AboutDialog", "Plugins", None).unwrap();

        expect_that!(unit.status, eq(UnitStatus::Unfinished));
        expect_that!(unit.translation, eq(""));
        expect_that!(unit.extra_comment, some(eq("Tab title")));
        expect_that!(
            outcome.diagnostics,
            elements_are![field!(Diagnostic.kind, eq(&DiagnosticKind::EmptyTranslation))]
        );
    }

    #[googletest::test]
    fn test_numerus_forms() {
        let outcome = load(ITALIAN);
        let unit = outcome.catalogue.unit("PacketList", "%n selected packet(s)", None).unwrap();

        expect_that!(unit.translation, eq(""));
        expect_that!(
            unit.plural_forms,
            some(elements_are![eq("%n pacchetto selezionato"), eq("%n pacchetti selezionati")])
        );
    }

    #[googletest::test]
    fn test_vanished_is_retired() {
        let outcome = load(ITALIAN);
        let group = outcome.catalogue.group("PacketList").unwrap();

        expect_that!(group.get("Old entry", None), none());
        expect_that!(group.retired().map(|u| u.source_text.as_str()).collect::<Vec<_>>(), elements_are![eq(&"Old entry")]);
        expect_that!(outcome.catalogue.retired_len(), eq(1));
    }

    #[googletest::test]
    fn test_whitespace_is_preserved() {
        let text = r#"<TS language="it"><context><name>C</name><message>
<source> Apply </source><translation> Applica </translation></message></context></TS>"#;

        let outcome = load(text);

        expect_that!(outcome.catalogue.tr("C", " Apply "), eq(" Applica "));
    }

    #[googletest::test]
    fn test_byte_elements_and_cdata() {
        let text = r#"<TS language="it"><context><name>C</name><message>
<source>Tab<byte value="x9"/>stop</source><translation><![CDATA[Tab <b>]]><byte value="9"/>stop</translation></message></context></TS>"#;

        let outcome = load(text);

        expect_that!(outcome.catalogue.tr("C", "Tab\tstop"), eq("Tab <b>\tstop"));
    }

    #[googletest::test]
    fn test_length_variants_use_first() {
        let text = r#"<TS language="it"><context><name>C</name><message>
<source>Statistics</source>
<translation variants="yes"><lengthvariant>Statistiche</lengthvariant><lengthvariant>Stat.</lengthvariant></translation>
</message></context></TS>"#;

        let outcome = load(text);

        expect_that!(outcome.catalogue.tr("C", "Statistics"), eq("Statistiche"));
    }

    #[googletest::test]
    fn test_length_variants_are_kept() {
        let text = r#"<TS language="it"><context><name>MainWindow</name><message>
<location filename="main_window.ui"/>
<source>Capture &amp;Filters…</source>
<translation variants="yes"><lengthvariant>Filtri di &amp;cattura…</lengthvariant><lengthvariant>&amp;Filtri…</lengthvariant></translation>
</message><message numerus="yes">
<location line="+2"/>
<source>%n file(s)</source>
<translation><numerusform variants="yes"><lengthvariant>%n file selezionato</lengthvariant><lengthvariant>%n file</lengthvariant></numerusform><numerusform>%n file selezionati</numerusform></translation>
</message></context></TS>"#;

        let outcome = load(text);
        let capture = outcome.catalogue.unit("MainWindow", "Capture &Filters…", None).unwrap();
        let files = outcome.catalogue.unit("MainWindow", "%n file(s)", None).unwrap();

        expect_that!(capture.translation, eq("Filtri di &cattura…"));
        expect_that!(capture.length_variants, elements_are![eq("&Filtri…")]);
        expect_that!(capture.locations, elements_are![eq(&SourceLocation::file_only("main_window.ui"))]);
        expect_that!(files.plural_forms, some(elements_are![eq("%n file selezionato"), eq("%n file selezionati")]));
        expect_that!(
            files.plural_length_variants,
            elements_are![elements_are![eq("%n file")], is_empty()]
        );
        expect_that!(files.locations, elements_are![eq(&SourceLocation::new("main_window.ui", 2))]);
    }

    #[googletest::test]
    fn test_unknown_elements_are_skipped() {
        let text = r#"<TS language="it"><dependencies><dependency catalog="qt_it"/></dependencies>
<context><name>C</name><comment>context note</comment><message>
<source>Close</source><userdata>x<extra>y</extra></userdata><translation>Chiudi</translation>
</message></context></TS>"#;

        let outcome = load(text);

        expect_that!(outcome.catalogue.tr("C", "Close"), eq("Chiudi"));
        expect_that!(outcome.diagnostics, is_empty());
    }

    #[googletest::test]
    fn test_unknown_status_is_reported() {
        let text = r#"<TS language="it"><context><name>C</name><message>
<source>Close</source><translation type="approved">Chiudi</translation>
</message></context></TS>"#;

        let outcome = load(text);

        expect_that!(outcome.catalogue.tr("C", "Close"), eq("Chiudi"));
        expect_that!(
            outcome.diagnostics,
            elements_are![field!(
                Diagnostic.kind,
                eq(&DiagnosticKind::UnknownStatus { value: "approved".to_string() })
            )]
        );
    }

    #[googletest::test]
    fn test_empty_root() {
        let outcome = load(r#"<TS version="2.1" language="ja"/>"#);

        expect_that!(outcome.catalogue.is_empty(), eq(true));
        expect_that!(outcome.catalogue.plural_rule(), eq(PluralRule::Single));
    }

    #[rstest]
    #[case::not_xml("this is not xml <")]
    #[case::mismatched("<TS><context><name>C</name></message></TS>")]
    #[case::truncated("<TS><context><name>C</name><message><source>x</source>")]
    fn test_malformed_documents_fail(#[case] text: &str) {
        let result = load_str(text, &LoadOptions::default());

        assert!(result.is_err(), "expected failure for {text:?}");
    }

    #[googletest::test]
    fn test_missing_root() {
        let result = load_str("<?xml version=\"1.0\"?>", &LoadOptions::default());

        assert!(matches!(result, Err(LoadError::MissingRoot)));
    }

    #[googletest::test]
    fn test_wrong_root() {
        let result = load_str("<html><body/></html>", &LoadOptions::default());

        match result {
            Err(LoadError::UnexpectedRoot { found, .. }) => assert_eq!(found, "html"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[googletest::test]
    fn test_load_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("wireshark_it.ts");
        std::fs::write(&path, ITALIAN).unwrap();

        let outcome = load_file(&path, &LoadOptions::default()).unwrap();

        expect_that!(outcome.catalogue.tr("AboutDialog", "About Wireshark"), eq("Informazioni su Wireshark"));
    }

    #[googletest::test]
    fn test_load_file_missing() {
        let result = load_file(Path::new("/nonexistent/wireshark_it.ts"), &LoadOptions::default());

        assert!(matches!(result, Err(LoadError::Io(_))));
    }
}
