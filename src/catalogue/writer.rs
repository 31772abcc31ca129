//! Qt Linguist `.ts` document writer.
//!
//! Output follows `lupdate` layout: contexts and messages in their original
//! order, absolute locations, four-space indentation.

use std::fmt::Write as _;
use std::path::Path;

use quick_xml::escape::escape;
use thiserror::Error;

use super::model::{
    Catalogue,
    ContextGroup,
    TranslationUnit,
};

#[derive(Error, Debug)]
pub enum WriteError {
    #[error("Failed to write catalogue file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to format catalogue: {0}")]
    Format(#[from] std::fmt::Error),
}

/// Serialize a catalogue, retired units included, to `.ts` text.
///
/// # Errors
/// Returns error only if formatting into the output buffer fails.
pub fn write_string(catalogue: &Catalogue) -> Result<String, WriteError> {
    let mut out = String::new();
    writeln!(out, r#"<?xml version="1.0" encoding="utf-8"?>"#)?;
    writeln!(out, "<!DOCTYPE TS>")?;
    write!(
        out,
        r#"<TS version="{}" language="{}""#,
        escape(catalogue.format_version()),
        escape(catalogue.language())
    )?;
    if let Some(source_language) = catalogue.source_language() {
        write!(out, r#" sourcelanguage="{}""#, escape(source_language))?;
    }
    writeln!(out, ">")?;

    for group in catalogue.groups() {
        write_context(&mut out, group)?;
    }

    writeln!(out, "</TS>")?;
    Ok(out)
}

/// Serialize a catalogue to a file.
///
/// # Errors
/// Returns error if the file cannot be written.
pub fn write_file(catalogue: &Catalogue, path: &Path) -> Result<(), WriteError> {
    let text = write_string(catalogue)?;
    std::fs::write(path, text)?;
    tracing::debug!(path = %path.display(), "Catalogue written");
    Ok(())
}

fn write_context(out: &mut String, group: &ContextGroup) -> std::fmt::Result {
    writeln!(out, "<context>")?;
    writeln!(out, "    <name>{}</name>", text(group.name()))?;
    for unit in group.units() {
        write_message(out, unit)?;
    }
    writeln!(out, "</context>")
}

fn write_message(out: &mut String, unit: &TranslationUnit) -> std::fmt::Result {
    if unit.is_plural() {
        writeln!(out, r#"    <message numerus="yes">"#)?;
    } else {
        writeln!(out, "    <message>")?;
    }

    for location in &unit.locations {
        let filename = escape(location.filename.as_str());
        match location.line {
            Some(line) => {
                writeln!(out, r#"        <location filename="{filename}" line="{line}"/>"#)?;
            }
            None => writeln!(out, r#"        <location filename="{filename}"/>"#)?,
        }
    }
    writeln!(out, "        <source>{}</source>", text(&unit.source_text))?;

    let optional = [
        ("oldsource", &unit.old_source),
        ("comment", &unit.disambiguator),
        ("extracomment", &unit.extra_comment),
        ("translatorcomment", &unit.translator_comment),
    ];
    for (element, value) in optional {
        if let Some(value) = value {
            writeln!(out, "        <{element}>{}</{element}>", text(value))?;
        }
    }

    let type_attr = unit
        .status
        .as_type_attr()
        .map(|value| format!(r#" type="{value}""#))
        .unwrap_or_default();
    match &unit.plural_forms {
        Some(forms) if !forms.is_empty() => {
            writeln!(out, "        <translation{type_attr}>")?;
            for (category, form) in forms.iter().enumerate() {
                let shorter = unit.plural_length_variants.get(category).map_or(&[][..], Vec::as_slice);
                write!(out, "            ")?;
                write_variants(out, "numerusform", "", form, shorter)?;
                writeln!(out)?;
            }
            writeln!(out, "        </translation>")?;
        }
        Some(_) => writeln!(out, "        <translation{type_attr}></translation>")?,
        None => {
            write!(out, "        ")?;
            write_variants(out, "translation", &type_attr, &unit.translation, &unit.length_variants)?;
            writeln!(out)?;
        }
    }

    writeln!(out, "    </message>")
}

/// Writes `<element>text</element>`, or one `<lengthvariant>` per variant when
/// shorter variants exist.
fn write_variants(
    out: &mut String,
    element: &str,
    attrs: &str,
    first: &str,
    shorter: &[String],
) -> std::fmt::Result {
    if shorter.is_empty() {
        return write!(out, "<{element}{attrs}>{}</{element}>", text(first));
    }
    write!(out, r#"<{element}{attrs} variants="yes">"#)?;
    for variant in std::iter::once(first).chain(shorter.iter().map(String::as_str)) {
        write!(out, "<lengthvariant>{}</lengthvariant>", text(variant))?;
    }
    write!(out, "</{element}>")
}

/// Escapes character data; control characters XML 1.0 cannot carry become `<byte>` elements.
fn text(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut run_start = 0;
    for (index, c) in value.char_indices() {
        if u32::from(c) < 0x20 && !matches!(c, '\t' | '\n' | '\r') {
            result.push_str(&escape(value.get(run_start..index).unwrap_or_default()));
            result.push_str(&format!(r#"<byte value="x{:x}"/>"#, u32::from(c)));
            run_start = index + c.len_utf8();
        }
    }
    result.push_str(&escape(value.get(run_start..).unwrap_or_default()));
    result
}
