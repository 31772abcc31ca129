//! Language tag helpers.
//!
//! Catalogues carry Qt style tags (`it`, `it_IT`, `pt_BR`) in the document and
//! usually in the file name as well (`wireshark_it.ts`).

use std::path::Path;

use crate::plural::PluralRule;

/// Normalize a language tag (lowercase and replace `-` with `_`).
#[must_use]
pub fn normalize(tag: &str) -> String {
    tag.trim().to_lowercase().replace('-', "_")
}

/// Base language of a normalized tag (`it_it` -> `it`).
#[must_use]
pub fn base(normalized: &str) -> &str {
    normalized.split('_').next().unwrap_or(normalized)
}

/// Returns true if `candidate` reads as a language tag with a known base
/// language, optionally followed by a script and/or region subtag.
///
/// # Examples
/// ```
/// use ts_catalogue::language::is_language_tag;
///
/// assert!(is_language_tag("it"));
/// assert!(is_language_tag("pt_BR"));
/// assert!(is_language_tag("sr-Latn-RS"));
/// assert!(!is_language_tag("wireshark"));
/// ```
#[must_use]
pub fn is_language_tag(candidate: &str) -> bool {
    let mut parts = candidate.split(['_', '-']);
    let Some(first) = parts.next() else {
        return false;
    };
    if !(2..=3).contains(&first.len()) || !first.chars().all(|c| c.is_ascii_alphabetic()) {
        return false;
    }
    if PluralRule::lookup(first).is_none() {
        return false;
    }

    let rest: Vec<&str> = parts.collect();
    rest.len() <= 2 && rest.iter().all(|part| is_subtag(part))
}

/// Script (`Latn`), region (`IT`) or numeric region (`419`) subtag.
fn is_subtag(part: &str) -> bool {
    match part.len() {
        2 | 4 => part.chars().all(|c| c.is_ascii_alphabetic()),
        3 => part.chars().all(|c| c.is_ascii_digit()),
        _ => false,
    }
}

/// Returns true if two tags name the same language, ignoring case and separator.
#[must_use]
pub fn same_language(a: &str, b: &str) -> bool {
    normalize(a) == normalize(b)
}

/// Returns true if two tags share a base language (`it_IT` and `it_CH`).
#[must_use]
pub fn same_base_language(a: &str, b: &str) -> bool {
    base(&normalize(a)) == base(&normalize(b))
}

/// Detect language from file path heuristically.
///
/// The file stem is tried first, longest `_`-separated suffix first, then
/// directory names from the innermost outwards.
///
/// # Examples
/// - `translations/wireshark_it.ts` → `it`
/// - `translations/wireshark_pt_BR.ts` → `pt_BR`
/// - `i18n/it_IT/app.ts` → `it_IT`
/// - `translations/app.ts` → `None`
#[must_use]
pub fn detect_from_path(file_path: &Path) -> Option<String> {
    if let Some(stem) = file_path.file_stem().map(|s| s.to_string_lossy())
        && let Some(tag) = tag_suffix(&stem)
    {
        return Some(tag.to_string());
    }

    file_path
        .parent()?
        .components()
        .rev()
        .map(|c| c.as_os_str().to_string_lossy())
        .find(|name| is_language_tag(name))
        .map(|name| name.to_string())
}

/// Longest `_`-separated suffix of `stem` that is a language tag.
fn tag_suffix(stem: &str) -> Option<&str> {
    if is_language_tag(stem) {
        return Some(stem);
    }
    stem.match_indices('_')
        .map(|(index, _)| stem.get(index + 1..).unwrap_or_default())
        .find(|suffix| is_language_tag(suffix))
}
