//! Positional placeholder substitution.
//!
//! Understands the markers Qt translations use: `%1` to `%99` for positional
//! arguments and `%n` for the count of a numerus message. The localized forms
//! `%L1` and `%Ln` are substituted the same way, without number grouping.

use std::fmt::Display;

/// Result of substituting placeholders into a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    pub text: String,
    /// Placeholder numbers referenced but not supplied, ascending.
    pub missing: Vec<usize>,
}

/// Substitutes `%n` with `count` and `%N` with `args[N - 1]`.
///
/// Markers without a value are left as literal text. `%n` without a count is
/// not reported as missing since non-numerus callers never pass one.
///
/// # Examples
/// ```
/// use ts_catalogue::resolver::substitute;
///
/// let result = substitute("Byte %1-%2", None, &[&10, &20]);
/// assert_eq!(result.text, "Byte 10-20");
/// assert!(result.missing.is_empty());
/// ```
#[must_use]
pub fn substitute(template: &str, count: Option<i64>, args: &[&dyn Display]) -> Substitution {
    let mut text = String::with_capacity(template.len());
    let mut missing = Vec::new();
    let mut rest = template;

    while let Some(percent) = rest.find('%') {
        text.push_str(rest.get(..percent).unwrap_or_default());
        let after = rest.get(percent + 1..).unwrap_or_default();
        let (prefix_len, spec) =
            after.strip_prefix('L').map_or((1, after), |spec| (2, spec));

        if let Some(tail) = spec.strip_prefix('n')
            && let Some(count) = count
        {
            text.push_str(&count.to_string());
            rest = tail;
            continue;
        }

        let digits = spec.bytes().take(2).take_while(u8::is_ascii_digit).count();
        let number: usize = spec.get(..digits).and_then(|d| d.parse().ok()).unwrap_or(0);
        if number > 0 {
            if let Some(arg) = args.get(number - 1) {
                text.push_str(&arg.to_string());
            } else {
                missing.push(number);
                text.push_str(rest.get(percent..percent + prefix_len + digits).unwrap_or_default());
            }
            rest = spec.get(digits..).unwrap_or_default();
            continue;
        }

        text.push('%');
        rest = after;
    }
    text.push_str(rest);

    missing.sort_unstable();
    missing.dedup();
    Substitution { text, missing }
}
