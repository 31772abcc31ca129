//! Per-language plural rules for numerus messages.
//!
//! A rule maps a count to the index of the `<numerusform>` that should be
//! shown. The rule is picked once per catalogue from its language tag.

use serde::Serialize;

use crate::language;

/// Plural category strategy of a target language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PluralRule {
    /// No grammatical number (Japanese, Chinese, Korean, ...).
    Single,
    /// `1` vs everything else (English, Italian, German, ...).
    #[default]
    OneOther,
    /// `0` and `1` are singular (French, Brazilian Portuguese).
    French,
    /// Icelandic: numbers ending in 1 except 11 are singular.
    Icelandic,
    /// Russian, Ukrainian, Belarusian, Serbian, Croatian, Bosnian.
    Slavic,
    Polish,
    /// Czech and Slovak: `1`, `2..=4`, rest.
    CzechSlovak,
    Lithuanian,
    Latvian,
    Romanian,
    Macedonian,
    Slovenian,
    Maltese,
    Welsh,
    Irish,
    Arabic,
}

/// Base languages by rule. Anything not listed uses [`PluralRule::OneOther`].
const LANGUAGE_RULES: &[(&[&str], PluralRule)] = &[
    (
        &[
            "bo", "dz", "id", "ja", "jv", "ka", "km", "ko", "lo", "ms", "my", "su", "th", "tr",
            "vi", "yo", "zh",
        ],
        PluralRule::Single,
    ),
    (
        &[
            "af", "az", "bg", "bn", "ca", "da", "de", "el", "en", "eo", "es", "et", "eu", "fa",
            "fi", "fo", "fy", "gl", "gu", "ha", "he", "hi", "hu", "hy", "it", "kk", "kn", "ky",
            "lb", "ml", "mn", "mr", "nb", "ne", "nl", "nn", "no", "or", "pa", "ps", "pt", "sq",
            "sv", "sw", "ta", "te", "tk", "ur", "uz", "zu",
        ],
        PluralRule::OneOther,
    ),
    (&["fr", "fil", "ln", "ti", "wa"], PluralRule::French),
    (&["is"], PluralRule::Icelandic),
    (&["be", "bs", "hr", "ru", "sr", "uk"], PluralRule::Slavic),
    (&["pl"], PluralRule::Polish),
    (&["cs", "sk"], PluralRule::CzechSlovak),
    (&["lt"], PluralRule::Lithuanian),
    (&["lv"], PluralRule::Latvian),
    (&["ro"], PluralRule::Romanian),
    (&["mk"], PluralRule::Macedonian),
    (&["sl"], PluralRule::Slovenian),
    (&["mt"], PluralRule::Maltese),
    (&["cy"], PluralRule::Welsh),
    (&["ga"], PluralRule::Irish),
    (&["ar"], PluralRule::Arabic),
];

impl PluralRule {
    /// Looks up the rule for a base language code (`"it"`, `"pl"`), if known.
    #[must_use]
    pub fn lookup(base_language: &str) -> Option<Self> {
        let base = base_language.to_ascii_lowercase();
        LANGUAGE_RULES
            .iter()
            .find(|(codes, _)| codes.contains(&base.as_str()))
            .map(|(_, rule)| *rule)
    }

    /// Selects the rule for a full language tag such as `it_IT` or `pt-BR`.
    ///
    /// Unknown languages fall back to [`PluralRule::OneOther`].
    #[must_use]
    pub fn for_language(tag: &str) -> Self {
        let normalized = language::normalize(tag);
        // Brazilian Portuguese counts 0 as singular, European Portuguese does not.
        if normalized == "pt_br" {
            return Self::French;
        }
        Self::lookup(language::base(&normalized)).unwrap_or_default()
    }

    /// Number of `<numerusform>` entries a complete translation provides.
    #[must_use]
    pub const fn form_count(self) -> usize {
        match self {
            Self::Single => 1,
            Self::OneOther | Self::French | Self::Icelandic => 2,
            Self::Slavic
            | Self::Polish
            | Self::CzechSlovak
            | Self::Lithuanian
            | Self::Latvian
            | Self::Romanian
            | Self::Macedonian => 3,
            Self::Slovenian | Self::Maltese | Self::Welsh => 4,
            Self::Irish => 5,
            Self::Arabic => 6,
        }
    }

    /// Index of the plural form to use for `count`.
    ///
    /// Always below [`PluralRule::form_count`]. Negative counts use their
    /// magnitude.
    #[must_use]
    pub const fn category(self, count: i64) -> usize {
        let n = count.unsigned_abs();
        let n10 = n % 10;
        let n100 = n % 100;
        match self {
            Self::Single => 0,
            Self::OneOther => (n != 1) as usize,
            Self::French => (n > 1) as usize,
            Self::Icelandic => (n10 != 1 || n100 == 11) as usize,
            Self::Slavic => {
                if n10 == 1 && n100 != 11 {
                    0
                } else if is_few(n10, n100) {
                    1
                } else {
                    2
                }
            }
            Self::Polish => {
                if n == 1 {
                    0
                } else if is_few(n10, n100) {
                    1
                } else {
                    2
                }
            }
            Self::CzechSlovak => match n {
                1 => 0,
                2..=4 => 1,
                _ => 2,
            },
            Self::Lithuanian => {
                if n10 == 1 && n100 != 11 {
                    0
                } else if n10 >= 2 && !matches!(n100, 10..=19) {
                    1
                } else {
                    2
                }
            }
            Self::Latvian => {
                if n10 == 1 && n100 != 11 {
                    0
                } else if n != 0 {
                    1
                } else {
                    2
                }
            }
            Self::Romanian => {
                if n == 1 {
                    0
                } else if n == 0 || matches!(n100, 1..=19) {
                    1
                } else {
                    2
                }
            }
            Self::Macedonian => match n10 {
                1 => 0,
                2 => 1,
                _ => 2,
            },
            Self::Slovenian => match n100 {
                1 => 0,
                2 => 1,
                3 | 4 => 2,
                _ => 3,
            },
            Self::Maltese => {
                if n == 1 {
                    0
                } else if n == 0 || matches!(n100, 2..=10) {
                    1
                } else if matches!(n100, 11..=19) {
                    2
                } else {
                    3
                }
            }
            Self::Welsh => match n {
                1 => 0,
                2 => 1,
                8 | 11 => 2,
                _ => 3,
            },
            Self::Irish => match n {
                1 => 0,
                2 => 1,
                3..=6 => 2,
                7..=10 => 3,
                _ => 4,
            },
            Self::Arabic => {
                if n == 0 {
                    0
                } else if n == 1 {
                    1
                } else if n == 2 {
                    2
                } else if matches!(n100, 3..=10) {
                    3
                } else if n100 >= 11 {
                    4
                } else {
                    5
                }
            }
        }
    }
}

/// `2..=4` but not `12..=14`, shared by the Slavic rules.
const fn is_few(n10: u64, n100: u64) -> bool {
    matches!(n10, 2..=4) && !matches!(n100, 12..=14)
}
