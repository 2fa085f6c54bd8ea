#![forbid(unsafe_code)]

//! Locale identifiers.
//!
//! [`Locale::parse`] accepts BCP 47 tags (`de-DE`, `zh-Hant-TW`) as well as
//! POSIX locale names (`de_DE.UTF-8@euro`) and never fails: anything without
//! a usable language subtag resolves to English.
//!
//! # Invariants
//!
//! 1. `language()` is 2–3 lowercase ASCII letters.
//! 2. `script()`, when present, is 4 ASCII letters in title case.
//! 3. `region()`, when present, is 2 uppercase letters or 3 digits.
//! 4. `fallback_chain()` starts with `tag()` and ends with `language()`.

use std::fmt;

/// Language used when a tag cannot be parsed.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Languages written right-to-left.
const RTL_LANGUAGES: &[&str] = &[
    "ar", "ckb", "dv", "fa", "he", "ps", "sd", "ug", "ur", "yi",
];

/// A parsed locale.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale {
    language: String,
    script: Option<String>,
    region: Option<String>,
}

impl Default for Locale {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_owned(),
            script: None,
            region: None,
        }
    }
}

impl Locale {
    /// Parse a locale tag. Unknown subtags are dropped.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        // POSIX names carry an encoding and modifier: `de_DE.UTF-8@euro`.
        let raw = raw.trim();
        let raw = raw.split(['.', '@']).next().unwrap_or_default();

        let mut subtags = raw.split(['-', '_']).filter(|s| !s.is_empty());
        let Some(language) = subtags.next().and_then(parse_language) else {
            return Self::default();
        };

        let mut locale = Self {
            language,
            script: None,
            region: None,
        };
        for subtag in subtags {
            if locale.script.is_none() && locale.region.is_none() {
                if let Some(script) = parse_script(subtag) {
                    locale.script = Some(script);
                    continue;
                }
            }
            if locale.region.is_none() {
                if let Some(region) = parse_region(subtag) {
                    locale.region = Some(region);
                }
            }
        }
        locale
    }

    /// Resolve the numeric locale from the process environment.
    ///
    /// Checks `LC_ALL`, then `LC_NUMERIC`, then `LANG`; the first non-empty
    /// value wins.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_with(|name| std::env::var(name).ok())
    }

    /// [`from_env`](Self::from_env) with an injectable variable lookup.
    #[must_use]
    pub fn from_env_with(lookup: impl Fn(&str) -> Option<String>) -> Self {
        ["LC_ALL", "LC_NUMERIC", "LANG"]
            .into_iter()
            .filter_map(&lookup)
            .find(|value| !value.trim().is_empty())
            .map_or_else(Self::default, |value| Self::parse(&value))
    }

    /// Primary language subtag, e.g. `de`.
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Script subtag, e.g. `Hant`.
    #[must_use]
    pub fn script(&self) -> Option<&str> {
        self.script.as_deref()
    }

    /// Region subtag, e.g. `DE`.
    #[must_use]
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// Canonical BCP 47 tag.
    #[must_use]
    pub fn tag(&self) -> String {
        self.to_string()
    }

    /// Tags to try when resolving locale data, most specific first.
    ///
    /// `zh-Hant-TW` yields `["zh-Hant-TW", "zh-Hant", "zh"]`.
    #[must_use]
    pub fn fallback_chain(&self) -> Vec<String> {
        let mut chain = vec![self.tag()];
        if let (Some(script), Some(_)) = (&self.script, &self.region) {
            chain.push(format!("{}-{script}", self.language));
        }
        if chain.last().map(String::as_str) != Some(self.language.as_str()) {
            chain.push(self.language.clone());
        }
        chain
    }

    /// Whether text in this locale runs right-to-left.
    #[must_use]
    pub fn is_rtl(&self) -> bool {
        RTL_LANGUAGES.contains(&self.language.as_str())
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.language)?;
        if let Some(script) = &self.script {
            write!(f, "-{script}")?;
        }
        if let Some(region) = &self.region {
            write!(f, "-{region}")?;
        }
        Ok(())
    }
}

impl From<&str> for Locale {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

fn parse_language(subtag: &str) -> Option<String> {
    // "C" and "POSIX" are valid POSIX locales but carry no language.
    (matches!(subtag.len(), 2 | 3) && subtag.bytes().all(|b| b.is_ascii_alphabetic()))
        .then(|| subtag.to_ascii_lowercase())
}

fn parse_script(subtag: &str) -> Option<String> {
    if subtag.len() != 4 || !subtag.bytes().all(|b| b.is_ascii_alphabetic()) {
        return None;
    }
    let mut out = subtag[..1].to_ascii_uppercase();
    out.push_str(&subtag[1..].to_ascii_lowercase());
    Some(out)
}

fn parse_region(subtag: &str) -> Option<String> {
    let bytes = subtag.as_bytes();
    match bytes.len() {
        2 if bytes.iter().all(u8::is_ascii_alphabetic) => Some(subtag.to_ascii_uppercase()),
        3 if bytes.iter().all(u8::is_ascii_digit) => Some(subtag.to_owned()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bcp47() {
        let locale = Locale::parse("de-DE");
        assert_eq!(locale.language(), "de");
        assert_eq!(locale.region(), Some("DE"));
        assert_eq!(locale.tag(), "de-DE");
    }

    #[test]
    fn normalizes_case() {
        assert_eq!(Locale::parse("EN-us").tag(), "en-US");
        assert_eq!(Locale::parse("zh-hant-tw").tag(), "zh-Hant-TW");
    }

    #[test]
    fn parses_posix_names() {
        assert_eq!(Locale::parse("de_DE.UTF-8").tag(), "de-DE");
        assert_eq!(Locale::parse("fr_CH@euro").tag(), "fr-CH");
        assert_eq!(Locale::parse("es_419").tag(), "es-419");
    }

    #[test]
    fn falls_back_to_english() {
        assert_eq!(Locale::parse(""), Locale::default());
        assert_eq!(Locale::parse("C"), Locale::default());
        assert_eq!(Locale::parse("POSIX").tag(), "en");
        assert_eq!(Locale::parse("12-34").tag(), "en");
    }

    #[test]
    fn drops_unknown_subtags() {
        assert_eq!(Locale::parse("en-US-x-private").tag(), "en-US");
        assert_eq!(Locale::parse("sr-Latn").tag(), "sr-Latn");
    }

    #[test]
    fn fallback_chain_order() {
        assert_eq!(
            Locale::parse("zh-Hant-TW").fallback_chain(),
            vec!["zh-Hant-TW", "zh-Hant", "zh"]
        );
        assert_eq!(Locale::parse("de-AT").fallback_chain(), vec!["de-AT", "de"]);
        assert_eq!(Locale::parse("fi").fallback_chain(), vec!["fi"]);
    }

    #[test]
    fn rtl_languages() {
        assert!(Locale::parse("ar-EG").is_rtl());
        assert!(Locale::parse("he").is_rtl());
        assert!(Locale::parse("fa_IR").is_rtl());
        assert!(!Locale::parse("en").is_rtl());
        assert!(!Locale::parse("de").is_rtl());
    }

    #[test]
    fn env_precedence() {
        let env = |name: &str| match name {
            "LC_ALL" => Some(String::new()),
            "LC_NUMERIC" => Some("sv_SE.UTF-8".to_owned()),
            "LANG" => Some("en_US.UTF-8".to_owned()),
            _ => None,
        };
        assert_eq!(Locale::from_env_with(env).tag(), "sv-SE");
        assert_eq!(Locale::from_env_with(|_| None), Locale::default());
    }
}
