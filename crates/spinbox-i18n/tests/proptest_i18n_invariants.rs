//! Property-based invariant tests for locale parsing and number formatting.
//!
//! 1. `Locale::parse` never panics and always yields a 2–3 letter language
//! 2. Parsing a canonical tag is idempotent
//! 3. The fallback chain starts with the tag and ends with the language
//! 4. Formatted output has exactly `precision` fraction digits
//! 5. Formatting never emits grouping separators
//! 6. The sign is present exactly when the rounded value is non-zero and negative
//! 7. Latin-digit output parses back to the rounded value

use proptest::prelude::*;
use spinbox_i18n::{Locale, NumberFormatter, ValueFormatter};

// ── Strategies ──────────────────────────────────────────────────────────

fn tag_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("en".to_owned()),
        Just("en-US".to_owned()),
        Just("de-DE".to_owned()),
        Just("fr".to_owned()),
        Just("sv-SE".to_owned()),
        Just("ar-EG".to_owned()),
        Just("fa".to_owned()),
        Just("zh-Hant-TW".to_owned()),
        "[a-z]{2,3}(-[A-Z]{2})?",
    ]
}

fn latin_tag_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("en"), Just("de"), Just("fr-CA"), Just("sv"), Just("ja")]
}

// ═════════════════════════════════════════════════════════════════════════
// 1–3. Locale parsing
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn parse_never_panics(raw in ".{0,32}") {
        let locale = Locale::parse(&raw);
        let language = locale.language();
        prop_assert!(matches!(language.len(), 2 | 3));
        prop_assert!(language.bytes().all(|b| b.is_ascii_lowercase()));
    }

    #[test]
    fn canonical_tags_are_fixed_points(tag in tag_strategy()) {
        let once = Locale::parse(&tag);
        let twice = Locale::parse(&once.tag());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn fallback_chain_bounds(tag in tag_strategy()) {
        let locale = Locale::parse(&tag);
        let chain = locale.fallback_chain();
        prop_assert_eq!(chain.first(), Some(&locale.tag()));
        prop_assert_eq!(chain.last().map(String::as_str), Some(locale.language()));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4–7. Number formatting
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn fraction_digits_match_precision(
        tag in tag_strategy(),
        precision in 0u32..8,
        value in -1.0e9f64..1.0e9,
    ) {
        let formatter = NumberFormatter::new(Locale::parse(&tag), precision);
        let out = formatter.format(value);
        let decimal = formatter.symbols().decimal;
        match out.split_once(decimal) {
            Some((_, fraction)) => prop_assert_eq!(fraction.chars().count(), precision as usize),
            None => prop_assert_eq!(precision, 0),
        }
    }

    #[test]
    fn no_grouping_separators(
        tag in tag_strategy(),
        precision in 0u32..4,
        value in -1.0e9f64..1.0e9,
    ) {
        let formatter = NumberFormatter::new(Locale::parse(&tag), precision);
        let out = formatter.format(value);
        let decimal = formatter.symbols().decimal;
        prop_assert!(out.chars().filter(|&c| c == decimal).count() <= 1);
        let nbsp = '\u{00A0}';
        prop_assert!(!out.contains(' ') && !out.contains(nbsp) && !out.contains('\''));
    }

    #[test]
    fn sign_tracks_rounded_value(
        tag in latin_tag_strategy(),
        precision in 0u32..4,
        value in -1000.0f64..1000.0,
    ) {
        let formatter = NumberFormatter::new(Locale::parse(tag), precision);
        let out = formatter.format(value);
        let minus = formatter.symbols().minus;
        let has_nonzero = out.chars().any(|c| matches!(c, '1'..='9'));
        prop_assert_eq!(out.starts_with(minus), value < 0.0 && has_nonzero);
    }

    #[test]
    fn latin_output_round_trips(
        tag in latin_tag_strategy(),
        precision in 0u32..4,
        value in -1000.0f64..1000.0,
    ) {
        let formatter = NumberFormatter::new(Locale::parse(tag), precision);
        let symbols = formatter.symbols();
        let ascii: String = formatter
            .format(value)
            .chars()
            .map(|c| if c == symbols.decimal { '.' } else if c == symbols.minus { '-' } else { c })
            .collect();
        let parsed: f64 = ascii.parse().expect("formatted output parses");
        let fixed: f64 = format!("{:.*}", precision as usize, value)
            .parse()
            .expect("fixed output parses");
        prop_assert_eq!(parsed, fixed);
    }
}
