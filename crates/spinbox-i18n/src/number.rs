#![forbid(unsafe_code)]

//! Locale-aware fixed-decimal number formatting.
//!
//! Spin buttons show values with exactly as many decimals as their step, so
//! formatting here is deliberately narrow: fixed fraction digits, no
//! grouping separators, locale-specific decimal separator, minus sign, and
//! digit shapes.
//!
//! # Failure Modes
//!
//! - Non-finite values format as the empty string.
//! - A negative value that rounds to zero at the given precision loses its
//!   sign (`-0.004` at two places is `0.00`).

use crate::locale::Locale;

/// Hyphen-minus.
const ASCII_MINUS: char = '-';

/// U+2212 MINUS SIGN.
const MINUS_SIGN: char = '\u{2212}';

/// U+066B ARABIC DECIMAL SEPARATOR.
const ARABIC_DECIMAL: char = '\u{066B}';

/// Languages using a decimal comma.
const DECIMAL_COMMA: &[&str] = &[
    "bg", "cs", "da", "de", "el", "es", "et", "fi", "fr", "hr", "hu", "id", "it", "lt", "lv", "nb",
    "nl", "nn", "no", "pl", "pt", "ro", "ru", "sk", "sl", "sv", "tr", "uk", "vi",
];

/// Regional tags whose decimal separator differs from their language.
const REGIONAL_DECIMAL: &[(&str, char)] = &[
    ("de-CH", '.'),
    ("de-LI", '.'),
    ("it-CH", '.'),
    ("es-MX", '.'),
    ("es-US", '.'),
    ("en-ZA", ','),
];

/// Languages using U+2212 rather than hyphen-minus.
const TYPOGRAPHIC_MINUS: &[&str] = &["et", "fi", "lt", "nb", "nn", "no", "sl", "sv"];

/// Anything that turns a value into display text.
///
/// Implemented for [`NumberFormatter`] and for any `Fn(f64) -> String`, so a
/// host can pass a closure:
///
/// ```
/// use spinbox_i18n::ValueFormatter;
///
/// let percent = |v: f64| format!("{v:.0}%");
/// assert_eq!(percent.format(42.0), "42%");
/// ```
pub trait ValueFormatter {
    /// Format a finite value for display.
    fn format(&self, value: f64) -> String;
}

impl<F> ValueFormatter for F
where
    F: Fn(f64) -> String,
{
    fn format(&self, value: f64) -> String {
        self(value)
    }
}

/// Digit shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Digits {
    /// `0123456789`
    #[default]
    Latin,
    /// `٠١٢٣٤٥٦٧٨٩` (U+0660..)
    ArabicIndic,
    /// `۰۱۲۳۴۵۶۷۸۹` (U+06F0..)
    Persian,
}

impl Digits {
    fn shape(self, digit: char) -> char {
        let base = match self {
            Self::Latin => return digit,
            Self::ArabicIndic => 0x0660,
            Self::Persian => 0x06F0,
        };
        digit
            .to_digit(10)
            .and_then(|d| char::from_u32(base + d))
            .unwrap_or(digit)
    }
}

/// Locale-specific symbols used when formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NumberSymbols {
    /// Separator between integer and fraction digits.
    pub decimal: char,
    /// Sign prefixed to negative values.
    pub minus: char,
    /// Digit shapes.
    pub digits: Digits,
}

impl Default for NumberSymbols {
    fn default() -> Self {
        Self {
            decimal: '.',
            minus: ASCII_MINUS,
            digits: Digits::Latin,
        }
    }
}

impl NumberSymbols {
    /// Symbols for `locale`.
    ///
    /// Walks [`Locale::fallback_chain`] so a regional entry such as `de-CH`
    /// wins over the `de` default.
    #[must_use]
    pub fn for_locale(locale: &Locale) -> Self {
        let language = locale.language();
        let mut symbols = Self::for_language(language);
        if let Some(decimal) = locale.fallback_chain().iter().find_map(|tag| {
            REGIONAL_DECIMAL
                .iter()
                .find(|(regional, _)| regional.eq_ignore_ascii_case(tag))
                .map(|&(_, decimal)| decimal)
        }) {
            symbols.decimal = decimal;
        }
        symbols
    }

    fn for_language(language: &str) -> Self {
        match language {
            "ar" => Self {
                decimal: ARABIC_DECIMAL,
                minus: ASCII_MINUS,
                digits: Digits::ArabicIndic,
            },
            "fa" => Self {
                decimal: ARABIC_DECIMAL,
                minus: ASCII_MINUS,
                digits: Digits::Persian,
            },
            _ => Self {
                decimal: if DECIMAL_COMMA.contains(&language) {
                    ','
                } else {
                    '.'
                },
                minus: if TYPOGRAPHIC_MINUS.contains(&language) {
                    MINUS_SIGN
                } else {
                    ASCII_MINUS
                },
                digits: Digits::Latin,
            },
        }
    }
}

/// Default formatter: fixed `precision` fraction digits with locale symbols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberFormatter {
    locale: Locale,
    precision: u32,
    symbols: NumberSymbols,
}

impl Default for NumberFormatter {
    fn default() -> Self {
        Self::new(Locale::default(), 0)
    }
}

impl NumberFormatter {
    /// Create a formatter for `locale` with `precision` fraction digits.
    #[must_use]
    pub fn new(locale: Locale, precision: u32) -> Self {
        let symbols = NumberSymbols::for_locale(&locale);
        Self {
            locale,
            precision,
            symbols,
        }
    }

    /// Change the fraction digits (builder).
    #[must_use]
    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }

    /// Override the locale symbols (builder).
    #[must_use]
    pub fn with_symbols(mut self, symbols: NumberSymbols) -> Self {
        self.symbols = symbols;
        self
    }

    /// The formatter's locale.
    #[must_use]
    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Fraction digits.
    #[must_use]
    pub fn precision(&self) -> u32 {
        self.precision
    }

    /// Symbols in use.
    #[must_use]
    pub fn symbols(&self) -> NumberSymbols {
        self.symbols
    }

    /// Format `value`. Non-finite values yield the empty string.
    #[must_use]
    pub fn format_value(&self, value: f64) -> String {
        if !value.is_finite() {
            return String::new();
        }

        let fixed = format!("{:.*}", self.precision as usize, value.abs());
        let negative = value < 0.0 && fixed.bytes().any(|b| matches!(b, b'1'..=b'9'));

        let mut out = String::with_capacity(fixed.len() + 1);
        if negative {
            out.push(self.symbols.minus);
        }
        for ch in fixed.chars() {
            match ch {
                '.' => out.push(self.symbols.decimal),
                d => out.push(self.symbols.digits.shape(d)),
            }
        }
        out
    }
}

impl ValueFormatter for NumberFormatter {
    fn format(&self, value: f64) -> String {
        self.format_value(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(tag: &str, precision: u32, value: f64) -> String {
        NumberFormatter::new(Locale::parse(tag), precision).format_value(value)
    }

    #[test]
    fn english_fixed_decimals() {
        assert_eq!(fmt("en", 2, 1.5), "1.50");
        assert_eq!(fmt("en-US", 0, 42.0), "42");
        assert_eq!(fmt("en", 1, -3.26), "-3.3");
    }

    #[test]
    fn decimal_comma_locales() {
        assert_eq!(fmt("de", 2, 1.5), "1,50");
        assert_eq!(fmt("fr-FR", 1, 0.5), "0,5");
        assert_eq!(fmt("pt-BR", 3, 2.0), "2,000");
    }

    #[test]
    fn no_grouping() {
        assert_eq!(fmt("en", 0, 1_234_567.0), "1234567");
        assert_eq!(fmt("de", 1, 1_234.5), "1234,5");
    }

    #[test]
    fn regional_separator_overrides_language() {
        assert_eq!(fmt("de-CH", 2, 1.5), "1.50");
        assert_eq!(fmt("de-DE", 2, 1.5), "1,50");
        assert_eq!(fmt("es-MX", 1, 0.5), "0.5");
        assert_eq!(fmt("en-ZA", 1, 0.5), "0,5");
        assert_eq!(fmt("de_CH.UTF-8", 1, 3.5), "3.5");
        assert_eq!(fmt("it-CH", 1, 2.5), "2.5");
        assert_eq!(fmt("it-IT", 1, 2.5), "2,5");
    }

    #[test]
    fn typographic_minus() {
        assert_eq!(fmt("sv", 1, -1.5), "\u{2212}1,5");
        assert_eq!(fmt("fi", 0, -2.0), "\u{2212}2");
    }

    #[test]
    fn negative_zero_loses_sign() {
        assert_eq!(fmt("en", 2, -0.004), "0.00");
        assert_eq!(fmt("en", 0, -0.0), "0");
    }

    #[test]
    fn arabic_digits() {
        assert_eq!(fmt("ar", 1, 12.5), "١٢٫٥");
        assert_eq!(fmt("fa", 0, 90.0), "۹۰");
    }

    #[test]
    fn non_finite_is_empty() {
        assert_eq!(fmt("en", 2, f64::NAN), "");
        assert_eq!(fmt("en", 2, f64::INFINITY), "");
    }

    #[test]
    fn custom_symbols() {
        let formatter = NumberFormatter::new(Locale::parse("en"), 1).with_symbols(NumberSymbols {
            decimal: '\u{00B7}',
            ..NumberSymbols::default()
        });
        assert_eq!(formatter.format_value(2.5), "2\u{00B7}5");
    }

    #[test]
    fn closures_are_formatters() {
        let f = |v: f64| format!("{v:.1} kg");
        assert_eq!(ValueFormatter::format(&f, 2.0), "2.0 kg");
        let boxed: Box<dyn ValueFormatter> = Box::new(NumberFormatter::default());
        assert_eq!(boxed.format(3.0), "3");
    }

    #[test]
    fn precision_builder() {
        let formatter = NumberFormatter::default().with_precision(3);
        assert_eq!(formatter.precision(), 3);
        assert_eq!(formatter.format_value(1.0), "1.000");
    }
}
