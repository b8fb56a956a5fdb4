// SPDX-License-Identifier: MPL-2.0
//! Locale-aware number formatting with memoized formatter construction.
//!
//! Building a formatter means resolving digit symbols and normalizing
//! digit policies for a locale, so a [`NumberFormatCache`] memoizes the
//! constructed [`NumberFormatter`] by `(locale, options)` and hands out
//! shared instances. The cache is unbounded for the process lifetime;
//! locale/options combinations are low-cardinality in practice.
//!
//! Symbols are resolved at language-subtag granularity from a built-in
//! table, with English separators as the fallback.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use unic_langid::LanguageIdentifier;

/// Presentation style for a formatted number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NumberStyle {
    /// Plain decimal notation.
    #[default]
    Decimal,
    /// The value is a ratio; it is scaled by 100 and suffixed with the
    /// locale's percent affix.
    Percent,
}

/// Digit policy for a formatter.
///
/// Unset fraction bounds resolve to per-style defaults (up to three
/// fraction digits for decimals, none for percentages).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NumberFormatOptions {
    pub style: NumberStyle,
    /// Insert grouping separators into the integer part.
    pub use_grouping: bool,
    /// Left-pad the integer part with zeros up to this width.
    pub minimum_integer_digits: Option<u8>,
    pub minimum_fraction_digits: Option<u8>,
    pub maximum_fraction_digits: Option<u8>,
}

impl Default for NumberFormatOptions {
    fn default() -> Self {
        Self {
            style: NumberStyle::Decimal,
            use_grouping: true,
            minimum_integer_digits: None,
            minimum_fraction_digits: None,
            maximum_fraction_digits: None,
        }
    }
}

impl NumberFormatOptions {
    /// Decimal options with defaults.
    #[must_use]
    pub fn decimal() -> Self {
        Self::default()
    }

    /// Percent options with defaults.
    #[must_use]
    pub fn percent() -> Self {
        Self {
            style: NumberStyle::Percent,
            ..Self::default()
        }
    }

    /// Enables or disables grouping separators.
    #[must_use]
    pub fn with_use_grouping(mut self, use_grouping: bool) -> Self {
        self.use_grouping = use_grouping;
        self
    }

    /// Sets the minimum integer-digit width.
    #[must_use]
    pub fn with_minimum_integer_digits(mut self, digits: u8) -> Self {
        self.minimum_integer_digits = Some(digits);
        self
    }

    /// Sets the minimum number of fraction digits.
    #[must_use]
    pub fn with_minimum_fraction_digits(mut self, digits: u8) -> Self {
        self.minimum_fraction_digits = Some(digits);
        self
    }

    /// Sets the maximum number of fraction digits.
    #[must_use]
    pub fn with_maximum_fraction_digits(mut self, digits: u8) -> Self {
        self.maximum_fraction_digits = Some(digits);
        self
    }
}

/// Separator and affix symbols for one locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LocaleSymbols {
    decimal: &'static str,
    group: &'static str,
    percent: &'static str,
}

impl LocaleSymbols {
    /// English-style symbols, also the fallback for unknown languages.
    const ENGLISH: Self = Self {
        decimal: ".",
        group: ",",
        percent: "%",
    };

    fn for_locale(locale: &LanguageIdentifier) -> Self {
        match locale.language.as_str() {
            // Dot-grouped, comma-decimal languages
            "de" | "es" | "it" | "pt" | "nl" | "tr" | "id" | "da" => Self {
                decimal: ",",
                group: ".",
                percent: "\u{a0}%",
            },
            // French groups with narrow no-break spaces
            "fr" => Self {
                decimal: ",",
                group: "\u{202f}",
                percent: "\u{a0}%",
            },
            // Space-grouped, comma-decimal languages
            "ru" | "uk" | "pl" | "cs" | "sk" | "sv" | "fi" | "nb" | "nn" => Self {
                decimal: ",",
                group: "\u{a0}",
                percent: "\u{a0}%",
            },
            _ => Self::ENGLISH,
        }
    }
}

/// A constructed number formatter for one `(locale, options)` pair.
///
/// Construction resolves symbols and digit policies once; formatting is
/// then pure string assembly. Obtain shared instances through
/// [`NumberFormatCache`] rather than constructing per call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberFormatter {
    locale: LanguageIdentifier,
    options: NumberFormatOptions,
    symbols: LocaleSymbols,
    min_integer_digits: usize,
    min_fraction_digits: usize,
    max_fraction_digits: usize,
}

impl NumberFormatter {
    /// Builds a formatter, resolving symbols and digit bounds.
    #[must_use]
    pub fn new(locale: LanguageIdentifier, options: NumberFormatOptions) -> Self {
        let symbols = LocaleSymbols::for_locale(&locale);
        let style_max_default = match options.style {
            NumberStyle::Decimal => 3,
            NumberStyle::Percent => 0,
        };
        let min_fraction_digits = usize::from(options.minimum_fraction_digits.unwrap_or(0));
        let max_fraction_digits = usize::from(
            options
                .maximum_fraction_digits
                .unwrap_or(style_max_default),
        )
        .max(min_fraction_digits);
        let min_integer_digits = usize::from(options.minimum_integer_digits.unwrap_or(1)).max(1);
        Self {
            locale,
            options,
            symbols,
            min_integer_digits,
            min_fraction_digits,
            max_fraction_digits,
        }
    }

    /// Returns the formatter's locale.
    #[must_use]
    pub fn locale(&self) -> &LanguageIdentifier {
        &self.locale
    }

    /// Returns the options the formatter was built from.
    #[must_use]
    pub fn options(&self) -> &NumberFormatOptions {
        &self.options
    }

    /// Formats a value according to the locale and digit policy.
    #[must_use]
    pub fn format(&self, value: f64) -> String {
        if value.is_nan() {
            return "NaN".to_string();
        }
        if value.is_infinite() {
            return if value < 0.0 { "-∞" } else { "∞" }.to_string();
        }

        let scaled = match self.options.style {
            NumberStyle::Decimal => value,
            NumberStyle::Percent => value * 100.0,
        };
        let negative = scaled < 0.0;
        let rounded = format!("{:.*}", self.max_fraction_digits, scaled.abs());
        let (integer, fraction) = match rounded.split_once('.') {
            Some((i, f)) => (i.to_string(), f.to_string()),
            None => (rounded, String::new()),
        };

        let mut fraction = fraction;
        while fraction.len() > self.min_fraction_digits && fraction.ends_with('0') {
            fraction.pop();
        }

        let mut integer = integer;
        while integer.len() < self.min_integer_digits {
            integer.insert(0, '0');
        }
        if self.options.use_grouping {
            integer = group_digits(&integer, self.symbols.group);
        }

        let mut out = String::new();
        if negative {
            out.push('-');
        }
        out.push_str(&integer);
        if !fraction.is_empty() {
            out.push_str(self.symbols.decimal);
            out.push_str(&fraction);
        }
        if self.options.style == NumberStyle::Percent {
            out.push_str(self.symbols.percent);
        }
        out
    }
}

/// Inserts a grouping separator every three digits, counting from the
/// right. Numbers of three or fewer digits are left untouched.
fn group_digits(digits: &str, separator: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let lead = digits.len() % 3;
    for (i, c) in digits.chars().enumerate() {
        if i != 0 && (i + 3 - lead) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(c);
    }
    out
}

/// Memoizes constructed formatters by `(locale, options)`.
///
/// Repeated calls with an identical key reuse the same
/// [`NumberFormatter`] instance (observable via [`Rc::ptr_eq`]).
#[derive(Debug, Default)]
pub struct NumberFormatCache {
    formatters: HashMap<(LanguageIdentifier, NumberFormatOptions), Rc<NumberFormatter>>,
}

impl NumberFormatCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached formatter for the key, constructing it on the
    /// first request.
    pub fn formatter(
        &mut self,
        locale: &LanguageIdentifier,
        options: &NumberFormatOptions,
    ) -> Rc<NumberFormatter> {
        let key = (locale.clone(), options.clone());
        Rc::clone(self.formatters.entry(key).or_insert_with(|| {
            Rc::new(NumberFormatter::new(locale.clone(), options.clone()))
        }))
    }

    /// Formats a value through the cached formatter for the key.
    pub fn format(
        &mut self,
        value: f64,
        locale: &LanguageIdentifier,
        options: &NumberFormatOptions,
    ) -> String {
        self.formatter(locale, options).format(value)
    }

    /// Returns the number of constructed formatters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.formatters.len()
    }

    /// Returns true when no formatter has been constructed yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.formatters.is_empty()
    }
}

thread_local! {
    static CACHE: RefCell<NumberFormatCache> = RefCell::new(NumberFormatCache::new());
}

/// Formats a value for a BCP 47 locale string through a process-wide
/// (per-thread) cache.
///
/// Unparseable locales fall back to `en-US`.
pub fn format_number(value: f64, locale: &str, options: &NumberFormatOptions) -> String {
    let locale: LanguageIdentifier = locale.parse().unwrap_or_else(|_| fallback_locale());
    CACHE.with(|cache| cache.borrow_mut().format(value, &locale, options))
}

/// Returns the operating system's locale, falling back to `en-US` when
/// detection fails or yields an unparseable identifier.
#[must_use]
pub fn system_locale() -> LanguageIdentifier {
    sys_locale::get_locale()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(fallback_locale)
}

fn fallback_locale() -> LanguageIdentifier {
    "en-US".parse().unwrap()
}
