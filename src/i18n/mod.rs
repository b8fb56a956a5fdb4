// SPDX-License-Identifier: MPL-2.0
//! Internationalization helpers for toast content.
//!
//! Toast bodies frequently carry numbers (progress counts, file sizes,
//! percentages) that must read naturally in the user's locale. This
//! module provides locale-aware number formatting with the expensive
//! formatter construction memoized per `(locale, options)`.

pub mod number_format;

pub use number_format::{
    format_number, system_locale, NumberFormatCache, NumberFormatOptions, NumberFormatter,
    NumberStyle,
};
