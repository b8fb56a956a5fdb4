// SPDX-License-Identifier: MPL-2.0
//! `lens_notify` is a render-agnostic toast notification core.
//!
//! It manages ephemeral, auto-dismissing notification widgets through
//! explicit lifecycle state machines and exposes their state as plain
//! attribute/event data any view layer can consume. The crate performs
//! no rendering and owns no event loop: hosts feed input events in,
//! drive timers with ticks, and read binding snapshots out.
//!
//! - [`toast`] - machines, the placement-ordered manager, and the
//!   binding adapter
//! - [`i18n`] - locale-aware number formatting with memoized formatters
//! - [`config`] - host-tunable behavior persisted as TOML
//! - [`diagnostics`] - opt-in lifecycle event log
//! - [`error`] - the recoverable error taxonomy

#![doc(html_root_url = "https://docs.rs/lens_notify/0.1.0")]

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod i18n;
pub mod toast;
