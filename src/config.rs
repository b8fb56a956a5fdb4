// SPDX-License-Identifier: MPL-2.0
//! Notification configuration, including loading and saving host
//! preferences to a `notifications.toml` file.
//!
//! Durations are stored as raw milliseconds in the file (TOML integers
//! are signed), so negative values are representable there and nowhere
//! else; [`NotificationConfig::validate`] rejects them before the values
//! reach the manager.
//!
//! # Examples
//!
//! ```no_run
//! use lens_notify::config::{self, NotificationConfig};
//!
//! let mut config = config::load().unwrap_or_default();
//! config.max_visible = Some(5);
//! config::save(&config).expect("Failed to save config");
//! ```

use crate::error::{Error, Result};
use crate::toast::{DuplicatePolicy, StackingOrder};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "notifications.toml";
const APP_NAME: &str = "lens_notify";

/// Maximum simultaneously visible toasts per placement.
pub const DEFAULT_MAX_VISIBLE: usize = 3;

/// Grace period between dismiss and physical removal, in milliseconds.
pub const DEFAULT_REMOVE_DELAY_MS: u64 = 300;

/// Whether focus/hover suspends the countdown by default.
pub const DEFAULT_PAUSE_ON_INTERACTION: bool = true;

/// Host-tunable notification behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// Visible limit per placement; `None` means unlimited. Toasts over
    /// the limit wait in a queue and are promoted as slots free up.
    pub max_visible: Option<usize>,
    /// Where new toasts join a placement's sequence.
    pub stacking: StackingOrder,
    /// What `add` does when the id is already registered.
    pub on_duplicate: DuplicatePolicy,
    /// Default visible lifetime in milliseconds applied by hosts when a
    /// toast specifies none; `None` falls through to the per-type
    /// defaults.
    pub default_duration_ms: Option<i64>,
    /// Default exit-animation budget in milliseconds.
    pub default_remove_delay_ms: i64,
    /// Default for `pause_on_interaction` on newly built toasts.
    pub pause_on_interaction: bool,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            max_visible: Some(DEFAULT_MAX_VISIBLE),
            stacking: StackingOrder::default(),
            on_duplicate: DuplicatePolicy::default(),
            default_duration_ms: None,
            default_remove_delay_ms: DEFAULT_REMOVE_DELAY_MS as i64,
            pause_on_interaction: DEFAULT_PAUSE_ON_INTERACTION,
        }
    }
}

impl NotificationConfig {
    /// Rejects configurations whose raw millisecond fields are negative.
    pub fn validate(&self) -> Result<()> {
        if self.default_remove_delay_ms < 0 {
            return Err(Error::InvalidConfiguration(format!(
                "default_remove_delay_ms must not be negative (got {})",
                self.default_remove_delay_ms
            )));
        }
        if let Some(ms) = self.default_duration_ms {
            if ms < 0 {
                return Err(Error::InvalidConfiguration(format!(
                    "default_duration_ms must not be negative (got {})",
                    ms
                )));
            }
        }
        Ok(())
    }

    /// The configured default lifetime, for hosts building toasts.
    ///
    /// `None` when unset (per-type defaults apply) or when the raw value
    /// is invalid.
    #[must_use]
    pub fn default_duration(&self) -> Option<Duration> {
        let ms = u64::try_from(self.default_duration_ms?).ok()?;
        Some(Duration::from_millis(ms))
    }

    /// The configured default exit-animation budget.
    #[must_use]
    pub fn default_remove_delay(&self) -> Duration {
        u64::try_from(self.default_remove_delay_ms)
            .map(Duration::from_millis)
            .unwrap_or(Duration::from_millis(DEFAULT_REMOVE_DELAY_MS))
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<NotificationConfig> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(NotificationConfig::default())
}

pub fn save(config: &NotificationConfig) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<NotificationConfig> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content).unwrap_or_default())
}

pub fn save_to_path(config: &NotificationConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
