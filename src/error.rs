// SPDX-License-Identifier: MPL-2.0
use crate::toast::ToastId;
use std::fmt;

/// Errors surfaced by the notification library.
///
/// Every variant is recoverable: a host application should be able to log
/// the error and carry on. Machine-level "ignored event" outcomes are not
/// errors at all and never appear here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// An operation referenced a toast id that is not registered.
    ///
    /// Callers may treat this as "already dismissed".
    NotFound(ToastId),
    /// `add` collided with an existing id under the `Reject` policy.
    DuplicateId(ToastId),
    /// A toast or manager configuration value is invalid
    /// (e.g. a negative duration in a config file, an empty id).
    InvalidConfiguration(String),
    /// Configuration file could not be parsed or serialized.
    Config(String),
    /// I/O failure while reading or writing the configuration file.
    Io(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NotFound(id) => write!(f, "No toast registered with id `{}`", id),
            Error::DuplicateId(id) => write!(f, "A toast with id `{}` already exists", id),
            Error::InvalidConfiguration(msg) => write!(f, "Invalid configuration: {}", msg),
            Error::Config(msg) => write!(f, "Config Error: {}", msg),
            Error::Io(msg) => write!(f, "I/O Error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
