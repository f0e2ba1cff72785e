//! Error types for the crate boundary.
//!
//! The simulation tick itself has no failure modes. Errors only arise when
//! loading configuration or talking to storage, and callers are expected to
//! degrade gracefully (log and fall back) rather than abort the game.

use std::fmt;

/// Failure reading or writing persisted values (high score, settings).
#[derive(Debug)]
pub enum PersistError {
    /// No storage backend is available (e.g. LocalStorage disabled).
    Unavailable,
    /// Filesystem error on native builds.
    Io(std::io::Error),
    /// Stored value exists but could not be decoded.
    Parse {
        /// What was being decoded, for logging.
        what: &'static str,
        detail: String,
    },
    /// Backend rejected the write (quota exceeded, private mode, ...).
    Rejected(String),
}

impl fmt::Display for PersistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => write!(f, "storage unavailable"),
            Self::Io(err) => write!(f, "storage i/o error: {err}"),
            Self::Parse { what, detail } => write!(f, "could not parse stored {what}: {detail}"),
            Self::Rejected(reason) => write!(f, "storage rejected write: {reason}"),
        }
    }
}

impl std::error::Error for PersistError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PersistError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

/// Rejected gameplay tuning.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Tuning JSON failed to deserialize.
    Parse(String),
    /// A value is outside its usable range.
    OutOfRange {
        /// Name of the field (for logging).
        name: &'static str,
        /// The value that was rejected.
        value: f32,
        /// Human-readable description of the usable range.
        expected: &'static str,
    },
    /// The spawn exclusion zone around the ship covers the whole field, so a
    /// belt could never be placed.
    NoSpawnRoom { exclusion: f32, width: f32, height: f32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(detail) => write!(f, "invalid tuning: {detail}"),
            Self::OutOfRange { name, value, expected } => {
                write!(f, "tuning value {name} = {value} out of range (expected {expected})")
            }
            Self::NoSpawnRoom { exclusion, width, height } => write!(
                f,
                "spawn exclusion radius {exclusion} leaves no room in a {width}x{height} field"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
