//! Error types for the countdown timer.

use std::path::PathBuf;
use thiserror::Error;

/// Which entry field a value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// The minutes field.
    Minutes,
    /// The seconds field.
    Seconds,
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldKind::Minutes => f.write_str("minutes"),
            FieldKind::Seconds => f.write_str("seconds"),
        }
    }
}

/// Rejected minutes/seconds input.
///
/// Both variants are the same user-facing kind, "invalid input"; they only
/// differ in the message shown.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidInput {
    /// A field held something other than a non-negative integer.
    #[error("Please enter numbers only! ({field}: {value:?})")]
    NotNumeric { field: FieldKind, value: String },

    /// Both fields parsed but the total was zero.
    #[error("Enter a positive time!")]
    NotPositive,
}

/// Crate-level errors.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    InvalidInput(#[from] InvalidInput),

    #[error("failed to load configuration")]
    ConfigLoad(#[source] confy::ConfyError),

    #[error("failed to save configuration")]
    ConfigStore(#[source] confy::ConfyError),

    #[error("failed to open log file {}", .path.display())]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to run alert command {program:?}")]
    AlertCommand {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("alert command is empty")]
    EmptyAlertCommand,

    #[error("failed to ring terminal bell")]
    Bell(#[source] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
