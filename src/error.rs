//! Error types for pitch parsing, table building and session commands.

use thiserror::Error;

/// Result type used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building tables or running session commands.
///
/// None of these end an interactive session: the session reports them on the
/// status line and carries on with its previous state.
#[derive(Debug, Error)]
pub enum Error {
    /// A token that is not a pitch name.
    #[error("invalid pitch name: {0}")]
    InvalidPitchName(String),

    /// A tuning with the wrong number of open strings.
    #[error("a tuning needs 7 pitches, found {found}")]
    StringCount {
        /// Number of pitches supplied.
        found: usize,
    },

    /// An interval name with no semitone mapping.
    #[error("unknown interval: {0}")]
    UnknownInterval(String),

    /// A command line whose verb is not recognised.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// A recognised command missing its argument.
    #[error("usage: {usage}")]
    MissingArgument {
        /// Usage line for the command.
        usage: &'static str,
    },

    /// A preset name absent from the preset book.
    #[error("unknown preset: {0}")]
    UnknownPreset(String),

    /// A search confirmed without a pattern.
    #[error("empty search pattern")]
    EmptySearchPattern,

    /// Preset file that is not valid TOML for the preset schema.
    #[error("invalid preset file: {0}")]
    PresetFormat(#[from] toml::de::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
