//! Error types returned by the analysis and fix entry points.

use thiserror::Error;

/// Errors surfaced by [`crate::analyze`] and [`crate::fix`].
///
/// None of these is ever folded into an empty diagnostic list: a caller can
/// always tell "bad input file" from "bad configuration" from "broken check".
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The source does not parse as Python.
    #[error("invalid syntax at line {line}, column {column}: {message}")]
    Syntax {
        /// One-based line of the first syntax error.
        line: usize,
        /// One-based column (in bytes) of the first syntax error.
        column: usize,
        /// Short description, e.g. `missing ")"`.
        message: String,
    },

    /// A check alias or identifier is not registered.
    #[error("unknown check: `{name}`")]
    UnknownCheck {
        /// The alias or identifier as given by the caller.
        name: String,
    },

    /// A check failed while analysing well-formed input. This is a bug in
    /// the check, not a finding about the analysed code.
    #[error("check `{check}` failed: {message}")]
    CheckInternal {
        /// Identifier of the failing check.
        check: &'static str,
        /// The underlying failure, with its context chain.
        message: String,
    },

    /// The tree-sitter grammar could not be loaded.
    #[error("failed to initialise the Python parser: {message}")]
    ParserInit {
        /// Description of the failure.
        message: String,
    },
}

impl Error {
    /// Creates an unknown check error.
    #[must_use]
    pub fn unknown_check(name: impl Into<String>) -> Self {
        Self::UnknownCheck { name: name.into() }
    }

    /// Wraps the failure of a check.
    #[must_use]
    pub fn check_internal(check: &'static str, err: &anyhow::Error) -> Self {
        Self::CheckInternal { check, message: format!("{err:#}") }
    }

    /// Returns true if the error is about the analysed source rather than the
    /// configuration or the engine.
    #[must_use]
    pub const fn is_syntax(&self) -> bool {
        matches!(self, Self::Syntax { .. })
    }
}
