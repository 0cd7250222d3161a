//! Error types for Vista operations.
//!
//! This module provides the main error type [`VistaError`] which wraps
//! the error conditions that can occur between reading a model and writing
//! its projection.

use std::io;

use thiserror::Error;

use vista_parser::error::ParseError;

/// The main error type for Vista operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant keeps the source text next to the diagnostics so
/// they can be rendered with code snippets.
#[derive(Debug, Error)]
pub enum VistaError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid request: {0}")]
    Request(String),

    #[error("Export error: {0}")]
    Export(String),
}

impl From<crate::export::Error> for VistaError {
    fn from(err: crate::export::Error) -> Self {
        Self::Export(err.to_string())
    }
}

impl VistaError {
    /// Create a new `Parse` error with the associated source code.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
