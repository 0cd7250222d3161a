//! Error codes for the Vista diagnostic system.
//!
//! Error codes are organized by phase:
//! - `E1xx` - Syntax errors
//! - `E3xx` - Model elaboration errors

use std::fmt;

/// Error codes for categorizing diagnostic errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Syntax Errors (E1xx)
    // =========================================================================
    /// Unexpected input.
    ///
    /// The parser encountered text it did not expect at this position.
    E100,

    /// Unknown element kind.
    ///
    /// A declaration used a keyword that is not an element kind.
    E101,

    // =========================================================================
    // Elaboration Errors (E3xx)
    // =========================================================================
    /// Duplicate element.
    ///
    /// Two elements resolve to the same qualified identifier.
    E300,

    /// Unresolved relation endpoint.
    ///
    /// A relation refers to an element that is not defined anywhere.
    E301,

    /// Element cannot contain nested elements.
    ///
    /// Only `package` and `component` elements may have a body.
    E302,

    /// Reserved identifier.
    ///
    /// Names starting with `__` are reserved for anonymous elements.
    E303,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E100").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E300 => "E300",
            ErrorCode::E301 => "E301",
            ErrorCode::E302 => "E302",
            ErrorCode::E303 => "E303",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "unexpected input",
            ErrorCode::E101 => "unknown element kind",
            ErrorCode::E300 => "duplicate element",
            ErrorCode::E301 => "unresolved relation endpoint",
            ErrorCode::E302 => "element cannot contain nested elements",
            ErrorCode::E303 => "reserved identifier",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
