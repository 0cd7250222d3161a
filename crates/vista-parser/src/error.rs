//! Error and diagnostic system for the Vista parser.
//!
//! Every problem found while reading a model is reported as a
//! [`Diagnostic`]: an optional [`ErrorCode`], a message, one or more labelled
//! source spans, and optional help. All diagnostics of one run are returned
//! together inside a [`ParseError`].
//!
//! # Example
//!
//! ```
//! # use vista_parser::error::{Diagnostic, ErrorCode};
//! # use vista_parser::Span;
//!
//! let diag = Diagnostic::error("element `catalog::Product` is defined more than once")
//!     .with_code(ErrorCode::E300)
//!     .with_label(Span::new(100..107), "duplicate definition")
//!     .with_secondary_label(Span::new(40..47), "first defined here")
//!     .with_help("rename one of the elements");
//! ```

mod diagnostic;
mod error_code;
mod label;
mod parse_error;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
