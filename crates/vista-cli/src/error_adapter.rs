//! Bridge from [`VistaError`] to miette reports.
//!
//! A parse failure may carry several diagnostics; each one becomes its own
//! [`Reportable`] so it is rendered with its own source snippet. Every other
//! error becomes a single report without source code.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceCode, SourceSpan};

use vista::VistaError;
use vista_parser::{Span, error::Diagnostic};

/// One renderable error.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A parser diagnostic together with the source it points into.
    Diagnostic { diag: &'a Diagnostic, src: &'a str },
    /// Any other error, reported by message and code only.
    Error(&'a VistaError),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Diagnostic { diag, .. } => f.write_str(diag.message()),
            Self::Error(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Diagnostic { .. } => None,
            Self::Error(VistaError::Io(err)) => Some(err),
            Self::Error(_) => None,
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code: Box<dyn fmt::Display + 'a> = match self {
            Self::Diagnostic { diag, .. } => Box::new(diag.code()?),
            Self::Error(VistaError::Io(_)) => Box::new("vista::io"),
            Self::Error(VistaError::Parse { .. }) => return None,
            Self::Error(VistaError::Config(_)) => Box::new("vista::config"),
            Self::Error(VistaError::Request(_)) => Box::new("vista::request"),
            Self::Error(VistaError::Export(_)) => Box::new("vista::export"),
        };
        Some(code)
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help: &'a str = match self {
            Self::Diagnostic { diag, .. } => diag.help()?,
            Self::Error(VistaError::Request(_)) => {
                r#"a request file looks like: kind = "setVisibleElements", visibleElementIds = ["a::b"]"#
            }
            Self::Error(VistaError::Config(_)) => {
                "valid settings are [projection] root and [output] format"
            }
            Self::Error(_) => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        match self {
            Self::Diagnostic { src, .. } => Some(src as &dyn SourceCode),
            Self::Error(_) => None,
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let Self::Diagnostic { diag, .. } = self else {
            return None;
        };
        if diag.labels().is_empty() {
            return None;
        }

        Some(Box::new(diag.labels().iter().map(|label| {
            let message = Some(label.message().to_string());
            let span = to_source_span(label.span());
            if label.is_primary() {
                LabeledSpan::new_primary_with_span(message, span)
            } else {
                LabeledSpan::new_with_span(message, span)
            }
        })))
    }
}

fn to_source_span(span: Span) -> SourceSpan {
    SourceSpan::new(span.start().into(), span.len())
}

/// Split an error into independently rendered reports.
pub fn to_reportables(err: &VistaError) -> Vec<Reportable<'_>> {
    match err {
        VistaError::Parse { err, src } => err
            .diagnostics()
            .iter()
            .map(|diag| Reportable::Diagnostic { diag, src })
            .collect(),
        _ => vec![Reportable::Error(err)],
    }
}
