//! Export of submitted models.
//!
//! This module provides the [`Exporter`] trait that turns a [`Submission`]
//! into text. It is the last stage of the pipeline:
//!
//! ```text
//! Source Text
//!     ↓ parse
//! Semantic Model
//!     ↓ build
//! Graphical Tree
//!     ↓ project
//! Submission
//!     ↓ export (this module)
//! Output Text
//! ```
//!
//! # Available Backends
//!
//! - [`OutlineExporter`] - indented, human readable outline
//! - [`TomlExporter`] - the full tree as TOML tables

use std::{fmt::Write as _, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use vista_core::graphical::GraphicalElement;

use crate::{projection::ProjectionStats, session::Submission};

/// Errors that can occur while exporting.
///
/// Converted into [`VistaError::Export`](crate::VistaError::Export) at the
/// crate boundary.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Render error: {0}")]
    Render(String),
}

/// Abstraction for export backends.
pub trait Exporter {
    /// Render `submission` in the backend's format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the submission cannot be represented.
    fn export(&self, submission: &Submission) -> Result<String, Error>;
}

/// Output format selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Outline,
    Toml,
}

impl OutputFormat {
    /// The exporter for this format.
    pub fn exporter(self) -> Box<dyn Exporter> {
        match self {
            Self::Outline => Box::new(OutlineExporter),
            Self::Toml => Box::new(TomlExporter),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "outline" => Ok(Self::Outline),
            "toml" => Ok(Self::Toml),
            other => Err(format!(
                "unknown output format `{other}`, expected `outline` or `toml`"
            )),
        }
    }
}

/// Indented outline, one element per line.
///
/// ```text
/// Shop [model]
///   catalog [package]
///     label "catalog"
///     compartment
///       catalog::Product [class]
///         label "Product"
///   __0 [relation] catalog::Category -> catalog::Product
///     label "contains"
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct OutlineExporter;

impl Exporter for OutlineExporter {
    fn export(&self, submission: &Submission) -> Result<String, Error> {
        let mut out = String::new();
        match &submission.model {
            Some(root) => write_outline(&mut out, root, 0)
                .map_err(|err| Error::Render(err.to_string()))?,
            None => out.push_str("(empty)\n"),
        }
        Ok(out)
    }
}

fn write_outline(out: &mut String, element: &GraphicalElement, depth: usize) -> std::fmt::Result {
    let indent = "  ".repeat(depth);
    match element {
        GraphicalElement::Node(node) => {
            writeln!(out, "{indent}{} [{}]", node.id(), node.kind())?;
        }
        GraphicalElement::Edge(edge) => {
            write!(out, "{indent}")?;
            if let Some(id) = edge.id() {
                write!(out, "{id} ")?;
            }
            writeln!(out, "[{}] {} -> {}", edge.kind(), edge.source(), edge.target())?;
        }
        GraphicalElement::Container(container) => match container.text() {
            Some(text) => writeln!(out, "{indent}{} {text:?}", container.kind())?,
            None => writeln!(out, "{indent}{}", container.kind())?,
        },
    }

    for child in element.children() {
        write_outline(out, child, depth + 1)?;
    }
    Ok(())
}

/// The projection statistics and the full tree as TOML.
#[derive(Debug, Clone, Copy, Default)]
pub struct TomlExporter;

#[derive(Serialize)]
struct TomlDocument<'a> {
    stats: TomlStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    root: Option<&'a GraphicalElement>,
}

#[derive(Serialize)]
struct TomlStats {
    nodes_dropped: usize,
    edges_dropped: usize,
    elements_kept: usize,
}

impl From<ProjectionStats> for TomlStats {
    fn from(stats: ProjectionStats) -> Self {
        Self {
            nodes_dropped: stats.nodes_dropped,
            edges_dropped: stats.edges_dropped,
            elements_kept: stats.elements_kept,
        }
    }
}

impl Exporter for TomlExporter {
    fn export(&self, submission: &Submission) -> Result<String, Error> {
        let document = TomlDocument {
            stats: submission.stats.into(),
            root: submission.model.as_ref(),
        };
        toml::to_string(&document).map_err(|err| Error::Render(err.to_string()))
    }
}
