//! Vista - visibility-filtered views of semantic models.
//!
//! A client asks to see a subset of a model's elements. Vista closes that
//! request over containment, builds the full graphical tree for the model,
//! and projects it so only visible nodes and edges between visible
//! endpoints remain.

pub mod ancestry;
pub mod builder;
pub mod config;
pub mod export;
pub mod projection;
pub mod session;
pub mod visibility;

mod error;

pub use vista_core::{graphical, identifier, semantic};

pub use error::VistaError;

use log::{debug, info, trace};

use builder::DefaultModelBuilder;
use config::AppConfig;
use export::OutputFormat;
use projection::ModelProjector;
use semantic::Model;
use session::{Action, Session, Submission};

/// Facade over parsing, projection, and export.
///
/// # Examples
///
/// ```
/// use vista::{ViewBuilder, export::OutputFormat, session::Action};
///
/// let source = r#"
///     model Shop;
///     package catalog { class Product; class Category; }
///     catalog::Category -> catalog::Product;
/// "#;
///
/// let builder = ViewBuilder::default();
/// let model = builder.parse(source).expect("Failed to parse");
///
/// let mut session = builder.session();
/// let submission = builder.apply(
///     &mut session,
///     &model,
///     &Action::set_visible_elements(["catalog::Product"]),
/// );
///
/// let outline = builder
///     .render(&submission, OutputFormat::Outline)
///     .expect("Failed to render");
/// assert!(outline.contains("catalog::Product"));
/// assert!(!outline.contains("catalog::Category"));
/// ```
#[derive(Debug, Default)]
pub struct ViewBuilder {
    config: AppConfig,
}

impl ViewBuilder {
    /// Create a new view builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse source code into a semantic model.
    ///
    /// # Errors
    ///
    /// Returns [`VistaError::Parse`] with every diagnostic found.
    pub fn parse(&self, source: &str) -> Result<Model, VistaError> {
        info!("Parsing model");

        let model = vista_parser::parse(source)
            .map_err(|err| VistaError::new_parse_error(err, source))?;

        debug!(elements = model.len(); "Model parsed successfully");
        trace!(model:?; "Parsed model");

        Ok(model)
    }

    /// Start a session projecting with the configured root policy.
    pub fn session(&self) -> Session {
        Session::new(ModelProjector::new(self.config.projection().root()))
    }

    /// Submit `model` through `session` without changing its state.
    pub fn submit(&self, session: &Session, model: &Model) -> Submission {
        session.submit_model(model, &DefaultModelBuilder)
    }

    /// Handle `action` in `session` and resubmit `model`.
    pub fn apply(&self, session: &mut Session, model: &Model, action: &Action) -> Submission {
        session.handle(action, model, &DefaultModelBuilder)
    }

    /// Render a submission as text.
    ///
    /// # Errors
    ///
    /// Returns [`VistaError::Export`] if the exporter fails.
    pub fn render(
        &self,
        submission: &Submission,
        format: OutputFormat,
    ) -> Result<String, VistaError> {
        info!(format:?; "Rendering submission");
        let output = format.exporter().export(submission)?;
        debug!(bytes = output.len(); "Submission rendered");
        Ok(output)
    }
}
