//! Per-client session: visibility requests and model submission.
//!
//! A [`Session`] owns the [`VisibilityState`] of one client. Every
//! submission rebuilds the graphical tree from the semantic source and
//! projects it through the current state; nothing graphical is kept
//! between submissions.

use log::{debug, info};
use serde::Deserialize;

use vista_core::{graphical::GraphicalElement, identifier::ElementId, semantic::SemanticIndex};

use crate::{
    builder::GraphicalModelBuilder,
    error::VistaError,
    projection::{ModelProjector, ProjectionStats},
    visibility::{ConfigureSummary, VisibilityState},
};

/// A client request.
///
/// Deserializes from `{ kind = "setVisibleElements", visibleElementIds = [...] }`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Action {
    /// Show only the listed elements and their ancestors.
    #[serde(rename_all = "camelCase")]
    SetVisibleElements { visible_element_ids: Vec<String> },
}

impl Action {
    pub fn set_visible_elements<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::SetVisibleElements {
            visible_element_ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Read an action from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`VistaError::Request`] when the text is not a known action.
    pub fn from_toml(text: &str) -> Result<Self, VistaError> {
        toml::from_str(text).map_err(|err| VistaError::Request(err.to_string()))
    }
}

/// A projected model ready to be sent to the client.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    /// `None` when the projection removed the root.
    pub model: Option<GraphicalElement>,
    pub stats: ProjectionStats,
}

/// Visibility state and projection settings of one client.
#[derive(Debug, Clone, Default)]
pub struct Session {
    state: VisibilityState,
    projector: ModelProjector,
}

impl Session {
    pub fn new(projector: ModelProjector) -> Self {
        Self {
            state: VisibilityState::Unset,
            projector,
        }
    }

    pub fn state(&self) -> &VisibilityState {
        &self.state
    }

    pub fn projector(&self) -> &ModelProjector {
        &self.projector
    }

    /// Start serving a new model. Any previous visibility request is
    /// forgotten.
    pub fn open_model(&mut self) {
        info!("Opening model");
        self.state.reset();
    }

    /// Apply `action` and resubmit the whole model.
    pub fn handle<I, B>(&mut self, action: &Action, index: &I, builder: &B) -> Submission
    where
        I: SemanticIndex + ?Sized,
        B: GraphicalModelBuilder<I> + ?Sized,
    {
        match action {
            Action::SetVisibleElements {
                visible_element_ids,
            } => {
                debug!(ids:? = visible_element_ids; "Handling setVisibleElements");
                self.set_visible_elements(
                    visible_element_ids.iter().map(|id| ElementId::new(id)),
                    index,
                );
            }
        }

        self.submit_model(index, builder)
    }

    /// Replace the visibility state without submitting.
    pub fn set_visible_elements<I, R>(&mut self, requested: R, index: &I) -> ConfigureSummary
    where
        I: SemanticIndex + ?Sized,
        R: IntoIterator<Item = ElementId>,
    {
        self.state.configure(requested, index)
    }

    /// Build the full graphical tree for `source` and project it through
    /// the current state.
    pub fn submit_model<S, B>(&self, source: &S, builder: &B) -> Submission
    where
        S: ?Sized,
        B: GraphicalModelBuilder<S> + ?Sized,
    {
        let tree = builder.build(source);
        let (model, stats) = self.projector.project_with_stats(tree, &self.state);

        info!(
            configured = self.state.is_configured(),
            elements = stats.elements_kept;
            "Submitting model",
        );
        Submission { model, stats }
    }
}
