//! Visibility-filtered projection of graphical trees.
//!
//! [`ModelProjector`] removes what the current [`VisibilityState`] hides
//! from a freshly built graphical tree in one top-down pass:
//!
//! - A hidden [`Node`](GraphicalElement::Node) is dropped together with its
//!   whole subtree. Descendants are not inspected.
//! - An [`Edge`](GraphicalElement::Edge) is kept only when both endpoints are
//!   visible. A kept edge's decorations are filtered like any children.
//! - A [`Container`](GraphicalElement::Container) has no identity and is
//!   always kept; its children are filtered.
//!
//! Surviving siblings keep their original order.

use log::{debug, trace};
use serde::Deserialize;

use vista_core::graphical::GraphicalElement;

use crate::visibility::VisibilityState;

/// How the root of a projected tree is treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RootPolicy {
    /// The root is always kept; only its descendants are filtered.
    #[default]
    Exempt,
    /// The root is filtered like any other element and may vanish.
    Checked,
}

/// What a projection removed and kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProjectionStats {
    /// Hidden nodes removed, each taking its subtree along.
    pub nodes_dropped: usize,
    /// Edges removed because an endpoint was hidden.
    pub edges_dropped: usize,
    /// Elements left in the projected tree.
    pub elements_kept: usize,
}

/// Filters graphical trees against a [`VisibilityState`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ModelProjector {
    root_policy: RootPolicy,
}

impl ModelProjector {
    pub fn new(root_policy: RootPolicy) -> Self {
        Self { root_policy }
    }

    pub fn root_policy(&self) -> RootPolicy {
        self.root_policy
    }

    /// Project a whole tree.
    ///
    /// Returns `None` only under [`RootPolicy::Checked`] when the root itself
    /// is hidden.
    ///
    /// # Examples
    ///
    /// ```
    /// use vista::{projection::ModelProjector, visibility::VisibilityState};
    /// use vista_core::{graphical::Node, identifier::ElementId};
    ///
    /// let tree = Node::new(ElementId::new("Root"), "model")
    ///     .with_children(vec![Node::new(ElementId::new("A"), "class").into()])
    ///     .into();
    ///
    /// let projected = ModelProjector::default().project(tree, &VisibilityState::Unset);
    /// assert_eq!(projected.map(|root| root.count()), Some(2));
    /// ```
    pub fn project(
        &self,
        tree: GraphicalElement,
        state: &VisibilityState,
    ) -> Option<GraphicalElement> {
        self.project_with_stats(tree, state).0
    }

    /// Project a whole tree and report what was removed.
    pub fn project_with_stats(
        &self,
        mut tree: GraphicalElement,
        state: &VisibilityState,
    ) -> (Option<GraphicalElement>, ProjectionStats) {
        let mut stats = ProjectionStats::default();

        let projected = match self.root_policy {
            RootPolicy::Exempt => {
                let children = std::mem::take(tree.children_mut());
                *tree.children_mut() = filter_siblings(children, state, &mut stats);
                stats.elements_kept += 1;
                Some(tree)
            }
            RootPolicy::Checked => filter_element(tree, state, &mut stats),
        };

        debug!(
            root_policy:? = self.root_policy,
            nodes_dropped = stats.nodes_dropped,
            edges_dropped = stats.edges_dropped,
            elements_kept = stats.elements_kept;
            "Projected graphical model",
        );
        trace!(projected:?; "Projected tree");

        (projected, stats)
    }

    /// Filter a sibling sequence.
    pub fn project_children(
        &self,
        children: Vec<GraphicalElement>,
        state: &VisibilityState,
    ) -> Vec<GraphicalElement> {
        filter_siblings(children, state, &mut ProjectionStats::default())
    }
}

fn filter_siblings(
    siblings: Vec<GraphicalElement>,
    state: &VisibilityState,
    stats: &mut ProjectionStats,
) -> Vec<GraphicalElement> {
    siblings
        .into_iter()
        .filter_map(|element| filter_element(element, state, stats))
        .collect()
}

fn filter_element(
    mut element: GraphicalElement,
    state: &VisibilityState,
    stats: &mut ProjectionStats,
) -> Option<GraphicalElement> {
    match &element {
        GraphicalElement::Node(node) if !state.is_visible(node.id()) => {
            trace!(id:% = node.id(); "Dropping hidden node");
            stats.nodes_dropped += 1;
            return None;
        }
        GraphicalElement::Edge(edge)
            if !(state.is_visible(edge.source()) && state.is_visible(edge.target())) =>
        {
            trace!(source:% = edge.source(), target:% = edge.target(); "Dropping edge");
            stats.edges_dropped += 1;
            return None;
        }
        GraphicalElement::Node(_) | GraphicalElement::Edge(_) | GraphicalElement::Container(_) => {}
    }

    let children = std::mem::take(element.children_mut());
    *element.children_mut() = filter_siblings(children, state, stats);
    stats.elements_kept += 1;

    Some(element)
}
