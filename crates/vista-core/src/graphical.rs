//! Graphical model tree.
//!
//! The graphical model is what a rendering client displays. It mirrors the
//! semantic model, one semantic element mapping to one or more graphical
//! elements. Three kinds of element exist:
//!
//! - [`Node`]: carries the [`ElementId`] of the semantic element it shows
//!   and may contain children.
//! - [`Edge`]: connects a source and a target element; its children are
//!   decorations (labels) that never take part in visibility decisions.
//! - [`Container`]: a structural group (label, compartment) with no
//!   identifier of its own.
//!
//! Trees are rebuilt on every model submission and never shared between
//! submissions.

use serde::Serialize;

use crate::identifier::ElementId;

/// A single element of the graphical tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GraphicalElement {
    Node(Node),
    Edge(Edge),
    Container(Container),
}

impl GraphicalElement {
    /// Borrow the children of this element.
    pub fn children(&self) -> &[GraphicalElement] {
        match self {
            GraphicalElement::Node(node) => &node.children,
            GraphicalElement::Edge(edge) => &edge.children,
            GraphicalElement::Container(container) => &container.children,
        }
    }

    /// Mutably borrow the children of this element.
    pub fn children_mut(&mut self) -> &mut Vec<GraphicalElement> {
        match self {
            GraphicalElement::Node(node) => &mut node.children,
            GraphicalElement::Edge(edge) => &mut edge.children,
            GraphicalElement::Container(container) => &mut container.children,
        }
    }

    /// Identifier of the semantic element shown, if this element has one.
    pub fn id(&self) -> Option<ElementId> {
        match self {
            GraphicalElement::Node(node) => Some(node.id),
            GraphicalElement::Edge(edge) => edge.id,
            GraphicalElement::Container(_) => None,
        }
    }

    /// Kind label of this element (`class`, `compartment`, ...).
    pub fn kind(&self) -> &str {
        match self {
            GraphicalElement::Node(node) => &node.kind,
            GraphicalElement::Edge(edge) => &edge.kind,
            GraphicalElement::Container(container) => &container.kind,
        }
    }

    /// Total number of elements in this subtree, including `self`.
    pub fn count(&self) -> usize {
        1 + self
            .children()
            .iter()
            .map(GraphicalElement::count)
            .sum::<usize>()
    }

    /// Visit this subtree in pre-order.
    pub fn walk(&self) -> impl Iterator<Item = &GraphicalElement> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let current = stack.pop()?;
            stack.extend(current.children().iter().rev());
            Some(current)
        })
    }

    /// Find the node showing `id` in this subtree.
    pub fn find_node(&self, id: ElementId) -> Option<&Node> {
        self.walk().find_map(|element| match element {
            GraphicalElement::Node(node) if node.id == id => Some(node),
            _ => None,
        })
    }
}

impl From<Node> for GraphicalElement {
    fn from(node: Node) -> Self {
        GraphicalElement::Node(node)
    }
}

impl From<Edge> for GraphicalElement {
    fn from(edge: Edge) -> Self {
        GraphicalElement::Edge(edge)
    }
}

impl From<Container> for GraphicalElement {
    fn from(container: Container) -> Self {
        GraphicalElement::Container(container)
    }
}

/// A graphical node showing one semantic element.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    id: ElementId,
    kind: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<GraphicalElement>,
}

impl Node {
    /// Create a childless node.
    pub fn new(id: ElementId, kind: impl Into<String>) -> Self {
        Self {
            id,
            kind: kind.into(),
            children: Vec::new(),
        }
    }

    /// Replace the children of this node.
    pub fn with_children(mut self, children: Vec<GraphicalElement>) -> Self {
        self.children = children;
        self
    }

    /// Get the identifier of the semantic element shown.
    pub fn id(&self) -> ElementId {
        self.id
    }

    /// Get the kind label.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Borrow the children.
    pub fn children(&self) -> &[GraphicalElement] {
        &self.children
    }
}

/// A graphical edge between two elements.
///
/// `source` and `target` use the same identifier scheme as nodes. An edge
/// may also show a semantic element of its own (the relation), recorded in
/// `id`; visibility of an edge is decided by its endpoints only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Edge {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<ElementId>,
    kind: String,
    source: ElementId,
    target: ElementId,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<GraphicalElement>,
}

impl Edge {
    /// Create an undecorated edge from `source` to `target`.
    pub fn new(source: ElementId, target: ElementId, kind: impl Into<String>) -> Self {
        Self {
            id: None,
            kind: kind.into(),
            source,
            target,
            children: Vec::new(),
        }
    }

    /// Set the identifier of the semantic element this edge shows.
    pub fn with_id(mut self, id: ElementId) -> Self {
        self.id = Some(id);
        self
    }

    /// Replace the decoration children of this edge.
    pub fn with_children(mut self, children: Vec<GraphicalElement>) -> Self {
        self.children = children;
        self
    }

    /// Get the source identifier.
    pub fn source(&self) -> ElementId {
        self.source
    }

    /// Get the target identifier.
    pub fn target(&self) -> ElementId {
        self.target
    }

    /// Get the identifier of the shown semantic element, if any.
    pub fn id(&self) -> Option<ElementId> {
        self.id
    }

    /// Get the kind label.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Borrow the decoration children.
    pub fn children(&self) -> &[GraphicalElement] {
        &self.children
    }
}

/// A structural group without an identifier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Container {
    kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<GraphicalElement>,
}

impl Container {
    /// Create an empty container.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            text: None,
            children: Vec::new(),
        }
    }

    /// Create a label container showing `text`.
    pub fn label(text: impl Into<String>) -> Self {
        Self {
            kind: "label".to_string(),
            text: Some(text.into()),
            children: Vec::new(),
        }
    }

    /// Replace the children of this container.
    pub fn with_children(mut self, children: Vec<GraphicalElement>) -> Self {
        self.children = children;
        self
    }

    /// Get the kind label.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Get the text, if any.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Borrow the children.
    pub fn children(&self) -> &[GraphicalElement] {
        &self.children
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> GraphicalElement {
        Node::new(ElementId::new("Root"), "model")
            .with_children(vec![
                Node::new(ElementId::new("PackageA"), "package")
                    .with_children(vec![
                        Container::label("PackageA").into(),
                        Node::new(ElementId::new("PackageA::ClassX"), "class").into(),
                    ])
                    .into(),
                Edge::new(
                    ElementId::new("PackageA::ClassX"),
                    ElementId::new("PackageA"),
                    "relation",
                )
                .into(),
            ])
            .into()
    }

    #[test]
    fn test_count() {
        assert_eq!(sample_tree().count(), 5);
    }

    #[test]
    fn test_walk_is_pre_order() {
        let tree = sample_tree();
        let kinds: Vec<&str> = tree.walk().map(GraphicalElement::kind).collect();

        assert_eq!(
            kinds,
            vec!["model", "package", "label", "class", "relation"]
        );
    }

    #[test]
    fn test_find_node() {
        let tree = sample_tree();

        let node = tree.find_node(ElementId::new("PackageA::ClassX")).unwrap();
        assert_eq!(node.kind(), "class");
        assert!(tree.find_node(ElementId::new("missing")).is_none());
    }

    #[test]
    fn test_id_by_kind() {
        let edge: GraphicalElement =
            Edge::new(ElementId::new("a"), ElementId::new("b"), "relation")
                .with_id(ElementId::new("__0"))
                .into();
        let container: GraphicalElement = Container::new("compartment").into();

        assert_eq!(edge.id(), Some(ElementId::new("__0")));
        assert_eq!(container.id(), None);
    }

    #[test]
    fn test_children_mut() {
        let mut tree = sample_tree();
        tree.children_mut().truncate(1);

        assert_eq!(tree.children().len(), 1);
        assert_eq!(tree.count(), 4);
    }
}
