//! Graphical tree construction.
//!
//! A [`GraphicalModelBuilder`] turns a semantic source into a complete,
//! unfiltered [`GraphicalElement`] tree. Node ids and edge endpoints must use
//! the same [`ElementId`](vista_core::identifier::ElementId)s as the semantic
//! index, which is what lets the projector match them against the visible
//! set.

use log::debug;

use vista_core::{
    graphical::{Container, Edge, GraphicalElement, Node},
    semantic::{ElementKey, Model},
};

/// Kind of the container holding an element's display text.
pub const LABEL_KIND: &str = "label";
/// Kind of the container holding the nested elements of a namespace.
pub const COMPARTMENT_KIND: &str = "compartment";
/// Kind of the edges built for relations.
pub const RELATION_KIND: &str = "relation";

/// Builds the full graphical tree for a semantic source.
pub trait GraphicalModelBuilder<S: ?Sized> {
    fn build(&self, source: &S) -> GraphicalElement;
}

/// Builder for the in-memory [`Model`].
///
/// The model root becomes the root [`Node`]. Every other element becomes a
/// node whose first child is a `label` container with its display text;
/// packages and components also get a `compartment` container holding their
/// nested elements. Relations become [`Edge`]s inside the scope of their
/// semantic parent, decorated with a `label` container when labelled.
///
/// ```text
/// Node Shop (model)
/// ├── Node catalog (package)
/// │   ├── Container label "catalog"
/// │   └── Container compartment
/// │       ├── Node catalog::Product (class)
/// │       └── ...
/// └── Edge catalog::Category -> catalog::Product
///     └── Container label "contains"
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultModelBuilder;

impl GraphicalModelBuilder<Model> for DefaultModelBuilder {
    fn build(&self, model: &Model) -> GraphicalElement {
        let root = model.element(model.root());
        let kind: &'static str = root.kind().into();

        let tree: GraphicalElement = Node::new(root.id(), kind)
            .with_children(build_scope(model, root.children()))
            .into();

        debug!(elements = tree.count(); "Built graphical model");
        tree
    }
}

fn build_scope(model: &Model, children: &[ElementKey]) -> Vec<GraphicalElement> {
    children
        .iter()
        .map(|key| build_element(model, *key))
        .collect()
}

fn build_element(model: &Model, key: ElementKey) -> GraphicalElement {
    let element = model.element(key);

    if let Some((source, target)) = element.endpoints() {
        let decorations: Vec<GraphicalElement> = element
            .label()
            .map(|text| vec![Container::label(text).into()])
            .unwrap_or_default();

        return Edge::new(source, target, RELATION_KIND)
            .with_id(element.id())
            .with_children(decorations)
            .into();
    }

    let mut children: Vec<GraphicalElement> = vec![Container::label(element.display_text()).into()];
    if element.kind().is_namespace() {
        children.push(
            Container::new(COMPARTMENT_KIND)
                .with_children(build_scope(model, element.children()))
                .into(),
        );
    }

    let kind: &'static str = element.kind().into();
    Node::new(element.id(), kind).with_children(children).into()
}
