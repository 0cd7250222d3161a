//! Semantic model types.
//!
//! The semantic model is the source of truth a diagram mirrors: packages,
//! classes, relations and so on, arranged in a containment tree. The
//! visibility engine only needs a narrow view of it, expressed by the
//! [`SemanticIndex`] trait: resolve an identifier, walk to the structural
//! parent, and recover the identifier of an element.
//!
//! [`Model`] is an arena-backed, in-memory implementation used by the parser
//! and the default graphical builder.
//!
//! # Pipeline Position
//!
//! ```text
//! Source Text
//!     ↓ vista-parser
//! Semantic Model (these types)
//!     ↓ builder
//! Graphical Tree (unfiltered)
//!     ↓ projection (against the session's visibility state)
//! Submitted Model
//! ```

use std::{
    fmt::{self, Display},
    hash::Hash,
    str::FromStr,
};

use indexmap::IndexMap;
use log::trace;
use thiserror::Error;

use crate::identifier::ElementId;

/// Containment-aware lookup over a semantic model.
///
/// Implementations are expected to be cheap to query; the visibility engine
/// calls them once per requested identifier and once per ancestor.
///
/// An implementation is not trusted to describe a well-formed tree: callers
/// walking [`parent_of`](SemanticIndex::parent_of) must guard against cycles.
pub trait SemanticIndex {
    /// Opaque handle to a live element of the model.
    type Handle: Copy + Eq + Hash + fmt::Debug;

    /// Resolves an identifier to a live element, if any.
    fn lookup(&self, id: ElementId) -> Option<Self::Handle>;

    /// Returns the structural parent of `element`, or `None` for a root.
    fn parent_of(&self, element: Self::Handle) -> Option<Self::Handle>;

    /// Returns the identifier of `element`, or `None` if it has none.
    fn id_of(&self, element: Self::Handle) -> Option<ElementId>;
}

/// Errors raised while assembling a [`Model`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("element `{0}` is defined more than once")]
    DuplicateId(ElementId),

    #[error("relation endpoint `{0}` does not exist")]
    UnknownEndpoint(ElementId),

    #[error("parent {0:?} is not an element of this model")]
    UnknownParent(ElementKey),

    #[error("{kind} `{parent}` cannot contain nested elements")]
    NotANamespace { parent: ElementId, kind: ElementKind },
}

/// Kinds of semantic elements understood by the reference model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// The model root.
    Model,
    Package,
    Class,
    Interface,
    Component,
    Actor,
    Note,
    /// A directed relation between two other elements.
    Relation,
}

impl ElementKind {
    /// Returns `true` for kinds that may contain nested elements.
    pub fn is_namespace(&self) -> bool {
        matches!(
            self,
            ElementKind::Model | ElementKind::Package | ElementKind::Component
        )
    }
}

impl FromStr for ElementKind {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "package" => Ok(Self::Package),
            "class" => Ok(Self::Class),
            "interface" => Ok(Self::Interface),
            "component" => Ok(Self::Component),
            "actor" => Ok(Self::Actor),
            "note" => Ok(Self::Note),
            _ => Err("Unsupported element kind"),
        }
    }
}

impl From<ElementKind> for &'static str {
    fn from(kind: ElementKind) -> Self {
        match kind {
            ElementKind::Model => "model",
            ElementKind::Package => "package",
            ElementKind::Class => "class",
            ElementKind::Interface => "interface",
            ElementKind::Component => "component",
            ElementKind::Actor => "actor",
            ElementKind::Note => "note",
            ElementKind::Relation => "relation",
        }
    }
}

impl Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &'static str = (*self).into();
        write!(f, "{s}")
    }
}

/// Arena index of an element inside a [`Model`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementKey(usize);

/// A single element of the reference semantic model.
#[derive(Debug, Clone)]
pub struct Element {
    id: ElementId,
    kind: ElementKind,
    label: Option<String>,
    parent: Option<ElementKey>,
    children: Vec<ElementKey>,
    endpoints: Option<(ElementId, ElementId)>,
}

impl Element {
    /// Get the element identifier.
    pub fn id(&self) -> ElementId {
        self.id
    }

    /// Get the element kind.
    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    /// Get the structural parent, `None` for the model root.
    pub fn parent(&self) -> Option<ElementKey> {
        self.parent
    }

    /// Child elements in declaration order.
    pub fn children(&self) -> &[ElementKey] {
        &self.children
    }

    /// Source and target of a relation; `None` for every other kind.
    pub fn endpoints(&self) -> Option<(ElementId, ElementId)> {
        self.endpoints
    }

    /// Explicit label, if one was given.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Returns the display text for this element.
    /// Uses the label if present, otherwise the last identifier segment.
    pub fn display_text(&self) -> String {
        self.label
            .clone()
            .unwrap_or_else(|| self.id.last_segment())
    }
}

/// In-memory semantic model.
///
/// Elements live in an arena and are indexed by identifier in declaration
/// order. The root is created with the model and every other element is
/// attached to an existing parent, so the containment graph is always a tree.
///
/// # Examples
///
/// ```
/// use vista_core::{
///     identifier::ElementId,
///     semantic::{ElementKind, Model, SemanticIndex},
/// };
///
/// let mut model = Model::new(ElementId::new("Root"));
/// let package = model
///     .add_element(model.root(), ElementId::new("PackageA"), ElementKind::Package, None)
///     .unwrap();
/// let class = model
///     .add_element(package, ElementId::new("PackageA::ClassX"), ElementKind::Class, None)
///     .unwrap();
///
/// assert_eq!(model.lookup(ElementId::new("PackageA::ClassX")), Some(class));
/// assert_eq!(model.parent_of(class), Some(package));
/// ```
#[derive(Debug, Clone)]
pub struct Model {
    elements: Vec<Element>,
    by_id: IndexMap<ElementId, ElementKey>,
}

impl Model {
    /// Create a model whose root element carries `root_id`.
    pub fn new(root_id: ElementId) -> Self {
        let root = Element {
            id: root_id,
            kind: ElementKind::Model,
            label: None,
            parent: None,
            children: Vec::new(),
            endpoints: None,
        };
        let mut by_id = IndexMap::new();
        by_id.insert(root_id, ElementKey(0));

        Self {
            elements: vec![root],
            by_id,
        }
    }

    /// Key of the model root.
    pub fn root(&self) -> ElementKey {
        ElementKey(0)
    }

    /// Borrow the element behind `key`.
    ///
    /// # Panics
    /// Panics if `key` was not produced by this model.
    pub fn element(&self, key: ElementKey) -> &Element {
        &self.elements[key.0]
    }

    /// Borrow the element with the given identifier, if any.
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.by_id.get(&id).map(|key| self.element(*key))
    }

    /// Number of elements, including the root.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// A model always contains its root, so it is never empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterate over all elements in declaration order.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.by_id.values().map(|key| self.element(*key))
    }

    /// Attach a new element under `parent`.
    ///
    /// # Errors
    /// Returns [`ModelError::UnknownParent`] if `parent` is out of range for
    /// this model, [`ModelError::NotANamespace`] if it cannot hold children,
    /// or [`ModelError::DuplicateId`] if `id` is already taken.
    pub fn add_element(
        &mut self,
        parent: ElementKey,
        id: ElementId,
        kind: ElementKind,
        label: Option<String>,
    ) -> Result<ElementKey, ModelError> {
        self.insert(Element {
            id,
            kind,
            label,
            parent: Some(parent),
            children: Vec::new(),
            endpoints: None,
        })
    }

    /// Attach a relation from `source` to `target` under `parent`.
    ///
    /// # Errors
    /// Returns [`ModelError::UnknownEndpoint`] if either endpoint is not part
    /// of the model yet, and otherwise the same errors as
    /// [`add_element`](Model::add_element).
    pub fn add_relation(
        &mut self,
        parent: ElementKey,
        id: ElementId,
        source: ElementId,
        target: ElementId,
        label: Option<String>,
    ) -> Result<ElementKey, ModelError> {
        for endpoint in [source, target] {
            if !self.by_id.contains_key(&endpoint) {
                return Err(ModelError::UnknownEndpoint(endpoint));
            }
        }

        self.insert(Element {
            id,
            kind: ElementKind::Relation,
            label,
            parent: Some(parent),
            children: Vec::new(),
            endpoints: Some((source, target)),
        })
    }

    fn insert(&mut self, element: Element) -> Result<ElementKey, ModelError> {
        if let Some(parent) = element.parent {
            let Some(container) = self.elements.get(parent.0) else {
                return Err(ModelError::UnknownParent(parent));
            };
            if !container.kind.is_namespace() {
                return Err(ModelError::NotANamespace {
                    parent: container.id,
                    kind: container.kind,
                });
            }
        }
        if self.by_id.contains_key(&element.id) {
            return Err(ModelError::DuplicateId(element.id));
        }

        let key = ElementKey(self.elements.len());
        trace!(id:% = element.id, kind:% = element.kind; "Adding element");

        self.by_id.insert(element.id, key);
        if let Some(parent) = element.parent {
            self.elements[parent.0].children.push(key);
        }
        self.elements.push(element);

        Ok(key)
    }
}

impl SemanticIndex for Model {
    type Handle = ElementKey;

    fn lookup(&self, id: ElementId) -> Option<ElementKey> {
        self.by_id.get(&id).copied()
    }

    fn parent_of(&self, element: ElementKey) -> Option<ElementKey> {
        self.elements.get(element.0).and_then(|element| element.parent)
    }

    fn id_of(&self, element: ElementKey) -> Option<ElementId> {
        self.elements.get(element.0).map(|element| element.id)
    }
}
