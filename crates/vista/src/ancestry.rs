//! Containment ancestry over a [`SemanticIndex`].
//!
//! The index is a collaborator and is not trusted to describe a tree. Every
//! walk remembers the elements it has visited and stops as soon as a parent
//! repeats, so self-parenting or cyclic containment cannot loop forever.

use std::{collections::HashSet, iter::FusedIterator};

use log::warn;

use vista_core::semantic::SemanticIndex;

/// Lazy walk from an element's immediate parent up to the structural root.
///
/// The starting element is never yielded. Created by [`ancestors`].
pub struct Ancestors<'a, I: SemanticIndex + ?Sized> {
    index: &'a I,
    current: Option<I::Handle>,
    visited: HashSet<I::Handle>,
}

impl<I: SemanticIndex + ?Sized> Iterator for Ancestors<'_, I> {
    type Item = I::Handle;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current.take()?;
        let parent = self.index.parent_of(current)?;

        if !self.visited.insert(parent) {
            warn!(
                element:? = current,
                parent:? = parent;
                "Containment cycle detected, stopping ancestor walk",
            );
            return None;
        }

        self.current = Some(parent);
        Some(parent)
    }
}

impl<I: SemanticIndex + ?Sized> FusedIterator for Ancestors<'_, I> {}

/// Iterate over the ancestors of `element`, nearest first.
pub fn ancestors<I: SemanticIndex + ?Sized>(index: &I, element: I::Handle) -> Ancestors<'_, I> {
    let mut visited = HashSet::new();
    visited.insert(element);

    Ancestors {
        index,
        current: Some(element),
        visited,
    }
}

/// Collect the ancestors of `element` from its immediate parent up to and
/// including the structural root.
///
/// Returns an empty vector for the root itself.
///
/// # Examples
///
/// ```
/// use vista::ancestry::ancestors_of;
/// use vista_core::{
///     identifier::ElementId,
///     semantic::{ElementKind, Model},
/// };
///
/// let mut model = Model::new(ElementId::new("Root"));
/// let package = model
///     .add_element(model.root(), ElementId::new("A"), ElementKind::Package, None)
///     .unwrap();
/// let class = model
///     .add_element(package, ElementId::new("A::X"), ElementKind::Class, None)
///     .unwrap();
///
/// assert_eq!(ancestors_of(&model, class), vec![package, model.root()]);
/// ```
pub fn ancestors_of<I: SemanticIndex + ?Sized>(index: &I, element: I::Handle) -> Vec<I::Handle> {
    ancestors(index, element).collect()
}

/// The topmost element reachable from `element`, or `element` itself when it
/// has no parent.
pub fn root_of<I: SemanticIndex + ?Sized>(index: &I, element: I::Handle) -> I::Handle {
    ancestors(index, element).last().unwrap_or(element)
}
