//! Session visibility state.
//!
//! A [`VisibilityState`] starts out [`Unset`](VisibilityState::Unset), where
//! every element is visible. Each visibility request replaces it wholesale
//! with a [`VisibleSet`]: the requested elements plus all of their
//! ancestors, so a visible element never sits inside a hidden container.

use indexmap::IndexSet;
use log::{debug, info};

use vista_core::{identifier::ElementId, semantic::SemanticIndex};

use crate::ancestry;

/// An ancestor-closed set of visible element identifiers.
///
/// The only way to fill a set is [`VisibleSet::resolve`], which adds the
/// ancestors of every element it adds. Once built, the set is never mutated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibleSet {
    ids: IndexSet<ElementId>,
}

impl VisibleSet {
    /// Resolve requested identifiers against `index` and close the result
    /// over ancestry.
    ///
    /// Identifiers the index does not know are dropped. Ancestors without
    /// an identifier are skipped, but the walk continues past them.
    pub fn resolve<I, R>(requested: R, index: &I) -> Self
    where
        I: SemanticIndex + ?Sized,
        R: IntoIterator<Item = ElementId>,
    {
        Self::resolve_counted(requested, index).0
    }

    /// [`resolve`](Self::resolve), also returning the number of requested
    /// and resolved identifiers. Each identifier is looked up once.
    fn resolve_counted<I, R>(requested: R, index: &I) -> (Self, usize, usize)
    where
        I: SemanticIndex + ?Sized,
        R: IntoIterator<Item = ElementId>,
    {
        let mut ids = IndexSet::new();
        let mut total = 0;
        let mut resolved = 0;

        for id in requested {
            total += 1;
            let Some(element) = index.lookup(id) else {
                debug!(id:%; "Dropping unknown visible element");
                continue;
            };

            resolved += 1;
            ids.insert(id);
            ids.extend(
                ancestry::ancestors(index, element).filter_map(|ancestor| index.id_of(ancestor)),
            );
        }

        (Self { ids }, total, resolved)
    }

    /// Number of visible identifiers.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether no element is visible.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Whether `id` is in the set.
    pub fn contains(&self, id: ElementId) -> bool {
        self.ids.contains(&id)
    }

    /// Iterate over the identifiers in the order they were added.
    pub fn iter(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.ids.iter().copied()
    }
}

/// Counts reported by [`VisibilityState::configure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigureSummary {
    /// Identifiers in the request, duplicates included.
    pub requested: usize,
    /// Requested identifiers the semantic index resolved.
    pub resolved: usize,
    /// Size of the resulting ancestor-closed set.
    pub visible: usize,
}

/// Which elements of the current model are visible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum VisibilityState {
    /// No request has been made: everything is visible.
    #[default]
    Unset,
    /// Only the members of the set are visible.
    Configured(VisibleSet),
}

impl VisibilityState {
    /// Replace the state with the closure of `requested`.
    ///
    /// Unknown identifiers are not an error. An empty or entirely unknown
    /// request leaves the state configured with an empty set, which hides
    /// everything.
    ///
    /// # Examples
    ///
    /// ```
    /// use vista::visibility::VisibilityState;
    /// use vista_core::{
    ///     identifier::ElementId,
    ///     semantic::{ElementKind, Model},
    /// };
    ///
    /// let mut model = Model::new(ElementId::new("Root"));
    /// let package = model
    ///     .add_element(model.root(), ElementId::new("A"), ElementKind::Package, None)
    ///     .unwrap();
    /// model
    ///     .add_element(package, ElementId::new("A::X"), ElementKind::Class, None)
    ///     .unwrap();
    ///
    /// let mut state = VisibilityState::default();
    /// let summary = state.configure([ElementId::new("A::X")], &model);
    ///
    /// assert_eq!(summary.visible, 3);
    /// assert!(state.is_visible(ElementId::new("Root")));
    /// assert!(!state.is_visible(ElementId::new("B")));
    /// ```
    pub fn configure<I, R>(&mut self, requested: R, index: &I) -> ConfigureSummary
    where
        I: SemanticIndex + ?Sized,
        R: IntoIterator<Item = ElementId>,
    {
        let (set, requested, resolved) = VisibleSet::resolve_counted(requested, index);
        let summary = ConfigureSummary {
            requested,
            resolved,
            visible: set.len(),
        };

        info!(
            requested = summary.requested,
            resolved = summary.resolved,
            visible = summary.visible;
            "Configured visible elements",
        );
        *self = Self::Configured(set);

        summary
    }

    /// Whether `id` is visible. Always true while unset.
    pub fn is_visible(&self, id: ElementId) -> bool {
        match self {
            Self::Unset => true,
            Self::Configured(set) => set.contains(id),
        }
    }

    /// Return to the unset state.
    pub fn reset(&mut self) {
        debug!("Resetting visibility state");
        *self = Self::Unset;
    }

    pub fn is_configured(&self) -> bool {
        matches!(self, Self::Configured(_))
    }

    pub fn visible_set(&self) -> Option<&VisibleSet> {
        match self {
            Self::Unset => None,
            Self::Configured(set) => Some(set),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use proptest::prelude::*;

    use vista_core::semantic::{ElementKey, ElementKind, Model};

    use super::*;
    use crate::ancestry::tests::LinkedIndex;

    fn id(name: &str) -> ElementId {
        ElementId::new(name)
    }

    /// Root -> PackageA -> [ClassX, ClassY]
    fn scenario_model() -> Model {
        let mut model = Model::new(id("Root"));
        let package = model
            .add_element(model.root(), id("PackageA"), ElementKind::Package, None)
            .unwrap();
        for class in ["PackageA::ClassX", "PackageA::ClassY"] {
            model
                .add_element(package, id(class), ElementKind::Class, None)
                .unwrap();
        }
        model
    }

    #[test]
    fn test_unset_shows_everything() {
        let state = VisibilityState::default();

        assert!(!state.is_configured());
        assert!(state.visible_set().is_none());
        assert!(state.is_visible(id("anything-at-all")));
    }

    #[test]
    fn test_configure_closes_over_ancestors() {
        let model = scenario_model();
        let mut state = VisibilityState::Unset;

        let summary = state.configure([id("PackageA::ClassX")], &model);

        assert_eq!(
            summary,
            ConfigureSummary {
                requested: 1,
                resolved: 1,
                visible: 3,
            }
        );
        let visible: Vec<_> = state.visible_set().unwrap().iter().collect();
        assert_eq!(visible, vec![id("PackageA::ClassX"), id("PackageA"), id("Root")]);
        assert!(!state.is_visible(id("PackageA::ClassY")));
    }

    #[test]
    fn test_empty_request_hides_everything() {
        let model = scenario_model();
        let mut state = VisibilityState::Unset;

        state.configure(std::iter::empty(), &model);

        assert!(state.is_configured());
        assert!(state.visible_set().unwrap().is_empty());
        assert!(!state.is_visible(id("Root")));
    }

    #[test]
    fn test_unknown_ids_are_dropped() {
        let model = scenario_model();
        let mut state = VisibilityState::Unset;

        let summary = state.configure([id("unknown-id")], &model);

        assert_eq!(summary.resolved, 0);
        assert_eq!(summary.visible, 0);
        assert!(state.visible_set().unwrap().is_empty());
    }

    #[test]
    fn test_duplicates_are_counted_once() {
        let model = scenario_model();
        let mut state = VisibilityState::Unset;

        let summary = state.configure(
            [id("PackageA::ClassX"), id("PackageA::ClassX"), id("nope")],
            &model,
        );

        assert_eq!(summary.requested, 3);
        assert_eq!(summary.resolved, 2);
        assert_eq!(summary.visible, 3);
    }

    /// Counts `lookup` calls made against the wrapped model.
    struct CountingIndex {
        model: Model,
        lookups: Cell<usize>,
    }

    impl SemanticIndex for CountingIndex {
        type Handle = ElementKey;

        fn lookup(&self, id: ElementId) -> Option<ElementKey> {
            self.lookups.set(self.lookups.get() + 1);
            self.model.lookup(id)
        }

        fn parent_of(&self, element: ElementKey) -> Option<ElementKey> {
            self.model.parent_of(element)
        }

        fn id_of(&self, element: ElementKey) -> Option<ElementId> {
            self.model.id_of(element)
        }
    }

    #[test]
    fn test_configure_looks_up_each_id_once() {
        let index = CountingIndex {
            model: scenario_model(),
            lookups: Cell::new(0),
        };
        let mut state = VisibilityState::Unset;

        let summary = state.configure(
            [id("PackageA::ClassX"), id("nope"), id("PackageA::ClassY")],
            &index,
        );

        assert_eq!(index.lookups.get(), 3);
        assert_eq!(summary.requested, 3);
        assert_eq!(summary.resolved, 2);
        assert_eq!(summary.visible, 4);
    }

    #[test]
    fn test_configure_replaces_previous_set() {
        let model = scenario_model();
        let mut state = VisibilityState::Unset;

        state.configure([id("PackageA::ClassX")], &model);
        state.configure([id("PackageA::ClassY")], &model);

        assert!(!state.is_visible(id("PackageA::ClassX")));
        assert!(state.is_visible(id("PackageA::ClassY")));
    }

    #[test]
    fn test_reset_returns_to_unset() {
        let model = scenario_model();
        let mut state = VisibilityState::Unset;
        state.configure(std::iter::empty(), &model);

        state.reset();

        assert_eq!(state, VisibilityState::Unset);
        assert!(state.is_visible(id("Root")));
    }

    #[test]
    fn test_anonymous_ancestor_is_skipped() {
        // 2 -> 1 (no id) -> 0
        let mut index = LinkedIndex::new(3, &[(2, 1), (1, 0)]);
        index.anonymous.push(1);

        let set = VisibleSet::resolve([id("e2")], &index);

        assert_eq!(set.iter().collect::<Vec<_>>(), vec![id("e2"), id("e0")]);
    }

    #[test]
    fn test_cyclic_containment_terminates() {
        let index = LinkedIndex::new(3, &[(0, 1), (1, 2), (2, 1)]);

        let set = VisibleSet::resolve([id("e0")], &index);

        assert_eq!(set.len(), 3);
    }

    /// Random forest: element `n > 0` has a parent drawn from `0..n`.
    fn forest() -> impl Strategy<Value = (LinkedIndex, Vec<u32>)> {
        (2u32..24)
            .prop_flat_map(|size| {
                let parents = (1..size)
                    .map(|n| prop::option::weighted(0.9, 0..n))
                    .collect::<Vec<_>>();
                let requested = prop::collection::vec(0..size + 4, 0..8);
                (Just(size), parents, requested)
            })
            .prop_map(|(size, parents, requested)| {
                let links: Vec<(u32, u32)> = parents
                    .into_iter()
                    .enumerate()
                    .filter_map(|(i, parent)| parent.map(|p| (i as u32 + 1, p)))
                    .collect();
                (LinkedIndex::new(size, &links), requested)
            })
    }

    proptest! {
        #[test]
        fn visible_set_is_ancestor_closed((index, requested) in forest()) {
            let requested: Vec<ElementId> =
                requested.iter().map(|n| id(&format!("e{n}"))).collect();
            let set = VisibleSet::resolve(requested.clone(), &index);

            for visible in set.iter() {
                let element = index.lookup(visible).unwrap();
                for ancestor in ancestry::ancestors_of(&index, element) {
                    prop_assert!(set.contains(index.id_of(ancestor).unwrap()));
                }
            }
            for requested_id in requested {
                prop_assert_eq!(
                    set.contains(requested_id),
                    index.lookup(requested_id).is_some()
                );
            }
        }

        #[test]
        fn configure_is_idempotent((index, requested) in forest()) {
            let requested: Vec<ElementId> =
                requested.iter().map(|n| id(&format!("e{n}"))).collect();
            let mut once = VisibilityState::Unset;
            once.configure(requested.clone(), &index);
            let mut twice = once.clone();
            twice.configure(requested, &index);

            prop_assert_eq!(once, twice);
        }
    }
}
