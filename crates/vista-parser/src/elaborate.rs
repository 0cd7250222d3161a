//! Elaboration phase for the Vista syntax tree.
//!
//! Turns a parsed [`Document`] into a [`Model`]. Elements are declared in a
//! first pass so relations may refer to elements declared further down the
//! file; relations are resolved in a second pass. Every problem found is
//! collected, so a single run reports all of them.

use std::{collections::HashMap, str::FromStr};

use log::{debug, trace};

use vista_core::{
    identifier::ElementId,
    semantic::{ElementKey, ElementKind, Model, ModelError},
};

use crate::{
    error::{Diagnostic, ErrorCode, ParseError},
    parser_types::{Document, ElementDecl, Item, RelationDecl},
    span::Span,
};

const RESERVED_PREFIX: &str = "__";

pub struct Builder<'a, 'src> {
    model: Model,
    /// Where each identifier was first declared.
    definitions: HashMap<ElementId, Span>,
    /// Relations waiting for the second pass, with their enclosing element.
    pending_relations: Vec<(ElementKey, &'a RelationDecl<'src>)>,
    next_anonymous: usize,
    diagnostics: Vec<Diagnostic>,
}

impl<'a, 'src> Builder<'a, 'src> {
    pub fn new(document: &Document<'src>) -> Self {
        let root_id = ElementId::new(document.name.inner());
        let mut definitions = HashMap::new();
        definitions.insert(root_id, document.name.span());

        Self {
            model: Model::new(root_id),
            definitions,
            pending_relations: Vec::new(),
            next_anonymous: 0,
            diagnostics: Vec::new(),
        }
    }

    // ============================================================================
    // Main Entry Methods
    // ============================================================================

    pub fn build(mut self, document: &'a Document<'src>) -> Result<Model, ParseError> {
        debug!(items = document.items.len(); "Declaring elements");
        let root = self.model.root();
        self.declare_items(root, None, &document.items);

        debug!(relations = self.pending_relations.len(); "Resolving relations");
        for (parent, relation) in std::mem::take(&mut self.pending_relations) {
            self.resolve_relation(parent, relation);
        }

        if self.diagnostics.is_empty() {
            Ok(self.model)
        } else {
            debug!(errors = self.diagnostics.len(); "Elaboration failed");
            Err(ParseError::new(self.diagnostics))
        }
    }

    // ============================================================================
    // Elements
    // ============================================================================

    /// Declare the elements of one scope.
    ///
    /// `scope_id` is `None` at the top level, where identifiers are not
    /// prefixed with the model name.
    fn declare_items(
        &mut self,
        parent: ElementKey,
        scope_id: Option<ElementId>,
        items: &'a [Item<'src>],
    ) {
        for item in items {
            match item {
                Item::Element(decl) => self.declare_element(parent, scope_id, decl),
                Item::Relation(relation) => self.pending_relations.push((parent, relation)),
            }
        }
    }

    fn declare_element(
        &mut self,
        parent: ElementKey,
        scope_id: Option<ElementId>,
        decl: &'a ElementDecl<'src>,
    ) {
        let Ok(kind) = ElementKind::from_str(decl.kind.inner()) else {
            self.diagnostics.push(
                Diagnostic::error(format!("unknown element kind `{}`", decl.kind.inner()))
                    .with_code(ErrorCode::E101)
                    .with_label(decl.kind.span(), ErrorCode::E101.description())
                    .with_help(
                        "valid kinds are: package, class, interface, component, actor, note",
                    ),
            );
            return;
        };

        let name = *decl.name.inner();
        if name.starts_with(RESERVED_PREFIX) {
            self.diagnostics.push(
                Diagnostic::error(format!("identifier `{name}` is reserved"))
                    .with_code(ErrorCode::E303)
                    .with_label(decl.name.span(), ErrorCode::E303.description())
                    .with_help(format!(
                        "names starting with `{RESERVED_PREFIX}` are reserved for anonymous elements"
                    )),
            );
            return;
        }

        let id = match scope_id {
            Some(scope) => scope.nested(name),
            None => ElementId::new(name),
        };

        let key = match self
            .model
            .add_element(parent, id, kind, decl.label.clone())
        {
            Ok(key) => key,
            Err(ModelError::DuplicateId(id)) => {
                self.report_duplicate(id, decl.name.span());
                return;
            }
            Err(err) => {
                self.diagnostics.push(
                    Diagnostic::error(err.to_string()).with_label(decl.name.span(), "here"),
                );
                return;
            }
        };
        self.definitions.insert(id, decl.name.span());
        trace!(id:%, kind:%; "Declared element");

        let Some(body) = &decl.body else {
            return;
        };
        if !kind.is_namespace() {
            self.diagnostics.push(
                Diagnostic::error(format!("{kind} `{name}` cannot contain nested elements"))
                    .with_code(ErrorCode::E302)
                    .with_label(decl.kind.span().union(decl.name.span()), "declared here")
                    .with_help("only packages and components may have a body"),
            );
            return;
        }

        self.declare_items(key, Some(id), body);
    }

    fn report_duplicate(&mut self, id: ElementId, span: Span) {
        let mut diagnostic = Diagnostic::error(format!("element `{id}` is already defined"))
            .with_code(ErrorCode::E300)
            .with_label(span, "duplicate definition");
        if let Some(first) = self.definitions.get(&id) {
            diagnostic = diagnostic.with_secondary_label(*first, "first defined here");
        }
        self.diagnostics.push(diagnostic);
    }

    // ============================================================================
    // Relations
    // ============================================================================

    fn resolve_relation(&mut self, parent: ElementKey, relation: &RelationDecl<'src>) {
        let source = self.resolve_endpoint(relation.source.inner(), relation.source.span());
        let target = self.resolve_endpoint(relation.target.inner(), relation.target.span());
        let (Some(source), Some(target)) = (source, target) else {
            return;
        };

        let id = ElementId::from_anonymous(self.next_anonymous);
        self.next_anonymous += 1;

        match self
            .model
            .add_relation(parent, id, source, target, relation.label.clone())
        {
            Ok(_) => trace!(id:%, source:%, target:%; "Declared relation"),
            Err(err) => self.diagnostics.push(
                Diagnostic::error(err.to_string())
                    .with_label(relation.source.span().union(relation.target.span()), "here"),
            ),
        }
    }

    /// Look up a relation endpoint by its full path.
    ///
    /// Relations themselves cannot be endpoints.
    fn resolve_endpoint(&mut self, path: &str, span: Span) -> Option<ElementId> {
        let id = ElementId::new(path);
        let resolved = self
            .model
            .get(id)
            .is_some_and(|element| element.kind() != ElementKind::Relation);

        if resolved {
            return Some(id);
        }

        self.diagnostics.push(
            Diagnostic::error(format!("relation endpoint `{path}` does not exist"))
                .with_code(ErrorCode::E301)
                .with_label(span, ErrorCode::E301.description())
                .with_help("endpoints are written with their full path from the top level"),
        );
        None
    }
}
