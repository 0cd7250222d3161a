//! Syntax tree produced by the parser.
//!
//! Names and paths borrow from the source text; every piece that may show
//! up in a diagnostic keeps its [`Span`](crate::span::Span).

use crate::span::Spanned;

/// A parsed model file: `model <name>;` followed by declarations.
#[derive(Debug, Clone)]
pub struct Document<'src> {
    pub name: Spanned<&'src str>,
    pub items: Vec<Item<'src>>,
}

/// A single declaration inside a scope.
#[derive(Debug, Clone)]
pub enum Item<'src> {
    Element(ElementDecl<'src>),
    Relation(RelationDecl<'src>),
}

/// `class Product "Label" { ... }` or `class Product;`
#[derive(Debug, Clone)]
pub struct ElementDecl<'src> {
    /// Kind keyword as written; checked against the known kinds during
    /// elaboration so an unknown keyword gets a precise diagnostic.
    pub kind: Spanned<&'src str>,
    pub name: Spanned<&'src str>,
    pub label: Option<String>,
    /// `None` for `;`-terminated declarations, `Some` for a `{ ... }` body.
    pub body: Option<Vec<Item<'src>>>,
}

/// `catalog::Category -> catalog::Product : "contains";`
#[derive(Debug, Clone)]
pub struct RelationDecl<'src> {
    pub source: Spanned<&'src str>,
    pub target: Spanned<&'src str>,
    pub label: Option<String>,
}
