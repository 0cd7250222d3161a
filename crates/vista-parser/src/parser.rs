//! Parser for Vista model source text.
//!
//! The grammar is small enough to be parsed directly from characters:
//!
//! ```text
//! document := "model" IDENT ";" item*
//! item     := element | relation
//! element  := KIND IDENT STRING? ( ";" | "{" item* "}" )
//! relation := PATH "->" PATH ( ":" STRING )? ";"
//! PATH     := IDENT ( "::" IDENT )*
//! ```
//!
//! Whitespace and `//` line comments may appear between any two tokens.
//! The public entry point is [`parse_document`].

use winnow::{
    Parser as _,
    ascii::multispace1,
    combinator::{alt, cut_err, delimited, eof, opt, preceded, repeat, terminated},
    error::{ContextError, ModalResult, StrContext, StrContextValue},
    stream::LocatingSlice,
    token::{none_of, one_of, take_till, take_while},
};

use crate::{
    error::{Diagnostic, ErrorCode},
    parser_types::{Document, ElementDecl, Item, RelationDecl},
    span::{Span, Spanned},
};

type Input<'src> = LocatingSlice<&'src str>;
type IResult<O> = ModalResult<O, ContextError>;

fn expected(description: &'static str) -> StrContext {
    StrContext::Expected(StrContextValue::Description(description))
}

/// Parse a `//` comment up to the end of the line
fn line_comment<'src>(input: &mut Input<'src>) -> IResult<()> {
    ("//", take_till(0.., ['\n'])).void().parse_next(input)
}

/// Parse zero or more whitespace/comments
fn ws0<'src>(input: &mut Input<'src>) -> IResult<()> {
    repeat(0.., alt((multispace1.void(), line_comment)))
        .map(|()| ())
        .parse_next(input)
}

/// Parse at least one whitespace run or comment
fn ws1<'src>(input: &mut Input<'src>) -> IResult<()> {
    repeat(1.., alt((multispace1.void(), line_comment)))
        .map(|()| ())
        .parse_next(input)
}

/// Parse a raw identifier: a letter or `_` followed by letters, digits or `_`
fn raw_identifier<'src>(input: &mut Input<'src>) -> IResult<&'src str> {
    (
        one_of(|c: char| c.is_ascii_alphabetic() || c == '_'),
        take_while(0.., |c: char| c.is_ascii_alphanumeric() || c == '_'),
    )
        .take()
        .context(StrContext::Label("identifier"))
        .parse_next(input)
}

/// Parse an identifier with span preservation
fn identifier<'src>(input: &mut Input<'src>) -> IResult<Spanned<&'src str>> {
    raw_identifier
        .with_span()
        .map(|(name, range)| Spanned::new(name, Span::new(range)))
        .parse_next(input)
}

/// Parse a `::`-separated element path with span preservation
fn path<'src>(input: &mut Input<'src>) -> IResult<Spanned<&'src str>> {
    (
        raw_identifier,
        repeat(0.., ("::", raw_identifier)).map(|()| ()),
    )
        .take()
        .with_span()
        .map(|(path, range)| Spanned::new(path, Span::new(range)))
        .context(StrContext::Label("element path"))
        .parse_next(input)
}

/// Parse a double-quoted string literal.
///
/// Supports the escapes `\"`, `\\` and `\n`. Strings cannot span lines.
fn string_literal<'src>(input: &mut Input<'src>) -> IResult<String> {
    preceded(
        '"',
        cut_err(terminated(
            repeat(
                0..,
                alt((
                    none_of(['"', '\\', '\n']),
                    preceded('\\', one_of(['"', '\\', 'n']))
                        .map(|c| if c == 'n' { '\n' } else { c }),
                )),
            ),
            '"',
        ))
        .context(StrContext::Label("string literal"))
        .context(StrContext::Expected(StrContextValue::CharLiteral('"'))),
    )
    .parse_next(input)
}

/// Parse an element declaration.
///
/// Commits once `KIND IDENT` has been read, so errors inside the body are
/// reported where they occur instead of backtracking to the declaration.
fn element<'src>(input: &mut Input<'src>) -> IResult<Item<'src>> {
    let (kind, _, name) = (identifier, ws1, identifier).parse_next(input)?;

    cut_err(move |input: &mut Input<'src>| {
        let label = opt(preceded(ws0, string_literal)).parse_next(input)?;
        ws0.parse_next(input)?;

        let body = alt((
            ';'.value(None),
            delimited(
                '{',
                items,
                (ws0, '}'.context(expected("`}` or a declaration"))),
            )
            .map(Some),
        ))
        .context(StrContext::Expected(StrContextValue::CharLiteral(';')))
        .context(StrContext::Expected(StrContextValue::CharLiteral('{')))
        .parse_next(input)?;

        Ok(Item::Element(ElementDecl {
            kind,
            name,
            label,
            body,
        }))
    })
    .context(StrContext::Label("element declaration"))
    .parse_next(input)
}

/// Parse a relation declaration. Commits after `->`.
fn relation<'src>(input: &mut Input<'src>) -> IResult<Item<'src>> {
    let source = path.parse_next(input)?;
    (ws0, "->").parse_next(input)?;

    cut_err(move |input: &mut Input<'src>| {
        let target = preceded(ws0, path).parse_next(input)?;
        let label = opt(preceded((ws0, ':', ws0), string_literal)).parse_next(input)?;
        (ws0, ';')
            .context(StrContext::Expected(StrContextValue::CharLiteral(';')))
            .parse_next(input)?;

        Ok(Item::Relation(RelationDecl {
            source,
            target,
            label,
        }))
    })
    .context(StrContext::Label("relation"))
    .parse_next(input)
}

/// Parse the declarations of one scope
fn items<'src>(input: &mut Input<'src>) -> IResult<Vec<Item<'src>>> {
    repeat(0.., preceded(ws0, alt((element, relation)))).parse_next(input)
}

/// Parse the `model <name>;` header
fn header<'src>(input: &mut Input<'src>) -> IResult<Spanned<&'src str>> {
    ("model", ws1)
        .context(StrContext::Expected(StrContextValue::StringLiteral("model")))
        .parse_next(input)?;

    cut_err(terminated(
        identifier,
        (
            ws0,
            ';'.context(StrContext::Expected(StrContextValue::CharLiteral(';'))),
        ),
    ))
    .context(StrContext::Label("model header"))
    .parse_next(input)
}

fn document<'src>(input: &mut Input<'src>) -> IResult<Document<'src>> {
    ws0.parse_next(input)?;
    let name = header.parse_next(input)?;
    let items = items.parse_next(input)?;
    ws0.parse_next(input)?;
    eof.context(expected("an element or relation declaration"))
        .parse_next(input)?;

    Ok(Document { name, items })
}

/// Parse source text into a [`Document`].
///
/// # Errors
///
/// Returns an [`ErrorCode::E100`] diagnostic pointing at the first
/// character the grammar could not accept.
pub fn parse_document(source: &str) -> Result<Document<'_>, Diagnostic> {
    document
        .parse(LocatingSlice::new(source))
        .map_err(|err| convert_error(source, err.offset(), err.inner()))
}

fn convert_error(source: &str, offset: usize, err: &ContextError) -> Diagnostic {
    let width = source[offset..].chars().next().map_or(0, char::len_utf8);
    let span = Span::new(offset..offset + width);

    let label = err.context().find_map(|ctx| match ctx {
        StrContext::Label(label) => Some(*label),
        _ => None,
    });
    let expected: Vec<String> = err
        .context()
        .filter_map(|ctx| match ctx {
            StrContext::Expected(value) => Some(value.to_string()),
            _ => None,
        })
        .collect();

    let message = match label {
        Some(label) => format!("invalid {label}"),
        None => "unexpected input".to_string(),
    };
    let label_text = if expected.is_empty() {
        ErrorCode::E100.description().to_string()
    } else {
        format!("expected {}", expected.join(" or "))
    };

    Diagnostic::error(message)
        .with_code(ErrorCode::E100)
        .with_label(span, label_text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_ok(source: &str) -> Document<'_> {
        match parse_document(source) {
            Ok(doc) => doc,
            Err(diag) => panic!("failed to parse {source:?}: {diag} {:?}", diag.labels()),
        }
    }

    fn element_decl<'a, 'src>(item: &'a Item<'src>) -> &'a ElementDecl<'src> {
        match item {
            Item::Element(decl) => decl,
            Item::Relation(_) => panic!("expected element, got {item:?}"),
        }
    }

    fn relation_decl<'a, 'src>(item: &'a Item<'src>) -> &'a RelationDecl<'src> {
        match item {
            Item::Relation(decl) => decl,
            Item::Element(_) => panic!("expected relation, got {item:?}"),
        }
    }

    #[test]
    fn test_header_only() {
        let doc = parse_ok("model Shop;");

        assert_eq!(*doc.name.inner(), "Shop");
        assert_eq!(doc.name.span(), Span::new(6..10));
        assert!(doc.items.is_empty());
    }

    #[test]
    fn test_simple_elements() {
        let doc = parse_ok("model M; class A; interface B \"The B\";");

        assert_eq!(doc.items.len(), 2);
        let a = element_decl(&doc.items[0]);
        assert_eq!(*a.kind.inner(), "class");
        assert_eq!(*a.name.inner(), "A");
        assert!(a.label.is_none());
        assert!(a.body.is_none());

        let b = element_decl(&doc.items[1]);
        assert_eq!(*b.kind.inner(), "interface");
        assert_eq!(b.label.as_deref(), Some("The B"));
    }

    #[test]
    fn test_nested_body() {
        let doc = parse_ok(
            r#"
            model Root;
            package PackageA {
                class ClassX;
                class ClassY;
            }
            "#,
        );

        let package = element_decl(&doc.items[0]);
        let body = package.body.as_ref().unwrap();
        assert_eq!(body.len(), 2);
        assert_eq!(*element_decl(&body[1]).name.inner(), "ClassY");
    }

    #[test]
    fn test_empty_body() {
        let doc = parse_ok("model M; package Empty {}");

        let package = element_decl(&doc.items[0]);
        assert_eq!(package.body.as_ref().map(Vec::len), Some(0));
    }

    #[test]
    fn test_relation_with_label() {
        let doc = parse_ok(r#"model M; a::b -> c : "uses";"#);

        let relation = relation_decl(&doc.items[0]);
        assert_eq!(*relation.source.inner(), "a::b");
        assert_eq!(relation.source.span(), Span::new(9..13));
        assert_eq!(*relation.target.inner(), "c");
        assert_eq!(relation.label.as_deref(), Some("uses"));
    }

    #[test]
    fn test_relation_named_like_keyword() {
        let doc = parse_ok("model M; class -> component;");

        let relation = relation_decl(&doc.items[0]);
        assert_eq!(*relation.source.inner(), "class");
        assert_eq!(*relation.target.inner(), "component");
    }

    #[test]
    fn test_comments_and_whitespace() {
        let doc = parse_ok(
            "// leading comment\nmodel M; // trailing\n\n  class A; // another\n",
        );

        assert_eq!(doc.items.len(), 1);
    }

    #[test]
    fn test_comment_after_keywords() {
        let doc = parse_ok("model // name follows\n M;\nclass // the a class\n A;");

        assert_eq!(*doc.name.inner(), "M");
        let a = element_decl(&doc.items[0]);
        assert_eq!(*a.kind.inner(), "class");
        assert_eq!(*a.name.inner(), "A");
    }

    #[test]
    fn test_comment_directly_after_kind() {
        let doc = parse_ok("model M; package// nested\nP { class// leaf\nA; }");

        let package = element_decl(&doc.items[0]);
        assert_eq!(*package.name.inner(), "P");
        let body = package.body.as_ref().unwrap();
        assert_eq!(*element_decl(&body[0]).name.inner(), "A");
    }

    #[test]
    fn test_keyword_needs_separator() {
        let diag = parse_document("modelM;").unwrap_err();

        assert_eq!(diag.code(), Some(ErrorCode::E100));
    }

    #[test]
    fn test_string_escapes() {
        let doc = parse_ok(r#"model M; note N "say \"hi\"\nbye \\";"#);

        let note = element_decl(&doc.items[0]);
        assert_eq!(note.label.as_deref(), Some("say \"hi\"\nbye \\"));
    }

    #[test]
    fn test_missing_header() {
        let diag = parse_document("class A;").unwrap_err();

        assert_eq!(diag.code(), Some(ErrorCode::E100));
        assert_eq!(diag.labels()[0].span().start(), 0);
    }

    #[test]
    fn test_missing_semicolon_after_element() {
        let source = "model M; class A class B;";
        let diag = parse_document(source).unwrap_err();

        assert_eq!(diag.code(), Some(ErrorCode::E100));
        assert_eq!(diag.message(), "invalid element declaration");
        assert_eq!(diag.labels()[0].span().start(), source.find("class B").unwrap());
    }

    #[test]
    fn test_unclosed_body() {
        let source = "model M; package P { class A;";
        let diag = parse_document(source).unwrap_err();

        assert_eq!(diag.labels()[0].span().start(), source.len());
    }

    #[test]
    fn test_relation_missing_target() {
        let source = "model M; a -> ;";
        let diag = parse_document(source).unwrap_err();

        assert_eq!(diag.message(), "invalid identifier");
        assert_eq!(diag.labels()[0].span().start(), source.rfind(';').unwrap());
    }

    #[test]
    fn test_unterminated_string() {
        let diag = parse_document("model M; class A \"open;\n").unwrap_err();

        assert_eq!(diag.code(), Some(ErrorCode::E100));
    }

    #[test]
    fn test_stray_token() {
        let source = "model M; class A; ???";
        let diag = parse_document(source).unwrap_err();

        assert_eq!(diag.labels()[0].span().start(), source.find('?').unwrap());
        assert_eq!(
            diag.labels()[0].message(),
            "expected an element or relation declaration"
        );
    }
}
