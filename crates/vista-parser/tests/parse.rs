use proptest::prelude::*;

use vista_core::identifier::ElementId;
use vista_core::semantic::{ElementKind, SemanticIndex};
use vista_parser::{error::ErrorCode, parse};

const SHOP: &str = r#"
    // A small online shop
    model Shop;

    package catalog {
        class Product "Product";
        class Category;
    }

    component checkout {
        interface Payment;
        class Cart;
    }

    actor Customer;
    note Disclaimer "Prices exclude tax";

    catalog::Category -> catalog::Product : "contains";
    checkout::Cart -> catalog::Product;
    Customer -> checkout::Cart : "fills";
"#;

#[test]
fn test_shop_model() {
    let model = parse(SHOP).expect("Failed to parse");

    let root = model.element(model.root());
    assert_eq!(root.id(), ElementId::new("Shop"));
    assert_eq!(root.kind(), ElementKind::Model);

    let top_level: Vec<_> = root
        .children()
        .iter()
        .map(|key| model.element(*key).id().to_string())
        .collect();
    assert_eq!(
        top_level,
        vec!["catalog", "checkout", "Customer", "Disclaimer", "__0", "__1", "__2"]
    );

    let product = model.get(ElementId::new("catalog::Product")).unwrap();
    assert_eq!(product.kind(), ElementKind::Class);
    assert_eq!(product.display_text(), "Product");

    let payment = model.lookup(ElementId::new("checkout::Payment")).unwrap();
    assert_eq!(
        model.id_of(model.parent_of(payment).unwrap()),
        Some(ElementId::new("checkout"))
    );
}

#[test]
fn test_relations_keep_declaration_order() {
    let model = parse(SHOP).expect("Failed to parse");

    let endpoints: Vec<_> = model
        .elements()
        .filter_map(|element| element.endpoints())
        .map(|(source, target)| (source.to_string(), target.to_string()))
        .collect();

    assert_eq!(
        endpoints,
        vec![
            ("catalog::Category".to_string(), "catalog::Product".to_string()),
            ("checkout::Cart".to_string(), "catalog::Product".to_string()),
            ("Customer".to_string(), "checkout::Cart".to_string()),
        ]
    );
}

#[test]
fn test_syntax_error_is_reported_alone() {
    let err = parse("model M; class A; class B").unwrap_err();

    assert_eq!(err.diagnostics().len(), 1);
    assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E100));
}

#[test]
fn test_all_elaboration_errors_are_collected() {
    let source = r#"
        model M;
        class A;
        class A;
        gadget G;
        note N { class Inner; }
        A -> Missing;
    "#;

    let err = parse(source).unwrap_err();
    let codes: Vec<_> = err
        .diagnostics()
        .iter()
        .filter_map(|diagnostic| diagnostic.code())
        .collect();

    assert_eq!(
        codes,
        vec![
            ErrorCode::E300,
            ErrorCode::E101,
            ErrorCode::E302,
            ErrorCode::E301
        ]
    );
}

fn name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,6}"
}

proptest! {
    #[test]
    fn parse_never_panics(source in "\\PC{0,80}") {
        let _ = parse(&source);
    }

    #[test]
    fn distinct_classes_are_all_declared(names in prop::collection::hash_set(name(), 1..8)) {
        let body: String = names
            .iter()
            .map(|name| format!("class {name};\n"))
            .collect();
        let source = format!("model Root;\npackage pkg {{\n{body}}}\n");

        let model = parse(&source).expect("generated source should parse");

        prop_assert_eq!(model.len(), names.len() + 2);
        let package = model.lookup(ElementId::new("pkg")).unwrap();
        for name in &names {
            let key = model.lookup(ElementId::new(&format!("pkg::{name}"))).unwrap();
            prop_assert_eq!(model.parent_of(key), Some(package));
        }
    }
}
