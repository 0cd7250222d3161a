//! Example: Projecting a model built from semantic types
//!
//! This example builds a model programmatically, without parsing source
//! code, and prints the full view followed by a filtered one.

use vista::{
    ViewBuilder,
    export::OutputFormat,
    identifier::ElementId,
    semantic::{ElementKind, Model},
    session::Action,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ElementId is Copy, so identifiers can be reused freely
    let web = ElementId::new("web");
    let client = web.nested("Client");
    let backend = ElementId::new("backend");
    let server = backend.nested("Server");
    let database = backend.nested("Database");

    let mut model = Model::new(ElementId::new("System"));
    let web_key = model.add_element(model.root(), web, ElementKind::Component, None)?;
    model.add_element(web_key, client, ElementKind::Class, Some("Web Client".to_string()))?;

    let backend_key = model.add_element(model.root(), backend, ElementKind::Component, None)?;
    model.add_element(backend_key, server, ElementKind::Class, Some("API Server".to_string()))?;
    model.add_element(backend_key, database, ElementKind::Class, None)?;

    model.add_relation(
        model.root(),
        ElementId::from_anonymous(0),
        client,
        server,
        Some("HTTP".to_string()),
    )?;
    model.add_relation(
        backend_key,
        ElementId::from_anonymous(1),
        server,
        database,
        Some("SQL".to_string()),
    )?;

    let builder = ViewBuilder::default();
    let mut session = builder.session();

    println!("Full model:\n");
    let full = builder.submit(&session, &model);
    print!("{}", builder.render(&full, OutputFormat::Outline)?);

    println!("\nOnly the web client and the API server:\n");
    let action = Action::set_visible_elements(["web::Client", "backend::Server"]);
    let filtered = builder.apply(&mut session, &model, &action);
    print!("{}", builder.render(&filtered, OutputFormat::Outline)?);

    println!(
        "\n{} node(s) and {} edge(s) hidden",
        filtered.stats.nodes_dropped, filtered.stats.edges_dropped
    );

    Ok(())
}
