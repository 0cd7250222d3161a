//! # Vista Parser
//!
//! Reads Vista model source text into a [`vista_core::semantic::Model`].
//!
//! ## Usage
//!
//! ```
//! # use vista_parser::{parse, error::ParseError};
//!
//! fn main() -> Result<(), ParseError> {
//!     let source = r#"
//!         model Shop;
//!         package catalog {
//!             class Product;
//!             class Category;
//!         }
//!         catalog::Category -> catalog::Product : "contains";
//!     "#;
//!
//!     let model = parse(source)?;
//!     assert_eq!(model.len(), 5);
//!     Ok(())
//! }
//! ```

mod elaborate;
pub mod error;
mod parser;
mod parser_types;
mod span;

pub use span::Span;

use log::{debug, info};

use vista_core::semantic::Model;

use elaborate::Builder;
use error::ParseError;

/// Parse source text into a semantic model.
///
/// Runs two phases:
///
/// 1. **Parse** - Build the syntax tree from source text
/// 2. **Elaborate** - Qualify identifiers, resolve relations, build the model
///
/// # Errors
///
/// Returns a [`ParseError`] carrying every diagnostic found. A syntax error
/// stops before elaboration, so it is always reported alone.
pub fn parse(source: &str) -> Result<Model, ParseError> {
    debug!(len = source.len(); "Parsing model source");
    let document = parser::parse_document(source)?;

    let model = Builder::new(&document).build(&document)?;
    info!(name = *document.name.inner(), elements = model.len(); "Model parsed");

    Ok(model)
}
