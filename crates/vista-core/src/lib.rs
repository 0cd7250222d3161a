//! Vista Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Vista crates:
//!
//! - **Identifiers**: string-interned element identifiers ([`identifier::ElementId`])
//! - **Semantic**: the [`semantic::SemanticIndex`] lookup trait and the
//!   in-memory [`semantic::Model`]
//! - **Graphical**: the graphical tree submitted to clients ([`graphical`] module)

pub mod graphical;
pub mod identifier;
pub mod semantic;
