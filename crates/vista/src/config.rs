//! Configuration types for Vista.
//!
//! All types implement [`serde::Deserialize`] and every section falls back
//! to its default, so an empty file is a valid configuration.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining the sections below.
//! - [`ProjectionConfig`] - Selects the [`RootPolicy`] used when projecting.
//! - [`OutputConfig`] - Selects the default [`OutputFormat`].
//!
//! # Example
//!
//! ```
//! # use vista::{config::AppConfig, export::OutputFormat, projection::RootPolicy};
//! let config: AppConfig = toml::from_str(
//!     r#"
//!     [projection]
//!     root = "checked"
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.projection().root(), RootPolicy::Checked);
//! assert_eq!(config.output().format(), OutputFormat::Outline);
//! ```

use serde::Deserialize;

use crate::{export::OutputFormat, projection::RootPolicy};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Projection configuration section.
    #[serde(default)]
    projection: ProjectionConfig,

    /// Output configuration section.
    #[serde(default)]
    output: OutputConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(projection: ProjectionConfig, output: OutputConfig) -> Self {
        Self { projection, output }
    }

    /// Returns the projection configuration.
    pub fn projection(&self) -> &ProjectionConfig {
        &self.projection
    }

    /// Returns the output configuration.
    pub fn output(&self) -> &OutputConfig {
        &self.output
    }
}

/// How graphical trees are projected.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectionConfig {
    /// Whether the tree root may be filtered out.
    #[serde(default)]
    root: RootPolicy,
}

impl ProjectionConfig {
    pub fn new(root: RootPolicy) -> Self {
        Self { root }
    }

    /// Returns the configured [`RootPolicy`].
    pub fn root(&self) -> RootPolicy {
        self.root
    }
}

/// How submissions are written.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(default)]
    format: OutputFormat,
}

impl OutputConfig {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Returns the default [`OutputFormat`].
    pub fn format(&self) -> OutputFormat {
        self.format
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();

        assert_eq!(config.projection().root(), RootPolicy::Exempt);
        assert_eq!(config.output().format(), OutputFormat::Outline);
    }

    #[test]
    fn test_full_config() {
        let config: AppConfig = toml::from_str(
            r#"
            [projection]
            root = "checked"

            [output]
            format = "toml"
            "#,
        )
        .unwrap();

        assert_eq!(config.projection().root(), RootPolicy::Checked);
        assert_eq!(config.output().format(), OutputFormat::Toml);
    }

    #[test]
    fn test_invalid_policy_is_rejected() {
        let result: Result<AppConfig, _> = toml::from_str(
            r#"
            [projection]
            root = "sometimes"
            "#,
        );

        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_section_is_rejected() {
        let result: Result<AppConfig, _> = toml::from_str("[layout]\ncomponent = \"basic\"\n");

        assert!(result.is_err());
    }
}
