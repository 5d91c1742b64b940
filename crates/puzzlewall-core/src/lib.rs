#![forbid(unsafe_code)]

//! Puzzle wall input model (headless).
//!
//! Turns a document (an item array, an `{items, config}` object, or a labeled tree) into the
//! ordered item list and the effective configuration consumed by `puzzlewall-render`.

pub mod config;
pub mod defaults;
pub mod error;
pub mod input;
pub mod options;
pub mod tree;

pub use config::WallConfig;
pub use error::{Error, Result};
pub use input::InputFormat;
pub use options::{FlattenMode, WallOptions};
pub use tree::NodeData;

use input::DocumentBody;
use serde_json::Value;

#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    pub suppress_errors: bool,
}

impl ParseOptions {
    /// Strict parsing (invalid config values are returned as errors).
    pub fn strict() -> Self {
        Self {
            suppress_errors: false,
        }
    }

    /// Lenient parsing: invalid config values are clamped or replaced by defaults.
    pub fn lenient() -> Self {
        Self {
            suppress_errors: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct WallMetadata {
    pub format: InputFormat,
    pub title: Option<String>,
    pub description: Option<String>,
    /// Config overrides carried by the document itself.
    pub config: WallConfig,
    /// Site defaults merged with the document overrides.
    pub effective_config: WallConfig,
    pub options: WallOptions,
}

#[derive(Debug, Clone)]
pub struct ParsedWall {
    pub meta: WallMetadata,
    pub items: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Engine {
    site_config: WallConfig,
}

impl Default for Engine {
    fn default() -> Self {
        Self {
            site_config: defaults::default_site_config(),
        }
    }
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_site_config(mut self, site_config: WallConfig) -> Self {
        // Merge onto the defaults so unspecified keys keep working.
        self.site_config.deep_merge(site_config.as_value());
        self
    }

    pub fn site_config(&self) -> &WallConfig {
        &self.site_config
    }

    fn effective_config(&self, overrides: &Value) -> WallConfig {
        let mut effective = self.site_config.clone();
        effective.deep_merge(overrides);
        effective
    }

    /// Parses a JSON, JSON5, or YAML document into a wall.
    pub fn parse_wall_sync(&self, text: &str, options: ParseOptions) -> Result<ParsedWall> {
        self.parse_wall_with_overrides_sync(text, None, options)
    }

    /// Like [`Engine::parse_wall_sync`], with caller overrides applied on top of the document's
    /// own config (site defaults < document < overrides).
    pub fn parse_wall_with_overrides_sync(
        &self,
        text: &str,
        overrides: Option<&WallConfig>,
        options: ParseOptions,
    ) -> Result<ParsedWall> {
        let _span = tracing::debug_span!("parse_wall", input_bytes = text.len()).entered();

        let (value, format) = input::decode_text(text)?;
        let mut doc = input::classify(value, format)?;
        if let Some(overrides) = overrides {
            let mut merged = WallConfig::from_value(std::mem::take(&mut doc.config));
            merged.deep_merge(overrides.as_value());
            doc.config = merged.into_value();
        }

        let effective_config = self.effective_config(&doc.config);
        let wall_options = WallOptions::from_config(&effective_config, options)?;

        let items = match &doc.body {
            DocumentBody::Items(nodes) => input::item_labels(nodes),
            DocumentBody::Tree(tree) => tree.flatten(wall_options.flatten),
        };
        tracing::debug!(
            format = format.as_str(),
            items = items.len(),
            columns = wall_options.columns,
            "parsed wall document"
        );

        Ok(ParsedWall {
            meta: WallMetadata {
                format,
                title: doc.title,
                description: doc.description,
                config: WallConfig::from_value(doc.config),
                effective_config,
                options: wall_options,
            },
            items,
        })
    }

    /// Builds a wall from items supplied in memory, with optional config overrides.
    pub fn wall_from_items<I, S>(
        &self,
        items: I,
        overrides: Option<&WallConfig>,
        options: ParseOptions,
    ) -> Result<ParsedWall>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let config = overrides.cloned().unwrap_or_default();
        let effective_config = self.effective_config(config.as_value());
        let wall_options = WallOptions::from_config(&effective_config, options)?;
        Ok(ParsedWall {
            meta: WallMetadata {
                format: InputFormat::Inline,
                title: None,
                description: None,
                config,
                effective_config,
                options: wall_options,
            },
            items: items.into_iter().map(Into::into).collect(),
        })
    }
}

#[cfg(test)]
mod tests;
