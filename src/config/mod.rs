//! Construction options and the layered sizing configuration.
//!
//! Options come from an optional TOML file (see [`loader`]); per-notification
//! sizing overrides are merged over the defaults with [`resolve`].

pub mod loader;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// How the overlay picks its height.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizingMode {
    /// Constant height, content is centred inside it
    #[default]
    Fixed,
    /// Height (and optionally width) follow the content
    Dynamic,
}

/// Fully resolved sizing for one notification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SizingConfig {
    #[serde(rename = "type", alias = "mode")]
    pub mode: SizingMode,
    #[serde(rename = "height", alias = "expandHeight", alias = "expand_height")]
    pub expand_height: bool,
    #[serde(rename = "width", alias = "expandWidth", alias = "expand_width")]
    pub expand_width: bool,
    /// Overrides the notch height detected from the display work area
    #[serde(alias = "notch_height", skip_serializing_if = "Option::is_none")]
    pub notch_height: Option<u32>,
    #[serde(alias = "vertical_offset")]
    pub vertical_offset: i32,
}

impl SizingConfig {
    /// Dynamic sizing only grows vertically when `expand_height` is also set.
    pub fn grows_with_content(&self) -> bool {
        self.mode == SizingMode::Dynamic && self.expand_height
    }

    pub fn with_notch_height(mut self, notch_height: u32) -> Self {
        self.notch_height = Some(notch_height);
        self
    }
}

/// Per-notification sizing override; unset fields keep the base value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SizingOverride {
    #[serde(rename = "type", alias = "mode")]
    pub mode: Option<SizingMode>,
    #[serde(rename = "height", alias = "expandHeight", alias = "expand_height")]
    pub expand_height: Option<bool>,
    #[serde(rename = "width", alias = "expandWidth", alias = "expand_width")]
    pub expand_width: Option<bool>,
    #[serde(alias = "notch_height")]
    pub notch_height: Option<u32>,
    #[serde(alias = "vertical_offset")]
    pub vertical_offset: Option<i32>,
}

/// Merge an override over a base config, field by field.
pub fn resolve(base: &SizingConfig, over: Option<&SizingOverride>) -> SizingConfig {
    let Some(over) = over else {
        return *base;
    };

    SizingConfig {
        mode: over.mode.unwrap_or(base.mode),
        expand_height: over.expand_height.unwrap_or(base.expand_height),
        expand_width: over.expand_width.unwrap_or(base.expand_width),
        notch_height: over.notch_height.or(base.notch_height),
        vertical_offset: over.vertical_offset.unwrap_or(base.vertical_offset),
    }
}

/// Options the island is constructed with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IslandOptions {
    /// Default icon: preset name, inline `<svg>` markup or an image path
    pub icon: Option<String>,
    /// Custom sound file per notification kind ("success", "error", ...)
    pub sounds: HashMap<String, PathBuf>,
    pub enable_sounds: bool,
    /// Outlines the window boundary in the renderer
    pub dev_mode: bool,
    /// Enables diagnostic logging of window failures
    pub debug: bool,
    pub sizing: SizingConfig,
    pub icon_size: Option<u32>,
    pub icon_width: Option<u32>,
    pub icon_height: Option<u32>,
    pub icon_gap: Option<u32>,
}

impl Default for IslandOptions {
    fn default() -> Self {
        Self {
            icon: None,
            sounds: HashMap::new(),
            enable_sounds: true,
            dev_mode: false,
            debug: false,
            sizing: SizingConfig::default(),
            icon_size: None,
            icon_width: None,
            icon_height: None,
            icon_gap: None,
        }
    }
}
