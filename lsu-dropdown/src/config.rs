//! Dropdown configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::item::Item;

/// Options recognized by a dropdown.
///
/// Deserializes from the camelCase option names used by host templates
/// (`textField`, `idField`, `placeHolder`, ...). Missing options take their
/// defaults.
///
/// # Example
///
/// ```ignore
/// let config = DropdownConfig::new()
///     .data(persons)
///     .text_field("name")
///     .multiple()
///     .search();
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DropdownConfig {
    /// Source list of candidate items.
    pub data: Vec<Item>,

    /// Field shown for structured items.
    pub text_field: String,

    /// Field identifying structured items. Empty means none.
    pub id_field: String,

    /// Ignore all interactions.
    pub disabled: bool,

    /// Text shown while nothing is selected.
    #[serde(rename = "placeHolder", alias = "placeholder")]
    pub placeholder: String,

    /// Allow several items to be selected.
    pub multiple: bool,

    /// Enable the search box.
    pub search: bool,
}

impl Default for DropdownConfig {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            text_field: "text".into(),
            id_field: "id".into(),
            disabled: false,
            placeholder: String::new(),
            multiple: false,
            search: false,
        }
    }
}

impl DropdownConfig {
    /// Create a config with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a config file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Set the source list.
    pub fn data(mut self, data: impl IntoIterator<Item = impl Into<Item>>) -> Self {
        self.data = data.into_iter().map(Into::into).collect();
        self
    }

    /// Set the display field.
    pub fn text_field(mut self, field: impl Into<String>) -> Self {
        self.text_field = field.into();
        self
    }

    /// Set the identity field. An empty name disables identity matching.
    pub fn id_field(mut self, field: impl Into<String>) -> Self {
        self.id_field = field.into();
        self
    }

    /// Mark the dropdown as disabled.
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Set the placeholder text.
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Enable multiple selection.
    pub fn multiple(mut self) -> Self {
        self.multiple = true;
        self
    }

    /// Enable searching.
    pub fn search(mut self) -> Self {
        self.search = true;
        self
    }

    /// The identity field, if one is configured.
    pub fn identity_field(&self) -> Option<&str> {
        Some(self.id_field.as_str()).filter(|field| !field.is_empty())
    }
}
