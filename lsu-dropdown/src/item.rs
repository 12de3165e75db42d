//! Dropdown items and their identity.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{DropdownError, Result};

/// A candidate entry of a dropdown.
///
/// Items are either plain strings or structured records with named fields.
/// Which field is shown and which field identifies a record is decided by the
/// dropdown configuration (`text_field` / `id_field`), not by the item.
///
/// # Example
///
/// ```ignore
/// let color = Item::from("Green");
/// let person = Item::try_from(json!({ "id": 1, "name": "Tom" }))?;
/// assert_eq!(person.label("name"), "Tom");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub enum Item {
    /// A plain string item.
    Primitive(String),
    /// A record with named fields.
    Structured(Map<String, Value>),
}

impl Item {
    /// Create a plain string item.
    pub fn primitive(text: impl Into<String>) -> Self {
        Item::Primitive(text.into())
    }

    /// Convert a JSON array into a list of items.
    pub fn list_from_json(value: Value) -> Result<Vec<Item>> {
        match value {
            Value::Array(entries) => entries.into_iter().map(Item::try_from).collect(),
            other => Err(DropdownError::ExpectedList(other)),
        }
    }

    /// Get a named field of a structured item.
    pub fn field(&self, name: &str) -> Option<&Value> {
        match self {
            Item::Primitive(_) => None,
            Item::Structured(map) => map.get(name),
        }
    }

    /// Text shown for this item.
    ///
    /// Falls back to the serialized record when the display field is absent.
    pub fn label(&self, text_field: &str) -> Cow<'_, str> {
        match self {
            Item::Primitive(text) => Cow::Borrowed(text),
            Item::Structured(map) => match map.get(text_field) {
                Some(Value::String(text)) => Cow::Borrowed(text),
                Some(Value::Null) | None => Cow::Owned(Value::Object(map.clone()).to_string()),
                Some(other) => Cow::Owned(other.to_string()),
            },
        }
    }

    /// Text matched against a search query.
    ///
    /// Returns `None` when the display field is missing or not a string.
    pub fn search_text(&self, text_field: &str) -> Option<&str> {
        match self {
            Item::Primitive(text) => Some(text),
            Item::Structured(map) => map.get(text_field).and_then(Value::as_str),
        }
    }

    /// Identity key used for membership and removal.
    pub fn identity(&self, id_field: Option<&str>) -> Identity<'_> {
        match self {
            Item::Primitive(text) => Identity::Text(text),
            Item::Structured(map) => Identity::of_map(map, id_field),
        }
    }

    /// Whether two items share the same identity.
    pub fn same_as(&self, other: &Item, id_field: Option<&str>) -> bool {
        self.identity(id_field) == other.identity(id_field)
    }
}

impl From<&str> for Item {
    fn from(text: &str) -> Self {
        Item::Primitive(text.to_string())
    }
}

impl From<String> for Item {
    fn from(text: String) -> Self {
        Item::Primitive(text)
    }
}

impl TryFrom<Value> for Item {
    type Error = DropdownError;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::String(text) => Ok(Item::Primitive(text)),
            Value::Object(map) => Ok(Item::Structured(map)),
            other => Err(DropdownError::UnsupportedItem(other)),
        }
    }
}

impl From<Item> for Value {
    fn from(item: Item) -> Self {
        match item {
            Item::Primitive(text) => Value::String(text),
            Item::Structured(map) => Value::Object(map),
        }
    }
}

/// Borrowed identity key of an item or of an externally supplied value.
///
/// A structured record is identified by its id field when it carries one,
/// otherwise by its full contents. A raw string key and a string id field
/// compare equal, so `"Red"` finds both `"Red"` and `{ "id": "Red" }`.
#[derive(Debug, Clone, Copy)]
pub enum Identity<'a> {
    /// A plain string.
    Text(&'a str),
    /// The value of the id field.
    Field(&'a Value),
    /// A record without an id field.
    Whole(&'a Map<String, Value>),
}

impl<'a> Identity<'a> {
    /// Identity key of an externally supplied value.
    ///
    /// `null` has no identity. Numbers and booleans are taken as raw id
    /// field values.
    pub fn from_value(value: &'a Value, id_field: Option<&str>) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::String(text) => Some(Identity::Text(text)),
            Value::Object(map) => Some(Identity::of_map(map, id_field)),
            other => Some(Identity::Field(other)),
        }
    }

    fn of_map(map: &'a Map<String, Value>, id_field: Option<&str>) -> Self {
        match id_field.and_then(|field| map.get(field)) {
            Some(key) if !key.is_null() => Identity::Field(key),
            _ => Identity::Whole(map),
        }
    }
}

impl PartialEq for Identity<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Identity::Text(a), Identity::Text(b)) => a == b,
            (Identity::Field(a), Identity::Field(b)) => same_key(a, b),
            (Identity::Whole(a), Identity::Whole(b)) => a == b,
            (Identity::Text(a), Identity::Field(Value::String(b)))
            | (Identity::Field(Value::String(b)), Identity::Text(a)) => *a == b.as_str(),
            _ => false,
        }
    }
}

/// Id values are equal when identical, or when both are numbers of equal
/// value (`2` and `2.0`).
fn same_key(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(a), Value::Number(b)) => a == b || a.as_f64() == b.as_f64(),
        _ => a == b,
    }
}
