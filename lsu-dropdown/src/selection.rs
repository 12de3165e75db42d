//! Committed dropdown selection.

use serde_json::Value;

use crate::item::Item;

/// The item(s) a dropdown has committed to.
///
/// The variant is fixed by the dropdown mode, so a single-mode selection can
/// never hold a list and a multiple-mode selection is never a lone item.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    /// Single mode: at most one item.
    Single(Option<Item>),
    /// Multiple mode: items in the order they were picked.
    Multiple(Vec<Item>),
}

impl Selection {
    /// An empty selection for the given mode.
    pub fn empty(multiple: bool) -> Self {
        if multiple {
            Selection::Multiple(Vec::new())
        } else {
            Selection::Single(None)
        }
    }

    /// Whether this is a multiple-mode selection.
    pub fn is_multiple(&self) -> bool {
        matches!(self, Selection::Multiple(_))
    }

    /// Record a pick.
    ///
    /// Single mode replaces the current item. Multiple mode appends, even if
    /// the item is already selected.
    pub fn pick(&mut self, item: Item) {
        match self {
            Selection::Single(current) => *current = Some(item),
            Selection::Multiple(items) => items.push(item),
        }
    }

    /// Remove the first entry matching `item`. Multiple mode only.
    ///
    /// Returns `true` if an entry was removed.
    pub fn remove(&mut self, item: &Item, id_field: Option<&str>) -> bool {
        let Selection::Multiple(items) = self else {
            return false;
        };
        let key = item.identity(id_field);
        match items
            .iter()
            .position(|picked| picked.identity(id_field) == key)
        {
            Some(index) => {
                items.remove(index);
                true
            }
            None => false,
        }
    }

    /// Whether `item` is part of the selection.
    pub fn is_selected(&self, item: &Item, id_field: Option<&str>) -> bool {
        let key = item.identity(id_field);
        self.items()
            .iter()
            .any(|picked| picked.identity(id_field) == key)
    }

    /// Drop everything, keeping the mode.
    pub fn clear(&mut self) {
        *self = Selection::empty(self.is_multiple());
    }

    /// Selected items as a slice.
    pub fn items(&self) -> &[Item] {
        match self {
            Selection::Single(item) => item.as_slice(),
            Selection::Multiple(items) => items,
        }
    }

    /// The single selected item, if any.
    pub fn single(&self) -> Option<&Item> {
        match self {
            Selection::Single(item) => item.as_ref(),
            Selection::Multiple(_) => None,
        }
    }

    pub fn len(&self) -> usize {
        self.items().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }

    /// The selection as a host form value.
    ///
    /// `null` for an empty single selection, the item for a single selection,
    /// an array for multiple mode.
    pub fn to_json(&self) -> Value {
        match self {
            Selection::Single(None) => Value::Null,
            Selection::Single(Some(item)) => item.clone().into(),
            Selection::Multiple(items) => {
                Value::Array(items.iter().cloned().map(Value::from).collect())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_in_single_mode_is_noop() {
        let mut selection = Selection::Single(Some(Item::from("Red")));
        assert!(!selection.remove(&Item::from("Red"), None));
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn test_remove_takes_first_match_only() {
        let mut selection = Selection::empty(true);
        selection.pick(Item::from("Red"));
        selection.pick(Item::from("Red"));
        assert!(selection.remove(&Item::from("Red"), None));
        assert!(selection.is_selected(&Item::from("Red"), None));
        assert!(selection.remove(&Item::from("Red"), None));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_clear_keeps_mode() {
        let mut selection = Selection::Multiple(vec![Item::from("Red")]);
        selection.clear();
        assert_eq!(selection, Selection::Multiple(Vec::new()));
    }

    #[test]
    fn test_to_json() {
        assert_eq!(Selection::empty(false).to_json(), Value::Null);
        assert_eq!(
            Selection::Multiple(vec![Item::from("Red")]).to_json(),
            serde_json::json!(["Red"])
        );
    }
}
