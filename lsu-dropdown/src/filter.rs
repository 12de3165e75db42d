//! Search filtering over a dropdown's source list.

use crate::item::Item;

/// Narrow `master` to the items whose text contains `query`.
///
/// Matching is a case-insensitive substring test against the item itself
/// (plain items) or its `text_field` (structured items). Master order is
/// kept. Items without textual content never match. An empty query yields a
/// fresh copy of the whole list.
///
/// # Example
///
/// ```ignore
/// let colors: Vec<Item> = ["Green", "Red", "Blue"].map(Item::from).into();
/// let visible = filter_items(&colors, "re", "text");
/// // Returns: Green, Red
/// ```
pub fn filter_items(master: &[Item], query: &str, text_field: &str) -> Vec<Item> {
    if query.is_empty() {
        return master.to_vec();
    }

    // Whole scalar sequences are compared, so decomposed accents still match.
    let needle = query.to_lowercase();
    master
        .iter()
        .filter(|item| match item.search_text(text_field) {
            Some(text) => text.to_lowercase().contains(&needle),
            None => {
                log::trace!("filter_items: skipping item without text in '{text_field}'");
                false
            }
        })
        .cloned()
        .collect()
}

/// Search state of a dropdown: the master list, the active query and the
/// list currently shown.
///
/// The master list is a copy taken when search is enabled; the caller's
/// source list is never touched. The visible list always equals
/// `filter_items(master, query, text_field)`.
#[derive(Debug, Clone, Default)]
pub struct SearchFilter {
    master: Vec<Item>,
    query: String,
    visible: Vec<Item>,
}

impl SearchFilter {
    /// Start searching over a copy of `source`.
    pub fn new(source: &[Item]) -> Self {
        Self {
            master: source.to_vec(),
            query: String::new(),
            visible: source.to_vec(),
        }
    }

    pub fn master(&self) -> &[Item] {
        &self.master
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn visible(&self) -> &[Item] {
        &self.visible
    }

    /// Recompute the visible list for `query`.
    pub fn apply(&mut self, query: &str, text_field: &str) -> &[Item] {
        self.query = query.to_string();
        self.visible = filter_items(&self.master, query, text_field);
        log::debug!(
            "SearchFilter::apply query={:?} visible={}/{}",
            self.query,
            self.visible.len(),
            self.master.len()
        );
        &self.visible
    }

    /// Clear the query and show the whole master list again.
    pub fn reset(&mut self) {
        self.query.clear();
        self.visible = self.master.clone();
    }

    /// Replace the master list, keeping the current query.
    pub fn replace_master(&mut self, source: &[Item], text_field: &str) {
        self.master = source.to_vec();
        self.visible = filter_items(&self.master, &self.query, text_field);
    }
}
