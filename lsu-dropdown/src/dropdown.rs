//! Dropdown widget core.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard, Weak};

use serde_json::Value;
use tokio::sync::broadcast;

use crate::config::DropdownConfig;
use crate::filter::SearchFilter;
use crate::form::{FormControl, OnChange, OnTouched};
use crate::interaction::{Interaction, InteractionBus, InteractionListener};
use crate::item::{Identity, Item};
use crate::panel::{Panel, PanelState};
use crate::selection::Selection;

const CHANGE_CHANNEL_CAPACITY: usize = 64;

/// Unique identifier for a Dropdown instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DropdownId(usize);

impl DropdownId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for DropdownId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "lsu_dropdown_{}", self.0)
    }
}

/// Mutable state of a dropdown.
#[derive(Debug)]
struct DropdownState {
    config: DropdownConfig,
    selection: Selection,
    panel: Panel,
    /// Present only when search is enabled
    search: Option<SearchFilter>,
}

impl DropdownState {
    fn new(config: DropdownConfig) -> Self {
        let selection = Selection::empty(config.multiple);
        let search = config.search.then(|| SearchFilter::new(&config.data));
        Self {
            config,
            selection,
            panel: Panel::default(),
            search,
        }
    }

    fn visible(&self) -> &[Item] {
        match &self.search {
            Some(search) => search.visible(),
            None => &self.config.data,
        }
    }

    fn clear_search(&mut self) {
        if let Some(search) = self.search.as_mut() {
            search.reset();
        }
    }
}

#[derive(Default)]
struct Callbacks {
    on_change: Option<OnChange>,
    on_touched: Option<OnTouched>,
}

struct Shared {
    id: DropdownId,
    state: RwLock<DropdownState>,
    callbacks: RwLock<Callbacks>,
    changes: broadcast::Sender<Selection>,
    dirty: AtomicBool,
}

impl Shared {
    fn read(&self) -> RwLockReadGuard<'_, DropdownState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, DropdownState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn callbacks(&self) -> RwLockReadGuard<'_, Callbacks> {
        self.callbacks.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn mark_dirty(&self) {
        self.dirty.store(true, Ordering::SeqCst);
    }

    /// Close the panel, reporting touch. Returns `true` if it was open.
    fn close_panel(&self) -> bool {
        let closed = self.write().panel.close();
        if closed {
            self.mark_dirty();
            self.touched();
        }
        closed
    }

    fn touched(&self) {
        let callback = self.callbacks().on_touched.clone();
        if let Some(callback) = callback {
            callback();
        }
    }

    /// Publish a committed selection to the host and to subscribers.
    fn commit(&self, selection: &Selection) {
        self.mark_dirty();
        let callback = self.callbacks().on_change.clone();
        if let Some(callback) = callback {
            callback(selection);
        }
        // Err only means nobody is subscribed.
        let _ = self.changes.send(selection.clone());
    }
}

impl InteractionListener for Shared {
    fn on_interaction(&self, interaction: &Interaction) {
        if interaction.is_from(self.id) {
            return;
        }
        if self.close_panel() {
            log::debug!("Dropdown {} closed by outside interaction", self.id);
        }
    }
}

/// A dropdown select with single or multiple selection and optional search.
///
/// `Dropdown` is a cheap-to-clone handle; clones share the same state. It
/// owns the selection, the panel state and (when searching) a private copy of
/// the source list. Every committed change is reported to the host callback
/// registered through [`FormControl`] and broadcast to [`Dropdown::subscribe`]
/// receivers.
///
/// # Example
///
/// ```ignore
/// let bus = InteractionBus::new();
/// let colors = Dropdown::new(DropdownConfig::new().data(["Green", "Red", "Blue"]));
/// colors.listen(&bus);
///
/// let mut click = Interaction::new();
/// colors.toggle(Some(&mut click));
/// bus.publish(&click); // stays open, the click was its own
///
/// let mut click = Interaction::new();
/// colors.item_click(Item::from("Red"), &mut click);
/// assert!(!colors.is_open());
/// ```
#[derive(Clone)]
pub struct Dropdown {
    shared: Arc<Shared>,
}

impl Dropdown {
    /// Create a dropdown from its configuration.
    pub fn new(config: DropdownConfig) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        let id = DropdownId::new();
        log::debug!(
            "Dropdown::new id={} items={} multiple={} search={}",
            id,
            config.data.len(),
            config.multiple,
            config.search
        );
        Self {
            shared: Arc::new(Shared {
                id,
                state: RwLock::new(DropdownState::new(config)),
                callbacks: RwLock::new(Callbacks::default()),
                changes,
                dirty: AtomicBool::new(false),
            }),
        }
    }

    /// Get the unique ID for this dropdown.
    pub fn id(&self) -> DropdownId {
        self.shared.id
    }

    /// Get the ID as a string (for element binding).
    pub fn id_string(&self) -> String {
        self.shared.id.to_string()
    }

    /// Start receiving document-wide interactions from `bus`.
    pub fn listen(&self, bus: &InteractionBus) {
        let listener: Weak<Shared> = Arc::downgrade(&self.shared);
        bus.subscribe(listener);
    }

    /// Receive every committed selection from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<Selection> {
        self.shared.changes.subscribe()
    }

    pub fn config(&self) -> DropdownConfig {
        self.shared.read().config.clone()
    }

    // -------------------------------------------------------------------------
    // Data
    // -------------------------------------------------------------------------

    /// Replace the source list.
    ///
    /// The search copy is refreshed and the current query re-applied. The
    /// selection is kept as is.
    pub fn set_data(&self, data: Vec<Item>) {
        let mut guard = self.shared.write();
        let state = &mut *guard;
        if let Some(search) = state.search.as_mut() {
            search.replace_master(&data, &state.config.text_field);
        }
        state.config.data = data;
        self.shared.mark_dirty();
    }

    /// The full source list.
    pub fn source(&self) -> Vec<Item> {
        self.shared.read().config.data.clone()
    }

    /// The items currently shown in the panel.
    pub fn data(&self) -> Vec<Item> {
        self.shared.read().visible().to_vec()
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    pub fn selection(&self) -> Selection {
        self.shared.read().selection.clone()
    }

    /// Check if `item` is selected.
    pub fn is_selected(&self, item: &Item) -> bool {
        let state = self.shared.read();
        state
            .selection
            .is_selected(item, state.config.identity_field())
    }

    /// Commit a pick.
    ///
    /// Single mode replaces the selection and closes the panel. Multiple mode
    /// appends the item and closes the panel once as many items are selected
    /// as the source list holds.
    pub fn pick(&self, item: Item) {
        let (selection, closed) = {
            let mut guard = self.shared.write();
            let state = &mut *guard;
            if state.config.disabled {
                log::debug!("Dropdown::pick ignored, {} is disabled", self.shared.id);
                return;
            }
            state.selection.pick(item);
            let close = match &state.selection {
                Selection::Single(_) => true,
                Selection::Multiple(items) => items.len() == state.config.data.len(),
            };
            let closed = close && state.panel.close();
            state.clear_search();
            (state.selection.clone(), closed)
        };
        log::debug!(
            "Dropdown::pick id={} selected={} closed={}",
            self.shared.id,
            selection.len(),
            closed
        );
        if closed {
            self.shared.touched();
        }
        self.shared.commit(&selection);
    }

    /// Remove the first selected entry matching `item`. Multiple mode only.
    ///
    /// Returns `false`, without notifying anyone, when nothing matched.
    pub fn remove(&self, item: &Item) -> bool {
        let selection = {
            let mut guard = self.shared.write();
            let state = &mut *guard;
            if state.config.disabled {
                return false;
            }
            if !state
                .selection
                .remove(item, state.config.identity_field())
            {
                log::trace!("Dropdown::remove id={} no match", self.shared.id);
                return false;
            }
            state.clear_search();
            state.selection.clone()
        };
        log::debug!(
            "Dropdown::remove id={} selected={}",
            self.shared.id,
            selection.len()
        );
        self.shared.commit(&selection);
        true
    }

    /// Handle a click on an item of the panel.
    ///
    /// The click is consumed so the document-wide listeners don't see it.
    pub fn item_click(&self, item: Item, interaction: &mut Interaction) {
        interaction.stop_propagation();
        self.pick(item);
    }

    /// Handle a click on the delete mark of a selected item.
    pub fn remove_item(&self, item: &Item, interaction: &mut Interaction) {
        interaction.stop_propagation();
        self.remove(item);
    }

    // -------------------------------------------------------------------------
    // Panel
    // -------------------------------------------------------------------------

    pub fn is_open(&self) -> bool {
        self.shared.read().panel.is_open()
    }

    /// Current transition target of the panel.
    pub fn panel_state(&self) -> PanelState {
        self.shared.read().panel.state()
    }

    /// Flip the panel and return the new transition target.
    ///
    /// When the panel opens, `interaction` is tagged with this dropdown's id
    /// so publishing it does not close the panel again.
    pub fn toggle(&self, interaction: Option<&mut Interaction>) -> PanelState {
        let target = {
            let mut state = self.shared.write();
            if state.config.disabled {
                log::debug!("Dropdown::toggle ignored, {} is disabled", self.shared.id);
                return state.panel.state();
            }
            state.panel.toggle()
        };
        self.shared.mark_dirty();
        log::debug!("Dropdown::toggle id={} state={}", self.shared.id, target);

        match target {
            PanelState::Active => {
                if let Some(interaction) = interaction {
                    interaction.tag(self.shared.id);
                }
            }
            PanelState::Inactive => self.shared.touched(),
        }
        target
    }

    /// Close the panel if `interaction` did not originate from this dropdown.
    pub fn on_document_click(&self, interaction: &Interaction) {
        self.shared.on_interaction(interaction);
    }

    // -------------------------------------------------------------------------
    // Search
    // -------------------------------------------------------------------------

    /// Current search text.
    pub fn search_text(&self) -> String {
        self.shared
            .read()
            .search
            .as_ref()
            .map(|search| search.query().to_string())
            .unwrap_or_default()
    }

    /// Narrow the visible list to items matching `query`.
    ///
    /// Ignored when search is disabled. Returns the visible list.
    pub fn filter_search(&self, query: &str) -> Vec<Item> {
        let mut guard = self.shared.write();
        let state = &mut *guard;
        let Some(search) = state.search.as_mut() else {
            log::debug!("Dropdown::filter_search ignored, search disabled");
            return state.config.data.clone();
        };
        let visible = search.apply(query, &state.config.text_field).to_vec();
        self.shared.mark_dirty();
        visible
    }

    // -------------------------------------------------------------------------
    // Display
    // -------------------------------------------------------------------------

    /// Text for the closed dropdown: selected label(s) or the placeholder.
    pub fn display_text(&self) -> String {
        let state = self.shared.read();
        let text_field = state.config.text_field.as_str();
        match &state.selection {
            Selection::Single(Some(item)) => item.label(text_field).into_owned(),
            Selection::Multiple(items) if !items.is_empty() => items
                .iter()
                .map(|item| item.label(text_field))
                .collect::<Vec<_>>()
                .join(", "),
            _ => state.config.placeholder.clone(),
        }
    }

    // -------------------------------------------------------------------------
    // Dirty tracking
    // -------------------------------------------------------------------------

    /// Check if the dropdown state has changed.
    pub fn is_dirty(&self) -> bool {
        self.shared.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag.
    pub fn clear_dirty(&self) {
        self.shared.dirty.store(false, Ordering::SeqCst);
    }
}

impl FormControl for Dropdown {
    fn write_value(&self, value: &Value) {
        let mut guard = self.shared.write();
        let state = &mut *guard;
        let id_field = state.config.identity_field();
        state.selection = if state.config.multiple {
            Selection::Multiple(match_many(&state.config.data, value, id_field))
        } else {
            Selection::Single(match_one(&state.config.data, value, id_field))
        };
        log::debug!(
            "Dropdown::write_value id={} selected={}",
            self.shared.id,
            state.selection.len()
        );
        self.shared.mark_dirty();
    }

    fn register_on_change(&self, callback: OnChange) {
        self.shared
            .callbacks
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .on_change = Some(callback);
    }

    fn register_on_touched(&self, callback: OnTouched) {
        self.shared
            .callbacks
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .on_touched = Some(callback);
    }

    fn value(&self) -> Value {
        self.shared.read().selection.to_json()
    }
}

impl std::fmt::Debug for Dropdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dropdown")
            .field("id", &self.shared.id)
            .field("state", &*self.shared.read())
            .finish()
    }
}

/// Find the source item a single external value refers to.
///
/// Records are matched by identity; anything else only by raw equality with
/// a plain item.
fn match_one(source: &[Item], value: &Value, id_field: Option<&str>) -> Option<Item> {
    let found = match value {
        Value::Null => return None,
        Value::Object(_) => {
            let key = Identity::from_value(value, id_field)?;
            source.iter().find(|item| item.identity(id_field) == key)
        }
        Value::String(text) => source
            .iter()
            .find(|item| matches!(item, Item::Primitive(plain) if plain == text)),
        _ => None,
    }
    .cloned();
    if found.is_none() {
        log::debug!("write_value: no source item matches {value}");
    }
    found
}

/// Source items referred to by a list of external values, in source order.
fn match_many(source: &[Item], value: &Value, id_field: Option<&str>) -> Vec<Item> {
    let Value::Array(entries) = value else {
        if !value.is_null() {
            log::debug!("write_value: expected a list, got {value}");
        }
        return Vec::new();
    };
    let keys: Vec<Identity<'_>> = entries
        .iter()
        .filter_map(|entry| Identity::from_value(entry, id_field))
        .collect();
    let matched: Vec<Item> = source
        .iter()
        .filter(|item| keys.contains(&item.identity(id_field)))
        .cloned()
        .collect();
    if matched.len() < keys.len() {
        log::debug!(
            "write_value: {} of {} values matched a source item",
            matched.len(),
            keys.len()
        );
    }
    matched
}
