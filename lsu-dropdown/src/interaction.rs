//! Document-wide interaction stream used for click-outside detection.
//!
//! Every live dropdown listens to one shared [`InteractionBus`]. A dropdown
//! that opens tags the interaction that opened it with its own id; when the
//! host then publishes that interaction, every other open dropdown closes
//! and the tagging dropdown stays open. Nothing owns global input capture.

use std::sync::{Arc, OnceLock, PoisonError, RwLock, Weak};

use crate::dropdown::DropdownId;

/// A single user interaction as seen by the document-wide listeners.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Interaction {
    origin: Option<DropdownId>,
    propagation_stopped: bool,
}

impl Interaction {
    pub fn new() -> Self {
        Self::default()
    }

    /// The dropdown that claimed this interaction, if any.
    pub fn origin(&self) -> Option<DropdownId> {
        self.origin
    }

    /// Claim this interaction for a dropdown.
    pub fn tag(&mut self, id: DropdownId) {
        self.origin = Some(id);
    }

    /// Whether `id` claimed this interaction.
    pub fn is_from(&self, id: DropdownId) -> bool {
        self.origin == Some(id)
    }

    /// Keep this interaction from reaching the document-wide listeners.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

/// Receiver of document-wide interactions.
pub trait InteractionListener: Send + Sync {
    fn on_interaction(&self, interaction: &Interaction);
}

/// Observer list shared by all dropdowns of a document.
///
/// Listeners are held weakly; a dropdown that is dropped simply stops
/// receiving interactions and is pruned on the next publish.
#[derive(Clone, Default)]
pub struct InteractionBus {
    listeners: Arc<RwLock<Vec<Weak<dyn InteractionListener>>>>,
}

impl InteractionBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide bus.
    pub fn global() -> &'static InteractionBus {
        static GLOBAL: OnceLock<InteractionBus> = OnceLock::new();
        GLOBAL.get_or_init(InteractionBus::new)
    }

    /// Add a listener.
    pub fn subscribe(&self, listener: Weak<dyn InteractionListener>) {
        self.listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(listener);
    }

    /// Deliver an interaction to every live listener.
    ///
    /// Interactions whose propagation was stopped are not delivered. Returns
    /// the number of listeners reached.
    pub fn publish(&self, interaction: &Interaction) -> usize {
        if interaction.is_propagation_stopped() {
            log::trace!("InteractionBus::publish skipped stopped interaction");
            return 0;
        }

        // Listeners run without the lock held so they may subscribe others.
        let live: Vec<Arc<dyn InteractionListener>> = {
            let mut listeners = self
                .listeners
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            listeners.retain(|listener| listener.strong_count() > 0);
            listeners.iter().filter_map(Weak::upgrade).collect()
        };

        for listener in &live {
            listener.on_interaction(interaction);
        }
        live.len()
    }

    /// Number of listeners still alive.
    pub fn listener_count(&self) -> usize {
        self.listeners
            .read()
            .map(|guard| guard.iter().filter(|l| l.strong_count() > 0).count())
            .unwrap_or(0)
    }
}

impl std::fmt::Debug for InteractionBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InteractionBus")
            .field("listeners", &self.listener_count())
            .finish()
    }
}
