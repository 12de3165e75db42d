//! Framework-independent core of the lsu dropdown/select widget.
//!
//! Holds the selection, search filtering and panel state of a dropdown and
//! talks to its host through the [`form::FormControl`] binding contract, a
//! change broadcast and a document-wide [`interaction::InteractionBus`].
//! Rendering and animation are left to the host.

pub mod config;
pub mod dropdown;
pub mod error;
pub mod filter;
pub mod form;
pub mod interaction;
pub mod item;
pub mod panel;
pub mod selection;

pub use dropdown::{Dropdown, DropdownId};
pub use error::{DropdownError, Result};

pub mod prelude {
    pub use crate::config::DropdownConfig;
    pub use crate::dropdown::{Dropdown, DropdownId};
    pub use crate::error::{DropdownError, Result};
    pub use crate::filter::{SearchFilter, filter_items};
    pub use crate::form::{FormControl, OnChange, OnTouched};
    pub use crate::interaction::{Interaction, InteractionBus, InteractionListener};
    pub use crate::item::{Identity, Item};
    pub use crate::panel::{Panel, PanelState};
    pub use crate::selection::Selection;
}
