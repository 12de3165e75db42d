//! Open/closed state of the dropdown panel.

/// Presentation target of the panel transition.
///
/// Renderers animate between the two states; timing is theirs to choose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelState {
    /// Panel collapsed (zero height, transparent).
    #[default]
    Inactive,
    /// Panel expanded.
    Active,
}

impl PanelState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PanelState::Inactive => "inactive",
            PanelState::Active => "active",
        }
    }
}

impl std::fmt::Display for PanelState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Two-state panel: closed or open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Panel {
    active: bool,
}

impl Panel {
    /// Check if the panel is open.
    pub fn is_open(&self) -> bool {
        self.active
    }

    /// Transition target for the current state.
    pub fn state(&self) -> PanelState {
        if self.active {
            PanelState::Active
        } else {
            PanelState::Inactive
        }
    }

    /// Flip the panel and return the new transition target.
    pub fn toggle(&mut self) -> PanelState {
        self.active = !self.active;
        self.state()
    }

    /// Open the panel. Returns `true` if it was closed.
    pub fn open(&mut self) -> bool {
        !std::mem::replace(&mut self.active, true)
    }

    /// Close the panel. Returns `true` if it was open.
    pub fn close(&mut self) -> bool {
        std::mem::replace(&mut self.active, false)
    }
}
