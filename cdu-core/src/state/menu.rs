//! Menu cursor

/// Menu entries, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuSelection {
    /// Mirror the simulator
    #[default]
    Sim,
    /// Key matrix diagnostics
    Matrix,
    /// Power off the unit
    Shutdown,
}

impl MenuSelection {
    /// All entries in display order
    pub const ALL: [MenuSelection; 3] = [
        MenuSelection::Sim,
        MenuSelection::Matrix,
        MenuSelection::Shutdown,
    ];

    /// Entry label
    pub fn label(&self) -> &'static str {
        match self {
            MenuSelection::Sim => "SIM",
            MenuSelection::Matrix => "MATRIX",
            MenuSelection::Shutdown => "SHUTDOWN",
        }
    }

    /// Position in the menu
    pub fn index(&self) -> usize {
        match self {
            MenuSelection::Sim => 0,
            MenuSelection::Matrix => 1,
            MenuSelection::Shutdown => 2,
        }
    }

    /// Entry above this one, stopping at the top
    pub fn up(self) -> Self {
        match self {
            MenuSelection::Sim | MenuSelection::Matrix => MenuSelection::Sim,
            MenuSelection::Shutdown => MenuSelection::Matrix,
        }
    }

    /// Entry below this one, stopping at the bottom
    pub fn down(self) -> Self {
        match self {
            MenuSelection::Sim => MenuSelection::Matrix,
            MenuSelection::Matrix | MenuSelection::Shutdown => MenuSelection::Shutdown,
        }
    }
}
