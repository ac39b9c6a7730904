//! Selection state for the two-phase click protocol

use crate::game::types::Coord;

/// Current selection: nothing, or an origin square together with the exact
/// destination set the authority last returned for it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SelectionState {
    #[default]
    Idle,
    PieceSelected {
        origin: Coord,
        legal_destinations: Vec<Coord>,
    },
}

impl SelectionState {
    pub fn is_selected(&self) -> bool {
        matches!(self, SelectionState::PieceSelected { .. })
    }

    pub fn clear(&mut self) {
        *self = SelectionState::Idle;
    }

    /// Whether `coord` is a legal destination of the current selection
    pub fn is_legal_destination(&self, coord: Coord) -> bool {
        match self {
            SelectionState::PieceSelected {
                legal_destinations, ..
            } => legal_destinations.contains(&coord),
            SelectionState::Idle => false,
        }
    }
}
