//! Highlight mutation layer over the board's cell flags
//!
//! Pure flag writes on [`BoardModel`]; no network or state-machine knowledge.
//! Clearing a check or terminal marker needs no color bookkeeping - the
//! board recomputes a cell's base color from its coordinate parity.

use tracing::trace;

use crate::game::board::BoardModel;
use crate::game::types::Coord;

/// Flag every coordinate in `destinations` as a legal target
pub fn mark_legal_destinations(board: &mut BoardModel, destinations: &[Coord]) {
    for &coord in destinations {
        board.cell_mut(coord).legal_marked = true;
    }
    trace!("[RENDER] Marked {} legal destinations", destinations.len());
}

/// Remove every legal-destination marker
pub fn clear_legal_destinations(board: &mut BoardModel) {
    for coord in Coord::all() {
        board.cell_mut(coord).legal_marked = false;
    }
}

/// Flag the cell at `coord` as a king in check
pub fn mark_check(board: &mut BoardModel, coord: Coord) {
    board.cell_mut(coord).check_marked = true;
    trace!("[RENDER] Check marker on {}", coord);
}

/// Remove the check flag from `coord`; its rendered color falls back to the
/// parity-derived base color
pub fn clear_check(board: &mut BoardModel, coord: Coord) {
    board.cell_mut(coord).check_marked = false;
    trace!("[RENDER] Check marker cleared from {}", coord);
}

/// Remove whichever check marker is currently on the board, if any, and
/// return its coordinate
pub fn clear_stale_check(board: &mut BoardModel) -> Option<Coord> {
    let stale = board.checked_cell()?;
    clear_check(board, stale);
    Some(stale)
}

/// Flag the cell at `coord` as the king of a finished game
pub fn mark_terminal(board: &mut BoardModel, coord: Coord) {
    board.cell_mut(coord).terminal_marked = true;
    trace!("[RENDER] Terminal marker on {}", coord);
}
