//! Click handling and move-outcome orchestration
//!
//! [`GameController`] owns the board model, the selection state, and the
//! handles to the rule authority and the user-notification primitive. One
//! instance serves every cell-click entry point; there are no module-level
//! globals, so the whole flow is unit-testable without a rendered view.
//!
//! # Click protocol
//!
//! A click while nothing is selected queries the authority for the legal
//! destinations of the clicked square; a non-empty answer marks them and
//! selects the square. A click while a piece is selected either submits the
//! move (clicked square is marked) or cancels the selection locally (it is
//! not - no network call). A player's confirmed move is always fully applied,
//! including check and terminal marking, before the automated opponent's
//! reply is applied; the sequencing lives in one outcome-handling pass.
//!
//! # Reentrancy
//!
//! Handling suspends at each network round trip and animation delay. A click
//! arriving while a previous click's handling is still outstanding is
//! ignored via an in-flight flag rather than interleaved.

use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::core::error::ClientResult;
use crate::game::board::BoardModel;
use crate::game::highlight;
use crate::game::selection::SelectionState;
use crate::game::types::Coord;
use crate::networking::client::{MoveOutcome, QueryReply, RuleAuthority};

/// Warning surfaced when the authority rejects a query as off-turn
pub const WRONG_TURN_NOTICE: &str = "Wrong turn! Please choose a valid piece.";

/// Fallback notification text when a terminal outcome carries no message
const GAME_OVER_NOTICE: &str = "Game over";

/// Blocking message primitive standing in for the document view's alert box
pub trait Notifier {
    fn alert(&mut self, message: &str);
}

/// Fixed animation delays between a confirmed outcome and its rendering
#[derive(Debug, Clone, Copy)]
pub struct Timings {
    /// Pause letting the terminal highlight render before the blocking
    /// notification
    pub terminal_notice: Duration,
    /// Pause letting the player perceive a check before the opponent's reply
    /// is animated
    pub reply_check_pause: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            terminal_notice: Duration::from_millis(50),
            reply_check_pause: Duration::from_millis(500),
        }
    }
}

impl Timings {
    /// Zeroed delays, for tests
    pub fn immediate() -> Self {
        Self {
            terminal_notice: Duration::ZERO,
            reply_check_pause: Duration::ZERO,
        }
    }
}

/// What a cell click amounted to once handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Ignored: a previous interaction is still in flight
    Busy,
    /// Query rejected: the clicked piece's side is not on turn
    WrongTurn,
    /// Nothing selectable on the clicked square
    NoSelection,
    /// A piece is now selected and its destinations are marked
    Selected,
    /// Selection cancelled locally, without a network call
    Cancelled,
    /// A move was applied (possibly followed by the opponent's reply)
    Moved,
    /// A move ended the game; the board has been reset
    GameEnded,
}

/// The move-interaction controller
pub struct GameController<A, N> {
    authority: A,
    notifier: N,
    board: BoardModel,
    selection: SelectionState,
    timings: Timings,
    busy: bool,
}

impl<A: RuleAuthority, N: Notifier> GameController<A, N> {
    pub fn new(authority: A, notifier: N) -> Self {
        Self::with_timings(authority, notifier, Timings::default())
    }

    pub fn with_timings(authority: A, notifier: N, timings: Timings) -> Self {
        Self {
            authority,
            notifier,
            board: BoardModel::new(),
            selection: SelectionState::Idle,
            timings,
            busy: false,
        }
    }

    pub fn board(&self) -> &BoardModel {
        &self.board
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn authority(&self) -> &A {
        &self.authority
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Rebuild the board from the initial layout and return to `Idle`
    pub fn reset(&mut self) {
        self.board = BoardModel::new();
        self.selection.clear();
        info!("[GAME] Board rebuilt from initial layout");
    }

    /// Handle one cell click
    ///
    /// On a network failure nothing is mutated: the selection and all
    /// markers are left exactly as they were, and the error is returned
    /// after logging. No retry is attempted.
    pub async fn handle_cell_click(&mut self, coord: Coord) -> ClientResult<ClickOutcome> {
        if self.busy {
            debug!("[INPUT] Click at {} ignored: interaction in flight", coord);
            return Ok(ClickOutcome::Busy);
        }
        self.busy = true;
        let result = self.dispatch_click(coord).await;
        self.busy = false;

        if let Err(e) = &result {
            warn!("[INPUT] Click at {} failed: {}", coord, e);
        }
        result
    }

    async fn dispatch_click(&mut self, coord: Coord) -> ClientResult<ClickOutcome> {
        match self.selection.clone() {
            SelectionState::Idle => self.select_piece(coord).await,
            SelectionState::PieceSelected {
                origin,
                legal_destinations,
            } => {
                if legal_destinations.contains(&coord) {
                    self.submit_move(origin, coord).await
                } else {
                    // Local cancel gesture: clear the markers, no request.
                    highlight::clear_legal_destinations(&mut self.board);
                    self.selection.clear();
                    debug!("[INPUT] {} outside the marked set: selection cancelled", coord);
                    Ok(ClickOutcome::Cancelled)
                }
            }
        }
    }

    /// First phase: ask the authority what the clicked square can do
    async fn select_piece(&mut self, coord: Coord) -> ClientResult<ClickOutcome> {
        // Stale markers never survive into a new cycle.
        highlight::clear_legal_destinations(&mut self.board);

        match self.authority.query_legal_moves(coord).await? {
            QueryReply::WrongTurn => {
                debug!("[INPUT] Query for {} rejected: wrong turn", coord);
                self.notifier.alert(WRONG_TURN_NOTICE);
                Ok(ClickOutcome::WrongTurn)
            }
            QueryReply::Moves(moves) if moves.is_empty() => {
                debug!("[INPUT] No legal moves from {}; nothing selected", coord);
                Ok(ClickOutcome::NoSelection)
            }
            QueryReply::Moves(moves) => {
                highlight::mark_legal_destinations(&mut self.board, &moves);
                debug!("[INPUT] Selected {} with {} destinations", coord, moves.len());
                self.selection = SelectionState::PieceSelected {
                    origin: coord,
                    legal_destinations: moves,
                };
                Ok(ClickOutcome::Selected)
            }
        }
    }

    /// Second phase: submit the move and apply the confirmed outcome
    async fn submit_move(&mut self, origin: Coord, target: Coord) -> ClientResult<ClickOutcome> {
        let outcome = self.authority.submit_move(origin, target).await?;

        highlight::clear_legal_destinations(&mut self.board);
        self.selection.clear();

        Ok(self.apply_move_outcome(origin, target, outcome).await)
    }

    /// Translate one confirmed move outcome into board mutations, in order:
    /// stale check cleared, fresh check marked, player move applied, then
    /// either the terminal handling or the automated opponent's reply.
    async fn apply_move_outcome(
        &mut self,
        from: Coord,
        to: Coord,
        outcome: MoveOutcome,
    ) -> ClickOutcome {
        highlight::clear_stale_check(&mut self.board);

        let king = outcome.king_position.and_then(|(r, c)| Coord::new(r, c));
        if outcome.in_check {
            match king {
                Some(king) => highlight::mark_check(&mut self.board, king),
                None => warn!("[GAME] in_check outcome without a usable king position"),
            }
        }

        self.board.move_piece(from, to);
        info!("[GAME] Moved {} -> {}", from, to);

        if outcome.game_over {
            let message = outcome.message.as_deref().unwrap_or(GAME_OVER_NOTICE);
            self.finish_game(king, message).await;
            return ClickOutcome::GameEnded;
        }

        if let Some(ai_move) = outcome.ai_move {
            let ai_king = outcome.ai_king_position.and_then(|(r, c)| Coord::new(r, c));

            if outcome.ai_in_check {
                match ai_king {
                    Some(king) => {
                        highlight::mark_check(&mut self.board, king);
                        // Visible cause and effect: the player sees the check
                        // before the reply lands.
                        sleep(self.timings.reply_check_pause).await;
                    }
                    None => warn!("[GAME] ai_in_check outcome without a usable king position"),
                }
            }

            match (ai_move.old_coor.to_coord(), ai_move.new_coor.to_coord()) {
                (Some(ai_from), Some(ai_to)) => {
                    self.board.move_piece(ai_from, ai_to);
                    info!("[GAME] Opponent moved {} -> {}", ai_from, ai_to);
                }
                _ => warn!(
                    "[GAME] Opponent move with off-board coordinates ignored: {:?}",
                    ai_move
                ),
            }

            highlight::clear_stale_check(&mut self.board);

            if outcome.ai_game_over {
                let message = outcome.result_message.as_deref().unwrap_or(GAME_OVER_NOTICE);
                self.finish_game(ai_king, message).await;
                return ClickOutcome::GameEnded;
            }
        }

        ClickOutcome::Moved
    }

    /// Terminal outcome: highlight the king, notify, rebuild the board
    async fn finish_game(&mut self, king: Option<Coord>, message: &str) {
        if let Some(king) = king {
            highlight::mark_terminal(&mut self.board, king);
        }
        // Let the terminal highlight render before the blocking notification.
        sleep(self.timings.terminal_notice).await;
        self.notifier.alert(message);
        self.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use crate::core::error::ClientResult;

    /// Authority that fails the test if any operation is reached
    struct UnreachableAuthority;

    #[async_trait]
    impl RuleAuthority for UnreachableAuthority {
        async fn query_legal_moves(&self, _coord: Coord) -> ClientResult<QueryReply> {
            panic!("authority must not be called");
        }

        async fn submit_move(&self, _from: Coord, _to: Coord) -> ClientResult<MoveOutcome> {
            panic!("authority must not be called");
        }

        async fn reset_game(&self) -> ClientResult<String> {
            panic!("authority must not be called");
        }

        async fn change_mode(&self) -> ClientResult<String> {
            panic!("authority must not be called");
        }
    }

    struct SilentNotifier;

    impl Notifier for SilentNotifier {
        fn alert(&mut self, _message: &str) {}
    }

    #[tokio::test]
    async fn test_click_while_busy_is_ignored() {
        let mut controller = GameController::with_timings(
            UnreachableAuthority,
            SilentNotifier,
            Timings::immediate(),
        );
        controller.busy = true;

        let coord = Coord::new(3, 3).unwrap();
        let before = controller.board.clone();

        let outcome = controller.handle_cell_click(coord).await.unwrap();

        assert_eq!(outcome, ClickOutcome::Busy);
        assert_eq!(controller.board, before, "busy click must not touch the board");
        assert_eq!(*controller.selection(), SelectionState::Idle);
    }
}
