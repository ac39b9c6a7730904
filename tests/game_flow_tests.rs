//! Game Flow Integration Tests
//!
//! Tests for full click-to-move flows against a scripted authority:
//! - Two-phase selection (query, then submit or cancel)
//! - Check and terminal highlight handling
//! - The automated opponent's reply sequence
//! - Network-failure behavior

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use minichess_client::core::error::{ClientError, ClientResult};
use minichess_client::core::{ModePreference, SessionStore};
use minichess_client::game::{
    BoardModel, CellColor, ClickOutcome, Coord, GameController, ModeController, Notifier,
    PieceColor, PieceKind, PieceTag, SelectionState, Timings,
};
use minichess_client::networking::client::{
    AiMove, MoveOutcome, QueryReply, RuleAuthority, WireCoord,
};

fn coord(row: u8, col: u8) -> Coord {
    Coord::new(row, col).expect("test coordinate out of bounds")
}

fn wire(row: u8, col: u8) -> WireCoord {
    WireCoord { row, col }
}

/// Authority whose replies are queued up front; records every call
#[derive(Default)]
struct ScriptedAuthority {
    query_replies: Mutex<VecDeque<ClientResult<QueryReply>>>,
    move_replies: Mutex<VecDeque<ClientResult<MoveOutcome>>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedAuthority {
    fn with_query(self, reply: ClientResult<QueryReply>) -> Self {
        self.query_replies.lock().unwrap().push_back(reply);
        self
    }

    fn with_move(self, reply: ClientResult<MoveOutcome>) -> Self {
        self.move_replies.lock().unwrap().push_back(reply);
        self
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl RuleAuthority for ScriptedAuthority {
    async fn query_legal_moves(&self, coord: Coord) -> ClientResult<QueryReply> {
        self.calls.lock().unwrap().push(format!("query {}", coord));
        self.query_replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("unscripted legal-move query")
    }

    async fn submit_move(&self, from: Coord, to: Coord) -> ClientResult<MoveOutcome> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("move {} -> {}", from, to));
        self.move_replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("unscripted move submission")
    }

    async fn reset_game(&self) -> ClientResult<String> {
        self.calls.lock().unwrap().push("reset".to_string());
        Ok("reset".to_string())
    }

    async fn change_mode(&self) -> ClientResult<String> {
        self.calls.lock().unwrap().push("change_mode".to_string());
        Ok("changed".to_string())
    }
}

/// Notifier that records every blocking message
#[derive(Default)]
struct RecordingNotifier {
    messages: Vec<String>,
}

impl Notifier for RecordingNotifier {
    fn alert(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }
}

fn controller(
    authority: ScriptedAuthority,
) -> GameController<ScriptedAuthority, RecordingNotifier> {
    GameController::with_timings(authority, RecordingNotifier::default(), Timings::immediate())
}

fn network_failure() -> ClientError {
    ClientError::UnexpectedStatus { status: 500 }
}

// ============================================================================
// Selection Phase
// ============================================================================

#[tokio::test]
async fn test_wrong_turn_warns_and_stays_idle() {
    let authority = ScriptedAuthority::default().with_query(Ok(QueryReply::WrongTurn));
    let mut game = controller(authority);

    let outcome = game.handle_cell_click(coord(0, 0)).await.unwrap();

    assert_eq!(outcome, ClickOutcome::WrongTurn);
    assert_eq!(*game.selection(), SelectionState::Idle);
    assert_eq!(
        game.notifier().messages,
        vec!["Wrong turn! Please choose a valid piece.".to_string()]
    );
    assert_eq!(*game.board(), BoardModel::new(), "board must be untouched");
}

#[tokio::test]
async fn test_piece_without_moves_selects_nothing() {
    let authority = ScriptedAuthority::default().with_query(Ok(QueryReply::Moves(vec![])));
    let mut game = controller(authority);

    let outcome = game.handle_cell_click(coord(4, 0)).await.unwrap();

    assert_eq!(outcome, ClickOutcome::NoSelection);
    assert_eq!(*game.selection(), SelectionState::Idle);
    assert!(game.board().legal_marked_cells().is_empty());
}

#[tokio::test]
async fn test_selection_marks_exactly_the_returned_set() {
    let destinations = vec![coord(2, 3), coord(2, 2)];
    let authority =
        ScriptedAuthority::default().with_query(Ok(QueryReply::Moves(destinations.clone())));
    let mut game = controller(authority);

    let outcome = game.handle_cell_click(coord(3, 3)).await.unwrap();

    assert_eq!(outcome, ClickOutcome::Selected);
    assert_eq!(
        *game.selection(),
        SelectionState::PieceSelected {
            origin: coord(3, 3),
            legal_destinations: destinations,
        }
    );
    assert_eq!(
        game.board().legal_marked_cells(),
        vec![coord(2, 2), coord(2, 3)],
        "marked cells must equal the authority's destination set"
    );
}

#[tokio::test]
async fn test_cancel_click_clears_markers_without_network() {
    let authority =
        ScriptedAuthority::default().with_query(Ok(QueryReply::Moves(vec![coord(2, 3)])));
    let mut game = controller(authority);

    game.handle_cell_click(coord(3, 3)).await.unwrap();
    let outcome = game.handle_cell_click(coord(0, 0)).await.unwrap();

    assert_eq!(outcome, ClickOutcome::Cancelled);
    assert_eq!(*game.selection(), SelectionState::Idle);
    assert!(game.board().legal_marked_cells().is_empty());
    assert_eq!(
        game.authority().calls(),
        vec!["query (3, 3)".to_string()],
        "the cancel click must not reach the authority"
    );
}

// ============================================================================
// Move Submission
// ============================================================================

#[tokio::test]
async fn test_plain_move_round_trip() {
    let authority = ScriptedAuthority::default()
        .with_query(Ok(QueryReply::Moves(vec![coord(2, 3)])))
        .with_move(Ok(MoveOutcome::default()));
    let mut game = controller(authority);

    game.handle_cell_click(coord(3, 3)).await.unwrap();
    let outcome = game.handle_cell_click(coord(2, 3)).await.unwrap();

    assert_eq!(outcome, ClickOutcome::Moved);
    assert_eq!(*game.selection(), SelectionState::Idle);
    assert!(game.board().piece_at(coord(3, 3)).is_none());
    assert_eq!(
        game.board().piece_at(coord(2, 3)),
        Some(PieceTag::new(PieceKind::Pawn, PieceColor::White))
    );
    assert!(game.board().checked_cell().is_none());
    assert!(game.board().legal_marked_cells().is_empty());
    assert_eq!(
        game.authority().calls(),
        vec![
            "query (3, 3)".to_string(),
            "move (3, 3) -> (2, 3)".to_string()
        ]
    );
}

#[tokio::test]
async fn test_check_marker_set_then_cleared_by_next_move() {
    let authority = ScriptedAuthority::default()
        .with_query(Ok(QueryReply::Moves(vec![coord(2, 3)])))
        .with_move(Ok(MoveOutcome {
            in_check: true,
            king_position: Some((0, 0)),
            ..MoveOutcome::default()
        }))
        .with_query(Ok(QueryReply::Moves(vec![coord(1, 3)])))
        .with_move(Ok(MoveOutcome::default()));
    let mut game = controller(authority);

    game.handle_cell_click(coord(3, 3)).await.unwrap();
    game.handle_cell_click(coord(2, 3)).await.unwrap();
    assert_eq!(game.board().color_at(coord(0, 0)), CellColor::Check);

    game.handle_cell_click(coord(2, 3)).await.unwrap();
    game.handle_cell_click(coord(1, 3)).await.unwrap();
    assert_eq!(
        game.board().color_at(coord(0, 0)),
        CellColor::Light,
        "cleared check cell returns to its parity-derived color"
    );
    assert!(game.board().checked_cell().is_none());
}

#[tokio::test]
async fn test_terminal_outcome_notifies_and_resets() {
    let authority = ScriptedAuthority::default()
        .with_query(Ok(QueryReply::Moves(vec![coord(2, 3)])))
        .with_move(Ok(MoveOutcome {
            game_over: true,
            king_position: Some((0, 0)),
            message: Some("Checkmate".to_string()),
            ..MoveOutcome::default()
        }));
    let mut game = controller(authority);

    game.handle_cell_click(coord(3, 3)).await.unwrap();
    let outcome = game.handle_cell_click(coord(2, 3)).await.unwrap();

    assert_eq!(outcome, ClickOutcome::GameEnded);
    assert_eq!(game.notifier().messages, vec!["Checkmate".to_string()]);
    assert_eq!(
        *game.board(),
        BoardModel::new(),
        "the board is rebuilt from the initial layout"
    );
    assert_eq!(*game.selection(), SelectionState::Idle);
}

// ============================================================================
// Automated Opponent Reply
// ============================================================================

#[tokio::test]
async fn test_opponent_reply_applies_after_player_move() {
    let authority = ScriptedAuthority::default()
        .with_query(Ok(QueryReply::Moves(vec![coord(2, 3)])))
        .with_move(Ok(MoveOutcome {
            ai_move: Some(AiMove {
                old_coor: wire(0, 0),
                new_coor: wire(1, 1),
            }),
            ai_in_check: true,
            ai_king_position: Some((1, 1)),
            ..MoveOutcome::default()
        }));
    let mut game = controller(authority);

    game.handle_cell_click(coord(3, 3)).await.unwrap();
    let outcome = game.handle_cell_click(coord(2, 3)).await.unwrap();

    assert_eq!(outcome, ClickOutcome::Moved);
    // Player's move landed.
    assert_eq!(
        game.board().piece_at(coord(2, 3)),
        Some(PieceTag::new(PieceKind::Pawn, PieceColor::White))
    );
    // Opponent's reply landed after it.
    assert!(game.board().piece_at(coord(0, 0)).is_none());
    assert_eq!(
        game.board().piece_at(coord(1, 1)),
        Some(PieceTag::new(PieceKind::King, PieceColor::Black))
    );
    // The transient check marker from the reply sequence was cleared again.
    assert!(game.board().checked_cell().is_none());
    assert_eq!(*game.selection(), SelectionState::Idle);
}

#[tokio::test]
async fn test_opponent_terminal_outcome_resets() {
    let authority = ScriptedAuthority::default()
        .with_query(Ok(QueryReply::Moves(vec![coord(2, 3)])))
        .with_move(Ok(MoveOutcome {
            ai_move: Some(AiMove {
                old_coor: wire(0, 3),
                new_coor: wire(3, 3),
            }),
            ai_game_over: true,
            ai_king_position: Some((4, 3)),
            result_message: Some("The computer wins".to_string()),
            ..MoveOutcome::default()
        }));
    let mut game = controller(authority);

    game.handle_cell_click(coord(3, 3)).await.unwrap();
    let outcome = game.handle_cell_click(coord(2, 3)).await.unwrap();

    assert_eq!(outcome, ClickOutcome::GameEnded);
    assert_eq!(
        game.notifier().messages,
        vec!["The computer wins".to_string()]
    );
    assert_eq!(*game.board(), BoardModel::new());
    assert_eq!(*game.selection(), SelectionState::Idle);
}

// ============================================================================
// Mode Controller
// ============================================================================

#[tokio::test]
async fn test_mode_startup_reads_preference_without_network() {
    let mut store = SessionStore::new();
    ModePreference { vs_computer: true }.save(&mut store).unwrap();

    let mode = ModeController::new(ScriptedAuthority::default(), store);

    assert_eq!(mode.label(), "Player vs Computer");
    assert!(
        mode.authority().calls().is_empty(),
        "reading the persisted preference must not reach the authority"
    );
}

#[tokio::test]
async fn test_mode_toggle_persists_and_resets_remote() {
    let mut mode = ModeController::new(ScriptedAuthority::default(), SessionStore::new());
    assert_eq!(mode.label(), "Player vs Player");

    let confirmation = mode.toggle().await.unwrap();

    assert_eq!(confirmation, "changed");
    assert_eq!(mode.label(), "Player vs Computer");
    assert_eq!(mode.authority().calls(), vec!["change_mode".to_string()]);
    assert_eq!(
        ModePreference::load(mode.store()),
        ModePreference { vs_computer: true },
        "the flipped preference is persisted in the session store"
    );
}

// ============================================================================
// Network Failures
// ============================================================================

#[tokio::test]
async fn test_query_failure_leaves_idle_state_untouched() {
    let authority = ScriptedAuthority::default().with_query(Err(network_failure()));
    let mut game = controller(authority);

    let result = game.handle_cell_click(coord(3, 3)).await;

    assert!(result.is_err());
    assert_eq!(*game.selection(), SelectionState::Idle);
    assert_eq!(*game.board(), BoardModel::new());
    assert!(!game.is_busy(), "the guard is released after a failure");
}

#[tokio::test]
async fn test_submit_failure_keeps_selection_and_markers() {
    let authority = ScriptedAuthority::default()
        .with_query(Ok(QueryReply::Moves(vec![coord(2, 3)])))
        .with_move(Err(network_failure()));
    let mut game = controller(authority);

    game.handle_cell_click(coord(3, 3)).await.unwrap();
    let result = game.handle_cell_click(coord(2, 3)).await;

    assert!(result.is_err());
    // No partial move: board, selection, and markers all as before the click.
    assert_eq!(
        *game.selection(),
        SelectionState::PieceSelected {
            origin: coord(3, 3),
            legal_destinations: vec![coord(2, 3)],
        }
    );
    assert_eq!(game.board().legal_marked_cells(), vec![coord(2, 3)]);
    assert_eq!(
        game.board().piece_at(coord(3, 3)),
        Some(PieceTag::new(PieceKind::Pawn, PieceColor::White))
    );
    assert!(!game.is_busy());
}
