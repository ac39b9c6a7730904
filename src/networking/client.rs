//! HTTP client for the rule authority service
//!
//! The authority owns all chess rules: it computes legal moves, detects
//! check and checkmate, executes moves, and picks the automated opponent's
//! reply. This module only ferries the controller's operations over the
//! service's JSON surface and maps the documented statuses onto reply types.
//!
//! # Wire surface
//!
//! - `GET  /get_legal_moves/{row}/{col}` -> `{"legal_moves": [[r, c], ...]}`,
//!   or status 400 when the queried piece's side is not on turn
//! - `POST /move` with `{"old_coor": {"row", "col"}, "new_coor": {...}}` ->
//!   a [`MoveOutcome`]
//! - `POST /reset_game` -> `{"message": ...}`
//! - `GET  /change_mode` -> `{"message": ...}`

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::error::{ClientError, ClientResult};
use crate::game::types::Coord;

/// Wire spelling of a coordinate object (`{"row": 4, "col": 3}`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireCoord {
    pub row: u8,
    pub col: u8,
}

impl WireCoord {
    /// Validate against the board bounds
    pub fn to_coord(self) -> Option<Coord> {
        Coord::new(self.row, self.col)
    }
}

impl From<Coord> for WireCoord {
    fn from(coord: Coord) -> Self {
        Self {
            row: coord.row(),
            col: coord.col(),
        }
    }
}

/// Request body for move submission
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MoveRequest {
    pub old_coor: WireCoord,
    pub new_coor: WireCoord,
}

/// The automated opponent's reply carried inside a move outcome
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AiMove {
    pub old_coor: WireCoord,
    pub new_coor: WireCoord,
}

/// Authority response to a submitted move
///
/// Every field is optional on the wire; absent fields deserialize to their
/// defaults. `king_position`-style coordinates are spelled as `[row, col]`
/// arrays by the service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MoveOutcome {
    pub in_check: bool,
    pub king_position: Option<(u8, u8)>,
    pub game_over: bool,
    pub message: Option<String>,
    pub ai_move: Option<AiMove>,
    pub ai_in_check: bool,
    pub ai_king_position: Option<(u8, u8)>,
    pub ai_game_over: bool,
    pub result_message: Option<String>,
}

/// Outcome of a legal-move query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryReply {
    /// Destinations for the piece on the queried square (possibly empty)
    Moves(Vec<Coord>),
    /// The queried piece's side is not on turn
    WrongTurn,
}

#[derive(Debug, Deserialize)]
struct LegalMovesResponse {
    legal_moves: Vec<(u8, u8)>,
}

#[derive(Debug, Deserialize)]
struct ConfirmationResponse {
    message: String,
}

/// Operations the controller consumes from the rule authority service
#[async_trait]
pub trait RuleAuthority {
    /// Ask for the legal destinations of the piece on `coord`
    async fn query_legal_moves(&self, coord: Coord) -> ClientResult<QueryReply>;

    /// Submit a move for execution
    async fn submit_move(&self, from: Coord, to: Coord) -> ClientResult<MoveOutcome>;

    /// Reset the authority's game state; returns its confirmation text
    async fn reset_game(&self) -> ClientResult<String>;

    /// Flip player-vs-computer mode and reset; returns its confirmation text
    async fn change_mode(&self) -> ClientResult<String>;
}

/// Rule authority reached over HTTP
#[derive(Debug, Clone)]
pub struct HttpAuthority {
    base_url: String,
    http: reqwest::Client,
}

impl HttpAuthority {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl RuleAuthority for HttpAuthority {
    async fn query_legal_moves(&self, coord: Coord) -> ClientResult<QueryReply> {
        let url = format!(
            "{}/get_legal_moves/{}/{}",
            self.base_url,
            coord.row(),
            coord.col()
        );
        debug!("[NETWORK] GET {}", url);

        let response = self.http.get(&url).send().await?;
        match response.status() {
            StatusCode::OK => {
                let body: LegalMovesResponse = response.json().await?;
                let moves = body
                    .legal_moves
                    .into_iter()
                    .filter_map(|(row, col)| Coord::new(row, col))
                    .collect();
                Ok(QueryReply::Moves(moves))
            }
            StatusCode::BAD_REQUEST => {
                debug!("[NETWORK] Query for {} rejected: wrong turn", coord);
                Ok(QueryReply::WrongTurn)
            }
            status => Err(ClientError::UnexpectedStatus {
                status: status.as_u16(),
            }),
        }
    }

    async fn submit_move(&self, from: Coord, to: Coord) -> ClientResult<MoveOutcome> {
        let url = format!("{}/move", self.base_url);
        let request = MoveRequest {
            old_coor: from.into(),
            new_coor: to.into(),
        };
        debug!("[NETWORK] POST {} {} -> {}", url, from, to);

        let response = self.http.post(&url).json(&request).send().await?;
        if response.status() != StatusCode::OK {
            return Err(ClientError::UnexpectedStatus {
                status: response.status().as_u16(),
            });
        }
        Ok(response.json().await?)
    }

    async fn reset_game(&self) -> ClientResult<String> {
        let url = format!("{}/reset_game", self.base_url);
        debug!("[NETWORK] POST {}", url);

        let response = self.http.post(&url).send().await?;
        if response.status() != StatusCode::OK {
            return Err(ClientError::UnexpectedStatus {
                status: response.status().as_u16(),
            });
        }
        let body: ConfirmationResponse = response.json().await?;
        info!("[NETWORK] Game reset: {}", body.message);
        Ok(body.message)
    }

    async fn change_mode(&self) -> ClientResult<String> {
        let url = format!("{}/change_mode", self.base_url);
        debug!("[NETWORK] GET {}", url);

        let response = self.http.get(&url).send().await?;
        if response.status() != StatusCode::OK {
            return Err(ClientError::UnexpectedStatus {
                status: response.status().as_u16(),
            });
        }
        let body: ConfirmationResponse = response.json().await?;
        info!("[NETWORK] Mode changed: {}", body.message);
        Ok(body.message)
    }
}
