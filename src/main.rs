//! Terminal front end for the 5x4 chess-variant client
//!
//! Stands in for the document view: reads `row col` clicks from stdin,
//! drives the move-interaction controller against a remote rule authority,
//! and redraws the board model after every interaction.

use clap::Parser;
use std::io::{self, BufRead, Write};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use minichess_client::core::SessionStore;
use minichess_client::game::{
    BoardModel, ClickOutcome, Coord, GameController, ModeController, Notifier, PieceColor,
    PieceKind,
};
use minichess_client::networking::client::RuleAuthority;
use minichess_client::HttpAuthority;

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "minichess-client", about = "Terminal client for a 5x4 chess variant")]
struct Args {
    /// Base URL of the rule authority service
    #[arg(long, default_value = "http://localhost:5000")]
    authority: String,
}

/// Blocking notifications printed straight to the terminal
struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn alert(&mut self, message: &str) {
        println!("*** {message} ***");
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let authority = HttpAuthority::new(&args.authority);

    // Fresh authority game for this session.
    match authority.reset_game().await {
        Ok(message) => info!("[NETWORK] {}", message),
        Err(e) => warn!("[NETWORK] Reset on startup failed: {}", e),
    }

    let mut mode = ModeController::new(authority.clone(), SessionStore::new());
    let mut game = GameController::new(authority, ConsoleNotifier);

    println!("Mode: {}", mode.label());
    println!("Commands: `<row> <col>` clicks a cell, `mode` toggles the opponent, `quit` exits.");
    print_board(game.board());

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let input = line.trim();

        match input {
            "" => continue,
            "quit" | "exit" => break,
            "mode" => {
                match mode.toggle().await {
                    Ok(confirmation) => {
                        info!("[NETWORK] {}", confirmation);
                        // The remote game was reset; start this side over too.
                        game.reset();
                        println!("Mode: {}", mode.label());
                        print_board(game.board());
                    }
                    Err(e) => warn!("[NETWORK] Mode change failed: {}", e),
                }
            }
            _ => match parse_click(input) {
                Some(coord) => {
                    match game.handle_cell_click(coord).await {
                        Ok(outcome) => report(outcome),
                        Err(e) => warn!("[INPUT] Click failed: {}", e),
                    }
                    print_board(game.board());
                }
                None => println!("Expected `<row> <col>` with row 0-4 and col 0-3."),
            },
        }
    }

    Ok(())
}

fn parse_click(input: &str) -> Option<Coord> {
    let mut parts = input.split_whitespace();
    let row = parts.next()?.parse().ok()?;
    let col = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Coord::new(row, col)
}

fn report(outcome: ClickOutcome) {
    match outcome {
        ClickOutcome::Busy => println!("Hold on - still resolving the last click."),
        ClickOutcome::WrongTurn => {}
        ClickOutcome::NoSelection => println!("Nothing to do on that square."),
        ClickOutcome::Selected => println!("Piece selected; its destinations are marked with *."),
        ClickOutcome::Cancelled => println!("Selection cancelled."),
        ClickOutcome::Moved => {}
        ClickOutcome::GameEnded => println!("New game set up."),
    }
}

/// Draw the board: uppercase letters are white pieces, lowercase black.
/// `*` marks a legal destination, `+` a king in check, `#` a finished game.
fn print_board(board: &BoardModel) {
    println!("    0  1  2  3");
    for row in 0..5 {
        print!("{} ", row);
        for col in 0..4 {
            let Some(coord) = Coord::new(row, col) else {
                continue;
            };
            let cell = board.cell(coord);
            let piece = match cell.piece {
                Some(piece) => {
                    let letter = match piece.kind {
                        PieceKind::King => 'k',
                        PieceKind::Knight => 'n',
                        PieceKind::Bishop => 'b',
                        PieceKind::Rook => 'r',
                        PieceKind::Pawn => 'p',
                    };
                    match piece.color {
                        PieceColor::White => letter.to_ascii_uppercase(),
                        PieceColor::Black => letter,
                    }
                }
                None => '.',
            };
            let marker = if cell.terminal_marked {
                '#'
            } else if cell.check_marked {
                '+'
            } else if cell.legal_marked {
                '*'
            } else {
                ' '
            };
            print!(" {piece}{marker}");
        }
        println!();
    }
}
