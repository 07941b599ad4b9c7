//! A line-oriented console front end for the Gambit client.
//!
//! Connects to a chess server, prints chat and board updates as they
//! arrive, and sends typed lines as chat. Commands:
//!
//! ```text
//! /connect   dial the server (again)
//! /quit      exit
//! anything else is sent as a chat message
//! ```
//!
//! Run with the endpoint as the first argument:
//!
//! ```text
//! cargo run -p gambit-console -- ws://localhost:3000/ws
//! ```

use gambit::prelude::*;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let endpoint = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "ws://localhost:3000/ws".to_string());

    let client = ChessClient::builder().endpoint(&endpoint).build();

    tokio::spawn(watch_state(client.subscribe()));

    println!("gambit console — connecting to {endpoint}");
    if client.connect().await.is_err() {
        eprintln!("client is not running");
        return;
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) | Err(_) => break,
        };
        let line = line.trim();

        match line {
            "" => {}
            "/quit" => break,
            "/connect" => {
                if client.connect().await.is_err() {
                    break;
                }
            }
            text => {
                if let Err(e) = client.send_chat(text).await {
                    eprintln!("could not send: {e}");
                }
            }
        }
    }

    client.shutdown().await;
}

// ---------------------------------------------------------------------------
// State display
// ---------------------------------------------------------------------------

/// Prints status changes, new chat messages, and the board whenever it
/// changes.
async fn watch_state(mut rx: tokio::sync::watch::Receiver<ClientSnapshot>) {
    let mut last_status = ConnectionStatus::Disconnected;
    let mut printed_chat = 0;
    let mut last_board = String::new();

    loop {
        let snapshot = rx.borrow_and_update().clone();

        if snapshot.status != last_status {
            println!("[{}]", snapshot.status);
            last_status = snapshot.status;
        }

        for msg in &snapshot.chat[printed_chat..] {
            println!("chat> {}", msg.text);
        }
        printed_chat = snapshot.chat.len();

        let board = render_board(&snapshot.board);
        if board != last_board {
            println!("{board}");
            last_board = board;
        }

        if rx.changed().await.is_err() {
            return;
        }
    }
}

/// Renders the board as an 8x8 grid, white pieces uppercase, black
/// lowercase, empty squares as dots.
fn render_board(board: &BoardState) -> String {
    let mut out = String::new();
    for rank in (0..8).rev() {
        out.push((b'1' + rank) as char);
        out.push(' ');
        for file in 0..8 {
            let letter = Square::new(file, rank)
                .and_then(|sq| board.get(sq))
                .map(piece_letter)
                .unwrap_or('.');
            out.push(letter);
            out.push(' ');
        }
        out.push('\n');
    }
    out.push_str("  a b c d e f g h");
    out
}

fn piece_letter(piece: &Piece) -> char {
    let letter = match piece.kind {
        PieceKind::Pawn => 'P',
        PieceKind::Knight => 'N',
        PieceKind::Bishop => 'B',
        PieceKind::Rook => 'R',
        PieceKind::Queen => 'Q',
        PieceKind::King => 'K',
    };
    match piece.colour {
        Colour::White => letter,
        Colour::Black => letter.to_ascii_lowercase(),
    }
}
