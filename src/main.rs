// src/main.rs
use std::error::Error;

use chess_rules::{Color, Game, Move, Position};
use tracing_subscriber::EnvFilter;

// The quickest mate these rules allow, pawns advancing one square at a time.
const DEMO_GAME: [((u8, u8), (u8, u8)); 6] = [
    ((2, 6), (3, 6)), // f3
    ((7, 5), (6, 5)), // e6
    ((2, 7), (3, 7)), // g3
    ((7, 1), (6, 1)), // a6
    ((3, 7), (4, 7)), // g4
    ((8, 4), (4, 8)), // Qh4
];

fn square(row: u8, column: u8) -> Result<Position, Box<dyn Error>> {
    Ok(Position::new(row, column).ok_or("square off the board")?)
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut game = Game::new();
    println!("{}", game.board());

    for (from, to) in DEMO_GAME {
        let mv = Move::new(square(from.0, from.1)?, square(to.0, to.1)?, None);
        let mover = game.turn();
        game.make_move(&mv)?;
        println!("{:?} plays {}", mover, mv);
        println!("{}", game.board());
    }

    for color in [Color::White, Color::Black] {
        println!(
            "{:?}: check={} checkmate={} stalemate={}",
            color,
            game.is_in_check(color)?,
            game.is_in_checkmate(color)?,
            game.is_in_stalemate(color)?
        );
    }
    Ok(())
}
