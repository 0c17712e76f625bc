pub mod board;
pub mod error;
pub mod game;
pub mod position;

pub use board::{Board, Cell, MINE};
pub use error::GameError;
pub use game::{Action, Game, GameStatus};
pub use position::Position;
