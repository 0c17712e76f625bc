use crate::Position;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Invalid board parameters: {rows}x{cols} with {mines} mines")]
    InvalidParameters { rows: u32, cols: u32, mines: u32 },
    #[error("Position {0:?} is out of bounds")]
    OutOfBounds(Position),
    #[error("Cell at {0:?} is already revealed")]
    AlreadyRevealed(Position),
    #[error("Game is already over")]
    GameAlreadyOver,
}
