use thiserror::Error;

use crate::core::pieces::{Color, Piece, PieceKind};
use crate::core::utils::Position;

pub const EMPTY_GLYPH: char = '.';

#[derive(Clone, Debug, PartialEq)]
pub struct Figure {
    pub kind: PieceKind,
    pub color: Color,
    pub glyph: char,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    Empty,
    Figure(Figure),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameState {
    PlayerMove(Color),
    /// Winner, `None` when both sides were wiped out together.
    Finished(Option<Color>),
}

/// Result of executing one move on the board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MoveOutcome {
    pub captured: Option<Piece>,
    /// The moving side keeps the turn for one more move.
    pub just_captured: bool,
    /// A checkers piece reached the far rank. Display only.
    pub promoted: bool,
}

/// Yes/no questions the controller asks the shell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Prompt {
    Castle,
    Undo,
}

/// Things worth telling the player about; the shell decides how.
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    Moved { from: Position, to: Position },
    Captured { by: Color, at: Position },
    Promoted { color: Color, at: Position },
    ExtraTurn(Color),
    Castled(Color),
    Undone,
    Rejected(GameError),
    GameOver(Option<Color>),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("enter exactly two squares, e.g. `e2 e4`")]
    MalformedInput,
    #[error("coordinates are outside of the board")]
    OutOfBounds,
    #[error("illegal move {from} -> {to}")]
    IllegalMove { from: Position, to: Position },
    #[error("castling is not possible")]
    CastlingUnavailable,
    #[error("there is no move to undo")]
    NoHistoryToUndo,
    #[error("the game is over")]
    GameOver,
    #[error("unknown game variant `{0}`")]
    UnknownVariant(String),
}

/// Seam towards whatever drives the game (console, tests, GUI).
pub trait GameShell {
    fn confirm(&mut self, player: Color, prompt: Prompt) -> bool;
    /// Two on-board squares, or the parsing error that made the input useless.
    fn read_move(&mut self, player: Color) -> Result<(Position, Position), GameError>;
    fn notify(&mut self, event: &GameEvent);
}
