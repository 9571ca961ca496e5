pub mod core;

// module re-exports
pub use crate::core::definitions::{
    Cell, Figure, GameError, GameEvent, GameShell, GameState, MoveOutcome, Prompt,
};
pub use crate::core::engine::Board;
pub use crate::core::game::Game;
pub use crate::core::pieces::{Color, Piece, PieceKind};
pub use crate::core::utils::Position;
pub use crate::core::variants::GameVariant;
