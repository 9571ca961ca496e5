use std::fmt::Display;
use std::str::FromStr;

use log::info;
use serde::{Deserialize, Serialize};

use crate::core::definitions::{GameError, MoveOutcome};
use crate::core::engine::Board;
use crate::core::pieces::{Color, PieceKind};
use crate::core::utils::Position;

/// Rule set a board is built with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameVariant {
    #[default]
    Standard,
    Checkers,
    /// Standard chess plus checkers pieces, ghosts and snakes.
    Extended,
}

/// Extra pieces of the extended variant, white side; black mirrors on row 2.
const EXTENDED_EXTRAS: [(i8, PieceKind); 6] = [
    (0, PieceKind::Snake),
    (1, PieceKind::Ghost),
    (2, PieceKind::CheckersPiece),
    (5, PieceKind::CheckersPiece),
    (6, PieceKind::Ghost),
    (7, PieceKind::Snake),
];

impl GameVariant {
    /// Castling and undo are offered only in chess-like variants.
    pub fn is_chess_like(self) -> bool {
        !matches!(self, GameVariant::Checkers)
    }

    /// Losing every piece of this kind loses the game.
    pub fn decisive_kind(self) -> PieceKind {
        match self {
            GameVariant::Checkers => PieceKind::CheckersPiece,
            GameVariant::Standard | GameVariant::Extended => PieceKind::King,
        }
    }

    pub fn setup(self, board: &mut Board) {
        match self {
            GameVariant::Standard => board.setup_initial(),
            GameVariant::Checkers => setup_checkers(board),
            GameVariant::Extended => {
                board.setup_initial();
                for (color, row) in [(Color::White, 5), (Color::Black, 2)] {
                    for (col, kind) in EXTENDED_EXTRAS {
                        board.place(kind, color, Position::new(row, col));
                    }
                }
            }
        }
    }
}

/// Three rows per side on the squares where row + col is even.
fn setup_checkers(board: &mut Board) {
    for (color, rows) in [(Color::Black, 0..3), (Color::White, 5..8)] {
        for row in rows {
            for col in (0..8).filter(|col| (row + col) % 2 == 0) {
                board.place(PieceKind::CheckersPiece, color, Position::new(row, col));
            }
        }
    }
}

fn jumped_square(from: Position, to: Position) -> Option<Position> {
    if from.row.abs_diff(to.row) == 2 && from.col.abs_diff(to.col) == 2 {
        Some(Position::new((from.row + to.row) / 2, (from.col + to.col) / 2))
    } else {
        None
    }
}

impl Board {
    /// Quiet diagonal step forward, or a jump over an enemy in any
    /// diagonal direction. The destination must be empty.
    pub(crate) fn check_checkers_move(&self, from: Position, to: Position) -> bool {
        let Some(piece) = self.get(from) else {
            return false;
        };
        if piece.kind() != PieceKind::CheckersPiece || !to.is_valid() || self.get(to).is_some() {
            return false;
        }
        if piece.possible_moves().contains(&to) && self.is_path_clear(from, to) {
            return true;
        }
        jumped_square(from, to)
            .and_then(|middle| self.get(middle))
            .is_some_and(|middle| middle.color() != piece.color())
    }

    pub(crate) fn make_checkers_move(&mut self, from: Position, to: Position) -> MoveOutcome {
        let Some(color) = self.get(from).map(|piece| piece.color()) else {
            return MoveOutcome::default();
        };
        if self.relocate(from, to).is_none() {
            return MoveOutcome::default();
        }
        let captured = jumped_square(from, to).and_then(|middle| self.remove(middle));
        if let Some(victim) = &captured {
            info!("{color} jumps over {victim}");
        }
        // reaching the far rank is only announced, the piece keeps its rules
        let promoted = to.row == color.opposite().home_row();
        if promoted {
            info!("{color} piece on {to} became a king");
        }
        self.save_state();
        MoveOutcome {
            captured,
            just_captured: captured.is_some(),
            promoted,
        }
    }
}

impl FromStr for GameVariant {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "chess" | "standard" => Ok(GameVariant::Standard),
            "checkers" | "draughts" => Ok(GameVariant::Checkers),
            "extended" | "extended chess" => Ok(GameVariant::Extended),
            other => Err(GameError::UnknownVariant(other.to_string())),
        }
    }
}

impl Display for GameVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(match self {
            GameVariant::Standard => "chess",
            GameVariant::Checkers => "checkers",
            GameVariant::Extended => "extended chess",
        })
    }
}
