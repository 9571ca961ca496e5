use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::core::utils::{in_direction, Position, BOARD_SIZE};

#[derive(PartialEq, Eq, Debug, Default, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum Color {
    #[default]
    White,
    Black,
}

impl Color {
    pub fn opposite(self) -> Color {
        if self == Color::White {
            Color::Black
        } else {
            Color::White
        }
    }

    /// Row of the back rank in the initial layout.
    pub fn home_row(self) -> i8 {
        match self {
            Color::White => BOARD_SIZE - 1,
            Color::Black => 0,
        }
    }

    /// Row a pawn starts on.
    pub fn pawn_row(self) -> i8 {
        match self {
            Color::White => BOARD_SIZE - 2,
            Color::Black => 1,
        }
    }

    /// Row delta of one step "forward" for this color.
    pub fn forward(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(if self == &Self::White {
            "White"
        } else {
            "Black"
        })
    }
}

#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
    CheckersPiece,
    /// Slides like a rook and passes through occupied squares.
    Ghost,
    /// Moves like a king; a capture grants another move.
    Snake,
}

impl PieceKind {
    /// White glyph; black pieces use the lowercase form.
    pub fn glyph(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Rook => 'R',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
            PieceKind::CheckersPiece => 'O',
            PieceKind::Ghost => 'G',
            PieceKind::Snake => 'S',
        }
    }

    /// Kinds whose moves ignore anything standing in between.
    pub fn jumps(self) -> bool {
        matches!(self, PieceKind::Knight | PieceKind::Ghost)
    }
}

/** Tables directions for pieces */
const BISHOP_DIR: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
const ROOK_DIR: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/** Possible moves for pieces */
const KING_MOVES: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (-1, -1),
    (1, -1),
    (-1, 1),
];
const KNIGHT_MOVES: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (1, -2),
    (2, -1),
    (-1, 2),
    (-2, 1),
    (-2, -1),
    (-1, -2),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    kind: PieceKind,
    color: Color,
    position: Position,
}

impl Piece {
    pub fn new(kind: PieceKind, color: Color, position: Position) -> Piece {
        Piece {
            kind,
            color,
            position,
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub(crate) fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    pub fn glyph(&self) -> char {
        match self.color {
            Color::White => self.kind.glyph(),
            Color::Black => self.kind.glyph().to_ascii_lowercase(),
        }
    }

    /// Squares reachable by the movement pattern alone, ignoring occupancy.
    ///
    /// Knight, King, Snake and checkers patterns are raw offsets and may
    /// contain off-board squares.
    pub fn possible_moves(&self) -> Vec<Position> {
        let position = self.position;
        match self.kind {
            PieceKind::CheckersPiece => {
                let forward = self.color.forward();
                vec![position.offset(forward, 1), position.offset(forward, -1)]
            }
            PieceKind::Pawn => {
                let forward = self.color.forward();
                let mut moves = vec![position.offset(forward, 0)];
                if position.row == self.color.pawn_row() {
                    moves.push(position.offset(2 * forward, 0));
                }
                // capture squares, only legal onto an enemy
                moves.push(position.offset(forward, -1));
                moves.push(position.offset(forward, 1));
                moves.retain(Position::is_valid);
                moves
            }
            PieceKind::Rook => line_moves(position),
            PieceKind::Bishop => ray_moves(position, &BISHOP_DIR),
            PieceKind::Ghost => ray_moves(position, &ROOK_DIR),
            PieceKind::Queen => {
                let mut moves = line_moves(position);
                moves.extend(ray_moves(position, &BISHOP_DIR));
                moves
            }
            PieceKind::Knight => offsets(position, &KNIGHT_MOVES),
            PieceKind::King | PieceKind::Snake => offsets(position, &KING_MOVES),
        }
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {:?} at {}", self.color, self.kind, self.position)
    }
}

/// Every other square of the same row and column.
fn line_moves(position: Position) -> Vec<Position> {
    let mut moves = Vec::with_capacity(14);
    for i in 0..BOARD_SIZE {
        if i != position.row {
            moves.push(Position::new(i, position.col));
        }
        if i != position.col {
            moves.push(Position::new(position.row, i));
        }
    }
    moves
}

fn ray_moves(position: Position, directions: &[(i8, i8)]) -> Vec<Position> {
    directions
        .iter()
        .flat_map(|dir| in_direction(position, *dir))
        .collect()
}

fn offsets(position: Position, table: &[(i8, i8)]) -> Vec<Position> {
    table
        .iter()
        .map(|(d_row, d_col)| position.offset(*d_row, *d_col))
        .collect()
}
