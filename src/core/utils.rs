use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::core::definitions::GameError;

pub const BOARD_SIZE: i8 = 8;

const FILES: [char; 8] = ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H'];
const RANKS: [char; 8] = ['1', '2', '3', '4', '5', '6', '7', '8'];

/// Square coordinate. May hold an off-board value when produced by
/// unfiltered move patterns, so check `is_valid` before indexing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: i8,
    pub col: i8,
}

impl Position {
    pub const fn new(row: i8, col: i8) -> Position {
        Position { row, col }
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        (0..BOARD_SIZE).contains(&self.row) && (0..BOARD_SIZE).contains(&self.col)
    }

    /// Saturates instead of overflowing; the result is off-board either way.
    #[inline]
    pub fn offset(&self, d_row: i8, d_col: i8) -> Position {
        Position::new(self.row.saturating_add(d_row), self.col.saturating_add(d_col))
    }

    /// Grid indices, `None` when off-board.
    #[inline]
    pub fn index(&self) -> Option<(usize, usize)> {
        if self.is_valid() {
            Some((self.row as usize, self.col as usize))
        } else {
            None
        }
    }
}

impl From<(i8, i8)> for Position {
    fn from((row, col): (i8, i8)) -> Self {
        Position::new(row, col)
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.index() {
            Some((row, col)) => write!(f, "{}{}", FILES[col], RANKS[row]),
            None => write!(f, "({}, {})", self.row, self.col),
        }
    }
}

/// Squares strictly between two points of one line.
#[derive(Debug)]
pub struct BetweenIterator {
    current: Position,
    target: Position,
    step: (i8, i8),
}

impl Iterator for BetweenIterator {
    type Item = Position;

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        self.current = self.current.offset(self.step.0, self.step.1);
        if self.current == self.target || !self.current.is_valid() {
            None
        } else {
            Some(self.current)
        }
    }
}

pub fn between(from: Position, to: Position) -> BetweenIterator {
    debug_assert!(
        is_in_straight_line(from, to) || is_in_diagonal_line(from, to),
        "Points can't form line to search between them!"
    );
    let step = (to.row.cmp(&from.row) as i8, to.col.cmp(&from.col) as i8);
    BetweenIterator {
        current: from,
        target: to,
        step,
    }
}

pub struct DirectionIterator {
    position: Position,
    direction: (i8, i8),
}

impl Iterator for DirectionIterator {
    type Item = Position;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.position = self.position.offset(self.direction.0, self.direction.1);
        if self.position.is_valid() {
            Some(self.position)
        } else {
            None
        }
    }
}

/// Walks from `position` (exclusive) until the first board edge.
pub fn in_direction(position: Position, direction: (i8, i8)) -> DirectionIterator {
    DirectionIterator {
        position,
        direction,
    }
}

pub fn is_in_straight_line(a: Position, b: Position) -> bool {
    a.row == b.row || a.col == b.col
}

pub fn is_in_diagonal_line(a: Position, b: Position) -> bool {
    a.row.abs_diff(b.row) == a.col.abs_diff(b.col)
}

/// Parses a square like `e2`: file letter, then rank digit.
pub fn parse_square(token: &str) -> Result<Position, GameError> {
    let mut chars = token.chars();
    let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
        return Err(GameError::MalformedInput);
    };
    let col = FILES
        .iter()
        .position(|letter| *letter == file.to_ascii_uppercase())
        .ok_or(GameError::OutOfBounds)?;
    let row = RANKS
        .iter()
        .position(|digit| *digit == rank)
        .ok_or(GameError::OutOfBounds)?;
    Ok(Position::new(row as i8, col as i8))
}

/// Parses a move line: exactly two squares separated by whitespace.
pub fn parse_move(line: &str) -> Result<(Position, Position), GameError> {
    let tokens: Vec<_> = line.split_whitespace().collect();
    match tokens.as_slice() {
        [from, to] => Ok((parse_square(from)?, parse_square(to)?)),
        _ => Err(GameError::MalformedInput),
    }
}

pub fn file_labels() -> &'static [char; 8] {
    &FILES
}

pub fn rank_label(row: usize) -> char {
    RANKS[row]
}
