use log::{debug, info, trace};
use serde::{Deserialize, Serialize};

use crate::core::definitions::{GameError, MoveOutcome, EMPTY_GLYPH};
use crate::core::pieces::{Color, Piece, PieceKind};
use crate::core::utils::{between, is_in_diagonal_line, is_in_straight_line, Position};
use crate::core::variants::GameVariant;

pub type Grid = [[Option<Piece>; 8]; 8];

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

const KING_FILE: i8 = 4;
const ROOK_FILE: i8 = 7;
const CASTLED_KING_FILE: i8 = 6;
const CASTLED_ROOK_FILE: i8 = 5;

/// 8x8 board with its snapshot history.
///
/// The history always starts with the initial layout, and every committed
/// move or castling pushes a copy of the grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    variant: GameVariant,
    grid: Grid,
    history: Vec<Grid>,
}

impl Board {
    pub fn new(variant: GameVariant) -> Board {
        let mut board = Board::empty(variant);
        variant.setup(&mut board);
        board.save_state();
        board
    }

    /// Board without pieces or history; fill it with `place`.
    pub fn empty(variant: GameVariant) -> Board {
        Board {
            variant,
            grid: [[None; 8]; 8],
            history: Vec::new(),
        }
    }

    pub fn variant(&self) -> GameVariant {
        self.variant
    }

    pub fn inside(&self) -> &Grid {
        &self.grid
    }

    pub fn history(&self) -> &[Grid] {
        &self.history
    }

    pub fn get(&self, position: Position) -> Option<&Piece> {
        let (row, col) = position.index()?;
        self.grid[row][col].as_ref()
    }

    /// Puts a piece on the grid without touching the history.
    pub fn place(&mut self, kind: PieceKind, color: Color, position: Position) {
        if let Some(cell) = self.cell_mut(position) {
            *cell = Some(Piece::new(kind, color, position));
        }
    }

    /// Removes a piece from the grid without touching the history.
    pub fn remove(&mut self, position: Position) -> Option<Piece> {
        self.cell_mut(position).and_then(Option::take)
    }

    pub fn iter_pieces(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.grid.iter().flatten().flatten()
    }

    fn cell_mut(&mut self, position: Position) -> Option<&mut Option<Piece>> {
        let (row, col) = position.index()?;
        Some(&mut self.grid[row][col])
    }

    /// Standard chess ranks: pawns on rows 1 and 6, back ranks on 0 and 7.
    pub fn setup_initial(&mut self) {
        for color in [Color::White, Color::Black] {
            for (col, kind) in BACK_RANK.iter().enumerate() {
                self.place(*kind, color, Position::new(color.home_row(), col as i8));
                self.place(PieceKind::Pawn, color, Position::new(color.pawn_row(), col as i8));
            }
        }
    }

    /// Whether every square strictly between `from` and `to` is empty.
    ///
    /// Only rows, columns and diagonals are inspected; any other pair of
    /// squares, or a pair with an off-board end, is reported clear.
    pub fn is_path_clear(&self, from: Position, to: Position) -> bool {
        if from == to
            || !from.is_valid()
            || !to.is_valid()
            || !(is_in_straight_line(from, to) || is_in_diagonal_line(from, to))
        {
            return true;
        }
        between(from, to).all(|pos| self.get(pos).is_none())
    }

    pub fn check_move(&self, from: Position, to: Position) -> bool {
        let legal = if self.variant.is_chess_like() {
            self.check_chess_move(from, to)
        } else {
            self.check_checkers_move(from, to)
        };
        trace!("Move {from} -> {to} is legal: {legal}");
        legal
    }

    fn check_chess_move(&self, from: Position, to: Position) -> bool {
        let Some(piece) = self.get(from) else {
            return false;
        };
        if !to.is_valid() {
            return false;
        }
        let target = self.get(to);
        if target.is_some_and(|target| target.color() == piece.color()) {
            return false;
        }
        if piece.kind() == PieceKind::Pawn
            && from.row.abs_diff(to.row) == 1
            && from.col.abs_diff(to.col) == 1
        {
            // diagonal pawn steps only capture
            return target.is_some();
        }
        if !piece.possible_moves().contains(&to) {
            return false;
        }
        piece.kind().jumps() || self.is_path_clear(from, to)
    }

    /// Executes a move without validating it, see `check_move`.
    pub fn make_move(&mut self, from: Position, to: Position) -> MoveOutcome {
        if self.variant.is_chess_like() {
            self.make_chess_move(from, to)
        } else {
            self.make_checkers_move(from, to)
        }
    }

    fn make_chess_move(&mut self, from: Position, to: Position) -> MoveOutcome {
        let Some(captured) = self.relocate(from, to) else {
            return MoveOutcome::default();
        };
        let just_captured = captured.is_some()
            && self
                .get(to)
                .is_some_and(|piece| piece.kind() == PieceKind::Snake);
        self.save_state();
        MoveOutcome {
            captured,
            just_captured,
            promoted: false,
        }
    }

    /// Moves the piece on `from` to `to`, returning whatever stood on `to`.
    /// `None` when there was nothing to move.
    pub(crate) fn relocate(&mut self, from: Position, to: Position) -> Option<Option<Piece>> {
        if !to.is_valid() {
            debug!("Refusing to move off the board: {from} -> {to}");
            return None;
        }
        let Some(mut piece) = self.remove(from) else {
            debug!("Nothing to move on {from}");
            return None;
        };
        piece.set_position(to);
        let captured = self.cell_mut(to).and_then(|cell| cell.replace(piece));
        match &captured {
            Some(victim) => info!("{piece} captures {victim}"),
            None => trace!("{piece} moved from {from}"),
        }
        Some(captured)
    }

    /// King and king-side rook on their home squares with nothing between.
    pub fn if_rock_possible(&self, color: Color) -> bool {
        let row = color.home_row();
        let king = Position::new(row, KING_FILE);
        let rook = Position::new(row, ROOK_FILE);
        let owned = |position: Position, kind: PieceKind| {
            self.get(position)
                .is_some_and(|piece| piece.kind() == kind && piece.color() == color)
        };
        owned(king, PieceKind::King) && owned(rook, PieceKind::Rook) && self.is_path_clear(king, rook)
    }

    /// King-side castling. Does not check `if_rock_possible`.
    pub fn rock(&mut self, color: Color) {
        let row = color.home_row();
        self.relocate(Position::new(row, KING_FILE), Position::new(row, CASTLED_KING_FILE));
        self.relocate(Position::new(row, ROOK_FILE), Position::new(row, CASTLED_ROOK_FILE));
        info!("{color} castled");
        self.save_state();
    }

    fn has_piece(&self, color: Color, kind: PieceKind) -> bool {
        self.iter_pieces()
            .any(|piece| piece.color() == color && piece.kind() == kind)
    }

    pub fn is_game_over(&self) -> bool {
        let kind = self.variant.decisive_kind();
        !(self.has_piece(Color::White, kind) && self.has_piece(Color::Black, kind))
    }

    /// The only side still holding its decisive pieces, if exactly one does.
    pub fn winner(&self) -> Option<Color> {
        let kind = self.variant.decisive_kind();
        match (
            self.has_piece(Color::White, kind),
            self.has_piece(Color::Black, kind),
        ) {
            (true, false) => Some(Color::White),
            (false, true) => Some(Color::Black),
            _ => None,
        }
    }

    pub fn save_state(&mut self) {
        self.history.push(self.grid);
    }

    /// Drops the latest snapshot and restores the one beneath it.
    pub fn undo_move(&mut self) -> Result<(), GameError> {
        if self.history.len() <= 1 {
            debug!("Undo requested with {} snapshot(s)", self.history.len());
            return Err(GameError::NoHistoryToUndo);
        }
        self.history.pop();
        if let Some(previous) = self.history.last() {
            self.grid = *previous;
        }
        info!("Move undone, {} snapshot(s) left", self.history.len());
        Ok(())
    }

    pub fn render(&self) -> [[char; 8]; 8] {
        self.grid.map(|row| row.map(|cell| cell.map_or(EMPTY_GLYPH, |piece| piece.glyph())))
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new(GameVariant::Standard)
    }
}
