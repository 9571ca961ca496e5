use log::{debug, info, warn};

use crate::core::definitions::{
    Cell, Figure, GameError, GameEvent, GameShell, GameState, MoveOutcome, Prompt,
};
use crate::core::engine::Board;
use crate::core::pieces::Color;
use crate::core::utils::Position;
use crate::core::variants::GameVariant;

pub fn ui_board(board: &Board) -> Vec<Vec<Cell>> {
    board
        .inside()
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| match cell {
                    None => Cell::Empty,
                    Some(piece) => Cell::Figure(Figure {
                        kind: piece.kind(),
                        color: piece.color(),
                        glyph: piece.glyph(),
                    }),
                })
                .collect()
        })
        .collect()
}

/// Turn sequencing on top of a `Board`.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    current_player: Color,
    finished: bool,
    /// First square of a click-to-move selection.
    selected: Option<Position>,
    /// Castling was the last action; the next turn only offers castling.
    castled: bool,
}

impl Game {
    pub fn new(variant: GameVariant) -> Game {
        Game::with_board(Board::new(variant))
    }

    pub fn with_board(board: Board) -> Game {
        Game::with_player(board, Color::White)
    }

    pub fn with_player(board: Board, player: Color) -> Game {
        Game {
            board,
            current_player: player,
            finished: false,
            selected: None,
            castled: false,
        }
    }

    pub fn standard() -> Game {
        Game::new(GameVariant::Standard)
    }

    pub fn checkers() -> Game {
        Game::new(GameVariant::Checkers)
    }

    pub fn extended() -> Game {
        Game::new(GameVariant::Extended)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Color {
        self.current_player
    }

    pub fn is_chess_variant(&self) -> bool {
        self.board.variant().is_chess_like()
    }

    pub fn game_ended(&self) -> bool {
        self.finished
    }

    pub fn selected(&self) -> Option<Position> {
        self.selected
    }

    pub fn current_board(&self) -> Vec<Vec<Cell>> {
        ui_board(&self.board)
    }

    pub fn state(&self) -> GameState {
        if self.finished {
            GameState::Finished(self.board.winner())
        } else {
            GameState::PlayerMove(self.current_player)
        }
    }

    /// Re-evaluates the win condition. Once over, the game stays over.
    pub fn check_game_over(&mut self) -> GameState {
        if !self.finished && self.board.is_game_over() {
            info!("Game over, winner: {:?}", self.board.winner());
            self.finished = true;
        }
        self.state()
    }

    fn ensure_running(&mut self) -> Result<(), GameError> {
        match self.check_game_over() {
            GameState::Finished(_) => Err(GameError::GameOver),
            GameState::PlayerMove(_) => Ok(()),
        }
    }

    fn switch_player(&mut self) {
        self.current_player = self.current_player.opposite();
        debug!("{} to move", self.current_player);
    }

    pub fn castling_available(&self) -> bool {
        !self.finished
            && self.is_chess_variant()
            && self.board.if_rock_possible(self.current_player)
    }

    pub fn castle(&mut self) -> Result<GameState, GameError> {
        self.ensure_running()?;
        if !self.castling_available() {
            return Err(GameError::CastlingUnavailable);
        }
        self.board.rock(self.current_player);
        self.selected = None;
        self.castled = true;
        self.switch_player();
        Ok(self.check_game_over())
    }

    /// Takes back the last committed board state and hands the turn back.
    /// A failed undo keeps the current player.
    pub fn undo(&mut self) -> Result<GameState, GameError> {
        self.ensure_running()?;
        self.board.undo_move()?;
        self.selected = None;
        self.castled = false;
        self.switch_player();
        Ok(self.state())
    }

    /// Validates and plays a move for the player to move. Ownership is not
    /// checked, any piece passing `Board::check_move` may be moved.
    ///
    /// After a capture that grants continuation the same player moves
    /// again, once; otherwise the turn passes.
    pub fn submit_move(&mut self, from: Position, to: Position) -> Result<MoveOutcome, GameError> {
        self.ensure_running()?;
        if !from.is_valid() || !to.is_valid() {
            return Err(GameError::OutOfBounds);
        }
        if !self.board.check_move(from, to) {
            debug!("Rejected move {from} -> {to} by {}", self.current_player);
            return Err(GameError::IllegalMove { from, to });
        }
        let outcome = self.board.make_move(from, to);
        self.castled = false;
        if outcome.just_captured {
            info!("{} captured and moves again", self.current_player);
        } else {
            self.switch_player();
        }
        self.check_game_over();
        Ok(outcome)
    }

    /// Click-to-move: the first square is remembered, the second submits.
    /// The selection is cleared whatever the result.
    pub fn select(&mut self, position: Position) -> Result<Option<MoveOutcome>, GameError> {
        if !position.is_valid() {
            self.selected = None;
            return Err(GameError::OutOfBounds);
        }
        match self.selected.take() {
            None => {
                self.selected = Some(position);
                Ok(None)
            }
            Some(from) => self.submit_move(from, position).map(Some),
        }
    }

    /// Runs one iteration of the turn protocol against `shell`.
    pub fn play_turn<S: GameShell>(&mut self, shell: &mut S) -> GameState {
        if let GameState::Finished(winner) = self.check_game_over() {
            shell.notify(&GameEvent::GameOver(winner));
            return GameState::Finished(winner);
        }
        let player = self.current_player;

        if self.castling_available() && shell.confirm(player, Prompt::Castle) {
            match self.castle() {
                Ok(state) => {
                    shell.notify(&GameEvent::Castled(player));
                    return state;
                }
                Err(err) => shell.notify(&GameEvent::Rejected(err)),
            }
        }

        if std::mem::take(&mut self.castled) {
            debug!("{player} skips undo and move input right after castling");
            return self.state();
        }

        if self.is_chess_variant() && shell.confirm(player, Prompt::Undo) {
            match self.undo() {
                Ok(_) => shell.notify(&GameEvent::Undone),
                Err(err) => shell.notify(&GameEvent::Rejected(err)),
            }
            return self.state();
        }

        let (from, to) = match shell.read_move(player) {
            Ok(squares) => squares,
            Err(err) => {
                warn!("Unusable move input from {player}: {err}");
                shell.notify(&GameEvent::Rejected(err));
                return self.state();
            }
        };
        match self.submit_move(from, to) {
            Ok(outcome) => {
                shell.notify(&GameEvent::Moved { from, to });
                if outcome.captured.is_some() {
                    shell.notify(&GameEvent::Captured { by: player, at: to });
                }
                if outcome.promoted {
                    shell.notify(&GameEvent::Promoted { color: player, at: to });
                }
                if outcome.just_captured {
                    shell.notify(&GameEvent::ExtraTurn(player));
                }
            }
            Err(err) => shell.notify(&GameEvent::Rejected(err)),
        }
        let state = self.state();
        if let GameState::Finished(winner) = state {
            shell.notify(&GameEvent::GameOver(winner));
        }
        state
    }

    /// Plays turns until the game is over and returns the winner.
    pub fn play<S: GameShell>(&mut self, shell: &mut S) -> Option<Color> {
        loop {
            if let GameState::Finished(winner) = self.play_turn(shell) {
                return winner;
            }
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::standard()
    }
}
