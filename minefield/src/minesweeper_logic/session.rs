use super::basic_types::SizeType;
use super::board::Board;
use super::config::GameLevel;
use super::field::Field;
use super::results::{FlagResult, OpenResult};
use hrsw::Stopwatch;
use log::info;
use std::time::Duration;
use strum_macros::Display;

pub static GAME_IS_ALREADY_STOPPED_ERROR: &'static str = "Game is already stopped!";

#[derive(Clone, Copy, Eq, PartialEq, Display, Debug)]
pub enum GameState {
    NotStarted,
    Started,
    Stopped { win: bool },
}

/// Owns the board of one game and keeps the rules around it: the first
/// reveal is always safe and nothing can be played after a win or a loss.
pub struct Session<B: Board = Field> {
    board: B,
    stopwatch: Stopwatch,
    state: GameState,
}

impl Session {
    pub fn new(rows: SizeType, cols: SizeType) -> Result<Session, &'static str> {
        Ok(Session::with_board(Field::create(rows, cols)?))
    }

    pub fn with_level(level: GameLevel) -> Result<Session, &'static str> {
        let (rows, cols) = level.dimensions();
        Session::new(rows, cols)
    }
}

impl<B: Board> Session<B> {
    pub fn with_board(board: B) -> Session<B> {
        Session {
            board,
            stopwatch: Stopwatch::new(),
            state: GameState::NotStarted,
        }
    }

    fn start_game_if_needed(&mut self) {
        if self.state != GameState::NotStarted {
            return;
        }

        info!(
            "Game started on a {}x{} board with {} mines",
            self.board.rows(),
            self.board.cols(),
            self.board.mine_count()
        );
        self.stopwatch.start();
        self.state = GameState::Started;
    }

    fn stop_game(&mut self, win: bool) {
        self.stopwatch.stop();
        self.state = GameState::Stopped { win };
        info!(
            "Game {} after {:?}",
            if win { "won" } else { "lost" },
            self.stopwatch.elapsed()
        );
    }

    fn is_stopped(&self) -> bool {
        match self.state {
            GameState::Stopped { .. } => true,
            _ => false,
        }
    }

    pub fn reveal_at(&mut self, row: SizeType, col: SizeType) -> Result<OpenResult, &'static str> {
        if self.is_stopped() {
            return Err(GAME_IS_ALREADY_STOPPED_ERROR);
        }
        if row >= self.board.rows() || col >= self.board.cols() {
            return Ok(OpenResult::Ok);
        }
        // A flagged cell cannot be opened, so it counts as no move at all.
        if self
            .board
            .flag_state(row, col)
            .map_or(false, |flag| flag.is_flagged())
        {
            return Ok(OpenResult::Ok);
        }

        // Until something is revealed the mines are re-laid around the
        // clicked cell, keeping the flags placed so far.
        if self.board.move_count() == 0 {
            self.board.reset(row, col, false);
        }
        self.start_game_if_needed();

        if !self.board.reveal_at(row, col) {
            self.stop_game(false);
            Ok(OpenResult::Boom)
        } else if self.board.is_complete() {
            self.stop_game(true);
            Ok(OpenResult::Winner)
        } else {
            Ok(OpenResult::Ok)
        }
    }

    pub fn flag_at(&mut self, row: SizeType, col: SizeType) -> Result<FlagResult, &'static str> {
        if self.is_stopped() {
            Err(GAME_IS_ALREADY_STOPPED_ERROR)
        } else {
            Ok(self.board.flag_at(row, col))
        }
    }

    /// Replaces the board with a fresh one of the same size.
    pub fn new_game(&mut self) -> Result<(), &'static str> {
        let (rows, cols) = (self.board.rows(), self.board.cols());
        self.resize(rows, cols)
    }

    pub fn resize(&mut self, rows: SizeType, cols: SizeType) -> Result<(), &'static str> {
        self.board = B::create(rows, cols)?;
        self.stopwatch = Stopwatch::new();
        self.state = GameState::NotStarted;
        Ok(())
    }

    pub fn board(&self) -> &B {
        &self.board
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn get_elapsed(&self) -> Duration {
        self.stopwatch.elapsed()
    }
}
