use super::basic_types::{Coordinates, SizeType};
use super::board::Board;
use super::cell_info::CellInfo;
use super::config;
use super::flag_state::FlagState;
use super::grid::{Grid, INVALID_SIZE_ERROR};
use super::results::FlagResult;
use indexmap::IndexSet;
use log::{debug, trace};
use rand::Rng;
use std::fmt;

pub static INVALID_INDEX_ERROR: &'static str = "Invalid index!";

#[derive(Clone, Copy, Default, Debug)]
struct Cell {
    mine: bool,
    hint: u8,
    revealed: bool,
    flag: FlagState,
}

impl Cell {
    fn info(&self) -> CellInfo {
        CellInfo {
            mine: self.mine,
            hint: self.hint,
            revealed: self.revealed,
            flag: self.flag,
        }
    }
}

/// A minesweeper board.
///
/// The mines and hints are fixed between two resets, only the revealed state
/// and the flags change while playing.
#[derive(Clone, Debug)]
pub struct Field {
    cells: Grid<Cell>,
    mine_count: SizeType,
    cell_size: u32,
    covered_count: SizeType,
    flags_count: SizeType,
    move_count: SizeType,
    complete: bool,
}

impl Field {
    fn allocate(rows: SizeType, cols: SizeType) -> Result<Field, &'static str> {
        let cells = Grid::new(rows, cols)?;
        let covered_count = cells.len();
        Ok(Field {
            cells,
            mine_count: 0,
            cell_size: config::DEFAULT_CELL_SIZE,
            covered_count,
            flags_count: 0,
            move_count: 0,
            complete: false,
        })
    }

    /// Creates a randomly mined board. Dimensions below
    /// `config::MIN_DIMENSION` are raised to it.
    pub fn create(rows: SizeType, cols: SizeType) -> Result<Field, &'static str> {
        Field::create_with_rng(rows, cols, &mut rand::thread_rng())
    }

    pub fn create_with_rng<R: Rng + ?Sized>(
        rows: SizeType,
        cols: SizeType,
        rng: &mut R,
    ) -> Result<Field, &'static str> {
        let rows = config::clamp_dimension(rows);
        let cols = config::clamp_dimension(cols);
        let mut field = Field::allocate(rows, cols)?;
        let safe_row = rng.gen_range(0, rows);
        let safe_col = rng.gen_range(0, cols);
        field.reset_with_rng(safe_row, safe_col, true, rng);
        Ok(field)
    }

    /// Creates a board with mines exactly at `mine_locations`.
    pub fn with_mines(
        rows: SizeType,
        cols: SizeType,
        mine_locations: &[Coordinates],
    ) -> Result<Field, &'static str> {
        if rows < config::MIN_DIMENSION || cols < config::MIN_DIMENSION {
            return Err(INVALID_SIZE_ERROR);
        }
        let mut field = Field::allocate(rows, cols)?;
        for &(row, col) in mine_locations {
            field.cells.get_mut(row, col).ok_or(INVALID_INDEX_ERROR)?.mine = true;
        }
        field.mine_count = field.cells.iter().filter(|cell| cell.mine).count();
        field.compute_hints();
        debug!(
            "Laid out {}x{} board with {} given mines",
            rows, cols, field.mine_count
        );
        Ok(field)
    }

    pub fn reset(&mut self, safe_row: SizeType, safe_col: SizeType, reset_flags: bool) {
        self.reset_with_rng(safe_row, safe_col, reset_flags, &mut rand::thread_rng());
    }

    /// Re-mines the board so that no mine lands on the row or the column of
    /// `(safe_row, safe_col)`. Flags survive unless `reset_flags` is set.
    pub fn reset_with_rng<R: Rng + ?Sized>(
        &mut self,
        safe_row: SizeType,
        safe_col: SizeType,
        reset_flags: bool,
        rng: &mut R,
    ) {
        for cell in self.cells.iter_mut() {
            cell.mine = false;
            cell.hint = 0;
            cell.revealed = false;
            if reset_flags {
                cell.flag = FlagState::Unflagged;
            }
        }
        if reset_flags {
            self.flags_count = 0;
        }

        let (rows, cols) = (self.rows(), self.cols());
        self.mine_count = config::mine_count(rows, cols);
        self.place_mines(safe_row, safe_col, rng);
        self.compute_hints();
        self.covered_count = self.cells.len();
        self.move_count = 0;
        self.complete = false;
        debug!(
            "Reset {}x{} board: ratio {:.4}, {} mines, safe cell ({}, {})",
            rows,
            cols,
            config::mine_ratio(rows, cols),
            self.mine_count,
            safe_row,
            safe_col
        );
    }

    fn place_mines<R: Rng + ?Sized>(&mut self, safe_row: SizeType, safe_col: SizeType, rng: &mut R) {
        let mut placed = 0;
        while placed < self.mine_count {
            let row = rng.gen_range(0, self.rows());
            let col = rng.gen_range(0, self.cols());
            // |row - safe_row| < 1 || |col - safe_col| < 1 on integers: the
            // whole row and column of the safe cell stay clear.
            if row == safe_row || col == safe_col {
                continue;
            }
            if let Some(cell) = self.cells.get_mut(row, col) {
                if !cell.mine {
                    cell.mine = true;
                    placed += 1;
                }
            }
        }
    }

    fn count_mines_in_block(&self, row: SizeType, col: SizeType) -> u8 {
        self.cells
            .block(row, col)
            .filter(|&(r, c)| self.cells.get(r, c).map_or(false, |cell| cell.mine))
            .count() as u8
    }

    fn compute_hints(&mut self) {
        let hints: Vec<u8> = self
            .cells
            .coordinates()
            .map(|(row, col)| self.count_mines_in_block(row, col))
            .collect();
        for (cell, hint) in self.cells.iter_mut().zip(hints) {
            cell.hint = hint;
        }
    }

    /// Reveals the cell, cascading over zero hints.
    ///
    /// Returns `false` only when the cell holds a mine. Out of range, flagged
    /// and already revealed cells are left alone and count as success.
    pub fn reveal_at(&mut self, row: SizeType, col: SizeType) -> bool {
        let cell = match self.cells.get_mut(row, col) {
            Some(cell) => cell,
            None => {
                trace!("Ignoring reveal outside of the board at ({}, {})", row, col);
                return true;
            }
        };
        if cell.flag.is_flagged() || cell.revealed {
            return true;
        }
        if cell.mine {
            debug!("Mine hit at ({}, {})", row, col);
            return false;
        }

        cell.revealed = true;
        let cascades = cell.hint == 0;
        self.covered_count -= 1;
        self.move_count += 1;
        if cascades {
            self.cascade(row, col);
        }
        if self.covered_count <= self.mine_count {
            self.complete = true;
        }
        true
    }

    fn cascade(&mut self, row: SizeType, col: SizeType) {
        let mut fields_to_visit = IndexSet::new();
        fields_to_visit.insert((row, col));
        let mut opened: SizeType = 0;

        while let Some((r, c)) = fields_to_visit.pop() {
            for (nr, nc) in self.cells.block(r, c) {
                let neighbor = match self.cells.get_mut(nr, nc) {
                    Some(neighbor) => neighbor,
                    None => continue,
                };
                if neighbor.revealed || neighbor.flag.is_flagged() || neighbor.mine {
                    continue;
                }
                neighbor.revealed = true;
                self.covered_count -= 1;
                opened += 1;
                if neighbor.hint == 0 {
                    fields_to_visit.insert((nr, nc));
                }
            }
        }
        trace!("Cascade from ({}, {}) opened {} cells", row, col, opened);
    }

    /// Cycles the flag of a covered cell.
    pub fn flag_at(&mut self, row: SizeType, col: SizeType) -> FlagResult {
        let cell = match self.cells.get_mut(row, col) {
            Some(cell) => cell,
            None => {
                trace!("Ignoring flag outside of the board at ({}, {})", row, col);
                return FlagResult::OutOfBounds;
            }
        };
        if cell.revealed {
            return FlagResult::AlreadyOpened;
        }

        let previous = cell.flag;
        let current = previous.next();
        cell.flag = current;
        if current.is_danger() {
            self.flags_count += 1;
        } else if previous.is_danger() {
            self.flags_count -= 1;
        }
        FlagResult::Flagged(current)
    }

    pub fn rows(&self) -> SizeType {
        self.cells.rows()
    }

    pub fn cols(&self) -> SizeType {
        self.cells.cols()
    }

    pub fn mine_count(&self) -> SizeType {
        self.mine_count
    }

    pub fn covered_count(&self) -> SizeType {
        self.covered_count
    }

    /// Number of cells flagged as danger.
    pub fn flags_count(&self) -> SizeType {
        self.flags_count
    }

    pub fn move_count(&self) -> SizeType {
        self.move_count
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    pub fn set_cell_size(&mut self, cell_size: u32) {
        self.cell_size = cell_size;
    }

    pub fn cell(&self, row: SizeType, col: SizeType) -> Option<CellInfo> {
        self.cells.get(row, col).map(Cell::info)
    }

    pub fn is_mine(&self, row: SizeType, col: SizeType) -> Option<bool> {
        self.cells.get(row, col).map(|cell| cell.mine)
    }

    pub fn hint(&self, row: SizeType, col: SizeType) -> Option<u8> {
        self.cells.get(row, col).map(|cell| cell.hint)
    }

    pub fn is_revealed(&self, row: SizeType, col: SizeType) -> Option<bool> {
        self.cells.get(row, col).map(|cell| cell.revealed)
    }

    pub fn flag_state(&self, row: SizeType, col: SizeType) -> Option<FlagState> {
        self.cells.get(row, col).map(|cell| cell.flag)
    }

    /// Every mined coordinate, in row-major order. Used to show the board
    /// after a loss.
    pub fn mine_locations(&self) -> impl Iterator<Item = Coordinates> + '_ {
        self.cells
            .coordinates()
            .zip(self.cells.iter())
            .filter(|(_, cell)| cell.mine)
            .map(|(coordinates, _)| coordinates)
    }
}

impl Board for Field {
    fn create(rows: SizeType, cols: SizeType) -> Result<Self, &'static str> {
        Field::create(rows, cols)
    }

    fn reset(&mut self, safe_row: SizeType, safe_col: SizeType, reset_flags: bool) {
        Field::reset(self, safe_row, safe_col, reset_flags)
    }

    fn reveal_at(&mut self, row: SizeType, col: SizeType) -> bool {
        Field::reveal_at(self, row, col)
    }

    fn flag_at(&mut self, row: SizeType, col: SizeType) -> FlagResult {
        Field::flag_at(self, row, col)
    }

    fn rows(&self) -> SizeType {
        Field::rows(self)
    }

    fn cols(&self) -> SizeType {
        Field::cols(self)
    }

    fn mine_count(&self) -> SizeType {
        self.mine_count
    }

    fn covered_count(&self) -> SizeType {
        self.covered_count
    }

    fn move_count(&self) -> SizeType {
        self.move_count
    }

    fn is_complete(&self) -> bool {
        self.complete
    }

    fn flag_state(&self, row: SizeType, col: SizeType) -> Option<FlagState> {
        Field::flag_state(self, row, col)
    }
}

/// One character per cell, the player's view. The alternate form (`{:#}`)
/// also shows the mines.
impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..self.rows() {
            for col in 0..self.cols() {
                let cell = match self.cells.get(row, col) {
                    Some(cell) => cell,
                    None => continue,
                };
                if f.alternate() && cell.mine {
                    write!(f, "X")?;
                } else {
                    write!(f, "{}", cell.info().get_char_repr())?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
