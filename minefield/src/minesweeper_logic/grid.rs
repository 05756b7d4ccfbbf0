use super::basic_types::{Coordinates, SizeType};

pub static INVALID_SIZE_ERROR: &'static str = "Invalid size!";

static BLOCK_OFFSETS: [(i8, i8); 9] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 0),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

fn add(u: SizeType, i: i8) -> Option<SizeType> {
    if i.is_negative() {
        u.checked_sub(i.wrapping_abs() as u8 as SizeType)
    } else {
        u.checked_add(i as SizeType)
    }
}

/// Row-major two dimensional storage. Every coordinate based access goes
/// through `index_of`, so out of range coordinates simply yield `None`.
#[derive(Clone, Debug)]
pub struct Grid<T> {
    rows: SizeType,
    cols: SizeType,
    values: Vec<T>,
}

impl<T: Clone + Default> Grid<T> {
    pub fn new(rows: SizeType, cols: SizeType) -> Result<Grid<T>, &'static str> {
        let len = rows.checked_mul(cols).ok_or(INVALID_SIZE_ERROR)?;
        let mut values = Vec::new();
        values.try_reserve_exact(len).map_err(|_| INVALID_SIZE_ERROR)?;
        values.resize(len, T::default());
        Ok(Grid { rows, cols, values })
    }
}

impl<T> Grid<T> {
    pub fn rows(&self) -> SizeType {
        self.rows
    }

    pub fn cols(&self) -> SizeType {
        self.cols
    }

    pub fn len(&self) -> SizeType {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn contains(&self, row: SizeType, col: SizeType) -> bool {
        row < self.rows && col < self.cols
    }

    fn index_of(&self, row: SizeType, col: SizeType) -> Option<usize> {
        if self.contains(row, col) {
            Some(row * self.cols + col)
        } else {
            None
        }
    }

    pub fn get(&self, row: SizeType, col: SizeType) -> Option<&T> {
        let index = self.index_of(row, col)?;
        self.values.get(index)
    }

    pub fn get_mut(&mut self, row: SizeType, col: SizeType) -> Option<&mut T> {
        let index = self.index_of(row, col)?;
        self.values.get_mut(index)
    }

    /// Iterates over the values in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.values.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.values.iter_mut()
    }

    /// Iterates over every coordinate in the same order as `iter`.
    pub fn coordinates(&self) -> impl Iterator<Item = Coordinates> {
        let cols = self.cols;
        (0..self.rows).flat_map(move |row| (0..cols).map(move |col| (row, col)))
    }

    /// The 3x3 block centered on `(row, col)`, the center included, clipped to
    /// the grid.
    pub fn block(&self, row: SizeType, col: SizeType) -> impl Iterator<Item = Coordinates> {
        let (rows, cols) = (self.rows, self.cols);
        BLOCK_OFFSETS
            .iter()
            .filter_map(move |offset| match (add(row, offset.0), add(col, offset.1)) {
                (Some(r), Some(c)) if r < rows && c < cols => Some((r, c)),
                _ => None,
            })
    }
}
