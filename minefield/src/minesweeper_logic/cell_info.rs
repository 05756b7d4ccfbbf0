use super::flag_state::FlagState;

/// Snapshot of a single cell, everything a renderer needs to draw it.
#[repr(C)]
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub struct CellInfo {
    pub mine: bool,
    pub hint: u8,
    pub revealed: bool,
    pub flag: FlagState,
}

impl CellInfo {
    /// The player's view of the cell.
    pub fn get_char_repr(&self) -> char {
        if !self.revealed {
            self.flag.get_char_repr()
        } else if self.hint == 0 {
            ' '
        } else {
            std::char::from_digit(self.hint as u32, 10).unwrap_or('#')
        }
    }
}
