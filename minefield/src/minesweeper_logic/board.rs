use super::basic_types::SizeType;
use super::flag_state::FlagState;
use super::results::FlagResult;
#[cfg(test)]
use mockall::automock;

/// The operations a session drives a board through.
#[cfg_attr(test, automock)]
pub trait Board: Sized {
    fn create(rows: SizeType, cols: SizeType) -> Result<Self, &'static str>;

    fn reset(&mut self, safe_row: SizeType, safe_col: SizeType, reset_flags: bool);

    /// Returns `false` if a mine was hit.
    fn reveal_at(&mut self, row: SizeType, col: SizeType) -> bool;

    fn flag_at(&mut self, row: SizeType, col: SizeType) -> FlagResult;

    fn rows(&self) -> SizeType;

    fn cols(&self) -> SizeType;

    fn mine_count(&self) -> SizeType;

    fn covered_count(&self) -> SizeType;

    /// Number of successful reveals since the last reset.
    fn move_count(&self) -> SizeType;

    fn is_complete(&self) -> bool;

    /// `None` outside of the board.
    fn flag_state(&self, row: SizeType, col: SizeType) -> Option<FlagState>;
}
