mod minesweeper_logic;
pub use minesweeper_logic::basic_types::{Coordinates, SizeType};
pub use minesweeper_logic::board::Board;
pub use minesweeper_logic::cell_info::CellInfo;
pub use minesweeper_logic::config;
pub use minesweeper_logic::config::GameLevel;
pub use minesweeper_logic::field::Field;
pub use minesweeper_logic::flag_state::FlagState;
pub use minesweeper_logic::grid::Grid;
pub use minesweeper_logic::results::{FlagResult, OpenResult};
pub use minesweeper_logic::session::{GameState, Session};
