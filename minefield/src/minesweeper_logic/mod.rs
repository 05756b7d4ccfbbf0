pub mod basic_types;
pub mod board;
pub mod cell_info;
pub mod config;
pub mod field;
pub mod flag_state;
pub mod grid;
pub mod results;
pub mod session;
