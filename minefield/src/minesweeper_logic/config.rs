use super::basic_types::SizeType;
use std::cmp;
use strum_macros::{Display, EnumIter};

/// Boards are never smaller than this in either direction.
pub const MIN_DIMENSION: SizeType = 10;
pub const MIN_RATIO: f64 = 0.1;
pub const MAX_RATIO: f64 = 0.2;
/// The area at which the mine ratio starts to grow from `MIN_RATIO`.
pub const RATIO_BASE_AREA: SizeType = 100;
/// The extra area over which the ratio grows by `MAX_RATIO - MIN_RATIO`.
pub const RATIO_RAMP_AREA: SizeType = 480;
pub const DEFAULT_CELL_SIZE: u32 = 20;

#[repr(C)]
#[derive(Clone, Copy, Eq, PartialEq, Display, EnumIter, Debug)]
pub enum GameLevel {
    Beginner,
    Intermediate,
    Expert,
}

impl GameLevel {
    /// Returns `(rows, cols)` of the preset.
    pub fn dimensions(&self) -> (SizeType, SizeType) {
        match self {
            GameLevel::Beginner => (10, 10),
            GameLevel::Intermediate => (16, 16),
            GameLevel::Expert => (16, 30),
        }
    }
}

pub fn clamp_dimension(size: SizeType) -> SizeType {
    cmp::max(size, MIN_DIMENSION)
}

/// Mine density of a board, interpolated linearly on its area and clamped to
/// `[MIN_RATIO, MAX_RATIO]`.
pub fn mine_ratio(rows: SizeType, cols: SizeType) -> f64 {
    let area = rows as f64 * cols as f64;
    let ramp = (area - RATIO_BASE_AREA as f64) / RATIO_RAMP_AREA as f64;
    let ratio = MIN_RATIO + ramp * (MAX_RATIO - MIN_RATIO);
    ratio.max(MIN_RATIO).min(MAX_RATIO)
}

pub fn mine_count(rows: SizeType, cols: SizeType) -> SizeType {
    (rows as f64 * cols as f64 * mine_ratio(rows, cols)).floor() as SizeType
}
