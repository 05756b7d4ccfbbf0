use super::flag_state::FlagState;
use strum_macros::Display;

#[derive(Clone, Copy, Eq, PartialEq, Display, Debug)]
pub enum FlagResult {
    Flagged(FlagState),
    AlreadyOpened,
    OutOfBounds,
}

#[repr(C)]
#[derive(Clone, Copy, Eq, PartialEq, Display, Debug)]
pub enum OpenResult {
    Ok,
    Boom,
    Winner,
}
