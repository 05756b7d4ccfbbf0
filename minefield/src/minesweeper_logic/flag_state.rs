use strum_macros::Display;

/// Player annotation on a covered cell. Flags are advisory only.
#[repr(C)]
#[derive(Clone, Copy, Eq, PartialEq, Display, Debug)]
pub enum FlagState {
    Unflagged = 0,
    Warning = 1,
    Danger = 2,
}

impl FlagState {
    /// The next state in the unflagged -> warning -> danger -> unflagged cycle.
    pub fn next(self) -> FlagState {
        match self {
            FlagState::Unflagged => FlagState::Warning,
            FlagState::Warning => FlagState::Danger,
            FlagState::Danger => FlagState::Unflagged,
        }
    }

    pub fn is_flagged(&self) -> bool {
        self != &FlagState::Unflagged
    }

    pub fn is_danger(&self) -> bool {
        self == &FlagState::Danger
    }

    pub fn get_char_repr(&self) -> char {
        match self {
            FlagState::Unflagged => 'O',
            FlagState::Warning => '?',
            FlagState::Danger => 'H',
        }
    }
}

impl Default for FlagState {
    fn default() -> Self {
        FlagState::Unflagged
    }
}
