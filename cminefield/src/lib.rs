use libc::c_char;
use minefield::{CellInfo, FlagResult, FlagState, GameLevel, OpenResult, Session};
use std::cmp;
use std::convert::TryFrom;
use std::ptr;

#[repr(C)]
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum CError {
    Ok,
    InvalidInput,
    NullPointerAsInput,
    IndexIsOutOfRange,
    InsufficientBuffer,
    UnexpectedError,
}

macro_rules! return_error {
    ($error_info_ptr:ident, $error_code:expr, $error_msg:expr) => {{
        let error_info = unsafe { &mut *$error_info_ptr };
        let error_message: &str = $error_msg;
        if !error_message.is_empty()
            && error_info.error_message_max_length > 0
            && !error_info.error_message.is_null()
        {
            let len_without_terminator = cmp::min(
                usize::try_from(error_info.error_message_max_length - 1).unwrap_or(usize::MAX),
                error_message.len(),
            );
            unsafe {
                ptr::copy_nonoverlapping(
                    error_message.as_ptr(),
                    error_info.error_message as *mut u8,
                    len_without_terminator,
                );
                *error_info.error_message.add(len_without_terminator) = 0;
            }
            error_info.error_message_length = len_without_terminator as u64;
        }
        error_info.error_code = $error_code;
        return;
    }};
    ($error_info_ptr:ident, $error_code:expr) => {
        return_error!($error_info_ptr, $error_code, "")
    };
}

macro_rules! return_or_assign {
    ($x:expr, $error_info_ptr:ident, $error_code:expr) => {
        match $x {
            Ok(value) => value,
            Err(error_msg) => {
                return_error!($error_info_ptr, $error_code, error_msg);
            }
        }
    };
    ($x:expr, $error_info_ptr:ident) => {
        return_or_assign!($x, $error_info_ptr, CError::UnexpectedError)
    };
}

// Without an error info there is no way to report anything, so the call is
// dropped.
macro_rules! initialize_to_ok {
    ($error_info_ptr:ident) => {
        if $error_info_ptr.is_null() {
            return;
        }
        let error_info = unsafe { &mut *$error_info_ptr };
        error_info.error_code = CError::Ok;
        error_info.error_message_length = 0;
    };
}

#[repr(C)]
pub struct CErrorInfo {
    error_code: CError,
    error_message_length: u64,
    error_message_max_length: u64,
    error_message: *mut c_char,
}

#[repr(C)]
pub struct CBoardInfo {
    rows: u64,
    cols: u64,
    mine_count: u64,
    covered_count: u64,
    flags_count: u64,
    cell_size: u32,
    complete: bool,
}

fn convert_size_u64_to_usize(size: u64) -> Result<usize, &'static str> {
    usize::try_from(size).map_err(|_| "Size is too big to convert to usize!")
}

fn convert_size(size: usize) -> Result<u64, &'static str> {
    u64::try_from(size).map_err(|_| "Size is too big to convert to u64!")
}

// Negative coordinates come from pointer positions left of or above the
// board; they are mapped to `None` and ignored like any other outside click.
fn convert_coordinates(row: i64, column: i64) -> Option<(usize, usize)> {
    match (usize::try_from(row), usize::try_from(column)) {
        (Ok(urow), Ok(ucolumn)) => Some((urow, ucolumn)),
        _ => None,
    }
}

fn create_session(
    session_ptr_ptr: *mut *mut Session,
    session: Result<Session, &'static str>,
    c_ei_ptr: *mut CErrorInfo,
) {
    if session_ptr_ptr.is_null() {
        return_error!(c_ei_ptr, CError::NullPointerAsInput);
    }
    let session_ptr = unsafe { &mut *session_ptr_ptr };
    if !session_ptr.is_null() {
        return_error!(c_ei_ptr, CError::InvalidInput);
    }
    let session = return_or_assign!(session, c_ei_ptr, CError::InvalidInput);

    *session_ptr = Box::into_raw(Box::new(session));
}

#[no_mangle]
pub extern "C" fn minefield_new_session(
    session_ptr_ptr: *mut *mut Session,
    rows: u64,
    cols: u64,
    c_ei_ptr: *mut CErrorInfo,
) {
    initialize_to_ok!(c_ei_ptr);
    let urows = return_or_assign!(convert_size_u64_to_usize(rows), c_ei_ptr, CError::InvalidInput);
    let ucols = return_or_assign!(convert_size_u64_to_usize(cols), c_ei_ptr, CError::InvalidInput);
    create_session(session_ptr_ptr, Session::new(urows, ucols), c_ei_ptr);
}

#[no_mangle]
pub extern "C" fn minefield_new_session_with_level(
    session_ptr_ptr: *mut *mut Session,
    game_level: GameLevel,
    c_ei_ptr: *mut CErrorInfo,
) {
    initialize_to_ok!(c_ei_ptr);
    create_session(session_ptr_ptr, Session::with_level(game_level), c_ei_ptr);
}

#[no_mangle]
pub extern "C" fn minefield_destroy_session(session_ptr: *mut Session) {
    if session_ptr.is_null() {
        return;
    }
    drop(unsafe { Box::from_raw(session_ptr) });
}

#[no_mangle]
pub extern "C" fn minefield_session_reveal(
    session_ptr: *mut Session,
    row: i64,
    column: i64,
    open_result_ptr: *mut OpenResult,
    c_ei_ptr: *mut CErrorInfo,
) {
    initialize_to_ok!(c_ei_ptr);
    if session_ptr.is_null() || open_result_ptr.is_null() {
        return_error!(c_ei_ptr, CError::NullPointerAsInput);
    }
    let session = unsafe { &mut *session_ptr };
    let open_result = unsafe { &mut *open_result_ptr };
    *open_result = match convert_coordinates(row, column) {
        Some((urow, ucolumn)) => {
            return_or_assign!(session.reveal_at(urow, ucolumn), c_ei_ptr, CError::InvalidInput)
        }
        None => OpenResult::Ok,
    };
}

/// Cycles the flag of a cell and writes its new state. Clicks outside of the
/// board leave `flag_state_ptr` untouched.
#[no_mangle]
pub extern "C" fn minefield_session_flag(
    session_ptr: *mut Session,
    row: i64,
    column: i64,
    flag_state_ptr: *mut FlagState,
    c_ei_ptr: *mut CErrorInfo,
) {
    initialize_to_ok!(c_ei_ptr);
    if session_ptr.is_null() || flag_state_ptr.is_null() {
        return_error!(c_ei_ptr, CError::NullPointerAsInput);
    }
    let (urow, ucolumn) = match convert_coordinates(row, column) {
        Some(coordinates) => coordinates,
        None => return,
    };
    let session = unsafe { &mut *session_ptr };
    let flag_state = unsafe { &mut *flag_state_ptr };
    match return_or_assign!(session.flag_at(urow, ucolumn), c_ei_ptr, CError::InvalidInput) {
        FlagResult::Flagged(new_state) => *flag_state = new_state,
        FlagResult::AlreadyOpened => *flag_state = FlagState::Unflagged,
        FlagResult::OutOfBounds => (),
    }
}

#[no_mangle]
pub extern "C" fn minefield_session_new_game(session_ptr: *mut Session, c_ei_ptr: *mut CErrorInfo) {
    initialize_to_ok!(c_ei_ptr);
    if session_ptr.is_null() {
        return_error!(c_ei_ptr, CError::NullPointerAsInput);
    }
    let session = unsafe { &mut *session_ptr };
    return_or_assign!(session.new_game(), c_ei_ptr);
}

#[no_mangle]
pub extern "C" fn minefield_session_resize(
    session_ptr: *mut Session,
    rows: u64,
    cols: u64,
    c_ei_ptr: *mut CErrorInfo,
) {
    initialize_to_ok!(c_ei_ptr);
    if session_ptr.is_null() {
        return_error!(c_ei_ptr, CError::NullPointerAsInput);
    }
    let urows = return_or_assign!(convert_size_u64_to_usize(rows), c_ei_ptr, CError::InvalidInput);
    let ucols = return_or_assign!(convert_size_u64_to_usize(cols), c_ei_ptr, CError::InvalidInput);
    let session = unsafe { &mut *session_ptr };
    return_or_assign!(session.resize(urows, ucols), c_ei_ptr, CError::InvalidInput);
}

#[no_mangle]
pub extern "C" fn minefield_session_get_cell(
    session_ptr: *mut Session,
    row: u64,
    column: u64,
    cell_info_ptr: *mut CellInfo,
    c_ei_ptr: *mut CErrorInfo,
) {
    initialize_to_ok!(c_ei_ptr);
    if session_ptr.is_null() || cell_info_ptr.is_null() {
        return_error!(c_ei_ptr, CError::NullPointerAsInput);
    }
    let urow = return_or_assign!(convert_size_u64_to_usize(row), c_ei_ptr, CError::IndexIsOutOfRange);
    let ucolumn = return_or_assign!(
        convert_size_u64_to_usize(column),
        c_ei_ptr,
        CError::IndexIsOutOfRange
    );
    let session = unsafe { &*session_ptr };
    let cell_info = unsafe { &mut *cell_info_ptr };
    *cell_info = return_or_assign!(
        session.board().cell(urow, ucolumn).ok_or("Invalid index!"),
        c_ei_ptr,
        CError::IndexIsOutOfRange
    );
}

#[no_mangle]
pub extern "C" fn minefield_session_get_board_info(
    session_ptr: *mut Session,
    board_info_ptr: *mut CBoardInfo,
    c_ei_ptr: *mut CErrorInfo,
) {
    initialize_to_ok!(c_ei_ptr);
    if session_ptr.is_null() || board_info_ptr.is_null() {
        return_error!(c_ei_ptr, CError::NullPointerAsInput);
    }
    let board = unsafe { &*session_ptr }.board();
    let board_info = unsafe { &mut *board_info_ptr };
    board_info.rows = return_or_assign!(convert_size(board.rows()), c_ei_ptr);
    board_info.cols = return_or_assign!(convert_size(board.cols()), c_ei_ptr);
    board_info.mine_count = return_or_assign!(convert_size(board.mine_count()), c_ei_ptr);
    board_info.covered_count = return_or_assign!(convert_size(board.covered_count()), c_ei_ptr);
    board_info.flags_count = return_or_assign!(convert_size(board.flags_count()), c_ei_ptr);
    board_info.cell_size = board.cell_size();
    board_info.complete = board.is_complete();
}

#[no_mangle]
pub extern "C" fn minefield_session_get_elapsed_seconds(
    session_ptr: *mut Session,
    elapsed_seconds_ptr: *mut u64,
    c_ei_ptr: *mut CErrorInfo,
) {
    initialize_to_ok!(c_ei_ptr);
    if session_ptr.is_null() || elapsed_seconds_ptr.is_null() {
        return_error!(c_ei_ptr, CError::NullPointerAsInput);
    }
    let session = unsafe { &*session_ptr };
    let elapsed_seconds = unsafe { &mut *elapsed_seconds_ptr };
    *elapsed_seconds = session.get_elapsed().as_secs();
}

#[cfg(test)]
mod test {
    use super::*;
    use minefield::GameState;

    struct ErrorBuffer {
        message: Vec<c_char>,
        info: CErrorInfo,
    }

    impl ErrorBuffer {
        fn new() -> Box<ErrorBuffer> {
            let mut buffer = Box::new(ErrorBuffer {
                message: vec![0; 64],
                info: CErrorInfo {
                    error_code: CError::UnexpectedError,
                    error_message_length: 0,
                    error_message_max_length: 64,
                    error_message: ptr::null_mut(),
                },
            });
            buffer.info.error_message = buffer.message.as_mut_ptr();
            buffer
        }

        fn ptr(&mut self) -> *mut CErrorInfo {
            &mut self.info
        }

        fn message(&self) -> String {
            let length = self.info.error_message_length as usize;
            self.message[..length].iter().map(|c| *c as u8 as char).collect()
        }
    }

    fn new_session(rows: u64, cols: u64) -> *mut Session {
        let mut errors = ErrorBuffer::new();
        let mut session_ptr: *mut Session = ptr::null_mut();
        minefield_new_session(&mut session_ptr, rows, cols, errors.ptr());
        assert_eq!(CError::Ok, errors.info.error_code);
        assert!(!session_ptr.is_null());
        session_ptr
    }

    fn empty_board_info() -> CBoardInfo {
        CBoardInfo {
            rows: 0,
            cols: 0,
            mine_count: 0,
            covered_count: 0,
            flags_count: 0,
            cell_size: 0,
            complete: false,
        }
    }

    #[test]
    fn create_and_describe() {
        let session_ptr = new_session(12, 3);
        let mut errors = ErrorBuffer::new();
        let mut board_info = empty_board_info();
        minefield_session_get_board_info(session_ptr, &mut board_info, errors.ptr());
        assert_eq!(CError::Ok, errors.info.error_code);
        assert_eq!(12, board_info.rows);
        assert_eq!(10, board_info.cols);
        assert_eq!(12, board_info.mine_count);
        assert_eq!(120, board_info.covered_count);
        assert_eq!(20, board_info.cell_size);
        assert!(!board_info.complete);
        minefield_destroy_session(session_ptr);
    }

    #[test]
    fn create_with_level() {
        let mut errors = ErrorBuffer::new();
        let mut session_ptr: *mut Session = ptr::null_mut();
        minefield_new_session_with_level(&mut session_ptr, GameLevel::Expert, errors.ptr());
        assert_eq!(CError::Ok, errors.info.error_code);
        let mut board_info = empty_board_info();
        minefield_session_get_board_info(session_ptr, &mut board_info, errors.ptr());
        assert_eq!(16, board_info.rows);
        assert_eq!(30, board_info.cols);

        minefield_new_session_with_level(&mut session_ptr, GameLevel::Beginner, errors.ptr());
        assert_eq!(CError::InvalidInput, errors.info.error_code);
        minefield_destroy_session(session_ptr);
    }

    #[test]
    fn too_big_session_reports_message() {
        let mut errors = ErrorBuffer::new();
        let mut session_ptr: *mut Session = ptr::null_mut();
        minefield_new_session(&mut session_ptr, u64::MAX, 2, errors.ptr());
        assert_eq!(CError::InvalidInput, errors.info.error_code);
        assert!(session_ptr.is_null());
        assert!(!errors.message().is_empty());
    }

    #[test]
    fn unallocatable_session_reports_error() {
        let mut errors = ErrorBuffer::new();
        let mut session_ptr: *mut Session = ptr::null_mut();
        minefield_new_session(&mut session_ptr, 1u64 << 32, 1u64 << 31, errors.ptr());
        assert_eq!(CError::InvalidInput, errors.info.error_code);
        assert!(session_ptr.is_null());

        let session_ptr = new_session(10, 10);
        minefield_session_resize(session_ptr, 1u64 << 32, 1u64 << 31, errors.ptr());
        assert_eq!(CError::InvalidInput, errors.info.error_code);
        minefield_destroy_session(session_ptr);
    }

    #[test]
    fn null_pointers() {
        let mut errors = ErrorBuffer::new();
        minefield_new_session(ptr::null_mut(), 10, 10, errors.ptr());
        assert_eq!(CError::NullPointerAsInput, errors.info.error_code);

        let mut open_result = OpenResult::Ok;
        minefield_session_reveal(ptr::null_mut(), 0, 0, &mut open_result, errors.ptr());
        assert_eq!(CError::NullPointerAsInput, errors.info.error_code);

        let session_ptr = new_session(10, 10);
        minefield_session_reveal(session_ptr, 0, 0, ptr::null_mut(), errors.ptr());
        assert_eq!(CError::NullPointerAsInput, errors.info.error_code);
        minefield_session_reveal(session_ptr, 0, 0, &mut open_result, ptr::null_mut());
        minefield_destroy_session(session_ptr);
        minefield_destroy_session(ptr::null_mut());
    }

    #[test]
    fn reveal_and_read_cells() {
        let session_ptr = new_session(10, 10);
        let mut errors = ErrorBuffer::new();
        let mut open_result = OpenResult::Boom;
        minefield_session_reveal(session_ptr, 4, 4, &mut open_result, errors.ptr());
        assert_eq!(CError::Ok, errors.info.error_code);
        assert_ne!(OpenResult::Boom, open_result);

        let mut cell_info = CellInfo {
            mine: true,
            hint: 0,
            revealed: false,
            flag: FlagState::Unflagged,
        };
        minefield_session_get_cell(session_ptr, 4, 4, &mut cell_info, errors.ptr());
        assert_eq!(CError::Ok, errors.info.error_code);
        assert!(cell_info.revealed);
        assert!(!cell_info.mine);

        minefield_session_get_cell(session_ptr, 10, 0, &mut cell_info, errors.ptr());
        assert_eq!(CError::IndexIsOutOfRange, errors.info.error_code);
        assert_eq!("Invalid index!", errors.message());
        minefield_destroy_session(session_ptr);
    }

    #[test]
    fn negative_coordinates_are_ignored() {
        let session_ptr = new_session(10, 10);
        let mut errors = ErrorBuffer::new();
        let mut open_result = OpenResult::Boom;
        minefield_session_reveal(session_ptr, -1, 3, &mut open_result, errors.ptr());
        assert_eq!(CError::Ok, errors.info.error_code);
        assert_eq!(OpenResult::Ok, open_result);

        let mut flag_state = FlagState::Danger;
        minefield_session_flag(session_ptr, 2, -7, &mut flag_state, errors.ptr());
        assert_eq!(CError::Ok, errors.info.error_code);
        assert_eq!(FlagState::Danger, flag_state);

        let session = unsafe { &*session_ptr };
        assert_eq!(GameState::NotStarted, session.state());
        assert_eq!(100, session.board().covered_count());
        minefield_destroy_session(session_ptr);
    }

    #[test]
    fn flag_cycle() {
        let session_ptr = new_session(10, 10);
        let mut errors = ErrorBuffer::new();
        let mut flag_state = FlagState::Unflagged;
        let expected_states = vec![FlagState::Warning, FlagState::Danger, FlagState::Unflagged];
        for expected_state in expected_states {
            minefield_session_flag(session_ptr, 1, 2, &mut flag_state, errors.ptr());
            assert_eq!(CError::Ok, errors.info.error_code);
            assert_eq!(expected_state, flag_state);
        }
        minefield_destroy_session(session_ptr);
    }

    #[test]
    fn new_game_and_resize() {
        let session_ptr = new_session(10, 10);
        let mut errors = ErrorBuffer::new();
        let mut open_result = OpenResult::Boom;
        minefield_session_reveal(session_ptr, 0, 0, &mut open_result, errors.ptr());

        minefield_session_new_game(session_ptr, errors.ptr());
        assert_eq!(CError::Ok, errors.info.error_code);
        let mut board_info = empty_board_info();
        minefield_session_get_board_info(session_ptr, &mut board_info, errors.ptr());
        assert_eq!(100, board_info.covered_count);

        minefield_session_resize(session_ptr, 30, 30, errors.ptr());
        assert_eq!(CError::Ok, errors.info.error_code);
        minefield_session_get_board_info(session_ptr, &mut board_info, errors.ptr());
        assert_eq!(900, board_info.covered_count);
        assert_eq!(180, board_info.mine_count);

        let mut elapsed_seconds = u64::MAX;
        minefield_session_get_elapsed_seconds(session_ptr, &mut elapsed_seconds, errors.ptr());
        assert_eq!(0, elapsed_seconds);
        minefield_destroy_session(session_ptr);
    }
}
