pub const N_RANKS: usize = 8;
pub const N_FILES: usize = 8;
pub const N_SQUARES: usize = N_RANKS * N_FILES;

pub const SET_MARKER: char = 'X';
pub const CLEAR_MARKER: char = '.';
