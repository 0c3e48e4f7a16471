//! Headless 3x3x3 Rubik's cube simulator: a move algebra, a sticker-level cube
//! model, a scramble generator and an iterative-deepening solver for short
//! scrambles.

pub mod cube;
pub mod error;
pub mod history;
pub mod moves;
pub mod scramble;
pub mod solver;

pub use cube::{Color, Cube};
pub use error::{Error, TokenError};
pub use history::MoveHistory;
pub use moves::{inverse, parse_sequence, Face, Invert, Move, MoveSequence, Turn};
pub use scramble::{generate_scramble, Scrambler};
pub use solver::{
    solve, start_search, CancelToken, SearchOutcome, SearchPhase, SearchSession, SearchStats,
    DEFAULT_MAX_DEPTH,
};
