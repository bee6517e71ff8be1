//! Core Connect Four logic: the board, seats and players, and the session
//! that turns column drops into wins, ties and turn changes.

mod board;
mod player;
mod session;

pub use board::{
    Board, BoardError, Cell, DEFAULT_HEIGHT, DEFAULT_WIDTH, DimensionError, Dimensions, Direction,
    MAX_SIDE, WIN_LENGTH, WinLine,
};
pub use player::{Player, Players, Seat};
pub use session::{DropOutcome, GameSession, GameState, MoveError};
