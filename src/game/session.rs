use tracing::{debug, info};

use super::board::BoardError;
use super::{Board, Dimensions, Player, Players, Seat, WinLine};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    InProgress,
    Won { winner: Seat, line: WinLine },
    Tied,
}

impl GameState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameState::InProgress)
    }
}

/// What a successful drop did. `row` is where the piece came to rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    Continuing { row: usize, next: Seat },
    Won { row: usize, winner: Seat, line: WinLine },
    Tied { row: usize },
}

impl DropOutcome {
    pub fn row(&self) -> usize {
        match *self {
            DropOutcome::Continuing { row, .. }
            | DropOutcome::Won { row, .. }
            | DropOutcome::Tied { row } => row,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column {column} is out of range (board has {width} columns)")]
    InvalidColumn { column: usize, width: usize },

    #[error("column {column} is full")]
    ColumnFull { column: usize },

    #[error("game is already over")]
    GameOver,
}

impl From<BoardError> for MoveError {
    fn from(err: BoardError) -> Self {
        match err {
            BoardError::InvalidColumn { column, width } => MoveError::InvalidColumn { column, width },
            BoardError::ColumnFull { column } => MoveError::ColumnFull { column },
        }
    }
}

/// One match between two players. Owns the board; once the state is
/// terminal the board and turn never change again.
#[derive(Debug, Clone)]
pub struct GameSession {
    players: Players,
    board: Board,
    current: Seat,
    state: GameState,
    moves_played: usize,
}

impl GameSession {
    pub fn new(first: Player, second: Player, dimensions: Dimensions) -> Self {
        GameSession {
            players: Players::new(first, second),
            board: Board::new(dimensions),
            current: Seat::First,
            state: GameState::InProgress,
            moves_played: 0,
        }
    }

    /// Discard the board and state and start over with a fresh board
    pub fn restart(&mut self, first: Player, second: Player, dimensions: Dimensions) {
        info!(%dimensions, first = first.name(), second = second.name(), "restarting game");
        *self = GameSession::new(first, second, dimensions);
    }

    /// Drop the current player's piece into `column`.
    ///
    /// Rejections leave board, turn and state untouched.
    pub fn drop_piece(&mut self, column: usize) -> Result<DropOutcome, MoveError> {
        if self.is_terminal() {
            debug!(column, "drop rejected: game over");
            return Err(MoveError::GameOver);
        }

        let seat = self.current;
        let row = self.board.find_landing_row(column).inspect_err(|err| {
            debug!(column, %err, "drop rejected");
        })?;
        self.board.place(row, column, seat);
        self.moves_played += 1;
        debug!(row, column, player = seat.number(), "piece placed");

        // Lines through the new piece first; the full scan only matters if a
        // line was somehow left unreported.
        let line = self
            .board
            .winning_line_through(row, column, seat)
            .or_else(|| self.board.find_winning_line(seat));

        if let Some(line) = line {
            info!(player = seat.number(), moves = self.moves_played, "game won");
            self.state = GameState::Won { winner: seat, line };
            return Ok(DropOutcome::Won { row, winner: seat, line });
        }

        if self.board.is_full() {
            info!(moves = self.moves_played, "game tied");
            self.state = GameState::Tied;
            return Ok(DropOutcome::Tied { row });
        }

        self.current = seat.other();
        Ok(DropOutcome::Continuing {
            row,
            next: self.current,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn dimensions(&self) -> Dimensions {
        self.board.dimensions()
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// Check if game is over
    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    /// Seat whose turn it is (or who just won)
    pub fn current_seat(&self) -> Seat {
        self.current
    }

    pub fn current_player(&self) -> &Player {
        self.players.get(self.current)
    }

    pub fn player(&self, seat: Seat) -> &Player {
        self.players.get(seat)
    }

    /// The player occupying a cell; `None` for empty or out-of-range cells
    pub fn cell_occupant(&self, row: usize, col: usize) -> Option<&Player> {
        self.board
            .cell(row, col)
            .and_then(|cell| cell.seat())
            .map(|seat| self.players.get(seat))
    }

    /// Columns a drop would currently succeed in
    pub fn legal_columns(&self) -> Vec<usize> {
        if self.is_terminal() {
            return Vec::new();
        }
        self.board.legal_columns()
    }

    pub fn moves_played(&self) -> usize {
        self.moves_played
    }
}
