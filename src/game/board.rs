use std::fmt;

use super::Seat;

/// Number of consecutive same-owner cells needed to win.
pub const WIN_LENGTH: usize = 4;

pub const DEFAULT_HEIGHT: usize = 6;
pub const DEFAULT_WIDTH: usize = 7;

/// Largest accepted height or width.
pub const MAX_SIDE: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Occupied(Seat),
}

impl Cell {
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    pub fn seat(self) -> Option<Seat> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(seat) => Some(seat),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DimensionError {
    #[error("board height must be > 0")]
    ZeroHeight,

    #[error("board width must be > 0")]
    ZeroWidth,

    #[error("board size {height}x{width} is too large (each side at most {MAX_SIDE})")]
    TooLarge { height: usize, width: usize },
}

/// Grid size in rows × columns. Both are always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimensions {
    height: usize,
    width: usize,
}

impl Dimensions {
    pub fn new(height: usize, width: usize) -> Result<Self, DimensionError> {
        if height == 0 {
            return Err(DimensionError::ZeroHeight);
        }
        if width == 0 {
            return Err(DimensionError::ZeroWidth);
        }
        if height > MAX_SIDE || width > MAX_SIDE || height.checked_mul(width).is_none() {
            return Err(DimensionError::TooLarge { height, width });
        }
        Ok(Dimensions { height, width })
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn cell_count(&self) -> usize {
        self.height * self.width
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Dimensions {
            height: DEFAULT_HEIGHT,
            width: DEFAULT_WIDTH,
        }
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.height, self.width)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("column {column} is out of range (board has {width} columns)")]
    InvalidColumn { column: usize, width: usize },

    #[error("column {column} is full")]
    ColumnFull { column: usize },
}

/// The four line orientations, each walked forward from its first cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Horizontal,
    Vertical,
    DiagonalDownRight,
    DiagonalDownLeft,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Horizontal,
        Direction::Vertical,
        Direction::DiagonalDownRight,
        Direction::DiagonalDownLeft,
    ];

    /// Step as (Δrow, Δcolumn)
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Horizontal => (0, 1),
            Direction::Vertical => (1, 0),
            Direction::DiagonalDownRight => (1, 1),
            Direction::DiagonalDownLeft => (1, -1),
        }
    }

    /// The orientation this one maps to under a left-right mirror
    pub fn mirrored(self) -> Direction {
        match self {
            Direction::DiagonalDownRight => Direction::DiagonalDownLeft,
            Direction::DiagonalDownLeft => Direction::DiagonalDownRight,
            other => other,
        }
    }
}

/// Four consecutive cells owned by one seat, in walk order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WinLine {
    pub direction: Direction,
    pub cells: [(usize, usize); WIN_LENGTH],
}

impl WinLine {
    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.cells.contains(&(row, col))
    }
}

/// Row 0 is the top, row `height - 1` the bottom. Pieces fall toward higher rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    dimensions: Dimensions,
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board
    pub fn new(dimensions: Dimensions) -> Self {
        Board {
            dimensions,
            cells: vec![Cell::Empty; dimensions.cell_count()],
        }
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn height(&self) -> usize {
        self.dimensions.height
    }

    pub fn width(&self) -> usize {
        self.dimensions.width
    }

    fn index(&self, row: usize, col: usize) -> usize {
        row * self.dimensions.width + col
    }

    fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.height() && col < self.width()
    }

    /// Get the cell at a specific position.
    ///
    /// # Panics
    /// If `(row, col)` is outside the board.
    pub fn get(&self, row: usize, col: usize) -> Cell {
        assert!(
            self.in_bounds(row, col),
            "cell ({row}, {col}) outside {} board",
            self.dimensions
        );
        self.cells[self.index(row, col)]
    }

    /// Get the cell at a position, or `None` if it is outside the board
    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        self.in_bounds(row, col)
            .then(|| self.cells[self.index(row, col)])
    }

    /// Lowest empty row in `col`, scanning from the bottom up.
    pub fn find_landing_row(&self, col: usize) -> Result<usize, BoardError> {
        if col >= self.width() {
            return Err(BoardError::InvalidColumn {
                column: col,
                width: self.width(),
            });
        }

        (0..self.height())
            .rev()
            .find(|&row| self.get(row, col).is_empty())
            .ok_or(BoardError::ColumnFull { column: col })
    }

    /// Write `seat` into an empty cell.
    ///
    /// # Panics
    /// If the cell is outside the board or already occupied. Callers obtain
    /// `row` from [`Board::find_landing_row`].
    pub fn place(&mut self, row: usize, col: usize, seat: Seat) {
        assert!(
            self.get(row, col).is_empty(),
            "cell ({row}, {col}) is already occupied"
        );
        let idx = self.index(row, col);
        self.cells[idx] = seat.to_cell();
    }

    /// Find the landing row and place the piece there
    pub fn drop_piece(&mut self, col: usize, seat: Seat) -> Result<usize, BoardError> {
        let row = self.find_landing_row(col)?;
        self.place(row, col, seat);
        Ok(row)
    }

    /// Check if a column has no empty cell. Out-of-range columns count as full.
    pub fn is_column_full(&self, col: usize) -> bool {
        if col >= self.width() {
            return true;
        }
        (0..self.height()).all(|row| !self.get(row, col).is_empty())
    }

    /// Columns that can still take a piece
    pub fn legal_columns(&self) -> Vec<usize> {
        (0..self.width())
            .filter(|&col| !self.is_column_full(col))
            .collect()
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }

    /// Rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.dimensions.width)
    }

    /// The four cells starting at (row, col) along `direction`, if all are in
    /// bounds and owned by `seat`.
    fn line_from(&self, row: isize, col: isize, direction: Direction, seat: Seat) -> Option<WinLine> {
        let (d_row, d_col) = direction.delta();
        let mut cells = [(0, 0); WIN_LENGTH];

        for (k, slot) in cells.iter_mut().enumerate() {
            let r = usize::try_from(row + k as isize * d_row).ok()?;
            let c = usize::try_from(col + k as isize * d_col).ok()?;
            if self.cell(r, c)? != seat.to_cell() {
                return None;
            }
            *slot = (r, c);
        }

        Some(WinLine { direction, cells })
    }

    /// Does a four-in-a-row for `seat` start at (row, col) in any direction?
    pub fn has_win_from(&self, row: usize, col: usize, seat: Seat) -> bool {
        Direction::ALL
            .iter()
            .any(|&d| self.line_from(row as isize, col as isize, d, seat).is_some())
    }

    /// A four-in-a-row for `seat` that passes through (row, col), if any.
    pub fn winning_line_through(&self, row: usize, col: usize, seat: Seat) -> Option<WinLine> {
        for direction in Direction::ALL {
            let (d_row, d_col) = direction.delta();
            for back in 0..WIN_LENGTH as isize {
                let start_row = row as isize - back * d_row;
                let start_col = col as isize - back * d_col;
                if let Some(line) = self.line_from(start_row, start_col, direction, seat) {
                    return Some(line);
                }
            }
        }
        None
    }

    /// Scan every cell for a four-in-a-row owned by `seat`.
    pub fn find_winning_line(&self, seat: Seat) -> Option<WinLine> {
        for row in 0..self.height() {
            for col in 0..self.width() {
                for direction in Direction::ALL {
                    if let Some(line) = self.line_from(row as isize, col as isize, direction, seat) {
                        return Some(line);
                    }
                }
            }
        }
        None
    }

    /// Copy of this board flipped left to right
    pub fn mirrored(&self) -> Board {
        let width = self.width();
        let mut mirrored = Board::new(self.dimensions);
        for row in 0..self.height() {
            for col in 0..width {
                let idx = mirrored.index(row, width - 1 - col);
                mirrored.cells[idx] = self.get(row, col);
            }
        }
        mirrored
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(Dimensions::default())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for cell in row {
                let symbol = match cell {
                    Cell::Empty => '.',
                    Cell::Occupied(Seat::First) => '1',
                    Cell::Occupied(Seat::Second) => '2',
                };
                write!(f, "{symbol}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
