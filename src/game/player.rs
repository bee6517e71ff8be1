use super::board::Cell;

/// One of the two seats at the table. This is the identity the engine tracks:
/// cells, turns and winners all refer to a seat, never to display attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Seat {
    First,
    Second,
}

impl Seat {
    /// Get the other seat
    pub fn other(self) -> Seat {
        match self {
            Seat::First => Seat::Second,
            Seat::Second => Seat::First,
        }
    }

    /// Convert seat to cell type
    pub fn to_cell(self) -> Cell {
        Cell::Occupied(self)
    }

    /// One-based player number, as shown to people
    pub fn number(self) -> usize {
        match self {
            Seat::First => 1,
            Seat::Second => 2,
        }
    }

    fn index(self) -> usize {
        self.number() - 1
    }
}

/// Display attributes for a participant. The engine never inspects these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    name: String,
    color: String,
}

impl Player {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Player {
            name: name.into(),
            color: color.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Color as configured, e.g. `#ff0000` or `yellow`
    pub fn color(&self) -> &str {
        &self.color
    }
}

/// The fixed pair of players for one session, indexed by seat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Players([Player; 2]);

impl Players {
    pub fn new(first: Player, second: Player) -> Self {
        Players([first, second])
    }

    pub fn get(&self, seat: Seat) -> &Player {
        &self.0[seat.index()]
    }
}
