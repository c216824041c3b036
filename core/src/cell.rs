use serde::{Deserialize, Serialize};

use crate::*;

/// Player-visible state of a single cell.
///
/// Valid transitions are `Hidden -> Revealed` and `Hidden <-> Flagged`; `Revealed` is terminal.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    #[default]
    Hidden,
    Revealed,
    Flagged,
}

impl CellState {
    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::Hidden)
    }

    pub const fn is_revealed(self) -> bool {
        matches!(self, Self::Revealed)
    }

    pub const fn is_flagged(self) -> bool {
        matches!(self, Self::Flagged)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// Row-major id assigned at generation, only meant for keying a display.
    pub id: CellCount,
    pub row: Coord,
    pub col: Coord,
    pub is_mine: bool,
    /// Mines in the Moore neighbourhood, unused for mine cells.
    pub adjacent_mines: u8,
    pub state: CellState,
}

impl Cell {
    pub(crate) const fn new(id: CellCount, (row, col): Coord2) -> Self {
        Self {
            id,
            row,
            col,
            is_mine: false,
            adjacent_mines: 0,
            state: CellState::Hidden,
        }
    }

    pub const fn coords(&self) -> Coord2 {
        (self.row, self.col)
    }

    /// Safe cells count toward winning, mines never do.
    pub const fn is_cleared(&self) -> bool {
        self.is_mine || self.state.is_revealed()
    }
}
