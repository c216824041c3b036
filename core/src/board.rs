use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Smallest board side accepted by [`BoardConfig::new`].
pub const MIN_SIDE: Coord = 5;
/// Largest board side accepted by [`BoardConfig::new`].
pub const MAX_SIDE: Coord = 40;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    /// `(rows, cols)`
    pub size: Coord2,
    pub mines: CellCount,
}

impl BoardConfig {
    /// Takes the values as they are, generating from a config where `mines >= rows * cols` yields a degenerate board.
    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Clamps rows and columns into `MIN_SIDE..=MAX_SIDE` and mines into `1..rows * cols`.
    pub fn new((rows, cols): Coord2, mines: CellCount) -> Self {
        let rows = rows.clamp(MIN_SIDE, MAX_SIDE);
        let cols = cols.clamp(MIN_SIDE, MAX_SIDE);
        let mines = mines.clamp(1, mult(rows, cols) - 1);
        Self::new_unchecked((rows, cols), mines)
    }

    /// Rejects configs that cannot produce a well-formed board instead of clamping.
    pub fn try_new(size: Coord2, mines: CellCount) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(GameError::EmptyBoard);
        }
        if mines >= mult(size.0, size.1) {
            return Err(GameError::TooManyMines);
        }
        Ok(Self::new_unchecked(size, mines))
    }

    pub const fn rows(&self) -> Coord {
        self.size.0
    }

    pub const fn cols(&self) -> Coord {
        self.size.1
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::new_unchecked((8, 8), 10)
    }
}

/// Full `rows x cols` grid of cells at one point in time.
///
/// Boards are snapshots: the engine functions take `&Board` and hand back a new one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Cell>,
}

impl Board {
    /// Builds a board with every cell hidden, safe and numbered row-major.
    pub(crate) fn blank((rows, cols): Coord2) -> Self {
        let cells = Array2::from_shape_fn([usize::from(rows), usize::from(cols)], |(row, col)| {
            let coords = (row as Coord, col as Coord);
            Cell::new(row as CellCount * CellCount::from(cols) + col as CellCount, coords)
        });
        Self { cells }
    }

    /// Builds a hidden board with mines at exactly `mine_coords`.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut board = Self::blank(size);

        for &coords in mine_coords {
            let coords = board.validate_coords(coords)?;
            board.cells[coords.to_nd_index()].is_mine = true;
        }

        board.count_adjacent_mines();
        Ok(board)
    }

    /// Fills in `adjacent_mines` for every non-mine cell.
    pub(crate) fn count_adjacent_mines(&mut self) {
        let (rows, cols) = self.size();
        for row in 0..rows {
            for col in 0..cols {
                let coords = (row, col);
                if self[coords].is_mine {
                    continue;
                }
                let count = self
                    .iter_neighbors(coords)
                    .filter(|&pos| self[pos].is_mine)
                    .count();
                self.cells[coords.to_nd_index()].adjacent_mines = count as u8;
            }
        }
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    /// `(rows, cols)`
    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.cells.dim();
        (rows as Coord, cols as Coord)
    }

    pub fn rows(&self) -> Coord {
        self.size().0
    }

    pub fn cols(&self) -> Coord {
        self.size().1
    }

    pub fn config(&self) -> BoardConfig {
        BoardConfig::new_unchecked(self.size(), self.mine_count())
    }

    pub fn total_cells(&self) -> CellCount {
        self.cells.len() as CellCount
    }

    pub fn mine_count(&self) -> CellCount {
        self.count_where(|cell| cell.is_mine)
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count()
    }

    pub fn revealed_count(&self) -> CellCount {
        self.count_where(|cell| cell.state.is_revealed())
    }

    pub fn flagged_count(&self) -> CellCount {
        self.count_where(|cell| cell.state.is_flagged())
    }

    /// Mines minus flags, negative when the player over-flags.
    pub fn mines_left(&self) -> isize {
        self.mine_count() as isize - self.flagged_count() as isize
    }

    pub fn cell_at(&self, coords: Coord2) -> Option<&Cell> {
        self.cells.get(coords.to_nd_index())
    }

    /// Cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Cells of a single row, left to right.
    pub fn row(&self, row: Coord) -> impl Iterator<Item = &Cell> {
        self.cells.row(row.into()).into_iter()
    }

    pub fn is_won(&self) -> bool {
        is_win(self)
    }

    pub(crate) fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }

    pub(crate) fn set_state(&mut self, coords: Coord2, state: CellState) {
        self.cells[coords.to_nd_index()].state = state;
    }

    pub(crate) fn set_mine(&mut self, coords: Coord2) {
        self.cells[coords.to_nd_index()].is_mine = true;
    }

    pub(crate) fn cells_mut(&mut self) -> impl Iterator<Item = &mut Cell> {
        self.cells.iter_mut()
    }

    fn count_where(&self, pred: impl Fn(&Cell) -> bool) -> CellCount {
        self.cells.iter().filter(|&cell| pred(cell)).count() as CellCount
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_board_numbers_cells_row_major() {
        let board = Board::blank((2, 3));

        assert_eq!(board.size(), (2, 3));
        assert_eq!(board[(0, 0)].id, 0);
        assert_eq!(board[(0, 2)].id, 2);
        assert_eq!(board[(1, 0)].id, 3);
        assert_eq!(board[(1, 2)].coords(), (1, 2));
        assert!(board.iter().all(|cell| cell.state == CellState::Hidden && !cell.is_mine));
    }

    #[test]
    fn from_mine_coords_counts_neighbors_with_clipping() {
        // * . .
        // . . .
        // . . *
        let board = Board::from_mine_coords((3, 3), &[(0, 0), (2, 2)]).unwrap();

        assert_eq!(board.mine_count(), 2);
        assert_eq!(board[(0, 1)].adjacent_mines, 1);
        assert_eq!(board[(1, 1)].adjacent_mines, 2);
        assert_eq!(board[(0, 2)].adjacent_mines, 0);
        assert_eq!(board[(2, 0)].adjacent_mines, 0);
        assert_eq!(board[(2, 1)].adjacent_mines, 1);
    }

    #[test]
    fn from_mine_coords_rejects_out_of_range() {
        assert_eq!(
            Board::from_mine_coords((2, 2), &[(2, 0)]),
            Err(GameError::InvalidCoords)
        );
    }

    #[test]
    fn config_new_clamps_into_ui_bounds() {
        let config = BoardConfig::new((1, 99), 0);
        assert_eq!(config.size, (MIN_SIDE, MAX_SIDE));
        assert_eq!(config.mines, 1);

        let config = BoardConfig::new((5, 5), 500);
        assert_eq!(config.mines, 24);
    }

    #[test]
    fn config_try_new_rejects_degenerate_boards() {
        assert_eq!(BoardConfig::try_new((0, 3), 1), Err(GameError::EmptyBoard));
        assert_eq!(BoardConfig::try_new((2, 2), 4), Err(GameError::TooManyMines));
        assert_eq!(
            BoardConfig::try_new((2, 2), 3),
            Ok(BoardConfig::new_unchecked((2, 2), 3))
        );
    }

    #[test]
    fn counts_follow_cell_states() {
        let mut board = Board::from_mine_coords((2, 2), &[(0, 0)]).unwrap();
        board.set_state((1, 1), CellState::Revealed);
        board.set_state((0, 0), CellState::Flagged);
        board.set_state((0, 1), CellState::Flagged);

        assert_eq!(board.safe_cell_count(), 3);
        assert_eq!(board.revealed_count(), 1);
        assert_eq!(board.flagged_count(), 2);
        assert_eq!(board.mines_left(), -1);
        assert!(board.cell_at((2, 0)).is_none());
    }
}
