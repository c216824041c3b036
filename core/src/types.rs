use ndarray::Array2;

/// Single grid axis, used for row/column indices and board height/width.
pub type Coord = u8;

/// Count type used for mine counts, cell ids and total-cell counts.
pub type CellCount = u16;

/// Grid position as `(row, col)`, both zero-based.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Converts a row-major cell index back into `(row, col)` for a board `cols` wide.
pub(crate) fn coords_from_index(index: CellCount, cols: Coord) -> Coord2 {
    let cols = CellCount::from(cols.max(1));
    let row = index / cols;
    let col = index % cols;
    (row as Coord, col as Coord)
}

pub trait NeighborIterExt {
    /// Iterates over the Moore neighbourhood of `index`, clipped to the grid.
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter {
        let (rows, cols) = self.dim();
        let bounds = (
            Coord::try_from(rows).unwrap_or(Coord::MAX),
            Coord::try_from(cols).unwrap_or(Coord::MAX),
        );
        NeighborIter::new(index, bounds)
    }
}

/// `(d_row, d_col)` for the eight cells surrounding a position.
const MOORE_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Applies `offset` to `coords`, returning a value only when it remains in bounds.
fn offset_within(coords: Coord2, offset: (i8, i8), bounds: Coord2) -> Option<Coord2> {
    let (row, col) = coords;
    let (d_row, d_col) = offset;
    let (rows, cols) = bounds;

    let next_row = row.checked_add_signed(d_row)?;
    if next_row >= rows {
        return None;
    }

    let next_col = col.checked_add_signed(d_col)?;
    if next_col >= cols {
        return None;
    }

    Some((next_row, next_col))
}

#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    index: u8,
}

impl NeighborIter {
    pub fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(&offset) = MOORE_OFFSETS.get(usize::from(self.index)) {
            self.index += 1;
            if let Some(coords) = offset_within(self.center, offset, self.bounds) {
                return Some(coords);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn corner_has_three_neighbors() {
        let neighbors: Vec<_> = NeighborIter::new((0, 0), (3, 3)).collect();

        assert_eq!(neighbors, [(0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn edge_and_center_neighbor_counts() {
        assert_eq!(NeighborIter::new((0, 1), (3, 3)).count(), 5);
        assert_eq!(NeighborIter::new((1, 1), (3, 3)).count(), 8);
        assert_eq!(NeighborIter::new((2, 2), (3, 3)).count(), 3);
    }

    #[test]
    fn single_cell_grid_has_no_neighbors() {
        assert_eq!(NeighborIter::new((0, 0), (1, 1)).count(), 0);
    }

    #[test]
    fn row_major_index_maps_back_to_coords() {
        assert_eq!(coords_from_index(0, 4), (0, 0));
        assert_eq!(coords_from_index(5, 4), (1, 1));
        assert_eq!(coords_from_index(11, 4), (2, 3));
    }
}
