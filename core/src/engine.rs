use alloc::collections::VecDeque;
use serde::{Deserialize, Serialize};

use crate::*;

/// Snapshot produced by [`reveal`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reveal {
    pub board: Board,
    /// The revealed cell was a mine; every mine on `board` is now revealed.
    pub exploded: bool,
}

/// Reveals the cell at `coords` on a copy of `board`.
///
/// Cells that are not hidden (revealed or flagged) are left alone. A mine exposes every mine on the board, a safe
/// cell flood-fills its connected zero region and the numbered cells bordering it.
pub fn reveal(board: &Board, coords: Coord2) -> Result<Reveal> {
    let coords = board.validate_coords(coords)?;
    let mut board = board.clone();
    let cell = board[coords];

    if !cell.state.is_hidden() {
        log::trace!("Ignoring reveal of {:?} cell at {:?}", cell.state, coords);
        return Ok(Reveal {
            board,
            exploded: false,
        });
    }

    if cell.is_mine {
        log::debug!("Hit mine at {:?}", coords);
        for mine in board.cells_mut().filter(|cell| cell.is_mine) {
            mine.state = CellState::Revealed;
        }
        return Ok(Reveal {
            board,
            exploded: true,
        });
    }

    flood_reveal(&mut board, coords);
    Ok(Reveal {
        board,
        exploded: false,
    })
}

fn flood_reveal(board: &mut Board, origin: Coord2) {
    let mut to_visit = VecDeque::from([origin]);
    log::debug!(
        "Reveal cell at {:?}, mine count: {}",
        origin,
        board[origin].adjacent_mines
    );

    while let Some(visit_coords) = to_visit.pop_front() {
        let visit = board[visit_coords];
        if visit.state.is_revealed() {
            continue;
        }

        board.set_state(visit_coords, CellState::Revealed);
        log::trace!(
            "Flood revealed cell at {:?}, mine count: {}",
            visit_coords,
            visit.adjacent_mines
        );

        // only zero cells keep spreading, numbered cells form the border
        if visit.adjacent_mines == 0 {
            to_visit.extend(board.iter_neighbors(visit_coords).filter(|&pos| {
                let neighbor = board[pos];
                neighbor.state.is_hidden() && !neighbor.is_mine
            }));
        }
    }
}

/// Flags a hidden cell or unflags a flagged one on a copy of `board`, revealed cells stay as they are.
pub fn toggle_flag(board: &Board, coords: Coord2) -> Result<Board> {
    use CellState::*;

    let coords = board.validate_coords(coords)?;
    let mut board = board.clone();

    match board[coords].state {
        Hidden => board.set_state(coords, Flagged),
        Flagged => board.set_state(coords, Hidden),
        Revealed => {}
    }

    Ok(board)
}

/// Whether every safe cell has been revealed, the state of mine cells does not matter.
pub fn is_win(board: &Board) -> bool {
    board.iter().all(Cell::is_cleared)
}
