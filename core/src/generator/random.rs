use alloc::vec::Vec;
use rand::Rng;

use super::*;

/// Uniform mine placement from a seeded `SmallRng`, reproducible for a given seed.
///
/// There is no first-click safety: the layout is fixed before any cell is revealed.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomBoardGenerator {
    seed: u64,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(self, config: BoardConfig) -> Board {
        use rand::{SeedableRng, rngs::SmallRng};

        let mut rng = SmallRng::seed_from_u64(self.seed);
        generate(config, &mut rng)
    }
}

/// Builds a fresh hidden board with `config.mines` distinct mines and adjacency counts filled in.
///
/// The config is trusted: asking for `rows * cols` mines or more fills the whole board.
pub fn generate<R: Rng>(config: BoardConfig, rng: &mut R) -> Board {
    let mut board = Board::blank(config.size);
    let total_cells = config.total_cells();

    if config.mines >= total_cells {
        log::warn!(
            "Board already full, generated anyway, requested {} mines but only {} cells",
            config.mines,
            total_cells
        );
    }

    // shrinking pool of candidate cell indices, one uniform draw per mine
    let mut pool: Vec<CellCount> = (0..total_cells).collect();
    for _ in 0..config.mines {
        if pool.is_empty() {
            break;
        }
        let picked = pool.swap_remove(rng.random_range(0..pool.len()));
        board.set_mine(coords_from_index(picked, config.cols()));
    }

    board.count_adjacent_mines();

    // double check mine count
    let count = board.mine_count();
    if count != config.mines {
        log::warn!(
            "Generated board mine count mismatch, actual: {}, requested: {}",
            count,
            config.mines
        );
    }
    log::debug!(
        "Generated {}x{} board with {} mines",
        config.rows(),
        config.cols(),
        count
    );

    board
}
