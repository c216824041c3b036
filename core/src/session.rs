use alloc::collections::BTreeMap;
use alloc::string::String;
use core::fmt;
use rand::{SeedableRng, rngs::SmallRng};
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Idle -> Playing
/// - Playing -> Won
/// - Playing -> Lost
/// - any -> Playing on restart
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// Board shown but the clock is not running, settings changes regenerate the board
    #[default]
    Idle,
    Playing,
    Won,
    Lost,
}

impl SessionState {
    pub const fn is_idle(self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Game ended and no moves are accepted until a restart
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    /// The click only started a fresh game
    Started,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    /// The click only started a fresh game
    Started,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

/// Best times are tracked per board shape and mine count.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BestTimeKey {
    pub rows: Coord,
    pub cols: Coord,
    pub mines: CellCount,
}

impl From<BoardConfig> for BestTimeKey {
    fn from(config: BoardConfig) -> Self {
        Self {
            rows: config.rows(),
            cols: config.cols(),
            mines: config.mines,
        }
    }
}

impl fmt::Display for BestTimeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bestTime-{}x{}-{}", self.rows, self.cols, self.mines)
    }
}

/// Storage for the fastest win, in seconds, per [`BestTimeKey`].
pub trait BestTimes {
    fn best_time(&self, key: BestTimeKey) -> Option<u32>;
    fn record(&mut self, key: BestTimeKey, secs: u32);
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryBestTimes {
    times: BTreeMap<BestTimeKey, u32>,
}

impl BestTimes for MemoryBestTimes {
    fn best_time(&self, key: BestTimeKey) -> Option<u32> {
        self.times.get(&key).copied()
    }

    fn record(&mut self, key: BestTimeKey, secs: u32) {
        self.times.insert(key, secs);
    }
}

/// A game from start to finish: owns the current board snapshot, the clock and the best times.
#[derive(Debug)]
pub struct Session<B: BestTimes> {
    config: BoardConfig,
    board: Board,
    state: SessionState,
    elapsed_secs: u32,
    rng: SmallRng,
    best_times: B,
}

impl<B: BestTimes> Session<B> {
    /// Starts idle with a freshly generated board, later boards are drawn from the same seeded stream.
    pub fn new(config: BoardConfig, seed: u64, best_times: B) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let board = generate(config, &mut rng);
        Self {
            config,
            board,
            state: SessionState::Idle,
            elapsed_secs: 0,
            rng,
            best_times,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn config(&self) -> BoardConfig {
        self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    pub fn best_times(&self) -> &B {
        &self.best_times
    }

    /// Best time recorded for the current settings
    pub fn best_time(&self) -> Option<u32> {
        self.best_times.best_time(self.config.into())
    }

    /// Applies clamped settings, the board is only replaced right away while idle.
    pub fn change_settings(&mut self, rows: Coord, cols: Coord, mines: CellCount) {
        self.config = BoardConfig::new((rows, cols), mines);
        log::debug!("Settings changed to {:?}", self.config);
        if self.state.is_idle() {
            self.board = generate(self.config, &mut self.rng);
        }
    }

    /// Deals a new board for the current settings and starts the clock.
    pub fn restart(&mut self) {
        let board = generate(self.config, &mut self.rng);
        self.restart_with(board);
    }

    /// Starts playing on a given board, the settings follow the board.
    pub fn restart_with(&mut self, board: Board) {
        self.config = board.config();
        self.board = board;
        self.state = SessionState::Playing;
        self.elapsed_secs = 0;
        log::info!("New game started with {:?}", self.config);
    }

    /// Advances the clock by a second while a game is running.
    pub fn tick(&mut self) {
        if matches!(self.state, SessionState::Playing) {
            self.elapsed_secs = self.elapsed_secs.saturating_add(1);
        }
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        use RevealOutcome::*;

        match self.state {
            SessionState::Idle => {
                self.restart();
                return Ok(Started);
            }
            SessionState::Won | SessionState::Lost => return Ok(NoChange),
            SessionState::Playing => {}
        }

        let Reveal { board, exploded } = engine::reveal(&self.board, coords)?;
        if board == self.board {
            return Ok(NoChange);
        }
        self.board = board;

        if exploded {
            self.state = SessionState::Lost;
            log::info!("Lost after {} seconds", self.elapsed_secs);
            return Ok(HitMine);
        }

        if is_win(&self.board) {
            self.state = SessionState::Won;
            log::info!("Won after {} seconds", self.elapsed_secs);
            self.record_best_time();
            return Ok(Won);
        }

        Ok(Revealed)
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        use MarkOutcome::*;

        match self.state {
            SessionState::Idle => {
                self.restart();
                return Ok(Started);
            }
            SessionState::Won | SessionState::Lost => return Ok(NoChange),
            SessionState::Playing => {}
        }

        let board = engine::toggle_flag(&self.board, coords)?;
        if board == self.board {
            return Ok(NoChange);
        }
        self.board = board;
        Ok(Changed)
    }

    fn record_best_time(&mut self) {
        let key = BestTimeKey::from(self.config);
        let previous = self.best_times.best_time(key);
        if previous.is_none_or(|best| self.elapsed_secs < best) {
            log::info!(
                "New best time for {}: {} (previous {:?})",
                key,
                self.elapsed_secs,
                previous
            );
            self.best_times.record(key, self.elapsed_secs);
        }
    }
}

/// Formats seconds as `mm:ss`, minutes keep growing past an hour.
pub fn format_time(secs: u32) -> String {
    alloc::format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session<MemoryBestTimes> {
        Session::new(BoardConfig::new((8, 8), 10), 5, MemoryBestTimes::default())
    }

    // * . .
    // . . .
    // . . .
    fn corner_mine() -> Board {
        Board::from_mine_coords((3, 3), &[(0, 0)]).unwrap()
    }

    #[test]
    fn first_click_only_starts_the_game() {
        let mut session = session();
        let idle_board = session.board().clone();

        assert_eq!(session.reveal((0, 0)).unwrap(), RevealOutcome::Started);
        assert_eq!(session.state(), SessionState::Playing);
        assert_eq!(session.board().revealed_count(), 0);
        assert_ne!(session.board(), &idle_board);
    }

    #[test]
    fn flag_click_while_idle_starts_the_game() {
        let mut session = session();

        assert_eq!(session.toggle_flag((1, 1)).unwrap(), MarkOutcome::Started);
        assert_eq!(session.state(), SessionState::Playing);
        assert_eq!(session.board().flagged_count(), 0);
    }

    #[test]
    fn settings_regenerate_only_while_idle() {
        let mut session = session();

        session.change_settings(10, 12, 20);
        assert_eq!(session.board().size(), (10, 12));
        assert_eq!(session.board().mine_count(), 20);

        session.restart();
        session.change_settings(6, 6, 3);
        assert_eq!(session.board().size(), (10, 12));
        assert_eq!(session.config(), BoardConfig::new((6, 6), 3));

        session.restart();
        assert_eq!(session.board().size(), (6, 6));
    }

    #[test]
    fn settings_are_clamped() {
        let mut session = session();

        session.change_settings(2, 80, 1000);

        assert_eq!(session.config().size, (MIN_SIDE, MAX_SIDE));
        assert_eq!(session.config().mines, mult(MIN_SIDE, MAX_SIDE) - 1);
    }

    #[test]
    fn hitting_a_mine_loses_and_freezes_the_board() {
        let mut session = session();
        session.restart_with(corner_mine());

        assert_eq!(session.reveal((0, 0)).unwrap(), RevealOutcome::HitMine);
        assert_eq!(session.state(), SessionState::Lost);
        assert_eq!(session.board()[(0, 0)].state, CellState::Revealed);

        assert_eq!(session.reveal((2, 2)).unwrap(), RevealOutcome::NoChange);
        assert_eq!(session.toggle_flag((2, 2)).unwrap(), MarkOutcome::NoChange);
        assert_eq!(session.board()[(2, 2)].state, CellState::Hidden);
    }

    #[test]
    fn clearing_the_board_wins_and_records_best_time() {
        let mut session = session();
        session.restart_with(corner_mine());
        session.tick();
        session.tick();

        assert_eq!(session.reveal((2, 2)).unwrap(), RevealOutcome::Won);
        assert_eq!(session.state(), SessionState::Won);
        assert_eq!(session.best_time(), Some(2));

        session.tick();
        assert_eq!(session.elapsed_secs(), 2);
    }

    #[test]
    fn slower_win_keeps_previous_best_time() {
        let mut session = session();
        let key = BestTimeKey::from(corner_mine().config());

        session.restart_with(corner_mine());
        session.tick();
        session.reveal((2, 2)).unwrap();
        assert_eq!(session.best_times().best_time(key), Some(1));

        session.restart_with(corner_mine());
        for _ in 0..5 {
            session.tick();
        }
        assert_eq!(session.reveal((2, 2)).unwrap(), RevealOutcome::Won);
        assert_eq!(session.best_times().best_time(key), Some(1));

        session.restart_with(corner_mine());
        assert_eq!(session.reveal((2, 2)).unwrap(), RevealOutcome::Won);
        assert_eq!(session.best_times().best_time(key), Some(0));
    }

    #[test]
    fn repeated_moves_report_no_change() {
        let mut session = session();
        session.restart_with(Board::from_mine_coords((3, 3), &[(0, 0), (2, 2)]).unwrap());

        assert_eq!(session.reveal((1, 1)).unwrap(), RevealOutcome::Revealed);
        assert_eq!(session.reveal((1, 1)).unwrap(), RevealOutcome::NoChange);
        assert_eq!(session.toggle_flag((1, 1)).unwrap(), MarkOutcome::NoChange);

        assert_eq!(session.toggle_flag((0, 0)).unwrap(), MarkOutcome::Changed);
        assert_eq!(session.reveal((0, 0)).unwrap(), RevealOutcome::NoChange);
        assert_eq!(session.state(), SessionState::Playing);
    }

    #[test]
    fn clock_only_runs_while_playing() {
        let mut session = session();
        session.tick();
        assert_eq!(session.elapsed_secs(), 0);

        session.restart();
        session.tick();
        session.tick();
        assert_eq!(session.elapsed_secs(), 2);

        session.restart();
        assert_eq!(session.elapsed_secs(), 0);
    }

    #[test]
    fn invalid_coords_are_rejected_while_playing() {
        let mut session = session();
        session.restart_with(corner_mine());

        assert_eq!(session.reveal((3, 0)), Err(GameError::InvalidCoords));
        assert_eq!(session.toggle_flag((0, 9)), Err(GameError::InvalidCoords));
    }

    #[test]
    fn best_time_key_format() {
        let key = BestTimeKey::from(BoardConfig::new((8, 8), 10));

        assert_eq!(alloc::format!("{key}"), "bestTime-8x8-10");
    }

    #[test]
    fn format_time_pads_minutes_and_seconds() {
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(75), "01:15");
        assert_eq!(format_time(3600), "60:00");
    }
}
