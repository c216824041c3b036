use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use sweeper_core::{BestTimes, BoardConfig, CellCount, Coord, GameError, Session};

use best_times::JsonBestTimes;
use command::{Command, HELP};

mod best_times;
mod command;
mod render;

#[derive(Parser, Debug)]
#[command(version, about = "Minesweeper in the terminal", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Board rows, clamped to 5..=40
    #[arg(short, long, default_value_t = 8)]
    rows: Coord,

    /// Board columns, clamped to 5..=40
    #[arg(short, long, default_value_t = 8)]
    cols: Coord,

    /// Mines, clamped to 1..rows*cols
    #[arg(short, long, default_value_t = 10)]
    mines: CellCount,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Where best times are kept
    #[arg(long, default_value = "sweeper-best-times.json")]
    best_times: PathBuf,
}

/// Turns wall-clock time into whole-second session ticks.
struct Clock {
    last: Instant,
}

impl Clock {
    fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }

    fn sync<B: BestTimes>(&mut self, session: &mut Session<B>) {
        let secs = self.last.elapsed().as_secs();
        for _ in 0..secs {
            session.tick();
        }
        self.last += Duration::from_secs(secs);
    }

    fn reset(&mut self) {
        self.last = Instant::now();
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    if let Some(log_level) = args.verbose.log_level() {
        env_logger::Builder::new()
            .filter_level(log_level.to_level_filter())
            .init();
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    log::debug!("seed: {}", seed);

    let best_times = JsonBestTimes::load(&args.best_times)?;
    let config = BoardConfig::new((args.rows, args.cols), args.mines);
    let mut session = Session::new(config, seed, best_times);
    let mut clock = Clock::new();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}", render::render_session(&session))?;
    writeln!(out, "{}", HELP)?;

    for line in io::stdin().lock().lines() {
        let line = line.context("Could not read from stdin")?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                writeln!(out, "{}", err)?;
                continue;
            }
        };

        clock.sync(&mut session);
        let was_idle = session.state().is_idle();
        let result = match command {
            Command::Reveal(coords) => session.reveal(coords).map(|outcome| outcome.has_update()),
            Command::Flag(coords) => session.toggle_flag(coords).map(|outcome| outcome.has_update()),
            Command::NewGame => {
                session.restart();
                Ok(true)
            }
            Command::Settings(rows, cols, mines) => {
                session.change_settings(rows, cols, mines);
                Ok(true)
            }
            Command::Help => {
                writeln!(out, "{}", HELP)?;
                continue;
            }
            Command::Quit => break,
        };
        if (was_idle && !session.state().is_idle()) || matches!(command, Command::NewGame) {
            clock.reset();
        }

        match result {
            Ok(true) => writeln!(out, "{}", render::render_session(&session))?,
            Ok(false) => writeln!(out, "Nothing changed.")?,
            Err(GameError::InvalidCoords) => {
                let (rows, cols) = session.board().size();
                writeln!(out, "Coordinates must be below {} rows and {} columns.", rows, cols)?;
            }
            Err(err) => writeln!(out, "{}", err)?,
        }
        out.flush()?;
    }

    Ok(())
}
