use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::Context;
use sweeper_core::{BestTimeKey, BestTimes};

/// Best times kept in a JSON object keyed by `bestTime-{rows}x{cols}-{mines}`, rewritten on every new record.
#[derive(Debug)]
pub struct JsonBestTimes {
    path: PathBuf,
    times: BTreeMap<String, u32>,
}

impl JsonBestTimes {
    /// Loads the file at `path`, a missing file starts out empty.
    pub fn load(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let path = path.into();
        let times: BTreeMap<String, u32> = match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents)
                .with_context(|| format!("Could not parse best times from {}", path.display()))?,
            Err(err) if err.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("Could not read best times from {}", path.display()));
            }
        };
        log::debug!("Loaded {} best times from {}", times.len(), path.display());
        Ok(Self { path, times })
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let contents = serde_json::to_string_pretty(&self.times)?;
        fs::write(&self.path, contents)
            .with_context(|| format!("Could not write best times to {}", self.path.display()))
    }
}

impl BestTimes for JsonBestTimes {
    fn best_time(&self, key: BestTimeKey) -> Option<u32> {
        self.times.get(&key.to_string()).copied()
    }

    fn record(&mut self, key: BestTimeKey, secs: u32) {
        self.times.insert(key.to_string(), secs);
        if let Err(err) = self.save() {
            log::error!("Could not save best times: {:?}", err);
        }
    }
}
