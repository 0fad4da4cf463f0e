// src/simulation/config.rs

use std::path::{Path, PathBuf};

/// Tuning knobs of the goal-seek search.
#[derive(Debug, Clone)]
pub struct GoalSeekConfig {
    /// Upper bound on outer passes over the ledger (not on single trials).
    pub max_iterations: usize,
    /// A trial must beat the best penalty by more than this to be accepted.
    pub epsilon: f64,
}

impl Default for GoalSeekConfig {
    fn default() -> Self {
        Self {
            max_iterations: 1500,
            epsilon: 1e-9,
        }
    }
}

/// Locations of the three data files a planning session reads and writes.
#[derive(Debug, Clone)]
pub struct DataFiles {
    pub stores: PathBuf,
    pub constraints: PathBuf,
    pub targets: PathBuf,
}

impl DataFiles {
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            stores: dir.join("stores.csv"),
            constraints: dir.join("constraints.json"),
            targets: dir.join("targets.json"),
        }
    }
}

impl Default for DataFiles {
    fn default() -> Self {
        Self::in_dir("data")
    }
}
