//! Path resolution for dataset and log files

use std::path::{Path, PathBuf};

pub const CITY_DAY_FILE: &str = "city_day.csv";
pub const STATION_DAY_FILE: &str = "station_day.csv";
pub const STATIONS_FILE: &str = "stations.csv";

/// The three input tables the loader requires
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataFiles {
    pub city_day: PathBuf,
    pub station_day: PathBuf,
    pub stations: PathBuf,
}

impl DataFiles {
    /// Standard file names inside `dir`
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            city_day: dir.join(CITY_DAY_FILE),
            station_day: dir.join(STATION_DAY_FILE),
            stations: dir.join(STATIONS_FILE),
        }
    }

    pub fn all(&self) -> [&Path; 3] {
        [&self.city_day, &self.station_day, &self.stations]
    }

    /// Required files that are not on disk
    pub fn missing(&self) -> Vec<&Path> {
        self.all().into_iter().filter(|p| !p.exists()).collect()
    }
}

impl Default for DataFiles {
    fn default() -> Self {
        Self::in_dir(Path::new("."))
    }
}

/// Output logs written by chat and batch runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFiles {
    pub transcript: PathBuf,
    pub batch_results: PathBuf,
}

impl LogFiles {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            transcript: dir.join("chat_log.csv"),
            batch_results: dir.join("batch_results.csv"),
        }
    }
}

impl Default for LogFiles {
    fn default() -> Self {
        Self::in_dir(Path::new("."))
    }
}
