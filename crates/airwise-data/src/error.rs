use std::path::PathBuf;

/// Dataset load failure. Fatal for the session: no partial dataset is returned.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error(
        "missing file: {}. Please ensure city_day.csv, station_day.csv and stations.csv are present",
        path.display()
    )]
    Missing { path: PathBuf },

    #[error("could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV in {}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{} is missing required column {column}", path.display())]
    MissingColumn { path: PathBuf, column: &'static str },

    #[error("no city observations with an AQI reading")]
    Empty,
}
