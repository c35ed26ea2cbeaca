//! Latest-snapshot loading from the city/station day tables

use crate::error::LoadError;
use crate::records::{
    coerce_aqi, non_blank, CityDayRow, DayRow, StationDayRow, StationRow, CITY_DAY_COLUMNS,
    STATIONS_COLUMNS, STATION_DAY_COLUMNS,
};
use airwise_core::{Alert, Config, EntityKind, GroundingContext, LatestTable, Observation};
use airwise_telemetry::DataFiles;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Result of one dataset load. Computed once and handed to collaborators.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Full latest tables, for display and alerts
    pub cities: LatestTable,
    pub stations: LatestTable,
    /// Distinct names, for prompt metadata
    pub city_names: Vec<String>,
    pub station_names: Vec<String>,
}

impl Dataset {
    /// Sampled tables for the prompt
    pub fn grounding(&self, config: &Config) -> GroundingContext {
        GroundingContext::new(
            &self.cities,
            &self.stations,
            &self.city_names,
            &self.station_names,
            config,
        )
    }

    pub fn worst_city_alert(&self) -> Option<Alert> {
        Alert::for_worst(&self.cities)
    }
}

/// Loads the three input tables named by `DataFiles`
#[derive(Debug, Clone)]
pub struct DatasetLoader {
    files: DataFiles,
}

impl DatasetLoader {
    pub fn new(files: DataFiles) -> Self {
        Self { files }
    }

    pub fn files(&self) -> &DataFiles {
        &self.files
    }

    pub fn load(&self) -> Result<Dataset, LoadError> {
        if let Some(path) = self.files.missing().first() {
            return Err(LoadError::Missing {
                path: path.to_path_buf(),
            });
        }

        let city_day = open(&self.files.city_day)?;
        let station_day = open(&self.files.station_day)?;
        let stations = open(&self.files.stations)?;

        let dataset = load_tables(
            (city_day, self.files.city_day.as_path()),
            (station_day, self.files.station_day.as_path()),
            (stations, self.files.stations.as_path()),
        )?;
        tracing::info!(
            cities = dataset.cities.len(),
            stations = dataset.stations.len(),
            "loaded AQI dataset"
        );
        Ok(dataset)
    }

    /// Load from in-memory tables
    pub fn from_readers<A: Read, B: Read, C: Read>(
        city_day: A,
        station_day: B,
        stations: C,
    ) -> Result<Dataset, LoadError> {
        load_tables(
            (city_day, Path::new("city_day")),
            (station_day, Path::new("station_day")),
            (stations, Path::new("stations")),
        )
    }
}

fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn load_tables<A: Read, B: Read, C: Read>(
    city_day: (A, &Path),
    station_day: (B, &Path),
    stations: (C, &Path),
) -> Result<Dataset, LoadError> {
    let city_rows: Vec<CityDayRow> = read_table(city_day.0, city_day.1, CITY_DAY_COLUMNS)?;
    let station_rows: Vec<StationDayRow> =
        read_table(station_day.0, station_day.1, STATION_DAY_COLUMNS)?;
    let metadata: Vec<StationRow> = read_table(stations.0, stations.1, STATIONS_COLUMNS)?;

    let cities = latest_cities(city_rows.into_iter().map(DayRow::from).collect());
    if cities.is_empty() {
        return Err(LoadError::Empty);
    }
    let stations = latest_stations(
        station_rows.into_iter().map(DayRow::from).collect(),
        metadata,
    );

    Ok(Dataset {
        city_names: cities.names(),
        station_names: stations.names(),
        cities,
        stations,
    })
}

fn read_table<T: DeserializeOwned, R: Read>(
    reader: R,
    path: &Path,
    required: &[&'static str],
) -> Result<Vec<T>, LoadError> {
    let malformed = |source: csv::Error| LoadError::Malformed {
        path: PathBuf::from(path),
        source,
    };

    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::Headers).from_reader(reader);
    let headers = reader.headers().map_err(malformed)?.clone();
    for column in required {
        if !headers.iter().any(|h| h == *column) {
            return Err(LoadError::MissingColumn {
                path: path.to_path_buf(),
                column: *column,
            });
        }
    }

    reader
        .deserialize()
        .collect::<Result<Vec<T>, _>>()
        .map_err(malformed)
}

/// Row with the maximum date per entity. Ties and undated rows keep the
/// first row seen; a missing date sorts below any real date. Rows without
/// an entity id belong to no group and are skipped.
pub(crate) fn select_latest(rows: Vec<DayRow>) -> Vec<DayRow> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut latest: Vec<DayRow> = Vec::new();

    for row in rows.into_iter().filter(|row| !row.entity_id.is_empty()) {
        match index.get(&row.entity_id) {
            Some(&idx) => {
                if row.date > latest[idx].date {
                    latest[idx] = row;
                }
            }
            None => {
                index.insert(row.entity_id.clone(), latest.len());
                latest.push(row);
            }
        }
    }
    latest
}

/// Drop rows whose raw AQI is empty, then coerce the rest
fn to_observation(kind: EntityKind, row: DayRow) -> Option<Observation> {
    let raw_aqi = row.aqi?;
    let mut obs = Observation::new(kind, row.entity_id, coerce_aqi(&raw_aqi));
    obs.date = row.date;
    obs.aqi_bucket = row.aqi_bucket;
    obs.pm25 = row.pm25;
    obs.pm10 = row.pm10;
    Some(obs)
}

fn latest_cities(rows: Vec<DayRow>) -> LatestTable {
    let observations = select_latest(rows)
        .into_iter()
        .filter_map(|row| to_observation(EntityKind::City, row))
        .collect();
    LatestTable::new(EntityKind::City, observations)
}

fn latest_stations(rows: Vec<DayRow>, metadata: Vec<StationRow>) -> LatestTable {
    let mut by_id: HashMap<String, StationRow> = HashMap::new();
    for station in metadata {
        by_id
            .entry(station.station_id.trim().to_string())
            .or_insert(station);
    }

    let observations = select_latest(rows)
        .into_iter()
        .filter_map(|row| {
            let meta = by_id.get(&row.entity_id);
            let mut obs = to_observation(EntityKind::Station, row)?;
            if let Some(meta) = meta {
                obs.station_name = non_blank(meta.station_name.clone());
                obs.city = non_blank(meta.city.clone());
            }
            Some(obs)
        })
        .collect();
    LatestTable::new(EntityKind::Station, observations)
}
