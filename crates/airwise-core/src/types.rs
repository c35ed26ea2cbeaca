//! Core types for latest-snapshot tables

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

const CITY_COLUMNS: &[&str] = &["City", "Date", "AQI", "AQI_Bucket", "PM2.5", "PM10"];
const STATION_COLUMNS: &[&str] = &[
    "StationName",
    "City",
    "Date",
    "AQI",
    "AQI_Bucket",
    "PM2.5",
    "PM10",
];

/// What an observation's entity id names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    City,
    Station,
}

impl EntityKind {
    /// Rendered column order
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            EntityKind::City => CITY_COLUMNS,
            EntityKind::Station => STATION_COLUMNS,
        }
    }
}

/// One daily record for a city or a station
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub kind: EntityKind,
    /// City name or station id
    pub entity_id: String,
    /// Joined from station metadata; `None` for cities and unmatched stations
    pub station_name: Option<String>,
    pub city: Option<String>,
    pub date: Option<NaiveDate>,
    /// Always finite and non-negative
    pub aqi: f64,
    pub aqi_bucket: Option<String>,
    pub pm25: Option<f64>,
    pub pm10: Option<f64>,
}

impl Observation {
    pub fn new(kind: EntityKind, entity_id: impl Into<String>, aqi: f64) -> Self {
        let entity_id = entity_id.into();
        let city = match kind {
            EntityKind::City => Some(entity_id.clone()),
            EntityKind::Station => None,
        };
        Self {
            kind,
            entity_id,
            station_name: None,
            city,
            date: None,
            aqi: coerce_aqi(aqi),
            aqi_bucket: None,
            pm25: None,
            pm10: None,
        }
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.aqi_bucket = Some(bucket.into());
        self
    }

    /// Name used for sorting and display: station name when known, else the id
    pub fn display_name(&self) -> &str {
        match self.kind {
            EntityKind::City => &self.entity_id,
            EntityKind::Station => self.station_name.as_deref().unwrap_or(&self.entity_id),
        }
    }

    /// Cell values in `kind.columns()` order; missing values are empty and
    /// text is made safe for a pipe table
    pub fn cells(&self) -> Vec<String> {
        let date = self
            .date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        let aqi = format_number(self.aqi);
        let bucket = table_cell(self.aqi_bucket.as_deref());
        let pm25 = self.pm25.map(format_number).unwrap_or_default();
        let pm10 = self.pm10.map(format_number).unwrap_or_default();

        match self.kind {
            EntityKind::City => vec![
                table_cell(Some(&self.entity_id)),
                date,
                aqi,
                bucket,
                pm25,
                pm10,
            ],
            EntityKind::Station => vec![
                table_cell(self.station_name.as_deref()),
                table_cell(self.city.as_deref()),
                date,
                aqi,
                bucket,
                pm25,
                pm10,
            ],
        }
    }
}

/// `|` is escaped and line breaks become spaces
fn table_cell(text: Option<&str>) -> String {
    text.unwrap_or_default()
        .replace('|', "\\|")
        .replace("\r\n", " ")
        .replace(['\n', '\r'], " ")
}

/// Clamp to a finite, non-negative AQI
pub(crate) fn coerce_aqi(aqi: f64) -> f64 {
    if aqi.is_finite() && aqi > 0.0 {
        aqi
    } else {
        0.0
    }
}

fn format_number(value: f64) -> String {
    format!("{}", value)
}

/// Most recent observation per entity, ordered by entity id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatestTable {
    kind: EntityKind,
    rows: Vec<Observation>,
}

impl LatestTable {
    /// Rows are sorted by entity id; a repeated id keeps its first row
    pub fn new(kind: EntityKind, rows: Vec<Observation>) -> Self {
        let mut seen = HashSet::new();
        let mut rows: Vec<Observation> = rows
            .into_iter()
            .filter(|row| seen.insert(row.entity_id.clone()))
            .collect();
        rows.sort_by(|a, b| a.entity_id.cmp(&b.entity_id));
        Self { kind, rows }
    }

    pub fn empty(kind: EntityKind) -> Self {
        Self {
            kind,
            rows: Vec::new(),
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn rows(&self) -> &[Observation] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Observation> {
        self.rows.iter()
    }

    pub fn get(&self, entity_id: &str) -> Option<&Observation> {
        self.rows
            .binary_search_by(|row| row.entity_id.as_str().cmp(entity_id))
            .ok()
            .map(|idx| &self.rows[idx])
    }

    /// Highest AQI; ties go to the first row in table order
    pub fn worst(&self) -> Option<&Observation> {
        let mut worst: Option<&Observation> = None;
        for row in &self.rows {
            match worst {
                Some(current) if row.aqi <= current.aqi => {}
                _ => worst = Some(row),
            }
        }
        worst
    }

    /// Distinct names in table order. Stations without metadata are skipped.
    pub fn names(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.rows
            .iter()
            .filter_map(|row| match self.kind {
                EntityKind::City => Some(row.entity_id.as_str()),
                EntityKind::Station => row.station_name.as_deref(),
            })
            .filter(|name| seen.insert(*name))
            .map(String::from)
            .collect()
    }

    pub fn head(&self, n: usize) -> &[Observation] {
        &self.rows[..n.min(self.rows.len())]
    }
}
