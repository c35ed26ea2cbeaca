//! Raw CSV row shapes and lenient cell parsing

use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;

pub(crate) const CITY_DAY_COLUMNS: &[&str] = &["City", "Date", "AQI"];
pub(crate) const STATION_DAY_COLUMNS: &[&str] = &["StationId", "Date", "AQI"];
pub(crate) const STATIONS_COLUMNS: &[&str] = &["StationId", "StationName", "City"];

#[derive(Debug, Deserialize)]
pub(crate) struct CityDayRow {
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "Date")]
    pub date: Option<String>,
    #[serde(rename = "AQI")]
    pub aqi: Option<String>,
    #[serde(rename = "AQI_Bucket")]
    pub aqi_bucket: Option<String>,
    #[serde(rename = "PM2.5")]
    pub pm25: Option<String>,
    #[serde(rename = "PM10")]
    pub pm10: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StationDayRow {
    #[serde(rename = "StationId")]
    pub station_id: String,
    #[serde(rename = "Date")]
    pub date: Option<String>,
    #[serde(rename = "AQI")]
    pub aqi: Option<String>,
    #[serde(rename = "AQI_Bucket")]
    pub aqi_bucket: Option<String>,
    #[serde(rename = "PM2.5")]
    pub pm25: Option<String>,
    #[serde(rename = "PM10")]
    pub pm10: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StationRow {
    #[serde(rename = "StationId")]
    pub station_id: String,
    #[serde(rename = "StationName")]
    pub station_name: Option<String>,
    #[serde(rename = "City")]
    pub city: Option<String>,
}

/// A day row reduced to what latest selection needs
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DayRow {
    pub entity_id: String,
    pub date: Option<NaiveDate>,
    /// Raw AQI cell; `None` when the cell was empty
    pub aqi: Option<String>,
    pub aqi_bucket: Option<String>,
    pub pm25: Option<f64>,
    pub pm10: Option<f64>,
}

impl From<CityDayRow> for DayRow {
    fn from(row: CityDayRow) -> Self {
        Self {
            entity_id: row.city.trim().to_string(),
            date: parse_date(row.date.as_deref()),
            aqi: non_blank(row.aqi),
            aqi_bucket: non_blank(row.aqi_bucket),
            pm25: parse_number(row.pm25.as_deref()),
            pm10: parse_number(row.pm10.as_deref()),
        }
    }
}

impl From<StationDayRow> for DayRow {
    fn from(row: StationDayRow) -> Self {
        Self {
            entity_id: row.station_id.trim().to_string(),
            date: parse_date(row.date.as_deref()),
            aqi: non_blank(row.aqi),
            aqi_bucket: non_blank(row.aqi_bucket),
            pm25: parse_number(row.pm25.as_deref()),
            pm10: parse_number(row.pm10.as_deref()),
        }
    }
}

/// Unparseable or empty dates become `None`
pub(crate) fn parse_date(raw: Option<&str>) -> Option<NaiveDate> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.date())
}

/// Non-numeric AQI is coerced to zero
pub(crate) fn coerce_aqi(raw: &str) -> f64 {
    raw.trim().parse::<f64>().unwrap_or(0.0)
}

fn parse_number(raw: Option<&str>) -> Option<f64> {
    raw?.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

pub(crate) fn non_blank(raw: Option<String>) -> Option<String> {
    raw.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}
