//! Proactive alert tiers

use crate::types::{LatestTable, Observation};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Alert severity, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AlertTier {
    /// AQI 0-100
    #[serde(rename = "GOOD")]
    Good,
    /// AQI 101-200
    #[serde(rename = "MODERATE")]
    Moderate,
    /// AQI 201-300
    #[serde(rename = "POOR")]
    Poor,
    /// AQI 301-400
    #[serde(rename = "VERY_POOR")]
    VeryPoor,
    /// AQI 401+
    #[serde(rename = "SEVERE")]
    Severe,
}

impl AlertTier {
    pub const ALL: [AlertTier; 5] = [
        AlertTier::Good,
        AlertTier::Moderate,
        AlertTier::Poor,
        AlertTier::VeryPoor,
        AlertTier::Severe,
    ];

    /// Lower bounds are inclusive. Negative and NaN values fall through to Good.
    pub fn from_aqi(aqi: f64) -> Self {
        if aqi >= 401.0 {
            AlertTier::Severe
        } else if aqi >= 301.0 {
            AlertTier::VeryPoor
        } else if aqi >= 201.0 {
            AlertTier::Poor
        } else if aqi >= 101.0 {
            AlertTier::Moderate
        } else {
            AlertTier::Good
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AlertTier::Good => "GOOD",
            AlertTier::Moderate => "MODERATE",
            AlertTier::Poor => "POOR",
            AlertTier::VeryPoor => "VERY_POOR",
            AlertTier::Severe => "SEVERE",
        }
    }

    pub fn headline(self) -> &'static str {
        match self {
            AlertTier::Good => "Good Air Quality Check",
            AlertTier::Moderate => "NOTICE: Moderate Air Quality",
            AlertTier::Poor => "HIGH ALERT: Poor Air Quality",
            AlertTier::VeryPoor => "CRITICAL ALERT: Very Poor Air Quality",
            AlertTier::Severe => "SEVERE WARNING: Hazardous Air Quality",
        }
    }

    pub fn advisory(self) -> &'static str {
        match self {
            AlertTier::Good => "Air quality is generally acceptable across monitored regions.",
            AlertTier::Moderate => {
                "Unusually sensitive people should consider limiting prolonged outdoor exertion."
            }
            AlertTier::Poor => {
                "Sensitive groups should avoid outdoor activity. \
                 General public should limit prolonged outdoor exertion."
            }
            AlertTier::VeryPoor => {
                "Everyone should avoid prolonged or heavy exertion outdoors. \
                 People with heart or lung disease, older adults, and children \
                 should avoid all outdoor activity."
            }
            AlertTier::Severe => {
                "Avoid all outdoor physical activity. Keep windows and doors closed. \
                 Use air purifiers. Everyone should wear a proper respirator (N95/P100) outdoors."
            }
        }
    }
}

/// Tier and advisory text for an AQI value
pub fn classify(aqi: f64) -> (AlertTier, &'static str) {
    let tier = AlertTier::from_aqi(aqi);
    (tier, tier.advisory())
}

/// Monitoring alert for a single entity
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub tier: AlertTier,
    pub entity: String,
    pub aqi: f64,
    pub aqi_bucket: Option<String>,
    pub date: Option<NaiveDate>,
}

impl Alert {
    pub fn from_observation(obs: &Observation) -> Self {
        Self {
            tier: AlertTier::from_aqi(obs.aqi),
            entity: obs.display_name().to_string(),
            aqi: obs.aqi,
            aqi_bucket: obs.aqi_bucket.clone(),
            date: obs.date,
        }
    }

    /// Alert for the highest-AQI entity of a table
    pub fn for_worst(table: &LatestTable) -> Option<Self> {
        table.worst().map(Self::from_observation)
    }

    pub fn message(&self) -> String {
        if self.tier == AlertTier::Good {
            return format!(
                "{}: The worst recorded AQI is currently {} in {}. {}",
                self.tier.headline(),
                self.aqi,
                self.entity,
                self.tier.advisory()
            );
        }

        let bucket = self.aqi_bucket.as_deref().unwrap_or("Unknown");
        let date = self
            .date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "unknown date".to_string());
        format!(
            "{} in {} (AQI {}, Category: {} on {}). Health Advice: {}",
            self.tier.headline(),
            self.entity,
            self.aqi,
            bucket,
            date,
            self.tier.advisory()
        )
    }
}
