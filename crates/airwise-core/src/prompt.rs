//! Grounding system prompt

use crate::config::Config;
use crate::sampler::{sample, SampledContext};
use crate::types::LatestTable;
use airwise_telemetry::estimate_tokens;

/// Ungrounded prompt for raw endpoint latency runs
pub const MINIMAL_SYSTEM_PROMPT: &str =
    "You are a helpful and very fast air quality assistant. \
     Answer the user's air quality question concisely.";

const GROUNDING_RULES: &str = "\
RULES:
1. Use only the data in the tables above to answer AQI-related questions.
2. If the user asks about a specific city or station that is not in the sampled tables, you may use the full city/station lists as reference, but you must state that its AQI data is not visible in the current sampled context.
3. For general AQI awareness (for example \"What is a good AQI?\"), use factual information about AQI categories and health advice.
4. Keep your tone informative, citizen-friendly, and your responses concise.";

/// Compose the system prompt from rendered samples and entity metadata
pub fn build_system_prompt(
    city_context: &str,
    station_context: &str,
    city_count: usize,
    station_count: usize,
    city_preview: &[String],
    station_preview: &[String],
) -> String {
    format!(
        "You are an Air Quality Assistant. You provide accurate insights about air pollution \
         and public health awareness based strictly on the datasets provided below.\n\
         \n\
         --- CITY-LEVEL DATA (Latest Available Snapshot - SAMPLED) ---\n\
         The data below is a small sample, including the highest-risk city and a few others.\n\
         {city_context}\n\
         \n\
         --- STATION-LEVEL DATA (Latest Available Snapshot - SAMPLED) ---\n\
         The data below is a small sample, including the highest-risk station and a few others.\n\
         {station_context}\n\
         \n\
         Available Cities (Total {city_count}): {} ...\n\
         Available Stations (Total {station_count}): {} ...\n\
         \n\
         {GROUNDING_RULES}",
        city_preview.join(", "),
        station_preview.join(", "),
    )
}

/// Sampled tables and metadata computed once per dataset load
#[derive(Debug, Clone)]
pub struct GroundingContext {
    cities: SampledContext,
    stations: SampledContext,
    city_text: String,
    station_text: String,
    city_count: usize,
    station_count: usize,
    city_preview: Vec<String>,
    station_preview: Vec<String>,
}

impl GroundingContext {
    pub fn new(
        cities: &LatestTable,
        stations: &LatestTable,
        city_names: &[String],
        station_names: &[String],
        config: &Config,
    ) -> Self {
        let city_sample = sample(cities, config.city_cap);
        let station_sample = sample(stations, config.station_cap);
        let preview = |names: &[String]| -> Vec<String> {
            names.iter().take(config.preview_names).cloned().collect()
        };

        let context = Self {
            city_text: city_sample.render(),
            station_text: station_sample.render(),
            cities: city_sample,
            stations: station_sample,
            city_count: city_names.len(),
            station_count: station_names.len(),
            city_preview: preview(city_names),
            station_preview: preview(station_names),
        };

        let tokens = context.estimated_tokens();
        if tokens > config.prompt_token_budget {
            tracing::warn!(
                tokens,
                budget = config.prompt_token_budget,
                "grounding prompt exceeds token budget"
            );
        } else {
            tracing::debug!(tokens, "grounding prompt built");
        }
        context
    }

    pub fn cities(&self) -> &SampledContext {
        &self.cities
    }

    pub fn stations(&self) -> &SampledContext {
        &self.stations
    }

    pub fn city_context(&self) -> &str {
        &self.city_text
    }

    pub fn station_context(&self) -> &str {
        &self.station_text
    }

    pub fn city_count(&self) -> usize {
        self.city_count
    }

    pub fn station_count(&self) -> usize {
        self.station_count
    }

    pub fn system_prompt(&self) -> String {
        build_system_prompt(
            &self.city_text,
            &self.station_text,
            self.city_count,
            self.station_count,
            &self.city_preview,
            &self.station_preview,
        )
    }

    pub fn estimated_tokens(&self) -> usize {
        estimate_tokens(&self.system_prompt())
    }

    /// Opening assistant message for a session
    pub fn greeting(&self) -> String {
        let highest = match self.cities.worst() {
            Some(worst) => format!(
                "The current highest risk alert is: {} in {}.",
                worst.aqi_bucket.as_deref().unwrap_or("Unknown"),
                worst.display_name()
            ),
            None => "No city readings are available.".to_string(),
        };
        format!(
            "Hello! I have the latest AQI data for {} cities and {} monitoring stations. \
             {} How can I assist you with air quality insights today?",
            self.city_count, self.station_count, highest
        )
    }
}
