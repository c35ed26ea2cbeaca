//! Latest-snapshot model, alert tiers, context sampling and grounding prompts

mod alert;
mod config;
mod prompt;
mod sampler;
mod types;

pub use alert::{classify, Alert, AlertTier};
pub use config::{Config, ConfigError};
pub use prompt::{build_system_prompt, GroundingContext, MINIMAL_SYSTEM_PROMPT};
pub use sampler::{parse_header, render_table, sample, SampledContext};
pub use types::{EntityKind, LatestTable, Observation};
