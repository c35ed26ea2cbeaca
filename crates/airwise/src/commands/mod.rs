pub mod alert;
pub mod batch;
pub mod chat;
pub mod context;
pub mod report;
pub mod version;

use crate::cli::{DataArgs, LlmArgs};
use airwise_chat::{ClientConfig, GroqClient};
use airwise_data::{Dataset, DatasetLoader};
use airwise_telemetry::DataFiles;
use anyhow::Context;
use std::time::Duration;

pub fn load_dataset(args: &DataArgs) -> anyhow::Result<Dataset> {
    DatasetLoader::new(DataFiles::in_dir(&args.data_dir))
        .load()
        .with_context(|| format!("failed to load AQI data from {}", args.data_dir.display()))
}

/// Client config from the environment with CLI overrides applied
pub fn client_config(args: &LlmArgs) -> anyhow::Result<ClientConfig> {
    let mut config = ClientConfig::from_env()?;
    if let Some(model) = &args.model {
        config = config.with_model(model.as_str());
    }
    if let Some(base_url) = &args.base_url {
        config = config.with_base_url(base_url.as_str());
    }
    if let Some(secs) = args.timeout_secs {
        config = config.with_timeout(Duration::from_secs(secs));
    }
    config.validate()?;
    Ok(config)
}

pub fn groq_client(args: &LlmArgs) -> anyhow::Result<GroqClient> {
    let config = client_config(args)?;
    tracing::debug!(?config, "chat client configured");
    Ok(GroqClient::new(config)?)
}
