use crate::cli::{DataArgs, LlmArgs};
use airwise_chat::{read_queries, BatchRunner, PromptMode};
use airwise_core::Config;
use anyhow::Context;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub struct BatchOptions<'a> {
    pub queries: &'a Path,
    pub output: &'a Path,
    pub delay: Duration,
    pub minimal_prompt: bool,
    pub transcript: Option<PathBuf>,
}

pub fn run(options: BatchOptions<'_>, data: &DataArgs, llm: &LlmArgs) -> anyhow::Result<()> {
    let client = super::groq_client(llm)?;
    let queries = read_queries(options.queries)
        .with_context(|| format!("could not read queries from {}", options.queries.display()))?;
    if queries.is_empty() {
        println!("No queries found in {}.", options.queries.display());
        return Ok(());
    }

    // The minimal prompt never needs the dataset
    let context = if options.minimal_prompt {
        None
    } else {
        Some(super::load_dataset(data)?.grounding(&Config::new()))
    };
    let mode = match &context {
        Some(context) => PromptMode::Grounded(context),
        None => PromptMode::Minimal,
    };

    let mut runner = BatchRunner::new(client, mode)
        .with_delay(options.delay)
        .with_results_log(options.output);
    if let Some(path) = options.transcript {
        runner = runner.with_transcript(path);
    }

    println!("Running {} queries...", queries.len());
    let report = runner.run(&queries);
    println!("{}", report.summary());
    println!("Results written to {}", options.output.display());
    Ok(())
}
