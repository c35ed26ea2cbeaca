mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use commands::batch::BatchOptions;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// `RUST_LOG` directives when given and valid, else `info`
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

fn main() -> anyhow::Result<()> {
    // Diagnostics go to stderr so answers and reports stay on stdout
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var("RUST_LOG").ok().as_deref()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Chat {
            data,
            llm,
            log,
        } => commands::chat::run(&data, &llm, log.transcript_path()),
        Commands::Ask {
            question,
            data,
            llm,
            log,
        } => commands::chat::run_ask(&question, &data, &llm, log.transcript_path()),
        Commands::Batch {
            queries,
            output,
            delay_ms,
            minimal_prompt,
            data,
            llm,
            log,
        } => commands::batch::run(
            BatchOptions {
                queries: &queries,
                output: &output,
                delay: Duration::from_millis(delay_ms),
                minimal_prompt,
                transcript: log.transcript_path(),
            },
            &data,
            &llm,
        ),
        Commands::Alert { data } => commands::alert::run(&data),
        Commands::Context { data } => commands::context::run(&data),
        Commands::Snapshot { data, rows } => commands::context::run_snapshot(&data, rows),
        Commands::Report { results } => commands::report::run(&results),
        Commands::Version => commands::version::run(),
    }
}
