use airwise_telemetry::LogFiles;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "airwise")]
#[command(version)]
#[command(about = "Grounded air-quality assistant over the CPCB city and station datasets")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive chat (type exit or quit to leave)
    Chat {
        #[command(flatten)]
        data: DataArgs,
        #[command(flatten)]
        llm: LlmArgs,
        #[command(flatten)]
        log: LogArgs,
    },

    /// Ask a single question and print the answer
    Ask {
        question: String,
        #[command(flatten)]
        data: DataArgs,
        #[command(flatten)]
        llm: LlmArgs,
        #[command(flatten)]
        log: LogArgs,
    },

    /// Replay a file of queries and record per-query latency
    Batch {
        /// One query per line
        #[arg(short, long)]
        queries: PathBuf,
        /// Results CSV, recreated for every run
        #[arg(short, long, default_value_os_t = LogFiles::default().batch_results)]
        output: PathBuf,
        /// Pause between calls
        #[arg(long, default_value_t = 100)]
        delay_ms: u64,
        /// Send the one-line prompt instead of the dataset context
        #[arg(long)]
        minimal_prompt: bool,
        #[command(flatten)]
        data: DataArgs,
        #[command(flatten)]
        llm: LlmArgs,
        #[command(flatten)]
        log: LogArgs,
    },

    /// Print the proactive alert for the worst city
    Alert {
        #[command(flatten)]
        data: DataArgs,
    },

    /// Show the sampled tables sent to the model
    Context {
        #[command(flatten)]
        data: DataArgs,
    },

    /// Show the first rows of the latest city and station tables
    Snapshot {
        #[command(flatten)]
        data: DataArgs,
        #[arg(long)]
        rows: Option<usize>,
    },

    /// Summarize latency from an existing results CSV
    Report {
        #[arg(short, long, default_value_os_t = LogFiles::default().batch_results)]
        results: PathBuf,
    },

    /// Print version information
    Version,
}

#[derive(Args, Debug, Clone)]
pub struct DataArgs {
    /// Directory holding city_day.csv, station_day.csv and stations.csv
    #[arg(long, default_value = ".")]
    pub data_dir: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct LogArgs {
    /// CSV transcript every turn is appended to
    #[arg(long, default_value_os_t = LogFiles::default().transcript)]
    pub transcript: PathBuf,
    #[arg(long, conflicts_with = "transcript")]
    pub no_transcript: bool,
}

impl LogArgs {
    pub fn transcript_path(&self) -> Option<PathBuf> {
        (!self.no_transcript).then(|| self.transcript.clone())
    }
}

#[derive(Args, Debug, Clone)]
pub struct LlmArgs {
    #[arg(long)]
    pub model: Option<String>,
    /// OpenAI-compatible API base URL
    #[arg(long)]
    pub base_url: Option<String>,
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}
