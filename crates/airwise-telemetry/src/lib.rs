//! Log records, CSV log I/O and data-file paths for the air-quality assistant

mod io;
mod paths;
mod tokens;
mod types;

pub use io::{append_record, read_records, start_log, CsvRecord, LogWriteError};
pub use paths::{DataFiles, LogFiles};
pub use tokens::estimate_tokens;
pub use types::{BatchRecord, BatchStatus, TranscriptRecord, TranscriptRole};
