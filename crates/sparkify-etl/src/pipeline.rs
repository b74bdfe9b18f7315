use sparkify_core::schema::Database;
use std::fmt;

use crate::config::Config;
use crate::error::EtlResult;
use crate::loader::{process_data, LoadSummary, Progress};
use crate::transform::{LogFileTransformer, SongFileTransformer};

/// The two independently loaded source domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    Songs,
    Logs,
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Songs => f.write_str("songs"),
            Self::Logs => f.write_str("logs"),
        }
    }
}

/// Per-domain results of a full run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineSummary {
    pub songs: LoadSummary,
    pub logs: LoadSummary,
}

/// Load the song data, then the log data, into `db`.
///
/// Songs go first so play events can be resolved against the catalog.
///
/// # Errors
/// Stops at the first filesystem, parse or database error.
pub fn run_pipeline<F>(db: &mut Database, config: &Config, mut on_progress: F) -> EtlResult<PipelineSummary>
where
    F: FnMut(Domain, Progress<'_>),
{
    let songs = process_data(
        db,
        &config.song_data_dir,
        &config.file_extension,
        &SongFileTransformer::new(),
        |progress| on_progress(Domain::Songs, progress),
    )?;

    let logs = process_data(
        db,
        &config.log_data_dir,
        &config.file_extension,
        &LogFileTransformer::new(),
        |progress| on_progress(Domain::Logs, progress),
    )?;

    Ok(PipelineSummary { songs, logs })
}
