use anyhow::{Context, Result};
use sparkify_etl::{run_pipeline, Config, Progress};

use super::{open_database, status::print_counts};

/// Load the song data, then the log data, reporting progress per file.
pub fn run_load(config: &Config) -> Result<()> {
    tracing::info!(
        "Loading {} and {} into {}",
        config.song_data_dir.display(),
        config.log_data_dir.display(),
        config.database_path.display()
    );

    let mut db = open_database(&config.database_path)?;

    let summary = run_pipeline(&mut db, config, |_, progress| match progress {
        Progress::Found { root, total } => {
            println!("{} files found in {}", total, root.display());
        }
        Progress::Processed { index, total, .. } => {
            println!("{}/{} files processed.", index, total);
        }
    })
    .context("Load failed")?;

    tracing::info!(
        "Loaded {} song files and {} log files",
        summary.songs.files_processed,
        summary.logs.files_processed
    );

    println!("\n✓ Load complete\n");
    print_counts(&db.counts()?);
    Ok(())
}
