//! The load driver: discover, transform and persist one data directory.

use sparkify_core::schema::Database;
use std::path::Path;

use crate::discover::discover_files;
use crate::error::EtlResult;
use crate::transform::Transformer;

/// A progress notification emitted by [`process_data`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress<'a> {
    /// Discovery finished.
    Found { root: &'a Path, total: usize },
    /// A file's rows were committed.
    Processed {
        index: usize,
        total: usize,
        path: &'a Path,
    },
}

/// What one call to [`process_data`] did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub files_found: usize,
    pub files_processed: usize,
    /// Rows handed to the database.
    pub rows_produced: usize,
    /// Rows the database actually inserted or updated; the difference from
    /// `rows_produced` is conflicts that were ignored.
    pub rows_written: usize,
}

/// Load every matching file under `root` with `transformer`.
///
/// Each file is transformed and written inside its own transaction and
/// committed before the next file starts. The first error stops the run and
/// leaves the failing file uncommitted; files committed before it stay.
pub fn process_data<T, F>(
    db: &mut Database,
    root: &Path,
    extension: &str,
    transformer: &T,
    mut on_progress: F,
) -> EtlResult<LoadSummary>
where
    T: Transformer + ?Sized,
    F: FnMut(Progress<'_>),
{
    log::info!(
        "Starting {} load from {}",
        transformer.name(),
        root.display()
    );

    let files = discover_files(root, extension)?;
    let total = files.len();
    on_progress(Progress::Found { root, total });

    let mut summary = LoadSummary {
        files_found: total,
        ..LoadSummary::default()
    };

    for (index, path) in files.iter().enumerate() {
        let (produced, written) = load_file(db, path, transformer).inspect_err(|e| {
            log::error!("Aborting {} load at {}: {}", transformer.name(), path.display(), e);
        })?;

        summary.files_processed += 1;
        summary.rows_produced += produced;
        summary.rows_written += written;
        on_progress(Progress::Processed {
            index: index + 1,
            total,
            path,
        });
    }

    log::info!(
        "{} load complete: {} files, {} rows written ({} produced)",
        transformer.name(),
        summary.files_processed,
        summary.rows_written,
        summary.rows_produced
    );
    Ok(summary)
}

/// Transform and persist one file as a single transaction.
///
/// Returns `(rows produced, rows written)`.
fn load_file<T>(db: &mut Database, path: &Path, transformer: &T) -> EtlResult<(usize, usize)>
where
    T: Transformer + ?Sized,
{
    let batch = db.begin()?;
    let rows = transformer.transform(path, &batch)?;

    let mut written = 0;
    for row in &rows {
        written += batch.insert(row)?;
    }
    batch.commit()?;

    log::debug!(
        "Committed {}: {} rows, {} written",
        path.display(),
        rows.len(),
        written
    );
    Ok((rows.len(), written))
}
