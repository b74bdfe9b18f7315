//! Record transformers: one source file in, typed table rows out.

pub mod log_file;
pub mod song_file;

pub use log_file::LogFileTransformer;
pub use song_file::SongFileTransformer;

use serde::Deserialize;
use sparkify_core::model::TableRow;
use sparkify_core::SongCatalog;
use std::path::Path;

use crate::error::{EtlError, EtlResult};

/// Turns the contents of one source file into rows, in persistence order.
///
/// Referenced rows come before the rows that reference them, so the loader
/// can write the returned rows front to back inside one transaction.
pub trait Transformer {
    fn name(&self) -> &str;

    /// Transform the file at `path`. `catalog` resolves song references and
    /// sees everything committed by earlier files.
    fn transform(&self, path: &Path, catalog: &dyn SongCatalog) -> EtlResult<Vec<TableRow>>;
}

pub(crate) fn read_source(path: &Path) -> EtlResult<String> {
    std::fs::read_to_string(path).map_err(|source| EtlError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// A JSON number that may arrive as an integer, a float or a numeric string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub(crate) enum LooseInt {
    Int(i64),
    Float(f64),
    Text(String),
}

impl LooseInt {
    /// Coerce to an integer, truncating any fractional part.
    #[allow(clippy::cast_possible_truncation)]
    pub(crate) fn to_i64(&self) -> Result<i64, String> {
        match self {
            Self::Int(n) => Ok(*n),
            Self::Float(f) if f.is_finite() => Ok(f.trunc() as i64),
            Self::Float(f) => Err(format!("{f} is not a finite number")),
            Self::Text(s) => {
                let trimmed = s.trim();
                if let Ok(n) = trimmed.parse::<i64>() {
                    return Ok(n);
                }
                match trimmed.parse::<f64>() {
                    Ok(f) => Self::Float(f).to_i64(),
                    Err(_) => Err(format!("{s:?} is not a number")),
                }
            }
        }
    }
}
