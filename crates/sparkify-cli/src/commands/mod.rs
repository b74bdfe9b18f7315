pub mod config;
pub mod run;
pub mod schema;
pub mod status;

pub use run::run_load;
pub use schema::reset_tables;
pub use status::show_status;

use anyhow::{Context, Result};
use sparkify_core::schema::Database;
use std::path::Path;

/// Open the database, creating its directory first if needed.
pub fn open_database(db_path: &Path) -> Result<Database> {
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    Database::open(db_path).with_context(|| format!("Failed to open database {}", db_path.display()))
}
