use anyhow::{Context, Result};
use std::path::Path;

use super::open_database;

/// Drop and recreate the five star-schema tables.
pub fn reset_tables(db_path: &Path) -> Result<()> {
    let mut db = open_database(db_path)?;
    db.reset().context("Failed to reset tables")?;

    println!("✓ Recreated tables in {}", db_path.display());
    Ok(())
}
