use anyhow::Result;
use sparkify_core::model::Table;
use sparkify_core::schema::TableCounts;
use std::path::Path;

use super::open_database;

pub fn show_status(db_path: &Path) -> Result<()> {
    let db = open_database(db_path)?;
    let counts = db.counts()?;

    println!("\n📊 Sparkify Status\n");
    println!("  Database: {}", db_path.display());
    println!();
    print_counts(&counts);

    if counts.songplays > 0 && counts.songs == 0 {
        println!("\n  No catalog songs loaded: every songplay is unmatched");
    }

    Ok(())
}

pub fn print_counts(counts: &TableCounts) {
    for table in Table::ALL {
        println!("  {:<10} {:>8}", table.name(), counts.get(table));
    }
}
