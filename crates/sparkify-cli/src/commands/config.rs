use anyhow::Result;
use std::path::PathBuf;

use sparkify_etl::config;

/// Show the current effective configuration.
pub fn show_config(db: Option<PathBuf>) -> Result<()> {
    let config = crate::load_config(db)?;
    let config_path = config::config_file_path();

    println!("Current Configuration");
    println!("=====================\n");

    println!("Config file: {}", config_path.display());
    let exists = config_path.exists();
    println!(
        "File exists: {}\n",
        if exists { "yes" } else { "no (using defaults)" }
    );

    println!("Settings:");
    println!("  database_path: {}", config.database_path.display());
    println!("  song_data_dir: {}", config.song_data_dir.display());
    println!("  log_data_dir: {}", config.log_data_dir.display());
    println!("  file_extension: {}", config.file_extension);

    println!("\nPriority: CLI args > ENV vars (SPARKIFY_*) > Config file > Defaults");

    Ok(())
}

/// Show the config file path.
pub fn show_path() {
    println!("{}", config::config_file_path().display());
}

/// Show example configuration.
pub fn show_example() {
    print!("{}", config::example_config());
}

/// Initialize config file with defaults.
pub fn init_config() -> Result<()> {
    let created = config::ensure_config_file()?;
    let config_path = config::config_file_path();

    if created {
        println!("✓ Created config file: {}", config_path.display());
        println!("\nEdit this file to configure sparkify.");
    } else {
        println!("Config file already exists: {}", config_path.display());
    }

    Ok(())
}
