use crate::config::{CONFIG_FILE_NAME, DatabaseSettings, TodoqlConfig};
use anyhow::Result;
use colored::Colorize;

pub fn handle_init(db_path: String) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let config_path = cwd.join(CONFIG_FILE_NAME);

    if config_path.exists() {
        anyhow::bail!("Project already initialized at {}", config_path.display());
    }

    let config = TodoqlConfig {
        database: DatabaseSettings {
            path: Some(db_path.clone()),
        },
        ..Default::default()
    };

    config.save(&config_path)?;

    println!(
        "{} todoql project in {}",
        "Initialized".green(),
        cwd.display()
    );
    println!("  Config:   {}", config_path.display());
    println!("  Database: {}", db_path);

    Ok(())
}
