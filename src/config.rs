use crate::error::{Result, TodoqlError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = ".todoql.yml";

/// Database path value that selects an in-memory SQLite database.
pub const IN_MEMORY: &str = ":memory:";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TodoqlConfig {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub database: DatabaseSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    4000
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// Relative paths resolve against the directory holding the config file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Where the store should live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseLocation {
    Memory,
    File(PathBuf),
}

impl DatabaseLocation {
    pub fn parse(raw: &str, base: &Path) -> Self {
        if raw == IN_MEMORY {
            return DatabaseLocation::Memory;
        }
        let path = Path::new(raw);
        if path.is_absolute() {
            DatabaseLocation::File(path.to_path_buf())
        } else {
            DatabaseLocation::File(base.join(path))
        }
    }
}

impl TodoqlConfig {
    /// Loads the nearest config file above `start_path`, or defaults when none exists.
    ///
    /// The returned path is the directory holding the config file, if any.
    pub fn discover(start_path: &Path) -> Result<(Self, Option<PathBuf>)> {
        match Self::find_config_file(start_path) {
            Some(config_path) => {
                let (config, root) = Self::load(&config_path)?;
                Ok((config, Some(root)))
            }
            None => Ok((Self::default(), None)),
        }
    }

    pub fn load(config_path: &Path) -> Result<(Self, PathBuf)> {
        let content = std::fs::read_to_string(config_path)?;
        let config: TodoqlConfig = serde_yaml::from_str(&content)?;
        let project_root = config_path
            .parent()
            .ok_or_else(|| TodoqlError::Config("Config file has no parent directory".to_string()))?
            .to_path_buf();
        Ok((config, project_root))
    }

    pub fn find_config_file(start_path: &Path) -> Option<PathBuf> {
        let mut current = start_path.to_path_buf();
        loop {
            let config_path = current.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return Some(config_path);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Resolves the database location from the config file, falling back to
    /// the platform data directory when nothing is configured.
    pub fn database_location(&self, project_root: Option<&Path>) -> Result<DatabaseLocation> {
        if let Some(ref raw) = self.database.path {
            let base = project_root.unwrap_or_else(|| Path::new("."));
            return Ok(DatabaseLocation::parse(raw, base));
        }
        if let Some(root) = project_root {
            return Ok(DatabaseLocation::File(root.join("todoql.db")));
        }
        default_database_path().map(DatabaseLocation::File)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

fn default_database_path() -> Result<PathBuf> {
    let dirs = directories::ProjectDirs::from("", "", "todoql").ok_or_else(|| {
        TodoqlError::Config("Could not determine a data directory; pass --database".to_string())
    })?;
    Ok(dirs.data_dir().join("todoql.db"))
}
