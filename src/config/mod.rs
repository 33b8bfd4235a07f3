use crate::core::editor::BulkScope;
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub mod check; // missing-key detection and upgrade of older config files

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_school_name")]
    pub school_name: String,
    #[serde(default = "default_student_roster_size")]
    pub student_roster_size: u32,
    #[serde(default = "default_staff_roster_size")]
    pub staff_roster_size: u32,
    #[serde(default = "default_load_latency")]
    pub load_latency_ms: u64,
    #[serde(default = "default_save_latency")]
    pub save_latency_ms: u64,
    #[serde(default)]
    pub bulk_scope: BulkScope,
    #[serde(default = "default_separator_char")]
    pub separator_char: String,
}

fn default_school_name() -> String {
    "School".to_string()
}
fn default_student_roster_size() -> u32 {
    25
}
fn default_staff_roster_size() -> u32 {
    12
}
fn default_load_latency() -> u64 {
    600
}
fn default_save_latency() -> u64 {
    800
}
fn default_separator_char() -> String {
    "-".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            school_name: default_school_name(),
            student_roster_size: default_student_roster_size(),
            staff_roster_size: default_staff_roster_size(),
            load_latency_ms: default_load_latency(),
            save_latency_ms: default_save_latency(),
            bulk_scope: BulkScope::default(),
            separator_char: default_separator_char(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = std::env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rollcall")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".rollcall")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rollcall.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rollcall.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
        serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {e}", path.display())))
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        let yaml = serde_yaml::to_string(self).map_err(|_| AppError::ConfigSave)?;
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(path, yaml).map_err(|_| AppError::ConfigSave)
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        serde_yaml::to_string(self).map_err(|e| AppError::Config(e.to_string()))
    }

    pub fn load_latency(&self) -> Duration {
        Duration::from_millis(self.load_latency_ms)
    }

    pub fn save_latency(&self) -> Duration {
        Duration::from_millis(self.save_latency_ms)
    }

    /// First char of `separator_char`, '-' when empty.
    pub fn separator(&self) -> char {
        self.separator_char.chars().next().unwrap_or('-')
    }

    /// Initialize configuration and database files.
    ///
    /// `custom_db` may be absolute or relative to the config dir. In test
    /// mode the config file is left untouched.
    pub fn init_all(custom_db: Option<&str>, is_test: bool) -> AppResult<Self> {
        let dir = Self::config_dir();

        let db_path = match custom_db {
            Some(name) => {
                let p = Path::new(name);
                if p.is_absolute() {
                    p.to_path_buf()
                } else {
                    dir.join(p)
                }
            }
            None => Self::database_file(),
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Self::default()
        };

        if !is_test {
            config.save_to(&Self::config_file())?;
        }

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }

        Ok(config)
    }
}
