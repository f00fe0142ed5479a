//! Global schedule configuration.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{ScheduleError, ScheduleResult};

static DEFAULT_DATA_FILE: &str = "schedule_data.json";

fn default_data_file() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_FILE)
}

fn is_default_data_file(p: &PathBuf) -> bool {
    *p == default_data_file()
}

fn is_default_policy(p: &CorruptDataPolicy) -> bool {
    *p == CorruptDataPolicy::default()
}

/// What to do with a data file that exists but cannot be read as a schedule.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CorruptDataPolicy {
    /// Start empty; the unreadable file is overwritten by the next save.
    #[default]
    Discard,
    /// Rename the unreadable file to `<file>.corrupt`, then start empty.
    Backup,
}

/// Configuration at ~/.config/schedule/config.toml
///
/// Every key can also be set from the environment with a `SCHEDULE_` prefix,
/// e.g. `SCHEDULE_DATA_FILE`.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ScheduleConfig {
    #[serde(default = "default_data_file", skip_serializing_if = "is_default_data_file")]
    pub data_file: PathBuf,

    #[serde(default, skip_serializing_if = "is_default_policy")]
    pub on_corrupt: CorruptDataPolicy,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        ScheduleConfig {
            data_file: default_data_file(),
            on_corrupt: CorruptDataPolicy::default(),
        }
    }
}

impl ScheduleConfig {
    pub fn config_path() -> ScheduleResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ScheduleError::Config("Could not determine config directory".into()))?
            .join("schedule");

        Ok(config_dir.join("config.toml"))
    }

    /// Load ~/.config/schedule/config.toml, creating a commented-out default
    /// file on first run.
    pub fn load() -> ScheduleResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load from an explicit path. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> ScheduleResult<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("SCHEDULE"))
            .build()
            .map_err(|e| ScheduleError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| ScheduleError::Config(e.to_string()))
    }

    /// The data file with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_file.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    /// Save the current config to `path`.
    pub fn save(&self, path: &Path) -> ScheduleResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ScheduleError::Config(e.to_string()))?;

        std::fs::write(path, content)
            .map_err(|e| ScheduleError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> ScheduleResult<()> {
        let contents = format!(
            "\
# schedule configuration

# Where events are stored (relative paths resolve against the working directory):
# data_file = \"{}\"

# What to do when the data file cannot be read: \"discard\" or \"backup\"
# on_corrupt = \"discard\"
",
            DEFAULT_DATA_FILE
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ScheduleError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| ScheduleError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
