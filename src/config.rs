use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::state::assignment::AssignmentStatus;

pub const ROSTER_ENV: &str = "SHIFTGRID_ROSTER";
pub const OUTPUT_ENV: &str = "SHIFTGRID_OUTPUT";
const CONFIG_FILE: &str = "config.toml";
const ASSIGNMENTS_FILE: &str = "assignments.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub roster_path: Option<PathBuf>,
    pub output_path: Option<PathBuf>,
    pub default_status: AssignmentStatus,
    /// Seconds a success/failure notice stays in the toolbar.
    pub notice_seconds: u64,
    /// chrono format string for column headers.
    pub header_date_format: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            roster_path: None,
            output_path: None,
            default_status: AssignmentStatus::Scheduled,
            notice_seconds: 3,
            header_date_format: "%a %d %b".to_string(),
        }
    }
}

impl AppConfig {
    /// Config file, then environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match config_file_path() {
            Some(path) => Self::load_from(&path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup(ROSTER_ENV).filter(|value| !value.trim().is_empty()) {
            self.roster_path = Some(PathBuf::from(path));
        }
        if let Some(path) = lookup(OUTPUT_ENV).filter(|value| !value.trim().is_empty()) {
            self.output_path = Some(PathBuf::from(path));
        }
    }

    pub fn resolved_output_path(&self) -> PathBuf {
        if let Some(path) = self.output_path.as_ref() {
            return path.clone();
        }
        match project_dirs() {
            Some(dirs) => dirs.data_dir().join(ASSIGNMENTS_FILE),
            None => PathBuf::from(ASSIGNMENTS_FILE),
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("org", "ShiftGrid", "shiftgrid")
}

pub fn config_file_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}
