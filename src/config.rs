//! Answers remembered between runs, stored next to the control folders.

use std::io;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CONFIG_FILE_NAME: &str = ".pcfgen.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read generator config `{}`: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("generator config `{}` is not valid JSON: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to write generator config `{}`: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_username: Option<String>,
}

impl GeneratorConfig {
    pub fn path_in(dir: &Path) -> PathBuf {
        dir.join(CONFIG_FILE_NAME)
    }

    /// Read the config stored in `dir`; a missing file is an empty config.
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        let path = Self::path_in(dir);

        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No generator config at `{}`", path.display());
                return Ok(Self::default());
            }
            Err(source) => return Err(ConfigError::Read { path, source }),
        };

        serde_json::from_str(&text).map_err(|source| ConfigError::Parse { path, source })
    }

    pub fn save(&self, dir: &Path) -> Result<(), ConfigError> {
        let path = Self::path_in(dir);
        let mut text = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Parse {
            path: path.clone(),
            source,
        })?;
        text.push('\n');

        std::fs::write(&path, text).map_err(|source| ConfigError::Write { path, source })
    }
}
