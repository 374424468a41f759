use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_PATH, DEFAULT_WORKER_COUNT};
use crate::error::{GradmapError, Result};
use crate::execute::ExecutorKind;

/// Settings for one edge-detection run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeConfig {
    #[serde(default = "default_input")]
    pub input: PathBuf,
    #[serde(default = "default_output")]
    pub output: PathBuf,
    #[serde(default)]
    pub executor: ExecutorKind,
    /// Threads (shared memory) or ranks (distributed).
    #[serde(default = "default_workers")]
    pub workers: usize,
}

fn default_input() -> PathBuf {
    PathBuf::from(DEFAULT_INPUT_PATH)
}

fn default_output() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_PATH)
}

fn default_workers() -> usize {
    DEFAULT_WORKER_COUNT
}

impl Default for EdgeConfig {
    fn default() -> Self {
        Self {
            input: default_input(),
            output: default_output(),
            executor: ExecutorKind::default(),
            workers: default_workers(),
        }
    }
}

impl EdgeConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(contents).map_err(|e| GradmapError::Config(e.to_string()))?;
        if config.workers == 0 {
            return Err(GradmapError::InvalidWorkerCount(0));
        }
        Ok(config)
    }

    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| GradmapError::FileOpen {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| GradmapError::Config(e.to_string()))
    }
}
