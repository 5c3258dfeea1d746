use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Batches with fewer rows than this run on the serial kernel by default.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 64;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Upper bound on the number of workers; `None` uses the available parallelism.
    pub workers: Option<usize>,
    /// Minimum batch size that is split among workers.
    pub parallel_threshold: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            workers: None,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

#[derive(Default)]
pub struct EngineConfigBuilder {
    workers: Option<usize>,
    parallel_threshold: Option<usize>,
}

impl EngineConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }
    pub fn parallel_threshold(mut self, rows: usize) -> Self {
        self.parallel_threshold = Some(rows);
        self
    }

    pub fn build(self) -> Result<EngineConfig, ConfigError> {
        if self.workers == Some(0) {
            return Err(ConfigError::InvalidParameter {
                name: "workers",
                reason: "at least one worker is required".to_string(),
            });
        }
        Ok(EngineConfig {
            workers: self.workers,
            parallel_threshold: self
                .parallel_threshold
                .unwrap_or(DEFAULT_PARALLEL_THRESHOLD),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct EngineConfigFile {
    workers: Option<usize>,
    parallel_threshold: Option<usize>,
}

impl From<EngineConfigFile> for EngineConfigBuilder {
    fn from(file: EngineConfigFile) -> Self {
        Self {
            workers: file.workers,
            parallel_threshold: file.parallel_threshold,
        }
    }
}

impl EngineConfig {
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::new()
    }

    /// Reads a TOML engine configuration. Keys left out keep their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let file: EngineConfigFile = toml::from_str(&content).map_err(|e| ConfigError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        EngineConfigBuilder::from(file).build()
    }
}
