// NOTE: Parses the optional clinical.toml with serde. Every field has a default,
// so a missing file or a partial one is fine.
use crate::ais::{CreateConfig, PollPolicy};
use crate::knowledge::DEFAULT_DATASET_FILE;
use crate::openfda::DEFAULT_LIMIT;
use crate::{Error, Result};
use serde::Deserialize;
use simple_fs::load_toml;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

pub const CLINICAL_TOML: &str = "clinical.toml";

const DEFAULT_NAME: &str = "Clinical Data Assistant";
const DEFAULT_MODEL: &str = "gpt-4-1106-preview";
const DEFAULT_INSTRUCTIONS: &str = "Answer only using the file(s) provided.";
const MAX_BACKOFF: f64 = 10.0;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub name: String,
    pub model: String,
    pub instructions: String,
    pub dataset_file: PathBuf,
    pub result_limit: u32,
    pub poll: PollConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PollConfig {
    pub interval_ms: u64,
    pub backoff: f64,
    pub max_interval_ms: u64,
    pub max_wait_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            model: DEFAULT_MODEL.to_string(),
            instructions: DEFAULT_INSTRUCTIONS.to_string(),
            dataset_file: PathBuf::from(DEFAULT_DATASET_FILE),
            result_limit: DEFAULT_LIMIT,
            poll: PollConfig::default(),
        }
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        let policy = PollPolicy::default();
        Self {
            interval_ms: policy.interval.as_millis() as u64,
            backoff: policy.backoff,
            max_interval_ms: policy.max_interval.as_millis() as u64,
            max_wait_secs: policy.max_wait.as_secs(),
        }
    }
}

impl Config {
    /// Loads `file` when it exists, defaults otherwise.
    pub fn load_or_default(file: impl AsRef<Path>) -> Result<Self> {
        let file = file.as_ref();
        if file.is_file() {
            debug!(file = %file.display(), "loading config");
            let config: Self = load_toml(file)?;
            config.poll.validate()?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.poll.validate()?;
        Ok(config)
    }

    pub fn poll_policy(&self) -> PollPolicy {
        (&self.poll).into()
    }
}

impl PollConfig {
    /// Rejects values the poll loop cannot work with.
    pub fn validate(&self) -> Result<()> {
        if !self.backoff.is_finite() || !(1.0..=MAX_BACKOFF).contains(&self.backoff) {
            return Err(Error::InvalidPollConfig(format!(
                "backoff must be within 1.0..={MAX_BACKOFF}, got {}",
                self.backoff
            )));
        }
        if self.interval_ms == 0 {
            return Err(Error::InvalidPollConfig("interval_ms must be > 0".to_string()));
        }
        if self.interval_ms > self.max_interval_ms {
            return Err(Error::InvalidPollConfig(format!(
                "interval_ms ({}) must not exceed max_interval_ms ({})",
                self.interval_ms, self.max_interval_ms
            )));
        }
        if self.max_wait_secs == 0 {
            return Err(Error::InvalidPollConfig("max_wait_secs must be > 0".to_string()));
        }

        Ok(())
    }
}

// region:       -- Froms

impl From<&Config> for CreateConfig {
    fn from(config: &Config) -> Self {
        Self {
            name: config.name.clone(),
            model: config.model.clone(),
            instructions: config.instructions.clone(),
        }
    }
}

impl From<&PollConfig> for PollPolicy {
    fn from(poll: &PollConfig) -> Self {
        Self {
            interval: Duration::from_millis(poll.interval_ms),
            backoff: poll.backoff,
            max_interval: Duration::from_millis(poll.max_interval_ms),
            max_wait: Duration::from_secs(poll.max_wait_secs),
        }
    }
}

// endregion:    -- Froms
