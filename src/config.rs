use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::{ProbeError, Result};
use crate::model::{ScrapeOptions, ScrapeRequest};

pub const DEFAULT_CONFIG_PATH: &str = "probe.json";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    pub base_url: String,
    pub target_url: String,
    pub workers: usize,
    pub poll_interval_seconds: u64,
    /// Workers allowed in flight at once. `None` means all of them.
    pub max_concurrent: Option<usize>,
    /// `None` polls until the job reaches a terminal state.
    pub max_poll_attempts: Option<u32>,
    pub options: ScrapeOptions,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            target_url: "https://www.google.com/search?q=puppeteer".to_string(),
            workers: 10,
            poll_interval_seconds: 5,
            max_concurrent: None,
            max_poll_attempts: None,
            options: ScrapeOptions::default(),
        }
    }
}

impl ProbeConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_seconds)
    }

    pub fn concurrency_limit(&self) -> usize {
        self.max_concurrent.unwrap_or(self.workers).max(1)
    }

    /// One request per worker, each on its own result page.
    pub fn requests(&self) -> Vec<ScrapeRequest> {
        (0..self.workers)
            .map(|i| {
                ScrapeRequest::new(format!("{}&page={}", self.target_url, i))
                    .with_options(self.options.clone())
            })
            .collect()
    }

    fn validate(self) -> Result<Self> {
        if self.base_url.trim().is_empty() {
            return Err(ProbeError::Config("base_url must not be empty".into()));
        }
        if self.max_concurrent == Some(0) {
            return Err(ProbeError::Config("max_concurrent must be at least 1".into()));
        }
        if self.max_poll_attempts == Some(0) {
            return Err(ProbeError::Config("max_poll_attempts must be at least 1".into()));
        }
        Ok(self)
    }
}

pub fn parse_config(content: &str) -> Result<ProbeConfig> {
    let config: ProbeConfig = serde_json::from_str(content)?;
    config.validate()
}

pub fn load_config(path: &str) -> Result<ProbeConfig> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Reads `path` when it exists, otherwise falls back to the built-in defaults.
pub fn load_or_default(path: &str) -> Result<ProbeConfig> {
    if Path::new(path).exists() {
        load_config(path)
    } else {
        Ok(ProbeConfig::default())
    }
}
