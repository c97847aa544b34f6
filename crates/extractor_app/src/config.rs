use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use extractor_engine::{ActionDescriptor, FetchSettings, Limits};
use serde::Deserialize;

/// JSON run configuration.
///
/// Only `actions` is required. Missing transport fields fall back to
/// [`FetchSettings::default`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub actions: Vec<ActionDescriptor>,
    #[serde(rename = "baseurl", default)]
    pub base_url: String,
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub stack_limit: u64,
    #[serde(default)]
    pub iteration_limit: u64,
    #[serde(default)]
    pub connect_timeout_secs: Option<u64>,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    #[serde(default)]
    pub redirect_limit: Option<usize>,
    #[serde(default)]
    pub max_bytes: Option<u64>,
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn parse(text: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn limits(&self) -> Limits {
        Limits {
            depth: self.stack_limit,
            iterations: self.iteration_limit,
        }
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        let defaults = FetchSettings::default();
        FetchSettings {
            connect_timeout: self
                .connect_timeout_secs
                .map_or(defaults.connect_timeout, Duration::from_secs),
            request_timeout: self
                .request_timeout_secs
                .map_or(defaults.request_timeout, Duration::from_secs),
            redirect_limit: self.redirect_limit.unwrap_or(defaults.redirect_limit),
            max_bytes: self.max_bytes.unwrap_or(defaults.max_bytes),
        }
    }
}
