// src/config.rs

use crate::derive::Fallbacks;
use crate::fetch::Source;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{env, fs, path::Path};

pub const CONFIG_ENV: &str = "SSCAP_CONFIG";
pub const SOURCE_ENV: &str = "SSCAP_DATA";
pub const LOG_LEVEL_ENV: &str = "LOG_LEVEL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL or directory holding the producer's CSVs.
    pub source: Source,
    pub log_level: String,
    pub fallbacks: Fallbacks,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: Source::default(),
            log_level: "info".to_string(),
            fallbacks: Fallbacks::default(),
        }
    }
}

impl Config {
    pub fn from_yaml(text: &str) -> Result<Self> {
        serde_yaml::from_str(text).context("parsing config YAML")
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_yaml(&text).with_context(|| format!("in {}", path.display()))
    }

    /// Defaults, then the file named by `SSCAP_CONFIG`, then `SSCAP_DATA` and
    /// `LOG_LEVEL` overrides.
    pub fn load() -> Result<Self> {
        let mut config = match env::var(CONFIG_ENV) {
            Ok(path) => Self::from_file(path)?,
            Err(_) => Self::default(),
        };
        config.apply_overrides(env::var(SOURCE_ENV).ok(), env::var(LOG_LEVEL_ENV).ok())?;
        Ok(config)
    }

    fn apply_overrides(&mut self, source: Option<String>, log_level: Option<String>) -> Result<()> {
        if let Some(raw) = source {
            self.source = Source::parse(&raw)?;
        }
        if let Some(level) = log_level {
            self.log_level = level;
        }
        Ok(())
    }
}
