use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

use crate::client::DEFAULT_API_BASE;

pub const DEFAULT_OUTPUT: &str = "gitview.html";
pub const DEFAULT_LOG_FILTER: &str = "gitview=info";

/// Runtime settings, read from the environment (and `.env` when present).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the GitHub REST API.
    pub api_base: String,
    /// Where the rendered page is written.
    pub output: PathBuf,
    /// Open the page in the default browser after writing it.
    pub open_browser: bool,
    /// Tracing filter used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            open_browser: true,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    /// Loads `.env` and reads `GITVIEW_*` variables over the defaults.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable source. Empty values count
    /// as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(base) = var("GITVIEW_API_BASE") {
            config.api_base = base;
        }
        if let Some(output) = var("GITVIEW_OUTPUT") {
            config.output = PathBuf::from(output);
        }
        if let Some(open) = var("GITVIEW_OPEN") {
            config.open_browser =
                parse_bool(&open).with_context(|| format!("Invalid GITVIEW_OPEN value '{open}'"))?;
        }
        if let Some(filter) = var("GITVIEW_LOG") {
            config.log_filter = filter;
        }

        Ok(config)
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("expected a boolean, got '{other}'"),
    }
}
