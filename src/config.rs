//! Settings from the environment, with `.env` support.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

pub(crate) const DEFAULT_BIND: &str = "127.0.0.1:3000";
pub(crate) const DEFAULT_API_URL: &str = "http://127.0.0.1:3000/api";
pub(crate) const DEFAULT_USER_ID: &str = "demo-user-001";
pub(crate) const DEFAULT_PREFIX: &str = "/api";
pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 5;

const DB_FILE: &str = "budget-tracker.db";
const LOG_FILE: &str = "budget-tracker.log";

#[derive(Debug, Clone)]
pub(crate) struct Config {
    pub(crate) bind: SocketAddr,
    pub(crate) db_path: PathBuf,
    pub(crate) log_path: PathBuf,
    pub(crate) api_url: String,
    pub(crate) api_key: Option<String>,
    pub(crate) user_id: String,
    /// Path the API is mounted under; empty, or `/segment` without a trailing slash.
    pub(crate) prefix: String,
    pub(crate) timeout: Duration,
}

impl Config {
    pub(crate) fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        let data_dir = data_dir()?;
        Self::from_lookup(|key| std::env::var(key).ok(), data_dir)
    }

    /// Builds the configuration from any variable source. Blank values count
    /// as unset, except `BUDGET_PREFIX` where blank means "no prefix".
    pub(crate) fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        data_dir: PathBuf,
    ) -> Result<Self> {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bind = var("BUDGET_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind: SocketAddr = bind
            .parse()
            .with_context(|| format!("BUDGET_BIND is not a socket address: {bind}"))?;

        let timeout = match var("BUDGET_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .with_context(|| format!("BUDGET_TIMEOUT_SECS is not a number: {raw}"))?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let prefix = match lookup("BUDGET_PREFIX") {
            Some(raw) => normalize_prefix(&raw),
            None => DEFAULT_PREFIX.to_string(),
        };

        Ok(Self {
            bind,
            db_path: var("BUDGET_DB")
                .map(PathBuf::from)
                .unwrap_or_else(|| data_dir.join(DB_FILE)),
            log_path: data_dir.join(LOG_FILE),
            api_url: var("BUDGET_API_URL")
                .unwrap_or_else(|| DEFAULT_API_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            api_key: var("BUDGET_API_KEY"),
            user_id: var("BUDGET_USER_ID").unwrap_or_else(|| DEFAULT_USER_ID.to_string()),
            prefix,
            timeout: Duration::from_secs(timeout),
        })
    }
}

/// `api/`, `/api` and `/api/` all become `/api`; `/` becomes empty.
pub(crate) fn normalize_prefix(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}

fn data_dir() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "budget-tracker", "BudgetTracker")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir.to_path_buf())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
