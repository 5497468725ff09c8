//! Budget data source configuration.

use serde::{Deserialize, Serialize};

/// Public treasury endpoint used when `API_BASE` is not set.
pub const DEFAULT_API_BASE: &str = "https://api.opentally.org";

fn default_api_base() -> String {
    String::from(DEFAULT_API_BASE)
}

fn default_snapshot_dir() -> String {
    String::from("./data")
}

const fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    String::from("tally/0.1")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TreasuryConfig {
    /// Base URL of the remote treasury API (no trailing slash required).
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Directory (or `http(s)://` base) holding `budget-{year}.json` snapshots.
    #[serde(default = "default_snapshot_dir")]
    pub snapshot_dir: String,

    /// Per-request timeout for the remote API.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for TreasuryConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            snapshot_dir: default_snapshot_dir(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl TreasuryConfig {
    /// API base with any trailing `/` removed, ready for path joining.
    #[must_use]
    pub fn api_base_trimmed(&self) -> &str {
        self.api_base.trim_end_matches('/')
    }
}
