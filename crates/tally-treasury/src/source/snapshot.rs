//! Static budget snapshots keyed by fiscal year (`budget-{year}.json`).

use std::path::PathBuf;

use tally_config::TreasuryConfig;

use crate::error::TreasuryError;
use crate::http::{build_client, check_response, read_json};
use crate::model::BudgetData;

/// Where snapshot files live: a local directory or a static file host.
#[derive(Debug, Clone)]
pub enum SnapshotStore {
    Directory(PathBuf),
    Remote { base: String, http: reqwest::Client },
}

impl SnapshotStore {
    /// An `http://` or `https://` `snapshot_dir` is treated as a remote host.
    #[must_use]
    pub fn from_config(config: &TreasuryConfig) -> Self {
        let dir = config.snapshot_dir.as_str();
        if dir.starts_with("http://") || dir.starts_with("https://") {
            Self::Remote {
                base: dir.trim_end_matches('/').to_string(),
                http: build_client(config),
            }
        } else {
            Self::Directory(PathBuf::from(dir))
        }
    }

    #[must_use]
    pub fn file_name(year: u16) -> String {
        format!("budget-{year}.json")
    }

    /// Human-readable location of the snapshot for `year`.
    #[must_use]
    pub fn location(&self, year: u16) -> String {
        match self {
            Self::Directory(dir) => dir.join(Self::file_name(year)).display().to_string(),
            Self::Remote { base, .. } => format!("{base}/{}", Self::file_name(year)),
        }
    }

    /// Read and parse the snapshot for `year` as-is.
    ///
    /// # Errors
    ///
    /// Returns [`TreasuryError::Io`] or a transport/status error when the file
    /// cannot be fetched, and [`TreasuryError::Parse`] when it is not budget JSON.
    pub async fn fetch(&self, year: u16) -> Result<BudgetData, TreasuryError> {
        tracing::debug!(location = %self.location(year), "reading budget snapshot");
        match self {
            Self::Directory(dir) => {
                let body = tokio::fs::read_to_string(dir.join(Self::file_name(year))).await?;
                Ok(serde_json::from_str(&body)?)
            }
            Self::Remote { base, http } => {
                let url = format!("{base}/{}", Self::file_name(year));
                let resp = check_response(http.get(&url).send().await?).await?;
                read_json(resp).await
            }
        }
    }
}
