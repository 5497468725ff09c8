//! Budget sources, tried in priority order by the loader.

pub mod api;
pub mod snapshot;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::bundled;
use crate::error::TreasuryError;
use crate::model::{BudgetData, BudgetKey};

pub use api::TreasuryClient;
pub use snapshot::SnapshotStore;

/// Which tier produced a budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Api,
    Snapshot,
    Bundled,
}

impl SourceKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Api => "api",
            Self::Snapshot => "snapshot",
            Self::Bundled => "bundled",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One tier of the fallback chain.
#[derive(Debug, Clone)]
pub enum BudgetSource {
    /// Remote treasury API (budget lookup + categories).
    Api(TreasuryClient),
    /// Static snapshot keyed by year only.
    Snapshot(SnapshotStore),
    /// Compiled-in mock budget.
    Bundled,
}

impl BudgetSource {
    #[must_use]
    pub const fn kind(&self) -> SourceKind {
        match self {
            Self::Api(_) => SourceKind::Api,
            Self::Snapshot(_) => SourceKind::Snapshot,
            Self::Bundled => SourceKind::Bundled,
        }
    }

    /// Fetch the budget for `key` from this tier.
    ///
    /// # Errors
    ///
    /// Returns [`TreasuryError`] when the tier is unavailable. The bundled tier never errors.
    pub async fn fetch(&self, key: &BudgetKey) -> Result<BudgetData, TreasuryError> {
        match self {
            Self::Api(client) => client.fetch_budget(key).await,
            Self::Snapshot(store) => {
                let data = store.fetch(key.year).await?;
                if !data.metadata.city_name.eq_ignore_ascii_case(&key.city_name) {
                    tracing::debug!(
                        %key,
                        snapshot_city = %data.metadata.city_name,
                        "snapshot is keyed by year only; city differs from request"
                    );
                }
                Ok(data)
            }
            Self::Bundled => Ok(bundled::budget_data()),
        }
    }
}
