//! Tiered budget loader with a session cache.
//!
//! `load` walks the configured sources in order and caches the first success
//! under the `city-year-dataset` key. A failed tier is logged and skipped; if
//! every tier fails the bundled budget is served, so `load` always returns.

use std::sync::Arc;

use tally_config::TreasuryConfig;
use tokio_util::sync::CancellationToken;

use crate::bundled;
use crate::cache::{BudgetCache, Clock, SystemClock};
use crate::error::TreasuryError;
use crate::http::build_client;
use crate::model::{BudgetData, BudgetKey, City};
use crate::source::{BudgetSource, SnapshotStore, SourceKind, TreasuryClient};

pub struct BudgetLoader {
    sources: Vec<BudgetSource>,
    cache: BudgetCache,
}

impl BudgetLoader {
    /// Build a loader over `sources` (highest priority first).
    ///
    /// The bundled budget backs the chain whether or not it is listed.
    #[must_use]
    pub fn new(sources: Vec<BudgetSource>, clock: Arc<dyn Clock>) -> Self {
        Self {
            sources,
            cache: BudgetCache::new(clock),
        }
    }

    /// The standard chain: remote API, static snapshot, bundled mock.
    #[must_use]
    pub fn from_config(config: &TreasuryConfig) -> Self {
        let http = build_client(config);
        Self::new(
            vec![
                BudgetSource::Api(TreasuryClient::with_http(http, config.api_base_trimmed())),
                BudgetSource::Snapshot(SnapshotStore::from_config(config)),
                BudgetSource::Bundled,
            ],
            Arc::new(SystemClock),
        )
    }

    #[must_use]
    pub const fn cache(&self) -> &BudgetCache {
        &self.cache
    }

    /// Load the budget for `key`, memoized for the life of the loader.
    ///
    /// Concurrent calls for the same uncached key are not de-duplicated; each
    /// walks the chain and the last one to finish owns the cache entry.
    pub async fn load(&self, key: &BudgetKey) -> Arc<BudgetData> {
        if let Some(cached) = self.cache.get(key) {
            tracing::debug!(%key, "budget cache hit");
            return cached;
        }

        for source in &self.sources {
            let kind = source.kind();
            match source.fetch(key).await {
                Ok(mut data) => {
                    if kind == SourceKind::Api && data.metadata.generated_at.is_empty() {
                        data.metadata.generated_at = self.cache.now().to_rfc3339();
                    }
                    if kind == SourceKind::Bundled {
                        tracing::info!(%key, "serving bundled budget");
                    } else {
                        tracing::debug!(%key, source = %kind, "budget loaded");
                    }
                    return self.cache.insert(key, data, kind);
                }
                Err(e) => {
                    tracing::warn!(%key, source = %kind, %e, "budget source unavailable");
                }
            }
        }

        tracing::info!(%key, "serving bundled budget");
        self.cache.insert(key, bundled::budget_data(), SourceKind::Bundled)
    }

    /// Convenience form of [`Self::load`] taking the key parts separately.
    pub async fn load_budget(&self, year: u16, city_name: &str, dataset: &str) -> Arc<BudgetData> {
        self.load(&BudgetKey::new(city_name, year, dataset)).await
    }

    /// Like [`Self::load`], but gives up when `cancel` fires.
    ///
    /// Nothing is cached for a cancelled load.
    ///
    /// # Errors
    ///
    /// Returns [`TreasuryError::Cancelled`] if the token is cancelled first.
    pub async fn load_cancellable(
        &self,
        key: &BudgetKey,
        cancel: CancellationToken,
    ) -> Result<Arc<BudgetData>, TreasuryError> {
        tokio::select! {
            biased;
            () = cancel.cancelled() => Err(TreasuryError::Cancelled),
            data = self.load(key) => Ok(data),
        }
    }

    /// Cities from the first configured API source. Failures log and yield an empty list.
    pub async fn cities(&self) -> Vec<City> {
        let Some(client) = self.sources.iter().find_map(|s| match s {
            BudgetSource::Api(client) => Some(client),
            _ => None,
        }) else {
            tracing::debug!("no treasury API source configured; no cities");
            return Vec::new();
        };

        client.cities().await.unwrap_or_else(|e| {
            tracing::warn!(%e, "city list unavailable");
            Vec::new()
        })
    }

    /// Drop every cached budget.
    pub fn reset(&self) {
        self.cache.reset();
    }
}
