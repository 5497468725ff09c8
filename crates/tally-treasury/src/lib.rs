//! # tally-treasury
//!
//! Municipal budget loading and the derived views of the budget dashboard.
//!
//! Budgets come from a prioritized chain of sources:
//! - the remote treasury API (budget lookup, then its categories)
//! - a static `budget-{year}.json` snapshot
//! - a budget compiled into the binary
//!
//! [`BudgetLoader::load`] never fails: each unavailable tier is logged and
//! skipped, and the result is memoized per `city-year-dataset` key until
//! [`BudgetLoader::reset`].

pub mod bundled;
pub mod cache;
pub mod loader;
pub mod model;
pub mod per_dollar;
pub mod source;
pub mod transactions;

mod error;
mod http;

pub use cache::{BudgetCache, CacheEntry, Clock, SystemClock};
pub use error::TreasuryError;
pub use loader::BudgetLoader;
pub use model::{
    ApiId, BudgetCategory, BudgetData, BudgetKey, BudgetMetadata, City, LineItem, LineItemMetadata,
};
pub use per_dollar::DollarShare;
pub use source::{BudgetSource, SnapshotStore, SourceKind, TreasuryClient};
pub use transactions::{CategoryTotal, TransactionSummary, VendorTotal};
