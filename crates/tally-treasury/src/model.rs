//! Budget data model shared by every source and derived view.
//!
//! Wire names are camelCase to match the treasury API and the snapshot files.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A municipal budget: descriptive metadata plus its category breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetData {
    pub metadata: BudgetMetadata,
    pub categories: Vec<BudgetCategory>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetMetadata {
    pub city_name: String,
    pub fiscal_year: u16,
    #[serde(default)]
    pub population: u64,
    pub total_budget: f64,
    /// ISO-8601 timestamp of when the dataset was produced.
    #[serde(default)]
    pub generated_at: String,
    /// Level names from the top of the budget tree down (e.g. fund, department).
    #[serde(default)]
    pub hierarchy: Vec<String>,
    /// Human-readable origin of the data.
    #[serde(default)]
    pub data_source: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetCategory {
    pub name: String,
    pub amount: f64,
    /// Display color as a CSS hex string.
    #[serde(default)]
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_items: Option<Vec<LineItem>>,
}

/// A single recorded expenditure within a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub description: String,
    pub actual_amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<LineItemMetadata>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemMetadata {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub vendor: Option<String>,
    #[serde(default)]
    pub expense_category: Option<String>,
}

impl LineItem {
    /// Vendor name, treating a blank string as missing.
    #[must_use]
    pub fn vendor(&self) -> Option<&str> {
        self.metadata
            .as_ref()
            .and_then(|m| m.vendor.as_deref())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }

    #[must_use]
    pub fn date(&self) -> Option<&str> {
        self.metadata.as_ref().and_then(|m| m.date.as_deref())
    }
}

impl BudgetData {
    /// Look up a category by name (case-insensitive).
    #[must_use]
    pub fn category(&self, name: &str) -> Option<&BudgetCategory> {
        self.categories
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// Every line item across all categories, in category order.
    pub fn line_items(&self) -> impl Iterator<Item = &LineItem> {
        self.categories
            .iter()
            .filter_map(|c| c.line_items.as_deref())
            .flatten()
    }

    /// Sum of category amounts. Used when a source does not report a total.
    #[must_use]
    pub fn category_sum(&self) -> f64 {
        self.categories.iter().map(|c| c.amount).sum()
    }
}

/// A city known to the treasury API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    pub id: ApiId,
    pub name: String,
    #[serde(default)]
    pub state: String,
}

/// Treasury API identifiers arrive as either JSON numbers or strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ApiId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ApiId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Identity of one budget request; also the session cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BudgetKey {
    pub city_name: String,
    pub year: u16,
    pub dataset: String,
}

impl BudgetKey {
    #[must_use]
    pub fn new(city_name: impl Into<String>, year: u16, dataset: impl Into<String>) -> Self {
        Self {
            city_name: city_name.into(),
            year,
            dataset: dataset.into(),
        }
    }

    /// Composite `city-year-dataset` string used to memoize loads.
    #[must_use]
    pub fn cache_key(&self) -> String {
        format!("{}-{}-{}", self.city_name, self.year, self.dataset)
    }
}

impl fmt::Display for BudgetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.cache_key())
    }
}
