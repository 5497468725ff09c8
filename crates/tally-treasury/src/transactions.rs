//! Aggregates over line items for the transaction table.

use chrono::{DateTime, NaiveDate};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

use crate::model::{BudgetData, LineItem};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSummary {
    pub total: f64,
    pub count: usize,
    pub unique_vendors: usize,
    pub average: f64,
    /// Items newest first; undated items last.
    pub items: Vec<LineItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorTotal {
    pub vendor: String,
    pub total: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    pub name: String,
    pub budgeted: f64,
    pub spent: f64,
    pub transactions: usize,
}

/// Parse `YYYY-MM-DD` or an RFC 3339 timestamp. Anything else counts as undated.
#[must_use]
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

/// Total, vendor count, average and date-sorted items for `items`.
#[must_use]
pub fn summarize(items: &[LineItem]) -> TransactionSummary {
    let total: f64 = items.iter().map(|i| i.actual_amount).sum();
    let count = items.len();
    let unique_vendors = items
        .iter()
        .filter_map(LineItem::vendor)
        .collect::<HashSet<_>>()
        .len();
    #[allow(clippy::cast_precision_loss)]
    let average = if count == 0 { 0.0 } else { total / count as f64 };

    let mut sorted = items.to_vec();
    // Reversed: newest first, and None (undated) sorts after every date.
    sorted.sort_by_key(|item| std::cmp::Reverse(item.date().and_then(parse_date)));

    TransactionSummary {
        total,
        count,
        unique_vendors,
        average,
        items: sorted,
    }
}

/// Vendors ranked by total spend, at most `limit` rows. Items without a vendor are skipped.
#[must_use]
pub fn top_vendors(items: &[LineItem], limit: usize) -> Vec<VendorTotal> {
    let mut by_vendor: HashMap<&str, (f64, usize)> = HashMap::new();
    for item in items {
        if let Some(vendor) = item.vendor() {
            let entry = by_vendor.entry(vendor).or_insert((0.0, 0));
            entry.0 += item.actual_amount;
            entry.1 += 1;
        }
    }

    let mut totals: Vec<VendorTotal> = by_vendor
        .into_iter()
        .map(|(vendor, (total, count))| VendorTotal {
            vendor: vendor.to_string(),
            total,
            count,
        })
        .collect();
    totals.sort_by(|a, b| b.total.total_cmp(&a.total).then_with(|| a.vendor.cmp(&b.vendor)));
    totals.truncate(limit);
    totals
}

/// Budgeted vs. recorded spend per category, in budget order.
#[must_use]
pub fn category_totals(data: &BudgetData) -> Vec<CategoryTotal> {
    data.categories
        .iter()
        .map(|category| {
            let items = category.line_items.as_deref().unwrap_or_default();
            CategoryTotal {
                name: category.name.clone(),
                budgeted: category.amount,
                spent: items.iter().map(|i| i.actual_amount).sum(),
                transactions: items.len(),
            }
        })
        .collect()
}
