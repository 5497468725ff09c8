//! "Where does each dollar go" breakdown.
//!
//! For a denomination `D`, each category gets `round(amount / total * D * 100)`
//! cents. Rows are sorted by cents, largest first; ties keep input order.

use serde::Serialize;

use crate::model::{BudgetCategory, BudgetData};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DollarShare {
    pub name: String,
    pub color: String,
    pub amount: f64,
    /// Fraction of the total budget, 0.0..=1.0 for non-negative amounts.
    pub share: f64,
    pub cents: i64,
    pub formatted_amount: String,
}

/// Break `denomination` dollars down across `categories`.
#[must_use]
pub fn breakdown(categories: &[BudgetCategory], total_budget: f64, denomination: f64) -> Vec<DollarShare> {
    let mut rows: Vec<DollarShare> = categories
        .iter()
        .map(|category| {
            let share = if total_budget > 0.0 {
                category.amount / total_budget
            } else {
                0.0
            };
            #[allow(clippy::cast_possible_truncation)]
            let cents = (share * denomination * 100.0).round() as i64;
            DollarShare {
                name: category.name.clone(),
                color: category.color.clone(),
                amount: category.amount,
                share,
                cents,
                formatted_amount: format_cents(cents),
            }
        })
        .collect();
    rows.sort_by(|a, b| b.cents.cmp(&a.cents));
    rows
}

impl BudgetData {
    /// Per-dollar breakdown against this budget's reported total.
    #[must_use]
    pub fn per_dollar(&self, denomination: f64) -> Vec<DollarShare> {
        breakdown(&self.categories, self.metadata.total_budget, denomination)
    }
}

/// `$D.CC` at a dollar or more, `N¢` below.
#[must_use]
pub fn format_cents(cents: i64) -> String {
    if cents >= 100 {
        format_usd(cents)
    } else {
        format!("{cents}¢")
    }
}

/// Format a cent amount as US dollars with thousands separators.
#[must_use]
pub fn format_usd(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    let dollars = (cents / 100).to_string();
    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (i, ch) in dollars.chars().enumerate() {
        if i > 0 && (dollars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}${grouped}.{:02}", cents % 100)
}
