//! Budget compiled into the binary, served when every other source fails.

use crate::model::{BudgetCategory, BudgetData, BudgetMetadata, LineItem, LineItemMetadata};

/// `dataSource` of the bundled budget.
pub const BUNDLED_DATA_SOURCE: &str = "budgetData.ts (mock)";

const CATEGORIES: [(&str, f64, &str); 8] = [
    ("Public Safety", 312_500_000.0, "#1f77b4"),
    ("Public Works", 187_500_000.0, "#ff7f0e"),
    ("Transportation", 137_500_000.0, "#e377c2"),
    ("Health & Human Services", 125_000_000.0, "#d62728"),
    ("Parks & Recreation", 75_000_000.0, "#2ca02c"),
    ("General Government", 75_000_000.0, "#7f7f7f"),
    ("Housing & Community Development", 62_500_000.0, "#9467bd"),
    ("Libraries", 25_000_000.0, "#8c564b"),
];

fn item(
    description: &str,
    actual_amount: f64,
    date: Option<&str>,
    vendor: Option<&str>,
    expense_category: &str,
) -> LineItem {
    LineItem {
        description: description.to_string(),
        actual_amount,
        metadata: Some(LineItemMetadata {
            date: date.map(str::to_string),
            vendor: vendor.map(str::to_string),
            expense_category: Some(expense_category.to_string()),
        }),
    }
}

fn line_items(category: &str) -> Option<Vec<LineItem>> {
    let items = match category {
        "Public Safety" => vec![
            item("Patrol vehicle lease", 1_840_000.0, Some("2024-02-14"), Some("Fleetline Leasing"), "Equipment"),
            item("Body camera storage", 412_300.0, Some("2024-05-02"), Some("Axon Enterprise"), "Technology"),
            item("Fire station roof repair", 268_750.0, Some("2024-03-21"), Some("Summit Roofing"), "Facilities"),
            item("Overtime adjustment", 95_000.0, None, None, "Personnel"),
        ],
        "Public Works" => vec![
            item("Street resurfacing, phase 2", 3_250_000.0, Some("2024-06-10"), Some("Granite Paving"), "Capital"),
            item("Water main replacement", 2_100_000.0, Some("2024-04-18"), Some("Granite Paving"), "Capital"),
            item("Snow removal salt", 486_200.0, Some("2024-01-09"), Some("Northern Salt Supply"), "Materials"),
        ],
        "Parks & Recreation" => vec![
            item("Playground equipment", 342_000.0, Some("2024-05-27"), Some("PlayWorks"), "Equipment"),
            item("Summer youth program", 128_500.0, Some("2024-06-01"), None, "Programs"),
            item("Tree planting", 76_400.0, Some("2024-04-22"), Some("Urban Canopy Co"), "Maintenance"),
        ],
        "Libraries" => vec![
            item("Digital lending licenses", 214_000.0, Some("2024-01-31"), Some("OverDrive"), "Collections"),
            item("Branch HVAC service", 58_900.0, Some("2024-03-05"), Some("Climate Control Inc"), "Facilities"),
        ],
        _ => return None,
    };
    Some(items)
}

/// Build the bundled budget. Never fails.
#[must_use]
pub fn budget_data() -> BudgetData {
    let categories: Vec<BudgetCategory> = CATEGORIES
        .iter()
        .map(|&(name, amount, color)| BudgetCategory {
            name: name.to_string(),
            amount,
            color: color.to_string(),
            line_items: line_items(name),
        })
        .collect();
    let total_budget = categories.iter().map(|c| c.amount).sum();

    BudgetData {
        metadata: BudgetMetadata {
            city_name: "Sample City".to_string(),
            fiscal_year: 2024,
            population: 250_000,
            total_budget,
            generated_at: "2024-07-01T00:00:00Z".to_string(),
            hierarchy: vec!["department".to_string(), "program".to_string()],
            data_source: BUNDLED_DATA_SOURCE.to_string(),
        },
        categories,
    }
}
