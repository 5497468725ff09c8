use std::sync::Arc;

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tally_treasury::transactions::{category_totals, summarize, top_vendors};
use tally_treasury::{BudgetData, BudgetKey, LineItem, SourceKind};
use tokio_util::sync::CancellationToken;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{BudgetCommands, BudgetKeyArgs};
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BudgetOverview {
    city_name: String,
    fiscal_year: u16,
    population: u64,
    total_budget: f64,
    categories: usize,
    line_items: usize,
    hierarchy: Vec<String>,
    data_source: String,
    generated_at: String,
    source: Option<SourceKind>,
    cached_at: Option<DateTime<Utc>>,
}

/// Handle `tally budget`.
pub async fn handle(action: &BudgetCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        BudgetCommands::Show { key } => {
            let key = budget_key(key, ctx);
            let data = load(ctx, &key).await?;
            let entry = ctx.loader.cache().entry(&key);
            let overview = BudgetOverview {
                city_name: data.metadata.city_name.clone(),
                fiscal_year: data.metadata.fiscal_year,
                population: data.metadata.population,
                total_budget: data.metadata.total_budget,
                categories: data.categories.len(),
                line_items: data.line_items().count(),
                hierarchy: data.metadata.hierarchy.clone(),
                data_source: data.metadata.data_source.clone(),
                generated_at: data.metadata.generated_at.clone(),
                source: entry.as_ref().map(|e| e.source),
                cached_at: entry.map(|e| e.cached_at),
            };
            output(&overview, flags.format)
        }
        BudgetCommands::Categories { key } => {
            let data = load(ctx, &budget_key(key, ctx)).await?;
            output(&category_totals(&data), flags.format)
        }
        BudgetCommands::PerDollar { key, denomination } => {
            let denomination = denomination.unwrap_or(ctx.config.general.default_denomination);
            if !(denomination.is_finite() && denomination > 0.0) {
                anyhow::bail!("--denomination must be a positive amount, got {denomination}");
            }
            let data = load(ctx, &budget_key(key, ctx)).await?;
            output(&data.per_dollar(denomination), flags.format)
        }
        BudgetCommands::Transactions { key, category } => {
            let data = load(ctx, &budget_key(key, ctx)).await?;
            let items = line_items(&data, category.as_deref())?;
            output(&summarize(&items), flags.format)
        }
        BudgetCommands::Vendors {
            key,
            category,
            limit,
        } => {
            let data = load(ctx, &budget_key(key, ctx)).await?;
            let items = line_items(&data, category.as_deref())?;
            output(&top_vendors(&items, *limit), flags.format)
        }
        BudgetCommands::Cities => output(&ctx.loader.cities().await, flags.format),
    }
}

fn budget_key(args: &BudgetKeyArgs, ctx: &AppContext) -> BudgetKey {
    let dataset = args
        .dataset
        .clone()
        .unwrap_or_else(|| ctx.config.general.default_dataset.clone());
    BudgetKey::new(args.city.clone(), args.year, dataset)
}

/// Load through the tier chain; Ctrl-C abandons the request.
async fn load(ctx: &AppContext, key: &BudgetKey) -> anyhow::Result<Arc<BudgetData>> {
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    let watcher = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            trigger.cancel();
        }
    });

    let result = ctx.loader.load_cancellable(key, cancel).await;
    watcher.abort();
    result.with_context(|| format!("loading budget {key}"))
}

fn line_items(data: &BudgetData, category: Option<&str>) -> anyhow::Result<Vec<LineItem>> {
    let Some(name) = category else {
        return Ok(data.line_items().cloned().collect());
    };

    let category = data.category(name).with_context(|| {
        let known = data
            .categories
            .iter()
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        format!("no category named '{name}' (available: {known})")
    })?;
    Ok(category.line_items.clone().unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tally_treasury::bundled;

    use super::line_items;

    #[test]
    fn all_line_items_without_category() {
        let data = bundled::budget_data();
        let items = line_items(&data, None).unwrap();
        assert_eq!(items.len(), data.line_items().count());
    }

    #[test]
    fn category_lookup_ignores_case() {
        let data = bundled::budget_data();
        let items = line_items(&data, Some("libraries")).unwrap();
        let total: f64 = items.iter().map(|i| i.actual_amount).sum();
        assert!((total - 272_900.0).abs() < 0.01);
    }

    #[test]
    fn unknown_category_lists_known_names() {
        let data = bundled::budget_data();
        let err = line_items(&data, Some("Space Program")).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Space Program"));
        assert!(message.contains("Public Safety"));
    }
}
