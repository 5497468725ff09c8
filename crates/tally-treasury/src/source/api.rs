//! Remote treasury API client.
//!
//! Endpoints:
//! - `GET {base}/treasury/budgets?city=&year=&dataset=` → budget object or array
//! - `GET {base}/treasury/budgets/{id}/categories` → category array
//! - `GET {base}/treasury/cities` → city array

use serde::{Deserialize, Deserializer};

use crate::error::TreasuryError;
use crate::http::{check_response, read_json};
use crate::model::{
    ApiId, BudgetCategory, BudgetData, BudgetKey, BudgetMetadata, City, LineItem, LineItemMetadata,
};

/// `dataSource` recorded on budgets assembled from the API.
pub const REMOTE_DATA_SOURCE: &str = "treasury API";

/// Colors handed out to categories the API returns without one.
const PALETTE: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    fn into_first(self) -> Option<T> {
        match self {
            Self::Many(items) => items.into_iter().next(),
            Self::One(item) => Some(item),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiBudget {
    #[serde(default)]
    id: Option<ApiId>,
    #[serde(default, alias = "city", alias = "city_name")]
    city_name: Option<String>,
    #[serde(default, alias = "year", alias = "fiscal_year", deserialize_with = "optional_integer")]
    fiscal_year: Option<u16>,
    #[serde(default, deserialize_with = "optional_integer")]
    population: Option<u64>,
    #[serde(default, alias = "total_budget", deserialize_with = "optional_amount")]
    total_budget: Option<f64>,
    #[serde(default, alias = "generated_at", alias = "updatedAt")]
    generated_at: Option<String>,
    #[serde(default)]
    hierarchy: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiCategory {
    name: String,
    #[serde(alias = "totalAmount", alias = "total_amount", deserialize_with = "amount")]
    amount: f64,
    #[serde(default)]
    color: Option<String>,
    #[serde(default, alias = "line_items")]
    line_items: Option<Vec<ApiLineItem>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiLineItem {
    description: String,
    #[serde(alias = "actual_amount", alias = "amount", deserialize_with = "amount")]
    actual_amount: f64,
    #[serde(default)]
    metadata: Option<LineItemMetadata>,
}

impl From<ApiLineItem> for LineItem {
    fn from(item: ApiLineItem) -> Self {
        Self {
            description: item.description,
            actual_amount: item.actual_amount,
            metadata: item.metadata,
        }
    }
}

/// Numeric columns sometimes come back as decimal strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

fn amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(n) => Ok(n),
        NumberOrText::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IntegerOrText {
    Integer(u64),
    Text(String),
}

/// Counts and years, as integers or digit strings.
fn optional_integer<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<u64>,
    T::Error: std::fmt::Display,
{
    let raw = match Option::<IntegerOrText>::deserialize(deserializer)? {
        None => return Ok(None),
        Some(IntegerOrText::Integer(n)) => n,
        Some(IntegerOrText::Text(s)) => s.trim().parse().map_err(serde::de::Error::custom)?,
    };
    T::try_from(raw).map(Some).map_err(serde::de::Error::custom)
}

fn optional_amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    match Option::<NumberOrText>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrText::Number(n)) => Ok(Some(n)),
        Some(NumberOrText::Text(s)) => s.trim().parse().map(Some).map_err(serde::de::Error::custom),
    }
}

impl ApiBudget {
    fn into_budget_data(self, key: &BudgetKey, categories: Vec<ApiCategory>) -> BudgetData {
        let categories: Vec<BudgetCategory> = categories
            .into_iter()
            .enumerate()
            .map(|(index, c)| BudgetCategory {
                name: c.name,
                amount: c.amount,
                color: c
                    .color
                    .filter(|color| !color.is_empty())
                    .unwrap_or_else(|| PALETTE[index % PALETTE.len()].to_string()),
                line_items: c
                    .line_items
                    .map(|items| items.into_iter().map(LineItem::from).collect()),
            })
            .collect();
        let total_budget = self
            .total_budget
            .unwrap_or_else(|| categories.iter().map(|c| c.amount).sum());

        BudgetData {
            metadata: BudgetMetadata {
                city_name: self.city_name.unwrap_or_else(|| key.city_name.clone()),
                fiscal_year: self.fiscal_year.unwrap_or(key.year),
                population: self.population.unwrap_or_default(),
                total_budget,
                generated_at: self.generated_at.unwrap_or_default(),
                hierarchy: self.hierarchy.unwrap_or_default(),
                data_source: REMOTE_DATA_SOURCE.to_string(),
            },
            categories,
        }
    }
}

/// HTTP client for the treasury API.
#[derive(Debug, Clone)]
pub struct TreasuryClient {
    http: reqwest::Client,
    base: String,
}

impl TreasuryClient {
    /// Reuse an existing client against `base`.
    #[must_use]
    pub fn with_http(http: reqwest::Client, base: &str) -> Self {
        Self {
            http,
            base: base.trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Fetch a budget and its categories and assemble them into [`BudgetData`].
    ///
    /// # Errors
    ///
    /// Returns [`TreasuryError::NotFound`] when the API has no match for `key`
    /// or the match carries no identifier, and the transport/status/parse
    /// variants when either request fails.
    pub async fn fetch_budget(&self, key: &BudgetKey) -> Result<BudgetData, TreasuryError> {
        let url = format!(
            "{}/treasury/budgets?city={}&year={}&dataset={}",
            self.base,
            urlencoding::encode(&key.city_name),
            key.year,
            urlencoding::encode(&key.dataset),
        );
        let resp = check_response(self.http.get(&url).send().await?).await?;
        let budgets: OneOrMany<ApiBudget> = read_json(resp).await?;

        let budget = budgets
            .into_first()
            .ok_or_else(|| TreasuryError::NotFound(key.cache_key()))?;
        let Some(id) = budget.id.clone() else {
            return Err(TreasuryError::NotFound(format!(
                "{key} (budget has no identifier)"
            )));
        };

        let categories = self.fetch_categories(&id).await?;
        tracing::debug!(%key, budget_id = %id, categories = categories.len(), "assembled remote budget");
        Ok(budget.into_budget_data(key, categories))
    }

    async fn fetch_categories(&self, id: &ApiId) -> Result<Vec<ApiCategory>, TreasuryError> {
        let url = format!(
            "{}/treasury/budgets/{}/categories",
            self.base,
            urlencoding::encode(&id.to_string())
        );
        let resp = check_response(self.http.get(&url).send().await?).await?;
        read_json(resp).await
    }

    /// List the cities the API has budgets for.
    ///
    /// # Errors
    ///
    /// Returns [`TreasuryError`] if the request fails or the body is not a city array.
    pub async fn cities(&self) -> Result<Vec<City>, TreasuryError> {
        let url = format!("{}/treasury/cities", self.base);
        let resp = check_response(self.http.get(&url).send().await?).await?;
        read_json(resp).await
    }
}
