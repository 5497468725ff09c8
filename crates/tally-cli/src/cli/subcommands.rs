use clap::{Args, Subcommand};

/// Which budget to load. The dataset falls back to `general.default_dataset`.
#[derive(Clone, Debug, Args)]
pub struct BudgetKeyArgs {
    /// City name as the treasury API knows it
    #[arg(long)]
    pub city: String,

    /// Fiscal year
    #[arg(long)]
    pub year: u16,

    /// Dataset name (operating, capital, ...)
    #[arg(long)]
    pub dataset: Option<String>,
}

#[derive(Clone, Debug, Subcommand)]
pub enum BudgetCommands {
    /// Budget metadata and the tier it came from.
    Show {
        #[command(flatten)]
        key: BudgetKeyArgs,
    },
    /// Budgeted and spent amounts per category.
    Categories {
        #[command(flatten)]
        key: BudgetKeyArgs,
    },
    /// Where each dollar (or other denomination) of the budget goes.
    PerDollar {
        #[command(flatten)]
        key: BudgetKeyArgs,

        /// Amount to split across categories
        #[arg(long)]
        denomination: Option<f64>,
    },
    /// Line-item totals, optionally for one category.
    Transactions {
        #[command(flatten)]
        key: BudgetKeyArgs,

        /// Restrict to a single category (case-insensitive)
        #[arg(long)]
        category: Option<String>,
    },
    /// Biggest vendors by total spend.
    Vendors {
        #[command(flatten)]
        key: BudgetKeyArgs,

        #[arg(long)]
        category: Option<String>,

        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },
    /// Cities the treasury API serves.
    Cities,
}

#[derive(Clone, Debug, Subcommand)]
pub enum QuotesCommands {
    /// Quotes in deck order.
    List {
        /// Only these issues (repeatable)
        #[arg(long)]
        issue: Vec<String>,
    },
    /// Distinct issues in the deck.
    Issues,
    /// Swipe through the deck and score candidates.
    Rank(RankArgs),
}

#[derive(Clone, Debug, Args)]
pub struct RankArgs {
    /// Quote ids to agree with; every other card is swiped left
    #[arg(long, value_delimiter = ',')]
    pub agree: Vec<String>,

    /// Agreed quote to mark with the diamond badge
    #[arg(long)]
    pub diamond: Option<String>,

    /// Agreed quote to mark with the gold badge
    #[arg(long)]
    pub gold: Option<String>,

    /// Only these issues (repeatable)
    #[arg(long)]
    pub issue: Vec<String>,
}
