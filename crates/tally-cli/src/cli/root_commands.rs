use clap::Subcommand;

use crate::cli::subcommands::{BudgetCommands, QuotesCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Municipal budget data.
    Budget {
        #[command(subcommand)]
        action: BudgetCommands,
    },
    /// Swipe-to-rank quote matching.
    Quotes {
        #[command(subcommand)]
        action: QuotesCommands,
    },
}
