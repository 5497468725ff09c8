pub mod budget;
pub mod quotes;

use crate::cli::{Commands, GlobalFlags};
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Budget { action } => budget::handle(&action, ctx, flags).await,
        Commands::Quotes { action } => quotes::handle(&action, ctx, flags),
    }
}
