use tally_config::TallyConfig;
use tally_quotes::QuoteDeck;
use tally_treasury::BudgetLoader;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub config: TallyConfig,
    pub loader: BudgetLoader,
}

impl AppContext {
    #[must_use]
    pub fn new(config: TallyConfig) -> Self {
        let loader = BudgetLoader::from_config(&config.treasury);
        Self { config, loader }
    }

    /// Quote deck from `quotes.data_path`, or the bundled deck when unset.
    pub fn deck(&self) -> anyhow::Result<QuoteDeck> {
        QuoteDeck::load(&self.config.quotes).map_err(|error| {
            anyhow::anyhow!(
                "failed to load quote deck '{}': {error}",
                self.config.quotes.data_path
            )
        })
    }
}
