use tally_config::{DEFAULT_API_BASE, TallyConfig};

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &TallyConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &TallyConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();
    let mut warnings = Vec::new();

    if config.treasury.api_base == DEFAULT_API_BASE
        && has_single_underscore_key(&env_keys, "TALLY_TREASURY")
    {
        warnings.push(
            "treasury config appears default while TALLY_TREASURY_* env vars exist. Use double underscores (example: TALLY_TREASURY__API_BASE)."
                .to_string(),
        );
    }

    if !config.quotes.has_data_path() && has_single_underscore_key(&env_keys, "TALLY_QUOTES") {
        warnings.push(
            "quotes config appears default while TALLY_QUOTES_* env vars exist. Use double underscores (example: TALLY_QUOTES__DATA_PATH)."
                .to_string(),
        );
    }

    warnings
}

fn has_single_underscore_key(keys: &[String], section: &str) -> bool {
    keys.iter().any(|key| {
        key.strip_prefix(section)
            .is_some_and(|rest| rest.starts_with('_') && !rest.starts_with("__"))
    })
}
