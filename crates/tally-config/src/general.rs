//! General application configuration.

use serde::{Deserialize, Serialize};

fn default_dataset() -> String {
    String::from("operating")
}

const fn default_denomination() -> f64 {
    10.0
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Dataset used when a command does not name one.
    #[serde(default = "default_dataset")]
    pub default_dataset: String,

    /// Denomination (dollars) for the per-dollar breakdown.
    #[serde(default = "default_denomination")]
    pub default_denomination: f64,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_dataset: default_dataset(),
            default_denomination: default_denomination(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = GeneralConfig::default();
        assert_eq!(config.default_dataset, "operating");
        assert!((config.default_denomination - 10.0).abs() < f64::EPSILON);
    }
}
