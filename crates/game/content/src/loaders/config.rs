//! Combat configuration loader.

use std::path::Path;

use skirmish_core::CombatConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for combat configuration from TOML files.
///
/// Missing keys fall back to [`CombatConfig::default`].
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load(path: &Path) -> LoadResult<CombatConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<CombatConfig> {
        let config: CombatConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = ConfigLoader::parse("element_bonus = 1.5\noffer_size = 4\n").unwrap();
        assert_eq!(config.element_bonus, 1.5);
        assert_eq!(config.offer_size, 4);
        assert_eq!(config.min_cooldown, CombatConfig::DEFAULT_MIN_COOLDOWN);
    }

    #[test]
    fn level_growth_table_is_parsed() {
        let config = ConfigLoader::parse(
            "[level_growth]\nmax_health = 20.0\nattack = 3.0\ndefense = 1.0\nspeed = 0.0\nregen_rate = 0.5\n",
        )
        .unwrap();
        assert_eq!(config.level_growth.max_health, 20.0);
        assert_eq!(config.level_growth.speed, 0.0);
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(ConfigLoader::parse("element_bonus = \"lots\"").is_err());
    }
}
