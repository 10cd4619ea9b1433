//! Weapon table configuration loading

use super::ConfigError;
use crate::progression::{LevelTable, WeaponStats};
use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Container for weapon level tables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeaponsConfig {
    #[serde(rename = "weapons")]
    pub weapons: Vec<LevelTable>,
}

/// Load weapon tables from a TOML file
pub fn load_weapon_tables(path: &Path) -> Result<HashMap<String, LevelTable>, ConfigError> {
    let config: WeaponsConfig = super::load_toml(path)?;
    collect(config)
}

/// Load weapon tables from a TOML string
pub fn parse_weapon_tables(content: &str) -> Result<HashMap<String, LevelTable>, ConfigError> {
    let config: WeaponsConfig = super::parse_toml(content)?;
    collect(config)
}

fn collect(config: WeaponsConfig) -> Result<HashMap<String, LevelTable>, ConfigError> {
    let mut map = HashMap::new();
    for table in config.weapons {
        table.validate()?;
        if map.insert(table.id.clone(), table).is_some() {
            return Err(ConfigError::ValidationError(
                "duplicate weapon id in config".to_string(),
            ));
        }
    }
    Ok(map)
}

/// Get the built-in weapon tables
pub fn default_weapon_tables() -> HashMap<String, LevelTable> {
    let toml = include_str!("../../config/weapons.toml");
    parse_weapon_tables(toml).unwrap_or_else(|_| {
        let mut map = HashMap::new();
        let fallback = LevelTable {
            id: "basic_strike".to_string(),
            name: "Basic Strike".to_string(),
            max_level: 1,
            base: WeaponStats::default(),
            entries: Vec::new(),
        };
        map.insert(fallback.id.clone(), fallback);
        map
    })
}
