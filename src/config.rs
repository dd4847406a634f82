use serde::{Deserialize, Serialize};

/// 1-based seat number around the table.
pub type SeatId = usize;

/// Order in which seats are filled, spreading a short-handed table around the ring.
pub const SEAT_FILL_ORDER: [SeatId; 12] = [1, 7, 3, 9, 5, 11, 4, 10, 2, 8, 6, 12];

/// Largest table supported.
pub const MAX_SEATS: usize = 12;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("table size must be between 2 and {max}, got {0}", max = MAX_SEATS)]
    TableSize(usize),
    #[error("player count must be between 2 and the table size ({table_size}), got {players}")]
    PlayerCount { players: usize, table_size: usize },
    #[error("blinds must satisfy 0 < small ({small}) <= big ({big})")]
    Blinds { small: u64, big: u64 },
    #[error("starting chips must be positive")]
    StartingChips,
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

/// Table parameters. Missing fields deserialize to the defaults.
///
/// ```
/// use holdem_engine::config::TableConfig;
///
/// let cfg = TableConfig::from_toml_str("player_count = 4\nbig_blind = 40").unwrap();
/// assert_eq!(cfg.player_count, 4);
/// assert_eq!(cfg.big_blind, 40);
/// assert_eq!(cfg.small_blind, 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub table_size: usize,
    pub player_count: usize,
    pub starting_chips: u64,
    pub small_blind: u64,
    pub big_blind: u64,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self { table_size: 12, player_count: 6, starting_chips: 1000, small_blind: 10, big_blind: 20 }
    }
}

impl TableConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(2..=MAX_SEATS).contains(&self.table_size) {
            return Err(ConfigError::TableSize(self.table_size));
        }
        if self.player_count < 2 || self.player_count > self.table_size {
            return Err(ConfigError::PlayerCount {
                players: self.player_count,
                table_size: self.table_size,
            });
        }
        if self.small_blind == 0 || self.small_blind > self.big_blind {
            return Err(ConfigError::Blinds { small: self.small_blind, big: self.big_blind });
        }
        if self.starting_chips == 0 {
            return Err(ConfigError::StartingChips);
        }
        Ok(())
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: TableConfig = toml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Seats that receive a player, in fill order.
    pub fn seating_order(&self) -> Vec<SeatId> {
        SEAT_FILL_ORDER
            .iter()
            .copied()
            .filter(|&seat| seat <= self.table_size)
            .take(self.player_count)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = TableConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.seating_order(), vec![1, 7, 3, 9, 5, 11]);
    }

    #[test]
    fn seating_skips_missing_seats() {
        let cfg = TableConfig { table_size: 6, player_count: 4, ..TableConfig::default() };
        assert_eq!(cfg.seating_order(), vec![1, 3, 5, 4]);
    }

    #[test]
    fn validation_rejects_bad_values() {
        let base = TableConfig::default();
        let cfg = TableConfig { table_size: 13, ..base.clone() };
        assert_eq!(cfg.validate(), Err(ConfigError::TableSize(13)));
        let cfg = TableConfig { player_count: 1, ..base.clone() };
        assert!(matches!(cfg.validate(), Err(ConfigError::PlayerCount { .. })));
        let cfg = TableConfig { small_blind: 30, ..base.clone() };
        assert!(matches!(cfg.validate(), Err(ConfigError::Blinds { .. })));
        let cfg = TableConfig { starting_chips: 0, ..base };
        assert_eq!(cfg.validate(), Err(ConfigError::StartingChips));
    }

    #[test]
    fn toml_errors_are_reported() {
        let err = TableConfig::from_toml_str("player_count = \"x\"").unwrap_err();
        let ConfigError::Toml(inner) = &err else {
            panic!("expected a TOML error, got {err:?}");
        };
        assert!(inner.message().contains("invalid type"), "{inner}");
        assert_eq!(err.to_string(), inner.to_string());
        assert!(matches!(
            TableConfig::from_toml_str("player_count = 20"),
            Err(ConfigError::PlayerCount { .. })
        ));
        assert_eq!(TableConfig::from_toml_str("").unwrap(), TableConfig::default());
    }
}
