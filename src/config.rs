//! Конфигурация движка: правила игр, адрес сервера, мастер-seed RNG.
//!
//! Читается из TOML. Любое отсутствующее поле берётся из `Default`.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::chips::Chips;
use crate::domain::rules::GameRules;
use crate::infra::rng_seed::RngSeed;

/// Потолок стартового банка.
pub const MAX_STARTING_BANK: Chips = Chips(1_000_000_000_000);

/// Потолок максимальной ставки.
pub const MAX_BET: Chips = Chips(1_000_000_000);

/// Ошибки загрузки конфигурации.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Полная конфигурация.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EngineConfig {
    pub rules: GameRules,
    pub server: ServerConfig,
    pub rng: RngConfig,
}

/// Где слушает HTTP-сервер.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// Настройки случайности.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RngConfig {
    /// 64 hex-символа. Если задан, все сессии воспроизводимы.
    pub master_seed: Option<String>,
}

impl EngineConfig {
    /// Загрузить из файла и проверить.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Разобранный мастер-seed (если задан).
    pub fn master_seed(&self) -> Result<Option<RngSeed>, ConfigError> {
        match &self.rng.master_seed {
            None => Ok(None),
            Some(hex) => RngSeed::from_hex(hex).map(Some).ok_or_else(|| {
                ConfigError::Invalid("rng.master_seed must be 64 hex characters".to_string())
            }),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let rules = &self.rules;

        if rules.decks == 0 {
            return Err(ConfigError::Invalid("rules.decks must be at least 1".into()));
        }
        if rules.starting_bank > MAX_STARTING_BANK {
            return Err(ConfigError::Invalid(format!(
                "rules.starting_bank must not exceed {}",
                MAX_STARTING_BANK.0
            )));
        }
        if rules.limits.max_bet > MAX_BET {
            return Err(ConfigError::Invalid(format!(
                "rules.limits.max_bet must not exceed {}",
                MAX_BET.0
            )));
        }
        if rules.limits.min_bet.is_zero() {
            return Err(ConfigError::Invalid("rules.limits.min_bet must be positive".into()));
        }
        if rules.limits.min_bet > rules.limits.max_bet {
            return Err(ConfigError::Invalid(
                "rules.limits.min_bet must not exceed max_bet".into(),
            ));
        }
        if !(2..=21).contains(&rules.dealer_stands_on) {
            return Err(ConfigError::Invalid(
                "rules.dealer_stands_on must be within 2..=21".into(),
            ));
        }
        if self.server.host.trim().is_empty() {
            return Err(ConfigError::Invalid("server.host must not be empty".into()));
        }

        self.master_seed()?;
        Ok(())
    }
}
