// Configuration module for reading Snake.toml
// Groups every tunable of the agent: turn budget, strategy choice, apple weights, debug log

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::ConfigError;
use crate::strategy::StrategyKind;
use crate::types::{AppleType, Direction};

/// Environment variable that overrides the config file location
pub const CONFIG_PATH_ENV: &str = "SNAKE_CONFIG";

/// Main configuration structure containing all tunable parameters
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub timing: TimingConfig,
    pub strategy: StrategyConfig,
    pub scores: ScoresConfig,
    pub protocol: ProtocolConfig,
    pub debug: DebugConfig,
}

/// Per-turn time budget
#[derive(Debug, Deserialize, Clone)]
pub struct TimingConfig {
    /// Timeout the game server applies to every turn
    pub turn_timeout_ms: u64,
    /// Headroom kept for serialization and pipe latency
    pub safety_margin_ms: u64,
}

impl TimingConfig {
    /// Computes the effective computation budget
    pub fn effective_budget_ms(&self) -> u64 {
        self.turn_timeout_ms.saturating_sub(self.safety_margin_ms)
    }
}

/// Strategy selection
#[derive(Debug, Deserialize, Clone)]
pub struct StrategyConfig {
    pub kind: StrategyKind,
    /// Fixed RNG seed for reproducible random play
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Adjusted-distance penalties per apple type.
/// Negative values make an apple look closer than it is.
#[derive(Debug, Deserialize, Clone)]
pub struct ScoresConfig {
    pub normal_penalty: i32,
    pub god_penalty: i32,
    pub speed_penalty: i32,
    pub sleep_penalty: i32,
    pub poison_penalty: i32,
}

impl ScoresConfig {
    pub fn penalty(&self, kind: AppleType) -> i32 {
        match kind {
            AppleType::Normal => self.normal_penalty,
            AppleType::God => self.god_penalty,
            AppleType::Speed => self.speed_penalty,
            AppleType::Sleep => self.sleep_penalty,
            AppleType::Poison => self.poison_penalty,
        }
    }
}

/// Protocol loop behavior
#[derive(Debug, Deserialize, Clone)]
pub struct ProtocolConfig {
    /// Move emitted when a turn fails validation, errors, or runs out of time
    pub fallback_move: Direction,
}

/// Debug configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DebugConfig {
    pub enabled: bool,
    pub log_file_path: String,
}

impl Config {
    /// Loads configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path.as_ref()).map_err(|source| ConfigError::Read {
            path: path.as_ref().to_path_buf(),
            source,
        })?;

        Ok(toml::from_str(&contents)?)
    }

    /// Loads default configuration from `$SNAKE_CONFIG` or Snake.toml in the working directory
    pub fn load_default() -> Result<Self, ConfigError> {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| "Snake.toml".to_string());
        Self::from_file(path)
    }

    /// Creates a configuration with hardcoded default values as fallback
    /// This should match the constants defined in Snake.toml
    pub fn default_hardcoded() -> Self {
        Config {
            timing: TimingConfig {
                turn_timeout_ms: 500,
                safety_margin_ms: 50,
            },
            strategy: StrategyConfig {
                kind: StrategyKind::Reference,
                seed: None,
            },
            scores: ScoresConfig {
                normal_penalty: 0,
                god_penalty: -5,
                speed_penalty: 0,
                sleep_penalty: 0,
                poison_penalty: 10,
            },
            protocol: ProtocolConfig {
                fallback_move: Direction::Up,
            },
            debug: DebugConfig {
                enabled: false,
                log_file_path: "snake_agent_debug.jsonl".to_string(),
            },
        }
    }

    /// Attempts to load from file, falls back to hardcoded defaults on error
    pub fn load_or_default() -> Self {
        Self::load_default().unwrap_or_else(|e| {
            log::warn!("Could not load config ({}), using hardcoded defaults", e);
            Self::default_hardcoded()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_budget_calculation() {
        let config = Config::default_hardcoded();
        assert_eq!(config.timing.effective_budget_ms(), 450);
    }

    #[test]
    fn test_effective_budget_saturates() {
        let timing = TimingConfig {
            turn_timeout_ms: 20,
            safety_margin_ms: 50,
        };
        assert_eq!(timing.effective_budget_ms(), 0);
    }

    #[test]
    fn test_penalty_lookup() {
        let scores = Config::default_hardcoded().scores;
        assert_eq!(scores.penalty(AppleType::Poison), 10);
        assert_eq!(scores.penalty(AppleType::God), -5);
        assert_eq!(scores.penalty(AppleType::Normal), 0);
        assert_eq!(scores.penalty(AppleType::Speed), 0);
        assert_eq!(scores.penalty(AppleType::Sleep), 0);
    }

    #[test]
    fn test_snake_toml_can_be_parsed() {
        let result = Config::from_file(concat!(env!("CARGO_MANIFEST_DIR"), "/Snake.toml"));
        assert!(
            result.is_ok(),
            "Failed to parse Snake.toml: {:?}",
            result.err()
        );
    }

    #[test]
    fn test_all_config_values_match_hardcoded_defaults() {
        let file_config = Config::from_file(concat!(env!("CARGO_MANIFEST_DIR"), "/Snake.toml"))
            .expect("Snake.toml should be parseable");
        let hardcoded_config = Config::default_hardcoded();

        assert_eq!(
            file_config.timing.turn_timeout_ms,
            hardcoded_config.timing.turn_timeout_ms
        );
        assert_eq!(
            file_config.timing.safety_margin_ms,
            hardcoded_config.timing.safety_margin_ms
        );
        assert_eq!(file_config.strategy.kind, hardcoded_config.strategy.kind);
        assert_eq!(file_config.strategy.seed, hardcoded_config.strategy.seed);
        for kind in [
            AppleType::Normal,
            AppleType::God,
            AppleType::Speed,
            AppleType::Sleep,
            AppleType::Poison,
        ] {
            assert_eq!(
                file_config.scores.penalty(kind),
                hardcoded_config.scores.penalty(kind)
            );
        }
        assert_eq!(
            file_config.protocol.fallback_move,
            hardcoded_config.protocol.fallback_move
        );
        assert_eq!(file_config.debug.enabled, hardcoded_config.debug.enabled);
        assert_eq!(
            file_config.debug.log_file_path,
            hardcoded_config.debug.log_file_path
        );
    }

    #[test]
    fn test_random_strategy_with_seed_parses() {
        let text = r#"
            [timing]
            turn_timeout_ms = 300
            safety_margin_ms = 20

            [strategy]
            kind = "random"
            seed = 42

            [scores]
            normal_penalty = 0
            god_penalty = -5
            speed_penalty = 0
            sleep_penalty = 0
            poison_penalty = 10

            [protocol]
            fallback_move = "LEFT"

            [debug]
            enabled = true
            log_file_path = "turns.jsonl"
        "#;
        let config: Config = toml::from_str(text).unwrap();
        assert_eq!(config.strategy.kind, StrategyKind::Random);
        assert_eq!(config.strategy.seed, Some(42));
        assert_eq!(config.protocol.fallback_move, Direction::Left);
        assert_eq!(config.timing.effective_budget_ms(), 280);
    }

    #[test]
    fn test_invalid_toml_returns_error() {
        let result = Config::from_file("nonexistent.toml");
        assert!(matches!(result, Err(ConfigError::Read { .. })));

        let parsed: Result<Config, _> = toml::from_str("[timing]\nturn_timeout_ms = \"fast\"");
        assert!(parsed.is_err());
    }
}
