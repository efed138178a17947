//! Session configuration.

use std::env;

use thiserror::Error;

use crate::core::TetrominoKind;
use crate::types::{DEFAULT_COLUMNS, DEFAULT_FRAME_MS, DEFAULT_ROWS, DEFAULT_TICK_MS};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("board must have at least one row and one column (got {rows}x{columns})")]
    EmptyBoard { rows: u16, columns: u16 },
    #[error("board needs at least {min} columns to spawn every piece (got {columns})")]
    TooNarrow { columns: u16, min: u16 },
    #[error("{name} must be greater than zero")]
    ZeroPeriod { name: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub rows: u16,
    pub columns: u16,
    pub tick_ms: u32,
    pub frame_ms: u32,
    pub seed: u32,
    /// Show frame statistics in the status line
    pub perf_overlay: bool,
    pub log_path: Option<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLUMNS,
            tick_ms: DEFAULT_TICK_MS,
            frame_ms: DEFAULT_FRAME_MS,
            seed: 1,
            perf_overlay: false,
            log_path: None,
        }
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

fn flag(key: &str) -> bool {
    env::var(key)
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

impl GameConfig {
    /// Read `BLOCKFALL_*` environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let log_path = env::var("BLOCKFALL_LOG_PATH")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Self {
            rows: parse_or("BLOCKFALL_ROWS", defaults.rows),
            columns: parse_or("BLOCKFALL_COLUMNS", defaults.columns),
            tick_ms: parse_or("BLOCKFALL_TICK_MS", defaults.tick_ms),
            frame_ms: parse_or("BLOCKFALL_FRAME_MS", defaults.frame_ms),
            seed: parse_or("BLOCKFALL_SEED", defaults.seed),
            perf_overlay: flag("BLOCKFALL_PERF_OVERLAY"),
            log_path,
        }
    }

    /// Reject boards no piece can spawn on and zero periods
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.columns == 0 {
            return Err(ConfigError::EmptyBoard {
                rows: self.rows,
                columns: self.columns,
            });
        }
        let min = TetrominoKind::widest();
        if self.columns < min {
            return Err(ConfigError::TooNarrow {
                columns: self.columns,
                min,
            });
        }
        if self.tick_ms == 0 {
            return Err(ConfigError::ZeroPeriod { name: "tick period" });
        }
        if self.frame_ms == 0 {
            return Err(ConfigError::ZeroPeriod {
                name: "frame interval",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = GameConfig::default();
        assert_eq!(config.tick_ms, 100);
        assert_eq!((config.rows, config.columns), (20, 10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_unplayable_configs() {
        let config = GameConfig {
            columns: 0,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::EmptyBoard {
                rows: 20,
                columns: 0
            })
        );

        let config = GameConfig {
            columns: 3,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::TooNarrow { columns: 3, min: 4 })
        );

        let config = GameConfig {
            columns: 4,
            rows: 1,
            ..GameConfig::default()
        };
        assert!(config.validate().is_ok());

        let config = GameConfig {
            tick_ms: 0,
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ZeroPeriod { .. })
        ));
    }
}
