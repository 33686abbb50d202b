// Error taxonomy for turns, configuration and map files

use std::path::PathBuf;
use thiserror::Error;

use crate::types::Coord;

/// Why a turn could not be answered by the strategy.
/// Every variant is contained by the protocol loop, which answers with the fallback move.
#[derive(Debug, Error)]
pub enum TurnError {
    /// The record was valid JSON but not a valid game state
    #[error("record does not match the game state schema: {0}")]
    Schema(#[from] serde_json::Error),

    #[error("game state has no snakes")]
    NoSnakes,

    #[error("invalid grid dimensions {width}x{height}")]
    InvalidGrid { width: i32, height: i32 },

    #[error("own snake is alive but has an empty body")]
    EmptyBody,

    #[error("decision exceeded the {budget_ms}ms turn budget")]
    Timeout { budget_ms: u64 },

    #[error("strategy panicked: {0}")]
    StrategyPanicked(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Error)]
pub enum MapError {
    #[error("map file i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("map file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("map size must be positive, got {width}x{height}")]
    InvalidSize { width: i32, height: i32 },

    #[error("obstacle ({}, {}) lies outside the {width}x{height} map", .cell.x, .cell.y)]
    OutOfBounds { cell: Coord, width: i32, height: i32 },

    #[error("obstacles are not sorted by x then y at index {index}")]
    Unsorted { index: usize },

    #[error("obstacle ({}, {}) is listed more than once", .cell.x, .cell.y)]
    Duplicate { cell: Coord },
}
