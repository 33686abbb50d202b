// Library exports for the snake agent
// The agent binary, the replay tool and the map checker all build on these modules

pub mod board;
pub mod bot;
pub mod config;
pub mod debug_logger;
pub mod error;
pub mod map_file;
pub mod protocol;
pub mod replay;
pub mod strategy;
pub mod types;
