// Static map files
//
// `{width, height, obstacles: [{x, y}, ...]}` with obstacles sorted by x then y.
// These files are consumed by the game server, which forwards the obstacles inside
// every game state under `map`.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::MapError;
use crate::types::{Coord, StaticMap};

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct MapFile {
    pub width: i32,
    pub height: i32,
    #[serde(default)]
    pub obstacles: Vec<Coord>,
}

impl MapFile {
    pub fn new(width: i32, height: i32, obstacles: Vec<Coord>) -> Self {
        MapFile {
            width,
            height,
            obstacles,
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, MapError> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Writes the map as pretty JSON, normalizing the obstacle order first
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), MapError> {
        let mut normalized = self.clone();
        normalized.normalize();
        let mut json = serde_json::to_string_pretty(&normalized)?;
        json.push('\n');
        fs::write(path, json)?;
        Ok(())
    }

    /// Sorts obstacles by x then y and drops duplicates
    pub fn normalize(&mut self) {
        self.obstacles.sort();
        self.obstacles.dedup();
    }

    /// Checks size, bounds, ordering and uniqueness; reports the first problem found
    pub fn validate(&self) -> Result<(), MapError> {
        if self.width <= 0 || self.height <= 0 {
            return Err(MapError::InvalidSize {
                width: self.width,
                height: self.height,
            });
        }

        for (index, cell) in self.obstacles.iter().enumerate() {
            if cell.x < 0 || cell.x >= self.width || cell.y < 0 || cell.y >= self.height {
                return Err(MapError::OutOfBounds {
                    cell: *cell,
                    width: self.width,
                    height: self.height,
                });
            }

            if index > 0 {
                let prev = self.obstacles[index - 1];
                if prev == *cell {
                    return Err(MapError::Duplicate { cell: *cell });
                }
                if prev > *cell {
                    return Err(MapError::Unsorted { index });
                }
            }
        }

        Ok(())
    }

    /// The `map` section of a game state carrying these obstacles
    pub fn to_static_map(&self) -> StaticMap {
        StaticMap {
            width: Some(self.width),
            height: Some(self.height),
            obstacles: self.obstacles.clone(),
        }
    }
}
