// Snake game wire types
// One `GameState` arrives per line on stdin, one `MoveResponse` leaves per line on stdout.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Complete game state received once per turn.
/// `snakes[0]` is always the snake this agent controls.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct GameState {
    pub grid_width: i32,
    pub grid_height: i32,
    pub snakes: Vec<Snake>,
    pub apples: Vec<Apple>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map: Option<StaticMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turn: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_over: Option<bool>,
}

/// Snake representation with all state information
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Snake {
    pub body: Vec<Coord>,
    pub alive: bool,
    pub length: i32,
    pub score: i32,
    pub direction: Direction,
    pub speed_turns: u32,
    pub sleep_turns: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub death_reason: Option<String>,
}

impl Snake {
    /// Head cell, if the snake has a body at all
    pub fn head(&self) -> Option<Coord> {
        self.body.first().copied()
    }
}

/// Apple kinds and their in-game effect
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum AppleType {
    /// +1 length
    Normal,
    /// +3 length
    God,
    /// Two moves per turn for a few turns
    Speed,
    /// Freezes the opponent for a few turns
    Sleep,
    /// -1 length
    Poison,
}

/// Apple lying on the grid
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Apple {
    pub x: i32,
    pub y: i32,
    #[serde(rename = "type")]
    pub kind: AppleType,
}

impl Apple {
    pub fn coord(&self) -> Coord {
        Coord { x: self.x, y: self.y }
    }
}

/// Static obstacles embedded in the game state
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
pub struct StaticMap {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<i32>,
    #[serde(default)]
    pub obstacles: Vec<Coord>,
}

/// 2D grid cell, origin in the top-left corner
#[derive(Deserialize, Serialize, Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub fn new(x: i32, y: i32) -> Self {
        Coord { x, y }
    }
}

/// Represents the four possible movement directions for a snake
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns all possible directions in fallback scan order
    pub fn all() -> [Direction; 4] {
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right]
    }

    /// Converts direction to its wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "UP",
            Direction::Down => "DOWN",
            Direction::Left => "LEFT",
            Direction::Right => "RIGHT",
        }
    }

    /// Calculates the next coordinate when moving in this direction.
    /// y grows downwards. Saturates at the i32 limits, which are off any grid anyway.
    pub fn apply(&self, coord: &Coord) -> Coord {
        match self {
            Direction::Up => Coord { x: coord.x, y: coord.y.saturating_sub(1) },
            Direction::Down => Coord { x: coord.x, y: coord.y.saturating_add(1) },
            Direction::Left => Coord { x: coord.x.saturating_sub(1), y: coord.y },
            Direction::Right => Coord { x: coord.x.saturating_add(1), y: coord.y },
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = String;

    /// Lenient parse: case-insensitive names plus the single-key aliases the server accepts
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "UP" | "U" | "W" => Ok(Direction::Up),
            "DOWN" | "D" | "S" => Ok(Direction::Down),
            "LEFT" | "L" | "A" => Ok(Direction::Left),
            "RIGHT" | "R" => Ok(Direction::Right),
            _ => Err(format!("Invalid direction: {}", s)),
        }
    }
}

/// One line of agent output
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveResponse {
    #[serde(rename = "move")]
    pub direction: Direction,
}

impl MoveResponse {
    pub fn new(direction: Direction) -> Self {
        MoveResponse { direction }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_response_wire_shape() {
        let line = serde_json::to_string(&MoveResponse::new(Direction::Right)).unwrap();
        assert_eq!(line, r#"{"move":"RIGHT"}"#);
    }

    #[test]
    fn test_up_decreases_y() {
        let c = Coord::new(2, 2);
        assert_eq!(Direction::Up.apply(&c), Coord::new(2, 1));
        assert_eq!(Direction::Down.apply(&c), Coord::new(2, 3));
        assert_eq!(Direction::Left.apply(&c), Coord::new(1, 2));
        assert_eq!(Direction::Right.apply(&c), Coord::new(3, 2));
    }

    #[test]
    fn test_apply_saturates_at_i32_limits() {
        let low = Coord::new(i32::MIN, i32::MIN);
        let high = Coord::new(i32::MAX, i32::MAX);
        assert_eq!(Direction::Up.apply(&low), low);
        assert_eq!(Direction::Left.apply(&low), low);
        assert_eq!(Direction::Down.apply(&high), high);
        assert_eq!(Direction::Right.apply(&high), high);
    }

    #[test]
    fn test_parse_direction_aliases() {
        assert_eq!("up".parse::<Direction>().unwrap(), Direction::Up);
        assert_eq!("Down".parse::<Direction>().unwrap(), Direction::Down);
        assert_eq!("a".parse::<Direction>().unwrap(), Direction::Left);
        assert_eq!(" R ".parse::<Direction>().unwrap(), Direction::Right);
        assert!("north".parse::<Direction>().is_err());
    }

    #[test]
    fn test_state_accepts_server_extras() {
        let line = r#"{"turn":7,"grid_width":20,"grid_height":20,"winner":0,"game_over":false,
            "snakes":[{"id":1,"body":[{"x":1,"y":2}],"direction":"DOWN","alive":true,"length":3,
            "score":0,"speed_turns":0,"sleep_turns":0,"energy":60,"death_reason":""}],
            "apples":[{"x":3,"y":3,"type":"GOD"}],
            "map":{"width":20,"height":20,"obstacles":[{"x":0,"y":5}]}}"#;
        let state: GameState = serde_json::from_str(line).unwrap();
        assert_eq!(state.turn, Some(7));
        assert_eq!(state.snakes[0].energy, Some(60));
        assert_eq!(state.apples[0].kind, AppleType::God);
        assert_eq!(state.map.unwrap().obstacles, vec![Coord::new(0, 5)]);
    }

    #[test]
    fn test_null_map_is_none() {
        let line = r#"{"grid_width":5,"grid_height":5,"snakes":[],"apples":[],"map":null}"#;
        let state: GameState = serde_json::from_str(line).unwrap();
        assert!(state.map.is_none());
    }

    #[test]
    fn test_unknown_apple_type_is_rejected() {
        let line = r#"{"x":1,"y":1,"type":"GOLDEN"}"#;
        assert!(serde_json::from_str::<Apple>(line).is_err());
    }
}
