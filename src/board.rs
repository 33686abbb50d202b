// Board geometry helpers shared by every strategy:
// obstacle set construction, bounds checks, the safety filter and apple ranking

use std::collections::HashSet;

use crate::config::ScoresConfig;
use crate::types::{Apple, Coord, Direction, GameState};

/// Every lethal cell on the board for the coming move.
/// Built once per turn; membership is a hash lookup.
#[derive(Debug, Clone)]
pub struct Obstacles {
    cells: HashSet<Coord>,
    width: i32,
    height: i32,
}

impl Obstacles {
    /// Union of all snake bodies (own body included, dead snakes included)
    /// and the static map obstacles. Duplicate cells collapse.
    pub fn from_state(state: &GameState) -> Self {
        let map_cells = state
            .map
            .iter()
            .flat_map(|m| m.obstacles.iter().copied());

        let cells = state
            .snakes
            .iter()
            .flat_map(|s| s.body.iter().copied())
            .chain(map_cells)
            .collect();

        Obstacles {
            cells,
            width: state.grid_width,
            height: state.grid_height,
        }
    }

    pub fn contains(&self, coord: &Coord) -> bool {
        self.cells.contains(coord)
    }

    /// Checks if a coordinate is out of bounds
    pub fn is_out_of_bounds(&self, coord: &Coord) -> bool {
        coord.x < 0 || coord.x >= self.width || coord.y < 0 || coord.y >= self.height
    }

    /// A move is safe when the new head cell is on the grid and not an obstacle
    pub fn is_safe(&self, head: &Coord, dir: Direction) -> bool {
        let next = dir.apply(head);
        !self.is_out_of_bounds(&next) && !self.contains(&next)
    }

    /// Safe moves in UP, DOWN, LEFT, RIGHT order
    pub fn safe_moves(&self, head: &Coord) -> Vec<Direction> {
        Direction::all()
            .iter()
            .copied()
            .filter(|&dir| self.is_safe(head, dir))
            .collect()
    }
}

/// Calculates Manhattan distance between two coordinates.
/// Widened to i64 so coordinates anywhere in the i32 range cannot overflow.
pub fn manhattan_distance(a: Coord, b: Coord) -> i64 {
    i64::from(a.x.abs_diff(b.x)) + i64::from(a.y.abs_diff(b.y))
}

/// Manhattan distance plus the type penalty
pub fn adjusted_distance(head: Coord, apple: &Apple, scores: &ScoresConfig) -> i64 {
    manhattan_distance(head, apple.coord()) + i64::from(scores.penalty(apple.kind))
}

/// Apple with the smallest adjusted distance; the first one wins ties
pub fn best_apple<'a>(
    head: Coord,
    apples: &'a [Apple],
    scores: &ScoresConfig,
) -> Option<&'a Apple> {
    let mut best: Option<(&Apple, i64)> = None;
    for apple in apples {
        let dist = adjusted_distance(head, apple, scores);
        match best {
            Some((_, best_dist)) if dist >= best_dist => {}
            _ => best = Some((apple, dist)),
        }
    }
    best.map(|(apple, _)| apple)
}

/// Single-axis move along the larger delta; vertical wins when both are equal
pub fn move_towards(head: Coord, target: Coord) -> Direction {
    let dx = i64::from(target.x) - i64::from(head.x);
    let dy = i64::from(target.y) - i64::from(head.y);

    if dx.abs() > dy.abs() {
        if dx > 0 {
            Direction::Right
        } else {
            Direction::Left
        }
    } else if dy > 0 {
        Direction::Down
    } else {
        Direction::Up
    }
}
