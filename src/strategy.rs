// Move strategies
//
// A strategy only ever sees a validated turn: the own snake is alive and has a head.
// Whatever it does internally, it must return one of the four directions.

use log::debug;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use serde::Deserialize;
use std::sync::Arc;

use crate::board::{best_apple, move_towards, Obstacles};
use crate::config::{Config, ScoresConfig};
use crate::types::{Coord, Direction, GameState, Snake};

pub trait Strategy: Send + Sync {
    fn name(&self) -> &'static str;

    fn choose_move(&self, state: &GameState, me: &Snake, head: Coord) -> Direction;
}

/// Strategies selectable from Snake.toml
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    Reference,
    Random,
}

impl StrategyKind {
    pub fn build(&self, config: &Config) -> Arc<dyn Strategy> {
        match self {
            StrategyKind::Reference => Arc::new(ReferenceStrategy::new(config.scores.clone())),
            StrategyKind::Random => match config.strategy.seed {
                Some(seed) => Arc::new(RandomStrategy::seeded(seed)),
                None => Arc::new(RandomStrategy::from_entropy()),
            },
        }
    }
}

/// Greedy apple chaser with collision avoidance:
/// 1. rank apples by adjusted distance
/// 2. take the larger-delta axis toward the best one if that is safe
/// 3. otherwise the first safe move in UP, DOWN, LEFT, RIGHT order
/// 4. otherwise keep the current direction
pub struct ReferenceStrategy {
    scores: ScoresConfig,
}

impl ReferenceStrategy {
    pub fn new(scores: ScoresConfig) -> Self {
        ReferenceStrategy { scores }
    }
}

impl Strategy for ReferenceStrategy {
    fn name(&self) -> &'static str {
        "reference"
    }

    fn choose_move(&self, state: &GameState, me: &Snake, head: Coord) -> Direction {
        let obstacles = Obstacles::from_state(state);

        if let Some(target) = best_apple(head, &state.apples, &self.scores) {
            let proposed = move_towards(head, target.coord());
            if obstacles.is_safe(&head, proposed) {
                return proposed;
            }
            debug!(
                "Proposed {} toward ({}, {}) is unsafe, scanning",
                proposed, target.x, target.y
            );
        }

        Direction::all()
            .iter()
            .copied()
            .find(|&dir| obstacles.is_safe(&head, dir))
            .unwrap_or(me.direction)
    }
}

/// Uniform choice among safe moves, driven by an injectable RNG
pub struct RandomStrategy {
    rng: Mutex<StdRng>,
}

impl RandomStrategy {
    pub fn new(rng: StdRng) -> Self {
        RandomStrategy {
            rng: Mutex::new(rng),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl Strategy for RandomStrategy {
    fn name(&self) -> &'static str {
        "random"
    }

    fn choose_move(&self, state: &GameState, me: &Snake, head: Coord) -> Direction {
        let safe = Obstacles::from_state(state).safe_moves(&head);
        let mut rng = self.rng.lock();
        safe.choose(&mut *rng).copied().unwrap_or(me.direction)
    }
}
