// Decision engine front door
//
// `Bot` owns the configuration and the active strategy. It validates each snapshot,
// short-circuits dead snakes, and runs the strategy under the per-turn time budget.

use log::info;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::error::TurnError;
use crate::strategy::Strategy;
use crate::types::{Direction, GameState};

pub struct Bot {
    config: Config,
    strategy: Arc<dyn Strategy>,
}

impl Bot {
    /// Creates a new Bot running the strategy selected in the configuration
    pub fn new(config: Config) -> Self {
        let strategy = config.strategy.kind.build(&config);
        Bot { config, strategy }
    }

    /// Creates a Bot around an explicit strategy, e.g. one holding a seeded RNG
    pub fn with_strategy(config: Config, strategy: Arc<dyn Strategy>) -> Self {
        Bot { config, strategy }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Move emitted whenever a turn cannot be answered properly
    pub fn fallback_move(&self) -> Direction {
        self.config.protocol.fallback_move
    }

    /// Computes the move for one snapshot on the calling thread, without a deadline
    pub fn decide(&self, state: &GameState) -> Result<Direction, TurnError> {
        Self::decide_with(self.strategy.as_ref(), state)
    }

    fn decide_with(strategy: &dyn Strategy, state: &GameState) -> Result<Direction, TurnError> {
        let me = state.snakes.first().ok_or(TurnError::NoSnakes)?;

        if state.grid_width <= 0 || state.grid_height <= 0 {
            return Err(TurnError::InvalidGrid {
                width: state.grid_width,
                height: state.grid_height,
            });
        }

        // Dead snakes get their last direction back; the move is ignored anyway
        if !me.alive {
            return Ok(me.direction);
        }

        let head = me.head().ok_or(TurnError::EmptyBody)?;
        Ok(strategy.choose_move(state, me, head))
    }

    /// Computes the move for one snapshot within the effective turn budget.
    ///
    /// The strategy runs on tokio's blocking pool so a slow or panicking strategy
    /// turns into a `TurnError` instead of a missed turn.
    pub async fn get_move(&self, state: GameState) -> Result<Direction, TurnError> {
        let start_time = Instant::now();
        let budget_ms = self.config.timing.effective_budget_ms();
        let strategy = self.strategy.clone();

        let task =
            tokio::task::spawn_blocking(move || Self::decide_with(strategy.as_ref(), &state));

        let chosen = match tokio::time::timeout(Duration::from_millis(budget_ms), task).await {
            Ok(Ok(result)) => result?,
            Ok(Err(join_error)) => return Err(TurnError::StrategyPanicked(join_error.to_string())),
            Err(_) => return Err(TurnError::Timeout { budget_ms }),
        };

        info!(
            "Chose {} ({} strategy, {}ms)",
            chosen,
            self.strategy.name(),
            start_time.elapsed().as_millis()
        );
        Ok(chosen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Coord, Snake};

    fn snake(body: Vec<Coord>, alive: bool, direction: Direction) -> Snake {
        Snake {
            length: body.len() as i32,
            body,
            alive,
            score: 0,
            direction,
            speed_turns: 0,
            sleep_turns: 0,
            id: None,
            energy: None,
            death_reason: None,
        }
    }

    fn state(snakes: Vec<Snake>) -> GameState {
        GameState {
            grid_width: 5,
            grid_height: 5,
            snakes,
            apples: vec![],
            map: None,
            turn: None,
            winner: None,
            game_over: None,
        }
    }

    #[test]
    fn test_no_snakes_is_an_error() {
        let bot = Bot::new(Config::default_hardcoded());
        assert!(matches!(bot.decide(&state(vec![])), Err(TurnError::NoSnakes)));
    }

    #[test]
    fn test_invalid_grid_is_an_error() {
        let bot = Bot::new(Config::default_hardcoded());
        let mut s = state(vec![snake(vec![Coord::new(0, 0)], true, Direction::Up)]);
        s.grid_width = 0;
        assert!(matches!(
            bot.decide(&s),
            Err(TurnError::InvalidGrid { width: 0, height: 5 })
        ));
    }

    #[test]
    fn test_dead_snake_returns_direction() {
        let bot = Bot::new(Config::default_hardcoded());
        let s = state(vec![snake(vec![], false, Direction::Left)]);
        assert_eq!(bot.decide(&s).unwrap(), Direction::Left);
    }

    #[test]
    fn test_alive_snake_without_body_is_an_error() {
        let bot = Bot::new(Config::default_hardcoded());
        let s = state(vec![snake(vec![], true, Direction::Left)]);
        assert!(matches!(bot.decide(&s), Err(TurnError::EmptyBody)));
    }

    #[tokio::test]
    async fn test_get_move_matches_decide() {
        let bot = Bot::new(Config::default_hardcoded());
        let s = state(vec![snake(vec![Coord::new(2, 0)], true, Direction::Left)]);
        let expected = bot.decide(&s).unwrap();
        assert_eq!(bot.get_move(s).await.unwrap(), expected);
        assert_eq!(expected, Direction::Down);
    }
}
