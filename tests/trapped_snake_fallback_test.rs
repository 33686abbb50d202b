// Integration test for wall and trap fallback behavior
//
// Snakes pressed against each wall, with their own body closing most exits.
// The agent must take the one remaining safe move, never the wall side, and must keep
// its current direction only when nothing is safe at all.

use snake_agent::bot::Bot;
use snake_agent::config::Config;
use snake_agent::types::{Coord, Direction, GameState, Snake};

fn board(snakes: Vec<Snake>) -> GameState {
    GameState {
        grid_width: 11,
        grid_height: 11,
        snakes,
        apples: vec![],
        map: None,
        turn: Some(42),
        winner: None,
        game_over: Some(false),
    }
}

fn snake(body: Vec<Coord>, direction: Direction) -> Snake {
    Snake {
        length: body.len() as i32,
        body,
        alive: true,
        score: 0,
        direction,
        speed_turns: 0,
        sleep_turns: 0,
        id: Some(1),
        energy: Some(30),
        death_reason: None,
    }
}

/// Snake at top wall (y=0); left, right and below are closed except one gap to the left
#[tokio::test]
async fn test_trapped_at_top_wall_takes_only_exit() {
    let bot = Bot::new(Config::default_hardcoded());

    let state = board(vec![
        snake(
            vec![
                Coord { x: 5, y: 0 }, // head at top wall
                Coord { x: 5, y: 1 }, // neck blocks down
                Coord { x: 6, y: 1 },
                Coord { x: 6, y: 0 }, // blocks right
            ],
            Direction::Up,
        ),
        snake(
            vec![Coord { x: 8, y: 5 }, Coord { x: 8, y: 6 }],
            Direction::Up,
        ),
    ]);

    let chosen = bot.get_move(state).await.unwrap();
    assert_eq!(chosen, Direction::Left, "LEFT is the only safe move");
}

/// Snake at bottom wall (y=10) should never choose DOWN
#[tokio::test]
async fn test_trapped_at_bottom_wall_avoids_down() {
    let bot = Bot::new(Config::default_hardcoded());

    let state = board(vec![snake(
        vec![
            Coord { x: 5, y: 10 }, // head at bottom wall
            Coord { x: 5, y: 9 },  // neck blocks up
            Coord { x: 4, y: 9 },
            Coord { x: 4, y: 10 }, // blocks left
            Coord { x: 3, y: 10 },
        ],
        Direction::Down,
    )]);

    let chosen = bot.get_move(state).await.unwrap();
    assert_eq!(chosen, Direction::Right);
}

/// Snake at left wall (x=0) should never choose LEFT
#[tokio::test]
async fn test_trapped_at_left_wall_avoids_left() {
    let bot = Bot::new(Config::default_hardcoded());

    let state = board(vec![snake(
        vec![
            Coord { x: 0, y: 5 }, // head at left wall
            Coord { x: 1, y: 5 }, // neck blocks right
            Coord { x: 1, y: 4 },
            Coord { x: 0, y: 4 }, // blocks up
            Coord { x: 0, y: 3 },
        ],
        Direction::Left,
    )]);

    let chosen = bot.get_move(state).await.unwrap();
    assert_eq!(chosen, Direction::Down);
}

/// Snake at right wall (x=10) with every exit closed keeps its direction
#[tokio::test]
async fn test_fully_trapped_at_right_wall_keeps_direction() {
    let bot = Bot::new(Config::default_hardcoded());

    let state = board(vec![
        snake(
            vec![
                Coord { x: 10, y: 5 }, // head at right wall
                Coord { x: 9, y: 5 },  // neck blocks left
                Coord { x: 9, y: 6 },
                Coord { x: 10, y: 6 }, // blocks down
            ],
            Direction::Right,
        ),
        snake(
            vec![Coord { x: 10, y: 4 }, Coord { x: 9, y: 4 }], // blocks up
            Direction::Right,
        ),
    ]);

    let chosen = bot.get_move(state).await.unwrap();
    assert_eq!(
        chosen,
        Direction::Right,
        "With no safe move the agent keeps its current direction"
    );
}
