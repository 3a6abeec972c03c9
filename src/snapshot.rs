//! The serialization boundary between the engine and its UI collaborator.
//!
//! A [`Snapshot`] is everything a rendering layer needs to draw one frame,
//! and everything the engine needs to pick a game back up. Snapshots are
//! also how test fixtures describe mid-game positions; see
//! [`crate::snapshot_fixture`].

use std::error::Error;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::board::dimensions::GridSize;
use crate::board::{Board, CellId, CellNum};
use crate::engine::GameState;
use crate::food::Food;
use crate::snake::SnakeBody;
use crate::types::{Direction, Vector};

/// A food item as it crosses the snapshot boundary
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FoodSnapshot {
    /// the cell the food sits on
    pub cell: u16,
    /// whether the item reverses the snake's direction of travel
    pub reverses: bool,
}

/// One frame of a game, flattened for serialization
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// side length of the board
    pub size: u8,
    /// the snake's cells in head-to-tail order
    pub body: Vec<u16>,
    /// the snake's current direction of travel
    pub direction: Direction,
    /// the food item on the board
    pub food: FoodSnapshot,
    /// score of the running round
    pub score: u32,
}

impl<T: CellNum, D: GridSize> GameState<T, D> {
    /// the current state as a serializable snapshot
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            size: self.board.size(),
            body: self
                .snake
                .iter_cells()
                .map(|cell| cell.as_usize() as u16)
                .collect(),
            direction: self.direction,
            food: FoodSnapshot {
                cell: self.food.cell.as_usize() as u16,
                reverses: self.food.reverses,
            },
            score: self.score,
        }
    }

    /// Rebuilds a game from a snapshot.
    ///
    /// The body must be a non-empty chain of distinct, pairwise-adjacent
    /// on-board cells and the food must not sit on it. A food cell past the
    /// end of the board is accepted: the canonical starting state puts the
    /// food a fixed offset after the starting cell, which can overshoot on
    /// a very small board
    pub fn from_snapshot(snapshot: &Snapshot) -> Result<Self, Box<dyn Error>> {
        if snapshot.size == 0 {
            return Err("board size must be at least 1".into());
        }
        let cell_count = snapshot.size as usize * snapshot.size as usize;
        if T::from_usize(cell_count).as_usize() != cell_count {
            return Err("board does not fit the cell id width".into());
        }
        let board: Board<T, D> = Board::new(D::from_size(snapshot.size));
        if board.size() != snapshot.size {
            return Err("board dimensions do not match the snapshot".into());
        }

        if snapshot.body.is_empty() {
            return Err("snapshot body must not be empty".into());
        }
        if snapshot
            .body
            .iter()
            .any(|&cell| cell == 0 || cell as usize > cell_count)
        {
            return Err("body cell out of range".into());
        }
        if !snapshot.body.iter().all_unique() {
            return Err("body covers a cell twice".into());
        }
        for (closer, further) in snapshot.body.iter().tuple_windows() {
            let a = CellId::<T>::from_usize(*closer as usize).to_coords(snapshot.size);
            let b = CellId::<T>::from_usize(*further as usize).to_coords(snapshot.size);
            let step = Vector {
                d_row: (a.row - b.row) as i64,
                d_col: (a.col - b.col) as i64,
            };
            if Direction::from_vector(step).is_none() {
                return Err("body segments are not adjacent".into());
            }
        }

        if snapshot.food.cell == 0 {
            return Err("food cell out of range".into());
        }
        if snapshot.body.contains(&snapshot.food.cell) {
            return Err("food is on the snake".into());
        }

        let snake = SnakeBody::from_chain(snapshot.body.iter().map(|&cell| {
            let id = CellId::from_usize(cell as usize);
            (board.coords_of(id), id)
        }))
        .ok_or("snapshot body must not be empty")?;
        let food = Food {
            cell: CellId::from_usize(snapshot.food.cell as usize),
            reverses: snapshot.food.reverses,
        };

        Ok(GameState::from_parts(
            board,
            snake,
            snapshot.direction,
            food,
            snapshot.score,
        ))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::board::dimensions::{Fixed, Square};
    use crate::engine::{Engine10x10, Engine15x15, GameOverCause, SquareEngine, TickOutcome};
    use crate::snapshot_fixture;
    use crate::types::{LengthGettableGame, ScoreGettableGame, TickInstruments};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[derive(Debug)]
    struct Instruments;

    impl TickInstruments for Instruments {
        fn observe_tick(&self, _: std::time::Duration) {}
    }

    fn mid_game() -> Snapshot {
        snapshot_fixture(include_str!("../fixtures/mid_game_15x15.json"))
    }

    #[test]
    fn test_fixture_round_trip() {
        let snapshot = mid_game();
        let game = Engine15x15::from_snapshot(&snapshot).expect("the fixture is valid");
        assert_eq!(game.snapshot(), snapshot);

        let cornered = snapshot_fixture(include_str!("../fixtures/cornered_10x10.json"));
        let game = Engine10x10::from_snapshot(&cornered).expect("the fixture is valid");
        assert_eq!(game.snapshot(), cornered);
    }

    #[test]
    fn test_fresh_game_round_trip() {
        let game = Engine10x10::new(Fixed);
        let restored = Engine10x10::from_snapshot(&game.snapshot()).expect("snapshot is valid");
        assert_eq!(restored.snapshot(), game.snapshot());
    }

    #[test]
    fn test_snapshot_serializes_to_json_and_back() {
        let snapshot = Engine15x15::new(Fixed).snapshot();
        let rendered = serde_json::to_string(&snapshot).expect("snapshot serializes");
        assert_eq!(snapshot_fixture(&rendered), snapshot);
    }

    #[test]
    fn test_cornered_fixture_plays_out_the_wall_hit() {
        let cornered = snapshot_fixture(include_str!("../fixtures/cornered_10x10.json"));
        let mut game = Engine10x10::from_snapshot(&cornered).expect("the fixture is valid");
        let outcome = game.tick(&mut SmallRng::seed_from_u64(1), &Instruments);
        assert_eq!(outcome, TickOutcome::GameOver(GameOverCause::HitWall));
        assert_eq!(game.get_score(), 0);
    }

    #[test]
    fn test_about_to_eat_fixture_scores() {
        let snapshot = snapshot_fixture(include_str!("../fixtures/about_to_eat_10x10.json"));
        let mut game = Engine10x10::from_snapshot(&snapshot).expect("the fixture is valid");
        let outcome = game.tick(&mut SmallRng::seed_from_u64(1), &Instruments);
        assert_eq!(outcome, TickOutcome::Ate { reversed: false });
        assert_eq!(game.get_score(), 1);
        assert_eq!(game.get_length(), 4);
    }

    #[test]
    fn test_about_to_reverse_fixture_reverses() {
        let snapshot = snapshot_fixture(include_str!("../fixtures/about_to_reverse_10x10.json"));
        let mut game = Engine10x10::from_snapshot(&snapshot).expect("the fixture is valid");
        let outcome = game.tick(&mut SmallRng::seed_from_u64(1), &Instruments);
        assert_eq!(outcome, TickOutcome::Ate { reversed: true });
        assert_eq!(game.snapshot().body, vec![52, 53, 54, 55]);
    }

    fn base() -> Snapshot {
        Snapshot {
            size: 10,
            body: vec![54, 53, 52],
            direction: Direction::Right,
            food: FoodSnapshot {
                cell: 60,
                reverses: false,
            },
            score: 0,
        }
    }

    fn rejects(snapshot: &Snapshot, message: &str) {
        let err = SquareEngine::from_snapshot(snapshot).expect_err("snapshot is invalid");
        assert_eq!(err.to_string(), message);
    }

    #[test]
    fn test_rejects_empty_body() {
        let mut snapshot = base();
        snapshot.body.clear();
        rejects(&snapshot, "snapshot body must not be empty");
    }

    #[test]
    fn test_rejects_out_of_range_cells() {
        let mut snapshot = base();
        snapshot.body = vec![101, 100, 99];
        rejects(&snapshot, "body cell out of range");

        let mut snapshot = base();
        snapshot.body = vec![0, 1, 2];
        rejects(&snapshot, "body cell out of range");
    }

    #[test]
    fn test_rejects_duplicate_cells() {
        let mut snapshot = base();
        snapshot.body = vec![54, 53, 54];
        rejects(&snapshot, "body covers a cell twice");
    }

    #[test]
    fn test_rejects_a_torn_chain() {
        let mut snapshot = base();
        snapshot.body = vec![54, 53, 51];
        rejects(&snapshot, "body segments are not adjacent");

        // 60 and 61 sit on different rows of a 10-wide board
        let mut snapshot = base();
        snapshot.body = vec![60, 61];
        rejects(&snapshot, "body segments are not adjacent");
    }

    #[test]
    fn test_rejects_food_on_the_snake() {
        let mut snapshot = base();
        snapshot.food.cell = 53;
        rejects(&snapshot, "food is on the snake");
    }

    #[test]
    fn test_rejects_a_board_too_wide_for_u8_ids() {
        let mut snapshot = base();
        snapshot.size = 16;
        snapshot.body = vec![1, 2, 3];
        let err = GameState::<u8, Square>::from_snapshot(&snapshot).expect_err("ids overflow u8");
        assert_eq!(err.to_string(), "board does not fit the cell id width");
    }

    #[test]
    fn test_mid_game_fixture_keeps_its_invariants_while_playing() {
        let mut game = Engine15x15::from_snapshot(&mid_game()).expect("the fixture is valid");
        let mut rng = SmallRng::seed_from_u64(99);
        for _ in 0..50 {
            game.tick(&mut rng, &Instruments);
            let body = game.snapshot().body;
            assert_eq!(body.len(), game.get_length() as usize);
            assert!(body.iter().all_unique());
        }
    }
}
