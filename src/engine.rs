//! The tick controller: owns the complete state of one running game and
//! advances it a step at a time.
//!
//! Everything the original reactive UI held in separate mutable cells
//! (board, snake, direction, food, score) lives in one owned [`GameState`]
//! value. A UI collaborator drives it from exactly two entry points, a
//! fixed-interval timer calling [`GameState::tick`] and a keyboard handler
//! calling [`GameState::handle_key`]; both run to completion on one thread,
//! so ordering is strict and no locking is involved. Direction requests are
//! buffered and take effect at the start of the next tick, never mid-tick.

use std::fmt;
use std::time::{Duration, Instant};

use rand::Rng;
use tracing::{debug, instrument, trace};

use crate::board::dimensions::{Fixed, GridSize, Square};
use crate::board::{Board, CellId, CellNum};
use crate::food::{place_food, Food, REVERSAL_FOOD_PROBABILITY};
use crate::snake::SnakeBody;
use crate::types::{
    CellQueryableGame, Coords, Direction, FoodGettableGame, HeadGettableGame, LengthGettableGame,
    ScoreGettableGame, SizeDeterminableGame, SnakeBodyGettableGame, TickInstruments,
};

/// The interval at which a UI timer should call [`GameState::tick`]. The
/// timer belongs to the UI layer; it should keep exactly one running per
/// game and tear it down on unmount
pub const TICK_INTERVAL: Duration = Duration::from_millis(150);

/// How far past the starting cell the first food item is placed. The
/// resulting cell can fall off the end of a very small board, in which case
/// it is simply unreachable until the first respawn
const STARTING_FOOD_OFFSET: usize = 5;

/// Why a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverCause {
    /// the snake ran off the edge of the board
    HitWall,
    /// the snake ran into its own body
    HitSelf,
}

/// What a single tick did. The terminal outcomes have already reset the
/// state for the next round by the time the caller sees them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// the snake moved one cell without incident
    Advanced,
    /// the snake ate the food item this tick
    Ate {
        /// whether the item reversed the snake's direction of travel
        reversed: bool,
    },
    /// the snake hit a wall or itself
    GameOver(GameOverCause),
    /// no free cell was left to respawn food on
    BoardFull,
}

/// The complete state of one running game
#[derive(Debug, Clone)]
pub struct GameState<T: CellNum, D: GridSize> {
    pub(crate) board: Board<T, D>,
    pub(crate) snake: SnakeBody<T>,
    pub(crate) direction: Direction,
    pub(crate) requested: Option<Direction>,
    pub(crate) food: Food<T>,
    pub(crate) score: u32,
}

/// 10x10 game, cell ids fit in a byte
pub type Engine10x10 = GameState<u8, Fixed<10>>;

/// 15x15 game. This is the biggest square board whose cell ids still fit
/// in a byte
pub type Engine15x15 = GameState<u8, Fixed<15>>;

/// runtime-sized square game, cell ids widened to u16
pub type SquareEngine = GameState<u16, Square>;

impl<T: CellNum, D: GridSize> GameState<T, D> {
    /// a fresh game on a board with the given dimensions
    pub fn new(dimensions: D) -> Self {
        Self::fresh_round(Board::new(dimensions))
    }

    /// a fresh game on a square board with the given side length
    pub fn from_size(size: u8) -> Self {
        Self::new(D::from_size(size))
    }

    fn fresh_round(board: Board<T, D>) -> Self {
        let start = board.starting_position();
        let start_cell = board.cell_at(start);
        GameState {
            board,
            snake: SnakeBody::new(start, start_cell),
            direction: Direction::Right,
            requested: None,
            food: Food {
                cell: CellId::from_usize(start_cell.as_usize() + STARTING_FOOD_OFFSET),
                reverses: false,
            },
            score: 0,
        }
    }

    pub(crate) fn from_parts(
        board: Board<T, D>,
        snake: SnakeBody<T>,
        direction: Direction,
        food: Food<T>,
        score: u32,
    ) -> Self {
        GameState {
            board,
            snake,
            direction,
            requested: None,
            food,
            score,
        }
    }

    /// puts the game back in its canonical starting state; the score goes
    /// back to 0
    pub fn reset(&mut self) {
        *self = Self::fresh_round(self.board);
    }

    /// the board this game is played on
    pub fn board(&self) -> &Board<T, D> {
        &self.board
    }

    /// the snake's current direction of travel
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// the current food item
    pub fn food(&self) -> Food<T> {
        self.food
    }

    fn rejects_direction(&self, requested: Direction) -> bool {
        requested == self.direction.opposite() && self.snake.len() > 1
    }

    /// Asks the snake to head a different way starting with the next tick.
    /// A request for the exact opposite of the current travel direction is
    /// ignored while the snake is longer than one segment, since it would
    /// fold the head straight into the neck
    pub fn request_direction(&mut self, requested: Direction) {
        if self.rejects_direction(requested) {
            trace!(%requested, "direction request would reverse into the neck, ignored");
            return;
        }
        self.requested = Some(requested);
    }

    /// Keyboard entry point: maps a raw key name to a direction request.
    /// Unrecognized keys are no-ops
    pub fn handle_key(&mut self, key: &str) {
        if let Some(direction) = Direction::from_key(key) {
            self.request_direction(direction);
        }
    }

    /// Advances the simulation by one step and reports what happened. The
    /// duration of the step is reported to the given instruments
    #[instrument(level = "trace", skip_all)]
    pub fn tick<I: TickInstruments>(&mut self, rng: &mut impl Rng, instruments: &I) -> TickOutcome {
        let start = Instant::now();
        let outcome = self.advance_once(rng);
        instruments.observe_tick(start.elapsed());
        outcome
    }

    fn advance_once(&mut self, rng: &mut impl Rng) -> TickOutcome {
        if let Some(requested) = self.requested.take() {
            if !self.rejects_direction(requested) {
                self.direction = requested;
            }
        }

        let next_coords = self.snake.head_coords().add_vec(self.direction.to_vector());
        if self.board.off_board(next_coords) {
            debug!(?next_coords, score = self.score, "snake left the board");
            self.reset();
            return TickOutcome::GameOver(GameOverCause::HitWall);
        }
        let next_cell = self.board.cell_at(next_coords);
        if self.snake.contains(next_cell) {
            debug!(cell = %next_cell, score = self.score, "snake ran into itself");
            self.reset();
            return TickOutcome::GameOver(GameOverCause::HitSelf);
        }

        self.snake.advance(next_coords, next_cell);

        let mut outcome = TickOutcome::Advanced;
        if next_cell == self.food.cell {
            if !self.snake.grow(&self.board, self.direction) {
                trace!("growth cell unavailable, snake keeps its length");
            }
            let mut reversed = false;
            if self.food.reverses {
                self.direction = self.snake.reverse(self.direction);
                reversed = true;
                trace!(direction = %self.direction, "reversal food consumed");
            }
            self.score += 1;
            trace!(score = self.score, "food consumed");
            match place_food(
                rng,
                self.snake.occupancy(),
                Some(self.food.cell),
                self.board.max_cell(),
                REVERSAL_FOOD_PROBABILITY,
            ) {
                Some(food) => self.food = food,
                None => {
                    debug!(score = self.score, "no free cell left for food");
                    self.reset();
                    return TickOutcome::BoardFull;
                }
            }
            outcome = TickOutcome::Ate { reversed };
        }

        debug_assert!(self.snake.check_consistency());
        outcome
    }
}

impl<T: CellNum, D: GridSize> CellQueryableGame for GameState<T, D> {
    type NativeCellType = CellId<T>;

    fn is_snake_cell(&self, cell: Self::NativeCellType) -> bool {
        self.snake.contains(cell)
    }

    fn is_food_cell(&self, cell: Self::NativeCellType) -> bool {
        self.food.cell == cell
    }
}

impl<T: CellNum, D: GridSize> FoodGettableGame for GameState<T, D> {
    fn get_food_cell(&self) -> Self::NativeCellType {
        self.food.cell
    }

    fn food_is_special(&self) -> bool {
        self.food.reverses
    }
}

impl<T: CellNum, D: GridSize> ScoreGettableGame for GameState<T, D> {
    fn get_score(&self) -> u32 {
        self.score
    }
}

impl<T: CellNum, D: GridSize> LengthGettableGame for GameState<T, D> {
    type LengthType = u16;

    fn get_length(&self) -> Self::LengthType {
        self.snake.len() as u16
    }

    fn get_length_i64(&self) -> i64 {
        self.snake.len() as i64
    }
}

impl<T: CellNum, D: GridSize> HeadGettableGame for GameState<T, D> {
    fn get_head_as_coords(&self) -> Coords {
        self.snake.head_coords()
    }

    fn get_head_as_native_cell(&self) -> Self::NativeCellType {
        self.snake.head_cell()
    }
}

impl<T: CellNum, D: GridSize> SizeDeterminableGame for GameState<T, D> {
    fn get_size(&self) -> u32 {
        self.board.size() as u32
    }
}

impl<T: CellNum, D: GridSize> SnakeBodyGettableGame for GameState<T, D> {
    fn get_snake_body_vec(&self) -> Vec<Self::NativeCellType> {
        self.snake.iter_cells().collect()
    }
}

impl<T: CellNum, D: GridSize> fmt::Display for GameState<T, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        for row in 0..self.board.size() as i32 {
            for col in 0..self.board.size() as i32 {
                let cell = self.board.cell_at(Coords { row, col });
                if cell == self.snake.head_cell() {
                    write!(f, "H")?;
                } else if self.snake.contains(cell) {
                    write!(f, "s")?;
                } else if cell == self.food.cell {
                    if self.food.reverses {
                        write!(f, "r")?;
                    } else {
                        write!(f, "f")?;
                    }
                } else {
                    write!(f, ".")?;
                }
                write!(f, " ")?;
            }
            writeln!(f)?;
        }
        write!(
            f,
            "(score: {} direction: {} length: {})",
            self.score,
            self.direction,
            self.snake.len()
        )
    }
}
