//! various types that are useful for working with the snake engine
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};
use std::hash::Hash;
use std::time::Duration;

/// A vector with which to do positional math
#[derive(Debug, Clone, Copy)]
pub struct Vector {
    /// row delta, positive is down
    pub d_row: i64,
    /// column delta, positive is right
    pub d_col: i64,
}

/// A row/column pair on the board. Row 0 is the top row, column 0 the
/// leftmost column; coordinates may go negative or past the board edge,
/// which is what [`crate::board::Board::off_board`] exists to detect.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coords {
    /// row index
    pub row: i32,
    /// column index
    pub col: i32,
}

impl Coords {
    /// returns the coords one vector step away from this one
    pub fn add_vec(&self, v: Vector) -> Coords {
        Coords {
            row: (self.row as i64 + v.d_row) as i32,
            col: (self.col as i64 + v.d_col) as i32,
        }
    }

    /// returns the coords one vector step back from this one
    pub fn sub_vec(&self, v: Vector) -> Coords {
        Coords {
            row: (self.row as i64 - v.d_row) as i32,
            col: (self.col as i64 - v.d_col) as i32,
        }
    }

    /// convert these coords to a vector
    pub fn to_vector(&self) -> Vector {
        Vector {
            d_row: self.row as i64,
            d_col: self.col as i64,
        }
    }
}

/// Represents a direction of travel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[allow(missing_docs)]
    Up,
    #[allow(missing_docs)]
    Down,
    #[allow(missing_docs)]
    Left,
    #[allow(missing_docs)]
    Right,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
            Direction::Left => write!(f, "left"),
            Direction::Right => write!(f, "right"),
        }
    }
}

impl Direction {
    /// convert this direction to a unit vector
    pub fn to_vector(self) -> Vector {
        match self {
            Direction::Up => Vector { d_row: -1, d_col: 0 },
            Direction::Down => Vector { d_row: 1, d_col: 0 },
            Direction::Left => Vector { d_row: 0, d_col: -1 },
            Direction::Right => Vector { d_row: 0, d_col: 1 },
        }
    }

    /// create a Direction from the given vector, or None if it is not a
    /// unit step
    pub fn from_vector(vector: Vector) -> Option<Self> {
        match vector {
            Vector { d_row: -1, d_col: 0 } => Some(Self::Up),
            Vector { d_row: 1, d_col: 0 } => Some(Self::Down),
            Vector { d_row: 0, d_col: -1 } => Some(Self::Left),
            Vector { d_row: 0, d_col: 1 } => Some(Self::Right),
            _ => None,
        }
    }

    /// the direction exactly opposite this one
    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// returns a vec of all possible directions
    pub fn all() -> Vec<Direction> {
        vec![
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ]
    }

    /// converts this direction to a usize index. indices are the same order
    /// as the `Direction::all()` method
    pub fn as_index(&self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Down => 1,
            Direction::Left => 2,
            Direction::Right => 3,
        }
    }

    /// converts a usize index to a direction
    pub fn from_index(index: usize) -> Direction {
        match index {
            0 => Direction::Up,
            1 => Direction::Down,
            2 => Direction::Left,
            3 => Direction::Right,
            _ => panic!("invalid index"),
        }
    }

    /// maps a raw key name, as delivered by a browser keydown event, to a
    /// direction. Unrecognized keys map to None
    pub fn from_key(key: &str) -> Option<Direction> {
        match key {
            "ArrowUp" => Some(Direction::Up),
            "ArrowDown" => Some(Direction::Down),
            "ArrowLeft" => Some(Direction::Left),
            "ArrowRight" => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Instruments to be used with the tick loop
pub trait TickInstruments: std::fmt::Debug {
    #[allow(missing_docs)]
    fn observe_tick(&self, duration: Duration);
}

/// A game whose cells can be classified for rendering
pub trait CellQueryableGame {
    /// the native cell identifier type for this game
    type NativeCellType: Eq + Hash + Clone + Ord + PartialOrd + Debug;

    /// Check if the given cell is covered by the snake's body
    fn is_snake_cell(&self, cell: Self::NativeCellType) -> bool;

    /// Check if the given cell holds the current food item
    fn is_food_cell(&self, cell: Self::NativeCellType) -> bool;
}

/// A game for which the current food item can be got
pub trait FoodGettableGame: CellQueryableGame {
    /// get the cell the current food item sits on
    fn get_food_cell(&self) -> Self::NativeCellType;

    /// whether the current food item carries the direction-reversal effect
    fn food_is_special(&self) -> bool;
}

/// A game for which the current score can be got
pub trait ScoreGettableGame {
    /// get the score for the running round
    fn get_score(&self) -> u32;
}

/// A game for which the length of the snake can be got
pub trait LengthGettableGame {
    /// the length type for this game
    type LengthType: Ord + PartialOrd;

    /// get the snake's length
    fn get_length(&self) -> Self::LengthType;

    /// get the snake's length as an i64
    fn get_length_i64(&self) -> i64;
}

/// A game for which the head of the snake can be got
pub trait HeadGettableGame: CellQueryableGame {
    /// get the head position as row/column coords (slow for simulation)
    fn get_head_as_coords(&self) -> Coords;

    /// get the head position as the native cell type for this game
    fn get_head_as_native_cell(&self) -> Self::NativeCellType;
}

/// a game for which the size of the game board can be determined
pub trait SizeDeterminableGame {
    #[allow(missing_docs)]
    fn get_size(&self) -> u32;
}

/// A game where the entire snake body is gettable
pub trait SnakeBodyGettableGame: CellQueryableGame {
    /// return a Vec of the cells for the snake body, in order from head to
    /// tail
    fn get_snake_body_vec(&self) -> Vec<Self::NativeCellType>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_is_an_involution() {
        for direction in Direction::all() {
            assert_eq!(direction.opposite().opposite(), direction);
            assert_ne!(direction.opposite(), direction);
        }
    }

    #[test]
    fn test_vector_round_trip() {
        for direction in Direction::all() {
            assert_eq!(Direction::from_vector(direction.to_vector()), Some(direction));
        }
        assert_eq!(Direction::from_vector(Vector { d_row: 2, d_col: 0 }), None);
        assert_eq!(Direction::from_vector(Vector { d_row: 1, d_col: 1 }), None);
        assert_eq!(Direction::from_vector(Vector { d_row: 0, d_col: 0 }), None);
    }

    #[test]
    fn test_index_round_trip() {
        for (i, direction) in Direction::all().into_iter().enumerate() {
            assert_eq!(direction.as_index(), i);
            assert_eq!(Direction::from_index(i), direction);
        }
    }

    #[test]
    fn test_key_table() {
        assert_eq!(Direction::from_key("ArrowUp"), Some(Direction::Up));
        assert_eq!(Direction::from_key("ArrowDown"), Some(Direction::Down));
        assert_eq!(Direction::from_key("ArrowLeft"), Some(Direction::Left));
        assert_eq!(Direction::from_key("ArrowRight"), Some(Direction::Right));
        assert_eq!(Direction::from_key("Enter"), None);
        assert_eq!(Direction::from_key("w"), None);
        assert_eq!(Direction::from_key(""), None);
    }

    #[test]
    fn test_coords_math() {
        let coords = Coords { row: 4, col: 7 };
        let up = coords.add_vec(Direction::Up.to_vector());
        assert_eq!(up, Coords { row: 3, col: 7 });
        assert_eq!(up.sub_vec(Direction::Up.to_vector()), coords);
        let left_of_origin = Coords { row: 0, col: 0 }.add_vec(Direction::Left.to_vector());
        assert_eq!(left_of_origin, Coords { row: 0, col: -1 });
    }
}
