//! Board geometry: the bijection between row/column pairs and cell ids.
//!
//! Cell ids are 1-based and assigned row-major, so `cell = row * size + col
//! + 1` and every id in `[1, size * size]` names exactly one board position.
//! The id width is generic over [`CellNum`] so a 15x15 board (max id 225)
//! packs into a byte.

pub mod dimensions;

use std::fmt::Display;
use std::marker::PhantomData;

use crate::types::Coords;
use dimensions::GridSize;

/// Wrapper trait for the integers backing cell ids, to allow for shrinking
/// board representations
pub trait CellNum:
    std::fmt::Debug + Copy + Clone + PartialEq + Eq + std::hash::Hash + Ord + Display + 'static
{
    /// converts this cellnum to a usize
    fn as_usize(&self) -> usize;
    /// makes a cellnum from a usize
    fn from_usize(u: usize) -> Self;
}

impl CellNum for u8 {
    fn as_usize(&self) -> usize {
        *self as usize
    }

    fn from_usize(u: usize) -> Self {
        u as u8
    }
}

impl CellNum for u16 {
    fn as_usize(&self) -> usize {
        *self as usize
    }

    fn from_usize(u: usize) -> Self {
        u as u16
    }
}

/// wrapper type for a 1-based cell id on the board
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Ord, PartialOrd)]
#[repr(transparent)]
pub struct CellId<T: CellNum>(pub T);

impl<T: CellNum> CellId<T> {
    /// makes a new cell id from coords, needs to know the side length of
    /// the board. The coords must be on the board
    pub fn from_coords(coords: Coords, size: u8) -> Self {
        Self(T::from_usize(
            coords.row as usize * size as usize + coords.col as usize + 1,
        ))
    }

    /// build a CellId from a usize
    pub fn from_usize(u: usize) -> Self {
        Self(T::from_usize(u))
    }

    /// get a usize from a CellId
    pub fn as_usize(&self) -> usize {
        self.0.as_usize()
    }

    /// converts a cell id back to coords
    pub fn to_coords(self, size: u8) -> Coords {
        let zero_based = self.0.as_usize() - 1;
        Coords {
            row: (zero_based / size as usize) as i32,
            col: (zero_based % size as usize) as i32,
        }
    }
}

impl<T: CellNum> Display for CellId<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The playing field. Holds no cell contents, only the geometry: which
/// coords are on the board, how coords and cell ids map to each other, and
/// where a fresh snake starts
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Board<T: CellNum, D: GridSize> {
    dimensions: D,
    _id_width: PhantomData<T>,
}

impl<T: CellNum, D: GridSize> Board<T, D> {
    /// builds a board with the given dimensions. The cell id type must be
    /// wide enough for every id on the board
    pub fn new(dimensions: D) -> Self {
        let cell_count = dimensions.size() as usize * dimensions.size() as usize;
        debug_assert_eq!(T::from_usize(cell_count).as_usize(), cell_count);

        Board {
            dimensions,
            _id_width: PhantomData,
        }
    }

    /// builds a board with the given side length
    pub fn from_size(size: u8) -> Self {
        Self::new(D::from_size(size))
    }

    /// the side length of the board
    pub fn size(&self) -> u8 {
        self.dimensions.size()
    }

    /// how many cells the board has
    pub fn cell_count(&self) -> usize {
        self.size() as usize * self.size() as usize
    }

    /// the largest cell id on the board
    pub fn max_cell(&self) -> CellId<T> {
        CellId::from_usize(self.cell_count())
    }

    /// the cell id at the given coords, which must be on the board
    pub fn cell_at(&self, coords: Coords) -> CellId<T> {
        debug_assert!(!self.off_board(coords));

        CellId::from_coords(coords, self.size())
    }

    /// the coords of the given cell id
    pub fn coords_of(&self, cell: CellId<T>) -> Coords {
        cell.to_coords(self.size())
    }

    /// true if the coords fall outside the board on any side
    pub fn off_board(&self, coords: Coords) -> bool {
        coords.row < 0
            || coords.col < 0
            || coords.row >= self.size() as i32
            || coords.col >= self.size() as i32
    }

    /// where a fresh snake's single starting node sits: the middle row,
    /// a third of the way across
    pub fn starting_position(&self) -> Coords {
        Coords {
            row: (self.size() / 2) as i32,
            col: (self.size() / 3) as i32,
        }
    }
}
