//! The snake's body: an ordered chain of segments from head to tail.
//!
//! Segments live in a slab arena and link to each other by index, the same
//! way board cells carry next-segment indices in a compact board, so
//! advancing is O(1) at both ends and reversing the chain never has to
//! fight an ownership cycle. A cached [`FxHashSet`] of occupied cells backs
//! the O(1) collision checks and is kept in lock-step with every structural
//! mutation.

use fxhash::FxHashSet;

use crate::board::dimensions::GridSize;
use crate::board::{Board, CellId, CellNum};
use crate::types::{Coords, Direction, Vector};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Segment<T: CellNum> {
    coords: Coords,
    cell: CellId<T>,
    /// arena index of the neighbor toward the head
    ahead: Option<u16>,
    /// arena index of the neighbor toward the tail
    behind: Option<u16>,
}

/// The snake's body. Always holds at least one segment
#[derive(Debug, Clone)]
pub struct SnakeBody<T: CellNum> {
    arena: Vec<Segment<T>>,
    free: Vec<u16>,
    head: u16,
    tail: u16,
    len: usize,
    occupied: FxHashSet<CellId<T>>,
}

impl<T: CellNum> SnakeBody<T> {
    /// a fresh single-segment body at the given position
    pub fn new(coords: Coords, cell: CellId<T>) -> Self {
        let mut occupied = FxHashSet::default();
        occupied.insert(cell);
        SnakeBody {
            arena: vec![Segment {
                coords,
                cell,
                ahead: None,
                behind: None,
            }],
            free: Vec::new(),
            head: 0,
            tail: 0,
            len: 1,
            occupied,
        }
    }

    /// rebuilds a body from its cells in head-to-tail order. Returns None
    /// for an empty chain or one that covers a cell twice
    pub fn from_chain(segments: impl IntoIterator<Item = (Coords, CellId<T>)>) -> Option<Self> {
        let mut iter = segments.into_iter();
        let (head_coords, head_cell) = iter.next()?;
        let mut body = Self::new(head_coords, head_cell);
        for (coords, cell) in iter {
            if body.occupied.contains(&cell) {
                return None;
            }
            body.push_tail(coords, cell);
        }
        Some(body)
    }

    fn seg(&self, index: u16) -> &Segment<T> {
        &self.arena[index as usize]
    }

    fn alloc(&mut self, segment: Segment<T>) -> u16 {
        match self.free.pop() {
            Some(slot) => {
                self.arena[slot as usize] = segment;
                slot
            }
            None => {
                self.arena.push(segment);
                (self.arena.len() - 1) as u16
            }
        }
    }

    fn push_tail(&mut self, coords: Coords, cell: CellId<T>) {
        let old_tail = self.tail;
        let new_tail = self.alloc(Segment {
            coords,
            cell,
            ahead: Some(old_tail),
            behind: None,
        });
        self.arena[old_tail as usize].behind = Some(new_tail);
        self.tail = new_tail;
        self.occupied.insert(cell);
        self.len += 1;
    }

    /// how many segments the body has
    pub fn len(&self) -> usize {
        self.len
    }

    /// the position of the head segment
    pub fn head_coords(&self) -> Coords {
        self.seg(self.head).coords
    }

    /// the cell the head segment covers
    pub fn head_cell(&self) -> CellId<T> {
        self.seg(self.head).cell
    }

    /// the cell the tail segment covers
    pub fn tail_cell(&self) -> CellId<T> {
        self.seg(self.tail).cell
    }

    /// O(1) check whether the body covers the given cell
    pub fn contains(&self, cell: CellId<T>) -> bool {
        self.occupied.contains(&cell)
    }

    /// the set of cells the body currently covers
    pub fn occupancy(&self) -> &FxHashSet<CellId<T>> {
        &self.occupied
    }

    /// walks the body from head to tail
    pub fn iter_cells(&self) -> impl Iterator<Item = CellId<T>> + '_ {
        let mut next = Some(self.head);
        std::iter::from_fn(move || {
            let index = next?;
            let seg = self.seg(index);
            next = seg.behind;
            Some(seg.cell)
        })
    }

    /// Prepends a new head segment and releases the tail segment, keeping
    /// the chain intact and the occupancy set exact. The caller has already
    /// decided the move is legal
    pub fn advance(&mut self, coords: Coords, cell: CellId<T>) {
        let old_head = self.head;
        let new_head = self.alloc(Segment {
            coords,
            cell,
            ahead: None,
            behind: Some(old_head),
        });
        self.arena[old_head as usize].ahead = Some(new_head);
        self.head = new_head;
        self.len += 1;

        let old_tail = self.tail;
        let vacated = self.seg(old_tail).cell;
        self.occupied.remove(&vacated);
        self.occupied.insert(cell);
        if let Some(new_tail) = self.seg(old_tail).ahead {
            self.arena[new_tail as usize].behind = None;
            self.tail = new_tail;
        }
        self.free.push(old_tail);
        self.len -= 1;
    }

    /// Appends a new tail segment one step behind the current tail,
    /// continuing the tail's trajectory. Growth fails silently when that
    /// cell is off the board or already covered by the body; the snake
    /// simply does not lengthen
    pub fn grow<D: GridSize>(&mut self, board: &Board<T, D>, travel: Direction) -> bool {
        let growth_direction = self.tail_direction_of_travel().unwrap_or(travel).opposite();
        let coords = self
            .seg(self.tail)
            .coords
            .add_vec(growth_direction.to_vector());
        if board.off_board(coords) {
            return false;
        }
        let cell = board.cell_at(coords);
        if self.occupied.contains(&cell) {
            return false;
        }
        self.push_tail(coords, cell);
        true
    }

    /// Reverses the chain: the old tail becomes the new head. Returns the
    /// new direction of travel, the opposite of the direction the old tail
    /// segment was heading (or of `travel` for a single-segment body)
    pub fn reverse(&mut self, travel: Direction) -> Direction {
        let new_travel = self.tail_direction_of_travel().unwrap_or(travel).opposite();
        let mut index = Some(self.head);
        while let Some(i) = index {
            let seg = &mut self.arena[i as usize];
            index = seg.behind;
            std::mem::swap(&mut seg.ahead, &mut seg.behind);
        }
        std::mem::swap(&mut self.head, &mut self.tail);
        new_travel
    }

    /// the direction the tail segment is heading, inferred from the
    /// coordinate delta to its neighbor toward the head. None for a
    /// single-segment body, in which case the caller substitutes the
    /// snake's current travel direction
    pub fn tail_direction_of_travel(&self) -> Option<Direction> {
        self.direction_of_travel(self.tail)
    }

    fn direction_of_travel(&self, index: u16) -> Option<Direction> {
        let seg = self.seg(index);
        let ahead = self.seg(seg.ahead?);
        Direction::from_vector(Vector {
            d_row: (ahead.coords.row - seg.coords.row) as i64,
            d_col: (ahead.coords.col - seg.coords.col) as i64,
        })
    }

    /// Walks the chain from head to tail and checks that the links are
    /// intact, acyclic, and in lock-step with the occupancy set
    pub fn check_consistency(&self) -> bool {
        if self.occupied.len() != self.len || self.len == 0 {
            return false;
        }
        let mut index = self.head;
        if self.seg(index).ahead.is_some() {
            return false;
        }
        let mut steps = 1;
        loop {
            let seg = self.seg(index);
            if !self.occupied.contains(&seg.cell) {
                return false;
            }
            match seg.behind {
                Some(next) => {
                    if steps >= self.len {
                        return false;
                    }
                    if self.seg(next).ahead != Some(index) {
                        return false;
                    }
                    index = next;
                    steps += 1;
                }
                None => break,
            }
        }
        index == self.tail && steps == self.len
    }
}
