//! Food placement: rejection sampling over the board's cell ids.

use fxhash::FxHashSet;
use rand::Rng;

use crate::board::{CellId, CellNum};

/// Chance that a spawned food item carries the direction-reversal effect
pub const REVERSAL_FOOD_PROBABILITY: f64 = 0.3;

/// A food item on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food<T: CellNum> {
    /// the cell the food sits on
    pub cell: CellId<T>,
    /// whether eating this food reverses the snake's direction of travel
    pub reverses: bool,
}

/// Draws a fresh food cell uniformly from `[1, max_cell]`, rejecting cells
/// covered by the snake and the previous food cell, and rolls whether the
/// new item reverses the snake's direction.
///
/// The draw is capped at `4 * max_cell + 16` attempts rather than looping
/// until it finds a free cell; `None` means the budget ran out, which in
/// practice only happens when the snake covers the whole board but one or
/// two cells.
pub fn place_food<T: CellNum>(
    rng: &mut impl Rng,
    occupied: &FxHashSet<CellId<T>>,
    previous: Option<CellId<T>>,
    max_cell: CellId<T>,
    reversal_probability: f64,
) -> Option<Food<T>> {
    let max = max_cell.as_usize();
    for _ in 0..4 * max + 16 {
        let candidate = CellId::from_usize(rng.gen_range(1..=max));
        if occupied.contains(&candidate) || Some(candidate) == previous {
            continue;
        }
        return Some(Food {
            cell: candidate,
            reverses: rng.gen_bool(reversal_probability),
        });
    }
    None
}
