//! Maze carving: randomized depth-first search (recursive backtracker).
//!
//! The traversal keeps an explicit stack of positions instead of recursing,
//! so a carve can be paused between any two steps. One [`CarveStep`] is
//! produced per removed wall; a `width x depth` grid always yields exactly
//! `width * depth - 1` steps.

use super::grid::Grid;
use super::types::{Direction, Position};
use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

/// A single wall removal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarveStep {
    /// Cell on top of the stack when the wall came down
    pub from: Position,
    /// Newly visited neighbor
    pub to: Position,
    /// Side of `from` that was opened
    pub direction: Direction,
}

/// Backtracking state for one carve.
///
/// The carver does not own the grid; every call to [`Carver::step`] borrows
/// it, so callers can inspect the grid between steps.
#[derive(Debug, Clone)]
pub struct Carver {
    stack: Vec<Position>,
}

impl Carver {
    /// Marks `start` visited and seeds the stack with it. An out-of-bounds
    /// start produces a carver that is already finished.
    pub fn new(grid: &mut Grid, start: Position) -> Self {
        let mut stack = Vec::with_capacity(grid.len());

        if let Some(cell) = grid.get_mut(start.0, start.1) {
            cell.visit();
            stack.push(start);
        }

        Self { stack }
    }

    /// Advances until one wall is removed. Dead ends on the way are popped
    /// (backtracking). Returns `None` once the stack is empty.
    pub fn step<R: Rng + ?Sized>(&mut self, grid: &mut Grid, rng: &mut R) -> Option<CarveStep> {
        while let Some(&current) = self.stack.last() {
            let neighbors = grid.unvisited_neighbors(current);

            let Some(&(next, direction)) = neighbors.choose(rng) else {
                // Dead end
                self.stack.pop();
                continue;
            };

            grid.remove_wall_between(current, direction);
            if let Some(cell) = grid.get_mut(next.0, next.1) {
                cell.visit();
            }
            self.stack.push(next);

            return Some(CarveStep {
                from: current,
                to: next,
                direction,
            });
        }

        None
    }

    pub fn is_finished(&self) -> bool {
        self.stack.is_empty()
    }

    /// Current backtracking depth
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

/// Lazy sequence of carve steps over a borrowed grid.
///
/// Pulling the iterator at any pace carves the same maze as draining it at
/// once, since the grid and RNG are only touched inside `next`.
pub struct CarveSteps<'a, R: Rng + ?Sized> {
    carver: Carver,
    grid: &'a mut Grid,
    rng: &'a mut R,
}

impl<R: Rng + ?Sized> Iterator for CarveSteps<'_, R> {
    type Item = CarveStep;

    fn next(&mut self) -> Option<CarveStep> {
        self.carver.step(&mut *self.grid, &mut *self.rng)
    }
}

/// Starts a carve from `start` and returns its steps as an iterator
pub fn carve_steps<'a, R: Rng + ?Sized>(
    grid: &'a mut Grid,
    start: Position,
    rng: &'a mut R,
) -> CarveSteps<'a, R> {
    let carver = Carver::new(grid, start);
    CarveSteps { carver, grid, rng }
}

/// Carves the whole grid in one go. Returns the number of walls removed.
pub fn carve_maze<R: Rng + ?Sized>(grid: &mut Grid, start: Position, rng: &mut R) -> usize {
    let steps = carve_steps(grid, start, rng).count();
    debug!(
        "carved {}x{} maze from {:?} in {} steps",
        grid.width(),
        grid.depth(),
        start,
        steps
    );
    steps
}
