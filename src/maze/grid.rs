//! Grid storage and the finished maze.

use super::types::{Cell, Direction, Position};
use serde::{Deserialize, Serialize};

/// Fixed-size `width x depth` arena of cells, addressed by (x, z).
///
/// Exactly one cell occupies each slot for the whole lifetime of the grid;
/// cells are overwritten in place, never removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    width: usize,
    depth: usize,
    /// Row-major by z: slot = z * width + x
    cells: Vec<Cell>,
}

impl Grid {
    /// Builds a grid of closed, unvisited cells. Dimensions are validated by
    /// the config layer; a zero dimension yields an empty grid.
    pub fn new(width: usize, depth: usize) -> Self {
        let mut cells = Vec::with_capacity(width * depth);
        for z in 0..depth {
            for x in 0..width {
                cells.push(Cell::new((x, z)));
            }
        }
        Self {
            width,
            depth,
            cells,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, x: usize, z: usize) -> bool {
        x < self.width && z < self.depth
    }

    fn slot(&self, x: usize, z: usize) -> Option<usize> {
        self.contains(x, z).then(|| z * self.width + x)
    }

    /// Get the cell at (x, z), if in bounds
    pub fn get(&self, x: usize, z: usize) -> Option<&Cell> {
        self.cells.get(self.slot(x, z)?)
    }

    /// Get a mutable cell at (x, z), if in bounds
    pub fn get_mut(&mut self, x: usize, z: usize) -> Option<&mut Cell> {
        let slot = self.slot(x, z)?;
        self.cells.get_mut(slot)
    }

    /// Overwrites the occupant of `pos` and hands back the released cell.
    pub fn replace(&mut self, pos: Position, cell: Cell) -> Option<Cell> {
        let slot = self.get_mut(pos.0, pos.1)?;
        Some(std::mem::replace(slot, cell))
    }

    /// Position of the in-bounds neighbor on `dir`, if any
    pub fn neighbor(&self, pos: Position, dir: Direction) -> Option<Position> {
        let (dx, dz) = dir.offset();
        let nx = pos.0 as i64 + dx;
        let nz = pos.1 as i64 + dz;

        if nx < 0 || nz < 0 {
            return None;
        }
        let (nx, nz) = (nx as usize, nz as usize);
        self.contains(nx, nz).then_some((nx, nz))
    }

    /// In-bounds neighbors that have not been visited yet, in
    /// [`Direction::ALL`] order
    pub fn unvisited_neighbors(&self, pos: Position) -> Vec<(Position, Direction)> {
        Direction::ALL
            .into_iter()
            .filter_map(|dir| {
                let next = self.neighbor(pos, dir)?;
                let cell = self.get(next.0, next.1)?;
                (!cell.is_visited()).then_some((next, dir))
            })
            .collect()
    }

    /// Clears the wall on `dir` of `pos` and the mirrored wall on the
    /// neighbor. Returns the neighbor, or `None` (and changes nothing) when
    /// `dir` points off the grid.
    pub fn remove_wall_between(&mut self, pos: Position, dir: Direction) -> Option<Position> {
        let next = self.neighbor(pos, dir)?;

        if let Some(cell) = self.get_mut(pos.0, pos.1) {
            cell.clear_wall(dir);
        }
        if let Some(cell) = self.get_mut(next.0, next.1) {
            cell.clear_wall(dir.opposite());
        }

        Some(next)
    }

    /// Neighbors reachable through an open side
    pub fn connected_neighbors(&self, x: usize, z: usize) -> Vec<Position> {
        let Some(cell) = self.get(x, z) else {
            return Vec::new();
        };

        cell.open_sides()
            .into_iter()
            .filter_map(|dir| self.neighbor((x, z), dir))
            .collect()
    }

    /// Number of open wall pairs between adjacent cells. Each passage is
    /// counted once, from its left/back end.
    pub fn passage_count(&self) -> usize {
        self.cells
            .iter()
            .map(|cell| {
                [Direction::Right, Direction::Front]
                    .into_iter()
                    .filter(|&dir| {
                        !cell.has_wall(dir) && self.neighbor(cell.position, dir).is_some()
                    })
                    .count()
            })
            .sum()
    }

    /// All coordinates in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells.iter().map(|cell| cell.position)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

/// A fully carved maze with its rooms placed.
///
/// This is the read-only view handed to consumers such as a movement or
/// interaction system. Lookups outside the grid return `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Maze {
    grid: Grid,
    start: Position,
    /// World units between neighboring cell centers
    cell_spacing: f32,
    /// Converted rooms in placement order
    rooms: Vec<Position>,
}

impl Maze {
    pub(crate) fn new(grid: Grid, start: Position, cell_spacing: f32, rooms: Vec<Position>) -> Self {
        Self {
            grid,
            start,
            cell_spacing,
            rooms,
        }
    }

    /// Get the cell at (x, z), if it exists
    pub fn get_cell(&self, x: usize, z: usize) -> Option<&Cell> {
        self.grid.get(x, z)
    }

    /// Cell whose footprint contains the world-space point (wx, wz).
    /// Cell centers sit at multiples of the cell spacing.
    pub fn cell_at_world(&self, wx: f32, wz: f32) -> Option<&Cell> {
        let gx = (wx / self.cell_spacing).round();
        let gz = (wz / self.cell_spacing).round();

        // Also rejects NaN
        if !(gx >= 0.0 && gz >= 0.0) {
            return None;
        }
        self.get_cell(gx as usize, gz as usize)
    }

    /// World-space center of the cell at (x, z)
    pub fn world_position(&self, x: usize, z: usize) -> (f32, f32) {
        (x as f32 * self.cell_spacing, z as f32 * self.cell_spacing)
    }

    pub fn connected_neighbors(&self, x: usize, z: usize) -> Vec<Position> {
        self.grid.connected_neighbors(x, z)
    }

    pub fn passage_count(&self) -> usize {
        self.grid.passage_count()
    }

    pub fn room_positions(&self) -> &[Position] {
        &self.rooms
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn cell_spacing(&self) -> f32 {
        self.cell_spacing
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn depth(&self) -> usize {
        self.grid.depth()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }
}
