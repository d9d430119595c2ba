//! Maze data structures.
//!
//! A cell owns four boundary walls and a visited flag. Walls start present and
//! are only ever cleared during carving; there is no operation that puts one
//! back.

use crate::constants::{DEFAULT_ROOM_ICON, DEFAULT_ROOM_NAME};
use serde::{Deserialize, Serialize};

/// Grid coordinate (x, z), 0-indexed
pub type Position = (usize, usize);

/// One of the four sides of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Toward z - 1
    Back,
    /// Toward x + 1
    Right,
    /// Toward z + 1
    Front,
    /// Toward x - 1
    Left,
}

impl Direction {
    /// Fixed iteration order used when collecting neighbors.
    pub const ALL: [Direction; 4] = [
        Direction::Back,
        Direction::Right,
        Direction::Front,
        Direction::Left,
    ];

    /// Slot of this side in a cell's wall array
    pub fn index(self) -> usize {
        match self {
            Direction::Back => 0,
            Direction::Right => 1,
            Direction::Front => 2,
            Direction::Left => 3,
        }
    }

    /// (dx, dz) step toward the neighbor on this side
    pub fn offset(self) -> (i64, i64) {
        match self {
            Direction::Back => (0, -1),
            Direction::Right => (1, 0),
            Direction::Front => (0, 1),
            Direction::Left => (-1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Back => Direction::Front,
            Direction::Right => Direction::Left,
            Direction::Front => Direction::Back,
            Direction::Left => Direction::Right,
        }
    }
}

/// Template a cell is converted from when it becomes a room
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomPrototype {
    pub name: String,
    /// Glyph used by the text renderer
    pub icon: char,
}

impl Default for RoomPrototype {
    fn default() -> Self {
        Self {
            name: DEFAULT_ROOM_NAME.to_string(),
            icon: DEFAULT_ROOM_ICON,
        }
    }
}

/// What occupies a grid slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellKind {
    /// Plain carved passage
    Corridor,
    /// Special room built from a prototype
    Room(RoomPrototype),
}

/// A single position in the maze grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// Grid position (x, z)
    pub position: Position,
    /// Wall presence indexed by [`Direction::index`] (back, right, front, left)
    walls: [bool; 4],
    /// Only meaningful while the maze is being carved
    visited: bool,
    pub kind: CellKind,
}

impl Cell {
    /// Fresh corridor cell: all four walls up, not yet visited.
    pub fn new(position: Position) -> Self {
        Self {
            position,
            walls: [true; 4],
            visited: false,
            kind: CellKind::Corridor,
        }
    }

    /// Room cell that takes over the wall layout of the cell it replaces.
    /// Rooms are always reachable, so they start visited.
    pub fn room(position: Position, walls: [bool; 4], prototype: RoomPrototype) -> Self {
        Self {
            position,
            walls,
            visited: true,
            kind: CellKind::Room(prototype),
        }
    }

    pub fn visit(&mut self) {
        self.visited = true;
    }

    pub fn is_visited(&self) -> bool {
        self.visited
    }

    pub fn has_wall(&self, dir: Direction) -> bool {
        self.walls[dir.index()]
    }

    pub fn clear_wall(&mut self, dir: Direction) {
        self.walls[dir.index()] = false;
    }

    pub fn walls(&self) -> [bool; 4] {
        self.walls
    }

    pub fn has_left_wall(&self) -> bool {
        self.has_wall(Direction::Left)
    }

    pub fn has_right_wall(&self) -> bool {
        self.has_wall(Direction::Right)
    }

    pub fn has_front_wall(&self) -> bool {
        self.has_wall(Direction::Front)
    }

    pub fn has_back_wall(&self) -> bool {
        self.has_wall(Direction::Back)
    }

    pub fn clear_left_wall(&mut self) {
        self.clear_wall(Direction::Left);
    }

    pub fn clear_right_wall(&mut self) {
        self.clear_wall(Direction::Right);
    }

    pub fn clear_front_wall(&mut self) {
        self.clear_wall(Direction::Front);
    }

    pub fn clear_back_wall(&mut self) {
        self.clear_wall(Direction::Back);
    }

    /// Sides with no wall, in [`Direction::ALL`] order
    pub fn open_sides(&self) -> Vec<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|&dir| !self.has_wall(dir))
            .collect()
    }

    pub fn is_room(&self) -> bool {
        matches!(self.kind, CellKind::Room(_))
    }

    /// Prototype this cell was converted from, if it is a room
    pub fn room_prototype(&self) -> Option<&RoomPrototype> {
        match &self.kind {
            CellKind::Room(prototype) => Some(prototype),
            CellKind::Corridor => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_cell_is_closed_and_unvisited() {
        let cell = Cell::new((2, 3));
        assert_eq!(cell.position, (2, 3));
        assert!(cell.has_left_wall());
        assert!(cell.has_right_wall());
        assert!(cell.has_front_wall());
        assert!(cell.has_back_wall());
        assert!(!cell.is_visited());
        assert!(!cell.is_room());
        assert!(cell.open_sides().is_empty());
    }

    #[test]
    fn test_visit_is_idempotent() {
        let mut cell = Cell::new((0, 0));
        cell.visit();
        cell.visit();
        assert!(cell.is_visited());
    }

    #[test]
    fn test_clear_walls_independently() {
        let mut cell = Cell::new((0, 0));
        cell.clear_right_wall();
        assert!(!cell.has_right_wall());
        assert!(cell.has_left_wall());
        assert!(cell.has_front_wall());
        assert!(cell.has_back_wall());

        cell.clear_back_wall();
        cell.clear_back_wall();
        assert_eq!(cell.open_sides(), vec![Direction::Back, Direction::Right]);

        cell.clear_front_wall();
        cell.clear_left_wall();
        assert_eq!(cell.walls(), [false; 4]);
    }

    #[test]
    fn test_direction_opposites_cancel() {
        for dir in Direction::ALL {
            assert_eq!(dir.opposite().opposite(), dir);
            let (dx, dz) = dir.offset();
            let (ox, oz) = dir.opposite().offset();
            assert_eq!((dx + ox, dz + oz), (0, 0));
        }
    }

    #[test]
    fn test_direction_indices_are_distinct() {
        let mut seen = [false; 4];
        for dir in Direction::ALL {
            assert!(!seen[dir.index()]);
            seen[dir.index()] = true;
        }
    }

    #[test]
    fn test_room_keeps_given_walls() {
        let walls = [false, true, true, false];
        let room = Cell::room((4, 4), walls, RoomPrototype::default());
        assert_eq!(room.walls(), walls);
        assert!(room.is_visited());
        assert!(room.is_room());
        assert_eq!(room.room_prototype().map(|p| p.icon), Some('R'));
    }
}
