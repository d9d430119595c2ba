//! Warren - perfect maze generation with spaced special rooms.
//!
//! A maze is carved over a fixed grid with a randomized depth-first
//! backtracker, then a handful of interior cells are turned into rooms while
//! keeping their carved walls intact.

pub mod build_info;
pub mod builder;
pub mod config;
pub mod constants;
pub mod error;
pub mod maze;
pub mod render;

pub use builder::{generate_maze, Generation, MazeBuilder};
pub use config::{MazeConfig, Pacing};
pub use error::ConfigError;
pub use maze::{Cell, CellKind, Direction, GenerationWarning, Grid, Maze, Position, RoomPrototype};
