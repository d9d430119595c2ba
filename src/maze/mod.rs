//! Maze topology: grid types, carving, and room placement.

#![allow(unused_imports)]

pub mod generation;
pub mod grid;
pub mod placement;
pub mod types;

pub use generation::*;
pub use grid::*;
pub use placement::*;
pub use types::*;
