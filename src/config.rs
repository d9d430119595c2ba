//! Generation settings.
//!
//! Every field has a default, so a JSON config only needs the keys it wants
//! to change. Values are checked by [`MazeConfig::validate`] before a grid is
//! ever allocated.

use crate::constants::{
    DEFAULT_CELL_SPACING, DEFAULT_DEPTH, DEFAULT_ROOM_COUNT, DEFAULT_START_DELAY_MS,
    DEFAULT_STEP_DELAY_MS, DEFAULT_WIDTH, MIN_ROOM_SPACING, MIN_START_DISTANCE,
};
use crate::error::ConfigError;
use crate::maze::{Cell, PlacementRules, Position, RoomPrototype};
use serde::{Deserialize, Serialize};
use std::fs;
use std::mem;
use std::path::Path;
use std::time::Duration;

/// Largest cell count a grid can hold in memory
const MAX_GRID_CELLS: usize = isize::MAX as usize / mem::size_of::<Cell>();

/// Delays used when carving is shown step by step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pacing {
    /// Pause after every carve step
    pub step_delay_ms: u64,
    /// Pause once before the first step
    pub start_delay_ms: u64,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            step_delay_ms: DEFAULT_STEP_DELAY_MS,
            start_delay_ms: DEFAULT_START_DELAY_MS,
        }
    }
}

impl Pacing {
    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }

    pub fn start_delay(&self) -> Duration {
        Duration::from_millis(self.start_delay_ms)
    }
}

/// User-facing maze settings.
///
/// Sizes are signed so that bad input is rejected instead of wrapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MazeConfig {
    pub width: i64,
    pub depth: i64,
    /// World units between neighboring cell centers
    pub cell_spacing: f32,
    /// Rooms requested
    pub room_count: i64,
    /// Carve start, (x, z)
    pub start: Position,
    pub min_start_distance: usize,
    pub min_room_spacing: f32,
    /// `None` runs generation without pauses
    pub pacing: Option<Pacing>,
    /// Template for rooms. `None` leaves selected cells as corridors.
    pub room_prototype: Option<RoomPrototype>,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            depth: DEFAULT_DEPTH,
            cell_spacing: DEFAULT_CELL_SPACING,
            room_count: DEFAULT_ROOM_COUNT,
            start: (0, 0),
            min_start_distance: MIN_START_DISTANCE,
            min_room_spacing: MIN_ROOM_SPACING,
            pacing: None,
            room_prototype: Some(RoomPrototype::default()),
        }
    }
}

/// Sizes that passed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MazeDimensions {
    pub width: usize,
    pub depth: usize,
    pub room_count: usize,
}

impl MazeConfig {
    /// Parse a JSON config; missing keys take their defaults
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Checks every setting and returns the validated sizes
    pub fn validate(&self) -> Result<MazeDimensions, ConfigError> {
        if self.width < 1 {
            return Err(ConfigError::InvalidWidth(self.width));
        }
        if self.depth < 1 {
            return Err(ConfigError::InvalidDepth(self.depth));
        }
        if self.room_count < 0 {
            return Err(ConfigError::NegativeRoomCount(self.room_count));
        }
        if !(self.cell_spacing.is_finite() && self.cell_spacing > 0.0) {
            return Err(ConfigError::InvalidSpacing(self.cell_spacing));
        }
        if !(self.min_room_spacing.is_finite() && self.min_room_spacing >= 0.0) {
            return Err(ConfigError::InvalidRoomSpacing(self.min_room_spacing));
        }

        let too_large = || ConfigError::GridTooLarge {
            width: self.width,
            depth: self.depth,
        };
        let width = usize::try_from(self.width).map_err(|_| too_large())?;
        let depth = usize::try_from(self.depth).map_err(|_| too_large())?;
        let cells = width.checked_mul(depth).ok_or_else(too_large)?;
        if cells > MAX_GRID_CELLS {
            return Err(too_large());
        }

        let dims = MazeDimensions {
            width,
            depth,
            room_count: usize::try_from(self.room_count).unwrap_or(usize::MAX),
        };

        if self.start.0 >= dims.width || self.start.1 >= dims.depth {
            return Err(ConfigError::StartOutOfBounds {
                start: self.start,
                width: dims.width,
                depth: dims.depth,
            });
        }

        Ok(dims)
    }

    pub fn placement_rules(&self, room_count: usize) -> PlacementRules {
        PlacementRules {
            room_count,
            min_start_distance: self.min_start_distance,
            min_room_spacing: self.min_room_spacing,
        }
    }
}
