//! Maze generation orchestration.
//!
//! The builder owns the grid for the whole run: it carves, places rooms,
//! and only then hands the result out as a read-only [`Maze`].

use crate::config::{MazeConfig, MazeDimensions};
use crate::error::ConfigError;
use crate::maze::{
    carve_maze, place_rooms, CarveStep, Carver, GenerationWarning, Grid, Maze, PlacementOutcome,
};
use log::debug;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::thread;
use std::time::Duration;

/// A finished generation run
#[derive(Debug, Clone)]
pub struct Generation {
    pub maze: Maze,
    /// Non-fatal problems hit while placing rooms
    pub warnings: Vec<GenerationWarning>,
    /// Number of carve steps taken
    pub steps: usize,
}

impl Generation {
    /// `(placed, requested)` if fewer rooms were placed than asked for
    pub fn room_shortfall(&self) -> Option<(usize, usize)> {
        self.warnings.iter().find_map(|warning| match *warning {
            GenerationWarning::RoomShortfall { placed, requested } => Some((placed, requested)),
            GenerationWarning::MissingRoomPrototype { .. } => None,
        })
    }
}

/// Validated maze settings, ready to generate from
#[derive(Debug, Clone)]
pub struct MazeBuilder {
    config: MazeConfig,
    dims: MazeDimensions,
}

impl MazeBuilder {
    /// Fails fast on invalid settings, before any grid exists
    pub fn new(config: MazeConfig) -> Result<Self, ConfigError> {
        let dims = config.validate()?;
        Ok(Self { config, dims })
    }

    pub fn config(&self) -> &MazeConfig {
        &self.config
    }

    pub fn dimensions(&self) -> MazeDimensions {
        self.dims
    }

    /// Generates a maze. Runs straight through unless pacing is configured,
    /// in which case the configured delays are slept between steps.
    pub fn build<R: Rng + ?Sized>(&self, rng: &mut R) -> Generation {
        if self.config.pacing.is_some() {
            return self.build_observed(rng, |_, _| {});
        }

        let mut grid = Grid::new(self.dims.width, self.dims.depth);
        let steps = carve_maze(&mut grid, self.config.start, rng);
        self.finish(grid, steps, rng)
    }

    /// Generates a maze, calling `observer` after every carve step with the
    /// grid as it stands. The grid is never mid-mutation when observed.
    pub fn build_observed<R, F>(&self, rng: &mut R, mut observer: F) -> Generation
    where
        R: Rng + ?Sized,
        F: FnMut(&Grid, &CarveStep),
    {
        let pacing = self.config.pacing;
        let mut grid = Grid::new(self.dims.width, self.dims.depth);
        let mut carver = Carver::new(&mut grid, self.config.start);

        if let Some(pacing) = pacing {
            pause(pacing.start_delay());
        }

        let mut steps = 0;
        while let Some(step) = carver.step(&mut grid, rng) {
            steps += 1;
            observer(&grid, &step);
            if let Some(pacing) = pacing {
                pause(pacing.step_delay());
            }
        }

        self.finish(grid, steps, rng)
    }

    /// Generates with a ChaCha8 RNG seeded from `seed`
    pub fn build_seeded(&self, seed: u64) -> Generation {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.build(&mut rng)
    }

    fn finish<R: Rng + ?Sized>(&self, mut grid: Grid, steps: usize, rng: &mut R) -> Generation {
        let rules = self.config.placement_rules(self.dims.room_count);
        let PlacementOutcome {
            rooms, warnings, ..
        } = place_rooms(
            &mut grid,
            self.config.start,
            &rules,
            self.config.room_prototype.as_ref(),
            rng,
        );

        debug!(
            "generated {}x{} maze with {} rooms ({} warnings)",
            self.dims.width,
            self.dims.depth,
            rooms.len(),
            warnings.len()
        );

        Generation {
            maze: Maze::new(grid, self.config.start, self.config.cell_spacing, rooms),
            warnings,
            steps,
        }
    }
}

fn pause(duration: Duration) {
    if !duration.is_zero() {
        thread::sleep(duration);
    }
}

/// Validates `config` and generates a maze from `seed`
pub fn generate_maze(config: MazeConfig, seed: u64) -> Result<Generation, ConfigError> {
    Ok(MazeBuilder::new(config)?.build_seeded(seed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Pacing;
    use crate::maze::RoomPrototype;

    fn config(width: i64, depth: i64, room_count: i64) -> MazeConfig {
        MazeConfig {
            width,
            depth,
            room_count,
            ..Default::default()
        }
    }

    #[test]
    fn test_builder_rejects_invalid_config() {
        assert!(MazeBuilder::new(config(0, 5, 1)).is_err());
        assert!(MazeBuilder::new(config(5, 0, 1)).is_err());
        assert!(MazeBuilder::new(config(5, 5, -1)).is_err());
    }

    #[test]
    fn test_build_default_maze() {
        let builder = MazeBuilder::new(MazeConfig::default()).unwrap();
        let generation = builder.build_seeded(42);

        assert_eq!(generation.steps, 99);
        assert_eq!(generation.maze.passage_count(), 99);
        assert!(generation.maze.room_count() <= 5);
    }

    #[test]
    fn test_observer_sees_every_step() {
        let builder = MazeBuilder::new(config(6, 4, 0)).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut seen = Vec::new();

        let generation = builder.build_observed(&mut rng, |grid, step| {
            assert!(grid.get(step.to.0, step.to.1).unwrap().is_visited());
            seen.push(*step);
        });

        assert_eq!(seen.len(), 23);
        assert_eq!(generation.steps, 23);
    }

    #[test]
    fn test_paced_build_matches_immediate_build() {
        let immediate = MazeBuilder::new(config(9, 7, 3)).unwrap();
        let paced = MazeBuilder::new(MazeConfig {
            pacing: Some(Pacing {
                step_delay_ms: 0,
                start_delay_ms: 0,
            }),
            ..config(9, 7, 3)
        })
        .unwrap();

        let a = immediate.build_seeded(1234);
        let b = paced.build_seeded(1234);
        assert_eq!(a.maze, b.maze);
        assert_eq!(a.warnings, b.warnings);
    }

    #[test]
    fn test_room_shortfall_accessor() {
        let builder = MazeBuilder::new(config(2, 2, 3)).unwrap();
        let generation = builder.build_seeded(0);
        assert_eq!(generation.room_shortfall(), Some((0, 3)));
        assert_eq!(generation.maze.room_count(), 0);
    }

    #[test]
    fn test_custom_prototype_is_used() {
        let builder = MazeBuilder::new(MazeConfig {
            room_prototype: Some(RoomPrototype {
                name: "vault".to_string(),
                icon: 'V',
            }),
            ..config(12, 12, 2)
        })
        .unwrap();
        let generation = builder.build_seeded(9);

        assert!(!generation.maze.room_positions().is_empty());
        for &(x, z) in generation.maze.room_positions() {
            let cell = generation.maze.get_cell(x, z).unwrap();
            assert_eq!(cell.room_prototype().map(|p| p.name.as_str()), Some("vault"));
        }
    }

    #[test]
    fn test_generate_maze_propagates_errors() {
        assert!(matches!(
            generate_maze(config(-1, 3, 0), 0),
            Err(ConfigError::InvalidWidth(-1))
        ));
        assert!(generate_maze(config(3, 3, 0), 0).is_ok());
    }
}
