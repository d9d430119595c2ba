//! Special room placement over a carved grid.
//!
//! Candidates are interior cells far enough from the start. They are
//! shuffled, then accepted greedily as long as each new room keeps its
//! distance from every room accepted before it.

use super::grid::Grid;
use super::types::{Cell, Position, RoomPrototype};
use crate::constants::{DEFAULT_ROOM_COUNT, MIN_ROOM_SPACING, MIN_START_DISTANCE};
use log::{debug, warn};
use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;

/// Limits applied when choosing room positions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementRules {
    /// Rooms requested
    pub room_count: usize,
    /// Minimum Manhattan distance between a room and the carve start
    pub min_start_distance: usize,
    /// Minimum Euclidean distance between any two rooms
    pub min_room_spacing: f32,
}

impl Default for PlacementRules {
    fn default() -> Self {
        Self {
            room_count: DEFAULT_ROOM_COUNT as usize,
            min_start_distance: MIN_START_DISTANCE,
            min_room_spacing: MIN_ROOM_SPACING,
        }
    }
}

/// Non-fatal outcome of a generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationWarning {
    /// Spacing rules left room for fewer rooms than requested. `placed`
    /// counts positions that passed the spacing rules, including any left as
    /// corridors by [`GenerationWarning::MissingRoomPrototype`].
    RoomShortfall { placed: usize, requested: usize },
    /// A selected position stayed a corridor because no prototype is set
    MissingRoomPrototype { position: Position },
}

impl fmt::Display for GenerationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationWarning::RoomShortfall { placed, requested } => {
                write!(f, "only placed {placed} of {requested} requested rooms")
            }
            GenerationWarning::MissingRoomPrototype { position } => write!(
                f,
                "no room prototype configured, cell ({}, {}) left as corridor",
                position.0, position.1
            ),
        }
    }
}

/// Result of a room placement pass
#[derive(Debug, Clone, Default)]
pub struct PlacementOutcome {
    /// Positions that passed the spacing rules
    pub selected: Vec<Position>,
    /// Positions actually converted into rooms, in placement order
    pub rooms: Vec<Position>,
    pub warnings: Vec<GenerationWarning>,
}

pub fn manhattan_distance(a: Position, b: Position) -> usize {
    a.0.abs_diff(b.0) + a.1.abs_diff(b.1)
}

fn distance_squared(a: Position, b: Position) -> usize {
    let dx = a.0.abs_diff(b.0);
    let dz = a.1.abs_diff(b.1);
    dx * dx + dz * dz
}

pub fn euclidean_distance(a: Position, b: Position) -> f32 {
    (distance_squared(a, b) as f32).sqrt()
}

/// Interior cells (never on the grid edge) at least `min_start_distance`
/// steps from `start`, in row-major order
pub fn room_candidates(
    width: usize,
    depth: usize,
    start: Position,
    rules: &PlacementRules,
) -> Vec<Position> {
    let mut candidates = Vec::new();

    for z in 1..depth.saturating_sub(1) {
        for x in 1..width.saturating_sub(1) {
            if manhattan_distance((x, z), start) >= rules.min_start_distance {
                candidates.push((x, z));
            }
        }
    }

    candidates
}

/// Shuffles `candidates` and keeps each one that is far enough from every
/// position kept before it, stopping at `rules.room_count`
pub fn select_room_positions<R: Rng + ?Sized>(
    mut candidates: Vec<Position>,
    rules: &PlacementRules,
    rng: &mut R,
) -> Vec<Position> {
    let mut selected: Vec<Position> = Vec::with_capacity(rules.room_count.min(candidates.len()));
    if rules.room_count == 0 {
        return selected;
    }

    candidates.shuffle(rng);

    let min_spacing_squared = rules.min_room_spacing * rules.min_room_spacing;
    for candidate in candidates {
        let far_enough = selected
            .iter()
            .all(|&room| distance_squared(candidate, room) as f32 >= min_spacing_squared);

        if far_enough {
            selected.push(candidate);
            if selected.len() == rules.room_count {
                break;
            }
        }
    }

    selected
}

/// Replaces the cell at `pos` with a room that keeps its exact wall layout.
/// Returns the released corridor cell, or `None` if `pos` is off the grid.
pub fn convert_to_room(grid: &mut Grid, pos: Position, prototype: &RoomPrototype) -> Option<Cell> {
    let walls = grid.get(pos.0, pos.1)?.walls();
    grid.replace(pos, Cell::room(pos, walls, prototype.clone()))
}

/// Runs the full placement pass on a carved grid
pub fn place_rooms<R: Rng + ?Sized>(
    grid: &mut Grid,
    start: Position,
    rules: &PlacementRules,
    prototype: Option<&RoomPrototype>,
    rng: &mut R,
) -> PlacementOutcome {
    let candidates = room_candidates(grid.width(), grid.depth(), start, rules);
    let candidate_count = candidates.len();
    let selected = select_room_positions(candidates, rules, rng);

    let mut outcome = PlacementOutcome::default();

    for &pos in &selected {
        let Some(prototype) = prototype else {
            let warning = GenerationWarning::MissingRoomPrototype { position: pos };
            warn!("{warning}");
            outcome.warnings.push(warning);
            continue;
        };

        if convert_to_room(grid, pos, prototype).is_some() {
            outcome.rooms.push(pos);
        }
    }

    if selected.len() < rules.room_count {
        let warning = GenerationWarning::RoomShortfall {
            placed: selected.len(),
            requested: rules.room_count,
        };
        warn!("{warning}");
        outcome.warnings.push(warning);
    }

    debug!(
        "selected {} rooms from {} candidates, converted {}",
        selected.len(),
        candidate_count,
        outcome.rooms.len()
    );

    outcome.selected = selected;
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::generation::carve_maze;
    use crate::maze::types::Direction;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rules(room_count: usize) -> PlacementRules {
        PlacementRules {
            room_count,
            ..Default::default()
        }
    }

    #[test]
    fn test_distances() {
        assert_eq!(manhattan_distance((0, 0), (3, 4)), 7);
        assert_eq!(manhattan_distance((3, 4), (0, 0)), 7);
        assert_eq!(euclidean_distance((0, 0), (3, 4)), 5.0);
        assert_eq!(euclidean_distance((2, 2), (2, 2)), 0.0);
    }

    #[test]
    fn test_candidates_are_interior_and_far_from_start() {
        let candidates = room_candidates(6, 5, (0, 0), &rules(3));

        assert!(!candidates.is_empty());
        for &(x, z) in &candidates {
            assert!((1..=4).contains(&x));
            assert!((1..=3).contains(&z));
            assert!(manhattan_distance((x, z), (0, 0)) >= 3);
        }
        // (1, 1) is interior but only 2 steps from the start
        assert!(!candidates.contains(&(1, 1)));
        assert!(candidates.contains(&(2, 1)));
    }

    #[test]
    fn test_small_grids_have_no_candidates() {
        assert!(room_candidates(2, 2, (0, 0), &rules(5)).is_empty());
        assert!(room_candidates(1, 9, (0, 0), &rules(5)).is_empty());
        assert!(room_candidates(9, 2, (0, 0), &rules(5)).is_empty());
    }

    #[test]
    fn test_selection_respects_spacing_and_count() {
        for seed in 0..30 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let r = rules(6);
            let candidates = room_candidates(20, 20, (0, 0), &r);
            let selected = select_room_positions(candidates, &r, &mut rng);

            assert!(selected.len() <= 6);
            for (i, &a) in selected.iter().enumerate() {
                for &b in &selected[i + 1..] {
                    assert!(euclidean_distance(a, b) >= 4.0, "{a:?} {b:?}");
                }
            }
        }
    }

    #[test]
    fn test_spacing_boundary_is_inclusive() {
        let r = PlacementRules {
            room_count: 2,
            min_start_distance: 0,
            min_room_spacing: 4.0,
        };
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let selected = select_room_positions(vec![(1, 1), (5, 1)], &r, &mut rng);
        assert_eq!(selected.len(), 2);

        let selected = select_room_positions(vec![(1, 1), (4, 1)], &r, &mut rng);
        assert_eq!(selected.len(), 1);
    }

    #[test]
    fn test_zero_rooms_requested() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut grid = Grid::new(10, 10);
        carve_maze(&mut grid, (0, 0), &mut rng);
        let before = grid.clone();

        let prototype = RoomPrototype::default();
        let outcome = place_rooms(&mut grid, (0, 0), &rules(0), Some(&prototype), &mut rng);

        assert!(outcome.rooms.is_empty());
        assert!(outcome.warnings.is_empty());
        assert_eq!(grid, before);
    }

    #[test]
    fn test_conversion_preserves_walls() {
        let mut grid = Grid::new(3, 3);
        grid.remove_wall_between((1, 1), Direction::Left);
        grid.remove_wall_between((1, 1), Direction::Front);
        let walls = grid.get(1, 1).unwrap().walls();

        let old = convert_to_room(&mut grid, (1, 1), &RoomPrototype::default()).unwrap();
        assert!(!old.is_room());

        let room = grid.get(1, 1).unwrap();
        assert!(room.is_room());
        assert!(room.is_visited());
        assert_eq!(room.walls(), walls);
        assert_eq!(room.position, (1, 1));
    }

    #[test]
    fn test_conversion_off_grid() {
        let mut grid = Grid::new(3, 3);
        assert!(convert_to_room(&mut grid, (3, 3), &RoomPrototype::default()).is_none());
    }

    #[test]
    fn test_shortfall_reports_counts() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut grid = Grid::new(5, 5);
        carve_maze(&mut grid, (0, 0), &mut rng);

        // A 3x3 interior cannot hold rooms 4 apart, so at most one fits
        let prototype = RoomPrototype::default();
        let outcome = place_rooms(&mut grid, (0, 0), &rules(4), Some(&prototype), &mut rng);

        assert_eq!(outcome.rooms.len(), 1);
        assert_eq!(
            outcome.warnings,
            vec![GenerationWarning::RoomShortfall {
                placed: 1,
                requested: 4
            }]
        );
    }

    #[test]
    fn test_huge_room_request_is_a_shortfall() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut grid = Grid::new(10, 10);
        carve_maze(&mut grid, (0, 0), &mut rng);

        let prototype = RoomPrototype::default();
        let outcome = place_rooms(
            &mut grid,
            (0, 0),
            &rules(usize::MAX),
            Some(&prototype),
            &mut rng,
        );

        assert!(!outcome.rooms.is_empty());
        assert_eq!(
            outcome.warnings,
            vec![GenerationWarning::RoomShortfall {
                placed: outcome.rooms.len(),
                requested: usize::MAX
            }]
        );
    }

    #[test]
    fn test_missing_prototype_leaves_corridors() {
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let mut grid = Grid::new(12, 12);
        carve_maze(&mut grid, (0, 0), &mut rng);
        let before = grid.clone();

        let outcome = place_rooms(&mut grid, (0, 0), &rules(2), None, &mut rng);

        assert!(outcome.rooms.is_empty());
        assert_eq!(outcome.selected.len(), 2);
        assert_eq!(grid, before);
        let missing = outcome
            .warnings
            .iter()
            .filter(|w| matches!(w, GenerationWarning::MissingRoomPrototype { .. }))
            .count();
        assert_eq!(missing, 2);
    }

    #[test]
    fn test_warning_messages() {
        let shortfall = GenerationWarning::RoomShortfall {
            placed: 2,
            requested: 5,
        };
        assert_eq!(shortfall.to_string(), "only placed 2 of 5 requested rooms");

        let missing = GenerationWarning::MissingRoomPrototype { position: (3, 4) };
        assert_eq!(
            missing.to_string(),
            "no room prototype configured, cell (3, 4) left as corridor"
        );
    }
}
