//! Plain-text maze drawing.
//!
//! Rows run from z = 0 at the top downward, so a cell's back wall is drawn
//! above it and its front wall below it.
//!
//! ```text
//! +---+---+
//! | S     |
//! +---+   +
//! |   | R |
//! +---+---+
//! ```

use crate::maze::{Cell, Grid, Maze, Position};

const WALL_H: &str = "---";
const OPEN_H: &str = "   ";

/// Draws a finished maze, marking the start cell and every room.
pub fn render_ascii(maze: &Maze) -> String {
    render_grid(maze.grid(), Some(maze.start()))
}

/// Draws a grid in any state, including partway through a carve.
pub fn render_grid(grid: &Grid, start: Option<Position>) -> String {
    let mut out = String::with_capacity((grid.width() * 4 + 2) * (grid.depth() * 2 + 1));

    for z in 0..grid.depth() {
        let row: Vec<&Cell> = (0..grid.width()).filter_map(|x| grid.get(x, z)).collect();

        out.push('+');
        for cell in &row {
            out.push_str(if cell.has_back_wall() { WALL_H } else { OPEN_H });
            out.push('+');
        }
        out.push('\n');

        for cell in &row {
            out.push(if cell.has_left_wall() { '|' } else { ' ' });
            out.push(' ');
            out.push(glyph(cell, start));
            out.push(' ');
        }
        let closed = row.last().is_some_and(|cell| cell.has_right_wall());
        out.push(if closed { '|' } else { ' ' });
        out.push('\n');
    }

    if grid.depth() > 0 {
        out.push('+');
        for x in 0..grid.width() {
            let closed = grid
                .get(x, grid.depth() - 1)
                .is_some_and(|cell| cell.has_front_wall());
            out.push_str(if closed { WALL_H } else { OPEN_H });
            out.push('+');
        }
        out.push('\n');
    }

    out
}

fn glyph(cell: &Cell, start: Option<Position>) -> char {
    if start == Some(cell.position) {
        return 'S';
    }
    cell.room_prototype().map_or(' ', |prototype| prototype.icon)
}
