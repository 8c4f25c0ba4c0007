use crate::components::{Direction, Position};
use crate::level::Grid;

/// One step in `dir`, wrapping around the maze edges.
pub fn step(pos: Position, dir: Direction, grid: &Grid) -> Position {
    let (dr, dc) = dir.delta();
    Position {
        row: wrap(pos.row, dr, grid.rows()),
        col: wrap(pos.col, dc, grid.cols()),
    }
}

fn wrap(value: usize, delta: isize, bound: usize) -> usize {
    (value as isize + delta).rem_euclid(bound as isize) as usize
}

/// Where an actor at `pos` ends up after trying to move in `dir`. A wall on
/// the (wrapped) target cell rejects the move outright.
pub fn resolve(pos: Position, dir: Direction, grid: &Grid) -> Position {
    let next = step(pos, dir, grid);
    if grid.is_wall(next) {
        pos
    } else {
        next
    }
}

/// Moves out of `pos` that are not blocked by a wall.
pub fn open_moves(pos: Position, grid: &Grid) -> impl Iterator<Item = (Direction, Position)> + '_ {
    Direction::ALL.into_iter().filter_map(move |dir| {
        let next = step(pos, dir, grid);
        (!grid.is_wall(next)).then_some((dir, next))
    })
}
