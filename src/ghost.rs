use std::collections::VecDeque;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::components::{Direction, Position};
use crate::game::GameState;
use crate::level::Grid;
use crate::movement::{open_moves, step};

/// Chooses where a ghost tries to go each tick. Called once per ghost per
/// tick; the answer is always one of the four directions, walls are the
/// resolver's business.
pub trait AdversaryPolicy {
    fn next_direction(&mut self, ghost: Position, state: &GameState) -> Direction;
}

impl<P: AdversaryPolicy + ?Sized> AdversaryPolicy for Box<P> {
    fn next_direction(&mut self, ghost: Position, state: &GameState) -> Direction {
        (**self).next_direction(ghost, state)
    }
}

fn random_direction(rng: &mut impl Rng) -> Direction {
    match rng.gen_range(0..4) {
        0 => Direction::Up,
        1 => Direction::Down,
        2 => Direction::Left,
        _ => Direction::Right,
    }
}

/// Uniform random wandering with no memory.
pub struct RandomPolicy<R> {
    rng: R,
}

impl<R: Rng> RandomPolicy<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> AdversaryPolicy for RandomPolicy<R> {
    fn next_direction(&mut self, _ghost: Position, _state: &GameState) -> Direction {
        random_direction(&mut self.rng)
    }
}

/// Follows the shortest path to the player, breaking ties at random.
pub struct ChasePolicy<R> {
    rng: R,
}

impl<R: Rng> ChasePolicy<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> AdversaryPolicy for ChasePolicy<R> {
    fn next_direction(&mut self, ghost: Position, state: &GameState) -> Direction {
        // Recomputed per ghost; mazes are small enough that this never shows up.
        let dist = bfs_distance(&state.grid, state.player.pos);
        let here = dist[ghost.row][ghost.col];
        let mut options = Vec::new();
        let mut best = i32::MAX;
        for (dir, next) in open_moves(ghost, &state.grid) {
            let d = dist[next.row][next.col];
            if d < 0 || (here >= 0 && d >= here) {
                continue;
            }
            if d < best {
                best = d;
                options.clear();
                options.push(dir);
            } else if d == best {
                options.push(dir);
            }
        }
        match options.choose(&mut self.rng) {
            Some(dir) => *dir,
            None => random_direction(&mut self.rng),
        }
    }
}

/// Steps from `start` to every reachable cell, `-1` where unreachable.
pub fn bfs_distance(grid: &Grid, start: Position) -> Vec<Vec<i32>> {
    let mut dist = vec![vec![-1; grid.cols()]; grid.rows()];
    let mut q = VecDeque::new();
    dist[start.row][start.col] = 0;
    q.push_back(start);

    while let Some(pos) = q.pop_front() {
        let base = dist[pos.row][pos.col];
        for dir in Direction::ALL {
            let next = step(pos, dir, grid);
            if grid.is_wall(next) {
                continue;
            }
            if dist[next.row][next.col] == -1 {
                dist[next.row][next.col] = base + 1;
                q.push_back(next);
            }
        }
    }
    dist
}

/// Replays a fixed cycle of directions, shared by every ghost in turn.
#[derive(Debug, Clone)]
pub struct ScriptedPolicy {
    moves: Vec<Direction>,
    next: usize,
}

impl ScriptedPolicy {
    /// `None` for an empty script: there would be nothing to replay.
    pub fn new(moves: Vec<Direction>) -> Option<Self> {
        (!moves.is_empty()).then_some(Self { moves, next: 0 })
    }
}

impl AdversaryPolicy for ScriptedPolicy {
    fn next_direction(&mut self, _ghost: Position, _state: &GameState) -> Direction {
        let dir = self.moves[self.next % self.moves.len()];
        self.next += 1;
        dir
    }
}

/// Ghost behaviours selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum PolicyKind {
    #[default]
    Random,
    Chase,
}

impl PolicyKind {
    pub fn build<R: Rng + 'static>(self, rng: R) -> Box<dyn AdversaryPolicy> {
        match self {
            PolicyKind::Random => Box::new(RandomPolicy::new(rng)),
            PolicyKind::Chase => Box::new(ChasePolicy::new(rng)),
        }
    }
}
