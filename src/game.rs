use std::thread;
use std::time::Duration;

use crate::components::{Player, Position};
use crate::ghost::AdversaryPolicy;
use crate::input::{Command, InputSource};
use crate::level::{Grid, Level, Pickup};
use crate::movement::resolve;
use crate::player::{collect_item, outcome, resolve_contacts};
use crate::render::RenderSink;

pub const DEFAULT_TICK_MS: u64 = 100;
pub const DEFAULT_LIVES: u32 = 1;

/// Everything the simulation mutates. Owned by the loop and lent to each
/// component in turn.
#[derive(Debug, Clone)]
pub struct GameState {
    pub grid: Grid,
    pub player: Player,
    pub ghosts: Vec<Position>,
}

impl GameState {
    pub fn new(level: Level, lives: u32) -> Self {
        let items_left = level.grid.count_items();
        Self {
            player: Player::new(level.player_start, lives, items_left),
            ghosts: level.ghost_starts,
            grid: level.grid,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Won,
    Lost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    Won,
    Lost,
}

impl From<Outcome> for GameStatus {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Won => GameStatus::Won,
            Outcome::Lost => GameStatus::Lost,
        }
    }
}

/// The tick driver. Owns the state plus its three collaborators.
pub struct Game<P, I, S> {
    state: GameState,
    policy: P,
    input: I,
    sink: S,
    status: GameStatus,
    tick: Duration,
    ticks: u64,
}

impl<P, I, S> Game<P, I, S>
where
    P: AdversaryPolicy,
    I: InputSource,
    S: RenderSink,
{
    pub fn new(state: GameState, policy: P, input: I, sink: S) -> Self {
        Self {
            state,
            policy,
            input,
            sink,
            status: GameStatus::Running,
            tick: Duration::from_millis(DEFAULT_TICK_MS),
            ticks: 0,
        }
    }

    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Advances one tick and returns the status afterwards. Does nothing once
    /// the game is over.
    pub fn step(&mut self) -> GameStatus {
        if self.status != GameStatus::Running {
            return self.status;
        }
        self.ticks += 1;

        match self.input.try_next() {
            Some(Command::Quit) => {
                tracing::info!(tick = self.ticks, "quit requested");
                self.state.player.lives = 0;
            }
            Some(Command::Move(dir)) => {
                let player = &mut self.state.player;
                player.pos = resolve(player.pos, dir, &self.state.grid);
                let pickup = collect_item(&mut self.state);
                if pickup != Pickup::None {
                    tracing::debug!(
                        ?pickup,
                        score = self.state.player.score,
                        items_left = self.state.player.items_left,
                        "item collected"
                    );
                }
            }
            None => {}
        }

        for idx in 0..self.state.ghosts.len() {
            let ghost = self.state.ghosts[idx];
            let dir = self.policy.next_direction(ghost, &self.state);
            self.state.ghosts[idx] = resolve(ghost, dir, &self.state.grid);
        }

        let hits = resolve_contacts(&mut self.state);
        if hits > 0 {
            tracing::debug!(hits, lives = self.state.player.lives, "caught by ghost");
        }

        if let Err(e) = self.sink.render(&self.state) {
            tracing::warn!(error = %e, "failed to draw frame");
        }

        tracing::trace!(
            tick = self.ticks,
            score = self.state.player.score,
            lives = self.state.player.lives,
            items_left = self.state.player.items_left,
            "tick"
        );

        if let Some(outcome) = outcome(&self.state) {
            self.status = outcome.into();
            tracing::info!(
                ?outcome,
                tick = self.ticks,
                score = self.state.player.score,
                "game over"
            );
            if let Err(e) = self.sink.render_outcome(&self.state, outcome) {
                tracing::warn!(error = %e, "failed to draw final screen");
            }
        }
        self.status
    }

    /// Runs ticks at the configured cadence until the game is decided.
    pub fn run(&mut self) -> Outcome {
        loop {
            match self.step() {
                GameStatus::Won => return Outcome::Won,
                GameStatus::Lost => return Outcome::Lost,
                GameStatus::Running => thread::sleep(self.tick),
            }
        }
    }
}
