//! A terminal maze chase: eat every item before the ghosts catch you.
//!
//! The simulation lives in [`game::Game`], which owns a [`game::GameState`]
//! and ticks it against an [`input::InputSource`], an
//! [`ghost::AdversaryPolicy`] and a [`render::RenderSink`].

pub mod components;
pub mod config;
pub mod error;
pub mod game;
pub mod ghost;
pub mod input;
pub mod level;
pub mod movement;
pub mod player;
pub mod render;
pub mod terminal;

pub use components::{Direction, Player, Position};
pub use error::{ConfigError, GridError, MazeError};
pub use game::{Game, GameState, GameStatus, Outcome};
pub use level::{Grid, Level, Pickup, Tile};
