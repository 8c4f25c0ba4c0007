use std::io;
use std::path::PathBuf;

use crate::components::Position;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("position ({row}, {col}) is outside the {rows}x{cols} maze")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
}

/// Fatal problems with the maze description. The game cannot start without a grid.
#[derive(Debug, thiserror::Error)]
pub enum MazeError {
    #[error("failed to read maze file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("maze has no rows")]
    Empty,
    #[error("maze row {row} has length {found}, expected {expected}")]
    Malformed {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown maze character {ch:?} at row {row}, column {col}")]
    UnknownCell { row: usize, col: usize, ch: char },
    #[error("maze has no player spawn 'P'")]
    MissingPlayer,
    #[error("maze has a second player spawn at {second:?} (first at {first:?})")]
    DuplicatePlayer { first: Position, second: Position },
}

/// Problems with the glyph configuration. Never fatal: defaults are kept.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
