use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor};
use crossterm::terminal::{Clear, ClearType};
use crossterm::QueueableCommand;
use unicode_width::UnicodeWidthStr;

use crate::config::Glyphs;
use crate::game::{GameState, Outcome};
use crate::level::Tile;

/// Receives a picture of the game once per tick, plus the final result.
pub trait RenderSink {
    fn render(&mut self, state: &GameState) -> io::Result<()>;

    fn render_outcome(&mut self, state: &GameState, outcome: Outcome) -> io::Result<()>;
}

/// Draws nothing; counts what it was asked to draw.
#[derive(Debug, Default)]
pub struct NullSink {
    pub frames: usize,
    pub outcomes: Vec<Outcome>,
}

impl RenderSink for NullSink {
    fn render(&mut self, _state: &GameState) -> io::Result<()> {
        self.frames += 1;
        Ok(())
    }

    fn render_outcome(&mut self, _state: &GameState, outcome: Outcome) -> io::Result<()> {
        self.outcomes.push(outcome);
        Ok(())
    }
}

pub struct TerminalRenderer<W> {
    out: W,
    glyphs: Glyphs,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, glyphs: Glyphs) -> Self {
        Self { out, glyphs }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Terminal coordinates are `u16`; anything past that cannot be addressed.
fn coord(value: usize) -> io::Result<u16> {
    u16::try_from(value).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("terminal coordinate {value} out of range"),
        )
    })
}

fn move_to(out: &mut impl Write, row: usize, col: usize, cell_w: usize) -> io::Result<()> {
    let x = col.checked_mul(cell_w).unwrap_or(usize::MAX);
    out.queue(MoveTo(coord(x)?, coord(row)?))?;
    Ok(())
}

/// Prints a glyph and pads it out to the cell width.
fn put(out: &mut impl Write, text: &str, cell_w: usize) -> io::Result<()> {
    out.queue(Print(text))?;
    for _ in UnicodeWidthStr::width(text)..cell_w {
        out.queue(Print(' '))?;
    }
    Ok(())
}

fn status_row(state: &GameState) -> io::Result<u16> {
    coord(state.grid.rows().saturating_add(1))
}

impl<W: Write> RenderSink for TerminalRenderer<W> {
    fn render(&mut self, state: &GameState) -> io::Result<()> {
        let cell_w = self.glyphs.cell_width();
        let glyphs = &self.glyphs;
        let out = &mut self.out;
        out.queue(Clear(ClearType::All))?;

        for (row, tiles) in state.grid.iter_rows().enumerate() {
            move_to(out, row, 0, cell_w)?;
            for tile in tiles {
                match tile {
                    Tile::Wall => {
                        out.queue(SetBackgroundColor(Color::Blue))?;
                        put(out, &glyphs.wall, cell_w)?;
                        out.queue(ResetColor)?;
                    }
                    Tile::Pellet => put(out, &glyphs.dot, cell_w)?,
                    Tile::Power => put(out, &glyphs.pill, cell_w)?,
                    Tile::Empty | Tile::PlayerSpawn | Tile::GhostSpawn => {
                        put(out, &glyphs.space, cell_w)?
                    }
                }
            }
        }

        let player = state.player.pos;
        move_to(out, player.row, player.col, cell_w)?;
        put(out, &glyphs.player, cell_w)?;
        for ghost in &state.ghosts {
            move_to(out, ghost.row, ghost.col, cell_w)?;
            put(out, &glyphs.ghost, cell_w)?;
        }

        out.queue(MoveTo(0, status_row(state)?))?;
        out.queue(Print(format!(
            "Score: {}    Lives: {}",
            state.player.score, state.player.lives
        )))?;
        out.flush()
    }

    fn render_outcome(&mut self, state: &GameState, outcome: Outcome) -> io::Result<()> {
        let cell_w = self.glyphs.cell_width();
        let message = match outcome {
            Outcome::Won => "You win!",
            Outcome::Lost => {
                let player = state.player.pos;
                move_to(&mut self.out, player.row, player.col, cell_w)?;
                put(&mut self.out, &self.glyphs.death, cell_w)?;
                "Game over"
            }
        };
        let row = status_row(state)?;
        self.out.queue(MoveTo(0, row.saturating_add(1)))?;
        self.out.queue(Print(format!(
            "{message} - final score: {}",
            state.player.score
        )))?;
        self.out.queue(MoveTo(0, row.saturating_add(2)))?;
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Player, Position};
    use crate::level::{Grid, Level};

    fn state() -> GameState {
        GameState::new(Level::parse("#P.\n X#\nG  \n").unwrap(), 2)
    }

    fn ansi<C: crossterm::Command>(command: C) -> String {
        let mut s = String::new();
        command.write_ansi(&mut s).unwrap();
        s
    }

    fn draw(glyphs: Glyphs, outcome: Option<Outcome>) -> String {
        let mut renderer = TerminalRenderer::new(Vec::new(), glyphs);
        let state = state();
        renderer.render(&state).unwrap();
        if let Some(outcome) = outcome {
            renderer.render_outcome(&state, outcome).unwrap();
        }
        String::from_utf8(renderer.into_inner()).unwrap()
    }

    #[test]
    fn frame_has_actors_and_status_line() {
        let out = draw(Glyphs::default(), None);
        assert!(out.starts_with(&ansi(Clear(ClearType::All))));
        assert!(out.contains(&format!("{}P", ansi(MoveTo(1, 0)))));
        assert!(out.contains(&format!("{}G", ansi(MoveTo(0, 2)))));
        assert!(out.contains("Score: 0    Lives: 2"));
        assert!(out.contains(&ansi(SetBackgroundColor(Color::Blue))));
    }

    #[test]
    fn double_width_doubles_columns_and_pads() {
        let glyphs = Glyphs {
            player: "@".into(),
            use_emoji: true,
            ..Glyphs::default()
        };
        let out = draw(glyphs, None);
        assert!(out.contains(&format!("{}@ ", ansi(MoveTo(2, 0)))));
    }

    #[test]
    fn losing_marks_the_player_cell() {
        let out = draw(Glyphs::default(), Some(Outcome::Lost));
        assert!(out.contains(&format!("{}S", ansi(MoveTo(1, 0)))));
        assert!(out.contains("Game over - final score: 0"));
    }

    #[test]
    fn oversized_maze_is_an_error_not_a_wrap() {
        let glyphs = Glyphs {
            use_emoji: true,
            ..Glyphs::default()
        };
        let state = GameState {
            grid: Grid::open(1, 40_000),
            player: Player::new(Position::new(0, 39_999), 1, 1),
            ghosts: vec![],
        };
        let mut renderer = TerminalRenderer::new(Vec::new(), glyphs);
        let err = renderer.render(&state).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn winning_prints_a_message() {
        let out = draw(Glyphs::default(), Some(Outcome::Won));
        assert!(out.contains("You win! - final score: 0"));
    }
}
