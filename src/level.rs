use std::fs;
use std::path::Path;

use crate::components::Position;
use crate::error::{GridError, MazeError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Wall,
    Empty,
    Pellet,
    Power,
    PlayerSpawn,
    GhostSpawn,
}

impl Tile {
    pub fn from_char(ch: char) -> Option<Tile> {
        match ch {
            '#' => Some(Tile::Wall),
            ' ' => Some(Tile::Empty),
            '.' => Some(Tile::Pellet),
            'X' => Some(Tile::Power),
            'P' => Some(Tile::PlayerSpawn),
            'G' => Some(Tile::GhostSpawn),
            _ => None,
        }
    }

    pub fn is_item(self) -> bool {
        matches!(self, Tile::Pellet | Tile::Power)
    }
}

/// What the player picked up from a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pickup {
    None,
    Pellet,
    Power,
}

/// Rectangular maze. Its shape never changes after construction; the only
/// mutation is an item cell turning empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    tiles: Vec<Vec<Tile>>,
}

impl Grid {
    pub fn new(tiles: Vec<Vec<Tile>>) -> Result<Self, MazeError> {
        let rows = tiles.len();
        let cols = tiles.first().map(Vec::len).ok_or(MazeError::Empty)?;
        if cols == 0 {
            return Err(MazeError::Empty);
        }
        for (row, line) in tiles.iter().enumerate() {
            if line.len() != cols {
                return Err(MazeError::Malformed {
                    row,
                    expected: cols,
                    found: line.len(),
                });
            }
        }
        Ok(Self { rows, cols, tiles })
    }

    /// An all-empty grid, handy for open-field setups.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero; such a grid has no cell to wrap onto.
    pub fn open(rows: usize, cols: usize) -> Self {
        assert!(rows > 0 && cols > 0, "grid dimensions must be non-zero");
        Self {
            rows,
            cols,
            tiles: vec![vec![Tile::Empty; cols]; rows],
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cell_at(&self, pos: Position) -> Result<Tile, GridError> {
        self.tiles
            .get(pos.row)
            .and_then(|line| line.get(pos.col))
            .copied()
            .ok_or(GridError::OutOfBounds {
                row: pos.row,
                col: pos.col,
                rows: self.rows,
                cols: self.cols,
            })
    }

    pub fn is_wall(&self, pos: Position) -> bool {
        matches!(self.cell_at(pos), Ok(Tile::Wall))
    }

    /// Replaces an item under `pos` with empty floor and reports what it was.
    /// Any other cell is left alone.
    pub fn consume_item(&mut self, pos: Position) -> Pickup {
        let Some(tile) = self
            .tiles
            .get_mut(pos.row)
            .and_then(|line| line.get_mut(pos.col))
        else {
            return Pickup::None;
        };
        let pickup = match *tile {
            Tile::Pellet => Pickup::Pellet,
            Tile::Power => Pickup::Power,
            _ => return Pickup::None,
        };
        *tile = Tile::Empty;
        pickup
    }

    pub fn count_items(&self) -> usize {
        self.tiles
            .iter()
            .flat_map(|line| line.iter())
            .filter(|tile| tile.is_item())
            .count()
    }

    #[cfg(test)]
    pub(crate) fn place(&mut self, pos: Position, tile: Tile) -> Result<(), GridError> {
        let (rows, cols) = (self.rows, self.cols);
        let cell = self
            .tiles
            .get_mut(pos.row)
            .and_then(|line| line.get_mut(pos.col))
            .ok_or(GridError::OutOfBounds {
                row: pos.row,
                col: pos.col,
                rows,
                cols,
            })?;
        *cell = tile;
        Ok(())
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[Tile]> {
        self.tiles.iter().map(Vec::as_slice)
    }
}

/// A parsed maze together with its spawn markers.
#[derive(Debug, Clone)]
pub struct Level {
    pub grid: Grid,
    pub player_start: Position,
    pub ghost_starts: Vec<Position>,
}

impl Level {
    pub fn load(path: &Path) -> Result<Self, MazeError> {
        let text = fs::read_to_string(path).map_err(|source| MazeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self, MazeError> {
        let mut lines: Vec<&str> = text
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .collect();
        if lines.last().is_some_and(|line| line.is_empty()) {
            lines.pop();
        }

        let mut tiles = Vec::with_capacity(lines.len());
        let mut player_start = None;
        let mut ghost_starts = Vec::new();
        for (row, line) in lines.iter().enumerate() {
            let mut cells = Vec::with_capacity(line.len());
            for (col, ch) in line.chars().enumerate() {
                let tile = Tile::from_char(ch).ok_or(MazeError::UnknownCell { row, col, ch })?;
                let pos = Position::new(row, col);
                match tile {
                    Tile::PlayerSpawn => {
                        if let Some(first) = player_start {
                            return Err(MazeError::DuplicatePlayer { first, second: pos });
                        }
                        player_start = Some(pos);
                    }
                    Tile::GhostSpawn => ghost_starts.push(pos),
                    _ => {}
                }
                cells.push(tile);
            }
            tiles.push(cells);
        }

        let grid = Grid::new(tiles)?;
        let player_start = player_start.ok_or(MazeError::MissingPlayer)?;
        Ok(Self {
            grid,
            player_start,
            ghost_starts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const MAZE: &str = "#####\n#P.X#\n#.G.#\n#####\n";

    #[test]
    fn parses_spawns_and_items() {
        let level = Level::parse(MAZE).unwrap();
        assert_eq!(level.grid.rows(), 4);
        assert_eq!(level.grid.cols(), 5);
        assert_eq!(level.player_start, Position::new(1, 1));
        assert_eq!(level.ghost_starts, vec![Position::new(2, 2)]);
        assert_eq!(level.grid.count_items(), 4);
        assert_eq!(level.grid.cell_at(Position::new(1, 1)), Ok(Tile::PlayerSpawn));
    }

    #[test]
    fn accepts_crlf_line_endings() {
        let level = Level::parse("P.\r\n.G\r\n").unwrap();
        assert_eq!(level.grid.cols(), 2);
        assert_eq!(level.ghost_starts.len(), 1);
    }

    #[rstest]
    #[case("", "no rows")]
    #[case("P..\n..\n", "row 1 has length 2")]
    #[case("P.\n.?\n", "unknown maze character")]
    #[case("..\n..\n", "no player spawn")]
    #[case("P.\n.P\n", "second player spawn")]
    fn rejects_bad_mazes(#[case] text: &str, #[case] message: &str) {
        let err = Level::parse(text).unwrap_err();
        assert!(
            err.to_string().contains(message),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn consuming_twice_is_a_no_op_the_second_time() {
        let mut grid = Level::parse(MAZE).unwrap().grid;
        let pellet = Position::new(1, 2);
        assert_eq!(grid.consume_item(pellet), Pickup::Pellet);
        assert_eq!(grid.consume_item(pellet), Pickup::None);
        assert_eq!(grid.cell_at(pellet), Ok(Tile::Empty));

        let power = Position::new(1, 3);
        assert_eq!(grid.consume_item(power), Pickup::Power);
        assert_eq!(grid.consume_item(power), Pickup::None);
    }

    #[rstest]
    #[case(Position::new(0, 0))]
    #[case(Position::new(1, 1))]
    #[case(Position::new(2, 2))]
    fn consuming_non_items_changes_nothing(#[case] pos: Position) {
        let mut grid = Level::parse(MAZE).unwrap().grid;
        let before = grid.clone();
        assert_eq!(grid.consume_item(pos), Pickup::None);
        assert_eq!(grid, before);
    }

    #[test]
    fn grid_only_ever_loses_items() {
        let mut grid = Level::parse(MAZE).unwrap().grid;
        let walls_before: Vec<Vec<bool>> = grid
            .iter_rows()
            .map(|line| line.iter().map(|tile| *tile == Tile::Wall).collect())
            .collect();
        let mut items = grid.count_items();
        for row in 0..grid.rows() {
            for col in 0..grid.cols() {
                grid.consume_item(Position::new(row, col));
                let now = grid.count_items();
                assert!(now <= items);
                items = now;
            }
        }
        assert_eq!(items, 0);
        let walls_after: Vec<Vec<bool>> = grid
            .iter_rows()
            .map(|line| line.iter().map(|tile| *tile == Tile::Wall).collect())
            .collect();
        assert_eq!(walls_after, walls_before);
        assert_eq!((grid.rows(), grid.cols()), (4, 5));
    }

    #[rstest]
    #[case(0, 3)]
    #[case(3, 0)]
    #[should_panic(expected = "grid dimensions must be non-zero")]
    fn open_rejects_empty_dimensions(#[case] rows: usize, #[case] cols: usize) {
        Grid::open(rows, cols);
    }

    #[test]
    fn out_of_bounds_lookup_reports_dimensions() {
        let grid = Grid::open(2, 3);
        assert_eq!(
            grid.cell_at(Position::new(2, 0)),
            Err(GridError::OutOfBounds {
                row: 2,
                col: 0,
                rows: 2,
                cols: 3
            })
        );
    }
}
