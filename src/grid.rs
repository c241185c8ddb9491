//! Rectangular grid of cells and the passage (link) relation between them.
//!
//! Neighbours are never stored: they are derived from a cell's coordinate and
//! the grid bounds on every lookup. Each cell only records which of its four
//! walls have been carved away, so the grid is the single owner of all state.

use std::fmt;

use rand::Rng;

use crate::error::{MazeError, Result};

/// Position of a cell. Rows grow southwards, columns grow eastwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Coord { row, col }
    }
}

impl From<(usize, usize)> for Coord {
    fn from((row, col): (usize, usize)) -> Self {
        Coord { row, col }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    /// (row, col) offset of one step in this direction.
    fn delta(self) -> (isize, isize) {
        match self {
            Direction::North => (-1, 0),
            Direction::South => (1, 0),
            Direction::East => (0, 1),
            Direction::West => (0, -1),
        }
    }

    fn bit(self) -> u8 {
        match self {
            Direction::North => 0b0001,
            Direction::South => 0b0010,
            Direction::East => 0b0100,
            Direction::West => 0b1000,
        }
    }
}

/// One grid position and the walls carved out of it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    row: usize,
    col: usize,
    links: u8,
}

impl Cell {
    fn new(row: usize, col: usize) -> Self {
        Cell { row, col, links: 0 }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn coord(&self) -> Coord {
        Coord::new(self.row, self.col)
    }

    /// Whether a passage leads out of this cell in `direction`.
    pub fn is_open(&self, direction: Direction) -> bool {
        self.links & direction.bit() != 0
    }

    pub fn open_directions(&self) -> impl Iterator<Item = Direction> + '_ {
        Direction::ALL.into_iter().filter(move |d| self.is_open(*d))
    }

    pub fn link_count(&self) -> usize {
        self.links.count_ones() as usize
    }

    /// No passage has been carved through this cell yet.
    pub fn is_unvisited(&self) -> bool {
        self.links == 0
    }
}

/// A fixed-size `rows x cols` maze grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(MazeError::InvalidDimensions { rows, cols });
        }

        let mut cells = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                cells.push(Cell::new(row, col));
            }
        }

        Ok(Grid { rows, cols, cells })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn size(&self) -> usize {
        self.cells.len()
    }

    pub fn contains(&self, coord: Coord) -> bool {
        coord.row < self.rows && coord.col < self.cols
    }

    pub fn cell(&self, coord: Coord) -> Option<&Cell> {
        self.index(coord).map(|i| &self.cells[i])
    }

    /// Cells one row at a time, north to south.
    pub fn each_row(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.cols)
    }

    /// Cells in row-major order.
    pub fn each_cell(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.cells.iter()
    }

    pub fn neighbor(&self, coord: Coord, direction: Direction) -> Option<Coord> {
        if !self.contains(coord) {
            return None;
        }
        let (dr, dc) = direction.delta();
        let next = Coord::new(
            coord.row.checked_add_signed(dr)?,
            coord.col.checked_add_signed(dc)?,
        );
        self.contains(next).then_some(next)
    }

    /// Every neighbour that exists, in north, south, east, west order.
    pub fn neighbors(&self, coord: Coord) -> Vec<Coord> {
        Direction::ALL
            .into_iter()
            .filter_map(|d| self.neighbor(coord, d))
            .collect()
    }

    /// Direction leading from `from` to `to` when they share a wall.
    pub fn direction_between(&self, from: Coord, to: Coord) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|d| self.neighbor(from, *d) == Some(to))
    }

    /// Carves a passage between two adjacent cells.
    pub fn link(&mut self, a: Coord, b: Coord) -> Result<()> {
        self.require(a)?;
        self.require(b)?;
        let direction = self
            .direction_between(a, b)
            .ok_or(MazeError::NotAdjacent { from: a, to: b })?;
        self.set_link(a, direction, true);
        Ok(())
    }

    /// Removes the passage between `a` and `b`, if any.
    pub fn unlink(&mut self, a: Coord, b: Coord) -> Result<()> {
        self.require(a)?;
        self.require(b)?;
        if let Some(direction) = self.direction_between(a, b) {
            self.set_link(a, direction, false);
        }
        Ok(())
    }

    pub fn is_linked(&self, a: Coord, b: Coord) -> bool {
        match (self.cell(a), self.direction_between(a, b)) {
            (Some(cell), Some(direction)) => cell.is_open(direction),
            _ => false,
        }
    }

    /// Cells reachable from `coord` through a single passage.
    pub fn links(&self, coord: Coord) -> Vec<Coord> {
        match self.cell(coord) {
            Some(cell) => cell
                .open_directions()
                .filter_map(|d| self.neighbor(coord, d))
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Coord {
        self.cells[rng.gen_range(0..self.cells.len())].coord()
    }

    /// Cells with exactly one passage.
    pub fn dead_ends(&self) -> Vec<Coord> {
        self.cells
            .iter()
            .filter(|c| c.link_count() == 1)
            .map(Cell::coord)
            .collect()
    }

    pub fn clear_links(&mut self) {
        for cell in &mut self.cells {
            cell.links = 0;
        }
    }

    /// Links `at` with its neighbour in `direction`, returning that neighbour.
    pub(crate) fn link_toward(&mut self, at: Coord, direction: Direction) -> Option<Coord> {
        self.set_link(at, direction, true)
    }

    fn set_link(&mut self, at: Coord, direction: Direction, open: bool) -> Option<Coord> {
        let other = self.neighbor(at, direction)?;
        let (i, j) = (self.index(at)?, self.index(other)?);
        if open {
            self.cells[i].links |= direction.bit();
            self.cells[j].links |= direction.opposite().bit();
        } else {
            self.cells[i].links &= !direction.bit();
            self.cells[j].links &= !direction.opposite().bit();
        }
        Some(other)
    }

    fn index(&self, coord: Coord) -> Option<usize> {
        self.contains(coord).then(|| coord.row * self.cols + coord.col)
    }

    fn require(&self, coord: Coord) -> Result<()> {
        if self.contains(coord) {
            Ok(())
        } else {
            Err(MazeError::CellNotInGrid { coord })
        }
    }
}
