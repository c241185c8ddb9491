//! Passage carving algorithms.
//!
//! Every generator takes the grid exclusively and draws all randomness from
//! the caller's [`Rng`], so a seeded generator always carves the same maze.
//! None of them clear existing passages first.

use std::fmt;
use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::error::MazeError;
use crate::grid::{Coord, Direction, Grid};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Algorithm {
    #[default]
    BinaryTree,
    Sidewinder,
    AldousBroder,
    Wilsons,
    Dfs,
}

impl Algorithm {
    pub const ALL: [Algorithm; 5] = [
        Algorithm::BinaryTree,
        Algorithm::Sidewinder,
        Algorithm::AldousBroder,
        Algorithm::Wilsons,
        Algorithm::Dfs,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::BinaryTree => "binary-tree",
            Algorithm::Sidewinder => "sidewinder",
            Algorithm::AldousBroder => "aldous-broder",
            Algorithm::Wilsons => "wilsons",
            Algorithm::Dfs => "dfs",
        }
    }

    pub fn carve(self, grid: &mut Grid, rng: &mut impl Rng) {
        match self {
            Algorithm::BinaryTree => binary_tree(grid, rng),
            Algorithm::Sidewinder => sidewinder(grid, rng),
            Algorithm::AldousBroder => aldous_broder(grid, rng),
            Algorithm::Wilsons => wilsons(grid, rng),
            Algorithm::Dfs => dfs(grid, rng),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Algorithm::ALL
            .into_iter()
            .find(|a| a.name() == wanted)
            .ok_or_else(|| MazeError::UnknownAlgorithm(s.to_string()))
    }
}

/// Links every cell to its north or east neighbour, chosen uniformly.
///
/// Cells are visited row by row from the top-left. The north-east corner has
/// neither candidate and initiates nothing, which leaves unbroken corridors
/// along the top row and the east column.
pub fn binary_tree(grid: &mut Grid, rng: &mut impl Rng) {
    let mut carved = 0;
    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            let coord = Coord::new(row, col);
            let candidates = existing(grid, coord, &[Direction::North, Direction::East]);
            if candidates.is_empty() {
                continue;
            }
            let direction = candidates[rng.gen_range(0..candidates.len())];
            if grid.link_toward(coord, direction).is_some() {
                carved += 1;
            }
        }
    }
    debug!(rows = grid.rows(), cols = grid.cols(), carved, "binary tree done");
}

/// Carves eastward runs per row, closing each run with one passage north
/// from a random member.
pub fn sidewinder(grid: &mut Grid, rng: &mut impl Rng) {
    let mut runs = 0;
    for row in 0..grid.rows() {
        let mut run: Vec<Coord> = Vec::new();
        for col in 0..grid.cols() {
            let coord = Coord::new(row, col);
            run.push(coord);

            let at_eastern_boundary = grid.neighbor(coord, Direction::East).is_none();
            let at_northern_boundary = grid.neighbor(coord, Direction::North).is_none();
            let close_out =
                at_eastern_boundary || (!at_northern_boundary && rng.gen_range(0..2) == 0);

            if close_out {
                if let Some(&member) = run.choose(rng) {
                    grid.link_toward(member, Direction::North);
                }
                run.clear();
                runs += 1;
            } else {
                grid.link_toward(coord, Direction::East);
            }
        }
    }
    debug!(rows = grid.rows(), cols = grid.cols(), runs, "sidewinder done");
}

/// Random walk that links into each cell the first time it is entered.
/// Produces a uniform spanning tree.
pub fn aldous_broder(grid: &mut Grid, rng: &mut impl Rng) {
    let mut cell = grid.random_cell(rng);
    let mut unvisited = grid.size() - 1;
    let mut steps = 0usize;

    while unvisited > 0 {
        let sides = existing(grid, cell, &Direction::ALL);
        let Some(&direction) = sides.choose(rng) else {
            break;
        };
        let Some(next) = grid.neighbor(cell, direction) else {
            break;
        };
        if grid.cell(next).map_or(false, |c| c.is_unvisited()) {
            grid.link_toward(cell, direction);
            unvisited -= 1;
        }
        cell = next;
        steps += 1;
    }
    debug!(rows = grid.rows(), cols = grid.cols(), steps, "aldous-broder done");
}

/// Loop-erased random walks from unvisited cells until they hit the maze.
/// Produces a uniform spanning tree.
pub fn wilsons(grid: &mut Grid, rng: &mut impl Rng) {
    let cols = grid.cols();
    let index = |c: Coord| c.row * cols + c.col;

    let mut in_maze = vec![false; grid.size()];
    let mut unvisited: Vec<Coord> = grid.each_cell().map(|c| c.coord()).collect();
    let pick = rng.gen_range(0..unvisited.len());
    let first = unvisited.swap_remove(pick);
    in_maze[index(first)] = true;

    let mut walks = 0;
    while let Some(&start) = unvisited.choose(rng) {
        let mut cell = start;
        let mut path = vec![cell];
        while !in_maze[index(cell)] {
            let Some(&next) = grid.neighbors(cell).choose(rng) else {
                return;
            };
            cell = next;
            match path.iter().position(|c| *c == cell) {
                Some(position) => path.truncate(position + 1),
                None => path.push(cell),
            }
        }

        for pair in path.windows(2) {
            if let Some(direction) = grid.direction_between(pair[0], pair[1]) {
                grid.link_toward(pair[0], direction);
            }
            in_maze[index(pair[0])] = true;
        }
        unvisited.retain(|c| !in_maze[index(*c)]);
        walks += 1;
    }
    debug!(rows = grid.rows(), cols = grid.cols(), walks, "wilson's done");
}

/// Recursive backtracker on an explicit stack: step to a random unvisited
/// neighbour, pop back at dead ends. Long winding corridors, few dead ends.
pub fn dfs(grid: &mut Grid, rng: &mut impl Rng) {
    let cols = grid.cols();
    let index = |c: Coord| c.row * cols + c.col;

    let mut visited = vec![false; grid.size()];
    let start = grid.random_cell(rng);
    visited[index(start)] = true;
    let mut stack = vec![start];

    let mut backtracks = 0;
    while let Some(&current) = stack.last() {
        let fresh: Vec<Coord> = grid
            .neighbors(current)
            .into_iter()
            .filter(|n| !visited[index(*n)])
            .collect();

        match fresh.choose(rng) {
            Some(&next) => {
                if let Some(direction) = grid.direction_between(current, next) {
                    grid.link_toward(current, direction);
                }
                visited[index(next)] = true;
                stack.push(next);
            }
            None => {
                stack.pop();
                backtracks += 1;
            }
        }
    }
    debug!(rows = grid.rows(), cols = grid.cols(), backtracks, "dfs done");
}

/// The subset of `candidates` that lead to a cell inside the grid.
fn existing(grid: &Grid, coord: Coord, candidates: &[Direction]) -> Vec<Direction> {
    candidates
        .iter()
        .copied()
        .filter(|d| grid.neighbor(coord, *d).is_some())
        .collect()
}
