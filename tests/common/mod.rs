use mazes::{Algorithm, Grid};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// A freshly carved maze for the given seed.
pub fn carved(algorithm: Algorithm, rows: usize, cols: usize, seed: u64) -> Grid {
    let mut grid = Grid::new(rows, cols).expect("valid dimensions");
    algorithm.carve(&mut grid, &mut StdRng::seed_from_u64(seed));
    grid
}

/// '.' is path, anything else is wall.
#[allow(dead_code)]
pub fn bitmap(rows: &[&str]) -> Vec<Vec<bool>> {
    rows.iter()
        .map(|row| row.chars().map(|ch| ch == '.').collect())
        .collect()
}
