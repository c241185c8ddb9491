//! Hop counts from a root cell, measured through carved passages only.

use tracing::debug;

use crate::error::{MazeError, Result};
use crate::grid::{Coord, Grid};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DistanceField {
    root: Coord,
    rows: usize,
    cols: usize,
    distances: Vec<Option<usize>>,
}

impl DistanceField {
    /// Breadth-first expansion from `root`, one frontier layer at a time.
    pub fn compute(grid: &Grid, root: Coord) -> Result<Self> {
        if !grid.contains(root) {
            return Err(MazeError::CellNotInGrid { coord: root });
        }

        let mut field = DistanceField {
            root,
            rows: grid.rows(),
            cols: grid.cols(),
            distances: vec![None; grid.size()],
        };
        field.set(root, 0);

        let mut frontier = vec![root];
        let mut layer = 0;
        while !frontier.is_empty() {
            let mut next_frontier = Vec::new();
            for cell in frontier {
                for linked in grid.links(cell) {
                    if field.get(linked).is_none() {
                        field.set(linked, layer + 1);
                        next_frontier.push(linked);
                    }
                }
            }
            frontier = next_frontier;
            layer += 1;
        }

        debug!(%root, reached = field.len(), layers = layer, "distance field computed");
        Ok(field)
    }

    pub fn root(&self) -> Coord {
        self.root
    }

    /// Distance of `coord` from the root, `None` when it cannot be reached.
    pub fn distance(&self, coord: Coord) -> Result<Option<usize>> {
        if coord.row < self.rows && coord.col < self.cols {
            Ok(self.get(coord))
        } else {
            Err(MazeError::CellNotInGrid { coord })
        }
    }

    /// Reached cells and their distances, row-major.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, usize)> + '_ {
        let cols = self.cols;
        self.distances
            .iter()
            .enumerate()
            .filter_map(move |(i, d)| d.map(|d| (Coord::new(i / cols, i % cols), d)))
    }

    /// Number of reached cells, root included.
    pub fn len(&self) -> usize {
        self.distances.iter().filter(|d| d.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The farthest reached cell; the first in row-major order on ties.
    pub fn max(&self) -> (Coord, usize) {
        self.iter().fold((self.root, 0), |best, (coord, d)| {
            if d > best.1 { (coord, d) } else { best }
        })
    }

    /// Breadcrumbs along one shortest route from the root to `goal`.
    ///
    /// The returned field only has entries for cells on that route, each
    /// keeping its distance from the root.
    pub fn path_to(&self, grid: &Grid, goal: Coord) -> Result<Option<DistanceField>> {
        let Some(mut current_distance) = self.distance(goal)? else {
            return Ok(None);
        };

        let mut breadcrumbs = DistanceField {
            root: self.root,
            rows: self.rows,
            cols: self.cols,
            distances: vec![None; self.distances.len()],
        };
        let mut current = goal;
        breadcrumbs.set(current, current_distance);

        while current != self.root {
            let Some(step) = grid
                .links(current)
                .into_iter()
                .find(|n| self.get(*n) == Some(current_distance - 1))
            else {
                // The grid changed since this field was computed.
                return Ok(None);
            };
            current = step;
            current_distance -= 1;
            breadcrumbs.set(current, current_distance);
        }

        Ok(Some(breadcrumbs))
    }

    fn get(&self, coord: Coord) -> Option<usize> {
        if coord.row < self.rows && coord.col < self.cols {
            self.distances[coord.row * self.cols + coord.col]
        } else {
            None
        }
    }

    fn set(&mut self, coord: Coord, distance: usize) {
        self.distances[coord.row * self.cols + coord.col] = Some(distance);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(row: usize, col: usize) -> Coord {
        Coord::new(row, col)
    }

    /// 3x3 serpentine: (0,0)->(0,1)->(0,2)->(1,2)->(1,1)->(1,0)->(2,0)->(2,1)->(2,2)
    fn serpentine() -> Grid {
        let mut grid = Grid::new(3, 3).unwrap();
        let order = [
            c(0, 0),
            c(0, 1),
            c(0, 2),
            c(1, 2),
            c(1, 1),
            c(1, 0),
            c(2, 0),
            c(2, 1),
            c(2, 2),
        ];
        for pair in order.windows(2) {
            grid.link(pair[0], pair[1]).unwrap();
        }
        grid
    }

    #[test]
    fn distances_follow_passages_not_geometry() {
        let grid = serpentine();
        let field = DistanceField::compute(&grid, c(0, 0)).unwrap();

        assert_eq!(field.distance(c(0, 0)), Ok(Some(0)));
        assert_eq!(field.distance(c(1, 0)), Ok(Some(5)));
        assert_eq!(field.distance(c(2, 2)), Ok(Some(8)));
        assert_eq!(field.len(), 9);
        assert_eq!(field.max(), (c(2, 2), 8));
    }

    #[test]
    fn root_outside_grid_is_rejected() {
        let grid = Grid::new(2, 2).unwrap();
        assert_eq!(
            DistanceField::compute(&grid, c(2, 0)),
            Err(MazeError::CellNotInGrid { coord: c(2, 0) })
        );
    }

    #[test]
    fn query_outside_grid_is_rejected() {
        let grid = Grid::new(2, 2).unwrap();
        let field = DistanceField::compute(&grid, c(0, 0)).unwrap();
        assert_eq!(
            field.distance(c(0, 9)),
            Err(MazeError::CellNotInGrid { coord: c(0, 9) })
        );
    }

    #[test]
    fn unreachable_cells_have_no_entry() {
        let mut grid = Grid::new(2, 3).unwrap();
        grid.link(c(0, 0), c(0, 1)).unwrap();
        grid.link(c(1, 1), c(1, 2)).unwrap();

        let field = DistanceField::compute(&grid, c(0, 0)).unwrap();
        assert_eq!(field.distance(c(0, 1)), Ok(Some(1)));
        assert_eq!(field.distance(c(1, 0)), Ok(None));
        assert_eq!(field.distance(c(1, 2)), Ok(None));
        assert_eq!(
            field.iter().collect::<Vec<_>>(),
            vec![(c(0, 0), 0), (c(0, 1), 1)]
        );
    }

    #[test]
    fn isolated_root_reaches_only_itself() {
        let grid = Grid::new(3, 3).unwrap();
        let field = DistanceField::compute(&grid, c(1, 1)).unwrap();
        assert_eq!(field.len(), 1);
        assert_eq!(field.max(), (c(1, 1), 0));
    }

    #[test]
    fn max_breaks_ties_in_row_major_order() {
        let mut grid = Grid::new(2, 2).unwrap();
        grid.link(c(0, 0), c(1, 0)).unwrap();
        grid.link(c(0, 0), c(0, 1)).unwrap();

        let field = DistanceField::compute(&grid, c(0, 0)).unwrap();
        assert_eq!(field.max(), (c(0, 1), 1));
    }

    #[test]
    fn path_to_keeps_only_the_route() {
        let mut grid = serpentine();
        // shortcut (0,1)-(1,1) makes (1,0) reachable in 3 hops
        grid.link(c(0, 1), c(1, 1)).unwrap();
        let field = DistanceField::compute(&grid, c(0, 0)).unwrap();

        let path = field.path_to(&grid, c(1, 0)).unwrap().unwrap();
        assert_eq!(
            path.iter().collect::<Vec<_>>(),
            vec![(c(0, 0), 0), (c(0, 1), 1), (c(1, 0), 3), (c(1, 1), 2)]
        );
    }

    #[test]
    fn path_to_unreachable_goal_is_none() {
        let grid = Grid::new(2, 2).unwrap();
        let field = DistanceField::compute(&grid, c(0, 0)).unwrap();
        assert_eq!(field.path_to(&grid, c(1, 1)), Ok(None));
        assert!(field.path_to(&grid, c(4, 4)).is_err());
    }
}
