//! Shortest-path reachability over a [`RasterGraph`].

use std::collections::{HashMap, VecDeque};

use tracing::debug;

use crate::raster::{Pixel, RasterGraph};

/// One shortest path from `start` to `end`, both included.
///
/// Returns `None` when either endpoint is not a path pixel or the two lie in
/// disconnected regions.
pub fn solve(graph: &RasterGraph, start: Pixel, end: Pixel) -> Option<Vec<Pixel>> {
    if !graph.contains(start) || !graph.contains(end) {
        debug!(?start, ?end, "endpoint is not a path pixel");
        return None;
    }

    let mut parent: HashMap<Pixel, Pixel> = HashMap::new();
    let mut q = VecDeque::new();
    parent.insert(start, start);
    q.push_back(start);

    while let Some(pixel) = q.pop_front() {
        if pixel == end {
            break;
        }
        for &next in graph.neighbors(pixel) {
            if !parent.contains_key(&next) {
                parent.insert(next, pixel);
                q.push_back(next);
            }
        }
    }

    if !parent.contains_key(&end) {
        debug!(?start, ?end, explored = parent.len(), "no path");
        return None;
    }

    let mut path = vec![end];
    let mut current = end;
    while current != start {
        current = parent[&current];
        path.push(current);
    }
    path.reverse();
    debug!(?start, ?end, steps = path.len() - 1, "path found");
    Some(path)
}

/// Conventional maze endpoints: one pixel in from the top-left and
/// bottom-right corners. `None` for images smaller than 3x3.
pub fn maze_endpoints(height: usize, width: usize) -> Option<(Pixel, Pixel)> {
    if height < 3 || width < 3 {
        return None;
    }
    Some(((1, 1), (height - 2, width - 2)))
}
