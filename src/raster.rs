//! Undirected pixel graph built from a binarized maze image.

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::{MazeError, Result};

/// Pixel position as (row, col).
pub type Pixel = (usize, usize);

/// Path pixels and the 4-connected edges between them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RasterGraph {
    height: usize,
    width: usize,
    adjacency: BTreeMap<Pixel, Vec<Pixel>>,
    edges: Vec<(Pixel, Pixel)>,
}

impl RasterGraph {
    /// Builds the graph of `true` (path) pixels.
    ///
    /// Scanning row-major and only looking north and west registers every
    /// edge exactly once.
    pub fn build(binary: &[Vec<bool>]) -> Result<Self> {
        let height = binary.len();
        let width = binary.first().map_or(0, Vec::len);
        if height == 0 || width == 0 {
            return Err(MazeError::EmptyImage);
        }
        if let Some(row) = binary.iter().position(|r| r.len() != width) {
            return Err(MazeError::MalformedImage {
                reason: format!(
                    "row {} has {} pixels, expected {}",
                    row,
                    binary[row].len(),
                    width
                ),
            });
        }

        let mut graph = RasterGraph {
            height,
            width,
            ..Default::default()
        };
        for r in 0..height {
            for c in 0..width {
                if !binary[r][c] {
                    continue;
                }
                graph.adjacency.entry((r, c)).or_default();
                if r > 0 && binary[r - 1][c] {
                    graph.add_edge((r, c), (r - 1, c));
                }
                if c > 0 && binary[r][c - 1] {
                    graph.add_edge((r, c), (r, c - 1));
                }
            }
        }

        debug!(
            height,
            width,
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "raster graph built"
        );
        Ok(graph)
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn contains(&self, pixel: Pixel) -> bool {
        self.adjacency.contains_key(&pixel)
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn nodes(&self) -> impl Iterator<Item = Pixel> + '_ {
        self.adjacency.keys().copied()
    }

    /// Each edge once, as (pixel, earlier north-or-west pixel).
    pub fn edges(&self) -> &[(Pixel, Pixel)] {
        &self.edges
    }

    pub fn neighbors(&self, pixel: Pixel) -> &[Pixel] {
        self.adjacency
            .get(&pixel)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn add_edge(&mut self, a: Pixel, b: Pixel) {
        self.adjacency.entry(a).or_default().push(b);
        self.adjacency.entry(b).or_default().push(a);
        self.edges.push((a, b));
    }
}
