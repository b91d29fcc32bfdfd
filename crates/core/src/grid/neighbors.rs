//! Moore-neighbourhood adjacency over a flat cell arena
//!
//! Built once at grid generation time and read-only afterwards. Adjacency is
//! stored in compressed sparse row form over the row-major cell arena, so
//! the engine's parallel read phase can share it without locking.

use serde::{Deserialize, Serialize};

/// Fixed 8-connected adjacency between cells on a bounded rectangular grid.
///
/// Purely geometric: |dx| <= 1, |dy| <= 1, not both zero, independent of
/// combustibility. Every cell has between 3 (corner) and 8 (interior)
/// neighbours, except on degenerate 1xN grids where fewer remain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NeighborGraph {
    /// CSR offsets, one per cell plus a trailing end marker
    offsets: Vec<u32>,
    /// Flattened neighbour indices, deterministic (dy, dx) scan order
    targets: Vec<u32>,
}

impl NeighborGraph {
    /// Build the adjacency for a `width` x `height` grid in O(width*height)
    pub fn build(width: u32, height: u32) -> Self {
        let cell_count = (width as usize) * (height as usize);
        let mut offsets = Vec::with_capacity(cell_count + 1);
        let mut targets = Vec::with_capacity(cell_count * 8);

        for y in 0..i64::from(height) {
            for x in 0..i64::from(width) {
                offsets.push(targets.len() as u32);
                for dy in -1..=1i64 {
                    for dx in -1..=1i64 {
                        if dx == 0 && dy == 0 {
                            continue;
                        }
                        let nx = x + dx;
                        let ny = y + dy;
                        if nx < 0 || ny < 0 || nx >= i64::from(width) || ny >= i64::from(height) {
                            continue;
                        }
                        targets.push((ny * i64::from(width) + nx) as u32);
                    }
                }
            }
        }
        offsets.push(targets.len() as u32);

        NeighborGraph { offsets, targets }
    }

    /// Neighbour indices of a cell, in deterministic scan order
    pub fn neighbours(&self, index: u32) -> &[u32] {
        let start = self.offsets[index as usize] as usize;
        let end = self.offsets[index as usize + 1] as usize;
        &self.targets[start..end]
    }

    /// Number of neighbours of a cell
    pub fn degree(&self, index: u32) -> usize {
        self.neighbours(index).len()
    }

    /// Number of cells the graph was built for
    pub fn cell_count(&self) -> usize {
        self.offsets.len() - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_symmetric(graph: &NeighborGraph) {
        for cell in 0..graph.cell_count() as u32 {
            for &neighbour in graph.neighbours(cell) {
                assert!(
                    graph.neighbours(neighbour).contains(&cell),
                    "cell {cell} lists {neighbour} but not vice versa"
                );
            }
        }
    }

    #[test]
    fn interior_cells_have_eight_neighbours_corners_three() {
        let graph = NeighborGraph::build(10, 10);
        assert_eq!(graph.degree(0), 3); // corner
        assert_eq!(graph.degree(5), 5); // edge
        assert_eq!(graph.degree(11), 8); // interior
    }

    #[test]
    fn adjacency_is_symmetric_across_shapes() {
        for (width, height) in [(1u32, 1u32), (1, 10), (10, 1), (10, 10), (3, 7)] {
            let graph = NeighborGraph::build(width, height);
            assert_eq!(graph.cell_count(), (width * height) as usize);
            assert_symmetric(&graph);
        }
    }

    #[test]
    fn single_cell_grid_has_no_neighbours() {
        let graph = NeighborGraph::build(1, 1);
        assert!(graph.neighbours(0).is_empty());
    }

    #[test]
    fn one_by_n_grids_never_assume_eight_neighbours() {
        let graph = NeighborGraph::build(1, 10);
        assert_eq!(graph.degree(0), 1);
        assert_eq!(graph.degree(5), 2);
    }

    #[test]
    fn no_self_loops() {
        let graph = NeighborGraph::build(6, 4);
        for cell in 0..graph.cell_count() as u32 {
            assert!(!graph.neighbours(cell).contains(&cell));
        }
    }
}
