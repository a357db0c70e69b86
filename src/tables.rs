//! Per-vertex neighbor and conflict sets.
//!
//! `N[v]` holds the neighbors of `v`; a vertex is never its own neighbor, even
//! when the input graph carries a self-loop. `K[v]` is the complement of `N[v]`
//! in the universe, so it contains `v` itself: a pivot taken from the candidate
//! set lands in its own partition and gets branched on.

use log::debug;

use crate::bitset::BitSet;
use crate::graph::UndirectedGraph;

/// Neighbor (`N`) and conflict (`K`) rows for every vertex, read-only during search.
#[derive(Debug, Clone)]
pub struct Tables {
    neighbors: Vec<BitSet>,
    conflicts: Vec<BitSet>,
}

impl Tables {
    /// Builds the tables from the graph's adjacency predicate.
    pub fn build<G: UndirectedGraph + ?Sized>(graph: &G) -> Self {
        let n = graph.vertex_count();
        let mut neighbors = Vec::with_capacity(n);
        let mut conflicts = Vec::with_capacity(n);
        let mut edges = 0;

        for i in 0..n {
            let mut row = BitSet::new(n);
            for j in 0..n {
                if i != j && graph.has_edge(i, j) {
                    row.insert(j);
                }
            }
            edges += row.count();

            let mut conflict = row.clone();
            conflict.invert();

            neighbors.push(row);
            conflicts.push(conflict);
        }

        debug!("tables: {} vertices, {} edges", n, edges / 2);
        Self { neighbors, conflicts }
    }

    /// Number of vertices (size of the universe).
    pub fn vertex_count(&self) -> usize {
        self.neighbors.len()
    }

    /// `N[v]`
    #[inline]
    pub fn neighbors(&self, v: usize) -> &BitSet {
        &self.neighbors[v]
    }

    /// `K[v]`
    #[inline]
    pub fn conflicts(&self, v: usize) -> &BitSet {
        &self.conflicts[v]
    }
}
