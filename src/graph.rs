//! Undirected graphs consumed by the clique search.
//!
//! The search only needs a handful of read-only queries, captured by the
//! [`UndirectedGraph`] trait: vertex count, dense vertex indices, the adjacency
//! predicate, vertex degree, and (for degree-based reordering) a relabelled copy.
//! [`Graph`] is a small owned implementation with per-vertex adjacency sets.

use std::collections::{BTreeSet, TryReserveError};
use std::fmt;

/// Read-only view of an undirected graph with vertices `0..vertex_count()`.
pub trait UndirectedGraph {
    /// Number of vertices.
    fn vertex_count(&self) -> usize;

    /// Returns true if `a` and `b` are adjacent. Must be symmetric.
    fn has_edge(&self, a: usize, b: usize) -> bool;

    /// Number of vertices other than `v` adjacent to `v`. Self-loops are not counted.
    fn degree(&self, v: usize) -> usize;

    /// Builds a copy where new vertex `i` is old vertex `order[i]`.
    fn permuted(&self, order: &[usize]) -> Self
    where
        Self: Sized;
}

/// Undirected graph with index-based adjacency sets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    adjacency: Vec<BTreeSet<usize>>,
    edges: usize,
}

impl Graph {
    /// Creates a graph with `n` isolated vertices.
    pub fn new(n: usize) -> Self {
        Self {
            adjacency: vec![BTreeSet::new(); n],
            edges: 0,
        }
    }

    /// Like [`new`][Graph::new], but fails instead of aborting when `n` vertices cannot be allocated.
    pub fn try_new(n: usize) -> Result<Self, TryReserveError> {
        let mut adjacency = Vec::new();
        adjacency.try_reserve_exact(n)?;
        adjacency.resize_with(n, BTreeSet::new);
        Ok(Self { adjacency, edges: 0 })
    }

    /// Creates a graph with `n` vertices and the given edges.
    pub fn from_edges(n: usize, edges: impl IntoIterator<Item = (usize, usize)>) -> Self {
        let mut graph = Self::new(n);
        for (u, v) in edges {
            graph.add_edge(u, v);
        }
        graph
    }

    /// Complete graph `K_n`.
    pub fn complete(n: usize) -> Self {
        Self::from_edges(n, (0..n).flat_map(|u| (u + 1..n).map(move |v| (u, v))))
    }

    /// Cycle `C_n`: `0 - 1 - ... - (n-1) - 0`.
    pub fn cycle(n: usize) -> Self {
        Self::from_edges(n, (0..n).map(|u| (u, (u + 1) % n)))
    }

    /// Adds an isolated vertex and returns its index.
    pub fn add_vertex(&mut self) -> usize {
        self.adjacency.push(BTreeSet::new());
        self.adjacency.len() - 1
    }

    fn check_vertex(&self, v: usize) {
        assert!(v < self.adjacency.len(), "vertex {} out of range 0..{}", v, self.adjacency.len());
    }

    /// Adds the edge `{u, v}`. Returns true if it was not already present.
    ///
    /// A self-loop (`u == v`) is stored but never makes a vertex its own neighbor in the search.
    pub fn add_edge(&mut self, u: usize, v: usize) -> bool {
        self.check_vertex(u);
        self.check_vertex(v);
        let added = self.adjacency[u].insert(v);
        if added {
            self.adjacency[v].insert(u);
            self.edges += 1;
        }
        added
    }

    /// Removes the edge `{u, v}`. Returns true if it was present.
    pub fn remove_edge(&mut self, u: usize, v: usize) -> bool {
        self.check_vertex(u);
        self.check_vertex(v);
        let removed = self.adjacency[u].remove(&v);
        if removed {
            self.adjacency[v].remove(&u);
            self.edges -= 1;
        }
        removed
    }

    /// Number of edges, counting each self-loop once.
    pub fn edge_count(&self) -> usize {
        self.edges
    }

    /// Neighbors of `v` in ascending order.
    pub fn neighbors(&self, v: usize) -> impl Iterator<Item = usize> + '_ {
        self.check_vertex(v);
        self.adjacency[v].iter().copied()
    }

    /// Every edge once, as `(u, v)` with `u <= v`, in lexicographic order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.adjacency
            .iter()
            .enumerate()
            .flat_map(|(u, adj)| adj.range(u..).map(move |&v| (u, v)))
    }

    /// Simple-graph complement: `u != v` are adjacent iff they are not adjacent here.
    pub fn complement(&self) -> Self {
        let n = self.vertex_count();
        Self::from_edges(
            n,
            (0..n).flat_map(|u| (u + 1..n).filter(move |&v| !self.adjacency[u].contains(&v)).map(move |v| (u, v))),
        )
    }
}

impl UndirectedGraph for Graph {
    fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    fn has_edge(&self, a: usize, b: usize) -> bool {
        self.check_vertex(a);
        self.check_vertex(b);
        self.adjacency[a].contains(&b)
    }

    fn degree(&self, v: usize) -> usize {
        self.check_vertex(v);
        let adj = &self.adjacency[v];
        adj.len() - usize::from(adj.contains(&v))
    }

    fn permuted(&self, order: &[usize]) -> Self {
        let n = self.vertex_count();
        assert_eq!(order.len(), n, "permutation has wrong length");
        let mut position = vec![usize::MAX; n];
        for (i, &old) in order.iter().enumerate() {
            self.check_vertex(old);
            assert_eq!(position[old], usize::MAX, "vertex {} repeated in permutation", old);
            position[old] = i;
        }
        Self::from_edges(n, self.edges().map(|(u, v)| (position[u], position[v])))
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Graph(n = {}, edges = [", self.vertex_count())?;
        for (i, (u, v)) in self.edges().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}-{}", u, v)?;
        }
        write!(f, "])")
    }
}
