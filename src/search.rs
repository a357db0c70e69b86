//! Bron-Kerbosch maximal clique enumeration with pivoting.
//!
//! # Algorithm
//!
//! Each activation works on three sets: `S` (the clique built so far), `P`
//! (candidates adjacent to all of `S`) and `X` (vertices adjacent to all of `S`
//! that were already explored at this level). `S` is maximal exactly when `P`
//! and `X` are both empty.
//!
//! ```text
//! apply(S, P, X):
//!     if P = ∅:  report S if X = ∅, otherwise cut-off
//!     Q := P ∩ K[pivot]                 (pivot chosen by the rule)
//!     for v in Q:
//!         P := P \ {v}
//!         apply(S ∪ {v}, P ∩ N[v], X ∩ N[v])
//!         X := X ∪ {v}
//! ```
//!
//! All sets live in a [`SetArena`] reserved once per search, so the recursion
//! performs no allocation. Slots are released in strict LIFO order: a child's
//! `(S, P, X)` are reserved by the parent and released by the child itself.
//!
//! # Vertex numbering
//!
//! When degree ordering is on (always for [`PivotRule::Segundo`]), the search
//! runs on a relabelled copy of the graph. Cliques and trace vertices are
//! mapped back before they reach the sink, so callers always see their own
//! numbering.
//!
//! # Example
//!
//! ```
//! use clique_rs::graph::Graph;
//! use clique_rs::pivot::PivotRule;
//! use clique_rs::search::{enumerate, SearchConfig};
//! use clique_rs::sink::CollectingSink;
//!
//! let graph = Graph::cycle(5);
//! let mut sink = CollectingSink::new();
//! let config = SearchConfig::default().with_pivot(PivotRule::Naude);
//! let stats = enumerate(&graph, &config, &mut sink);
//!
//! assert_eq!(stats.cliques, 5);
//! assert!(sink.cliques().iter().all(|c| c.len() == 2));
//! ```

use log::debug;

use crate::arena::{SetArena, Slot};
use crate::bitset::BitSet;
use crate::graph::UndirectedGraph;
use crate::order::max_degree_first;
use crate::pivot::{Frame, PivotRule};
use crate::sink::{CliqueSink, CollectingSink};
use crate::tables::Tables;

/// Search configuration.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct SearchConfig {
    /// Pivot selection rule.
    pub pivot: PivotRule,
    /// Renumber vertices max-degree-first before searching.
    /// Always on for [`PivotRule::Segundo`].
    pub degree_ordering: bool,
}

impl SearchConfig {
    pub fn new(pivot: PivotRule) -> Self {
        Self {
            pivot,
            degree_ordering: false,
        }
    }

    pub fn with_pivot(mut self, pivot: PivotRule) -> Self {
        self.pivot = pivot;
        self
    }

    pub fn with_degree_ordering(mut self, degree_ordering: bool) -> Self {
        self.degree_ordering = degree_ordering;
        self
    }

    /// Returns true if the search will run on a max-degree-first numbering.
    pub fn reorders(&self) -> bool {
        self.degree_ordering || self.pivot.needs_degree_ordering()
    }
}

/// Counters collected during one search.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct SearchStats {
    /// Number of maximal cliques reported.
    pub cliques: u64,
    /// Number of activations of the recursive procedure.
    pub recursions: u64,
    /// Number of branches that ended with `P = ∅` but `X ≠ ∅`.
    pub cut_offs: u64,
}

/// Maps vertices of the reordered search back to the caller's numbering.
#[derive(Debug)]
struct Relabel {
    /// `order[i]` is the caller's vertex for search vertex `i`.
    order: Vec<usize>,
    scratch: BitSet,
}

impl Relabel {
    fn new(order: Vec<usize>) -> Self {
        let scratch = BitSet::new(order.len());
        Self { order, scratch }
    }

    fn set(&mut self, set: &BitSet) -> &BitSet {
        self.scratch.clear();
        for v in set.iter() {
            self.scratch.insert(self.order[v]);
        }
        &self.scratch
    }
}

/// One maximal clique enumeration over a fixed graph.
///
/// Owns its tables and arena; the sink is borrowed or owned through `K`
/// (`&mut K` is itself a [`CliqueSink`]).
pub struct Search<'a, K: CliqueSink> {
    graph: &'a dyn UndirectedGraph,
    tables: Tables,
    arena: SetArena,
    rule: PivotRule,
    relabel: Option<Relabel>,
    tracing: bool,
    sink: K,
    stats: SearchStats,
}

impl<'a, K: CliqueSink> Search<'a, K> {
    /// Prepares a search: builds the tables (after reordering, if configured) and the arena.
    pub fn new<G: UndirectedGraph>(graph: &'a G, config: &SearchConfig, sink: K) -> Self {
        let n = graph.vertex_count();
        debug!(
            "search: {} vertices, pivot = {}, reorder = {}",
            n,
            config.pivot,
            config.reorders()
        );

        let (tables, relabel) = if config.reorders() {
            let order = max_degree_first(graph);
            let permuted = graph.permuted(&order);
            (Tables::build(&permuted), Some(Relabel::new(order)))
        } else {
            (Tables::build(graph), None)
        };

        Self {
            graph,
            tables,
            arena: SetArena::for_search(n),
            rule: config.pivot,
            relabel,
            tracing: sink.is_tracing(),
            sink,
            stats: SearchStats::default(),
        }
    }

    /// Runs the search to completion, returning the counters and the sink.
    pub fn run(mut self) -> (SearchStats, K) {
        self.sink.on_clear();

        let s = self.arena.reserve_empty();
        let p = self.arena.reserve_full();
        let x = self.arena.reserve_empty();
        self.apply(s, p, x);
        debug_assert_eq!(self.arena.in_use(), 0, "arena slots leaked");

        self.sink.on_complete();
        debug!(
            "search: {} cliques, {} recursions, {} cut-offs, arena peak {}/{}",
            self.stats.cliques,
            self.stats.recursions,
            self.stats.cut_offs,
            self.arena.peak(),
            self.arena.slots()
        );
        (self.stats, self.sink)
    }

    /// One activation over the frame `(s, p, x)`; releases all three before returning.
    fn apply(&mut self, s: Slot, p: Slot, x: Slot) {
        self.stats.recursions += 1;
        self.sink.on_recursion();

        let partition = if self.arena.get(p).is_empty() {
            None
        } else {
            self.rule.choose_partition(&self.tables, &mut self.arena, Frame { s, p, x })
        };

        match partition {
            Some(q) if !self.arena.get(p).is_empty() => self.explore(s, p, x, q),
            Some(q) => {
                // In-place folding consumed every candidate.
                self.arena.release(q);
                self.conclude(s, x);
            }
            None => {
                debug_assert!(self.arena.get(p).is_empty(), "no pivot for non-empty candidates");
                self.conclude(s, x);
            }
        }

        self.arena.release(x);
        self.arena.release(p);
        self.arena.release(s);
    }

    /// Branches on every vertex of the partition `q`, then releases it.
    fn explore(&mut self, s: Slot, p: Slot, x: Slot, q: Slot) {
        if self.tracing {
            self.sink.on_open_group();
            let partition = match &mut self.relabel {
                Some(relabel) => relabel.set(self.arena.get(q)),
                None => self.arena.get(q),
            };
            self.sink.on_partition(partition);
        }

        let mut cursor = self.arena.get(q).cursor();
        while let Some(v) = cursor.next(self.arena.get(q)) {
            if self.tracing {
                let vertex = self.relabel.as_ref().map_or(v, |r| r.order[v]);
                self.sink.on_vertex(vertex);
            }

            self.arena.get_mut(p).remove(v);

            let neighbors = self.tables.neighbors(v);
            let s2 = self.arena.insert(s, v);
            let p2 = self.arena.intersect(p, neighbors);
            let x2 = self.arena.intersect(x, neighbors);
            self.apply(s2, p2, x2);

            self.arena.get_mut(x).insert(v);
        }

        if self.tracing {
            self.sink.on_close_group();
        }
        self.arena.release(q);
    }

    /// Ends a branch with no candidates: `S` is maximal iff `X` is empty.
    fn conclude(&mut self, s: Slot, x: Slot) {
        if self.arena.get(x).is_empty() {
            self.stats.cliques += 1;
            self.sink.on_ok();
            let clique = match &mut self.relabel {
                Some(relabel) => relabel.set(self.arena.get(s)),
                None => self.arena.get(s),
            };
            self.sink.on_clique(self.graph, clique);
        } else {
            self.stats.cut_offs += 1;
            self.sink.on_cut_off();
        }
    }
}

/// Enumerates all maximal cliques of `graph`, reporting them to `sink`.
pub fn enumerate<G: UndirectedGraph, K: CliqueSink>(graph: &G, config: &SearchConfig, sink: K) -> SearchStats {
    Search::new(graph, config, sink).run().0
}

/// Enumerates with the Tomita et al. pivot rule.
pub fn all_cliques_tomita<G: UndirectedGraph, K: CliqueSink>(graph: &G, sink: K) -> SearchStats {
    enumerate(graph, &SearchConfig::new(PivotRule::Tomita), sink)
}

/// Enumerates with Naudé's pivot rule.
pub fn all_cliques_naude<G: UndirectedGraph, K: CliqueSink>(graph: &G, sink: K) -> SearchStats {
    enumerate(graph, &SearchConfig::new(PivotRule::Naude), sink)
}

/// Enumerates with the Segundo et al. pivot rule on a max-degree-first numbering.
pub fn all_cliques_segundo<G: UndirectedGraph, K: CliqueSink>(graph: &G, sink: K) -> SearchStats {
    enumerate(graph, &SearchConfig::new(PivotRule::Segundo), sink)
}

/// Collects all maximal cliques as ascending vertex lists, in report order.
pub fn maximal_cliques<G: UndirectedGraph>(graph: &G, pivot: PivotRule) -> Vec<Vec<usize>> {
    let mut sink = CollectingSink::new();
    enumerate(graph, &SearchConfig::new(pivot), &mut sink);
    sink.into_cliques()
}
