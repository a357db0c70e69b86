//! # clique-rs: Maximal Clique Enumeration in Rust
//!
//! **`clique-rs`** enumerates every maximal clique of an undirected graph using the
//! Bron-Kerbosch algorithm over fixed-width bit-sets, with a choice of three pivot rules.
//!
//! ## What is a maximal clique?
//!
//! A clique is a set of vertices that are pairwise adjacent. It is **maximal** when no
//! other vertex can be added while keeping it a clique. A graph on `n` vertices can have
//! exponentially many maximal cliques, so the search prunes with a *pivot*: at each level
//! it only branches on candidates that conflict with (are not adjacent to) the pivot.
//!
//! ## Key Features
//!
//! - **Bit-parallel sets**: all candidate and exclusion sets are [`BitSet`][crate::bitset::BitSet]s
//!   over 64-bit words, and the hot operations (intersection, bounded common count) are word loops.
//! - **No allocation during search**: sets live in a [`SetArena`][crate::arena::SetArena] sized once up front.
//! - **Three pivot rules**: Tomita et al., Naudé (with in-place folding of forced vertices),
//!   and Segundo et al. (on a max-degree-first numbering). See [`pivot`].
//! - **Pluggable output**: results and instrumentation go to a [`CliqueSink`][crate::sink::CliqueSink].
//!
//! ## Basic Usage
//!
//! ```rust
//! use clique_rs::graph::Graph;
//! use clique_rs::pivot::PivotRule;
//! use clique_rs::search::maximal_cliques;
//!
//! // Two triangles sharing vertex 2.
//! let graph = Graph::from_edges(5, [(0, 1), (1, 2), (0, 2), (2, 3), (3, 4), (2, 4)]);
//!
//! let mut cliques = maximal_cliques(&graph, PivotRule::Tomita);
//! cliques.sort();
//! assert_eq!(cliques, vec![vec![0, 1, 2], vec![2, 3, 4]]);
//! ```
//!
//! ## Core Components
//!
//! - **[`search`]**: The recursive search, its configuration and statistics.
//! - **[`pivot`]**: Pivot selection rules.
//! - **[`sink`]**: Result receivers (counting, collecting, tracing).
//! - **[`graph`]**: The [`UndirectedGraph`][crate::graph::UndirectedGraph] abstraction and an owned [`Graph`][crate::graph::Graph].
//! - **[`dimacs`]**: Reading and writing graphs in DIMACS format.
//! - **[`tables`]**, **[`order`]**, **[`arena`]**, **[`bitset`]**, **[`bits`]**: Search internals.
//!
//! For the algorithm itself, check the [`search`] module documentation.

pub mod arena;
pub mod bits;
pub mod bitset;
pub mod dimacs;
pub mod graph;
pub mod order;
pub mod pivot;
pub mod search;
pub mod sink;
pub mod tables;
