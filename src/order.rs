//! Degree-based vertex ordering.
//!
//! Segundo et al. pick the lowest-numbered vertex as pivot, which only prunes
//! well when vertices are numbered so that low indices have few neighbors among
//! the remaining graph. The max-degree-first ordering provides that: repeatedly
//! remove the vertex of highest remaining degree and place it at the back.

use log::debug;

use crate::graph::UndirectedGraph;

/// Computes the max-degree-first ordering of `graph`.
///
/// Returns a permutation `order` where `order[i]` is the original vertex placed
/// at position `i`. The first vertex removed (highest degree) ends up last.
/// Ties are broken by lowest vertex index.
pub fn max_degree_first<G: UndirectedGraph + ?Sized>(graph: &G) -> Vec<usize> {
    let n = graph.vertex_count();
    let mut degree: Vec<usize> = (0..n).map(|v| graph.degree(v)).collect();
    let mut removed = vec![false; n];
    let mut order = vec![0; n];

    for k in 0..n {
        let mut best: Option<usize> = None;
        for v in (0..n).filter(|&v| !removed[v]) {
            if best.map_or(true, |b| degree[v] > degree[b]) {
                best = Some(v);
            }
        }
        let Some(v) = best else {
            break;
        };

        order[n - 1 - k] = v;
        removed[v] = true;
        for u in 0..n {
            if !removed[u] && graph.has_edge(v, u) {
                degree[u] = degree[u].saturating_sub(1);
            }
        }
    }

    debug!("max_degree_first: order = {:?}", order);
    order
}
