use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use test_log::test;

use clique_rs::arena::SetArena;
use clique_rs::dimacs;
use clique_rs::graph::{Graph, UndirectedGraph};
use clique_rs::pivot::PivotRule;
use clique_rs::search::{all_cliques_naude, all_cliques_segundo, all_cliques_tomita, enumerate, maximal_cliques, Search, SearchConfig};
use clique_rs::sink::{CollectingSink, CountingSink, TraceSink};

fn random_graph(n: usize, p: f64, rng: &mut impl Rng) -> Graph {
    let mut graph = Graph::new(n);
    for u in 0..n {
        for v in (u + 1)..n {
            if rng.gen_bool(p) {
                graph.add_edge(u, v);
            }
        }
    }
    graph
}

/// All maximal cliques by checking every vertex subset.
fn brute_force(graph: &Graph) -> Vec<Vec<usize>> {
    let n = graph.vertex_count();
    assert!(n <= 16);
    let is_clique = |mask: u32| {
        (0..n).all(|u| mask & (1 << u) == 0 || (u + 1..n).all(|v| mask & (1 << v) == 0 || graph.has_edge(u, v)))
    };

    let mut cliques: Vec<Vec<usize>> = Vec::new();
    for mask in 0u32..(1 << n) {
        if !is_clique(mask) {
            continue;
        }
        let maximal = (0..n).all(|v| mask & (1 << v) != 0 || !is_clique(mask | (1 << v)));
        if maximal {
            cliques.push((0..n).filter(|&v| mask & (1 << v) != 0).collect());
        }
    }
    cliques.sort();
    cliques
}

fn sorted(mut cliques: Vec<Vec<usize>>) -> Vec<Vec<usize>> {
    cliques.sort();
    cliques
}

#[test]
fn test_rules_agree_with_brute_force() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    for round in 0..60 {
        let n = rng.gen_range(0..=12);
        let p = [0.1, 0.3, 0.5, 0.7, 0.9][round % 5];
        let graph = random_graph(n, p, &mut rng);
        let expected = brute_force(&graph);

        for rule in PivotRule::ALL {
            let actual = sorted(maximal_cliques(&graph, rule));
            assert_eq!(actual, expected, "rule = {}, graph = {}", rule, graph);
        }
    }
}

#[test]
fn test_rules_agree_on_larger_graphs() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    for &(n, p) in &[(40, 0.2), (64, 0.3), (65, 0.5), (130, 0.1)] {
        let graph = random_graph(n, p, &mut rng);
        let tomita = sorted(maximal_cliques(&graph, PivotRule::Tomita));
        let naude = sorted(maximal_cliques(&graph, PivotRule::Naude));
        let segundo = sorted(maximal_cliques(&graph, PivotRule::Segundo));
        assert!(!tomita.is_empty());
        assert_eq!(tomita, naude, "n = {}, p = {}", n, p);
        assert_eq!(tomita, segundo, "n = {}, p = {}", n, p);

        // Every reported clique is a clique, and reported once.
        for clique in &tomita {
            for (i, &u) in clique.iter().enumerate() {
                for &v in &clique[i + 1..] {
                    assert!(graph.has_edge(u, v));
                }
            }
        }
        let mut deduped = tomita.clone();
        deduped.dedup();
        assert_eq!(deduped.len(), tomita.len());
    }
}

#[test]
fn test_degree_ordering_does_not_change_result() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let graph = random_graph(50, 0.4, &mut rng);
    for rule in [PivotRule::Tomita, PivotRule::Naude] {
        let plain = sorted(maximal_cliques(&graph, rule));

        let mut sink = CollectingSink::new();
        enumerate(&graph, &SearchConfig::new(rule).with_degree_ordering(true), &mut sink);
        assert_eq!(sorted(sink.into_cliques()), plain, "rule = {}", rule);
    }
}

#[test]
fn test_deterministic() {
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let graph = random_graph(30, 0.5, &mut rng);
    for rule in PivotRule::ALL {
        let first = maximal_cliques(&graph, rule);
        let second = maximal_cliques(&graph, rule);
        assert_eq!(first, second, "rule = {}", rule);
    }
}

#[test]
fn test_small_cases() {
    for rule in PivotRule::ALL {
        assert_eq!(maximal_cliques(&Graph::new(0), rule), vec![Vec::<usize>::new()]);
        assert_eq!(maximal_cliques(&Graph::new(4), rule).len(), 4);
        assert_eq!(maximal_cliques(&Graph::complete(10), rule), vec![(0..10).collect::<Vec<_>>()]);
        let cycle = maximal_cliques(&Graph::cycle(5), rule);
        assert_eq!(cycle.len(), 5);
        assert!(cycle.iter().all(|c| c.len() == 2));
    }
}

#[test]
fn test_complete_graph_has_no_cut_offs() {
    let graph = Graph::complete(70);
    let stats = all_cliques_tomita(&graph, CountingSink::new());
    assert_eq!((stats.cliques, stats.cut_offs), (1, 0));
    let stats = all_cliques_naude(&graph, CountingSink::new());
    assert_eq!((stats.cliques, stats.cut_offs), (1, 0));
    let stats = all_cliques_segundo(&graph, CountingSink::new());
    assert_eq!((stats.cliques, stats.cut_offs), (1, 0));
}

#[test]
fn test_complement_of_matching() {
    // The complement of a perfect matching on 2k vertices has 2^k maximal cliques.
    let k = 6;
    let matching = Graph::from_edges(2 * k, (0..k).map(|i| (2 * i, 2 * i + 1)));
    let graph = matching.complement();
    for rule in PivotRule::ALL {
        let cliques = maximal_cliques(&graph, rule);
        assert_eq!(cliques.len(), 1 << k, "rule = {}", rule);
        assert!(cliques.iter().all(|c| c.len() == k));
    }
}

#[test]
fn test_counting_sink_matches_stats() {
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let graph = random_graph(40, 0.3, &mut rng);
    for rule in PivotRule::ALL {
        let (stats, sink) = Search::new(&graph, &SearchConfig::new(rule), CountingSink::new()).run();
        assert!(sink.is_complete());
        assert_eq!(sink.clique_count(), stats.cliques);
        assert_eq!(sink.recursion_count(), stats.recursions);
        assert_eq!(sink.cut_off_count(), stats.cut_offs);
        assert!(stats.recursions >= stats.cliques + stats.cut_offs);
    }
}

#[test]
fn test_trace_is_well_nested() {
    let mut rng = ChaCha8Rng::seed_from_u64(9);
    let graph = random_graph(12, 0.4, &mut rng);
    for rule in PivotRule::ALL {
        let mut trace = TraceSink::new();
        enumerate(&graph, &SearchConfig::new(rule), &mut trace);
        assert!(trace.is_well_nested(), "rule = {}", rule);
        assert!(trace.max_depth() >= 1);
    }
}

#[test]
fn test_sink_reuse_resets() {
    let mut sink = CollectingSink::new();
    all_cliques_naude(&Graph::cycle(5), &mut sink);
    all_cliques_naude(&Graph::complete(3), &mut sink);
    assert_eq!(sink.cliques(), &[vec![0, 1, 2]]);
    assert_eq!(sink.counts().clique_count(), 1);
}

#[test]
fn test_arena_sizing() {
    // The search reserves at most four sets per level over at most n + 1 levels.
    let arena = SetArena::for_search(10);
    assert_eq!(arena.slots(), 44);
    assert_eq!(arena.in_use(), 0);
}

#[test]
fn test_dimacs_round_trip_preserves_cliques() {
    let mut rng = ChaCha8Rng::seed_from_u64(13);
    let graph = random_graph(20, 0.4, &mut rng);
    let text = dimacs::to_string(&graph);
    let parsed = dimacs::parse(&text).unwrap();
    assert_eq!(parsed, graph);
    assert_eq!(
        sorted(maximal_cliques(&parsed, PivotRule::Segundo)),
        sorted(maximal_cliques(&graph, PivotRule::Tomita))
    );
}
