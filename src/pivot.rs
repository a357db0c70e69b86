//! Pivot selection rules for the Bron-Kerbosch search.
//!
//! At each level the search explores only `Q = P ∩ K[q]` for a pivot `q`
//! drawn from `P ∪ X`: every maximal clique through the current level either
//! contains `q` or contains some vertex not adjacent to `q`. The rules differ in
//! how they choose `q`:
//!
//! | Rule | Pivot | Extra work |
//! |------|-------|-----------|
//! | [`Tomita`][PivotRule::Tomita] | maximizes `|P ∩ N[v]|` over `X ∪ P` | one count per candidate |
//! | [`Naude`][PivotRule::Naude] | minimizes `|P ∩ K[v]|`, with early exit at 0 or 2 | folds forced vertices into `S` |
//! | [`Segundo`][PivotRule::Segundo] | first vertex of `X`, else of `P` | needs max-degree-first numbering |
//!
//! # References
//!
//! - E. Tomita, A. Tanaka, H. Takahashi. "The worst-case time complexity for
//!   generating all maximal cliques and computational experiments."
//!   Theoretical Computer Science 363 (2006).
//! - K. A. Naudé. "Refined pivot selection for maximal clique enumeration in
//!   graphs." Theoretical Computer Science 613 (2016).
//! - P. San Segundo, J. Artieda, D. Strash. "Efficiently enumerating all maximal
//!   cliques with bit-parallelism." Computers & Operations Research 92 (2018).

use std::fmt;
use std::str::FromStr;

use log::trace;

use crate::arena::{SetArena, Slot};
use crate::tables::Tables;

/// The three sets of one search activation, as arena slots.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Frame {
    /// Vertices committed to the clique.
    pub s: Slot,
    /// Candidates that can still extend `s`.
    pub p: Slot,
    /// Already explored vertices adjacent to all of `s`.
    pub x: Slot,
}

/// Pivot selection rule.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum PivotRule {
    /// Tomita, Tanaka and Takahashi.
    #[default]
    Tomita,
    /// Naudé, with in-place folding of forced vertices.
    Naude,
    /// San Segundo, Artieda and Strash.
    Segundo,
}

impl PivotRule {
    pub const ALL: [PivotRule; 3] = [PivotRule::Tomita, PivotRule::Naude, PivotRule::Segundo];

    /// Command-line name of the rule.
    pub fn name(self) -> &'static str {
        match self {
            PivotRule::Tomita => "tomita-et-al",
            PivotRule::Naude => "naude",
            PivotRule::Segundo => "segundo-et-al",
        }
    }

    /// Returns true if the rule is only effective on a max-degree-first numbering.
    pub fn needs_degree_ordering(self) -> bool {
        matches!(self, PivotRule::Segundo)
    }

    /// Chooses the partition to explore at the current level.
    ///
    /// On `Some(q)`, `q` is a freshly reserved arena slot holding `P ∩ K[pivot]`,
    /// to be released by the caller. `None` means there is no pivot (`P` and
    /// possibly `X` are empty).
    ///
    /// The Naudé rule may add vertices to `S` and shrink `P` and `X` in place
    /// before returning; the returned partition always reflects those changes.
    pub fn choose_partition(self, tables: &Tables, arena: &mut SetArena, frame: Frame) -> Option<Slot> {
        match self {
            PivotRule::Tomita => tomita(tables, arena, frame),
            PivotRule::Naude => naude(tables, arena, frame),
            PivotRule::Segundo => segundo(tables, arena, frame),
        }
    }
}

impl fmt::Display for PivotRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Error returned when parsing an unknown rule name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPivotRule(pub String);

impl fmt::Display for UnknownPivotRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" is not a recognised pivot rule (expected one of: ", self.0)?;
        for (i, rule) in PivotRule::ALL.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", rule)?;
        }
        write!(f, ")")
    }
}

impl std::error::Error for UnknownPivotRule {}

impl FromStr for PivotRule {
    type Err = UnknownPivotRule;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tomita" | "tomita-et-al" => Ok(PivotRule::Tomita),
            "naude" => Ok(PivotRule::Naude),
            "segundo" | "segundo-et-al" => Ok(PivotRule::Segundo),
            _ => Err(UnknownPivotRule(s.to_string())),
        }
    }
}

/// Pivot maximizing `|P ∩ N[v]| + 1` over `X` then `P`; the first maximum wins.
fn tomita(tables: &Tables, arena: &mut SetArena, frame: Frame) -> Option<Slot> {
    let p = arena.get(frame.p);
    if p.is_empty() {
        return None;
    }

    let mut most = 0;
    let mut pivot = None;
    for v in arena.get(frame.x).iter().chain(p.iter()) {
        let count = p.count_common(tables.neighbors(v)) + 1;
        if count > most {
            most = count;
            pivot = Some(v);
        }
    }

    let q = pivot?;
    Some(arena.intersect(frame.p, tables.conflicts(q)))
}

/// Pivot minimizing `|P ∩ K[v]|` over `X` then `P`.
///
/// A count of 0 or 2 is taken immediately. A count of 1 means the single
/// conflict `w` must belong to every maximal clique reachable from here, so it
/// is folded into `S` on the spot. The scan keeps walking the live sets with
/// cursors; it restarts only when the fold removed the best pivot found so far.
fn naude(tables: &Tables, arena: &mut SetArena, frame: Frame) -> Option<Slot> {
    let n = tables.vertex_count();

    let pivot = 'search: loop {
        let mut pivot = None;
        let mut least = n + 1;

        for source in [frame.x, frame.p] {
            let mut cursor = arena.get(source).cursor();
            while let Some(v) = cursor.next(arena.get(source)) {
                let (count, witness) = arena.get(frame.p).count_common_limit(tables.conflicts(v), least);
                if count >= least {
                    continue;
                }
                match (count, witness) {
                    (0, _) | (2, _) => break 'search Some(v),
                    (1, Some(w)) => {
                        trace!("naude: fold {} (forced by {})", w, v);
                        arena.get_mut(frame.s).insert(w);
                        arena.get_mut(frame.p).intersect_with(tables.neighbors(w));
                        arena.get_mut(frame.x).intersect_with(tables.neighbors(w));
                        if pivot.map_or(false, |q| tables.conflicts(w).contains(q)) {
                            continue 'search;
                        }
                    }
                    _ => {
                        pivot = Some(v);
                        least = count;
                    }
                }
            }
        }

        break pivot;
    };

    let q = pivot?;
    Some(arena.intersect(frame.p, tables.conflicts(q)))
}

/// Pivot is the lowest-numbered vertex of `X`, else of `P`.
fn segundo(tables: &Tables, arena: &mut SetArena, frame: Frame) -> Option<Slot> {
    let q = arena.get(frame.x).first().or_else(|| arena.get(frame.p).first())?;
    Some(arena.intersect(frame.p, tables.conflicts(q)))
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::bitset::BitSet;
    use crate::graph::Graph;

    /// Reserves a frame with the given contents.
    fn frame(arena: &mut SetArena, s: &[usize], p: &[usize], x: &[usize]) -> Frame {
        let mut slot = |members: &[usize]| {
            let slot = arena.reserve_empty();
            arena.get_mut(slot).extend(members.iter().copied());
            slot
        };
        Frame {
            s: slot(s),
            p: slot(p),
            x: slot(x),
        }
    }

    fn members(arena: &SetArena, slot: Slot) -> Vec<usize> {
        arena.get(slot).to_vec()
    }

    #[test]
    fn test_names_round_trip() {
        for rule in PivotRule::ALL {
            assert_eq!(rule.name().parse::<PivotRule>(), Ok(rule));
        }
        assert_eq!("tomita".parse::<PivotRule>(), Ok(PivotRule::Tomita));
        let err = "bogus".parse::<PivotRule>().unwrap_err();
        assert!(err.to_string().contains("naude"));
        assert_eq!(PivotRule::default(), PivotRule::Tomita);
        assert!(PivotRule::Segundo.needs_degree_ordering());
        assert!(!PivotRule::Naude.needs_degree_ordering());
    }

    #[test]
    fn test_tomita_picks_hub() {
        // Star with center 0.
        let g = Graph::from_edges(4, [(0, 1), (0, 2), (0, 3)]);
        let tables = Tables::build(&g);
        let mut arena = SetArena::for_search(4);
        let f = frame(&mut arena, &[], &[0, 1, 2, 3], &[]);

        let q = PivotRule::Tomita.choose_partition(&tables, &mut arena, f).unwrap();
        assert_eq!(members(&arena, q), vec![0]);
    }

    #[test]
    fn test_tomita_prefers_excluded_on_tie() {
        // Triangle 0-1-2 with 0 already explored: 0 is scanned first and ties keep it.
        let g = Graph::complete(3);
        let tables = Tables::build(&g);
        let mut arena = SetArena::for_search(3);
        let f = frame(&mut arena, &[], &[1, 2], &[0]);

        let q = PivotRule::Tomita.choose_partition(&tables, &mut arena, f).unwrap();
        assert!(arena.get(q).is_empty());
    }

    #[test]
    fn test_tomita_empty_candidates() {
        let tables = Tables::build(&Graph::new(2));
        let mut arena = SetArena::for_search(2);
        let f = frame(&mut arena, &[], &[], &[1]);
        assert_eq!(PivotRule::Tomita.choose_partition(&tables, &mut arena, f), None);
    }

    #[test]
    fn test_naude_two_conflicts_is_immediate() {
        // Triangle 0-1-2 plus isolated 3: vertex 0 conflicts with {0, 3}.
        let g = Graph::from_edges(4, [(0, 1), (1, 2), (0, 2)]);
        let tables = Tables::build(&g);
        let mut arena = SetArena::for_search(4);
        let f = frame(&mut arena, &[], &[0, 1, 2, 3], &[]);

        let q = PivotRule::Naude.choose_partition(&tables, &mut arena, f).unwrap();
        assert_eq!(members(&arena, q), vec![0, 3]);
        // Nothing folded.
        assert!(arena.get(f.s).is_empty());
        assert_eq!(members(&arena, f.p), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_naude_folds_whole_clique() {
        let tables = Tables::build(&Graph::complete(3));
        let mut arena = SetArena::for_search(3);
        let f = frame(&mut arena, &[], &[0, 1, 2], &[]);

        let q = PivotRule::Naude.choose_partition(&tables, &mut arena, f);
        assert_eq!(q, None);
        assert_eq!(members(&arena, f.s), vec![0, 1, 2]);
        assert!(arena.get(f.p).is_empty());
        assert!(arena.get(f.x).is_empty());
    }

    #[test]
    fn test_naude_folds_witness_from_excluded() {
        // Edges 0-1, 1-2. With 0 explored, its only conflict among {1, 2} is 2.
        let g = Graph::from_edges(3, [(0, 1), (1, 2)]);
        let tables = Tables::build(&g);
        let mut arena = SetArena::for_search(3);
        let f = frame(&mut arena, &[], &[1, 2], &[0]);

        let q = PivotRule::Naude.choose_partition(&tables, &mut arena, f);
        assert_eq!(q, None);
        assert_eq!(members(&arena, f.s), vec![1, 2]);
        assert!(arena.get(f.p).is_empty());
        assert!(arena.get(f.x).is_empty());
    }

    #[test]
    fn test_naude_zero_conflicts_gives_empty_partition() {
        // 0 is explored and adjacent to every candidate: nothing left to do here.
        let g = Graph::from_edges(3, [(0, 1), (0, 2)]);
        let tables = Tables::build(&g);
        let mut arena = SetArena::for_search(3);
        let f = frame(&mut arena, &[], &[1, 2], &[0]);

        let q = PivotRule::Naude.choose_partition(&tables, &mut arena, f).unwrap();
        assert!(arena.get(q).is_empty());
        assert_eq!(members(&arena, f.p), vec![1, 2]);
    }

    #[test]
    fn test_naude_keeps_smallest_conflict_count() {
        // Path 0-1-2-3-4-5: every candidate has at least 4 conflicts, so nothing is folded.
        let g = Graph::from_edges(6, [(0, 1), (1, 2), (2, 3), (3, 4), (4, 5)]);
        let tables = Tables::build(&g);
        let mut arena = SetArena::for_search(6);
        let f = frame(&mut arena, &[], &[0, 1, 2, 3, 4, 5], &[]);

        let q = PivotRule::Naude.choose_partition(&tables, &mut arena, f).unwrap();
        let partition = arena.get(q).clone();
        let mut outside = partition.clone();
        outside.remove_all(arena.get(f.p));
        assert!(outside.is_empty());
        assert!(!partition.is_empty());
        // Vertex 1 has conflicts {1, 3, 4, 5}; vertex 0 has {0, 2, 3, 4, 5}: 1 is the first minimum.
        assert_eq!(partition, BitSet::from_indices(6, [1, 3, 4, 5]));
    }

    #[test]
    fn test_segundo_takes_first_vertex() {
        let g = Graph::from_edges(3, [(0, 1), (1, 2)]);
        let tables = Tables::build(&g);
        let mut arena = SetArena::for_search(3);

        let f = frame(&mut arena, &[], &[0, 1], &[2]);
        let q = PivotRule::Segundo.choose_partition(&tables, &mut arena, f).unwrap();
        assert_eq!(members(&arena, q), vec![0]);
        arena.release(q);
        arena.release(f.x);
        arena.release(f.p);
        arena.release(f.s);

        let f = frame(&mut arena, &[], &[1, 2], &[]);
        let q = PivotRule::Segundo.choose_partition(&tables, &mut arena, f).unwrap();
        assert_eq!(members(&arena, q), vec![1]);

        let f = frame(&mut arena, &[], &[], &[]);
        assert_eq!(PivotRule::Segundo.choose_partition(&tables, &mut arena, f), None);
    }
}
