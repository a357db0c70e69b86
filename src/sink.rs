//! Receivers for search results and instrumentation.
//!
//! The search drives a [`CliqueSink`] in exactly the depth-first, left-to-right
//! order it visits partitions. Every hook has a no-op default, so a sink only
//! implements what it needs and the rest compiles away.
//!
//! | Sink | Keeps |
//! |------|-------|
//! | [`CountingSink`] | clique, recursion and cut-off counters |
//! | [`CollectingSink`] | every clique as a sorted vertex list, plus counters |
//! | [`TraceSink`] | the full search tree, rendered as indented text |

use std::fmt;

use crate::bitset::BitSet;
use crate::graph::UndirectedGraph;

/// Receiver of search events.
///
/// Vertex indices are always those of the graph passed to the search, even when
/// the search internally runs on a reordered copy.
#[allow(unused_variables)]
pub trait CliqueSink {
    /// Returns true if the sink wants the group, partition and vertex hooks.
    ///
    /// Searches skip those hooks entirely for sinks that return false.
    fn is_tracing(&self) -> bool {
        false
    }

    /// A search is starting.
    fn on_clear(&mut self) {}

    /// A maximal clique was found.
    fn on_clique(&mut self, graph: &dyn UndirectedGraph, clique: &BitSet) {}

    /// The search has finished.
    fn on_complete(&mut self) {}

    /// A recursive activation was entered.
    fn on_recursion(&mut self) {}

    /// A branch ended with no candidates left but a non-empty exclusion set.
    fn on_cut_off(&mut self) {}

    /// A branch ended successfully; `on_clique` follows.
    fn on_ok(&mut self) {}

    /// A level starts exploring a partition.
    fn on_open_group(&mut self) {}

    /// The partition about to be explored at the current level.
    fn on_partition(&mut self, partition: &BitSet) {}

    /// The partition vertex about to be branched on.
    fn on_vertex(&mut self, vertex: usize) {}

    /// A level finished exploring its partition.
    fn on_close_group(&mut self) {}
}

impl<K: CliqueSink + ?Sized> CliqueSink for &mut K {
    fn is_tracing(&self) -> bool {
        (**self).is_tracing()
    }
    fn on_clear(&mut self) {
        (**self).on_clear()
    }
    fn on_clique(&mut self, graph: &dyn UndirectedGraph, clique: &BitSet) {
        (**self).on_clique(graph, clique)
    }
    fn on_complete(&mut self) {
        (**self).on_complete()
    }
    fn on_recursion(&mut self) {
        (**self).on_recursion()
    }
    fn on_cut_off(&mut self) {
        (**self).on_cut_off()
    }
    fn on_ok(&mut self) {
        (**self).on_ok()
    }
    fn on_open_group(&mut self) {
        (**self).on_open_group()
    }
    fn on_partition(&mut self, partition: &BitSet) {
        (**self).on_partition(partition)
    }
    fn on_vertex(&mut self, vertex: usize) {
        (**self).on_vertex(vertex)
    }
    fn on_close_group(&mut self) {
        (**self).on_close_group()
    }
}

/// Sink that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl CliqueSink for NullSink {}

/// Counts cliques, recursive calls and cut-offs.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CountingSink {
    cliques: u64,
    recursions: u64,
    cut_offs: u64,
    complete: bool,
}

impl CountingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clique_count(&self) -> u64 {
        self.cliques
    }

    pub fn recursion_count(&self) -> u64 {
        self.recursions
    }

    pub fn cut_off_count(&self) -> u64 {
        self.cut_offs
    }

    /// Returns true once the last search has finished.
    pub fn is_complete(&self) -> bool {
        self.complete
    }
}

impl CliqueSink for CountingSink {
    fn on_clear(&mut self) {
        *self = Self::default();
    }
    fn on_clique(&mut self, _graph: &dyn UndirectedGraph, _clique: &BitSet) {
        self.cliques += 1;
    }
    fn on_complete(&mut self) {
        self.complete = true;
    }
    fn on_recursion(&mut self) {
        self.recursions += 1;
    }
    fn on_cut_off(&mut self) {
        self.cut_offs += 1;
    }
}

/// Collects every clique as an ascending vertex list, in report order.
#[derive(Debug, Default, Clone)]
pub struct CollectingSink {
    cliques: Vec<Vec<usize>>,
    counts: CountingSink,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cliques in the order they were reported.
    pub fn cliques(&self) -> &[Vec<usize>] {
        &self.cliques
    }

    pub fn into_cliques(self) -> Vec<Vec<usize>> {
        self.cliques
    }

    pub fn counts(&self) -> &CountingSink {
        &self.counts
    }
}

impl CliqueSink for CollectingSink {
    fn on_clear(&mut self) {
        self.cliques.clear();
        self.counts.on_clear();
    }
    fn on_clique(&mut self, graph: &dyn UndirectedGraph, clique: &BitSet) {
        self.cliques.push(clique.to_vec());
        self.counts.on_clique(graph, clique);
    }
    fn on_complete(&mut self) {
        self.counts.on_complete();
    }
    fn on_recursion(&mut self) {
        self.counts.on_recursion();
    }
    fn on_cut_off(&mut self) {
        self.counts.on_cut_off();
    }
}

/// One node of the recorded search tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceEvent {
    Recursion,
    OpenGroup,
    Partition(Vec<usize>),
    Vertex(usize),
    CloseGroup,
    Ok,
    Clique(Vec<usize>),
    CutOff,
}

/// Records the structured search tree for diagnostics.
///
/// `Display` renders the tree with one event per line, indented by group depth:
///
/// ```text
/// [
///   partition {0, 1}
///   vertex 0
///   [
///     partition {1}
///     vertex 1
///     ok
///     clique {0, 1}
///   ]
///   vertex 1
///   cut-off
/// ]
/// ```
#[derive(Debug, Default, Clone)]
pub struct TraceSink {
    events: Vec<TraceEvent>,
}

impl TraceSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    /// Returns true if every opened group was closed, never closing more than were open.
    pub fn is_well_nested(&self) -> bool {
        let mut depth = 0usize;
        for event in &self.events {
            match event {
                TraceEvent::OpenGroup => depth += 1,
                TraceEvent::CloseGroup => match depth.checked_sub(1) {
                    Some(d) => depth = d,
                    None => return false,
                },
                _ => {}
            }
        }
        depth == 0
    }

    /// Deepest group nesting in the trace.
    pub fn max_depth(&self) -> usize {
        let mut depth = 0usize;
        let mut max = 0usize;
        for event in &self.events {
            match event {
                TraceEvent::OpenGroup => {
                    depth += 1;
                    max = max.max(depth);
                }
                TraceEvent::CloseGroup => depth = depth.saturating_sub(1),
                _ => {}
            }
        }
        max
    }
}

impl CliqueSink for TraceSink {
    fn is_tracing(&self) -> bool {
        true
    }
    fn on_clear(&mut self) {
        self.events.clear();
    }
    fn on_clique(&mut self, _graph: &dyn UndirectedGraph, clique: &BitSet) {
        self.events.push(TraceEvent::Clique(clique.to_vec()));
    }
    fn on_recursion(&mut self) {
        self.events.push(TraceEvent::Recursion);
    }
    fn on_cut_off(&mut self) {
        self.events.push(TraceEvent::CutOff);
    }
    fn on_ok(&mut self) {
        self.events.push(TraceEvent::Ok);
    }
    fn on_open_group(&mut self) {
        self.events.push(TraceEvent::OpenGroup);
    }
    fn on_partition(&mut self, partition: &BitSet) {
        self.events.push(TraceEvent::Partition(partition.to_vec()));
    }
    fn on_vertex(&mut self, vertex: usize) {
        self.events.push(TraceEvent::Vertex(vertex));
    }
    fn on_close_group(&mut self) {
        self.events.push(TraceEvent::CloseGroup);
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, items: &[usize]) -> fmt::Result {
    write!(f, "{{")?;
    for (i, x) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", x)?;
    }
    write!(f, "}}")
}

impl fmt::Display for TraceSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut depth = 0usize;
        for event in &self.events {
            if let TraceEvent::CloseGroup = event {
                depth = depth.saturating_sub(1);
            }
            let indent = "  ".repeat(depth);
            match event {
                TraceEvent::Recursion => continue,
                TraceEvent::OpenGroup => writeln!(f, "{}[", indent)?,
                TraceEvent::CloseGroup => writeln!(f, "{}]", indent)?,
                TraceEvent::Partition(q) => {
                    write!(f, "{}partition ", indent)?;
                    write_list(f, q)?;
                    writeln!(f)?;
                }
                TraceEvent::Vertex(v) => writeln!(f, "{}vertex {}", indent, v)?,
                TraceEvent::Ok => writeln!(f, "{}ok", indent)?,
                TraceEvent::Clique(c) => {
                    write!(f, "{}clique ", indent)?;
                    write_list(f, c)?;
                    writeln!(f)?;
                }
                TraceEvent::CutOff => writeln!(f, "{}cut-off", indent)?,
            }
            if let TraceEvent::OpenGroup = event {
                depth += 1;
            }
        }
        Ok(())
    }
}
