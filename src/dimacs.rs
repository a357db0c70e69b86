//! Reading and writing graphs in the DIMACS ASCII edge format.
//!
//! # Format
//!
//! ```text
//! c comment line
//! p edge <vertices> <edges>
//! e <u> <v>
//! ```
//!
//! Vertices are 1-based in the file and 0-based in [`Graph`]. The problem
//! token may be `edge` or `col` (both appear in the clique benchmark sets).
//! Duplicate edges are accepted and stored once; the declared edge count is
//! not enforced.

use std::fmt::Write as FmtWrite;
use std::fs;
use std::io;
use std::path::Path;

use log::debug;

use crate::graph::{Graph, UndirectedGraph};

/// Error type for DIMACS I/O.
#[derive(Debug)]
pub enum DimacsError {
    /// File I/O error.
    Io(io::Error),
    /// Malformed content, with the 1-based line number.
    Parse { line: usize, message: String },
}

impl DimacsError {
    fn parse(line: usize, message: impl Into<String>) -> Self {
        DimacsError::Parse {
            line,
            message: message.into(),
        }
    }
}

impl From<io::Error> for DimacsError {
    fn from(e: io::Error) -> Self {
        DimacsError::Io(e)
    }
}

impl std::fmt::Display for DimacsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DimacsError::Io(e) => write!(f, "I/O error: {}", e),
            DimacsError::Parse { line, message } => write!(f, "Parse error on line {}: {}", line, message),
        }
    }
}

impl std::error::Error for DimacsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DimacsError::Io(e) => Some(e),
            DimacsError::Parse { .. } => None,
        }
    }
}

/// Reads a graph from a DIMACS file.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Graph, DimacsError> {
    let content = fs::read_to_string(path)?;
    parse(&content)
}

/// Writes a graph to a DIMACS file.
pub fn save<P: AsRef<Path>>(graph: &Graph, path: P) -> Result<(), DimacsError> {
    fs::write(path, to_string(graph))?;
    Ok(())
}

/// Parses a graph from DIMACS text.
pub fn parse(content: &str) -> Result<Graph, DimacsError> {
    let mut graph: Option<Graph> = None;

    for (i, line) in content.lines().enumerate() {
        let lineno = i + 1;
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some(&kind) = parts.first() else {
            continue;
        };

        match kind {
            "c" => continue,
            "p" => {
                if graph.is_some() {
                    return Err(DimacsError::parse(lineno, "duplicate problem line"));
                }
                if parts.len() != 4 || !matches!(parts[1], "edge" | "col") {
                    return Err(DimacsError::parse(lineno, format!("invalid problem line: {}", line)));
                }
                let n: usize = parts[2]
                    .parse()
                    .map_err(|_| DimacsError::parse(lineno, format!("invalid vertex count: {}", parts[2])))?;
                let m: usize = parts[3]
                    .parse()
                    .map_err(|_| DimacsError::parse(lineno, format!("invalid edge count: {}", parts[3])))?;
                debug!("dimacs: n = {}, m = {}", n, m);
                let g = Graph::try_new(n)
                    .map_err(|e| DimacsError::parse(lineno, format!("cannot allocate {} vertices: {}", n, e)))?;
                graph = Some(g);
            }
            "e" => {
                let g = graph
                    .as_mut()
                    .ok_or_else(|| DimacsError::parse(lineno, "edge before problem line"))?;
                if parts.len() != 3 {
                    return Err(DimacsError::parse(lineno, format!("invalid edge line: {}", line)));
                }
                let u = parse_vertex(parts[1], g.vertex_count(), lineno)?;
                let v = parse_vertex(parts[2], g.vertex_count(), lineno)?;
                g.add_edge(u, v);
            }
            _ => return Err(DimacsError::parse(lineno, format!("unknown line type: {}", kind))),
        }
    }

    graph.ok_or_else(|| DimacsError::parse(content.lines().count().max(1), "missing problem line"))
}

fn parse_vertex(token: &str, n: usize, lineno: usize) -> Result<usize, DimacsError> {
    let v: usize = token
        .parse()
        .map_err(|_| DimacsError::parse(lineno, format!("invalid vertex: {}", token)))?;
    if v == 0 || v > n {
        return Err(DimacsError::parse(lineno, format!("vertex {} out of range 1..={}", v, n)));
    }
    Ok(v - 1)
}

/// Renders a graph as DIMACS text.
pub fn to_string(graph: &Graph) -> String {
    let mut output = String::new();
    writeln!(output, "p edge {} {}", graph.vertex_count(), graph.edge_count()).unwrap();
    for (u, v) in graph.edges() {
        writeln!(output, "e {} {}", u + 1, v + 1).unwrap();
    }
    output
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    #[test]
    fn test_parse_basic() {
        let text = "c triangle plus pendant\np edge 4 4\ne 1 2\ne 2 3\ne 3 1\ne 3 4\n";
        let g = parse(text).unwrap();
        assert_eq!(g.vertex_count(), 4);
        assert_eq!(g.edge_count(), 4);
        assert!(g.has_edge(0, 2));
        assert!(g.has_edge(3, 2));
        assert!(!g.has_edge(0, 3));
    }

    #[test]
    fn test_parse_col_and_duplicates() {
        let g = parse("p col 3 2\ne 1 2\ne 2 1\n\n").unwrap();
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn test_write_then_parse() {
        let g = Graph::cycle(6);
        let text = to_string(&g);
        assert!(text.starts_with("p edge 6 6\n"));
        assert_eq!(parse(&text).unwrap(), g);
    }

    #[test]
    fn test_errors() {
        let err = parse("e 1 2\n").unwrap_err();
        assert!(matches!(err, DimacsError::Parse { line: 1, .. }));

        let err = parse("p edge 2 1\ne 1 3\n").unwrap_err();
        assert!(matches!(err, DimacsError::Parse { line: 2, .. }));
        assert!(err.to_string().contains("out of range"));

        let err = parse("p edge x 1\n").unwrap_err();
        assert!(err.to_string().contains("invalid vertex count"));

        let err = parse("c nothing here\n").unwrap_err();
        assert!(err.to_string().contains("missing problem line"));

        let err = parse("p edge 2 0\nq 1 2\n").unwrap_err();
        assert!(err.to_string().contains("unknown line type"));
    }

    #[test]
    fn test_huge_vertex_count() {
        let err = parse("p edge 18446744073709551615 0\n").unwrap_err();
        assert!(matches!(err, DimacsError::Parse { line: 1, .. }));
        assert!(err.to_string().contains("cannot allocate"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load("/nonexistent/graph.clq").unwrap_err();
        assert!(matches!(err, DimacsError::Io(_)));
    }
}
