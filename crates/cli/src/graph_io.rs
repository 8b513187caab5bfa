use std::fs;
use std::fs::File;
use std::io::BufWriter;
use std::io::Write;
use std::path::Path;

use sssp::Graph;

use crate::error::HarnessError;

/// Writes a weighted undirected graph: a `graph <n>` header, then one line
/// per vertex `u` with a `weight,neighbor` token for every neighbor above
/// `u`. Each undirected edge is stored once; the reader rebuilds both
/// directions.
pub fn write_graph(path: &Path, graph: &Graph) -> Result<(), HarnessError> {
    let mut out = BufWriter::new(File::create(path)?);
    let n = graph.vertex_count();
    writeln!(out, "graph {n}")?;
    for u in 0..n {
        let mut first = true;
        for edge in graph.neighbors(u) {
            if (edge.to as usize) > u {
                if !first {
                    write!(out, " ")?;
                }
                write!(out, "{},{}", edge.weight, edge.to)?;
                first = false;
            }
        }
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}

pub fn read_graph(path: &Path) -> Result<Graph, HarnessError> {
    let text = fs::read_to_string(path)?;
    let mut lines = text.lines();

    let header = lines.next().unwrap_or_default();
    let mut parts = header.split_whitespace();
    if parts.next() != Some("graph") {
        return Err(HarnessError::Malformed(
            "not a graph file: missing `graph <n>` header".to_string(),
        ));
    }
    let n: usize = parts
        .next()
        .and_then(|token| token.parse().ok())
        .ok_or_else(|| HarnessError::Malformed("bad vertex count in header".to_string()))?;

    let mut graph = Graph::with_vertices(n);
    for (u, line) in lines.take(n).enumerate() {
        for token in line.split_whitespace() {
            let (weight, neighbor) = token.split_once(',').ok_or_else(|| {
                HarnessError::Malformed(format!("vertex {u}: bad edge token `{token}`"))
            })?;
            let weight: i64 = weight.parse().map_err(|_| {
                HarnessError::Malformed(format!("vertex {u}: bad weight `{weight}`"))
            })?;
            let v: usize = neighbor.parse().map_err(|_| {
                HarnessError::Malformed(format!("vertex {u}: bad neighbor `{neighbor}`"))
            })?;
            if v >= n {
                return Err(HarnessError::Malformed(format!(
                    "vertex {u}: neighbor {v} out of range"
                )));
            }
            graph.add_undirected(u, v, weight);
        }
    }
    Ok(graph)
}
