#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Edge {
    pub weight: i64,
    pub to: u32,
}

/// Adjacency-list graph: vertex index to an ordered sequence of out-edges.
/// Undirected graphs store both directions. Weights must be non-negative
/// for the shortest-path solvers; that is a caller precondition, not
/// checked at runtime.
#[derive(Clone, Debug, Default)]
pub struct Graph {
    adj: Vec<Vec<Edge>>,
}

impl Graph {
    pub fn with_vertices(vertex_count: usize) -> Self {
        Self {
            adj: vec![Vec::new(); vertex_count],
        }
    }

    /// Wraps a prebuilt adjacency list; any directed structure is a legal
    /// solver input.
    pub fn from_adjacency(adj: Vec<Vec<Edge>>) -> Self {
        let vertex_count = adj.len();
        for edges in &adj {
            for edge in edges {
                assert!(
                    (edge.to as usize) < vertex_count,
                    "edge target out of range"
                );
            }
        }
        Self { adj }
    }

    pub fn add_arc(&mut self, from: usize, to: usize, weight: i64) {
        assert!(to < self.adj.len(), "edge target out of range");
        self.adj[from].push(Edge {
            weight,
            to: to as u32,
        });
    }

    pub fn add_undirected(&mut self, u: usize, v: usize, weight: i64) {
        self.add_arc(u, v, weight);
        self.add_arc(v, u, weight);
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.adj.len()
    }

    /// Number of stored arcs; an undirected edge counts twice.
    #[inline]
    pub fn arc_count(&self) -> usize {
        self.adj.iter().map(Vec::len).sum()
    }

    #[inline]
    pub fn neighbors(&self, u: usize) -> &[Edge] {
        &self.adj[u]
    }
}
