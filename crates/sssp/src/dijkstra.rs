use heap::{FibonacciHeap, LazyBinaryHeap, LinearScanQueue, MinQueue, PairingHeap};

use crate::graph::Graph;

/// Finalized shortest-path entry: distance from the source and the
/// predecessor on one shortest path. The source is its own predecessor.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PathEntry {
    pub dist: i64,
    pub pred: u32,
}

/// Per-vertex result table; unreachable vertices stay `None`.
pub type ShortestPaths = Vec<Option<PathEntry>>;

/// Dijkstra's single-source shortest paths, written once against the queue
/// contract and statically dispatched per backend. Precondition: all edge
/// weights are non-negative.
pub fn dijkstra<Q: MinQueue<usize> + Default>(graph: &Graph, source: usize) -> ShortestPaths {
    let n = graph.vertex_count();
    let mut paths: ShortestPaths = vec![None; n];
    if source >= n {
        return paths;
    }

    let mut queue = Q::default();
    let mut pending: Vec<Option<Q::Handle>> = vec![None; n];
    paths[source] = Some(PathEntry {
        dist: 0,
        pred: source as u32,
    });
    pending[source] = Some(queue.add(0, source));

    while !queue.is_empty() {
        let (dist, u) = queue.pop().expect("non-empty queue pops");
        pending[u] = None;

        for edge in graph.neighbors(u) {
            let v = edge.to as usize;
            let candidate = dist + edge.weight;
            match paths[v] {
                None => {
                    paths[v] = Some(PathEntry {
                        dist: candidate,
                        pred: u as u32,
                    });
                    pending[v] = Some(queue.add(candidate, v));
                }
                Some(entry) if candidate < entry.dist => {
                    // A finalized vertex cannot improve under non-negative
                    // weights, so the handle is still pending.
                    let handle = pending[v].expect("improvable vertex is still queued");
                    queue
                        .decrease_key(handle, candidate)
                        .expect("pending handle is live");
                    paths[v] = Some(PathEntry {
                        dist: candidate,
                        pred: u as u32,
                    });
                }
                Some(_) => {}
            }
        }
    }

    paths
}

pub fn dijkstra_pairing_heap(graph: &Graph, source: usize) -> ShortestPaths {
    dijkstra::<PairingHeap<usize>>(graph, source)
}

pub fn dijkstra_fibonacci_heap(graph: &Graph, source: usize) -> ShortestPaths {
    dijkstra::<FibonacciHeap<usize>>(graph, source)
}

pub fn dijkstra_lazy_binary_heap(graph: &Graph, source: usize) -> ShortestPaths {
    dijkstra::<LazyBinaryHeap<usize>>(graph, source)
}

pub fn dijkstra_linear_scan(graph: &Graph, source: usize) -> ShortestPaths {
    dijkstra::<LinearScanQueue<usize>>(graph, source)
}

/// The original O(V²) formulation: no queue structure at all, each round
/// linearly scans the discovered-but-unfinalized vertices for the minimum
/// and finalizes it. Distances match the queue-backed variants exactly.
pub fn dijkstra_no_queue(graph: &Graph, source: usize) -> ShortestPaths {
    let n = graph.vertex_count();
    let mut paths: ShortestPaths = vec![None; n];
    if source >= n {
        return paths;
    }

    let mut finalized = vec![false; n];
    paths[source] = Some(PathEntry {
        dist: 0,
        pred: source as u32,
    });

    loop {
        let mut nearest: Option<(usize, i64)> = None;
        for (v, entry) in paths.iter().enumerate() {
            if finalized[v] {
                continue;
            }
            if let Some(entry) = entry {
                if nearest.is_none_or(|(_, best)| entry.dist < best) {
                    nearest = Some((v, entry.dist));
                }
            }
        }
        let Some((u, dist)) = nearest else {
            break;
        };
        finalized[u] = true;

        for edge in graph.neighbors(u) {
            let v = edge.to as usize;
            let candidate = dist + edge.weight;
            match paths[v] {
                None => {
                    paths[v] = Some(PathEntry {
                        dist: candidate,
                        pred: u as u32,
                    });
                }
                Some(entry) if candidate < entry.dist => {
                    paths[v] = Some(PathEntry {
                        dist: candidate,
                        pred: u as u32,
                    });
                }
                Some(_) => {}
            }
        }
    }

    paths
}
