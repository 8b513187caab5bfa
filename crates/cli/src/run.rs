use std::path::Path;
use std::time::Duration;
use std::time::Instant;

use heap::{FibonacciHeap, LazyBinaryHeap, LinearScanQueue, MinQueue, PairingHeap};
use sssp::Graph;
use sssp::ShortestPaths;
use sssp::dijkstra_fibonacci_heap;
use sssp::dijkstra_lazy_binary_heap;
use sssp::dijkstra_linear_scan;
use sssp::dijkstra_no_queue;
use sssp::dijkstra_pairing_heap;

use crate::error::HarnessError;
use crate::graph_io::read_graph;
use crate::trace::TraceOp;
use crate::trace::read_trace;

/// Which backend (or the queue-less control) a `run` command exercises.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Backend {
    Pairing,
    Fibonacci,
    LazyBinary,
    LinearScan,
    NoQueue,
}

impl Backend {
    pub fn label(self) -> &'static str {
        match self {
            Self::Pairing => "Pairing heap",
            Self::Fibonacci => "Fibonacci heap",
            Self::LazyBinary => "Lazy binary heap",
            Self::LinearScan => "Linear scan",
            Self::NoQueue => "No queue",
        }
    }
}

/// Replays a parsed trace against one backend, timing only the core calls.
///
/// Equal keys let a backend keep a different same-key twin alive than the
/// generating oracle did, so a decrease aimed at an element this backend
/// already popped is skipped. A decrease index beyond the adds seen so far,
/// or a pop on an empty queue, means the trace itself is broken.
fn replay<Q: MinQueue<()> + Default>(ops: &[TraceOp]) -> Result<Duration, HarnessError> {
    let start = Instant::now();
    let mut queue = Q::default();
    let mut handles: Vec<Q::Handle> = Vec::new();
    for (number, op) in ops.iter().enumerate() {
        match *op {
            TraceOp::Add(key) => handles.push(queue.add(key, ())),
            TraceOp::DecreaseKey(index, key) => {
                let handle = *handles.get(index).ok_or_else(|| {
                    HarnessError::Malformed(format!(
                        "operation {number}: decrease of element {index} before it was added"
                    ))
                })?;
                let _ = queue.decrease_key(handle, key);
            }
            TraceOp::Pop => {
                if queue.pop().is_err() {
                    return Err(HarnessError::Malformed(format!(
                        "operation {number}: pop on an empty queue"
                    )));
                }
            }
        }
    }
    Ok(start.elapsed())
}

/// Loads a trace file and replays it on the chosen backend. Parsing runs
/// before the timer starts.
pub fn time_trace(path: &Path, backend: Backend) -> Result<Duration, HarnessError> {
    let ops = read_trace(path)?;
    match backend {
        Backend::Pairing => replay::<PairingHeap<()>>(&ops),
        Backend::Fibonacci => replay::<FibonacciHeap<()>>(&ops),
        Backend::LazyBinary => replay::<LazyBinaryHeap<()>>(&ops),
        Backend::LinearScan => replay::<LinearScanQueue<()>>(&ops),
        // A queue-less trace replay is exactly the linear array scan.
        Backend::NoQueue => replay::<LinearScanQueue<()>>(&ops),
    }
}

/// Loads a graph file and times a full single-source run from vertex 0.
pub fn time_dijkstra(path: &Path, backend: Backend) -> Result<Duration, HarnessError> {
    let graph = read_graph(path)?;
    let solver: fn(&Graph, usize) -> ShortestPaths = match backend {
        Backend::Pairing => dijkstra_pairing_heap,
        Backend::Fibonacci => dijkstra_fibonacci_heap,
        Backend::LazyBinary => dijkstra_lazy_binary_heap,
        Backend::LinearScan => dijkstra_linear_scan,
        Backend::NoQueue => dijkstra_no_queue,
    };
    let start = Instant::now();
    let paths = solver(&graph, 0);
    let elapsed = start.elapsed();
    std::hint::black_box(paths);
    Ok(elapsed)
}
