mod dijkstra;
pub mod generator;
pub mod graph;

pub use dijkstra::PathEntry;
pub use dijkstra::ShortestPaths;
pub use dijkstra::dijkstra;
pub use dijkstra::dijkstra_fibonacci_heap;
pub use dijkstra::dijkstra_lazy_binary_heap;
pub use dijkstra::dijkstra_linear_scan;
pub use dijkstra::dijkstra_no_queue;
pub use dijkstra::dijkstra_pairing_heap;
pub use graph::Edge;
pub use graph::Graph;
