mod fibonacci;
mod lazy_binary;
mod linear_scan;
mod pairing;

pub use fibonacci::FibonacciHeap;
pub use lazy_binary::LazyBinaryHeap;
pub use linear_scan::LinearScanQueue;
pub use pairing::PairingHeap;

use std::fmt;

/// Ordering key shared by every queue backend. Trace and graph generators
/// draw keys from `[-1_000_000_000, 1_000_000_000]`, but any `i64` is legal.
pub type Key = i64;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum HeapError {
    /// `pop` on a zero-size queue, or a lazily-deleted backend exhausting
    /// its entry array without finding a live element.
    Empty,
    /// The handle's element was already popped or removed.
    InvalidHandle,
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeapError::Empty => write!(f, "queue is empty"),
            HeapError::InvalidHandle => write!(f, "handle refers to a removed element"),
        }
    }
}

impl std::error::Error for HeapError {}

/// Addressable min-queue contract.
///
/// - `add` returns a handle that stays valid until the element is popped or
///   removed; using it afterwards is `Err(InvalidHandle)`.
/// - `decrease_key` requires `new_key <=` the element's current key. This is
///   a documented precondition: debug builds assert it, release builds do
///   not and a violation corrupts the heap order.
/// - `peek_min` takes `&mut self` so lazily-deleted backends may prune stale
///   entries while answering.
/// - Handles are local to the queue instance that issued them.
pub trait MinQueue<T> {
    type Handle: Copy + Eq + fmt::Debug;

    fn add(&mut self, key: Key, item: T) -> Self::Handle;
    fn peek_min(&mut self) -> Option<(Key, &T)>;
    fn pop(&mut self) -> Result<(Key, T), HeapError>;
    fn decrease_key(&mut self, handle: Self::Handle, new_key: Key) -> Result<(), HeapError>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Queues that can evict an arbitrary live element by handle.
pub trait RemovableQueue<T>: MinQueue<T> {
    fn remove(&mut self, handle: Self::Handle) -> Result<(Key, T), HeapError>;
}

#[cfg(test)]
mod tests {
    use rand::Rng;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::{
        FibonacciHeap, HeapError, Key, LazyBinaryHeap, LinearScanQueue, MinQueue, PairingHeap,
        RemovableQueue,
    };

    const MIN_KEY: Key = -1_000_000_000;
    const MAX_KEY: Key = 1_000_000_000;

    fn oracle_min(oracle: &[Option<Key>]) -> Option<Key> {
        oracle.iter().flatten().copied().min()
    }

    /// Drives a backend through a random add/decrease/pop mix and checks
    /// every pop against a tombstoning array oracle: the popped key must be
    /// the oracle minimum and must belong to a live element holding it.
    fn exercise<Q: MinQueue<usize> + Default>(seed: u64, ops: usize) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut queue = Q::default();
        let mut oracle: Vec<Option<Key>> = Vec::new();
        let mut handles: Vec<Option<Q::Handle>> = Vec::new();
        let mut live = 0_usize;

        for step in 0..ops {
            match rng.random_range(0..3_u32) {
                0 => {
                    let key = rng.random_range(MIN_KEY..=MAX_KEY);
                    let handle = queue.add(key, oracle.len());
                    oracle.push(Some(key));
                    handles.push(Some(handle));
                    live += 1;
                }
                1 if live > 0 => {
                    let mut index = rng.random_range(0..oracle.len());
                    while oracle[index].is_none() {
                        index = rng.random_range(0..oracle.len());
                    }
                    let current = oracle[index].unwrap();
                    let new_key = rng.random_range(MIN_KEY..=current);
                    queue
                        .decrease_key(handles[index].unwrap(), new_key)
                        .unwrap();
                    oracle[index] = Some(new_key);
                }
                2 if live > 0 => {
                    let expected = oracle_min(&oracle).unwrap();
                    let (key, index) = queue.pop().unwrap();
                    assert_eq!(key, expected, "seed={seed} step={step}");
                    assert_eq!(oracle[index], Some(key), "seed={seed} step={step}");
                    oracle[index] = None;
                    handles[index] = None;
                    live -= 1;
                }
                _ => {}
            }
            assert_eq!(queue.len(), live, "seed={seed} step={step}");
        }

        while live > 0 {
            let expected = oracle_min(&oracle).unwrap();
            let (key, index) = queue.pop().unwrap();
            assert_eq!(key, expected, "seed={seed} drain");
            assert_eq!(oracle[index], Some(key), "seed={seed} drain");
            oracle[index] = None;
            live -= 1;
        }
        assert_eq!(queue.len(), 0);
        assert!(queue.peek_min().is_none());
        assert_eq!(queue.pop(), Err(HeapError::Empty));
    }

    #[test]
    fn pairing_matches_oracle() {
        for seed in 0..12_u64 {
            exercise::<PairingHeap<usize>>(0xA110_0000 + seed, 600);
        }
    }

    #[test]
    fn fibonacci_matches_oracle() {
        for seed in 0..12_u64 {
            exercise::<FibonacciHeap<usize>>(0xF1B0_0000 + seed, 600);
        }
    }

    #[test]
    fn lazy_binary_matches_oracle() {
        for seed in 0..12_u64 {
            exercise::<LazyBinaryHeap<usize>>(0xB1A0_0000 + seed, 600);
        }
    }

    #[test]
    fn linear_scan_matches_oracle() {
        for seed in 0..8_u64 {
            exercise::<LinearScanQueue<usize>>(0x5CA0_0000 + seed, 300);
        }
    }

    fn pops_sorted<Q: MinQueue<usize> + Default>(seed: u64, count: usize) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut queue = Q::default();
        for i in 0..count {
            queue.add(rng.random_range(MIN_KEY..=MAX_KEY), i);
        }
        let mut previous = Key::MIN;
        for _ in 0..count {
            let (key, _) = queue.pop().unwrap();
            assert!(key >= previous, "seed={seed}");
            previous = key;
        }
        assert_eq!(queue.pop(), Err(HeapError::Empty));
    }

    #[test]
    fn pops_are_non_decreasing() {
        pops_sorted::<PairingHeap<usize>>(1, 500);
        pops_sorted::<FibonacciHeap<usize>>(2, 500);
        pops_sorted::<LazyBinaryHeap<usize>>(3, 500);
        pops_sorted::<LinearScanQueue<usize>>(4, 200);
    }

    /// The fixed trace `a 5, a 3, a 8, p, d 2 1, p, p`: add-order index 2 is
    /// the node holding 8, decreased to 1 after the first pop.
    fn scenario_trace<Q: MinQueue<()> + Default>() {
        let mut queue = Q::default();
        let mut handles = Vec::new();
        handles.push(queue.add(5, ()));
        handles.push(queue.add(3, ()));
        handles.push(queue.add(8, ()));
        assert_eq!(queue.pop().unwrap().0, 3);
        queue.decrease_key(handles[2], 1).unwrap();
        assert_eq!(queue.pop().unwrap().0, 1);
        assert_eq!(queue.pop().unwrap().0, 5);
        assert_eq!(queue.len(), 0);
    }

    #[test]
    fn fixed_trace_pops_in_order() {
        scenario_trace::<PairingHeap<()>>();
        scenario_trace::<FibonacciHeap<()>>();
        scenario_trace::<LazyBinaryHeap<()>>();
        scenario_trace::<LinearScanQueue<()>>();
    }

    /// Removal drops the size by one and leaves the pop order of the
    /// survivors untouched.
    fn remove_keeps_survivor_order<Q: RemovableQueue<usize> + Default>(seed: u64) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut queue = Q::default();
        let mut keys = Vec::new();
        let mut handles = Vec::new();
        for i in 0..400 {
            let key = rng.random_range(MIN_KEY..=MAX_KEY);
            handles.push(queue.add(key, i));
            keys.push(Some(key));
        }

        for _ in 0..150 {
            let mut index = rng.random_range(0..keys.len());
            while keys[index].is_none() {
                index = rng.random_range(0..keys.len());
            }
            let before = queue.len();
            let (key, item) = queue.remove(handles[index]).unwrap();
            assert_eq!(queue.len(), before - 1, "seed={seed}");
            assert_eq!(key, keys[index].unwrap(), "seed={seed}");
            assert_eq!(item, index, "seed={seed}");
            keys[index] = None;
            assert_eq!(
                queue.remove(handles[index]),
                Err(HeapError::InvalidHandle),
                "seed={seed}"
            );
        }

        let mut survivors: Vec<Key> = keys.iter().flatten().copied().collect();
        survivors.sort_unstable();
        for expected in survivors {
            assert_eq!(queue.pop().unwrap().0, expected, "seed={seed}");
        }
        assert!(queue.is_empty());
        assert!(queue.peek_min().is_none());
    }

    #[test]
    fn pairing_remove() {
        for seed in 0..6_u64 {
            remove_keeps_survivor_order::<PairingHeap<usize>>(0x4E40_0000 + seed);
        }
    }

    #[test]
    fn fibonacci_remove() {
        for seed in 0..6_u64 {
            remove_keeps_survivor_order::<FibonacciHeap<usize>>(0x4E40_1000 + seed);
        }
    }

    fn stale_handle_is_rejected<Q: MinQueue<()> + Default>() {
        let mut queue = Q::default();
        let handle = queue.add(7, ());
        queue.add(9, ());
        assert_eq!(queue.pop().unwrap().0, 7);
        assert_eq!(
            queue.decrease_key(handle, 1),
            Err(HeapError::InvalidHandle)
        );
    }

    #[test]
    fn stale_handles_are_rejected() {
        stale_handle_is_rejected::<PairingHeap<()>>();
        stale_handle_is_rejected::<FibonacciHeap<()>>();
        stale_handle_is_rejected::<LazyBinaryHeap<()>>();
        stale_handle_is_rejected::<LinearScanQueue<()>>();
    }

    #[test]
    fn reused_arena_slot_invalidates_old_handle() {
        let mut heap = PairingHeap::new();
        let first = heap.add(10, "a");
        heap.pop().unwrap();
        // The freed slot is recycled for the next insertion.
        let second = heap.add(20, "b");
        assert_eq!(heap.decrease_key(first, 5), Err(HeapError::InvalidHandle));
        heap.decrease_key(second, 5).unwrap();
        assert_eq!(heap.pop().unwrap(), (5, "b"));

        let mut heap = FibonacciHeap::new();
        let first = heap.add(10, "a");
        heap.pop().unwrap();
        let second = heap.add(20, "b");
        assert_eq!(heap.decrease_key(first, 5), Err(HeapError::InvalidHandle));
        heap.decrease_key(second, 5).unwrap();
        assert_eq!(heap.pop().unwrap(), (5, "b"));
    }

    #[test]
    fn peek_tracks_minimum() {
        let mut queue = FibonacciHeap::new();
        assert!(queue.peek_min().is_none());
        queue.add(4, "d");
        let handle = queue.add(9, "i");
        assert_eq!(queue.peek_min(), Some((4, &"d")));
        queue.decrease_key(handle, 2).unwrap();
        assert_eq!(queue.peek_min(), Some((2, &"i")));
        queue.pop().unwrap();
        assert_eq!(queue.peek_min(), Some((4, &"d")));
    }

    #[test]
    fn duplicate_keys_drain_completely() {
        let mut queue = PairingHeap::new();
        for i in 0..64 {
            queue.add(7, i);
        }
        for _ in 0..64 {
            assert_eq!(queue.pop().unwrap().0, 7);
        }
        assert_eq!(queue.pop(), Err(HeapError::Empty));
    }
}
