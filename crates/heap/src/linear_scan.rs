use crate::{HeapError, Key, MinQueue};

/// O(n)-per-pop baseline: a slot vector and nothing else. `add` appends,
/// `decrease_key` overwrites in place, `pop` scans for the minimum live slot
/// and tombstones it. Serves as the algorithmic control for measuring what
/// the real queue structures buy.
pub struct LinearScanQueue<T> {
    slots: Vec<Option<(Key, T)>>,
    live: usize,
}

impl<T> LinearScanQueue<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            live: 0,
        }
    }

    /// Index of the minimum live slot; the lowest index wins ties.
    fn min_slot(&self) -> Option<usize> {
        let mut best: Option<(usize, Key)> = None;
        for (index, slot) in self.slots.iter().enumerate() {
            if let Some((key, _)) = slot {
                if best.is_none_or(|(_, best_key)| *key < best_key) {
                    best = Some((index, *key));
                }
            }
        }
        best.map(|(index, _)| index)
    }
}

impl<T> Default for LinearScanQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> MinQueue<T> for LinearScanQueue<T> {
    type Handle = usize;

    fn add(&mut self, key: Key, item: T) -> usize {
        self.slots.push(Some((key, item)));
        self.live += 1;
        self.slots.len() - 1
    }

    fn peek_min(&mut self) -> Option<(Key, &T)> {
        let index = self.min_slot()?;
        let (key, item) = self.slots[index].as_ref().expect("min slot is live");
        Some((*key, item))
    }

    fn pop(&mut self) -> Result<(Key, T), HeapError> {
        let index = self.min_slot().ok_or(HeapError::Empty)?;
        let (key, item) = self.slots[index].take().expect("min slot is live");
        self.live -= 1;
        Ok((key, item))
    }

    fn decrease_key(&mut self, handle: usize, new_key: Key) -> Result<(), HeapError> {
        let slot = self
            .slots
            .get_mut(handle)
            .and_then(|slot| slot.as_mut())
            .ok_or(HeapError::InvalidHandle)?;
        debug_assert!(new_key <= slot.0, "decrease_key must not raise the key");
        slot.0 = new_key;
        Ok(())
    }

    fn len(&self) -> usize {
        self.live
    }
}
