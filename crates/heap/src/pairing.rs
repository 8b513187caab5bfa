use crate::{HeapError, Key, MinQueue, RemovableQueue};

/// Handle into a [`PairingHeap`]. Carries the arena slot and the slot's
/// generation at insertion time; a recycled slot bumps the generation, so a
/// stale handle resolves to `InvalidHandle` instead of aliasing the new
/// occupant.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PairingHandle {
    slot: u32,
    generation: u32,
}

struct Node<T> {
    key: Key,
    item: T,
    // First child.
    child: Option<u32>,
    // Next sibling in the parent's child list.
    sibling: Option<u32>,
    // Parent when first child, left sibling otherwise. None for the root.
    prev: Option<u32>,
}

struct Slot<T> {
    generation: u32,
    node: Option<Node<T>>,
}

/// Pairing heap over an index arena: half-ordered tree with a
/// single-child/sibling-list shape, two-pass merge on pop.
pub struct PairingHeap<T> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
    root: Option<u32>,
    len: usize,
}

impl<T> PairingHeap<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            root: None,
            len: 0,
        }
    }

    fn node(&self, index: u32) -> &Node<T> {
        self.slots[index as usize]
            .node
            .as_ref()
            .expect("arena index points at a live node")
    }

    fn node_mut(&mut self, index: u32) -> &mut Node<T> {
        self.slots[index as usize]
            .node
            .as_mut()
            .expect("arena index points at a live node")
    }

    fn alloc(&mut self, key: Key, item: T) -> u32 {
        let node = Node {
            key,
            item,
            child: None,
            sibling: None,
            prev: None,
        };
        match self.free.pop() {
            Some(index) => {
                self.slots[index as usize].node = Some(node);
                index
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    node: Some(node),
                });
                (self.slots.len() - 1) as u32
            }
        }
    }

    fn release(&mut self, index: u32) -> (Key, T) {
        let slot = &mut self.slots[index as usize];
        let node = slot.node.take().expect("released slot was live");
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(index);
        (node.key, node.item)
    }

    fn resolve(&self, handle: PairingHandle) -> Result<u32, HeapError> {
        match self.slots.get(handle.slot as usize) {
            Some(slot) if slot.generation == handle.generation && slot.node.is_some() => {
                Ok(handle.slot)
            }
            _ => Err(HeapError::InvalidHandle),
        }
    }

    /// Melds two detached trees; the smaller key wins and the loser becomes
    /// its first child. A tie goes to `a`.
    fn meld(&mut self, a: u32, b: u32) -> u32 {
        let (winner, loser) = if self.node(a).key <= self.node(b).key {
            (a, b)
        } else {
            (b, a)
        };
        let first = self.node(winner).child;
        {
            let node = self.node_mut(loser);
            node.prev = Some(winner);
            node.sibling = first;
        }
        if let Some(next) = first {
            self.node_mut(next).prev = Some(loser);
        }
        self.node_mut(winner).child = Some(loser);
        winner
    }

    /// Unlinks a non-root node from its parent's child list.
    fn detach(&mut self, index: u32) {
        let (prev, sibling) = {
            let node = self.node(index);
            (node.prev, node.sibling)
        };
        let Some(prev) = prev else { return };
        if self.node(prev).child == Some(index) {
            self.node_mut(prev).child = sibling;
        } else {
            self.node_mut(prev).sibling = sibling;
        }
        if let Some(next) = sibling {
            self.node_mut(next).prev = Some(prev);
        }
        let node = self.node_mut(index);
        node.prev = None;
        node.sibling = None;
    }

    /// Standard two-pass pairing: pair adjacent siblings left to right, then
    /// fold the pair winners right to left.
    fn merge_pairs(&mut self, first: u32) -> u32 {
        let mut pairs = Vec::new();
        let mut current = Some(first);
        while let Some(a) = current {
            let second = self.node(a).sibling;
            {
                let node = self.node_mut(a);
                node.sibling = None;
                node.prev = None;
            }
            match second {
                Some(b) => {
                    let next = self.node(b).sibling;
                    {
                        let node = self.node_mut(b);
                        node.sibling = None;
                        node.prev = None;
                    }
                    pairs.push(self.meld(a, b));
                    current = next;
                }
                None => {
                    pairs.push(a);
                    current = None;
                }
            }
        }

        let mut merged = pairs.pop().expect("child list is non-empty");
        while let Some(tree) = pairs.pop() {
            merged = self.meld(tree, merged);
        }
        merged
    }
}

impl<T> Default for PairingHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> MinQueue<T> for PairingHeap<T> {
    type Handle = PairingHandle;

    fn add(&mut self, key: Key, item: T) -> PairingHandle {
        let index = self.alloc(key, item);
        self.root = Some(match self.root {
            Some(root) => self.meld(index, root),
            None => index,
        });
        self.len += 1;
        PairingHandle {
            slot: index,
            generation: self.slots[index as usize].generation,
        }
    }

    fn peek_min(&mut self) -> Option<(Key, &T)> {
        let root = self.root?;
        let node = self.node(root);
        Some((node.key, &node.item))
    }

    fn pop(&mut self) -> Result<(Key, T), HeapError> {
        let root = self.root.ok_or(HeapError::Empty)?;
        let child = self.node(root).child;
        self.root = child.map(|first| self.merge_pairs(first));
        self.len -= 1;
        Ok(self.release(root))
    }

    fn decrease_key(&mut self, handle: PairingHandle, new_key: Key) -> Result<(), HeapError> {
        let index = self.resolve(handle)?;
        debug_assert!(
            new_key <= self.node(index).key,
            "decrease_key must not raise the key"
        );
        self.node_mut(index).key = new_key;
        if self.root == Some(index) {
            return Ok(());
        }
        self.detach(index);
        let root = self.root.expect("a non-root node implies a root");
        self.root = Some(self.meld(index, root));
        Ok(())
    }

    fn len(&self) -> usize {
        self.len
    }
}

impl<T> RemovableQueue<T> for PairingHeap<T> {
    fn remove(&mut self, handle: PairingHandle) -> Result<(Key, T), HeapError> {
        let index = self.resolve(handle)?;
        if self.root == Some(index) {
            return self.pop();
        }
        self.detach(index);
        if let Some(first) = self.node(index).child {
            let subtree = self.merge_pairs(first);
            let root = self.root.expect("a non-root node implies a root");
            self.root = Some(self.meld(subtree, root));
        }
        self.len -= 1;
        Ok(self.release(index))
    }
}
