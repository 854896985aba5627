//! Slab storage for deque nodes.
//!
//! Nodes are addressed by [`NodeId`], a slot index paired with the slot's
//! generation. Removing a node bumps the generation of its slot, so an id
//! taken before the removal never resolves to a node inserted later into the
//! same slot.

use std::collections::TryReserveError;

/// A stable, generation-checked handle to a node in an [`Arena`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub(crate) struct NodeId {
    index: usize,
    generation: u32,
}

impl NodeId {
    /// The id of the past-the-end node. It never resolves in an arena.
    pub(crate) const SENTINEL: NodeId = NodeId {
        index: usize::MAX,
        generation: u32::MAX,
    };

    pub(crate) fn is_sentinel(self) -> bool {
        self == Self::SENTINEL
    }

    pub(crate) fn index(self) -> usize {
        self.index
    }
}

pub(crate) enum Slot<T> {
    Occupied { generation: u32, value: T },
    Vacant { generation: u32, next_free: Option<usize> },
}

impl<T> Slot<T> {
    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        match self {
            Slot::Occupied { generation, value } if *generation == id.generation => Some(value),
            _ => None,
        }
    }
}

pub(crate) struct Arena<T> {
    slots: Vec<Slot<T>>,
    free_head: Option<usize>,
    len: usize,
}

impl<T> Arena<T> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_head: None,
            len: 0,
        }
    }

    /// Number of occupied slots.
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    fn vacant(&self) -> usize {
        self.slots.len() - self.len
    }

    /// Make sure `additional` more values can be inserted without allocating.
    pub(crate) fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        self.slots
            .try_reserve(additional.saturating_sub(self.vacant()))
    }

    pub(crate) fn reserve(&mut self, additional: usize) {
        self.slots.reserve(additional.saturating_sub(self.vacant()));
    }

    pub(crate) fn insert(&mut self, value: T) -> NodeId {
        self.len += 1;
        match self.free_head {
            Some(index) => {
                let slot = &mut self.slots[index];
                let generation = match *slot {
                    Slot::Vacant {
                        generation,
                        next_free,
                    } => {
                        self.free_head = next_free;
                        generation
                    }
                    Slot::Occupied { .. } => unreachable!("free list points at an occupied slot"),
                };
                *slot = Slot::Occupied { generation, value };
                NodeId { index, generation }
            }
            None => {
                let index = self.slots.len();
                self.slots.push(Slot::Occupied {
                    generation: 0,
                    value,
                });
                NodeId {
                    index,
                    generation: 0,
                }
            }
        }
    }

    pub(crate) fn remove(&mut self, id: NodeId) -> Option<T> {
        let slot = self.slots.get_mut(id.index)?;
        match slot {
            Slot::Occupied { generation, .. } if *generation == id.generation => {}
            _ => return None,
        }
        let vacant = Slot::Vacant {
            generation: id.generation.wrapping_add(1),
            next_free: self.free_head,
        };
        self.free_head = Some(id.index);
        self.len -= 1;
        match std::mem::replace(slot, vacant) {
            Slot::Occupied { value, .. } => Some(value),
            Slot::Vacant { .. } => unreachable!(),
        }
    }

    pub(crate) fn get(&self, id: NodeId) -> Option<&T> {
        match self.slots.get(id.index)? {
            Slot::Occupied { generation, value } if *generation == id.generation => Some(value),
            _ => None,
        }
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.slots.get_mut(id.index)?.get_mut(id)
    }

    /// Raw pointer to the first slot, for handing out disjoint mutable
    /// borrows of several nodes at once.
    pub(crate) fn slots_ptr(&mut self) -> *mut Slot<T> {
        self.slots.as_mut_ptr()
    }
}

#[cfg(test)]
mod tests {
    use super::{Arena, NodeId};

    #[test]
    fn arena_insert_and_remove() {
        let mut arena = Arena::with_capacity(0);
        let a = arena.insert("a");
        let b = arena.insert("b");
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.get(a), Some(&"a"));
        assert_eq!(arena.get(b), Some(&"b"));

        assert_eq!(arena.remove(a), Some("a"));
        assert_eq!(arena.remove(a), None);
        assert_eq!(arena.get(a), None);
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn arena_reuses_slots_with_new_generation() {
        let mut arena = Arena::with_capacity(0);
        let a = arena.insert(1);
        arena.remove(a);
        let b = arena.insert(2);
        assert_eq!(a.index(), b.index());
        assert_ne!(a, b);
        assert_eq!(arena.get(a), None);
        assert_eq!(arena.get_mut(b).map(|v| *v), Some(2));
    }

    #[test]
    fn arena_sentinel_never_resolves() {
        let mut arena = Arena::with_capacity(0);
        arena.insert(0);
        assert!(NodeId::SENTINEL.is_sentinel());
        assert_eq!(arena.get(NodeId::SENTINEL), None);
        assert_eq!(arena.remove(NodeId::SENTINEL), None);
    }

    #[test]
    fn arena_reserve_counts_vacant_slots() {
        let mut arena = Arena::with_capacity(0);
        let ids: Vec<_> = (0..4).map(|i| arena.insert(i)).collect();
        ids.into_iter().for_each(|id| {
            arena.remove(id);
        });
        assert!(arena.try_reserve(4).is_ok());
        assert!(arena.try_reserve(usize::MAX).is_err());
        assert_eq!(arena.len(), 0);
    }
}
