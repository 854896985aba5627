use crate::arena::{Arena, NodeId, Slot};
use crate::deque::{Node, StableDeque};
use std::collections::vec_deque;
use std::fmt;
use std::iter::{FromIterator, FusedIterator};
use std::marker::PhantomData;

/// An iterator over the elements of a `StableDeque`.
///
/// It walks the node store front to back, resolving each node id in turn,
/// so every step is *O*(1) whichever half the element lives in.
///
/// # Examples
///
/// ```compile_fail
/// use stable_deque::StableDeque;
/// use std::iter::FromIterator;
///
/// let mut deque = StableDeque::from_iter([1, 2, 3]);
/// let mut iter = deque.iter();
///
/// // Won't compile, because deque is already borrowed immutably.
/// deque.push_back(4);
/// println!("{:?}", iter.next());
/// ```
pub struct Iter<'a, T: 'a> {
    deque: &'a StableDeque<T>,
    ids: vec_deque::Iter<'a, NodeId>,
}

impl<'a, T: 'a> Iter<'a, T> {
    pub(crate) fn new(deque: &'a StableDeque<T>) -> Self {
        let ids = deque.store().range(..deque.len());
        Self { deque, ids }
    }
}

impl<'a, T: 'a> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Self {
            deque: self.deque,
            ids: self.ids.clone(),
        }
    }
}

impl<'a, T: fmt::Debug + 'a> fmt::Debug for Iter<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Iter").field(&self.clone().collect::<Vec<_>>()).finish()
    }
}

impl<'a, T: 'a> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let deque = self.deque;
        self.ids.next().map(|&id| &deque.node(id).element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ids.size_hint()
    }

    fn last(mut self) -> Option<Self::Item>
    where
        Self: Sized,
    {
        self.next_back()
    }
}

impl<'a, T: 'a> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let deque = self.deque;
        self.ids.next_back().map(|&id| &deque.node(id).element)
    }
}

impl<'a, T: 'a> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T: 'a> FusedIterator for Iter<'a, T> {}

/// A mutable iterator over the elements of a `StableDeque`.
///
/// Node ids in the store are distinct, so the nodes it hands out never
/// alias. It keeps a raw pointer to the node slots and a phantom marker of
/// `&'a mut T` to hold the deque borrowed.
///
/// # Examples
///
/// `StableDeque` is not readable after an `IterMut` is created.
/// ```compile_fail
/// use stable_deque::StableDeque;
/// use std::iter::FromIterator;
///
/// let mut deque = StableDeque::from_iter([1, 2, 3]);
/// let mut iter = deque.iter_mut();
/// println!("{:?}", deque.back());
/// println!("{:?}", iter.next());
/// ```
pub struct IterMut<'a, T: 'a> {
    slots: *mut Slot<Node<T>>,
    ids: vec_deque::Iter<'a, NodeId>,
    _marker: PhantomData<&'a mut T>,
}

impl<'a, T: 'a> IterMut<'a, T> {
    pub(crate) fn new(deque: &'a mut StableDeque<T>) -> Self {
        let len = deque.len();
        let (nodes, store) = deque.split_parts();
        Self {
            slots: nodes.slots_ptr(),
            ids: store.range(..len),
            _marker: PhantomData,
        }
    }

    fn resolve(&mut self, id: NodeId) -> Option<&'a mut T> {
        // SAFETY: every id in the store names a live slot of the arena the
        // pointer was taken from, which stays mutably borrowed for `'a`.
        // Each id is yielded at most once, so no two references alias.
        let slot = unsafe { &mut *self.slots.add(id.index()) };
        slot.get_mut(id).map(|node| &mut node.element)
    }
}

impl<'a, T: 'a> fmt::Debug for IterMut<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IterMut")
            .field("remaining", &self.ids.len())
            .finish()
    }
}

impl<'a, T: 'a> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        let id = *self.ids.next()?;
        self.resolve(id)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ids.size_hint()
    }

    fn last(mut self) -> Option<Self::Item>
    where
        Self: Sized,
    {
        self.next_back()
    }
}

impl<'a, T: 'a> DoubleEndedIterator for IterMut<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let id = *self.ids.next_back()?;
        self.resolve(id)
    }
}

impl<'a, T: 'a> ExactSizeIterator for IterMut<'a, T> {}

impl<'a, T: 'a> FusedIterator for IterMut<'a, T> {}

unsafe impl<T: Send> Send for IterMut<'_, T> {}

unsafe impl<T: Sync> Sync for IterMut<'_, T> {}

/// An owning iterator over the elements of a `StableDeque`.
///
/// This `struct` is created by the [`into_iter`] method on [`StableDeque`]
/// (provided by the `IntoIterator` trait). It takes nodes straight out of
/// the node storage, so it never pays for renumbering a half.
///
/// [`into_iter`]: StableDeque::into_iter
pub struct IntoIter<T> {
    nodes: Arena<Node<T>>,
    ids: vec_deque::IntoIter<NodeId>,
}

impl<T> IntoIter<T> {
    fn take(&mut self, id: NodeId) -> Option<T> {
        self.nodes.remove(id).map(|node| node.element)
    }
}

impl<T> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntoIter")
            .field("remaining", &self.ids.len())
            .finish()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.ids.next()?;
        self.take(id)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ids.size_hint()
    }

    fn last(mut self) -> Option<Self::Item>
    where
        Self: Sized,
    {
        self.next_back()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let id = self.ids.next_back()?;
        self.take(id)
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> IntoIterator for StableDeque<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        let (nodes, mut store) = self.into_parts();
        store.pop_back();
        IntoIter {
            nodes,
            ids: store.into_iter(),
        }
    }
}

impl<'a, T> IntoIterator for &'a StableDeque<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut StableDeque<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// Collects into the right half, back to back.
impl<T> FromIterator<T> for StableDeque<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut deque = StableDeque::new();
        deque.extend(iter);
        deque
    }
}

impl<T> Extend<T> for StableDeque<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);
        iter.for_each(|item| self.push_back(item));
    }
}

impl<'a, T: 'a + Copy> Extend<&'a T> for StableDeque<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied())
    }
}
