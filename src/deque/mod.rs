use std::cmp::Ordering;
use std::collections::VecDeque;
use std::fmt::{Debug, Formatter};
use std::ops::{Index, IndexMut, Range};

use log::{debug, trace};

use crate::arena::{Arena, NodeId};
use crate::deque::cursor::{Cursor, CursorMut, Handle, Side};
use crate::{Error, Iter, IterMut};

pub mod cursor;
pub mod iterator;

mod algorithms;

/// The `StableDeque` is a double-ended queue whose elements never move once
/// inserted. Handles to an element stay valid until that element is erased,
/// no matter what else is pushed, inserted or erased in the meantime.
///
/// The `StableDeque` contains:
/// - `nodes`, the storage owning every element together with its `pos`;
/// - `store`, the node store: one node id per element in logical order,
///   followed by the sentinel id of the end position;
/// - `middle`, the store index of the last node of the left half, or `-1`
///   when the left half is empty.
///
/// # Naming Conventions
///
/// - *index*: the logical position of an element, which is also its position
///   in the node store;
/// - *pos*: the offset of a node from the middle, counted on its own side.
///   Left nodes count leftward from `middle`, right nodes count rightward
///   from `middle + 1`.
pub struct StableDeque<T> {
    nodes: Arena<Node<T>>,
    store: VecDeque<NodeId>,
    middle: isize,
}

pub(crate) struct Node<T> {
    pub(crate) element: T,
    pos: usize,
}

/// Which half an insertion lands in.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Placement {
    /// Left when inserting at the boundary of an empty left half, otherwise
    /// the side of the handle inserted before.
    Infer,
    ForceLeft,
    ForceRight,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Shift {
    Up,
    Down,
}

// private methods
impl<T> StableDeque<T> {
    fn left_len(&self) -> usize {
        (self.middle + 1) as usize
    }

    fn right_len(&self) -> usize {
        self.store.len() - 1 - self.left_len()
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node<T> {
        match self.nodes.get(id) {
            Some(node) => node,
            None => panic!("Cannot use a handle whose element was erased"),
        }
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node<T> {
        match self.nodes.get_mut(id) {
            Some(node) => node,
            None => panic!("Cannot use a handle whose element was erased"),
        }
    }

    /// The sentinel keeps no `pos` of its own: it always sits right after the
    /// last right node.
    fn pos_of(&self, id: NodeId) -> usize {
        if id.is_sentinel() {
            self.right_len()
        } else {
            self.node(id).pos
        }
    }

    fn side_at(&self, index: usize) -> Side {
        if (index as isize) <= self.middle {
            Side::Left
        } else {
            Side::Right
        }
    }

    pub(crate) fn handle_at(&self, index: usize) -> Handle {
        Handle::new(self.side_at(index), self.store[index])
    }

    /// Translate a handle into its slot in the node store.
    pub(crate) fn backing_index(&self, at: Handle) -> usize {
        let pos = self.pos_of(at.node());
        let index = match at.side() {
            Side::Left => (self.middle - pos as isize) as usize,
            Side::Right => self.left_len() + pos,
        };
        debug_assert_eq!(
            self.store.get(index),
            Some(&at.node()),
            "handle does not belong to this deque"
        );
        index
    }

    /// Shift the `pos` of every node in `span` by one, returning how many
    /// nodes were visited. `span` never covers the sentinel.
    fn fix_up(&mut self, side: Side, span: Range<usize>, shift: Shift) -> usize {
        let visited = span.len();
        for index in span {
            let id = self.store[index];
            let node = self.node_mut(id);
            match shift {
                Shift::Up => node.pos += 1,
                Shift::Down => node.pos -= 1,
            }
        }
        if visited > 0 {
            trace!("fix-up pass on the {:?} half visited {} nodes", side, visited);
        }
        visited
    }

    fn is_boundary(&self, at: Handle) -> bool {
        at.side() == Side::Right && self.pos_of(at.node()) == 0
    }

    /// Insert `element` right before `at`, returning the new handle and the
    /// length of the fix-up pass.
    fn insert_inner(&mut self, at: Handle, element: T, placement: Placement) -> (Handle, usize) {
        let side = match placement {
            Placement::ForceLeft => Side::Left,
            Placement::ForceRight => Side::Right,
            Placement::Infer if self.middle == -1 && self.is_boundary(at) => Side::Left,
            Placement::Infer => at.side(),
        };
        match side {
            Side::Left => self.insert_left(at, element),
            Side::Right => self.insert_right(at, element),
        }
    }

    /// Growing the left half moves `middle` along with every slot at or after
    /// the insertion point, so only the left nodes in front of it need a new
    /// `pos`. Inserting before `begin()` touches nothing.
    fn insert_left(&mut self, at: Handle, element: T) -> (Handle, usize) {
        let index = self.backing_index(at);
        debug_assert!(
            index <= self.left_len(),
            "left insertion past the boundary"
        );
        let node = self.nodes.insert(Node { element, pos: 0 });
        self.store.insert(index, node);
        self.middle += 1;
        self.node_mut(node).pos = (self.middle - index as isize) as usize;
        let visited = self.fix_up(Side::Left, 0..index, Shift::Up);
        (Handle::new(Side::Left, node), visited)
    }

    /// The new node takes over the `pos` of `at`, and every right node from
    /// `at` up to the sentinel moves one step further out. Inserting before
    /// `end()` touches nothing.
    fn insert_right(&mut self, at: Handle, element: T) -> (Handle, usize) {
        let index = self.backing_index(at);
        debug_assert!(
            index >= self.left_len(),
            "right insertion before the boundary"
        );
        let pos = self.pos_of(at.node());
        let node = self.nodes.insert(Node { element, pos });
        self.store.insert(index, node);
        let end = self.store.len() - 1;
        let visited = self.fix_up(Side::Right, index + 1..end, Shift::Up);
        (Handle::new(Side::Right, node), visited)
    }

    /// Remove the element at `at`, returning it and the length of the fix-up
    /// pass.
    ///
    /// Erasing from the left half pulls `middle` back by one, so the left
    /// nodes in front of the erased one each lose one `pos`. Erasing from the
    /// right half renumbers every right node after it. Once the left half is
    /// used up, erasing at the front keeps landing on the right half and each
    /// erase costs a pass over the whole right half.
    fn erase_inner(&mut self, at: Handle) -> (T, usize) {
        assert!(!at.node().is_sentinel(), "Cannot erase the end position");
        let index = self.backing_index(at);
        self.store.remove(index);
        let visited = match at.side() {
            Side::Left => {
                self.middle -= 1;
                self.fix_up(Side::Left, 0..index, Shift::Down)
            }
            Side::Right => {
                let end = self.store.len() - 1;
                let visited = self.fix_up(Side::Right, index..end, Shift::Down);
                if visited > 0 && index == self.left_len() {
                    debug!(
                        "erasing the front of the right half renumbered all {} right nodes",
                        visited
                    );
                }
                visited
            }
        };
        match self.nodes.remove(at.node()) {
            Some(node) => (node.element, visited),
            None => unreachable!("node store out of sync with node storage"),
        }
    }
}

impl<T> StableDeque<T> {
    /// Create an empty `StableDeque`.
    ///
    /// # Examples
    /// ```
    /// use stable_deque::StableDeque;
    /// let deque: StableDeque<u32> = StableDeque::new();
    /// assert!(deque.is_empty());
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty `StableDeque` with room for at least `capacity`
    /// elements before growing.
    ///
    /// # Examples
    /// ```
    /// use stable_deque::StableDeque;
    /// let mut deque = StableDeque::with_capacity(16);
    /// deque.push_back(1);
    /// assert_eq!(deque.len(), 1);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        let mut store = VecDeque::with_capacity(capacity.saturating_add(1));
        store.push_back(NodeId::SENTINEL);
        Self {
            nodes: Arena::with_capacity(capacity),
            store,
            middle: -1,
        }
    }

    /// Returns the number of elements in the `StableDeque`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use stable_deque::StableDeque;
    ///
    /// let mut deque = StableDeque::new();
    ///
    /// deque.push_front(2);
    /// assert_eq!(deque.len(), 1);
    ///
    /// deque.push_back(3);
    /// assert_eq!(deque.len(), 2);
    /// ```
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the `StableDeque` is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes all elements from the `StableDeque`. Every handle except
    /// `end()` is invalidated.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use stable_deque::StableDeque;
    /// use std::iter::FromIterator;
    ///
    /// let mut deque = StableDeque::from_iter([1, 2, 3]);
    /// deque.clear();
    /// assert!(deque.is_empty());
    /// assert_eq!(deque.front(), None);
    /// ```
    pub fn clear(&mut self) {
        let len = self.len();
        for id in self.store.drain(..len) {
            self.nodes.remove(id);
        }
        self.middle = -1;
    }

    /// Reserves room for at least `additional` more elements.
    pub fn reserve(&mut self, additional: usize) {
        self.nodes.reserve(additional);
        self.store.reserve(additional);
    }

    /// Tries to reserve room for at least `additional` more elements.
    ///
    /// On failure the contents of the deque are left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use stable_deque::StableDeque;
    ///
    /// let mut deque = StableDeque::new();
    /// deque.push_back(1);
    /// assert!(deque.try_reserve(8).is_ok());
    /// assert!(deque.try_reserve(usize::MAX).is_err());
    /// assert_eq!(deque.len(), 1);
    /// ```
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), Error> {
        self.nodes.try_reserve(additional)?;
        self.store.try_reserve(additional)?;
        Ok(())
    }

    /// Returns a handle to the first element, or `end()` if the deque is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use stable_deque::StableDeque;
    ///
    /// let mut deque = StableDeque::new();
    /// assert_eq!(deque.begin(), deque.end());
    ///
    /// deque.push_back(7);
    /// assert_eq!(deque[deque.begin()], 7);
    /// ```
    #[inline]
    pub fn begin(&self) -> Handle {
        self.handle_at(0)
    }

    /// Returns the past-the-end handle.
    #[inline]
    pub fn end(&self) -> Handle {
        Handle::new(Side::Right, NodeId::SENTINEL)
    }

    /// Returns a handle to the element at `index`, or `end()` if
    /// `index == len`.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use stable_deque::StableDeque;
    /// use std::iter::FromIterator;
    ///
    /// let deque = StableDeque::from_iter(['a', 'b', 'c']);
    /// assert_eq!(deque[deque.handle(1)], 'b');
    /// assert_eq!(deque.handle(3), deque.end());
    /// ```
    pub fn handle(&self, index: usize) -> Handle {
        assert!(
            index <= self.len(),
            "Cannot create handle at a nonexistent index"
        );
        self.handle_at(index)
    }

    /// Adds an element first in the deque.
    ///
    /// The element always joins the left half, so no existing element is
    /// renumbered.
    ///
    /// # Complexity
    ///
    /// This operation should compute in amortized *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use stable_deque::StableDeque;
    ///
    /// let mut deque = StableDeque::new();
    ///
    /// deque.push_front(2);
    /// assert_eq!(deque.front(), Some(&2));
    ///
    /// deque.push_front(1);
    /// assert_eq!(deque.front(), Some(&1));
    /// ```
    pub fn push_front(&mut self, elt: T) {
        let at = self.begin();
        self.insert_inner(at, elt, Placement::ForceLeft);
    }

    /// Appends an element to the back of the deque.
    ///
    /// # Complexity
    ///
    /// This operation should compute in amortized *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use stable_deque::StableDeque;
    ///
    /// let mut deque = StableDeque::new();
    /// deque.push_back(1);
    /// deque.push_back(3);
    /// assert_eq!(deque.back(), Some(&3));
    /// ```
    pub fn push_back(&mut self, elt: T) {
        let at = self.end();
        self.insert_inner(at, elt, Placement::ForceRight);
    }

    /// Like [`push_front`](StableDeque::push_front), but reports allocation
    /// failure instead of aborting.
    pub fn try_push_front(&mut self, elt: T) -> Result<(), Error> {
        self.try_reserve(1)?;
        self.push_front(elt);
        Ok(())
    }

    /// Like [`push_back`](StableDeque::push_back), but reports allocation
    /// failure instead of aborting.
    pub fn try_push_back(&mut self, elt: T) -> Result<(), Error> {
        self.try_reserve(1)?;
        self.push_back(elt);
        Ok(())
    }

    /// Inserts an element right before `at` and returns its handle.
    ///
    /// Inserting before the first element of an empty left half grows the
    /// left half; otherwise the element joins the half `at` belongs to.
    ///
    /// # Complexity
    ///
    /// Proportional to the distance from `at` to the outer end of its half:
    /// *O*(1) at either end of the deque, *O*(*n*) in the worst case.
    ///
    /// # Panics
    ///
    /// Panics if the element of `at` was erased.
    ///
    /// # Examples
    ///
    /// ```
    /// use stable_deque::StableDeque;
    /// use std::iter::FromIterator;
    ///
    /// let mut deque = StableDeque::new();
    /// deque.push_front(1);
    /// deque.push_back(3);
    /// let three = deque.seek(deque.end(), -1);
    /// let two = deque.insert(three, 2);
    ///
    /// assert_eq!(deque, StableDeque::from_iter([1, 2, 3]));
    /// assert_eq!(deque[two], 2);
    /// assert_eq!(deque[three], 3);
    /// ```
    pub fn insert(&mut self, at: Handle, elt: T) -> Handle {
        self.insert_inner(at, elt, Placement::Infer).0
    }

    /// Like [`insert`](StableDeque::insert), but reports allocation failure
    /// instead of aborting.
    pub fn try_insert(&mut self, at: Handle, elt: T) -> Result<Handle, Error> {
        self.try_reserve(1)?;
        Ok(self.insert(at, elt))
    }

    /// Removes the element at `at` and returns it. Only handles to that
    /// element are invalidated.
    ///
    /// # Complexity
    ///
    /// Proportional to the distance from `at` to the outer end of its half.
    /// Erasing at the front after the left half ran out costs *O*(*n*) per
    /// call, until new elements are pushed to the front again.
    ///
    /// # Panics
    ///
    /// Panics if `at` is `end()` (in particular, on an empty deque), or if the
    /// element of `at` was already erased.
    ///
    /// # Examples
    ///
    /// ```
    /// use stable_deque::StableDeque;
    /// use std::iter::FromIterator;
    ///
    /// let mut deque = StableDeque::from_iter([1, 2, 3]);
    /// let last = deque.seek(deque.end(), -1);
    /// assert_eq!(deque.erase(deque.begin()), 1);
    /// assert_eq!(deque[last], 3);
    /// assert_eq!(deque.erase(last), 3);
    /// assert_eq!(deque, StableDeque::from_iter([2]));
    /// ```
    pub fn erase(&mut self, at: Handle) -> T {
        self.erase_inner(at).0
    }

    /// Removes the first element and returns it, or `None` if the deque is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use stable_deque::StableDeque;
    ///
    /// let mut deque = StableDeque::new();
    /// assert_eq!(deque.pop_front(), None);
    ///
    /// deque.push_front(1);
    /// deque.push_front(3);
    /// assert_eq!(deque.pop_front(), Some(3));
    /// assert_eq!(deque.pop_front(), Some(1));
    /// assert_eq!(deque.pop_front(), None);
    /// ```
    pub fn pop_front(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        Some(self.erase(self.begin()))
    }

    /// Removes the last element and returns it, or `None` if the deque is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use stable_deque::StableDeque;
    ///
    /// let mut deque = StableDeque::new();
    /// assert_eq!(deque.pop_back(), None);
    /// deque.push_back(1);
    /// deque.push_back(3);
    /// assert_eq!(deque.pop_back(), Some(3));
    /// ```
    pub fn pop_back(&mut self) -> Option<T> {
        let last = self.len().checked_sub(1)?;
        Some(self.erase(self.handle_at(last)))
    }

    /// Provides a reference to the element at `index`, or `None` if it is out
    /// of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use stable_deque::StableDeque;
    /// use std::iter::FromIterator;
    ///
    /// let deque = StableDeque::from_iter([1, 2, 3]);
    /// assert_eq!(deque.get(1), Some(&2));
    /// assert_eq!(deque.get(3), None);
    /// ```
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len() {
            return None;
        }
        Some(&self.node(self.store[index]).element)
    }

    /// Provides a mutable reference to the element at `index`, or `None` if
    /// it is out of bounds.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index >= self.len() {
            return None;
        }
        let id = self.store[index];
        Some(&mut self.node_mut(id).element)
    }

    /// Provides a reference to the front element, or `None` if the deque is
    /// empty.
    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.get(0)
    }

    /// Provides a mutable reference to the front element, or `None` if the
    /// deque is empty.
    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.get_mut(0)
    }

    /// Provides a reference to the back element, or `None` if the deque is
    /// empty.
    #[inline]
    pub fn back(&self) -> Option<&T> {
        self.get(self.len().checked_sub(1)?)
    }

    /// Provides a mutable reference to the back element, or `None` if the
    /// deque is empty.
    #[inline]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        let last = self.len().checked_sub(1)?;
        self.get_mut(last)
    }

    /// Returns `true` if `at` is `end()` or refers to an element that has not
    /// been erased.
    pub fn is_valid(&self, at: Handle) -> bool {
        at.node().is_sentinel() || self.nodes.get(at.node()).is_some()
    }

    /// Provides a reference to the element at `at`, or `None` if `at` is
    /// `end()`.
    ///
    /// # Panics
    ///
    /// Panics if the element of `at` was erased.
    pub fn current(&self, at: Handle) -> Option<&T> {
        if at.node().is_sentinel() {
            return None;
        }
        Some(&self.node(at.node()).element)
    }

    /// Provides a mutable reference to the element at `at`, or `None` if `at`
    /// is `end()`.
    ///
    /// # Panics
    ///
    /// Panics if the element of `at` was erased.
    pub fn current_mut(&mut self, at: Handle) -> Option<&mut T> {
        if at.node().is_sentinel() {
            return None;
        }
        Some(&mut self.node_mut(at.node()).element)
    }

    /// Moves `at` by `offset` elements, towards the back for positive offsets
    /// and towards the front for negative ones.
    ///
    /// The target is found from the `pos` of `at` alone: walking off the
    /// inner end of one half continues on the other half.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Panics
    ///
    /// Panics if the target lies before `begin()` or after `end()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use stable_deque::StableDeque;
    ///
    /// let mut deque = StableDeque::new();
    /// deque.push_back(2);
    /// deque.push_front(1);
    /// deque.push_back(3);
    ///
    /// let one = deque.begin();
    /// assert_eq!(deque[deque.seek(one, 2)], 3);
    /// assert_eq!(deque.seek(one, 3), deque.end());
    /// assert_eq!(deque.seek(deque.end(), -3), one);
    /// ```
    pub fn seek(&self, at: Handle, offset: isize) -> Handle {
        let pos = self.pos_of(at.node()) as isize;
        let (side, target) = match at.side() {
            Side::Left => match pos.checked_sub(offset) {
                Some(target) if target < 0 => (Side::Right, !target),
                Some(target) => (Side::Left, target),
                None => panic!("Cannot seek before the first element"),
            },
            Side::Right => match pos.checked_add(offset) {
                Some(target) if target < 0 => (Side::Left, !target),
                Some(target) => (Side::Right, target),
                None => panic!("Cannot seek past the end position"),
            },
        };
        let index = match side {
            Side::Left => {
                assert!(target <= self.middle, "Cannot seek before the first element");
                self.middle - target
            }
            Side::Right => {
                assert!(
                    target <= self.right_len() as isize,
                    "Cannot seek past the end position"
                );
                self.middle + 1 + target
            }
        };
        Handle::new(side, self.store[index as usize])
    }

    /// Returns the logical index of `at`; `end()` is at `len`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use stable_deque::StableDeque;
    /// use std::iter::FromIterator;
    ///
    /// let mut deque = StableDeque::from_iter([1, 2, 3]);
    /// let three = deque.handle(2);
    /// deque.push_front(0);
    /// assert_eq!(deque.index_of(three), 3);
    /// assert_eq!(deque.index_of(deque.end()), 4);
    /// ```
    pub fn index_of(&self, at: Handle) -> usize {
        self.backing_index(at)
    }

    /// Compares the logical positions of two handles.
    ///
    /// Left handles come before right handles. Within the left half a larger
    /// `pos` is further to the front; within the right half a larger `pos` is
    /// further to the back.
    pub fn compare(&self, a: Handle, b: Handle) -> Ordering {
        match (a.side(), b.side()) {
            (Side::Left, Side::Right) => Ordering::Less,
            (Side::Right, Side::Left) => Ordering::Greater,
            (Side::Left, Side::Left) => self.pos_of(b.node()).cmp(&self.pos_of(a.node())),
            (Side::Right, Side::Right) => self.pos_of(a.node()).cmp(&self.pos_of(b.node())),
        }
    }

    /// Returns the signed number of elements from `b` to `a`, so that
    /// `seek(b, distance(a, b)) == a`. The handles may lie in different
    /// halves.
    pub fn distance(&self, a: Handle, b: Handle) -> isize {
        self.index_of(a) as isize - self.index_of(b) as isize
    }

    /// Provides a cursor at `at`.
    pub fn cursor(&self, at: Handle) -> Cursor<'_, T> {
        Cursor::new(self, at)
    }

    /// Provides a cursor at the first element, or at the end position if the
    /// deque is empty.
    pub fn cursor_start(&self) -> Cursor<'_, T> {
        Cursor::new(self, self.begin())
    }

    /// Provides a cursor at the end position.
    pub fn cursor_end(&self) -> Cursor<'_, T> {
        Cursor::new(self, self.end())
    }

    /// Provides a cursor with editing operations at `at`.
    pub fn cursor_mut(&mut self, at: Handle) -> CursorMut<'_, T> {
        CursorMut::new(self, at)
    }

    /// Provides a cursor with editing operations at the first element.
    pub fn cursor_start_mut(&mut self) -> CursorMut<'_, T> {
        let at = self.begin();
        CursorMut::new(self, at)
    }

    /// Provides a cursor with editing operations at the end position.
    pub fn cursor_end_mut(&mut self) -> CursorMut<'_, T> {
        let at = self.end();
        CursorMut::new(self, at)
    }

    /// Provides a front-to-back iterator.
    ///
    /// # Examples
    ///
    /// ```
    /// use stable_deque::StableDeque;
    ///
    /// let mut deque = StableDeque::new();
    /// deque.push_back(1);
    /// deque.push_front(0);
    /// deque.push_back(2);
    ///
    /// let mut iter = deque.iter();
    /// assert_eq!(iter.next(), Some(&0));
    /// assert_eq!(iter.next(), Some(&1));
    /// assert_eq!(iter.next(), Some(&2));
    /// assert_eq!(iter.next(), None);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    /// Provides a front-to-back iterator with mutable references.
    ///
    /// # Examples
    ///
    /// ```
    /// use stable_deque::StableDeque;
    /// use std::iter::FromIterator;
    ///
    /// let mut deque = StableDeque::from_iter([0, 1, 2]);
    /// for element in deque.iter_mut() {
    ///     *element += 10;
    /// }
    /// assert_eq!(Vec::from_iter(deque), vec![10, 11, 12]);
    /// ```
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(self)
    }

    pub(crate) fn split_parts(&mut self) -> (&mut Arena<Node<T>>, &VecDeque<NodeId>) {
        (&mut self.nodes, &self.store)
    }

    pub(crate) fn store(&self) -> &VecDeque<NodeId> {
        &self.store
    }

    pub(crate) fn into_parts(self) -> (Arena<Node<T>>, VecDeque<NodeId>) {
        (self.nodes, self.store)
    }
}

impl<T> Index<usize> for StableDeque<T> {
    type Output = T;

    /// Returns the element at logical `index`, the same one `begin()` moved
    /// by `index` resolves to.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    fn index(&self, index: usize) -> &T {
        let len = self.len();
        assert!(
            index < len,
            "index out of bounds: the len is {} but the index is {}",
            len,
            index
        );
        &self.node(self.store[index]).element
    }
}

impl<T> IndexMut<usize> for StableDeque<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        let len = self.len();
        assert!(
            index < len,
            "index out of bounds: the len is {} but the index is {}",
            len,
            index
        );
        let id = self.store[index];
        &mut self.node_mut(id).element
    }
}

impl<T> Index<Handle> for StableDeque<T> {
    type Output = T;

    /// Dereferences a handle.
    ///
    /// # Panics
    ///
    /// Panics if `at` is `end()` or its element was erased.
    fn index(&self, at: Handle) -> &T {
        match self.current(at) {
            Some(element) => element,
            None => panic!("Cannot dereference the end position"),
        }
    }
}

impl<T> IndexMut<Handle> for StableDeque<T> {
    fn index_mut(&mut self, at: Handle) -> &mut T {
        match self.current_mut(at) {
            Some(element) => element,
            None => panic!("Cannot dereference the end position"),
        }
    }
}

impl<T: Debug> Debug for StableDeque<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Default for StableDeque<T> {
    fn default() -> Self {
        Self::new()
    }
}

// Ensure that `StableDeque` and its read-only iterators are covariant in their type parameters.
#[allow(dead_code)]
fn assert_covariance() {
    fn a<'a>(x: StableDeque<&'static str>) -> StableDeque<&'a str> {
        x
    }
    fn b<'i, 'a>(x: Iter<'i, &'static str>) -> Iter<'i, &'a str> {
        x
    }
    fn c<'a>(x: crate::IntoIter<&'static str>) -> crate::IntoIter<&'a str> {
        x
    }
}

#[cfg(test)]
impl<T> StableDeque<T> {
    /// Check every layout invariant of the node store.
    pub(crate) fn assert_invariants(&self) {
        let len = self.len();
        assert_eq!(self.store.len(), len + 1);
        assert_eq!(self.store.back(), Some(&NodeId::SENTINEL));
        assert_eq!(self.nodes.len(), len);
        assert!(-1 <= self.middle && self.middle < self.store.len() as isize);
        for index in 0..len {
            let pos = self.node(self.store[index]).pos;
            match self.side_at(index) {
                Side::Left => {
                    assert!(pos as isize <= self.middle);
                    assert_eq!(self.middle - pos as isize, index as isize);
                }
                Side::Right => {
                    assert!(pos < self.right_len());
                    assert_eq!(self.left_len() + pos, index);
                }
            }
        }
        assert_eq!(self.pos_of(NodeId::SENTINEL), self.right_len());
    }

    pub(crate) fn middle(&self) -> isize {
        self.middle
    }
}


#[cfg(test)]
mod proptests {
    use crate::deque::cursor::Handle;
    use crate::StableDeque;
    use proptest::prelude::*;
    use proptest::sample::Index;
    use std::cmp::Ordering;
    use std::collections::VecDeque;

    #[derive(Debug, Clone)]
    enum Op {
        PushFront,
        PushBack,
        PopFront,
        PopBack,
        Insert(Index),
        Erase(Index),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            3 => Just(Op::PushFront),
            3 => Just(Op::PushBack),
            1 => Just(Op::PopFront),
            1 => Just(Op::PopBack),
            2 => any::<Index>().prop_map(Op::Insert),
            2 => any::<Index>().prop_map(Op::Erase),
        ]
    }

    /// Replays `ops` on a deque and on a `VecDeque` model, tracking a handle
    /// to every live element. Values are unique so handles can be matched up.
    fn replay(ops: &[Op]) -> (StableDeque<u32>, VecDeque<u32>, Vec<(Handle, u32)>) {
        let mut deque = StableDeque::new();
        let mut model = VecDeque::new();
        let mut tracked: Vec<(Handle, u32)> = Vec::new();
        for (next, op) in (0u32..).zip(ops) {
            let removed = match op {
                Op::PushFront => {
                    deque.push_front(next);
                    model.push_front(next);
                    tracked.push((deque.begin(), next));
                    None
                }
                Op::PushBack => {
                    deque.push_back(next);
                    model.push_back(next);
                    tracked.push((deque.seek(deque.end(), -1), next));
                    None
                }
                Op::PopFront => {
                    let popped = deque.pop_front();
                    assert_eq!(popped, model.pop_front());
                    popped
                }
                Op::PopBack => {
                    let popped = deque.pop_back();
                    assert_eq!(popped, model.pop_back());
                    popped
                }
                Op::Insert(index) => {
                    let at = index.index(model.len() + 1);
                    let handle = deque.handle(at);
                    let inserted = deque.insert(handle, next);
                    model.insert(at, next);
                    tracked.push((inserted, next));
                    None
                }
                Op::Erase(index) => {
                    if model.is_empty() {
                        None
                    } else {
                        let at = index.index(model.len());
                        let handle = deque.handle(at);
                        let erased = deque.erase(handle);
                        assert_eq!(Some(erased), model.remove(at));
                        Some(erased)
                    }
                }
            };
            if let Some(value) = removed {
                tracked.retain(|&(_, v)| v != value);
            }
            deque.assert_invariants();
        }
        (deque, model, tracked)
    }

    proptest! {
        #[test]
        fn matches_model(ops in prop::collection::vec(op(), 0..200)) {
            let (deque, model, _) = replay(&ops);
            prop_assert_eq!(deque.len(), model.len());
            for (i, value) in model.iter().enumerate() {
                prop_assert_eq!(deque[i], *value);
                prop_assert_eq!(deque.get(i), Some(value));
            }
            prop_assert!(deque.iter().eq(model.iter()));
            prop_assert!(deque.iter().rev().eq(model.iter().rev()));
        }

        #[test]
        fn handles_are_stable(ops in prop::collection::vec(op(), 0..200)) {
            let (deque, model, tracked) = replay(&ops);
            prop_assert_eq!(tracked.len(), model.len());
            for (handle, value) in &tracked {
                prop_assert_eq!(deque[*handle], *value);
                let index = deque.index_of(*handle);
                prop_assert_eq!(model[index], *value);
            }
        }

        #[test]
        fn order_follows_logical_index(ops in prop::collection::vec(op(), 0..120)) {
            let (deque, _, _) = replay(&ops);
            let mut walked = vec![deque.begin()];
            while *walked.last().unwrap() != deque.end() {
                let next = deque.seek(*walked.last().unwrap(), 1);
                walked.push(next);
            }
            prop_assert_eq!(walked.len(), deque.len() + 1);
            for (i, &a) in walked.iter().enumerate() {
                prop_assert_eq!(deque.index_of(a), i);
                for (j, &b) in walked.iter().enumerate() {
                    prop_assert_eq!(deque.compare(a, b), i.cmp(&j));
                    prop_assert_eq!(a == b, i == j);
                    prop_assert_eq!(deque.distance(a, b), i as isize - j as isize);
                    prop_assert_eq!(deque.seek(b, i as isize - j as isize), a);
                }
            }
            prop_assert_eq!(deque.compare(deque.end(), deque.end()), Ordering::Equal);
        }
    }
}
