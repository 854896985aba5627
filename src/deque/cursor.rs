use crate::arena::NodeId;
use crate::StableDeque;
use std::cmp::Ordering;
use std::fmt;
use std::fmt::Formatter;
use std::hash::{Hash, Hasher};
use std::ops::{Add, AddAssign, Index, Sub, SubAssign};

/// The half of a [`StableDeque`] a node lives in.
///
/// A node keeps its side for as long as it lives.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Side {
    Left,
    Right,
}

/// A stable position in a [`StableDeque`].
///
/// A `Handle` does not borrow the deque, so it can be kept across any number
/// of mutations. It keeps referring to the same element until that element
/// is erased; using it after that panics. The handle returned by
/// [`StableDeque::end`] never becomes invalid.
///
/// Handles are resolved against the deque they came from: dereference with
/// `deque[handle]`, move with [`StableDeque::seek`], and compare with
/// [`StableDeque::compare`]. Two handles are equal exactly when they refer to
/// the same element.
///
/// # Examples
///
/// ```
/// use stable_deque::StableDeque;
/// use std::iter::FromIterator;
///
/// let mut deque = StableDeque::from_iter([1, 2, 3]);
/// let two = deque.handle(1);
///
/// deque.push_front(0);
/// deque.push_back(4);
/// deque.erase(deque.handle(3));
///
/// assert_eq!(deque[two], 2);
/// assert_eq!(deque.index_of(two), 2);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Handle {
    side: Side,
    node: NodeId,
}

impl Handle {
    pub(crate) fn new(side: Side, node: NodeId) -> Self {
        Self { side, node }
    }

    pub(crate) fn node(self) -> NodeId {
        self.node
    }

    /// Returns the half of the deque the element lives in.
    pub fn side(self) -> Side {
        self.side
    }

    /// Returns `true` if this is the end position.
    pub fn is_end(self) -> bool {
        self.node.is_sentinel()
    }
}

impl PartialEq for Handle {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node
    }
}

impl Eq for Handle {}

impl Hash for Handle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.node.hash(state);
    }
}

/// A cursor over a `StableDeque`.
///
/// A `Cursor` pairs a [`Handle`] with a shared borrow of its deque, which
/// gives it the usual random-access iterator arithmetic: `cursor + n`,
/// `cursor - n`, `cursor[n]`, the difference of two cursors, and ordering.
///
/// In a deque with length *n*, there are *n* + 1 valid locations for the
/// cursor, indexed by 0, 1, ..., *n*, where *n* is the end position.
///
/// # Examples
///
/// ```
/// use stable_deque::StableDeque;
/// use std::iter::FromIterator;
///
/// // Create a deque: [ A B C D #]
/// let deque = StableDeque::from_iter(['A', 'B', 'C', 'D']);
///
/// // Create a cursor at start: [|A B C D #] (index = 0)
/// let mut cursor = deque.cursor_start();
/// assert_eq!(cursor.current(), Some(&'A'));
///
/// // Move cursor forward: [ A|B C D #] (index = 1)
/// assert!(cursor.move_next().is_ok());
/// assert_eq!(cursor.current(), Some(&'B'));
///
/// // Jump ahead: [ A B C|D #] (index = 3)
/// cursor += 2;
/// assert_eq!(cursor.current(), Some(&'D'));
/// assert_eq!(cursor[-3], 'A');
///
/// // Create a cursor at the end: [ A B C D|#] (index = 4)
/// let end = deque.cursor_end();
/// assert_eq!(end.current(), None);
/// assert!(cursor < end);
/// assert_eq!(end - cursor, 1);
/// ```
pub struct Cursor<'a, T: 'a> {
    handle: Handle,
    deque: &'a StableDeque<T>,
}

/// A cursor over a `StableDeque` with editing operations.
///
/// Unlike a [`Handle`], a `CursorMut` borrows the deque mutably, so it can
/// insert and remove at its position while moving around. Its handle can be
/// taken out with [`CursorMut::handle`] and kept after the cursor is gone.
///
/// # Examples
///
/// ```
/// use stable_deque::StableDeque;
/// use std::iter::FromIterator;
///
/// let mut deque = StableDeque::from_iter([1, 2, 3, 4]);
///
/// let mut cursor = deque.cursor_start_mut();
///
/// cursor.insert(5); // becomes [5, 1, 2, 3, 4], points to 1
/// assert_eq!(cursor.current(), Some(&1));
///
/// assert!(cursor.seek_by(2).is_ok());
/// assert_eq!(cursor.remove(), Some(3)); // becomes [5, 1, 2, 4], points to 4
/// assert_eq!(cursor.current(), Some(&4));
///
/// assert_eq!(cursor.backspace(), Some(2)); // becomes [5, 1, 4], points to 4
/// assert_eq!(cursor.current(), Some(&4));
///
/// assert_eq!(Vec::from_iter(deque), vec![5, 1, 4]);
/// ```
pub struct CursorMut<'a, T: 'a> {
    handle: Handle,
    deque: &'a mut StableDeque<T>,
}

macro_rules! impl_cursor {
    ($CURSOR:ident) => {
        impl<'a, T: 'a> $CURSOR<'a, T> {
            /// Returns the handle the cursor is at.
            pub fn handle(&self) -> Handle {
                self.handle
            }

            /// Returns the index of the cursor.
            ///
            /// This operation should compute in *O*(1) time.
            pub fn index(&self) -> usize {
                self.deque.index_of(self.handle)
            }

            /// Returns the length of the deque. See [`StableDeque::len`].
            pub fn len(&self) -> usize {
                self.deque.len()
            }

            /// Returns `true` if the deque is empty. See [`StableDeque::is_empty`].
            pub fn is_empty(&self) -> bool {
                self.deque.is_empty()
            }

            /// Returns `true` if the cursor is at the end position.
            pub fn is_end(&self) -> bool {
                self.handle.is_end()
            }

            /// Move the cursor to the next position, or return an error
            /// when it is already at the end position.
            ///
            /// This operation should compute in *O*(1) time.
            pub fn move_next(&mut self) -> Result<(), &'static str> {
                if self.is_end() {
                    return Err("`move_next` past the end position");
                }
                self.handle = self.deque.seek(self.handle, 1);
                Ok(())
            }

            /// Move the cursor to the previous position, or return an error
            /// when it is already at the first position.
            ///
            /// This operation should compute in *O*(1) time.
            pub fn move_prev(&mut self) -> Result<(), &'static str> {
                if self.handle == self.deque.begin() {
                    return Err("`move_prev` before the first element");
                }
                self.handle = self.deque.seek(self.handle, -1);
                Ok(())
            }

            /// Move the cursor by `offset` positions, or return an error
            /// (leaving the cursor in place) when the target would lie
            /// outside `0..=len`.
            ///
            /// This operation should compute in *O*(1) time.
            pub fn seek_by(&mut self, offset: isize) -> Result<(), &'static str> {
                match (self.index() as isize).checked_add(offset) {
                    Some(target) if 0 <= target && target <= self.len() as isize => {}
                    _ => return Err("`seek_by` out of bounds"),
                }
                self.handle = self.deque.seek(self.handle, offset);
                Ok(())
            }

            /// Move the cursor to the given position `target`, or return an
            /// error (leaving the cursor in place) when `target > len`.
            ///
            /// This operation should compute in *O*(1) time.
            pub fn seek_to(&mut self, target: usize) -> Result<(), usize> {
                let len = self.len();
                if target > len {
                    return Err(target - len);
                }
                self.handle = self.deque.handle_at(target);
                Ok(())
            }

            /// Set the cursor to the start of the deque.
            #[inline]
            pub fn move_to_start(&mut self) {
                self.handle = self.deque.begin();
            }

            /// Set the cursor to the end position.
            #[inline]
            pub fn move_to_end(&mut self) {
                self.handle = self.deque.end();
            }
        }

        impl<'a, T: fmt::Debug + 'a> fmt::Debug for $CURSOR<'a, T> {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($CURSOR))
                    .field("deque", &self.deque)
                    .field("current", &self.deque.current(self.handle))
                    .field("index", &self.index())
                    .finish()
            }
        }
    };
}

impl_cursor!(CursorMut);
impl_cursor!(Cursor);

impl<'a, T: 'a> Cursor<'a, T> {
    pub(crate) fn new(deque: &'a StableDeque<T>, handle: Handle) -> Self {
        Self { handle, deque }
    }

    fn same_deque_with(&self, other: &Self) -> bool {
        std::ptr::eq(self.deque, other.deque)
    }

    /// Return an immutable reference to the element at the cursor, or `None`
    /// if it is at the end position.
    ///
    /// # Examples
    ///
    /// ```
    /// use stable_deque::StableDeque;
    /// use std::iter::FromIterator;
    ///
    /// let deque = StableDeque::from_iter([1, 2, 3]);
    /// assert_eq!(deque.cursor(deque.handle(0)).current(), Some(&1));
    /// assert_eq!(deque.cursor(deque.handle(2)).current(), Some(&3));
    /// assert_eq!(deque.cursor_end().current(), None);
    /// ```
    pub fn current(&self) -> Option<&'a T> {
        self.deque.current(self.handle)
    }

    /// Return an immutable reference to the element before the cursor, or
    /// `None` if it is at the first position.
    pub fn previous(&self) -> Option<&'a T> {
        if self.handle == self.deque.begin() {
            return None;
        }
        self.deque.current(self.deque.seek(self.handle, -1))
    }
}

impl<'a, T: 'a> Clone for Cursor<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T: 'a> Copy for Cursor<'a, T> {}

/// Compare cursors by their position.
///
/// Only cursors belonging to the same deque and at the same position are
/// considered equal.
impl<'a, T: 'a> PartialEq for Cursor<'a, T> {
    fn eq(&self, other: &Self) -> bool {
        self.same_deque_with(other) && self.handle == other.handle
    }
}

impl<'a, T: 'a> Eq for Cursor<'a, T> {}

/// Compare cursors by their position.
///
/// Only cursors belonging to the same deque can compare, so it is
/// `PartialOrd` but not `Ord`.
///
/// # Examples
/// ```
/// use stable_deque::StableDeque;
/// use std::iter::FromIterator;
///
/// let deque = StableDeque::from_iter([1, 2, 3]);
/// let cursor1 = deque.cursor_start();
/// let cursor2 = cursor1 + 1;
/// assert!(cursor1 < cursor2);
///
/// let another = deque.clone();
/// let cursor3 = another.cursor_end();
/// assert_eq!(cursor1.partial_cmp(&cursor3), None);
/// ```
impl<'a, T: 'a> PartialOrd for Cursor<'a, T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if !self.same_deque_with(other) {
            return None;
        }
        Some(self.deque.compare(self.handle, other.handle))
    }
}

/// # Panics
///
/// Panics if the target lies outside `0..=len`.
impl<'a, T: 'a> AddAssign<isize> for Cursor<'a, T> {
    fn add_assign(&mut self, offset: isize) {
        self.handle = self.deque.seek(self.handle, offset);
    }
}

impl<'a, T: 'a> SubAssign<isize> for Cursor<'a, T> {
    fn sub_assign(&mut self, offset: isize) {
        *self += -offset;
    }
}

impl<'a, T: 'a> Add<isize> for Cursor<'a, T> {
    type Output = Self;

    fn add(mut self, offset: isize) -> Self {
        self += offset;
        self
    }
}

impl<'a, T: 'a> Sub<isize> for Cursor<'a, T> {
    type Output = Self;

    fn sub(mut self, offset: isize) -> Self {
        self -= offset;
        self
    }
}

/// The signed number of positions between two cursors of the same deque,
/// also when they sit in different halves.
impl<'a, T: 'a> Sub for Cursor<'a, T> {
    type Output = isize;

    fn sub(self, other: Self) -> isize {
        debug_assert!(self.same_deque_with(&other));
        self.deque.distance(self.handle, other.handle)
    }
}

/// `cursor[offset]` is the element at `cursor + offset`.
impl<'a, T: 'a> Index<isize> for Cursor<'a, T> {
    type Output = T;

    fn index(&self, offset: isize) -> &T {
        &self.deque[self.deque.seek(self.handle, offset)]
    }
}

impl<'a, T: 'a> CursorMut<'a, T> {
    pub(crate) fn new(deque: &'a mut StableDeque<T>, handle: Handle) -> Self {
        Self { handle, deque }
    }

    /// Return an immutable reference to the element at the cursor, or `None`
    /// if it is at the end position.
    pub fn current(&self) -> Option<&T> {
        self.deque.current(self.handle)
    }

    /// Return a mutable reference to the element at the cursor, or `None` if
    /// it is at the end position.
    ///
    /// # Examples
    ///
    /// ```
    /// use stable_deque::StableDeque;
    /// use std::iter::FromIterator;
    ///
    /// let mut deque = StableDeque::from_iter([1, 2, 3]);
    /// let mut cursor = deque.cursor_start_mut();
    /// *cursor.current_mut().unwrap() *= 5;
    /// assert_eq!(cursor.current(), Some(&5));
    ///
    /// // Cannot mutate the end position.
    /// assert!(deque.cursor_end_mut().current_mut().is_none());
    /// ```
    pub fn current_mut(&mut self) -> Option<&mut T> {
        self.deque.current_mut(self.handle)
    }

    /// Re-borrow the mutable cursor as a short-lived immutable one.
    pub fn as_cursor(&self) -> Cursor<'_, T> {
        Cursor::new(self.deque, self.handle)
    }

    /// Convert the mutable cursor to an immutable one.
    pub fn into_cursor(self) -> Cursor<'a, T> {
        Cursor::new(self.deque, self.handle)
    }

    /// Temporarily view the deque via an immutable reference.
    pub fn view(&self) -> &StableDeque<T> {
        self.deque
    }

    /// Add an element first in the deque. The cursor stays where it is.
    ///
    /// It is the same as [`StableDeque::push_front`], except it avoids
    /// another mutable borrow of the deque while the cursor is in use.
    pub fn push_front(&mut self, item: T) {
        self.deque.push_front(item);
    }

    /// Append an element to the back of the deque. The cursor stays where it
    /// is.
    pub fn push_back(&mut self, item: T) {
        self.deque.push_back(item);
    }

    /// Insert a new element before the cursor and return its handle. The
    /// cursor keeps pointing at the same element.
    ///
    /// # Examples
    ///
    /// ```
    /// use stable_deque::StableDeque;
    /// use std::iter::FromIterator;
    ///
    /// let mut deque = StableDeque::from_iter([1, 3]);
    /// let mut cursor = deque.cursor_end_mut();
    /// cursor.insert(4);
    /// assert!(cursor.seek_by(-2).is_ok());
    /// let two = cursor.insert(2);
    /// assert_eq!(cursor.current(), Some(&3));
    /// assert_eq!(cursor.view()[two], 2);
    /// assert_eq!(Vec::from_iter(deque), vec![1, 2, 3, 4]);
    /// ```
    pub fn insert(&mut self, item: T) -> Handle {
        self.deque.insert(self.handle, item)
    }

    /// Remove the element at the cursor and return it, moving the cursor to
    /// the following element. Returns `None` at the end position.
    pub fn remove(&mut self) -> Option<T> {
        if self.is_end() {
            return None;
        }
        let index = self.index();
        let item = self.deque.erase(self.handle);
        self.handle = self.deque.handle_at(index);
        Some(item)
    }

    /// Remove the element before the cursor and return it, or `None` if the
    /// cursor is at the first position. The cursor stays where it is.
    pub fn backspace(&mut self) -> Option<T> {
        if self.handle == self.deque.begin() {
            return None;
        }
        let previous = self.deque.seek(self.handle, -1);
        Some(self.deque.erase(previous))
    }
}

#[cfg(test)]
mod tests {
    use crate::deque::cursor::{Handle, Side};
    use crate::StableDeque;
    use std::collections::HashSet;
    use std::iter::FromIterator;

    /// Build `0..n` with the first `left` elements in the left half.
    fn split_deque(left: usize, n: usize) -> StableDeque<usize> {
        let mut deque = StableDeque::new();
        (0..left).rev().for_each(|i| deque.push_front(i));
        (left..n).for_each(|i| deque.push_back(i));
        deque
    }

    #[test]
    fn cursor_walks_across_halves() {
        for left in 0..=5 {
            let deque = split_deque(left, 5);
            let mut cursor = deque.cursor_start();
            for i in 0..5 {
                assert_eq!(cursor.index(), i);
                assert_eq!(cursor.current(), Some(&i));
                assert_eq!(cursor.handle().side() == Side::Left, i < left);
                assert!(cursor.move_next().is_ok());
            }
            assert!(cursor.is_end());
            assert!(cursor.move_next().is_err());
            assert_eq!(cursor.previous(), Some(&4));

            for i in (0..5).rev() {
                assert!(cursor.move_prev().is_ok());
                assert_eq!(cursor.current(), Some(&i));
            }
            assert!(cursor.move_prev().is_err());
            assert_eq!(cursor.previous(), None);
        }
    }

    #[test]
    fn cursor_arithmetic() {
        let deque = split_deque(3, 7);
        let start = deque.cursor_start();
        let end = deque.cursor_end();
        assert_eq!(end - start, 7);
        assert_eq!(start - end, -7);
        for i in 0..7 {
            let cursor = start + i;
            assert_eq!(cursor.current(), Some(&(i as usize)));
            assert_eq!(start[i], i as usize);
            assert_eq!(end[i - 7], i as usize);
            assert_eq!(cursor - start, i);
            assert_eq!(end - (7 - i), cursor);
        }
        let mut cursor = start;
        cursor += 5;
        cursor -= 3;
        assert_eq!(cursor.index(), 2);
        assert_eq!(start + 7, end);
    }

    #[test]
    #[should_panic(expected = "Cannot seek past the end position")]
    fn cursor_add_past_end_panics() {
        let deque = split_deque(2, 4);
        let _ = deque.cursor_start() + 5;
    }

    #[test]
    fn cursor_ordering() {
        let deque = split_deque(4, 8);
        let cursors: Vec<_> = (0..=8).map(|i| deque.cursor(deque.handle(i))).collect();
        for (i, a) in cursors.iter().enumerate() {
            for (j, b) in cursors.iter().enumerate() {
                assert_eq!(a.partial_cmp(b), Some(i.cmp(&j)));
                assert_eq!(a == b, i == j);
            }
        }
        let other = deque.clone();
        assert_eq!(cursors[0].partial_cmp(&other.cursor_start()), None);
        assert_ne!(cursors[8], other.cursor_end());
    }

    #[test]
    fn cursor_seek() {
        let deque = split_deque(2, 5);
        let mut cursor = deque.cursor_start();
        assert!(cursor.seek_to(4).is_ok());
        assert_eq!(cursor.current(), Some(&4));
        assert_eq!(cursor.seek_to(7), Err(2));
        assert_eq!(cursor.current(), Some(&4));
        assert!(cursor.seek_by(-4).is_ok());
        assert_eq!(cursor.current(), Some(&0));
        assert!(cursor.seek_by(-1).is_err());
        assert!(cursor.seek_by(6).is_err());
        assert!(cursor.seek_by(5).is_ok());
        assert!(cursor.is_end());
        assert!(cursor.seek_by(-4).is_ok());
        assert!(cursor.seek_by(isize::MAX).is_err());
        assert!(cursor.seek_by(isize::MIN).is_err());
        assert_eq!(cursor.current(), Some(&1));
        cursor.move_to_start();
        assert_eq!(cursor.index(), 0);
        cursor.move_to_end();
        assert_eq!(cursor.index(), 5);
    }

    #[test]
    fn cursor_mut_edits() {
        let mut deque = split_deque(2, 5);
        let two = deque.handle(2);
        let mut cursor = deque.cursor_mut(two);
        assert_eq!(cursor.remove(), Some(2));
        assert_eq!(cursor.current(), Some(&3));
        assert_eq!(cursor.backspace(), Some(1));
        assert_eq!(cursor.current(), Some(&3));
        cursor.push_front(10);
        cursor.push_back(11);
        assert_eq!(cursor.current(), Some(&3));
        assert_eq!(cursor.index(), 2);
        let inserted = cursor.insert(12);
        assert_eq!(cursor.as_cursor().previous(), Some(&12));
        if let Some(x) = cursor.current_mut() {
            *x *= 10;
        }
        let at = cursor.handle();
        let cursor = cursor.into_cursor();
        assert_eq!(cursor.current(), Some(&30));
        assert_eq!(deque[inserted], 12);
        assert_eq!(deque[at], 30);
        assert_eq!(Vec::from_iter(deque.iter().copied()), vec![10, 0, 12, 30, 4, 11]);
        deque.assert_invariants();

        let mut cursor = deque.cursor_end_mut();
        assert_eq!(cursor.remove(), None);
        assert_eq!(cursor.backspace(), Some(11));
        let mut cursor = deque.cursor_start_mut();
        assert_eq!(cursor.backspace(), None);
        while cursor.remove().is_some() {}
        assert!(cursor.is_empty());
        assert!(deque.is_empty());
    }

    #[test]
    fn handle_identity() {
        let mut deque = split_deque(2, 4);
        let handles: HashSet<Handle> = (0..=4).map(|i| deque.handle(i)).collect();
        assert_eq!(handles.len(), 5);
        deque.push_front(9);
        deque.push_back(9);
        for i in 1..=4 {
            assert!(handles.contains(&deque.handle(i)));
        }
        assert!(handles.contains(&deque.end()));
        assert!(deque.end().is_end());
        assert!(!deque.begin().is_end());
    }
}
