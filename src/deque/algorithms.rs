use crate::StableDeque;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

impl<T: PartialEq> PartialEq for StableDeque<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other)
    }
}

impl<T: Eq> Eq for StableDeque<T> {}

impl<T: PartialOrd> PartialOrd for StableDeque<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other)
    }
}

impl<T: Ord> Ord for StableDeque<T> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other)
    }
}

/// The clone keeps the split: every element lands in the same half it
/// occupies in `self`.
impl<T: Clone> Clone for StableDeque<T> {
    fn clone(&self) -> Self {
        let mut deque = StableDeque::with_capacity(self.len());
        let left = self.left_len();
        self.iter()
            .take(left)
            .rev()
            .for_each(|elt| deque.push_front(elt.clone()));
        self.iter()
            .skip(left)
            .for_each(|elt| deque.push_back(elt.clone()));
        deque
    }
}

impl<T: Hash> Hash for StableDeque<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for elt in self {
            elt.hash(state);
        }
    }
}

impl<T> StableDeque<T> {
    /// Returns `true` if the `StableDeque` contains an element equal to the
    /// given value.
    ///
    /// # Examples
    ///
    /// ```
    /// use stable_deque::StableDeque;
    ///
    /// let mut deque = StableDeque::new();
    ///
    /// deque.push_back(0);
    /// deque.push_back(1);
    /// deque.push_front(2);
    ///
    /// assert_eq!(deque.contains(&0), true);
    /// assert_eq!(deque.contains(&10), false);
    /// ```
    pub fn contains(&self, x: &T) -> bool
    where
        T: PartialEq<T>,
    {
        self.iter().any(|e| e == x)
    }
}
