//! This crate provides a double-ended queue whose elements keep a stable
//! position, implemented as a node store split around a movable middle.
//!
//! The [`StableDeque`] hands out [`Handle`]s that stay valid across any
//! insertion or removal of *other* elements. A handle is a random-access
//! iterator: moving it by any offset, comparing two handles and computing
//! the distance between them all take constant time. Pushing and popping at
//! either end is amortized constant time; inserting or erasing in the middle
//! costs time proportional to the distance from the nearer end of the half
//! the position lives in.
//!
//! Here is a quick example showing how the deque works.
//!
//! ```
//! use stable_deque::StableDeque;
//! use std::iter::FromIterator;
//!
//! let mut deque = StableDeque::from_iter([1, 2, 3, 4]);
//! let three = deque.handle(2);
//!
//! deque.push_front(0);
//! deque.insert(three, 9); // insert 9 before 3
//! deque.erase(deque.handle(1)); // erase 1
//! assert_eq!(Vec::from_iter(deque.iter().copied()), vec![0, 2, 9, 3, 4]);
//!
//! // the handle still points at 3, wherever 3 went
//! assert_eq!(deque[three], 3);
//! assert_eq!(deque.index_of(three), 3);
//! assert_eq!(deque[deque.seek(three, -2)], 2);
//! ```
//!
//! # Memory Layout
//!
//! The memory layout of the deque is like the following graph:
//! ```text
//!                           middle
//!                              ↓
//!    store ┌────┬────┬────┬────┬────┬────┬────┬────┐
//!          │ L3 │ L2 │ L1 │ L0 │ R0 │ R1 │ R2 │ ## │
//!          └─┬──┴─┬──┴────┴─┬──┴─┬──┴────┴────┴─┬──┘
//!            │    │         │    │              │   (Sentinel)
//!            ↓    ↓         ↓    ↓              ↓    No payload
//!    nodes ╔═══════════╗ ╔═══════════╗      ┌╌╌╌╌╌╌╌╌╌╌┐
//!          ║ payload T ║ ║ payload T ║  ┄┄  ┊ pos = 3   ┊
//!          ╟───────────╢ ╟───────────╢      └╌╌╌╌╌╌╌╌╌╌┘
//!          ║  pos = 3  ║ ║  pos = 0  ║
//!          ╚═══════════╝ ╚═══════════╝
//! ```
//! The `StableDeque` contains:
//! - `store`, the node ids in logical order followed by the sentinel of the
//!   end position;
//! - `nodes`, the storage owning every element;
//! - `middle`, the store index of the last node of the left half (`-1` when the
//!   left half is empty).
//!
//! Each node carries its payload `T` and its `pos`, the distance from the
//! middle counted on its own side. A left node lives at store index
//! `middle - pos` and a right node at `middle + 1 + pos`. Since a node never
//! changes sides, `pos` and the side are all a handle needs to find its node
//! in the store, whatever happened to the rest of the deque.
//!
//! Growing a half at its outer end leaves every `pos` untouched. Inserting or
//! erasing anywhere else renumbers the nodes between that position and the
//! outer end of its half.
//!
//! Note that the sentinel has *NO* payload and stores no `pos`: its `pos` is
//! always the length of the right half.
//!
//! In convention, in a deque with length *n*, the elements are indexed by 0,
//! 1, ..., *n* - 1, and the end position is always indexed by *n*.
//!
//! # Iteration
//!
//! Iterating over a deque is by the [`Iter`] and [`IterMut`] iterators. These
//! are double-ended and exact-size iterators walking the elements in logical
//! order, across both halves.
//!
//! ## Examples
//!
//! ```
//! use stable_deque::StableDeque;
//! use std::iter::FromIterator;
//!
//! let mut deque = StableDeque::from_iter([2, 3]);
//! deque.push_front(1);
//! let mut iter = deque.iter();
//! assert_eq!(iter.next(), Some(&1));
//! assert_eq!(iter.next(), Some(&2));
//! assert_eq!(iter.next(), Some(&3));
//! assert_eq!(iter.next(), None);
//!
//! deque.iter_mut().for_each(|item| *item *= 2);
//! assert_eq!(Vec::from_iter(deque), vec![2, 4, 6]);
//! ```
//!
//! # Cursors
//!
//! A [`Handle`] does not borrow the deque, so every operation on it goes
//! through the deque. The cursors [`Cursor`] and [`CursorMut`] pair a handle
//! with a borrow of its deque, giving the familiar iterator syntax.
//!
//! ## Examples
//!
//! ```
//! use stable_deque::StableDeque;
//! use std::iter::FromIterator;
//!
//! let deque = StableDeque::from_iter([1, 2, 3]);
//! let begin = deque.cursor_start();
//! let end = deque.cursor_end();
//! assert_eq!(end - begin, 3);
//! assert_eq!((begin + 1).current(), Some(&2));
//! assert_eq!(end[-1], 3);
//! assert!(begin < end);
//! ```
//!
//! [`StableDeque`]: crate::StableDeque
//! [`Handle`]: crate::Handle
//! [`Iter`]: crate::Iter
//! [`IterMut`]: crate::IterMut
//! [`Cursor`]: crate::deque::cursor::Cursor
//! [`CursorMut`]: crate::deque::cursor::CursorMut

#[doc(inline)]
pub use deque::cursor::{Handle, Side};
#[doc(inline)]
pub use deque::iterator::{IntoIter, Iter, IterMut};
#[doc(inline)]
pub use deque::StableDeque;
pub use error::Error;

pub mod deque;

mod arena;
mod error;
