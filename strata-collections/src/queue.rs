//! FIFO adapter.

use std::fmt;
use std::marker::PhantomData;

use crate::deque::Deque;
use crate::sequence::{BackSequence, FrontSequence};

/// First-in first-out queue over a front-and-back sequence.
///
/// ```
/// use strata_collections::Queue;
///
/// let mut q = Queue::new();
/// q.push(1);
/// q.push(2);
/// assert_eq!(q.front(), Some(&1));
/// assert_eq!(q.back(), Some(&2));
/// assert_eq!(q.pop(), Some(1));
/// assert_eq!(q.len(), 1);
/// ```
pub struct Queue<T, C = Deque<T>> {
    c: C,
    _marker: PhantomData<T>,
}

impl<T> Queue<T> {
    /// Creates an empty queue over a [`Deque`].
    pub const fn new() -> Self {
        Self {
            c: Deque::new(),
            _marker: PhantomData,
        }
    }
}

impl<T, C> Queue<T, C>
where
    C: FrontSequence<Item = T>,
{
    /// Wraps an existing container. Its front is the head of the queue.
    pub fn from_container(c: C) -> Self {
        Self { c, _marker: PhantomData }
    }

    /// Enqueues `value` at the back.
    #[inline]
    pub fn push(&mut self, value: T) {
        self.c.push_back(value);
    }

    /// Enqueues the value produced by `f`.
    #[inline]
    pub fn emplace<F: FnOnce() -> T>(&mut self, f: F) -> &mut T {
        self.c.emplace_back(f)
    }

    /// Dequeues from the front.
    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        self.c.pop_front()
    }

    /// Oldest element.
    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.c.front()
    }

    /// Mutable oldest element.
    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.c.front_mut()
    }

    /// Newest element.
    #[inline]
    pub fn back(&self) -> Option<&T> {
        self.c.back()
    }

    /// Mutable newest element.
    #[inline]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.c.back_mut()
    }

    /// Number of queued elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.c.len()
    }

    /// Returns `true` if nothing is queued.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.c.is_empty()
    }

    /// Borrows the underlying container.
    pub fn as_inner(&self) -> &C {
        &self.c
    }

    /// Unwraps the underlying container.
    pub fn into_inner(self) -> C {
        self.c
    }
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C: Clone> Clone for Queue<T, C> {
    fn clone(&self) -> Self {
        Self { c: self.c.clone(), _marker: PhantomData }
    }
}

impl<T, C: fmt::Debug> fmt::Debug for Queue<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Queue").field(&self.c).finish()
    }
}

impl<T, C: PartialEq> PartialEq for Queue<T, C> {
    fn eq(&self, other: &Self) -> bool {
        self.c == other.c
    }
}

impl<T, C: Eq> Eq for Queue<T, C> {}

impl<T, C> From<C> for Queue<T, C>
where
    C: FrontSequence<Item = T>,
{
    fn from(c: C) -> Self {
        Self::from_container(c)
    }
}

impl<T, C> FromIterator<T> for Queue<T, C>
where
    C: FrontSequence<Item = T> + FromIterator<T>,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_container(iter.into_iter().collect())
    }
}

impl<T, C> Extend<T> for Queue<T, C>
where
    C: FrontSequence<Item = T>,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fifo_order_across_buffers() {
        let n = 3 * Deque::<u64>::buffer_size() as u64;
        let mut q = Queue::new();
        for i in 0..n {
            q.push(i);
        }
        for i in 0..n {
            assert_eq!(q.pop(), Some(i));
        }
        assert!(q.is_empty());
        assert_eq!(q.pop(), None);
    }

    #[test]
    fn wraps_existing_deque() {
        let q: Queue<i32> = Queue::from(Deque::from([1, 2, 3]));
        assert_eq!(q.front(), Some(&1));
        assert_eq!(q.back(), Some(&3));
        assert_eq!(q.into_inner(), [1, 2, 3]);
    }

    #[test]
    fn emplace_returns_slot() {
        let mut q: Queue<String> = Queue::new();
        q.emplace(String::new).push_str("hi");
        assert_eq!(q.front().map(String::as_str), Some("hi"));
    }

    #[test]
    fn collect_and_compare() {
        let a: Queue<u8> = (0..4).collect();
        let mut b = Queue::new();
        b.extend(0..4u8);
        assert_eq!(a, b);
    }
}
