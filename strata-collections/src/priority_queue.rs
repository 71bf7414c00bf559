//! Binary-heap priority queue adapter.

use std::fmt;
use std::marker::PhantomData;

use strata_algo::{Compare, Less, make_heap_by, pop_heap_by, push_heap_by, sort_heap_by};

use crate::sequence::RandomAccessSequence;

/// Priority queue keeping a random-access container in heap order.
///
/// With the default [`Less`] ordering the greatest element is on top; use
/// [`Greater`](strata_algo::Greater) or a closure for other orders.
///
/// ```
/// use strata_collections::PriorityQueue;
/// use strata_algo::Greater;
///
/// let mut max = PriorityQueue::new();
/// let mut min = PriorityQueue::with_compare(Greater);
/// for v in [3, 1, 4, 1, 5] {
///     max.push(v);
///     min.push(v);
/// }
/// assert_eq!(max.pop(), Some(5));
/// assert_eq!(min.pop(), Some(1));
/// ```
pub struct PriorityQueue<T, C = Vec<T>, P = Less> {
    c: C,
    cmp: P,
    _marker: PhantomData<T>,
}

impl<T: PartialOrd> PriorityQueue<T> {
    /// Creates an empty max-heap over a `Vec`.
    pub const fn new() -> Self {
        Self {
            c: Vec::new(),
            cmp: Less,
            _marker: PhantomData,
        }
    }
}

impl<T, P: Compare<T>> PriorityQueue<T, Vec<T>, P> {
    /// Creates an empty queue over a `Vec` ordered by `cmp`.
    pub const fn with_compare(cmp: P) -> Self {
        Self {
            c: Vec::new(),
            cmp,
            _marker: PhantomData,
        }
    }
}

impl<T, C, P> PriorityQueue<T, C, P>
where
    C: RandomAccessSequence<Item = T>,
    P: Compare<T>,
{
    /// Adopts `c`, heapifying it with `cmp`.
    pub fn from_container_with(mut c: C, cmp: P) -> Self {
        let (first, last) = c.cursor_range();
        unsafe { make_heap_by(first, last, |a: &T, b: &T| cmp.less(a, b)) };
        Self { c, cmp, _marker: PhantomData }
    }

    /// Adopts `c`, heapifying it with the default ordering.
    pub fn from_container(c: C) -> Self
    where
        P: Default,
    {
        Self::from_container_with(c, P::default())
    }

    /// Inserts `value`.
    pub fn push(&mut self, value: T) {
        self.c.push_back(value);
        let (first, last) = self.c.cursor_range();
        let cmp = &self.cmp;
        unsafe { push_heap_by(first, last, |a: &T, b: &T| cmp.less(a, b)) };
    }

    /// Inserts the value produced by `f`.
    pub fn emplace<F: FnOnce() -> T>(&mut self, f: F) {
        self.c.emplace_back(f);
        let (first, last) = self.c.cursor_range();
        let cmp = &self.cmp;
        unsafe { push_heap_by(first, last, |a: &T, b: &T| cmp.less(a, b)) };
    }

    /// Removes and returns the top element.
    pub fn pop(&mut self) -> Option<T> {
        if self.c.is_empty() {
            return None;
        }
        let (first, last) = self.c.cursor_range();
        let cmp = &self.cmp;
        unsafe { pop_heap_by(first, last, |a: &T, b: &T| cmp.less(a, b)) };
        self.c.pop_back()
    }

    /// Top element.
    #[inline]
    pub fn top(&self) -> Option<&T> {
        self.c.get(0)
    }

    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.c.len()
    }

    /// Returns `true` if the queue is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.c.is_empty()
    }

    /// Unwraps the container, still in heap order.
    pub fn into_inner(self) -> C {
        self.c
    }

    /// Unwraps the container sorted in ascending order of the comparator.
    pub fn into_sorted(mut self) -> C {
        let (first, last) = self.c.cursor_range();
        let cmp = &self.cmp;
        unsafe { sort_heap_by(first, last, |a: &T, b: &T| cmp.less(a, b)) };
        self.c
    }

    /// [`into_sorted`](PriorityQueue::into_sorted) collected into a `Vec`.
    pub fn into_sorted_vec(self) -> Vec<T>
    where
        C: IntoIterator<Item = T>,
    {
        self.into_sorted().into_iter().collect()
    }
}

impl<T: PartialOrd> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C: Clone, P: Clone> Clone for PriorityQueue<T, C, P> {
    fn clone(&self) -> Self {
        Self {
            c: self.c.clone(),
            cmp: self.cmp.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T, C: fmt::Debug, P> fmt::Debug for PriorityQueue<T, C, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PriorityQueue").field(&self.c).finish()
    }
}

impl<T, C, P> Extend<T> for PriorityQueue<T, C, P>
where
    C: RandomAccessSequence<Item = T>,
    P: Compare<T>,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}

impl<T, C, P> FromIterator<T> for PriorityQueue<T, C, P>
where
    C: RandomAccessSequence<Item = T> + FromIterator<T>,
    P: Compare<T> + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_container(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Deque;
    use strata_algo::Greater;

    #[test]
    fn pops_in_priority_order() {
        let mut q = PriorityQueue::new();
        for v in [5, 9, 1, 7, 3, 9, 0] {
            q.push(v);
        }
        assert_eq!(q.top(), Some(&9));
        let mut out = Vec::new();
        while let Some(v) = q.pop() {
            out.push(v);
        }
        assert_eq!(out, [9, 9, 7, 5, 3, 1, 0]);
    }

    #[test]
    fn from_container_heapifies() {
        let q: PriorityQueue<i32> = PriorityQueue::from_container(vec![1, 8, 3, 6]);
        assert_eq!(q.top(), Some(&8));
        assert_eq!(q.into_sorted_vec(), [1, 3, 6, 8]);
    }

    #[test]
    fn min_heap_over_deque() {
        let d: Deque<u32> = (0..3000).rev().collect();
        let mut q: PriorityQueue<u32, Deque<u32>, Greater> = PriorityQueue::from_container(d);
        for expected in 0..3000 {
            assert_eq!(q.pop(), Some(expected));
        }
        assert!(q.is_empty());
    }

    #[test]
    fn closure_ordering() {
        let mut q = PriorityQueue::with_compare(|a: &&str, b: &&str| a.len() < b.len());
        q.extend(["aa", "a", "aaaa", "aaa"]);
        assert_eq!(q.pop(), Some("aaaa"));
        assert_eq!(q.len(), 3);
    }
}
