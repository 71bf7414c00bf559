//! Deque iterators.

use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::slice;

use strata_cursor::{BidirectionalCursor, Cursor};

use super::Deque;
use super::cursor::{SegmentCursor, diff};

/// Borrowing iterator over a [`Deque`].
pub struct Iter<'a, T> {
    front: SegmentCursor<T>,
    back: SegmentCursor<T>,
    len: usize,
    _marker: PhantomData<&'a T>,
}

impl<T> Iter<'_, T> {
    pub(super) fn new(front: SegmentCursor<T>, back: SegmentCursor<T>, len: usize) -> Self {
        Self { front, back, len, _marker: PhantomData }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        unsafe {
            let item = &*self.front.cur;
            self.front.inc();
            Some(item)
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        unsafe {
            self.back.dec();
            Some(&*self.back.cur)
        }
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self { ..*self }
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Iter").field(&self.clone().collect::<Vec<_>>()).finish()
    }
}

unsafe impl<T: Sync> Send for Iter<'_, T> {}
unsafe impl<T: Sync> Sync for Iter<'_, T> {}

/// Mutable borrowing iterator over a [`Deque`].
pub struct IterMut<'a, T> {
    front: SegmentCursor<T>,
    back: SegmentCursor<T>,
    len: usize,
    _marker: PhantomData<&'a mut T>,
}

impl<T> IterMut<'_, T> {
    pub(super) fn new(front: SegmentCursor<T>, back: SegmentCursor<T>, len: usize) -> Self {
        Self { front, back, len, _marker: PhantomData }
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<&'a mut T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        unsafe {
            let item = &mut *self.front.cur;
            self.front.inc();
            Some(item)
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a mut T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        unsafe {
            self.back.dec();
            Some(&mut *self.back.cur)
        }
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}
impl<T> FusedIterator for IterMut<'_, T> {}

impl<T> fmt::Debug for IterMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IterMut").field("len", &self.len).finish()
    }
}

unsafe impl<T: Send> Send for IterMut<'_, T> {}
unsafe impl<T: Sync> Sync for IterMut<'_, T> {}

/// Owning iterator over a [`Deque`].
pub struct IntoIter<T> {
    deque: Deque<T>,
}

impl<T> IntoIter<T> {
    pub(super) fn new(deque: Deque<T>) -> Self {
        Self { deque }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.deque.pop_front()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.deque.len();
        (len, Some(len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        self.deque.pop_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.deque).finish()
    }
}

/// Per-buffer slices of a [`Deque`], front to back.
///
/// ```
/// use strata_collections::Deque;
///
/// let d: Deque<u64> = (0..1000).collect();
/// let total: usize = d.segments().map(<[u64]>::len).sum();
/// assert_eq!(total, 1000);
/// assert!(d.segments().count() >= 2);
/// ```
pub struct Segments<'a, T> {
    front: SegmentCursor<T>,
    back: SegmentCursor<T>,
    _marker: PhantomData<&'a T>,
}

impl<T> Segments<'_, T> {
    pub(super) fn new(front: SegmentCursor<T>, back: SegmentCursor<T>) -> Self {
        Self { front, back, _marker: PhantomData }
    }
}

impl<'a, T> Iterator for Segments<'a, T> {
    type Item = &'a [T];

    fn next(&mut self) -> Option<&'a [T]> {
        if self.front == self.back {
            return None;
        }
        unsafe {
            if self.front.node == self.back.node {
                let run = slice::from_raw_parts(self.front.cur, diff(self.back.cur, self.front.cur) as usize);
                self.front = self.back;
                Some(run)
            } else {
                let run = slice::from_raw_parts(self.front.cur, diff(self.front.last, self.front.cur) as usize);
                self.front.set_node(self.front.node.add(1));
                self.front.cur = self.front.first;
                Some(run)
            }
        }
    }
}

impl<T> FusedIterator for Segments<'_, T> {}

unsafe impl<T: Sync> Send for Segments<'_, T> {}
unsafe impl<T: Sync> Sync for Segments<'_, T> {}
