//! LIFO adapter.

use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;

use log::trace;

use crate::deque::Deque;
use crate::sequence::BackSequence;

/// Last-in first-out stack over a back sequence.
///
/// ```
/// use strata_collections::Stack;
///
/// let mut s: Stack<i32> = [1, 2].into_iter().collect();
/// s.push(3);
/// assert_eq!(s.top(), Some(&3));
/// assert_eq!(s.pop(), Some(3));
/// assert_eq!(s.len(), 2);
/// ```
pub struct Stack<T, C = Deque<T>> {
    c: C,
    _marker: PhantomData<T>,
}

impl<T> Stack<T> {
    /// Creates an empty stack over a [`Deque`].
    pub const fn new() -> Self {
        Self {
            c: Deque::new(),
            _marker: PhantomData,
        }
    }

    /// Stack of `n` clones of `value`.
    pub fn from_elem(value: T, n: usize) -> Self
    where
        T: Clone,
    {
        Self::from_container(Deque::from_elem(value, n))
    }
}

impl<T, C> Stack<T, C>
where
    C: BackSequence<Item = T>,
{
    /// Wraps an existing container. Its back is the top of the stack.
    pub fn from_container(c: C) -> Self {
        trace!("stack adopted container of {} elements", c.len());
        Self { c, _marker: PhantomData }
    }

    /// Pushes `value` on top.
    #[inline]
    pub fn push(&mut self, value: T) {
        self.c.push_back(value);
    }

    /// Pushes the value produced by `f`.
    #[inline]
    pub fn emplace<F: FnOnce() -> T>(&mut self, f: F) -> &mut T {
        self.c.emplace_back(f)
    }

    /// Pops the top element.
    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        self.c.pop_back()
    }

    /// Top element.
    #[inline]
    pub fn top(&self) -> Option<&T> {
        self.c.back()
    }

    /// Mutable top element.
    #[inline]
    pub fn top_mut(&mut self) -> Option<&mut T> {
        self.c.back_mut()
    }

    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.c.len()
    }

    /// Returns `true` if the stack is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.c.is_empty()
    }

    /// Pops every element, top first.
    pub fn clear(&mut self) {
        while self.c.pop_back().is_some() {}
    }

    /// Exchanges the contents of two stacks.
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(&mut self.c, &mut other.c);
    }

    /// Unwraps the underlying container.
    pub fn into_inner(self) -> C {
        self.c
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C: Clone> Clone for Stack<T, C> {
    fn clone(&self) -> Self {
        Self { c: self.c.clone(), _marker: PhantomData }
    }
}

impl<T, C: fmt::Debug> fmt::Debug for Stack<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Stack").field(&self.c).finish()
    }
}

impl<T, C: PartialEq> PartialEq for Stack<T, C> {
    fn eq(&self, other: &Self) -> bool {
        self.c == other.c
    }
}

impl<T, C: Eq> Eq for Stack<T, C> {}

impl<T, C: PartialOrd> PartialOrd for Stack<T, C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.c.partial_cmp(&other.c)
    }

    fn lt(&self, other: &Self) -> bool {
        self.c < other.c
    }
}

impl<T, C: Ord> Ord for Stack<T, C> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.c.cmp(&other.c)
    }
}

impl<T, C> From<C> for Stack<T, C>
where
    C: BackSequence<Item = T>,
{
    fn from(c: C) -> Self {
        Self::from_container(c)
    }
}

impl<T, C> FromIterator<T> for Stack<T, C>
where
    C: BackSequence<Item = T> + FromIterator<T>,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_container(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifo_order() {
        let mut s = Stack::new();
        for i in 0..2000u32 {
            s.push(i);
        }
        assert_eq!(s.top(), Some(&1999));
        for i in (0..2000).rev() {
            assert_eq!(s.pop(), Some(i));
        }
        assert!(s.is_empty());
    }

    #[test]
    fn over_vec() {
        let mut s: Stack<char, Vec<char>> = Stack::from(vec!['a', 'b']);
        *s.emplace(|| 'c') = 'z';
        assert_eq!(s.into_inner(), ['a', 'b', 'z']);
    }

    #[test]
    fn clear_and_swap() {
        let mut a = Stack::from_elem(1u8, 3);
        let mut b = Stack::new();
        b.push(9);
        a.swap(&mut b);
        assert_eq!(a.len(), 1);
        assert_eq!(b.len(), 3);
        b.clear();
        assert!(b.is_empty());
    }

    #[test]
    fn ordering_follows_container() {
        let a: Stack<i32> = [1, 2, 3].into_iter().collect();
        let b: Stack<i32> = [1, 2, 4].into_iter().collect();
        assert!(a < b);
        assert!(a != b);
        assert_eq!(a.clone(), a);
    }
}
