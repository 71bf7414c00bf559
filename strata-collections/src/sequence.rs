//! Container capabilities the adapters are generic over.

use strata_cursor::RandomAccessCursor;

use crate::deque::{Deque, SegmentCursor};

/// Sequence growable and shrinkable at the back.
pub trait BackSequence {
    /// Element type.
    type Item;

    /// Number of elements.
    fn len(&self) -> usize;

    /// Returns `true` if there are no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends `value`.
    fn push_back(&mut self, value: Self::Item);

    /// Appends the value produced by `f`, returning a reference to it.
    fn emplace_back<F: FnOnce() -> Self::Item>(&mut self, f: F) -> &mut Self::Item;

    /// Removes the last element.
    fn pop_back(&mut self) -> Option<Self::Item>;

    /// Last element.
    fn back(&self) -> Option<&Self::Item>;

    /// Mutable last element.
    fn back_mut(&mut self) -> Option<&mut Self::Item>;
}

/// Sequence that also grows and shrinks at the front.
pub trait FrontSequence: BackSequence {
    /// Prepends `value`.
    fn push_front(&mut self, value: Self::Item);

    /// Removes the first element.
    fn pop_front(&mut self) -> Option<Self::Item>;

    /// First element.
    fn front(&self) -> Option<&Self::Item>;

    /// Mutable first element.
    fn front_mut(&mut self) -> Option<&mut Self::Item>;
}

/// Sequence exposing its elements as a random-access cursor range.
pub trait RandomAccessSequence: BackSequence {
    /// Cursor type of the range.
    type Cursor: RandomAccessCursor<Value = Self::Item>;

    /// `[first, last)` over every element. Valid until the sequence is next
    /// modified through anything but the cursors themselves.
    fn cursor_range(&mut self) -> (Self::Cursor, Self::Cursor);

    /// Element at `index`.
    fn get(&self, index: usize) -> Option<&Self::Item>;
}

// =============================================================================
// Deque
// =============================================================================

impl<T> BackSequence for Deque<T> {
    type Item = T;

    #[inline]
    fn len(&self) -> usize {
        Deque::len(self)
    }

    #[inline]
    fn push_back(&mut self, value: T) {
        Deque::push_back(self, value);
    }

    #[inline]
    fn emplace_back<F: FnOnce() -> T>(&mut self, f: F) -> &mut T {
        Deque::emplace_back(self, f)
    }

    #[inline]
    fn pop_back(&mut self) -> Option<T> {
        Deque::pop_back(self)
    }

    #[inline]
    fn back(&self) -> Option<&T> {
        Deque::back(self)
    }

    #[inline]
    fn back_mut(&mut self) -> Option<&mut T> {
        Deque::back_mut(self)
    }
}

impl<T> FrontSequence for Deque<T> {
    #[inline]
    fn push_front(&mut self, value: T) {
        Deque::push_front(self, value);
    }

    #[inline]
    fn pop_front(&mut self) -> Option<T> {
        Deque::pop_front(self)
    }

    #[inline]
    fn front(&self) -> Option<&T> {
        Deque::front(self)
    }

    #[inline]
    fn front_mut(&mut self) -> Option<&mut T> {
        Deque::front_mut(self)
    }
}

impl<T> RandomAccessSequence for Deque<T> {
    type Cursor = SegmentCursor<T>;

    #[inline]
    fn cursor_range(&mut self) -> (SegmentCursor<T>, SegmentCursor<T>) {
        (self.begin(), self.end())
    }

    #[inline]
    fn get(&self, index: usize) -> Option<&T> {
        Deque::get(self, index)
    }
}

// =============================================================================
// Vec
// =============================================================================

impl<T> BackSequence for Vec<T> {
    type Item = T;

    #[inline]
    fn len(&self) -> usize {
        Vec::len(self)
    }

    #[inline]
    fn push_back(&mut self, value: T) {
        self.push(value);
    }

    fn emplace_back<F: FnOnce() -> T>(&mut self, f: F) -> &mut T {
        self.push(f());
        let last = Vec::len(self) - 1;
        &mut self[last]
    }

    #[inline]
    fn pop_back(&mut self) -> Option<T> {
        self.pop()
    }

    #[inline]
    fn back(&self) -> Option<&T> {
        self.last()
    }

    #[inline]
    fn back_mut(&mut self) -> Option<&mut T> {
        self.last_mut()
    }
}

impl<T> RandomAccessSequence for Vec<T> {
    type Cursor = *mut T;

    #[inline]
    fn cursor_range(&mut self) -> (*mut T, *mut T) {
        let range = self.as_mut_ptr_range();
        (range.start, range.end)
    }

    #[inline]
    fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }
}
