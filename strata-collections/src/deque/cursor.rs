//! Segment-hopping cursor over deque storage.

use std::cmp::Ordering;
use std::fmt;
use std::mem;
use std::ptr;

use strata_cursor::{BidirectionalCursor, Cursor, ForwardCursor, RandomAccessCursor, RandomAccessTag};

/// Number of element slots per deque buffer.
///
/// `4096 / size_of::<T>()` for elements smaller than 256 bytes, otherwise 16.
///
/// # Panics
///
/// Zero-sized `T` is rejected. Containers evaluate this in a constant, so the
/// rejection happens at compile time.
pub const fn buffer_size<T>() -> usize {
    let size = mem::size_of::<T>();
    assert!(size != 0, "zero-sized element types are not supported");
    if size < 256 { 4096 / size } else { 16 }
}

/// Element distance between two addresses, valid for null and unrelated
/// pointers alike.
#[inline]
pub(crate) fn diff<T>(a: *const T, b: *const T) -> isize {
    (a.addr().wrapping_sub(b.addr()) as isize) / mem::size_of::<T>() as isize
}

/// Random-access cursor into a [`Deque`](crate::Deque).
///
/// Holds the element address, the bounds of the buffer containing it and the
/// map slot owning that buffer. Stepping past either end of a buffer
/// re-resolves the bounds from the neighbouring map slot, so traversal is
/// transparent across buffers.
///
/// Cursors are invalidated by any operation that inserts or removes elements,
/// and by dropping the deque.
pub struct SegmentCursor<T> {
    pub(crate) cur: *mut T,
    pub(crate) first: *mut T,
    pub(crate) last: *mut T,
    pub(crate) node: *mut *mut T,
}

impl<T> SegmentCursor<T> {
    pub(crate) const BUF: usize = buffer_size::<T>();

    /// Cursor of a deque that owns no map.
    pub(crate) const fn dangling() -> Self {
        Self {
            cur: ptr::null_mut(),
            first: ptr::null_mut(),
            last: ptr::null_mut(),
            node: ptr::null_mut(),
        }
    }

    /// Cursor at `offset` inside the buffer owned by `node`.
    ///
    /// # Safety
    /// `node` must be a map slot holding a buffer and `offset < BUF`.
    #[inline]
    pub(crate) unsafe fn at_node(node: *mut *mut T, offset: usize) -> Self {
        let mut c = Self::dangling();
        unsafe {
            c.set_node(node);
            c.cur = c.first.add(offset);
        }
        c
    }

    /// Re-points the buffer bounds at `node`. Leaves `cur` untouched.
    ///
    /// # Safety
    /// `node` must be a slot inside the map.
    #[inline]
    pub(crate) unsafe fn set_node(&mut self, node: *mut *mut T) {
        self.node = node;
        self.first = unsafe { *node };
        self.last = self.first.wrapping_add(Self::BUF);
    }

    /// Position of the cursor inside its buffer.
    #[inline]
    pub(crate) fn offset_in_buffer(&self) -> usize {
        diff(self.cur, self.first) as usize
    }

    /// Free slots after the cursor in its buffer, not counting the cursor's
    /// own slot.
    #[inline]
    pub(crate) fn room_after(&self) -> usize {
        (diff(self.last, self.cur) - 1) as usize
    }

    /// Address of the current element.
    #[inline]
    pub fn as_mut_ptr(&self) -> *mut T {
        self.cur
    }
}

impl<T> Clone for SegmentCursor<T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for SegmentCursor<T> {}

impl<T> PartialEq for SegmentCursor<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.cur == other.cur
    }
}

impl<T> Eq for SegmentCursor<T> {}

impl<T> PartialOrd for SegmentCursor<T> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for SegmentCursor<T> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        if self.node == other.node {
            self.cur.cmp(&other.cur)
        } else {
            self.node.cmp(&other.node)
        }
    }
}

impl<T> fmt::Debug for SegmentCursor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SegmentCursor")
            .field("node", &self.node)
            .field("offset", &self.offset_in_buffer())
            .finish()
    }
}

impl<T> Cursor for SegmentCursor<T> {
    type Category = RandomAccessTag;
    type Value = T;

    #[inline]
    unsafe fn as_ptr(&self) -> *mut T {
        self.cur
    }

    #[inline]
    unsafe fn inc(&mut self) {
        unsafe {
            self.cur = self.cur.add(1);
            if self.cur == self.last {
                self.set_node(self.node.add(1));
                self.cur = self.first;
            }
        }
    }

    #[inline]
    unsafe fn distance_to(&self, last: &Self) -> isize {
        Self::BUF as isize * diff(last.node, self.node) + diff(last.cur, last.first)
            - diff(self.cur, self.first)
    }

    #[inline]
    unsafe fn advance(&mut self, n: isize) {
        unsafe { self.jump(n) };
    }
}

impl<T> ForwardCursor for SegmentCursor<T> {}

impl<T> BidirectionalCursor for SegmentCursor<T> {
    #[inline]
    unsafe fn dec(&mut self) {
        unsafe {
            if self.cur == self.first {
                self.set_node(self.node.sub(1));
                self.cur = self.last;
            }
            self.cur = self.cur.sub(1);
        }
    }
}

impl<T> RandomAccessCursor for SegmentCursor<T> {
    #[inline]
    unsafe fn jump(&mut self, n: isize) {
        let buf = Self::BUF as isize;
        let offset = n + diff(self.cur, self.first);
        if (0..buf).contains(&offset) {
            self.cur = self.cur.wrapping_offset(n);
        } else {
            let node_offset = offset.div_euclid(buf);
            unsafe {
                self.set_node(self.node.offset(node_offset));
                self.cur = self.first.add(offset.rem_euclid(buf) as usize);
            }
        }
    }
}
