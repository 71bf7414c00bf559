//! Double-ended queue over a map of fixed-size buffers.
//!
//! # Layout
//!
//! ```text
//!   map:   [ null | null | buf0 | buf1 | buf2 | null | null | null ]
//!                           │      │      │
//!   buf0:  [ . . . a b c ]  │      │      │   begin.cur = &a
//!   buf1:  [ d e f g h i ] ─┘      │      │
//!   buf2:  [ j k . . . . ] ────────┘      │   end.cur = one past k
//! ```
//!
//! Every map slot from `begin.node` through `end.node` holds a buffer of
//! [`buffer_size::<T>()`](buffer_size) slots; every other slot is null. The
//! live elements are `[begin, end)`. `end` always points at a valid slot,
//! which is why a buffer is added as soon as the last slot of the back
//! buffer is filled.
//!
//! Elements never move when the map is reallocated, only buffer pointers do.

mod builder;
mod cursor;
mod iter;

pub use builder::{ConfigError, DEFAULT_MAP_INIT_SIZE, DEFAULT_MAP_SLACK, DequeBuilder, MapPolicy};
pub use cursor::{SegmentCursor, buffer_size};
pub use iter::{IntoIter, Iter, IterMut, Segments};

use std::cmp::{self, Ordering};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::mem::{self, ManuallyDrop};
use std::ops::{Bound, Index, IndexMut, RangeBounds};
use std::ptr::{self, NonNull};

use log::{debug, trace};
use strata_algo::{copy, equal, lexicographical_compare, reverse};
use strata_cursor::{BidirectionalCursor, Cursor, RandomAccessCursor, Reverse};
use strata_mem::{
    Allocator, RangeError, TryReserveError, ensure, precondition, uninitialized_copy_bitwise,
    uninitialized_copy_n, uninitialized_fill_n, uninitialized_fill_with, uninitialized_move,
    uninitialized_move_backward,
};

use cursor::diff;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum End {
    Front,
    Back,
}

/// Frees the buffers held by map slots `[first, last)` on drop.
struct FreeSlots<T> {
    first: *mut *mut T,
    last: *mut *mut T,
}

impl<T> Drop for FreeSlots<T> {
    fn drop(&mut self) {
        unsafe { free_slots(self.first, self.last) };
    }
}

/// Frees every buffer in the map, then the map.
struct FreeMap<T> {
    map: *mut *mut T,
    size: usize,
}

impl<T> Drop for FreeMap<T> {
    fn drop(&mut self) {
        unsafe {
            free_slots(self.map, self.map.add(self.size));
            Allocator::deallocate(NonNull::new_unchecked(self.map), self.size);
        }
    }
}

/// Releases and nulls every non-null slot in `[first, last)`.
unsafe fn free_slots<T>(first: *mut *mut T, last: *mut *mut T) {
    let mut slot = first;
    while slot < last {
        unsafe {
            if let Some(buf) = NonNull::new(*slot) {
                Allocator::deallocate(buf, SegmentCursor::<T>::BUF);
                *slot = ptr::null_mut();
            }
            slot = slot.add(1);
        }
    }
}

/// Double-ended queue with amortized O(1) push and pop at both ends and O(1)
/// random access.
///
/// Storage is a set of fixed-size buffers indexed by a map of buffer
/// pointers, so growing at either end never relocates existing elements.
///
/// ```
/// use strata_collections::{Deque, deque};
///
/// let mut d = deque![2, 3];
/// d.push_front(1);
/// d.push_back(4);
/// assert_eq!(d, [1, 2, 3, 4]);
/// assert_eq!(d[2], 3);
/// assert_eq!(d.pop_front(), Some(1));
/// ```
pub struct Deque<T> {
    begin: SegmentCursor<T>,
    end: SegmentCursor<T>,
    map: *mut *mut T,
    map_size: usize,
    policy: MapPolicy,
    _marker: PhantomData<T>,
}

unsafe impl<T: Send> Send for Deque<T> {}
unsafe impl<T: Sync> Sync for Deque<T> {}

// =============================================================================
// Construction
// =============================================================================

impl<T> Deque<T> {
    const BUF: usize = SegmentCursor::<T>::BUF;

    /// Creates an empty deque. Does not allocate.
    pub const fn new() -> Self {
        Self::with_policy(MapPolicy::DEFAULT)
    }

    pub(crate) const fn with_policy(policy: MapPolicy) -> Self {
        let _: usize = Self::BUF;
        Self {
            begin: SegmentCursor::dangling(),
            end: SegmentCursor::dangling(),
            map: ptr::null_mut(),
            map_size: 0,
            policy,
            _marker: PhantomData,
        }
    }

    /// Creates a deque of `n` default values.
    pub fn with_len(n: usize) -> Self
    where
        T: Default,
    {
        Self::try_with_len(n).unwrap_or_else(|e| e.handle())
    }

    /// Fallible [`with_len`](Deque::with_len).
    pub fn try_with_len(n: usize) -> Result<Self, TryReserveError>
    where
        T: Default,
    {
        let mut deque = Self::new();
        deque.map_init(n, deque.policy.init_size)?;
        unsafe {
            deque.init_segments(n, |dst, count| {
                uninitialized_fill_with(dst, count, T::default);
            });
        }
        Ok(deque)
    }

    /// Creates a deque of `n` clones of `value`.
    pub fn from_elem(value: T, n: usize) -> Self
    where
        T: Clone,
    {
        Self::try_from_elem(value, n).unwrap_or_else(|e| e.handle())
    }

    /// Fallible [`from_elem`](Deque::from_elem). Nothing is leaked when a
    /// buffer allocation fails part way.
    pub fn try_from_elem(value: T, n: usize) -> Result<Self, TryReserveError>
    where
        T: Clone,
    {
        let mut deque = Self::new();
        deque.map_init(n, deque.policy.init_size)?;
        unsafe {
            deque.init_segments(n, |dst, count| {
                uninitialized_fill_n(dst, count, &value);
            });
        }
        Ok(deque)
    }

    /// Creates a deque holding clones of `items`.
    pub fn from_slice(items: &[T]) -> Self
    where
        T: Clone,
    {
        Self::try_from_slice(items).unwrap_or_else(|e| e.handle())
    }

    /// Fallible [`from_slice`](Deque::from_slice).
    pub fn try_from_slice(items: &[T]) -> Result<Self, TryReserveError>
    where
        T: Clone,
    {
        let range = items.as_ptr_range();
        unsafe { Self::try_from_cursors(MapPolicy::DEFAULT, range.start, range.end) }
    }

    /// Creates a deque from `items` with one `memcpy` per buffer.
    pub fn from_copy_slice(items: &[T]) -> Self
    where
        T: Copy,
    {
        let mut deque = Self::new();
        deque
            .map_init(items.len(), deque.policy.init_size)
            .unwrap_or_else(|e| e.handle());
        let mut src = items.as_ptr();
        unsafe {
            deque.init_segments(items.len(), |dst, count| {
                uninitialized_copy_bitwise(src, src.add(count), dst);
                src = src.add(count);
            });
        }
        deque
    }

    /// Clones `[first, last)` into a new deque.
    ///
    /// # Safety
    /// `[first, last)` must be a valid range of live elements.
    unsafe fn try_from_cursors<C>(policy: MapPolicy, first: C, last: C) -> Result<Self, TryReserveError>
    where
        C: Cursor<Value = T>,
        T: Clone,
    {
        let n = unsafe { first.distance_to(&last) } as usize;
        let mut deque = Self::with_policy(policy);
        deque.map_init(n, policy.init_size)?;
        let mut src = first;
        unsafe {
            deque.init_segments(n, |dst, count| {
                src = uninitialized_copy_n(src.clone(), count, dst).0;
            });
        }
        Ok(deque)
    }

    /// Moves `n` elements read from `src` into a freshly initialized map.
    ///
    /// # Safety
    /// `src` must hold `n` live elements, which are logically moved out.
    unsafe fn from_raw_elements(src: *const T, n: usize) -> Self {
        let mut deque = Self::new();
        deque.map_init(n, deque.policy.init_size).unwrap_or_else(|e| e.handle());
        let mut src = src.cast_mut();
        unsafe {
            deque.init_segments(n, |dst, count| {
                uninitialized_move(src, src.add(count), dst);
                src = src.add(count);
            });
        }
        deque
    }

    /// Fills `n` slots starting at `begin`, one buffer at a time. `fill`
    /// receives the destination and the count for that buffer.
    ///
    /// `end` advances after each buffer, so a panic inside `fill` leaves the
    /// deque owning exactly the completed buffers.
    unsafe fn init_segments<F>(&mut self, n: usize, mut fill: F)
    where
        F: FnMut(*mut T, usize),
    {
        let mut cur = self.begin;
        self.end = cur;
        let mut remaining = n;
        while remaining > 0 {
            let count = cmp::min(diff(cur.last, cur.cur) as usize, remaining);
            fill(cur.cur, count);
            remaining -= count;
            unsafe { cur.jump(count as isize) };
            self.end = cur;
        }
    }
}

// =============================================================================
// Map management
// =============================================================================

impl<T> Deque<T> {
    fn allocate_map(size: usize) -> Result<*mut *mut T, TryReserveError> {
        let map = Allocator::<*mut T>::allocate(size)?.as_ptr();
        unsafe { ptr::write_bytes(map, 0, size) };
        Ok(map)
    }

    /// Allocates a buffer into every slot of `[first, last)`. On failure the
    /// buffers allocated by this call are released again.
    unsafe fn create_buffers(first: *mut *mut T, last: *mut *mut T) -> Result<(), TryReserveError> {
        let mut slot = first;
        while slot < last {
            match Allocator::<T>::allocate(Self::BUF) {
                Ok(buf) => unsafe {
                    *slot = buf.as_ptr();
                    slot = slot.add(1);
                },
                Err(e) => {
                    unsafe { free_slots(first, slot) };
                    return Err(e);
                }
            }
        }
        trace!("allocated {} deque buffers", diff(last, first));
        Ok(())
    }

    /// Allocates the map and the buffers for `n_elem` elements, centered.
    fn map_init(&mut self, n_elem: usize, min_map_size: usize) -> Result<(), TryReserveError> {
        precondition!(self.map.is_null());
        ensure!(n_elem <= Allocator::<T>::max_size(), TryReserveError::CapacityOverflow);

        let nodes = n_elem / Self::BUF + 1;
        let map_size = cmp::max(min_map_size, nodes + 2);
        let map = Self::allocate_map(map_size)?;
        unsafe {
            let start = map.add((map_size - nodes) / 2);
            let finish = start.add(nodes);
            if let Err(e) = Self::create_buffers(start, finish) {
                Allocator::deallocate(NonNull::new_unchecked(map), map_size);
                return Err(e);
            }
            self.map = map;
            self.map_size = map_size;
            self.begin = SegmentCursor::at_node(start, 0);
            self.end = SegmentCursor::at_node(finish.sub(1), n_elem % Self::BUF);
        }
        Ok(())
    }

    /// Allocates a map large enough that `elements` pushes at either end do
    /// not reallocate it.
    pub(crate) fn reserve_map(&mut self, elements: usize) -> Result<(), TryReserveError> {
        ensure!(elements <= Allocator::<T>::max_size(), TryReserveError::CapacityOverflow);
        let nodes = elements / Self::BUF + 1;
        self.map_init(0, cmp::max(self.policy.init_size, 2 * nodes + 1))
    }

    /// Ensures `n` free slots exist before `begin` or after `end`, allocating
    /// the missing buffers. The new buffers lie outside `[begin, end]` until
    /// the caller moves a cursor over them.
    fn require_capacity(&mut self, n: usize, end: End) -> Result<(), TryReserveError> {
        precondition!(!self.map.is_null());
        match end {
            End::Front => {
                let avail = self.begin.offset_in_buffer();
                if n <= avail {
                    return Ok(());
                }
                let need = (n - avail).div_ceil(Self::BUF);
                if need > diff(self.begin.node, self.map) as usize {
                    self.reallocate_map(need, End::Front)?;
                }
                unsafe { Self::create_buffers(self.begin.node.sub(need), self.begin.node) }
            }
            End::Back => {
                let avail = self.end.room_after();
                if n <= avail {
                    return Ok(());
                }
                let need = (n - avail).div_ceil(Self::BUF);
                let room = self.map_size - diff(self.end.node, self.map) as usize - 1;
                if need > room {
                    self.reallocate_map(need, End::Back)?;
                }
                unsafe { Self::create_buffers(self.end.node.add(1), self.end.node.add(1 + need)) }
            }
        }
    }

    /// Makes room for `need` more buffers at `end`, either by recentering the
    /// live buffers in the current map or by moving them to a larger one.
    fn reallocate_map(&mut self, need: usize, end: End) -> Result<(), TryReserveError> {
        let old_nodes = diff(self.end.node, self.begin.node) as usize + 1;
        let new_nodes = old_nodes
            .checked_add(need)
            .ok_or(TryReserveError::CapacityOverflow)?;
        let lead = if end == End::Front { need } else { 0 };
        let begin_off = self.begin.offset_in_buffer();
        let end_off = self.end.offset_in_buffer();

        let recenter = new_nodes
            .checked_mul(2)
            .is_some_and(|twice| self.map_size > twice);

        let start = if recenter {
            unsafe {
                let start = self.map.add((self.map_size - new_nodes) / 2 + lead);
                ptr::copy(self.begin.node, start, old_nodes);
                let tail = start.add(old_nodes);
                ptr::write_bytes(self.map, 0, diff(start, self.map) as usize);
                ptr::write_bytes(tail, 0, self.map_size - diff(tail, self.map) as usize);
                start
            }
        } else {
            let grown = self
                .map_size
                .checked_add(need)
                .and_then(|s| s.checked_add(self.policy.slack))
                .ok_or(TryReserveError::CapacityOverflow)?;
            let doubled = self
                .map_size
                .checked_mul(2)
                .ok_or(TryReserveError::CapacityOverflow)?;
            let new_size = cmp::max(doubled, grown);
            let map = Self::allocate_map(new_size)?;
            unsafe {
                let start = map.add((new_size - new_nodes) / 2 + lead);
                ptr::copy_nonoverlapping(self.begin.node, start, old_nodes);
                Allocator::deallocate(NonNull::new_unchecked(self.map), self.map_size);
                debug!("deque map grew from {} to {} slots", self.map_size, new_size);
                self.map = map;
                self.map_size = new_size;
                start
            }
        };
        if recenter {
            debug!("deque map of {} slots recentered around {} buffers", self.map_size, new_nodes);
        }

        unsafe {
            self.begin = SegmentCursor::at_node(start, begin_off);
            self.end = SegmentCursor::at_node(start.add(old_nodes - 1), end_off);
        }
        Ok(())
    }

    /// Frees the buffers behind the new `begin`.
    unsafe fn shrink_front_to(&mut self, begin: SegmentCursor<T>) {
        unsafe { free_slots(self.begin.node, begin.node) };
        self.begin = begin;
    }

    /// Frees the buffers past the new `end`.
    unsafe fn shrink_back_to(&mut self, end: SegmentCursor<T>) {
        unsafe { free_slots(end.node.add(1), self.end.node.add(1)) };
        self.end = end;
    }

    /// Shrinks the map to the buffers in use plus the policy's minimum.
    ///
    /// Best effort: if the smaller map cannot be allocated the current one is
    /// kept.
    pub fn shrink_to_fit(&mut self) {
        if self.map.is_null() {
            return;
        }
        let nodes = diff(self.end.node, self.begin.node) as usize + 1;
        let new_size = cmp::max(self.policy.init_size, nodes + 2);
        if new_size >= self.map_size {
            return;
        }
        let Ok(map) = Self::allocate_map(new_size) else {
            return;
        };
        let begin_off = self.begin.offset_in_buffer();
        let end_off = self.end.offset_in_buffer();
        unsafe {
            let start = map.add((new_size - nodes) / 2);
            ptr::copy_nonoverlapping(self.begin.node, start, nodes);
            Allocator::deallocate(NonNull::new_unchecked(self.map), self.map_size);
            debug!("deque map shrunk from {} to {} slots", self.map_size, new_size);
            self.map = map;
            self.map_size = new_size;
            self.begin = SegmentCursor::at_node(start, begin_off);
            self.end = SegmentCursor::at_node(start.add(nodes - 1), end_off);
        }
    }
}

// =============================================================================
// Push / pop
// =============================================================================

impl<T> Deque<T> {
    /// Constructs the value returned by `f` at the back. Returns a reference
    /// to it.
    ///
    /// If `f` panics, the deque is unchanged.
    pub fn try_emplace_back<F>(&mut self, f: F) -> Result<&mut T, TryReserveError>
    where
        F: FnOnce() -> T,
    {
        if self.map.is_null() {
            self.map_init(0, self.policy.init_size)?;
        }
        unsafe {
            if self.end.room_after() > 0 {
                let slot = self.end.cur;
                Allocator::construct_with(slot, f);
                self.end.cur = slot.add(1);
                return Ok(&mut *slot);
            }

            self.require_capacity(1, End::Back)?;
            let spare = self.end.node.add(1);
            let guard = FreeSlots { first: spare, last: spare.add(1) };
            let slot = self.end.cur;
            Allocator::construct_with(slot, f);
            mem::forget(guard);
            self.end.inc();
            Ok(&mut *slot)
        }
    }

    /// Constructs the value returned by `f` at the front. Returns a reference
    /// to it.
    ///
    /// If `f` panics, the deque is unchanged.
    pub fn try_emplace_front<F>(&mut self, f: F) -> Result<&mut T, TryReserveError>
    where
        F: FnOnce() -> T,
    {
        if self.map.is_null() {
            self.map_init(0, self.policy.init_size)?;
        }
        unsafe {
            if self.begin.cur != self.begin.first {
                let slot = self.begin.cur.sub(1);
                Allocator::construct_with(slot, f);
                self.begin.cur = slot;
                return Ok(&mut *slot);
            }

            self.require_capacity(1, End::Front)?;
            let guard = FreeSlots { first: self.begin.node.sub(1), last: self.begin.node };
            let mut begin = self.begin;
            begin.dec();
            Allocator::construct_with(begin.cur, f);
            mem::forget(guard);
            self.begin = begin;
            Ok(&mut *begin.cur)
        }
    }

    /// Infallible [`try_emplace_back`](Deque::try_emplace_back).
    pub fn emplace_back<F>(&mut self, f: F) -> &mut T
    where
        F: FnOnce() -> T,
    {
        match self.try_emplace_back(f) {
            Ok(v) => v,
            Err(e) => e.handle(),
        }
    }

    /// Infallible [`try_emplace_front`](Deque::try_emplace_front).
    pub fn emplace_front<F>(&mut self, f: F) -> &mut T
    where
        F: FnOnce() -> T,
    {
        match self.try_emplace_front(f) {
            Ok(v) => v,
            Err(e) => e.handle(),
        }
    }

    /// Appends `value`. On error `value` is dropped and the deque is
    /// unchanged.
    pub fn try_push_back(&mut self, value: T) -> Result<(), TryReserveError> {
        self.try_emplace_back(|| value).map(|_| ())
    }

    /// Prepends `value`. On error `value` is dropped and the deque is
    /// unchanged.
    pub fn try_push_front(&mut self, value: T) -> Result<(), TryReserveError> {
        self.try_emplace_front(|| value).map(|_| ())
    }

    /// Appends `value`.
    #[inline]
    pub fn push_back(&mut self, value: T) {
        self.emplace_back(|| value);
    }

    /// Prepends `value`.
    #[inline]
    pub fn push_front(&mut self, value: T) {
        self.emplace_front(|| value);
    }

    /// Removes and returns the last element.
    pub fn pop_back(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        unsafe {
            let mut last = self.end;
            last.dec();
            let value = last.cur.read();
            self.shrink_back_to(last);
            Some(value)
        }
    }

    /// Removes and returns the first element.
    pub fn pop_front(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        unsafe {
            let value = self.begin.cur.read();
            let mut next = self.begin;
            next.inc();
            self.shrink_front_to(next);
            Some(value)
        }
    }
}

// =============================================================================
// Insert / erase
// =============================================================================

/// Relocates the elements next to an erased gap over it once the gap's
/// elements have been dropped, even if one of those drops panics.
struct CloseGap<'a, T> {
    deque: &'a mut Deque<T>,
    start: usize,
    count: usize,
}

impl<T> Drop for CloseGap<'_, T> {
    fn drop(&mut self) {
        unsafe { self.deque.close_gap(self.start, self.count) };
    }
}

/// Resolves `range` against `len`, panicking if it is out of bounds.
#[track_caller]
fn resolve_range<R: RangeBounds<usize>>(range: R, len: usize) -> (usize, usize) {
    let start = match range.start_bound() {
        Bound::Included(&s) => s,
        Bound::Excluded(&s) => s
            .checked_add(1)
            .unwrap_or_else(|| panic!("range start overflows usize")),
        Bound::Unbounded => 0,
    };
    let end = match range.end_bound() {
        Bound::Included(&e) => e
            .checked_add(1)
            .unwrap_or_else(|| panic!("range end overflows usize")),
        Bound::Excluded(&e) => e,
        Bound::Unbounded => len,
    };
    assert!(start <= end, "range start {start} exceeds range end {end}");
    assert!(end <= len, "range end {end} out of bounds for length {len}");
    (start, end)
}

impl<T> Deque<T> {
    /// Inserts `value` at `index`, shifting the shorter side by one slot.
    ///
    /// # Panics
    /// If `index > len`.
    pub fn insert(&mut self, index: usize, value: T) {
        self.try_insert(index, value).unwrap_or_else(|e| e.handle());
    }

    /// Fallible [`insert`](Deque::insert).
    ///
    /// # Panics
    /// If `index > len`.
    pub fn try_insert(&mut self, index: usize, value: T) -> Result<(), TryReserveError> {
        let len = self.len();
        assert!(index <= len, "insertion index (is {index}) should be <= len (is {len})");
        if index == 0 {
            return self.try_push_front(value);
        }
        if index == len {
            return self.try_push_back(value);
        }

        unsafe {
            if index < len / 2 {
                self.require_capacity(1, End::Front)?;
                let mut new_begin = self.begin;
                new_begin.dec();
                let pos = self.begin.offset(index as isize);
                let hole = uninitialized_move(self.begin, pos, new_begin);
                hole.cur.write(value);
                self.begin = new_begin;
            } else {
                self.require_capacity(1, End::Back)?;
                let pos = self.begin.offset(index as isize);
                let mut new_end = self.end;
                new_end.inc();
                uninitialized_move_backward(pos, self.end, new_end);
                pos.cur.write(value);
                self.end = new_end;
            }
        }
        Ok(())
    }

    /// Inserts `n` clones of `value` at `index`.
    ///
    /// # Panics
    /// If `index > len`.
    pub fn insert_n(&mut self, index: usize, n: usize, value: &T)
    where
        T: Clone,
    {
        self.try_insert_n(index, n, value).unwrap_or_else(|e| e.handle());
    }

    /// Fallible [`insert_n`](Deque::insert_n). On error, or if a clone panics,
    /// the deque is unchanged and every buffer allocated by the call is
    /// released.
    pub fn try_insert_n(&mut self, index: usize, n: usize, value: &T) -> Result<(), TryReserveError>
    where
        T: Clone,
    {
        let len = self.len();
        assert!(index <= len, "insertion index (is {index}) should be <= len (is {len})");
        if n == 0 {
            return Ok(());
        }
        ensure!(
            n <= Allocator::<T>::max_size() - len,
            TryReserveError::CapacityOverflow
        );
        if self.map.is_null() {
            self.map_init(0, self.policy.init_size)?;
        }

        let n = n as isize;
        let index = index as isize;
        unsafe {
            if index < len as isize - index {
                self.require_capacity(n as usize, End::Front)?;
                let new_begin = self.begin.offset(-n);
                let guard = FreeSlots { first: new_begin.node, last: self.begin.node };
                uninitialized_fill_n(new_begin, n as usize, value);
                mem::forget(guard);
                self.begin = new_begin;
                // [clones, prefix] -> [prefix, clones]
                let b = self.begin;
                rotate(b, b.offset(n), b.offset(n + index));
            } else {
                self.require_capacity(n as usize, End::Back)?;
                let new_end = self.end.offset(n);
                let guard = FreeSlots { first: self.end.node.add(1), last: new_end.node.add(1) };
                uninitialized_fill_n(self.end, n as usize, value);
                mem::forget(guard);
                let old_end = self.end;
                self.end = new_end;
                // [suffix, clones] -> [clones, suffix]
                rotate(self.begin.offset(index), old_end, new_end);
            }
        }
        Ok(())
    }

    /// Inserts every item of `iter` at `index`, in order.
    ///
    /// Items are pushed onto the shorter side and then rotated into place.
    ///
    /// # Panics
    /// If `index > len`.
    pub fn insert_many<I>(&mut self, index: usize, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        let len = self.len();
        assert!(index <= len, "insertion index (is {index}) should be <= len (is {len})");
        let index = index as isize;

        if index < len as isize - index {
            let mut k = 0isize;
            for item in iter {
                self.push_front(item);
                k += 1;
            }
            // [reversed items, prefix] -> [prefix, items]
            unsafe {
                let b = self.begin;
                reverse(b, b.offset(k));
                rotate(b, b.offset(k), b.offset(k + index));
            }
        } else {
            let mut k = 0isize;
            for item in iter {
                self.push_back(item);
                k += 1;
            }
            unsafe {
                let mid = self.end.offset(-k);
                rotate(self.begin.offset(index), mid, self.end);
            }
        }
    }

    /// Removes and returns the element at `index`, shifting the shorter side.
    pub fn remove(&mut self, index: usize) -> Option<T> {
        let len = self.len();
        if index >= len {
            return None;
        }
        unsafe {
            let pos = self.begin.offset(index as isize);
            let value = pos.cur.read();
            let mut next = pos;
            next.inc();
            if index < len / 2 {
                uninitialized_move_backward(self.begin, pos, next);
                let mut begin = self.begin;
                begin.inc();
                self.shrink_front_to(begin);
            } else {
                uninitialized_move(next, self.end, pos);
                let mut end = self.end;
                end.dec();
                self.shrink_back_to(end);
            }
            Some(value)
        }
    }

    /// Drops the elements in `range` and closes the gap from the shorter
    /// side. Erasing everything is [`clear`](Deque::clear).
    ///
    /// # Panics
    /// If the range is out of bounds.
    #[track_caller]
    pub fn erase<R: RangeBounds<usize>>(&mut self, range: R) {
        let len = self.len();
        let (start, end) = resolve_range(range, len);
        if start == end {
            return;
        }
        if start == 0 && end == len {
            self.clear();
            return;
        }
        unsafe {
            let first = self.begin.offset(start as isize);
            let last = self.begin.offset(end as isize);
            let _gap = CloseGap { deque: self, start, count: end - start };
            drop_range(first, last);
        }
    }

    /// Relocates the survivors over the `count` dead slots at `start`.
    unsafe fn close_gap(&mut self, start: usize, count: usize) {
        let after = self.len() - start - count;
        unsafe {
            let first = self.begin.offset(start as isize);
            let last = first.offset(count as isize);
            if start < after {
                uninitialized_move_backward(self.begin, first, last);
                self.shrink_front_to(self.begin.offset(count as isize));
            } else {
                uninitialized_move(last, self.end, first);
                self.shrink_back_to(self.end.offset(-(count as isize)));
            }
        }
    }

    /// Keeps the first `len` elements, dropping the rest.
    pub fn truncate(&mut self, len: usize) {
        if len < self.len() {
            self.erase(len..);
        }
    }

    /// Resizes to `new_len`, appending clones of `value` or truncating.
    pub fn resize(&mut self, new_len: usize, value: T)
    where
        T: Clone,
    {
        let len = self.len();
        if new_len > len {
            self.insert_n(len, new_len - len, &value);
        } else {
            self.truncate(new_len);
        }
    }

    /// Drops every element. Keeps the buffer `begin` points into; all other
    /// buffers are released.
    pub fn clear(&mut self) {
        if self.map.is_null() {
            return;
        }
        let (begin, end) = (self.begin, self.end);
        self.end = begin;
        unsafe {
            let _spare = FreeSlots { first: begin.node.add(1), last: end.node.add(1) };
            drop_range(begin, end);
        }
    }
}

/// Rotates `[first, last)` so that `mid` becomes the first element.
unsafe fn rotate<T>(first: SegmentCursor<T>, mid: SegmentCursor<T>, last: SegmentCursor<T>) {
    unsafe {
        reverse(first, mid);
        reverse(mid, last);
        reverse(first, last);
    }
}

/// Drops `[first, last)` one buffer-slice at a time.
unsafe fn drop_range<T>(first: SegmentCursor<T>, last: SegmentCursor<T>) {
    if !mem::needs_drop::<T>() {
        return;
    }
    let mut cur = first;
    unsafe {
        while cur.node != last.node {
            Allocator::destroy_range(cur.cur, cur.last);
            cur.set_node(cur.node.add(1));
            cur.cur = cur.first;
        }
        Allocator::destroy_range(cur.cur, last.cur);
    }
}

// =============================================================================
// Access
// =============================================================================

impl<T> Deque<T> {
    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        unsafe { self.begin.distance_to(&self.end) as usize }
    }

    /// Returns `true` if the deque holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }

    /// Largest element count the deque can describe.
    #[inline]
    pub const fn max_size(&self) -> usize {
        Allocator::<T>::max_size()
    }

    /// Slots per buffer for this element type.
    #[inline]
    pub const fn buffer_size() -> usize {
        Self::BUF
    }

    /// Current number of map slots. Zero until the first allocation.
    #[inline]
    pub fn map_capacity(&self) -> usize {
        self.map_size
    }

    /// Map sizing rules in effect.
    #[inline]
    pub fn policy(&self) -> MapPolicy {
        self.policy
    }

    /// Returns the element at `index`, or `None` if out of bounds.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        if index < self.len() {
            Some(unsafe { &*self.begin.at(index as isize) })
        } else {
            None
        }
    }

    /// Mutable [`get`](Deque::get).
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index < self.len() {
            Some(unsafe { &mut *self.begin.at(index as isize) })
        } else {
            None
        }
    }

    /// Checked access reporting the index and length on failure.
    pub fn at(&self, index: usize) -> Result<&T, RangeError> {
        let len = self.len();
        self.get(index).ok_or(RangeError { index, len })
    }

    /// Mutable [`at`](Deque::at).
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, RangeError> {
        let len = self.len();
        self.get_mut(index).ok_or(RangeError { index, len })
    }

    /// First element.
    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.get(0)
    }

    /// Mutable first element.
    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.get_mut(0)
    }

    /// Last element.
    #[inline]
    pub fn back(&self) -> Option<&T> {
        self.len().checked_sub(1).and_then(|i| self.get(i))
    }

    /// Mutable last element.
    #[inline]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.len().checked_sub(1).and_then(move |i| self.get_mut(i))
    }

    /// Exchanges the contents of two deques in O(1).
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    /// Front-to-back iterator.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.begin, self.end, self.len())
    }

    /// Front-to-back iterator of mutable references.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(self.begin, self.end, self.len())
    }

    /// Contiguous runs of elements, one per buffer, front to back.
    pub fn segments(&self) -> Segments<'_, T> {
        Segments::new(self.begin, self.end)
    }

    /// Cursor to the first element.
    ///
    /// Raw cursors carry no lifetime; they are invalidated by any change to
    /// the deque's length.
    #[inline]
    pub fn begin(&self) -> SegmentCursor<T> {
        self.begin
    }

    /// Cursor one past the last element.
    #[inline]
    pub fn end(&self) -> SegmentCursor<T> {
        self.end
    }

    /// Reverse cursor to the last element.
    #[inline]
    pub fn rbegin(&self) -> Reverse<SegmentCursor<T>> {
        Reverse::new(self.end)
    }

    /// Reverse cursor one before the first element.
    #[inline]
    pub fn rend(&self) -> Reverse<SegmentCursor<T>> {
        Reverse::new(self.begin)
    }
}

impl<T> Index<usize> for Deque<T> {
    type Output = T;

    #[track_caller]
    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Some(v) => v,
            None => panic!("index out of bounds: the len is {} but the index is {index}", self.len()),
        }
    }
}

impl<T> IndexMut<usize> for Deque<T> {
    #[track_caller]
    fn index_mut(&mut self, index: usize) -> &mut T {
        let len = self.len();
        match self.get_mut(index) {
            Some(v) => v,
            None => panic!("index out of bounds: the len is {len} but the index is {index}"),
        }
    }
}

// =============================================================================
// Trait impls
// =============================================================================

impl<T> Drop for Deque<T> {
    fn drop(&mut self) {
        if self.map.is_null() {
            return;
        }
        let _map = FreeMap { map: self.map, size: self.map_size };
        unsafe { drop_range(self.begin, self.end) };
    }
}

impl<T> Default for Deque<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for Deque<T> {
    fn clone(&self) -> Self {
        unsafe { Self::try_from_cursors(self.policy, self.begin, self.end) }
            .unwrap_or_else(|e| e.handle())
    }

    /// Reuses the existing elements: assigns over the common prefix, then
    /// truncates or appends.
    fn clone_from(&mut self, source: &Self) {
        let len = self.len();
        let src_len = source.len();
        unsafe {
            if len >= src_len {
                copy(source.begin, source.end, self.begin);
                self.truncate(src_len);
            } else {
                let mid = source.begin.offset(len as isize);
                copy(source.begin, mid, self.begin);
                let mut cur = mid;
                while cur != source.end {
                    self.push_back((*cur.cur).clone());
                    cur.inc();
                }
            }
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Deque<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for Deque<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && unsafe { equal(self.begin, self.end, other.begin) }
    }
}

impl<T: Eq> Eq for Deque<T> {}

impl<T: PartialEq, const N: usize> PartialEq<[T; N]> for Deque<T> {
    fn eq(&self, other: &[T; N]) -> bool {
        self.len() == N && self.iter().eq(other.iter())
    }
}

impl<T: PartialEq> PartialEq<[T]> for Deque<T> {
    fn eq(&self, other: &[T]) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: PartialEq> PartialEq<Vec<T>> for Deque<T> {
    fn eq(&self, other: &Vec<T>) -> bool {
        *self == **other
    }
}

impl<T: PartialOrd> PartialOrd for Deque<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }

    fn lt(&self, other: &Self) -> bool {
        unsafe { lexicographical_compare(self.begin, self.end, other.begin, other.end) }
    }
}

impl<T: Ord> Ord for Deque<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<T: Hash> Hash for Deque<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len());
        for item in self {
            item.hash(state);
        }
    }
}

impl<T> Extend<T> for Deque<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push_back(item);
        }
    }
}

impl<'a, T: Copy + 'a> Extend<&'a T> for Deque<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        for item in iter {
            self.push_back(*item);
        }
    }
}

impl<T> FromIterator<T> for Deque<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut deque = Self::new();
        deque.extend(iter);
        deque
    }
}

impl<T, const N: usize> From<[T; N]> for Deque<T> {
    fn from(items: [T; N]) -> Self {
        let items = ManuallyDrop::new(items);
        unsafe { Self::from_raw_elements(items.as_ptr(), N) }
    }
}

impl<T> From<Vec<T>> for Deque<T> {
    fn from(mut items: Vec<T>) -> Self {
        let n = items.len();
        unsafe {
            items.set_len(0);
            Self::from_raw_elements(items.as_ptr(), n)
        }
    }
}

impl<T> IntoIterator for Deque<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter::new(self)
    }
}

impl<'a, T> IntoIterator for &'a Deque<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Deque<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> IterMut<'a, T> {
        self.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contents<T: Clone>(d: &Deque<T>) -> Vec<T> {
        d.iter().cloned().collect()
    }

    // =========================================================================
    // Map management
    // =========================================================================

    #[test]
    fn new_does_not_allocate() {
        let d: Deque<u64> = Deque::new();
        assert_eq!(d.map_capacity(), 0);
        assert!(d.is_empty());
        assert_eq!(d.iter().count(), 0);
    }

    #[test]
    fn first_push_allocates_default_map() {
        let mut d = Deque::new();
        d.push_back(1u64);
        assert_eq!(d.map_capacity(), DEFAULT_MAP_INIT_SIZE);
    }

    #[test]
    fn map_init_centers_buffers() {
        let buf = Deque::<u64>::buffer_size();
        let d = Deque::from_elem(0u64, 3 * buf);
        // 4 buffers in a map of 8: slots 2..=5
        assert_eq!(d.map_capacity(), 8);
        assert_eq!(diff(d.begin.node, d.map), 2);
        assert_eq!(diff(d.end.node, d.map), 5);
        assert_eq!(d.end.offset_in_buffer(), 0);
    }

    #[test]
    fn front_growth_recenters_before_growing() {
        let buf = Deque::<u64>::buffer_size();
        let mut d = Deque::new();
        d.push_back(0u64);
        // slot 3 of 8; three free slots before it
        for i in 0..3 * buf {
            d.push_front(i as u64);
        }
        assert_eq!(d.map_capacity(), 8);
        assert_eq!(diff(d.begin.node, d.map), 0);

        // one more buffer: 5 nodes in 8 slots is not enough to recenter
        d.push_front(0);
        assert_eq!(d.map_capacity(), 17);
        assert_eq!(d.len(), 3 * buf + 2);
    }

    #[test]
    fn recenter_moves_window() {
        let buf = Deque::<u8>::buffer_size();
        let mut d: Deque<u8> = DequeBuilder::default().map_init_size(32).build().unwrap();
        d.push_back(0);
        // fill towards the back, draining the front as we go
        for _ in 0..20 * buf {
            d.push_back(1);
            d.pop_front();
        }
        assert_eq!(d.len(), 1);
        assert_eq!(d.map_capacity(), 32);
        assert_eq!(d.front(), Some(&1));
    }

    #[test]
    fn shrink_to_fit_releases_map_slots() {
        let buf = Deque::<u32>::buffer_size();
        let mut d = Deque::new();
        for i in 0..40 * buf {
            d.push_back(i as u32);
        }
        let grown = d.map_capacity();
        d.truncate(10);
        d.shrink_to_fit();
        assert!(d.map_capacity() < grown);
        assert_eq!(contents(&d), (0..10).collect::<Vec<u32>>());
        d.push_front(7);
        assert_eq!(d.front(), Some(&7));
    }

    // =========================================================================
    // Insert / erase
    // =========================================================================

    #[test]
    fn insert_both_halves() {
        let mut d: Deque<i32> = (0..10).collect();
        d.insert(2, 100);
        d.insert(9, 200);
        assert_eq!(contents(&d), [0, 1, 100, 2, 3, 4, 5, 6, 7, 200, 8, 9]);
    }

    #[test]
    fn insert_n_front_and_back() {
        let mut d: Deque<i32> = (0..6).collect();
        d.insert_n(1, 3, &9);
        assert_eq!(contents(&d), [0, 9, 9, 9, 1, 2, 3, 4, 5]);
        d.insert_n(7, 2, &8);
        assert_eq!(contents(&d), [0, 9, 9, 9, 1, 2, 3, 8, 8, 4, 5]);
        d.insert_n(0, 0, &1);
        assert_eq!(d.len(), 11);
    }

    #[test]
    fn insert_n_spanning_buffers() {
        let buf = Deque::<u64>::buffer_size();
        let mut d: Deque<u64> = (0..10).collect();
        d.insert_n(3, 2 * buf + 5, &7);
        assert_eq!(d.len(), 2 * buf + 15);
        assert_eq!(d[2], 2);
        assert_eq!(d[3], 7);
        assert_eq!(d[2 * buf + 7], 7);
        assert_eq!(d[2 * buf + 8], 3);
        assert_eq!(d.back(), Some(&9));
    }

    #[test]
    fn insert_many_orders_items() {
        let mut d: Deque<i32> = (0..8).collect();
        d.insert_many(2, [10, 11, 12]);
        assert_eq!(contents(&d), [0, 1, 10, 11, 12, 2, 3, 4, 5, 6, 7]);
        d.insert_many(9, [20, 21]);
        assert_eq!(contents(&d), [0, 1, 10, 11, 12, 2, 3, 4, 5, 20, 21, 6, 7]);
        d.insert_many(0, [-1]);
        assert_eq!(d.front(), Some(&-1));
    }

    #[test]
    fn erase_middle_ranges() {
        let mut d: Deque<String> = (0..10).map(|i| i.to_string()).collect();
        d.erase(1..3);
        d.erase(5..=6);
        let expected: Vec<String> = [0, 3, 4, 5, 6, 9].iter().map(|i| i.to_string()).collect();
        assert_eq!(contents(&d), expected);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn erase_past_end_panics() {
        let mut d: Deque<u8> = (0..3).collect();
        d.erase(1..4);
    }

    #[test]
    fn remove_frees_emptied_buffer() {
        let buf = Deque::<u64>::buffer_size();
        let mut d: Deque<u64> = (0..buf as u64 + 1).collect();
        assert_ne!(d.begin.node, d.end.node);
        assert_eq!(d.remove(buf), Some(buf as u64));
        assert_eq!(d.len(), buf);
        assert_eq!(d.remove(buf), None);
    }

    #[test]
    fn clear_keeps_one_buffer() {
        let buf = Deque::<u64>::buffer_size();
        let mut d: Deque<u64> = (0..4 * buf as u64).collect();
        let node = d.begin.node;
        d.clear();
        assert!(d.is_empty());
        assert_eq!(d.begin.node, node);
        assert_eq!(d.end, d.begin);
        let live = unsafe { std::slice::from_raw_parts(d.map, d.map_size) };
        assert_eq!(live.iter().filter(|p| !p.is_null()).count(), 1);
    }

    #[test]
    fn resize_grows_and_truncates() {
        let mut d: Deque<u8> = Deque::new();
        d.resize(5, 3);
        assert_eq!(d, [3, 3, 3, 3, 3]);
        d.resize(2, 0);
        assert_eq!(d, [3, 3]);
    }

    // =========================================================================
    // Traits
    // =========================================================================

    #[test]
    fn clone_from_reuses_and_extends() {
        let mut a: Deque<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
        let b: Deque<String> = ["x"].iter().map(|s| s.to_string()).collect();
        a.clone_from(&b);
        assert_eq!(a, b);

        let c: Deque<String> = ["p", "q", "r", "s"].iter().map(|s| s.to_string()).collect();
        a.clone_from(&c);
        assert_eq!(a, c);
    }

    #[test]
    fn ordering_is_lexicographic() {
        let a: Deque<i32> = [1, 2, 3].into();
        let b: Deque<i32> = [1, 2, 4].into();
        let c: Deque<i32> = [1, 2].into();
        assert!(a < b);
        assert!(c < a);
        assert_eq!(a.cmp(&a.clone()), Ordering::Equal);
    }

    #[test]
    fn checked_access() {
        let d: Deque<i32> = [1, 2].into();
        assert_eq!(d.at(1), Ok(&2));
        assert_eq!(d.at(2), Err(RangeError { index: 2, len: 2 }));
        assert_eq!(d.get(5), None);
    }
}
