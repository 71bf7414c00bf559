use std::cell::Cell;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::rc::Rc;

use strata_algo::{is_heap, make_heap, sort_heap};
use strata_collections::{Deque, DequeBuilder, TryReserveError, deque};
use strata_cursor::{Cursor, RandomAccessCursor, distance};
use strata_mem::fault;

// =============================================================================
// Helpers
// =============================================================================

thread_local! {
    static CLONES_LEFT: Cell<usize> = const { Cell::new(usize::MAX) };
    static LIVE: Cell<isize> = const { Cell::new(0) };
}

/// Counts live instances; cloning panics once the thread's budget runs out.
#[derive(Debug, PartialEq)]
struct Bomb(u32);

impl Bomb {
    fn new(v: u32) -> Self {
        LIVE.with(|l| l.set(l.get() + 1));
        Bomb(v)
    }

    fn live() -> isize {
        LIVE.with(Cell::get)
    }

    fn arm(clones: usize) {
        CLONES_LEFT.with(|c| c.set(clones));
    }

    fn disarm() {
        CLONES_LEFT.with(|c| c.set(usize::MAX));
    }
}

impl Clone for Bomb {
    fn clone(&self) -> Self {
        CLONES_LEFT.with(|c| {
            let left = c.get();
            if left == 0 {
                panic!("clone budget exhausted");
            }
            c.set(left - 1);
        });
        Bomb::new(self.0)
    }
}

impl Drop for Bomb {
    fn drop(&mut self) {
        LIVE.with(|l| l.set(l.get() - 1));
    }
}

fn buf() -> usize {
    Deque::<u64>::buffer_size()
}

fn to_vec<T: Clone>(d: &Deque<T>) -> Vec<T> {
    d.iter().cloned().collect()
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn push_back_thousand() {
    let mut d = Deque::new();
    for i in 0..1000u64 {
        d.push_back(i);
    }
    assert_eq!(d.len(), 1000);
    assert_eq!(d[500], 500);
}

#[test]
fn insert_in_middle() {
    let mut d = deque![1, 2, 3, 4, 5];
    d.insert(2, 99);
    assert_eq!(d, [1, 2, 99, 3, 4, 5]);
}

#[test]
fn erase_everything_then_reuse() {
    let mut d = deque![1, 2, 3, 4, 5];
    d.erase(..);
    assert!(d.is_empty());
    d.push_back(7);
    assert_eq!(d, [7]);
}

#[test]
fn push_front_pop_back_interleaved() {
    let mut d = Deque::new();
    for i in 0..3 * buf() as u64 {
        d.push_front(i);
        assert_eq!(d.len(), 1);
        assert_eq!(d.pop_back(), Some(i));
        assert_eq!(d.len(), 0);
    }
}

#[test]
fn clone_is_independent() {
    let a = Deque::from_slice(&[1, 2, 3, 4, 5]);
    let mut b = a.clone();
    assert_eq!(a, b);
    b[0] = 10;
    b.push_back(6);
    assert_eq!(a, [1, 2, 3, 4, 5]);
    assert_eq!(b, [10, 2, 3, 4, 5, 6]);
}

// =============================================================================
// Properties
// =============================================================================

#[test]
fn from_elem_fills() {
    for n in [0, 1, buf() - 1, buf(), buf() + 1, 5 * buf()] {
        let d = Deque::from_elem(7u64, n);
        assert_eq!(d.len(), n);
        assert!(d.iter().all(|&v| v == 7));
    }
}

#[test]
fn insert_then_remove_restores() {
    let original: Vec<u64> = (0..3 * buf() as u64 + 17).collect();
    for index in [0, 1, buf() - 1, buf(), original.len() / 2, original.len() - 1, original.len()] {
        let mut d: Deque<u64> = original.iter().copied().collect();
        d.insert(index, u64::MAX);
        assert_eq!(d[index], u64::MAX);
        assert_eq!(d.remove(index), Some(u64::MAX));
        assert_eq!(to_vec(&d), original);
    }
}

#[test]
fn clear_is_idempotent() {
    let mut d: Deque<String> = Deque::new();
    d.clear();
    assert_eq!(d.map_capacity(), 0);

    d.extend(["a".to_string(), "b".to_string()]);
    d.clear();
    d.clear();
    assert!(d.is_empty());
    d.push_front("c".to_string());
    assert_eq!(d.front().map(String::as_str), Some("c"));
}

#[test]
fn map_reallocations_are_logarithmic() {
    let n = 1usize << 18;
    let mut d = Deque::new();
    let mut reallocations = 0;
    let mut capacity = 0;
    for i in 0..n as u64 {
        d.push_back(i);
        if d.map_capacity() != capacity {
            capacity = d.map_capacity();
            reallocations += 1;
        }
    }
    // n / buf = 512 buffers
    assert!(reallocations <= 12, "{reallocations} map reallocations");
    assert_eq!(d.len(), n);
}

#[test]
fn front_and_back_pushes_keep_order() {
    let b = buf() as i64;
    let mut d = Deque::new();
    for i in 0..b {
        d.push_front(-(i + 1));
        d.push_back(i);
    }
    assert!(d.iter().copied().eq(-b..b));
}

#[test]
fn take_leaves_usable_empty_deque() {
    let mut a: Deque<u64> = (0..2 * buf() as u64).collect();
    let b = std::mem::take(&mut a);
    assert_eq!(a.len(), 0);
    assert_eq!(a.map_capacity(), 0);
    assert!(b.iter().copied().eq(0..2 * buf() as u64));
    a.push_back(1);
    assert_eq!(a, [1]);
}

#[test]
fn every_element_dropped_once() {
    let token = Rc::new(());
    {
        let mut d = Deque::new();
        for _ in 0..3 * buf() {
            d.push_back(Rc::clone(&token));
            d.push_front(Rc::clone(&token));
        }
        d.erase(10..buf() + 10);
        d.insert_n(5, 100, &Rc::clone(&token));
        d.truncate(buf());
        d.pop_front();
        assert_eq!(Rc::strong_count(&token), d.len() + 1);
    }
    assert_eq!(Rc::strong_count(&token), 1);
}

#[test]
fn builder_capacity_avoids_map_growth() {
    let mut d: Deque<u64> = DequeBuilder::default().capacity(20 * buf()).build().unwrap();
    let slots = d.map_capacity();
    for i in 0..20 * buf() as u64 {
        if i % 2 == 0 {
            d.push_back(i);
        } else {
            d.push_front(i);
        }
    }
    assert_eq!(d.map_capacity(), slots);
}

// =============================================================================
// Cursors
// =============================================================================

#[test]
fn cursor_arithmetic_matches_indexing() {
    let d: Deque<u64> = (0..4 * buf() as u64).collect();
    let first = d.begin();
    let last = d.end();
    assert_eq!(unsafe { distance(&first, &last) }, d.len() as isize);
    for i in [0, 1, buf() - 1, buf(), 3 * buf() + 2] {
        let c = unsafe { first.offset(i as isize) };
        assert_eq!(unsafe { *c.as_ptr() }, i as u64);
        assert_eq!(unsafe { c.offset(-(i as isize)) }, first);
    }
}

#[test]
fn reverse_cursors_walk_backwards() {
    let d: Deque<u64> = (0..2 * buf() as u64 + 3).collect();
    let mut c = d.rbegin();
    let end = d.rend();
    let mut expected = d.len() as u64;
    while c != end {
        expected -= 1;
        assert_eq!(unsafe { *c.as_ptr() }, expected);
        unsafe { c.inc() };
    }
    assert_eq!(expected, 0);
}

#[test]
fn heap_sort_through_segment_cursors() {
    let mut d: Deque<u32> = (0..3 * buf() as u32).map(|i| i.wrapping_mul(2_654_435_761) % 1000).collect();
    unsafe {
        make_heap(d.begin(), d.end());
        assert!(is_heap(d.begin(), d.end()));
        sort_heap(d.begin(), d.end());
    }
    let v = to_vec(&d);
    assert!(v.windows(2).all(|w| w[0] <= w[1]));
}

// =============================================================================
// Rollback
// =============================================================================

#[test]
fn failed_from_elem_leaks_nothing() {
    let base = fault::live_allocations();
    // map + 5 buffers
    for budget in 0..6 {
        let result = {
            let _guard = fault::fail_after(budget);
            Deque::try_from_elem(1u64, 4 * buf())
        };
        assert!(matches!(result, Err(TryReserveError::AllocError(_))));
        assert_eq!(fault::live_allocations(), base);
    }
    let ok = {
        let _guard = fault::fail_after(6);
        Deque::try_from_elem(1u64, 4 * buf())
    };
    assert_eq!(ok.map(|d| d.len()), Ok(4 * buf()));
    assert_eq!(fault::live_allocations(), base);
}

#[test]
fn failed_push_back_leaves_deque_unchanged() {
    let n = 20 * buf() as u64;
    let mut d = Deque::new();
    let mut failures = 0;
    for i in 0..n {
        let mut budget = 0;
        loop {
            let live = fault::live_allocations();
            let result = {
                let _guard = fault::fail_after(budget);
                d.try_push_back(i)
            };
            match result {
                Ok(()) => break,
                Err(e) => {
                    failures += 1;
                    assert!(matches!(e, TryReserveError::AllocError(_)));
                    assert_eq!(d.len(), i as usize);
                    assert_eq!(d.back().copied(), i.checked_sub(1));
                    assert_eq!(fault::live_allocations(), live);
                    budget += 1;
                }
            }
        }
    }
    assert!(failures >= 20);
    assert!(d.iter().copied().eq(0..n));
}

#[test]
fn failed_insert_n_releases_buffers() {
    let mut d: Deque<u64> = (0..10).collect();
    let live = fault::live_allocations();
    for index in [2, 8] {
        let result = {
            let _guard = fault::fail_after(1);
            d.try_insert_n(index, 4 * buf(), &0)
        };
        assert!(result.is_err());
        assert!(d.iter().copied().eq(0..10));
        assert_eq!(fault::live_allocations(), live);
    }
}

#[test]
fn oversized_requests_overflow() {
    let mut d: Deque<u64> = Deque::new();
    assert_eq!(
        d.try_insert_n(0, usize::MAX, &0),
        Err(TryReserveError::CapacityOverflow)
    );
    assert!(matches!(
        Deque::try_from_elem(0u64, usize::MAX),
        Err(TryReserveError::CapacityOverflow)
    ));
}

// =============================================================================
// Panic safety
// =============================================================================

#[test]
fn panicking_clone_in_from_slice() {
    let src: Vec<Bomb> = (0..3 * buf() as u32).map(Bomb::new).collect();
    let live = Bomb::live();
    let allocations = fault::live_allocations();

    Bomb::arm(buf() + 5);
    let result = catch_unwind(AssertUnwindSafe(|| Deque::from_slice(&src)));
    Bomb::disarm();

    assert!(result.is_err());
    assert_eq!(Bomb::live(), live);
    assert_eq!(fault::live_allocations(), allocations);
}

#[test]
fn panicking_emplace_front_leaves_deque_unchanged() {
    let mut d = Deque::new();
    d.push_back(1u64);
    let allocations = fault::live_allocations();

    // begin sits at the start of its buffer: slow path
    let result = catch_unwind(AssertUnwindSafe(|| {
        d.emplace_front(|| panic!("boom"));
    }));
    assert!(result.is_err());
    assert_eq!(d, [1]);
    assert_eq!(fault::live_allocations(), allocations);

    // fast path
    d.push_front(0);
    let result = catch_unwind(AssertUnwindSafe(|| {
        d.emplace_front(|| panic!("boom"));
    }));
    assert!(result.is_err());
    assert_eq!(d, [0, 1]);
}

#[test]
fn panicking_clone_in_insert_n() {
    let mut d: Deque<Bomb> = (0..10).map(Bomb::new).collect();
    let value = Bomb::new(99);
    let live = Bomb::live();
    let allocations = fault::live_allocations();

    for index in [1, 9] {
        Bomb::arm(2 * buf());
        let result = catch_unwind(AssertUnwindSafe(|| d.insert_n(index, 3 * buf(), &value)));
        Bomb::disarm();

        assert!(result.is_err());
        assert_eq!(Bomb::live(), live);
        assert_eq!(fault::live_allocations(), allocations);
        assert!(d.iter().map(|b| b.0).eq(0..10));
    }
}

#[test]
fn panicking_clone_in_clone() {
    let d: Deque<Bomb> = (0..2 * buf() as u32).map(Bomb::new).collect();
    let live = Bomb::live();

    Bomb::arm(buf());
    let result = catch_unwind(AssertUnwindSafe(|| d.clone()));
    Bomb::disarm();

    assert!(result.is_err());
    assert_eq!(Bomb::live(), live);
    assert_eq!(d.len(), 2 * buf());
}
