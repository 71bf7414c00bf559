//! Segmented-buffer deque and the container adapters built on it.
//!
//! - [`Deque`]: double-ended queue over a map of fixed-size buffers, with
//!   stable element addresses under growth at either end and random-access
//!   [`SegmentCursor`]s.
//! - [`Queue`], [`Stack`], [`PriorityQueue`]: adapters generic over the
//!   capabilities in [`sequence`].
//!
//! # Example
//!
//! ```
//! use strata_collections::{Deque, deque};
//!
//! let mut d = deque![1, 2, 3, 4, 5];
//! d.insert(2, 99);
//! assert_eq!(d, [1, 2, 99, 3, 4, 5]);
//!
//! d.erase(..);
//! d.push_back(7);
//! assert_eq!(d, [7]);
//! ```

#![warn(missing_docs)]

mod deque;
mod priority_queue;
mod queue;
pub mod sequence;
mod stack;

pub use deque::{
    ConfigError, DEFAULT_MAP_INIT_SIZE, DEFAULT_MAP_SLACK, Deque, DequeBuilder, IntoIter, Iter,
    IterMut, MapPolicy, SegmentCursor, Segments, buffer_size,
};
pub use priority_queue::PriorityQueue;
pub use queue::Queue;
pub use sequence::{BackSequence, FrontSequence, RandomAccessSequence};
pub use stack::Stack;

pub use strata_mem::{RangeError, TryReserveError};

/// Creates a [`Deque`] from a list of elements or from `value; n`.
///
/// ```
/// use strata_collections::deque;
///
/// let d = deque!['a', 'b'];
/// assert_eq!(d.len(), 2);
///
/// let z = deque![0u8; 5];
/// assert_eq!(z, [0; 5]);
/// ```
#[macro_export]
macro_rules! deque {
    () => {
        $crate::Deque::new()
    };
    ($value:expr; $n:expr) => {
        $crate::Deque::from_elem($value, $n)
    };
    ($($x:expr),+ $(,)?) => {
        $crate::Deque::from([$($x),+])
    };
}
