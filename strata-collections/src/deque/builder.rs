//! Deque construction knobs.

use strata_mem::TryReserveError;
use thiserror::Error;

use super::Deque;

/// Smallest map a deque allocates, in buffer pointers.
pub const DEFAULT_MAP_INIT_SIZE: usize = 8;

/// Extra map slots added on top of the requirement when the map grows.
pub const DEFAULT_MAP_SLACK: usize = 8;

/// Sizing rules for the map of buffer pointers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MapPolicy {
    /// Minimum number of slots of a freshly allocated map.
    pub init_size: usize,
    /// Slots added beyond the requirement on growth, when that exceeds
    /// doubling.
    pub slack: usize,
}

impl MapPolicy {
    /// `init_size = 8`, `slack = 8`.
    pub const DEFAULT: MapPolicy = MapPolicy {
        init_size: DEFAULT_MAP_INIT_SIZE,
        slack: DEFAULT_MAP_SLACK,
    };
}

impl Default for MapPolicy {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Error during deque construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// `map_init_size` was zero.
    #[error("map initial size must be non-zero")]
    ZeroMapSize,
    /// The map could not be pre-sized.
    #[error(transparent)]
    Reserve(#[from] TryReserveError),
}

/// Builder for a [`Deque`] with a custom [`MapPolicy`] or pre-sized map.
///
/// ```
/// use strata_collections::{Deque, DequeBuilder};
///
/// let mut d: Deque<u32> = DequeBuilder::default()
///     .map_init_size(16)
///     .capacity(10_000)
///     .build()
///     .unwrap();
/// let slots = d.map_capacity();
/// for i in 0..10_000 {
///     d.push_back(i);
/// }
/// assert_eq!(d.map_capacity(), slots);
/// ```
#[derive(Clone, Debug)]
pub struct DequeBuilder {
    map_init_size: usize,
    map_slack: usize,
    capacity: Option<usize>,
}

impl Default for DequeBuilder {
    fn default() -> Self {
        Self {
            map_init_size: DEFAULT_MAP_INIT_SIZE,
            map_slack: DEFAULT_MAP_SLACK,
            capacity: None,
        }
    }
}

impl DequeBuilder {
    /// Minimum slot count of the first map. Default: 8.
    pub fn map_init_size(mut self, slots: usize) -> Self {
        self.map_init_size = slots;
        self
    }

    /// Growth slack of the map. Default: 8.
    pub fn map_slack(mut self, slots: usize) -> Self {
        self.map_slack = slots;
        self
    }

    /// Allocates the map up front so that `elements` can be pushed at either
    /// end without the map being reallocated. Buffers are still allocated on
    /// demand. Default: no map until first use.
    pub fn capacity(mut self, elements: usize) -> Self {
        self.capacity = Some(elements);
        self
    }

    /// Builds the deque.
    pub fn build<T>(self) -> Result<Deque<T>, ConfigError> {
        if self.map_init_size == 0 {
            return Err(ConfigError::ZeroMapSize);
        }

        let mut deque = Deque::with_policy(MapPolicy {
            init_size: self.map_init_size,
            slack: self.map_slack,
        });
        if let Some(elements) = self.capacity {
            deque.reserve_map(elements)?;
        }
        Ok(deque)
    }
}
