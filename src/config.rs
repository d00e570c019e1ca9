//! Tunables of `OpenAddressingMap`

/// Capacity of a map created with `OpenAddressingMap::new`
pub const DEFAULT_CAPACITY: usize = 8;
/// Largest `(live + tombstones + 1) / capacity` ratio an insert may reach without growing
pub const DEFAULT_MAX_LOAD_RATIO: f64 = 0.5;
/// Factor the capacity is multiplied by when the table grows
pub const DEFAULT_GROWTH_FACTOR: usize = 3;

/// Lower bound accepted for the maximum load ratio
const MIN_LOAD_RATIO: f64 = 0.05;
/// Upper bound accepted for the maximum load ratio, keeps at least one `Empty` slot around
const MAX_LOAD_RATIO: f64 = 0.95;
/// Smallest growth factor that still grows the table
const MIN_GROWTH_FACTOR: usize = 2;

/// Per-instance configuration of an `OpenAddressingMap`.
///
/// Values outside their valid range are clamped rather than rejected.
///
/// ```rust
/// use openmap::{MapConfig, OpenAddressingMap};
///
/// let config = MapConfig::default().with_capacity(4).with_max_load_ratio(0.7).with_growth_factor(2);
/// let map: OpenAddressingMap<String, u32> = OpenAddressingMap::with_config(config);
/// assert_eq!(map.capacity(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapConfig {
    /// Number of slots allocated up front
    pub(crate) initial_capacity: usize,
    /// Load ratio above which an insert grows the table first
    pub(crate) max_load_ratio: f64,
    /// Capacity multiplier applied on growth
    pub(crate) growth_factor: usize,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_CAPACITY,
            max_load_ratio: DEFAULT_MAX_LOAD_RATIO,
            growth_factor: DEFAULT_GROWTH_FACTOR,
        }
    }
}

impl MapConfig {
    /// Sets the initial capacity (at least 1)
    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = clamp_capacity(capacity);
        self
    }

    /// Sets the maximum load ratio, clamped to `[0.05, 0.95]`
    #[must_use]
    pub fn with_max_load_ratio(mut self, ratio: f64) -> Self {
        self.max_load_ratio = clamp_load_ratio(ratio);
        self
    }

    /// Sets the growth factor (at least 2)
    #[must_use]
    pub fn with_growth_factor(mut self, factor: usize) -> Self {
        self.growth_factor = clamp_growth_factor(factor);
        self
    }

    /// Returns the initial capacity
    #[must_use]
    pub const fn initial_capacity(&self) -> usize {
        self.initial_capacity
    }

    /// Returns the maximum load ratio
    #[must_use]
    pub const fn max_load_ratio(&self) -> f64 {
        self.max_load_ratio
    }

    /// Returns the growth factor
    #[must_use]
    pub const fn growth_factor(&self) -> usize {
        self.growth_factor
    }
}

/// Raises a zero capacity to 1
pub(crate) fn clamp_capacity(capacity: usize) -> usize {
    capacity.max(1)
}

/// Keeps the load ratio within the supported range, NaN falls back to the default
pub(crate) fn clamp_load_ratio(ratio: f64) -> f64 {
    if ratio.is_nan() { DEFAULT_MAX_LOAD_RATIO } else { ratio.clamp(MIN_LOAD_RATIO, MAX_LOAD_RATIO) }
}

/// Keeps the growth factor at 2 or above
pub(crate) fn clamp_growth_factor(factor: usize) -> usize {
    factor.max(MIN_GROWTH_FACTOR)
}
