use std::{borrow::Borrow, iter::Chain, mem, ops::Range};

use log::{debug, trace};

use crate::{
    config::{self, MapConfig},
    error::{MapError, Result},
    hash::KeyHash,
    slot::Slot,
};

/// Outcome of slot resolution for a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Probe {
    /// The key is absent, the index is the first `Empty` slot on its probe chain
    Vacant(usize),
    /// The key is live at the index
    Found(usize),
}

/// A hash map using open addressing with linear probing.
///
/// Deleted entries leave a tombstone behind. Tombstones are only reclaimed when the table
/// grows: every growth rebuilds the table from the live entries alone.
///
/// Growth happens on `set`, before the key is placed, whenever
/// `(len + tombstones + 1) / capacity` would exceed the maximum load ratio.
///
/// Note: This implementation is not thread-safe. Wrap it in a lock to share it.
#[derive(Debug, Clone)]
pub struct OpenAddressingMap<K, V> {
    /// The table, its length is the capacity
    slots: Box<[Slot<K, V>]>,
    /// Number of `Occupied` slots
    live: usize,
    /// Number of `Tombstone` slots
    tombstones: usize,
    /// Load ratio above which an insert grows the table first
    max_load_ratio: f64,
    /// Capacity multiplier applied on growth
    growth_factor: usize,
}

/// Allocates a table of `capacity` empty slots
fn empty_table<K, V>(capacity: usize) -> Box<[Slot<K, V>]> {
    (0..capacity).map(|_| Slot::Empty).collect()
}

/// Called when a probe walked the whole table without meeting an `Empty` slot or the key.
///
/// The load ratio check keeps at least one `Empty` slot in every table, so reaching this
/// means the occupancy counters no longer describe the table.
#[cold]
#[allow(clippy::panic)]
fn probe_exhausted(capacity: usize, live: usize, tombstones: usize) -> ! {
    panic!(
        "probe wrapped around a table with no empty slot \
         (capacity {capacity}, live {live}, tombstones {tombstones})"
    )
}

impl<K, V> Default for OpenAddressingMap<K, V>
where
    K: KeyHash + Eq,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Extend<(K, V)> for OpenAddressingMap<K, V>
where
    K: KeyHash + Eq,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.set(k, v);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for OpenAddressingMap<K, V>
where
    K: KeyHash + Eq,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K, V> OpenAddressingMap<K, V>
where
    K: KeyHash + Eq,
{
    /// Creates an empty map with 8 slots, a maximum load ratio of 0.5 and a growth factor of 3
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(MapConfig::default())
    }

    /// Creates an empty map with the given number of slots (at least 1)
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_config(MapConfig::default().with_capacity(capacity))
    }

    /// Creates an empty map from a full configuration
    #[must_use]
    pub fn with_config(config: MapConfig) -> Self {
        Self {
            slots: empty_table(config::clamp_capacity(config.initial_capacity)),
            live: 0,
            tombstones: 0,
            max_load_ratio: config::clamp_load_ratio(config.max_load_ratio),
            growth_factor: config::clamp_growth_factor(config.growth_factor),
        }
    }

    /// Computes the first probe position for a key
    #[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]
    fn start_index<Q: KeyHash + ?Sized>(&self, key: &Q) -> usize {
        // capacity is never zero
        key.key_hash() as usize % self.slots.len()
    }

    /// Probe positions for a key: from its start slot to the end, then wrapping to the start
    fn probe_sequence<Q: KeyHash + ?Sized>(&self, key: &Q) -> Chain<Range<usize>, Range<usize>> {
        let start = self.start_index(key);
        (start..self.slots.len()).chain(0..start)
    }

    /// Resolves the slot for a key, returning it with the number of slots inspected.
    ///
    /// Walks the probe sequence over tombstones and foreign keys until it meets either an
    /// `Empty` slot or the live key. The same answer serves as lookup position and
    /// insertion point, so a new key is never placed ahead of where its lookup looks.
    fn scan<Q>(&self, key: &Q) -> (Probe, usize)
    where
        K: Borrow<Q>,
        Q: KeyHash + Eq + ?Sized,
    {
        for (probes, index) in (1_usize..).zip(self.probe_sequence(key)) {
            match self.slots.get(index) {
                Some(Slot::Empty) => return (Probe::Vacant(index), probes),
                Some(Slot::Occupied(k, _)) if k.borrow() == key => {
                    return (Probe::Found(index), probes);
                }
                _ => {}
            }
        }

        probe_exhausted(self.slots.len(), self.live, self.tombstones)
    }

    /// Resolves the slot for a key
    fn find_slot<Q>(&self, key: &Q) -> Probe
    where
        K: Borrow<Q>,
        Q: KeyHash + Eq + ?Sized,
    {
        self.scan(key).0
    }

    /// Returns true if `occupied` slots out of `capacity` exceed the maximum load ratio
    #[allow(clippy::cast_precision_loss, clippy::arithmetic_side_effects)]
    fn exceeds_load_ratio(&self, occupied: usize, capacity: usize) -> bool {
        occupied as f64 / capacity as f64 > self.max_load_ratio
    }

    /// Inserts a key-value pair, returning the previous value if the key was present.
    ///
    /// Grows the table first when one more occupied slot would push the load ratio over
    /// its maximum. Never fails.
    ///
    /// # Panics
    ///
    /// Panics if the occupancy counters were corrupted and no `Empty` slot is left.
    pub fn set(&mut self, key: K, value: V) -> Option<V> {
        let occupied = self.live.saturating_add(self.tombstones).saturating_add(1);
        if self.exceeds_load_ratio(occupied, self.slots.len()) {
            self.grow();
        }

        self.place(key, value)
    }

    /// Writes a pair at the slot resolved for its key, without any load ratio check
    fn place(&mut self, key: K, value: V) -> Option<V> {
        match self.find_slot(&key) {
            Probe::Vacant(index) => {
                if let Some(slot) = self.slots.get_mut(index) {
                    *slot = Slot::Occupied(key, value);
                    self.live = self.live.saturating_add(1);
                }
                None
            }
            Probe::Found(index) => match self.slots.get_mut(index) {
                Some(Slot::Occupied(_, old)) => Some(mem::replace(old, value)),
                _ => None,
            },
        }
    }

    /// Retrieves the value stored for a key.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::KeyNotFound`] if the key is not in the map.
    pub fn get<Q>(&self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: KeyHash + Eq + ?Sized,
    {
        match self.find_slot(key) {
            Probe::Found(index) => match self.slots.get(index) {
                Some(Slot::Occupied(_, value)) => Ok(value),
                _ => Err(MapError::KeyNotFound),
            },
            Probe::Vacant(_) => Err(MapError::KeyNotFound),
        }
    }

    /// Retrieves a mutable reference to the value stored for a key.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::KeyNotFound`] if the key is not in the map.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Result<&mut V>
    where
        K: Borrow<Q>,
        Q: KeyHash + Eq + ?Sized,
    {
        match self.find_slot(key) {
            Probe::Found(index) => match self.slots.get_mut(index) {
                Some(Slot::Occupied(_, value)) => Ok(value),
                _ => Err(MapError::KeyNotFound),
            },
            Probe::Vacant(_) => Err(MapError::KeyNotFound),
        }
    }

    /// Returns true if the map holds a live entry for the key
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: KeyHash + Eq + ?Sized,
    {
        matches!(self.find_slot(key), Probe::Found(_))
    }

    /// Deletes the entry for a key, leaving a tombstone in its slot, and returns its value.
    ///
    /// The capacity never changes.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::KeyNotFound`] if the key is not in the map.
    pub fn delete<Q>(&mut self, key: &Q) -> Result<V>
    where
        K: Borrow<Q>,
        Q: KeyHash + Eq + ?Sized,
    {
        let Probe::Found(index) = self.find_slot(key) else {
            return Err(MapError::KeyNotFound);
        };
        let slot = self.slots.get_mut(index).ok_or(MapError::KeyNotFound)?;

        match mem::replace(slot, Slot::Tombstone) {
            Slot::Occupied(_, value) => {
                self.live = self.live.saturating_sub(1);
                self.tombstones = self.tombstones.saturating_add(1);
                trace!("tombstoned slot {index}, {} tombstones", self.tombstones);
                Ok(value)
            }
            other => {
                *slot = other;
                Err(MapError::KeyNotFound)
            }
        }
    }

    /// Number of slots slot resolution inspects for a key, whether or not it is present
    pub fn probe_length<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: KeyHash + Eq + ?Sized,
    {
        self.scan(key).1
    }

    /// Grows the table by the growth factor, repeating the multiplication until the
    /// pending insert fits under the maximum load ratio
    fn grow(&mut self) {
        let needed = self.live.saturating_add(1);
        let mut capacity = self.slots.len().saturating_mul(self.growth_factor);
        while capacity < usize::MAX && self.exceeds_load_ratio(needed, capacity) {
            capacity = capacity.saturating_mul(self.growth_factor);
        }

        self.rehash(capacity);
    }

    /// Rebuilds the table at `new_capacity` from the live entries, dropping all tombstones
    fn rehash(&mut self, new_capacity: usize) {
        let old_capacity = self.slots.len();
        let old_slots = mem::replace(&mut self.slots, empty_table(new_capacity));
        let purged = self.tombstones;

        // rebuilt by `place` below
        self.live = 0;
        self.tombstones = 0;

        for (key, value) in old_slots.into_vec().into_iter().filter_map(Slot::into_entry) {
            self.place(key, value);
        }

        debug!(
            "rehashed {old_capacity} -> {new_capacity} slots: {} live entries, {purged} tombstones purged",
            self.live
        );
    }

    /// Sets the maximum load ratio, clamped to `[0.05, 0.95]`
    pub fn set_max_load_ratio(&mut self, ratio: f64) {
        self.max_load_ratio = config::clamp_load_ratio(ratio);
    }

    /// Sets the growth factor (at least 2)
    pub fn set_growth_factor(&mut self, factor: usize) {
        self.growth_factor = config::clamp_growth_factor(factor);
    }
}

impl<K, V> OpenAddressingMap<K, V> {
    /// Returns the number of live entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.live
    }

    /// Returns true if the map holds no live entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Returns the number of slots in the table
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the number of tombstones left by deletions since the last rehash
    #[must_use]
    pub fn tombstones(&self) -> usize {
        self.tombstones
    }

    /// Returns `(live + tombstones) / capacity`
    #[must_use]
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    pub fn load_ratio(&self) -> f64 {
        self.live.saturating_add(self.tombstones) as f64 / self.slots.len() as f64
    }

    /// Returns the maximum load ratio
    #[must_use]
    pub fn max_load_ratio(&self) -> f64 {
        self.max_load_ratio
    }

    /// Returns the growth factor
    #[must_use]
    pub fn growth_factor(&self) -> usize {
        self.growth_factor
    }

    /// Empties every slot, keeping the capacity
    pub fn clear(&mut self) {
        self.slots.fill_with(|| Slot::Empty);
        self.live = 0;
        self.tombstones = 0;
    }

    /// Returns an iterator over the live key-value pairs, in table order
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter { slots: self.slots.iter(), remaining: self.live }
    }
}

/// Iterator over the live entries of an `OpenAddressingMap`
#[derive(Debug, Clone)]
pub struct Iter<'a, K, V> {
    /// Slots not visited yet
    slots: std::slice::Iter<'a, Slot<K, V>>,
    /// Live entries not yielded yet
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.slots.find_map(Slot::entry)?;
        self.remaining = self.remaining.saturating_sub(1);
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<'a, K, V> IntoIterator for &'a OpenAddressingMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
