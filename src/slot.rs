/// A single position of the table.
///
/// `Tombstone` must stay distinct from `Empty`: a probe chain stops at `Empty`, but walks
/// over a `Tombstone` so keys placed past a deleted entry stay reachable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) enum Slot<K, V> {
    /// Never held an entry since the last rehash
    #[default]
    Empty,
    /// Holds a live key-value pair
    Occupied(K, V),
    /// Held an entry that has since been deleted
    Tombstone,
}

impl<K, V> Slot<K, V> {
    /// Returns the key-value pair of an occupied slot
    pub(crate) const fn entry(&self) -> Option<(&K, &V)> {
        match self {
            Self::Occupied(key, value) => Some((key, value)),
            Self::Empty | Self::Tombstone => None,
        }
    }

    /// Consumes the slot, yielding the pair of an occupied slot
    pub(crate) fn into_entry(self) -> Option<(K, V)> {
        match self {
            Self::Occupied(key, value) => Some((key, value)),
            Self::Empty | Self::Tombstone => None,
        }
    }
}
