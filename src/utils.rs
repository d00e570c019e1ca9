//! Utility traits for `OpenAddressingMap`

use std::borrow::Borrow;

use crate::{KeyHash, OpenAddressingMap};

/// Extension trait for map implementations that provides additional utility methods
pub trait MapExtensions<K, V> {
    /// Returns the keys of the map as a Vec
    fn keys(&self) -> Vec<K>;

    /// Returns the values of the map as a Vec
    fn values(&self) -> Vec<V>;

    /// Returns the value for a key, treating a missing key as `None` instead of an error
    fn lookup<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: KeyHash + Eq + ?Sized;
}

impl<K, V> MapExtensions<K, V> for OpenAddressingMap<K, V>
where
    K: KeyHash + Eq + Clone,
    V: Clone,
{
    fn keys(&self) -> Vec<K> {
        self.iter().map(|(k, _)| k.clone()).collect()
    }

    fn values(&self) -> Vec<V> {
        self.iter().map(|(_, v)| v.clone()).collect()
    }

    fn lookup<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: KeyHash + Eq + ?Sized,
    {
        self.get(key).ok()
    }
}
