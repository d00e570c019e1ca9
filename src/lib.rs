//! # Open Addressing Map
//!
//! A Rust implementation of a hash map using open addressing with linear probing.
//!
//! - Every operation resolves its key to a slot by scanning the table linearly from
//!   `hash(key) % capacity`, stopping at the first empty slot or at the key itself.
//! - Deletion leaves a tombstone so keys probed past the deleted entry stay reachable.
//! - Inserting grows the table (by a factor of 3 by default) once the share of live and
//!   tombstoned slots would exceed the maximum load ratio (0.5 by default). Growth rebuilds
//!   the table from the live entries, which also drops every tombstone.
//!
//! Keys are hashed with djb2 through the [`KeyHash`] trait, implemented for string types,
//! `char` and the primitive integers.
//!
//! ## Basic Usage
//!
//! ```rust
//! use openmap::{MapError, OpenAddressingMap};
//!
//! // Create a new map with 8 slots
//! let mut map = OpenAddressingMap::new();
//!
//! // Insert values
//! map.set("Hobbit".to_string(), "Bilbo");
//! map.set("Wizard".to_string(), "Gandalf");
//!
//! // Update values
//! map.set("Hobbit".to_string(), "Frodo");
//! assert_eq!(map.get("Hobbit"), Ok(&"Frodo"));
//! assert_eq!(map.len(), 2);
//!
//! // Delete values
//! assert_eq!(map.delete("Wizard"), Ok("Gandalf"));
//! assert_eq!(map.get("Wizard"), Err(MapError::KeyNotFound));
//! ```
//!
//! ## Tuning
//!
//! ```rust
//! use openmap::{MapConfig, OpenAddressingMap};
//!
//! let config = MapConfig::default().with_max_load_ratio(0.75).with_growth_factor(2);
//! let mut map = OpenAddressingMap::with_config(config);
//!
//! for i in 0..7_u32 {
//!     map.set(i, i * 10);
//! }
//! // 7 / 8 is above 0.75, the seventh insert doubled the table first
//! assert_eq!(map.capacity(), 16);
//! ```

/// Tunables and their defaults
mod config;
/// Error type of fallible map operations
mod error;
/// djb2 hashing and the key capability trait
mod hash;
/// The map itself
mod open_map;
/// Table slot states
mod slot;
/// Utility traits for the map
mod utils;

pub use config::{DEFAULT_CAPACITY, DEFAULT_GROWTH_FACTOR, DEFAULT_MAX_LOAD_RATIO, MapConfig};
pub use error::{MapError, Result};
pub use hash::{KeyHash, djb2, djb2_bytes};
pub use open_map::{Iter, OpenAddressingMap};
pub use utils::MapExtensions;
