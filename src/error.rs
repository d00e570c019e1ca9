//! Error type returned by fallible map operations

use thiserror::Error;

/// Errors returned by `OpenAddressingMap`
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapError {
    /// The probe for the key reached an empty slot before finding it
    #[error("key not found")]
    KeyNotFound,
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, MapError>;
