//! Error types for map operations

use thiserror::Error;

/// Errors raised by map internals.
///
/// Absent keys are never errors; lookups return `None` and removals of missing keys
/// do nothing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MapError {
    /// Every slot of the probe sequence was visited without finding the key or room
    /// for it. The load factor policy makes this unreachable for a consistent table.
    #[error("probe sequence exhausted after {capacity} attempts while placing key {key:?}")]
    ProbeExhausted {
        /// The key that could not be placed
        key: String,
        /// The table capacity, which is also the number of probes made
        capacity: usize,
    },
}
