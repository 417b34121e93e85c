//! # Common Types and Traits
use core::{
    fmt::{Debug, Display},
    hash::Hash,
};

use num_traits::{FromPrimitive, PrimInt, ToPrimitive, Unsigned};

use crate::errors::{WTResult, WordtableError};

/// A type that can be used as a vocabulary id.
///
/// These are constrained to be unsigned primitive integers;
/// such that the max id in a vocabulary is less than `T::max()`.
pub trait TokenType:
    'static
    + PrimInt
    + FromPrimitive
    + ToPrimitive
    + Unsigned
    + Hash
    + Default
    + Debug
    + Display
    + Send
    + Sync
{
}

impl<T> TokenType for T where
    T: 'static
        + PrimInt
        + FromPrimitive
        + ToPrimitive
        + Unsigned
        + Hash
        + Default
        + Debug
        + Display
        + Send
        + Sync
{
}

/// A dense embedding vector.
pub type Vector = Vec<f32>;

/// Convert a `usize` index into a token id, failing if it does not fit `T`.
pub fn try_token_id<T: TokenType>(idx: usize) -> WTResult<T> {
    T::from_usize(idx).ok_or(WordtableError::TokenOutOfRange { id: idx as u64 })
}

/// Convert a token id into a row index.
pub fn token_index<T: TokenType>(token: T) -> WTResult<usize> {
    token.to_usize().ok_or(WordtableError::TokenOutOfRange {
        id: token.to_u64().unwrap_or(u64::MAX),
    })
}

cfg_if::cfg_if! {
    if #[cfg(feature = "ahash")] {
        /// Type Alias for hash maps in this crate.
        pub type WTHashMap<K, V> = ahash::AHashMap<K, V>;

        /// Create a new hash map with the given capacity.
        pub fn hash_map_with_capacity<K, V>(capacity: usize) -> WTHashMap<K, V> {
            WTHashMap::with_capacity(capacity)
        }

        /// Type Alias for hash sets in this crate.
        pub type WTHashSet<V> = ahash::AHashSet<V>;

    } else if #[cfg(feature = "foldhash")] {
        /// Type Alias for hash maps in this crate.
        pub type WTHashMap<K, V> = foldhash::HashMap<K, V>;

        /// Create a new hash map with the given capacity.
        pub fn hash_map_with_capacity<K, V>(capacity: usize) -> WTHashMap<K, V> {
            foldhash::HashMapExt::with_capacity(capacity)
        }

        /// Type Alias for hash sets in this crate.
        pub type WTHashSet<V> = foldhash::HashSet<V>;

    } else {
        /// Type Alias for hash maps in this crate.
        pub type WTHashMap<K, V> = std::collections::HashMap<K, V>;

        /// Create a new hash map with the given capacity.
        pub fn hash_map_with_capacity<K, V>(capacity: usize) -> WTHashMap<K, V> {
            WTHashMap::with_capacity(capacity)
        }

        /// Type Alias for hash sets in this crate.
        pub type WTHashSet<V> = std::collections::HashSet<V>;
    }
}
