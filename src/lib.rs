#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(test)]
extern crate std;

pub mod capacity;

mod error;

/// Hasher builders, including the default one used by [`HashSet`].
pub mod hasher;

/// The raw chaining table underneath [`HashSet`], driven by caller-supplied
/// hashes and equality predicates.
pub mod hash_table;

/// A hash set built on separate chaining over a prime number of buckets.
///
/// This module provides a `HashSet` that wraps the `HashTable` and provides
/// a standard set interface with configurable hashers.
pub mod hash_set;

pub use capacity::LoadFactor;
pub use error::Error;
pub use error::Result;
pub use hash_set::HashSet;
pub use hash_table::HashTable;
pub use hasher::DefaultHashBuilder;
