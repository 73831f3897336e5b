//! chained-hashmap: a fixed-size hash map that resolves collisions by
//! separate chaining, with every chain node held in a slot arena.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a small, literal chained hash table whose behavior (bucket
//!   assignment, chain order, update-in-place) is fully determined by the
//!   key's characters and the table size.
//! - Layers:
//!   - `string_hash`: polynomial rolling hash `acc = (acc * 31 + c) mod n`,
//!     reduced after every character, plus the non-zero `TableSize`.
//!   - `chain::ChainArena<K, V>`: owns every node in a `SlotMap`; a chain
//!     is a head link plus per-node successor links. Supports push-front,
//!     find, and unlink-with-free.
//!   - `HashedMap<K, V>`: public API. Owns a boxed slice of bucket heads
//!     whose length never changes, and the arena.
//!
//! Constraints
//! - Table size is fixed at construction (default 101) and never zero.
//!   There is no rehashing; long chains are the expected cost of
//!   overfilling a table.
//! - Keys are unique across the map. Re-inserting a key overwrites the
//!   value and keeps the node where it is; new keys go to the chain head.
//! - Lookups never fail: an absent key is `None` / `false`.
//! - Callers never see node handles; only `&K`/`&V`/owned values leave
//!   the map.
//!
//! Ownership
//! - The arena is the sole owner of nodes. Bucket heads and successor
//!   links are generational keys into it, so an unlinked node is freed
//!   immediately and a stale link can never alias a new node.
//! - The arena length is the entry count; structural tests check that
//!   it always equals the number of nodes reachable from the buckets.
//!
//! Threading
//! - No interior mutability. `HashedMap` is `Send`/`Sync` whenever `K`
//!   and `V` are; sharing across threads needs an outer lock such as
//!   `Mutex<HashedMap<K, V>>`.
//!
//! Notes and non-goals
//! - No resizing, no persistence, no concurrent access of its own.
//! - Hashing reads Unicode scalar values; for ASCII keys this is the byte
//!   value.

mod chain;
mod error;
pub mod hashed_map;
mod hashed_map_proptest;
pub mod string_hash;

// Public surface
pub use error::TableSizeError;
pub use hashed_map::HashedMap;
pub use string_hash::{bucket_index, TableSize};
