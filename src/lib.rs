//! chained-hashtable: a single-threaded, separate-chaining hash table
//! keyed by byte strings, with MurmurHash3 bucketing and growth along a
//! fixed prime capacity ladder.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a small table whose bucket layout, growth trigger and key
//!   matching rules are explicit and inspectable.
//! - Layers:
//!   - `murmur`: MurmurHash3 x86_32, bit-exact with the reference; the
//!     table always hashes with seed 0.
//!   - `primes`: the capacity ladder (53, 97, 193, ...). A table's
//!     capacity is always `PRIMES[rank]`.
//!   - `ChainTable<K, V>`: bucket array of chain heads over a `SlotMap`
//!     entry arena. Insert prepends, search returns the newest match,
//!     delete unlinks the first match.
//!   - `api`: the create/insert/delete/search/destroy surface over optional
//!     handles, reporting missing handles as `NullReference`.
//!
//! Constraints
//! - Single-threaded: every mutation takes `&mut self`; no interior
//!   locking.
//! - Keys are any `K: AsRef<[u8]>` and are stored as given; pass `&str`
//!   to keep the table from owning key data. Values are opaque.
//! - Duplicate keys are kept; the newest shadows the rest for `search`.
//!
//! Growth
//! - The trigger is bucket occupancy, not entry count: an insert into an
//!   already occupied bucket never counts toward the load factor.
//! - Exceeding `max_load_factor` (0.8 by default) moves every entry into a
//!   bucket array one rank up. Entries are relinked, not copied, and each
//!   chain is replayed oldest-first so duplicate shadowing survives.
//! - If the first growth step fails the insert is undone and
//!   `TableError::Resize` is returned. `InsertOutcome::Resized` and
//!   `generation()` report a successful resize to the caller.
//!
//! Key matching
//! - `search` uses full equality.
//! - `delete` defaults to prefix matching (a stored key matches if it
//!   starts with the query) and per-entry occupancy decrements. Both are
//!   kept for behavioral parity with existing users; `TableConfig::strict`
//!   switches to exact matching and true occupancy accounting.
//!
//! Notes and non-goals
//! - No shrinking, persistence, iteration order, or adversarial hash
//!   resistance.

pub mod api;
pub mod chain_table;
mod chain_table_proptest;
pub mod config;
pub mod error;
pub mod murmur;
pub mod primes;

// Public surface
pub use chain_table::{ChainTable, InsertOutcome, Iter};
pub use config::{KeyMatch, Occupancy, TableConfig};
pub use error::{ErrorCode, GrowError, TableError};
pub use murmur::{hash_key, murmur3_32};
pub use primes::PRIMES;
