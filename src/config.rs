//! Table policies, set through a small builder.

use crate::error::TableError;
use crate::primes::MAX_RANK;

/// Default growth threshold on bucket occupancy.
pub const DEFAULT_MAX_LOAD_FACTOR: f64 = 0.8;

/// How `delete` compares the query against stored keys.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum KeyMatch {
    /// First stored key that starts with the query bytes.
    #[default]
    Prefix,
    /// Full byte equality, same as `search`.
    Exact,
}

/// How `delete` maintains the occupied-bucket count.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum Occupancy {
    /// Decrement on every removed entry (saturating), even if the bucket
    /// still holds other entries.
    #[default]
    PerEntry,
    /// Decrement only when the bucket becomes empty.
    Exact,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TableConfig {
    pub(crate) initial_rank: usize,
    pub(crate) max_rank: usize,
    pub(crate) max_load_factor: f64,
    pub(crate) key_match: KeyMatch,
    pub(crate) occupancy: Occupancy,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            initial_rank: 0,
            max_rank: MAX_RANK,
            max_load_factor: DEFAULT_MAX_LOAD_FACTOR,
            key_match: KeyMatch::default(),
            occupancy: Occupancy::default(),
        }
    }
}

impl TableConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exact-match deletes and true bucket occupancy.
    pub fn strict() -> Self {
        Self::default()
            .with_key_match(KeyMatch::Exact)
            .with_occupancy(Occupancy::Exact)
    }

    pub fn with_initial_rank(mut self, rank: usize) -> Self {
        self.initial_rank = rank;
        self
    }

    /// Highest rank the table may grow to.
    pub fn with_max_rank(mut self, rank: usize) -> Self {
        self.max_rank = rank;
        self
    }

    /// Grow once `occupied / capacity` exceeds `lf`.
    pub fn with_max_load_factor(mut self, lf: f64) -> Self {
        self.max_load_factor = lf;
        self
    }

    pub fn with_key_match(mut self, m: KeyMatch) -> Self {
        self.key_match = m;
        self
    }

    pub fn with_occupancy(mut self, o: Occupancy) -> Self {
        self.occupancy = o;
        self
    }

    pub fn initial_rank(&self) -> usize {
        self.initial_rank
    }
    pub fn max_rank(&self) -> usize {
        self.max_rank
    }
    pub fn max_load_factor(&self) -> f64 {
        self.max_load_factor
    }
    pub fn key_match(&self) -> KeyMatch {
        self.key_match
    }
    pub fn occupancy(&self) -> Occupancy {
        self.occupancy
    }

    pub fn validate(&self) -> Result<(), TableError> {
        if self.initial_rank > MAX_RANK {
            return Err(TableError::RankOutOfRange {
                rank: self.initial_rank,
                len: MAX_RANK + 1,
            });
        }
        if self.max_rank < self.initial_rank {
            return Err(TableError::Config("max rank below initial rank"));
        }
        if !(self.max_load_factor > 0.0 && self.max_load_factor <= 1.0) {
            return Err(TableError::Config("max load factor must be in (0, 1]"));
        }
        Ok(())
    }
}
