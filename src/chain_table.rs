//! ChainTable: separate-chaining table over an entry arena.
//!
//! Entries live in a `SlotMap`; each bucket stores the arena key of its chain
//! head and each entry stores the key of the next one. Growth allocates a
//! fresh bucket array and relinks the existing entries, so entries are never
//! copied or reallocated by a resize.

use crate::config::{KeyMatch, Occupancy, TableConfig};
use crate::error::{GrowError, TableError};
use crate::murmur::hash_key;
use crate::primes::{capacity_for_rank, MAX_RANK, PRIMES};
use log::{debug, trace, warn};
use slotmap::{DefaultKey, SlotMap};

#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
    next: Option<DefaultKey>,
}

/// What an insert did to the table's shape.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum InsertOutcome {
    /// Linked into the current bucket array.
    Stored,
    /// Linked, then the table grew to a larger bucket array.
    Resized {
        from_capacity: usize,
        to_capacity: usize,
    },
}

impl InsertOutcome {
    pub fn is_resized(&self) -> bool {
        matches!(self, InsertOutcome::Resized { .. })
    }
}

#[derive(Debug)]
pub struct ChainTable<K, V> {
    buckets: Vec<Option<DefaultKey>>,
    slots: SlotMap<DefaultKey, Entry<K, V>>,
    rank: usize,
    occupied: usize,
    generation: u64,
    config: TableConfig,
}

fn alloc_buckets(capacity: usize) -> Option<Vec<Option<DefaultKey>>> {
    let mut buckets = Vec::new();
    buckets.try_reserve_exact(capacity).ok()?;
    buckets.resize(capacity, None);
    Some(buckets)
}

/// Reverse a chain in place and return its new head.
fn reverse_chain<K, V>(
    slots: &mut SlotMap<DefaultKey, Entry<K, V>>,
    head: Option<DefaultKey>,
) -> Option<DefaultKey> {
    let mut prev = None;
    let mut cur = head;
    while let Some(k) = cur {
        let e = &mut slots[k];
        cur = e.next;
        e.next = prev;
        prev = Some(k);
    }
    prev
}

/// Iterator over `(key, value)` pairs in arbitrary order.
pub struct Iter<'a, K, V> {
    it: slotmap::basic::Iter<'a, DefaultKey, Entry<K, V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.next().map(|(_, e)| (&e.key, &e.value))
    }
}

impl<K, V> ChainTable<K, V>
where
    K: AsRef<[u8]>,
{
    /// Create an empty table with `PRIMES[rank]` buckets and default policies.
    pub fn create(rank: usize) -> Result<Self, TableError> {
        Self::with_config(TableConfig::new().with_initial_rank(rank))
    }

    pub fn with_config(config: TableConfig) -> Result<Self, TableError> {
        config.validate()?;
        let rank = config.initial_rank;
        let capacity = capacity_for_rank(rank).ok_or(TableError::RankOutOfRange {
            rank,
            len: PRIMES.len(),
        })?;
        let buckets = alloc_buckets(capacity).ok_or(TableError::Create { capacity })?;
        debug!("created table: rank={} capacity={}", rank, capacity);
        Ok(Self {
            buckets,
            slots: SlotMap::with_key(),
            rank,
            occupied: 0,
            generation: 0,
            config,
        })
    }

    /// Release every entry and the bucket array. Returns the number of
    /// entries released.
    pub fn destroy(self) -> usize {
        let released = self.slots.len();
        debug!(
            "destroying table: capacity={} entries={}",
            self.capacity(),
            released
        );
        released
    }

    #[inline]
    fn bucket_of(&self, key: &[u8]) -> usize {
        hash_key(key) as usize % self.buckets.len()
    }

    #[inline]
    fn over_threshold(&self) -> bool {
        self.occupied as f64 / self.buckets.len() as f64 > self.config.max_load_factor
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }
    pub fn rank(&self) -> usize {
        self.rank
    }
    /// Occupied-bucket count driving the growth decision.
    pub fn occupied_buckets(&self) -> usize {
        self.occupied
    }
    pub fn load_factor(&self) -> f64 {
        self.occupied as f64 / self.buckets.len() as f64
    }
    /// Bumped on every resize; a changed value means the bucket array was
    /// replaced.
    pub fn generation(&self) -> u64 {
        self.generation
    }
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Prepend `(key, value)` to its bucket's chain, growing the table if
    /// bucket occupancy exceeds the configured load factor.
    ///
    /// Duplicate keys are kept; the newest entry shadows older ones for
    /// `search`. If the first growth step fails the insert is undone and
    /// the table is left exactly as before; the rejected key and value are
    /// dropped.
    pub fn insert(&mut self, key: K, value: V) -> Result<InsertOutcome, TableError> {
        let idx = self.bucket_of(key.as_ref());
        let head = self.buckets[idx];
        let k = self.slots.insert(Entry {
            key,
            value,
            next: head,
        });
        self.buckets[idx] = Some(k);
        if head.is_none() {
            self.occupied += 1;
        }

        if !self.over_threshold() {
            return Ok(InsertOutcome::Stored);
        }

        let from_rank = self.rank;
        let from_capacity = self.capacity();
        if let Err(source) = self.grow() {
            self.buckets[idx] = head;
            if head.is_none() {
                self.occupied -= 1;
            }
            let _ = self.slots.remove(k);
            warn!(
                "resize from rank {} failed ({}); insert rolled back",
                from_rank, source
            );
            return Err(TableError::Resize { from_rank, source });
        }

        while self.over_threshold() {
            if let Err(e) = self.grow() {
                warn!(
                    "cascading resize stopped at rank {} ({}); load factor {:.3}",
                    self.rank,
                    e,
                    self.load_factor()
                );
                break;
            }
        }

        Ok(InsertOutcome::Resized {
            from_capacity,
            to_capacity: self.capacity(),
        })
    }

    /// Move every entry into a bucket array one rank up. Nothing is touched
    /// unless the new array is allocated.
    fn grow(&mut self) -> Result<(), GrowError> {
        let next = self.rank + 1;
        let ceiling = self.config.max_rank.min(MAX_RANK);
        if next > ceiling {
            return Err(GrowError::CeilingReached {
                rank: next,
                ceiling,
            });
        }
        let capacity = capacity_for_rank(next).ok_or(GrowError::CeilingReached {
            rank: next,
            ceiling,
        })?;
        let fresh = alloc_buckets(capacity).ok_or(GrowError::Alloc { capacity })?;
        let old = core::mem::replace(&mut self.buckets, fresh);

        // Replay each old chain oldest-first; prepending then leaves the
        // newest duplicate at the head of its new chain.
        let mut occupied = 0;
        for head in old {
            let mut cur = reverse_chain(&mut self.slots, head);
            while let Some(k) = cur {
                let e = &mut self.slots[k];
                cur = e.next;
                let idx = hash_key(e.key.as_ref()) as usize % capacity;
                let new_head = self.buckets[idx];
                if new_head.is_none() {
                    occupied += 1;
                }
                e.next = new_head;
                self.buckets[idx] = Some(k);
            }
        }

        debug!(
            "resized table: rank {} -> {}, capacity {} -> {}, entries={} occupied={}",
            self.rank,
            next,
            PRIMES[self.rank],
            capacity,
            self.slots.len(),
            occupied
        );
        self.rank = next;
        self.occupied = occupied;
        self.generation += 1;
        Ok(())
    }

    fn find_slot(&self, q: &[u8]) -> Option<DefaultKey> {
        let mut cur = self.buckets[self.bucket_of(q)];
        while let Some(k) = cur {
            let e = &self.slots[k];
            if e.key.as_ref() == q {
                return Some(k);
            }
            cur = e.next;
        }
        None
    }

    /// Value of the newest entry whose key equals `key`.
    pub fn search<Q>(&self, key: &Q) -> Option<&V>
    where
        Q: ?Sized + AsRef<[u8]>,
    {
        self.find_slot(key.as_ref()).map(|k| &self.slots[k].value)
    }

    pub fn search_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        Q: ?Sized + AsRef<[u8]>,
    {
        let k = self.find_slot(key.as_ref())?;
        self.slots.get_mut(k).map(|e| &mut e.value)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        Q: ?Sized + AsRef<[u8]>,
    {
        self.find_slot(key.as_ref()).is_some()
    }

    fn delete_matches(&self, stored: &[u8], q: &[u8]) -> bool {
        match self.config.key_match {
            KeyMatch::Prefix => stored.starts_with(q),
            KeyMatch::Exact => stored == q,
        }
    }

    /// Unlink the first matching entry in `key`'s bucket and hand back its
    /// key and value. `None` when nothing matches.
    ///
    /// With `KeyMatch::Prefix` a stored key matches when it starts with
    /// `key`, so `delete("ab")` can remove an `"abc"` entry sharing the
    /// bucket.
    pub fn delete<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        Q: ?Sized + AsRef<[u8]>,
    {
        let q = key.as_ref();
        let idx = self.bucket_of(q);
        let mut prev: Option<DefaultKey> = None;
        let mut cur = self.buckets[idx];

        while let Some(k) = cur {
            let (matched, next) = {
                let e = &self.slots[k];
                (self.delete_matches(e.key.as_ref(), q), e.next)
            };
            if matched {
                match prev {
                    None => self.buckets[idx] = next,
                    Some(p) => self.slots[p].next = next,
                }
                let removed = self.slots.remove(k)?;
                match self.config.occupancy {
                    Occupancy::PerEntry => self.occupied = self.occupied.saturating_sub(1),
                    Occupancy::Exact => {
                        if self.buckets[idx].is_none() {
                            self.occupied -= 1;
                        }
                    }
                }
                trace!("delete hit in bucket {}", idx);
                return Some((removed.key, removed.value));
            }
            prev = cur;
            cur = next;
        }

        trace!("delete miss in bucket {}", idx);
        None
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            it: self.slots.iter(),
        }
    }

    /// Non-empty bucket count, computed by scanning.
    #[cfg(test)]
    pub(crate) fn true_occupancy(&self) -> usize {
        self.buckets.iter().filter(|b| b.is_some()).count()
    }

    /// Panics unless every entry is reachable from exactly one bucket and
    /// sits in the bucket its key hashes to.
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        assert_eq!(self.capacity(), PRIMES[self.rank] as usize);
        let mut reached = 0usize;
        for (idx, head) in self.buckets.iter().enumerate() {
            let mut cur = *head;
            while let Some(k) = cur {
                let e = self.slots.get(k).expect("chain link points at live entry");
                assert_eq!(self.bucket_of(e.key.as_ref()), idx, "entry in wrong bucket");
                reached += 1;
                assert!(reached <= self.slots.len(), "chain cycle");
                cur = e.next;
            }
        }
        assert_eq!(reached, self.slots.len(), "unreachable entries");
    }
}
