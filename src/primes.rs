//! Prime capacity ladder. Each step roughly doubles the previous one.

/// Bucket counts indexed by capacity rank.
pub const PRIMES: [u32; 26] = [
    53, 97, 193, 389, 769, 1543, 3079, 6151, 12289, 24593, 49157, 98317, 196613, 393241,
    786433, 1572869, 3145739, 6291469, 12582917, 25165843, 50331653, 100663319, 201326611,
    402653189, 805306457, 1610612741,
];

/// Highest valid rank.
pub const MAX_RANK: usize = PRIMES.len() - 1;

/// Bucket count for `rank`, or `None` past the end of the ladder.
#[inline]
pub fn capacity_for_rank(rank: usize) -> Option<usize> {
    PRIMES.get(rank).map(|&p| p as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ladder_is_strictly_increasing() {
        assert!(PRIMES.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn ladder_entries_are_prime() {
        // Trial division is fine for the small end of the ladder.
        for &p in PRIMES.iter().take(12) {
            let p = p as u64;
            assert!((2..).take_while(|d| d * d <= p).all(|d| p % d != 0), "{p}");
        }
    }

    #[test]
    fn rank_lookup() {
        assert_eq!(capacity_for_rank(0), Some(53));
        assert_eq!(capacity_for_rank(1), Some(97));
        assert_eq!(capacity_for_rank(MAX_RANK), Some(1_610_612_741));
        assert_eq!(capacity_for_rank(MAX_RANK + 1), None);
    }
}
