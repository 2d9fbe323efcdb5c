//! MurmurHash3, x86 32-bit variant.
//!
//! Not a cryptographic hash: chosen for speed and distribution only. The
//! output is bit-exact with the reference implementation so published test
//! vectors apply.

const C1: u32 = 0xcc9e_2d51;
const C2: u32 = 0x1b87_3593;
const R1: u32 = 15;
const R2: u32 = 13;
const M: u32 = 5;
const N: u32 = 0xe654_6b64;

/// Seed used for every table operation.
pub const TABLE_SEED: u32 = 0;

#[inline]
fn scramble(k: u32) -> u32 {
    k.wrapping_mul(C1).rotate_left(R1).wrapping_mul(C2)
}

#[inline]
fn fmix32(mut h: u32) -> u32 {
    h ^= h >> 16;
    h = h.wrapping_mul(0x85eb_ca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2_ae35);
    h ^= h >> 16;
    h
}

/// Hash `bytes` with `seed`.
pub fn murmur3_32(bytes: &[u8], seed: u32) -> u32 {
    let mut h = seed;

    let mut chunks = bytes.chunks_exact(4);
    for chunk in &mut chunks {
        let k = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        h ^= scramble(k);
        h = h.rotate_left(R2).wrapping_mul(M).wrapping_add(N);
    }

    // Tail bytes fold into the hash without the body's rotate/multiply/add.
    let tail = chunks.remainder();
    if !tail.is_empty() {
        let mut k = 0u32;
        for (i, &b) in tail.iter().enumerate() {
            k ^= u32::from(b) << (8 * i);
        }
        h ^= scramble(k);
    }

    // Length is mixed in modulo 2^32.
    h ^= bytes.len() as u32;
    fmix32(h)
}

/// Digest of a table key: `murmur3_32(key, 0)`.
#[inline]
pub fn hash_key(key: &[u8]) -> u32 {
    murmur3_32(key, TABLE_SEED)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Invariant: output matches the reference MurmurHash3_x86_32 vectors.
    #[test]
    fn reference_vectors() {
        let cases: &[(&[u8], u32, u32)] = &[
            (b"", 0, 0),
            (b"", 1, 0x514e_28b7),
            (b"", 0xffff_ffff, 0x81f1_6f39),
            (b"\xff\xff\xff\xff", 0, 0x7629_3b50),
            (b"\x21\x43\x65\x87", 0, 0xf55b_516b),
            (b"\x21\x43\x65\x87", 0x5082_edee, 0x2362_f9de),
            (b"\x21\x43\x65", 0, 0x7e4a_8634),
            (b"\x21\x43", 0, 0xa0f7_b07a),
            (b"\x21", 0, 0x7266_1cf4),
            (b"\x00\x00\x00\x00", 0, 0x2362_f9de),
            (b"\x00\x00\x00", 0, 0x85f0_b427),
            (b"\x00\x00", 0, 0x30f4_c306),
            (b"\x00", 0, 0x514e_28b7),
        ];
        for &(input, seed, expected) in cases {
            assert_eq!(
                murmur3_32(input, seed),
                expected,
                "input={:02x?} seed={:#x}",
                input,
                seed
            );
        }
    }

    /// Invariant: `hash_key` is the seed-0 hash.
    #[test]
    fn hash_key_uses_seed_zero() {
        for k in ["", "a", "abc", "abcd", "hello world"] {
            assert_eq!(hash_key(k.as_bytes()), murmur3_32(k.as_bytes(), 0));
        }
    }

    /// Invariant: every tail length (0..=3) contributes to the digest.
    #[test]
    fn tail_bytes_affect_digest() {
        let base = b"abcd";
        let mut seen = std::collections::BTreeSet::new();
        for extra in 0..4 {
            let mut v = base.to_vec();
            v.extend(std::iter::repeat(b'x').take(extra));
            seen.insert(murmur3_32(&v, 0));
        }
        assert_eq!(seen.len(), 4);
    }

    /// Invariant: distinct seeds give distinct digests for the same input.
    #[test]
    fn seed_changes_digest() {
        assert_ne!(murmur3_32(b"key", 0), murmur3_32(b"key", 1));
    }
}
