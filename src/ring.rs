//! Ring arithmetic: identifier hashing and the interval predicate that every
//! other module (router, maintenance, handoff) builds on.

use sha1::{Digest, Sha1};

/// Bit-width `m` of the identifier ring. The finger table has exactly this
/// many entries (indices `1..=RING_BITS`); the ring holds `2^RING_BITS`
/// identifiers.
pub const RING_BITS: u32 = 6;

/// An identifier or file id: an integer in `[0, 2^RING_BITS)`.
pub type RingId = u64;

fn mask(bits: u32) -> u64 {
    if bits >= 64 {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

/// Hashes `bytes` with SHA-1 and truncates the digest modulo `2^bits`.
pub fn hash_to_ring_with_bits(bytes: &[u8], bits: u32) -> RingId {
    let digest = Sha1::digest(bytes);
    let mut value: u64 = 0;
    for byte in &digest[digest.len() - 8..] {
        value = (value << 8) | u64::from(*byte);
    }
    value & mask(bits)
}

/// Hashes `bytes` into the crate's default `RING_BITS`-wide ring.
pub fn hash_to_ring(bytes: &[u8]) -> RingId {
    hash_to_ring_with_bits(bytes, RING_BITS)
}

/// `target_id` of finger `k` (`1 <= k <= bits`): `(id + 2^(k-1)) mod 2^bits`.
pub fn finger_target_with_bits(id: RingId, k: u32, bits: u32) -> RingId {
    let step = 1u64 << (k - 1);
    id.wrapping_add(step) & mask(bits)
}

/// `finger_target` against the crate's default `RING_BITS`-wide ring.
pub fn finger_target(id: RingId, k: u32) -> RingId {
    finger_target_with_bits(id, k, RING_BITS)
}

/// The half-open (or closed-right) arc predicate that is the sole source of
/// "is `x` between `start` and `end` on the ring" truth.
///
/// Traverses clockwise from `start` to `end`, excluding `start`. When
/// `start == end` the interval covers the whole ring except the point
/// `start` (the wrap branch below yields this naturally).
pub fn in_interval_with_bits(start: RingId, x: RingId, end: RingId, inclusive_end: bool, bits: u32) -> bool {
    let m = mask(bits);
    debug_assert!(start <= m && x <= m && end <= m);
    if end > start {
        (start < x && x < end) || (inclusive_end && x == end)
    } else {
        (x > start || x < end) || (inclusive_end && x == end)
    }
}

/// `in_interval` against the crate's default `RING_BITS`-wide ring.
pub fn in_interval(start: RingId, x: RingId, end: RingId, inclusive_end: bool) -> bool {
    in_interval_with_bits(start, x, end, inclusive_end, RING_BITS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degenerate_interval_excludes_start_unless_inclusive() {
        assert!(!in_interval(5, 5, 5, false));
        assert!(in_interval(5, 5, 5, true));
    }

    #[test]
    fn simple_forward_interval() {
        for bits in 2..=10 {
            assert!(in_interval_with_bits(1, 2, 3, false, bits));
        }
    }

    #[test]
    fn wraparound_on_m6() {
        assert!(in_interval_with_bits(60, 2, 5, false, 6));
        assert!(!in_interval_with_bits(60, 50, 5, false, 6));
        assert!(in_interval_with_bits(60, 5, 5, true, 6));
    }

    #[test]
    fn start_equal_end_covers_whole_ring_but_start() {
        for x in 0..64u64 {
            if x == 10 {
                assert!(!in_interval_with_bits(10, x, 10, false, 6));
            } else {
                assert!(in_interval_with_bits(10, x, 10, false, 6));
            }
        }
    }

    #[test]
    fn finger_target_matches_formula() {
        let bits = 6;
        let id = 13u64;
        for k in 1..=bits {
            let expected = (id + (1u64 << (k - 1))) % (1u64 << bits);
            assert_eq!(finger_target_with_bits(id, k, bits), expected);
        }
    }

    #[test]
    fn hash_to_ring_is_stable_and_bounded() {
        let a = hash_to_ring(b"127.0.0.1:9000");
        let b = hash_to_ring(b"127.0.0.1:9000");
        assert_eq!(a, b);
        assert!(a < (1u64 << RING_BITS));
    }
}
