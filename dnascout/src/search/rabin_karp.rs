//! Rolling-hash (Rabin-Karp) scan over a base-4 nucleotide code.
//!
//! Equal hashes are only candidates: every candidate window is compared
//! byte for byte before it is reported. A candidate that fails the
//! comparison is counted as a hash collision and dropped.

/// Modulus for all hash arithmetic
pub const MODULUS: u64 = 1_000_000_007;
/// Radix of the polynomial hash, one digit per base
pub const BASE: u64 = 4;

/// Hash digit for a base. `N` (and anything unexpected) shares the code of
/// `A`; verification keeps it from matching a real `A`.
#[inline]
pub fn base_code(base: u8) -> u64 {
    match base {
        b'C' => 1,
        b'G' => 2,
        b'T' => 3,
        _ => 0,
    }
}

/// Polynomial hash of `window` modulo [`MODULUS`].
pub fn window_hash(window: &[u8]) -> u64 {
    window
        .iter()
        .fold(0, |hash, &base| (hash * BASE + base_code(base)) % MODULUS)
}

/// Positions found by one scan plus the number of rejected hash hits
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RollingScan {
    pub positions: Vec<usize>,
    pub collisions: u64,
}

/// Precomputed pattern hash and leading-term weight
#[derive(Debug, Clone)]
pub struct RabinKarpMatcher {
    pattern: Vec<u8>,
    pattern_hash: u64,
    // BASE^(m-1) mod MODULUS
    leading_power: u64,
}

impl RabinKarpMatcher {
    pub fn new(pattern: &[u8]) -> Self {
        let leading_power = (1..pattern.len()).fold(1, |power, _| (power * BASE) % MODULUS);
        Self {
            pattern: pattern.to_vec(),
            pattern_hash: window_hash(pattern),
            leading_power,
        }
    }

    pub fn pattern_hash(&self) -> u64 {
        self.pattern_hash
    }

    /// Drops `outgoing` from the front of the window and appends `incoming`.
    #[inline]
    fn roll(&self, hash: u64, outgoing: u8, incoming: u8) -> u64 {
        let leading = (base_code(outgoing) * self.leading_power) % MODULUS;
        // both operands are in [0, MODULUS), so adding MODULUS keeps this non-negative
        let without_leading = (hash + MODULUS - leading) % MODULUS;
        (without_leading * BASE + base_code(incoming)) % MODULUS
    }

    pub fn find_all(&self, text: &[u8]) -> RollingScan {
        let m = self.pattern.len();
        let n = text.len();
        let mut scan = RollingScan::default();
        if m == 0 || n < m {
            return scan;
        }

        let mut hash = window_hash(&text[..m]);
        for i in 0..=n - m {
            if hash == self.pattern_hash {
                if text[i..i + m] == self.pattern[..] {
                    scan.positions.push(i);
                } else {
                    scan.collisions += 1;
                }
            }
            if i < n - m {
                hash = self.roll(hash, text[i], text[i + m]);
            }
        }
        scan
    }
}

/// All occurrences of `pattern` in `text`, with the collision count.
pub fn rabin_karp_search(text: &str, pattern: &str) -> (Vec<usize>, u64) {
    let scan = RabinKarpMatcher::new(pattern.as_bytes()).find_all(text.as_bytes());
    (scan.positions, scan.collisions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::kmp::kmp_search;

    // 1_000_000_007 written in base 4 over ACGT, 15 digits: hashes to 0,
    // the same as fifteen A's.
    const MODULUS_IN_BASES: &str = "TGTGCGGTAGGAACT";

    #[test]
    fn test_window_hash() {
        assert_eq!(window_hash(b"A"), 0);
        assert_eq!(window_hash(b"T"), 3);
        assert_eq!(window_hash(b"CA"), 4);
        assert_eq!(window_hash(b"ACGT"), 27);
        assert_eq!(window_hash(MODULUS_IN_BASES.as_bytes()), 0);
    }

    #[test]
    fn test_finds_all_occurrences() {
        assert_eq!(rabin_karp_search("ACGTACGT", "ACGT"), (vec![0, 4], 0));
        assert_eq!(rabin_karp_search("AAAAA", "AA"), (vec![0, 1, 2, 3], 0));
        assert_eq!(rabin_karp_search("GATTACA", "GATTACA"), (vec![0], 0));
    }

    #[test]
    fn test_edge_cases() {
        assert_eq!(rabin_karp_search("ACGT", ""), (vec![], 0));
        assert_eq!(rabin_karp_search("ACG", "ACGT"), (vec![], 0));
        assert_eq!(rabin_karp_search("", "A"), (vec![], 0));
    }

    #[test]
    fn test_n_hashes_like_a_but_never_matches_it() {
        let (positions, collisions) = rabin_karp_search("NNNN", "AAAA");
        assert!(positions.is_empty());
        assert_eq!(collisions, 1);

        let (positions, collisions) = rabin_karp_search("ANAN", "NA");
        assert_eq!(positions, vec![1]);
        // windows "AN" and "AN" at 0 and 2 hash equal to "NA"
        assert_eq!(collisions, 2);
    }

    #[test]
    fn test_modular_collision_is_counted_and_excluded() {
        let pattern = "A".repeat(15);
        let (positions, collisions) = rabin_karp_search(MODULUS_IN_BASES, &pattern);
        assert!(positions.is_empty());
        assert_eq!(collisions, 1);
    }

    #[test]
    fn test_rolled_window_collision() {
        // the colliding window sits at offset 2, the real match at 17
        let text = format!("CG{}{}", MODULUS_IN_BASES, "A".repeat(15));
        let (positions, collisions) = rabin_karp_search(&text, &"A".repeat(15));
        assert_eq!(positions, vec![17]);
        assert_eq!(collisions, 1);
    }

    #[test]
    fn test_long_pattern_wraps_modulus() {
        let text = "ACGTTGCANACGTTGCAACGTTGCANACGTTGCA".repeat(4);
        let pattern = "GCANACGTTGCAACGTTGCANACG";
        let (positions, _) = rabin_karp_search(&text, pattern);
        assert_eq!(positions, kmp_search(&text, pattern));
        assert!(!positions.is_empty());
    }

    #[test]
    fn test_pattern_hash_matches_window_hash() {
        let matcher = RabinKarpMatcher::new(b"GATTACA");
        assert_eq!(matcher.pattern_hash(), window_hash(b"GATTACA"));
    }
}
