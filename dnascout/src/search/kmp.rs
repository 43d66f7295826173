//! Prefix-function (Knuth-Morris-Pratt) scan.
//!
//! The failure table is built once per pattern; every scan then walks the
//! text exactly once and never moves backwards over it.

/// Longest proper prefix of `pattern[..=i]` that is also a suffix, for each `i`.
pub fn build_failure_table(pattern: &[u8]) -> Vec<usize> {
    let mut failure = vec![0; pattern.len()];
    let mut len = 0;

    for i in 1..pattern.len() {
        while len > 0 && pattern[i] != pattern[len] {
            len = failure[len - 1];
        }
        if pattern[i] == pattern[len] {
            len += 1;
        }
        failure[i] = len;
    }
    failure
}

/// Precomputed automaton for one pattern
#[derive(Debug, Clone)]
pub struct KmpMatcher {
    pattern: Vec<u8>,
    failure: Vec<usize>,
}

impl KmpMatcher {
    pub fn new(pattern: &[u8]) -> Self {
        Self {
            pattern: pattern.to_vec(),
            failure: build_failure_table(pattern),
        }
    }

    pub fn failure_table(&self) -> &[usize] {
        &self.failure
    }

    /// Start offsets of every occurrence, overlapping ones included, in
    /// increasing order.
    pub fn find_all(&self, text: &[u8]) -> Vec<usize> {
        let m = self.pattern.len();
        if m == 0 || text.len() < m {
            return Vec::new();
        }

        let mut positions = Vec::new();
        let mut matched = 0;
        for (i, &byte) in text.iter().enumerate() {
            while matched > 0 && byte != self.pattern[matched] {
                matched = self.failure[matched - 1];
            }
            if byte == self.pattern[matched] {
                matched += 1;
            }
            if matched == m {
                positions.push(i + 1 - m);
                // resume from the border so overlapping hits are kept
                matched = self.failure[m - 1];
            }
        }
        positions
    }
}

/// All occurrences of `pattern` in `text`.
pub fn kmp_search(text: &str, pattern: &str) -> Vec<usize> {
    if pattern.is_empty() || text.len() < pattern.len() {
        return Vec::new();
    }
    KmpMatcher::new(pattern.as_bytes()).find_all(text.as_bytes())
}
