use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::kmp::KmpMatcher;
use super::rabin_karp::RabinKarpMatcher;
use crate::errors::{SearchError, SearchResult};

/// Exact-match algorithms a run can select
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// Prefix-function automaton scan
    Kmp,
    /// Rolling-hash scan with collision accounting
    RabinKarp,
}

impl Algorithm {
    pub const ALL: [Algorithm; 2] = [Algorithm::Kmp, Algorithm::RabinKarp];

    /// Canonical name, as accepted on the command line and printed in reports
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Kmp => "kmp",
            Algorithm::RabinKarp => "rabin_karp",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = SearchError;

    fn from_str(s: &str) -> SearchResult<Self> {
        Algorithm::ALL
            .into_iter()
            .find(|algorithm| algorithm.name() == s)
            .ok_or_else(|| SearchError::unsupported_algorithm(s))
    }
}

/// Result of scanning one sequence
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchOutcome {
    /// Zero-based start offsets, strictly increasing
    pub positions: Vec<usize>,
    /// Hash hits rejected by verification; always 0 for KMP
    pub collisions: u64,
}

/// Preprocessed pattern for one of the algorithms
#[derive(Debug, Clone)]
pub enum MatchStrategy {
    Kmp(KmpMatcher),
    RabinKarp(RabinKarpMatcher),
}

/// Handles pattern matching for a run. Built once and shared read-only by
/// every worker.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    algorithm: Algorithm,
    strategy: MatchStrategy,
}

impl PatternMatcher {
    pub fn new(algorithm: Algorithm, pattern: &str) -> Self {
        let bytes = pattern.as_bytes();
        let strategy = match algorithm {
            Algorithm::Kmp => MatchStrategy::Kmp(KmpMatcher::new(bytes)),
            Algorithm::RabinKarp => MatchStrategy::RabinKarp(RabinKarpMatcher::new(bytes)),
        };
        Self {
            algorithm,
            strategy,
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Finds all matches in the given sequence
    pub fn find_matches(&self, sequence: &str) -> MatchOutcome {
        match &self.strategy {
            MatchStrategy::Kmp(kmp) => MatchOutcome {
                positions: kmp.find_all(sequence.as_bytes()),
                collisions: 0,
            },
            MatchStrategy::RabinKarp(rk) => {
                let scan = rk.find_all(sequence.as_bytes());
                MatchOutcome {
                    positions: scan.positions,
                    collisions: scan.collisions,
                }
            }
        }
    }
}
