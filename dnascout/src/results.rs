//! Result types produced by a run.
//!
//! Everything here is plain owned data: workers build [`MatchResult`]s in
//! their own buffers, the engine moves them into one ordered list, and the
//! finished [`Report`] is never mutated again.
use serde::Serialize;

use crate::search::matcher::Algorithm;

/// All match offsets for one sequence. Only built for sequences with at
/// least one match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    pub name: String,
    /// Zero-based start offsets, strictly increasing
    pub positions: Vec<usize>,
}

/// Aggregate numbers for one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunStatistics {
    /// Records that survived validation
    pub total_sequences: usize,
    /// Wall-clock time from dispatch start to merged results
    #[serde(rename = "execution_time_ms")]
    pub elapsed_milliseconds: u64,
    /// Blocks actually dispatched, never more than the record count
    #[serde(rename = "threads_used")]
    pub workers_used: usize,
    /// Verified-away hash hits; always 0 for KMP
    pub hash_collisions: u64,
}

/// The final, immutable outcome of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    success: bool,
    algorithm: Algorithm,
    pattern: String,
    #[serde(flatten)]
    statistics: RunStatistics,
    matches: Vec<MatchResult>,
    match_count: usize,
}

impl Report {
    pub fn new(
        algorithm: Algorithm,
        pattern: impl Into<String>,
        statistics: RunStatistics,
        matches: Vec<MatchResult>,
    ) -> Self {
        Self {
            success: true,
            algorithm,
            pattern: pattern.into(),
            statistics,
            match_count: matches.len(),
            matches,
        }
    }

    pub fn success(&self) -> bool {
        self.success
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn statistics(&self) -> &RunStatistics {
        &self.statistics
    }

    pub fn matches(&self) -> &[MatchResult] {
        &self.matches
    }

    /// Number of sequences with at least one match
    pub fn match_count(&self) -> usize {
        self.match_count
    }

    /// Total number of offsets over all sequences
    pub fn total_positions(&self) -> usize {
        self.matches.iter().map(|m| m.positions.len()).sum()
    }
}
