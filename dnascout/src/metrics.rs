use std::iter::Sum;
use std::ops::AddAssign;
use tracing::{debug, info};

/// Counters accumulated by one worker over its block.
///
/// Every worker owns its own instance; instances are only combined after
/// all workers have been joined, so no atomics are needed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanMetrics {
    pub sequences_scanned: u64,
    pub bases_scanned: u64,
    pub sequences_with_matches: u64,
    pub positions_found: u64,
    pub hash_collisions: u64,
}

impl ScanMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the scan of one sequence
    pub fn record_sequence(&mut self, sequence_len: usize, positions: usize, collisions: u64) {
        self.sequences_scanned += 1;
        self.bases_scanned += sequence_len as u64;
        if positions > 0 {
            self.sequences_with_matches += 1;
            self.positions_found += positions as u64;
        }
        self.hash_collisions += collisions;
    }

    pub fn log_block(&self, block: usize) {
        debug!(
            "Block {}: {} sequences, {} bases, {} with matches, {} collisions",
            block,
            self.sequences_scanned,
            self.bases_scanned,
            self.sequences_with_matches,
            self.hash_collisions
        );
    }

    /// Logs the run totals
    pub fn log_stats(&self) {
        info!(
            "Scan stats:\n\
             Sequences scanned: {}\n\
             Bases scanned: {}\n\
             Sequences with matches: {}\n\
             Positions found: {}\n\
             Hash collisions: {}",
            self.sequences_scanned,
            self.bases_scanned,
            self.sequences_with_matches,
            self.positions_found,
            self.hash_collisions
        );
    }
}

impl AddAssign for ScanMetrics {
    fn add_assign(&mut self, other: Self) {
        self.sequences_scanned += other.sequences_scanned;
        self.bases_scanned += other.bases_scanned;
        self.sequences_with_matches += other.sequences_with_matches;
        self.positions_found += other.positions_found;
        self.hash_collisions += other.hash_collisions;
    }
}

impl Sum for ScanMetrics {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::new(), |mut total, metrics| {
            total += metrics;
            total
        })
    }
}
