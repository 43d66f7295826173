use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use tracing::{trace, warn};

use super::matcher::PatternMatcher;
use crate::errors::{SearchError, SearchResult};
use crate::metrics::ScanMetrics;
use crate::records::SequenceRecord;
use crate::results::MatchResult;

/// What one worker produced for its block
#[derive(Debug, Clone, Default)]
pub struct BlockOutput {
    /// Index of the block in assignment order
    pub block: usize,
    /// Matches in the block's record order
    pub matches: Vec<MatchResult>,
    pub metrics: ScanMetrics,
}

/// Runs the shared matcher over a contiguous block of records
#[derive(Debug, Clone, Copy)]
pub struct BlockProcessor<'a> {
    matcher: &'a PatternMatcher,
}

impl<'a> BlockProcessor<'a> {
    pub fn new(matcher: &'a PatternMatcher) -> Self {
        Self { matcher }
    }

    /// Scans every record of the block, keeping only records with matches.
    pub fn process_block(&self, block: usize, records: &[SequenceRecord]) -> BlockOutput {
        let mut output = BlockOutput {
            block,
            ..Default::default()
        };

        for record in records {
            let outcome = self.matcher.find_matches(&record.sequence);
            output.metrics.record_sequence(
                record.sequence.len(),
                outcome.positions.len(),
                outcome.collisions,
            );
            if !outcome.positions.is_empty() {
                trace!(
                    "Block {}: {} matches in {}",
                    block,
                    outcome.positions.len(),
                    record.name
                );
                output.matches.push(MatchResult {
                    name: record.name.clone(),
                    positions: outcome.positions,
                });
            }
        }

        output.metrics.log_block(block);
        output
    }

    /// Like [`process_block`](Self::process_block), but a panic inside the
    /// block becomes an error for that block only.
    pub fn process_block_guarded(
        &self,
        block: usize,
        records: &[SequenceRecord],
    ) -> SearchResult<BlockOutput> {
        guard_block(block, || self.process_block(block, records))
    }
}

/// Runs `work` for `block`, turning a panic into [`SearchError::WorkerFailed`].
pub fn guard_block<F>(block: usize, work: F) -> SearchResult<BlockOutput>
where
    F: FnOnce() -> BlockOutput,
{
    panic::catch_unwind(AssertUnwindSafe(work)).map_err(|payload| {
        let message = panic_message(payload.as_ref());
        warn!("Worker for block {} panicked: {}", block, message);
        SearchError::worker_failed(block, message)
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::matcher::Algorithm;

    fn record(name: &str, sequence: &str) -> SequenceRecord {
        SequenceRecord::new(name, sequence).unwrap()
    }

    #[test]
    fn test_process_block_skips_records_without_matches() {
        let matcher = PatternMatcher::new(Algorithm::Kmp, "ACGT");
        let records = vec![
            record("seq1", "ACGTACGT"),
            record("seq2", "TTTTAAAA"),
            record("seq3", "CACGTC"),
        ];

        let output = BlockProcessor::new(&matcher).process_block(4, &records);
        assert_eq!(output.block, 4);
        assert_eq!(
            output.matches,
            vec![
                MatchResult {
                    name: "seq1".to_string(),
                    positions: vec![0, 4],
                },
                MatchResult {
                    name: "seq3".to_string(),
                    positions: vec![1],
                },
            ]
        );
        assert_eq!(output.metrics.sequences_scanned, 3);
        assert_eq!(output.metrics.bases_scanned, 22);
        assert_eq!(output.metrics.sequences_with_matches, 2);
    }

    #[test]
    fn test_process_block_counts_collisions() {
        let matcher = PatternMatcher::new(Algorithm::RabinKarp, "AA");
        let records = vec![record("n", "NNN"), record("a", "AAA")];

        let output = BlockProcessor::new(&matcher).process_block(0, &records);
        assert_eq!(output.matches.len(), 1);
        assert_eq!(output.matches[0].positions, vec![0, 1]);
        assert_eq!(output.metrics.hash_collisions, 2);
    }

    #[test]
    fn test_empty_block() {
        let matcher = PatternMatcher::new(Algorithm::Kmp, "A");
        let output = BlockProcessor::new(&matcher)
            .process_block_guarded(0, &[])
            .unwrap();
        assert!(output.matches.is_empty());
        assert_eq!(output.metrics, ScanMetrics::default());
    }

    #[test]
    fn test_guard_block_captures_panic() {
        let err = guard_block(2, || panic!("matcher exploded")).unwrap_err();
        match err {
            SearchError::WorkerFailed { block, message } => {
                assert_eq!(block, 2);
                assert_eq!(message, "matcher exploded");
            }
            other => panic!("unexpected error: {other}"),
        }

        let err = guard_block(0, || panic!("{} blocks", 3)).unwrap_err();
        assert!(matches!(err, SearchError::WorkerFailed { message, .. } if message == "3 blocks"));
    }
}
