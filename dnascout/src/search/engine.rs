use rayon::prelude::*;
use std::ops::Range;
use std::time::Instant;
use tracing::{debug, info, warn};

use super::matcher::{Algorithm, PatternMatcher};
use super::processor::{BlockOutput, BlockProcessor};
use crate::config::SearchConfig;
use crate::errors::{SearchError, SearchResult};
use crate::metrics::ScanMetrics;
use crate::records::{load_records, RowRejection, SequenceRecord};
use crate::results::{MatchResult, Report, RunStatistics};

/// Merged output of one dispatch
#[derive(Debug, Clone, Default)]
pub struct Dispatch {
    /// Matches in original record order
    pub matches: Vec<MatchResult>,
    /// Sum of every worker's counters
    pub metrics: ScanMetrics,
    /// Number of blocks that were actually run
    pub workers_used: usize,
}

/// A finished run: the report plus the rows the loader skipped
#[derive(Debug, Clone)]
pub struct SearchRun {
    pub report: Report,
    pub rejected: Vec<RowRejection>,
}

/// Splits `len` records into at most `requested` contiguous blocks whose
/// sizes differ by at most one. Non-positive requests count as 1; an empty
/// input yields no blocks.
pub fn partition(len: usize, requested: i64) -> Vec<Range<usize>> {
    if len == 0 {
        return Vec::new();
    }
    let requested = usize::try_from(requested).unwrap_or(0).max(1);
    let blocks = requested.min(len);
    let base = len / blocks;
    let remainder = len % blocks;

    let mut ranges = Vec::with_capacity(blocks);
    let mut start = 0;
    for block in 0..blocks {
        let size = base + usize::from(block < remainder);
        ranges.push(start..start + size);
        start += size;
    }
    ranges
}

/// Runs `matcher` over `records` on a fresh pool with one worker per block
/// and merges the block outputs in block order.
///
/// Workers only read the shared records and matcher and write to their own
/// [`BlockOutput`]. A worker that panics is reported after every block has
/// finished; the other blocks are unaffected.
pub fn dispatch(
    records: &[SequenceRecord],
    matcher: &PatternMatcher,
    requested_workers: i64,
) -> SearchResult<Dispatch> {
    let blocks = partition(records.len(), requested_workers);
    if blocks.is_empty() {
        debug!("No records to dispatch");
        return Ok(Dispatch {
            workers_used: 1,
            ..Default::default()
        });
    }

    debug!(
        "Dispatching {} records in {} blocks (requested {})",
        records.len(),
        blocks.len(),
        requested_workers
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(blocks.len())
        .thread_name(|i| format!("dnascout-worker-{}", i))
        .build()?;

    let processor = BlockProcessor::new(matcher);
    let outputs: Vec<SearchResult<BlockOutput>> = pool.install(|| {
        // one task per block; a block is never split between workers
        blocks
            .par_iter()
            .enumerate()
            .with_max_len(1)
            .map(|(block, range)| processor.process_block_guarded(block, &records[range.clone()]))
            .collect()
    });

    merge(outputs, blocks.len())
}

/// Concatenates block outputs in block order. The first failed block, if
/// any, is returned after all outputs have been looked at.
fn merge(outputs: Vec<SearchResult<BlockOutput>>, workers_used: usize) -> SearchResult<Dispatch> {
    let mut merged = Dispatch {
        workers_used,
        ..Default::default()
    };
    let mut first_failure: Option<SearchError> = None;

    for output in outputs {
        match output {
            Ok(block) => {
                merged.matches.extend(block.matches);
                merged.metrics += block.metrics;
            }
            Err(err) => {
                warn!("{}", err);
                first_failure.get_or_insert(err);
            }
        }
    }

    match first_failure {
        Some(err) => Err(err),
        None => Ok(merged),
    }
}

/// Matches `pattern` against already validated records and builds the report.
///
/// Timing covers matcher preprocessing, dispatch and merge.
pub fn run_search(
    records: &[SequenceRecord],
    algorithm: Algorithm,
    pattern: &str,
    requested_workers: i64,
) -> SearchResult<Report> {
    let start = Instant::now();

    let matcher = PatternMatcher::new(algorithm, pattern);
    let dispatch = dispatch(records, &matcher, requested_workers)?;

    let elapsed = start.elapsed();
    dispatch.metrics.log_stats();

    let statistics = RunStatistics {
        total_sequences: records.len(),
        elapsed_milliseconds: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
        workers_used: dispatch.workers_used,
        hash_collisions: dispatch.metrics.hash_collisions,
    };
    Ok(Report::new(algorithm, pattern, statistics, dispatch.matches))
}

/// Performs a full run: resolves the algorithm, loads and validates the
/// input, then searches it.
pub fn search(config: &SearchConfig) -> SearchResult<SearchRun> {
    let algorithm: Algorithm = config.algorithm.parse()?;
    info!(
        "Starting {} search for pattern {:?} in {}",
        algorithm,
        config.pattern,
        config.input_path.display()
    );

    let loaded = load_records(&config.input_path)?;
    let report = run_search(&loaded.records, algorithm, &config.pattern, config.thread_count)?;

    info!(
        "Search complete. {} of {} sequences matched using {} workers",
        report.match_count(),
        report.statistics().total_sequences,
        report.statistics().workers_used
    );

    Ok(SearchRun {
        report,
        rejected: loaded.rejected,
    })
}
