//! Exact matching and parallel dispatch.
//!
//! `kmp` and `rabin_karp` hold the two scan algorithms, `matcher` selects
//! between them, `processor` runs one block of records on a worker and
//! `engine` partitions the records, fans blocks out to a thread pool and
//! merges the results back in record order.
pub mod engine;
pub mod kmp;
pub mod matcher;
pub mod processor;
pub mod rabin_karp;

pub use engine::{dispatch, partition, run_search, search, Dispatch, SearchRun};
pub use kmp::kmp_search;
pub use matcher::{Algorithm, MatchOutcome, PatternMatcher};
pub use processor::BlockProcessor;
pub use rabin_karp::rabin_karp_search;
