pub mod config;
pub mod errors;
pub mod metrics;
pub mod records;
pub mod report;
pub mod results;
pub mod search;

pub use config::{CliOverrides, OutputFormat, SearchConfig};
pub use errors::{SearchError, SearchResult};
pub use records::{load_records, LoadedRecords, RejectReason, RowRejection, SequenceRecord};
pub use report::{escape_json, render_compact, render_pretty, PrettyReport};
pub use results::{MatchResult, Report, RunStatistics};
pub use search::{search, Algorithm};
