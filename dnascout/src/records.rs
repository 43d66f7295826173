//! Loading and validation of `name,sequence` tables.
//!
//! Each input line holds exactly two comma-separated fields. Rows that do
//! not fit (wrong column count, empty fields, bases outside `ACGTN`) are
//! skipped with a warning instead of failing the batch; only an input that
//! cannot be opened at all is an error.
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info, trace, warn};

use crate::errors::{SearchError, SearchResult};

const BUFFER_CAPACITY: usize = 65536;
const FIELD_DELIMITER: char = ',';

/// Accepted bases after case normalization. `N` is an ambiguous base but is
/// compared literally.
pub const ALPHABET: [u8; 5] = *b"ACGTN";

/// A validated, uppercase sequence with its name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceRecord {
    pub name: String,
    pub sequence: String,
}

impl SequenceRecord {
    /// Builds a record from raw fields, applying the same rules as the loader.
    pub fn new(name: &str, sequence: &str) -> Result<Self, RejectReason> {
        let name = trim_field(name);
        let sequence = trim_field(sequence);
        if name.is_empty() || sequence.is_empty() {
            return Err(RejectReason::EmptyField);
        }

        let sequence = sequence.to_ascii_uppercase();
        if let Some((position, base)) = sequence
            .chars()
            .enumerate()
            .find(|&(_, c)| !c.is_ascii() || !ALPHABET.contains(&(c as u8)))
        {
            return Err(RejectReason::InvalidBase { base, position });
        }

        Ok(Self {
            name: name.to_string(),
            sequence,
        })
    }
}

/// Why a row was skipped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The row has no delimiter, so the sequence column is absent
    MissingColumn,
    /// The row has more than two fields
    TooManyColumns,
    /// Name or sequence is blank after trimming
    EmptyField,
    /// The sequence contains a character outside `ACGTN`
    InvalidBase { base: char, position: usize },
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::MissingColumn => write!(f, "missing second column"),
            RejectReason::TooManyColumns => write!(f, "more than 2 columns"),
            RejectReason::EmptyField => write!(f, "empty name or sequence"),
            RejectReason::InvalidBase { base, position } => write!(
                f,
                "invalid base {:?} at offset {} (allowed: A,C,G,T,N)",
                base, position
            ),
        }
    }
}

/// A skipped input row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowRejection {
    /// 1-based line number in the input
    pub line_number: usize,
    pub reason: RejectReason,
}

/// Output of the loader: accepted records in input order plus the rejected rows
#[derive(Debug, Clone, Default)]
pub struct LoadedRecords {
    pub records: Vec<SequenceRecord>,
    pub rejected: Vec<RowRejection>,
}

fn trim_field(field: &str) -> &str {
    field.trim_matches(|c| matches!(c, ' ' | '\t' | '\r' | '\n'))
}

fn strip_terminator(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

/// Parses one input line. Only an empty line (nothing before the terminator)
/// yields `Ok(None)`; whitespace-only lines are rejected like any other row
/// without a delimiter.
pub fn parse_line(line: &str) -> Result<Option<SequenceRecord>, RejectReason> {
    let line = strip_terminator(line);
    if line.is_empty() {
        return Ok(None);
    }

    let mut fields = line.split(FIELD_DELIMITER);
    let name = fields.next().unwrap_or_default();
    let sequence = fields.next().ok_or(RejectReason::MissingColumn)?;
    if fields.next().is_some() {
        return Err(RejectReason::TooManyColumns);
    }

    SequenceRecord::new(name, sequence).map(Some)
}

/// Reads and validates records from any buffered source.
pub fn parse_records<R: BufRead>(mut reader: R) -> SearchResult<LoadedRecords> {
    let mut loaded = LoadedRecords::default();
    let mut line_buffer = Vec::with_capacity(256);
    let mut line_number = 0;

    while reader.read_until(b'\n', &mut line_buffer)? > 0 {
        line_number += 1;
        let line = String::from_utf8_lossy(&line_buffer);

        match parse_line(&line) {
            Ok(Some(record)) => {
                trace!("Line {}: accepted record {}", line_number, record.name);
                loaded.records.push(record);
            }
            Ok(None) => trace!("Line {}: blank, skipping", line_number),
            Err(reason) => {
                warn!("Line {}: {}, skipping", line_number, reason);
                loaded.rejected.push(RowRejection {
                    line_number,
                    reason,
                });
            }
        }
        line_buffer.clear();
    }

    if loaded.records.is_empty() {
        warn!("No valid records left after validation");
    }
    debug!(
        "Parsed {} lines: {} accepted, {} rejected",
        line_number,
        loaded.records.len(),
        loaded.rejected.len()
    );
    Ok(loaded)
}

/// Opens `path` and loads its records. Fails only if the file cannot be read.
pub fn load_records(path: &Path) -> SearchResult<LoadedRecords> {
    info!("Loading records from {}", path.display());
    let file = File::open(path).map_err(|e| SearchError::from_io(path, e))?;
    parse_records(BufReader::with_capacity(BUFFER_CAPACITY, file))
}
