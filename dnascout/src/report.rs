//! Rendering of a [`Report`] into its textual JSON form.
//!
//! [`render_pretty`] produces the fixed, indented layout written by default;
//! [`render_compact`] is the single-line variant built with `serde_json`.
//! Both are pure functions of the report.
use std::fmt;

use crate::errors::SearchResult;
use crate::results::Report;

/// Escapes `"`, `\` and control characters below 0x20 for use inside a JSON
/// string literal. Everything else passes through unchanged.
pub fn escape_json(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 10);
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out
}

fn join_positions(positions: &[usize]) -> String {
    positions
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn write_pretty<W: fmt::Write>(out: &mut W, report: &Report) -> fmt::Result {
    let stats = report.statistics();

    writeln!(out, "{{")?;
    writeln!(out, "  \"success\": {},", report.success())?;
    writeln!(
        out,
        "  \"algorithm\": \"{}\",",
        escape_json(report.algorithm().name())
    )?;
    writeln!(out, "  \"pattern\": \"{}\",", escape_json(report.pattern()))?;
    writeln!(out, "  \"total_sequences\": {},", stats.total_sequences)?;
    writeln!(out, "  \"execution_time_ms\": {},", stats.elapsed_milliseconds)?;
    writeln!(out, "  \"threads_used\": {},", stats.workers_used)?;
    writeln!(out, "  \"hash_collisions\": {},", stats.hash_collisions)?;

    writeln!(out, "  \"matches\": [")?;
    let matches = report.matches();
    for (i, m) in matches.iter().enumerate() {
        writeln!(out, "    {{")?;
        writeln!(out, "      \"name\": \"{}\",", escape_json(&m.name))?;
        writeln!(out, "      \"positions\": [{}]", join_positions(&m.positions))?;
        let separator = if i + 1 < matches.len() { "," } else { "" };
        writeln!(out, "    }}{}", separator)?;
    }
    writeln!(out, "  ],")?;
    writeln!(out, "  \"match_count\": {}", report.match_count())?;
    writeln!(out, "}}")
}

/// Display adapter for the pretty layout
pub struct PrettyReport<'a>(pub &'a Report);

impl fmt::Display for PrettyReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_pretty(f, self.0)
    }
}

/// The default report layout: two-space indentation, each position list on
/// a single line, trailing newline.
pub fn render_pretty(report: &Report) -> String {
    PrettyReport(report).to_string()
}

/// Single-line JSON with the same fields and order as [`render_pretty`],
/// followed by a newline.
pub fn render_compact(report: &Report) -> SearchResult<String> {
    let mut out = serde_json::to_string(report)?;
    out.push('\n');
    Ok(out)
}
