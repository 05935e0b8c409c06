//! Console rendering of match reports.
//!
//! Writer-generic so tests can render into a buffer. For each keyword: a
//! header line, then `<title> (<published>)` plus a link line per match, or a
//! single "no results" line. Keywords with zero matches are always rendered —
//! an empty section is information, not something to omit.

use crate::search::MatchReport;
use anyhow::Result;
use std::io::Write;

pub fn render_text(out: &mut impl Write, reports: &[MatchReport]) -> Result<()> {
    for report in reports {
        writeln!(out, "Results for \"{}\":", report.keyword)?;
        if report.is_empty() {
            writeln!(out, "  no results")?;
        } else {
            for entry in &report.matches {
                writeln!(out, "{} ({})", entry.title, entry.published)?;
                writeln!(out, "🔗 {}", entry.link)?;
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn render_json(out: &mut impl Write, reports: &[MatchReport]) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, reports)?;
    writeln!(out)?;
    Ok(())
}
