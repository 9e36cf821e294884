use anyhow::Result;
use std::io::Write;

use crate::core::driver::{Distance, PairOutcome, PassReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Text,
    JsonLines,
}

/// Write every similar pair of `report` to `out`.
pub fn write_matches(out: &mut impl Write, report: &PassReport, format: Format) -> Result<()> {
    for outcome in report.matches() {
        match format {
            Format::Text => write_text(out, outcome)?,
            Format::JsonLines => writeln!(out, "{}", serde_json::to_string(outcome)?)?,
        }
    }
    Ok(())
}

fn write_text(out: &mut impl Write, outcome: &PairOutcome) -> Result<()> {
    writeln!(out, "Similar:")?;
    writeln!(out, "{}", outcome.previous.display())?;
    writeln!(out, "{}", outcome.current.display())?;
    match outcome.distance {
        Distance::Norm(_) => writeln!(out)?,
        Distance::Hamming { bits } => writeln!(out, "{}", bits)?,
    }
    Ok(())
}
