//! Numeric output for plotting consumers.

use anyhow::{Context, Result};
use aversa_core::Report;
use clap::ValueEnum;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// `# extinction_onset=N` comment line, then a `trial` column plus one column per series
    Csv,
    /// `{ extinction_onset, series: [{ label, values }] }`
    Json,
}

pub fn write_report<W: Write>(report: &Report, format: Format, out: W) -> Result<()> {
    match format {
        Format::Csv => write_csv(report, out),
        Format::Json => write_json(report, out),
    }
}

fn write_csv<W: Write>(report: &Report, mut out: W) -> Result<()> {
    writeln!(out, "# extinction_onset={}", report.extinction_onset)
        .context("Failed to write CSV preamble")?;
    let mut writer = csv::Writer::from_writer(out);

    let mut header = vec!["trial".to_string()];
    header.extend(report.series.iter().map(|s| s.label.clone()));
    writer.write_record(&header).context("Failed to write CSV header")?;

    for trial in 0..report.trials() {
        let mut row = vec![trial.to_string()];
        row.extend(report.series.iter().map(|s| s.values[trial].to_string()));
        writer.write_record(&row).context("Failed to write CSV row")?;
    }

    writer.flush().context("Failed to flush CSV output")?;
    Ok(())
}

fn write_json<W: Write>(report: &Report, mut out: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut out, report).context("Failed to serialize report")?;
    writeln!(out)?;
    Ok(())
}
