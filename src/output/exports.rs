use serde::Serialize;
use std::io::Write;

use crate::config::OutputFormat;
use crate::error::Result;
use crate::records::{PipelineRun, Project};

use super::tables::{projects_table, run_table};

/// Result of one command, ready to be written out.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Report {
    Projects(Vec<Project>),
    Run(PipelineRun),
}

/// Writes a report as JSON (compact or pretty) or as a table.
///
/// JSON of a project listing is an array even when it is empty, so scripts
/// can always iterate the result.
pub fn export_report(
    report: &Report,
    format: OutputFormat,
    pretty: bool,
    output: &mut dyn Write,
) -> Result<()> {
    match format {
        OutputFormat::Json => export_json(report, pretty, output),
        OutputFormat::Table => export_table(report, output),
    }
}

fn export_json(report: &Report, pretty: bool, output: &mut dyn Write) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(report)?
    } else {
        serde_json::to_string(report)?
    };
    writeln!(output, "{json}")?;
    Ok(())
}

fn export_table(report: &Report, output: &mut dyn Write) -> Result<()> {
    let table = match report {
        Report::Projects(projects) => projects_table(projects),
        Report::Run(run) => run_table(run),
    };
    writeln!(output, "{table}")?;
    Ok(())
}
