use std::fmt::Write;

use anyhow::Result;
use serde_json::json;
use ticket_facets::{FacetsResponse, ParsedData};

use super::OutputFormat;
use crate::workflow::{ExportReport, Report};

/// Render the report in the requested format, newline terminated.
pub(crate) fn render(report: &Report, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Plain => Ok(format_plain(report)),
        OutputFormat::Json => {
            let mut text = format_json(report)?;
            text.push('\n');
            Ok(text)
        }
    }
}

pub(crate) fn format_plain(report: &Report) -> String {
    match report {
        Report::Facets(response) => format_facets(response),
        Report::Summary(summary) => format_summary(summary),
        Report::Export(export) => format_export(export),
        Report::Locate(paths) => {
            if paths.is_empty() {
                return "No offers found\n".to_string();
            }
            let mut out = String::new();
            for path in paths {
                let shown = if path.is_empty() { "(root)" } else { path.as_str() };
                let _ = writeln!(out, "{shown}");
            }
            out
        }
    }
}

fn format_facets(response: &FacetsResponse) -> String {
    if response.is_empty() {
        return "No facets\n".to_string();
    }

    let mut out = String::new();
    for facet in &response.facets {
        let _ = writeln!(
            out,
            "{} ({} values, {} total)",
            facet.name,
            facet.values.len(),
            facet.total_count()
        );
        let width = facet
            .values
            .iter()
            .map(|value| value.name.chars().count())
            .max()
            .unwrap_or(0);
        for value in &facet.values {
            let _ = write!(out, "  {:<width$}  {:>6}", value.name, value.count);
            if let Some(id) = &value.id {
                let _ = write!(out, "  [{id}]");
            }
            out.push('\n');
        }
    }
    out
}

fn format_summary(summary: &ParsedData) -> String {
    let sections = if summary.sections.is_empty() {
        "(none)".to_string()
    } else {
        summary.sections.join(", ")
    };
    format!(
        "Resale count: {}\nMinimum price: {:.2}\nSections: {}\n",
        summary.resale_count, summary.min_price, sections
    )
}

fn format_export(report: &ExportReport) -> String {
    format!(
        "Read {} capture entries ({} matched, {} skipped)\nExported {} rows from {} responses to {}\n",
        report.entries,
        report.matched,
        report.skipped,
        report.rows,
        report.responses,
        report.output.display()
    )
}

/// Format the report as a pretty-printed JSON string.
pub(crate) fn format_json(report: &Report) -> Result<String> {
    let payload = match report {
        Report::Facets(response) => serde_json::to_value(response)?,
        Report::Summary(summary) => serde_json::to_value(summary)?,
        Report::Export(export) => serde_json::to_value(export)?,
        Report::Locate(paths) => json!({ "paths": paths }),
    };
    Ok(serde_json::to_string_pretty(&payload)?)
}
