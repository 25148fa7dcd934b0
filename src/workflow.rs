use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use ticket_facets::offers::{CsvExporter, OfferRow, RowContext, write_rows};
use ticket_facets::{
    ApiDocument, EventContext, FacetsResponse, ParsedData, decode_facets_reader, derive_summary,
    locate_offers, read_captures,
};

use crate::cli::Command;
use crate::settings::ResolvedConfig;

const STDIO: &str = "-";

/// Result of running one subcommand, ready to be printed.
#[derive(Debug)]
pub(crate) enum Report {
    Facets(FacetsResponse),
    Summary(ParsedData),
    Export(ExportReport),
    Locate(Vec<String>),
}

/// Totals gathered while exporting a capture log.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct ExportReport {
    pub(crate) entries: usize,
    pub(crate) matched: usize,
    pub(crate) responses: usize,
    pub(crate) rows: usize,
    pub(crate) skipped: usize,
    pub(crate) output: PathBuf,
}

/// Return `true` when `command` streams CSV rows to stdout.
pub(crate) fn writes_rows_to_stdout(command: &Command, config: &ResolvedConfig) -> bool {
    matches!(command, Command::Export(_)) && config.output.as_os_str() == STDIO
}

/// Execute `command` against the resolved configuration.
pub(crate) fn run(command: &Command, config: &ResolvedConfig) -> Result<Report> {
    match command {
        Command::Facets(args) => read_facets(&args.input).map(Report::Facets),
        Command::Summary(args) => {
            let response = read_facets(&args.input.input)?;
            let summary = derive_summary(&response, &config.rules)
                .with_context(|| format!("failed to summarise {}", args.input.input.display()))?;
            Ok(Report::Summary(summary))
        }
        Command::Export(args) => {
            let reader = open_input(&args.capture)?;
            export(reader, config).map(Report::Export)
        }
        Command::Locate(args) => {
            let mut reader = open_input(&args.input)?;
            let mut text = String::new();
            reader
                .read_to_string(&mut text)
                .with_context(|| format!("failed to read {}", args.input.display()))?;
            let root: Value = serde_json::from_str(&text)
                .with_context(|| format!("{} is not valid JSON", args.input.display()))?;
            Ok(Report::Locate(locate_in(&root)))
        }
    }
}

fn read_facets(path: &Path) -> Result<FacetsResponse> {
    let reader = open_input(path)?;
    decode_facets_reader(reader)
        .with_context(|| format!("failed to decode facets from {}", path.display()))
}

/// Captured debug excerpts wrap the payload in a `data` key; scan inside it
/// when present.
fn locate_in(root: &Value) -> Vec<String> {
    match root.get("data") {
        Some(data) if data.is_object() || data.is_array() => locate_offers(data),
        _ => locate_offers(root),
    }
}

fn open_input(path: &Path) -> Result<Box<dyn BufRead>> {
    if path.as_os_str() == STDIO {
        return Ok(Box::new(io::stdin().lock()));
    }
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    Ok(Box::new(BufReader::new(file)))
}

/// Where exported rows end up.
enum RowSink {
    File(CsvExporter),
    Stdout { header_written: bool },
}

impl RowSink {
    fn for_path(path: &Path) -> Self {
        if path.as_os_str() == STDIO {
            Self::Stdout {
                header_written: false,
            }
        } else {
            Self::File(CsvExporter::new(path))
        }
    }

    fn write(&mut self, context: &RowContext, document: &ApiDocument) -> Result<usize> {
        match self {
            Self::File(exporter) => exporter.write_document(context, document),
            Self::Stdout { header_written } => {
                let rows: Vec<OfferRow> =
                    document.offers().iter().map(OfferRow::from_offer).collect();
                let written = write_rows(io::stdout().lock(), !*header_written, context, &rows)?;
                *header_written = true;
                Ok(written)
            }
        }
    }
}

fn export(reader: impl BufRead, config: &ResolvedConfig) -> Result<ExportReport> {
    let entries = read_captures(reader)?;
    let event = EventContext::new(config.event_url.as_deref(), config.event_name.as_deref());
    let mut sink = RowSink::for_path(&config.output);
    let mut report = ExportReport {
        entries: entries.len(),
        output: config.output.clone(),
        ..ExportReport::default()
    };

    for entry in entries.iter().filter(|entry| entry.matches(&config.url_filter)) {
        report.matched += 1;
        let document = match entry.document() {
            Ok(document) => document,
            Err(err) => {
                tracing::warn!(url = %entry.url, error = %err, "skipping undecodable capture");
                report.skipped += 1;
                continue;
            }
        };

        if !document.has_offers() {
            tracing::debug!(url = %entry.url, facets = document.facets.len(), "no embedded offers");
            continue;
        }

        tracing::info!(url = %entry.url, offers = document.offers().len(), "found detailed offers");
        let context = RowContext::now(event.clone());
        report.rows += sink.write(&context, &document)?;
        report.responses += 1;
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use clap::Parser;
    use serde_json::json;
    use tempfile::tempdir;
    use ticket_facets::SummaryRules;

    use super::*;

    fn config(output: PathBuf) -> ResolvedConfig {
        ResolvedConfig {
            rules: SummaryRules::default(),
            output,
            url_filter: "/api/".into(),
            event_url: Some("https://example.com/show/event/EV42".into()),
            event_name: Some("Big, Show".into()),
            log_filter: None,
        }
    }

    #[test]
    fn export_writes_matching_offers_and_skips_bad_entries() {
        let dir = tempdir().expect("tempdir");
        let output = dir.path().join("offers.csv");
        let log = [
            json!({"url": "https://example.com/api/offers", "data": {"_embedded": {"offer": [
                {"offerId": "o-1", "section": "101", "row": "A", "sellerNotes": "Aisle"},
                {"offerId": "o-2", "section": "102"}
            ]}}}),
            json!({"url": "https://example.com/api/facets", "data": {"facets": []}}),
            json!({"url": "https://example.com/api/broken", "data": {"facets": 7}}),
            json!({"url": "https://cdn.example.com/app.js", "data": {"_embedded": {"offer": [{}]}}}),
        ]
        .iter()
        .map(Value::to_string)
        .collect::<Vec<_>>()
        .join("\n");

        let report = export(log.as_bytes(), &config(output.clone())).expect("export");
        assert_eq!(report.entries, 4);
        assert_eq!(report.matched, 3);
        assert_eq!(report.responses, 1);
        assert_eq!(report.rows, 2);
        assert_eq!(report.skipped, 1);

        let content = fs::read_to_string(&output).expect("csv");
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains("\"EV42\",\"Big Show\",\"101\",\"A\""));
        assert!(lines[2].contains("\"o-2\""));
    }

    #[test]
    fn only_export_to_dash_streams_rows_to_stdout() {
        let export = crate::cli::CliArgs::parse_from(["ticket-facets", "export", "capture.jsonl"]);
        assert!(writes_rows_to_stdout(&export.command, &config(PathBuf::from("-"))));
        assert!(!writes_rows_to_stdout(&export.command, &config(PathBuf::from("out.csv"))));

        let facets = crate::cli::CliArgs::parse_from(["ticket-facets", "facets", "-"]);
        assert!(!writes_rows_to_stdout(&facets.command, &config(PathBuf::from("-"))));
    }

    #[test]
    fn locate_prefers_the_data_wrapper() {
        let root = json!({"url": "x", "data": {"list": [{"offerId": "o", "section": "s"}]}});
        assert_eq!(locate_in(&root), vec!["list.0"]);

        let bare = json!({"list": [{"offerId": "o", "section": "s"}]});
        assert_eq!(locate_in(&bare), vec!["list.0"]);
    }

    #[test]
    fn summary_reads_facets_from_a_file() {
        let dir = tempdir().expect("tempdir");
        let input = dir.path().join("facets.json");
        fs::write(
            &input,
            r#"{"facets":[{"name":"totalPrice","values":[{"count":12,"name":"150.0","id":"p1"}]}]}"#,
        )
        .expect("write");

        let mut config = config(dir.path().join("unused.csv"));
        config.rules = SummaryRules::default().with_price_facet("totalPrice");
        let command = Command::Summary(crate::cli::SummaryArgs {
            input: crate::cli::InputArgs { input },
            inventory_facet: None,
            resale_labels: None,
            price_facet: None,
            section_facet: None,
        });

        match run(&command, &config).expect("run") {
            Report::Summary(summary) => assert_eq!(summary.min_price, 150.0),
            other => panic!("unexpected report: {other:?}"),
        }
    }

    #[test]
    fn missing_input_names_the_path() {
        let command = Command::Facets(crate::cli::InputArgs {
            input: PathBuf::from("/definitely/not/here.json"),
        });
        let err = run(&command, &config(PathBuf::from("out.csv"))).expect_err("missing");
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }
}
