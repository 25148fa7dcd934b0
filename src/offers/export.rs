use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use csv::{QuoteStyle, WriterBuilder};
use ticket_facets_model::ApiDocument;

use super::row::OfferRow;
use crate::event::EventContext;

/// Column names written at the top of a fresh export file.
pub const CSV_HEADER: [&str; 16] = [
    "Timestamp",
    "EventID",
    "EventName",
    "Section",
    "Row",
    "Seats",
    "Qty",
    "TotalPrice",
    "ListPrice",
    "FaceValue",
    "Currency",
    "TotalFees",
    "Type",
    "SellerNotes",
    "OfferID",
    "ListingID",
];

/// Values shared by every row exported from one captured response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowContext {
    pub timestamp: String,
    pub event: EventContext,
}

impl RowContext {
    /// Create a context with an explicit timestamp.
    #[must_use]
    pub fn new(timestamp: impl Into<String>, event: EventContext) -> Self {
        Self {
            timestamp: timestamp.into(),
            event,
        }
    }

    /// Create a context stamped with the current UTC time.
    #[must_use]
    pub fn now(event: EventContext) -> Self {
        Self::new(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true), event)
    }

    fn record<'a>(&'a self, row: &'a OfferRow, quantity: &'a str) -> [&'a str; 16] {
        [
            self.timestamp.as_str(),
            self.event.id.as_str(),
            self.event.name.as_str(),
            row.section.as_str(),
            row.row.as_str(),
            row.seats.as_str(),
            quantity,
            row.total_price.as_str(),
            row.list_price.as_str(),
            row.face_value.as_str(),
            row.currency.as_str(),
            row.total_fees.as_str(),
            row.inventory_type.as_str(),
            row.seller_notes.as_str(),
            row.offer_id.as_str(),
            row.listing_id.as_str(),
        ]
    }
}

/// Write `rows` as fully quoted CSV records, optionally preceded by the header.
///
/// # Errors
///
/// Returns an error if the underlying writer fails.
pub fn write_rows<W: Write>(
    writer: W,
    include_header: bool,
    context: &RowContext,
    rows: &[OfferRow],
) -> Result<usize> {
    let mut csv = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .has_headers(false)
        .from_writer(writer);

    if include_header {
        csv.write_record(CSV_HEADER)?;
    }

    for row in rows {
        let quantity = row.quantity.to_string();
        csv.write_record(context.record(row, &quantity))?;
    }

    csv.flush()?;
    Ok(rows.len())
}

/// Appends offer rows to a CSV file, writing the header only once.
#[derive(Debug, Clone)]
pub struct CsvExporter {
    path: PathBuf,
}

impl CsvExporter {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append `rows` to the export file.
    ///
    /// Nothing is written, and no file is created, when `rows` is empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or written.
    pub fn append(&self, context: &RowContext, rows: &[OfferRow]) -> Result<usize> {
        if rows.is_empty() {
            return Ok(0);
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("failed to open {}", self.path.display()))?;
        let is_new = file
            .metadata()
            .with_context(|| format!("failed to inspect {}", self.path.display()))?
            .len()
            == 0;

        let written = write_rows(file, is_new, context, rows)
            .with_context(|| format!("failed to write {}", self.path.display()))?;
        tracing::info!(rows = written, path = %self.path.display(), "appended offers");
        Ok(written)
    }

    /// Flatten and append every embedded offer in `document`.
    ///
    /// # Errors
    ///
    /// See [`CsvExporter::append`].
    pub fn write_document(&self, context: &RowContext, document: &ApiDocument) -> Result<usize> {
        let rows: Vec<OfferRow> = document.offers().iter().map(OfferRow::from_offer).collect();
        self.append(context, &rows)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;
    use ticket_facets_model::{Offer, decode_document};

    use super::*;

    fn context() -> RowContext {
        RowContext::new(
            "2025-01-02T03:04:05.678Z",
            EventContext::new(Some("https://example.com/event/ABC1"), Some("Show")),
        )
    }

    #[test]
    fn rows_are_fully_quoted_with_escaped_notes() {
        let offer = Offer {
            section: Some("101".into()),
            seller_notes: Some("Aisle \"seat\"".into()),
            ..Offer::default()
        };
        let mut buffer = Vec::new();
        write_rows(&mut buffer, false, &context(), &[OfferRow::from_offer(&offer)])
            .expect("write");

        let text = String::from_utf8(buffer).expect("utf8");
        assert_eq!(
            text,
            "\"2025-01-02T03:04:05.678Z\",\"ABC1\",\"Show\",\"101\",\"N/A\",\"N/A\",\"1\",\"N/A\",\"N/A\",\"N/A\",\"USD\",\"0.00\",\"primary\",\"Aisle \"\"seat\"\"\",\"N/A\",\"N/A\"\n"
        );
    }

    #[test]
    fn header_is_written_once() {
        let dir = tempdir().expect("tempdir");
        let exporter = CsvExporter::new(dir.path().join("offers.csv"));
        let rows = vec![OfferRow::from_offer(&Offer::default())];

        assert_eq!(exporter.append(&context(), &rows).expect("first"), 1);
        assert_eq!(exporter.append(&context(), &rows).expect("second"), 1);

        let content = fs::read_to_string(exporter.path()).expect("read");
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("\"Timestamp\",\"EventID\""));
        assert_eq!(content.matches("\"Timestamp\"").count(), 1);
    }

    #[test]
    fn empty_rows_do_not_create_a_file() {
        let dir = tempdir().expect("tempdir");
        let exporter = CsvExporter::new(dir.path().join("offers.csv"));
        assert_eq!(exporter.append(&context(), &[]).expect("append"), 0);
        assert!(!exporter.path().exists());
    }

    #[test]
    fn documents_without_offers_write_nothing() {
        let dir = tempdir().expect("tempdir");
        let exporter = CsvExporter::new(dir.path().join("offers.csv"));
        let document = decode_document(br#"{"facets":[{"name":"section","values":[]}]}"#)
            .expect("decode");
        assert_eq!(exporter.write_document(&context(), &document).expect("write"), 0);
        assert!(!exporter.path().exists());
    }

    #[test]
    fn now_uses_millisecond_utc_timestamps() {
        let context = RowContext::now(EventContext::default());
        assert!(context.timestamp.ends_with('Z'));
        assert_eq!(context.timestamp.len(), "2025-01-02T03:04:05.678Z".len());
    }
}
