//! Flatten embedded offers into CSV rows.

mod export;
mod row;

pub use export::{CSV_HEADER, CsvExporter, RowContext, write_rows};
pub use row::OfferRow;
