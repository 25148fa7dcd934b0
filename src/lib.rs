//! Decode marketplace inventory payloads, summarise their facets and export
//! embedded offers.
//!
//! The wire types live in `ticket-facets-model` and are re-exported here so
//! embedders only need this crate.

pub mod app_dirs;
pub mod capture;
pub mod event;
pub mod locate;
pub mod logging;
pub mod offers;
pub mod summary;

pub use capture::{CaptureEntry, DEFAULT_URL_FILTER, read_captures};
pub use event::{EventContext, event_id_from_url};
pub use locate::locate_offers;
pub use offers::{CsvExporter, OfferRow, RowContext};
pub use summary::{SummaryError, SummaryRules, derive_summary};
pub use ticket_facets_model::{
    ApiDocument, Charge, DecodeError, Embedded, Facet, FacetValue, FacetsResponse, Offer,
    ParsedData, Scalar, decode_document, decode_facets, decode_facets_reader, decode_facets_str,
    encode_facets,
};
