//! Wire types for the marketplace inventory API.
//!
//! The facet types mirror the upstream JSON exactly so a decoded document
//! can be re-encoded without loss. Offer types are more forgiving since the
//! upstream is inconsistent about quoting numbers.

mod error;
mod facet;
mod offer;
mod parsed;
mod scalar;

pub use error::DecodeError;
pub use facet::{
    Facet, FacetValue, FacetsResponse, decode_facets, decode_facets_reader, decode_facets_str,
    encode_facets,
};
pub use offer::{ApiDocument, Charge, Embedded, Offer, decode_document, document_from_value};
pub use parsed::ParsedData;
pub use scalar::Scalar;
