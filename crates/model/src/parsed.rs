use serde::{Deserialize, Serialize};

/// Denormalised view over a [`FacetsResponse`](crate::FacetsResponse).
///
/// Decoding never fills this in; it is produced by a separate derivation
/// step so the facet types stay a lossless mirror of the wire format.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParsedData {
    pub resale_count: u64,
    pub min_price: f64,
    pub sections: Vec<String>,
}
