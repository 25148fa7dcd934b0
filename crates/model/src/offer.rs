use serde::{Deserialize, Serialize};

use crate::error::DecodeError;
use crate::facet::{Facet, FacetsResponse};
use crate::scalar::Scalar;

/// Any captured inventory API payload: the facets summary plus the detailed
/// offers embedded alongside it.
///
/// Either part may be missing; many responses carry only one of them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiDocument {
    #[serde(default)]
    pub facets: Vec<Facet>,
    #[serde(
        rename = "_embedded",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub embedded: Option<Embedded>,
}

/// Resources embedded in an [`ApiDocument`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Embedded {
    #[serde(default)]
    pub offer: Vec<Offer>,
}

/// One purchasable listing as returned by the inventory API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offer_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listing_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<Scalar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row: Option<Scalar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seat_from: Option<Scalar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seat_to: Option<Scalar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sellable_quantities: Option<Vec<u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_price: Option<Scalar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_price: Option<Scalar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub face_value: Option<Scalar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charges: Option<Vec<Charge>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inventory_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seller_notes: Option<String>,
}

/// A fee line attached to an [`Offer`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Charge {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ApiDocument {
    /// Embedded offers, or an empty slice when the payload has none.
    #[must_use]
    pub fn offers(&self) -> &[Offer] {
        self.embedded
            .as_ref()
            .map(|embedded| embedded.offer.as_slice())
            .unwrap_or_default()
    }

    /// Return `true` when the payload carries detailed offers.
    #[must_use]
    pub fn has_offers(&self) -> bool {
        !self.offers().is_empty()
    }

    /// Copy the facets summary out as a standalone [`FacetsResponse`].
    #[must_use]
    pub fn facets_response(&self) -> FacetsResponse {
        FacetsResponse::new(self.facets.clone())
    }
}

/// Decode a captured API payload from raw bytes.
///
/// # Errors
///
/// Returns [`DecodeError`] when the input is not JSON or a known field has
/// the wrong type.
pub fn decode_document(bytes: &[u8]) -> Result<ApiDocument, DecodeError> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Decode a captured API payload from an already parsed JSON value.
///
/// # Errors
///
/// See [`decode_document`].
pub fn document_from_value(value: serde_json::Value) -> Result<ApiDocument, DecodeError> {
    Ok(serde_json::from_value(value)?)
}
