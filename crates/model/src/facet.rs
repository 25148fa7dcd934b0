use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::error::DecodeError;

/// Top-level facets payload returned by the marketplace inventory API.
///
/// Facets keep the order in which the upstream response listed them and
/// names are not required to be unique.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FacetsResponse {
    #[serde(default)]
    pub facets: Vec<Facet>,
}

/// One named grouping of inventory counts, e.g. `inventoryType`, `section`
/// or `totalPrice`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Facet {
    pub name: String,
    #[serde(default)]
    pub values: Vec<FacetValue>,
}

/// A single count within a [`Facet`].
///
/// The meaning of `name` depends on the owning facet: an inventory label
/// such as `resale`, a section label, or a stringified price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetValue {
    pub count: u64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl FacetsResponse {
    /// Create a response from the provided facets.
    #[must_use]
    pub fn new(facets: Vec<Facet>) -> Self {
        Self { facets }
    }

    /// Iterate over every facet carrying `name`, in document order.
    pub fn facets_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Facet> + 'a {
        self.facets.iter().filter(move |facet| facet.name == name)
    }

    /// Return `true` when the document carries no facets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.facets.is_empty()
    }
}

impl Facet {
    /// Create a [`Facet`] with the provided `name` and `values`.
    #[must_use]
    pub fn new(name: impl Into<String>, values: Vec<FacetValue>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Sum of the counts across all values in this facet.
    #[must_use]
    pub fn total_count(&self) -> u64 {
        self.values.iter().map(|value| value.count).sum()
    }
}

impl FacetValue {
    /// Create a [`FacetValue`] without an identifier.
    #[must_use]
    pub fn new(name: impl Into<String>, count: u64) -> Self {
        Self {
            count,
            name: name.into(),
            id: None,
        }
    }

    /// Attach an upstream identifier.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// Decode a facets document from raw bytes.
///
/// # Errors
///
/// Returns [`DecodeError`] when the input is not JSON or a field has the
/// wrong type. A missing `facets` or `values` array is not an error.
pub fn decode_facets(bytes: &[u8]) -> Result<FacetsResponse, DecodeError> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Decode a facets document from a string slice.
///
/// # Errors
///
/// See [`decode_facets`].
pub fn decode_facets_str(input: &str) -> Result<FacetsResponse, DecodeError> {
    Ok(serde_json::from_str(input)?)
}

/// Decode a facets document from any reader.
///
/// # Errors
///
/// See [`decode_facets`]. Read failures surface as [`DecodeError::Io`].
pub fn decode_facets_reader(reader: impl Read) -> Result<FacetsResponse, DecodeError> {
    Ok(serde_json::from_reader(reader)?)
}

/// Encode a facets document back to compact JSON.
///
/// # Errors
///
/// Serialisation of these types cannot fail in practice; the error is
/// surfaced rather than unwrapped.
pub fn encode_facets(response: &FacetsResponse) -> Result<String, serde_json::Error> {
    serde_json::to_string(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_decodes_to_no_facets() {
        let response = decode_facets(b"{}").expect("decode");
        assert!(response.is_empty());
    }

    #[test]
    fn missing_values_decode_to_empty_list() {
        let response = decode_facets_str(r#"{"facets":[{"name":"section"}]}"#).expect("decode");
        assert_eq!(response.facets, vec![Facet::new("section", Vec::new())]);
    }

    #[test]
    fn total_price_example_decodes_field_for_field() {
        let response = decode_facets_str(
            r#"{"facets":[{"name":"totalPrice","values":[{"count":12,"name":"150.0","id":"p1"}]}]}"#,
        )
        .expect("decode");

        assert_eq!(response.facets.len(), 1);
        let facet = &response.facets[0];
        assert_eq!(facet.name, "totalPrice");
        assert_eq!(facet.values, vec![FacetValue::new("150.0", 12).with_id("p1")]);
    }

    #[test]
    fn string_count_is_rejected() {
        let err = decode_facets_str(
            r#"{"facets":[{"name":"section","values":[{"count":"not-a-number","name":"Section 101"}]}]}"#,
        )
        .expect_err("count must be an integer");
        assert!(err.is_shape());
    }

    #[test]
    fn negative_count_is_rejected() {
        let err = decode_facets_str(
            r#"{"facets":[{"name":"section","values":[{"count":-1,"name":"Section 101"}]}]}"#,
        )
        .expect_err("count must be non-negative");
        assert!(err.is_shape());
    }

    #[test]
    fn missing_value_name_is_rejected() {
        let err = decode_facets_str(r#"{"facets":[{"name":"section","values":[{"count":3}]}]}"#)
            .expect_err("name is required");
        assert!(err.is_shape());
    }

    #[test]
    fn malformed_json_is_rejected() {
        let err = decode_facets(b"{\"facets\": [").expect_err("truncated");
        assert!(err.is_syntax());
    }

    #[test]
    fn absent_id_is_omitted_on_encode() {
        let response = decode_facets_str(
            r#"{"facets":[{"name":"inventoryType","values":[{"count":5,"name":"resale"}]}]}"#,
        )
        .expect("decode");
        assert_eq!(response.facets[0].values[0].id, None);

        let encoded = encode_facets(&response).expect("encode");
        assert!(!encoded.contains("\"id\""));
        assert_eq!(
            encoded,
            r#"{"facets":[{"name":"inventoryType","values":[{"count":5,"name":"resale"}]}]}"#
        );
    }

    #[test]
    fn order_is_preserved_through_a_round_trip() {
        let response = FacetsResponse::new(vec![
            Facet::new(
                "section",
                vec![
                    FacetValue::new("Section 201", 4),
                    FacetValue::new("Section 101", 9).with_id("s101"),
                ],
            ),
            Facet::new("inventoryType", vec![FacetValue::new("resale", 2)]),
            Facet::new("section", Vec::new()),
        ]);

        let encoded = encode_facets(&response).expect("encode");
        let decoded = decode_facets_str(&encoded).expect("decode");
        assert_eq!(decoded, response);
        assert_eq!(decoded.facets_named("section").count(), 2);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let response = decode_facets_str(
            r#"{"meta":{"page":1},"facets":[{"name":"section","extra":true,"values":[{"count":1,"name":"A","color":"red"}]}]}"#,
        )
        .expect("decode");
        assert_eq!(response.facets[0].total_count(), 1);
    }

    #[test]
    fn reader_input_decodes() {
        let input = br#"{"facets":[{"name":"section","values":[{"count":2,"name":"A"},{"count":3,"name":"B"}]}]}"#;
        let response = decode_facets_reader(&input[..]).expect("decode");
        assert_eq!(response.facets[0].total_count(), 5);
    }
}
