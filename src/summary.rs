//! Derive a [`ParsedData`] summary from a decoded facets document.
//!
//! Which facets and labels carry meaning is a product decision, so every
//! name used by the fold comes from [`SummaryRules`] supplied by the caller.

use std::collections::HashSet;

use thiserror::Error;
use ticket_facets_model::{FacetsResponse, ParsedData};

/// Names used to map facets onto the summary fields.
///
/// The default value has no facet names and therefore derives an empty
/// summary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryRules {
    /// Facet whose values classify inventory (primary, resale, ...).
    pub inventory_facet: Option<String>,
    /// Inventory value names counted towards `resaleCount`, compared
    /// case-insensitively.
    pub resale_labels: Vec<String>,
    /// Facet whose value names are prices.
    pub price_facet: Option<String>,
    /// Facet whose value names are section labels.
    pub section_facet: Option<String>,
}

impl SummaryRules {
    #[must_use]
    pub fn with_inventory_facet(mut self, name: impl Into<String>) -> Self {
        self.inventory_facet = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_resale_label(mut self, label: impl Into<String>) -> Self {
        self.resale_labels.push(label.into());
        self
    }

    #[must_use]
    pub fn with_price_facet(mut self, name: impl Into<String>) -> Self {
        self.price_facet = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_section_facet(mut self, name: impl Into<String>) -> Self {
        self.section_facet = Some(name.into());
        self
    }

    fn is_resale(&self, label: &str) -> bool {
        self.resale_labels
            .iter()
            .any(|resale| resale.eq_ignore_ascii_case(label))
    }
}

/// Errors raised while folding facets into a summary.
#[derive(Debug, Error, PartialEq)]
pub enum SummaryError {
    /// A value in the price facet could not be read as a number.
    #[error("price facet '{facet}' has non-numeric value '{value}'")]
    InvalidPrice { facet: String, value: String },
}

/// Fold `response` into a [`ParsedData`] according to `rules`.
///
/// Facets that share a configured name are all considered. Prices with a
/// zero count are ignored; when no priced value remains `min_price` is `0.0`.
///
/// # Errors
///
/// Returns [`SummaryError::InvalidPrice`] when a price label is not a
/// finite number.
pub fn derive_summary(
    response: &FacetsResponse,
    rules: &SummaryRules,
) -> Result<ParsedData, SummaryError> {
    let mut summary = ParsedData::default();

    if let Some(name) = rules.inventory_facet.as_deref() {
        summary.resale_count = response
            .facets_named(name)
            .flat_map(|facet| facet.values.iter())
            .filter(|value| rules.is_resale(&value.name))
            .map(|value| value.count)
            .sum();
    }

    if let Some(name) = rules.price_facet.as_deref() {
        let mut min_price: Option<f64> = None;
        for value in response
            .facets_named(name)
            .flat_map(|facet| facet.values.iter())
            .filter(|value| value.count > 0)
        {
            let price = parse_price(&value.name).ok_or_else(|| SummaryError::InvalidPrice {
                facet: name.to_string(),
                value: value.name.clone(),
            })?;
            min_price = Some(min_price.map_or(price, |current| current.min(price)));
        }
        summary.min_price = min_price.unwrap_or_default();
    }

    if let Some(name) = rules.section_facet.as_deref() {
        let mut seen = HashSet::new();
        summary.sections = response
            .facets_named(name)
            .flat_map(|facet| facet.values.iter())
            .filter(|value| seen.insert(value.name.as_str()))
            .map(|value| value.name.clone())
            .collect();
    }

    tracing::debug!(
        resale_count = summary.resale_count,
        min_price = summary.min_price,
        sections = summary.sections.len(),
        "derived facet summary"
    );

    Ok(summary)
}

fn parse_price(label: &str) -> Option<f64> {
    let price = label.trim().parse::<f64>().ok()?;
    price.is_finite().then_some(price)
}
