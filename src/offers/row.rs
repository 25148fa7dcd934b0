use ticket_facets_model::{Offer, Scalar};

const MISSING: &str = "N/A";
const DEFAULT_CURRENCY: &str = "USD";
const DEFAULT_INVENTORY_TYPE: &str = "primary";

/// An [`Offer`] flattened into the cells of one export row.
#[derive(Debug, Clone, PartialEq)]
pub struct OfferRow {
    pub section: String,
    pub row: String,
    pub seats: String,
    pub quantity: u32,
    pub total_price: String,
    pub list_price: String,
    pub face_value: String,
    pub currency: String,
    pub total_fees: String,
    pub inventory_type: String,
    pub seller_notes: String,
    pub offer_id: String,
    pub listing_id: String,
}

impl OfferRow {
    /// Flatten `offer`, filling absent fields with their export defaults.
    #[must_use]
    pub fn from_offer(offer: &Offer) -> Self {
        let seat_from = present(offer.seat_from.as_ref());
        let seat_to = present(offer.seat_to.as_ref());

        let seats = match (seat_from, seat_to) {
            (Some(from), Some(to)) => format!("{from}-{to}"),
            (Some(from), None) => from.to_string(),
            _ => MISSING.to_string(),
        };

        Self {
            section: scalar_or_missing(offer.section.as_ref()),
            row: scalar_or_missing(offer.row.as_ref()),
            seats,
            quantity: quantity(offer, seat_from, seat_to),
            total_price: scalar_or_missing(offer.total_price.as_ref()),
            list_price: scalar_or_missing(offer.list_price.as_ref()),
            face_value: scalar_or_missing(offer.face_value.as_ref()),
            currency: text_or(offer.currency.as_deref(), DEFAULT_CURRENCY),
            total_fees: format!("{:.2}", fees(offer)),
            inventory_type: text_or(offer.inventory_type.as_deref(), DEFAULT_INVENTORY_TYPE),
            seller_notes: offer.seller_notes.clone().unwrap_or_default(),
            offer_id: text_or(offer.offer_id.as_deref(), MISSING),
            listing_id: text_or(offer.listing_id.as_deref(), MISSING),
        }
    }
}

fn present(value: Option<&Scalar>) -> Option<&Scalar> {
    value.filter(|value| !value.is_blank())
}

fn scalar_or_missing(value: Option<&Scalar>) -> String {
    present(value).map_or_else(|| MISSING.to_string(), Scalar::to_string)
}

fn text_or(value: Option<&str>, default: &str) -> String {
    value
        .filter(|text| !text.trim().is_empty())
        .unwrap_or(default)
        .to_string()
}

/// Largest sellable bundle, else the size of the seat range, else one.
fn quantity(offer: &Offer, seat_from: Option<&Scalar>, seat_to: Option<&Scalar>) -> u32 {
    if let Some(max) = offer
        .sellable_quantities
        .as_deref()
        .and_then(|quantities| quantities.iter().copied().max())
    {
        return max;
    }

    let range = seat_from
        .and_then(Scalar::leading_integer)
        .zip(seat_to.and_then(Scalar::leading_integer))
        .filter(|(from, to)| to >= from)
        .and_then(|(from, to)| to.checked_sub(from)?.checked_add(1))
        .and_then(|span| u32::try_from(span).ok());

    range.unwrap_or(1)
}

/// Sum of the listed charges, or the gap between total and list price.
fn fees(offer: &Offer) -> f64 {
    if let Some(charges) = &offer.charges {
        return charges.iter().filter_map(|charge| charge.amount).sum();
    }

    let total = present(offer.total_price.as_ref()).and_then(Scalar::as_f64);
    let list = present(offer.list_price.as_ref()).and_then(Scalar::as_f64);
    match (total, list) {
        (Some(total), Some(list)) => total - list,
        _ => 0.0,
    }
}
