use std::fmt;

use serde::{Deserialize, Serialize};

/// A loosely typed upstream field that may arrive as either a string or a number.
///
/// Offer payloads are inconsistent about whether seats, rows and prices are
/// quoted, so the raw text is kept and interpreted on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(serde_json::Number),
    Text(String),
}

impl Scalar {
    /// Return `true` for empty or whitespace-only text.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Number(_) => false,
            Self::Text(text) => text.trim().is_empty(),
        }
    }

    /// Interpret the value as a floating point number.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            Self::Number(number) => number.as_f64()?,
            Self::Text(text) => text.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }

    /// Parse the leading integer of the value, ignoring any trailing suffix.
    ///
    /// `"12A"` yields `12`; text without leading digits yields `None`.
    #[must_use]
    pub fn leading_integer(&self) -> Option<i64> {
        match self {
            Self::Number(number) => number
                .as_i64()
                .or_else(|| number.as_f64().map(|value| value.trunc() as i64)),
            Self::Text(text) => {
                let text = text.trim_start();
                let (sign, digits) = match text.strip_prefix('-') {
                    Some(rest) => (-1, rest),
                    None => (1, text.strip_prefix('+').unwrap_or(text)),
                };
                let end = digits
                    .find(|ch: char| !ch.is_ascii_digit())
                    .unwrap_or(digits.len());
                digits[..end].parse::<i64>().ok().map(|value| sign * value)
            }
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(number) => write!(f, "{number}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_strings_and_numbers() {
        let values: Vec<Scalar> = serde_json::from_str(r#"["12", 12, 99.5]"#).expect("decode");
        assert_eq!(values[0], Scalar::from("12"));
        assert_eq!(values[1], Scalar::from(12_i64));
        assert_eq!(values[2].to_string(), "99.5");
    }

    #[test]
    fn leading_integer_stops_at_suffix() {
        assert_eq!(Scalar::from("12A").leading_integer(), Some(12));
        assert_eq!(Scalar::from(" 7").leading_integer(), Some(7));
        assert_eq!(Scalar::from("-3").leading_integer(), Some(-3));
        assert_eq!(Scalar::from("GA").leading_integer(), None);
        assert_eq!(Scalar::from(4_i64).leading_integer(), Some(4));
    }

    #[test]
    fn as_f64_rejects_non_numeric_text() {
        assert_eq!(Scalar::from("150.25").as_f64(), Some(150.25));
        assert_eq!(Scalar::from("free").as_f64(), None);
        assert_eq!(Scalar::from("NaN").as_f64(), None);
    }

    #[test]
    fn blank_text_is_detected() {
        assert!(Scalar::from("  ").is_blank());
        assert!(!Scalar::from("A").is_blank());
        assert!(!Scalar::from(0_i64).is_blank());
    }
}
