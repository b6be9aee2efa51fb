//! Exact ingredient quantities.
//!
//! Quantities are kept as fractions so "1/3 cup" plus "1/3 cup" is exactly
//! "2/3 cup". On the wire they are written as text such as `"1 1/2"`; numbers
//! and text are both accepted on read.

use fraction::{CheckedAdd, Fraction};
use serde::Serializer;

/// Parse a quantity.
///
/// Accepts whole numbers (`"2"`), decimals (`"0.5"`), plain fractions
/// (`"1/4"`) and mixed fractions (`"1 1/2"`). Signs, exponents and values
/// that do not fit in a `u64` fraction are rejected.
pub fn parse_quantity(raw: &str) -> Option<Fraction> {
    let parts: Vec<&str> = raw.split_whitespace().collect();
    match parts.as_slice() {
        [single] => parse_part(single),
        [whole, fractional] if fractional.contains('/') && !whole.contains('/') => {
            parse_part(whole)?.checked_add(&parse_part(fractional)?)
        }
        _ => None,
    }
}

fn parse_part(part: &str) -> Option<Fraction> {
    if part.is_empty() || !part.chars().all(|c| c.is_ascii_digit() || c == '.' || c == '/') {
        return None;
    }
    match part.split_once('/') {
        Some((numer, denom)) => {
            let numer: u64 = numer.parse().ok()?;
            let denom: u64 = denom.parse().ok()?;
            (denom != 0).then(|| Fraction::new(numer, denom))
        }
        None => part.parse::<Fraction>().ok().filter(|q| q.numer().is_some()),
    }
}

/// Human readable quantity: `"2"`, `"1/2"` or `"1 1/2"`.
pub fn format_quantity(quantity: &Fraction) -> String {
    let (Some(&numer), Some(&denom)) = (quantity.numer(), quantity.denom()) else {
        return quantity.to_string();
    };
    let whole = numer / denom;
    let remainder = numer % denom;
    match (whole, remainder) {
        (_, 0) => whole.to_string(),
        (0, _) => format!("{remainder}/{denom}"),
        _ => format!("{whole} {remainder}/{denom}"),
    }
}

/// Sum two quantities. `None` when the exact result does not fit.
pub fn add_quantities(a: &Fraction, b: &Fraction) -> Option<Fraction> {
    a.checked_add(b)
}

/// `serialize_with` helper writing an optional quantity as text.
pub fn serialize<S: Serializer>(quantity: &Option<Fraction>, serializer: S) -> Result<S::Ok, S::Error> {
    match quantity {
        Some(quantity) => serializer.serialize_str(&format_quantity(quantity)),
        None => serializer.serialize_none(),
    }
}
