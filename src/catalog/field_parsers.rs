//! Field parsing utilities for catalog rows.
//!
//! Pure functions that turn raw column text into typed values. None of them
//! fail: bad input degrades to a default and the caller decides whether to
//! warn about it.

use log::debug;

use crate::models::Category;

/// Outcome of reading a row's price columns
#[derive(Debug, Clone, PartialEq)]
pub enum PriceField {
    /// A usable price was found
    Parsed(f64),
    /// Neither price column has a value
    Missing,
    /// A value was present but is not a non-negative number
    Malformed(String),
}

impl PriceField {
    /// The price to store: the parsed value, otherwise zero
    pub fn value(&self) -> f64 {
        match self {
            PriceField::Parsed(price) => *price,
            PriceField::Missing | PriceField::Malformed(_) => 0.0,
        }
    }
}

/// Picks the first non-blank value among the alternate price columns.
///
/// `item-price` takes precedence over `price`.
pub fn pick_price_column<'a>(item_price: Option<&'a str>, price: Option<&'a str>) -> Option<&'a str> {
    [item_price, price]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|value| !value.is_empty())
}

/// Removes thousands separators from the whole-number part of a price.
///
/// Accepts both western ("24,999") and Indian ("1,24,999") grouping. Any
/// other comma placement, such as a decimal comma ("12,5"), is rejected.
fn strip_thousands_separators(price_str: &str) -> Option<String> {
    let (whole, fraction) = match price_str.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (price_str, None),
    };
    if fraction.is_some_and(|f| f.contains(',')) {
        return None;
    }

    let groups: Vec<&str> = whole.split(',').collect();
    let last = groups.len() - 1;
    let well_formed = groups.iter().enumerate().all(|(i, group)| {
        let len_ok = match i {
            0 => (1..=3).contains(&group.len()),
            i if i == last => group.len() == 3,
            _ => (2..=3).contains(&group.len()),
        };
        len_ok && group.bytes().all(|b| b.is_ascii_digit())
    });
    if !well_formed {
        return None;
    }

    let mut clean = groups.concat();
    if let Some(fraction) = fraction {
        clean.push('.');
        clean.push_str(fraction);
    }
    Some(clean)
}

/// Parses a price string with a dot decimal separator and optional
/// thousands separators.
///
/// # Returns
/// The price, or `None` when the text is not a finite, non-negative number.
pub fn parse_price(price_str: &str) -> Option<f64> {
    let trimmed = price_str.trim();
    let clean_price = if trimmed.contains(',') {
        strip_thousands_separators(trimmed)?
    } else {
        trimmed.to_string()
    };
    match clean_price.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Some(value),
        _ => None,
    }
}

/// Reads the price of a row from its two alternate price columns
pub fn read_price_field(item_price: Option<&str>, price: Option<&str>) -> PriceField {
    match pick_price_column(item_price, price) {
        None => PriceField::Missing,
        Some(raw) => match parse_price(raw) {
            Some(value) => PriceField::Parsed(value),
            None => PriceField::Malformed(raw.to_string()),
        },
    }
}

/// Classifies a free-text type value into a wardrobe category.
///
/// Returns the normalized (trimmed, lower-cased) text alongside so callers
/// can report what was not recognized.
pub fn classify_type(type_field: &str) -> (String, Option<Category>) {
    let normalized = type_field.trim().to_lowercase();
    let category = Category::parse(&normalized);
    if category.is_none() {
        debug!("Unrecognized apparel type: '{normalized}'");
    }
    (normalized, category)
}

#[cfg(test)]
#[path = "field_parsers_tests.rs"]
mod tests;
