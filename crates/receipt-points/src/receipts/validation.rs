use std::sync::OnceLock;

use regex::Regex;

use super::domain::{parse_amount, Receipt};

/// Reasons a submitted receipt is rejected as an invalid payload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
    #[error("receipt must contain at least one item")]
    NoItems,
    #[error("purchaseDate `{0}` is not in yyyy-mm-dd format")]
    MalformedDate(String),
    #[error("total `{0}` is not a decimal number")]
    InvalidTotal(String),
    #[error("item {index} is missing required field `{field}`")]
    MissingItemField { index: usize, field: &'static str },
    #[error("item {index} price `{value}` is not a non-negative decimal number")]
    InvalidPrice { index: usize, value: String },
}

fn date_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // ASCII digits only; `\d` would also admit other Unicode digits.
    PATTERN.get_or_init(|| {
        Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("static date pattern")
    })
}

/// Shape check for `yyyy-mm-dd`. Calendar plausibility is not checked.
pub fn is_valid_date_format(date: &str) -> bool {
    date_pattern().is_match(date)
}

/// Check a receipt before scoring, stopping at the first problem found.
pub fn validate(receipt: &Receipt) -> Result<(), ValidationError> {
    let required = [
        ("retailer", &receipt.retailer),
        ("purchaseDate", &receipt.purchase_date),
        ("purchaseTime", &receipt.purchase_time),
        ("total", &receipt.total),
    ];
    for (field, value) in required {
        if value.is_empty() {
            return Err(ValidationError::MissingField(field));
        }
    }
    if receipt.items.is_empty() {
        return Err(ValidationError::NoItems);
    }

    if !is_valid_date_format(&receipt.purchase_date) {
        return Err(ValidationError::MalformedDate(receipt.purchase_date.clone()));
    }

    if parse_amount(&receipt.total).is_none() {
        return Err(ValidationError::InvalidTotal(receipt.total.clone()));
    }

    for (index, item) in receipt.items.iter().enumerate() {
        if item.short_description.is_empty() {
            return Err(ValidationError::MissingItemField {
                index,
                field: "shortDescription",
            });
        }
        if item.price.is_empty() {
            return Err(ValidationError::MissingItemField {
                index,
                field: "price",
            });
        }
        match parse_amount(&item.price) {
            Some(price) if price >= 0.0 => {}
            _ => {
                return Err(ValidationError::InvalidPrice {
                    index,
                    value: item.price.clone(),
                })
            }
        }
    }

    Ok(())
}
