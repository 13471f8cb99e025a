use std::sync::OnceLock;

use chrono::{NaiveTime, Timelike};
use regex::Regex;

use super::super::domain::Receipt;
use super::{CalculationError, PointsRule, ScoreComponent};

const ROUND_DOLLAR_POINTS: u64 = 50;
const QUARTER_MULTIPLE_POINTS: u64 = 25;
const POINTS_PER_ITEM_PAIR: u64 = 5;
const DESCRIPTION_PRICE_MULTIPLIER: f64 = 0.2;
const ODD_DAY_POINTS: u64 = 6;
const AFTERNOON_POINTS: u64 = 10;

const AFTERNOON_START_MINUTE: u32 = 14 * 60;
const AFTERNOON_END_MINUTE: u32 = 16 * 60;

/// Count ASCII letters and digits; everything else is ignored.
pub fn count_alphanumeric_characters(value: &str) -> usize {
    value.chars().filter(char::is_ascii_alphanumeric).count()
}

fn time_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // chrono alone skips leading spaces and takes one-digit minutes.
    PATTERN.get_or_init(|| Regex::new(r"^[0-9]{1,2}:[0-9]{2}$").expect("static time pattern"))
}

/// Whether a 24-hour `HH:MM` time falls strictly between 14:00 and 16:00.
///
/// A single-digit hour such as `9:30` is accepted; minutes always take two digits.
pub fn is_time_between_two_and_four(raw: &str) -> Result<bool, CalculationError> {
    if !time_pattern().is_match(raw) {
        return Err(CalculationError::InvalidTime {
            value: raw.to_string(),
            source: None,
        });
    }
    let time =
        NaiveTime::parse_from_str(raw, "%H:%M").map_err(|source| CalculationError::InvalidTime {
            value: raw.to_string(),
            source: Some(source),
        })?;

    let minute_of_day = time.hour() * 60 + time.minute();
    Ok(minute_of_day > AFTERNOON_START_MINUTE && minute_of_day < AFTERNOON_END_MINUTE)
}

/// Day taken from the raw characters after `yyyy-mm-`, if it is odd. Anything unparseable is even.
fn odd_purchase_day(purchase_date: &str) -> Option<i64> {
    purchase_date
        .get(8..)
        .and_then(|day| day.parse::<i64>().ok())
        .filter(|day| day % 2 == 1)
}

pub(crate) fn score_components(
    receipt: &Receipt,
    total: f64,
    prices: &[f64],
    afternoon: bool,
) -> Result<Vec<ScoreComponent>, CalculationError> {
    let mut components = Vec::new();

    let alphanumeric = count_alphanumeric_characters(&receipt.retailer) as u64;
    if alphanumeric > 0 {
        components.push(ScoreComponent {
            rule: PointsRule::RetailerName,
            points: alphanumeric,
            notes: format!(
                "{alphanumeric} alphanumeric character(s) in `{}`",
                receipt.retailer
            ),
        });
    }

    if total == total.trunc() {
        components.push(ScoreComponent {
            rule: PointsRule::RoundDollarTotal,
            points: ROUND_DOLLAR_POINTS,
            notes: format!("total {total:.2} has no cents"),
        });
    }

    if total % 0.25 == 0.0 {
        components.push(ScoreComponent {
            rule: PointsRule::QuarterMultipleTotal,
            points: QUARTER_MULTIPLE_POINTS,
            notes: format!("total {total:.2} is a multiple of 0.25"),
        });
    }

    let pairs = (receipt.items.len() / 2) as u64;
    if pairs > 0 {
        components.push(ScoreComponent {
            rule: PointsRule::ItemPairs,
            points: pairs * POINTS_PER_ITEM_PAIR,
            notes: format!("{pairs} pair(s) across {} item(s)", receipt.items.len()),
        });
    }

    for (item, price) in receipt.items.iter().zip(prices) {
        let trimmed = item.short_description.trim();
        if trimmed.len() % 3 != 0 {
            continue;
        }
        let bonus = (price * DESCRIPTION_PRICE_MULTIPLIER).ceil();
        // `as u64` saturates, so anything at or past 2^64 has to be caught first.
        if bonus >= u64::MAX as f64 {
            return Err(CalculationError::PointsOverflow);
        }
        let points = bonus as u64;
        if points > 0 {
            components.push(ScoreComponent {
                rule: PointsRule::ItemDescription,
                points,
                notes: format!(
                    "`{trimmed}` has length {} and price {price:.2}",
                    trimmed.len()
                ),
            });
        }
    }

    if let Some(day) = odd_purchase_day(&receipt.purchase_date) {
        components.push(ScoreComponent {
            rule: PointsRule::OddPurchaseDay,
            points: ODD_DAY_POINTS,
            notes: format!("purchased on odd day {day}"),
        });
    }

    if afternoon {
        components.push(ScoreComponent {
            rule: PointsRule::AfternoonPurchase,
            points: AFTERNOON_POINTS,
            notes: format!("purchased at {}", receipt.purchase_time),
        });
    }

    Ok(components)
}
