mod rules;

pub use rules::{count_alphanumeric_characters, is_time_between_two_and_four};

use serde::{Deserialize, Serialize};

use super::domain::{parse_amount, Receipt};

/// The fixed set of loyalty rules. Every rule is additive and independent of the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointsRule {
    RetailerName,
    RoundDollarTotal,
    QuarterMultipleTotal,
    ItemPairs,
    ItemDescription,
    OddPurchaseDay,
    AfternoonPurchase,
}

impl PointsRule {
    pub fn label(&self) -> &'static str {
        match self {
            PointsRule::RetailerName => "retailer name",
            PointsRule::RoundDollarTotal => "round dollar total",
            PointsRule::QuarterMultipleTotal => "total multiple of 0.25",
            PointsRule::ItemPairs => "item pairs",
            PointsRule::ItemDescription => "item description length",
            PointsRule::OddPurchaseDay => "odd purchase day",
            PointsRule::AfternoonPurchase => "purchase between 2pm and 4pm",
        }
    }
}

/// Points awarded by a single rule, kept for audit trails and the CLI breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub rule: PointsRule,
    pub points: u64,
    pub notes: String,
}

/// Calculation output: the total plus the rules that contributed to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointsOutcome {
    pub points: u64,
    pub components: Vec<ScoreComponent>,
}

/// Input the calculator could not interpret.
#[derive(Debug, thiserror::Error)]
pub enum CalculationError {
    #[error("total `{0}` is not a decimal number")]
    InvalidTotal(String),
    #[error("item {index} price `{value}` is not a non-negative decimal number")]
    InvalidPrice { index: usize, value: String },
    #[error("purchaseTime `{value}` is not in HH:MM format")]
    InvalidTime {
        value: String,
        #[source]
        source: Option<chrono::ParseError>,
    },
    #[error("points for this receipt exceed the representable maximum")]
    PointsOverflow,
}

/// Score a receipt. Pure and deterministic; never panics on unvalidated input.
pub fn calculate_points(receipt: &Receipt) -> Result<PointsOutcome, CalculationError> {
    let total = parse_amount(&receipt.total)
        .ok_or_else(|| CalculationError::InvalidTotal(receipt.total.clone()))?;

    let prices = receipt
        .items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            parse_amount(&item.price)
                .filter(|price| *price >= 0.0)
                .ok_or_else(|| CalculationError::InvalidPrice {
                    index,
                    value: item.price.clone(),
                })
        })
        .collect::<Result<Vec<f64>, _>>()?;

    let afternoon = is_time_between_two_and_four(&receipt.purchase_time)?;

    let components = rules::score_components(receipt, total, &prices, afternoon)?;
    let points = components
        .iter()
        .try_fold(0u64, |sum, component| sum.checked_add(component.points))
        .ok_or(CalculationError::PointsOverflow)?;

    Ok(PointsOutcome { points, components })
}
