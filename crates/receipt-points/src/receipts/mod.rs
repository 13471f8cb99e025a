//! Receipt intake, points calculation, and score lookup.
//!
//! A submitted receipt is validated, scored against the fixed loyalty rules, and stored under
//! a generated id. The HTTP router exposes submission and lookup; the service and store trait
//! can be driven directly without it.

pub mod domain;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{Item, Receipt, ReceiptId, ScoreRecord};
pub use repository::{ReceiptStore, StoreError};
pub use router::receipt_router;
pub use scoring::{
    calculate_points, count_alphanumeric_characters, is_time_between_two_and_four,
    CalculationError, PointsOutcome, PointsRule, ScoreComponent,
};
pub use service::{score_receipt, ReceiptPointsService, ReceiptServiceError};
pub use validation::{is_valid_date_format, validate, ValidationError};
