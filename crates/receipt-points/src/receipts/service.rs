use std::sync::Arc;

use tracing::{debug, info, warn};

use super::domain::{Receipt, ReceiptId, ScoreRecord};
use super::repository::{ReceiptStore, StoreError};
use super::scoring::{calculate_points, CalculationError, PointsOutcome};
use super::validation::{validate, ValidationError};

/// Service composing the validator, points calculator, and score store.
pub struct ReceiptPointsService<S> {
    store: Arc<S>,
}

impl<S> ReceiptPointsService<S>
where
    S: ReceiptStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Validate and score a receipt, then store the points under a fresh id.
    ///
    /// Nothing is stored when validation or calculation fails.
    pub fn process(&self, receipt: Receipt) -> Result<ScoreRecord, ReceiptServiceError> {
        let outcome = score_receipt(&receipt).map_err(|err| {
            warn!(retailer = %receipt.retailer, error = %err, "receipt rejected");
            err
        })?;

        let id = ReceiptId::generate();
        debug!(receipt_id = %id, components = ?outcome.components, "receipt scored");

        let stored = self.store.put(ScoreRecord {
            id,
            points: outcome.points,
        })?;

        info!(receipt_id = %stored.id, points = stored.points, "receipt processed");
        Ok(stored)
    }

    /// Fetch the stored score for a receipt.
    pub fn points(&self, id: &ReceiptId) -> Result<ScoreRecord, ReceiptServiceError> {
        let record = self.store.get(id)?.ok_or(StoreError::NotFound)?;
        Ok(record)
    }
}

/// Validate then calculate without touching any store.
pub fn score_receipt(receipt: &Receipt) -> Result<PointsOutcome, ReceiptServiceError> {
    validate(receipt)?;
    let outcome = calculate_points(receipt)?;
    Ok(outcome)
}

/// Error raised by the receipt points service.
#[derive(Debug, thiserror::Error)]
pub enum ReceiptServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Calculation(#[from] CalculationError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ReceiptServiceError {
    /// The submitted receipt could not be accepted.
    pub fn is_invalid_payload(&self) -> bool {
        matches!(
            self,
            ReceiptServiceError::Validation(_) | ReceiptServiceError::Calculation(_)
        )
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ReceiptServiceError::Store(StoreError::NotFound))
    }
}
