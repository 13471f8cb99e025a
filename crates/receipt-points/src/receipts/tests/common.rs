use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::receipts::domain::{Item, Receipt, ReceiptId, ScoreRecord};
use crate::receipts::repository::{ReceiptStore, StoreError};
use crate::receipts::{receipt_router, ReceiptPointsService};

pub(super) fn item(short_description: &str, price: &str) -> Item {
    Item {
        short_description: short_description.to_string(),
        price: price.to_string(),
    }
}

/// Four Gatorades at a corner market; scores 109.
pub(super) fn corner_market_receipt() -> Receipt {
    Receipt {
        retailer: "M&M Corner Market".to_string(),
        purchase_date: "2022-03-20".to_string(),
        purchase_time: "14:33".to_string(),
        total: "9.00".to_string(),
        items: vec![
            item("Gatorade", "2.25"),
            item("Gatorade", "2.25"),
            item("Gatorade", "2.25"),
            item("Gatorade", "2.25"),
        ],
    }
}

/// Five assorted items at Target; scores 28.
pub(super) fn target_receipt() -> Receipt {
    Receipt {
        retailer: "Target".to_string(),
        purchase_date: "2022-01-01".to_string(),
        purchase_time: "13:01".to_string(),
        total: "35.35".to_string(),
        items: vec![
            item("Mountain Dew 12PK", "6.49"),
            item("Emils Cheese Pizza", "12.25"),
            item("Knorr Creamy Chicken", "1.26"),
            item("Doritos Nacho Cheese", "3.35"),
            item("   Klarbrunn 12-PK 12 FL OZ  ", "12.00"),
        ],
    }
}

pub(super) fn build_service() -> (ReceiptPointsService<MemoryStore>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    let service = ReceiptPointsService::new(store.clone());
    (service, store)
}

pub(super) fn router_with_service(service: ReceiptPointsService<MemoryStore>) -> axum::Router {
    receipt_router(Arc::new(service))
}

#[derive(Default, Clone)]
pub(super) struct MemoryStore {
    pub(super) records: Arc<Mutex<HashMap<ReceiptId, ScoreRecord>>>,
}

impl MemoryStore {
    pub(super) fn len(&self) -> usize {
        self.records.lock().expect("store mutex poisoned").len()
    }
}

impl ReceiptStore for MemoryStore {
    fn put(&self, record: ScoreRecord) -> Result<ScoreRecord, StoreError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(StoreError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn get(&self, id: &ReceiptId) -> Result<Option<ScoreRecord>, StoreError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

pub(super) struct ConflictStore;

impl ReceiptStore for ConflictStore {
    fn put(&self, _record: ScoreRecord) -> Result<ScoreRecord, StoreError> {
        Err(StoreError::Conflict)
    }

    fn get(&self, _id: &ReceiptId) -> Result<Option<ScoreRecord>, StoreError> {
        Ok(None)
    }
}

pub(super) struct UnavailableStore;

impl ReceiptStore for UnavailableStore {
    fn put(&self, _record: ScoreRecord) -> Result<ScoreRecord, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn get(&self, _id: &ReceiptId) -> Result<Option<ScoreRecord>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 4096)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
