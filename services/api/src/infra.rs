use metrics_exporter_prometheus::PrometheusHandle;
use receipt_points::receipts::{ReceiptId, ReceiptStore, ScoreRecord, StoreError};
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-lifetime score store. Writes are serialized through the mutex.
#[derive(Default, Clone)]
pub(crate) struct InMemoryReceiptStore {
    records: Arc<Mutex<HashMap<ReceiptId, ScoreRecord>>>,
}

impl InMemoryReceiptStore {
    fn lock(&self) -> Result<MutexGuard<'_, HashMap<ReceiptId, ScoreRecord>>, StoreError> {
        self.records
            .lock()
            .map_err(|_| StoreError::Unavailable("receipt store mutex poisoned".to_string()))
    }
}

impl ReceiptStore for InMemoryReceiptStore {
    fn put(&self, record: ScoreRecord) -> Result<ScoreRecord, StoreError> {
        let mut guard = self.lock()?;
        if guard.contains_key(&record.id) {
            return Err(StoreError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn get(&self, id: &ReceiptId) -> Result<Option<ScoreRecord>, StoreError> {
        let guard = self.lock()?;
        Ok(guard.get(id).cloned())
    }
}
