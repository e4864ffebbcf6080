//! Mock record store for unit testing.
//!
//! This module provides a mock store that can be used in tests
//! without a real DynamoDB table.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::{Result, ServiceError};
use crate::record::{CurrencyRecord, TableStatus};

use super::RecordStore;

/// Configuration for mock store behavior.
#[derive(Debug, Clone, Default)]
pub struct MockConfig {
    /// Whether to fail full-table scans.
    pub fail_scan: bool,
    /// Whether to fail filtered scans.
    pub fail_find: bool,
    /// Whether to fail metadata queries.
    pub fail_status: bool,
    /// Simulated latency in milliseconds.
    pub latency_ms: u64,
}

/// In-memory record store for testing.
#[derive(Debug, Clone)]
pub struct MockRecordStore {
    config: MockConfig,
    table_name: String,
    records: Arc<Mutex<Vec<CurrencyRecord>>>,
}

impl MockRecordStore {
    /// Create an empty mock store with default configuration.
    pub fn new(table_name: &str) -> Self {
        Self {
            config: MockConfig::default(),
            table_name: table_name.to_string(),
            records: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock store with custom failure/latency configuration.
    pub fn with_config(table_name: &str, config: MockConfig) -> Self {
        Self {
            config,
            table_name: table_name.to_string(),
            records: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Insert a record, preserving insertion order for scans.
    pub fn insert(&self, record: CurrencyRecord) {
        self.records.lock().unwrap().push(record);
    }

    /// Clear all records.
    pub fn clear(&self) {
        self.records.lock().unwrap().clear();
    }

    async fn simulate_latency(&self) {
        if self.config.latency_ms > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(self.config.latency_ms)).await;
        }
    }
}

#[async_trait]
impl RecordStore for MockRecordStore {
    async fn scan_all(&self) -> Result<Vec<CurrencyRecord>> {
        self.simulate_latency().await;

        if self.config.fail_scan {
            return Err(ServiceError::Store("mock scan failure".to_string()));
        }

        Ok(self.records.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Vec<CurrencyRecord>> {
        self.simulate_latency().await;

        if self.config.fail_find {
            return Err(ServiceError::Store("mock filtered scan failure".to_string()));
        }

        let records = self.records.lock().unwrap();
        Ok(records.iter().filter(|r| r.id == id).cloned().collect())
    }

    async fn table_status(&self) -> Result<TableStatus> {
        self.simulate_latency().await;

        if self.config.fail_status {
            return Err(ServiceError::Store("mock metadata failure".to_string()));
        }

        Ok(TableStatus {
            table_name: self.table_name.clone(),
            record_count: self.records.lock().unwrap().len() as i64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str) -> CurrencyRecord {
        CurrencyRecord {
            id: id.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn scan_returns_records_in_insertion_order() {
        let store = MockRecordStore::new("test-table");
        store.insert(record("btc"));
        store.insert(record("eth"));

        let records = store.scan_all().await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "btc");
        assert_eq!(records[1].id, "eth");
    }

    #[tokio::test]
    async fn find_filters_by_identifier() {
        let store = MockRecordStore::new("test-table");
        store.insert(record("btc"));
        store.insert(record("eth"));

        let matches = store.find_by_id("eth").await.unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].id, "eth");

        assert!(store.find_by_id("xrp").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn status_counts_records() {
        let store = MockRecordStore::new("test-table");
        store.insert(record("btc"));

        let status = store.table_status().await.unwrap();
        assert_eq!(status.table_name, "test-table");
        assert_eq!(status.record_count, 1);
    }

    #[tokio::test]
    async fn clear_resets_the_store() {
        let store = MockRecordStore::new("test-table");
        store.insert(record("btc"));
        store.insert(record("eth"));

        store.clear();

        assert!(store.scan_all().await.unwrap().is_empty());
        assert_eq!(store.table_status().await.unwrap().record_count, 0);
    }

    #[tokio::test]
    async fn configured_failures_surface_as_store_errors() {
        let store = MockRecordStore::with_config(
            "test-table",
            MockConfig {
                fail_scan: true,
                ..Default::default()
            },
        );

        assert!(store.scan_all().await.is_err());
        assert!(store.find_by_id("btc").await.is_ok());
    }
}
