//! Backing-store access: the DynamoDB client and an in-memory mock.

pub mod dynamo;
pub mod mock;

use async_trait::async_trait;

use crate::error::Result;
use crate::record::{CurrencyRecord, TableStatus};

/// Read-only view of the record table.
///
/// One implementation talks to DynamoDB; the mock backs handler and router
/// tests without network access. A single implementor instance lives for the
/// whole process and is shared by every request.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Scan the entire table, page by page, into one sequence.
    async fn scan_all(&self) -> Result<Vec<CurrencyRecord>>;

    /// Scan for records whose identifier equals `id`, in scan order.
    async fn find_by_id(&self, id: &str) -> Result<Vec<CurrencyRecord>>;

    /// Fetch table metadata: name and live item count.
    async fn table_status(&self) -> Result<TableStatus>;
}

pub use dynamo::DynamoStore;
pub use mock::MockRecordStore;
