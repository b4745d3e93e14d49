use crate::error::Error;
use crate::record::{RecordDocument, RecordKind};
use crate::record_store::RecordStore;
use std::collections::HashMap;
use time::OffsetDateTime;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRecord {
    pub document: RecordDocument,
    pub insert_date: OffsetDateTime,
}

#[derive(Default, Debug, Clone)]
pub struct InMemoryRecordStore {
    records: HashMap<(RecordKind, String), StoredRecord>,
}

impl InMemoryRecordStore {
    /// The latest document of `kind` for `domain` (if any).
    #[must_use]
    pub fn get(&self, kind: RecordKind, domain: &str) -> Option<&StoredRecord> {
        self.records.get(&(kind, domain.to_string()))
    }

    /// Number of latest documents held, across all kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait::async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn upsert(&mut self, document: &RecordDocument) -> Result<(), Error> {
        self.records.insert(
            (document.kind(), document.domain().to_string()),
            StoredRecord {
                document: document.clone(),
                insert_date: OffsetDateTime::now_utc(),
            },
        );
        Ok(())
    }
}
