//! Record document storage.
//!
//! Supports a generic interface for upserting the latest [`RecordDocument`] of each kind per
//! domain. Every write stamps the document with an `insert_date` (the wall-clock time of the
//! write, RFC 3339, UTC) and `latest: true`, replacing the previous latest document for the
//! same `(kind, domain)`.
//!
//! Three implementations are provided:
//!
//! * [`mongo::MongoRecordStore`] writes to one MongoDB collection per record kind
//!   (`ns_records`, `a_records`, `mx_records`, `soa_records`).
//! * [`console::ConsoleRecordStore`] prints one JSON document per line, used when no store
//!   configuration is given.
//! * [`memory::InMemoryRecordStore`] keeps documents in memory and is not durable.

use crate::error::Error;
use crate::record::RecordDocument;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

pub mod console;
pub mod memory;
pub mod mongo;

#[allow(clippy::module_name_repetitions)]
pub use console::ConsoleRecordStore;
#[allow(clippy::module_name_repetitions)]
pub use memory::InMemoryRecordStore;
#[allow(clippy::module_name_repetitions)]
pub use mongo::MongoRecordStore;

/// An async trait describing upsert-only storage of audit record documents, keyed by
/// `(kind, domain, latest=true)`.
#[async_trait::async_trait]
pub trait RecordStore: Send {
    /// Insert the document, or overwrite the latest document of the same kind for the same
    /// domain.
    async fn upsert(&mut self, document: &RecordDocument) -> Result<(), Error>;
}

pub(crate) fn format_insert_date(at: OffsetDateTime) -> Result<String, Error> {
    Ok(at.format(&Rfc3339)?)
}
