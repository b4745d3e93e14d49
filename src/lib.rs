//! DNS Audit
//!
//! Queries the NS, A, MX and SOA records of one or many domains and records a normalized
//! snapshot of each into a document store, for auditing how a set of domains is delegated
//! and configured over time.
//!
//! For each domain, the [NS][`record::NsRecord`] document also carries the TTL and address
//! served for the bare domain by the domain's own [authoritative name servers][dns], rather
//! than a value cached by a recursive resolver.
//!
//! Documents are upserted into [MongoDB][record_store::mongo] keyed by `(domain, latest=true)`,
//! or printed to standard output when no store is configured.
//!
#![warn(clippy::pedantic)]

pub mod batch;
pub mod cli;
pub mod config;
pub mod dns;
pub mod error;
pub mod normalize;
pub mod progress;
pub mod record;
pub mod record_store;
#[cfg(test)]
mod test_helpers;

pub use batch::{BatchSummary, Input};
pub use cli::Args;
pub use config::StoreConfig;
pub use dns::{DnsRecordSource, DomainResolver};
pub use record_store::{ConsoleRecordStore, InMemoryRecordStore, MongoRecordStore, RecordStore};
