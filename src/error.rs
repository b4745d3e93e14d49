//! Error types.

use std::path::PathBuf;
use trust_dns_proto::error::ProtoError;
use trust_dns_resolver::error::ResolveError;

/// Error enumerates the possible DNS Audit error states.
///
/// Per-record query failures are not represented here, see
/// [`QueryFailure`][`crate::dns::QueryFailure`]. These errors are for startup and for
/// store writes.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Returned when the [store configuration][crate::config::StoreConfig] is well formed
    /// YAML but fails validation, e.g. an empty `database.name` or a `database.uri` that is
    /// not a MongoDB connection string.
    #[error("invalid store config {path:?}: {reason}")]
    InvalidConfig { path: PathBuf, reason: String },

    /// Returned when the store configuration file isn't valid YAML, or is missing the
    /// `database.uri` or `database.name` keys.
    #[error("invalid YAML")]
    InvalidYAML(#[from] serde_yaml::Error),

    /// Returned when a generic IO error occurs.
    #[error("an IO error occurred")]
    IO(#[from] std::io::Error),

    /// Returned when a record document can't be rendered as JSON for console output.
    #[error("invalid JSON")]
    InvalidJSON(#[from] serde_json::Error),

    /// Returned when the `insert_date` timestamp of a record can't be formatted.
    #[error("timestamp formatting error")]
    TimeFormat(#[from] time::error::Format),

    /// Returned when the MongoDB driver fails to connect or to upsert a document.
    #[error("store error")]
    Store(#[from] mongodb::error::Error),

    /// Returned when a record document can't be converted to BSON.
    #[error("BSON serialization error")]
    Bson(#[from] mongodb::bson::ser::Error),

    /// Returned when the system resolver configuration can't be used.
    #[error("resolver error")]
    ResolverError(#[from] ResolveError),

    /// Returned when a DNS name can't be parsed or a DNS protocol error occurs.
    #[error("DNS error")]
    DNSError(#[from] ProtoError),
}
