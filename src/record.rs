//! Audit record documents.
//!
//! One document kind per audited record type. Each kind lives in its own collection and is
//! keyed by `(domain, latest=true)`: writing a document replaces the previous `latest`
//! snapshot for the same domain rather than adding a new one.

use serde::Serialize;
use std::fmt;
use trust_dns_proto::rr::RecordType;

/// The record types audited for every domain, in query order.
pub const AUDITED_KINDS: [RecordKind; 4] =
    [RecordKind::Ns, RecordKind::A, RecordKind::Mx, RecordKind::Soa];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum RecordKind {
    #[serde(rename = "NS")]
    Ns,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "MX")]
    Mx,
    #[serde(rename = "SOA")]
    Soa,
}

impl RecordKind {
    /// Name of the collection holding documents of this kind.
    #[must_use]
    pub fn collection(self) -> &'static str {
        match self {
            RecordKind::Ns => "ns_records",
            RecordKind::A => "a_records",
            RecordKind::Mx => "mx_records",
            RecordKind::Soa => "soa_records",
        }
    }

    #[must_use]
    pub fn record_type(self) -> RecordType {
        match self {
            RecordKind::Ns => RecordType::NS,
            RecordKind::A => RecordType::A,
            RecordKind::Mx => RecordType::MX,
            RecordKind::Soa => RecordType::SOA,
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.record_type(), f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NsRecord {
    pub domain: String,
    pub nameservers: Vec<String>,
    pub name_server_ttl: u32,
    pub ip: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ARecord {
    pub domain: String,
    pub ttl: u32,
    pub ip: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MxRecord {
    pub domain: String,
    pub ttl: u32,
    pub priority: u16,
    pub mx_domain: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SoaRecord {
    pub domain: String,
    pub serial: u32,
    pub tech: String,
    pub refresh: i32,
    pub retry: i32,
    pub expire: i32,
    pub minimum: u32,
    pub mname: String,
}

/// A normalized record document, without the `insert_date` and `latest` fields that are
/// stamped on by a [`RecordStore`][crate::record_store::RecordStore] at write time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RecordDocument {
    Ns(NsRecord),
    A(ARecord),
    Mx(MxRecord),
    Soa(SoaRecord),
}

impl RecordDocument {
    #[must_use]
    pub fn kind(&self) -> RecordKind {
        match self {
            RecordDocument::Ns(_) => RecordKind::Ns,
            RecordDocument::A(_) => RecordKind::A,
            RecordDocument::Mx(_) => RecordKind::Mx,
            RecordDocument::Soa(_) => RecordKind::Soa,
        }
    }

    #[must_use]
    pub fn domain(&self) -> &str {
        match self {
            RecordDocument::Ns(r) => &r.domain,
            RecordDocument::A(r) => &r.domain,
            RecordDocument::Mx(r) => &r.domain,
            RecordDocument::Soa(r) => &r.domain,
        }
    }
}
