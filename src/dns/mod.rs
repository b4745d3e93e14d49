//! DNS querying for the audited record types.
//!
//! # Record Source
//!
//! All DNS traffic goes through a [`RecordSource`]. The production implementation,
//! [`source::DnsRecordSource`], performs two kinds of query:
//!
//! * a recursive query through the resolvers listed in the system configuration
//!   (`/etc/resolv.conf` on Unix), restricted to TCP transport, and
//! * a direct query over TCP to a domain's authoritative name servers, used to read the
//!   zone's own TTL for the bare domain rather than a cached one.
//!
//! # Domain Resolver
//!
//! [`DomainResolver`] audits a single domain: it queries NS, A, MX and SOA in that order,
//! each in isolation, normalizes every answer into a
//! [`RecordDocument`][`crate::record::RecordDocument`] and writes it to a
//! [`RecordStore`][`crate::record_store::RecordStore`]. A failure for one record type is
//! logged and reported in the returned [`DomainReport`], it never stops the remaining
//! queries.
//!
//! E.g. auditing `Example.COM` against a console store prints:
//!
//! ```text
//! {"kind":"NS","domain":"example.com","nameservers":["a.iana-servers.net.","b.iana-servers.net."],"name_server_ttl":86400,"ip":"93.184.216.34",...}
//! {"kind":"A","domain":"example.com","ttl":3600,"ip":"93.184.216.34",...}
//! ERROR dns_audit::dns::resolver: query failed domain=example.com record_type=MX error=no-answer: no records found
//! {"kind":"SOA","domain":"example.com","serial":2023031301,"tech":"noc.dns.icann.org.",...}
//! ```

mod failure;
pub mod resolver;
pub mod source;

pub use failure::{FailureKind, QueryFailure};
pub use resolver::{DomainReport, DomainResolver, QueryOutcome};
pub use source::{Answer, DnsRecordSource, RecordSource};
