//! Shaping of raw DNS answers into [`RecordDocument`]s.
//!
//! Only field extraction happens here: host names and addresses become text, the domain
//! key is lower-cased, and multi-record answers contribute their first record of the
//! requested type.

use crate::dns::{Answer, QueryFailure};
use crate::record::{ARecord, MxRecord, NsRecord, RecordDocument, SoaRecord};
use trust_dns_proto::rr::{Name, RData, RecordType};

/// The name server host names of an NS answer, in answer order.
///
/// # Errors
///
/// Returns a no-answer [`QueryFailure`] if the answer has no NS record.
pub fn nameservers(answer: &Answer) -> Result<Vec<Name>, QueryFailure> {
    let names: Vec<Name> = answer
        .records_of(RecordType::NS)
        .filter_map(|r| match r.data() {
            Some(RData::NS(ns)) => Some(ns.clone()),
            _ => None,
        })
        .collect();
    if names.is_empty() {
        return Err(QueryFailure::no_answer("no NS records in answer"));
    }
    Ok(names)
}

/// Build the NS document from the recursive NS answer and the authoritative `A` answer for
/// the bare domain.
///
/// # Errors
///
/// Returns a no-answer [`QueryFailure`] if either answer lacks a record of its type.
pub fn ns_document(
    domain: &str,
    ns_answer: &Answer,
    authoritative: &Answer,
) -> Result<RecordDocument, QueryFailure> {
    let nameservers = nameservers(ns_answer)?
        .iter()
        .map(ToString::to_string)
        .collect();
    let (record, data) = authoritative.first_of(RecordType::A).ok_or_else(|| {
        QueryFailure::no_answer("no A records in authoritative answer")
    })?;
    Ok(RecordDocument::Ns(NsRecord {
        domain: domain.to_lowercase(),
        nameservers,
        name_server_ttl: record.ttl(),
        ip: rdata_text(data),
    }))
}

/// # Errors
///
/// Returns a no-answer [`QueryFailure`] if the answer has no A record.
pub fn a_document(domain: &str, answer: &Answer) -> Result<RecordDocument, QueryFailure> {
    let (record, data) = answer
        .first_of(RecordType::A)
        .ok_or_else(|| QueryFailure::no_answer("no A records in answer"))?;
    Ok(RecordDocument::A(ARecord {
        domain: domain.to_lowercase(),
        ttl: record.ttl(),
        ip: rdata_text(data),
    }))
}

/// # Errors
///
/// Returns a no-answer [`QueryFailure`] if the answer has no MX record.
pub fn mx_document(domain: &str, answer: &Answer) -> Result<RecordDocument, QueryFailure> {
    match answer.first_of(RecordType::MX) {
        Some((record, RData::MX(mx))) => Ok(RecordDocument::Mx(MxRecord {
            domain: domain.to_lowercase(),
            ttl: record.ttl(),
            priority: mx.preference(),
            mx_domain: mx.exchange().to_string(),
        })),
        Some((_, other)) => Err(QueryFailure::malformed(format!(
            "unexpected MX record data: {other}"
        ))),
        None => Err(QueryFailure::no_answer("no MX records in answer")),
    }
}

/// # Errors
///
/// Returns a no-answer [`QueryFailure`] if the answer has no SOA record.
pub fn soa_document(domain: &str, answer: &Answer) -> Result<RecordDocument, QueryFailure> {
    match answer.first_of(RecordType::SOA) {
        Some((_, RData::SOA(soa))) => Ok(RecordDocument::Soa(SoaRecord {
            domain: domain.to_lowercase(),
            serial: soa.serial(),
            tech: soa.rname().to_string(),
            refresh: soa.refresh(),
            retry: soa.retry(),
            expire: soa.expire(),
            minimum: soa.minimum(),
            mname: soa.mname().to_string(),
        })),
        Some((_, other)) => Err(QueryFailure::malformed(format!(
            "unexpected SOA record data: {other}"
        ))),
        None => Err(QueryFailure::no_answer("no SOA records in answer")),
    }
}

fn rdata_text(data: &RData) -> String {
    match data {
        RData::A(ip) => ip.to_string(),
        RData::AAAA(ip) => ip.to_string(),
        other => other.to_string(),
    }
}
