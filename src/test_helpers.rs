//! Fakes shared by the unit tests.

use crate::dns::{Answer, QueryFailure, RecordSource};
use crate::error::Error;
use crate::record::RecordDocument;
use crate::record_store::RecordStore;
use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::str::FromStr;
use std::sync::Mutex;
use trust_dns_proto::rr::rdata::{MX, SOA};
use trust_dns_proto::rr::{Name, RData, Record, RecordType};

pub(crate) fn name(s: &str) -> Name {
    Name::from_str(s).unwrap()
}

/// A [`RecordSource`] answering from fixed tables, recording every query it receives.
#[derive(Default)]
pub(crate) struct ScriptedSource {
    answers: HashMap<RecordType, Result<Answer, QueryFailure>>,
    authoritative: Option<Result<Answer, QueryFailure>>,
    queries: Mutex<Vec<(String, RecordType)>>,
}

impl ScriptedSource {
    pub(crate) fn answering(mut self, record_type: RecordType, rdata: Vec<RData>) -> Self {
        let records = rdata
            .into_iter()
            .map(|rd| Record::from_rdata(name("example.com."), 300, rd))
            .collect();
        self.answers.insert(record_type, Ok(Answer::new(records)));
        self
    }

    pub(crate) fn failing(mut self, record_type: RecordType, failure: QueryFailure) -> Self {
        self.answers.insert(record_type, Err(failure));
        self
    }

    pub(crate) fn with_authoritative(mut self, ttl: u32, ip: Ipv4Addr) -> Self {
        self.authoritative = Some(Ok(Answer::new(vec![Record::from_rdata(
            name("example.com."),
            ttl,
            RData::A(ip),
        )])));
        self
    }

    pub(crate) fn with_authoritative_failure(mut self, failure: QueryFailure) -> Self {
        self.authoritative = Some(Err(failure));
        self
    }

    /// Answers every audited record type for any domain.
    pub(crate) fn complete() -> Self {
        Self::default()
            .answering(
                RecordType::NS,
                vec![
                    RData::NS(name("a.iana-servers.net.")),
                    RData::NS(name("b.iana-servers.net.")),
                ],
            )
            .with_authoritative(86_400, Ipv4Addr::new(93, 184, 216, 34))
            .answering(RecordType::A, vec![RData::A(Ipv4Addr::new(93, 184, 216, 34))])
            .answering(
                RecordType::MX,
                vec![RData::MX(MX::new(10, name("mail.example.com.")))],
            )
            .answering(
                RecordType::SOA,
                vec![RData::SOA(SOA::new(
                    name("ns.icann.org."),
                    name("noc.dns.icann.org."),
                    2_023_031_301,
                    7200,
                    3600,
                    1_209_600,
                    3600,
                ))],
            )
    }

    /// Record types queried so far, in order.
    pub(crate) fn queried(&self) -> Vec<RecordType> {
        self.queries.lock().unwrap().iter().map(|(_, rt)| *rt).collect()
    }

    /// Names queried so far, in order, in their ASCII wire form.
    pub(crate) fn queried_names(&self) -> Vec<String> {
        self.queries.lock().unwrap().iter().map(|(n, _)| n.clone()).collect()
    }
}

#[async_trait::async_trait]
impl RecordSource for ScriptedSource {
    async fn query(&self, name: &Name, record_type: RecordType) -> Result<Answer, QueryFailure> {
        self.queries
            .lock()
            .unwrap()
            .push((name.to_ascii(), record_type));
        self.answers
            .get(&record_type)
            .cloned()
            .unwrap_or_else(|| Err(QueryFailure::no_answer("no records found")))
    }

    async fn query_authoritative(
        &self,
        _name: &Name,
        nameservers: &[Name],
    ) -> Result<Answer, QueryFailure> {
        assert!(!nameservers.is_empty());
        self.authoritative
            .clone()
            .unwrap_or_else(|| Err(QueryFailure::no_answer("no authoritative answer")))
    }
}

/// A [`RecordStore`] rejecting every write.
pub(crate) struct FailingStore;

#[async_trait::async_trait]
impl RecordStore for FailingStore {
    async fn upsert(&mut self, _document: &RecordDocument) -> Result<(), Error> {
        Err(Error::IO(std::io::Error::new(
            std::io::ErrorKind::BrokenPipe,
            "store went away",
        )))
    }
}
