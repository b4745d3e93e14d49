use crate::dns::failure::QueryFailure;
use crate::dns::source::RecordSource;
use crate::normalize;
use crate::record::{RecordDocument, RecordKind, AUDITED_KINDS};
use crate::record_store::RecordStore;
use trust_dns_proto::rr::Name;

/// The result of auditing one record kind for one domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOutcome {
    pub kind: RecordKind,
    pub result: Result<RecordDocument, QueryFailure>,
}

/// The outcomes of every audited record kind for one domain, in query order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainReport {
    pub domain: String,
    pub outcomes: Vec<QueryOutcome>,
}

impl DomainReport {
    #[must_use]
    pub fn written(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.written()
    }

    #[must_use]
    pub fn outcome(&self, kind: RecordKind) -> Option<&QueryOutcome> {
        self.outcomes.iter().find(|o| o.kind == kind)
    }
}

pub struct DomainResolver<S> {
    source: S,
}

impl<S: RecordSource> DomainResolver<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Query, normalize and store every audited record kind for `domain`.
    ///
    /// Failures are logged and reported per kind, the remaining kinds are still attempted.
    pub async fn audit(&self, domain: &str, store: &mut dyn RecordStore) -> DomainReport {
        let domain = domain.trim().to_lowercase();
        let mut outcomes = Vec::with_capacity(AUDITED_KINDS.len());

        for kind in AUDITED_KINDS {
            let result = match self.resolve(&domain, kind).await {
                Ok(document) => match store.upsert(&document).await {
                    Ok(()) => Ok(document),
                    Err(err) => Err(QueryFailure::from(err)),
                },
                Err(failure) => Err(failure),
            };
            if let Err(failure) = &result {
                tracing::error!(
                    domain = %domain,
                    record_type = %kind,
                    error = %failure,
                    "query failed"
                );
            }
            outcomes.push(QueryOutcome { kind, result });
        }

        DomainReport { domain, outcomes }
    }

    /// Query and normalize a single record kind for `domain`.
    ///
    /// # Errors
    ///
    /// Returns a [`QueryFailure`] if the domain isn't a valid name, the query fails, or the
    /// answer holds no record of the requested kind.
    pub async fn resolve(
        &self,
        domain: &str,
        kind: RecordKind,
    ) -> Result<RecordDocument, QueryFailure> {
        let name = fqdn(domain)?;
        let answer = self.source.query(&name, kind.record_type()).await?;
        match kind {
            RecordKind::Ns => {
                let nameservers = normalize::nameservers(&answer)?;
                let authoritative = self
                    .source
                    .query_authoritative(&name, &nameservers)
                    .await?;
                normalize::ns_document(domain, &answer, &authoritative)
            }
            RecordKind::A => normalize::a_document(domain, &answer),
            RecordKind::Mx => normalize::mx_document(domain, &answer),
            RecordKind::Soa => normalize::soa_document(domain, &answer),
        }
    }
}

/// Parse `domain` as an absolute name so search domains from the system config never apply.
///
/// Unicode labels are IDNA-encoded into their `xn--` form.
fn fqdn(domain: &str) -> Result<Name, QueryFailure> {
    if domain.is_empty() {
        return Err(QueryFailure::malformed("empty domain name"));
    }
    let mut name = Name::from_utf8(domain)
        .map_err(|err| QueryFailure::malformed(format!("invalid domain name: {err}")))?;
    name.set_fqdn(true);
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dns::FailureKind;
    use crate::record_store::InMemoryRecordStore;
    use crate::test_helpers::{FailingStore, ScriptedSource};
    use trust_dns_proto::rr::RecordType;

    #[tokio::test]
    async fn audit_writes_every_kind() {
        let resolver = DomainResolver::new(ScriptedSource::complete());
        let mut store = InMemoryRecordStore::default();

        let report = resolver.audit("Example.COM", &mut store).await;

        assert_eq!(report.domain, "example.com");
        assert_eq!(report.written(), 4);
        assert_eq!(store.len(), 4);
        for kind in AUDITED_KINDS {
            let stored = store.get(kind, "example.com").unwrap();
            assert_eq!(stored.document.domain(), "example.com");
        }
        assert_eq!(
            resolver.source.queried(),
            [RecordType::NS, RecordType::A, RecordType::MX, RecordType::SOA]
        );
    }

    #[tokio::test]
    async fn missing_mx_does_not_stop_soa() {
        let source = ScriptedSource::complete()
            .failing(RecordType::MX, QueryFailure::no_answer("no records found"));
        let resolver = DomainResolver::new(source);
        let mut store = InMemoryRecordStore::default();

        let report = resolver.audit("example.com", &mut store).await;

        let mx = report.outcome(RecordKind::Mx).unwrap();
        assert_eq!(
            mx.result.as_ref().unwrap_err().kind,
            FailureKind::NoAnswer
        );
        assert!(store.get(RecordKind::Mx, "example.com").is_none());
        assert!(store.get(RecordKind::Soa, "example.com").is_some());
        assert_eq!(report.written(), 3);
        assert_eq!(report.failed(), 1);
    }

    #[tokio::test]
    async fn unresolvable_authoritative_servers_fail_only_ns() {
        let source = ScriptedSource::complete().with_authoritative_failure(QueryFailure::new(
            FailureKind::ResolutionError,
            "can't resolve name server a.iana-servers.net.",
        ));
        let resolver = DomainResolver::new(source);
        let mut store = InMemoryRecordStore::default();

        let report = resolver.audit("example.com", &mut store).await;

        let ns = report.outcome(RecordKind::Ns).unwrap();
        assert_eq!(
            ns.result.as_ref().unwrap_err().kind,
            FailureKind::ResolutionError
        );
        assert_eq!(store.len(), 3);
    }

    #[tokio::test]
    async fn ns_document_has_authoritative_ttl() {
        let resolver = DomainResolver::new(ScriptedSource::complete());
        let doc = resolver.resolve("example.com", RecordKind::Ns).await.unwrap();
        let RecordDocument::Ns(ns) = doc else {
            panic!("expected NS document");
        };
        assert_eq!(ns.nameservers.len(), 2);
        assert_eq!(ns.name_server_ttl, 86_400);
        assert_eq!(ns.ip, "93.184.216.34");
    }

    #[tokio::test]
    async fn invalid_domain_is_malformed_without_querying() {
        let resolver = DomainResolver::new(ScriptedSource::complete());
        let mut store = InMemoryRecordStore::default();

        let report = resolver.audit("   ", &mut store).await;

        assert_eq!(report.failed(), 4);
        assert!(report
            .outcomes
            .iter()
            .all(|o| o.result.as_ref().unwrap_err().kind == FailureKind::Malformed));
        assert!(resolver.source.queried().is_empty());
    }

    #[tokio::test]
    async fn unicode_domain_is_queried_in_punycode() {
        let resolver = DomainResolver::new(ScriptedSource::complete());
        let mut store = InMemoryRecordStore::default();

        let report = resolver.audit("Bücher.de", &mut store).await;

        assert_eq!(report.domain, "bücher.de");
        assert_eq!(report.written(), 4);
        assert_eq!(resolver.source.queried().len(), 4);
        assert!(resolver
            .source
            .queried_names()
            .iter()
            .all(|n| n == "xn--bcher-kva.de."));
        assert!(store.get(RecordKind::Mx, "bücher.de").is_some());
    }

    #[tokio::test]
    async fn store_failures_are_reported_per_kind() {
        let resolver = DomainResolver::new(ScriptedSource::complete());

        let report = resolver.audit("example.com", &mut FailingStore).await;

        assert_eq!(report.failed(), 4);
        assert!(report
            .outcomes
            .iter()
            .all(|o| o.result.as_ref().unwrap_err().kind == FailureKind::Store));
    }

    #[tokio::test]
    async fn rerun_keeps_one_document_per_kind() {
        let resolver = DomainResolver::new(ScriptedSource::complete());
        let mut store = InMemoryRecordStore::default();

        resolver.audit("example.com", &mut store).await;
        let first = store.get(RecordKind::Soa, "example.com").unwrap().clone();
        resolver.audit("example.com", &mut store).await;
        let second = store.get(RecordKind::Soa, "example.com").unwrap();

        assert_eq!(store.len(), 4);
        assert_eq!(second.document, first.document);
        assert!(second.insert_date >= first.insert_date);
    }
}
