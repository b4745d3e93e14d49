use crate::error::Error;
use std::fmt;
use trust_dns_client::error::{ClientError, ClientErrorKind};
use trust_dns_proto::error::{ProtoError, ProtoErrorKind};
use trust_dns_resolver::error::{ResolveError, ResolveErrorKind};

/// Broad classification of why a single (domain, record type) audit failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// The query wasn't answered before the transport timeout.
    Timeout,
    /// The query was answered, but without a record of the requested type.
    NoAnswer,
    /// A server couldn't be reached, or an authoritative name server's address couldn't
    /// be resolved.
    ResolutionError,
    /// The domain isn't a valid DNS name, or the response couldn't be used.
    Malformed,
    /// The normalized document couldn't be written to the record store.
    Store,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FailureKind::Timeout => "timeout",
            FailureKind::NoAnswer => "no-answer",
            FailureKind::ResolutionError => "resolution-error",
            FailureKind::Malformed => "malformed",
            FailureKind::Store => "store",
        })
    }
}

/// The failure half of a [`QueryOutcome`][super::QueryOutcome].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}: {message}")]
pub struct QueryFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl QueryFailure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn no_answer(message: impl Into<String>) -> Self {
        Self::new(FailureKind::NoAnswer, message)
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Malformed, message)
    }
}

impl From<ResolveError> for QueryFailure {
    fn from(err: ResolveError) -> Self {
        let kind = match err.kind() {
            ResolveErrorKind::Timeout => FailureKind::Timeout,
            ResolveErrorKind::NoRecordsFound { .. } => FailureKind::NoAnswer,
            ResolveErrorKind::Proto(proto) => return Self::from(proto.clone()),
            _ => FailureKind::ResolutionError,
        };
        Self::new(kind, err.to_string())
    }
}

impl From<ProtoError> for QueryFailure {
    fn from(err: ProtoError) -> Self {
        let kind = match err.kind() {
            ProtoErrorKind::Timeout => FailureKind::Timeout,
            ProtoErrorKind::Io(_) => FailureKind::ResolutionError,
            _ => FailureKind::Malformed,
        };
        Self::new(kind, err.to_string())
    }
}

impl From<ClientError> for QueryFailure {
    fn from(err: ClientError) -> Self {
        let kind = match err.kind() {
            ClientErrorKind::Timeout => FailureKind::Timeout,
            ClientErrorKind::Proto(proto) => return Self::from(proto.clone()),
            _ => FailureKind::ResolutionError,
        };
        Self::new(kind, err.to_string())
    }
}

impl From<Error> for QueryFailure {
    fn from(err: Error) -> Self {
        // Display of the crate error is terse; keep the source in the message.
        let message = match std::error::Error::source(&err) {
            Some(source) => format!("{err}: {source}"),
            None => err.to_string(),
        };
        Self::new(FailureKind::Store, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trust_dns_proto::op::{Query, ResponseCode};
    use trust_dns_proto::rr::{Name, RecordType};

    #[test]
    fn proto_timeout_is_timeout() {
        let failure = QueryFailure::from(ProtoError::from(ProtoErrorKind::Timeout));
        assert_eq!(failure.kind, FailureKind::Timeout);
    }

    #[test]
    fn client_timeout_is_timeout() {
        let failure = QueryFailure::from(ClientError::from(ClientErrorKind::Timeout));
        assert_eq!(failure.kind, FailureKind::Timeout);

        let proto = ProtoError::from(ProtoErrorKind::Timeout);
        let failure = QueryFailure::from(ClientError::from(proto));
        assert_eq!(failure.kind, FailureKind::Timeout);
    }

    #[test]
    fn client_io_error_is_resolution_error() {
        let err = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset by peer");
        let failure = QueryFailure::from(ClientError::from(err));
        assert_eq!(failure.kind, FailureKind::ResolutionError);
    }

    #[test]
    fn resolve_timeout_is_timeout() {
        let failure = QueryFailure::from(ResolveError::from(ResolveErrorKind::Timeout));
        assert_eq!(failure.kind, FailureKind::Timeout);
    }

    #[test]
    fn no_records_is_no_answer() {
        let query = Query::query(Name::from_ascii("example.com.").unwrap(), RecordType::MX);
        let failure = QueryFailure::from(ResolveError::from(ResolveErrorKind::NoRecordsFound {
            query: Box::new(query),
            soa: None,
            negative_ttl: None,
            response_code: ResponseCode::NoError,
            trusted: false,
        }));
        assert_eq!(failure.kind, FailureKind::NoAnswer);
    }

    #[test]
    fn unusable_response_is_malformed() {
        let failure = QueryFailure::from(ProtoError::from("bad label"));
        assert_eq!(failure.kind, FailureKind::Malformed);
    }

    #[test]
    fn display_names_kind_and_message() {
        let failure = QueryFailure::no_answer("no MX records");
        assert_eq!(failure.to_string(), "no-answer: no MX records");
    }
}
