use crate::dns::failure::{FailureKind, QueryFailure};
use crate::error::Error;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use tokio::net::TcpStream as TokioTcpStream;
use trust_dns_client::client::{AsyncClient, ClientHandle};
use trust_dns_proto::iocompat::AsyncIoTokioAsStd;
use trust_dns_proto::op::ResponseCode;
use trust_dns_proto::rr::{DNSClass, Name, RData, Record, RecordType};
use trust_dns_proto::tcp::TcpClientStream;
use trust_dns_resolver::config::{NameServerConfig, NameServerConfigGroup, Protocol, ResolverConfig};
use trust_dns_resolver::system_conf::read_system_conf;
use trust_dns_resolver::TokioAsyncResolver;

/// Default timeout for the direct TCP query to an authoritative name server.
pub const AUTHORITATIVE_QUERY_TIMEOUT: Duration = Duration::from_secs(5);

const DNS_PORT: u16 = 53;

/// The answer section of a DNS response, in the order it was received.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Answer {
    pub records: Vec<Record>,
}

impl Answer {
    #[must_use]
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Iterate the records of the given type, skipping e.g. the CNAME chain a recursive
    /// resolver includes ahead of the final answer.
    pub fn records_of(&self, record_type: RecordType) -> impl Iterator<Item = &Record> {
        self.records
            .iter()
            .filter(move |r| r.record_type() == record_type && r.data().is_some())
    }

    /// The first record of the given type along with its record data.
    #[must_use]
    pub fn first_of(&self, record_type: RecordType) -> Option<(&Record, &RData)> {
        self.records_of(record_type)
            .find_map(|r| r.data().map(|data| (r, data)))
    }
}

/// An async trait describing where DNS answers for the audit come from.
#[async_trait::async_trait]
pub trait RecordSource: Send + Sync {
    /// Query `name` for `record_type` through the configured recursive resolver.
    async fn query(&self, name: &Name, record_type: RecordType) -> Result<Answer, QueryFailure>;

    /// Resolve each of `nameservers` to an address and query those servers directly for
    /// the `A` records of `name`. The first server to answer wins.
    async fn query_authoritative(
        &self,
        name: &Name,
        nameservers: &[Name],
    ) -> Result<Answer, QueryFailure>;
}

/// A [`RecordSource`] backed by the system resolver configuration, using TCP only.
pub struct DnsRecordSource {
    resolver: TokioAsyncResolver,
    authoritative_timeout: Duration,
}

impl DnsRecordSource {
    /// Build a record source from the system resolver configuration, keeping only its TCP
    /// name servers and making a single attempt per query.
    ///
    /// # Errors
    ///
    /// Returns an error if the system configuration can't be read or the resolver can't be
    /// constructed from it.
    pub fn from_system_conf(authoritative_timeout: Duration) -> Result<Self, Error> {
        let (system_config, mut opts) = read_system_conf()?;
        let config = tcp_only(&system_config);
        tracing::debug!(
            "using {} TCP name server(s) from system config",
            config.name_servers().len()
        );
        opts.attempts = 1;
        Ok(Self::new(
            TokioAsyncResolver::tokio(config, opts)?,
            authoritative_timeout,
        ))
    }

    #[must_use]
    pub fn new(resolver: TokioAsyncResolver, authoritative_timeout: Duration) -> Self {
        Self {
            resolver,
            authoritative_timeout,
        }
    }

    async fn resolve_nameserver(&self, nameserver: &Name) -> Result<IpAddr, QueryFailure> {
        let lookup = self.resolver.lookup_ip(nameserver.to_ascii()).await.map_err(|err| {
            QueryFailure::new(
                FailureKind::ResolutionError,
                format!("can't resolve name server {nameserver}: {err}"),
            )
        })?;
        lookup.iter().next().ok_or_else(|| {
            QueryFailure::new(
                FailureKind::ResolutionError,
                format!("name server {nameserver} has no address"),
            )
        })
    }

    /// Query `servers` in turn for the `A` records of `name`, returning the first answer.
    async fn query_servers(
        &self,
        servers: &[SocketAddr],
        name: &Name,
    ) -> Result<Answer, QueryFailure> {
        let mut last_failure = QueryFailure::new(
            FailureKind::ResolutionError,
            format!("no authoritative name servers for {name}"),
        );
        for &server in servers {
            match self.query_server(server, name, RecordType::A).await {
                Ok(answer) => return Ok(answer),
                Err(failure) => {
                    tracing::debug!("authoritative query to {server} for {name} failed: {failure}");
                    last_failure = failure;
                }
            }
        }
        Err(last_failure)
    }

    async fn query_server(
        &self,
        server: SocketAddr,
        name: &Name,
        record_type: RecordType,
    ) -> Result<Answer, QueryFailure> {
        let (stream, sender) = TcpClientStream::<AsyncIoTokioAsStd<TokioTcpStream>>::with_timeout(
            server,
            self.authoritative_timeout,
        );
        let (mut client, background) = AsyncClient::new(stream, sender, None).await?;
        tokio::spawn(background);

        let response = client.query(name.clone(), DNSClass::IN, record_type).await?;
        match response.response_code() {
            ResponseCode::NoError => Ok(Answer::new(response.answers().to_vec())),
            code => Err(QueryFailure::new(
                FailureKind::ResolutionError,
                format!("{server} answered {code}"),
            )),
        }
    }
}

/// Keep only the TCP name servers of `config`, along with its domain and search list.
pub(crate) fn tcp_only(config: &ResolverConfig) -> ResolverConfig {
    let name_servers: Vec<NameServerConfig> = config
        .name_servers()
        .iter()
        .filter(|ns| ns.protocol == Protocol::Tcp)
        .cloned()
        .collect();
    ResolverConfig::from_parts(
        config.domain().cloned(),
        config.search().to_vec(),
        NameServerConfigGroup::from(name_servers),
    )
}

#[async_trait::async_trait]
impl RecordSource for DnsRecordSource {
    async fn query(&self, name: &Name, record_type: RecordType) -> Result<Answer, QueryFailure> {
        let lookup = self.resolver.lookup(name.clone(), record_type).await?;
        Ok(Answer::new(lookup.records().to_vec()))
    }

    async fn query_authoritative(
        &self,
        name: &Name,
        nameservers: &[Name],
    ) -> Result<Answer, QueryFailure> {
        // Every name server must resolve before any of them is queried.
        let mut servers = Vec::with_capacity(nameservers.len());
        for nameserver in nameservers {
            let ip = self.resolve_nameserver(nameserver).await?;
            servers.push(SocketAddr::new(ip, DNS_PORT));
        }

        self.query_servers(&servers, name).await
    }
}
