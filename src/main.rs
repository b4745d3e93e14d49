use anyhow::{anyhow, Context, Result};
use clap::Parser;
use dns_audit::dns::source::AUTHORITATIVE_QUERY_TIMEOUT;
use dns_audit::{
    batch, Args, ConsoleRecordStore, DnsRecordSource, DomainResolver, MongoRecordStore,
    RecordStore, StoreConfig,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    tracing_init();

    let input = args
        .input()
        .ok_or_else(|| anyhow!("one of --domain or --file is required"))?;

    // Validate the store config before any DNS traffic.
    let store_config = args
        .mongo_config
        .as_ref()
        .map(|path| {
            StoreConfig::try_from_file(path)
                .with_context(|| format!("loading store config {}", path.display()))
        })
        .transpose()?;

    let source = DnsRecordSource::from_system_conf(AUTHORITATIVE_QUERY_TIMEOUT)
        .context("initializing resolver from system config")?;
    let resolver = DomainResolver::new(source);

    let mut store: Box<dyn RecordStore> = match &store_config {
        Some(config) => {
            let store = MongoRecordStore::connect(&config.database)
                .await
                .context("connecting to MongoDB")?;
            tracing::info!("writing records to database \"{}\"", config.database.name);
            Box::new(store)
        }
        None => Box::new(ConsoleRecordStore::stdout()),
    };

    let summary = batch::run(&resolver, store.as_mut(), &input).await?;
    tracing::info!(
        "audited {} domain(s): {} record(s) written, {} failed",
        summary.domains,
        summary.written,
        summary.failed
    );
    Ok(())
}

fn tracing_init() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dns_audit=info".into()),
        )
        .init();
}
