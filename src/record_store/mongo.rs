//! A MongoDB-backed implementation of the [`RecordStore`][super::RecordStore] trait.
//!
//! The connection is opened once by [`MongoRecordStore::connect`] and reused for every
//! upsert of the run. Documents are written with `update_one` and `upsert: true`, filtered
//! on `{domain, latest: true}`, so each collection holds one latest document per domain.
use crate::config::DatabaseConfig;
use crate::error::Error;
use crate::record::RecordDocument;
use crate::record_store::{format_insert_date, RecordStore};
use mongodb::bson::{doc, Document};
use mongodb::options::{ClientOptions, UpdateOptions};
use mongodb::{Client, Database};
use time::OffsetDateTime;

#[derive(Debug, Clone)]
#[allow(clippy::module_name_repetitions)]
pub struct MongoRecordStore {
    db: Database,
}

impl MongoRecordStore {
    /// Connect to the configured database, verifying the server is reachable with a `ping`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Store`] if the URI can't be parsed or the server can't be reached.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, Error> {
        let options = ClientOptions::parse(&config.uri).await?;
        let client = Client::with_options(options)?;
        let db = client.database(&config.name);
        db.run_command(doc! { "ping": 1 }, None).await?;
        tracing::debug!("connected to MongoDB database \"{}\"", config.name);
        Ok(Self { db })
    }

    fn update_for(document: &RecordDocument, at: OffsetDateTime) -> Result<Document, Error> {
        let mut fields = mongodb::bson::to_document(document)?;
        fields.insert("insert_date", format_insert_date(at)?);
        fields.insert("latest", true);
        Ok(doc! { "$set": fields })
    }
}

#[async_trait::async_trait]
impl RecordStore for MongoRecordStore {
    async fn upsert(&mut self, document: &RecordDocument) -> Result<(), Error> {
        let collection = self
            .db
            .collection::<Document>(document.kind().collection());
        let filter = doc! { "domain": document.domain(), "latest": true };
        let update = Self::update_for(document, OffsetDateTime::now_utc())?;
        let options = UpdateOptions::builder().upsert(true).build();
        collection.update_one(filter, update, options).await?;
        Ok(())
    }
}
