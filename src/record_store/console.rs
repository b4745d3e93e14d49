//! A stdout implementation of the [`RecordStore`][super::RecordStore] trait.
//!
//! Nothing is persisted: each upsert is rendered as a single JSON line carrying the record
//! kind, the document fields, and the `insert_date`/`latest` stamp a durable store would
//! have written.
use crate::error::Error;
use crate::record::{RecordDocument, RecordKind};
use crate::record_store::{format_insert_date, RecordStore};
use serde::Serialize;
use std::io::{self, Stdout, Write};
use time::OffsetDateTime;

#[derive(Serialize)]
struct ConsoleLine<'a> {
    kind: RecordKind,
    #[serde(flatten)]
    document: &'a RecordDocument,
    insert_date: String,
    latest: bool,
}

#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct ConsoleRecordStore<W = Stdout> {
    out: W,
}

impl ConsoleRecordStore<Stdout> {
    #[must_use]
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> ConsoleRecordStore<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[async_trait::async_trait]
impl<W: Write + Send> RecordStore for ConsoleRecordStore<W> {
    async fn upsert(&mut self, document: &RecordDocument) -> Result<(), Error> {
        let line = ConsoleLine {
            kind: document.kind(),
            document,
            insert_date: format_insert_date(OffsetDateTime::now_utc())?,
            latest: true,
        };
        writeln!(self.out, "{}", serde_json::to_string(&line)?)?;
        self.out.flush()?;
        Ok(())
    }
}
