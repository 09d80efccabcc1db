//! Knowledge base persistence: SQLite `rfc_entries` table.
//!
//! One row per document, keyed by canonical doc_id. The column order
//! mirrors `RfcRecord`'s field order and the bulk insert binds by position
//! (`VALUES (?1, ..., ?24)`), so the two must move together.
//!
//! SQLite has no native list or struct columns; list- and struct-valued
//! fields (author, date, the seven reference lists) are stored as JSON
//! text. The no-value marker maps to SQL NULL - a document with no
//! references stores NULL, not `[]`.
//!
//! All records of a run are inserted inside one transaction: an aborted run
//! leaves no partial table behind.

use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::info;

use crate::types::{Author, DocDate, RfcRecord};

/// Column order of `rfc_entries` - the positional contract.
const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS rfc_entries (
    doc_id              TEXT PRIMARY KEY,
    title               TEXT,
    author              TEXT,
    date                TEXT,
    format              TEXT,
    page_count          TEXT,
    keywords            TEXT,
    is_also             TEXT,
    obsoletes           TEXT,
    obsoleted_by        TEXT,
    updates             TEXT,
    updated_by          TEXT,
    see_also            TEXT,
    "references"        TEXT,
    referenced_by       TEXT,
    abstract            TEXT,
    draft               TEXT,
    current_status      TEXT,
    publication_status  TEXT,
    stream              TEXT,
    errata_url          TEXT,
    area                TEXT,
    wg_acronym          TEXT,
    doi                 TEXT
)"#;

/// Persistent store for reconciled records.
pub struct EntryStore {
    conn: Connection,
}

impl EntryStore {
    /// Open (or create) the database at `path` and ensure the schema.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("failed to open database: {}", path.display()))?;
        Self::with_connection(conn)
    }

    /// In-memory store, used by tests.
    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute(SCHEMA, [])
            .context("failed to create rfc_entries table")?;
        Ok(Self { conn })
    }

    /// Bulk-insert records inside one transaction.
    ///
    /// Values bind by position in the fixed column order; no column list is
    /// named, which is the point - the record's field order and the table's
    /// column order are the same contract.
    pub fn insert_records(&mut self, records: &[RfcRecord]) -> Result<usize> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO rfc_entries VALUES (\
                 ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, \
                 ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20, ?21, ?22, ?23, ?24)",
            )?;

            for record in records {
                stmt.execute(params![
                    record.doc_id,
                    record.title,
                    to_json(&record.author)?,
                    to_json(&record.date)?,
                    opt_json(&record.format)?,
                    record.page_count,
                    opt_json(&record.keywords)?,
                    opt_json(&record.is_also)?,
                    opt_json(&record.obsoletes)?,
                    opt_json(&record.obsoleted_by)?,
                    opt_json(&record.updates)?,
                    opt_json(&record.updated_by)?,
                    opt_json(&record.see_also)?,
                    opt_json(&record.references)?,
                    opt_json(&record.referenced_by)?,
                    record.abstract_text,
                    record.draft,
                    record.current_status,
                    record.publication_status,
                    record.stream,
                    record.errata_url,
                    record.area,
                    record.wg_acronym,
                    record.doi,
                ])
                .with_context(|| format!("failed to insert record: {}", record.doc_id))?;
            }
        }
        tx.commit().context("failed to commit record insert")?;

        info!(records = records.len(), "rfc entries inserted");
        Ok(records.len())
    }

    /// Fetch one record back by canonical identifier.
    pub fn fetch(&self, doc_id: &str) -> Result<Option<RfcRecord>> {
        self.conn
            .prepare("SELECT * FROM rfc_entries WHERE doc_id = ?1")?
            .query_row(params![doc_id], |row| {
                Ok(RfcRecord {
                    doc_id: row.get(0)?,
                    title: row.get(1)?,
                    author: from_json_col::<Vec<Author>>(row.get(2)?).unwrap_or_default(),
                    date: from_json_col::<DocDate>(row.get(3)?).unwrap_or_default(),
                    format: from_json_opt(row.get(4)?),
                    page_count: row.get(5)?,
                    keywords: from_json_opt(row.get(6)?),
                    is_also: from_json_opt(row.get(7)?),
                    obsoletes: from_json_opt(row.get(8)?),
                    obsoleted_by: from_json_opt(row.get(9)?),
                    updates: from_json_opt(row.get(10)?),
                    updated_by: from_json_opt(row.get(11)?),
                    see_also: from_json_opt(row.get(12)?),
                    references: from_json_opt(row.get(13)?),
                    referenced_by: from_json_opt(row.get(14)?),
                    abstract_text: row.get(15)?,
                    draft: row.get(16)?,
                    current_status: row.get(17)?,
                    publication_status: row.get(18)?,
                    stream: row.get(19)?,
                    errata_url: row.get(20)?,
                    area: row.get(21)?,
                    wg_acronym: row.get(22)?,
                    doi: row.get(23)?,
                })
            })
            .optional()
            .context("failed to query rfc_entries")
    }

    /// Number of stored records.
    pub fn count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM rfc_entries", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value).context("failed to encode column as JSON")
}

fn opt_json<T: Serialize>(value: &Option<T>) -> Result<Option<String>> {
    value.as_ref().map(|v| to_json(v)).transpose()
}

fn from_json_col<T: DeserializeOwned>(text: String) -> Option<T> {
    serde_json::from_str(&text).ok()
}

fn from_json_opt<T: DeserializeOwned>(text: Option<String>) -> Option<T> {
    text.and_then(|t| serde_json::from_str(&t).ok())
}
