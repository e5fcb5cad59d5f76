//! Document Store
//!
//! Schema-less JSON documents grouped into collections, stored in one SQLite
//! table. Provides single-document reads and writes plus an atomic
//! read-modify-write transaction.

use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};
use serde_json::Value;
use uuid::Uuid;

use crate::domain::{Document, DomainError, DomainResult};
use super::db::{not_initialized, storage_error, SharedConnection};

#[derive(Clone)]
pub struct DocumentStore {
    conn: SharedConnection,
}

impl DocumentStore {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    /// Fetch one document, `None` when it does not exist
    pub async fn get(&self, collection: &str, id: &str) -> DomainResult<Option<Value>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;
        read_document(conn, collection, id)
    }

    /// Append a document under a freshly generated id and return that id
    pub async fn add(&self, collection: &str, data: &Value) -> DomainResult<String> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        let id = Uuid::new_v4().simple().to_string();
        let now = chrono::Utc::now().timestamp_millis();
        conn.execute(
            "INSERT INTO documents (collection, id, data, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?4)",
            params![collection, id, data.to_string(), now],
        )
        .map_err(storage_error)?;
        Ok(id)
    }

    /// Create or overwrite the document at `collection/id`
    pub async fn set(&self, collection: &str, id: &str, data: &Value) -> DomainResult<()> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;
        write_document(conn, collection, id, data)
    }

    /// All documents of a collection in insertion order
    pub async fn list(&self, collection: &str) -> DomainResult<Vec<(String, Value)>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        let mut stmt = conn
            .prepare("SELECT id, data FROM documents WHERE collection = ?1 ORDER BY created_at, rowid")
            .map_err(storage_error)?;
        let rows = stmt
            .query_map(params![collection], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })
            .map_err(storage_error)?;

        let mut documents = Vec::new();
        for row in rows {
            let (id, raw) = row.map_err(storage_error)?;
            let data = parse(collection, &id, &raw)?;
            documents.push((id, data));
        }
        Ok(documents)
    }

    /// Run `f` inside one immediate (write-locked) transaction.
    ///
    /// Changes made through the handle are committed when `f` returns `Ok`
    /// and rolled back when it returns `Err`.
    pub async fn run_transaction<R>(
        &self,
        f: impl FnOnce(&DocTransaction<'_>) -> DomainResult<R>,
    ) -> DomainResult<R> {
        let mut guard = self.conn.lock().await;
        let conn = guard.as_mut().ok_or_else(not_initialized)?;

        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(storage_error)?;
        let outcome = f(&DocTransaction { conn: &tx });
        match outcome {
            Ok(value) => {
                tx.commit().map_err(storage_error)?;
                Ok(value)
            }
            Err(e) => {
                if let Err(rollback) = tx.rollback() {
                    log::warn!("transaction rollback failed: {}", rollback);
                }
                Err(e)
            }
        }
    }
}

/// Reads and writes visible only inside a running transaction
pub struct DocTransaction<'a> {
    conn: &'a Connection,
}

impl DocTransaction<'_> {
    pub fn get(&self, collection: &str, id: &str) -> DomainResult<Option<Value>> {
        read_document(self.conn, collection, id)
    }

    pub fn set(&self, collection: &str, id: &str, data: &Value) -> DomainResult<()> {
        write_document(self.conn, collection, id, data)
    }

    /// Overwrite an existing document; fails when it does not exist
    pub fn update(&self, collection: &str, id: &str, data: &Value) -> DomainResult<()> {
        let now = chrono::Utc::now().timestamp_millis();
        let changed = self
            .conn
            .execute(
                "UPDATE documents SET data = ?3, updated_at = ?4 WHERE collection = ?1 AND id = ?2",
                params![collection, id, data.to_string(), now],
            )
            .map_err(storage_error)?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("No document to update: {}/{}", collection, id)));
        }
        Ok(())
    }

    pub fn get_doc<D: Document>(&self, id: &str) -> DomainResult<Option<D>> {
        self.get(D::COLLECTION, id)?.map(|value| decode(id, value)).transpose()
    }

    pub fn update_doc<D: Document>(&self, id: &str, doc: &D) -> DomainResult<()> {
        self.update(D::COLLECTION, id, &encode(doc)?)
    }
}

fn read_document(conn: &Connection, collection: &str, id: &str) -> DomainResult<Option<Value>> {
    let raw: Option<String> = conn
        .query_row(
            "SELECT data FROM documents WHERE collection = ?1 AND id = ?2",
            params![collection, id],
            |row| row.get(0),
        )
        .optional()
        .map_err(storage_error)?;
    raw.map(|raw| parse(collection, id, &raw)).transpose()
}

fn write_document(conn: &Connection, collection: &str, id: &str, data: &Value) -> DomainResult<()> {
    let now = chrono::Utc::now().timestamp_millis();
    conn.execute(
        "INSERT INTO documents (collection, id, data, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?4)
         ON CONFLICT(collection, id) DO UPDATE SET data = excluded.data, updated_at = excluded.updated_at",
        params![collection, id, data.to_string(), now],
    )
    .map_err(storage_error)?;
    Ok(())
}

fn parse(collection: &str, id: &str, raw: &str) -> DomainResult<Value> {
    serde_json::from_str(raw)
        .map_err(|e| DomainError::InvalidData(format!("{}/{}: {}", collection, id, e)))
}

/// Decode a stored document into its typed form
pub fn decode<D: Document>(id: &str, value: Value) -> DomainResult<D> {
    serde_json::from_value(value)
        .map_err(|e| DomainError::InvalidData(format!("{}/{}: {}", D::COLLECTION, id, e)))
}

pub fn encode<D: Document>(doc: &D) -> DomainResult<Value> {
    serde_json::to_value(doc).map_err(|e| DomainError::Internal(e.to_string()))
}
