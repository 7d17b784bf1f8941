//! SQLite persistence
//!
//! Two key-value tables holding JSON bodies. `put_schemas` replaces the
//! whole collection in one transaction, matching the store contract of
//! persisting the schema collection as a unit.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;

use intake_core::StoreError;
use intake_core::response::AnswerSet;
use intake_core::schema::Assessment;
use intake_core::store::{ResponseStore, SchemaStore};

/// SQLite-backed store
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

fn db_err(err: rusqlite::Error) -> StoreError {
    StoreError::Database(err.to_string())
}

impl SqliteStore {
    /// Open or create the database at path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        Self::from_connection(Connection::open(path).map_err(db_err)?)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::from_connection(Connection::open_in_memory().map_err(db_err)?)
    }

    fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS schemas (
                 id   TEXT PRIMARY KEY,
                 body TEXT NOT NULL
             );
             CREATE TABLE IF NOT EXISTS responses (
                 assessment_id TEXT PRIMARY KEY,
                 body          TEXT NOT NULL
             );",
        )
        .map_err(db_err)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

impl SchemaStore for SqliteStore {
    fn get_schemas(&self) -> Result<Vec<Assessment>, StoreError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare("SELECT body FROM schemas").map_err(db_err)?;
        let rows = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(db_err)?;

        let mut schemas = Vec::new();
        for body in rows {
            let body = body.map_err(db_err)?;
            // One corrupt row should not take the whole collection down.
            if let Ok(assessment) = serde_json::from_str(&body) {
                schemas.push(assessment);
            }
        }
        Ok(schemas)
    }

    fn put_schemas(&self, schemas: &[Assessment]) -> Result<(), StoreError> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction().map_err(db_err)?;
        tx.execute("DELETE FROM schemas", []).map_err(db_err)?;
        for assessment in schemas {
            let body = serde_json::to_string(assessment)?;
            tx.execute(
                "INSERT INTO schemas (id, body) VALUES (?1, ?2)",
                rusqlite::params![assessment.id, body],
            )
            .map_err(db_err)?;
        }
        tx.commit().map_err(db_err)
    }
}

impl ResponseStore for SqliteStore {
    fn get_responses(&self, assessment_id: &str) -> Result<AnswerSet, StoreError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn
            .prepare("SELECT body FROM responses WHERE assessment_id = ?1")
            .map_err(db_err)?;
        let mut rows = stmt.query([assessment_id]).map_err(db_err)?;

        match rows.next().map_err(db_err)? {
            Some(row) => {
                let body: String = row.get(0).map_err(db_err)?;
                Ok(serde_json::from_str(&body).unwrap_or_default())
            }
            None => Ok(AnswerSet::new()),
        }
    }

    fn put_responses(&self, assessment_id: &str, answers: &AnswerSet) -> Result<(), StoreError> {
        let body = serde_json::to_string(answers)?;
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO responses (assessment_id, body) VALUES (?1, ?2)
             ON CONFLICT(assessment_id) DO UPDATE SET body = excluded.body",
            rusqlite::params![assessment_id, body],
        )
        .map_err(db_err)?;
        Ok(())
    }
}
