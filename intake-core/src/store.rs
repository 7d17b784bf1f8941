//! Persistence collaborator contracts and the in-memory store

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::StoreError;
use crate::response::AnswerSet;
use crate::schema::Assessment;

/// Storage for authored assessment schemas, persisted as one collection
pub trait SchemaStore: Send + Sync {
    fn get_schemas(&self) -> Result<Vec<Assessment>, StoreError>;
    fn put_schemas(&self, schemas: &[Assessment]) -> Result<(), StoreError>;
}

/// Storage for per-assessment response snapshots
pub trait ResponseStore: Send + Sync {
    /// The saved answer set; empty if nothing was ever saved
    fn get_responses(&self, assessment_id: &str) -> Result<AnswerSet, StoreError>;
    fn put_responses(&self, assessment_id: &str, answers: &AnswerSet) -> Result<(), StoreError>;
}

/// In-memory store for tests and previews.
///
/// `fail_reads` / `fail_writes` switch subsequent calls into errors, for
/// exercising the best-effort degradation paths.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    schemas: Vec<Assessment>,
    responses: HashMap<String, AnswerSet>,
    fail_reads: bool,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent read fail
    pub fn fail_reads(&self) {
        self.inner.lock().unwrap().fail_reads = true;
    }

    /// Make every subsequent write fail
    pub fn fail_writes(&self) {
        self.inner.lock().unwrap().fail_writes = true;
    }

    fn injected(what: &str) -> StoreError {
        StoreError::Io(std::io::Error::other(format!("injected {what} failure")))
    }
}

impl SchemaStore for MemoryStore {
    fn get_schemas(&self) -> Result<Vec<Assessment>, StoreError> {
        let inner = self.inner.lock().unwrap();
        if inner.fail_reads {
            return Err(Self::injected("read"));
        }
        Ok(inner.schemas.clone())
    }

    fn put_schemas(&self, schemas: &[Assessment]) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.fail_writes {
            return Err(Self::injected("write"));
        }
        inner.schemas = schemas.to_vec();
        Ok(())
    }
}

impl ResponseStore for MemoryStore {
    fn get_responses(&self, assessment_id: &str) -> Result<AnswerSet, StoreError> {
        let inner = self.inner.lock().unwrap();
        if inner.fail_reads {
            return Err(Self::injected("read"));
        }
        Ok(inner.responses.get(assessment_id).cloned().unwrap_or_default())
    }

    fn put_responses(&self, assessment_id: &str, answers: &AnswerSet) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.fail_writes {
            return Err(Self::injected("write"));
        }
        inner
            .responses
            .insert(assessment_id.to_string(), answers.clone());
        Ok(())
    }
}
