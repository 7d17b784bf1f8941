//! JSON-file persistence
//!
//! One file for the schema collection, one file per assessment's responses.
//! Reads are forgiving: a missing or corrupt file deserializes to empty, so
//! a damaged data directory never blocks a session from starting.

use std::fs;
use std::path::{Path, PathBuf};

use intake_core::StoreError;
use intake_core::response::AnswerSet;
use intake_core::schema::Assessment;
use intake_core::store::{ResponseStore, SchemaStore};

/// Schema collection file name
const SCHEMAS_FILE: &str = "assessments.json";
/// Directory holding one responses file per assessment
const RESPONSES_DIR: &str = "responses";

/// File-backed store rooted at a data directory
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    /// Create a store rooted at `root`. Nothing is touched on disk until the
    /// first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn schemas_path(&self) -> PathBuf {
        self.root.join(SCHEMAS_FILE)
    }

    fn responses_path(&self, assessment_id: &str) -> PathBuf {
        self.root
            .join(RESPONSES_DIR)
            .join(format!("{assessment_id}.json"))
    }

    fn write_file(&self, path: &Path, content: &str) -> Result<(), StoreError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        Ok(())
    }
}

impl SchemaStore for JsonFileStore {
    fn get_schemas(&self) -> Result<Vec<Assessment>, StoreError> {
        let path = self.schemas_path();
        if !path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&content).unwrap_or_default())
    }

    fn put_schemas(&self, schemas: &[Assessment]) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(schemas)?;
        self.write_file(&self.schemas_path(), &content)
    }
}

impl ResponseStore for JsonFileStore {
    fn get_responses(&self, assessment_id: &str) -> Result<AnswerSet, StoreError> {
        let path = self.responses_path(assessment_id);
        if !path.exists() {
            return Ok(AnswerSet::new());
        }
        let content = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&content).unwrap_or_default())
    }

    fn put_responses(&self, assessment_id: &str, answers: &AnswerSet) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(answers)?;
        self.write_file(&self.responses_path(assessment_id), &content)
    }
}
