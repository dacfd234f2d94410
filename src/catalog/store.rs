use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use thiserror::Error;

use crate::catalog::record::Record;
use crate::catalog::taxonomy;
use crate::utils::text::normalize_name;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog: {0}")]
    Read(std::io::Error),

    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to persist catalog: {0}")]
    Persist(std::io::Error),
}

/// Mapping from category to the ordered records within it.
pub type TypeGroup = BTreeMap<String, Vec<Record>>;

/// The whole persisted document: `type -> category -> records`.
///
/// Keys outside the recognized taxonomy are kept as-is so a document with
/// extra sections round-trips unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog(pub BTreeMap<String, TypeGroup>);

impl Catalog {
    /// Materialize an empty list for every recognized `(type, category)`
    /// scope missing from the document, so lookups never hit a hole.
    pub fn ensure_scopes(&mut self) {
        for (kind, category) in taxonomy::scopes() {
            self.0
                .entry(kind.to_string())
                .or_default()
                .entry(category.to_string())
                .or_default();
        }
    }

    #[must_use]
    pub fn group(&self, kind: &str) -> Option<&TypeGroup> {
        self.0.get(kind)
    }

    #[must_use]
    pub fn records(&self, kind: &str, category: &str) -> Option<&[Record]> {
        self.0
            .get(kind)
            .and_then(|group| group.get(category))
            .map(Vec::as_slice)
    }
}

/// Persistence backend the store loads from and flushes to.
///
/// The production backend is a single JSON file; tests swap in whatever
/// they need without touching the store logic.
pub trait CatalogBackend: Send + Sync {
    /// Read the entire document. Called once at startup; failure is fatal.
    fn load(&self) -> Result<Catalog, CatalogError>;

    /// Rewrite the entire document after a mutation.
    fn persist(&self, catalog: &Catalog) -> Result<(), CatalogError>;
}

/// Backend that keeps the catalog in one JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CatalogBackend for JsonFileBackend {
    fn load(&self) -> Result<Catalog, CatalogError> {
        let content = std::fs::read_to_string(&self.path).map_err(CatalogError::Read)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn persist(&self, catalog: &Catalog) -> Result<(), CatalogError> {
        let json = serde_json::to_string(catalog)?;
        std::fs::write(&self.path, json).map_err(CatalogError::Persist)
    }
}

/// The in-memory catalog plus the backend it flushes to.
///
/// One instance is created at startup and handed to every handler; all
/// reads and writes go through it.
pub struct CatalogStore {
    backend: Box<dyn CatalogBackend>,
    catalog: Catalog,
}

impl CatalogStore {
    /// Load the document through `backend`. The process cannot start if
    /// the document is missing or unparsable.
    pub fn open(backend: Box<dyn CatalogBackend>) -> Result<Self, CatalogError> {
        let mut catalog = backend.load()?;
        catalog.ensure_scopes();
        Ok(Self { backend, catalog })
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Full category mapping for a type.
    #[must_use]
    pub fn group(&self, kind: &str) -> Option<&TypeGroup> {
        self.catalog.group(kind)
    }

    /// The record list for one `(type, category)` scope.
    #[must_use]
    pub fn records(&self, kind: &str, category: &str) -> Option<&[Record]> {
        self.catalog.records(kind, category)
    }

    /// Look up a record by normalized name within a scope.
    #[must_use]
    pub fn find(&self, kind: &str, category: &str, name: &str) -> Option<&Record> {
        let key = normalize_name(name);
        self.records(kind, category)?
            .iter()
            .find(|record| record.normalized_name() == key)
    }

    /// Swap the record list for one scope and flush the whole catalog.
    ///
    /// A persist failure is reported to the caller but the in-memory
    /// mutation stays in place; there is no rollback.
    pub fn replace_records(
        &mut self,
        kind: &str,
        category: &str,
        records: Vec<Record>,
    ) -> Result<(), CatalogError> {
        self.catalog
            .0
            .entry(kind.to_string())
            .or_default()
            .insert(category.to_string(), records);
        self.backend.persist(&self.catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"{
        "heroes": {
            "strength": [
                {"name": "Axe Knight", "description": "A sturdy melee fighter"}
            ]
        }
    }"#;

    fn sample_file() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_open_loads_document() {
        let file = sample_file();
        let store = CatalogStore::open(Box::new(JsonFileBackend::new(file.path()))).unwrap();

        let records = store.records("heroes", "strength").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Axe Knight");
    }

    #[test]
    fn test_open_fills_missing_scopes() {
        let file = sample_file();
        let store = CatalogStore::open(Box::new(JsonFileBackend::new(file.path()))).unwrap();

        // Scopes absent from the file are present and empty after load
        assert_eq!(store.records("items", "magical").map(<[_]>::len), Some(0));
        assert_eq!(store.records("heroes", "universal").map(<[_]>::len), Some(0));
    }

    #[test]
    fn test_open_missing_file_fails() {
        let backend = JsonFileBackend::new("/nonexistent/db.json");
        let result = CatalogStore::open(Box::new(backend));
        assert!(matches!(result, Err(CatalogError::Read(_))));
    }

    #[test]
    fn test_open_unparsable_file_fails() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"not json").unwrap();

        let result = CatalogStore::open(Box::new(JsonFileBackend::new(file.path())));
        assert!(matches!(result, Err(CatalogError::Parse(_))));
    }

    #[test]
    fn test_find_is_case_and_space_insensitive() {
        let file = sample_file();
        let store = CatalogStore::open(Box::new(JsonFileBackend::new(file.path()))).unwrap();

        assert!(store.find("heroes", "strength", "axeknight").is_some());
        assert!(store.find("heroes", "strength", "AXE KNIGHT").is_some());
        assert!(store.find("heroes", "strength", "axe master").is_none());
    }

    #[test]
    fn test_replace_records_persists_whole_catalog() {
        let file = sample_file();
        let mut store = CatalogStore::open(Box::new(JsonFileBackend::new(file.path()))).unwrap();

        let new_list = vec![
            Record::new("Axe Knight", "A sturdy melee fighter"),
            Record::new("Pit Bruiser", "Trades health for damage"),
        ];
        store
            .replace_records("heroes", "strength", new_list)
            .unwrap();

        // Reload from disk and confirm read-after-write consistency
        let reloaded = CatalogStore::open(Box::new(JsonFileBackend::new(file.path()))).unwrap();
        assert_eq!(reloaded.records("heroes", "strength").unwrap().len(), 2);
        assert!(reloaded.find("heroes", "strength", "pitbruiser").is_some());
    }

    #[test]
    fn test_unrecognized_sections_round_trip() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"relics": {"ancient": []}}"#).unwrap();

        let mut store = CatalogStore::open(Box::new(JsonFileBackend::new(file.path()))).unwrap();
        store.replace_records("heroes", "strength", Vec::new()).unwrap();

        let reloaded = CatalogStore::open(Box::new(JsonFileBackend::new(file.path()))).unwrap();
        assert!(reloaded.group("relics").is_some());
    }
}
