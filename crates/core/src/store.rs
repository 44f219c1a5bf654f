//! File-backed JSON document store.
//!
//! Records live one-per-file under per-collection directories:
//!
//! ```text
//! <data_dir>/
//!   employees/<employeeCode>.json
//!   doctors/<doctorCode>.json
//!   appointments/<uuid>.json
//! ```
//!
//! Document ids become file names, so they are restricted to ASCII
//! alphanumerics, `-` and `_` before touching the file system. Collection
//! scans skip files that fail to parse, with a warning, rather than failing
//! the whole listing.
//!
//! There is no locking or transaction layer; each operation is a single
//! read or write and callers see storage failures immediately.

use crate::{CoreError, CoreResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Collection holding `Employee` documents, keyed by employee code.
pub const EMPLOYEES: &str = "employees";
/// Collection holding `Doctor` documents, keyed by doctor code.
pub const DOCTORS: &str = "doctors";
/// Collection holding `Appointment` documents, keyed by generated id.
pub const APPOINTMENTS: &str = "appointments";

/// Handle to the on-disk document store.
///
/// Cheap to clone; clones share the same root directory.
#[derive(Clone, Debug)]
pub struct DocumentStore {
    root: PathBuf,
}

impl DocumentStore {
    /// Opens (creating if necessary) a store rooted at `root`.
    pub fn open(root: impl AsRef<Path>) -> CoreResult<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).map_err(CoreError::StorageDirCreation)?;
        Ok(Self { root })
    }

    fn collection_dir(&self, collection: &str) -> PathBuf {
        self.root.join(collection)
    }

    fn document_path(&self, collection: &str, id: &str) -> CoreResult<PathBuf> {
        validate_id(id)?;
        Ok(self.collection_dir(collection).join(format!("{id}.json")))
    }

    /// Writes `doc` under `collection/<id>.json`, replacing any existing
    /// document with the same id.
    pub fn put<T: Serialize>(&self, collection: &str, id: &str, doc: &T) -> CoreResult<()> {
        let path = self.document_path(collection, id)?;
        fs::create_dir_all(self.collection_dir(collection))
            .map_err(CoreError::StorageDirCreation)?;
        let contents = serde_json::to_string_pretty(doc).map_err(CoreError::Serialization)?;
        fs::write(&path, contents).map_err(CoreError::FileWrite)?;
        Ok(())
    }

    /// Reads the document with the given id, or `None` when absent.
    pub fn get<T: DeserializeOwned>(&self, collection: &str, id: &str) -> CoreResult<Option<T>> {
        let path = self.document_path(collection, id)?;
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(CoreError::FileRead(e)),
        };
        let doc = serde_json::from_str(&contents).map_err(CoreError::Deserialization)?;
        Ok(Some(doc))
    }

    /// Removes the document with the given id. Returns `false` when no such
    /// document existed.
    pub fn remove(&self, collection: &str, id: &str) -> CoreResult<bool> {
        let path = self.document_path(collection, id)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(CoreError::FileDelete(e)),
        }
    }

    /// Reads every document in a collection.
    ///
    /// Files that fail to parse are logged and skipped. Order is whatever
    /// the directory iteration yields; callers sort.
    pub fn scan<T: DeserializeOwned>(&self, collection: &str) -> CoreResult<Vec<T>> {
        let dir = self.collection_dir(collection);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(CoreError::FileRead(e)),
        };

        let mut docs = Vec::new();
        for entry in entries {
            let path = entry.map_err(CoreError::FileRead)?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let contents = fs::read_to_string(&path).map_err(CoreError::FileRead)?;
            match serde_json::from_str(&contents) {
                Ok(doc) => docs.push(doc),
                Err(e) => {
                    tracing::warn!("skipping unparseable document {}: {}", path.display(), e);
                }
            }
        }
        Ok(docs)
    }

    /// True when the collection holds no documents.
    pub fn is_empty(&self, collection: &str) -> CoreResult<bool> {
        let dir = self.collection_dir(collection);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(true),
            Err(e) => return Err(CoreError::FileRead(e)),
        };
        for entry in entries {
            let path = entry.map_err(CoreError::FileRead)?.path();
            if path.extension().and_then(|ext| ext.to_str()) == Some("json") {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

fn validate_id(id: &str) -> CoreResult<()> {
    let well_formed = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if well_formed {
        Ok(())
    } else {
        Err(CoreError::InvalidDocumentId(id.to_string()))
    }
}
