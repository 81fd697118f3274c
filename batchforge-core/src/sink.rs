//! Where archive documents end up.
//!
//! With `overwrite` a write always replaces the target. Without it an
//! existing target is left alone: the same entity (same `m_def` and
//! `lab_id`) with the same content, `datetime` aside, is reported as not
//! written, and anything else is a conflict.

use crate::{
    error::SinkError,
    reference::{ContainerId, ReferenceMinter},
};
use batchforge_schemas::file_formats::ARCHIVE_SUFFIX;
use serde_json::Value;
use std::{
    collections::HashMap,
    fs,
    io::Write,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, PoisonError},
};

pub trait ArchiveSink: Send + Sync {
    /// Returns `Ok(true)` iff a new document was written.
    fn write(
        &self,
        container: &ContainerId,
        filename: &str,
        payload: &Value,
        overwrite: bool,
    ) -> Result<bool, SinkError>;

    /// Archive filenames in the container, sorted.
    fn list(&self, container: &ContainerId) -> Result<Vec<String>, SinkError>;

    fn read(&self, container: &ContainerId, filename: &str) -> Result<Option<Value>, SinkError>;
}

/// `(m_def, lab_id)` of a document payload.
fn identity(payload: &Value) -> (Option<&str>, Option<&str>) {
    let data = &payload["data"];
    (data["m_def"].as_str(), data["lab_id"].as_str())
}

/// Fields of `data` other than `datetime`, which is the emission time
/// for most entities.
fn content(payload: &Value) -> impl Iterator<Item = (&String, &Value)> {
    payload["data"]
        .as_object()
        .into_iter()
        .flatten()
        .filter(|(key, _)| key.as_str() != "datetime")
}

fn check_existing(filename: &str, existing: &Value, payload: &Value) -> Result<bool, SinkError> {
    let (m_def, lab_id) = identity(existing);
    let existing_label = || format!("{} {}", m_def.unwrap_or("?"), lab_id.unwrap_or("?"));
    if identity(existing) != identity(payload) {
        return Err(SinkError::Conflict {
            filename: filename.to_string(),
            existing: existing_label(),
        });
    }
    if content(existing).ne(content(payload)) {
        return Err(SinkError::Changed {
            filename: filename.to_string(),
            existing: existing_label(),
        });
    }
    Ok(false)
}

fn validate_filename(filename: &str) -> Result<(), SinkError> {
    let valid = !filename.is_empty()
        && filename != "."
        && filename != ".."
        && !filename.contains(['/', '\\', '\0']);
    if valid {
        Ok(())
    } else {
        Err(SinkError::InvalidFilename(filename.to_string()))
    }
}

/// Writes `<root>/<container>/<filename>`, each file atomically through a
/// temporary file in the same directory.
pub struct FsSink {
    root: PathBuf,
    locks: Mutex<HashMap<PathBuf, Arc<Mutex<()>>>>,
}

impl FsSink {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn container_dir(&self, container: &ContainerId) -> PathBuf {
        self.root.join(container.as_str())
    }

    fn lock_for(&self, path: &Path) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        locks.entry(path.to_path_buf()).or_default().clone()
    }

    /// Drops the entry for `path` once only the map and `lock` hold it.
    fn release(&self, path: &Path, lock: Arc<Mutex<()>>) {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        if Arc::strong_count(&lock) == 2 {
            locks.remove(path);
        }
    }

    fn write_locked(
        &self,
        dir: &Path,
        path: &Path,
        filename: &str,
        payload: &Value,
        overwrite: bool,
    ) -> Result<bool, SinkError> {
        let display = path.display().to_string();
        if !overwrite {
            if let Some(existing) = Self::read_path(path)? {
                return check_existing(filename, &existing, payload);
            }
        }

        fs::create_dir_all(dir).map_err(|e| SinkError::FileIO(dir.display().to_string(), e))?;
        let mut file =
            tempfile::NamedTempFile::new_in(dir).map_err(|e| SinkError::FileIO(display.clone(), e))?;
        serde_json::to_writer_pretty(&mut file, payload)
            .map_err(|e| SinkError::Corrupt(display.clone(), e))?;
        file.flush().map_err(|e| SinkError::FileIO(display.clone(), e))?;
        file.persist(path)
            .map_err(|e| SinkError::FileIO(display, e.error))?;
        Ok(true)
    }

    #[cfg(test)]
    fn tracked_locks(&self) -> usize {
        self.locks.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    fn read_path(path: &Path) -> Result<Option<Value>, SinkError> {
        let display = path.display().to_string();
        match fs::read(path) {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map(Some)
                .map_err(|e| SinkError::Corrupt(display, e)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SinkError::FileIO(display, e)),
        }
    }
}

impl ArchiveSink for FsSink {
    fn write(
        &self,
        container: &ContainerId,
        filename: &str,
        payload: &Value,
        overwrite: bool,
    ) -> Result<bool, SinkError> {
        validate_filename(filename)?;
        let dir = self.container_dir(container);
        let path = dir.join(filename);

        let lock = self.lock_for(&path);
        let result = {
            let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
            self.write_locked(&dir, &path, filename, payload, overwrite)
        };
        self.release(&path, lock);
        result
    }

    fn list(&self, container: &ContainerId) -> Result<Vec<String>, SinkError> {
        let dir = self.container_dir(container);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(SinkError::FileIO(dir.display().to_string(), e)),
        };
        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| SinkError::FileIO(dir.display().to_string(), e))?;
            if let Some(name) = entry.file_name().to_str() {
                if name.ends_with(ARCHIVE_SUFFIX) {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    fn read(&self, container: &ContainerId, filename: &str) -> Result<Option<Value>, SinkError> {
        validate_filename(filename)?;
        Self::read_path(&self.container_dir(container).join(filename))
    }
}

/// Keeps documents in memory, in write order.
#[derive(Default)]
pub struct MemorySink {
    documents: Mutex<Vec<(String, String, Value)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// `(filename, payload)` pairs of one container, in first-write order.
    pub fn documents(&self, container: &ContainerId) -> Vec<(String, Value)> {
        self.documents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|(c, _, _)| c == container.as_str())
            .map(|(_, name, payload)| (name.clone(), payload.clone()))
            .collect()
    }
}

impl ArchiveSink for MemorySink {
    fn write(
        &self,
        container: &ContainerId,
        filename: &str,
        payload: &Value,
        overwrite: bool,
    ) -> Result<bool, SinkError> {
        validate_filename(filename)?;
        let mut documents = self.documents.lock().unwrap_or_else(PoisonError::into_inner);
        let existing = documents
            .iter_mut()
            .find(|(c, name, _)| c == container.as_str() && name == filename);
        match existing {
            Some((_, _, current)) if overwrite => {
                *current = payload.clone();
                Ok(true)
            }
            Some((_, _, current)) => check_existing(filename, current, payload),
            None => {
                documents.push((
                    container.as_str().to_string(),
                    filename.to_string(),
                    payload.clone(),
                ));
                Ok(true)
            }
        }
    }

    fn list(&self, container: &ContainerId) -> Result<Vec<String>, SinkError> {
        let mut names: Vec<String> = self
            .documents(container)
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        names.sort();
        Ok(names)
    }

    fn read(&self, container: &ContainerId, filename: &str) -> Result<Option<Value>, SinkError> {
        Ok(self
            .documents(container)
            .into_iter()
            .find(|(name, _)| name == filename)
            .map(|(_, payload)| payload))
    }
}

/// Reference of the first sample document (by filename) whose `lab_id`
/// starts with `partial_id`.
pub fn resolve_sample_reference(
    sink: &dyn ArchiveSink,
    minter: &ReferenceMinter,
    container: &ContainerId,
    partial_id: &str,
) -> Result<Option<String>, SinkError> {
    for filename in sink.list(container)? {
        let Some(payload) = sink.read(container, &filename)? else {
            continue;
        };
        if let (Some("Sample"), Some(lab_id)) = identity(&payload) {
            if lab_id.starts_with(partial_id) {
                return Ok(Some(minter.mint(container, &filename)));
            }
        }
    }
    Ok(None)
}
