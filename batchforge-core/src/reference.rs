//! Stable cross-document references.
//!
//! A reference can be computed from the container id and the target
//! filename alone, so documents may point at each other before any of
//! them is written.

use base64::{engine::general_purpose::URL_SAFE, Engine as _};
use sha2::{Digest, Sha512};
use std::fmt;

/// Opaque identifier of the archive container a batch is written into.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContainerId(String);

impl ContainerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Host-provided hashing that turns (container, filename) into an entry id.
pub trait EntryHasher: Send + Sync {
    fn entry_id(&self, container_id: &ContainerId, filename: &str) -> String;
}

/// SHA-512 over the concatenated inputs, web-safe base64, first 28 chars.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebsafeSha512;

const ENTRY_ID_LEN: usize = 28;

impl EntryHasher for WebsafeSha512 {
    fn entry_id(&self, container_id: &ContainerId, filename: &str) -> String {
        let mut hasher = Sha512::new();
        hasher.update(container_id.as_str().as_bytes());
        hasher.update(filename.as_bytes());
        let mut encoded = URL_SAFE.encode(hasher.finalize());
        encoded.truncate(ENTRY_ID_LEN);
        encoded
    }
}

/// Mints `../uploads/<container>/archive/<entry-id>#data` references.
pub struct ReferenceMinter {
    hasher: Box<dyn EntryHasher>,
}

impl Default for ReferenceMinter {
    fn default() -> Self {
        Self::new(Box::new(WebsafeSha512))
    }
}

impl ReferenceMinter {
    pub fn new(hasher: Box<dyn EntryHasher>) -> Self {
        Self { hasher }
    }

    pub fn mint(&self, container_id: &ContainerId, filename: &str) -> String {
        format!(
            "../uploads/{}/archive/{}#data",
            container_id,
            self.hasher.entry_id(container_id, filename)
        )
    }
}
