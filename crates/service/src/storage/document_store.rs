use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use tokio::fs;
use tracing::{debug, warn};
use uuid::Uuid;

/// Why a document could not be read or written.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("document `{0}` does not exist")]
    Missing(String),
    #[error("cannot read document `{name}`: {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },
    #[error("document `{name}` is not valid JSON: {source}")]
    Corrupt {
        name: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("document `{name}` has an unexpected shape: {source}")]
    Shape {
        name: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("cannot encode document `{name}`: {source}")]
    Encode {
        name: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("cannot write document `{name}`: {source}")]
    Write {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

/// Named JSON documents stored as `<dir>/<name>.json`.
///
/// Files are UTF-8, pretty-printed with 2-space indentation, non-ASCII kept
/// verbatim. Every save rewrites the whole file; there is no locking, so
/// concurrent writers to the same document resolve as last-write-wins.
#[derive(Clone, Debug)]
pub struct DocumentStore {
    dir: PathBuf,
}

impl DocumentStore {
    /// Open the store, creating `dir` (recursively) if it does not exist.
    pub async fn open<P: Into<PathBuf>>(dir: P) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).await.map_err(|e| StoreError::Write {
            name: dir.display().to_string(),
            source: e,
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_of(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.json"))
    }

    pub async fn exists(&self, name: &str) -> bool {
        fs::try_exists(self.path_of(name)).await.unwrap_or(false)
    }

    /// Read and decode a document, reporting exactly what went wrong.
    pub async fn read<T: DeserializeOwned>(&self, name: &str) -> Result<T, StoreError> {
        let bytes = match fs::read(self.path_of(name)).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::Missing(name.to_string()))
            }
            Err(e) => return Err(StoreError::Io { name: name.to_string(), source: e }),
        };
        serde_json::from_slice(&bytes).map_err(|e| {
            if e.is_data() {
                StoreError::Shape { name: name.to_string(), source: e }
            } else {
                StoreError::Corrupt { name: name.to_string(), source: e }
            }
        })
    }

    /// Read a document, substituting `default` on any failure. Never fails.
    pub async fn load<T: DeserializeOwned>(&self, name: &str, default: T) -> T {
        match self.read(name).await {
            Ok(doc) => doc,
            Err(StoreError::Missing(_)) => default,
            Err(e) => {
                warn!(document = name, error = %e, "falling back to default document");
                default
            }
        }
    }

    /// Like [`load`](Self::load), but a document that parses as JSON with the
    /// wrong structure is reported as `Shape` instead of being replaced.
    pub async fn load_checked<T: DeserializeOwned>(&self, name: &str, default: T) -> Result<T, StoreError> {
        match self.read(name).await {
            Ok(doc) => Ok(doc),
            Err(e @ StoreError::Shape { .. }) => Err(e),
            Err(StoreError::Missing(_)) => Ok(default),
            Err(e) => {
                warn!(document = name, error = %e, "falling back to default document");
                Ok(default)
            }
        }
    }

    /// Serialize `doc` and replace the file. The bytes go to a sibling temp
    /// file first and are renamed over the target.
    pub async fn save<T: Serialize + ?Sized>(&self, name: &str, doc: &T) -> Result<(), StoreError> {
        let data = serde_json::to_vec_pretty(doc)
            .map_err(|e| StoreError::Encode { name: name.to_string(), source: e })?;
        let target = self.path_of(name);
        let tmp = self.dir.join(format!(".{name}.json.{}.tmp", Uuid::new_v4().simple()));

        if let Err(e) = fs::write(&tmp, &data).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(StoreError::Write { name: name.to_string(), source: e });
        }
        if let Err(e) = fs::rename(&tmp, &target).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(StoreError::Write { name: name.to_string(), source: e });
        }
        debug!(document = name, bytes = data.len(), "document saved");
        Ok(())
    }

    /// Write `seed` only if the document file does not exist yet. Returns
    /// whether it was written. Existing files are never touched, even when
    /// they no longer match the seed's shape.
    pub async fn bootstrap<T: Serialize + ?Sized>(&self, name: &str, seed: &T) -> Result<bool, StoreError> {
        if self.exists(name).await {
            return Ok(false);
        }
        self.save(name, seed).await?;
        Ok(true)
    }
}
