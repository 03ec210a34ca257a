use super::types::{Submission, SubmissionRecord};

use chrono::{DateTime, Utc};
use serde_json::Value;
use std::future::Future;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;
use tokio::sync::Mutex;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to create data directory {}: {source}", path.display())]
    CreateDir { path: PathBuf, source: io::Error },
    #[error("failed to serialize collection: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("write task did not complete: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// How concurrent appends are coordinated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WritePolicy {
    /// One read-modify-write cycle at a time. No submission is lost.
    #[default]
    Serialized,
    /// Appends run their read-modify-write cycles independently. Two cycles
    /// that overlap both start from the same collection and the later rename
    /// wins, dropping the other record. The file itself stays well-formed.
    Unserialized,
}

/// Append-only persistence of the response collection.
///
/// The store is the only writer of the collection. Callers see it through
/// `read_all` and `append` and never mutate existing records.
pub trait RecordStore: Send + Sync + 'static {
    /// Returns every stored record in append order.
    ///
    /// Missing, unreadable or malformed storage reads as an empty collection.
    /// Stored elements that don't fit the record shape are skipped here but
    /// stay on disk.
    fn read_all(&self) -> impl Future<Output = Vec<SubmissionRecord>> + Send;

    /// Stamps the submission, appends it and rewrites the collection.
    fn append(
        &self,
        submission: Submission,
    ) -> impl Future<Output = Result<SubmissionRecord, StoreError>> + Send;

    /// Number of records `read_all` would return.
    fn count(&self) -> impl Future<Output = usize> + Send;
}

/// Record store backed by a single JSON array on disk.
pub struct JsonFileStore {
    path: PathBuf,
    policy: WritePolicy,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Opens the store at `path`, creating the parent directory if needed.
    /// The data file itself is created on the first append.
    pub async fn open(path: impl Into<PathBuf>, policy: WritePolicy) -> Result<Self, StoreError> {
        let path = path.into();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| StoreError::CreateDir {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        tracing::info!("Record store at {} ({:?} writes)", path.display(), policy);

        Ok(Self {
            path,
            policy,
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the stored array element by element.
    ///
    /// Only content that isn't a JSON array (missing, unreadable, unparseable)
    /// counts as no data. Elements of any shape are kept so a rewrite never
    /// drops them.
    async fn load_raw(&self) -> Vec<Value> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", self.path.display(), e);
                return Vec::new();
            }
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Vec::new();
        }

        match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Array(items)) => items,
            Ok(_) => {
                tracing::warn!(
                    "Collection in {} is not an array, treating as empty",
                    self.path.display()
                );
                Vec::new()
            }
            Err(e) => {
                tracing::warn!(
                    "Malformed collection in {}, treating as empty: {}",
                    self.path.display(),
                    e
                );
                Vec::new()
            }
        }
    }

    /// Replaces the whole collection on disk.
    ///
    /// The new content is written and synced to a temp file next to the data
    /// file and then renamed over it, so readers see either the old or the new
    /// collection. The temp file is removed when dropped if it was never persisted.
    async fn persist(&self, items: &[Value]) -> Result<(), StoreError> {
        let body = serde_json::to_vec_pretty(items)?;
        let path = self.path.clone();

        tokio::task::spawn_blocking(move || write_atomic(&path, &body)).await?
    }

    async fn read_modify_write(
        &self,
        submission: Submission,
    ) -> Result<SubmissionRecord, StoreError> {
        let mut items = self.load_raw().await;

        let timestamp = next_timestamp(last_timestamp(&items), Utc::now());
        let record = SubmissionRecord::new(submission, timestamp);
        items.push(serde_json::to_value(&record)?);

        self.persist(&items).await?;
        tracing::debug!("Collection now holds {} records", items.len());
        Ok(record)
    }
}

impl RecordStore for JsonFileStore {
    async fn read_all(&self) -> Vec<SubmissionRecord> {
        self.load_raw()
            .await
            .into_iter()
            .enumerate()
            .filter_map(|(index, item)| match serde_json::from_value(item) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!(
                        "Skipping stored element {} in {}: {}",
                        index,
                        self.path.display(),
                        e
                    );
                    None
                }
            })
            .collect()
    }

    async fn append(&self, submission: Submission) -> Result<SubmissionRecord, StoreError> {
        match self.policy {
            WritePolicy::Serialized => {
                let _guard = self.write_lock.lock().await;
                self.read_modify_write(submission).await
            }
            WritePolicy::Unserialized => self.read_modify_write(submission).await,
        }
    }

    async fn count(&self) -> usize {
        self.read_all().await.len()
    }
}

/// Picks the timestamp for the next record.
///
/// Never earlier than the last persisted record, so timestamps stay
/// non-decreasing in append order even if the wall clock steps back.
/// Equal values are allowed.
pub fn next_timestamp(last: Option<DateTime<Utc>>, now: DateTime<Utc>) -> DateTime<Utc> {
    match last {
        Some(last) if last > now => last,
        _ => now,
    }
}

/// Timestamp of the newest element that carries a readable one.
fn last_timestamp(items: &[Value]) -> Option<DateTime<Utc>> {
    items.iter().rev().find_map(|item| {
        item.get("timestamp")?
            .as_str()?
            .parse::<DateTime<Utc>>()
            .ok()
    })
}

fn write_atomic(path: &Path, body: &[u8]) -> Result<(), StoreError> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut temp_file = NamedTempFile::new_in(parent).map_err(|source| StoreError::Write {
        path: parent.to_path_buf(),
        source,
    })?;

    if let Err(source) = temp_file
        .write_all(body)
        .and_then(|()| temp_file.as_file().sync_all())
    {
        return Err(StoreError::Write {
            path: temp_file.path().to_path_buf(),
            source,
        });
    }

    temp_file
        .persist(path)
        .map_err(|e| StoreError::Write {
            path: path.to_path_buf(),
            source: e.error,
        })?;

    Ok(())
}
