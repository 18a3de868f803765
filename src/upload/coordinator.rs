//! Upload Coordinator: validate a batch, upload sequentially with a
//! per-file timeout, and collect per-file outcomes.
//!
//! Uploads are strictly sequential (never parallel) to bound concurrent
//! load on the storage backend and keep progress reporting
//! deterministic. A single file's failure never aborts the batch; the
//! succeeded subset is what gets inserted into the catalog.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use rand::Rng;
use rand::distributions::Alphanumeric;
use tracing::{debug, info, instrument, warn};

use crate::storage::ObjectStore;

use super::error::{FileRejection, classify_storage_error, UploadError};
use super::rules::{extension_of, title_label};
use super::validation::{FileMetadata, validate_batch};

/// Default bound for one file's upload.
pub const DEFAULT_UPLOAD_TIMEOUT: Duration = Duration::from_secs(120);

/// Length of the random storage-key suffix.
const KEY_SUFFIX_LEN: usize = 8;

/// A user-selected file queued for upload.
#[derive(Debug, Clone)]
pub struct CandidateFile {
    /// Original filename, including extension.
    pub name: String,
    /// MIME type as reported by the selection surface; often empty.
    pub mime_type: Option<String>,
    /// File contents.
    pub bytes: Vec<u8>,
}

impl CandidateFile {
    /// The name/size/type view used by validation.
    #[must_use]
    pub fn metadata(&self) -> FileMetadata {
        FileMetadata {
            name: self.name.clone(),
            size: self.bytes.len() as u64,
            mime_type: self.mime_type.clone(),
        }
    }
}

/// One successfully uploaded file, ready for catalog insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// Synthesized display title.
    pub title: String,
    /// Public URL of the stored object.
    pub file_url: String,
}

/// One rejected file, named individually for user feedback.
#[derive(Debug)]
pub struct RejectedFile {
    /// Original filename.
    pub name: String,
    /// Why it was rejected.
    pub reason: FileRejection,
}

/// Outcome of a batch upload: succeeded subset plus every rejection.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Files uploaded successfully, in completion order.
    pub uploaded: Vec<UploadedFile>,
    /// Files rejected by validation or transfer: validation rejections
    /// first (whole batch checked up front), then transfer failures in
    /// upload order.
    pub rejected: Vec<RejectedFile>,
}

impl BatchReport {
    /// Number of files attempted in this batch.
    #[must_use]
    pub fn attempted(&self) -> usize {
        self.uploaded.len() + self.rejected.len()
    }

    /// True when a non-empty batch produced zero successes.
    #[must_use]
    pub fn all_failed(&self) -> bool {
        self.uploaded.is_empty() && !self.rejected.is_empty()
    }
}

/// Coordinates validation and sequential upload of a file batch.
pub struct UploadCoordinator<'a> {
    store: &'a dyn ObjectStore,
    timeout: Duration,
}

impl<'a> UploadCoordinator<'a> {
    /// Creates a coordinator with the default 120-second per-file bound.
    #[must_use]
    pub fn new(store: &'a dyn ObjectStore) -> Self {
        Self {
            store,
            timeout: DEFAULT_UPLOAD_TIMEOUT,
        }
    }

    /// Overrides the per-file timeout (tests, slow links).
    #[must_use]
    pub fn with_timeout(store: &'a dyn ObjectStore, timeout: Duration) -> Self {
        Self { store, timeout }
    }

    /// Validates and uploads a batch of files for one subject.
    ///
    /// The whole batch is validated up front and every failure recorded
    /// before the first network call; the valid subset is then uploaded
    /// one at a time in selection order, each raced against the
    /// timeout. Titles are synthesized from the file extension: the
    /// bare label for a single-file batch, otherwise
    /// `"{Label} {ordinal}"` where the ordinal counts successes so far
    /// (a failed file does not consume a number).
    #[instrument(skip(self, files), fields(subject_id, files = files.len()))]
    pub async fn upload_batch(&self, subject_id: i64, files: Vec<CandidateFile>) -> BatchReport {
        let batch_len = files.len();
        let mut report = BatchReport::default();

        let metadata: Vec<FileMetadata> = files.iter().map(CandidateFile::metadata).collect();
        let mut valid = Vec::with_capacity(batch_len);
        for (file, result) in files.into_iter().zip(validate_batch(&metadata)) {
            match result {
                Ok(()) => valid.push(file),
                Err(validation_error) => {
                    warn!(name = %file.name, error = %validation_error, "file rejected before upload");
                    report.rejected.push(RejectedFile {
                        name: file.name,
                        reason: FileRejection::Validation(validation_error),
                    });
                }
            }
        }

        let mut success_count = 0usize;
        for file in valid {
            match self.upload_one(subject_id, &file).await {
                Ok(file_url) => {
                    success_count += 1;
                    let title = synthesize_title(&file.name, batch_len, success_count);
                    debug!(name = %file.name, %title, "file uploaded");
                    report.uploaded.push(UploadedFile { title, file_url });
                }
                Err(upload_error) => {
                    warn!(name = %file.name, error = %upload_error, "file upload failed; continuing batch");
                    report.rejected.push(RejectedFile {
                        name: file.name,
                        reason: FileRejection::Transfer(upload_error),
                    });
                }
            }
        }

        info!(
            uploaded = report.uploaded.len(),
            rejected = report.rejected.len(),
            "batch upload finished"
        );
        report
    }

    /// Uploads one file, racing the storage call against the timeout.
    ///
    /// On timeout the transfer is abandoned, not cancelled: the losing
    /// future is dropped and any in-flight write has no observable
    /// effect the caller depends on.
    async fn upload_one(&self, subject_id: i64, file: &CandidateFile) -> Result<String, UploadError> {
        let key = storage_key(subject_id, &file.name);
        let content_type = file
            .mime_type
            .as_deref()
            .filter(|mime| !mime.is_empty());

        let upload = self.store.upload(&key, file.bytes.clone(), content_type);
        match tokio::time::timeout(self.timeout, upload).await {
            Ok(Ok(url)) => Ok(url),
            Ok(Err(storage_error)) => Err(classify_storage_error(&file.name, &storage_error)),
            Err(_elapsed) => Err(UploadError::timeout(&file.name, self.timeout.as_secs())),
        }
    }
}

/// Builds a collision-resistant storage key scoped under the subject:
/// `{subject_id}/{millis}-{random}.{ext}`.
#[must_use]
pub fn storage_key(subject_id: i64, name: &str) -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(KEY_SUFFIX_LEN)
        .map(char::from)
        .collect();

    match extension_of(name) {
        Some(ext) => format!("{subject_id}/{millis}-{suffix}.{ext}"),
        None => format!("{subject_id}/{millis}-{suffix}"),
    }
}

/// Generates a title for a batch-uploaded file: `"{Label}"` when the
/// input batch held exactly one file, else `"{Label} {ordinal}"`.
fn synthesize_title(name: &str, batch_len: usize, ordinal: usize) -> String {
    let label = extension_of(name)
        .map_or("File", |ext| title_label(&ext));
    if batch_len == 1 {
        label.to_string()
    } else {
        format!("{label} {ordinal}")
    }
}
