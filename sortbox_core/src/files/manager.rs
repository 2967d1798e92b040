use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Local};
use tokio::fs as async_fs;
use tokio::io::AsyncWriteExt;

use crate::config::StorageConfig;
use crate::error::Result;
use super::category::Category;
use super::models::{FileUpload, StoredFile, StoredUpload};
use super::validation::{is_plain_filename, sanitize_filename};

#[derive(Debug, Clone)]
pub struct FileManagerConfig {
    pub storage_path: PathBuf,
}

impl Default for FileManagerConfig {
    fn default() -> Self {
        Self {
            storage_path: PathBuf::from("uploads"),
        }
    }
}

impl From<&StorageConfig> for FileManagerConfig {
    fn from(storage: &StorageConfig) -> Self {
        Self {
            storage_path: storage.root.clone(),
        }
    }
}

/// Filesystem backed store that files uploads into one folder per [`Category`].
///
/// Holds no state besides its configuration; every listing re-scans the disk.
#[derive(Debug, Clone)]
pub struct FileManager {
    config: Arc<FileManagerConfig>,
}

impl FileManager {
    pub fn new(config: FileManagerConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn with_default_config() -> Self {
        Self::new(FileManagerConfig::default())
    }

    pub fn storage_path(&self) -> &std::path::Path {
        &self.config.storage_path
    }

    pub fn category_path(&self, category: Category) -> PathBuf {
        self.config.storage_path.join(category.as_str())
    }

    /// Create the storage root and every category folder. Idempotent.
    pub async fn initialize(&self) -> Result<()> {
        for category in Category::ALL {
            async_fs::create_dir_all(self.category_path(category)).await?;
        }

        tracing::info!(
            storage_path = %self.config.storage_path.display(),
            "storage folders ready"
        );
        Ok(())
    }

    pub async fn store_file(&self, upload: FileUpload) -> Result<StoredUpload> {
        self.store_file_at(upload, Local::now()).await
    }

    /// Write an upload using `now` for the on-disk name's timestamp suffix.
    ///
    /// An existing file with the same on-disk name is overwritten.
    pub async fn store_file_at(
        &self,
        upload: FileUpload,
        now: DateTime<Local>,
    ) -> Result<StoredUpload> {
        let filename = sanitize_filename(&upload.original_filename);
        let category = Category::classify(&filename);
        let on_disk_name = timestamped_name(&filename, now);

        let storage_path = self.category_path(category).join(&on_disk_name);

        let mut file = async_fs::File::create(&storage_path).await?;
        file.write_all(&upload.data).await?;
        file.sync_all().await?;

        tracing::info!(
            original = %upload.original_filename,
            stored = %on_disk_name,
            category = %category,
            size = upload.data.len(),
            "stored upload"
        );

        Ok(StoredUpload {
            filename: on_disk_name,
            category,
            size: upload.data.len() as u64,
        })
    }

    /// Every regular file in any subdirectory of the storage root, newest first.
    ///
    /// Each file is labelled with the name of the folder it sits in directly.
    /// Loose files at the top of the root are not part of the listing.
    pub async fn list_files(&self) -> Result<Vec<StoredFile>> {
        let mut files = Vec::new();
        let mut pending = vec![self.config.storage_path.clone()];

        while let Some(dir) = pending.pop() {
            let mut entries = match async_fs::read_dir(&dir).await {
                Ok(entries) => entries,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    tracing::warn!(dir = %dir.display(), "storage folder missing, skipping");
                    continue;
                }
                Err(e) => return Err(e.into()),
            };
            let at_root = dir == self.config.storage_path;

            while let Some(entry) = entries.next_entry().await? {
                let metadata = entry.metadata().await?;
                if metadata.is_dir() {
                    pending.push(entry.path());
                } else if metadata.is_file() && !at_root {
                    files.push(StoredFile {
                        name: entry.file_name().to_string_lossy().into_owned(),
                        category: folder_name(&dir),
                        size: metadata.len(),
                        modified: DateTime::<Local>::from(metadata.modified()?),
                    });
                }
            }
        }

        files.sort_by(|a, b| b.modified.cmp(&a.modified));

        tracing::debug!(count = files.len(), "listed stored files");
        Ok(files)
    }

    /// Find `filename` in the category folders, first category in declaration order wins.
    ///
    /// Names that are not a single plain path component never match.
    pub async fn locate_file(&self, filename: &str) -> Result<Option<PathBuf>> {
        if !is_plain_filename(filename) {
            tracing::debug!(filename = %filename, "rejected download name");
            return Ok(None);
        }

        for category in Category::ALL {
            let candidate = self.category_path(category).join(filename);
            match async_fs::metadata(&candidate).await {
                Ok(metadata) if metadata.is_file() => return Ok(Some(candidate)),
                Ok(_) => continue,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
                Err(e) => return Err(e.into()),
            }
        }

        tracing::debug!(filename = %filename, "file not found in any category");
        Ok(None)
    }
}

/// `{base}_{YYYYMMDD_HHMMSS}{ext}`, splitting at the last dot.
pub fn timestamped_name(filename: &str, now: DateTime<Local>) -> String {
    let timestamp = now.format("%Y%m%d_%H%M%S");
    match filename.rsplit_once('.') {
        Some((base, ext)) => format!("{}_{}.{}", base, timestamp, ext),
        None => format!("{}_{}", filename, timestamp),
    }
}

fn folder_name(dir: &std::path::Path) -> String {
    dir.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
