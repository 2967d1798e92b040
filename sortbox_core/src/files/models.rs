use chrono::{DateTime, Local};
use serde::Serialize;

use super::category::Category;

/// A file found on disk while scanning the storage root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    pub name: String,
    /// Name of the folder the file sits in directly.
    pub category: String,
    pub size: u64,
    pub modified: DateTime<Local>,
}

impl StoredFile {
    pub fn formatted_size(&self) -> String {
        format!("{:.1} KB", self.size as f64 / 1024.0)
    }

    pub fn formatted_date(&self) -> String {
        self.modified.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

/// Display row for the homepage and the JSON listing.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FileEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub file_type: String,
    pub size: String,
    pub date: String,
}

impl From<&StoredFile> for FileEntry {
    fn from(file: &StoredFile) -> Self {
        Self {
            name: file.name.clone(),
            file_type: file.category.clone(),
            size: file.formatted_size(),
            date: file.formatted_date(),
        }
    }
}

impl From<StoredFile> for FileEntry {
    fn from(file: StoredFile) -> Self {
        FileEntry::from(&file)
    }
}

#[derive(Debug)]
pub struct FileUpload {
    pub original_filename: String,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StoredUpload {
    pub filename: String,
    pub category: Category,
    pub size: u64,
}
