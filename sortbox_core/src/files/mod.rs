pub mod category;
pub mod manager;
pub mod models;
pub mod validation;

pub use category::Category;
pub use manager::{FileManager, FileManagerConfig};
pub use models::{FileEntry, FileUpload, StoredFile, StoredUpload};
pub use validation::{sanitize_filename, ValidationError};
