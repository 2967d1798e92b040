//! File categories and the extension lookup that assigns uploads to them.

use serde::Serialize;
use std::fmt;

/// Typed storage folder an upload is filed under.
///
/// Declaration order matters: it is the order used both for extension lookup
/// and for the download search across folders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Document,
    Spreadsheet,
    Image,
    Presentation,
    Other,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Document,
        Category::Spreadsheet,
        Category::Image,
        Category::Presentation,
        Category::Other,
    ];

    /// Folder name and display label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Document => "document",
            Category::Spreadsheet => "spreadsheet",
            Category::Image => "image",
            Category::Presentation => "presentation",
            Category::Other => "other",
        }
    }

    /// Lower-case extensions (without the dot) recognized for this category.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Category::Document => &["doc", "docx", "pdf", "txt", "rtf"],
            Category::Spreadsheet => &["xls", "xlsx", "csv"],
            Category::Image => &["jpg", "jpeg", "png", "gif"],
            Category::Presentation => &["ppt", "pptx"],
            Category::Other => &[],
        }
    }

    /// Classify a filename by the text after its last dot, case-insensitively.
    ///
    /// Total: names without an extension, or with one nobody claims, fall
    /// into [`Category::Other`].
    pub fn classify(filename: &str) -> Category {
        let ext = match filename.rsplit_once('.') {
            Some((_, ext)) => ext.to_ascii_lowercase(),
            None => return Category::Other,
        };

        Category::ALL
            .into_iter()
            .find(|category| category.extensions().contains(&ext.as_str()))
            .unwrap_or(Category::Other)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_known_extensions() {
        assert_eq!(Category::classify("report.PDF"), Category::Document);
        assert_eq!(Category::classify("notes.txt"), Category::Document);
        assert_eq!(Category::classify("data.csv"), Category::Spreadsheet);
        assert_eq!(Category::classify("budget.XLSX"), Category::Spreadsheet);
        assert_eq!(Category::classify("photo.Jpeg"), Category::Image);
        assert_eq!(Category::classify("deck.pptx"), Category::Presentation);
    }

    #[test]
    fn test_classify_falls_back_to_other() {
        assert_eq!(Category::classify("noext"), Category::Other);
        assert_eq!(Category::classify(""), Category::Other);
        assert_eq!(Category::classify("trailing."), Category::Other);
        assert_eq!(Category::classify("archive.tar.gz"), Category::Other);
        assert_eq!(Category::classify("script.exe"), Category::Other);
    }

    #[test]
    fn test_classify_uses_last_dot_only() {
        assert_eq!(Category::classify("photo.png.txt"), Category::Document);
        assert_eq!(Category::classify("notes.txt.png"), Category::Image);
    }

    #[test]
    fn test_labels_match_display_and_serde() {
        for category in Category::ALL {
            assert_eq!(category.to_string(), category.as_str());
            assert_eq!(serde_json::to_value(category).unwrap(), category.as_str());
        }
    }

    #[test]
    fn test_extension_sets_are_disjoint() {
        for (i, a) in Category::ALL.iter().enumerate() {
            for b in Category::ALL.iter().skip(i + 1) {
                for ext in a.extensions() {
                    assert!(!b.extensions().contains(ext), "{} claimed twice", ext);
                }
            }
        }
    }
}
