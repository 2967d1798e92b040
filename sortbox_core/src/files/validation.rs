use lazy_static::lazy_static;
use regex::Regex;
use std::path::{Component, Path};
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

/// Fallback base name when sanitizing leaves nothing usable.
pub const FALLBACK_FILENAME: &str = "upload";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("No file part")]
    NoFilePart,

    #[error("No file selected")]
    NoFileSelected,
}

lazy_static! {
    static ref UNSAFE_CHARS: Regex = Regex::new(r"[^A-Za-z0-9_.\-]").unwrap();
}

/// Reduce a client supplied filename to a safe single path component.
///
/// Compatibility decomposition keeps the base letter of accented characters
/// before anything non-ASCII is dropped, so `résumé.doc` becomes `resume.doc`.
/// Directory separators become word breaks, whitespace runs collapse to `_`,
/// anything outside `[A-Za-z0-9_.-]` is dropped and leading or trailing dots
/// and underscores are trimmed, so `../../etc/passwd` becomes `etc_passwd`.
pub fn sanitize_filename(filename: &str) -> String {
    let ascii: String = filename
        .nfkd()
        .filter(|c| c.is_ascii())
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();

    let joined = ascii.split_whitespace().collect::<Vec<_>>().join("_");
    let stripped = UNSAFE_CHARS.replace_all(&joined, "");
    let trimmed = stripped.trim_matches(|c: char| c == '.' || c == '_');

    if trimmed.is_empty() {
        FALLBACK_FILENAME.to_string()
    } else {
        trimmed.to_string()
    }
}

/// True when `name` is exactly one normal path component.
///
/// Download lookups join the requested name onto a category folder, so
/// anything that could climb out of it (`..`, separators, absolute paths)
/// is refused.
pub fn is_plain_filename(name: &str) -> bool {
    if name.is_empty() || name.contains('/') || name.contains('\\') || name.contains('\0') {
        return false;
    }

    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_keeps_ordinary_names() {
        assert_eq!(sanitize_filename("report.pdf"), "report.pdf");
        assert_eq!(sanitize_filename("Q3-budget_v2.xlsx"), "Q3-budget_v2.xlsx");
    }

    #[test]
    fn test_sanitize_strips_directories_and_whitespace() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "etc_passwd");
        assert_eq!(sanitize_filename("C:\\Users\\me\\notes.txt"), "C_Users_me_notes.txt");
        assert_eq!(sanitize_filename("my  holiday photo.JPG"), "my_holiday_photo.JPG");
    }

    #[test]
    fn test_sanitize_drops_unsafe_and_non_ascii() {
        assert_eq!(sanitize_filename("résumé.doc"), "resume.doc");
        assert_eq!(sanitize_filename("Ångström ﬁle.txt"), "Angstrom_file.txt");
        assert_eq!(sanitize_filename("a<b>c?.txt"), "abc.txt");
        assert_eq!(sanitize_filename(".hidden"), "hidden");
    }

    #[test]
    fn test_sanitize_falls_back_when_nothing_remains() {
        assert_eq!(sanitize_filename("../.."), FALLBACK_FILENAME);
        assert_eq!(sanitize_filename("文件"), FALLBACK_FILENAME);
    }

    #[test]
    fn test_plain_filename_check() {
        assert!(is_plain_filename("report_20240101_120000.pdf"));
        assert!(!is_plain_filename(""));
        assert!(!is_plain_filename(".."));
        assert!(!is_plain_filename("."));
        assert!(!is_plain_filename("../secret.txt"));
        assert!(!is_plain_filename("image/photo.png"));
        assert!(!is_plain_filename("/etc/passwd"));
        assert!(!is_plain_filename("..\\boot.ini"));
    }

    #[test]
    fn test_validation_messages() {
        assert_eq!(ValidationError::NoFilePart.to_string(), "No file part");
        assert_eq!(ValidationError::NoFileSelected.to_string(), "No file selected");
    }
}
