//! Aggregate extraction result.

use serde::{Deserialize, Serialize};

use super::CleanTable;

/// Text reported when no page produced any text.
pub const NO_TEXT_SENTINEL: &str = "[No extractable text found]";

/// Result of extracting one document: the joined page text and every
/// cleaned table, in page order.
///
/// Tables are not associated with the page they came from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extraction {
    /// Page blocks joined by newlines, or a sentinel string.
    pub text: String,
    /// Cleaned tables across all pages.
    pub tables: Vec<CleanTable>,
    /// Set only by [`Extraction::open_failed`]; never serialized.
    #[serde(skip)]
    open_error: Option<String>,
}

impl Extraction {
    /// Build a result from accumulated page blocks and tables.
    ///
    /// An empty block list yields [`NO_TEXT_SENTINEL`] as text.
    pub fn from_parts(blocks: Vec<String>, tables: Vec<CleanTable>) -> Self {
        let text = if blocks.is_empty() {
            NO_TEXT_SENTINEL.to_string()
        } else {
            blocks.join("\n")
        };
        Self {
            text,
            tables,
            open_error: None,
        }
    }

    /// Result for a document the backend could not open.
    pub fn open_failed(backend: &str, message: impl std::fmt::Display) -> Self {
        let message = message.to_string();
        Self {
            text: format!("[{} failed: {}]", backend, message),
            tables: Vec::new(),
            open_error: Some(message),
        }
    }

    /// The reason the document could not be opened.
    pub fn open_error(&self) -> Option<&str> {
        self.open_error.as_deref()
    }
}

/// Header line that precedes each page's text.
pub(crate) fn page_header(page: u32) -> String {
    format!("--- Page {} ---", page)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_parts_joins_blocks() {
        let result = Extraction::from_parts(
            vec!["--- Page 1 ---\na".to_string(), "--- Page 2 ---\nb".to_string()],
            vec![],
        );
        assert_eq!(result.text, "--- Page 1 ---\na\n--- Page 2 ---\nb");
        assert!(result.open_error().is_none());
    }

    #[test]
    fn test_from_parts_without_blocks() {
        let result = Extraction::from_parts(vec![], vec![vec![vec!["x".to_string()]]]);
        assert_eq!(result.text, NO_TEXT_SENTINEL);
        assert_eq!(result.tables.len(), 1);
        assert!(result.open_error().is_none());
    }

    #[test]
    fn test_open_failed() {
        let result = Extraction::open_failed("lopdf", "Document is encrypted");
        assert_eq!(result.text, "[lopdf failed: Document is encrypted]");
        assert!(result.tables.is_empty());
        assert_eq!(result.open_error(), Some("Document is encrypted"));
    }

    #[test]
    fn test_page_text_shaped_like_failure_is_not_failure() {
        let result = Extraction::from_parts(
            vec!["[Parser failed: see annex]".to_string()],
            vec![],
        );
        assert_eq!(result.text, "[Parser failed: see annex]");
        assert_eq!(result.open_error(), None);
    }

    #[test]
    fn test_page_header() {
        assert_eq!(page_header(7), "--- Page 7 ---");
    }

    #[test]
    fn test_serialize_field_order() {
        let result = Extraction::from_parts(vec![], vec![]);
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(json, r#"{"text":"[No extractable text found]","tables":[]}"#);
    }
}
