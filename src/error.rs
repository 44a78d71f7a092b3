//! Error types for pdfsift.

use std::io;
use thiserror::Error;

/// Result type alias for pdfsift operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong between opening a PDF and rendering its
/// extraction. Page-level variants never escape [`crate::extract_from`].
#[derive(Error, Debug)]
pub enum Error {
    /// The input path could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file does not start with a `%PDF-` header.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// The PDF header carries a version we cannot read.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// lopdf rejected the document or one of its content streams.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// The document is encrypted with a password we do not have.
    #[error("Document is encrypted")]
    Encrypted,

    /// Error extracting plain text from a page.
    #[error("Text extraction error: {0}")]
    TextExtract(String),

    /// Error extracting tables from a page.
    #[error("Table extraction error: {0}")]
    TableExtract(String),

    /// Requested page, then page count.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// JSON serialization failed.
    #[error("Rendering error: {0}")]
    Render(String),
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::PdfParse(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_feed_failure_sentinel() {
        assert_eq!(
            Error::UnknownFormat.to_string(),
            "Unknown file format: not a valid PDF"
        );
        assert_eq!(
            Error::PageOutOfRange(4, 3).to_string(),
            "Page 4 is out of range (document has 3 pages)"
        );
    }

    #[test]
    fn test_from_lopdf_io() {
        let err: Error = lopdf::Error::IO(io::Error::new(io::ErrorKind::NotFound, "gone")).into();
        assert!(matches!(err, Error::Io(_)));
        assert_eq!(err.to_string(), "I/O error: gone");
    }

    #[test]
    fn test_encrypted_display() {
        assert_eq!(Error::Encrypted.to_string(), "Document is encrypted");
    }

    #[test]
    fn test_table_extract_display() {
        let err = Error::TableExtract("Page 3: bad operator".to_string());
        assert_eq!(err.to_string(), "Table extraction error: Page 3: bad operator");
    }
}
