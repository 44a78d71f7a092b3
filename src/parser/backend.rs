//! PDF backend abstraction layer.
//!
//! Extraction talks to PDFs only through [`PdfBackend`], so the page loop
//! and its failure handling can be exercised without real documents. The
//! production implementation is [`LopdfBackend`].

use std::collections::BTreeMap;
use std::path::Path;

use lopdf::{Document as LopdfDocument, ObjectId};

use crate::detect::detect_version_from_path;
use crate::error::{Error, Result};
use crate::model::RawTable;

use super::layout::SpanExtractor;
use super::table_detector::TableDetector;

/// Source of per-page text and tables.
///
/// The open handle is owned by the implementing value; dropping it releases
/// the document.
pub trait PdfBackend: Sized {
    /// Library name reported when a document cannot be opened.
    const NAME: &'static str;

    /// Open the document at `path`.
    fn open(path: &Path) -> Result<Self>;

    /// Page numbers in document order, starting at 1.
    fn page_numbers(&self) -> Vec<u32>;

    /// Plain text of one page. `None` when the page has no text layer.
    fn page_text(&self, page: u32) -> Result<Option<String>>;

    /// Tables detected on one page, possibly none.
    fn page_tables(&self, page: u32) -> Result<Vec<RawTable>>;
}

/// [`PdfBackend`] backed by `lopdf::Document`.
pub struct LopdfBackend {
    doc: LopdfDocument,
    pages: BTreeMap<u32, ObjectId>,
    detector: TableDetector,
}

impl LopdfBackend {
    /// Wrap an already loaded document.
    pub fn from_document(doc: LopdfDocument) -> Self {
        let pages = doc.get_pages();
        Self {
            doc,
            pages,
            detector: TableDetector::new(),
        }
    }

    fn page_id(&self, page: u32) -> Result<ObjectId> {
        self.pages
            .get(&page)
            .copied()
            .ok_or(Error::PageOutOfRange(page, self.pages.len() as u32))
    }
}

impl PdfBackend for LopdfBackend {
    const NAME: &'static str = "lopdf";

    fn open(path: &Path) -> Result<Self> {
        let version = detect_version_from_path(path)?;
        log::debug!("Opening {} (PDF {})", path.display(), version);

        // Undecryptable files already fail here with Error::Encrypted.
        let doc = LopdfDocument::load(path)?;
        if doc.is_encrypted() {
            log::warn!("{} is encrypted; text may be incomplete", path.display());
        }
        Ok(Self::from_document(doc))
    }

    fn page_numbers(&self) -> Vec<u32> {
        self.pages.keys().copied().collect()
    }

    fn page_text(&self, page: u32) -> Result<Option<String>> {
        self.page_id(page)?;
        let text = self
            .doc
            .extract_text(&[page])
            .map_err(|e| Error::TextExtract(format!("Page {}: {}", page, e)))?;
        Ok((!text.is_empty()).then_some(text))
    }

    fn page_tables(&self, page: u32) -> Result<Vec<RawTable>> {
        let page_id = self.page_id(page)?;
        let spans = SpanExtractor::new(&self.doc)
            .extract_page_spans(page_id)
            .map_err(|e| Error::TableExtract(format!("Page {}: {}", page, e)))?;
        Ok(self.detector.detect(&spans))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_rejects_non_pdf_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "plain text, no header").unwrap();
        let err = LopdfBackend::open(file.path()).err().unwrap();
        assert!(matches!(err, Error::UnknownFormat));
    }

    #[test]
    fn test_empty_document_has_no_pages() {
        let backend = LopdfBackend::from_document(LopdfDocument::with_version("1.5"));
        assert!(backend.page_numbers().is_empty());
        assert!(matches!(
            backend.page_text(1),
            Err(Error::PageOutOfRange(1, 0))
        ));
        assert!(matches!(
            backend.page_tables(2),
            Err(Error::PageOutOfRange(2, 0))
        ));
    }
}
