//! Page-by-page extraction.
//!
//! Each page is processed independently: a failure extracting text or
//! tables from one page drops that page's contribution and nothing else.

use std::path::Path;

use crate::cleanup::{normalize_table, normalize_text};
use crate::model::{page_header, CleanTable, Extraction};
use crate::parser::{LopdfBackend, PdfBackend};

/// Extract text and tables from the PDF at `path` using [`LopdfBackend`].
///
/// Never fails: a document that cannot be opened yields a result whose text
/// is `"[lopdf failed: <reason>]"`.
///
/// # Example
///
/// ```no_run
/// let result = pdfsift::extract_file("report.pdf");
/// println!("{}", result.text);
/// ```
pub fn extract_file<P: AsRef<Path>>(path: P) -> Extraction {
    extract_with::<LopdfBackend>(path.as_ref())
}

/// Open `path` with backend `B` and extract every page.
///
/// The backend is dropped before this returns, on success and failure alike.
pub fn extract_with<B: PdfBackend>(path: &Path) -> Extraction {
    match B::open(path) {
        Ok(backend) => extract_from(&backend),
        Err(e) => {
            log::warn!("{} could not open {}: {}", B::NAME, path.display(), e);
            Extraction::open_failed(B::NAME, e)
        }
    }
}

/// Extract every page of an already opened backend, in page order.
pub fn extract_from<B: PdfBackend>(backend: &B) -> Extraction {
    let mut blocks: Vec<String> = Vec::new();
    let mut tables: Vec<CleanTable> = Vec::new();

    for page in backend.page_numbers() {
        match backend.page_text(page) {
            Ok(Some(raw)) if !raw.is_empty() => {
                blocks.push(format!(
                    "{}\n{}",
                    page_header(page),
                    normalize_text(Some(&raw))
                ));
            }
            Ok(_) => {}
            Err(e) => log::debug!("Skipping text of page {}: {}", page, e),
        }

        match backend.page_tables(page) {
            Ok(raw_tables) => {
                tables.extend(raw_tables.iter().map(|table| normalize_table(table)));
            }
            Err(e) => log::debug!("Skipping tables of page {}: {}", page, e),
        }
    }

    log::debug!(
        "Extracted {} text blocks and {} tables",
        blocks.len(),
        tables.len()
    );
    Extraction::from_parts(blocks, tables)
}
