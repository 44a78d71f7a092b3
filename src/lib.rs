//! # pdfsift
//!
//! Extract cleaned text and tables from PDF documents.
//!
//! Every page is read independently: its text is normalized and prefixed
//! with a `--- Page N ---` header, and any tables detected on it are cleaned
//! cell by cell. A page that fails to extract simply contributes nothing.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfsift::render::to_json;
//!
//! fn main() -> pdfsift::Result<()> {
//!     let result = pdfsift::extract_file("bulletin.pdf");
//!     println!("{}", to_json(&result)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Output
//!
//! ```text
//! {"text": "--- Page 1 ---\n...", "tables": [[["State", "Cases"], ["Kano", "14"]]]}
//! ```
//!
//! Tables are listed in page order but carry no page number. When no page
//! has text, `text` is `"[No extractable text found]"`; when the document
//! cannot be opened at all it is `"[lopdf failed: <reason>]"`.

pub mod cleanup;
pub mod detect;
pub mod error;
pub mod extract;
pub mod model;
pub mod parser;
pub mod render;

pub use cleanup::{normalize_table, normalize_text};
pub use error::{Error, Result};
pub use extract::{extract_file, extract_from, extract_with};
pub use model::{CleanTable, Extraction, RawTable, NO_TEXT_SENTINEL};
pub use parser::{LopdfBackend, PdfBackend};
pub use render::{to_json, ErrorReport};
