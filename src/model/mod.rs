//! Data model for extraction results.
//!
//! Raw tables come straight from the backend with nullable cells; clean
//! tables are what ends up in the JSON output.

mod extraction;
mod table;

pub(crate) use extraction::page_header;
pub use extraction::{Extraction, NO_TEXT_SENTINEL};
pub use table::{CleanRow, CleanTable, RawCell, RawRow, RawTable};
