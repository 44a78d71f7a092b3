//! Normalization of raw page text and raw table cells.

mod table;
mod text;

pub use table::{normalize_cell, normalize_row, normalize_table};
pub use text::{
    collapse_newlines, collapse_whitespace, normalize_text, repair_hyphenation, strip_boilerplate,
    strip_markers, strip_page_footers, TextRule, TEXT_RULES,
};
