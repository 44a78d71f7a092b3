//! PDF access: the backend trait, its lopdf implementation, and the
//! position-based table detection it relies on.

mod backend;
mod layout;
mod table_detector;

pub use backend::{LopdfBackend, PdfBackend};
pub use layout::{SpanExtractor, TextSpan};
pub use table_detector::TableDetector;
