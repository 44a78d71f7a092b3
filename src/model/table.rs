//! Table types.

/// A cell as produced by table detection. `None` means the detector found no
/// text for that grid position.
pub type RawCell = Option<String>;

/// An ordered row of raw cells.
pub type RawRow = Vec<RawCell>;

/// An ordered grid of raw cells for one detected table.
pub type RawTable = Vec<RawRow>;

/// A row after cell cleaning; every cell is a (possibly empty) string.
pub type CleanRow = Vec<String>;

/// A table after cleaning, with fully-empty rows removed.
pub type CleanTable = Vec<CleanRow>;
