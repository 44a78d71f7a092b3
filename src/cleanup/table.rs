//! Table cell cleanup.

use std::sync::LazyLock;

use regex::Regex;

use crate::model::{CleanRow, CleanTable, RawCell, RawRow};

// ASCII letters and digits, any whitespace, and a few punctuation marks
// that carry meaning in figures (currency, percentages, ranges, dates).
static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9\s\-,.%()/$:;]").unwrap());

/// Clean every cell of a raw table and drop rows left without content.
///
/// Row and cell order are preserved. A table whose rows are all empty after
/// cleaning comes back as an empty vector.
///
/// # Example
///
/// ```
/// use pdfsift::cleanup::normalize_table;
///
/// let raw = vec![vec![Some("A$1".to_string()), None, Some("B!2".to_string())]];
/// assert_eq!(normalize_table(&raw), vec![vec!["A$1", "", "B2"]]);
/// ```
pub fn normalize_table(rows: &[RawRow]) -> CleanTable {
    rows.iter()
        .map(|row| normalize_row(row))
        .filter(|row| row.iter().any(|cell| !cell.is_empty()))
        .collect()
}

/// Clean each cell of one row.
pub fn normalize_row(row: &[RawCell]) -> CleanRow {
    row.iter().map(|cell| normalize_cell(cell.as_deref())).collect()
}

/// Clean a single cell: filter characters, trim, then turn newlines into
/// spaces.
pub fn normalize_cell(cell: Option<&str>) -> String {
    match cell {
        Some(text) if !text.is_empty() => DISALLOWED
            .replace_all(text, "")
            .trim()
            .replace('\n', " "),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(cells: &[Option<&str>]) -> RawRow {
        cells.iter().map(|c| c.map(str::to_string)).collect()
    }

    #[test]
    fn test_cell_filtering() {
        assert_eq!(normalize_cell(Some("B!2")), "B2");
        assert_eq!(normalize_cell(Some("A$1")), "A$1");
        assert_eq!(normalize_cell(Some("12.5% (n/a); 3:4, -1")), "12.5% (n/a); 3:4, -1");
        assert_eq!(normalize_cell(Some("#*@&")), "");
    }

    #[test]
    fn test_absent_and_empty_cells() {
        assert_eq!(normalize_cell(None), "");
        assert_eq!(normalize_cell(Some("")), "");
    }

    #[test]
    fn test_cell_trim_and_newlines() {
        assert_eq!(normalize_cell(Some("  Lagos\nState \n")), "Lagos State");
        assert_eq!(normalize_cell(Some("a\n\nb")), "a  b");
    }

    #[test]
    fn test_non_ascii_letters_are_stripped() {
        assert_eq!(normalize_cell(Some("Café")), "Caf");
        assert_eq!(normalize_cell(Some("→ 5")), "5");
    }

    #[test]
    fn test_row_kept_when_any_cell_has_content() {
        let table = vec![raw(&[Some("A$1"), Some(""), Some("B!2")])];
        assert_eq!(normalize_table(&table), vec![vec!["A$1", "", "B2"]]);
    }

    #[test]
    fn test_empty_rows_dropped() {
        let table = vec![
            raw(&[Some("State"), Some("Cases")]),
            raw(&[None, Some("  ")]),
            raw(&[Some("***"), None]),
            raw(&[Some("Kano"), Some("14")]),
        ];
        assert_eq!(
            normalize_table(&table),
            vec![vec!["State", "Cases"], vec!["Kano", "14"]]
        );
    }

    #[test]
    fn test_all_empty_table_becomes_empty() {
        let table = vec![raw(&[None, None]), raw(&[Some("!!"), Some("")])];
        assert!(normalize_table(&table).is_empty());
        assert!(normalize_table(&[]).is_empty());
    }

    #[test]
    fn test_idempotent() {
        let table = vec![
            raw(&[Some(" Week\n12 "), Some("N#5"), None]),
            raw(&[Some("Total:"), Some("1,204"), Some("3.1%")]),
        ];
        let once = normalize_table(&table);
        let again: Vec<RawRow> = once
            .iter()
            .map(|row| row.iter().map(|c| Some(c.clone())).collect())
            .collect();
        assert_eq!(normalize_table(&again), once);
    }
}
