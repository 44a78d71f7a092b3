//! Table detection from text positions (stream mode).
//!
//! Tables are found by looking for consecutive rows whose spans start at the
//! same X positions. No ruling lines are consulted.

use std::collections::{HashMap, HashSet};

use crate::model::{RawRow, RawTable};

use super::layout::TextSpan;

/// Width of the buckets that X positions are snapped to.
const BUCKET_SIZE: f32 = 5.0;

/// Distance within which a span counts as aligned to a column edge.
const ALIGN_TOLERANCE: f32 = 5.0;

/// Slack allowed for spans starting slightly left of their column.
const COLUMN_SLACK: f32 = 10.0;

/// A row of spans sharing a baseline.
#[derive(Debug, Clone)]
pub(crate) struct TableRowData {
    /// Average baseline of the row
    pub y: f32,
    /// Spans in this row, sorted by X
    pub spans: Vec<TextSpan>,
}

/// Detection thresholds.
#[derive(Debug, Clone)]
pub(crate) struct TableDetectorConfig {
    /// Minimum number of rows to consider as table
    pub min_rows: usize,
    /// Minimum number of columns to consider as table
    pub min_columns: usize,
    /// Maximum number of columns (above this, likely word-level splitting)
    pub max_columns: usize,
    /// Y tolerance for grouping spans into rows (fraction of font size)
    pub y_tolerance_factor: f32,
    /// Minimum column alignment ratio (0.0-1.0)
    pub min_alignment_ratio: f32,
    /// Minimum gap between columns (points)
    pub min_column_gap: f32,
}

impl Default for TableDetectorConfig {
    fn default() -> Self {
        Self {
            min_rows: 2,
            min_columns: 2,
            max_columns: 12,
            y_tolerance_factor: 0.4,
            min_alignment_ratio: 0.5,
            min_column_gap: 15.0,
        }
    }
}

/// Detects tables in the spans of one page.
#[derive(Debug, Clone, Default)]
pub struct TableDetector {
    config: TableDetectorConfig,
}

impl TableDetector {
    /// Create a new table detector with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Detect tables, top to bottom. Each table is a rectangular grid;
    /// positions with no text are `None`.
    pub fn detect(&self, spans: &[TextSpan]) -> Vec<RawTable> {
        if spans.len() < self.config.min_rows * self.config.min_columns {
            log::debug!("TableDetector: not enough spans ({})", spans.len());
            return vec![];
        }

        let rows = self.group_into_rows(spans);
        let regions = self.find_table_regions(&rows);
        log::debug!(
            "TableDetector: {} rows, {} candidate regions",
            rows.len(),
            regions.len()
        );

        let mut tables = Vec::new();
        for (start, end) in regions {
            let region = &rows[start..=end];
            let columns = self.detect_columns(region);

            if columns.len() < self.config.min_columns || columns.len() > self.config.max_columns {
                log::debug!(
                    "TableDetector: skipping rows {}..={}, {} columns",
                    start,
                    end,
                    columns.len()
                );
                continue;
            }

            if is_list_pattern(region, &columns) {
                log::debug!("TableDetector: skipping rows {}..={}, list pattern", start, end);
                continue;
            }

            tables.push(self.build_grid(region, &columns));
        }

        tables
    }

    /// Group spans into rows by baseline, top of page first.
    fn group_into_rows(&self, spans: &[TextSpan]) -> Vec<TableRowData> {
        let mut sorted = spans.to_vec();
        sorted.sort_by(|a, b| b.y.total_cmp(&a.y).then(a.x.total_cmp(&b.x)));

        let mut rows: Vec<TableRowData> = Vec::new();
        let mut current: Vec<TextSpan> = Vec::new();
        let mut current_y: Option<f32> = None;

        for span in sorted {
            let tolerance = span.font_size * self.config.y_tolerance_factor;
            match current_y {
                Some(y) if (span.y - y).abs() <= tolerance => current.push(span),
                _ => {
                    if !current.is_empty() {
                        rows.push(make_row(std::mem::take(&mut current)));
                    }
                    current_y = Some(span.y);
                    current.push(span);
                }
            }
        }
        if !current.is_empty() {
            rows.push(make_row(current));
        }

        rows
    }

    /// Column left edges: X buckets shared by enough multi-span rows.
    fn detect_columns(&self, rows: &[TableRowData]) -> Vec<f32> {
        let multi_span_rows: Vec<&TableRowData> =
            rows.iter().filter(|r| r.spans.len() >= 2).collect();
        if multi_span_rows.is_empty() {
            return vec![];
        }

        let mut edge_counts: HashMap<i32, usize> = HashMap::new();
        for row in &multi_span_rows {
            let buckets: HashSet<i32> = row
                .spans
                .iter()
                .map(|s| (s.x / BUCKET_SIZE).round() as i32)
                .collect();
            for bucket in buckets {
                *edge_counts.entry(bucket).or_insert(0) += 1;
            }
        }

        let min_occurrences =
            ((multi_span_rows.len() as f32 * self.config.min_alignment_ratio) as usize).max(2);

        let mut edges: Vec<f32> = edge_counts
            .into_iter()
            .filter(|(_, count)| *count >= min_occurrences)
            .map(|(bucket, _)| bucket as f32 * BUCKET_SIZE)
            .collect();
        edges.sort_by(f32::total_cmp);

        let mut merged: Vec<f32> = Vec::new();
        for edge in edges {
            match merged.last() {
                Some(&last) if edge - last < self.config.min_column_gap => {}
                _ => merged.push(edge),
            }
        }
        merged
    }

    /// Runs of consecutive multi-span rows that share column edges.
    fn find_table_regions(&self, rows: &[TableRowData]) -> Vec<(usize, usize)> {
        let mut regions = Vec::new();
        let mut start: Option<usize> = None;

        for i in 0..=rows.len() {
            let continues = match (start, rows.get(i)) {
                (_, None) => false,
                (None, Some(row)) => row.spans.len() >= 2,
                (Some(s), Some(row)) => {
                    row.spans.len() >= 2 && {
                        let columns = self.detect_columns(&rows[s..=i]);
                        columns.len() >= self.config.min_columns
                            && alignment_score(row, &columns) >= self.config.min_alignment_ratio
                    }
                }
            };

            match (start, continues) {
                (None, true) => start = Some(i),
                (Some(s), false) => {
                    if i - s >= self.config.min_rows {
                        regions.push((s, i - 1));
                    }
                    start = rows
                        .get(i)
                        .filter(|row| row.spans.len() >= 2)
                        .map(|_| i);
                }
                _ => {}
            }
        }

        regions
    }

    /// Place each span into the column whose range contains it.
    fn build_grid(&self, rows: &[TableRowData], columns: &[f32]) -> RawTable {
        let right_x = rows
            .iter()
            .flat_map(|r| r.spans.iter())
            .map(TextSpan::right)
            .fold(f32::MIN, f32::max);

        rows.iter()
            .map(|row| {
                let mut cells: Vec<Vec<&str>> = vec![Vec::new(); columns.len()];
                for span in &row.spans {
                    let col = find_column_for_span(span.x, columns, right_x);
                    cells[col].push(span.text.trim());
                }
                cells
                    .into_iter()
                    .map(|parts| (!parts.is_empty()).then(|| parts.join(" ")))
                    .collect::<RawRow>()
            })
            .collect()
    }
}

fn make_row(mut spans: Vec<TextSpan>) -> TableRowData {
    spans.sort_by(|a, b| a.x.total_cmp(&b.x));
    let y = spans.iter().map(|s| s.y).sum::<f32>() / spans.len() as f32;
    TableRowData { y, spans }
}

/// Fraction of the row's spans that start on a column edge.
fn alignment_score(row: &TableRowData, columns: &[f32]) -> f32 {
    if row.spans.is_empty() || columns.is_empty() {
        return 0.0;
    }
    let aligned = row
        .spans
        .iter()
        .filter(|span| columns.iter().any(|col| (span.x - col).abs() <= ALIGN_TOLERANCE))
        .count();
    aligned as f32 / row.spans.len() as f32
}

fn find_column_for_span(x: f32, columns: &[f32], right_x: f32) -> usize {
    for (i, &start) in columns.iter().enumerate() {
        let end = columns.get(i + 1).copied().unwrap_or(right_x + 100.0);
        if x >= start - COLUMN_SLACK && x < end - COLUMN_SLACK {
            return i;
        }
    }

    columns
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| (x - **a).abs().total_cmp(&(x - **b).abs()))
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// A bulleted or numbered list laid out as marker + text looks like a
/// two-column table; reject it.
fn is_list_pattern(rows: &[TableRowData], columns: &[f32]) -> bool {
    if rows.is_empty() {
        return false;
    }

    let (mut bullets, mut numbers) = (0, 0);
    for row in rows {
        if let Some(first) = row.spans.first() {
            if is_bullet_marker(&first.text) {
                bullets += 1;
            } else if is_number_marker(&first.text) {
                numbers += 1;
            }
        }
    }

    let total = rows.len() as f32;
    bullets as f32 / total >= 0.5
        || (columns.len() == 2 && (bullets + numbers) as f32 / total >= 0.5)
}

fn is_bullet_marker(text: &str) -> bool {
    matches!(
        text.trim(),
        "-" | "–" | "—" | "•" | "·" | "*" | "○" | "▪" | "◦" | "▸" | "►" | "■" | "●" | "□" | "◆" | "➤"
    )
}

/// "1.", "12)", "3", "a.", "B)".
fn is_number_marker(text: &str) -> bool {
    let cleaned: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    if cleaned.is_empty() {
        return false;
    }
    let body = cleaned
        .strip_suffix('.')
        .or_else(|| cleaned.strip_suffix(')'))
        .unwrap_or(&cleaned);

    let is_numeral = !body.is_empty() && body.chars().all(|c| c.is_ascii_digit());
    let is_letter = body != cleaned && body.chars().count() == 1 && body.chars().all(char::is_alphabetic);
    is_numeral || is_letter
}
