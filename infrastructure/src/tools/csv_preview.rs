//! Markdown preview of CSV data
//!
//! The first record is the header. The table gets a leading row-index
//! column, and columns whose every previewed value is numeric are
//! right-aligned.

use thiserror::Error;

/// Data rows shown by `read_csv_blob`
pub const PREVIEW_ROWS: usize = 10;

#[derive(Error, Debug)]
pub enum CsvPreviewError {
    #[error("No columns to parse from file")]
    Empty,

    #[error("{0}")]
    Parse(#[from] csv::Error),
}

/// Render the header and up to `max_rows` data rows as a markdown table.
///
/// Rows may have differing lengths: short rows are padded with empty cells,
/// extra cells get `Unnamed: <n>` headers.
pub fn render_csv_preview(bytes: &[u8], max_rows: usize) -> Result<String, CsvPreviewError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut records = reader.byte_records();
    let mut header = match records.next() {
        Some(record) => decode(&record?),
        None => return Err(CsvPreviewError::Empty),
    };
    if header.iter().all(|h| h.is_empty()) {
        return Err(CsvPreviewError::Empty);
    }

    let mut rows = Vec::with_capacity(max_rows);
    for record in records.take(max_rows) {
        rows.push(decode(&record?));
    }

    let columns = rows.iter().map(Vec::len).fold(header.len(), usize::max);
    for i in header.len()..columns {
        header.push(format!("Unnamed: {}", i));
    }
    for row in &mut rows {
        row.resize(columns, String::new());
    }

    Ok(render_table(&header, &rows))
}

fn decode(record: &csv::ByteRecord) -> Vec<String> {
    record
        .iter()
        .map(|field| String::from_utf8_lossy(field).trim().replace('|', "\\|"))
        .collect()
}

fn is_numeric(value: &str) -> bool {
    value.parse::<f64>().is_ok()
}

fn render_table(header: &[String], rows: &[Vec<String>]) -> String {
    let index: Vec<String> = (0..rows.len()).map(|i| i.to_string()).collect();
    let index_width = index.iter().map(|s| s.len()).max().unwrap_or(0).max(1);

    let widths: Vec<usize> = header
        .iter()
        .enumerate()
        .map(|(c, h)| {
            rows.iter()
                .map(|r| r[c].chars().count())
                .fold(h.chars().count(), usize::max)
                .max(3)
        })
        .collect();
    let numeric: Vec<bool> = (0..header.len())
        .map(|c| !rows.is_empty() && rows.iter().all(|r| is_numeric(&r[c])))
        .collect();

    let mut out = String::new();

    out.push_str(&format!("| {:width$} |", "", width = index_width));
    for (c, h) in header.iter().enumerate() {
        out.push_str(&format!(" {} |", pad(h, widths[c], numeric[c])));
    }
    out.push('\n');

    out.push_str(&format!("|{}:|", "-".repeat(index_width + 1)));
    for (c, width) in widths.iter().enumerate() {
        if numeric[c] {
            out.push_str(&format!("{}:|", "-".repeat(width + 1)));
        } else {
            out.push_str(&format!(":{}|", "-".repeat(width + 1)));
        }
    }

    for (i, row) in rows.iter().enumerate() {
        out.push('\n');
        out.push_str(&format!("| {:>width$} |", index[i], width = index_width));
        for (c, cell) in row.iter().enumerate() {
            out.push_str(&format!(" {} |", pad(cell, widths[c], numeric[c])));
        }
    }

    out
}

fn pad(value: &str, width: usize, right: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(value.chars().count()));
    if right {
        format!("{}{}", fill, value)
    } else {
        format!("{}{}", value, fill)
    }
}
