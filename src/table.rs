//! Plain-text result tables.
//!
//! Renders rows as a rounded box-drawing grid for terminal output.

use crate::db::QueryResult;

/// Maximum width for any column.
const MAX_COLUMN_WIDTH: usize = 40;

/// Renders a grid with a header row and a separator between every row.
pub fn render_table<H: AsRef<str>>(headers: &[H], rows: &[Vec<String>]) -> String {
    let widths = column_widths(headers, rows);
    let mut out = String::new();

    out.push_str(&border(&widths, '╭', '┬', '╮'));
    out.push_str(&line(&widths, headers));
    for row in rows {
        out.push_str(&border(&widths, '├', '┼', '┤'));
        out.push_str(&line(&widths, &row[..]));
    }
    out.push_str(&border(&widths, '╰', '┴', '╯'));

    out
}

/// Renders up to `limit` rows of a query result.
pub fn render_result(result: &QueryResult, limit: usize) -> String {
    let rows: Vec<Vec<String>> = result
        .data
        .iter()
        .take(limit)
        .map(|row| {
            result
                .columns
                .iter()
                .map(|c| row.get(c).unwrap_or_default().to_string())
                .collect()
        })
        .collect();
    render_table(&result.columns[..], &rows)
}

/// Renders up to `limit` rows, or nothing when the result has no rows.
pub fn render_preview(result: &QueryResult, limit: usize) -> Option<String> {
    if result.data.is_empty() {
        return None;
    }
    Some(render_result(result, limit))
}

fn column_widths<H: AsRef<str>>(headers: &[H], rows: &[Vec<String>]) -> Vec<usize> {
    let mut widths: Vec<usize> = headers.iter().map(|h| display_len(h.as_ref())).collect();

    for row in rows {
        for (i, value) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(display_len(value));
            }
        }
    }

    widths.iter().map(|&w| w.min(MAX_COLUMN_WIDTH)).collect()
}

fn border(widths: &[usize], left: char, mid: char, right: char) -> String {
    let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
    format!("{left}{}{right}\n", segments.join(&mid.to_string()))
}

fn line<C: AsRef<str>>(widths: &[usize], cells: &[C]) -> String {
    let mut out = String::from("│");
    for (i, width) in widths.iter().enumerate() {
        let cell = cells.get(i).map(|c| c.as_ref()).unwrap_or_default();
        let cell = truncate(cell, *width);
        let pad = width - display_len(&cell);
        out.push(' ');
        out.push_str(&cell);
        out.push_str(&" ".repeat(pad + 1));
        out.push('│');
    }
    out.push('\n');
    out
}

fn display_len(s: &str) -> usize {
    s.chars().count()
}

/// Truncates a string to fit within the given width, adding ellipsis if needed.
fn truncate(s: &str, max_width: usize) -> String {
    if display_len(s) <= max_width {
        s.to_string()
    } else if max_width <= 3 {
        s.chars().take(max_width).collect()
    } else {
        let head: String = s.chars().take(max_width - 3).collect();
        format!("{head}...")
    }
}
