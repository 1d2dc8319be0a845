//! SQL script splitting.

use regex::Regex;
use std::sync::OnceLock;

/// Maximum label length before truncation.
const LABEL_WIDTH: usize = 70;

/// Comment markers that make a comment line usable as a statement label.
const LABEL_MARKERS: [&str; 4] = ["BEFORE", "AFTER", "SELECT", "COMPARISON"];

fn statement_end() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r";\s*\n").expect("statement separator regex is valid"))
}

/// Splits SQL text on every `;` and returns the non-empty statements, trimmed.
pub fn split_on_semicolons(sql: &str) -> Vec<&str> {
    sql.split(';')
        .map(str::trim)
        .filter(|stmt| !stmt.is_empty())
        .collect()
}

/// Splits a script into `(label, statement)` pairs.
///
/// Statements end at a `;` followed by a line break. Each statement keeps a
/// trailing `;`. The label is the first line that is not a comment, or an
/// earlier comment line mentioning BEFORE, AFTER, SELECT or COMPARISON.
pub fn split_statements(sql: &str) -> Vec<(String, String)> {
    statement_end()
        .split(sql)
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .map(|block| {
            let statement = format!("{};", block.trim_end_matches(';').trim_end());
            (label_for(&statement), statement)
        })
        .collect()
}

fn label_for(statement: &str) -> String {
    for line in statement.lines() {
        let s = line.trim();
        if s.is_empty() {
            continue;
        }
        if !s.starts_with("--") {
            return clip(s, LABEL_WIDTH, true);
        }
        if LABEL_MARKERS.iter().any(|m| s.contains(m)) {
            return clip(s.replace("--", "").trim(), LABEL_WIDTH, false);
        }
    }

    statement
        .lines()
        .next()
        .map(|first| clip(first, LABEL_WIDTH, false))
        .unwrap_or_else(|| "?".to_string())
}

fn clip(s: &str, width: usize, ellipsis: bool) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    let head: String = s.chars().take(width).collect();
    if ellipsis {
        format!("{head}...")
    } else {
        head
    }
}
