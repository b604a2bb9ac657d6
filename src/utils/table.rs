//! Table rendering utilities for CLI outputs.

use crate::utils::formatting::{pad_right, truncate};
use unicode_width::UnicodeWidthStr;

pub struct Column {
    pub header: String,
    pub max_width: usize,
}

impl Column {
    pub fn new(header: &str, max_width: usize) -> Self {
        Self {
            header: header.to_string(),
            max_width,
        }
    }
}

/// A cell: the visible text plus an optional ANSI color applied after padding.
pub struct Cell {
    pub text: String,
    pub color: Option<&'static str>,
}

impl From<String> for Cell {
    fn from(text: String) -> Self {
        Self { text, color: None }
    }
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Self::from(text.to_string())
    }
}

impl Cell {
    pub fn colored(text: impl Into<String>, color: &'static str) -> Self {
        Self {
            text: text.into(),
            color: Some(color),
        }
    }
}

pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }

    /// Column widths fitted to the content, capped by each column's max.
    fn widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                let content = self
                    .rows
                    .iter()
                    .filter_map(|r| r.get(i))
                    .map(|c| UnicodeWidthStr::width(c.text.as_str()))
                    .max()
                    .unwrap_or(0);
                content
                    .max(UnicodeWidthStr::width(col.header.as_str()))
                    .min(col.max_width)
            })
            .collect()
    }

    pub fn render(&self) -> String {
        let widths = self.widths();
        let mut out = String::new();

        // Header
        for (col, w) in self.columns.iter().zip(&widths) {
            out.push_str(&pad_right(&truncate(&col.header, *w), *w));
            out.push(' ');
        }
        out.push('\n');

        // Rows
        for row in &self.rows {
            for (i, w) in widths.iter().enumerate() {
                let (text, color) = row
                    .get(i)
                    .map(|c| (c.text.as_str(), c.color))
                    .unwrap_or(("", None));
                let padded = pad_right(&truncate(text, *w), *w);
                match color {
                    Some(code) => out.push_str(&format!("{}{}{}", code, padded, super::colors::RESET)),
                    None => out.push_str(&padded),
                }
                out.push(' ');
            }
            out.push('\n');
        }

        out
    }
}
