// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Column-aligned text tables for list output.
//!
//! Cells are padded before they are colored so ANSI escapes never skew
//! the column widths.

use std::io::Write;

use crate::color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Paint {
    Plain,
    Muted,
    Status,
}

#[derive(Debug, Clone)]
pub struct Column {
    title: &'static str,
    align: Align,
    paint: Paint,
    max: Option<usize>,
}

impl Column {
    pub fn left(title: &'static str) -> Self {
        Self { title, align: Align::Left, paint: Paint::Plain, max: None }
    }

    pub fn right(title: &'static str) -> Self {
        Self { align: Align::Right, ..Self::left(title) }
    }

    pub fn muted(title: &'static str) -> Self {
        Self { paint: Paint::Muted, ..Self::left(title) }
    }

    /// Left-aligned, colored by [`color::status`].
    pub fn status(title: &'static str) -> Self {
        Self { paint: Paint::Status, ..Self::left(title) }
    }

    /// Truncate cells longer than `max` characters with an ellipsis.
    pub fn with_max(mut self, max: usize) -> Self {
        self.max = Some(max.max(1));
        self
    }

    fn fit(&self, cell: &str) -> String {
        match self.max {
            Some(max) if cell.chars().count() > max => {
                let mut out: String = cell.chars().take(max - 1).collect();
                out.push('…');
                out
            }
            _ => cell.to_string(),
        }
    }
}

pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns, rows: Vec::new() }
    }

    /// Add a row; missing trailing cells render empty, extra cells are dropped.
    pub fn row(&mut self, cells: Vec<String>) {
        let mut fitted: Vec<String> =
            self.columns.iter().zip(cells.iter()).map(|(col, cell)| col.fit(cell)).collect();
        fitted.resize(self.columns.len(), String::new());
        self.rows.push(fitted);
    }

    pub fn render(&self, out: &mut dyn Write) {
        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                self.rows
                    .iter()
                    .map(|row| row[i].chars().count())
                    .chain(std::iter::once(col.title.len()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let titles: Vec<String> = self.columns.iter().map(|c| c.title.to_string()).collect();
        let _ = writeln!(out, "{}", self.line(&titles, &widths, true));
        for row in &self.rows {
            let _ = writeln!(out, "{}", self.line(row, &widths, false));
        }
    }

    fn line(&self, cells: &[String], widths: &[usize], is_header: bool) -> String {
        let last = self.columns.len().saturating_sub(1);
        let parts: Vec<String> = self
            .columns
            .iter()
            .zip(cells)
            .zip(widths)
            .enumerate()
            .map(|(i, ((col, cell), width))| {
                let padded = match col.align {
                    Align::Left if i == last => cell.clone(),
                    Align::Left => format!("{cell:<width$}"),
                    Align::Right => format!("{cell:>width$}"),
                };
                if is_header {
                    color::header(&padded)
                } else {
                    match col.paint {
                        Paint::Plain => padded,
                        Paint::Muted => color::muted(&padded),
                        Paint::Status => color::status(&padded),
                    }
                }
            })
            .collect();
        parts.join("  ")
    }
}

#[cfg(test)]
#[path = "table_tests.rs"]
mod tests;
