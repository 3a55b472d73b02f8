// SPDX-FileCopyrightText: 2026 Hostsync Developers <dev@hostsync.app>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use colored::{Color, Colorize};
use unicode_width::UnicodeWidthStr;

/// Renders rows as aligned, optionally colored, columns.
pub struct Table<'a, T, C: Column<T>> {
    pub columns: Vec<C>,
    pub separator: &'static str,
    pub header: bool,
    pub data: &'a [T],
}

impl<'a, T, C: Column<T>> Table<'a, T, C> {
    pub fn new(columns: Vec<C>, data: &'a [T]) -> Self {
        Self {
            columns,
            separator: "  ",
            header: true,
            data,
        }
    }

    fn widths(&self, rows: &[Vec<String>]) -> Vec<usize> {
        let mut widths: Vec<usize> = if self.header {
            self.columns.iter().map(|c| c.header().width()).collect()
        } else {
            vec![0; self.columns.len()]
        };
        for row in rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.width());
            }
        }
        widths
    }
}

impl<T, C: Column<T>> fmt::Display for Table<'_, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: Vec<Vec<String>> = self
            .data
            .iter()
            .map(|item| self.columns.iter().map(|col| col.format(item)).collect())
            .collect();
        let widths = self.widths(&rows);
        let last = self.columns.len().saturating_sub(1);

        if self.header {
            for (j, (col, width)) in self.columns.iter().zip(&widths).enumerate() {
                let cell = pad(col.header().to_string(), *width, j == last);
                write!(f, "{}", cell.bold())?;
                f.write_str(if j == last { "\n" } else { self.separator })?;
            }
        }

        for (cells, item) in rows.into_iter().zip(self.data) {
            for (j, ((col, cell), width)) in self.columns.iter().zip(cells).zip(&widths).enumerate()
            {
                let cell = pad(cell, *width, j == last);
                match col.color(item) {
                    Some(color) => write!(f, "{}", cell.color(color))?,
                    None => f.write_str(&cell)?,
                }
                f.write_str(if j == last { "\n" } else { self.separator })?;
            }
        }
        Ok(())
    }
}

/// A column of a [`Table`].
pub trait Column<T> {
    fn header(&self) -> &'static str;

    fn format(&self, data: &T) -> String;

    fn color(&self, _data: &T) -> Option<Color> {
        None
    }
}

// last column is left unpadded to avoid trailing whitespace
fn pad(cell: String, width: usize, last: bool) -> String {
    let fill = width.saturating_sub(cell.width());
    if last || fill == 0 {
        cell
    } else {
        cell + &" ".repeat(fill)
    }
}
