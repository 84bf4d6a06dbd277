//! Delimited text sheet reader.
//!
//! Produces ragged rows: cells are trimmed and trailing empty cells are
//! dropped, so a blank line becomes an empty row.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

pub type Row = Vec<String>;

/// Read every line of `reader` as one row.
pub fn read_rows<R: BufRead>(reader: R, delimiter: char) -> io::Result<Vec<Row>> {
    reader
        .lines()
        .map(|line| line.map(|l| split_row(&l, delimiter)))
        .collect()
}

pub fn read_rows_from_file(path: &Path, delimiter: char) -> io::Result<Vec<Row>> {
    let file = File::open(path)?;
    read_rows(BufReader::new(file), delimiter)
}

pub fn parse_rows(text: &str, delimiter: char) -> Vec<Row> {
    text.lines().map(|l| split_row(l, delimiter)).collect()
}

fn split_row(line: &str, delimiter: char) -> Row {
    let mut cells: Row = line
        .split(delimiter)
        .map(|cell| cell.trim().to_string())
        .collect();
    while cells.last().is_some_and(|c| c.is_empty()) {
        cells.pop();
    }
    cells
}

/// Non-empty cell at `column`, if any.
pub fn cell(row: &[String], column: usize) -> Option<&str> {
    row.get(column)
        .map(String::as_str)
        .filter(|c| !c.is_empty())
}
