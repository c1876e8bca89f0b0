use std::collections::HashMap;

use crate::aion::tools::error::{Result, ToolError};
use crate::aion::tools::model::Sheet;

/// Number of leading rows scanned when inferring the header row.
pub const HEADER_SCAN_ROWS: u32 = 30;

/// Number of columns scanned per candidate row.
pub const HEADER_SCAN_COLS: u32 = 80;

/// Columns the autofill run cannot proceed without.
pub const REQUIRED_TICKET_COLUMNS: [&str; 4] =
    ["Realm", "Framework_Path", "Roadmap_Milestone", "Start"];

/// 1-based indices of the ticket columns the formula injector touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TicketColumns {
    pub realm: u32,
    pub framework_path: u32,
    pub roadmap_milestone: u32,
    pub start: u32,
}

/// Returns the 1-based index of the most likely header row.
///
/// Header rows are distinguished from data rows by being mostly non-numeric
/// text with many populated columns, so each candidate row is scored by the
/// pair (non-empty cells, non-numeric non-empty cells) and the strictly
/// highest score wins. All-blank rows are skipped; the first row encountered
/// wins ties, and an entirely empty scan region falls back to row 1.
pub fn locate_header_row(sheet: &Sheet, scan_rows: u32, scan_cols: u32) -> u32 {
    let mut best_row = 1;
    let mut best: (i64, i64) = (-1, -1);

    for row in 1..=scan_rows.min(sheet.max_row()) {
        let mut values: Vec<String> = (1..=scan_cols)
            .map(|column| sheet.text(row, column).trim().to_string())
            .collect();
        while values.last().is_some_and(|value| value.is_empty()) {
            values.pop();
        }

        let nonempty = values.iter().filter(|value| !value.is_empty()).count() as i64;
        if nonempty == 0 {
            continue;
        }
        let stringy = values
            .iter()
            .filter(|value| !value.is_empty() && !is_numeric_literal(value))
            .count() as i64;

        let score = (nonempty, stringy);
        if score > best {
            best = score;
            best_row = row;
        }
    }

    best_row
}

/// Maps every trimmed non-blank cell of the header row to its column index.
/// Duplicate header names resolve to the right-most occurrence.
pub fn header_columns(sheet: &Sheet, header_row: u32) -> HashMap<String, u32> {
    let mut columns = HashMap::new();
    for column in 1..=sheet.max_column() {
        let name = sheet.text(header_row, column).trim().to_string();
        if !name.is_empty() {
            columns.insert(name, column);
        }
    }
    columns
}

/// Resolves the required ticket columns against the header row, failing with
/// the full list of missing names if any of them is absent.
pub fn resolve_ticket_columns(sheet: &Sheet, header_row: u32) -> Result<TicketColumns> {
    let columns = header_columns(sheet, header_row);

    let missing: Vec<String> = REQUIRED_TICKET_COLUMNS
        .iter()
        .copied()
        .filter(|name| !columns.contains_key(*name))
        .map(str::to_string)
        .collect();
    if !missing.is_empty() {
        return Err(ToolError::MissingColumns {
            sheet: sheet.name.clone(),
            header_row,
            names: missing,
        });
    }

    Ok(TicketColumns {
        realm: columns["Realm"],
        framework_path: columns["Framework_Path"],
        roadmap_milestone: columns["Roadmap_Milestone"],
        start: columns["Start"],
    })
}

/// Converts a 1-based column index into spreadsheet letter notation
/// (1→A, 26→Z, 27→AA).
pub fn column_letter(mut column: u32) -> String {
    let mut letters = String::new();
    while column > 0 {
        let remainder = ((column - 1) % 26) as u8;
        letters.insert(0, (b'A' + remainder) as char);
        column = (column - 1) / 26;
    }
    letters
}

/// Full match of an optionally signed integer or decimal literal.
fn is_numeric_literal(value: &str) -> bool {
    let unsigned = value.strip_prefix(['-', '+']).unwrap_or(value);
    let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|byte| byte.is_ascii_digit());
    match unsigned.split_once('.') {
        Some((integer, fraction)) => all_digits(integer) && all_digits(fraction),
        None => all_digits(unsigned),
    }
}
