use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Value carried by a single worksheet cell. Blank cells are simply absent
/// from the sheet, so there is no explicit empty variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum CellValue {
    /// Plain text.
    Text(String),
    /// Numeric value.
    Number(f64),
    /// Boolean value.
    Bool(bool),
    /// Date or time expressed as an Excel serial number.
    DateTime(f64),
    /// Formula source, stored without evaluating it.
    Formula(String),
}

impl CellValue {
    /// Stringified view of the cell, mirroring how a spreadsheet displays raw
    /// content. Formulas render as their source text.
    pub fn to_text(&self) -> String {
        match self {
            CellValue::Text(value) => value.clone(),
            CellValue::Number(value) => value.to_string(),
            CellValue::Bool(value) => value.to_string(),
            CellValue::DateTime(value) => value.to_string(),
            CellValue::Formula(value) => value.clone(),
        }
    }
}

/// A single worksheet: a name plus a sparse grid of cells addressed by
/// 1-indexed `(row, column)` pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    cells: BTreeMap<(u32, u32), CellValue>,
}

impl Sheet {
    /// Creates an empty sheet with the provided name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cells: BTreeMap::new(),
        }
    }

    /// Returns the cell value at the 1-indexed address, if any.
    pub fn value(&self, row: u32, column: u32) -> Option<&CellValue> {
        self.cells.get(&(row, column))
    }

    /// Inserts or replaces the cell value at the 1-indexed address.
    pub fn set(&mut self, row: u32, column: u32, value: CellValue) {
        debug_assert!(row >= 1 && column >= 1, "cell addresses are 1-indexed");
        self.cells.insert((row, column), value);
    }

    /// Stringified cell content; blank cells render as the empty string.
    pub fn text(&self, row: u32, column: u32) -> String {
        self.value(row, column)
            .map(CellValue::to_text)
            .unwrap_or_default()
    }

    /// A cell is blank when it is absent or holds only whitespace text.
    pub fn is_blank(&self, row: u32, column: u32) -> bool {
        match self.value(row, column) {
            None => true,
            Some(CellValue::Text(value)) => value.trim().is_empty(),
            Some(_) => false,
        }
    }

    /// Highest populated row index, or 0 for an empty sheet.
    pub fn max_row(&self) -> u32 {
        self.cells.keys().map(|(row, _)| *row).max().unwrap_or(0)
    }

    /// Highest populated column index, or 0 for an empty sheet.
    pub fn max_column(&self) -> u32 {
        self.cells
            .keys()
            .map(|(_, column)| *column)
            .max()
            .unwrap_or(0)
    }

    /// Iterates all populated cells in address order.
    pub fn cells(&self) -> impl Iterator<Item = (&(u32, u32), &CellValue)> {
        self.cells.iter()
    }
}

/// An ordered collection of sheets mirroring one workbook document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkbookData {
    pub sheets: Vec<Sheet>,
}

impl WorkbookData {
    /// Looks up a sheet by name.
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|sheet| sheet.name == name)
    }

    /// Looks up a sheet by name for mutation.
    pub fn sheet_mut(&mut self, name: &str) -> Option<&mut Sheet> {
        self.sheets.iter_mut().find(|sheet| sheet.name == name)
    }

    /// Returns the named sheet, appending an empty one when absent. New sheets
    /// land at the end of the workbook, matching spreadsheet creation order.
    pub fn sheet_mut_or_create(&mut self, name: &str) -> &mut Sheet {
        if let Some(index) = self.sheets.iter().position(|sheet| sheet.name == name) {
            return &mut self.sheets[index];
        }
        self.sheets.push(Sheet::new(name));
        let last = self.sheets.len() - 1;
        &mut self.sheets[last]
    }
}
