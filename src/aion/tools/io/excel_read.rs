use std::path::Path;

use calamine::{DataType, Reader, Xlsx, open_workbook};

use crate::aion::tools::error::Result;
use crate::aion::tools::model::{CellValue, Sheet, WorkbookData};

/// Loads every sheet of the workbook into the in-memory model, preserving
/// sheet order. Formula cells keep their formula source rather than the
/// cached result, so a round trip through
/// [`excel_write`](crate::aion::tools::io::excel_write) leaves them intact.
pub fn read_workbook(path: &Path) -> Result<WorkbookData> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let sheet_names = workbook.sheet_names().to_vec();

    let mut sheets = Vec::with_capacity(sheet_names.len());
    for name in sheet_names {
        let mut sheet = Sheet::new(name.clone());
        if let Some(range) = workbook.worksheet_range(&name) {
            ingest_values(&range?, &mut sheet);
        }
        if let Some(range) = workbook.worksheet_formula(&name) {
            ingest_formulas(&range?, &mut sheet);
        }
        sheets.push(sheet);
    }

    Ok(WorkbookData { sheets })
}

fn ingest_values(range: &calamine::Range<DataType>, sheet: &mut Sheet) {
    let Some((start_row, start_column)) = range.start() else {
        return;
    };
    for (row_offset, row) in range.rows().enumerate() {
        for (column_offset, cell) in row.iter().enumerate() {
            if let Some(value) = cell_to_value(cell) {
                // Range coordinates are 0-based and clipped to the used area.
                let row_index = start_row + row_offset as u32 + 1;
                let column_index = start_column + column_offset as u32 + 1;
                sheet.set(row_index, column_index, value);
            }
        }
    }
}

fn ingest_formulas(range: &calamine::Range<String>, sheet: &mut Sheet) {
    let Some((start_row, start_column)) = range.start() else {
        return;
    };
    for (row_offset, row) in range.rows().enumerate() {
        for (column_offset, formula) in row.iter().enumerate() {
            if formula.is_empty() {
                continue;
            }
            let row_index = start_row + row_offset as u32 + 1;
            let column_index = start_column + column_offset as u32 + 1;
            sheet.set(row_index, column_index, CellValue::Formula(formula.clone()));
        }
    }
}

fn cell_to_value(cell: &DataType) -> Option<CellValue> {
    match cell {
        DataType::Empty => None,
        DataType::String(value) if value.is_empty() => None,
        DataType::String(value) => Some(CellValue::Text(value.clone())),
        DataType::Float(value) => Some(CellValue::Number(*value)),
        DataType::Int(value) => Some(CellValue::Number(*value as f64)),
        DataType::Bool(value) => Some(CellValue::Bool(*value)),
        DataType::DateTime(value) => Some(CellValue::DateTime(*value)),
        other => Some(CellValue::Text(other.to_string())),
    }
}
