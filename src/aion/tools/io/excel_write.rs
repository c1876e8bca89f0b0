use std::path::Path;

use rust_xlsxwriter::{Format, Formula, Workbook};

use crate::aion::tools::error::Result;
use crate::aion::tools::model::{CellValue, WorkbookData};

/// Writes the provided workbook data to the given path, sheet order
/// preserved. Date cells are written as serial numbers carrying a plain
/// ISO date format.
pub fn write_workbook(path: &Path, data: &WorkbookData) -> Result<()> {
    let mut workbook_writer = Workbook::new();
    let date_format = Format::new().set_num_format("yyyy-mm-dd");

    for sheet in &data.sheets {
        let worksheet = workbook_writer.add_worksheet();
        worksheet.set_name(&sheet.name)?;

        for (&(row, column), value) in sheet.cells() {
            let row_index = row - 1;
            let column_index = (column - 1) as u16;
            match value {
                CellValue::Text(text) => {
                    worksheet.write_string(row_index, column_index, text)?;
                }
                CellValue::Number(number) => {
                    worksheet.write_number(row_index, column_index, *number)?;
                }
                CellValue::Bool(flag) => {
                    worksheet.write_boolean(row_index, column_index, *flag)?;
                }
                CellValue::DateTime(serial) => {
                    worksheet.write_number_with_format(
                        row_index,
                        column_index,
                        *serial,
                        &date_format,
                    )?;
                }
                CellValue::Formula(formula) => {
                    worksheet.write_formula(row_index, column_index, Formula::new(formula.as_str()))?;
                }
            }
        }
    }

    workbook_writer.save(path)?;
    Ok(())
}
