use std::path::Path;

use serde::Serialize;
use tracing::{info, instrument};

use crate::aion::tools::error::{Result, ToolError};
use crate::aion::tools::header::{self, HEADER_SCAN_COLS, HEADER_SCAN_ROWS};
use crate::aion::tools::io::{excel_read, excel_write};
use crate::aion::tools::model::CellValue;
use crate::aion::tools::project::{TICKETS_SHEET, VALIDATION_SHEET};
use crate::aion::tools::validation;

/// Outcome of one autofill run.
#[derive(Debug, Clone, Serialize)]
pub struct AutofillReport {
    pub header_row: u32,
    pub realm_count: usize,
    pub path_cells_filled: usize,
    pub milestone_cells_filled: usize,
}

/// Fills blank `Framework_Path` and `Roadmap_Milestone` cells of the tickets
/// sheet with lookup and quarter-label formulas, then saves the workbook.
///
/// Non-blank cells are never touched, so repeated runs only add what a human
/// or a previous run has not filled in yet. The whole run aborts before
/// saving when any required column is missing from the inferred header row.
#[instrument(
    level = "info",
    skip_all,
    fields(workbook = %workbook_path.display(), spec_dir = %spec_dir.display())
)]
pub fn apply_autofill(workbook_path: &Path, spec_dir: &Path) -> Result<AutofillReport> {
    if !workbook_path.exists() {
        return Err(ToolError::MissingInput(workbook_path.to_path_buf()));
    }

    let mut workbook = excel_read::read_workbook(workbook_path)?;
    if workbook.sheet(TICKETS_SHEET).is_none() {
        return Err(ToolError::MissingSheet(TICKETS_SHEET.to_string()));
    }

    let realms = validation::ensure_validation_table(&mut workbook, spec_dir)?;
    // Realms occupy rows 2..=last in the validation sheet.
    let last_realm_row = realms.len() as u32 + 1;

    let tickets = workbook
        .sheet(TICKETS_SHEET)
        .ok_or_else(|| ToolError::MissingSheet(TICKETS_SHEET.to_string()))?;
    let header_row = header::locate_header_row(tickets, HEADER_SCAN_ROWS, HEADER_SCAN_COLS);
    let columns = header::resolve_ticket_columns(tickets, header_row)?;
    info!(
        header_row,
        realm_count = realms.len(),
        "resolved ticket columns"
    );

    let realm_letter = header::column_letter(columns.realm);
    let start_letter = header::column_letter(columns.start);
    let max_row = tickets.max_row();

    let tickets = workbook
        .sheet_mut(TICKETS_SHEET)
        .ok_or_else(|| ToolError::MissingSheet(TICKETS_SHEET.to_string()))?;

    let mut path_cells_filled = 0;
    let mut milestone_cells_filled = 0;
    for row in (header_row + 1)..=max_row {
        let realm_cell = format!("{realm_letter}{row}");
        let start_cell = format!("{start_letter}{row}");

        if tickets.is_blank(row, columns.framework_path) {
            tickets.set(
                row,
                columns.framework_path,
                CellValue::Formula(framework_path_formula(&realm_cell, last_realm_row)),
            );
            path_cells_filled += 1;
        }

        if tickets.is_blank(row, columns.roadmap_milestone) {
            tickets.set(
                row,
                columns.roadmap_milestone,
                CellValue::Formula(roadmap_milestone_formula(&start_cell)),
            );
            milestone_cells_filled += 1;
        }
    }

    excel_write::write_workbook(workbook_path, &workbook)?;
    info!(path_cells_filled, milestone_cells_filled, "workbook saved");

    Ok(AutofillReport {
        header_row,
        realm_count: realms.len(),
        path_cells_filled,
        milestone_cells_filled,
    })
}

/// Lookup formula resolving a ticket's realm to its framework path via the
/// validation sheet. A blank realm or a lookup miss both collapse to a blank
/// result inside the formula rather than an error value.
pub fn framework_path_formula(realm_cell: &str, last_realm_row: u32) -> String {
    format!(
        "=IF({realm_cell}=\"\",\"\",IFERROR(\
         XLOOKUP({realm_cell},'{VALIDATION_SHEET}'!$A$2:$A${last_realm_row},\
         '{VALIDATION_SHEET}'!$C$2:$C${last_realm_row},\"\"),\"\"))"
    )
}

/// Quarter label formula: `Q{ceil(month/3)}_{four-digit-year}` of the start
/// date, or blank when the start cell is blank.
pub fn roadmap_milestone_formula(start_cell: &str) -> String {
    format!(
        "=IF({start_cell}=\"\",\"\", \
         \"Q\"&ROUNDUP(MONTH({start_cell})/3,0)&\"_\"&TEXT({start_cell},\"yyyy\"))"
    )
}
