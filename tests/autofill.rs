use aion_tools::ToolError;
use aion_tools::autofill;
use aion_tools::header::{
    HEADER_SCAN_COLS, HEADER_SCAN_ROWS, column_letter, locate_header_row, resolve_ticket_columns,
};
use aion_tools::io::{excel_read, excel_write};
use aion_tools::model::{CellValue, Sheet, WorkbookData};
use aion_tools::validation::{ensure_validation_table, realm_path};
use std::fs;
use tempfile::tempdir;

fn text(value: &str) -> CellValue {
    CellValue::Text(value.to_string())
}

fn tickets_sheet() -> Sheet {
    let mut sheet = Sheet::new("04_Tickets");
    sheet.set(1, 1, text("Project Aion ticket register"));

    let headers = [
        "Ticket_ID",
        "Realm",
        "Framework_Path",
        "Roadmap_Milestone",
        "Start",
        "Estimate_Days",
    ];
    for (offset, header) in headers.iter().enumerate() {
        sheet.set(2, offset as u32 + 1, text(header));
    }

    sheet.set(3, 1, text("T-0001"));
    sheet.set(3, 2, text("03_Artifacts"));
    sheet.set(3, 5, CellValue::DateTime(45429.0));
    sheet.set(3, 6, CellValue::Number(3.0));

    sheet.set(4, 1, text("T-0002"));
    sheet.set(4, 2, text("00_Triage_Inbox"));
    sheet.set(4, 3, text("Project_Aion/Custom_Location"));
    sheet.set(4, 5, CellValue::DateTime(45300.0));
    sheet.set(4, 6, CellValue::Number(2.0));

    sheet.set(5, 1, text("T-0003"));
    sheet.set(5, 6, CellValue::Number(1.0));

    sheet
}

#[test]
fn column_letters_follow_base_26_without_zero() {
    assert_eq!(column_letter(1), "A");
    assert_eq!(column_letter(26), "Z");
    assert_eq!(column_letter(27), "AA");
    assert_eq!(column_letter(52), "AZ");
    assert_eq!(column_letter(53), "BA");
}

#[test]
fn header_locator_prefers_text_heavy_row() {
    let sheet = tickets_sheet();
    assert_eq!(locate_header_row(&sheet, HEADER_SCAN_ROWS, HEADER_SCAN_COLS), 2);
}

#[test]
fn header_locator_defaults_to_row_one_for_blank_region() {
    let sheet = Sheet::new("04_Tickets");
    assert_eq!(locate_header_row(&sheet, HEADER_SCAN_ROWS, HEADER_SCAN_COLS), 1);
}

#[test]
fn header_locator_never_leaves_the_scan_window() {
    let mut sheet = Sheet::new("04_Tickets");
    sheet.set(5, 1, text("Lone_Header"));
    for column in 1..=10 {
        sheet.set(31, column, text("Dense_Header"));
    }
    // Row 31 would score far higher but sits outside the 30-row window.
    assert_eq!(locate_header_row(&sheet, 30, HEADER_SCAN_COLS), 5);
}

#[test]
fn header_locator_scores_numeric_rows_below_textual_rows() {
    let mut sheet = Sheet::new("04_Tickets");
    for column in 1..=4 {
        sheet.set(1, column, CellValue::Number(column as f64));
        sheet.set(2, column, text("Column"));
    }
    assert_eq!(locate_header_row(&sheet, HEADER_SCAN_ROWS, HEADER_SCAN_COLS), 2);
}

#[test]
fn missing_required_columns_are_reported_together() {
    let mut sheet = Sheet::new("04_Tickets");
    sheet.set(1, 1, text("Ticket_ID"));
    sheet.set(1, 2, text("Realm"));
    sheet.set(1, 3, text("Start"));

    let error = resolve_ticket_columns(&sheet, 1).expect_err("columns should be missing");
    match error {
        ToolError::MissingColumns {
            sheet,
            header_row,
            names,
        } => {
            assert_eq!(sheet, "04_Tickets");
            assert_eq!(header_row, 1);
            assert_eq!(names, vec!["Framework_Path", "Roadmap_Milestone"]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn realm_paths_apply_the_override_table_before_the_default_rule() {
    assert_eq!(realm_path("00_Triage_Inbox"), "Project_Aion/00_Triage_Inbox");
    assert_eq!(realm_path("03_Artifacts"), "Project_Aion/03_Artifacts");
    assert_eq!(realm_path("11_Trading_Strategies"), "Project_Aion/11_Trading_Strategies");
}

#[test]
fn validation_table_falls_back_to_sorted_spec_stems() {
    let temp_dir = tempdir().expect("temporary directory");
    let spec_dir = temp_dir.path().join("spec");
    fs::create_dir(&spec_dir).expect("spec directory created");
    fs::write(spec_dir.join("03_Artifacts.md"), "artifacts").expect("spec written");
    fs::write(spec_dir.join("01_Project_Framework.md"), "framework").expect("spec written");
    fs::write(spec_dir.join("readme.txt"), "not a spec").expect("extra file written");

    let mut workbook = WorkbookData::default();
    let realms = ensure_validation_table(&mut workbook, &spec_dir).expect("table built");

    assert_eq!(realms, vec!["01_Project_Framework", "03_Artifacts"]);
    let sheet = workbook.sheet("99_Validation").expect("validation sheet created");
    assert_eq!(sheet.text(1, 1), "Allowed_Realms");
    assert_eq!(sheet.text(2, 1), "01_Project_Framework");
    assert_eq!(sheet.text(3, 1), "03_Artifacts");
    assert_eq!(sheet.text(1, 3), "Framework_Path_By_Realm");
    assert_eq!(sheet.text(2, 3), "Project_Aion/01_Project_Framework");
    assert_eq!(sheet.text(3, 3), "Project_Aion/03_Artifacts");
}

#[test]
fn validation_table_keeps_pre_existing_sheet_order() {
    let temp_dir = tempdir().expect("temporary directory");

    let mut workbook = WorkbookData::default();
    let sheet = workbook.sheet_mut_or_create("99_Validation");
    sheet.set(2, 1, text("13_Business_Intelligence"));
    sheet.set(3, 1, text("03_Artifacts"));

    let realms =
        ensure_validation_table(&mut workbook, temp_dir.path()).expect("table built");

    assert_eq!(realms, vec!["13_Business_Intelligence", "03_Artifacts"]);
    let sheet = workbook.sheet("99_Validation").expect("validation sheet kept");
    assert_eq!(sheet.text(2, 3), "Project_Aion/13_Business_Intelligence");
    assert_eq!(sheet.text(3, 3), "Project_Aion/03_Artifacts");
}

#[test]
fn formula_templates_match_the_injected_shapes() {
    assert_eq!(
        autofill::framework_path_formula("B3", 15),
        "=IF(B3=\"\",\"\",IFERROR(XLOOKUP(B3,'99_Validation'!$A$2:$A$15,\
         '99_Validation'!$C$2:$C$15,\"\"),\"\"))"
    );
    assert_eq!(
        autofill::roadmap_milestone_formula("E3"),
        "=IF(E3=\"\",\"\", \"Q\"&ROUNDUP(MONTH(E3)/3,0)&\"_\"&TEXT(E3,\"yyyy\"))"
    );
}

#[test]
fn autofill_fills_blanks_only_and_is_idempotent() {
    let temp_dir = tempdir().expect("temporary directory");
    let spec_dir = temp_dir.path().join("spec");
    fs::create_dir(&spec_dir).expect("spec directory created");
    fs::write(spec_dir.join("00_Triage_Inbox.md"), "inbox").expect("spec written");
    fs::write(spec_dir.join("03_Artifacts.md"), "artifacts").expect("spec written");

    let workbook_path = temp_dir.path().join("pm.xlsx");
    let workbook = WorkbookData {
        sheets: vec![tickets_sheet()],
    };
    excel_write::write_workbook(&workbook_path, &workbook).expect("workbook written");

    let report = autofill::apply_autofill(&workbook_path, &spec_dir).expect("autofill applied");
    assert_eq!(report.header_row, 2);
    assert_eq!(report.realm_count, 2);
    assert_eq!(report.path_cells_filled, 2);
    assert_eq!(report.milestone_cells_filled, 3);

    let reloaded = excel_read::read_workbook(&workbook_path).expect("workbook reloaded");
    let tickets = reloaded.sheet("04_Tickets").expect("tickets sheet present");

    match tickets.value(3, 3) {
        Some(CellValue::Formula(formula)) => {
            assert!(formula.contains("XLOOKUP(B3"), "lookup keyed on the realm cell: {formula}");
            assert!(
                formula.contains("$A$2:$A$3") && formula.contains("$C$2:$C$3"),
                "ranges cover both realm rows: {formula}"
            );
        }
        other => panic!("expected a lookup formula, found {other:?}"),
    }
    match tickets.value(3, 4) {
        Some(CellValue::Formula(formula)) => {
            assert!(formula.contains("ROUNDUP(MONTH(E3)/3,0)"), "quarter arithmetic: {formula}");
            assert!(formula.contains("TEXT(E3,\"yyyy\")"), "year suffix: {formula}");
        }
        other => panic!("expected a quarter formula, found {other:?}"),
    }

    // The pre-filled path cell survives untouched.
    assert_eq!(
        tickets.value(4, 3),
        Some(&CellValue::Text("Project_Aion/Custom_Location".to_string()))
    );

    let validation = reloaded.sheet("99_Validation").expect("validation sheet present");
    assert_eq!(validation.text(2, 1), "00_Triage_Inbox");
    assert_eq!(validation.text(2, 3), "Project_Aion/00_Triage_Inbox");

    let second = autofill::apply_autofill(&workbook_path, &spec_dir).expect("second run");
    assert_eq!(second.path_cells_filled, 0);
    assert_eq!(second.milestone_cells_filled, 0);
}

#[test]
fn autofill_aborts_before_saving_when_columns_are_missing() {
    let temp_dir = tempdir().expect("temporary directory");
    let spec_dir = temp_dir.path().join("spec");
    fs::create_dir(&spec_dir).expect("spec directory created");

    let mut sheet = Sheet::new("04_Tickets");
    sheet.set(1, 1, text("Ticket_ID"));
    sheet.set(1, 2, text("Realm"));
    sheet.set(1, 3, text("Start"));
    sheet.set(2, 1, text("T-0001"));

    let workbook_path = temp_dir.path().join("pm.xlsx");
    let workbook = WorkbookData {
        sheets: vec![sheet],
    };
    excel_write::write_workbook(&workbook_path, &workbook).expect("workbook written");

    let error = autofill::apply_autofill(&workbook_path, &spec_dir)
        .expect_err("run should abort on missing columns");
    assert!(matches!(error, ToolError::MissingColumns { .. }));

    // Nothing was persisted: the validation sheet never reached the file.
    let reloaded = excel_read::read_workbook(&workbook_path).expect("workbook reloaded");
    assert!(reloaded.sheet("99_Validation").is_none());
}
