//! Canonical locations and sheet names inside the Project Aion workspace.
//!
//! Both tools operate on the same workspace checkout: a `Project_Aion/` folder
//! tree of realm directories plus the project-management workbook under
//! `data/`. The constants here are the defaults; the CLI can point either tool
//! elsewhere.

/// Default location of the project-management workbook.
pub const WORKBOOK_PATH: &str = "data/Project_Aion_PM_System.xlsx";

/// Directory holding one specification document per realm.
pub const FRAMEWORK_SPEC_DIR: &str =
    "Project_Aion/01_Project_Framework/00_Master_Index/Framework_Directory_Spec";

/// Worksheet holding the ticket rows.
pub const TICKETS_SHEET: &str = "04_Tickets";

/// Worksheet holding the allowed-realm list and the realm→path table.
pub const VALIDATION_SHEET: &str = "99_Validation";

/// Top-level folder every realm directory lives under.
pub const PROJECT_FOLDER: &str = "Project_Aion";
