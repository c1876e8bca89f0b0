use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::aion::tools::error::Result;
use crate::aion::tools::model::{CellValue, WorkbookData};
use crate::aion::tools::project::{PROJECT_FOLDER, VALIDATION_SHEET};

/// Header label written above the realm list in column A.
pub const ALLOWED_REALMS_HEADER: &str = "Allowed_Realms";

/// Header label written above the realm→path table in column C.
pub const PATH_BY_REALM_HEADER: &str = "Framework_Path_By_Realm";

/// Realms whose folder does not follow the default `Project_Aion/{realm}`
/// naming rule. Consulted before the rule, so exceptions stay data.
const REALM_PATH_OVERRIDES: &[(&str, &str)] = &[("00_Triage_Inbox", "Project_Aion/00_Triage_Inbox")];

/// Folder path the tickets of a realm should point at.
pub fn realm_path(realm: &str) -> String {
    REALM_PATH_OVERRIDES
        .iter()
        .find(|(name, _)| *name == realm)
        .map(|(_, path)| (*path).to_string())
        .unwrap_or_else(|| format!("{PROJECT_FOLDER}/{realm}"))
}

/// Ensures the validation sheet exists and carries the allowed-realm list in
/// column A plus the realm→path table in column C.
///
/// Column A is read as-is when already populated (rows 2 downwards until the
/// first blank); otherwise it is derived from the sorted specification
/// document stems and written back. Column C is rebuilt on every run, even
/// when unchanged. Returns the realm list in sheet order, which later
/// formulas reference by row position.
pub fn ensure_validation_table(workbook: &mut WorkbookData, spec_dir: &Path) -> Result<Vec<String>> {
    let sheet = workbook.sheet_mut_or_create(VALIDATION_SHEET);

    let mut realms = Vec::new();
    let mut row = 2;
    loop {
        let value = sheet.text(row, 1);
        let value = value.trim();
        if value.is_empty() {
            break;
        }
        realms.push(value.to_string());
        row += 1;
    }

    if realms.is_empty() {
        realms = spec_document_stems(spec_dir)?;
        info!(
            count = realms.len(),
            "derived realm list from specification documents"
        );
        sheet.set(1, 1, CellValue::Text(ALLOWED_REALMS_HEADER.to_string()));
        for (offset, realm) in realms.iter().enumerate() {
            sheet.set(offset as u32 + 2, 1, CellValue::Text(realm.clone()));
        }
    } else {
        debug!(count = realms.len(), "validation sheet already lists realms");
    }

    sheet.set(1, 3, CellValue::Text(PATH_BY_REALM_HEADER.to_string()));
    for (offset, realm) in realms.iter().enumerate() {
        sheet.set(offset as u32 + 2, 3, CellValue::Text(realm_path(realm)));
    }

    Ok(realms)
}

/// Sorted stems of the `.md` documents in the specification directory.
fn spec_document_stems(spec_dir: &Path) -> Result<Vec<String>> {
    let mut stems = Vec::new();
    for entry in fs::read_dir(spec_dir)? {
        let path = entry?.path();
        if path.extension().is_some_and(|extension| extension == "md") {
            if let Some(stem) = path.file_stem() {
                stems.push(stem.to_string_lossy().into_owned());
            }
        }
    }
    stems.sort();
    Ok(stems)
}
