use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::aion::tools::error::Result;
use crate::aion::tools::listing::ListingStrategy;
use crate::aion::tools::project::FRAMEWORK_SPEC_DIR;
use crate::aion::tools::region::{self, TREE_BEGIN, TREE_END};

/// Snapshot depth used when a document carries no override.
pub const DEFAULT_TREE_DEPTH: usize = 4;

/// Specification document name → real folder it snapshots.
const REALM_FOLDERS: &[(&str, &str)] = &[
    ("01_Project_Framework.md", "Project_Aion/01_Project_Framework"),
    ("02_Glass_Cockpit_GUI.md", "Project_Aion/02_Glass_Cockpit_GUI"),
    ("03_Artifacts.md", "Project_Aion/03_Artifacts"),
    ("04_Admin_Automation_AWACS.md", "Project_Aion/04_Admin_Automation_AWACS"),
    ("05_IT_Infrastructure.md", "Project_Aion/05_IT_Infrastructure"),
    ("06_Databases.md", "Project_Aion/06_Databases"),
    ("07_Expert_Systems.md", "Project_Aion/07_Expert_Systems"),
    (
        "08_Modelling_Feature_Design_and_Engineering.md",
        "Project_Aion/08_Modelling_Feature_Design_and_Engineering_Principles",
    ),
    ("09_ML_AI_Systems.md", "Project_Aion/09_ML_AI_Systems"),
    (
        "10_Model_Simulation_Backtesting.md",
        "Project_Aion/10_Model_Simulation_Backtesting",
    ),
    ("11_Trading_Strategies.md", "Project_Aion/11_Trading_Strategies"),
    ("12_Trading_Engines.md", "Project_Aion/12_Trading_Engines"),
    ("13_Business_Intelligence.md", "Project_Aion/13_Business_Intelligence"),
];

/// Documents whose folders warrant a deeper snapshot than the default.
const DEPTH_OVERRIDES: &[(&str, usize)] = &[("06_Databases.md", 5)];

/// Where the synchronizer reads documents and which folders they mirror.
/// `Default` carries the Project Aion tables; tests construct their own.
#[derive(Debug, Clone)]
pub struct TreeSyncConfig {
    pub spec_dir: PathBuf,
    pub realm_folders: Vec<(String, PathBuf)>,
    pub depth_overrides: Vec<(String, usize)>,
    pub default_depth: usize,
}

impl Default for TreeSyncConfig {
    fn default() -> Self {
        Self {
            spec_dir: PathBuf::from(FRAMEWORK_SPEC_DIR),
            realm_folders: REALM_FOLDERS
                .iter()
                .map(|(document, folder)| ((*document).to_string(), PathBuf::from(folder)))
                .collect(),
            depth_overrides: DEPTH_OVERRIDES
                .iter()
                .map(|(document, depth)| ((*document).to_string(), *depth))
                .collect(),
            default_depth: DEFAULT_TREE_DEPTH,
        }
    }
}

impl TreeSyncConfig {
    /// Folder mirrored by a document; unmapped documents resolve to an empty
    /// path, which renders as the missing-path placeholder.
    fn folder_for(&self, document: &str) -> PathBuf {
        self.realm_folders
            .iter()
            .find(|(name, _)| name.as_str() == document)
            .map(|(_, folder)| folder.clone())
            .unwrap_or_default()
    }

    fn depth_for(&self, document: &str) -> usize {
        self.depth_overrides
            .iter()
            .find(|(name, _)| name.as_str() == document)
            .map(|(_, depth)| *depth)
            .unwrap_or(self.default_depth)
    }
}

/// Outcome of one synchronizer run.
#[derive(Debug, Clone, Serialize)]
pub struct TreeSyncReport {
    pub scanned: usize,
    pub changed: usize,
    pub changed_documents: Vec<String>,
}

/// Re-renders the fenced directory snapshot between the sentinel markers of
/// every specification document, writing a document back only when its text
/// actually changed. Documents without a complete marker pair are left
/// byte-identical.
#[instrument(level = "info", skip_all, fields(spec_dir = %config.spec_dir.display()))]
pub fn sync_spec_trees(
    config: &TreeSyncConfig,
    strategy: ListingStrategy,
) -> Result<TreeSyncReport> {
    let mut documents = Vec::new();
    for entry in fs::read_dir(&config.spec_dir)? {
        let path = entry?.path();
        if path.extension().is_some_and(|extension| extension == "md") {
            documents.push(path);
        }
    }
    documents.sort();

    let mut report = TreeSyncReport {
        scanned: 0,
        changed: 0,
        changed_documents: Vec::new(),
    };
    for document in &documents {
        report.scanned += 1;
        if update_document(document, config, strategy)? {
            report.changed += 1;
            report.changed_documents.push(document_name(document));
            info!(document = %document.display(), "updated tree snapshot");
        }
    }

    info!(
        scanned = report.scanned,
        changed = report.changed,
        "tree snapshots synchronised"
    );
    Ok(report)
}

fn update_document(
    document: &Path,
    config: &TreeSyncConfig,
    strategy: ListingStrategy,
) -> Result<bool> {
    let name = document_name(document);
    let folder = config.folder_for(&name);
    let depth = config.depth_for(&name);

    let text = fs::read_to_string(document)?;
    if !text.contains(TREE_BEGIN) || !text.contains(TREE_END) {
        debug!(document = %document.display(), "no snapshot markers, skipping");
        return Ok(false);
    }

    let block = strategy.snapshot(&folder, depth)?;
    let Some(rewritten) = region::replace_region(&text, TREE_BEGIN, TREE_END, &block) else {
        debug!(document = %document.display(), "end marker does not follow begin marker, skipping");
        return Ok(false);
    };

    if rewritten != text {
        fs::write(document, rewritten)?;
        return Ok(true);
    }
    Ok(false)
}

fn document_name(document: &Path) -> String {
    document
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
