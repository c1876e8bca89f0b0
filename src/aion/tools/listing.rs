use std::path::Path;
use std::process::{Command, Stdio};

use tracing::debug;
use walkdir::WalkDir;

use crate::aion::tools::error::{Result, ToolError};

/// How directory snapshots are produced. The external `tree` utility renders
/// the friendlier output, so it is preferred whenever available; the walk
/// fallback mirrors a `find | sort` pipeline and needs no external binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingStrategy {
    TreeCommand,
    Walk,
}

impl ListingStrategy {
    /// Probes once for the `tree` utility and picks the matching strategy.
    pub fn detect() -> Self {
        if tree_available() {
            ListingStrategy::TreeCommand
        } else {
            debug!("tree utility unavailable, using walk fallback");
            ListingStrategy::Walk
        }
    }

    /// Renders the fenced snapshot block for `path`, including files, limited
    /// to `depth` levels. A folder missing on disk yields a placeholder block
    /// instead of an error so one bad mapping cannot fail the whole run.
    pub fn snapshot(self, path: &Path, depth: usize) -> Result<String> {
        if !path.exists() {
            return Ok(format!("```text\n(MISSING PATH: {})\n```", path.display()));
        }

        let listing = match self {
            ListingStrategy::TreeCommand => tree_listing(path, depth)?,
            ListingStrategy::Walk => walk_listing(path, depth),
        };
        Ok(format!("```text\n{}\n```", listing.trim_end()))
    }
}

fn tree_available() -> bool {
    Command::new("tree")
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok_and(|status| status.success())
}

fn tree_listing(path: &Path, depth: usize) -> Result<String> {
    let output = Command::new("tree")
        .arg("-L")
        .arg(depth.to_string())
        .arg(path)
        .output()?;
    if !output.status.success() {
        return Err(ToolError::Listing(format!(
            "tree -L {depth} {} exited with {}",
            path.display(),
            output.status
        )));
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

fn walk_listing(path: &Path, depth: usize) -> String {
    let mut lines: Vec<String> = WalkDir::new(path)
        .max_depth(depth)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path().display().to_string())
        .collect();
    lines.sort();
    lines.join("\n")
}
