//! Sequential maintenance run: normalise names, then repair links.
//!
//! The tree is re-scanned after renaming because the snapshot captured
//! before the rename pass no longer matches the filesystem.

use crate::error::MaintError;
use crate::links;
use crate::models::fix::{FixNamingReport, LinkFixReport};
use crate::naming::{self, NamingRule};
use crate::scan::FileSetSnapshot;
use serde::Serialize;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MaintainReport {
    pub naming: FixNamingReport,
    pub links: LinkFixReport,
}

impl MaintainReport {
    /// Passes that finished without per-item failures.
    pub fn passed(&self) -> usize {
        usize::from(self.naming.is_clean()) + usize::from(self.links.is_clean())
    }

    pub fn failed(&self) -> usize {
        2 - self.passed()
    }

    pub fn exit_code(&self) -> i32 {
        if self.failed() == 0 {
            0
        } else {
            1
        }
    }
}

pub fn run_maintenance(root: &Path, rule: &NamingRule) -> Result<MaintainReport, MaintError> {
    info!(root = %root.display(), "running naming pass");
    let naming = naming::fix_naming(root, rule)?;
    info!(renames = naming.renames.len(), "running link pass");
    let snapshot = FileSetSnapshot::scan(root)?;
    let links = links::fix_links(&snapshot, false);
    Ok(MaintainReport { naming, links })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_maintenance_renames_then_repairs_links() {
        let tmp = tempdir().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("1-guide")).unwrap();
        fs::write(root.join("1-guide/2-setup.md"), "setup").unwrap();
        // Link written against the normalised name but wrong directory.
        fs::write(root.join("01-Index.md"), "[setup](02-Setup.md)").unwrap();

        let report = run_maintenance(root, &NamingRule::default()).unwrap();
        assert_eq!(report.naming.renames.len(), 2);
        assert_eq!(report.links.fixes.len(), 1);
        assert_eq!(report.links.fixes[0].to, "01-Guide/02-Setup.md");
        assert_eq!(report.exit_code(), 0);
        assert_eq!(report.passed(), 2);
        let text = fs::read_to_string(root.join("01-Index.md")).unwrap();
        assert_eq!(text, "[setup](01-Guide/02-Setup.md)");
    }

    #[test]
    fn test_unresolved_link_fails_the_run() {
        let tmp = tempdir().unwrap();
        fs::write(tmp.path().join("01-Index.md"), "[x](nowhere.md)").unwrap();
        let report = run_maintenance(tmp.path(), &NamingRule::default()).unwrap();
        assert_eq!(report.failed(), 1);
        assert_eq!(report.exit_code(), 1);
    }
}
