//! Baseline files
//!
//! A baseline records the findings of a known-good run so later runs only
//! report what is new. Entries are keyed by issue id, file path relative to
//! the project root, declaration and message; line numbers are left out so
//! unrelated edits above a finding do not resurrect it.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use crate::analysis::Finding;
use crate::error::{InjectLintError, Result};

const BASELINE_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BaselineEntry {
    pub id: String,
    /// Path relative to the project root, `/`-separated
    pub file: String,
    pub declaration: String,
    pub message: String,
}

impl BaselineEntry {
    fn from_finding(finding: &Finding, root: &Path) -> Self {
        Self {
            id: finding.id().to_string(),
            file: relative_path(&finding.location.file, root),
            declaration: finding.declaration.clone(),
            message: finding.message.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Baseline {
    #[serde(default = "default_version")]
    pub version: u32,
    pub entries: Vec<BaselineEntry>,
}

fn default_version() -> u32 {
    BASELINE_VERSION
}

/// How the current findings compare to a baseline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaselineStats {
    pub baselined_total: usize,
    pub baselined_found: usize,
    pub new_issues: usize,
    pub fixed: usize,
}

impl fmt::Display for BaselineStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} baselined, {} new, {} fixed since baseline",
            self.baselined_found, self.new_issues, self.fixed
        )
    }
}

impl Baseline {
    pub fn from_findings(findings: &[Finding], root: &Path) -> Self {
        let mut entries: Vec<BaselineEntry> = findings
            .iter()
            .map(|f| BaselineEntry::from_finding(f, root))
            .collect();
        entries.sort_by(|a, b| {
            a.file
                .cmp(&b.file)
                .then(a.id.cmp(&b.id))
                .then(a.declaration.cmp(&b.declaration))
                .then(a.message.cmp(&b.message))
        });
        entries.dedup();
        Self {
            version: BASELINE_VERSION,
            entries,
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| InjectLintError::io(path, e))?;
        serde_json::from_str(&content).map_err(|e| InjectLintError::Baseline {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|e| InjectLintError::Baseline {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        std::fs::write(path, json + "\n").map_err(|e| InjectLintError::io(path, e))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, finding: &Finding, root: &Path) -> bool {
        self.entries
            .contains(&BaselineEntry::from_finding(finding, root))
    }

    /// Findings not recorded in the baseline
    pub fn filter_new<'a>(&self, findings: &'a [Finding], root: &Path) -> Vec<&'a Finding> {
        let known: HashSet<&BaselineEntry> = self.entries.iter().collect();
        findings
            .iter()
            .filter(|f| !known.contains(&BaselineEntry::from_finding(f, root)))
            .collect()
    }

    pub fn stats(&self, findings: &[Finding], root: &Path) -> BaselineStats {
        let current: HashSet<BaselineEntry> = findings
            .iter()
            .map(|f| BaselineEntry::from_finding(f, root))
            .collect();
        let baselined_found = self
            .entries
            .iter()
            .filter(|e| current.contains(*e))
            .count();
        let new_issues = self.filter_new(findings, root).len();
        BaselineStats {
            baselined_total: self.entries.len(),
            baselined_found,
            new_issues,
            fixed: self.entries.len() - baselined_found,
        }
    }
}

fn relative_path(file: &Path, root: &Path) -> String {
    let root = if root.is_file() {
        root.parent().unwrap_or(root)
    } else {
        root
    };
    let Ok(relative) = file.strip_prefix(root) else {
        return file.to_string_lossy().to_string();
    };
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Issue;
    use crate::graph::testing::DeclBuilder;
    use tempfile::TempDir;

    fn finding(root: &Path, file: &str, issue: Issue, name: &str) -> Finding {
        let mut decl = DeclBuilder::class(&format!("com.example.{}", name)).build();
        decl.location.file = root.join(file);
        Finding::new(issue, &decl)
    }

    #[test]
    fn test_relative_paths() {
        let root = Path::new("/project");
        assert_eq!(
            relative_path(Path::new("/project/app/src/A.kt"), root),
            "app/src/A.kt"
        );
        assert_eq!(relative_path(Path::new("/elsewhere/B.kt"), root), "/elsewhere/B.kt");
    }

    #[test]
    fn test_save_load_and_filter() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        let old = finding(root, "app/A.kt", Issue::MultipleScopes, "A");
        let new = finding(root, "app/B.kt", Issue::MissingInstallIn, "B");

        let path = root.join("baseline.json");
        Baseline::from_findings(std::slice::from_ref(&old), root)
            .save(&path)
            .unwrap();
        let baseline = Baseline::load(&path).unwrap();
        assert_eq!(baseline.len(), 1);
        assert_eq!(baseline.entries[0].file, "app/A.kt");

        let findings = vec![old.clone(), new];
        let fresh = baseline.filter_new(&findings, root);
        assert_eq!(fresh.len(), 1);
        assert_eq!(fresh[0].declaration, "com.example.B");
        assert!(baseline.contains(&old, root));

        let stats = baseline.stats(&findings, root);
        assert_eq!(stats.baselined_found, 1);
        assert_eq!(stats.new_issues, 1);
        assert_eq!(stats.fixed, 0);
    }

    #[test]
    fn test_fixed_entries_counted() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        let gone = finding(root, "A.kt", Issue::MultipleScopes, "A");
        let baseline = Baseline::from_findings(&[gone], root);
        let stats = baseline.stats(&[], root);
        assert_eq!(stats.fixed, 1);
        assert_eq!(stats.baselined_total, 1);
    }

    #[test]
    fn test_missing_and_malformed_files() {
        let dir = TempDir::new().unwrap();
        let missing = Baseline::load(&dir.path().join("none.json"));
        assert!(matches!(missing, Err(InjectLintError::Io { .. })));

        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            Baseline::load(&path),
            Err(InjectLintError::Baseline { .. })
        ));
    }
}
