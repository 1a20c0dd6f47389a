//! JSON reporter

use serde::Serialize;
use std::path::PathBuf;

use super::{display_path, write_output};
use crate::analysis::{Category, Family, Finding, Fix, LintFix, Severity};
use crate::error::{InjectLintError, Result};

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    tool: &'static str,
    version: &'static str,
    summary: JsonSummary,
    findings: Vec<JsonFinding<'a>>,
}

#[derive(Debug, Serialize)]
struct JsonSummary {
    total: usize,
    errors: usize,
    warnings: usize,
    fixable: usize,
}

#[derive(Debug, Serialize)]
struct JsonFinding<'a> {
    id: &'static str,
    family: Family,
    category: Category,
    severity: Severity,
    message: &'a str,
    file: String,
    line: usize,
    column: usize,
    declaration: &'a str,
    language: &'static str,
    /// Empty when no fix exists; more than one entry means alternatives
    fixes: Vec<&'a LintFix>,
}

impl<'a> JsonFinding<'a> {
    fn new(finding: &'a Finding, base: Option<&std::path::Path>) -> Self {
        Self {
            id: finding.id(),
            family: finding.issue.family(),
            category: finding.issue.category(),
            severity: finding.severity,
            message: &finding.message,
            file: display_path(&finding.location.file, base),
            line: finding.location.line,
            column: finding.location.column,
            declaration: &finding.declaration,
            language: finding.language.as_str(),
            fixes: finding.fix.as_ref().map(Fix::options).unwrap_or_default().iter().collect(),
        }
    }
}

pub struct JsonReporter {
    output_path: Option<PathBuf>,
    base_path: Option<PathBuf>,
}

impl JsonReporter {
    pub fn new(output_path: Option<PathBuf>) -> Self {
        Self {
            output_path,
            base_path: None,
        }
    }

    pub fn with_base_path(mut self, path: PathBuf) -> Self {
        self.base_path = Some(path);
        self
    }

    pub fn render(&self, findings: &[Finding]) -> Result<String> {
        let errors = findings
            .iter()
            .filter(|f| f.severity == Severity::Error)
            .count();
        let report = JsonReport {
            tool: "injectlint",
            version: env!("CARGO_PKG_VERSION"),
            summary: JsonSummary {
                total: findings.len(),
                errors,
                warnings: findings.len() - errors,
                fixable: findings.iter().filter(|f| f.fix.is_some()).count(),
            },
            findings: findings
                .iter()
                .map(|f| JsonFinding::new(f, self.base_path.as_deref()))
                .collect(),
        };
        serde_json::to_string_pretty(&report).map_err(|e| InjectLintError::Report {
            message: e.to_string(),
        })
    }

    pub fn report(&self, findings: &[Finding]) -> Result<()> {
        let json = self.render(findings)?;
        write_output(self.output_path.as_deref(), &json)
    }
}
