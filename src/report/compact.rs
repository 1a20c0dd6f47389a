//! Compact terminal reporter - minimal output format
//!
//! One line per finding, optimized for scanning large result sets and for
//! editors that jump to `path:line:column`

use colored::Colorize;
use std::path::{Path, PathBuf};

use super::colors::{BoxChars, SeveritySymbol, StructureColors};
use super::display_path;
use crate::analysis::{Finding, Severity};

/// Compact reporter for minimal, scannable output
pub struct CompactReporter {
    /// Base path to strip from file paths for shorter display
    base_path: Option<PathBuf>,
    /// Maximum width for file paths (truncate if longer)
    max_path_width: usize,
}

impl CompactReporter {
    pub fn new() -> Self {
        Self {
            base_path: None,
            max_path_width: 60,
        }
    }

    pub fn with_base_path(mut self, path: PathBuf) -> Self {
        self.base_path = Some(path);
        self
    }

    /// Format a path relative to base path if set
    fn format_path(&self, path: &Path) -> String {
        let display = display_path(path, self.base_path.as_deref());
        let chars = display.chars().count();
        if chars > self.max_path_width {
            let tail: String = display
                .chars()
                .skip(chars - (self.max_path_width - 3))
                .collect();
            format!("...{}", tail)
        } else {
            display
        }
    }

    pub fn format_line(&self, item: &Finding) -> String {
        format!(
            "{}:{}:{}: {} {} [{}] {}",
            self.format_path(&item.location.file),
            item.location.line,
            item.location.column,
            SeveritySymbol::colored(&item.severity),
            item.severity,
            StructureColors::rule_code(item.id()),
            item.message
        )
    }

    pub fn report(&self, findings: &[Finding]) {
        if findings.is_empty() {
            println!("{}", "No issues found!".green().bold());
            return;
        }

        for item in findings {
            println!("{}", self.format_line(item));
        }

        self.print_summary(findings);
    }

    fn print_summary(&self, findings: &[Finding]) {
        let errors = findings
            .iter()
            .filter(|f| f.severity == Severity::Error)
            .count();
        let warnings = findings.len() - errors;

        println!("{}", BoxChars::light_line(50).dimmed());

        let mut parts = Vec::new();
        if errors > 0 {
            parts.push(format!("{} {}", errors, "errors".red()));
        }
        if warnings > 0 {
            parts.push(format!("{} {}", warnings, "warnings".yellow()));
        }

        println!(
            "  {} {} ({})",
            StructureColors::count(&findings.len().to_string()),
            "issues".bold(),
            parts.join(", ")
        );
    }
}

impl Default for CompactReporter {
    fn default() -> Self {
        Self::new()
    }
}
