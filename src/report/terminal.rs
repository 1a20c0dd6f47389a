//! Terminal reporter with colored output
//!
//! Based on Rust compiler diagnostic design (RFC 1644)

use colored::Colorize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::colors::{BoxChars, SeveritySymbol, StructureColors};
use super::display_path;
use crate::analysis::{Finding, Fix, Severity};

/// Terminal reporter, findings grouped by file
pub struct TerminalReporter {
    base_path: Option<PathBuf>,
    /// Print the description of each proposed fix
    show_fixes: bool,
}

impl TerminalReporter {
    pub fn new() -> Self {
        Self {
            base_path: None,
            show_fixes: true,
        }
    }

    pub fn with_base_path(mut self, path: PathBuf) -> Self {
        self.base_path = Some(path);
        self
    }

    pub fn with_fixes(mut self, show: bool) -> Self {
        self.show_fixes = show;
        self
    }

    pub fn report(&self, findings: &[Finding]) {
        if findings.is_empty() {
            println!("{}", "No dependency injection issues found!".green().bold());
            return;
        }

        let mut by_file: BTreeMap<&Path, Vec<&Finding>> = BTreeMap::new();
        for finding in findings {
            by_file
                .entry(finding.location.file.as_path())
                .or_default()
                .push(finding);
        }

        println!();
        println!(
            "Found {} issues:",
            StructureColors::count(&findings.len().to_string())
        );
        println!();

        for (file, items) in &by_file {
            println!(
                "{}",
                StructureColors::file_path(&display_path(file, self.base_path.as_deref()))
            );
            for item in items {
                self.print_item(item);
            }
            println!();
        }

        self.print_summary(findings, by_file.len());
    }

    fn print_item(&self, item: &Finding) {
        let location = format!("{:>5}:{:<3}", item.location.line, item.location.column);
        println!(
            "  {} {} {} [{}] {}",
            StructureColors::location(&location),
            SeveritySymbol::colored(&item.severity),
            SeveritySymbol::label(&item.severity),
            StructureColors::rule_code(item.id()),
            item.message
        );
        println!(
            "    {} {} {}",
            "→".dimmed(),
            StructureColors::family(item.issue.family()),
            StructureColors::symbol_name(&item.declaration)
        );

        if !self.show_fixes {
            return;
        }
        match &item.fix {
            Some(Fix::Single(fix)) => {
                println!("    {} {}", "fix:".green(), fix.description);
            }
            Some(Fix::Alternatives(fixes)) => {
                println!("    {}", "fixes (pick one with --interactive):".green());
                for (i, fix) in fixes.iter().enumerate() {
                    println!("      {}. {}", i + 1, fix.description);
                }
            }
            None => {}
        }
    }

    fn print_summary(&self, findings: &[Finding], files: usize) {
        let errors = findings
            .iter()
            .filter(|f| f.severity == Severity::Error)
            .count();
        let warnings = findings.len() - errors;
        let fixable = findings.iter().filter(|f| f.fix.is_some()).count();

        println!("{}", BoxChars::heavy_line(50).dimmed());
        println!(
            "  {} {}, {} {} in {} files",
            StructureColors::count(&errors.to_string()),
            "errors".red(),
            StructureColors::count(&warnings.to_string()),
            "warnings".yellow(),
            files
        );
        if fixable > 0 {
            println!(
                "  {} {}",
                StructureColors::count(&fixable.to_string()),
                "have a fix (run with --fix)".dimmed()
            );
        }
    }
}

impl Default for TerminalReporter {
    fn default() -> Self {
        Self::new()
    }
}
