mod catalogue;
mod colors;
mod compact;
mod json;
mod sarif;
mod terminal;

pub use catalogue::{catalogue_json, print_catalogue, print_catalogue_json};
pub use compact::CompactReporter;
pub use json::JsonReporter;
pub use sarif::SarifReporter;
pub use terminal::TerminalReporter;

use std::path::{Path, PathBuf};
use tracing::info;

use crate::analysis::Finding;
use crate::error::{InjectLintError, Result};

/// Output format for reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    /// Colored output grouped by file
    #[default]
    Terminal,
    /// One line per finding
    Compact,
    /// JSON machine-readable format
    Json,
    /// SARIF format for IDE integration
    Sarif,
}

impl ReportFormat {
    pub fn is_machine_readable(&self) -> bool {
        matches!(self, ReportFormat::Json | ReportFormat::Sarif)
    }
}

/// Options for report generation
#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    /// Output file path (for JSON/SARIF)
    pub output_path: Option<PathBuf>,
    /// Base path to strip from file paths for shorter display
    pub base_path: Option<PathBuf>,
    /// Print fix descriptions in terminal output
    pub show_fixes: bool,
}

impl ReportOptions {
    pub fn new() -> Self {
        Self {
            output_path: None,
            base_path: None,
            show_fixes: true,
        }
    }
}

/// Reporter for outputting lint findings
pub struct Reporter {
    format: ReportFormat,
    options: ReportOptions,
}

impl Reporter {
    pub fn new(format: ReportFormat, output_path: Option<PathBuf>) -> Self {
        Self {
            format,
            options: ReportOptions {
                output_path,
                ..ReportOptions::new()
            },
        }
    }

    pub fn with_options(format: ReportFormat, options: ReportOptions) -> Self {
        Self { format, options }
    }

    pub fn report(&self, findings: &[Finding]) -> Result<()> {
        match self.format {
            ReportFormat::Terminal => {
                let mut reporter = TerminalReporter::new().with_fixes(self.options.show_fixes);
                if let Some(base) = &self.options.base_path {
                    reporter = reporter.with_base_path(base.clone());
                }
                reporter.report(findings);
                Ok(())
            }
            ReportFormat::Compact => {
                let mut reporter = CompactReporter::new();
                if let Some(base) = &self.options.base_path {
                    reporter = reporter.with_base_path(base.clone());
                }
                reporter.report(findings);
                Ok(())
            }
            ReportFormat::Json => {
                let mut reporter = JsonReporter::new(self.options.output_path.clone());
                if let Some(base) = &self.options.base_path {
                    reporter = reporter.with_base_path(base.clone());
                }
                reporter.report(findings)
            }
            ReportFormat::Sarif => {
                let mut reporter = SarifReporter::new(self.options.output_path.clone());
                if let Some(base) = &self.options.base_path {
                    reporter = reporter.with_base_path(base.clone());
                }
                reporter.report(findings)
            }
        }
    }
}

/// `path` relative to `base` when it lies below it
pub(crate) fn display_path(path: &Path, base: Option<&Path>) -> String {
    let base = base.map(|b| if b.is_file() { b.parent().unwrap_or(b) } else { b });
    match base.and_then(|b| path.strip_prefix(b).ok()) {
        Some(relative) if !relative.as_os_str().is_empty() => relative.display().to_string(),
        _ => path.display().to_string(),
    }
}

/// Write to `output`, or stdout when none is given
pub(crate) fn write_output(output: Option<&Path>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, content).map_err(|e| InjectLintError::io(path, e))?;
            info!("Report written to {}", path.display());
            Ok(())
        }
        None => {
            println!("{}", content);
            Ok(())
        }
    }
}
