//! Choosing and applying the fixes attached to findings

use colored::Colorize;
use console::style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Select};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::{debug, info, warn};

use super::editor::FileEditor;
use crate::analysis::{Finding, Fix, LintFix, TextEdit};
use crate::error::{InjectLintError, Result};

/// Decides which fix, if any, to apply for a finding
pub trait FixChooser {
    /// Index into `options`, or `None` to leave the finding alone
    fn choose(&mut self, finding: &Finding, fix: &Fix) -> Result<Option<usize>>;
}

/// Applies deterministic fixes; alternatives need a human
pub struct AutoChooser;

impl FixChooser for AutoChooser {
    fn choose(&mut self, _finding: &Finding, fix: &Fix) -> Result<Option<usize>> {
        Ok(match fix {
            Fix::Single(_) => Some(0),
            Fix::Alternatives(_) => None,
        })
    }
}

/// Asks on the terminal for every fix
pub struct PromptChooser {
    theme: ColorfulTheme,
}

impl PromptChooser {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme {
                prompt_prefix: style("".to_string()),
                ..ColorfulTheme::default()
            },
        }
    }
}

impl Default for PromptChooser {
    fn default() -> Self {
        Self::new()
    }
}

fn map_dialoguer_err(e: dialoguer::Error) -> InjectLintError {
    InjectLintError::Fix {
        path: PathBuf::from("<terminal>"),
        message: e.to_string(),
    }
}

impl FixChooser for PromptChooser {
    fn choose(&mut self, finding: &Finding, fix: &Fix) -> Result<Option<usize>> {
        let header = format!(
            "{}:{} [{}] {}",
            finding.location.file.display(),
            finding.location.line,
            finding.id(),
            finding.message
        );
        match fix {
            Fix::Single(only) => {
                let apply = Confirm::with_theme(&self.theme)
                    .with_prompt(format!("{}\n  {}?", header, only.description))
                    .default(true)
                    .interact()
                    .map_err(map_dialoguer_err)?;
                Ok(apply.then_some(0))
            }
            Fix::Alternatives(options) => {
                let mut labels: Vec<String> =
                    options.iter().map(|o| o.description.clone()).collect();
                labels.push("Skip".to_string());
                let selection = Select::with_theme(&self.theme)
                    .with_prompt(header)
                    .items(&labels)
                    .default(0)
                    .interact()
                    .map_err(map_dialoguer_err)?;
                Ok((selection < options.len()).then_some(selection))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixSummary {
    pub fixes_applied: usize,
    pub files_changed: usize,
    /// Findings whose fix was declined or needed a choice
    pub fixes_skipped: usize,
    /// Individual edits dropped for overlapping
    pub edits_skipped: usize,
}

pub struct FixApplier {
    interactive: bool,
    dry_run: bool,
}

impl FixApplier {
    pub fn new(interactive: bool, dry_run: bool) -> Self {
        Self {
            interactive,
            dry_run,
        }
    }

    pub fn apply(&self, findings: &[Finding]) -> Result<FixSummary> {
        if self.interactive {
            self.apply_with(findings, &mut PromptChooser::new())
        } else {
            self.apply_with(findings, &mut AutoChooser)
        }
    }

    pub fn apply_with(
        &self,
        findings: &[Finding],
        chooser: &mut dyn FixChooser,
    ) -> Result<FixSummary> {
        let mut summary = FixSummary::default();
        let mut chosen: Vec<&LintFix> = Vec::new();

        for finding in findings {
            let Some(fix) = &finding.fix else {
                continue;
            };
            match chooser.choose(finding, fix)? {
                Some(index) => match fix.options().get(index) {
                    Some(option) => chosen.push(option),
                    None => summary.fixes_skipped += 1,
                },
                None => {
                    if matches!(fix, Fix::Alternatives(_)) && !self.interactive {
                        debug!(
                            "{} has {} alternative fixes; run with --interactive to pick one",
                            finding.declaration,
                            fix.options().len()
                        );
                    }
                    summary.fixes_skipped += 1;
                }
            }
        }
        summary.fixes_applied = chosen.len();

        let mut by_file: BTreeMap<PathBuf, Vec<TextEdit>> = BTreeMap::new();
        for fix in &chosen {
            for edit in &fix.edits {
                by_file.entry(edit.file.clone()).or_default().push(edit.clone());
            }
        }

        for (path, edits) in &by_file {
            let editor = FileEditor::load(path)?;
            let outcome = editor.apply(edits);
            summary.edits_skipped += outcome.skipped.len();
            if !outcome.changed() {
                continue;
            }
            summary.files_changed += 1;

            if self.dry_run {
                print_preview(&editor, &outcome.applied);
            } else {
                std::fs::write(path, &outcome.content)
                    .map_err(|e| InjectLintError::io(path, e))?;
                info!("Fixed {} ({} edits)", path.display(), outcome.applied.len());
            }
        }

        if summary.edits_skipped > 0 {
            warn!("{} overlapping edits were not applied", summary.edits_skipped);
        }
        Ok(summary)
    }
}

fn print_preview(editor: &FileEditor, edits: &[TextEdit]) {
    println!("{}", editor.path().display().to_string().bold());
    for edit in edits {
        let line = editor.line_of(edit.start);
        let removed = &editor.content()[edit.start..edit.end];
        if !removed.is_empty() {
            println!("  {:>4} {}", line, format!("- {}", removed.trim_end()).red());
        }
        if !edit.replacement.is_empty() {
            println!(
                "  {:>4} {}",
                line,
                format!("+ {}", edit.replacement.trim()).green()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Issue;
    use crate::graph::testing::DeclBuilder;
    use std::fs;
    use tempfile::TempDir;

    fn finding_with(fix: Fix) -> Finding {
        let decl = DeclBuilder::class("com.example.A").build();
        Finding::new(Issue::ComponentMustBeAbstract, &decl).with_fix(Some(fix))
    }

    fn replace(path: &PathBuf, start: usize, end: usize, text: &str) -> LintFix {
        LintFix::new(
            format!("Replace with {}", text),
            vec![TextEdit::replace(path.clone(), start, end, text.to_string())],
        )
    }

    struct Scripted(Vec<Option<usize>>);

    impl FixChooser for Scripted {
        fn choose(&mut self, _finding: &Finding, _fix: &Fix) -> Result<Option<usize>> {
            Ok(self.0.remove(0))
        }
    }

    #[test]
    fn test_single_fix_applied() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("A.java");
        fs::write(&path, "class A {}\n").unwrap();

        let findings = vec![finding_with(Fix::Single(replace(&path, 0, 5, "interface")))];
        let summary = FixApplier::new(false, false).apply(&findings).unwrap();
        assert_eq!(summary.fixes_applied, 1);
        assert_eq!(summary.files_changed, 1);
        assert_eq!(fs::read_to_string(&path).unwrap(), "interface A {}\n");
    }

    #[test]
    fn test_alternatives_need_a_choice() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("A.kt");
        fs::write(&path, "class A\n").unwrap();
        let alternatives = Fix::Alternatives(vec![
            replace(&path, 0, 5, "object"),
            replace(&path, 0, 5, "interface"),
        ]);

        let findings = vec![finding_with(alternatives)];
        let summary = FixApplier::new(false, false).apply(&findings).unwrap();
        assert_eq!(summary.fixes_applied, 0);
        assert_eq!(summary.fixes_skipped, 1);
        assert_eq!(fs::read_to_string(&path).unwrap(), "class A\n");

        let summary = FixApplier::new(true, false)
            .apply_with(&findings, &mut Scripted(vec![Some(1)]))
            .unwrap();
        assert_eq!(summary.fixes_applied, 1);
        assert_eq!(fs::read_to_string(&path).unwrap(), "interface A\n");
    }

    #[test]
    fn test_dry_run_leaves_files() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("A.java");
        fs::write(&path, "class A {}\n").unwrap();

        let findings = vec![finding_with(Fix::Single(replace(&path, 0, 5, "interface")))];
        let summary = FixApplier::new(false, true).apply(&findings).unwrap();
        assert_eq!(summary.files_changed, 1);
        assert_eq!(fs::read_to_string(&path).unwrap(), "class A {}\n");
    }

    #[test]
    fn test_overlapping_fixes_counted() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("A.java");
        fs::write(&path, "class A {}\n").unwrap();

        let findings = vec![
            finding_with(Fix::Single(replace(&path, 0, 5, "interface"))),
            finding_with(Fix::Single(replace(&path, 0, 7, "enum B"))),
        ];
        let summary = FixApplier::new(false, false).apply(&findings).unwrap();
        assert_eq!(summary.edits_skipped, 1);
        assert_eq!(fs::read_to_string(&path).unwrap(), "interface A {}\n");
    }
}
