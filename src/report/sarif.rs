//! SARIF 2.1.0 reporter for code scanning and IDE integration

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::{display_path, write_output};
use crate::analysis::{Finding, Issue, LintFix, Severity};
use crate::error::{InjectLintError, Result};

const SARIF_SCHEMA: &str = "https://json.schemastore.org/sarif-2.1.0.json";
const SARIF_VERSION: &str = "2.1.0";

#[derive(Serialize)]
struct SarifLog {
    #[serde(rename = "$schema")]
    schema: &'static str,
    version: &'static str,
    runs: Vec<Run>,
}

#[derive(Serialize)]
struct Run {
    tool: Tool,
    results: Vec<SarifResult>,
}

#[derive(Serialize)]
struct Tool {
    driver: Driver,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Driver {
    name: &'static str,
    version: &'static str,
    rules: Vec<Rule>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Rule {
    id: &'static str,
    short_description: Message,
    full_description: Message,
    default_configuration: RuleConfiguration,
    properties: RuleProperties,
}

#[derive(Serialize)]
struct RuleConfiguration {
    level: &'static str,
    enabled: bool,
}

#[derive(Serialize)]
struct RuleProperties {
    category: &'static str,
    family: &'static str,
    priority: u8,
}

#[derive(Serialize)]
struct Message {
    text: String,
}

impl Message {
    fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifResult {
    rule_id: &'static str,
    rule_index: usize,
    level: &'static str,
    message: Message,
    locations: Vec<SarifLocation>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    fixes: Vec<SarifFix>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifLocation {
    physical_location: PhysicalLocation,
    logical_locations: Vec<LogicalLocation>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PhysicalLocation {
    artifact_location: ArtifactLocation,
    region: Region,
}

#[derive(Serialize)]
struct ArtifactLocation {
    uri: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Region {
    #[serde(skip_serializing_if = "Option::is_none")]
    start_line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    start_column: Option<usize>,
    byte_offset: usize,
    byte_length: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LogicalLocation {
    fully_qualified_name: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifFix {
    description: Message,
    artifact_changes: Vec<ArtifactChange>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ArtifactChange {
    artifact_location: ArtifactLocation,
    replacements: Vec<Replacement>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Replacement {
    deleted_region: Region,
    inserted_content: Message,
}

fn level(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
    }
}

pub struct SarifReporter {
    output_path: Option<PathBuf>,
    base_path: Option<PathBuf>,
}

impl SarifReporter {
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

    fn uri(&self, path: &Path) -> String {
        display_path(path, self.base_path.as_deref()).replace('\\', "/")
    }

    fn fix(&self, fix: &LintFix) -> SarifFix {
        let mut by_file: BTreeMap<&Path, Vec<Replacement>> = BTreeMap::new();
        for edit in &fix.edits {
            by_file.entry(edit.file.as_path()).or_default().push(Replacement {
                deleted_region: Region {
                    start_line: None,
                    start_column: None,
                    byte_offset: edit.start,
                    byte_length: edit.end - edit.start,
                },
                inserted_content: Message::new(edit.replacement.clone()),
            });
        }
        SarifFix {
            description: Message::new(fix.description.clone()),
            artifact_changes: by_file
                .into_iter()
                .map(|(file, replacements)| ArtifactChange {
                    artifact_location: ArtifactLocation { uri: self.uri(file) },
                    replacements,
                })
                .collect(),
        }
    }

    pub fn render(&self, findings: &[Finding]) -> Result<String> {
        let rules: Vec<Rule> = Issue::ALL
            .iter()
            .map(|issue| Rule {
                id: issue.id(),
                short_description: Message::new(issue.brief()),
                full_description: Message::new(issue.explanation()),
                default_configuration: RuleConfiguration {
                    level: level(issue.default_severity()),
                    enabled: issue.enabled_by_default(),
                },
                properties: RuleProperties {
                    category: issue.category().as_str(),
                    family: issue.family().as_str(),
                    priority: issue.priority(),
                },
            })
            .collect();

        let results = findings
            .iter()
            .map(|finding| SarifResult {
                rule_id: finding.id(),
                rule_index: Issue::ALL
                    .iter()
                    .position(|i| *i == finding.issue)
                    .unwrap_or_default(),
                level: level(finding.severity),
                message: Message::new(finding.message.clone()),
                locations: vec![SarifLocation {
                    physical_location: PhysicalLocation {
                        artifact_location: ArtifactLocation {
                            uri: self.uri(&finding.location.file),
                        },
                        region: Region {
                            start_line: Some(finding.location.line),
                            start_column: Some(finding.location.column),
                            byte_offset: finding.location.start_byte,
                            byte_length: finding
                                .location
                                .end_byte
                                .saturating_sub(finding.location.start_byte),
                        },
                    },
                    logical_locations: vec![LogicalLocation {
                        fully_qualified_name: finding.declaration.clone(),
                    }],
                }],
                fixes: finding
                    .fix
                    .iter()
                    .flat_map(|f| f.options())
                    .map(|f| self.fix(f))
                    .collect(),
            })
            .collect();

        let log = SarifLog {
            schema: SARIF_SCHEMA,
            version: SARIF_VERSION,
            runs: vec![Run {
                tool: Tool {
                    driver: Driver {
                        name: "injectlint",
                        version: env!("CARGO_PKG_VERSION"),
                        rules,
                    },
                },
                results,
            }],
        };
        serde_json::to_string_pretty(&log).map_err(|e| InjectLintError::Report {
            message: e.to_string(),
        })
    }

    pub fn report(&self, findings: &[Finding]) -> Result<()> {
        let sarif = self.render(findings)?;
        write_output(self.output_path.as_deref(), &sarif)
    }
}
