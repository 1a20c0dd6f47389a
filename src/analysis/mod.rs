//! Detection engine: annotation registry, query helpers, detectors,
//! registries and the runner that drives them over a [`Graph`]

pub mod annotations;
pub mod detectors;
pub mod fixes;
mod issues;
pub mod query;
pub mod registry;
mod runner;
mod suppress;

pub use issues::{Category, Family, Issue, IssueDefinition, Severity};
pub use runner::LintRunner;
pub use suppress::is_suppressed;

use serde::Serialize;
use std::path::PathBuf;

use crate::config::Config;
use crate::graph::{Declaration, DeclarationKind, Graph, Language, Location};

/// Run every enabled detector of the configured families over `graph`
pub fn lint(graph: &Graph, config: &Config) -> Vec<Finding> {
    LintRunner::new(registry::detectors_for(config))
        .with_config(config)
        .run(graph)
}

/// Node kinds a detector can subscribe to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Classes, interfaces, objects, annotation classes and enums
    Type,
    Method,
    Constructor,
    /// Java fields and Kotlin properties
    Field,
}

impl NodeKind {
    pub const ALL: [NodeKind; 4] = [
        NodeKind::Type,
        NodeKind::Method,
        NodeKind::Constructor,
        NodeKind::Field,
    ];

    pub fn of(kind: DeclarationKind) -> NodeKind {
        match kind {
            DeclarationKind::Constructor => NodeKind::Constructor,
            DeclarationKind::Method => NodeKind::Method,
            DeclarationKind::Property | DeclarationKind::Field => NodeKind::Field,
            _ => NodeKind::Type,
        }
    }
}

/// A single text replacement in one file
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TextEdit {
    pub file: PathBuf,
    pub start: usize,
    pub end: usize,
    pub replacement: String,
}

impl TextEdit {
    pub fn insert(file: PathBuf, offset: usize, text: String) -> Self {
        Self {
            file,
            start: offset,
            end: offset,
            replacement: text,
        }
    }

    pub fn replace(file: PathBuf, start: usize, end: usize, text: String) -> Self {
        Self {
            file,
            start,
            end,
            replacement: text,
        }
    }

    pub fn is_insertion(&self) -> bool {
        self.start == self.end
    }
}

/// A named set of edits that together fix one finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LintFix {
    pub description: String,
    pub edits: Vec<TextEdit>,
}

impl LintFix {
    pub fn new(description: impl Into<String>, edits: Vec<TextEdit>) -> Self {
        Self {
            description: description.into(),
            edits,
        }
    }
}

/// Either one deterministic fix or mutually exclusive alternatives
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "fixes", rename_all = "snake_case")]
pub enum Fix {
    Single(LintFix),
    Alternatives(Vec<LintFix>),
}

impl Fix {
    /// Collapses a one-element list into a single fix
    pub fn from_options(mut options: Vec<LintFix>) -> Option<Fix> {
        match options.len() {
            0 => None,
            1 => options.pop().map(Fix::Single),
            _ => Some(Fix::Alternatives(options)),
        }
    }

    pub fn options(&self) -> &[LintFix] {
        match self {
            Fix::Single(fix) => std::slice::from_ref(fix),
            Fix::Alternatives(fixes) => fixes,
        }
    }
}

/// One reported problem
#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    pub issue: Issue,
    pub severity: Severity,
    pub message: String,
    pub location: Location,
    /// Qualified name of the declaration the finding is reported on
    pub declaration: String,
    pub language: Language,
    pub fix: Option<Fix>,
}

impl Finding {
    pub fn new(issue: Issue, decl: &Declaration) -> Self {
        Self {
            issue,
            severity: issue.default_severity(),
            message: issue.default_message(decl),
            location: decl.location.clone(),
            declaration: decl.fq_name.clone(),
            language: decl.language,
            fix: None,
        }
    }

    pub fn with_message(mut self, message: String) -> Self {
        self.message = message;
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn with_fix(mut self, fix: Option<Fix>) -> Self {
        self.fix = fix;
        self
    }

    /// Report at a narrower location, e.g. an annotation
    pub fn at(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    pub fn id(&self) -> &'static str {
        self.issue.id()
    }
}

/// Receives findings from detectors
pub trait Sink {
    fn report(&mut self, finding: Finding);
}

impl Sink for Vec<Finding> {
    fn report(&mut self, finding: Finding) {
        self.push(finding);
    }
}
