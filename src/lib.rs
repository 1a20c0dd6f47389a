//! injectlint - Lint rules for Dagger, Anvil and Hilt (Kotlin/Java)
//!
//! This library flags misuse of dependency-injection annotations in
//! Android projects: constructs the annotation processors reject at build
//! time, and patterns that compile but work against the framework.
//!
//! # Architecture
//!
//! The pipeline consists of:
//! 1. **File Discovery** - Find all .kt and .java files
//! 2. **Parsing** - Parse source files using tree-sitter
//! 3. **Graph Building** - Resolve names into a declaration graph
//! 4. **Linting** - One pass of every enabled detector over the graph
//! 5. **Baseline** - Drop findings recorded in a baseline file
//! 6. **Reporting** - Output results in various formats
//! 7. **Fixing** - Optionally rewrite sources with the proposed fixes

pub mod analysis;
pub mod baseline;
pub mod config;
pub mod discovery;
pub mod error;
pub mod graph;
pub mod parser;
pub mod refactor;
pub mod report;

pub use analysis::{lint, Finding, Fix, Issue, LintFix, LintRunner, Severity};
pub use baseline::Baseline;
pub use config::Config;
pub use discovery::FileFinder;
pub use error::{InjectLintError, Result};
pub use graph::{Declaration, DeclarationKind, Graph, GraphBuilder, ParallelGraphBuilder};
pub use refactor::FixApplier;
pub use report::{ReportFormat, Reporter};
