use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the library. Rule evaluation itself never fails;
/// these cover I/O, parsing setup, configuration and output.
#[derive(Debug, Error, Diagnostic)]
pub enum InjectLintError {
    #[error("failed to read {path}")]
    #[diagnostic(code(injectlint::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to load the {language} grammar")]
    #[diagnostic(
        code(injectlint::grammar),
        help("the tree-sitter grammar version does not match the tree-sitter runtime")
    )]
    Grammar {
        language: &'static str,
        #[source]
        source: tree_sitter::LanguageError,
    },

    #[error("tree-sitter could not parse {path}")]
    #[diagnostic(code(injectlint::parse))]
    Parse { path: PathBuf },

    #[error("invalid configuration in {path}: {message}")]
    #[diagnostic(
        code(injectlint::config),
        help("see injectlint.toml in the README for the supported keys")
    )]
    Config { path: PathBuf, message: String },

    #[error("invalid baseline {path}: {message}")]
    #[diagnostic(
        code(injectlint::baseline),
        help("regenerate it with --generate-baseline")
    )]
    Baseline { path: PathBuf, message: String },

    #[error("failed to apply fixes to {path}: {message}")]
    #[diagnostic(code(injectlint::fix))]
    Fix { path: PathBuf, message: String },

    #[error("failed to write report: {message}")]
    #[diagnostic(code(injectlint::report))]
    Report { message: String },
}

impl InjectLintError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, InjectLintError>;
