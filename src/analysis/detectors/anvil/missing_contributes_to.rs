//! Missing @ContributesTo Detector
//!
//! With Anvil, modules are merged into components by `@ContributesTo`. A
//! Kotlin `@Module` without it has to be listed on a component manually,
//! which is easy to forget. Off by default: mixed codebases legitimately
//! list modules by hand.
//!
//! ## Anti-Pattern
//!
//! ```kotlin
//! @Module
//! object NetworkModule { ... }
//! ```

use crate::analysis::detectors::Detector;
use crate::analysis::annotations::{added, Concept};
use crate::analysis::fixes::{add_annotation, class_literal};
use crate::analysis::query::has_annotation;
use crate::analysis::{Finding, Fix, Issue, NodeKind, Sink};
use crate::config::Config;
use crate::graph::{Declaration, Graph, Language};

pub struct MissingContributesToDetector {
    /// Default scope first, then the custom ones
    scopes: Vec<String>,
}

impl MissingContributesToDetector {
    pub fn new() -> Self {
        Self::from_config(&Config::default())
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            scopes: config.anvil_scopes(),
        }
    }
}

impl Default for MissingContributesToDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for MissingContributesToDetector {
    fn issues(&self) -> &'static [Issue] {
        &[Issue::MissingContributesTo]
    }

    fn node_kinds(&self) -> &'static [NodeKind] {
        &[NodeKind::Type]
    }

    fn visit(&self, graph: &Graph, decl: &Declaration, sink: &mut dyn Sink) {
        if decl.language != Language::Kotlin || !has_annotation(decl, Concept::Module) {
            return;
        }
        // Hilt modules are installed with @InstallIn or included by hand
        if has_annotation(decl, Concept::AnvilModule)
            || has_annotation(decl, Concept::HiltInstallIn)
            || has_annotation(decl, Concept::HiltDisableInstallInCheck)
        {
            return;
        }
        let options: Vec<_> = self
            .scopes
            .iter()
            .map(|scope| {
                let (literal, import) = class_literal(decl.language, scope);
                let imports: Vec<&str> = import.into_iter().collect();
                add_annotation(graph, decl, added::CONTRIBUTES_TO, Some(&literal), &imports)
            })
            .collect();
        sink.report(Finding::new(Issue::MissingContributesTo, decl).with_fix(Fix::from_options(options)));
    }
}
