//! Missing @InstallIn Detector
//!
//! Hilt modules and entry points must say which component they belong to.
//! Without `@InstallIn` Hilt fails the build. Anvil modules using
//! `@ContributesTo` and modules opted out with `@DisableInstallInCheck` are
//! left alone.
//!
//! ## Anti-Pattern
//!
//! ```kotlin
//! @Module
//! object NetworkModule {
//!     @Provides fun client(): OkHttpClient = OkHttpClient()
//! }
//! ```

use crate::analysis::detectors::Detector;
use crate::analysis::annotations::{added, Concept};
use crate::analysis::fixes::add_annotation;
use crate::analysis::query::has_annotation;
use crate::analysis::{Finding, Fix, Issue, NodeKind, Sink};
use crate::graph::{Declaration, Graph};

pub struct InstallInDetector;

impl InstallInDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for InstallInDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for InstallInDetector {
    fn issues(&self) -> &'static [Issue] {
        &[Issue::MissingInstallIn]
    }

    fn node_kinds(&self) -> &'static [NodeKind] {
        &[NodeKind::Type]
    }

    fn visit(&self, graph: &Graph, decl: &Declaration, sink: &mut dyn Sink) {
        let is_module = has_annotation(decl, Concept::Module);
        if !is_module && !has_annotation(decl, Concept::HiltEntryPoint) {
            return;
        }
        if has_annotation(decl, Concept::HiltInstallIn)
            || has_annotation(decl, Concept::AnvilModule)
            || has_annotation(decl, Concept::HiltDisableInstallInCheck)
        {
            return;
        }
        let literal = decl.language.class_literal("SingletonComponent");
        let fix = add_annotation(
            graph,
            decl,
            added::INSTALL_IN,
            Some(&literal),
            &[added::SINGLETON_COMPONENT],
        );
        let what = if is_module { "Module" } else { "Entry point" };
        sink.report(
            Finding::new(Issue::MissingInstallIn, decl)
                .with_message(format!(
                    "{} '{}' is not annotated with @InstallIn",
                    what, decl.name
                ))
                .with_fix(Some(Fix::Single(fix))),
        );
    }
}
