//! Multiple Scopes Detector
//!
//! A binding can live in at most one scope. Reports types and binding
//! methods carrying two or more scope annotations. An annotation is a scope
//! when its declaration is meta-annotated with `@Scope`, or when it is one
//! of the well-known library scopes.
//!
//! ## Anti-Pattern
//!
//! ```kotlin
//! @Singleton
//! @ActivityScope
//! class SessionCache @Inject constructor()
//! ```
//!
//! ## Why It's Bad
//!
//! - Dagger refuses to compile the binding, and it is rarely obvious which
//!   of the two scopes was intended

use crate::analysis::detectors::Detector;
use crate::analysis::annotations::Concept;
use crate::analysis::query::{has_annotation, scope_annotations};
use crate::analysis::{Finding, Issue, NodeKind, Sink};
use crate::graph::{Declaration, Graph};

pub struct MultipleScopesDetector;

impl MultipleScopesDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MultipleScopesDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for MultipleScopesDetector {
    fn issues(&self) -> &'static [Issue] {
        &[Issue::MultipleScopes]
    }

    fn node_kinds(&self) -> &'static [NodeKind] {
        &[NodeKind::Type, NodeKind::Method]
    }

    fn visit(&self, graph: &Graph, decl: &Declaration, sink: &mut dyn Sink) {
        if !decl.kind.is_type()
            && !has_annotation(decl, Concept::Provides)
            && !has_annotation(decl, Concept::Binds)
        {
            return;
        }
        let scopes = scope_annotations(graph, decl);
        if scopes.len() < 2 {
            return;
        }
        let names: Vec<String> = scopes.iter().map(|a| format!("@{}", a.simple_name())).collect();
        sink.report(
            Finding::new(Issue::MultipleScopes, decl).with_message(format!(
                "{} '{}' has more than one scope annotation: {}",
                decl.kind.display_name(),
                decl.name,
                names.join(", ")
            )),
        );
    }
}
