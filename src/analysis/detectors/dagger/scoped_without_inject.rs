//! Scoped Class Without @Inject Constructor Detector
//!
//! A scope annotation on a class only has an effect when Dagger creates the
//! class itself, i.e. through an `@Inject` constructor.
//!
//! ## Anti-Pattern
//!
//! ```kotlin
//! @Singleton
//! class Analytics(private val tracker: Tracker)   // no @Inject
//! ```
//!
//! ## Why It's Bad
//!
//! - If the class is provided from a module, the scope on the class is
//!   ignored and every request may get a new instance
//! - Readers assume a singleton that does not exist

use crate::analysis::detectors::Detector;
use crate::analysis::annotations::Concept;
use crate::analysis::query::{
    has_annotation, has_inject_constructor, is_abstract_or_interface, scope_annotations,
};
use crate::analysis::{Finding, Issue, NodeKind, Sink};
use crate::graph::{Declaration, DeclarationKind, Graph};

pub struct ScopedWithoutInjectDetector;

impl ScopedWithoutInjectDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ScopedWithoutInjectDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for ScopedWithoutInjectDetector {
    fn issues(&self) -> &'static [Issue] {
        &[Issue::ScopedWithoutInjectConstructor]
    }

    fn node_kinds(&self) -> &'static [NodeKind] {
        &[NodeKind::Type]
    }

    fn visit(&self, graph: &Graph, decl: &Declaration, sink: &mut dyn Sink) {
        if decl.kind != DeclarationKind::Class || is_abstract_or_interface(decl) {
            return;
        }
        // Scopes on components and modules mean something else
        if has_annotation(decl, Concept::Component) || has_annotation(decl, Concept::Module) {
            return;
        }
        let scopes = scope_annotations(graph, decl);
        let Some(scope) = scopes.first() else {
            return;
        };
        if has_inject_constructor(graph, decl) {
            return;
        }
        sink.report(
            Finding::new(Issue::ScopedWithoutInjectConstructor, decl).with_message(format!(
                "'{}' is annotated @{} but has no @Inject constructor",
                decl.name,
                scope.simple_name()
            )),
        );
    }
}
