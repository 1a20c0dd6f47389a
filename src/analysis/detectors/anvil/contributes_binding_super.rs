//! @ContributesBinding Without Supertype Detector
//!
//! `@ContributesBinding` / `@ContributesMultibinding` bind a class to one of
//! its supertypes. A class with no supertype besides `Any` has nothing to be
//! bound to, unless `boundType` names the root explicitly. A module
//! annotated this way most likely meant `@ContributesTo`.
//!
//! ## Anti-Pattern
//!
//! ```kotlin
//! @ContributesBinding(AppScope::class)
//! class Analytics @Inject constructor()
//!
//! @Module
//! @ContributesBinding(AppScope::class)    // should be @ContributesTo
//! object NetworkModule
//! ```

use crate::analysis::detectors::Detector;
use crate::analysis::annotations::{added, Concept};
use crate::analysis::fixes::replace_annotation;
use crate::analysis::query::{annotations_of, has_annotation, has_usable_supertype, is_root_class_literal};
use crate::analysis::{Finding, Fix, Issue, NodeKind, Sink};
use crate::graph::{Declaration, Graph, Language};

pub struct ContributesBindingSuperDetector;

impl ContributesBindingSuperDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ContributesBindingSuperDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for ContributesBindingSuperDetector {
    fn issues(&self) -> &'static [Issue] {
        &[Issue::ContributesBindingMustHaveSuper]
    }

    fn node_kinds(&self) -> &'static [NodeKind] {
        &[NodeKind::Type]
    }

    fn visit(&self, graph: &Graph, decl: &Declaration, sink: &mut dyn Sink) {
        // Java uses are reported as AnvilJavaUsage
        if decl.language != Language::Kotlin || has_usable_supertype(decl) {
            return;
        }
        let is_module = has_annotation(decl, Concept::Module);
        for annotation in annotations_of(&decl.annotations, Concept::AnvilBinding) {
            if annotation.argument("boundType").is_some_and(is_root_class_literal) {
                continue;
            }
            let finding = if is_module {
                let scope = annotation
                    .argument("scope")
                    .or_else(|| annotation.argument("value"));
                let fix = replace_annotation(graph, decl, annotation, added::CONTRIBUTES_TO, scope);
                Finding::new(Issue::ContributesBindingMustHaveSuper, decl)
                    .with_message(format!(
                        "Module '{}' is annotated @{}; use @ContributesTo to contribute a module",
                        decl.name,
                        annotation.simple_name()
                    ))
                    .with_fix(Some(Fix::Single(fix)))
            } else {
                Finding::new(Issue::ContributesBindingMustHaveSuper, decl).with_message(format!(
                    "'{}' is annotated @{} but has no supertype to bind to",
                    decl.name,
                    annotation.simple_name()
                ))
            };
            sink.report(finding.at(annotation.location.clone()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::testing::DeclBuilder;

    const BINDING: &str = "com.squareup.anvil.annotations.ContributesBinding";

    fn run(decl: Declaration) -> Vec<Finding> {
        let mut graph = Graph::new();
        graph.add_declaration(decl);
        ContributesBindingSuperDetector::new().detect(&graph)
    }

    #[test]
    fn test_no_supertype() {
        let findings = run(DeclBuilder::class("com.example.Analytics")
            .annotated_with(BINDING, &[(None, "AppScope::class")])
            .extends("kotlin.Any")
            .build());
        assert_eq!(findings.len(), 1);
        assert!(findings[0].fix.is_none());
    }

    #[test]
    fn test_with_supertype_is_fine() {
        let findings = run(DeclBuilder::class("com.example.RealRepo")
            .annotated_with(BINDING, &[(None, "AppScope::class")])
            .implements("com.example.Repo")
            .build());
        assert!(findings.is_empty());
    }

    #[test]
    fn test_explicit_root_bound_type() {
        let findings = run(DeclBuilder::class("com.example.Analytics")
            .annotated_with(
                BINDING,
                &[(None, "AppScope::class"), (Some("boundType"), "Any::class")],
            )
            .build());
        assert!(findings.is_empty());
    }

    #[test]
    fn test_module_suggests_contributes_to() {
        let findings = run(DeclBuilder::object("com.example.NetworkModule")
            .annotated("dagger.Module")
            .annotated_with(BINDING, &[(None, "AppScope::class")])
            .build());
        assert_eq!(findings.len(), 1);
        let fix = findings[0].fix.as_ref().unwrap();
        assert_eq!(
            fix.options()[0].edits[0].replacement,
            "@ContributesTo(AppScope::class)"
        );
    }

    #[test]
    fn test_java_left_to_java_usage_rule() {
        let findings = run(DeclBuilder::class("com.example.Analytics")
            .java()
            .annotated_with(BINDING, &[(None, "AppScope.class")])
            .build());
        assert!(findings.is_empty());
    }
}
