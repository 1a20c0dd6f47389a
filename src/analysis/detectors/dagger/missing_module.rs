//! Missing @Module Detector
//!
//! Finds types that declare binding methods (`@Provides`, `@Binds`,
//! `@Multibinds`, `@BindsOptionalOf`) without being annotated `@Module`.
//! Methods in a Kotlin companion object count towards the enclosing type.
//!
//! ## Anti-Pattern
//!
//! ```kotlin
//! class NetworkModule {          // @Module forgotten
//!     @Provides
//!     fun client(): OkHttpClient = OkHttpClient()
//! }
//! ```
//!
//! ## Why It's Bad
//!
//! - Dagger only reads binding methods from modules, so the bindings
//!   simply do not exist and the error shows up at the injection site

use crate::analysis::detectors::Detector;
use crate::analysis::annotations::{added, Concept, MODULE_METHODS};
use crate::analysis::fixes::add_annotation;
use crate::analysis::query::{companion_of, has_annotation, is_companion_singleton, members};
use crate::analysis::{Finding, Fix, Issue, NodeKind, Sink};
use crate::graph::{Declaration, DeclarationKind, Graph};

pub struct MissingModuleDetector;

impl MissingModuleDetector {
    pub fn new() -> Self {
        Self
    }

    fn binding_methods<'g>(graph: &'g Graph, decl: &Declaration) -> Vec<&'g Declaration> {
        let companion_members = companion_of(graph, decl)
            .into_iter()
            .flat_map(|companion| members(graph, companion));
        members(graph, decl)
            .chain(companion_members)
            .filter(|m| m.kind == DeclarationKind::Method)
            .filter(|m| MODULE_METHODS.iter().any(|c| has_annotation(m, *c)))
            .collect()
    }
}

impl Default for MissingModuleDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for MissingModuleDetector {
    fn issues(&self) -> &'static [Issue] {
        &[Issue::MissingModuleAnnotation]
    }

    fn node_kinds(&self) -> &'static [NodeKind] {
        &[NodeKind::Type]
    }

    fn visit(&self, graph: &Graph, decl: &Declaration, sink: &mut dyn Sink) {
        // Companion members are reported on the enclosing type
        if is_companion_singleton(decl) || !matches!(
            decl.kind,
            DeclarationKind::Class | DeclarationKind::Interface | DeclarationKind::Object
        ) {
            return;
        }
        if has_annotation(decl, Concept::Module) {
            return;
        }

        let methods = Self::binding_methods(graph, decl);
        let Some(first) = methods.first() else {
            return;
        };
        let message = format!(
            "{} '{}' declares binding methods ({}{}) but is not annotated with @Module",
            decl.kind.display_name(),
            decl.name,
            first.name,
            if methods.len() > 1 { ", ..." } else { "" }
        );
        let fix = add_annotation(graph, decl, added::MODULE, None, &[]);
        sink.report(
            Finding::new(Issue::MissingModuleAnnotation, decl)
                .with_message(message)
                .with_fix(Some(Fix::Single(fix))),
        );
    }
}
