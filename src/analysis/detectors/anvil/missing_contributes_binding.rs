//! Missing @ContributesBinding Detector
//!
//! In an Anvil project, a class with an `@Inject` constructor that implements
//! an interface or extends a base class usually wants to be bound to that
//! supertype. Without
//! `@ContributesBinding` someone has to write a `@Binds` method by hand.
//!
//! ## Anti-Pattern
//!
//! ```kotlin
//! class RealRepo @Inject constructor(api: Api) : Repo
//! ```
//!
//! ## Better Approach
//!
//! ```kotlin
//! @ContributesBinding(AppScope::class)
//! class RealRepo @Inject constructor(api: Api) : Repo
//! ```

use crate::analysis::detectors::Detector;
use crate::analysis::annotations::{added, Concept};
use crate::analysis::fixes::{add_annotation, class_literal};
use crate::analysis::query::{
    bindable_supertypes, has_annotation, has_inject_constructor, is_abstract_or_interface,
};
use crate::analysis::{Finding, Fix, Issue, NodeKind, Sink};
use crate::config::Config;
use crate::graph::{Declaration, DeclarationKind, Graph, Language};

pub struct MissingContributesBindingDetector {
    scope: String,
}

impl MissingContributesBindingDetector {
    pub fn new() -> Self {
        Self::from_config(&Config::default())
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            scope: config.anvil.default_scope.clone(),
        }
    }
}

impl Default for MissingContributesBindingDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for MissingContributesBindingDetector {
    fn issues(&self) -> &'static [Issue] {
        &[Issue::MissingContributesBinding]
    }

    fn node_kinds(&self) -> &'static [NodeKind] {
        &[NodeKind::Type]
    }

    fn visit(&self, graph: &Graph, decl: &Declaration, sink: &mut dyn Sink) {
        if decl.language != Language::Kotlin
            || decl.kind != DeclarationKind::Class
            || is_abstract_or_interface(decl)
        {
            return;
        }
        if has_annotation(decl, Concept::AnvilBinding)
            || has_annotation(decl, Concept::Module)
            || has_annotation(decl, Concept::Component)
            || !has_inject_constructor(graph, decl)
        {
            return;
        }
        let Some(first) = bindable_supertypes(decl).next() else {
            return;
        };

        let (scope, scope_import) = class_literal(decl.language, &self.scope);
        let imports: Vec<&str> = scope_import.into_iter().collect();
        let options = vec![
            add_annotation(graph, decl, added::CONTRIBUTES_BINDING, Some(&scope), &imports),
            add_annotation(graph, decl, added::CONTRIBUTES_MULTIBINDING, Some(&scope), &imports),
        ];
        sink.report(
            Finding::new(Issue::MissingContributesBinding, decl)
                .with_message(format!(
                    "'{}' has supertype {} but is not annotated with @ContributesBinding",
                    decl.name, first.text
                ))
                .with_fix(Fix::from_options(options)),
        );
    }
}
