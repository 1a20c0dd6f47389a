//! @HiltViewModel Detector
//!
//! Hilt creates ViewModels annotated `@HiltViewModel` through their
//! `@Inject` constructor. The two only make sense together:
//!
//! - an injectable ViewModel without `@HiltViewModel` is never created by
//!   `hiltViewModel()` / `by viewModels()`
//! - `@HiltViewModel` without an `@Inject` or `@AssistedInject` constructor
//!   fails the build
//!
//! ## Anti-Pattern
//!
//! ```kotlin
//! class HomeViewModel @Inject constructor(repo: Repo) : ViewModel()
//!
//! @HiltViewModel
//! class SettingsViewModel(prefs: Prefs) : ViewModel()
//! ```

use crate::analysis::detectors::Detector;
use crate::analysis::annotations::{added, Concept, VIEW_MODEL_BASE};
use crate::analysis::fixes::{add_annotation, remove_annotation};
use crate::analysis::query::{
    extends_transitively, find_annotation, has_assisted_inject_constructor,
    has_inject_constructor, is_abstract_or_interface,
};
use crate::analysis::{Finding, Fix, Issue, NodeKind, Sink};
use crate::graph::{Declaration, DeclarationKind, Graph};

pub struct HiltViewModelDetector;

impl HiltViewModelDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HiltViewModelDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for HiltViewModelDetector {
    fn issues(&self) -> &'static [Issue] {
        &[Issue::MissingHiltViewModel, Issue::UnnecessaryHiltViewModel]
    }

    fn node_kinds(&self) -> &'static [NodeKind] {
        &[NodeKind::Type]
    }

    fn visit(&self, graph: &Graph, decl: &Declaration, sink: &mut dyn Sink) {
        if decl.kind != DeclarationKind::Class {
            return;
        }
        let inject = has_inject_constructor(graph, decl);
        match find_annotation(decl, Concept::HiltViewModel) {
            Some(annotation) if !inject && !has_assisted_inject_constructor(graph, decl) => {
                sink.report(
                    Finding::new(Issue::UnnecessaryHiltViewModel, decl)
                        .with_fix(Some(Fix::Single(remove_annotation(annotation)))),
                );
            }
            None if inject
                && !is_abstract_or_interface(decl)
                && extends_transitively(graph, decl, VIEW_MODEL_BASE) =>
            {
                let fix = add_annotation(graph, decl, added::HILT_VIEW_MODEL, None, &[]);
                sink.report(
                    Finding::new(Issue::MissingHiltViewModel, decl).with_fix(Some(Fix::Single(fix))),
                );
            }
            _ => {}
        }
    }
}
