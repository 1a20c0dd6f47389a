//! Missing @HiltAndroidApp Detector
//!
//! A Hilt application needs exactly one `Application` subclass annotated
//! `@HiltAndroidApp`; it triggers generation of the root component.
//!
//! ## Anti-Pattern
//!
//! ```kotlin
//! class App : Application()
//! ```

use crate::analysis::detectors::Detector;
use crate::analysis::annotations::{added, Concept, APPLICATION_BASE};
use crate::analysis::fixes::add_annotation;
use crate::analysis::query::{extends_transitively, has_annotation, is_abstract_or_interface};
use crate::analysis::{Finding, Fix, Issue, NodeKind, Sink};
use crate::graph::{Declaration, DeclarationKind, Graph};

pub struct HiltAndroidAppDetector;

impl HiltAndroidAppDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HiltAndroidAppDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for HiltAndroidAppDetector {
    fn issues(&self) -> &'static [Issue] {
        &[Issue::MissingHiltAndroidApp]
    }

    fn node_kinds(&self) -> &'static [NodeKind] {
        &[NodeKind::Type]
    }

    fn visit(&self, graph: &Graph, decl: &Declaration, sink: &mut dyn Sink) {
        if decl.kind != DeclarationKind::Class
            || is_abstract_or_interface(decl)
            || has_annotation(decl, Concept::HiltAndroidApp)
            || !extends_transitively(graph, decl, APPLICATION_BASE)
        {
            return;
        }
        let fix = add_annotation(graph, decl, added::HILT_ANDROID_APP, None, &[]);
        sink.report(
            Finding::new(Issue::MissingHiltAndroidApp, decl).with_fix(Some(Fix::Single(fix))),
        );
    }
}
