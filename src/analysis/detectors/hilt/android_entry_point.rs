//! Missing @AndroidEntryPoint Detector
//!
//! Hilt only injects fields of Android classes annotated with
//! `@AndroidEntryPoint`. An activity, fragment, view, service or receiver
//! with `@Inject` fields but without the annotation is never injected.
//!
//! ## Anti-Pattern
//!
//! ```kotlin
//! class MainActivity : AppCompatActivity() {
//!     @Inject lateinit var analytics: Analytics   // stays uninitialized
//! }
//! ```

use crate::analysis::detectors::Detector;
use crate::analysis::annotations::{added, Concept};
use crate::analysis::fixes::add_annotation;
use crate::analysis::query::{extends_any, has_annotation, injected_fields, is_abstract_or_interface};
use crate::analysis::{Finding, Fix, Issue, NodeKind, Sink};
use crate::config::Config;
use crate::graph::{Declaration, DeclarationKind, Graph};

pub struct AndroidEntryPointDetector {
    entry_point_bases: Vec<String>,
}

impl AndroidEntryPointDetector {
    pub fn new() -> Self {
        Self::from_config(&Config::default())
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            entry_point_bases: config.hilt_entry_point_bases(),
        }
    }
}

impl Default for AndroidEntryPointDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for AndroidEntryPointDetector {
    fn issues(&self) -> &'static [Issue] {
        &[Issue::MissingAndroidEntryPoint]
    }

    fn node_kinds(&self) -> &'static [NodeKind] {
        &[NodeKind::Type]
    }

    fn visit(&self, graph: &Graph, decl: &Declaration, sink: &mut dyn Sink) {
        // Abstract bases are injected through their annotated subclasses
        if decl.kind != DeclarationKind::Class || is_abstract_or_interface(decl) {
            return;
        }
        if has_annotation(decl, Concept::HiltAndroidEntryPoint)
            || !extends_any(graph, decl, &self.entry_point_bases)
        {
            return;
        }
        let Some(field) = injected_fields(graph, decl).next() else {
            return;
        };
        let fix = add_annotation(graph, decl, added::ANDROID_ENTRY_POINT, None, &[]);
        sink.report(
            Finding::new(Issue::MissingAndroidEntryPoint, decl)
                .with_message(format!(
                    "'{}' injects '{}' but is not annotated with @AndroidEntryPoint",
                    decl.name, field.name
                ))
                .with_fix(Some(Fix::Single(fix))),
        );
    }
}
