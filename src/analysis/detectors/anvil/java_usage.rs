//! Anvil In Java Detector
//!
//! Anvil is a Kotlin compiler plugin. Its annotations on Java sources are
//! never processed, so the contribution or merge silently does not happen.
//!
//! ## Anti-Pattern
//!
//! ```java
//! @ContributesBinding(AppScope.class)
//! public class RealRepo implements Repo { ... }
//! ```

use crate::analysis::detectors::Detector;
use crate::analysis::annotations::Concept;
use crate::analysis::query::annotations_of;
use crate::analysis::{Finding, Issue, NodeKind, Sink};
use crate::graph::{Declaration, Graph, Language};

pub struct AnvilJavaUsageDetector;

impl AnvilJavaUsageDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AnvilJavaUsageDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for AnvilJavaUsageDetector {
    fn issues(&self) -> &'static [Issue] {
        &[Issue::AnvilJavaUsage]
    }

    fn node_kinds(&self) -> &'static [NodeKind] {
        &NodeKind::ALL
    }

    fn visit(&self, _graph: &Graph, decl: &Declaration, sink: &mut dyn Sink) {
        if decl.language != Language::Java {
            return;
        }
        let on_parameters = decl
            .parameters
            .iter()
            .flat_map(|p| annotations_of(&p.annotations, Concept::Anvil));
        for annotation in annotations_of(&decl.annotations, Concept::Anvil).chain(on_parameters) {
            sink.report(
                Finding::new(Issue::AnvilJavaUsage, decl)
                    .with_message(format!(
                        "@{} is an Anvil annotation and is ignored in Java sources",
                        annotation.simple_name()
                    ))
                    .at(annotation.location.clone()),
            );
        }
    }
}
