//! Static @Provides Detector
//!
//! `@Provides` methods that compile to instance methods force Dagger to
//! instantiate the module. In Java the method should be `static`; in Kotlin
//! it belongs in an `object` or a companion object.
//!
//! ## Anti-Pattern
//!
//! ```java
//! @Module
//! public class NetworkModule {
//!     @Provides
//!     OkHttpClient client() { return new OkHttpClient(); }
//! }
//! ```
//!
//! ## Why It's Bad
//!
//! - Every component has to allocate and hold a module instance
//! - Calls go through a virtual dispatch instead of a static call

use crate::analysis::detectors::Detector;
use crate::analysis::annotations::Concept;
use crate::analysis::fixes::insert_static;
use crate::analysis::query::{containing_type, has_annotation, is_interface, is_static};
use crate::analysis::{Finding, Fix, Issue, NodeKind, Sink};
use crate::graph::{Declaration, Graph, Language};

pub struct StaticProvidesDetector;

impl StaticProvidesDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StaticProvidesDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for StaticProvidesDetector {
    fn issues(&self) -> &'static [Issue] {
        &[Issue::ProvidesMethodShouldBeStatic]
    }

    fn node_kinds(&self) -> &'static [NodeKind] {
        &[NodeKind::Method]
    }

    fn visit(&self, graph: &Graph, decl: &Declaration, sink: &mut dyn Sink) {
        if !has_annotation(decl, Concept::Provides) || is_static(graph, decl) {
            return;
        }
        let Some(owner) = containing_type(graph, decl) else {
            return;
        };
        if is_interface(owner) {
            return;
        }

        let message = match decl.language {
            Language::Java => format!("@Provides method '{}' should be static", decl.name),
            Language::Kotlin => format!(
                "@Provides method '{}' should be declared in an object or a companion object",
                decl.name
            ),
        };
        sink.report(
            Finding::new(Issue::ProvidesMethodShouldBeStatic, decl)
                .with_message(message)
                .with_fix(insert_static(decl).map(Fix::Single)),
        );
    }
}
