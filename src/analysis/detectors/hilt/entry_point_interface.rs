//! Entry Point Must Be Interface Detector
//!
//! `@EntryPoint`, `@EarlyEntryPoint` and `@DefineComponent` types are
//! implemented by Hilt's generated components and must be interfaces.
//!
//! ## Anti-Pattern
//!
//! ```kotlin
//! @EntryPoint
//! @InstallIn(SingletonComponent::class)
//! abstract class ImageLoaderEntryPoint {
//!     abstract fun imageLoader(): ImageLoader
//! }
//! ```

use crate::analysis::detectors::Detector;
use crate::analysis::annotations::Concept;
use crate::analysis::fixes::make_interface;
use crate::analysis::query::{has_annotation, is_interface};
use crate::analysis::{Finding, Fix, Issue, NodeKind, Sink};
use crate::graph::{Declaration, DeclarationKind, Graph};

pub struct EntryPointInterfaceDetector;

impl EntryPointInterfaceDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for EntryPointInterfaceDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for EntryPointInterfaceDetector {
    fn issues(&self) -> &'static [Issue] {
        &[Issue::EntryPointMustBeInterface]
    }

    fn node_kinds(&self) -> &'static [NodeKind] {
        &[NodeKind::Type]
    }

    fn visit(&self, _graph: &Graph, decl: &Declaration, sink: &mut dyn Sink) {
        if !has_annotation(decl, Concept::HiltEntryPoint)
            && !has_annotation(decl, Concept::HiltDefineComponent)
        {
            return;
        }
        if is_interface(decl) {
            return;
        }
        let fix = match decl.kind {
            DeclarationKind::Class | DeclarationKind::Object => make_interface(decl),
            _ => None,
        };
        sink.report(
            Finding::new(Issue::EntryPointMustBeInterface, decl).with_fix(fix.map(Fix::Single)),
        );
    }
}
