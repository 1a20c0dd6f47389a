//! Concrete Component Detector
//!
//! Types annotated with a component annotation (`@Component`,
//! `@Subcomponent`, `@MergeComponent`, `@MergeSubcomponent`) are
//! implemented by generated code and must be an interface or abstract class.
//!
//! ## Anti-Pattern
//!
//! ```kotlin
//! @Component(modules = [AppModule::class])
//! class AppComponent {
//!     fun inject(app: App) {}
//! }
//! ```
//!
//! ## Why It's Bad
//!
//! - The generated `DaggerAppComponent` cannot extend a final class, so the
//!   build fails inside generated sources

use crate::analysis::detectors::Detector;
use crate::analysis::annotations::Concept;
use crate::analysis::fixes::make_interface;
use crate::analysis::query::{has_annotation, is_abstract_or_interface};
use crate::analysis::{Finding, Fix, Issue, NodeKind, Sink};
use crate::graph::{Declaration, DeclarationKind, Graph};

pub struct ComponentAbstractDetector;

impl ComponentAbstractDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ComponentAbstractDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for ComponentAbstractDetector {
    fn issues(&self) -> &'static [Issue] {
        &[Issue::ComponentMustBeAbstract]
    }

    fn node_kinds(&self) -> &'static [NodeKind] {
        &[NodeKind::Type]
    }

    fn visit(&self, _graph: &Graph, decl: &Declaration, sink: &mut dyn Sink) {
        if !has_annotation(decl, Concept::Component) || is_abstract_or_interface(decl) {
            return;
        }
        let fix = match decl.kind {
            DeclarationKind::Class | DeclarationKind::Object => make_interface(decl),
            _ => None,
        };
        sink.report(
            Finding::new(Issue::ComponentMustBeAbstract, decl).with_fix(fix.map(Fix::Single)),
        );
    }
}
