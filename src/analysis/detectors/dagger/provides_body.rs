//! Trivial @Provides Body Detector
//!
//! Looks at what a `@Provides` method body does. Two shapes have a better
//! alternative:
//!
//! - the body only calls the constructor of the returned type, which an
//!   `@Inject` constructor does for free
//! - the body returns its single parameter, or constructs a proper subtype
//!   of the return type, which is what `@Binds` expresses
//!
//! ## Anti-Pattern
//!
//! ```kotlin
//! @Provides fun repo(api: Api): Repo = Repo(api)
//! @Provides fun cache(impl: DiskCache): Cache = impl
//! @Provides fun clock(): Clock = SystemClock()
//! ```
//!
//! ## Why It's Bad
//!
//! - Hand-written provider code has to be kept in sync with constructors
//! - `@Binds` generates no method call at runtime

use crate::analysis::detectors::Detector;
use crate::analysis::annotations::Concept;
use crate::analysis::query::{has_annotation, is_subtype};
use crate::analysis::{Finding, Issue, NodeKind, Sink};
use crate::graph::{BodyShape, Declaration, Graph};

pub struct ProvidesBodyDetector;

impl ProvidesBodyDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ProvidesBodyDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for ProvidesBodyDetector {
    fn issues(&self) -> &'static [Issue] {
        &[
            Issue::ConstructorInjectionOverProvidesMethod,
            Issue::BindsOverProvides,
        ]
    }

    fn node_kinds(&self) -> &'static [NodeKind] {
        &[NodeKind::Method]
    }

    fn visit(&self, graph: &Graph, decl: &Declaration, sink: &mut dyn Sink) {
        if !has_annotation(decl, Concept::Provides) {
            return;
        }
        match &decl.body {
            Some(BodyShape::Identifier(name)) => {
                if let [param] = decl.parameters.as_slice() {
                    if &param.name == name {
                        sink.report(Finding::new(Issue::BindsOverProvides, decl).with_message(
                            format!(
                                "@Provides method '{}' returns its parameter unchanged; use @Binds instead",
                                decl.name
                            ),
                        ));
                    }
                }
            }
            Some(BodyShape::ConstructorCall(constructed)) => {
                // The constructor must belong to a class we can annotate
                let Some(target) = constructed
                    .qualified_name
                    .as_deref()
                    .and_then(|q| graph.find_type(q))
                else {
                    return;
                };
                let same_type = match &decl.return_type {
                    None => true,
                    Some(ret) => constructed.same_type(ret),
                };
                if same_type {
                    sink.report(
                        Finding::new(Issue::ConstructorInjectionOverProvidesMethod, decl)
                            .with_message(format!(
                                "@Provides method '{}' only calls the constructor of '{}'; add an @Inject constructor instead",
                                decl.name, target.name
                            )),
                    );
                } else if let Some(ret) = &decl.return_type {
                    if is_subtype(graph, constructed, ret) == Some(true) {
                        sink.report(Finding::new(Issue::BindsOverProvides, decl).with_message(
                            format!(
                                "@Provides method '{}' constructs '{}' for {}; use an @Inject constructor and @Binds instead",
                                decl.name, target.name, ret.text
                            ),
                        ));
                    }
                }
            }
            _ => {}
        }
    }
}
