//! @Binds Method Detector
//!
//! Checks the shape of `@Binds` methods: they must be abstract, take
//! exactly one parameter and return a supertype of that parameter.
//!
//! ## Anti-Pattern
//!
//! ```kotlin
//! @Module
//! abstract class DataModule {
//!     @Binds
//!     fun bindRepo(impl: RealRepo): Repo = impl     // not abstract
//!
//!     @Binds
//!     abstract fun bindCache(a: Cache, b: Cache): Cache  // two parameters
//!
//!     @Binds
//!     abstract fun bindClock(clock: SystemClock): Repo   // not a Repo
//! }
//! ```
//!
//! ## Why It's Bad
//!
//! - Dagger rejects every one of these at compile time, usually with an
//!   error far from the offending method
//! - A `@Binds` body is never executed, so logic in it silently does nothing

use crate::analysis::detectors::Detector;
use crate::analysis::annotations::Concept;
use crate::analysis::query::{has_annotation, is_abstract_method, is_subtype};
use crate::analysis::{Finding, Issue, NodeKind, Sink};
use crate::graph::{Declaration, Graph};

pub struct BindsMethodDetector;

impl BindsMethodDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BindsMethodDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for BindsMethodDetector {
    fn issues(&self) -> &'static [Issue] {
        &[
            Issue::BindsMustBeAbstract,
            Issue::BindsWrongParameterCount,
            Issue::BindsTypeMismatch,
        ]
    }

    fn node_kinds(&self) -> &'static [NodeKind] {
        &[NodeKind::Method]
    }

    fn visit(&self, graph: &Graph, decl: &Declaration, sink: &mut dyn Sink) {
        if !has_annotation(decl, Concept::Binds) {
            return;
        }

        if !is_abstract_method(graph, decl) {
            sink.report(Finding::new(Issue::BindsMustBeAbstract, decl));
        }

        let count = decl.parameters.len();
        if count != 1 {
            sink.report(
                Finding::new(Issue::BindsWrongParameterCount, decl).with_message(format!(
                    "@Binds method '{}' must have exactly one parameter, found {}",
                    decl.name, count
                )),
            );
        }

        let Some(ret) = &decl.return_type else {
            return;
        };
        if ret.is_void() {
            sink.report(
                Finding::new(Issue::BindsTypeMismatch, decl).with_message(format!(
                    "@Binds method '{}' must return the bound type, not {}",
                    decl.name, ret.text
                )),
            );
            return;
        }
        if let [param] = decl.parameters.as_slice() {
            let Some(param_type) = &param.type_ref else {
                return;
            };
            if is_subtype(graph, param_type, ret) == Some(false) {
                sink.report(
                    Finding::new(Issue::BindsTypeMismatch, decl).with_message(format!(
                        "@Binds method '{}' binds {} which is not a subtype of {}",
                        decl.name, param_type.text, ret.text
                    )),
                );
            }
        }
    }
}
