//! Field Injection Detector
//!
//! Prefers constructor injection. Field injection is only accepted in
//! classes the framework instantiates (activities, fragments, services,
//! views, ...), configured by an allow-list of base classes.
//!
//! ## Anti-Pattern
//!
//! ```kotlin
//! class CheckoutPresenter {
//!     @Inject lateinit var cart: Cart
//!     @Inject lateinit var payments: Payments
//! }
//! ```
//!
//! ## Why It's Bad
//!
//! - Dependencies are hidden and mutable, and the object is usable before
//!   they are set
//! - Tests have to build a component or poke fields to create the class
//!
//! ## Better Approach
//!
//! ```kotlin
//! class CheckoutPresenter @Inject constructor(
//!     private val cart: Cart,
//!     private val payments: Payments,
//! )
//! ```

use crate::analysis::detectors::Detector;
use crate::analysis::annotations::Concept;
use crate::analysis::query::{containing_type, extends_any, has_annotation, hierarchy_known};
use crate::analysis::{Finding, Issue, NodeKind, Sink};
use crate::config::Config;
use crate::graph::{Declaration, DeclarationKind, Graph};

pub struct FieldInjectionDetector {
    /// Base classes whose subclasses may use field injection
    allowed_types: Vec<String>,
}

impl FieldInjectionDetector {
    pub fn new() -> Self {
        Self::from_config(&Config::default())
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            allowed_types: config.field_injection_allowed(),
        }
    }

    /// Allow field injection in subclasses of `qualified`
    pub fn allow(mut self, qualified: &str) -> Self {
        self.allowed_types.push(qualified.to_string());
        self
    }
}

impl Default for FieldInjectionDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for FieldInjectionDetector {
    fn issues(&self) -> &'static [Issue] {
        &[Issue::ConstructorInjectionOverFieldInjection]
    }

    fn node_kinds(&self) -> &'static [NodeKind] {
        &[NodeKind::Field]
    }

    fn visit(&self, graph: &Graph, decl: &Declaration, sink: &mut dyn Sink) {
        if !has_annotation(decl, Concept::Inject) {
            return;
        }
        let Some(owner) = containing_type(graph, decl) else {
            return;
        };
        if owner.kind != DeclarationKind::Class {
            return;
        }
        if self.allowed_types.contains(&owner.fq_name)
            || extends_any(graph, owner, &self.allowed_types)
        {
            return;
        }
        // An unknown superclass may well be a framework class
        if !hierarchy_known(graph, owner) {
            return;
        }
        sink.report(
            Finding::new(Issue::ConstructorInjectionOverFieldInjection, decl).with_message(format!(
                "Prefer constructor injection over field injection for '{}' in '{}'",
                decl.name, owner.name
            )),
        );
    }
}
