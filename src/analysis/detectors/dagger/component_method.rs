//! Component Method Detector
//!
//! Every abstract method of a component is either a provision method (no
//! parameters, returns the requested type) or a members-injection method
//! (one parameter, returns nothing or the parameter type). Subcomponent
//! factory methods are the one other shape Dagger accepts.
//!
//! ## Anti-Pattern
//!
//! ```kotlin
//! @Component
//! interface AppComponent {
//!     fun repo(id: String): Repo            // provision with a parameter
//!     fun inject(a: MainActivity, b: App)   // injects two targets
//! }
//! ```
//!
//! ## Why It's Bad
//!
//! - Dagger rejects the component and the error names the generated
//!   class rather than the method

use crate::analysis::detectors::Detector;
use crate::analysis::annotations::Concept;
use crate::analysis::query::{has_annotation, is_abstract_method};
use crate::analysis::{Finding, Issue, NodeKind, Sink};
use crate::graph::{Declaration, Graph};

/// What an abstract component method is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentMethodShape {
    Provision,
    MembersInjection,
    /// Returns a subcomponent or its factory/builder
    SubcomponentFactory,
    Invalid,
}

/// Classify an abstract component method. `None` when the declared
/// return type is not written out.
pub fn classify_component_method(graph: &Graph, decl: &Declaration) -> Option<ComponentMethodShape> {
    let ret = decl.return_type.as_ref()?;
    let returns_subcomponent = ret
        .qualified_name
        .as_deref()
        .and_then(|q| graph.find_type(q))
        .is_some_and(|t| {
            has_annotation(t, Concept::Subcomponent)
                || graph
                    .parent_of(t)
                    .is_some_and(|p| has_annotation(p, Concept::Subcomponent))
        });

    let shape = match decl.parameters.as_slice() {
        [] if !ret.is_void() => ComponentMethodShape::Provision,
        [param]
            if ret.is_void()
                || param.type_ref.as_ref().is_some_and(|t| t.same_type(ret)) =>
        {
            ComponentMethodShape::MembersInjection
        }
        _ if returns_subcomponent => ComponentMethodShape::SubcomponentFactory,
        _ => ComponentMethodShape::Invalid,
    };
    Some(shape)
}

pub struct ComponentMethodDetector;

impl ComponentMethodDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ComponentMethodDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for ComponentMethodDetector {
    fn issues(&self) -> &'static [Issue] {
        &[Issue::InvalidComponentMethod]
    }

    fn node_kinds(&self) -> &'static [NodeKind] {
        &[NodeKind::Method]
    }

    fn visit(&self, graph: &Graph, decl: &Declaration, sink: &mut dyn Sink) {
        let Some(owner) = graph.parent_of(decl) else {
            return;
        };
        if !has_annotation(owner, Concept::Component) || !is_abstract_method(graph, decl) {
            return;
        }
        if classify_component_method(graph, decl) != Some(ComponentMethodShape::Invalid) {
            return;
        }

        let count = decl.parameters.len();
        let detail = if count == 0 {
            "a provision method cannot return Unit/void".to_string()
        } else if count == 1 {
            "a members-injection method must return Unit/void or its parameter type".to_string()
        } else {
            format!("it takes {} parameters", count)
        };
        sink.report(
            Finding::new(Issue::InvalidComponentMethod, decl).with_message(format!(
                "'{}' is neither a provision method nor a members-injection method: {}",
                decl.name, detail
            )),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::testing::DeclBuilder;

    fn component_graph(methods: Vec<DeclBuilder>) -> Graph {
        let mut graph = Graph::new();
        let component = DeclBuilder::interface("com.example.AppComponent")
            .annotated("dagger.Component")
            .build();
        let child = DeclBuilder::interface("com.example.UserComponent")
            .annotated("dagger.Subcomponent")
            .build();
        let factory = DeclBuilder::interface("Factory").in_type(&child).build();
        for method in methods {
            graph.add_declaration(method.in_type(&component).build());
        }
        graph.add_declaration(component);
        graph.add_declaration(child);
        graph.add_declaration(factory);
        graph
    }

    #[test]
    fn test_classification() {
        let graph = component_graph(vec![
            DeclBuilder::method("repo").returns("com.example.Repo"),
            DeclBuilder::method("inject")
                .param("activity", "com.example.MainActivity")
                .returns_void(),
            DeclBuilder::method("injectAndReturn")
                .param("activity", "com.example.MainActivity")
                .returns("com.example.MainActivity"),
            DeclBuilder::method("user")
                .param("module", "com.example.UserModule")
                .param("other", "com.example.OtherModule")
                .returns("com.example.UserComponent"),
            DeclBuilder::method("userFactory").returns("com.example.UserComponent.Factory"),
            DeclBuilder::method("nothing").returns_void(),
        ]);
        let shapes: Vec<_> = graph
            .declarations()
            .filter(|d| d.parent.is_some() && d.kind == crate::graph::DeclarationKind::Method)
            .map(|d| (d.name.as_str(), classify_component_method(&graph, d)))
            .collect();
        assert_eq!(
            shapes,
            vec![
                ("repo", Some(ComponentMethodShape::Provision)),
                ("inject", Some(ComponentMethodShape::MembersInjection)),
                ("injectAndReturn", Some(ComponentMethodShape::MembersInjection)),
                ("user", Some(ComponentMethodShape::SubcomponentFactory)),
                ("userFactory", Some(ComponentMethodShape::Provision)),
                ("nothing", Some(ComponentMethodShape::Invalid)),
            ]
        );
    }

    #[test]
    fn test_invalid_methods_reported() {
        let graph = component_graph(vec![
            DeclBuilder::method("repo")
                .param("id", "kotlin.String")
                .returns("com.example.Repo"),
            DeclBuilder::method("inject")
                .param("a", "com.example.MainActivity")
                .param("b", "com.example.App")
                .returns_void(),
        ]);
        let findings = ComponentMethodDetector::new().detect(&graph);
        assert_eq!(findings.len(), 2);
        assert!(findings[0].message.contains("members-injection method must return"));
        assert!(findings[1].message.contains("takes 2 parameters"));
    }

    #[test]
    fn test_default_methods_ignored() {
        let graph = component_graph(vec![DeclBuilder::method("helper")
            .param("a", "com.example.A")
            .param("b", "com.example.B")
            .returns("com.example.Repo")
            .has_body()]);
        assert!(ComponentMethodDetector::new().detect(&graph).is_empty());
    }

    #[test]
    fn test_methods_outside_components_ignored() {
        let mut graph = Graph::new();
        let iface = DeclBuilder::interface("com.example.Repo").build();
        graph.add_declaration(
            DeclBuilder::method("load")
                .in_type(&iface)
                .param("a", "com.example.A")
                .param("b", "com.example.B")
                .build(),
        );
        graph.add_declaration(iface);
        assert!(ComponentMethodDetector::new().detect(&graph).is_empty());
    }
}
