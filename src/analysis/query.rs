//! Structural questions over declarations
//!
//! Every helper answers conservatively: an unresolved name, a missing
//! declaration or an incomplete hierarchy yields `false`/`None`, so rules
//! built on top of them stay silent rather than guess.

use super::annotations::Concept;
use crate::graph::{
    platform, Annotation, Declaration, DeclarationKind, Graph, Language, TypeRef,
};

/// Whether any annotation of `decl` is one of the concept's aliases
pub fn has_annotation(decl: &Declaration, concept: Concept) -> bool {
    find_annotation(decl, concept).is_some()
}

pub fn find_annotation(decl: &Declaration, concept: Concept) -> Option<&Annotation> {
    annotations_of(&decl.annotations, concept).next()
}

pub fn annotations_of(
    annotations: &[Annotation],
    concept: Concept,
) -> impl Iterator<Item = &Annotation> {
    annotations.iter().filter(move |a| {
        a.qualified_name
            .as_deref()
            .is_some_and(|q| concept.contains(q))
    })
}

/// Follow an annotation use back to the annotation class declaring it
pub fn resolve_annotation_declaration<'g>(
    graph: &'g Graph,
    annotation: &Annotation,
) -> Option<&'g Declaration> {
    let qualified = annotation.qualified_name.as_deref()?;
    graph
        .find_type(qualified)
        .filter(|d| d.kind == DeclarationKind::AnnotationClass)
}

/// An annotation is a scope when its declaration is itself annotated with
/// `@Scope`, or when it is one of the well-known library scopes
pub fn is_scope_annotation(graph: &Graph, annotation: &Annotation) -> bool {
    let Some(qualified) = annotation.qualified_name.as_deref() else {
        return false;
    };
    if Concept::KnownScope.contains(qualified) {
        return true;
    }
    resolve_annotation_declaration(graph, annotation)
        .is_some_and(|decl| has_annotation(decl, Concept::ScopeMarker))
}

pub fn scope_annotations<'a>(graph: &Graph, decl: &'a Declaration) -> Vec<&'a Annotation> {
    decl.annotations
        .iter()
        .filter(|a| is_scope_annotation(graph, a))
        .collect()
}

/// Whether `decl` inherits from `qualified_super`, directly or not.
/// The universal root never counts.
pub fn extends_transitively(graph: &Graph, decl: &Declaration, qualified_super: &str) -> bool {
    if crate::graph::UNIVERSAL_ROOTS.contains(&qualified_super) {
        return false;
    }
    graph.reaches(&decl.fq_name, qualified_super)
}

pub fn extends_any(graph: &Graph, decl: &Declaration, supers: &[impl AsRef<str>]) -> bool {
    supers
        .iter()
        .any(|s| extends_transitively(graph, decl, s.as_ref()))
}

/// Any written supertype other than `Any`/`Object`
pub fn has_usable_supertype(decl: &Declaration) -> bool {
    decl.super_types.iter().any(|t| !t.is_universal_root())
}

/// Written supertypes a binding could target: the universal root and
/// generic types are left out
pub fn bindable_supertypes(decl: &Declaration) -> impl Iterator<Item = &TypeRef> {
    decl.super_types
        .iter()
        .filter(|t| !t.is_universal_root() && !t.is_generic())
}

/// Whether `sub` is assignable to `sup`; `None` when the hierarchy is
/// not fully known
pub fn is_subtype(graph: &Graph, sub: &TypeRef, sup: &TypeRef) -> Option<bool> {
    if sup.is_universal_root() || sub.same_type(sup) {
        return Some(true);
    }
    let (Some(sub_q), Some(sup_q)) = (sub.qualified_name.as_deref(), sup.qualified_name.as_deref())
    else {
        return None;
    };
    if sub_q == sup_q {
        // Same class, different type arguments
        return if sup.is_generic() && sub.type_arguments != sup.type_arguments {
            None
        } else {
            Some(true)
        };
    }
    if graph.reaches(sub_q, sup_q) {
        return Some(true);
    }
    if hierarchy_complete(graph, sub_q, 0) {
        Some(false)
    } else {
        None
    }
}

/// Every ancestor of `decl` is either declared in the sources or a known
/// platform class
pub fn hierarchy_known(graph: &Graph, decl: &Declaration) -> bool {
    decl.super_types.iter().all(|t| {
        t.is_universal_root()
            || t.qualified_name
                .as_deref()
                .is_some_and(|q| hierarchy_complete(graph, q, 0))
    })
}

fn hierarchy_complete(graph: &Graph, fq_name: &str, depth: usize) -> bool {
    if depth > 32 {
        return false;
    }
    match graph.find_type(fq_name) {
        Some(decl) => decl.super_types.iter().all(|t| {
            t.is_universal_root()
                || t.qualified_name
                    .as_deref()
                    .is_some_and(|q| hierarchy_complete(graph, q, depth + 1))
        }),
        None => platform::is_platform_type(fq_name),
    }
}

pub fn is_interface(decl: &Declaration) -> bool {
    matches!(
        decl.kind,
        DeclarationKind::Interface | DeclarationKind::AnnotationClass
    )
}

pub fn is_abstract_or_interface(decl: &Declaration) -> bool {
    is_interface(decl) || decl.has_modifier("abstract") || decl.has_modifier("sealed")
}

/// Abstract method: declared `abstract`, or an interface member without a body
pub fn is_abstract_method(graph: &Graph, decl: &Declaration) -> bool {
    if decl.has_modifier("abstract") {
        return true;
    }
    !decl.has_body && graph.parent_of(decl).is_some_and(is_interface)
}

/// Compiles to a static member: Java `static`, or a Kotlin member of an
/// `object`/companion object, or a Kotlin top-level function
pub fn is_static(graph: &Graph, decl: &Declaration) -> bool {
    match decl.language {
        Language::Java => {
            decl.has_modifier("static")
                || (decl.kind == DeclarationKind::Field
                    && graph.parent_of(decl).is_some_and(is_interface))
        }
        Language::Kotlin => match graph.parent_of(decl) {
            Some(parent) => is_singleton_object(parent),
            None => decl.parent.is_none(),
        },
    }
}

/// Nearest enclosing type of a member
pub fn containing_type<'g>(graph: &'g Graph, decl: &Declaration) -> Option<&'g Declaration> {
    let mut current = graph.parent_of(decl)?;
    loop {
        if current.kind.is_type() {
            return Some(current);
        }
        current = graph.parent_of(current)?;
    }
}

/// Kotlin companion object: a singleton nested in a type
pub fn is_companion_singleton(decl: &Declaration) -> bool {
    decl.kind == DeclarationKind::CompanionObject
}

pub fn is_singleton_object(decl: &Declaration) -> bool {
    matches!(
        decl.kind,
        DeclarationKind::Object | DeclarationKind::CompanionObject
    )
}

pub fn members<'g>(graph: &'g Graph, decl: &Declaration) -> impl Iterator<Item = &'g Declaration> {
    graph.children_of(decl)
}

pub fn constructors<'g>(
    graph: &'g Graph,
    decl: &Declaration,
) -> impl Iterator<Item = &'g Declaration> {
    graph
        .children_of(decl)
        .filter(|d| d.kind == DeclarationKind::Constructor)
}

pub fn has_inject_constructor(graph: &Graph, decl: &Declaration) -> bool {
    constructors(graph, decl).any(|c| has_annotation(c, Concept::Inject))
}

pub fn has_assisted_inject_constructor(graph: &Graph, decl: &Declaration) -> bool {
    constructors(graph, decl).any(|c| has_annotation(c, Concept::AssistedInject))
}

/// Companion object declared inside a type
pub fn companion_of<'g>(graph: &'g Graph, decl: &Declaration) -> Option<&'g Declaration> {
    graph.children_of(decl).find(|d| is_companion_singleton(d))
}

/// Fields and properties carrying the inject marker, including Kotlin
/// `lateinit var` properties with `@field:Inject`
pub fn injected_fields<'g>(
    graph: &'g Graph,
    decl: &Declaration,
) -> impl Iterator<Item = &'g Declaration> {
    graph.children_of(decl).filter(|d| {
        matches!(d.kind, DeclarationKind::Field | DeclarationKind::Property)
            && has_annotation(d, Concept::Inject)
    })
}

/// `Foo::class` / `Foo.class` argument value naming the universal root
pub fn is_root_class_literal(value: &str) -> bool {
    let name = value
        .trim()
        .trim_end_matches("::class")
        .trim_end_matches(".class")
        .trim();
    matches!(
        name,
        "Any" | "kotlin.Any" | "Object" | "java.lang.Object"
    )
}
