//! `@Suppress` / `@SuppressWarnings` handling

use super::annotations::Concept;
use super::Issue;
use crate::graph::{Annotation, Declaration, Graph};
use crate::parser::string_values;

const SUPPRESS_ALL: &str = "all";

/// Whether `issue` is suppressed on `decl`, one of its enclosing
/// declarations, or the whole file
pub fn is_suppressed(graph: &Graph, decl: &Declaration, issue: Issue) -> bool {
    let mut current = Some(decl);
    while let Some(d) = current {
        if suppresses(&d.annotations, issue) {
            return true;
        }
        current = graph.parent_of(d);
    }
    graph
        .file(&decl.location.file)
        .is_some_and(|file| suppresses(&file.file_annotations, issue))
}

fn suppresses(annotations: &[Annotation], issue: Issue) -> bool {
    annotations
        .iter()
        .filter(|a| is_suppress_annotation(a))
        .flat_map(|a| a.arguments.iter())
        .flat_map(|arg| string_values(&arg.value))
        .any(|id| id.eq_ignore_ascii_case(issue.id()) || id.eq_ignore_ascii_case(SUPPRESS_ALL))
}

fn is_suppress_annotation(annotation: &Annotation) -> bool {
    match annotation.qualified_name.as_deref() {
        Some(q) => Concept::Suppress.contains(q),
        None => matches!(annotation.name.as_str(), "Suppress" | "SuppressWarnings"),
    }
}
