//! Builders for the source edits detectors propose

use super::{LintFix, TextEdit};
use crate::graph::{Annotation, Declaration, Graph, Language};

/// Insert `@Annotation(args)` above a declaration and import what it needs.
///
/// `imports` lists the qualified names the new text refers to by simple
/// name; the annotation itself is always imported.
pub fn add_annotation(
    graph: &Graph,
    decl: &Declaration,
    qualified: &str,
    args: Option<&str>,
    imports: &[&str],
) -> LintFix {
    let simple = simple_name(qualified);
    let text = match args {
        Some(args) => format!("@{}({})", simple, args),
        None => format!("@{}", simple),
    };
    let indent = " ".repeat(decl.location.column.saturating_sub(1));
    let mut edits = vec![TextEdit::insert(
        decl.location.file.clone(),
        decl.location.start_byte,
        format!("{}\n{}", text, indent),
    )];
    edits.extend(import_edits(graph, decl, std::iter::once(qualified).chain(imports.iter().copied())));
    LintFix::new(format!("Add {}", text), edits)
}

/// Modifiers an interface cannot carry
const NOT_ON_INTERFACE: &[&str] = &[
    "final", "open", "data", "inner", "value", "inline", "enum", "annotation", "companion",
];

/// Turn a class or object into an interface. No fix when the declaration
/// has a modifier interfaces reject.
pub fn make_interface(decl: &Declaration) -> Option<LintFix> {
    if decl
        .modifiers
        .iter()
        .any(|m| NOT_ON_INTERFACE.contains(&m.as_str()))
    {
        return None;
    }
    rewrite_keyword(decl, "interface")
}

/// Replace the declaration keyword, e.g. `class` with `interface`
fn rewrite_keyword(decl: &Declaration, keyword: &str) -> Option<LintFix> {
    let (start, end) = decl.keyword_range?;
    Some(LintFix::new(
        format!("Make '{}' an {}", decl.name, keyword),
        vec![TextEdit::replace(
            decl.location.file.clone(),
            start,
            end,
            keyword.to_string(),
        )],
    ))
}

/// Swap an annotation use for `@Annotation(args)`
pub fn replace_annotation(
    graph: &Graph,
    decl: &Declaration,
    annotation: &Annotation,
    qualified: &str,
    args: Option<&str>,
) -> LintFix {
    let simple = simple_name(qualified);
    let text = match args {
        Some(args) => format!("@{}({})", simple, args),
        None => format!("@{}", simple),
    };
    let mut edits = vec![TextEdit::replace(
        annotation.location.file.clone(),
        annotation.location.start_byte,
        annotation.location.end_byte,
        text.clone(),
    )];
    edits.extend(import_edits(graph, decl, std::iter::once(qualified)));
    LintFix::new(
        format!("Replace @{} with {}", annotation.simple_name(), text),
        edits,
    )
}

pub fn remove_annotation(annotation: &Annotation) -> LintFix {
    LintFix::new(
        format!("Remove @{}", annotation.simple_name()),
        vec![TextEdit::replace(
            annotation.location.file.clone(),
            annotation.location.start_byte,
            annotation.location.end_byte,
            String::new(),
        )],
    )
}

/// Java only: add `static` in front of the declared return type
pub fn insert_static(decl: &Declaration) -> Option<LintFix> {
    if decl.language != Language::Java {
        return None;
    }
    let (start, _) = decl.type_range?;
    Some(LintFix::new(
        format!("Make '{}' static", decl.name),
        vec![TextEdit::insert(
            decl.location.file.clone(),
            start,
            "static ".to_string(),
        )],
    ))
}

/// Class literal for a possibly qualified type name, plus the import it needs
pub fn class_literal<'a>(language: Language, name: &'a str) -> (String, Option<&'a str>) {
    let simple = simple_name(name);
    let import = name.contains('.').then_some(name);
    (language.class_literal(simple), import)
}

fn import_edits<'a>(
    graph: &Graph,
    decl: &Declaration,
    names: impl Iterator<Item = &'a str>,
) -> Vec<TextEdit> {
    let Some(file) = graph.file(&decl.location.file) else {
        return Vec::new();
    };
    let mut seen = Vec::new();
    let mut edits = Vec::new();
    for name in names {
        if !name.contains('.') || seen.contains(&name) || file.imports_type(name) {
            continue;
        }
        // A different type already owns the simple name
        let simple = simple_name(name);
        if file
            .imports
            .iter()
            .any(|i| i.visible_name() == Some(simple) && i.path != name)
        {
            continue;
        }
        seen.push(name);
        let (offset, text) = file.import_edit(name);
        edits.push(TextEdit::insert(file.path.clone(), offset, text));
    }
    edits
}

fn simple_name(qualified: &str) -> &str {
    qualified.rsplit('.').next().unwrap_or(qualified)
}
