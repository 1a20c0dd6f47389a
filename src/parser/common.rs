use std::path::Path;
use tree_sitter::Node;

use crate::error::Result;
use crate::graph::{
    split_top_level, Annotation, AnnotationArgument, Declaration, DeclarationId, DeclarationKind,
    FileInfo, Location,
};

/// Output of parsing one source file, before name resolution
#[derive(Debug, Clone)]
pub struct ParsedFile {
    pub info: FileInfo,
    pub declarations: Vec<Declaration>,
}

/// Language front end
pub trait Parser: Send + Sync {
    fn parse(&self, path: &Path, source: &str) -> Result<ParsedFile>;
}

/// Enclosing declaration while walking a tree
#[derive(Debug, Clone)]
pub(crate) struct Scope {
    pub id: DeclarationId,
    pub fq_name: String,
    pub kind: DeclarationKind,
}

impl Scope {
    pub fn of(decl: &Declaration) -> Self {
        Self {
            id: decl.id.clone(),
            fq_name: decl.fq_name.clone(),
            kind: decl.kind,
        }
    }
}

const COMMENT_KINDS: &[&str] = &["comment", "line_comment", "block_comment", "multiline_comment"];

pub(crate) fn is_comment(node: Node) -> bool {
    COMMENT_KINDS.contains(&node.kind())
}

pub(crate) fn node_text<'a>(node: Node, source: &'a str) -> &'a str {
    node.utf8_text(source.as_bytes()).unwrap_or("")
}

pub(crate) fn children(node: Node) -> Vec<Node> {
    let mut cursor = node.walk();
    let result = node.children(&mut cursor).collect();
    result
}

pub(crate) fn named_children(node: Node) -> Vec<Node> {
    let mut cursor = node.walk();
    let result = node
        .named_children(&mut cursor)
        .filter(|n| !is_comment(*n))
        .collect();
    result
}

pub(crate) fn child_of_kind<'t>(node: Node<'t>, kind: &str) -> Option<Node<'t>> {
    let mut cursor = node.walk();
    let found = node.named_children(&mut cursor).find(|c| c.kind() == kind);
    found
}

pub(crate) fn location(path: &Path, node: Node) -> Location {
    let start = node.start_position();
    Location::new(
        path.to_path_buf(),
        start.row + 1,
        start.column + 1,
        node.start_byte(),
        node.end_byte(),
    )
}

pub(crate) fn declaration_id(path: &Path, node: Node) -> DeclarationId {
    DeclarationId::new(path.to_path_buf(), node.start_byte(), node.end_byte())
}

/// End offset of a node ignoring trailing whitespace it swallowed
pub(crate) fn trimmed_end(node: Node, source: &str) -> usize {
    node.start_byte() + node_text(node, source).trim_end().len()
}

const USE_SITE_TARGETS: &[&str] = &[
    "field:", "get:", "set:", "param:", "setparam:", "property:", "delegate:", "receiver:", "file:",
];

/// Parse annotation source text such as `@Named("io")`, `@field:Inject`,
/// `@dagger.Module(includes = [A::class])` or `@[Inject Named("x")]`
pub(crate) fn parse_annotations(text: &str, location: &Location) -> Vec<Annotation> {
    let Some(body) = text.trim().strip_prefix('@') else {
        return Vec::new();
    };
    let mut body = body.trim_start();
    for target in USE_SITE_TARGETS {
        if let Some(rest) = body.strip_prefix(target) {
            body = rest.trim_start();
            break;
        }
    }

    if let Some(inner) = body.strip_prefix('[') {
        let inner = inner.trim_end().trim_end_matches(']');
        return split_whitespace_top_level(inner)
            .iter()
            .filter_map(|a| parse_single(a, location))
            .collect();
    }

    parse_single(body, location).into_iter().collect()
}

fn parse_single(body: &str, location: &Location) -> Option<Annotation> {
    let body = body.trim();
    let name_end = body
        .find(|c: char| c == '(' || c == '<' || c.is_whitespace())
        .unwrap_or(body.len());
    let name: String = body[..name_end].chars().filter(|c| !c.is_whitespace()).collect();
    if name.is_empty() {
        return None;
    }

    let mut annotation = Annotation::new(name, location.clone());
    let rest = &body[name_end..];
    if let (Some(open), Some(close)) = (rest.find('('), rest.rfind(')')) {
        if close > open {
            annotation.arguments = split_top_level(&rest[open + 1..close])
                .into_iter()
                .map(|arg| parse_argument(&arg))
                .collect();
        }
    }
    Some(annotation)
}

fn parse_argument(arg: &str) -> AnnotationArgument {
    if let Some((key, value)) = arg.split_once('=') {
        let key = key.trim();
        let is_name = !key.is_empty() && key.chars().all(|c| c.is_alphanumeric() || c == '_');
        if is_name && !value.starts_with('=') {
            return AnnotationArgument {
                name: Some(key.to_string()),
                value: value.trim().to_string(),
            };
        }
    }
    AnnotationArgument {
        name: None,
        value: arg.trim().to_string(),
    }
}

fn split_whitespace_top_level(text: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut current = String::new();
    for c in text.chars() {
        match c {
            '(' | '[' | '<' => {
                depth += 1;
                current.push(c);
            }
            ')' | ']' | '>' => {
                depth -= 1;
                current.push(c);
            }
            c if c.is_whitespace() && depth == 0 => {
                if !current.is_empty() {
                    parts.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(c),
        }
    }
    if !current.is_empty() {
        parts.push(current);
    }
    parts
}

/// String literal values of an annotation argument: `"a"`, `{"a", "b"}`, `["a", "b"]`
pub fn string_values(value: &str) -> Vec<String> {
    let value = value.trim();
    let inner = value
        .strip_prefix('{')
        .and_then(|v| v.strip_suffix('}'))
        .or_else(|| value.strip_prefix('[').and_then(|v| v.strip_suffix(']')))
        .or_else(|| {
            value
                .strip_prefix("arrayOf(")
                .and_then(|v| v.strip_suffix(')'))
        })
        .unwrap_or(value);
    split_top_level(inner)
        .into_iter()
        .filter_map(|v| {
            let v = v.trim();
            v.strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .map(String::from)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn loc() -> Location {
        Location::new(PathBuf::from("A.kt"), 1, 1, 0, 0)
    }

    #[test]
    fn test_marker_annotation() {
        let anns = parse_annotations("@Inject", &loc());
        assert_eq!(anns.len(), 1);
        assert_eq!(anns[0].name, "Inject");
        assert!(anns[0].arguments.is_empty());
    }

    #[test]
    fn test_use_site_target() {
        let anns = parse_annotations("@field:Inject", &loc());
        assert_eq!(anns[0].name, "Inject");
    }

    #[test]
    fn test_arguments() {
        let anns = parse_annotations(
            "@ContributesBinding(AppScope::class, boundType = Any::class)",
            &loc(),
        );
        let ann = &anns[0];
        assert_eq!(ann.name, "ContributesBinding");
        assert_eq!(ann.argument("value"), Some("AppScope::class"));
        assert_eq!(ann.argument("boundType"), Some("Any::class"));
    }

    #[test]
    fn test_qualified_name_and_array() {
        let anns = parse_annotations("@dagger.Module(includes = {A.class, B.class})", &loc());
        assert_eq!(anns[0].name, "dagger.Module");
        assert_eq!(anns[0].simple_name(), "Module");
        assert_eq!(anns[0].argument("includes"), Some("{A.class, B.class}"));
    }

    #[test]
    fn test_multi_annotation() {
        let anns = parse_annotations("@set:[Inject Named(\"x\")]", &loc());
        let names: Vec<_> = anns.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Inject", "Named"]);
    }

    #[test]
    fn test_string_values() {
        assert_eq!(string_values("\"A\""), vec!["A"]);
        assert_eq!(string_values("{\"A\", \"B\"}"), vec!["A", "B"]);
        assert_eq!(string_values("[\"A\"]"), vec!["A"]);
        assert_eq!(string_values("arrayOf(\"A\")"), vec!["A"]);
        assert!(string_values("Foo::class").is_empty());
    }
}
