use serde::Serialize;

/// Root of every class hierarchy, never a usable supertype
pub const UNIVERSAL_ROOTS: &[&str] = &["java.lang.Object", "kotlin.Any"];

const ROOT_SIMPLE_NAMES: &[&str] = &["Object", "Any"];

const VOID_NAMES: &[&str] = &["void", "Unit", "kotlin.Unit", "java.lang.Void", "Void"];

/// A reference to a type as written in source
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TypeRef {
    /// Full text without nullability, e.g. `Map<String, Foo>`
    pub text: String,
    /// Erased name as written, e.g. `Map` or `java.util.Map`
    pub name: String,
    /// Fully qualified erased name, once resolved
    pub qualified_name: Option<String>,
    pub type_arguments: Vec<String>,
    pub nullable: bool,
    /// Kotlin supertype written as a constructor call, `: Base()`
    pub invoked: bool,
}

impl TypeRef {
    /// Parse a written type such as `List<Foo>?` or `com.example.Bar`
    pub fn parse(text: &str) -> Option<Self> {
        let mut text = text.trim();
        // Annotated types (`@Named("x") Foo`) keep only the type
        while text.starts_with('@') {
            let rest = skip_annotation(text)?;
            text = rest.trim_start();
        }
        if text.is_empty() {
            return None;
        }

        let nullable = text.ends_with('?');
        let text = text.trim_end_matches('?').trim();
        // Parenthesised and function types are opaque
        if text.starts_with('(') {
            return Some(Self {
                text: text.to_string(),
                name: text.to_string(),
                qualified_name: None,
                type_arguments: Vec::new(),
                nullable,
                invoked: false,
            });
        }

        let (name, type_arguments) = match text.find('<') {
            Some(open) => {
                let close = text.rfind('>').unwrap_or(text.len());
                let inner = if close > open { &text[open + 1..close] } else { "" };
                (
                    text[..open].trim().to_string(),
                    split_top_level(inner)
                        .into_iter()
                        .filter(|a| !a.is_empty())
                        .collect(),
                )
            }
            None => (text.trim_end_matches("[]").trim().to_string(), Vec::new()),
        };

        Some(Self {
            text: text.to_string(),
            name: name.split_whitespace().collect::<Vec<_>>().join(""),
            qualified_name: None,
            type_arguments,
            nullable,
            invoked: false,
        })
    }

    pub fn simple_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }

    /// Qualified name when resolved, written name otherwise
    pub fn best_name(&self) -> &str {
        self.qualified_name.as_deref().unwrap_or(&self.name)
    }

    pub fn is_generic(&self) -> bool {
        !self.type_arguments.is_empty()
    }

    /// `void` in Java, `Unit` in Kotlin
    pub fn is_void(&self) -> bool {
        VOID_NAMES.contains(&self.name.as_str())
            || self
                .qualified_name
                .as_deref()
                .is_some_and(|q| q == "kotlin.Unit" || q == "java.lang.Void")
    }

    /// `java.lang.Object` / `kotlin.Any`
    pub fn is_universal_root(&self) -> bool {
        match &self.qualified_name {
            Some(q) => UNIVERSAL_ROOTS.contains(&q.as_str()),
            None => ROOT_SIMPLE_NAMES.contains(&self.name.as_str()),
        }
    }

    /// Same erased type, compared by qualified name when both sides are resolved
    pub fn same_type(&self, other: &TypeRef) -> bool {
        match (&self.qualified_name, &other.qualified_name) {
            (Some(a), Some(b)) => a == b && self.type_arguments == other.type_arguments,
            _ => self.text == other.text,
        }
    }
}

/// Split on commas that are not nested inside `<>`, `()`, `[]` or `{}`
pub fn split_top_level(text: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut in_string = false;
    let mut current = String::new();
    let mut prev = '\0';

    for c in text.chars() {
        match c {
            '"' if prev != '\\' => {
                in_string = !in_string;
                current.push(c);
            }
            '<' | '(' | '[' | '{' if !in_string => {
                depth += 1;
                current.push(c);
            }
            '>' | ')' | ']' | '}' if !in_string => {
                depth -= 1;
                current.push(c);
            }
            ',' if depth == 0 && !in_string => {
                parts.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
        prev = c;
    }
    if !current.trim().is_empty() {
        parts.push(current.trim().to_string());
    }
    parts
}

/// Skip one leading annotation (`@Foo` or `@Foo(...)`) and return the rest
fn skip_annotation(text: &str) -> Option<&str> {
    let body = text.strip_prefix('@')?;
    let name_end = body
        .find(|c: char| !(c.is_alphanumeric() || c == '_' || c == '.' || c == ':'))
        .unwrap_or(body.len());
    let rest = &body[name_end..];
    if let Some(args) = rest.strip_prefix('(') {
        let mut depth = 1;
        for (i, c) in args.char_indices() {
            match c {
                '(' => depth += 1,
                ')' => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(&args[i + 1..]);
                    }
                }
                _ => {}
            }
        }
        None
    } else {
        Some(rest)
    }
}
